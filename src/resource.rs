//! Installable resource layouts for each OS kind.
//!
//! GoFish food files describe each extracted binary with a path inside the
//! archive and an install path under the GoFish barrel. Both are Lua string
//! expressions built around the software name. Here they are modelled as a
//! literal prefix and suffix wrapped around that single placeholder, so they
//! can be expanded for a concrete name or written back out as Lua.

use crate::taxonomy::OsKind;
use serde::{Serialize, Serializer};
use std::fmt;

/// A path built from the software name with fixed text on either side.
///
/// # Examples
///
/// ```
/// use fish_feeder::resource::PathExpr;
///
/// let expr = PathExpr::new("bin/", "");
/// assert_eq!(expr.expand("hugo"), "bin/hugo");
/// assert_eq!(expr.to_string(), r#""bin/" .. name"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathExpr {
    prefix: &'static str,
    suffix: &'static str,
}

impl PathExpr {
    /// Create an expression of the form `prefix .. name .. suffix`.
    #[must_use]
    pub const fn new(prefix: &'static str, suffix: &'static str) -> Self {
        Self { prefix, suffix }
    }

    /// Substitute `name` and return the concrete path.
    #[must_use]
    pub fn expand(&self, name: &str) -> String {
        format!("{}{name}{}", self.prefix, self.suffix)
    }
}

/// Formats the expression as a Lua concatenation over the `name` variable.
impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.prefix.is_empty() {
            write_lua_literal(f, self.prefix)?;
            f.write_str(" .. ")?;
        }
        f.write_str("name")?;
        if !self.suffix.is_empty() {
            f.write_str(" .. ")?;
            write_lua_literal(f, self.suffix)?;
        }
        Ok(())
    }
}

impl Serialize for PathExpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn write_lua_literal(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in text.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            other => write!(f, "{other}")?,
        }
    }
    f.write_str("\"")
}

/// How one binary is located in the archive and installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceTemplate {
    /// Path of the binary inside the extracted archive.
    pub path: PathExpr,
    /// Destination path relative to the GoFish barrel.
    #[serde(rename = "installpath")]
    pub install_path: PathExpr,
    /// Whether the installed file is marked executable.
    pub executable: bool,
}

/// Layout for Unix-like systems: `name` installed as `bin/name`.
pub static UNIX_RESOURCE: ResourceTemplate = ResourceTemplate {
    path: PathExpr::new("", ""),
    install_path: PathExpr::new("bin/", ""),
    executable: true,
};

/// Layout for Windows: `name.exe` installed as `bin\name.exe`.
pub static WINDOWS_RESOURCE: ResourceTemplate = ResourceTemplate {
    path: PathExpr::new("", ".exe"),
    install_path: PathExpr::new("bin\\", ".exe"),
    executable: true,
};

/// Return the shared resource layout for an OS kind.
///
/// # Examples
///
/// ```
/// use fish_feeder::resource::resolve_resource;
/// use fish_feeder::taxonomy::OsKind;
///
/// let windows = resolve_resource(OsKind::Windows);
/// assert_eq!(windows.path.expand("hugo"), "hugo.exe");
/// ```
#[must_use]
pub fn resolve_resource(kind: OsKind) -> &'static ResourceTemplate {
    match kind {
        OsKind::Unix => &UNIX_RESOURCE,
        OsKind::Windows => &WINDOWS_RESOURCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unix(OsKind::Unix, "hugo", "bin/hugo")]
    #[case::windows(OsKind::Windows, "hugo.exe", "bin\\hugo.exe")]
    fn expands_paths_for_name(
        #[case] kind: OsKind,
        #[case] path: &str,
        #[case] install_path: &str,
    ) {
        let resource = resolve_resource(kind);
        assert_eq!(resource.path.expand("hugo"), path);
        assert_eq!(resource.install_path.expand("hugo"), install_path);
        assert!(resource.executable);
    }

    #[rstest]
    #[case::bare(PathExpr::new("", ""), "name")]
    #[case::prefixed(PathExpr::new("bin/", ""), r#""bin/" .. name"#)]
    #[case::suffixed(PathExpr::new("", ".exe"), r#"name .. ".exe""#)]
    #[case::escaped(PathExpr::new("bin\\", ".exe"), r#""bin\\" .. name .. ".exe""#)]
    fn displays_lua_expression(#[case] expr: PathExpr, #[case] expected: &str) {
        assert_eq!(expr.to_string(), expected);
    }

    #[test]
    fn same_kind_shares_one_template() {
        assert!(std::ptr::eq(
            resolve_resource(OsKind::Unix),
            resolve_resource(OsKind::Unix)
        ));
    }
}
