//! Food file rendering.
//!
//! The Lua food file is produced from an embedded Tera template. String
//! values pass through the `lua_string` filter; resource paths are already
//! Lua expressions and are emitted verbatim.

use crate::error::{FeederError, Result};
use fish_feeder::Food;
use log::debug;
use std::collections::HashMap;
use std::error::Error as _;
use tera::{Context, Tera, Value};

const TEMPLATE_NAME: &str = "food.lua";
const FOOD_TEMPLATE: &str = include_str!("../templates/food.lua.tera");

/// Renders [`Food`] values into GoFish Lua food files.
pub struct FoodRenderer {
    tera: Tera,
}

impl FoodRenderer {
    /// Create a renderer with the embedded food template.
    ///
    /// # Errors
    ///
    /// Returns [`FeederError::Render`] if the template fails to compile.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, FOOD_TEMPLATE)
            .map_err(|err| render_error(&err))?;
        tera.register_filter("lua_string", lua_string_filter);
        Ok(Self { tera })
    }

    /// Render `food` as Lua source.
    ///
    /// # Errors
    ///
    /// Returns [`FeederError::Render`] if the context cannot be built or the
    /// template fails.
    pub fn render(&self, food: &Food) -> Result<String> {
        debug!(
            "rendering food file for {} with {} packages",
            food.metadata.name,
            food.packages.len()
        );
        let context = Context::from_serialize(food).map_err(|err| render_error(&err))?;
        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|err| render_error(&err))
    }
}

/// Quote `text` as a double-quoted Lua string literal.
///
/// # Examples
///
/// ```
/// use fish_feeder_cli::render::lua_quote;
///
/// assert_eq!(lua_quote("bin\\hugo"), r#""bin\\hugo""#);
/// assert_eq!(lua_quote("say \"hi\"\n"), r#""say \"hi\"\n""#);
/// ```
#[must_use]
pub fn lua_quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

fn lua_string_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    match value {
        Value::String(text) => Ok(Value::String(lua_quote(text))),
        Value::Null => Ok(Value::String(lua_quote(""))),
        other => Ok(Value::String(lua_quote(&other.to_string()))),
    }
}

/// Flatten a Tera error and its causes into one message.
fn render_error(err: &tera::Error) -> FeederError {
    let mut reason = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        reason.push_str(": ");
        reason.push_str(&inner.to_string());
        cause = inner.source();
    }
    FeederError::Render { reason }
}
