//! Parser for `on_change` attribute values.
//!
//! The grammar is deliberately tiny: `name(arg, arg, ...)` where the closing
//! parenthesis must be the last character of the value.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::ArgValue;

static RE_TRIGGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)\((.*)\)$").unwrap());

/// A parsed `on_change` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerCall {
    pub name: String,
    pub args: Vec<ArgValue>,
}

/// Parse a raw attribute value. Returns `None` when the value does not have
/// the `name(args)` shape.
pub fn parse_trigger(value: &str) -> Option<TriggerCall> {
    let caps = RE_TRIGGER.captures(value)?;
    let name = caps.get(1).map_or("", |m| m.as_str());
    let raw_args = caps.get(2).map_or("", |m| m.as_str());

    let args = raw_args
        .split(',')
        .map(|token| ArgValue::from_token(token.trim()))
        .collect();

    Some(TriggerCall {
        name: name.to_string(),
        args,
    })
}
