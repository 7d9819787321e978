//! # Value Shaping
//!
//! Before validation every candidate is shaped into the structure its
//! schema describes. Shaping always runs, even for values that already
//! conform, so that defaults and conversions apply uniformly.
//!
//! Shaping follows inline `properties` and `items` only. Subschemas
//! reached through `$ref` are validated but not shaped.

use serde_json::{Map, Number, Value};

use crate::options::ValidatorOptions;

/// Converts a plain value into the form a schema expects.
pub trait Shaper: Send + Sync {
    /// Produce the shaped copy of `value` for `schema`.
    fn shape(&self, schema: &Value, value: &Value, options: &ValidatorOptions) -> Value;
}

/// Schema-driven shaper.
///
/// - Absent properties with a declared `default` receive it.
/// - With `whitelist`, undeclared properties are dropped.
/// - With `enable_implicit_conversion`, strings are converted to the
///   declared `integer`, `number` or `boolean` type when they parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaShaper;

impl Shaper for SchemaShaper {
    fn shape(&self, schema: &Value, value: &Value, options: &ValidatorOptions) -> Value {
        shape_value(schema, value, options)
    }
}

fn shape_value(schema: &Value, value: &Value, options: &ValidatorOptions) -> Value {
    match value {
        Value::Object(map) => match schema.get("properties").and_then(Value::as_object) {
            Some(properties) => shape_object(properties, map, options),
            None => value.clone(),
        },
        Value::Array(items) => match schema.get("items") {
            Some(item_schema) if item_schema.is_object() => Value::Array(
                items
                    .iter()
                    .map(|item| shape_value(item_schema, item, options))
                    .collect(),
            ),
            _ => value.clone(),
        },
        Value::String(s) if options.enable_implicit_conversion => {
            convert_string(schema, s).unwrap_or_else(|| value.clone())
        }
        _ => value.clone(),
    }
}

fn shape_object(
    properties: &Map<String, Value>,
    map: &Map<String, Value>,
    options: &ValidatorOptions,
) -> Value {
    let mut shaped = Map::new();
    for (key, item) in map {
        match properties.get(key) {
            Some(property_schema) => {
                shaped.insert(key.clone(), shape_value(property_schema, item, options));
            }
            None if !options.whitelist => {
                shaped.insert(key.clone(), item.clone());
            }
            None => {}
        }
    }
    for (key, property_schema) in properties {
        if shaped.contains_key(key) {
            continue;
        }
        if let Some(default) = property_schema.get("default") {
            shaped.insert(key.clone(), default.clone());
        }
    }
    Value::Object(shaped)
}

fn convert_string(schema: &Value, s: &str) -> Option<Value> {
    match schema.get("type").and_then(Value::as_str)? {
        "integer" => s.trim().parse::<i64>().ok().map(Value::from),
        "number" => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        "boolean" => match s {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

/// Dotted paths of properties present in `value` but not declared by
/// `schema`, descending into declared object properties.
pub fn undeclared_properties(schema: &Value, value: &Value) -> Vec<String> {
    let mut found = Vec::new();
    collect_undeclared(schema, value, "", &mut found);
    found
}

fn collect_undeclared(schema: &Value, value: &Value, prefix: &str, found: &mut Vec<String>) {
    let (Some(properties), Some(map)) = (
        schema.get("properties").and_then(Value::as_object),
        value.as_object(),
    ) else {
        return;
    };
    for (key, item) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match properties.get(key) {
            Some(property_schema) => collect_undeclared(property_schema, item, &path, found),
            None => found.push(path),
        }
    }
}
