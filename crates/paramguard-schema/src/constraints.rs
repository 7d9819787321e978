//! # Constraint Mapping
//!
//! Translates `jsonschema` errors into constraint keys and messages:
//!
//! | JSON Schema | Constraint key |
//! |---|---|
//! | `format: email` | `isEmail` |
//! | `format: uri` | `isUrl` |
//! | `format: uuid` | `isUUID` |
//! | `format: date-time` | `isDateString` |
//! | other `format` | `isFormat` |
//! | `required` | `isDefined` |
//! | `type` | `isString`, `isNumber`, `isInt`, `isBoolean`, `isObject`, `isArray`, `isNull` |
//! | `minLength` / `maxLength` | `minLength` / `maxLength` |
//! | `pattern` | `matches` |
//! | `enum` | `isIn` |
//! | `const` | `equals` |
//! | `minimum` / `maximum` | `min` / `max` |
//! | `minItems` / `maxItems` | `arrayMinSize` / `arrayMaxSize` |
//! | `additionalProperties` | `whitelistValidation` |
//!
//! Any other keyword is reported under its own name with the engine's
//! message.

use jsonschema::error::ValidationErrorKind;
use jsonschema::ValidationError;
use serde_json::Value;

/// One failed constraint, located in the validated value.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    /// JSON Pointer of the object holding the failing property.
    pub parent_pointer: String,
    /// Dotted path of the failing property. Empty for the value itself.
    pub property: String,
    /// Constraint key.
    pub key: String,
    /// Human-readable message.
    pub message: String,
    /// The failing value, when present.
    pub value: Option<Value>,
}

/// Describe a `jsonschema` error as one or more findings.
///
/// `schema` is the root document the validator was compiled from; keyword
/// arguments (limits, patterns) are read from it where the error's schema
/// path resolves locally.
pub fn describe(error: &ValidationError<'_>, schema: &Value) -> Vec<Finding> {
    let instance_pointer = error.instance_path.to_string();

    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = property
                .as_str()
                .map(str::to_owned)
                .unwrap_or_else(|| property.to_string());
            vec![Finding {
                parent_pointer: instance_pointer.clone(),
                property: join_dotted(&pointer_to_dotted(&instance_pointer), &name),
                key: "isDefined".to_string(),
                message: format!("{name} should not be null or undefined"),
                value: None,
            }]
        }
        ValidationErrorKind::AdditionalProperties { unexpected } => unexpected
            .iter()
            .map(|name| Finding {
                parent_pointer: instance_pointer.clone(),
                property: join_dotted(&pointer_to_dotted(&instance_pointer), name),
                key: "whitelistValidation".to_string(),
                message: format!("property {name} should not exist"),
                value: error.instance.get(name.as_str()).cloned(),
            })
            .collect(),
        ValidationErrorKind::Format { format } => {
            let property = pointer_to_dotted(&instance_pointer);
            let label = leaf_name(&property);
            let (key, message) = match format.as_str() {
                "email" => ("isEmail", format!("{label} must be an email")),
                "uri" | "url" => ("isUrl", format!("{label} must be a URL address")),
                "uuid" => ("isUUID", format!("{label} must be a UUID")),
                "date-time" => (
                    "isDateString",
                    format!("{label} must be a valid ISO 8601 date string"),
                ),
                other => ("isFormat", format!("{label} must match format {other}")),
            };
            vec![located(&instance_pointer, key, message, error)]
        }
        _ => {
            let schema_pointer = error.schema_path.to_string();
            let keyword = schema_pointer.rsplit('/').next().unwrap_or_default();
            let argument = schema.pointer(&schema_pointer);
            let property = pointer_to_dotted(&instance_pointer);
            let label = leaf_name(&property);
            let (key, message) = keyword_constraint(keyword, argument, label)
                .unwrap_or_else(|| (keyword.to_string(), error.to_string()));
            vec![located(&instance_pointer, &key, message, error)]
        }
    }
}

fn located(
    instance_pointer: &str,
    key: &str,
    message: String,
    error: &ValidationError<'_>,
) -> Finding {
    Finding {
        parent_pointer: parent_pointer(instance_pointer).to_string(),
        property: pointer_to_dotted(instance_pointer),
        key: key.to_string(),
        message,
        value: Some(error.instance.clone().into_owned()),
    }
}

/// Map a keyword and its schema argument to a constraint key and message.
/// `None` when the keyword is unknown or its argument is not available.
fn keyword_constraint(
    keyword: &str,
    argument: Option<&Value>,
    label: &str,
) -> Option<(String, String)> {
    let argument = argument?;
    let (key, message) = match keyword {
        "type" => return type_constraint(argument, label),
        "minLength" => (
            "minLength",
            format!("{label} must be longer than or equal to {argument} characters"),
        ),
        "maxLength" => (
            "maxLength",
            format!("{label} must be shorter than or equal to {argument} characters"),
        ),
        "pattern" => (
            "matches",
            format!("{label} must match {} regular expression", plain(argument)),
        ),
        "enum" => {
            let options: Vec<String> = argument
                .as_array()?
                .iter()
                .map(|v| plain(v).to_string())
                .collect();
            (
                "isIn",
                format!("{label} must be one of the following values: {}", options.join(", ")),
            )
        }
        "const" => ("equals", format!("{label} must be equal to {}", plain(argument))),
        "minimum" => ("min", format!("{label} must not be less than {argument}")),
        "maximum" => ("max", format!("{label} must not be greater than {argument}")),
        "minItems" => (
            "arrayMinSize",
            format!("{label} must contain at least {argument} elements"),
        ),
        "maxItems" => (
            "arrayMaxSize",
            format!("{label} must contain no more than {argument} elements"),
        ),
        _ => return None,
    };
    Some((key.to_string(), message))
}

fn type_constraint(argument: &Value, label: &str) -> Option<(String, String)> {
    if let Some(types) = argument.as_array() {
        let names: Vec<&str> = types.iter().filter_map(Value::as_str).collect();
        return Some((
            "isType".to_string(),
            format!("{label} must be one of the types: {}", names.join(", ")),
        ));
    }
    let (key, message) = match argument.as_str()? {
        "string" => ("isString", format!("{label} must be a string")),
        "number" => (
            "isNumber",
            format!("{label} must be a number conforming to the specified constraints"),
        ),
        "integer" => ("isInt", format!("{label} must be an integer number")),
        "boolean" => ("isBoolean", format!("{label} must be a boolean value")),
        "object" => ("isObject", format!("{label} must be an object")),
        "array" => ("isArray", format!("{label} must be an array")),
        "null" => ("isNull", format!("{label} must be null")),
        _ => return None,
    };
    Some((key.to_string(), message))
}

/// Strings render without quotes; everything else as JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `/address/city` → `address.city`, unescaping `~1` and `~0`.
pub fn pointer_to_dotted(pointer: &str) -> String {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}

fn join_dotted(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn parent_pointer(pointer: &str) -> &str {
    pointer.rsplit_once('/').map_or("", |(parent, _)| parent)
}

fn leaf_name(property: &str) -> &str {
    match property.rsplit('.').next() {
        Some(leaf) if !leaf.is_empty() => leaf,
        _ => "value",
    }
}
