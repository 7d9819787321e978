//! # Declared Parameter Types
//!
//! The declared type of each argument position, supplied explicitly when a
//! method is registered.

use std::fmt;
use std::str::FromStr;

use paramguard_core::SchemaId;

/// Declared type of one argument position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeclaredType {
    /// No schema. Raw validation of this position finds nothing.
    #[default]
    Untyped,
    /// A single value of the named schema.
    Schema(SchemaId),
    /// An array whose elements follow the named schema.
    ArrayOf(SchemaId),
}

impl DeclaredType {
    /// Shorthand for [`DeclaredType::Schema`].
    pub fn schema(name: impl Into<SchemaId>) -> Self {
        Self::Schema(name.into())
    }

    /// Shorthand for [`DeclaredType::ArrayOf`].
    pub fn array_of(name: impl Into<SchemaId>) -> Self {
        Self::ArrayOf(name.into())
    }

    /// Returns true for array types.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::ArrayOf(_))
    }

    /// Schema used when the raw argument is validated without an override.
    ///
    /// Arrays carry no constraints of their own, so only
    /// [`DeclaredType::Schema`] yields one.
    pub fn raw_schema(&self) -> Option<&SchemaId> {
        match self {
            Self::Schema(id) => Some(id),
            Self::Untyped | Self::ArrayOf(_) => None,
        }
    }

    /// Every schema this type refers to.
    pub fn referenced_schema(&self) -> Option<&SchemaId> {
        match self {
            Self::Schema(id) | Self::ArrayOf(id) => Some(id),
            Self::Untyped => None,
        }
    }
}

/// Parses `""`/`"any"` as untyped, `"Name[]"` as an array and anything
/// else as a schema name.
impl FromStr for DeclaredType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s {
            "" | "any" => Self::Untyped,
            _ => match s.strip_suffix("[]") {
                Some(inner) if !inner.is_empty() => Self::array_of(inner),
                _ => Self::schema(s),
            },
        })
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untyped => f.write_str("any"),
            Self::Schema(id) => write!(f, "{id}"),
            Self::ArrayOf(id) => write!(f, "{id}[]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!("".parse::<DeclaredType>().unwrap(), DeclaredType::Untyped);
        assert_eq!("any".parse::<DeclaredType>().unwrap(), DeclaredType::Untyped);
        assert_eq!(
            "BodyDto".parse::<DeclaredType>().unwrap(),
            DeclaredType::schema("BodyDto")
        );
        assert_eq!(
            " BodyDto[] ".parse::<DeclaredType>().unwrap(),
            DeclaredType::array_of("BodyDto")
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for t in [
            DeclaredType::Untyped,
            DeclaredType::schema("A"),
            DeclaredType::array_of("B"),
        ] {
            assert_eq!(t.to_string().parse::<DeclaredType>().unwrap(), t);
        }
    }

    #[test]
    fn test_raw_schema_excludes_arrays() {
        assert_eq!(DeclaredType::array_of("A").raw_schema(), None);
        assert_eq!(
            DeclaredType::array_of("A").referenced_schema(),
            Some(&SchemaId::from("A"))
        );
        assert!(DeclaredType::array_of("A").is_array());
        assert!(!DeclaredType::schema("A").is_array());
    }
}
