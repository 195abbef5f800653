//! Names, types, and parameters shared by every function description.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::InvariantViolation;

/// A function name qualified by its namespace, e.g. `catalog.schema.add`.
///
/// The object name is the last dot-separated part; everything before it is the
/// namespace. Both are trimmed and must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedObjectName {
    namespace: String,
    object_name: String,
}

impl QualifiedObjectName {
    pub fn new(
        namespace: impl Into<String>,
        object_name: impl Into<String>,
    ) -> Result<Self, InvariantViolation> {
        let namespace = namespace.into().trim().to_string();
        let object_name = object_name.into().trim().to_string();
        if namespace.is_empty()
            || object_name.is_empty()
            || object_name.contains('.')
            || namespace.split('.').any(str::is_empty)
        {
            return Err(InvariantViolation::InvalidName(format!(
                "{namespace}.{object_name}"
            )));
        }
        Ok(Self {
            namespace,
            object_name,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }
}

impl FromStr for QualifiedObjectName {
    type Err = InvariantViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, object_name) = s
            .trim()
            .rsplit_once('.')
            .ok_or_else(|| InvariantViolation::InvalidName(s.to_string()))?;
        Self::new(namespace, object_name).map_err(|_| InvariantViolation::InvalidName(s.to_string()))
    }
}

impl TryFrom<String> for QualifiedObjectName {
    type Error = InvariantViolation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QualifiedObjectName> for String {
    fn from(name: QualifiedObjectName) -> Self {
        name.to_string()
    }
}

impl fmt::Display for QualifiedObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.object_name)
    }
}

impl JsonSchema for QualifiedObjectName {
    fn schema_name() -> Cow<'static, str> {
        "QualifiedObjectName".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "description": "Namespace-qualified function name, e.g. 'example.ns.add'.",
            "pattern": "^[^.]+(\\.[^.]+)+$"
        })
    }
}

/// An opaque, normalized SQL type name such as `bigint` or `array(varchar)`.
///
/// Types are compared by their normalized spelling only; nothing here resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeSignature(String);

impl TypeSignature {
    /// Normalizes a type name (trimmed, ASCII lowercase).
    pub fn parse(raw: &str) -> Result<Self, InvariantViolation> {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(InvariantViolation::InvalidType(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TypeSignature {
    type Err = InvariantViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeSignature {
    type Error = InvariantViolation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TypeSignature> for String {
    fn from(ty: TypeSignature) -> Self {
        ty.0
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl JsonSchema for TypeSignature {
    fn schema_name() -> Cow<'static, str> {
        "TypeSignature".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "description": "SQL type name, compared case-insensitively.",
            "minLength": 1
        })
    }
}

/// A declared function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name as referenced by the function body
    pub name: String,

    /// Declared parameter type
    #[serde(rename = "type")]
    pub ty: TypeSignature,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeSignature) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_two_parts() {
        let name: QualifiedObjectName = "ns.add".parse().unwrap();
        assert_eq!(name.namespace(), "ns");
        assert_eq!(name.object_name(), "add");
        assert_eq!(name.to_string(), "ns.add");
    }

    #[test]
    fn test_qualified_name_three_parts() {
        let name: QualifiedObjectName = "example.ns.add".parse().unwrap();
        assert_eq!(name.namespace(), "example.ns");
        assert_eq!(name.object_name(), "add");
    }

    #[test]
    fn test_qualified_name_rejects_unqualified() {
        assert!(matches!(
            "add".parse::<QualifiedObjectName>(),
            Err(InvariantViolation::InvalidName(_))
        ));
        assert!("ns.".parse::<QualifiedObjectName>().is_err());
        assert!(".add".parse::<QualifiedObjectName>().is_err());
        assert!("a..add".parse::<QualifiedObjectName>().is_err());
    }

    #[test]
    fn test_qualified_name_parts_are_trimmed() {
        let name = QualifiedObjectName::new(" ns", "add ").unwrap();
        assert_eq!(name.namespace(), "ns");
        assert_eq!(name.object_name(), "add");
        assert_eq!(name, "ns.add".parse().unwrap());
        assert_eq!(name.to_string().parse::<QualifiedObjectName>().unwrap(), name);
        assert!(QualifiedObjectName::new("ns", "  ").is_err());
    }

    #[test]
    fn test_qualified_name_serializes_as_string() {
        let name: QualifiedObjectName = "ns.add".parse().unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"ns.add\"");

        let back: QualifiedObjectName = serde_json::from_str("\"ns.add\"").unwrap();
        assert_eq!(back, name);

        assert!(serde_json::from_str::<QualifiedObjectName>("\"add\"").is_err());
    }

    #[test]
    fn test_type_signature_normalizes() {
        let ty = TypeSignature::parse("  BIGINT ").unwrap();
        assert_eq!(ty.as_str(), "bigint");
        assert_eq!(ty, TypeSignature::parse("bigint").unwrap());
    }

    #[test]
    fn test_type_signature_rejects_empty() {
        assert!(matches!(
            TypeSignature::parse("   "),
            Err(InvariantViolation::InvalidType(_))
        ));
    }

    #[test]
    fn test_parameter_display() {
        let param = Parameter::new("a", TypeSignature::parse("bigint").unwrap());
        assert_eq!(param.to_string(), "a bigint");
    }

    #[test]
    fn test_parameter_json_uses_type_key() {
        let param = Parameter::new("a", TypeSignature::parse("bigint").unwrap());
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json, serde_json::json!({"name": "a", "type": "bigint"}));
    }
}
