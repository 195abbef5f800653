//! Overload identity, version markers, and versioned handles.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{QualifiedObjectName, TypeSignature};

/// Whether a function definition has been committed under a version token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FunctionVersion {
    #[default]
    NotVersioned,
    Versioned(String),
}

impl FunctionVersion {
    pub fn versioned(token: impl Into<String>) -> Self {
        Self::Versioned(token.into())
    }

    pub fn has_version(&self) -> bool {
        matches!(self, Self::Versioned(_))
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Versioned(token) => Some(token),
            Self::NotVersioned => None,
        }
    }
}

impl fmt::Display for FunctionVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token().unwrap_or(""))
    }
}

/// Version-independent overload identity: qualified name plus ordered argument types.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct SqlFunctionId {
    pub function_name: QualifiedObjectName,
    pub argument_types: Vec<TypeSignature>,
}

impl SqlFunctionId {
    pub fn new(function_name: QualifiedObjectName, argument_types: Vec<TypeSignature>) -> Self {
        Self {
            function_name,
            argument_types,
        }
    }
}

impl fmt::Display for SqlFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function_name)?;
        for (i, ty) in self.argument_types.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{ty}")?;
        }
        f.write_str(")")
    }
}

/// Exact reference to one committed version of an overload.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct SqlFunctionHandle {
    pub function_id: SqlFunctionId,
    pub version: String,
}

impl SqlFunctionHandle {
    pub fn new(function_id: SqlFunctionId, version: impl Into<String>) -> Self {
        Self {
            function_id,
            version: version.into(),
        }
    }
}

impl fmt::Display for SqlFunctionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.function_id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_id() -> SqlFunctionId {
        let bigint = TypeSignature::parse("bigint").unwrap();
        SqlFunctionId::new("ns.add".parse().unwrap(), vec![bigint.clone(), bigint])
    }

    #[test]
    fn test_version_states() {
        let unversioned = FunctionVersion::default();
        assert!(!unversioned.has_version());
        assert_eq!(unversioned.token(), None);
        assert_eq!(unversioned.to_string(), "");

        let versioned = FunctionVersion::versioned("3");
        assert!(versioned.has_version());
        assert_eq!(versioned.token(), Some("3"));
        assert_eq!(versioned.to_string(), "3");
    }

    #[test]
    fn test_id_display() {
        assert_eq!(add_id().to_string(), "ns.add(bigint,bigint)");
    }

    #[test]
    fn test_handle_display() {
        let handle = SqlFunctionHandle::new(add_id(), "1");
        assert_eq!(handle.to_string(), "ns.add(bigint,bigint):1");
    }

    #[test]
    fn test_ids_order_by_name_then_types() {
        let varchar = TypeSignature::parse("varchar").unwrap();
        let other = SqlFunctionId::new("ns.add".parse().unwrap(), vec![varchar]);
        let sub = SqlFunctionId::new("ns.sub".parse().unwrap(), vec![]);
        let mut ids = vec![sub.clone(), other.clone(), add_id()];
        ids.sort();
        assert_eq!(ids, vec![add_id(), other, sub]);
    }

    #[test]
    fn test_handle_json() {
        let handle = SqlFunctionHandle::new(add_id(), "1");
        let json = serde_json::to_value(&handle).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "functionId": {
                    "functionName": "ns.add",
                    "argumentTypes": ["bigint", "bigint"]
                },
                "version": "1"
            })
        );
    }
}
