//! Request types describing a function to create.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{Parameter, QualifiedObjectName, TypeSignature};
use super::identity::FunctionVersion;
use super::routine::RoutineCharacteristics;
use super::signature::{
    AggregationFunctionMetadata, FunctionKind, LongVariableConstraint, TypeVariableConstraint,
};
use crate::error::FunctionError;
use crate::function::{IdentitySource, SqlInvokedFunction};

/// A user-supplied definition of a SQL function, e.g. parsed from a
/// `CREATE FUNCTION` statement or a JSON file.
///
/// Kind and aggregation metadata are independent fields here, so a definition can
/// describe an invalid pairing. [`FunctionDefinition::into_function`] rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDefinition {
    /// Namespace-qualified function name
    pub name: QualifiedObjectName,

    /// Declared parameters, in order
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// Declared return type
    pub return_type: TypeSignature,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Language, determinism, and null-call behavior
    #[serde(default)]
    pub routine_characteristics: RoutineCharacteristics,

    /// Function body text (not interpreted)
    pub body: String,

    /// Whether the last parameter accepts a variable number of arguments
    #[serde(default)]
    pub variable_arity: bool,

    /// Function kind (default SCALAR)
    #[serde(default)]
    pub kind: FunctionKind,

    /// Required for AGGREGATE functions, forbidden otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_metadata: Option<AggregationFunctionMetadata>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_variable_constraints: Vec<TypeVariableConstraint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub long_variable_constraints: Vec<LongVariableConstraint>,

    /// Optional version token to assign at creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl FunctionDefinition {
    /// Builds the descriptor, deriving its id (and handle, when a version is given).
    pub fn into_function(self) -> Result<SqlInvokedFunction, FunctionError> {
        let version = match self.version {
            Some(token) => FunctionVersion::Versioned(token),
            None => FunctionVersion::NotVersioned,
        };
        SqlInvokedFunction::builder(self.name, self.return_type)
            .parameters(self.parameters)
            .description(self.description)
            .routine_characteristics(self.routine_characteristics)
            .body(self.body)
            .variable_arity(self.variable_arity)
            .kind(self.kind)
            .aggregation_metadata(self.aggregation_metadata)
            .type_variable_constraints(self.type_variable_constraints)
            .long_variable_constraints(self.long_variable_constraints)
            .version(version)
            .build(IdentitySource::Derive)
    }
}
