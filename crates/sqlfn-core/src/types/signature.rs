//! Function kinds and the derived function signature.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{QualifiedObjectName, TypeSignature};
use crate::error::InvariantViolation;

/// The plain kind tag carried by a [`Signature`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunctionKind {
    #[default]
    Scalar,
    Aggregate,
    Window,
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.write_str("SCALAR"),
            Self::Aggregate => f.write_str("AGGREGATE"),
            Self::Window => f.write_str("WINDOW"),
        }
    }
}

/// Extra metadata every aggregate function needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregationFunctionMetadata {
    /// Type of the intermediate (accumulator) state
    pub intermediate_type: TypeSignature,

    /// Whether the result depends on the order of input rows
    #[serde(default)]
    pub is_order_sensitive: bool,
}

impl AggregationFunctionMetadata {
    pub fn new(intermediate_type: TypeSignature, is_order_sensitive: bool) -> Self {
        Self {
            intermediate_type,
            is_order_sensitive,
        }
    }
}

impl fmt::Display for AggregationFunctionMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "intermediate_type={}, order_sensitive={}",
            self.intermediate_type, self.is_order_sensitive
        )
    }
}

/// Function kind with the aggregate payload attached.
///
/// Only `Aggregate` carries [`AggregationFunctionMetadata`], so a scalar function with
/// aggregation metadata (or an aggregate without it) cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoutineKind {
    Scalar,
    Aggregate(AggregationFunctionMetadata),
    Window,
}

impl RoutineKind {
    /// Pairs a kind tag with optional metadata, rejecting mismatched pairs.
    pub fn try_new(
        kind: FunctionKind,
        aggregation_metadata: Option<AggregationFunctionMetadata>,
    ) -> Result<Self, InvariantViolation> {
        match (kind, aggregation_metadata) {
            (FunctionKind::Scalar, None) => Ok(Self::Scalar),
            (FunctionKind::Window, None) => Ok(Self::Window),
            (FunctionKind::Aggregate, Some(metadata)) => Ok(Self::Aggregate(metadata)),
            (kind, metadata) => Err(InvariantViolation::AggregationMetadataMismatch {
                kind,
                has_metadata: metadata.is_some(),
            }),
        }
    }

    pub fn kind(&self) -> FunctionKind {
        match self {
            Self::Scalar => FunctionKind::Scalar,
            Self::Aggregate(_) => FunctionKind::Aggregate,
            Self::Window => FunctionKind::Window,
        }
    }

    pub fn aggregation_metadata(&self) -> Option<&AggregationFunctionMetadata> {
        match self {
            Self::Aggregate(metadata) => Some(metadata),
            Self::Scalar | Self::Window => None,
        }
    }
}

impl From<AggregationFunctionMetadata> for RoutineKind {
    fn from(metadata: AggregationFunctionMetadata) -> Self {
        Self::Aggregate(metadata)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeVariableConstraint {
    pub name: String,
    #[serde(default)]
    pub comparable_required: bool,
    #[serde(default)]
    pub orderable_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variadic_bound: Option<String>,
    #[serde(default)]
    pub non_decimal_numeric_required: bool,
}

impl TypeVariableConstraint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comparable_required: false,
            orderable_required: false,
            variadic_bound: None,
            non_decimal_numeric_required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LongVariableConstraint {
    pub name: String,
    pub expression: String,
}

impl LongVariableConstraint {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
        }
    }
}

/// The resolvable shape of a function: name, kind, types, and arity.
///
/// `argument_types` is always the ordered list of the owning function's parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub name: QualifiedObjectName,
    pub kind: FunctionKind,
    #[serde(default)]
    pub type_variable_constraints: Vec<TypeVariableConstraint>,
    #[serde(default)]
    pub long_variable_constraints: Vec<LongVariableConstraint>,
    pub return_type: TypeSignature,
    pub argument_types: Vec<TypeSignature>,
    #[serde(default)]
    pub variable_arity: bool,
}

impl Signature {
    pub fn new(
        name: QualifiedObjectName,
        kind: FunctionKind,
        type_variable_constraints: Vec<TypeVariableConstraint>,
        long_variable_constraints: Vec<LongVariableConstraint>,
        return_type: TypeSignature,
        argument_types: Vec<TypeSignature>,
        variable_arity: bool,
    ) -> Self {
        Self {
            name,
            kind,
            type_variable_constraints,
            long_variable_constraints,
            return_type,
            argument_types,
            variable_arity,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, ty) in self.argument_types.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{ty}")?;
        }
        if self.variable_arity {
            f.write_str("...")?;
        }
        write!(f, "):{}", self.return_type)
    }
}

/// Who may resolve a function. SQL-invoked functions are always public, so this is
/// the only variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlFunctionVisibility {
    Public,
}
