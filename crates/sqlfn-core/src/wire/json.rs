//! Name-keyed JSON encoding.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FunctionError;
use crate::function::IdentitySource;
use crate::types::{
    AggregationFunctionMetadata, Parameter, RoutineCharacteristics, Signature, SqlFunctionId,
};
use crate::SqlInvokedFunction;

/// The serialized form of a [`SqlInvokedFunction`].
///
/// Every key is required. Unknown keys are ignored so that newer peers can add
/// fields without breaking older ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunctionPayload {
    pub parameters: Vec<Parameter>,
    pub description: String,
    pub routine_characteristics: RoutineCharacteristics,
    pub body: String,
    pub variable_arity: bool,
    pub signature: Signature,
    pub function_id: SqlFunctionId,
}

impl FunctionPayload {
    /// Rebuilds an unversioned descriptor. The embedded function id is checked against
    /// the one derived from the signature.
    pub fn into_function(
        self,
        aggregation_metadata: Option<AggregationFunctionMetadata>,
    ) -> Result<SqlInvokedFunction, FunctionError> {
        SqlInvokedFunction::builder_from_signature(self.signature)
            .parameters(self.parameters)
            .description(self.description)
            .routine_characteristics(self.routine_characteristics)
            .body(self.body)
            .variable_arity(self.variable_arity)
            .aggregation_metadata(aggregation_metadata)
            .build(IdentitySource::Reconstruct {
                function_id: self.function_id,
                function_handle: None,
            })
    }
}

impl From<&SqlInvokedFunction> for FunctionPayload {
    fn from(function: &SqlInvokedFunction) -> Self {
        FunctionPayload {
            parameters: function.parameters().to_vec(),
            description: function.description().to_string(),
            routine_characteristics: function.routine_characteristics().clone(),
            body: function.body().to_string(),
            variable_arity: function.variable_arity(),
            signature: function.signature().clone(),
            function_id: function.function_id().clone(),
        }
    }
}

impl From<SqlInvokedFunction> for FunctionPayload {
    fn from(function: SqlInvokedFunction) -> Self {
        FunctionPayload::from(&function)
    }
}

/// Serde entry point. Only non-aggregates can come through here; aggregates go through
/// [`FunctionPayload::into_function`] with their metadata.
impl TryFrom<FunctionPayload> for SqlInvokedFunction {
    type Error = FunctionError;
    fn try_from(payload: FunctionPayload) -> Result<Self, Self::Error> {
        payload.into_function(None)
    }
}
