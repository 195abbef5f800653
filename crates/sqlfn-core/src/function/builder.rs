//! The single construction path for [`SqlInvokedFunction`].

use super::{argument_types, check_handle, check_identity, check_signature, SqlInvokedFunction};
use crate::error::{FunctionError, InvariantViolation};
use crate::types::{
    AggregationFunctionMetadata, FunctionKind, FunctionVersion, LongVariableConstraint, Parameter,
    QualifiedObjectName, RoutineCharacteristics, RoutineKind, Signature, SqlFunctionHandle,
    SqlFunctionId, TypeSignature, TypeVariableConstraint,
};

/// Where a new descriptor's function id and handle come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySource {
    /// Derive the id from name and parameter types, and the handle from the version.
    Derive,
    /// Use a supplied id and handle, e.g. when rebuilding a persisted or transmitted
    /// function. Both are still checked against the derived values.
    Reconstruct {
        function_id: SqlFunctionId,
        function_handle: Option<SqlFunctionHandle>,
    },
}

#[derive(Debug, Clone)]
enum SignatureInput {
    Parts {
        name: QualifiedObjectName,
        return_type: TypeSignature,
    },
    Prebuilt(Signature),
}

/// Collects the inputs of a [`SqlInvokedFunction`] and validates them in [`build`].
///
/// Description and routine characteristics default to empty/default values; the body
/// has no default and must be supplied.
///
/// [`build`]: SqlInvokedFunctionBuilder::build
#[derive(Debug, Clone)]
pub struct SqlInvokedFunctionBuilder {
    signature: SignatureInput,
    kind: Option<FunctionKind>,
    type_variable_constraints: Option<Vec<TypeVariableConstraint>>,
    long_variable_constraints: Option<Vec<LongVariableConstraint>>,
    aggregation_metadata: Option<AggregationFunctionMetadata>,
    parameters: Vec<Parameter>,
    description: String,
    routine_characteristics: RoutineCharacteristics,
    body: Option<String>,
    variable_arity: bool,
    version: FunctionVersion,
}

impl SqlInvokedFunctionBuilder {
    pub(super) fn new(name: QualifiedObjectName, return_type: TypeSignature) -> Self {
        Self::with_signature(SignatureInput::Parts { name, return_type })
    }

    pub(super) fn from_signature(signature: Signature) -> Self {
        let variable_arity = signature.variable_arity;
        let mut builder = Self::with_signature(SignatureInput::Prebuilt(signature));
        builder.variable_arity = variable_arity;
        builder
    }

    fn with_signature(signature: SignatureInput) -> Self {
        Self {
            signature,
            kind: None,
            type_variable_constraints: None,
            long_variable_constraints: None,
            aggregation_metadata: None,
            parameters: Vec::new(),
            description: String::new(),
            routine_characteristics: RoutineCharacteristics::default(),
            body: None,
            variable_arity: false,
            version: FunctionVersion::NotVersioned,
        }
    }

    pub fn parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn routine_characteristics(mut self, characteristics: RoutineCharacteristics) -> Self {
        self.routine_characteristics = characteristics;
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn variable_arity(mut self, variable_arity: bool) -> Self {
        self.variable_arity = variable_arity;
        self
    }

    pub fn version(mut self, version: FunctionVersion) -> Self {
        self.version = version;
        self
    }

    /// Sets the kind. With a pre-built signature the kind must agree with it.
    pub fn kind(mut self, kind: FunctionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn aggregation_metadata(mut self, metadata: Option<AggregationFunctionMetadata>) -> Self {
        self.aggregation_metadata = metadata;
        self
    }

    /// Shorthand for an `AGGREGATE` kind with its metadata.
    pub fn aggregate(self, metadata: AggregationFunctionMetadata) -> Self {
        self.kind(FunctionKind::Aggregate)
            .aggregation_metadata(Some(metadata))
    }

    /// With a pre-built signature the constraints must agree with it.
    pub fn type_variable_constraints(mut self, constraints: Vec<TypeVariableConstraint>) -> Self {
        self.type_variable_constraints = Some(constraints);
        self
    }

    /// With a pre-built signature the constraints must agree with it.
    pub fn long_variable_constraints(mut self, constraints: Vec<LongVariableConstraint>) -> Self {
        self.long_variable_constraints = Some(constraints);
        self
    }

    /// Validates the inputs and produces the descriptor.
    ///
    /// Argument types are derived once from the parameters and feed both the signature
    /// and the function id.
    pub fn build(self, identity: IdentitySource) -> Result<SqlInvokedFunction, FunctionError> {
        let body = self.body.ok_or(InvariantViolation::MissingField("body"))?;
        let argument_types = argument_types(&self.parameters);

        let signature = match self.signature {
            SignatureInput::Parts { name, return_type } => Signature::new(
                name,
                self.kind.unwrap_or_default(),
                self.type_variable_constraints.unwrap_or_default(),
                self.long_variable_constraints.unwrap_or_default(),
                return_type,
                argument_types.clone(),
                self.variable_arity,
            ),
            SignatureInput::Prebuilt(signature) => {
                let mismatch = |reason: String| InvariantViolation::SignatureMismatch {
                    name: signature.name.to_string(),
                    reason,
                };
                if let Some(kind) = self.kind.filter(|kind| *kind != signature.kind) {
                    return Err(mismatch(format!(
                        "kind {kind} differs from signature kind {}",
                        signature.kind
                    ))
                    .into());
                }
                if self
                    .type_variable_constraints
                    .is_some_and(|constraints| constraints != signature.type_variable_constraints)
                {
                    return Err(mismatch(
                        "type variable constraints differ from the signature's".to_string(),
                    )
                    .into());
                }
                if self
                    .long_variable_constraints
                    .is_some_and(|constraints| constraints != signature.long_variable_constraints)
                {
                    return Err(mismatch(
                        "long variable constraints differ from the signature's".to_string(),
                    )
                    .into());
                }
                check_signature(&signature, &argument_types, self.variable_arity)?;
                signature
            }
        };

        let routine_kind = RoutineKind::try_new(signature.kind, self.aggregation_metadata)?;
        let derived_id = SqlFunctionId::new(signature.name.clone(), argument_types);

        let (function_id, function_handle) = match identity {
            IdentitySource::Derive => {
                let handle = self
                    .version
                    .token()
                    .map(|token| SqlFunctionHandle::new(derived_id.clone(), token));
                (derived_id, handle)
            }
            IdentitySource::Reconstruct {
                function_id,
                function_handle,
            } => {
                check_identity(&function_id, &derived_id)?;
                (function_id, function_handle)
            }
        };
        check_handle(&function_id, &self.version, function_handle.as_ref())?;

        Ok(SqlInvokedFunction {
            parameters: self.parameters,
            description: self.description,
            routine_characteristics: self.routine_characteristics,
            body,
            variable_arity: self.variable_arity,
            signature,
            function_id,
            function_version: self.version,
            function_handle,
            routine_kind,
        })
    }
}
