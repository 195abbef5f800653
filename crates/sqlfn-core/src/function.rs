//! The SQL-invoked function descriptor.
//!
//! [`SqlInvokedFunction`] is an immutable value describing one user-defined scalar,
//! aggregate, or window function. It owns everything a catalog needs to register,
//! version, and reference the function:
//!
//! - a [`Signature`] and a [`SqlFunctionId`], both derived from the same list of
//!   parameter types so they can never disagree;
//! - a [`FunctionVersion`] and, exactly when versioned, a [`SqlFunctionHandle`];
//! - a [`RoutineKind`] that carries aggregation metadata for aggregates only.
//!
//! Descriptors are built through [`SqlInvokedFunctionBuilder`]. The only transition after
//! construction is [`SqlInvokedFunction::with_version`], which returns a new descriptor
//! and leaves the receiver untouched.
//!
//! # Equality
//!
//! `==` and [`Hash`] cover every field, including identity and handle, so two versions of
//! the same definition are different values. [`SqlInvokedFunction::has_same_definition`]
//! ignores identity and handle. It has no hash and must not key a map.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FunctionError, InvariantViolation};
use crate::types::{
    AggregationFunctionMetadata, FunctionKind, FunctionVersion, Parameter, QualifiedObjectName,
    RoutineCharacteristics, RoutineKind, Signature, SqlFunctionHandle, SqlFunctionId,
    SqlFunctionVisibility, TypeSignature,
};

mod builder;

pub use builder::{IdentitySource, SqlInvokedFunctionBuilder};

/// An immutable, versionable description of a user-defined SQL function.
///
/// Serializes as [`crate::wire::FunctionPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "crate::wire::FunctionPayload",
    into = "crate::wire::FunctionPayload"
)]
pub struct SqlInvokedFunction {
    parameters: Vec<Parameter>,
    description: String,
    routine_characteristics: RoutineCharacteristics,
    body: String,
    variable_arity: bool,
    signature: Signature,
    function_id: SqlFunctionId,
    function_version: FunctionVersion,
    function_handle: Option<SqlFunctionHandle>,
    routine_kind: RoutineKind,
}

impl SqlInvokedFunction {
    /// Starts a builder for a function with the given name and return type.
    pub fn builder(name: QualifiedObjectName, return_type: TypeSignature) -> SqlInvokedFunctionBuilder {
        SqlInvokedFunctionBuilder::new(name, return_type)
    }

    /// Starts a builder around an already-built signature (e.g. one received over the wire).
    pub fn builder_from_signature(signature: Signature) -> SqlInvokedFunctionBuilder {
        SqlInvokedFunctionBuilder::from_signature(signature)
    }

    /// Returns a versioned copy of this unversioned function.
    ///
    /// The handle is built from this function's existing id. Fails with
    /// [`FunctionError::AlreadyVersioned`] if a version is already set.
    pub fn with_version(&self, version: impl Into<String>) -> Result<Self, FunctionError> {
        if let FunctionVersion::Versioned(existing) = &self.function_version {
            return Err(FunctionError::AlreadyVersioned {
                name: self.signature.name.to_string(),
                version: existing.clone(),
            });
        }
        let version = version.into();
        if version.is_empty() {
            return Err(InvariantViolation::InvalidVersion.into());
        }

        Ok(Self {
            function_handle: Some(SqlFunctionHandle::new(
                self.function_id.clone(),
                version.clone(),
            )),
            function_version: FunctionVersion::Versioned(version),
            ..self.clone()
        })
    }

    /// Re-checks every construction invariant.
    ///
    /// Always succeeds for descriptors built by this crate; registries call it before
    /// accepting a descriptor from elsewhere.
    pub fn validate(&self) -> Result<(), FunctionError> {
        let argument_types = argument_types(&self.parameters);
        check_signature(&self.signature, &argument_types, self.variable_arity)?;
        let paired = RoutineKind::try_new(
            self.signature.kind,
            self.routine_kind.aggregation_metadata().cloned(),
        )?;
        if paired != self.routine_kind {
            return Err(InvariantViolation::SignatureMismatch {
                name: self.signature.name.to_string(),
                reason: format!(
                    "signature kind {} differs from routine kind {}",
                    self.signature.kind,
                    self.routine_kind.kind()
                ),
            }
            .into());
        }
        check_identity(
            &self.function_id,
            &SqlFunctionId::new(self.signature.name.clone(), argument_types),
        )?;
        check_handle(
            &self.function_id,
            &self.function_version,
            self.function_handle.as_ref(),
        )?;
        Ok(())
    }

    /// Compares the logical definition, ignoring function id and handle.
    pub fn has_same_definition(&self, other: &SqlInvokedFunction) -> bool {
        self.parameters == other.parameters
            && self.description == other.description
            && self.routine_characteristics == other.routine_characteristics
            && self.body == other.body
            && self.variable_arity == other.variable_arity
            && self.signature == other.signature
            && self.routine_kind.aggregation_metadata() == other.routine_kind.aggregation_metadata()
    }

    pub fn name(&self) -> &QualifiedObjectName {
        &self.signature.name
    }

    pub fn kind(&self) -> FunctionKind {
        self.signature.kind
    }

    pub fn routine_kind(&self) -> &RoutineKind {
        &self.routine_kind
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn routine_characteristics(&self) -> &RoutineCharacteristics {
        &self.routine_characteristics
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn variable_arity(&self) -> bool {
        self.variable_arity
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn function_id(&self) -> &SqlFunctionId {
        &self.function_id
    }

    pub fn function_handle(&self) -> Option<&SqlFunctionHandle> {
        self.function_handle.as_ref()
    }

    pub fn version(&self) -> &FunctionVersion {
        &self.function_version
    }

    pub fn has_version(&self) -> bool {
        self.function_version.has_version()
    }

    pub fn aggregation_metadata(&self) -> Option<&AggregationFunctionMetadata> {
        self.routine_kind.aggregation_metadata()
    }

    pub fn visibility(&self) -> SqlFunctionVisibility {
        SqlFunctionVisibility::Public
    }

    pub fn is_deterministic(&self) -> bool {
        self.routine_characteristics.is_deterministic()
    }

    pub fn is_called_on_null_input(&self) -> bool {
        self.routine_characteristics.is_called_on_null_input()
    }

    /// Returns the version token, failing on unversioned functions.
    pub fn required_version(&self) -> Result<&str, FunctionError> {
        self.function_version
            .token()
            .ok_or(FunctionError::MissingVersion)
    }

    /// Returns the function handle, failing when none has been assigned.
    pub fn required_function_handle(&self) -> Result<&SqlFunctionHandle, FunctionError> {
        self.function_handle
            .as_ref()
            .ok_or(FunctionError::MissingHandle)
    }
}

/// One-line diagnostic rendering. Not parseable.
impl fmt::Display for SqlInvokedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.signature.name)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{parameter}")?;
        }
        write!(f, "):{}", self.signature.return_type)?;
        if let Some(version) = self.function_version.token() {
            write!(f, ":{version}")?;
        }
        write!(f, " [{}", self.signature.kind)?;
        if let Some(metadata) = self.routine_kind.aggregation_metadata() {
            write!(f, ", {metadata}")?;
        }
        write!(
            f,
            "] {{{}}} {} variable_arity={}",
            self.body, self.routine_characteristics, self.variable_arity
        )
    }
}

pub(crate) fn argument_types(parameters: &[Parameter]) -> Vec<TypeSignature> {
    parameters.iter().map(|p| p.ty.clone()).collect()
}

pub(crate) fn check_signature(
    signature: &Signature,
    argument_types: &[TypeSignature],
    variable_arity: bool,
) -> Result<(), InvariantViolation> {
    if signature.argument_types != argument_types {
        return Err(InvariantViolation::SignatureMismatch {
            name: signature.name.to_string(),
            reason: format!(
                "argument types [{}] differ from parameter types [{}]",
                join_types(&signature.argument_types),
                join_types(argument_types)
            ),
        });
    }
    if signature.variable_arity != variable_arity {
        return Err(InvariantViolation::SignatureMismatch {
            name: signature.name.to_string(),
            reason: format!(
                "signature variable arity is {} but function variable arity is {variable_arity}",
                signature.variable_arity
            ),
        });
    }
    Ok(())
}

pub(crate) fn check_identity(
    supplied: &SqlFunctionId,
    derived: &SqlFunctionId,
) -> Result<(), InvariantViolation> {
    if supplied != derived {
        return Err(InvariantViolation::IdentityMismatch {
            supplied: supplied.clone(),
            derived: derived.clone(),
        });
    }
    Ok(())
}

/// A handle exists iff the version does, and always points at `function_id`.
pub(crate) fn check_handle(
    function_id: &SqlFunctionId,
    version: &FunctionVersion,
    handle: Option<&SqlFunctionHandle>,
) -> Result<(), InvariantViolation> {
    let mismatch = |reason: String| InvariantViolation::HandleMismatch {
        function_id: function_id.clone(),
        reason,
    };
    match (version, handle) {
        (FunctionVersion::NotVersioned, None) => Ok(()),
        (FunctionVersion::NotVersioned, Some(handle)) => Err(mismatch(format!(
            "handle {handle} present on an unversioned function"
        ))),
        (FunctionVersion::Versioned(token), None) => Err(mismatch(format!(
            "version {token} has no handle"
        ))),
        (FunctionVersion::Versioned(token), Some(handle)) => {
            if token.is_empty() {
                return Err(InvariantViolation::InvalidVersion);
            }
            if &handle.function_id != function_id {
                return Err(mismatch(format!(
                    "handle points at {}",
                    handle.function_id
                )));
            }
            if &handle.version != token {
                return Err(mismatch(format!(
                    "handle version {} differs from function version {token}",
                    handle.version
                )));
            }
            Ok(())
        }
    }
}

fn join_types(types: &[TypeSignature]) -> String {
    types
        .iter()
        .map(TypeSignature::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
