//! Error types for function descriptors, their encodings, and the registry.
//!
//! # Error Handling Strategy
//!
//! Every failure in this crate is local and synchronous:
//!
//! - [`InvariantViolation`]: a descriptor could not be constructed because an input was
//!   absent or the inputs disagree with each other (e.g. an aggregate without aggregation
//!   metadata). No partially built descriptor is ever returned alongside it.
//!
//! - [`FunctionError`]: wraps [`InvariantViolation`] and adds the lifecycle errors raised by
//!   an existing descriptor (re-versioning, required accessors on unversioned descriptors).
//!
//! - [`WireError`] and [`RegistryError`]: failures of the encodings and of the in-memory
//!   catalog. Both carry [`FunctionError`] when the underlying cause is a descriptor.
//!
//! Nothing here retries. Deciding what to do about a version race belongs to whoever
//! owns the registry.

use thiserror::Error;

use crate::types::{FunctionKind, Language, SqlFunctionHandle, SqlFunctionId};

/// A construction-time invariant that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A required input was never supplied.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// `AGGREGATE` without aggregation metadata, or metadata on any other kind.
    #[error(
        "aggregation metadata must be present for aggregation functions and absent otherwise \
         (kind {kind}, has metadata: {has_metadata})"
    )]
    AggregationMetadataMismatch {
        kind: FunctionKind,
        has_metadata: bool,
    },

    /// A pre-built signature disagrees with the parameters it was paired with.
    #[error("signature for {name} does not match its parameters: {reason}")]
    SignatureMismatch { name: String, reason: String },

    /// A supplied function id differs from the id derived from name and parameter types.
    #[error("function id {supplied} does not match derived id {derived}")]
    IdentityMismatch {
        supplied: SqlFunctionId,
        derived: SqlFunctionId,
    },

    /// A supplied handle is inconsistent with the function id or version.
    #[error("function handle for {function_id} is inconsistent: {reason}")]
    HandleMismatch {
        function_id: SqlFunctionId,
        reason: String,
    },

    /// A qualified function name could not be parsed.
    #[error("invalid function name '{0}': expected <namespace>.<name>")]
    InvalidName(String),

    /// A type signature was empty.
    #[error("invalid type signature '{0}'")]
    InvalidType(String),

    /// A version token was empty.
    #[error("version token must not be empty")]
    InvalidVersion,
}

/// Errors raised by [`crate::SqlInvokedFunction`] construction and lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error("function {name} already has version {version}")]
    AlreadyVersioned { name: String, version: String },

    #[error("missing version")]
    MissingVersion,

    #[error("missing function handle")]
    MissingHandle,
}

impl FunctionError {
    /// Returns true if this error was raised while constructing a descriptor.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }
}

/// Errors raised while encoding or decoding a descriptor.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown value {value} for enum field {field}")]
    UnknownEnumValue { field: &'static str, value: i32 },

    #[error(transparent)]
    Function(#[from] FunctionError),
}

impl From<InvariantViolation> for WireError {
    fn from(err: InvariantViolation) -> Self {
        WireError::Function(err.into())
    }
}

/// Errors raised by [`crate::FunctionRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Function(#[from] FunctionError),

    #[error("function {0} already exists")]
    AlreadyExists(SqlFunctionId),

    #[error("cannot create function {0}: input is already versioned")]
    VersionedInput(SqlFunctionId),

    #[error("cannot insert function {0}: input has no version")]
    UnversionedInput(SqlFunctionId),

    #[error("language {language} is not supported for function {function_id}")]
    UnsupportedLanguage {
        function_id: SqlFunctionId,
        language: Language,
    },

    #[error("function {0} not found")]
    NotFound(String),

    #[error("function handle {0} is already registered with a different definition")]
    HandleConflict(SqlFunctionHandle),

    #[error("no version token left for function {0}")]
    VersionsExhausted(SqlFunctionId),
}

impl From<InvariantViolation> for RegistryError {
    fn from(err: InvariantViolation) -> Self {
        RegistryError::Function(err.into())
    }
}
