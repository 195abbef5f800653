pub mod error;
pub mod function;
pub mod registry;
pub mod types;
pub mod wire;

// Re-export main types and functions
pub use error::{FunctionError, InvariantViolation, RegistryError, WireError};
pub use function::{IdentitySource, SqlInvokedFunction, SqlInvokedFunctionBuilder};
pub use registry::{FunctionRegistry, RegisteredFunction, RegistryConfig};
pub use wire::{
    decode_json, decode_json_with_metadata, decode_proto, decode_proto_with_metadata,
    encode_json, encode_json_pretty, encode_proto, FunctionPayload,
};

// Re-export types explicitly
pub use types::{
    // Request types
    FunctionDefinition,
    // Descriptor parts
    AggregationFunctionMetadata,
    Determinism,
    FunctionKind,
    FunctionVersion,
    Language,
    LongVariableConstraint,
    NullCallClause,
    Parameter,
    QualifiedObjectName,
    RoutineCharacteristics,
    RoutineKind,
    Signature,
    SqlFunctionHandle,
    SqlFunctionId,
    SqlFunctionVisibility,
    TypeSignature,
    TypeVariableConstraint,
};

// Test utilities (must be at end of file)
#[cfg(test)]
pub mod test_utils;
