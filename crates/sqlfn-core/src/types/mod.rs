//! Value types describing SQL-invoked functions.
//!
//! These are the building blocks of [`crate::SqlInvokedFunction`]: names and types,
//! parameters, routine characteristics, signatures, and the identity types used by
//! catalogs to look functions up.

mod common;
mod identity;
mod request;
mod routine;
mod signature;

pub use common::{Parameter, QualifiedObjectName, TypeSignature};
pub use identity::{FunctionVersion, SqlFunctionHandle, SqlFunctionId};
pub use request::FunctionDefinition;
pub use routine::{Determinism, Language, NullCallClause, RoutineCharacteristics};
pub use signature::{
    AggregationFunctionMetadata, FunctionKind, LongVariableConstraint, RoutineKind, Signature,
    SqlFunctionVisibility, TypeVariableConstraint,
};
