//! Fixtures shared by unit tests.

use crate::function::IdentitySource;
use crate::types::{
    AggregationFunctionMetadata, Determinism, Language, NullCallClause, Parameter,
    RoutineCharacteristics, TypeSignature,
};
use crate::SqlInvokedFunction;

pub fn ty(name: &str) -> TypeSignature {
    TypeSignature::parse(name).unwrap()
}

pub fn deterministic() -> RoutineCharacteristics {
    RoutineCharacteristics::new(
        Language::sql(),
        Determinism::Deterministic,
        NullCallClause::CalledOnNullInput,
    )
}

/// `ns.add(a bigint, b bigint): bigint`, unversioned.
pub fn add_function() -> SqlInvokedFunction {
    SqlInvokedFunction::builder("ns.add".parse().unwrap(), ty("bigint"))
        .parameters(vec![
            Parameter::new("a", ty("bigint")),
            Parameter::new("b", ty("bigint")),
        ])
        .description("adds two")
        .routine_characteristics(deterministic())
        .body("a+b")
        .build(IdentitySource::Derive)
        .unwrap()
}

/// `ns.total(x double): double`, an aggregate with a `double` accumulator.
pub fn total_aggregate() -> SqlInvokedFunction {
    SqlInvokedFunction::builder("ns.total".parse().unwrap(), ty("double"))
        .parameter(Parameter::new("x", ty("double")))
        .description("sums values")
        .routine_characteristics(deterministic())
        .body("RETURN sum(x)")
        .aggregate(AggregationFunctionMetadata::new(ty("double"), false))
        .build(IdentitySource::Derive)
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_build() {
        assert!(!add_function().has_version());
        assert!(total_aggregate().aggregation_metadata().is_some());
    }
}
