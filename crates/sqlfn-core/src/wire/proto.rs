//! Protobuf messages for the tagged encoding.
//!
//! Hand-written prost messages; there is no `.proto` build step. The top-level message
//! carries exactly tags 1-7. Function handle and aggregation metadata have no tag and
//! must not get one: receivers rebuild them through the general constructor.

use super::RequiredField;
use crate::error::WireError;
use crate::function::IdentitySource;
use crate::types::{self, AggregationFunctionMetadata, TypeSignature};

/// The seven-field construction subset of a function descriptor.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SqlInvokedFunction {
    #[prost(message, repeated, tag = "1")]
    pub parameters: ::prost::alloc::vec::Vec<Parameter>,
    #[prost(string, tag = "2")]
    pub description: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub routine_characteristics: ::core::option::Option<RoutineCharacteristics>,
    #[prost(string, tag = "4")]
    pub body: ::prost::alloc::string::String,
    #[prost(bool, tag = "5")]
    pub variable_arity: bool,
    #[prost(message, optional, tag = "6")]
    pub signature: ::core::option::Option<Signature>,
    #[prost(message, optional, tag = "7")]
    pub function_id: ::core::option::Option<SqlFunctionId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Parameter {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub type_signature: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RoutineCharacteristics {
    #[prost(string, tag = "1")]
    pub language: ::prost::alloc::string::String,
    #[prost(enumeration = "Determinism", tag = "2")]
    pub determinism: i32,
    #[prost(enumeration = "NullCallClause", tag = "3")]
    pub null_call_clause: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Signature {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(enumeration = "FunctionKind", tag = "2")]
    pub kind: i32,
    #[prost(message, repeated, tag = "3")]
    pub type_variable_constraints: ::prost::alloc::vec::Vec<TypeVariableConstraint>,
    #[prost(message, repeated, tag = "4")]
    pub long_variable_constraints: ::prost::alloc::vec::Vec<LongVariableConstraint>,
    #[prost(string, tag = "5")]
    pub return_type: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "6")]
    pub argument_types: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(bool, tag = "7")]
    pub variable_arity: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TypeVariableConstraint {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(bool, tag = "2")]
    pub comparable_required: bool,
    #[prost(bool, tag = "3")]
    pub orderable_required: bool,
    #[prost(string, optional, tag = "4")]
    pub variadic_bound: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(bool, tag = "5")]
    pub non_decimal_numeric_required: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LongVariableConstraint {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub expression: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SqlFunctionId {
    #[prost(string, tag = "1")]
    pub function_name: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "2")]
    pub argument_types: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum FunctionKind {
    Scalar = 0,
    Aggregate = 1,
    Window = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Determinism {
    NotDeterministic = 0,
    Deterministic = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum NullCallClause {
    CalledOnNullInput = 0,
    ReturnsNullOnNullInput = 1,
}

impl SqlInvokedFunction {
    /// Rebuilds the descriptor. Aggregation metadata travels out of band, so aggregates
    /// only decode when the caller supplies it.
    pub fn into_function(
        self,
        aggregation_metadata: Option<AggregationFunctionMetadata>,
    ) -> Result<crate::SqlInvokedFunction, WireError> {
        let signature: types::Signature = self.signature.required("signature")?;
        let function_id: types::SqlFunctionId = self.function_id.required("functionId")?;
        let routine_characteristics: types::RoutineCharacteristics =
            self.routine_characteristics.required("routineCharacteristics")?;
        let parameters = self
            .parameters
            .into_iter()
            .map(types::Parameter::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let function = crate::SqlInvokedFunction::builder_from_signature(signature)
            .parameters(parameters)
            .description(self.description)
            .routine_characteristics(routine_characteristics)
            .body(self.body)
            .variable_arity(self.variable_arity)
            .aggregation_metadata(aggregation_metadata)
            .build(IdentitySource::Reconstruct {
                function_id,
                function_handle: None,
            })?;
        Ok(function)
    }
}

impl From<&crate::SqlInvokedFunction> for SqlInvokedFunction {
    fn from(function: &crate::SqlInvokedFunction) -> Self {
        SqlInvokedFunction {
            parameters: function.parameters().iter().map(Parameter::from).collect(),
            description: function.description().to_string(),
            routine_characteristics: Some(function.routine_characteristics().into()),
            body: function.body().to_string(),
            variable_arity: function.variable_arity(),
            signature: Some(function.signature().into()),
            function_id: Some(function.function_id().into()),
        }
    }
}

impl TryFrom<Parameter> for types::Parameter {
    type Error = WireError;
    fn try_from(value: Parameter) -> Result<Self, Self::Error> {
        Ok(types::Parameter::new(
            value.name,
            TypeSignature::parse(&value.type_signature)?,
        ))
    }
}

impl From<&types::Parameter> for Parameter {
    fn from(value: &types::Parameter) -> Self {
        Parameter {
            name: value.name.clone(),
            type_signature: value.ty.to_string(),
        }
    }
}

impl TryFrom<RoutineCharacteristics> for types::RoutineCharacteristics {
    type Error = WireError;
    fn try_from(value: RoutineCharacteristics) -> Result<Self, Self::Error> {
        let determinism = match Determinism::try_from(value.determinism) {
            Ok(Determinism::Deterministic) => types::Determinism::Deterministic,
            Ok(Determinism::NotDeterministic) => types::Determinism::NotDeterministic,
            Err(_) => {
                return Err(WireError::UnknownEnumValue {
                    field: "determinism",
                    value: value.determinism,
                })
            }
        };
        let null_call_clause = match NullCallClause::try_from(value.null_call_clause) {
            Ok(NullCallClause::CalledOnNullInput) => types::NullCallClause::CalledOnNullInput,
            Ok(NullCallClause::ReturnsNullOnNullInput) => {
                types::NullCallClause::ReturnsNullOnNullInput
            }
            Err(_) => {
                return Err(WireError::UnknownEnumValue {
                    field: "nullCallClause",
                    value: value.null_call_clause,
                })
            }
        };
        let language = types::Language::new(value.language);
        Ok(types::RoutineCharacteristics::new(
            language,
            determinism,
            null_call_clause,
        ))
    }
}

impl From<&types::RoutineCharacteristics> for RoutineCharacteristics {
    fn from(value: &types::RoutineCharacteristics) -> Self {
        let determinism = match value.determinism {
            types::Determinism::Deterministic => Determinism::Deterministic,
            types::Determinism::NotDeterministic => Determinism::NotDeterministic,
        };
        let null_call_clause = match value.null_call_clause {
            types::NullCallClause::CalledOnNullInput => NullCallClause::CalledOnNullInput,
            types::NullCallClause::ReturnsNullOnNullInput => NullCallClause::ReturnsNullOnNullInput,
        };
        RoutineCharacteristics {
            language: value.language.to_string(),
            determinism: determinism as i32,
            null_call_clause: null_call_clause as i32,
        }
    }
}

impl TryFrom<Signature> for types::Signature {
    type Error = WireError;
    fn try_from(value: Signature) -> Result<Self, Self::Error> {
        let kind = match FunctionKind::try_from(value.kind) {
            Ok(FunctionKind::Scalar) => types::FunctionKind::Scalar,
            Ok(FunctionKind::Aggregate) => types::FunctionKind::Aggregate,
            Ok(FunctionKind::Window) => types::FunctionKind::Window,
            Err(_) => {
                return Err(WireError::UnknownEnumValue {
                    field: "kind",
                    value: value.kind,
                })
            }
        };
        Ok(types::Signature::new(
            value.name.parse()?,
            kind,
            value
                .type_variable_constraints
                .into_iter()
                .map(Into::into)
                .collect(),
            value
                .long_variable_constraints
                .into_iter()
                .map(Into::into)
                .collect(),
            TypeSignature::parse(&value.return_type)?,
            parse_types(&value.argument_types)?,
            value.variable_arity,
        ))
    }
}

impl From<&types::Signature> for Signature {
    fn from(value: &types::Signature) -> Self {
        let kind = match value.kind {
            types::FunctionKind::Scalar => FunctionKind::Scalar,
            types::FunctionKind::Aggregate => FunctionKind::Aggregate,
            types::FunctionKind::Window => FunctionKind::Window,
        };
        Signature {
            name: value.name.to_string(),
            kind: kind as i32,
            type_variable_constraints: value
                .type_variable_constraints
                .iter()
                .map(Into::into)
                .collect(),
            long_variable_constraints: value
                .long_variable_constraints
                .iter()
                .map(Into::into)
                .collect(),
            return_type: value.return_type.to_string(),
            argument_types: value.argument_types.iter().map(ToString::to_string).collect(),
            variable_arity: value.variable_arity,
        }
    }
}

impl From<TypeVariableConstraint> for types::TypeVariableConstraint {
    fn from(value: TypeVariableConstraint) -> Self {
        types::TypeVariableConstraint {
            name: value.name,
            comparable_required: value.comparable_required,
            orderable_required: value.orderable_required,
            variadic_bound: value.variadic_bound,
            non_decimal_numeric_required: value.non_decimal_numeric_required,
        }
    }
}

impl From<&types::TypeVariableConstraint> for TypeVariableConstraint {
    fn from(value: &types::TypeVariableConstraint) -> Self {
        TypeVariableConstraint {
            name: value.name.clone(),
            comparable_required: value.comparable_required,
            orderable_required: value.orderable_required,
            variadic_bound: value.variadic_bound.clone(),
            non_decimal_numeric_required: value.non_decimal_numeric_required,
        }
    }
}

impl From<LongVariableConstraint> for types::LongVariableConstraint {
    fn from(value: LongVariableConstraint) -> Self {
        types::LongVariableConstraint::new(value.name, value.expression)
    }
}

impl From<&types::LongVariableConstraint> for LongVariableConstraint {
    fn from(value: &types::LongVariableConstraint) -> Self {
        LongVariableConstraint {
            name: value.name.clone(),
            expression: value.expression.clone(),
        }
    }
}

impl TryFrom<SqlFunctionId> for types::SqlFunctionId {
    type Error = WireError;
    fn try_from(value: SqlFunctionId) -> Result<Self, Self::Error> {
        Ok(types::SqlFunctionId::new(
            value.function_name.parse()?,
            parse_types(&value.argument_types)?,
        ))
    }
}

impl From<&types::SqlFunctionId> for SqlFunctionId {
    fn from(value: &types::SqlFunctionId) -> Self {
        SqlFunctionId {
            function_name: value.function_name.to_string(),
            argument_types: value.argument_types.iter().map(ToString::to_string).collect(),
        }
    }
}

fn parse_types(raw: &[String]) -> Result<Vec<TypeSignature>, WireError> {
    raw.iter()
        .map(|ty| TypeSignature::parse(ty).map_err(WireError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::*;
    use crate::error::{FunctionError, InvariantViolation};
    use crate::test_utils::{add_function, total_aggregate};

    #[test]
    fn test_top_level_tags() {
        // One field per tag; the key byte is (tag << 3) | wire_type.
        let message = SqlInvokedFunction {
            variable_arity: true,
            ..Default::default()
        };
        assert_eq!(message.encode_to_vec(), vec![5 << 3, 1]);

        let message = SqlInvokedFunction {
            body: "x".to_string(),
            ..Default::default()
        };
        assert_eq!(message.encode_to_vec(), vec![(4 << 3) | 2, 1, b'x']);

        let message = SqlInvokedFunction {
            function_id: Some(SqlFunctionId::default()),
            ..Default::default()
        };
        assert_eq!(message.encode_to_vec(), vec![(7 << 3) | 2, 0]);
    }

    #[test]
    fn test_round_trip_scalar() {
        let function = add_function();
        let message = SqlInvokedFunction::from(&function);
        let bytes = message.encode_to_vec();

        let decoded = SqlInvokedFunction::decode(bytes.as_slice())
            .unwrap()
            .into_function(None)
            .unwrap();
        assert_eq!(decoded, function);
    }

    #[test]
    fn test_versioned_function_decodes_unversioned() {
        let versioned = add_function().with_version("5").unwrap();
        let decoded = SqlInvokedFunction::from(&versioned)
            .into_function(None)
            .unwrap();

        assert!(!decoded.has_version());
        assert_eq!(decoded.function_handle(), None);
        assert!(decoded.has_same_definition(&versioned));
        assert_ne!(decoded, versioned);
    }

    #[test]
    fn test_aggregate_needs_out_of_band_metadata() {
        let function = total_aggregate();
        let message = SqlInvokedFunction::from(&function);

        let err = message.clone().into_function(None).unwrap_err();
        assert!(matches!(
            err,
            WireError::Function(FunctionError::Invariant(
                InvariantViolation::AggregationMetadataMismatch { .. }
            ))
        ));

        let decoded = message
            .into_function(function.aggregation_metadata().cloned())
            .unwrap();
        assert_eq!(decoded, function);
    }

    #[test]
    fn test_missing_signature() {
        let mut message = SqlInvokedFunction::from(&add_function());
        message.signature = None;
        let err = message.into_function(None).unwrap_err();
        assert!(matches!(
            err,
            WireError::Function(FunctionError::Invariant(InvariantViolation::MissingField(
                "signature"
            )))
        ));
    }

    #[test]
    fn test_missing_function_id() {
        let mut message = SqlInvokedFunction::from(&add_function());
        message.function_id = None;
        assert!(message.into_function(None).is_err());
    }

    #[test]
    fn test_unknown_kind() {
        let mut message = SqlInvokedFunction::from(&add_function());
        if let Some(signature) = message.signature.as_mut() {
            signature.kind = 42;
        }
        let err = message.into_function(None).unwrap_err();
        assert!(matches!(
            err,
            WireError::UnknownEnumValue {
                field: "kind",
                value: 42
            }
        ));
    }

    #[test]
    fn test_tampered_function_id_is_rejected() {
        let mut message = SqlInvokedFunction::from(&add_function());
        if let Some(id) = message.function_id.as_mut() {
            id.argument_types.pop();
        }
        let err = message.into_function(None).unwrap_err();
        assert!(matches!(
            err,
            WireError::Function(FunctionError::Invariant(
                InvariantViolation::IdentityMismatch { .. }
            ))
        ));
    }

    #[test]
    fn test_empty_language_defaults_to_sql() {
        let characteristics = RoutineCharacteristics::default();
        let converted = types::RoutineCharacteristics::try_from(characteristics).unwrap();
        assert_eq!(converted, types::RoutineCharacteristics::default());
    }

    #[test]
    fn test_blank_language_survives_reencoding() {
        let mut message = SqlInvokedFunction::from(&add_function());
        if let Some(characteristics) = message.routine_characteristics.as_mut() {
            characteristics.language = "  ".to_string();
        }

        let decoded = message.into_function(None).unwrap();
        assert_eq!(decoded.routine_characteristics().language, types::Language::sql());

        let bytes = SqlInvokedFunction::from(&decoded).encode_to_vec();
        let reencoded = SqlInvokedFunction::decode(bytes.as_slice())
            .unwrap()
            .into_function(None)
            .unwrap();
        assert_eq!(reencoded, decoded);
    }
}
