//! Encodings of [`SqlInvokedFunction`] for transport and storage.
//!
//! Both encodings carry the same seven fields: parameters, description, routine
//! characteristics, body, variable arity, signature, and function id. Version, handle,
//! and aggregation metadata are left out, so decoding always yields an unversioned
//! descriptor and aggregates need their metadata passed alongside the payload.
//!
//! The protobuf tags are fixed at 1-7 in the order above. Adding a tag for any omitted
//! field breaks compatibility with existing peers.

use prost::Message;

use crate::error::{InvariantViolation, WireError};
use crate::types::AggregationFunctionMetadata;
use crate::SqlInvokedFunction;

mod json;
pub mod proto;

pub use json::FunctionPayload;

/// Encodes a function as protobuf bytes.
pub fn encode_proto(function: &SqlInvokedFunction) -> Vec<u8> {
    proto::SqlInvokedFunction::from(function).encode_to_vec()
}

/// Decodes a non-aggregate function from protobuf bytes.
pub fn decode_proto(bytes: &[u8]) -> Result<SqlInvokedFunction, WireError> {
    decode_proto_with_metadata(bytes, None)
}

/// Decodes a function from protobuf bytes, pairing it with out-of-band aggregation
/// metadata.
pub fn decode_proto_with_metadata(
    bytes: &[u8],
    aggregation_metadata: Option<AggregationFunctionMetadata>,
) -> Result<SqlInvokedFunction, WireError> {
    let message = proto::SqlInvokedFunction::decode(bytes)?;
    message.into_function(aggregation_metadata)
}

/// Encodes a function as a JSON object keyed by field name.
pub fn encode_json(function: &SqlInvokedFunction) -> Result<String, WireError> {
    Ok(serde_json::to_string(&FunctionPayload::from(function))?)
}

/// Pretty-printed variant of [`encode_json`].
pub fn encode_json_pretty(function: &SqlInvokedFunction) -> Result<String, WireError> {
    Ok(serde_json::to_string_pretty(&FunctionPayload::from(function))?)
}

/// Decodes a non-aggregate function from JSON.
pub fn decode_json(json: &str) -> Result<SqlInvokedFunction, WireError> {
    decode_json_with_metadata(json, None)
}

/// Decodes a function from JSON, pairing it with out-of-band aggregation metadata.
pub fn decode_json_with_metadata(
    json: &str,
    aggregation_metadata: Option<AggregationFunctionMetadata>,
) -> Result<SqlInvokedFunction, WireError> {
    let payload: FunctionPayload = serde_json::from_str(json)?;
    Ok(payload.into_function(aggregation_metadata)?)
}

/// Unwraps optional protobuf sub-messages that the descriptor requires.
pub(crate) trait RequiredField<T> {
    fn required(self, field: &'static str) -> Result<T, WireError>;
}

impl<P, T> RequiredField<T> for Option<P>
where
    P: TryInto<T, Error = WireError>,
{
    fn required(self, field: &'static str) -> Result<T, WireError> {
        match self {
            Some(value) => value.try_into(),
            None => Err(InvariantViolation::MissingField(field).into()),
        }
    }
}
