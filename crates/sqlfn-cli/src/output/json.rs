//! JSON output formatting.

use serde::Serialize;
use sqlfn_core::{AggregationFunctionMetadata, FunctionPayload, FunctionRegistry};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry<'a> {
    handle: String,
    function: FunctionPayload,
    /// Not part of the function encoding; needed to decode aggregates again.
    #[serde(skip_serializing_if = "Option::is_none")]
    aggregation_metadata: Option<&'a AggregationFunctionMetadata>,
}

/// Format every registered version as a JSON array.
///
/// If `compact` is true, outputs minified JSON without whitespace.
pub fn format_json(registry: &FunctionRegistry, compact: bool) -> serde_json::Result<String> {
    let entries: Vec<CatalogEntry<'_>> = registry
        .iter()
        .map(|entry| CatalogEntry {
            handle: entry.handle().to_string(),
            function: FunctionPayload::from(entry.function()),
            aggregation_metadata: entry.function().aggregation_metadata(),
        })
        .collect();

    if compact {
        serde_json::to_string(&entries)
    } else {
        serde_json::to_string_pretty(&entries)
    }
}
