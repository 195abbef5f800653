#![allow(dead_code)]

use sqlfn_core::{FunctionDefinition, SqlInvokedFunction, TypeSignature};

pub fn ty(name: &str) -> TypeSignature {
    TypeSignature::parse(name).expect("valid type")
}

/// Parses a JSON definition and builds its descriptor.
pub fn function_from_json(json: &str) -> SqlInvokedFunction {
    let definition: FunctionDefinition = serde_json::from_str(json).expect("valid definition");
    definition.into_function().expect("valid function")
}

pub const ADD: &str = r#"{
    "name": "ns.add",
    "parameters": [{"name": "a", "type": "bigint"}, {"name": "b", "type": "bigint"}],
    "returnType": "bigint",
    "description": "adds two",
    "routineCharacteristics": {"determinism": "DETERMINISTIC"},
    "body": "a+b"
}"#;

pub const TOTAL: &str = r#"{
    "name": "ns.total",
    "parameters": [{"name": "x", "type": "double"}],
    "returnType": "double",
    "body": "RETURN sum(x)",
    "kind": "AGGREGATE",
    "aggregationMetadata": {"intermediateType": "double", "isOrderSensitive": false}
}"#;

pub const RANK: &str = r#"{
    "name": "ns.rank_of",
    "parameters": [{"name": "x", "type": "bigint"}],
    "returnType": "bigint",
    "body": "RETURN rank()",
    "kind": "WINDOW"
}"#;
