#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlfn_core::{decode_json, encode_json, FunctionDefinition};

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        if let Ok(function) = decode_json(json) {
            let encoded = encode_json(&function).expect("encode");
            assert_eq!(decode_json(&encoded).expect("re-decode"), function);
        }

        if let Ok(definition) = serde_json::from_str::<FunctionDefinition>(json) {
            let _ = definition.into_function();
        }
    }
});
