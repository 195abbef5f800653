#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlfn_core::{decode_proto, encode_proto};

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must survive a second trip unchanged.
    if let Ok(function) = decode_proto(data) {
        assert!(function.validate().is_ok());
        let again = decode_proto(&encode_proto(&function)).expect("re-decode");
        assert_eq!(again, function);
    }
});
