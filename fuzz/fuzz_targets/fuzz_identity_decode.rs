#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Some(identity) = gate_crypto::decode_identity(text) {
        // Anything that decodes must re-encode to the same text.
        assert_eq!(gate_crypto::encode_identity(&identity), text);
    }
    let _ = gate_types::Identity::from_hex(text);
});
