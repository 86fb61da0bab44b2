#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Decode → encode → decode must not panic and must be stable.
        if let Ok(payload) = comprobante::QrPayload::from_base64(s) {
            if let Ok(encoded) = payload.to_base64() {
                let again = comprobante::QrPayload::from_base64(&encoded);
                assert_eq!(again.ok().as_ref(), Some(&payload));
            }
        }
    }
});
