#![no_main]

use libfuzzer_sys::fuzz_target;
use wire_protocol::WireReader;

fuzz_target!(|data: &[u8]| {
    // Varint decoding is the codec's only validated path: it must fail
    // cleanly on malformed input, never loop or panic. Length checks guard
    // the unchecked (panic-by-contract) short-buffer preconditions.
    if data.len() >= 5 {
        let mut reader = WireReader::new(data);
        let _ = reader.read_varint();
    }
    if data.len() >= 10 {
        let mut reader = WireReader::new(data);
        let _ = reader.read_varint64();
    }
});
