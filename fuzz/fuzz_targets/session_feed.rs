#![no_main]

use libfuzzer_sys::fuzz_target;
use prt7_core::Decoder;
use prt7_proto::Frame;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut decoder = Decoder::new();
    let mut loads = 0;

    for record in text.lines() {
        if let Some(Frame::Load { .. }) = prt7_proto::parse_record(record) {
            loads += 1;
        }
        decoder.feed(record);
        assert!(decoder.wheel().offset() < prt7_core::ALPHABET_LEN);
    }

    assert_eq!(decoder.message().len(), loads);
});
