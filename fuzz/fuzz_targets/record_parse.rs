#![no_main]

use libfuzzer_sys::fuzz_target;
use prt7_proto::Frame;

fuzz_target!(|data: &[u8]| {
    let record = String::from_utf8_lossy(data);

    // Accepted frames must render to a record that parses back to them.
    if let Ok(frame) = Frame::parse(&record) {
        assert_eq!(Frame::parse(&frame.to_string()), Ok(frame));
    }
});
