#![no_main]
use libfuzzer_sys::fuzz_target;
use aim::{OrientationPolicy, ReaderOptions};

fuzz_target!(|data: &[u8]| {
    let _ = ReaderOptions::new()
        .orientation(OrientationPolicy::FlipAndPad { pad: 1 })
        .read_stream(data);
    let _ = ReaderOptions::new()
        .orientation(OrientationPolicy::ReverseAxes)
        .read_stream(data);
});
