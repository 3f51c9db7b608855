#![no_main]
use libfuzzer_sys::fuzz_target;
use aim::AimHeader;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = AimHeader::from_reader(data) {
        let _ = header.data_offset();
        let _ = header.data_len();
        let _ = header.version.layout();
    }
});
