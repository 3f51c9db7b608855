#![no_main]
use libfuzzer_sys::fuzz_target;
use aim::spacing::compute_spacing;
use aim::{FormatVersion, HeaderMetadata, Spacing};

fuzz_target!(|data: &[u8]| {
    for version in &[FormatVersion::V020, FormatVersion::V030] {
        let meta = HeaderMetadata::from_bytes(data, *version);
        let _ = compute_spacing(&meta, Spacing::default());
        let _ = HeaderMetadata::from_bytes(meta.to_text().as_bytes(), *version);
    }
});
