use aim::{FormatVersion, RawHeaderInts};

/// Build a little endian integer prefix for the given layout.
pub fn header_ints(
    version: FormatVersion,
    format_code: i32,
    text_len: usize,
    dim: [i32; 3],
) -> RawHeaderInts {
    let mut ints = [0i32; 32];
    ints[5] = match version {
        FormatVersion::V020 => 16,
        FormatVersion::V030 => 0,
    };
    let layout = version.layout();
    ints[layout.format_code] = format_code;
    ints[layout.header_text_len] = text_len as i32;
    for (i, d) in layout.dim.iter().zip(dim.iter()) {
        ints[*i] = *d;
    }
    RawHeaderInts::from_ints(ints)
}

/// Lay out a complete file in memory: the integer prefix, the header text,
/// zero filling up to the fixed prefix and then the voxel bytes.
pub fn build_file(
    version: FormatVersion,
    format_code: i32,
    dim: [i32; 3],
    text: &str,
    voxels: &[u8],
) -> Vec<u8> {
    let ints = header_ints(version, format_code, text.len(), dim);
    let mut out: Vec<u8> = ints
        .as_ints()
        .iter()
        .flat_map(|v| v.to_le_bytes().to_vec())
        .collect();
    out.extend(text.as_bytes());
    let filler = version.fixed_prefix_len() as usize - 128;
    out.extend(vec![0u8; filler]);
    out.extend(voxels);
    out
}

/// Little endian bytes of a sequence of 16-bit voxels.
#[allow(dead_code)]
pub fn i16_bytes<I: IntoIterator<Item = i16>>(values: I) -> Vec<u8> {
    values
        .into_iter()
        .flat_map(|v| v.to_le_bytes().to_vec())
        .collect()
}

/// Header text of a typical "020" file.
#[allow(dead_code)]
pub const CALIBRATED_TEXT: &str = "Scaled by factor 2.5\n\
                                   Density: slope 1603.5\n\
                                   Density: intercept -391.2\n";
