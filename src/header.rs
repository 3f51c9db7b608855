//! This module defines the `AimHeader` struct, which is used
//! to provide important information about AIM volumes.
//!
//! Every AIM file starts with a prefix of 32 signed 32-bit integers. One of
//! these integers tells apart the two known header layouts ("020" and
//! "030"), which place the format code, the header text length and the
//! volume dimensions at different positions.

use crate::error::{AimError, Result};
use crate::typedef::{resolve_format, AimType};
use crate::util::read_up_to;
use crate::volume::shape::Dim;
use byteordered::{ByteOrdered, Endianness};
use std::io::Read;

/// Number of integers in the header prefix.
pub const HEADER_INT_COUNT: usize = 32;
/// Size of the header prefix, in bytes.
pub const HEADER_INT_BYTES: usize = HEADER_INT_COUNT * 4;

/// Index of the integer which discriminates the header layout.
const VERSION_DISCRIMINATOR_INDEX: usize = 5;
/// Value of the discriminator for the "020" layout.
const VERSION_020_DISCRIMINATOR: i32 = 16;

/// Byte order of AIM headers and voxel data.
pub const AIM_ENDIANNESS: Endianness = Endianness::Little;

/// The fixed integer prefix of an AIM file, in file order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawHeaderInts([i32; HEADER_INT_COUNT]);

impl RawHeaderInts {
    /// Read the integer prefix from the given byte source. The source is
    /// assumed to be positioned at the very start of the file.
    ///
    /// # Errors
    ///
    /// - `AimError::TruncatedHeader` if fewer than 128 bytes are available.
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let buf = read_up_to(source, HEADER_INT_BYTES)?;
        if buf.len() < HEADER_INT_BYTES {
            return Err(AimError::TruncatedHeader {
                available: buf.len(),
            });
        }

        let mut ints = [0; HEADER_INT_COUNT];
        let mut reader = ByteOrdered::runtime(&buf[..], AIM_ENDIANNESS);
        for v in ints.iter_mut() {
            *v = reader.read_i32()?;
        }
        Ok(RawHeaderInts(ints))
    }

    /// Build the prefix from already decoded integers.
    pub fn from_ints(ints: [i32; HEADER_INT_COUNT]) -> Self {
        RawHeaderInts(ints)
    }

    /// Retrieve the integer at the given position.
    ///
    /// # Panic
    ///
    /// Panics if `index` is not below 32.
    pub fn get(&self, index: usize) -> i32 {
        self.0[index]
    }

    /// Retrieve a reference to all integers.
    pub fn as_ints(&self) -> &[i32; HEADER_INT_COUNT] {
        &self.0
    }
}

/// Positions of the version-specific fields in the integer prefix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldLayout {
    /// Index of the voxel format code
    pub format_code: usize,
    /// Index of the header text length
    pub header_text_len: usize,
    /// Indices of the volume dimensions, x first
    pub dim: [usize; 3],
}

const LAYOUT_020: FieldLayout = FieldLayout {
    format_code: 10,
    header_text_len: 2,
    dim: [14, 15, 16],
};

const LAYOUT_030: FieldLayout = FieldLayout {
    format_code: 17,
    header_text_len: 8,
    dim: [24, 26, 28],
};

/// The two known AIM header layouts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FormatVersion {
    /// Version "020"
    V020,
    /// Version "030"
    V030,
}

impl FormatVersion {
    /// Classify the header layout. Every prefix maps to exactly one version.
    pub fn detect(ints: &RawHeaderInts) -> Self {
        if ints.get(VERSION_DISCRIMINATOR_INDEX) == VERSION_020_DISCRIMINATOR {
            FormatVersion::V020
        } else {
            FormatVersion::V030
        }
    }

    /// The field positions of this layout.
    pub fn layout(self) -> &'static FieldLayout {
        match self {
            FormatVersion::V020 => &LAYOUT_020,
            FormatVersion::V030 => &LAYOUT_030,
        }
    }

    /// Number of bytes preceding the voxel data, not counting the header text.
    pub fn fixed_prefix_len(self) -> u64 {
        match self {
            FormatVersion::V020 => 160,
            FormatVersion::V030 => 280,
        }
    }

    /// Number of leading header text lines which only hold layout information
    /// and never carry calibration metadata.
    pub fn structural_text_lines(self) -> usize {
        match self {
            FormatVersion::V020 => 0,
            FormatVersion::V030 => 4,
        }
    }

    /// The version label as printed by the scanner software.
    pub fn label(self) -> &'static str {
        match self {
            FormatVersion::V020 => "020",
            FormatVersion::V030 => "030",
        }
    }
}

/// The AIM header data type, holding the decoded version-specific fields
/// along with the raw integer prefix.
///
/// # Examples
///
/// ```no_run
/// use aim::AimHeader;
/// use std::fs::File;
/// # use aim::Result;
///
/// # fn run() -> Result<()> {
/// let header = AimHeader::from_reader(File::open("C0001234.AIM")?)?;
/// println!("{:?} voxels of {:?}", header.dim, header.datatype);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AimHeader {
    /// The header layout
    pub version: FormatVersion,
    /// The decodable voxel element type
    pub datatype: AimType,
    /// Length of the free text block following the integer prefix, in bytes
    pub header_text_len: usize,
    /// Volume dimensions, x first
    pub dim: Dim,
    /// The integer prefix this header was decoded from
    pub ints: RawHeaderInts,
}

impl AimHeader {
    /// Read the integer prefix from the given byte source and decode it.
    /// It is assumed that the input is currently at the start of the file.
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let ints = RawHeaderInts::from_reader(source)?;
        AimHeader::from_ints(ints)
    }

    /// Decode the version-specific fields of an integer prefix.
    ///
    /// # Errors
    ///
    /// - `AimError::UnsupportedVoxelFormat` if the format code cannot be decoded.
    /// - `AimError::InvalidHeaderTextLength` if the text length is negative.
    /// - `AimError::InvalidDimensions` if any dimension is not positive.
    pub fn from_ints(ints: RawHeaderInts) -> Result<Self> {
        let version = FormatVersion::detect(&ints);
        let layout = version.layout();
        debug!("AIM header layout {}", version.label());

        let datatype = resolve_format(ints.get(layout.format_code))?;
        debug!("AIM voxel type {:?}", datatype);

        let text_len = ints.get(layout.header_text_len);
        if text_len < 0 {
            return Err(AimError::InvalidHeaderTextLength(text_len));
        }

        let raw_dim = [
            ints.get(layout.dim[0]),
            ints.get(layout.dim[1]),
            ints.get(layout.dim[2]),
        ];
        let dim = Dim::from_header_fields(raw_dim)?;

        Ok(AimHeader {
            version,
            datatype,
            header_text_len: text_len as usize,
            dim,
            ints,
        })
    }

    /// Offset of the first voxel from the start of the file.
    pub fn data_offset(&self) -> u64 {
        self.version.fixed_prefix_len() + self.header_text_len as u64
    }

    /// Expected size of the voxel buffer, in bytes.
    pub fn data_len(&self) -> usize {
        self.dim.element_count() * self.datatype.size_of()
    }
}
