//! This module contains the voxel format codes defined by the AIM container.
//!
//! The header stores a single 32-bit code describing how each voxel is
//! stored. [`VoxelFormat`] maps every possible code onto a closed set of
//! variants, while [`AimType`] only holds the element types which this
//! crate is able to decode.
//!
//! [`VoxelFormat`]: ./enum.VoxelFormat.html
//! [`AimType`]: ./enum.AimType.html

use crate::error::{AimError, Result};
use num_traits::FromPrimitive;

/// Format code for signed 8-bit voxels.
pub const FORMAT_CODE_INT8: i32 = 65537;
/// Format code for signed 16-bit voxels.
pub const FORMAT_CODE_INT16: i32 = 131074;
/// Format code for the run-length compressed 8-bit variant.
pub const FORMAT_CODE_INT8_COMPRESSED: i32 = 1376257;

/// Data type for a voxel element type which can be decoded.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum AimType {
    /// signed char.
    Int8 = 65537,
    /// signed short.
    Int16 = 131074,
}

impl AimType {
    /// Retrieve the size of an element of this data type, in bytes.
    pub fn size_of(self) -> usize {
        match self {
            AimType::Int8 => 1,
            AimType::Int16 => 2,
        }
    }

    /// The format code stored in the header for this data type.
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// The voxel format declared by an AIM header.
/// Every format code maps to exactly one variant.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum VoxelFormat {
    /// signed char.
    Int8,
    /// signed short.
    Int16,
    /// Compressed 8-bit voxels. Recognized, but never decoded.
    UnsupportedCompressed,
    /// Any other code.
    Unknown(i32),
}

impl VoxelFormat {
    /// Classify a raw format code.
    pub fn from_code(code: i32) -> Self {
        match code {
            FORMAT_CODE_INT8 => VoxelFormat::Int8,
            FORMAT_CODE_INT16 => VoxelFormat::Int16,
            FORMAT_CODE_INT8_COMPRESSED => VoxelFormat::UnsupportedCompressed,
            other => VoxelFormat::Unknown(other),
        }
    }

    /// The raw format code of this variant.
    pub fn code(&self) -> i32 {
        match *self {
            VoxelFormat::Int8 => FORMAT_CODE_INT8,
            VoxelFormat::Int16 => FORMAT_CODE_INT16,
            VoxelFormat::UnsupportedCompressed => FORMAT_CODE_INT8_COMPRESSED,
            VoxelFormat::Unknown(code) => code,
        }
    }

    /// Obtain the decodable element type, if any.
    pub fn element_type(&self) -> Option<AimType> {
        match *self {
            VoxelFormat::Int8 => Some(AimType::Int8),
            VoxelFormat::Int16 => Some(AimType::Int16),
            _ => None,
        }
    }
}

impl From<AimType> for VoxelFormat {
    fn from(t: AimType) -> Self {
        match t {
            AimType::Int8 => VoxelFormat::Int8,
            AimType::Int16 => VoxelFormat::Int16,
        }
    }
}

/// Resolve a raw format code into a decodable element type.
///
/// # Errors
///
/// - `AimError::UnsupportedVoxelFormat` if the code is the compressed
///   variant or not recognized at all.
pub fn resolve_format(code: i32) -> Result<AimType> {
    FromPrimitive::from_i32(code)
        .ok_or_else(|| AimError::UnsupportedVoxelFormat(VoxelFormat::from_code(code)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_supported_codes() {
        assert_eq!(resolve_format(65537).unwrap(), AimType::Int8);
        assert_eq!(resolve_format(131074).unwrap(), AimType::Int16);
        assert_eq!(AimType::Int8.size_of(), 1);
        assert_eq!(AimType::Int16.size_of(), 2);
    }

    #[test]
    fn rejects_compressed_and_unknown() {
        match resolve_format(1376257) {
            Err(AimError::UnsupportedVoxelFormat(VoxelFormat::UnsupportedCompressed)) => {}
            other => panic!("unexpected result {:?}", other),
        }
        for code in &[0, -1, 1, 65536, 131073, 196611, i32::MAX] {
            match resolve_format(*code) {
                Err(AimError::UnsupportedVoxelFormat(VoxelFormat::Unknown(c))) => {
                    assert_eq!(c, *code)
                }
                other => panic!("unexpected result {:?} for code {}", other, code),
            }
        }
    }

    #[test]
    fn code_round_trips() {
        for code in &[65537, 131074, 1376257, 42] {
            assert_eq!(VoxelFormat::from_code(*code).code(), *code);
        }
        assert_eq!(VoxelFormat::from(AimType::Int16).element_type(), Some(AimType::Int16));
        assert_eq!(VoxelFormat::UnsupportedCompressed.element_type(), None);
    }
}
