//! Types for error handling go here.
use crate::typedef::VoxelFormat;
use std::io::Error as IOError;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    #[non_exhaustive]
    pub enum AimError {
        /// The file ended before the 128-byte integer prefix could be read.
        TruncatedHeader { available: usize } {
            display("Truncated AIM header: expected 128 bytes, found {}", available)
        }
        /// The voxel format code is the compressed variant or is not recognized.
        UnsupportedVoxelFormat(format: VoxelFormat) {
            display("Unsupported AIM voxel format `{:?}` (code {})", format, format.code())
        }
        /// The voxel buffer does not hold exactly `nx * ny * nz` elements.
        BufferSizeMismatch { expected: usize, actual: usize } {
            display("Voxel buffer size mismatch: expected {} bytes, got {}", expected, actual)
        }
        /// The header declares a non-positive volume dimension.
        InvalidDimensions(dim: [i32; 3]) {
            display("Invalid volume dimensions {:?}", dim)
        }
        /// The header declares a negative header text length.
        InvalidHeaderTextLength(len: i32) {
            display("Invalid header text length {}", len)
        }
        /// A voxel spacing component is not strictly positive.
        InvalidSpacing(value: f64) {
            display("Invalid voxel spacing {}: must be strictly positive", value)
        }
        /// Attempted to read a voxel with the wrong number of coordinates.
        IncorrectVolumeDimensionality(expected: usize, got: usize) {
            display("Unexpected volume data dimensionality (expected {}, got {})", expected, got)
        }
        /// Attempted to read volume outside boundaries.
        OutOfBounds(coords: Vec<usize>) {
            display("Out of bounds access to volume: {:?}", &coords[..])
        }
        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
            display("I/O error: {}", err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, AimError>;
