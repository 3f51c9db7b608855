//! This module defines the voxel volume API, as well as data
//! types for reading volumes from files.
//! An integration with `ndarray` allows for more elegant and
//! efficient approaches, and should be preferred when possible.

pub mod element;
pub mod inmem;
pub mod ndarray;
pub mod orientation;
pub mod shape;

pub use self::element::DataElement;
pub use self::inmem::{InMemAimVolume, VoxelData};
pub use self::orientation::OrientationPolicy;
use crate::error::Result;
use crate::spacing::Spacing;
use crate::typedef::AimType;
use self::shape::Dim;

/// Public API for AIM volume data, exposed as a 3-dimensional
/// voxel array.
pub trait AimVolume {
    /// Get the dimensions of the volume, x first.
    fn dim(&self) -> &Dim;

    /// Get the physical voxel spacing, in millimeters.
    fn spacing(&self) -> &Spacing;

    /// Get this volume's data type.
    fn data_type(&self) -> AimType;

    /// Fetch a single voxel's value in the given voxel index coordinates
    /// as a double precision floating point value.
    /// Note that using this function continuously to traverse the volume
    /// is inefficient. Prefer the `ndarray` API for volume traversal.
    ///
    /// # Errors
    ///
    /// - `AimError::OutOfBounds` if the given coordinates surpass this
    /// volume's boundaries.
    fn get_f64(&self, coords: &[usize]) -> Result<f64>;

    /// Fetch a single voxel's value in the given voxel index coordinates
    /// as a single precision floating point value.
    ///
    /// # Errors
    ///
    /// - `AimError::OutOfBounds` if the given coordinates surpass this
    /// volume's boundaries.
    fn get_f32(&self, coords: &[usize]) -> Result<f32> {
        let v = self.get_f64(coords)?;
        Ok(v as f32)
    }
}
