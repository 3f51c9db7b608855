//! Orientation normalization of decoded volumes.
//!
//! Voxels come out of an AIM file in the scanner's native axis order.
//! Consumers expect one of two coordinate conventions, each expressed as an
//! [`OrientationPolicy`] variant. The policy is always chosen explicitly by
//! the caller; the two variants are not interchangeable.
//!
//! [`OrientationPolicy`]: ./enum.OrientationPolicy.html

use super::element::DataElement;
use super::shape::{padded_extent, Dim};
use crate::error::{AimError, Result};
use crate::spacing::Spacing;
use ndarray::{s, Array3, ArrayView3, Axis, ShapeBuilder};

/// Default width of the zero border added by `OrientationPolicy::FlipAndPad`.
pub const DEFAULT_PAD: usize = 10;

/// A coordinate convention to normalize decoded volumes to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OrientationPolicy {
    /// Surround the volume with a zero border of `pad` voxels on each side of
    /// every axis, then reverse the slice axis (z, the last axis of the
    /// x-first volume). Spacing is unchanged.
    ///
    /// Image toolkits which index volumes slice first see the slice axis as
    /// their first axis, so this is the same voxel grid they produce when
    /// flipping their first axis.
    FlipAndPad {
        /// Border width, in voxels
        pad: usize,
    },
    /// Reverse the order of the axes, so that `(x, y, z)` becomes `(z, y, x)`.
    /// Spacing is reversed accordingly.
    ReverseAxes,
}

/// The axis reversed by `OrientationPolicy::FlipAndPad`.
pub const FLIP_AXIS: Axis = Axis(2);

impl Default for OrientationPolicy {
    fn default() -> Self {
        OrientationPolicy::FlipAndPad { pad: DEFAULT_PAD }
    }
}

impl OrientationPolicy {
    /// Apply this policy to a voxel array, producing a new array in
    /// column major order.
    ///
    /// # Errors
    ///
    /// - `AimError::InvalidDimensions` if the padded shape overflows.
    pub fn apply<T: DataElement>(&self, data: ArrayView3<T>) -> Result<Array3<T>> {
        match *self {
            OrientationPolicy::FlipAndPad { pad } => flip_and_pad(data, pad),
            OrientationPolicy::ReverseAxes => Ok(reverse_axes(data)),
        }
    }

    /// The shape of a volume after applying this policy.
    ///
    /// # Errors
    ///
    /// - `AimError::InvalidDimensions` if the padded shape overflows.
    pub fn apply_dim(&self, dim: &Dim) -> Result<Dim> {
        match *self {
            OrientationPolicy::FlipAndPad { pad } => dim.padded(pad),
            OrientationPolicy::ReverseAxes => Ok(dim.reversed()),
        }
    }

    /// The voxel spacing of a volume after applying this policy.
    pub fn apply_spacing(&self, spacing: &Spacing) -> Spacing {
        match *self {
            OrientationPolicy::FlipAndPad { .. } => *spacing,
            OrientationPolicy::ReverseAxes => spacing.reversed(),
        }
    }
}

fn flip_and_pad<T: DataElement>(mut data: ArrayView3<T>, pad: usize) -> Result<Array3<T>> {
    let (nx, ny, nz) = data.dim();
    let grow = |n: usize| {
        padded_extent(n, pad).ok_or(AimError::InvalidDimensions([i32::MAX; 3]))
    };
    let shape = (grow(nx)?, grow(ny)?, grow(nz)?);
    let mut out = Array3::zeros(shape.f());
    // the border is symmetric, so flipping before padding is equivalent
    data.invert_axis(FLIP_AXIS);
    out.slice_mut(s![pad..pad + nx, pad..pad + ny, pad..pad + nz])
        .assign(&data);
    Ok(out)
}

fn reverse_axes<T: DataElement>(data: ArrayView3<T>) -> Array3<T> {
    let data = data.reversed_axes();
    let mut out = Array3::zeros(data.raw_dim().f());
    out.assign(&data);
    out
}
