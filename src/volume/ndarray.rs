//! Interfaces and implementations specific to integration with `ndarray`.
//!
//! This module introduces the trait [`IntoNdArray`], which is implemented for
//! in-memory AIM volumes and enables their mapping into an [`Array3`] of an
//! arbitrary numeric element type. Each voxel is cast from its stored type
//! to the target type as if by `as`.
//!
//! #### Note on memory order
//!
//! AIM voxel buffers are stored in column major order (also called Fortran
//! order). The resulting arrays keep this memory order, with the first axis
//! varying fastest, rather than the usual row major order (AKA C ordering).
//!
//! [`IntoNdArray`]: ./trait.IntoNdArray.html
//! [`Array3`]: https://docs.rs/ndarray/0.15/ndarray/type.Array3.html
//!
use super::inmem::{InMemAimVolume, VoxelData};
use ndarray::Array3;
use num_traits::AsPrimitive;

/// Trait for volumes which can be converted to an ndarray.
///
/// Please see the [module-level documentation](index.html) for more details.
pub trait IntoNdArray {
    /// Consume the volume into a 3-dimensional array with the given
    /// target element type `T`.
    fn into_ndarray<T>(self) -> Array3<T>
    where
        T: 'static + Copy,
        i8: AsPrimitive<T>,
        i16: AsPrimitive<T>;
}

impl IntoNdArray for VoxelData {
    fn into_ndarray<T>(self) -> Array3<T>
    where
        T: 'static + Copy,
        i8: AsPrimitive<T>,
        i16: AsPrimitive<T>,
    {
        (&self).into_ndarray()
    }
}

impl<'a> IntoNdArray for &'a VoxelData {
    fn into_ndarray<T>(self) -> Array3<T>
    where
        T: 'static + Copy,
        i8: AsPrimitive<T>,
        i16: AsPrimitive<T>,
    {
        match self {
            VoxelData::Int8(a) => a.mapv(|v| v.as_()),
            VoxelData::Int16(a) => a.mapv(|v| v.as_()),
        }
    }
}

impl IntoNdArray for InMemAimVolume {
    fn into_ndarray<T>(self) -> Array3<T>
    where
        T: 'static + Copy,
        i8: AsPrimitive<T>,
        i16: AsPrimitive<T>,
    {
        self.into_data().into_ndarray()
    }
}

impl<'a> IntoNdArray for &'a InMemAimVolume {
    fn into_ndarray<T>(self) -> Array3<T>
    where
        T: 'static + Copy,
        i8: AsPrimitive<T>,
        i16: AsPrimitive<T>,
    {
        self.data().into_ndarray()
    }
}
