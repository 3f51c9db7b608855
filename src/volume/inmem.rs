//! Module holding an in-memory implementation of an AIM volume.

use super::element::DataElement;
use super::orientation::OrientationPolicy;
use super::shape::Dim;
use super::AimVolume;
use crate::error::{AimError, Result};
use crate::header::{AimHeader, AIM_ENDIANNESS};
use crate::spacing::Spacing;
use crate::typedef::AimType;
use crate::util::PREALLOC_LIMIT;
use byteordered::Endianness;
use ndarray::{Array3, ShapeBuilder};
use num_traits::AsPrimitive;
use std::io::Read;

/// Typed voxel storage. Arrays are in column major order, x first.
#[derive(Debug, PartialEq, Clone)]
pub enum VoxelData {
    /// signed 8-bit voxels
    Int8(Array3<i8>),
    /// signed 16-bit voxels
    Int16(Array3<i16>),
}

impl VoxelData {
    /// Reinterpret a raw voxel buffer and shape it into a volume.
    ///
    /// # Errors
    ///
    /// - `AimError::BufferSizeMismatch` if the buffer does not hold exactly
    ///   `nx * ny * nz` elements of the given type.
    pub fn from_raw_data(
        raw_data: Vec<u8>,
        dim: &Dim,
        datatype: AimType,
        endianness: Endianness,
    ) -> Result<Self> {
        let expected = dim.element_count() * datatype.size_of();
        if raw_data.len() != expected {
            return Err(AimError::BufferSizeMismatch {
                expected,
                actual: raw_data.len(),
            });
        }
        match datatype {
            AimType::Int8 => shape_buffer(raw_data, dim, endianness).map(VoxelData::Int8),
            AimType::Int16 => shape_buffer(raw_data, dim, endianness).map(VoxelData::Int16),
        }
    }

    /// This data's element type.
    pub fn data_type(&self) -> AimType {
        match self {
            VoxelData::Int8(_) => AimType::Int8,
            VoxelData::Int16(_) => AimType::Int16,
        }
    }

    /// The extents of the voxel array, x first.
    pub fn shape(&self) -> &[usize] {
        match self {
            VoxelData::Int8(a) => a.shape(),
            VoxelData::Int16(a) => a.shape(),
        }
    }

    fn get<T>(&self, idx: [usize; 3]) -> T
    where
        T: 'static + Copy,
        i8: AsPrimitive<T>,
        i16: AsPrimitive<T>,
    {
        match self {
            VoxelData::Int8(a) => a[idx].as_(),
            VoxelData::Int16(a) => a[idx].as_(),
        }
    }

    fn orient(&self, policy: OrientationPolicy) -> Result<Self> {
        Ok(match self {
            VoxelData::Int8(a) => VoxelData::Int8(policy.apply(a.view())?),
            VoxelData::Int16(a) => VoxelData::Int16(policy.apply(a.view())?),
        })
    }
}

impl From<Array3<i8>> for VoxelData {
    fn from(a: Array3<i8>) -> Self {
        VoxelData::Int8(a)
    }
}

impl From<Array3<i16>> for VoxelData {
    fn from(a: Array3<i16>) -> Self {
        VoxelData::Int16(a)
    }
}

fn shape_buffer<T: DataElement>(
    raw_data: Vec<u8>,
    dim: &Dim,
    endianness: Endianness,
) -> Result<Array3<T>> {
    let actual = raw_data.len();
    let values = T::from_raw_vec(raw_data, endianness);
    let [nx, ny, nz] = *dim.raw();
    Array3::from_shape_vec((nx, ny, nz).f(), values).map_err(|_| AimError::BufferSizeMismatch {
        expected: dim.element_count() * T::DATA_TYPE.size_of(),
        actual,
    })
}

/// A data type for an AIM volume contained in memory.
/// Objects of this type own a typed, densely packed voxel array
/// along with the physical voxel spacing.
#[derive(Debug, PartialEq, Clone)]
pub struct InMemAimVolume {
    dim: Dim,
    spacing: Spacing,
    data: VoxelData,
}

impl InMemAimVolume {
    /// Read an AIM volume from a stream of data. The source must be
    /// positioned at the header's data offset, and all remaining bytes are
    /// taken as the voxel buffer.
    ///
    /// # Errors
    ///
    /// - `AimError::BufferSizeMismatch` if the remaining bytes do not match
    ///   the dimensions and data type declared in the header.
    pub fn from_reader<R: Read>(mut source: R, header: &AimHeader, spacing: Spacing) -> Result<Self> {
        let mut raw_data = Vec::with_capacity(header.data_len().min(PREALLOC_LIMIT));
        let _ = source.read_to_end(&mut raw_data)?;
        debug!("Read voxel buffer of {} bytes", raw_data.len());
        InMemAimVolume::from_raw_data(raw_data, &header.dim, header.datatype, spacing)
    }

    /// Build a volume out of a raw voxel buffer in the container's byte order.
    pub fn from_raw_data(
        raw_data: Vec<u8>,
        dim: &Dim,
        datatype: AimType,
        spacing: Spacing,
    ) -> Result<Self> {
        let data = VoxelData::from_raw_data(raw_data, dim, datatype, AIM_ENDIANNESS)?;
        Ok(InMemAimVolume {
            dim: *dim,
            spacing,
            data,
        })
    }

    /// Build a volume out of a voxel array.
    ///
    /// # Errors
    ///
    /// - `AimError::InvalidDimensions` if the array is empty.
    pub fn from_array<A>(data: A, spacing: Spacing) -> Result<Self>
    where
        A: Into<VoxelData>,
    {
        let data = data.into();
        let shape = data.shape();
        let dim = Dim::new([shape[0], shape[1], shape[2]])?;
        Ok(InMemAimVolume { dim, spacing, data })
    }

    /// Retrieve a reference to the typed voxel data.
    pub fn data(&self) -> &VoxelData {
        &self.data
    }

    /// Retrieve the typed voxel data, consuming the volume.
    pub fn into_data(self) -> VoxelData {
        self.data
    }

    /// Normalize the volume to the coordinate convention of the given
    /// policy, yielding a new volume.
    ///
    /// # Errors
    ///
    /// - `AimError::InvalidDimensions` if the padded shape overflows.
    pub fn orient(&self, policy: OrientationPolicy) -> Result<InMemAimVolume> {
        let out = InMemAimVolume {
            dim: policy.apply_dim(&self.dim)?,
            spacing: policy.apply_spacing(&self.spacing),
            data: self.data.orient(policy)?,
        };
        debug!(
            "Oriented volume with {:?}: {:?} -> {:?}",
            policy,
            self.dim.as_ref(),
            out.dim.as_ref()
        );
        Ok(out)
    }
}

impl AimVolume for InMemAimVolume {
    fn dim(&self) -> &Dim {
        &self.dim
    }

    fn spacing(&self) -> &Spacing {
        &self.spacing
    }

    fn data_type(&self) -> AimType {
        self.data.data_type()
    }

    fn get_f64(&self, coords: &[usize]) -> Result<f64> {
        let _ = self.dim.index_of(coords)?;
        Ok(self.data.get([coords[0], coords[1], coords[2]]))
    }
}

impl<'a> AimVolume for &'a InMemAimVolume {
    fn dim(&self) -> &Dim {
        (**self).dim()
    }

    fn spacing(&self) -> &Spacing {
        (**self).spacing()
    }

    fn data_type(&self) -> AimType {
        (**self).data_type()
    }

    fn get_f64(&self, coords: &[usize]) -> Result<f64> {
        (**self).get_f64(coords)
    }
}
