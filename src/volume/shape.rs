//! Shape and 3-dimensional index constructs.
//!
//! AIM volumes are always three-dimensional, and the voxel buffer is laid
//! out in column major order: the first axis varies fastest. The type
//! [`Dim`] holds a validated volume shape and translates voxel coordinates
//! into buffer offsets.
//!
//! [`Dim`]: ./struct.Dim.html
use crate::error::{AimError, Result};

/// A validated volume shape: three strictly positive extents, x first.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct Dim([usize; 3]);

impl Dim {
    /// Validate and create a new volume shape.
    ///
    /// # Example
    ///
    /// ```
    /// # use aim::volume::shape::Dim;
    /// let dim = Dim::new([64, 32, 16])?;
    /// assert_eq!(dim.as_ref(), &[64, 32, 16]);
    /// assert_eq!(dim.element_count(), 32768);
    /// # Ok::<(), aim::AimError>(())
    /// ```
    pub fn new(dim: [usize; 3]) -> Result<Self> {
        if dim.iter().any(|d| *d == 0) || checked_count(&dim).is_none() {
            return Err(AimError::InvalidDimensions([
                clamp_i32(dim[0]),
                clamp_i32(dim[1]),
                clamp_i32(dim[2]),
            ]));
        }
        Ok(Dim(dim))
    }

    /// Validate and create a volume shape from the signed header fields.
    pub fn from_header_fields(dim: [i32; 3]) -> Result<Self> {
        if dim.iter().any(|d| *d <= 0) {
            return Err(AimError::InvalidDimensions(dim));
        }
        let extents = [dim[0] as usize, dim[1] as usize, dim[2] as usize];
        if checked_count(&extents).is_none() {
            return Err(AimError::InvalidDimensions(dim));
        }
        Ok(Dim(extents))
    }

    /// Retrieve a reference to the raw extents
    pub fn raw(&self) -> &[usize; 3] {
        &self.0
    }

    /// Calculate the number of elements in this shape
    pub fn element_count(&self) -> usize {
        self.0.iter().product()
    }

    /// The same shape with every extent grown by `pad` on both sides.
    ///
    /// # Errors
    ///
    /// - `AimError::InvalidDimensions` if the padded shape overflows.
    pub fn padded(&self, pad: usize) -> Result<Dim> {
        let mut out = [0; 3];
        for (o, d) in out.iter_mut().zip(self.0.iter()) {
            *o = padded_extent(*d, pad).ok_or_else(|| self.padding_overflow(pad))?;
        }
        if checked_count(&out).is_none() {
            return Err(self.padding_overflow(pad));
        }
        Ok(Dim(out))
    }

    fn padding_overflow(&self, pad: usize) -> AimError {
        let grown = |d: usize| clamp_i32(padded_extent(d, pad).unwrap_or(usize::MAX));
        AimError::InvalidDimensions([grown(self.0[0]), grown(self.0[1]), grown(self.0[2])])
    }

    /// The same shape with the axis order reversed.
    pub fn reversed(&self) -> Dim {
        let [x, y, z] = self.0;
        Dim([z, y, x])
    }

    /// Translate voxel coordinates into a column major buffer offset:
    /// `x + nx * (y + ny * z)`.
    ///
    /// # Errors
    ///
    /// - `AimError::IncorrectVolumeDimensionality` if `coords` does not hold
    ///   exactly three values.
    /// - `AimError::OutOfBounds` if the coordinates surpass this shape.
    pub fn index_of(&self, coords: &[usize]) -> Result<usize> {
        if coords.len() != 3 {
            return Err(AimError::IncorrectVolumeDimensionality(3, coords.len()));
        }
        if !coords.iter().zip(self.0.iter()).all(|(c, d)| c < d) {
            return Err(AimError::OutOfBounds(coords.to_vec()));
        }
        let [nx, ny, _] = self.0;
        Ok(coords[0] + nx * (coords[1] + ny * coords[2]))
    }

    /// Provide an iterator traversing through all possible indices of a
    /// hypothetical volume with this shape, in buffer order.
    pub fn index_iter(&self) -> DimIter {
        DimIter {
            shape: *self,
            next: Some([0; 3]),
        }
    }
}

impl AsRef<[usize]> for Dim {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

/// Element count, checked against overflow. Two-byte elements must fit too.
fn checked_count(dim: &[usize; 3]) -> Option<usize> {
    dim.iter()
        .try_fold(2usize, |acc, d| acc.checked_mul(*d))
        .map(|bytes| bytes / 2)
}

/// An extent grown by `pad` on both sides, checked against overflow.
pub(crate) fn padded_extent(extent: usize, pad: usize) -> Option<usize> {
    pad.checked_mul(2)?.checked_add(extent)
}

fn clamp_i32(v: usize) -> i32 {
    if v > i32::MAX as usize {
        i32::MAX
    } else {
        v as i32
    }
}

/// An iterator of all indices in a volume.
///
/// Traversal is in column major order, matching the voxel buffer.
#[derive(Debug, Clone)]
pub struct DimIter {
    shape: Dim,
    next: Option<[usize; 3]>,
}

impl Iterator for DimIter {
    type Item = [usize; 3];

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.next?;
        let mut current = out;
        let mut good = false;
        for (c, s) in current.iter_mut().zip(self.shape.0.iter()) {
            if *c + 1 < *s {
                *c += 1;
                good = true;
                break;
            }
            *c = 0;
        }
        self.next = if good { Some(current) } else { None };
        Some(out)
    }
}
