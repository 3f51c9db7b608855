//! This module defines the data element API, which enables AIM
//! volume API implementations to read, write and convert data
//! elements.
use crate::typedef::AimType;
use byteordered::{ByteOrdered, Endianness};
use num_traits::cast::AsPrimitive;
use num_traits::Zero;
use std::fmt::Debug;
use std::io::{Result as IoResult, Write};

/// Trait type for characterizing an AIM data element, implemented for
/// the primitive numeric types which the container stores voxels as.
pub trait DataElement:
    'static
    + Sized
    + Copy
    + Debug
    + PartialEq
    + Zero
    + bytemuck::Pod
    + AsPrimitive<f32>
    + AsPrimitive<f64>
{
    /// The format code mapped to the type T
    const DATA_TYPE: AimType;

    /// Reinterpret a raw byte buffer as a vector of data elements.
    /// The buffer length must be a multiple of the element size.
    fn from_raw_vec(vec: Vec<u8>, endianness: Endianness) -> Vec<Self>;

    /// Write a sequence of data elements with the given byte order.
    fn write_all<W: Write>(values: &[Self], dest: W, endianness: Endianness) -> IoResult<()>;
}

impl DataElement for i8 {
    const DATA_TYPE: AimType = AimType::Int8;

    fn from_raw_vec(vec: Vec<u8>, _: Endianness) -> Vec<Self> {
        bytemuck::allocation::cast_vec(vec)
    }

    fn write_all<W: Write>(values: &[Self], mut dest: W, _: Endianness) -> IoResult<()> {
        dest.write_all(bytemuck::cast_slice(values))
    }
}

impl DataElement for i16 {
    const DATA_TYPE: AimType = AimType::Int16;

    fn from_raw_vec(vec: Vec<u8>, endianness: Endianness) -> Vec<Self> {
        let mut out: Vec<i16> = bytemuck::allocation::pod_collect_to_vec(&vec);
        if endianness != Endianness::native() {
            for v in out.iter_mut() {
                *v = v.swap_bytes();
            }
        }
        out
    }

    fn write_all<W: Write>(values: &[Self], dest: W, endianness: Endianness) -> IoResult<()> {
        let mut dest = ByteOrdered::runtime(dest, endianness);
        for v in values {
            dest.write_i16(*v)?;
        }
        Ok(())
    }
}
