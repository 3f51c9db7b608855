//! Rust implementation of a reader for Scanco AIM files.
//!
//! AIM files are volumetric CT image containers written by Scanco
//! micro-CT and HR-pQCT scanners. Two incompatible header layouts exist
//! ("020" and "030"), distinguished at runtime. This crate decodes either
//! layout into a typed, dimensioned, spaced and oriented volume, along with
//! the calibration parameters stored in the header text.
//!
//! # Example
//!
//! ```no_run
//! use aim::{AimVolume, Calibration, IntoNdArray, ReaderOptions};
//! # use aim::Result;
//!
//! # fn run() -> Result<()> {
//! let obj = ReaderOptions::new().read_file("C0001234.AIM")?;
//! let calibration = Calibration::from_metadata(obj.metadata());
//! let density = calibration.to_density(obj.volume());
//! println!("{:?} mm voxels, {:?}", obj.volume().spacing(), density.shape());
//!
//! let raw = obj.into_volume().into_ndarray::<f32>();
//! # Ok(())
//! # }
//! ```
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate quick_error;

pub mod calibration;
pub mod error;
pub mod header;
pub mod metadata;
pub mod object;
pub mod spacing;
pub mod typedef;
mod util;
pub mod volume;
pub mod writer;

pub use crate::calibration::Calibration;
pub use crate::error::{AimError, Result};
pub use crate::header::{AimHeader, FormatVersion, RawHeaderInts};
pub use crate::metadata::{HeaderMetadata, HeaderText, MetadataKey};
pub use crate::object::{read_aim, AimObject, ReaderOptions};
pub use crate::spacing::{Spacing, SpacingSource};
pub use crate::typedef::{AimType, VoxelFormat};
pub use crate::volume::ndarray::IntoNdArray;
pub use crate::volume::shape::Dim;
pub use crate::volume::{AimVolume, DataElement, InMemAimVolume, OrientationPolicy, VoxelData};
pub use crate::writer::WriterOptions;
pub use byteordered::Endianness;
