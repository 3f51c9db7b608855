//! Utility functions to write AIM files.
//!
//! The writer lays files out exactly as the reader expects them: the integer
//! prefix, the header text, zero filling up to the version's fixed prefix
//! length, and then the voxel buffer in column major order.

use crate::error::{AimError, Result};
use crate::header::{FormatVersion, AIM_ENDIANNESS, HEADER_INT_BYTES, HEADER_INT_COUNT};
use crate::metadata::HeaderMetadata;
use crate::spacing::Spacing;
use crate::util::is_gz_file;
use crate::volume::element::DataElement;
use crate::volume::shape::Dim;
use crate::volume::{AimVolume, InMemAimVolume, VoxelData};
use byteordered::ByteOrdered;
use flate2::write::GzEncoder;
use flate2::Compression;
use ndarray::Array3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Discriminator written to index 5 of "030" headers.
const VERSION_030_DISCRIMINATOR: i32 = 0;

/// Original scan pixels recorded per voxel when writing a volume's spacing.
/// Spacing values of up to 5 decimal places are then recorded exactly in
/// whole micrometers.
const ORIGINAL_PIXELS_PER_VOXEL: i64 = 100;

/// Options and flags which can be used to configure how an AIM file is written.
#[derive(Debug, Clone, PartialEq)]
pub struct WriterOptions {
    /// Where to write the file.
    path: PathBuf,
    /// Header layout to write.
    version: FormatVersion,
    /// Free header text, written first.
    header_text: String,
    /// Calibration metadata, rendered after the free header text.
    metadata: Option<HeaderMetadata>,
}

impl WriterOptions {
    /// Creates a new set of options for writing "020" files to `path`.
    /// If the path ends with ".gz", the file is GZip compressed.
    pub fn new<P>(path: P) -> WriterOptions
    where
        P: AsRef<Path>,
    {
        WriterOptions {
            path: path.as_ref().to_path_buf(),
            version: FormatVersion::V020,
            header_text: String::new(),
            metadata: None,
        }
    }

    /// Sets the header layout.
    pub fn version(mut self, version: FormatVersion) -> WriterOptions {
        self.version = version;
        self
    }

    /// Sets the free header text, written verbatim. For "030" files, the
    /// first four lines are structural and are never scanned for
    /// calibration values.
    pub fn header_text<S: Into<String>>(mut self, text: S) -> WriterOptions {
        self.header_text = text.into();
        self
    }

    /// Sets the calibration metadata, rendered into the header text after
    /// the free header text. Without free header text, the structural lines
    /// of the selected layout are written first.
    pub fn metadata(mut self, meta: &HeaderMetadata) -> WriterOptions {
        self.metadata = Some(meta.clone());
        self
    }

    /// Write a volume to the configured path.
    ///
    /// The volume's spacing is recorded as original scan dimensions in the
    /// header text, replacing any configured ones, so that reading the file
    /// yields the same spacing up to 5 decimal places.
    pub fn write_volume(&self, volume: &InMemAimVolume) -> Result<()> {
        let mut meta = self.metadata.clone().unwrap_or_default();
        record_spacing(&mut meta, volume.dim(), volume.spacing());
        let text = self.render_text(Some(&meta));
        match volume.data() {
            VoxelData::Int8(a) => self.write_file(a, &text),
            VoxelData::Int16(a) => self.write_file(a, &text),
        }
    }

    /// Write a voxel array to the configured path.
    pub fn write_array<T: DataElement>(&self, data: &Array3<T>) -> Result<()> {
        self.write_file(data, &self.render_text(self.metadata.as_ref()))
    }

    /// Write a voxel array to the given byte sink.
    pub fn write_stream<W, T>(&self, dest: W, data: &Array3<T>) -> Result<()>
    where
        W: Write,
        T: DataElement,
    {
        self.encode(dest, data, &self.render_text(self.metadata.as_ref()))
    }

    fn render_text(&self, meta: Option<&HeaderMetadata>) -> String {
        let meta = match meta {
            Some(meta) => meta,
            None => return self.header_text.clone(),
        };
        let mut text = String::new();
        if self.header_text.is_empty() {
            for i in 0..self.version.structural_text_lines() {
                text.push_str(&format!("!> AIM {} structure line {}\n", self.version.label(), i));
            }
        } else {
            text.push_str(&self.header_text);
            if !text.ends_with('\n') {
                text.push('\n');
            }
        }
        text.push_str(&meta.to_text());
        text
    }

    fn write_file<T: DataElement>(&self, data: &Array3<T>, text: &str) -> Result<()> {
        let f = File::create(&self.path)?;
        let writer = BufWriter::new(f);
        if is_gz_file(&self.path) {
            let mut e = GzEncoder::new(writer, Compression::default());
            self.encode(&mut e, data, text)?;
            e.finish()?.flush()?;
        } else {
            let mut writer = writer;
            self.encode(&mut writer, data, text)?;
            writer.flush()?;
        }
        Ok(())
    }

    fn encode<W, T>(&self, mut dest: W, data: &Array3<T>, text: &str) -> Result<()>
    where
        W: Write,
        T: DataElement,
    {
        let text = text.as_bytes();
        let ints = self.header_ints(data.shape(), text.len(), T::DATA_TYPE.code())?;

        {
            let mut dest = ByteOrdered::runtime(&mut dest, AIM_ENDIANNESS);
            for v in ints.iter() {
                dest.write_i32(*v)?;
            }
        }
        dest.write_all(text)?;
        let filler = self.version.fixed_prefix_len() as usize - HEADER_INT_BYTES;
        dest.write_all(&vec![0; filler])?;

        // iterating the transposed view yields voxels with the first axis fastest
        let voxels: Vec<T> = data.t().iter().cloned().collect();
        T::write_all(&voxels, &mut dest, AIM_ENDIANNESS)?;
        Ok(())
    }

    fn header_ints(
        &self,
        shape: &[usize],
        text_len: usize,
        format_code: i32,
    ) -> Result<[i32; HEADER_INT_COUNT]> {
        let to_i32 = |v: usize| {
            if v > i32::MAX as usize {
                None
            } else {
                Some(v as i32)
            }
        };
        let dim = match (to_i32(shape[0]), to_i32(shape[1]), to_i32(shape[2])) {
            (Some(x), Some(y), Some(z)) if x > 0 && y > 0 && z > 0 => [x, y, z],
            (x, y, z) => {
                return Err(AimError::InvalidDimensions([
                    x.unwrap_or(i32::MAX),
                    y.unwrap_or(i32::MAX),
                    z.unwrap_or(i32::MAX),
                ]))
            }
        };
        let text_len = to_i32(text_len).ok_or(AimError::InvalidHeaderTextLength(i32::MAX))?;

        let mut ints = [0; HEADER_INT_COUNT];
        ints[5] = match self.version {
            FormatVersion::V020 => 16,
            FormatVersion::V030 => VERSION_030_DISCRIMINATOR,
        };
        let layout = self.version.layout();
        ints[layout.format_code] = format_code;
        ints[layout.header_text_len] = text_len;
        for (i, d) in layout.dim.iter().zip(dim.iter()) {
            ints[*i] = *d;
        }
        Ok(ints)
    }
}

/// Express a spacing as original scan dimensions, in pixels and micrometers,
/// undoing the post-scan scaling factor.
fn record_spacing(meta: &mut HeaderMetadata, dim: &Dim, spacing: &Spacing) {
    let factor = match meta.post_scan_scaling_factor {
        Some(f) if f.is_finite() && f > 0. => f,
        _ => {
            meta.post_scan_scaling_factor = None;
            1.
        }
    };
    let mut pixels = [0i64; 3];
    let mut microns = [0i64; 3];
    for (i, (d, s)) in dim.as_ref().iter().zip(spacing.as_ref()).enumerate() {
        pixels[i] = *d as i64 * ORIGINAL_PIXELS_PER_VOXEL;
        microns[i] = (s / factor * 1000. * pixels[i] as f64).round() as i64;
    }
    debug!("Recording spacing {:?} as {:?} px, {:?} um", spacing, pixels, microns);
    meta.original_dim_pixels = Some(pixels);
    meta.original_dim_microns = Some(microns);
}
