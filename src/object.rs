//! Module for handling and retrieving complete AIM objects.
//!
//! An AIM object is the outcome of decoding one file: the header, the
//! calibration metadata found in the header text, and the voxel volume,
//! already normalized to the requested orientation.

use crate::error::Result;
use crate::header::{AimHeader, HEADER_INT_BYTES};
use crate::metadata::{HeaderMetadata, HeaderText};
use crate::spacing::{compute_spacing, Spacing, SpacingSource, DEFAULT_SPACING};
use crate::util::{is_gz_file, read_up_to, skip_bytes};
use crate::volume::{InMemAimVolume, OrientationPolicy};
use either::Either;
use flate2::bufread::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Options and flags which can be used to configure how an AIM file is read.
///
/// # Example
///
/// ```no_run
/// use aim::{AimVolume, OrientationPolicy, ReaderOptions};
/// # use aim::Result;
///
/// # fn run() -> Result<()> {
/// let obj = ReaderOptions::new()
///     .orientation(OrientationPolicy::ReverseAxes)
///     .read_file("C0001234.AIM")?;
/// println!("{:?} at {:?} mm", obj.volume().dim(), obj.volume().spacing());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderOptions {
    /// Coordinate convention of the resulting volume.
    orientation: OrientationPolicy,
    /// Isotropic spacing assumed when the header text lacks the original
    /// scan dimensions.
    default_spacing: f64,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            orientation: OrientationPolicy::default(),
            default_spacing: DEFAULT_SPACING,
        }
    }
}

impl ReaderOptions {
    /// Creates a blank new set of options ready for configuration.
    pub fn new() -> Self {
        ReaderOptions::default()
    }

    /// Sets the orientation policy applied to the decoded volume.
    pub fn orientation(&mut self, policy: OrientationPolicy) -> &mut Self {
        self.orientation = policy;
        self
    }

    /// Sets the isotropic fallback spacing, in millimeters.
    pub fn default_spacing(&mut self, spacing: f64) -> &mut Self {
        self.default_spacing = spacing;
        self
    }

    /// Retrieve the full contents of an AIM object.
    /// If the file's name ends with ".gz", the file is assumed to need
    /// GZip decoding.
    pub fn read_file<P>(&self, path: P) -> Result<AimObject>
    where
        P: AsRef<Path>,
    {
        let gz = is_gz_file(&path);
        let file = BufReader::new(File::open(path)?);
        let stream = if gz {
            Either::Left(GzDecoder::new(file))
        } else {
            Either::Right(file)
        };
        self.read_stream(stream)
    }

    /// Retrieve an AIM object from a seekable byte source.
    /// The source is rewound to its start before reading.
    pub fn read_reader<R>(&self, mut source: R) -> Result<AimObject>
    where
        R: Read + Seek,
    {
        let _ = source.seek(SeekFrom::Start(0))?;
        self.read_stream(source)
    }

    /// Retrieve an AIM object from a stream of data.
    /// It is assumed that the stream is positioned at the start of the file.
    /// The stream is only read forward.
    ///
    /// # Errors
    ///
    /// - `AimError::TruncatedHeader` if the integer prefix is incomplete.
    /// - `AimError::UnsupportedVoxelFormat` if the voxels cannot be decoded.
    /// - `AimError::BufferSizeMismatch` if the voxel buffer does not match
    ///   the header.
    /// - `AimError::InvalidDimensions` if the configured padding overflows
    ///   the volume shape.
    pub fn read_stream<R>(&self, mut source: R) -> Result<AimObject>
    where
        R: Read,
    {
        let default_spacing = Spacing::isotropic(self.default_spacing)?;

        let header = AimHeader::from_reader(&mut source)?;
        // reject an unusable padding before reading any voxel
        let _ = self.orientation.apply_dim(&header.dim)?;
        let raw_text = read_up_to(&mut source, header.header_text_len)?;
        let text = HeaderText::from_bytes(&raw_text);
        let metadata = HeaderMetadata::from_text(&text, header.version);
        let (spacing, spacing_source) = compute_spacing(&metadata, default_spacing);

        // the text block starts right after the integer prefix,
        // the voxels start after the version's fixed prefix
        let pos = (HEADER_INT_BYTES + raw_text.len()) as u64;
        let gap = header.data_offset().saturating_sub(pos);
        let skipped = skip_bytes(&mut source, gap)?;
        debug!("Skipped {} of {} bytes up to the voxel buffer", skipped, gap);

        let volume = InMemAimVolume::from_reader(source, &header, spacing)?;
        let volume = volume.orient(self.orientation)?;

        Ok(AimObject {
            header,
            text,
            metadata,
            spacing_source,
            volume,
        })
    }
}

/// Data type for an AIM object that is fully contained in memory.
#[derive(Debug, PartialEq, Clone)]
pub struct AimObject {
    header: AimHeader,
    text: HeaderText,
    metadata: HeaderMetadata,
    spacing_source: SpacingSource,
    volume: InMemAimVolume,
}

impl AimObject {
    /// Obtain a reference to the AIM header.
    pub fn header(&self) -> &AimHeader {
        &self.header
    }

    /// Obtain a reference to the decoded header text.
    pub fn header_text(&self) -> &HeaderText {
        &self.text
    }

    /// Obtain a reference to the calibration metadata.
    pub fn metadata(&self) -> &HeaderMetadata {
        &self.metadata
    }

    /// Whether the voxel spacing was derived or assumed.
    pub fn spacing_source(&self) -> SpacingSource {
        self.spacing_source
    }

    /// Obtain a reference to the object's volume.
    pub fn volume(&self) -> &InMemAimVolume {
        &self.volume
    }

    /// Move the volume out of the object, discarding the header.
    pub fn into_volume(self) -> InMemAimVolume {
        self.volume
    }

    /// Move the volume and the calibration metadata out of the object.
    pub fn into_parts(self) -> (InMemAimVolume, HeaderMetadata) {
        (self.volume, self.metadata)
    }
}

/// Read an AIM file with the default options.
pub fn read_aim<P: AsRef<Path>>(path: P) -> Result<AimObject> {
    ReaderOptions::new().read_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AimError;
    use crate::volume::AimVolume;
    use std::io::Cursor;

    fn file_020(format_code: i32, text: &str, voxels: &[u8]) -> Vec<u8> {
        let mut ints = [0i32; 32];
        ints[5] = 16;
        ints[2] = text.len() as i32;
        ints[10] = format_code;
        ints[14] = 2;
        ints[15] = 2;
        ints[16] = 2;
        let mut out: Vec<u8> = ints.iter().flat_map(|v| v.to_le_bytes().to_vec()).collect();
        out.extend(text.as_bytes());
        out.extend(vec![0u8; 32]);
        out.extend(voxels);
        out
    }

    #[test]
    fn reads_metadata_and_volume() {
        let bytes = file_020(65537, "Density: slope 3.5\n", &[1, 2, 3, 4, 5, 6, 7, 8]);
        let obj = ReaderOptions::new()
            .orientation(OrientationPolicy::FlipAndPad { pad: 0 })
            .read_stream(&bytes[..])
            .unwrap();
        assert_eq!(obj.metadata().density_slope, Some(3.5));
        assert_eq!(obj.spacing_source(), SpacingSource::Default);
        assert_eq!(obj.header_text().as_str(), "Density: slope 3.5\n");
        // flipped along z only
        assert_eq!(obj.volume().get_f64(&[0, 0, 0]).unwrap(), 5.);
        assert_eq!(obj.volume().get_f64(&[1, 0, 0]).unwrap(), 6.);
        assert_eq!(obj.volume().get_f64(&[1, 1, 1]).unwrap(), 4.);
    }

    #[test]
    fn rewinds_seekable_source() {
        let bytes = file_020(65537, "", &[0; 8]);
        let mut cursor = Cursor::new(bytes);
        let _ = cursor.seek(SeekFrom::End(0)).unwrap();
        let obj = ReaderOptions::new().read_reader(&mut cursor).unwrap();
        assert_eq!(obj.volume().data().shape(), &[22, 22, 22]);
    }

    #[test]
    fn rejects_invalid_default_spacing() {
        let bytes = file_020(65537, "", &[0; 8]);
        let res = ReaderOptions::new()
            .default_spacing(0.)
            .read_stream(&bytes[..]);
        assert!(matches!(res, Err(AimError::InvalidSpacing(_))));
    }

    #[test]
    fn rejects_overflowing_padding() {
        let bytes = file_020(65537, "", &[0; 8]);
        let res = ReaderOptions::new()
            .orientation(OrientationPolicy::FlipAndPad {
                pad: usize::MAX / 2,
            })
            .read_stream(&bytes[..]);
        assert!(matches!(res, Err(AimError::InvalidDimensions(_))));
    }

    #[test]
    fn short_file_is_a_size_mismatch() {
        let mut bytes = file_020(65537, "some text", &[]);
        bytes.truncate(140);
        match ReaderOptions::new().read_stream(&bytes[..]) {
            Err(AimError::BufferSizeMismatch { expected: 8, actual: 0 }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
}
