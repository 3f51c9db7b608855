//! Calibration metadata embedded in the AIM header text.
//!
//! Following the integer prefix, AIM files carry a block of free ASCII text
//! written by the scanner software, one entry per line. A handful of these
//! lines hold the calibration parameters required to convert raw voxel
//! intensities into physical units. This module scans the text block against
//! a closed table of recognized keys and collects their values into a
//! [`HeaderMetadata`] record. Lines which do not match, or whose values do
//! not parse, are skipped.
//!
//! [`HeaderMetadata`]: ./struct.HeaderMetadata.html

use crate::header::FormatVersion;
use std::fmt::Write;

/// The calibration entries recognized in the header text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    /// Linear attenuation scaling applied to the stored intensities
    ScalingFactor,
    /// Slope of the density calibration
    DensitySlope,
    /// Intercept of the density calibration
    DensityIntercept,
    /// Linear attenuation of water
    MuWater,
    /// Factor by which the voxel size changed after the scan
    PostScanScalingFactor,
    /// Dimensions of the original scan, in pixels
    OriginalDimPixels,
    /// Dimensions of the original scan, in micrometers
    OriginalDimMicrons,
}

/// Line fragment excluded from the generic `scale` key. File names of
/// coarsened images carry it and would otherwise be read as a scaling factor.
const DOWNSCALED_FRAGMENT: &str = "downscaled";

/// The generic scaling key, tested after every specific key.
const GENERIC_SCALE_FRAGMENT: &str = "scale";

/// Recognized line fragments, tested in order. The first match wins.
const KEY_TABLE: &[(&str, MetadataKey)] = &[
    ("Scaled by factor", MetadataKey::ScalingFactor),
    ("Mu_Scaling", MetadataKey::ScalingFactor),
    ("Density: slope", MetadataKey::DensitySlope),
    ("Density: intercept", MetadataKey::DensityIntercept),
    ("HU: mu water", MetadataKey::MuWater),
    ("Post-Scan scaling factor", MetadataKey::PostScanScalingFactor),
    ("Orig-ISQ-Dim-p", MetadataKey::OriginalDimPixels),
    ("Orig-GOBJ-Dim-p", MetadataKey::OriginalDimPixels),
    ("Orig-ISQ-Dim-um", MetadataKey::OriginalDimMicrons),
    ("Orig-GOBJ-Dim-um", MetadataKey::OriginalDimMicrons),
];

impl MetadataKey {
    /// Find the key recognized in the given header text line, if any.
    pub fn match_line(line: &str) -> Option<MetadataKey> {
        KEY_TABLE
            .iter()
            .find(|(fragment, _)| line.contains(fragment))
            .map(|(_, key)| *key)
            .or_else(|| {
                if line.contains(GENERIC_SCALE_FRAGMENT) && !line.contains(DOWNSCALED_FRAGMENT) {
                    Some(MetadataKey::ScalingFactor)
                } else {
                    None
                }
            })
    }

    /// The line fragment written for this key when encoding header text.
    pub fn fragment(self) -> &'static str {
        match self {
            MetadataKey::ScalingFactor => "Scaled by factor",
            MetadataKey::DensitySlope => "Density: slope",
            MetadataKey::DensityIntercept => "Density: intercept",
            MetadataKey::MuWater => "HU: mu water",
            MetadataKey::PostScanScalingFactor => "Post-Scan scaling factor",
            MetadataKey::OriginalDimPixels => "Orig-ISQ-Dim-p",
            MetadataKey::OriginalDimMicrons => "Orig-ISQ-Dim-um",
        }
    }
}

/// Calibration parameters found in the header text.
/// Keys which were not found remain `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMetadata {
    /// Linear attenuation scaling
    pub scaling_factor: Option<f64>,
    /// Density calibration slope
    pub density_slope: Option<f64>,
    /// Density calibration intercept
    pub density_intercept: Option<f64>,
    /// Linear attenuation of water
    pub mu_water: Option<f64>,
    /// Post-scan voxel size scaling
    pub post_scan_scaling_factor: Option<f64>,
    /// Original scan dimensions, in pixels
    pub original_dim_pixels: Option<[i64; 3]>,
    /// Original scan dimensions, in micrometers
    pub original_dim_microns: Option<[i64; 3]>,
}

impl HeaderMetadata {
    /// Scan the header text of a file with the given layout.
    pub fn from_text(text: &HeaderText, version: FormatVersion) -> Self {
        let mut meta = HeaderMetadata::default();
        for line in text.lines().skip(version.structural_text_lines()) {
            meta.scan_line(line);
        }
        meta
    }

    /// Scan raw header text bytes of a file with the given layout.
    pub fn from_bytes(bytes: &[u8], version: FormatVersion) -> Self {
        HeaderMetadata::from_text(&HeaderText::from_bytes(bytes), version)
    }

    /// Update this record with a single header text line.
    /// Later occurrences of a key replace earlier ones.
    pub fn scan_line(&mut self, line: &str) {
        let key = match MetadataKey::match_line(line) {
            Some(key) => key,
            None => return,
        };

        match key {
            MetadataKey::OriginalDimPixels | MetadataKey::OriginalDimMicrons => {
                match parse_triple(line) {
                    Some(v) => {
                        trace!("{:?} = {:?}", key, v);
                        *self.triple_mut(key) = Some(v);
                    }
                    None => trace!("ignoring {:?} line without three values: {:?}", key, line),
                }
            }
            _ => match parse_last_scalar(line) {
                Some(v) => {
                    trace!("{:?} = {}", key, v);
                    *self.scalar_mut(key) = Some(v);
                }
                None => trace!("ignoring {:?} line without a value: {:?}", key, line),
            },
        }
    }

    /// Retrieve the value of a scalar key. Triple keys always yield `None`.
    pub fn scalar(&self, key: MetadataKey) -> Option<f64> {
        match key {
            MetadataKey::ScalingFactor => self.scaling_factor,
            MetadataKey::DensitySlope => self.density_slope,
            MetadataKey::DensityIntercept => self.density_intercept,
            MetadataKey::MuWater => self.mu_water,
            MetadataKey::PostScanScalingFactor => self.post_scan_scaling_factor,
            MetadataKey::OriginalDimPixels | MetadataKey::OriginalDimMicrons => None,
        }
    }

    fn scalar_mut(&mut self, key: MetadataKey) -> &mut Option<f64> {
        match key {
            MetadataKey::DensitySlope => &mut self.density_slope,
            MetadataKey::DensityIntercept => &mut self.density_intercept,
            MetadataKey::MuWater => &mut self.mu_water,
            MetadataKey::PostScanScalingFactor => &mut self.post_scan_scaling_factor,
            _ => &mut self.scaling_factor,
        }
    }

    fn triple_mut(&mut self, key: MetadataKey) -> &mut Option<[i64; 3]> {
        if key == MetadataKey::OriginalDimMicrons {
            &mut self.original_dim_microns
        } else {
            &mut self.original_dim_pixels
        }
    }

    /// Render the known entries as header text lines, in the form
    /// recognized by the scanner.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let scalars = [
            MetadataKey::ScalingFactor,
            MetadataKey::DensitySlope,
            MetadataKey::DensityIntercept,
            MetadataKey::MuWater,
            MetadataKey::PostScanScalingFactor,
        ];
        for key in scalars.iter() {
            if let Some(v) = self.scalar(*key) {
                let _ = writeln!(out, "!> {:<30}{}", key.fragment(), v);
            }
        }
        let triples = [
            (MetadataKey::OriginalDimPixels, self.original_dim_pixels),
            (MetadataKey::OriginalDimMicrons, self.original_dim_microns),
        ];
        for (key, v) in triples.iter() {
            if let Some([x, y, z]) = v {
                let _ = writeln!(out, "!> {:<30}{:>10}{:>10}{:>10}", key.fragment(), x, y, z);
            }
        }
        out
    }
}

/// Parse the last whitespace delimited token of a line as a finite number.
fn parse_last_scalar(line: &str) -> Option<f64> {
    line.split_whitespace()
        .last()?
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
}

/// Collect the integer tokens of a line, expecting exactly three.
fn parse_triple(line: &str) -> Option<[i64; 3]> {
    let values: Vec<i64> = line
        .split_whitespace()
        .filter_map(|t| t.parse().ok())
        .collect();
    match values[..] {
        [x, y, z] => Some([x, y, z]),
        _ => None,
    }
}

/// The free text block of an AIM header, decoded as ASCII.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderText(String);

impl HeaderText {
    /// Decode the text block. Bytes outside of the ASCII range are dropped.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        HeaderText(bytes.iter().filter(|b| b.is_ascii()).map(|b| *b as char).collect())
    }

    /// Iterate over the lines of the text block.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.split('\n')
    }

    /// Retrieve the decoded text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
