//! Physical voxel spacing.
//!
//! The spacing is derived from the original scan dimensions recorded in the
//! header text when both the pixel and the micrometer triples are present.
//! Otherwise, the nominal scanner resolution is assumed.
//!
//! Note that the derived value does not account for images whose voxel size
//! was coarsened after the scan, other than through the post-scan scaling
//! factor. It is reproduced as recorded by the scanner software.

use crate::error::{AimError, Result};
use crate::metadata::HeaderMetadata;

/// Nominal isotropic resolution of the XtremeCT II scanner, in millimeters.
pub const DEFAULT_SPACING: f64 = 0.061;

/// Number of decimal places kept in derived spacing values.
const SPACING_DECIMALS: i32 = 5;

/// Voxel spacing in millimeters, x first. All components are strictly positive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spacing([f64; 3]);

impl Spacing {
    /// Validate and create a new spacing vector.
    ///
    /// # Errors
    ///
    /// - `AimError::InvalidSpacing` if a component is not strictly positive
    ///   or not finite.
    pub fn new(spacing: [f64; 3]) -> Result<Self> {
        for v in spacing.iter() {
            if !is_valid_component(*v) {
                return Err(AimError::InvalidSpacing(*v));
            }
        }
        Ok(Spacing(spacing))
    }

    /// Create an isotropic spacing vector.
    pub fn isotropic(value: f64) -> Result<Self> {
        Spacing::new([value; 3])
    }

    /// The same spacing with the axis order reversed.
    pub fn reversed(&self) -> Self {
        let [x, y, z] = self.0;
        Spacing([z, y, x])
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing([DEFAULT_SPACING; 3])
    }
}

impl AsRef<[f64]> for Spacing {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// The source of a voxel spacing value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SpacingSource {
    /// Derived from the original scan dimensions in the header text
    OriginalDimensions,
    /// Nominal scanner resolution
    Default,
}

/// Derive the voxel spacing from header metadata, falling back to the
/// given isotropic spacing.
///
/// When both original dimension triples are present, each component is
/// `post_scan_scaling_factor * round(microns / pixels / 1000, 5)`, the
/// post-scan factor defaulting to 1. A zero pixel count, a missing triple,
/// or a non-positive outcome all select the fallback.
pub fn compute_spacing(meta: &HeaderMetadata, default: Spacing) -> (Spacing, SpacingSource) {
    match spacing_from_original_dim(meta) {
        Some(spacing) => {
            debug!("Spacing {:?} from original dimensions", spacing.0);
            (spacing, SpacingSource::OriginalDimensions)
        }
        None => {
            debug!("Spacing {:?} from default", default.0);
            (default, SpacingSource::Default)
        }
    }
}

fn spacing_from_original_dim(meta: &HeaderMetadata) -> Option<Spacing> {
    let pixels = meta.original_dim_pixels?;
    let microns = meta.original_dim_microns?;
    let factor = meta.post_scan_scaling_factor.unwrap_or(1.);

    let mut spacing = [0.; 3];
    for ((s, um), px) in spacing.iter_mut().zip(microns.iter()).zip(pixels.iter()) {
        if *px == 0 {
            return None;
        }
        *s = factor * round_to(*um as f64 / *px as f64 / 1000., SPACING_DECIMALS);
    }
    Spacing::new(spacing).ok()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn is_valid_component(v: f64) -> bool {
    v.is_finite() && v > 0.
}
