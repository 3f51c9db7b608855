//! Conversion of raw voxel intensities into physical units.
//!
//! Stored intensities are linear attenuation values multiplied by a scaling
//! factor. Given the calibration parameters found in the header text, they
//! can be mapped into bone mineral density (mg HA/cm³) or Hounsfield units.

use crate::metadata::HeaderMetadata;
use crate::volume::ndarray::IntoNdArray;
use crate::volume::InMemAimVolume;
use ndarray::Array3;

/// Default attenuation scaling factor.
pub const DEFAULT_MU_SCALING: f64 = 8192.;
/// Default linear attenuation of water.
pub const DEFAULT_MU_WATER: f64 = 0.2409;
/// Default slope of the density calibration.
pub const DEFAULT_DENSITY_SLOPE: f64 = 1603.51904;
/// Default intercept of the density calibration.
pub const DEFAULT_DENSITY_INTERCEPT: f64 = -391.209015;

/// Calibration parameters of a scan.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Calibration {
    /// Attenuation scaling factor of stored intensities
    pub mu_scaling: f64,
    /// Linear attenuation of water
    pub mu_water: f64,
    /// Density calibration slope
    pub density_slope: f64,
    /// Density calibration intercept
    pub density_intercept: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration {
            mu_scaling: DEFAULT_MU_SCALING,
            mu_water: DEFAULT_MU_WATER,
            density_slope: DEFAULT_DENSITY_SLOPE,
            density_intercept: DEFAULT_DENSITY_INTERCEPT,
        }
    }
}

impl Calibration {
    /// Take the calibration from header metadata, using the default value
    /// of every parameter which is missing.
    pub fn from_metadata(meta: &HeaderMetadata) -> Self {
        let d = Calibration::default();
        Calibration {
            mu_scaling: meta.scaling_factor.unwrap_or(d.mu_scaling),
            mu_water: meta.mu_water.unwrap_or(d.mu_water),
            density_slope: meta.density_slope.unwrap_or(d.density_slope),
            density_intercept: meta.density_intercept.unwrap_or(d.density_intercept),
        }
    }

    /// Map a raw intensity to bone mineral density.
    pub fn density(&self, raw: f64) -> f64 {
        raw / self.mu_scaling * self.density_slope + self.density_intercept
    }

    /// Map a raw intensity to Hounsfield units.
    pub fn hounsfield(&self, raw: f64) -> f64 {
        let mu = raw / self.mu_scaling;
        1000. * (mu - self.mu_water) / self.mu_water
    }

    /// Convert a whole volume to bone mineral density.
    pub fn to_density(&self, volume: &InMemAimVolume) -> Array3<f32> {
        self.convert(volume, |v| self.density(v))
    }

    /// Convert a whole volume to Hounsfield units.
    pub fn to_hounsfield(&self, volume: &InMemAimVolume) -> Array3<f32> {
        self.convert(volume, |v| self.hounsfield(v))
    }

    fn convert<F>(&self, volume: &InMemAimVolume, f: F) -> Array3<f32>
    where
        F: Fn(f64) -> f64,
    {
        volume
            .into_ndarray::<f64>()
            .mapv(|v| f(v) as f32)
    }
}
