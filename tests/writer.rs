use aim::{
    AimVolume, FormatVersion, HeaderMetadata, InMemAimVolume, IntoNdArray, OrientationPolicy,
    ReaderOptions, Spacing, SpacingSource, WriterOptions,
};
use approx::assert_abs_diff_eq;
use ndarray::{Array, Array3, ShapeBuilder};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

fn get_temporary_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn calibrated_metadata() -> HeaderMetadata {
    HeaderMetadata {
        scaling_factor: Some(8192.),
        density_slope: Some(1603.51904),
        density_intercept: Some(-391.209015),
        mu_water: Some(0.2409),
        original_dim_pixels: Some([100, 100, 100]),
        original_dim_microns: Some([6100, 8200, 4100]),
        ..Default::default()
    }
}

fn i16_ramp() -> Array3<i16> {
    Array::from_shape_fn((5, 4, 3).f(), |(x, y, z)| (x as i16 - 2) * 1000 + (y * 3 + z) as i16)
}

#[test]
fn round_trip_both_versions() {
    let dir = tempdir().unwrap();
    let meta = calibrated_metadata();
    let data = i16_ramp();

    for (version, name) in &[
        (FormatVersion::V020, "round_trip_020.aim"),
        (FormatVersion::V030, "round_trip_030.aim"),
    ] {
        let path = get_temporary_path(&dir, name);
        WriterOptions::new(&path)
            .version(*version)
            .metadata(&meta)
            .write_array(&data)
            .unwrap();

        let obj = ReaderOptions::new()
            .orientation(OrientationPolicy::ReverseAxes)
            .read_file(&path)
            .unwrap();
        assert_eq!(obj.header().version, *version);
        assert_eq!(obj.metadata(), &meta);
        assert_eq!(obj.spacing_source(), SpacingSource::OriginalDimensions);

        let volume = obj.into_volume();
        let spacing = volume.spacing().as_ref();
        assert_abs_diff_eq!(spacing[0], 0.041, epsilon = 1e-5);
        assert_abs_diff_eq!(spacing[1], 0.082, epsilon = 1e-5);
        assert_abs_diff_eq!(spacing[2], 0.061, epsilon = 1e-5);

        let arr = volume.into_ndarray::<i16>();
        assert_eq!(arr.shape(), &[3, 4, 5]);
        assert_eq!(arr, data.t());
    }
}

#[test]
fn round_trip_i8_volume() {
    let dir = tempdir().unwrap();
    let path = get_temporary_path(&dir, "bytes.aim");
    let data = Array::from_shape_fn((3, 3, 2).f(), |(x, y, z)| (x * 40 + y * 7 + z) as i8 - 64);
    let volume = InMemAimVolume::from_array(data, Spacing::default()).unwrap();
    WriterOptions::new(&path)
        .header_text("!> Created by a test\n")
        .write_volume(&volume)
        .unwrap();

    let policy = OrientationPolicy::FlipAndPad { pad: 1 };
    let obj = ReaderOptions::new().orientation(policy).read_file(&path).unwrap();
    assert!(obj.header_text().as_str().starts_with("!> Created by a test\n!> Orig-ISQ-Dim-p"));
    assert_eq!(obj.spacing_source(), SpacingSource::OriginalDimensions);
    assert_eq!(obj.volume(), &volume.orient(policy).unwrap());
}

#[test]
fn round_trip_anisotropic_spacing() {
    let dir = tempdir().unwrap();
    let spacing = Spacing::new([0.082, 0.082, 0.041]).unwrap();
    let volume = InMemAimVolume::from_array(i16_ramp(), spacing).unwrap();

    // configured calibration is kept, configured original dimensions are replaced
    let meta = HeaderMetadata {
        post_scan_scaling_factor: Some(2.),
        original_dim_pixels: Some([1, 1, 1]),
        original_dim_microns: Some([61, 61, 61]),
        ..calibrated_metadata()
    };

    for (version, name) in &[
        (FormatVersion::V020, "spacing_020.aim"),
        (FormatVersion::V030, "spacing_030.aim.gz"),
    ] {
        let path = get_temporary_path(&dir, name);
        WriterOptions::new(&path)
            .version(*version)
            .metadata(&meta)
            .write_volume(&volume)
            .unwrap();

        let obj = ReaderOptions::new()
            .orientation(OrientationPolicy::FlipAndPad { pad: 0 })
            .read_file(&path)
            .unwrap();
        assert_eq!(obj.spacing_source(), SpacingSource::OriginalDimensions);
        assert_eq!(obj.metadata().density_slope, meta.density_slope);
        assert_eq!(obj.metadata().post_scan_scaling_factor, Some(2.));
        assert_eq!(obj.metadata().original_dim_pixels, Some([500, 400, 300]));

        let read = obj.volume().spacing().as_ref();
        for (r, s) in read.iter().zip(spacing.as_ref()) {
            assert_abs_diff_eq!(*r, *s, epsilon = 1e-5);
        }
        assert_eq!(obj.volume().dim(), volume.dim());
    }
}

#[test]
fn round_trip_gz() {
    let dir = tempdir().unwrap();
    let path = get_temporary_path(&dir, "compressed.aim.gz");
    let data = i16_ramp();
    WriterOptions::new(&path)
        .version(FormatVersion::V030)
        .metadata(&calibrated_metadata())
        .write_array(&data)
        .unwrap();

    // the file itself is GZip compressed
    let raw = std::fs::read(&path).unwrap();
    assert_eq!(&raw[..2], &[0x1f, 0x8b]);

    let obj = aim::read_aim(&path).unwrap();
    assert_eq!(obj.header().version, FormatVersion::V030);
    assert_eq!(obj.volume().dim().as_ref(), &[25, 24, 23]);
    // original (x, y, z) lands on (x + 10, y + 10, 12 - z)
    assert_eq!(obj.volume().get_f64(&[10, 10, 12]).unwrap(), -2000.);
    assert_eq!(obj.volume().get_f64(&[14, 13, 10]).unwrap(), 2011.);
}
