mod util;

use aim::{
    AimError, AimType, AimVolume, Dim, InMemAimVolume, IntoNdArray, OrientationPolicy, Spacing,
    VoxelData,
};
use ndarray::{Array, Array3, ShapeBuilder};
use pretty_assertions::assert_eq;
use util::i16_bytes;

fn ramp_volume() -> InMemAimVolume {
    let dim = Dim::new([3, 2, 2]).unwrap();
    let data = i16_bytes((0..12).map(|i| i * 10 - 60));
    let spacing = Spacing::new([0.1, 0.2, 0.3]).unwrap();
    InMemAimVolume::from_raw_data(data, &dim, AimType::Int16, spacing).unwrap()
}

#[test]
fn raw_buffer_is_column_major() {
    let volume = ramp_volume();
    assert_eq!(volume.data_type(), AimType::Int16);
    assert_eq!(volume.dim().as_ref(), &[3, 2, 2]);

    let arr: Array3<i32> = volume.into_ndarray();
    assert_eq!(arr.shape(), &[3, 2, 2]);
    assert_eq!(arr[[0, 0, 0]], -60);
    assert_eq!(arr[[1, 0, 0]], -50);
    assert_eq!(arr[[0, 1, 0]], -30);
    assert_eq!(arr[[0, 0, 1]], 0);
    assert_eq!(arr[[2, 1, 1]], 50);
    // memory order is kept, with the first axis fastest
    assert!(arr.t().is_standard_layout());
}

#[test]
fn into_ndarray_casts_elements() {
    let volume = ramp_volume();
    let as_f32: Array3<f32> = (&volume).into_ndarray();
    assert_eq!(as_f32[[1, 1, 1]], 40.);
    let as_u8: Array3<u8> = volume.into_ndarray();
    // cast as if by `as`
    assert_eq!(as_u8[[0, 0, 0]], (-60i16) as u8);
}

#[test]
fn flip_and_pad() {
    let volume = ramp_volume();
    let oriented = volume
        .orient(OrientationPolicy::FlipAndPad { pad: 2 })
        .unwrap();
    assert_eq!(oriented.dim().as_ref(), &[7, 6, 6]);
    assert_eq!(oriented.spacing(), volume.spacing());

    for x in 0..3 {
        for y in 0..2 {
            for z in 0..2 {
                assert_eq!(
                    oriented.get_f64(&[x + 2, y + 2, 3 - z]).unwrap(),
                    volume.get_f64(&[x, y, z]).unwrap()
                );
            }
        }
    }

    let arr = oriented.into_ndarray::<i16>();
    let nonzero = arr.iter().filter(|v| **v != 0).count();
    // a single voxel of the ramp is zero
    assert_eq!(nonzero, 11);
    assert_eq!(arr[[0, 0, 0]], 0);
    assert_eq!(arr[[6, 5, 5]], 0);
}

#[test]
fn zero_pad_only_flips_slices() {
    let volume = ramp_volume();
    let oriented = volume
        .orient(OrientationPolicy::FlipAndPad { pad: 0 })
        .unwrap();
    assert_eq!(oriented.dim().as_ref(), &[3, 2, 2]);
    // the slice axis is reversed, x and y are not
    assert_eq!(oriented.get_f64(&[0, 0, 0]).unwrap(), 0.);
    assert_eq!(oriented.get_f64(&[1, 0, 0]).unwrap(), 10.);
    assert_eq!(oriented.get_f64(&[0, 0, 1]).unwrap(), -60.);
    assert_eq!(oriented.get_f64(&[2, 1, 1]).unwrap(), -10.);
}

#[test]
fn overflowing_padding() {
    let volume = ramp_volume();
    assert!(matches!(
        volume.orient(OrientationPolicy::FlipAndPad { pad: usize::MAX / 2 }),
        Err(AimError::InvalidDimensions(_))
    ));
}

#[test]
fn reverse_axes() {
    let volume = ramp_volume();
    let oriented = volume.orient(OrientationPolicy::ReverseAxes).unwrap();
    assert_eq!(oriented.dim().as_ref(), &[2, 2, 3]);
    assert_eq!(oriented.spacing().as_ref(), &[0.3, 0.2, 0.1]);
    for x in 0..3 {
        for y in 0..2 {
            for z in 0..2 {
                assert_eq!(
                    oriented.get_f64(&[z, y, x]).unwrap(),
                    volume.get_f64(&[x, y, z]).unwrap()
                );
            }
        }
    }
    match oriented.data() {
        VoxelData::Int16(a) => assert!(a.t().is_standard_layout()),
        other => panic!("unexpected voxel data {:?}", other),
    }
}

#[test]
fn from_array() {
    let arr = Array::from_shape_fn((2, 3, 4).f(), |(x, y, z)| (x * 12 + y * 4 + z) as i8);
    let volume = InMemAimVolume::from_array(arr.clone(), Spacing::default()).unwrap();
    assert_eq!(volume.data_type(), AimType::Int8);
    assert_eq!(volume.dim().as_ref(), &[2, 3, 4]);
    assert_eq!(volume.get_f64(&[1, 2, 3]).unwrap(), 23.);
    assert_eq!(volume.into_ndarray::<i8>(), arr);

    let empty = Array3::<i16>::zeros((0, 3, 4));
    assert!(matches!(
        InMemAimVolume::from_array(empty, Spacing::default()),
        Err(AimError::InvalidDimensions(_))
    ));
}

#[test]
fn out_of_bounds() {
    let volume = ramp_volume();
    assert!(matches!(
        volume.get_f64(&[3, 0, 0]),
        Err(AimError::OutOfBounds(_))
    ));
    assert!(matches!(
        volume.get_f32(&[0, 0, 0, 0]),
        Err(AimError::IncorrectVolumeDimensionality(3, 4))
    ));
}
