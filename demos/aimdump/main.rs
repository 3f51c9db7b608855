//! An application for reading AIM file meta-data.

extern crate aim;

use aim::{AimVolume, Calibration, OrientationPolicy, ReaderOptions};
use std::env;

fn main() {
    let mut args = env::args().skip(1);
    let filename = args.next().expect("Path to AIM file is required");
    let obj = ReaderOptions::new()
        .orientation(OrientationPolicy::FlipAndPad { pad: 0 })
        .read_file(filename)
        .expect("Failed to read AIM file");

    println!("{:#?}", obj.header());
    println!("{:#?}", obj.metadata());
    println!("{:#?}", Calibration::from_metadata(obj.metadata()));
    println!(
        "spacing: {:?} mm ({:?})",
        obj.volume().spacing().as_ref(),
        obj.spacing_source()
    );
}
