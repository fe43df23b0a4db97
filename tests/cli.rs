// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use assert_cmd::Command;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn stripes(path: &Path) {
    let img = RgbImage::from_fn(8, 5, |x, _| {
        if x % 3 == 0 {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    img.save(path).unwrap();
}

#[test]
fn removes_one_seam_by_default() {
    let dir = tempdir().unwrap();
    let (input, output) = (dir.path().join("in.png"), dir.path().join("out.png"));
    stripes(&input);

    Command::cargo_bin("dualseam")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let carved = image::open(&output).unwrap();
    assert_eq!((carved.width(), carved.height()), (7, 5));
}

#[test]
fn carves_to_a_requested_width() {
    let dir = tempdir().unwrap();
    let (input, output) = (dir.path().join("in.png"), dir.path().join("out.png"));
    stripes(&input);

    Command::cargo_bin("dualseam")
        .unwrap()
        .args(["-w", "3", "-vv"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    assert_eq!(image::open(&output).unwrap().width(), 3);
}

#[test]
fn keeps_alpha_images_rgba() {
    let dir = tempdir().unwrap();
    let (input, output) = (dir.path().join("in.png"), dir.path().join("out.png"));
    RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 99]))
        .save(&input)
        .unwrap();

    Command::cargo_bin("dualseam")
        .unwrap()
        .args(["--seams", "2"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let carved = image::open(&output).unwrap().to_rgba8();
    assert_eq!(carved.dimensions(), (2, 4));
    assert!(carved.pixels().all(|p| *p == Rgba([10, 20, 30, 99])));
}

#[test]
fn writes_the_energy_map() {
    let dir = tempdir().unwrap();
    let (input, output) = (dir.path().join("in.png"), dir.path().join("energy.png"));
    stripes(&input);

    Command::cargo_bin("dualseam")
        .unwrap()
        .arg("--energy")
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let energy = image::open(&output).unwrap().to_rgb8();
    assert_eq!(energy.dimensions(), (8, 5));
    // Column 1 sits between white and black: √(3·255²)/10 = 44.
    assert_eq!(energy.get_pixel(1, 0), &Rgb([44, 44, 44]));
    assert_eq!(energy.get_pixel(0, 0), &Rgb([0, 0, 0]));
}

#[test]
fn refuses_to_upscale() {
    let dir = tempdir().unwrap();
    let (input, output) = (dir.path().join("in.png"), dir.path().join("out.png"));
    stripes(&input);

    Command::cargo_bin("dualseam")
        .unwrap()
        .args(["--width", "20"])
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot upscale"));
    assert!(!output.exists());
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("dualseam")
        .unwrap()
        .arg(dir.path().join("nope.png"))
        .arg(dir.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("dualseam:"));
}
