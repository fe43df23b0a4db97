// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is the dual-gradient magnitude of its four
//! orthogonal neighbors, with the image treated as a torus: the left
//! neighbor of column 0 is the last column, the pixel above row 0 is
//! the last row, and so on.  For each of the red, green and blue
//! channels:
//!
//! ```text
//!     Δx = right − left
//!     Δy = up − down
//!
//!   |Δx|² = (Δrx)²+(Δgx)²+(Δbx)²
//!   |Δy|² = (Δry)²+(Δgy)²+(Δby)²
//!  e(x,y) = ⌊√(|Δx|²+|Δy|²)⌋ / 10
//! ```
//!
//! The direction of Δy only affects the sign, which the squaring
//! discards.  An alpha channel, if present, never contributes.
//!
//! The result is narrowed to a byte.  By default the narrowing
//! truncates (keeps the low eight bits), so the maps are bit-for-bit
//! identical to those of the C seam carver this crate replaced; see
//! `Normalization` for the clamping alternative.

use crate::cq;
use crate::error::Result;
use crate::raster::Raster;
use crate::twodmap::TwoDimensionalMap;
use itertools::iproduct;
use num_traits::{clamp, AsPrimitive};

/// One normalized energy value per pixel.
pub type EnergyMap = TwoDimensionalMap<u8>;

/// How the scaled gradient magnitude is squeezed into eight bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Keep the low eight bits, as a C `(uint8_t)` cast would.
    #[default]
    Truncate,
    /// Clamp to 255.
    Saturate,
}

impl Normalization {
    /// Narrow an already-scaled energy.
    pub fn narrow(self, scaled: u32) -> u8 {
        match self {
            Normalization::Truncate => scaled.as_(),
            Normalization::Saturate => clamp(scaled, 0, 255).as_(),
        }
    }
}

// Only the color channels count toward the gradient.
const COLOR_CHANNELS: u8 = 3;

// Σ (a_c − b_c)² over the color channels of two pixels.
#[inline]
fn channel_delta_squared<R: Raster>(image: &R, a: (u32, u32), b: (u32, u32)) -> i32 {
    (0..COLOR_CHANNELS)
        .map(|c| {
            let d = i32::from(image.get(a.0, a.1, c)) - i32::from(image.get(b.0, b.1, c));
            d * d
        })
        .sum()
}

// (Image, x, y) -> Energy
fn energy_at<R: Raster>(image: &R, x: u32, y: u32, normalization: Normalization) -> u8 {
    let (mw, mh) = (image.width() - 1, image.height() - 1);
    let (left, right, up, down) = (
        cq!(x == 0, mw, x - 1),
        cq!(x == mw, 0, x + 1),
        cq!(y == 0, mh, y - 1),
        cq!(y == mh, 0, y + 1),
    );
    let grad_x = channel_delta_squared(image, (right, y), (left, y));
    let grad_y = channel_delta_squared(image, (x, up), (x, down));
    // At most 6·255², so the square root always fits.
    let energy: u32 = f64::from(grad_x + grad_y).sqrt().as_();
    normalization.narrow(energy / 10)
}

/// Compute the energy of every pixel in an image, truncating
/// normalization.
pub fn calculate_energy<R: Raster>(image: &R) -> Result<EnergyMap> {
    calculate_energy_with(image, Normalization::default())
}

/// Compute the energy of every pixel in an image.
pub fn calculate_energy_with<R: Raster>(
    image: &R,
    normalization: Normalization,
) -> Result<EnergyMap> {
    let (width, height) = image.dimensions();
    let mut emap = EnergyMap::new(width, height)?;
    for (y, x) in iproduct!(0..height, 0..width) {
        emap[(x, y)] = energy_at(image, x, y, normalization);
    }
    Ok(emap)
}

/// The same map as `calculate_energy_with`, computed in horizontal
/// bands, one scoped thread per CPU.  No row depends on any other, so
/// the target is simply broken up with `chunks_mut`.
#[cfg(feature = "threaded")]
pub fn calculate_energy_threaded<R: Raster + Sync>(
    image: &R,
    normalization: Normalization,
) -> Result<EnergyMap> {
    use crate::error::Error;

    let (width, height) = image.dimensions();
    let mut emap = EnergyMap::new(width, height)?;
    let rows_per_band = (height as usize + num_cpus::get() - 1) / num_cpus::get();
    let band_len = rows_per_band * width as usize;

    crossbeam::scope(|scope| {
        for (band, cells) in emap.as_mut_slice().chunks_mut(band_len).enumerate() {
            scope.spawn(move |_| {
                let first_row = band * rows_per_band;
                for (i, cell) in cells.iter_mut().enumerate() {
                    let (x, y) = (i % width as usize, first_row + i / width as usize);
                    *cell = energy_at(image, x as u32, y as u32, normalization);
                }
            });
        }
    })
    .map_err(|_| Error::Worker)?;
    Ok(emap)
}

impl EnergyMap {
    /// Render the map as a grayscale raster for inspection: the energy
    /// goes into every color channel, and alpha, if there is one, is
    /// opaque.
    pub fn to_raster<R: Raster>(&self, channels: u8) -> Result<R> {
        let mut out = R::allocate(self.width, self.height, channels)?;
        for (y, x) in iproduct!(0..self.height, 0..self.width) {
            let e = self[(x, y)];
            out.set_pixel(x, y, &[e, e, e, 255]);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelBuffer;

    // A 3x3 black image with one red pixel in the middle.
    const RED_DOT: [u8; 27] = [
        0, 0, 0, 0, 0, 0, 0, 0, 0, //
        0, 0, 0, 100, 0, 0, 0, 0, 0, //
        0, 0, 0, 0, 0, 0, 0, 0, 0,
    ];
    const RED_DOT_ENERGY: [u8; 9] = [0, 10, 0, 10, 0, 10, 0, 10, 0];

    #[test]
    fn energy_generator_works() {
        let buf = PixelBuffer::from_raw(3, 3, 3, RED_DOT.to_vec()).unwrap();
        let energy = calculate_energy(&buf).unwrap();
        assert_eq!(energy.as_slice(), &RED_DOT_ENERGY);
    }

    #[test]
    fn uniform_images_have_no_energy() {
        let buf = PixelBuffer::from_raw(4, 3, 3, [77u8, 12, 200].repeat(12)).unwrap();
        let energy = calculate_energy(&buf).unwrap();
        assert!(energy.as_slice().iter().all(|e| *e == 0));
    }

    #[test]
    fn single_row_has_only_horizontal_gradient() {
        // Row 0 is its own up and down neighbor.
        let buf = PixelBuffer::from_raw(3, 1, 3, vec![0, 0, 0, 30, 40, 0, 0, 0, 0]).unwrap();
        let energy = calculate_energy(&buf).unwrap();
        assert_eq!(energy.as_slice(), &[5, 0, 5]);
    }

    #[test]
    fn single_pixel_wraps_onto_itself() {
        let buf = PixelBuffer::from_raw(1, 1, 3, vec![255, 0, 255]).unwrap();
        assert_eq!(calculate_energy(&buf).unwrap().as_slice(), &[0]);
    }

    #[test]
    fn alpha_does_not_contribute() {
        let mut buf = PixelBuffer::allocate(3, 1, 4).unwrap();
        buf.put(1, 0, 3, 255);
        let energy = calculate_energy(&buf).unwrap();
        assert_eq!(energy.as_slice(), &[0, 0, 0]);
    }

    #[test]
    fn narrowing_truncates_unless_asked_to_saturate() {
        assert_eq!(Normalization::Truncate.narrow(62), 62);
        assert_eq!(Normalization::Truncate.narrow(300), 44);
        assert_eq!(Normalization::Saturate.narrow(300), 255);
        assert_eq!(Normalization::Saturate.narrow(62), 62);
    }

    #[test]
    fn energy_renders_as_gray_with_opaque_alpha() {
        let buf = PixelBuffer::from_raw(3, 3, 3, RED_DOT.to_vec()).unwrap();
        let energy = calculate_energy(&buf).unwrap();
        let rendered: PixelBuffer = energy.to_raster(4).unwrap();
        assert_eq!(&rendered.as_raw()[4..8], &[10, 10, 10, 255]);
        assert_eq!(&rendered.as_raw()[0..4], &[0, 0, 0, 255]);
    }

    #[cfg(feature = "threaded")]
    #[test]
    fn threaded_energy_matches_sequential() {
        let data: Vec<u8> = (0..7 * 5 * 3).map(|i| (i * 37 % 251) as u8).collect();
        let buf = PixelBuffer::from_raw(7, 5, 3, data).unwrap();
        assert_eq!(
            calculate_energy_threaded(&buf, Normalization::Truncate).unwrap(),
            calculate_energy(&buf).unwrap()
        );
    }
}
