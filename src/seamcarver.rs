// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! Seam removal, the one-seam pipeline, and a carver that repeats it
//! until the image is narrow enough.

use crate::energy::Normalization;
use crate::error::{Error, Result};
use crate::imageseams::{DualGradient, ImageSeams};
use crate::raster::Raster;
use log::{debug, trace};

/// Remove one pixel from each row of the image, at the column named by
/// the seam for that row; everything to its right moves one column
/// left.  The seam is checked in full before anything is allocated.
pub fn remove_seam<R, S>(image: &R, seam: S) -> Result<R>
where
    R: Raster,
    S: AsRef<[u32]>,
{
    let seam = seam.as_ref();
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::Dimension { width, height });
    }
    if seam.len() != height as usize {
        return Err(Error::SeamLength {
            expected: height as usize,
            found: seam.len(),
        });
    }
    if let Some((row, column)) = seam.iter().enumerate().find(|(_, x)| **x >= width) {
        return Err(Error::SeamColumn {
            row: row as u32,
            column: *column,
            width,
        });
    }

    let mut imgbuf = R::allocate(width - 1, height, image.channels())?;
    for (y, seam_x) in (0..height).zip(seam.iter().copied()) {
        for x in (0..width).filter(|x| *x != seam_x) {
            imgbuf.copy_pixel(image, (x, y), (if x < seam_x { x } else { x - 1 }, y));
        }
    }
    Ok(imgbuf)
}

/// Energy, cost, seam, removal: narrow the image by one column.
pub fn carve_one_seam<R: Raster>(image: &R) -> Result<R> {
    SeamCarver::new(image).carve_once()
}

// It isn't necessary at this point to be using a struct-based
// implementation, but it lays the groundwork for caching intermediate
// results.

/// A struct for holding the image to be carved.
pub struct SeamCarver<'a, R: Raster> {
    image: &'a R,
    normalization: Normalization,
}

impl<'a, R: Raster> SeamCarver<'a, R> {
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new(image: &'a R) -> Self {
        SeamCarver {
            image,
            normalization: Normalization::default(),
        }
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    fn carve_from(&self, image: &R) -> Result<R> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::Dimension { width, height });
        }
        let seam = DualGradient::new(image)
            .with_normalization(self.normalization)
            .vertical_seam()?;
        debug!("removing seam {:?}", seam.as_slice());
        remove_seam(image, &seam)
    }

    /// Remove the single cheapest vertical seam.
    pub fn carve_once(&self) -> Result<R> {
        self.carve_from(self.image)
    }

    // This is absurdly inefficient, as the entire energy map and cost
    // table are recalculated for every seam.  Only the columns next to
    // the last seam actually change.

    /// Repeatedly carve single seams out of the image until it is
    /// `newwidth` columns wide.  The height never changes.
    pub fn carve(&self, newwidth: u32) -> Result<R> {
        let (width, height) = self.image.dimensions();
        if newwidth > width {
            return Err(Error::Upscale {
                width,
                requested: newwidth,
            });
        }
        if newwidth == 0 {
            return Err(Error::Dimension {
                width: newwidth,
                height,
            });
        }

        let mut scratch = R::allocate(width, height, self.image.channels())?;
        for y in 0..height {
            for x in 0..width {
                scratch.copy_pixel(self.image, (x, y), (x, y));
            }
        }

        while scratch.width() > newwidth {
            scratch = self.carve_from(&scratch)?;
            trace!("W: {}, {}", scratch.width(), scratch.height());
        }
        Ok(scratch)
    }
}
