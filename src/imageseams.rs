// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::cost::calculate_cost;
#[cfg(feature = "threaded")]
use crate::energy::calculate_energy_threaded;
#[cfg(not(feature = "threaded"))]
use crate::energy::calculate_energy_with;
use crate::energy::Normalization;
use crate::error::Result;
use crate::raster::Raster;
use crate::seamfinder::{find_seam, Seam};

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for more than one
/// energy function behind the carver.
pub trait ImageSeams {
    /// Once an ImageSeams object has an image (or whatever it needs to
    /// make a rational decision), request a top-to-bottom seam.
    fn vertical_seam(&self) -> Result<Seam>;
}

/// The dual-gradient seam engine: an image reference and the
/// normalization to apply to its energy map.
pub struct DualGradient<'a, R: Raster> {
    image: &'a R,
    normalization: Normalization,
}

impl<'a, R: Raster> DualGradient<'a, R> {
    /// Takes a reference to an image, and holds onto it.
    pub fn new(image: &'a R) -> Self {
        DualGradient {
            image,
            normalization: Normalization::default(),
        }
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }
}

impl<'a, R: Raster> ImageSeams for DualGradient<'a, R> {
    fn vertical_seam(&self) -> Result<Seam> {
        #[cfg(feature = "threaded")]
        let energy = calculate_energy_threaded(self.image, self.normalization)?;
        #[cfg(not(feature = "threaded"))]
        let energy = calculate_energy_with(self.image, self.normalization)?;
        find_seam(&calculate_cost(&energy)?)
    }
}
