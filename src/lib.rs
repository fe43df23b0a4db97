// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image narrowing by dual-gradient seam carving.
//!
//! The pipeline is four pure stages, each allocating its own output:
//!
//! ```text
//! Raster → EnergyMap → CostTable → Seam → Raster (one column narrower)
//! ```
//!
//! `carve_one_seam` runs all of them; the stages are public for callers
//! who want to look at the intermediate maps.

mod ternary;

pub mod cost;
pub mod energy;
pub mod error;
pub mod imageseams;
pub mod raster;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;

pub use cost::{calculate_cost, CostTable};
#[cfg(feature = "threaded")]
pub use energy::calculate_energy_threaded;
pub use energy::{calculate_energy, calculate_energy_with, EnergyMap, Normalization};
pub use error::{Error, Result};
pub use imageseams::{DualGradient, ImageSeams};
pub use raster::{MaybeSync, PixelBuffer, Raster};
pub use seamcarver::{carve_one_seam, remove_seam, SeamCarver};
pub use seamfinder::{find_seam, Seam};
