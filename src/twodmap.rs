// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::error::{Error, Result};
use std::ops::{Index, IndexMut};

/// Defines the basic two-dimensional map: An addressable field
/// containing one value per pixel of the source image: a `u8` for the
/// normalized energy map, or an `f64` for the cumulative cost table.
/// Addressing is always `(x, y)`, that is, `(column, row)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    pub width: u32,
    pub height: u32,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map, every cell holding `P::default()`.  Fails
    /// rather than aborting if either dimension is zero or the storage
    /// cannot be reserved.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Dimension { width, height });
        }
        let cells = cell_count(&[width as usize, height as usize])?;
        Ok(TwoDimensionalMap {
            width,
            height,
            data: try_filled(cells, P::default())?,
        })
    }

    /// Wrap an existing row-major vector.
    pub fn from_vec(width: u32, height: u32, data: Vec<P>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Dimension { width, height });
        }
        let expected = cell_count(&[width as usize, height as usize])?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                found: data.len(),
            });
        }
        Ok(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  This
    // particular variant is the same one used in image.rs.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// A single row, left to right.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// The whole map, row-major.
    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    #[cfg(feature = "threaded")]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [P] {
        &mut self.data
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

// Multiply out a set of dimensions without wrapping.
pub(crate) fn cell_count(dims: &[usize]) -> Result<usize> {
    dims.iter()
        .try_fold(1usize, |acc, d| acc.checked_mul(*d))
        .ok_or(Error::Allocation { cells: usize::MAX })
}

/// Reserve exactly `cells` slots and fill them, reporting failure
/// instead of letting the allocator abort the process.
pub(crate) fn try_filled<P: Copy>(cells: usize, fill: P) -> Result<Vec<P>> {
    let mut data = Vec::new();
    data.try_reserve_exact(cells)
        .map_err(|_| Error::Allocation { cells })?;
    data.resize(cells, fill);
    Ok(data)
}
