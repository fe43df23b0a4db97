// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Recover the cheapest top-to-bottom seam from a cost table.
//!
//! Start at the cheapest cell of the bottom row and walk upward,
//! at each row stepping to the cheapest of the (up to) three cells
//! touching the column just chosen.  Ties are broken the same way
//! every time:
//!
//!  * bottom row: the leftmost minimum wins;
//!  * going up: straight up wins, then up-left, then up-right.
//!
//! Near the edges the candidate set is simply clipped to the image.

use crate::cost::CostTable;
use crate::error::{Error, Result};

/// An 8-connected vertical path, one column index per row, top row
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam(Vec<u32>);

impl Seam {
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for Seam {
    fn from(columns: Vec<u32>) -> Self {
        Seam(columns)
    }
}

impl AsRef<[u32]> for Seam {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

// Pick the cheapest column in `row` from `candidates`, which are listed
// in order of preference.  A later candidate only wins if it is
// strictly cheaper, so preference decides ties.
fn cheapest<I>(cost: &CostTable, row: u32, candidates: I) -> Option<u32>
where
    I: IntoIterator<Item = u32>,
{
    candidates
        .into_iter()
        .fold(None, |best: Option<(u32, f64)>, x| {
            let c = cost[(x, row)];
            match best {
                Some((_, b)) if b <= c => best,
                _ => Some((x, c)),
            }
        })
        .map(|(x, _)| x)
}

/// Given a cost table, return the list of x-coordinates that, when
/// mapped with the range (0..height), give the XY coordinates for each
/// pixel in the seam to be removed.
pub fn find_seam(cost: &CostTable) -> Result<Seam> {
    let (width, height) = (cost.width, cost.height);
    let dimension_error = Error::Dimension { width, height };
    if width == 0 || height == 0 {
        return Err(dimension_error);
    }

    // Find the x coordinate of the bottommost seam with the least
    // energy.
    let mut seam_col = cheapest(cost, height - 1, 0..width).ok_or(dimension_error)?;

    // Working backwards, generate a vec of x coordinates that map to
    // the seam, reverse and return.
    let mut path = Vec::with_capacity(height as usize);
    path.push(seam_col);
    for y in (0..height - 1).rev() {
        let c = seam_col;
        let candidates = [Some(c), c.checked_sub(1), Some(c + 1).filter(|x| *x < width)];
        seam_col = cheapest(cost, y, candidates.iter().flatten().copied())
            .ok_or(Error::Dimension { width, height })?;
        path.push(seam_col);
    }
    path.reverse();
    Ok(Seam(path))
}
