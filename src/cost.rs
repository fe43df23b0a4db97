// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The cumulative cost table.
//!
//! Each cell holds the least total energy of any 8-connected path
//! from the top row down to that cell:
//!
//! ```text
//! M(x,0) = e(x,0)
//! M(x,y) = e(x,y) + min{ M(x−1,y−1), M(x,y−1), M(x+1,y−1) }
//! ```
//!
//! with the predecessors clipped to the image, so the leftmost and
//! rightmost columns have only two.  Only the totals are stored, not
//! the parent that produced them; the seam finder recovers the path by
//! walking back up through the totals.

use crate::cq;
use crate::energy::EnergyMap;
use crate::error::Result;
use crate::twodmap::TwoDimensionalMap;

pub type CostTable = TwoDimensionalMap<f64>;

/// Build the cost table for an energy map.  Rows depend on the row
/// above, so this runs top to bottom.
pub fn calculate_cost(energy: &EnergyMap) -> Result<CostTable> {
    let (width, height) = (energy.width, energy.height);
    let mut target = CostTable::new(width, height)?;

    // Populate the first row with their native energies.
    for x in 0..width {
        target[(x, 0)] = f64::from(energy[(x, 0)]);
    }

    let maxwidth = width - 1;
    for y in 1..height {
        for x in 0..width {
            let parents = cq!(x == 0, 0, x - 1)..=cq!(x == maxwidth, maxwidth, x + 1);
            let cheapest = parents
                .map(|px| target[(px, y - 1)])
                .fold(f64::INFINITY, f64::min);
            target[(x, y)] = f64::from(energy[(x, y)]) + cheapest;
        }
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENERGY_DATA: [u8; 20] = [9, 9, 0, 9, 9, 9, 1, 9, 8, 9, 9, 9, 9, 9, 0, 9, 9, 9, 0, 9];
    const COST_DATA: [f64; 20] = [
        9.0, 9.0, 0.0, 9.0, 9.0, //
        18.0, 1.0, 9.0, 8.0, 18.0, //
        10.0, 10.0, 10.0, 17.0, 8.0, //
        19.0, 19.0, 19.0, 8.0, 17.0,
    ];

    #[test]
    fn energy_grid_to_cost_table() {
        let energies = EnergyMap::from_vec(5, 4, ENERGY_DATA.to_vec()).unwrap();
        let cost = calculate_cost(&energies).unwrap();
        assert_eq!(cost.as_slice(), &COST_DATA);
    }

    #[test]
    fn first_row_is_copied_verbatim() {
        let energies = EnergyMap::from_vec(4, 1, vec![3, 0, 255, 7]).unwrap();
        let cost = calculate_cost(&energies).unwrap();
        assert_eq!(cost.as_slice(), &[3.0, 0.0, 255.0, 7.0]);
    }

    #[test]
    fn single_column_just_accumulates() {
        let energies = EnergyMap::from_vec(1, 3, vec![1, 2, 3]).unwrap();
        let cost = calculate_cost(&energies).unwrap();
        assert_eq!(cost.as_slice(), &[1.0, 3.0, 6.0]);
    }

    #[test]
    fn edge_columns_see_only_two_parents() {
        // If column 0 could reach column 2 it would pick up the zero.
        let energies = EnergyMap::from_vec(3, 2, vec![5, 6, 0, 1, 1, 1]).unwrap();
        let cost = calculate_cost(&energies).unwrap();
        assert_eq!(cost.row(1), &[6.0, 1.0, 1.0]);
    }
}
