// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// My ternary expression handler.  Rust's `if` is already an
/// expression, but `cargo fmt` spreads it across five lines, and the
/// border tables (wrap-around neighbors, clipped predecessor ranges)
/// read much better as a column of one-liners.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn picks_the_matching_arm() {
        let width = 4u32;
        let wrap_left = |x: u32| cq!(x == 0, width - 1, x - 1);
        assert_eq!(wrap_left(0), 3);
        assert_eq!(wrap_left(2), 1);
    }
}
