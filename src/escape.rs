// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator, the innermost arithmetic of the whole
//! program.  Everything else exists to call this function once per
//! pixel per frame and color the answer.

use num::Complex;

/// Counts the iterations of `z ← z² + c`, starting from zero, before
/// `|z|²` reaches 4.  Returns `limit` if the orbit never escapes
/// within the allowance, which we treat as "in the set".
///
/// If an iterate exactly reproduces its predecessor the orbit has hit
/// a fixed point and will never leave, so we short-circuit straight
/// to `limit`.  Exact equality only catches period-1 orbits, not
/// longer cycles; that cheap check is all this renderer carries.
///
/// Pure and deterministic: identical inputs always give identical
/// counts.
pub fn escape_time(c: Complex<f64>, limit: u32) -> u32 {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    let mut itr = 0;
    while z.norm_sqr() < 4.0 && itr < limit {
        let next = z * z + c;
        if next == z {
            return limit;
        }
        z = next;
        itr += 1;
    }
    itr
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u32 = 512;

    #[test]
    fn origin_never_escapes() {
        assert_eq!(escape_time(Complex::new(0.0, 0.0), LIMIT), LIMIT);
    }

    #[test]
    fn points_outside_radius_two_escape_immediately() {
        for &(re, im) in &[(3.0, 0.0), (0.0, -2.5), (2.0, 2.0), (-2.1, 1.9)] {
            let c = Complex::new(re, im);
            assert!(c.norm_sqr() > 4.0);
            let n = escape_time(c, LIMIT);
            assert!(n < LIMIT, "({}, {}) gave {}", re, im, n);
        }
    }

    #[test]
    fn counts_grow_toward_the_boundary() {
        // Walking down the positive real axis toward the cusp of the
        // main cardioid at 0.25, escape counts may never decrease.
        let ray = [0.6, 0.5, 0.45, 0.4, 0.35, 0.3, 0.27, 0.26, 0.255];
        let mut last = 0;
        for &re in &ray {
            let n = escape_time(Complex::new(re, 0.0), LIMIT);
            assert!(n >= last, "count fell from {} to {} at {}", last, n, re);
            last = n;
        }
    }

    #[test]
    fn known_in_set_points_reach_the_limit() {
        for &(re, im) in &[(-1.0, 0.0), (-1.0, 0.1), (0.0, 0.5), (-0.1, 0.0)] {
            assert_eq!(escape_time(Complex::new(re, im), LIMIT), LIMIT);
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let c = Complex::new(-0.7453, 0.1127);
        let first = escape_time(c, LIMIT);
        for _ in 0..8 {
            assert_eq!(escape_time(c, LIMIT), first);
        }
    }

    #[test]
    fn fixed_point_short_circuits_to_limit() {
        // c = 0 lands on the fixed point z = 0 on the very first
        // iteration, so the cycle check fires without burning the
        // whole allowance.
        assert_eq!(escape_time(Complex::new(0.0, 0.0), u32::max_value()), u32::max_value());
    }
}
