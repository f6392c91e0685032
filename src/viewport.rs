// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the ViewBounds struct, which describes the rectangle of
//! the complex plane currently mapped onto the pixel grid, and the
//! ViewportScaler, which owns the running zoom state and narrows that
//! rectangle a little on every call.

use error::ZoomError;
use num::Complex;

/// A rectangle on the complex plane, treating the real axis as x and
/// the imaginary axis as y.  The invariant `xmin < xmax` and
/// `ymin < ymax` is established at construction and preserved by the
/// scaler; a `ViewBounds` handed to a worker is never mutated again.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewBounds {
    /// Left edge on the real axis.
    pub xmin: f64,
    /// Right edge on the real axis.
    pub xmax: f64,
    /// Lower edge on the imaginary axis.
    pub ymin: f64,
    /// Upper edge on the imaginary axis.
    pub ymax: f64,
}

impl ViewBounds {
    /// Constructor from raw corners.  Rejects inverted or degenerate
    /// rectangles, which would make the pixel mapping meaningless.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<ViewBounds, ZoomError> {
        if !(xmin < xmax) {
            return Err(ZoomError::InvalidBounds {
                reason: format!("xmin {} is not below xmax {}", xmin, xmax),
            });
        }
        if !(ymin < ymax) {
            return Err(ZoomError::InvalidBounds {
                reason: format!("ymin {} is not below ymax {}", ymin, ymax),
            });
        }
        Ok(ViewBounds {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Constructor from a center point and the two axis diameters,
    /// the shape the command line supplies.
    pub fn from_center(center: Complex<f64>, dx: f64, dy: f64) -> Result<ViewBounds, ZoomError> {
        ViewBounds::new(
            center.re - dx / 2.0,
            center.re + dx / 2.0,
            center.im - dy / 2.0,
            center.im + dy / 2.0,
        )
    }

    /// Extent along the real axis.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Extent along the imaginary axis.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// The midpoint of the rectangle, which the scaler holds fixed.
    pub fn center(&self) -> Complex<f64> {
        Complex::new(
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }

    /// Given the column and row of a pixel on a `width` by `height`
    /// grid, return the complex number at the equivalent location in
    /// this rectangle.  Pixel (0, 0) maps to the (xmin, ymin) corner.
    pub fn pixel_to_point(
        &self,
        px: usize,
        py: usize,
        width: usize,
        height: usize,
    ) -> Complex<f64> {
        Complex::new(
            self.xmin + (px as f64) * self.width() / (width as f64),
            self.ymin + (py as f64) * self.height() / (height as f64),
        )
    }
}

/// Owns the four running bound values of the zoom and shrinks them
/// toward their common center once per call.  The scaler lives on the
/// coordinator thread only; workers receive the `ViewBounds` copies
/// it produces and never touch the scaler itself.
#[derive(Debug)]
pub struct ViewportScaler {
    bounds: ViewBounds,
    rate: f64,
}

impl ViewportScaler {
    /// Seeds the scaler with the initial window.  `rate` is the
    /// fraction of each axis removed per frame and must sit strictly
    /// between 0 and 1 for the bounds invariant to survive shrinking.
    pub fn new(initial: ViewBounds, rate: f64) -> Result<ViewportScaler, ZoomError> {
        if !(rate > 0.0 && rate < 1.0) {
            return Err(ZoomError::InvalidBounds {
                reason: format!("zoom rate {} is outside (0, 1)", rate),
            });
        }
        Ok(ViewportScaler {
            bounds: initial,
            rate,
        })
    }

    /// Narrows the window by one step and returns the new bounds.
    /// Each edge moves inward by half of `rate` times the current
    /// extent, so the center never drifts.  There is no depth floor:
    /// past roughly 10^15:1 the f64 grid collapses and neighboring
    /// pixels map to identical coordinates, which this renderer
    /// accepts rather than fights.
    pub fn next_bounds(&mut self) -> ViewBounds {
        let xstep = self.bounds.width() * self.rate / 2.0;
        let ystep = self.bounds.height() * self.rate / 2.0;
        self.bounds.xmin += xstep;
        self.bounds.xmax -= xstep;
        self.bounds.ymin += ystep;
        self.bounds.ymax -= ystep;
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_fail_on_inverted_rectangle() {
        assert!(ViewBounds::new(1.0, -1.0, -1.0, 1.0).is_err());
        assert!(ViewBounds::new(-1.0, 1.0, 1.0, -1.0).is_err());
    }

    #[test]
    fn bounds_fail_on_degenerate_rectangle() {
        assert!(ViewBounds::new(0.0, 0.0, -1.0, 1.0).is_err());
        assert!(ViewBounds::new(-1.0, 1.0, 0.5, 0.5).is_err());
    }

    #[test]
    fn bounds_pass_on_good_rectangle() {
        assert!(ViewBounds::new(-2.5, 1.0, -1.0, 1.0).is_ok());
    }

    #[test]
    fn from_center_recovers_the_corners() {
        let b = ViewBounds::from_center(Complex::new(-0.75, 0.0), 3.5, 2.0).unwrap();
        assert_eq!(b, ViewBounds::new(-2.5, 1.0, -1.0, 1.0).unwrap());
    }

    #[test]
    fn from_center_rejects_zero_diameter() {
        assert!(ViewBounds::from_center(Complex::new(0.0, 0.0), 0.0, 2.0).is_err());
    }

    #[test]
    fn pixel_mapping_hits_the_corners() {
        let b = ViewBounds::new(-2.0, 2.0, -2.0, 2.0).unwrap();
        assert_eq!(b.pixel_to_point(0, 0, 4, 4), Complex::new(-2.0, -2.0));
        assert_eq!(b.pixel_to_point(2, 2, 4, 4), Complex::new(0.0, 0.0));
        assert_eq!(b.pixel_to_point(4, 4, 4, 4), Complex::new(2.0, 2.0));
    }

    #[test]
    fn pixel_mapping_on_the_classic_window() {
        let b = ViewBounds::new(-2.5, 1.0, -1.0, 1.0).unwrap();
        let p = b.pixel_to_point(0, 0, 800, 457);
        assert_eq!(p, Complex::new(-2.5, -1.0));
        let q = b.pixel_to_point(400, 0, 800, 457);
        assert!((q.re - (-0.75)).abs() < 1e-12);
    }

    #[test]
    fn scaler_rejects_bad_rates() {
        let b = ViewBounds::new(-2.5, 1.0, -1.0, 1.0).unwrap();
        assert!(ViewportScaler::new(b, 0.0).is_err());
        assert!(ViewportScaler::new(b, 1.0).is_err());
        assert!(ViewportScaler::new(b, -0.5).is_err());
    }

    #[test]
    fn scaler_narrows_strictly_and_holds_the_center() {
        let b = ViewBounds::new(-2.5, 1.0, -1.0, 1.0).unwrap();
        let center = b.center();
        let mut scaler = ViewportScaler::new(b, 0.01).unwrap();
        let mut last = b;
        for _ in 0..200 {
            let next = scaler.next_bounds();
            assert!(next.width() < last.width());
            assert!(next.height() < last.height());
            assert!(next.xmin < next.xmax && next.ymin < next.ymax);
            assert!((next.center().re - center.re).abs() < 1e-9);
            assert!((next.center().im - center.im).abs() < 1e-9);
            last = next;
        }
    }

    #[test]
    fn one_percent_takes_one_percent() {
        let b = ViewBounds::new(-2.5, 1.0, -1.0, 1.0).unwrap();
        let mut scaler = ViewportScaler::new(b, 0.01).unwrap();
        let next = scaler.next_bounds();
        assert!((next.width() - 3.5 * 0.99).abs() < 1e-12);
        assert!((next.height() - 2.0 * 0.99).abs() < 1e-12);
    }
}
