// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The per-worker unit of work: sweep every pixel of the grid, map it
//! into a viewport rectangle, and store its escape count.  One tile
//! is one whole frame here; tiles never interact with each other.

use escape::escape_time;
use viewport::ViewBounds;

/// A flat, row-major grid of escape counts, one per screen pixel.
/// Each worker slot owns exactly one of these for the life of the
/// process; it is overwritten in place every frame, never
/// reallocated.  The pool's completion handshake guarantees the
/// presenter only ever reads it between renders.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationBuffer {
    width: usize,
    height: usize,
    counts: Vec<u32>,
}

impl IterationBuffer {
    /// Allocates a zeroed buffer for a `width` by `height` grid.
    pub fn new(width: usize, height: usize) -> IterationBuffer {
        IterationBuffer {
            width,
            height,
            counts: vec![0; width * height],
        }
    }

    /// Grid width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The count stored for pixel (`px`, `py`).
    pub fn at(&self, px: usize, py: usize) -> u32 {
        self.counts[py * self.width + px]
    }

    /// The whole grid in row-major order, for the presenter's linear
    /// sweep.
    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }

    fn set(&mut self, px: usize, py: usize, count: u32) {
        self.counts[py * self.width + px] = count;
    }
}

/// Fills `buffer` with the escape count of every pixel of `bounds`,
/// row by row.  Runs to completion with no shared state, so the same
/// bounds and grid always reproduce a byte-identical buffer.
pub fn render_tile(bounds: &ViewBounds, buffer: &mut IterationBuffer, limit: u32) {
    let (width, height) = (buffer.width, buffer.height);
    for (py, px) in iproduct!(0..height, 0..width) {
        let c = bounds.pixel_to_point(px, py, width, height);
        buffer.set(px, py, escape_time(c, limit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> ViewBounds {
        ViewBounds::new(-2.5, 1.0, -1.0, 1.0).unwrap()
    }

    #[test]
    fn rendering_is_idempotent() {
        let bounds = classic();
        let mut first = IterationBuffer::new(64, 37);
        let mut second = IterationBuffer::new(64, 37);
        render_tile(&bounds, &mut first, 128);
        render_tile(&bounds, &mut second, 128);
        assert_eq!(first, second);

        // Overwriting a dirty buffer also converges on the same image.
        render_tile(&classic(), &mut first, 128);
        assert_eq!(first, second);
    }

    #[test]
    fn classic_window_corner_and_center() {
        let bounds = classic();
        let limit = 256;
        let mut buffer = IterationBuffer::new(800, 457);
        render_tile(&bounds, &mut buffer, limit);

        // (0, 0) maps to -2.5 - 1.0i, far outside the radius-2
        // circle, so it escapes almost at once.
        assert!(buffer.at(0, 0) < 4);

        // The pixel nearest the origin of the plane sits deep in the
        // main cardioid and never escapes.
        let px = (2.5_f64 / 3.5 * 800.0).round() as usize;
        let py = (1.0_f64 / 2.0 * 457.0).round() as usize;
        let c = bounds.pixel_to_point(px, py, 800, 457);
        assert!(c.norm_sqr() < 0.01);
        assert_eq!(buffer.at(px, py), limit);
    }

    #[test]
    fn counts_never_exceed_the_limit() {
        let mut buffer = IterationBuffer::new(32, 32);
        render_tile(&ViewBounds::new(-2.0, 2.0, -2.0, 2.0).unwrap(), &mut buffer, 64);
        assert!(buffer.as_slice().iter().all(|&n| n <= 64));
    }

    #[test]
    fn buffer_indexing_is_row_major() {
        let mut buffer = IterationBuffer::new(3, 2);
        buffer.set(2, 1, 9);
        assert_eq!(buffer.as_slice()[1 * 3 + 2], 9);
        assert_eq!(buffer.at(2, 1), 9);
    }
}
