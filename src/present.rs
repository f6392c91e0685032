// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Presentation: color a finished iteration buffer and show it.
//!
//! The window itself belongs to the binary; the library only sees
//! the `Surface` trait, which models the display the way SDL did in
//! the old days: take the lock, write your pixels, release the lock,
//! flip.  Tests substitute an in-memory surface.

use error::ZoomError;
use palette::Palette;
use tile::IterationBuffer;

/// A fixed-size display the pipeline can draw into.
pub trait Surface {
    /// Grants scoped exclusive access to the 0xAARRGGBB pixel words.
    /// The slice stays valid only for the duration of the closure,
    /// the moral equivalent of a lock/unlock pair around the writes.
    fn with_pixels<F>(&mut self, f: F)
    where
        F: FnOnce(&mut [u32]);

    /// Makes the written pixels visible.  A lost surface reports
    /// `ZoomError::SurfaceLost`, which is fatal to the frame loop.
    fn flip(&mut self) -> Result<(), ZoomError>;
}

/// Blits completed iteration buffers through the color table onto a
/// surface.  Holds no per-frame state of its own; the one rule it
/// enforces by construction is that it reads a slot's buffer only
/// between that slot's completion and relaunch.
pub struct FramePresenter {
    palette: Palette,
}

impl FramePresenter {
    /// Builds a presenter around a finished color table.
    pub fn new(palette: Palette) -> FramePresenter {
        FramePresenter { palette }
    }

    /// Writes one color word per pixel under the surface's scoped
    /// access, then flips.  Counts at the iteration limit wrap to the
    /// black entry, so the set interior stays black.
    pub fn present<S: Surface>(
        &self,
        surface: &mut S,
        buffer: &IterationBuffer,
    ) -> Result<(), ZoomError> {
        let palette = &self.palette;
        surface.with_pixels(|pixels| {
            for (word, &count) in pixels.iter_mut().zip(buffer.as_slice()) {
                *word = palette.color(count).to_argb();
            }
        });
        surface.flip()
    }
}
