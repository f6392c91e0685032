//! Error taxonomy for the zoom pipeline.
//!
//! Only two conditions are fatal: a malformed viewport before anything
//! starts, and a display surface that can no longer be flipped.  A
//! worker that fails to launch or dies mid-tile is logged and its
//! frames skipped; a continuous animation tolerates a dropped frame
//! far better than a retry loop.

/// Fatal failures of the zoom pipeline.
#[derive(Debug, Fail)]
pub enum ZoomError {
    /// The configured viewport does not satisfy `xmin < xmax` and
    /// `ymin < ymax`.  Raised before any worker or window exists.
    #[fail(display = "invalid viewport bounds: {}", reason)]
    InvalidBounds {
        /// What was wrong with the rectangle.
        reason: String,
    },

    /// The display surface could not be shown.  Terminates the frame
    /// loop immediately; remaining frames are skipped.
    #[fail(display = "display surface lost: {}", reason)]
    SurfaceLost {
        /// The windowing layer's account of the loss.
        reason: String,
    },
}
