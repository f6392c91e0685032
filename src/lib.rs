#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Animated Mandelbrot zoom renderer
//!
//! The Mandelbrot set is the set of complex numbers `c` for which the
//! orbit of `z ← z² + c`, starting from zero, stays bounded forever.
//! Coloring each pixel of a window by the number of iterations its
//! orbit takes to escape a radius-2 circle produces the familiar
//! picture; narrowing the viewed rectangle of the complex plane a
//! little between every frame produces an endless dive into its
//! boundary.
//!
//! This crate is the machinery behind that dive: a pure escape-time
//! evaluator, a viewport that shrinks toward its center once per
//! frame, a tile renderer that fills a per-slot iteration buffer, a
//! fixed pool of long-lived worker threads each cycling one tile per
//! frame, and a presenter that maps finished buffers through a color
//! table onto whatever display surface the binary provides.

extern crate crossbeam;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod error;
pub mod escape;
pub mod palette;
pub mod pipeline;
pub mod pool;
pub mod present;
pub mod tile;
pub mod viewport;

pub use error::ZoomError;
pub use escape::escape_time;
pub use palette::{Palette, Rgba};
pub use pipeline::run_zoom;
pub use pool::RenderPool;
pub use present::{FramePresenter, Surface};
pub use tile::{render_tile, IterationBuffer};
pub use viewport::{ViewBounds, ViewportScaler};
