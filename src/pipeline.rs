// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The coordinator frame loop.
//!
//! One thread (this one) owns the zoom state, the presenter, and the
//! display surface.  Per frame it waits on one slot, presents that
//! slot's buffer, advances the zoom by one step, and relaunches the
//! slot with the narrower bounds, then moves to the next slot
//! round-robin.  Presentation of a slot's frame always finishes
//! before the slot is relaunched, because relaunching hands the very
//! buffer just read back to the worker; the wait/present/dispatch
//! ordering below is the load-bearing invariant of the program.

use error::ZoomError;
use pool::RenderPool;
use present::{FramePresenter, Surface};
use viewport::ViewportScaler;

/// Runs the zoom animation for `frames` frames, then shuts the pool
/// down.  Stops early, still shutting down cleanly, if the surface is
/// lost; a failed slot merely re-presents its previous frame.
/// Throughput is serialized on the slowest in-flight tile, which is
/// the price of the strict round-robin order.
pub fn run_zoom<S: Surface>(
    pool: &mut RenderPool,
    scaler: &mut ViewportScaler,
    presenter: &FramePresenter,
    surface: &mut S,
    frames: u64,
) -> Result<(), ZoomError> {
    for slot in 0..pool.slot_count() {
        pool.dispatch(slot, scaler.next_bounds());
    }

    let result = frame_loop(pool, scaler, presenter, surface, frames);

    // Reached on success, surface loss, or frame exhaustion alike:
    // one final wait per slot so every dispatched tile completes
    // exactly once, then join the workers.
    pool.shutdown();
    result
}

fn frame_loop<S: Surface>(
    pool: &mut RenderPool,
    scaler: &mut ViewportScaler,
    presenter: &FramePresenter,
    surface: &mut S,
    frames: u64,
) -> Result<(), ZoomError> {
    for frame in 0..frames {
        let slot = (frame as usize) % pool.slot_count();
        match pool.wait(slot) {
            Some(buffer) => presenter.present(surface, buffer)?,
            // The worker died and took its buffer along; nothing to
            // show for this slot anymore.
            None => continue,
        }
        info!("drew frame {} from slot {}", frame, slot);
        pool.dispatch(slot, scaler.next_bounds());
    }
    Ok(())
}
