// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The fixed pool of reusable worker slots.
//!
//! Each slot pairs one long-lived worker thread with one privately
//! owned iteration buffer.  Rather than spawning a fresh thread per
//! frame, the coordinator sends a task descriptor (bounds plus
//! buffer) down the slot's channel, and the worker sends the filled
//! buffer back when the tile is done.  The buffer physically rides
//! the channel, so whoever holds the task holds exclusive access to
//! the buffer and no lock is needed: the completion receive is the
//! happens-before edge between the worker's writes and the
//! presenter's reads.

use std::thread;

use crossbeam::channel::{bounded, Receiver, Sender};

use tile::{render_tile, IterationBuffer};
use viewport::ViewBounds;

/// Where a slot sits in its `Idle → Running → Done → … → Terminated`
/// cycle.  `Idle` persists only for slots whose worker never
/// launched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SlotState {
    /// No task has been dispatched; the parked buffer is stale.
    Idle,
    /// A tile is in flight on the worker thread.
    Running,
    /// The last tile completed and its buffer is parked here.
    Done,
    /// The worker has been joined; no further dispatch is possible.
    Terminated,
}

/// One render assignment: the rectangle to sample and the buffer to
/// fill.  Owning a task means owning its buffer.
struct RenderTask {
    bounds: ViewBounds,
    buffer: IterationBuffer,
}

struct WorkerSlot {
    id: usize,
    state: SlotState,
    // None when the worker failed to launch or has been shut down.
    tasks: Option<Sender<RenderTask>>,
    done: Receiver<RenderTask>,
    handle: Option<thread::JoinHandle<()>>,
    // The task lives here whenever it is not in flight.  None only
    // if the worker died mid-tile and took the buffer with it.
    parked: Option<RenderTask>,
}

/// A fixed-size pool of worker slots cycled round-robin by the frame
/// loop, one tile per slot per frame.
pub struct RenderPool {
    slots: Vec<WorkerSlot>,
}

impl RenderPool {
    /// Creates `threads` slots, each with a zeroed buffer for a
    /// `width` by `height` grid and a named worker thread evaluating
    /// up to `limit` iterations per pixel.  `initial` is the
    /// configured viewport, parked with each slot until its first
    /// dispatch.  A slot whose thread cannot be created is logged and
    /// left permanently idle; its frames will re-present the stale
    /// buffer rather than abort the animation.
    pub fn new(
        threads: usize,
        width: usize,
        height: usize,
        limit: u32,
        initial: ViewBounds,
    ) -> RenderPool {
        let slots = (0..threads)
            .map(|id| WorkerSlot::launch(id, width, height, limit, initial))
            .collect();
        RenderPool { slots }
    }

    /// Number of slots in the pool.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The lifecycle state of slot `slot`.
    pub fn state(&self, slot: usize) -> SlotState {
        self.slots[slot].state
    }

    /// Sends the slot's parked buffer back out with fresh bounds,
    /// moving it to `Running`.  Returns false, keeping the stale
    /// buffer parked, if the slot has no live worker or is still
    /// waiting to be consumed.  Never blocks.
    pub fn dispatch(&mut self, slot: usize, bounds: ViewBounds) -> bool {
        let s = &mut self.slots[slot];
        if s.state == SlotState::Running || s.state == SlotState::Terminated {
            return false;
        }
        let mut task = match s.parked.take() {
            Some(task) => task,
            None => return false,
        };
        task.bounds = bounds;
        let sender = match s.tasks {
            Some(ref sender) => sender,
            None => {
                s.parked = Some(task);
                return false;
            }
        };
        match sender.send(task) {
            Ok(()) => {
                s.state = SlotState::Running;
                true
            }
            Err(err) => {
                warn!("worker {} rejected its task; keeping stale frame", s.id);
                s.parked = Some(err.into_inner());
                s.tasks = None;
                false
            }
        }
    }

    /// Blocks until slot `slot` finishes its tile, then returns a
    /// borrow of the completed buffer (`Running → Done`).  For a slot
    /// that never launched, the stale parked buffer comes back
    /// immediately.  Returns None only if the worker died mid-tile
    /// and its buffer is unrecoverable.
    pub fn wait(&mut self, slot: usize) -> Option<&IterationBuffer> {
        let s = &mut self.slots[slot];
        if s.state == SlotState::Running {
            match s.done.recv() {
                Ok(task) => {
                    s.parked = Some(task);
                    s.state = SlotState::Done;
                }
                Err(_) => {
                    warn!("worker {} died mid-tile; skipping its frames", s.id);
                    s.tasks = None;
                    s.state = SlotState::Done;
                }
            }
        }
        s.parked.as_ref().map(|task| &task.buffer)
    }

    /// The bounds of the slot's most recently completed tile, or the
    /// configured viewport if nothing has run yet.  For logging and
    /// inspection.
    pub fn bounds(&self, slot: usize) -> Option<ViewBounds> {
        self.slots[slot].parked.as_ref().map(|task| task.bounds)
    }

    /// Drives every slot to `Terminated`: one final wait per running
    /// slot, then close its channel and join the thread.  After this
    /// no dispatch succeeds and no worker outlives the pool.
    /// Idempotent, and also run on drop.
    pub fn shutdown(&mut self) {
        for slot in 0..self.slots.len() {
            if self.slots[slot].state == SlotState::Running {
                self.wait(slot);
            }
        }
        for s in &mut self.slots {
            s.tasks = None;
            if let Some(handle) = s.handle.take() {
                if handle.join().is_err() {
                    warn!("worker {} panicked before shutdown", s.id);
                }
            }
            s.state = SlotState::Terminated;
        }
    }
}

impl Drop for RenderPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl WorkerSlot {
    fn launch(
        id: usize,
        width: usize,
        height: usize,
        limit: u32,
        initial: ViewBounds,
    ) -> WorkerSlot {
        let (task_tx, task_rx) = bounded::<RenderTask>(1);
        let (done_tx, done_rx) = bounded::<RenderTask>(1);

        let builder = thread::Builder::new().name(format!("tile-{}", id));
        let handle = builder.spawn(move || {
            for mut task in task_rx {
                render_tile(&task.bounds, &mut task.buffer, limit);
                if done_tx.send(task).is_err() {
                    break;
                }
            }
        });

        let parked = RenderTask {
            // Holds the configured viewport until the first dispatch;
            // the buffer it carries is what a dead slot re-presents.
            bounds: initial,
            buffer: IterationBuffer::new(width, height),
        };

        match handle {
            Ok(handle) => WorkerSlot {
                id,
                state: SlotState::Idle,
                tasks: Some(task_tx),
                done: done_rx,
                handle: Some(handle),
                parked: Some(parked),
            },
            Err(err) => {
                warn!("could not launch worker {}: {}", id, err);
                WorkerSlot {
                    id,
                    state: SlotState::Idle,
                    tasks: None,
                    done: done_rx,
                    handle: None,
                    parked: Some(parked),
                }
            }
        }
    }
}
