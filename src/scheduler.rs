//! Fixed timestep frame scheduler
//!
//! Decouples the host's variable-rate frame callback from the fixed
//! simulation step. Each host frame accumulates elapsed real time, runs
//! zero or more fixed updates, then renders exactly once.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Host-side per-frame callback registration (e.g. `requestAnimationFrame`)
pub trait FrameHook {
    type Handle: Copy + std::fmt::Debug;

    /// Ask the host to call back on its next frame
    fn request_frame(&mut self) -> Self::Handle;

    /// Withdraw a request made by `request_frame`
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// The work done per frame
pub trait FrameCallbacks {
    /// Advance the simulation by one fixed step
    fn update(&mut self, dt: f32);

    /// Draw the current state
    fn render(&mut self);
}

/// Ticks to run for an accumulated backlog
#[derive(Debug, Clone, Copy, PartialEq)]
struct StepPlan {
    ticks_to_run: u32,
    remaining: f64,
    dropped_backlog: f64,
}

/// Split `accumulator` into whole steps, capped at `max_ticks`. Whatever is
/// still a whole step or more after the cap is discarded.
fn plan_steps(mut accumulator: f64, step: f64, max_ticks: u32) -> StepPlan {
    let mut ticks_to_run = 0u32;
    while accumulator >= step && ticks_to_run < max_ticks {
        accumulator -= step;
        ticks_to_run += 1;
    }

    if accumulator >= step {
        StepPlan {
            ticks_to_run,
            remaining: 0.0,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining: accumulator,
            dropped_backlog: 0.0,
        }
    }
}

/// Fixed timestep loop driven by a [`FrameHook`]
#[derive(Debug)]
pub struct FixedStepLoop<H: FrameHook> {
    hook: H,
    step: f64,
    max_substeps: u32,
    accumulator: f64,
    last_timestamp: f64,
    pending: Option<H::Handle>,
    running: bool,
}

impl<H: FrameHook> FixedStepLoop<H> {
    /// A stopped loop stepping at `SIM_DT`
    pub fn new(hook: H) -> Self {
        Self {
            hook,
            step: SIM_DT as f64,
            max_substeps: MAX_SUBSTEPS,
            accumulator: 0.0,
            last_timestamp: 0.0,
            pending: None,
            running: false,
        }
    }

    /// Cap on fixed updates per frame (at least 1)
    pub fn set_max_substeps(&mut self, max_substeps: u32) {
        self.max_substeps = max_substeps.max(1);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a frame callback is currently registered with the host
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    /// Begin running. `now` is the host clock in seconds; the first frame
    /// measures its elapsed time from it. No-op when already running.
    pub fn start(&mut self, now: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.accumulator = 0.0;
        self.last_timestamp = now;
        self.pending = Some(self.hook.request_frame());
        log::info!("Frame loop started");
    }

    /// Stop running and cancel the pending frame callback. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.hook.cancel_frame(handle);
        }
        if self.running {
            self.running = false;
            log::info!("Frame loop stopped");
        }
    }

    /// Handle one host frame at `timestamp` seconds. Runs the due fixed
    /// updates, renders once and re-arms the hook. Returns the number of
    /// updates run.
    pub fn frame(&mut self, timestamp: f64, app: &mut impl FrameCallbacks) -> u32 {
        // The hook that delivered this frame has fired
        self.pending = None;
        if !self.running {
            return 0;
        }

        let elapsed = (timestamp - self.last_timestamp).max(0.0);
        self.last_timestamp = timestamp;
        self.accumulator += elapsed;

        let plan = plan_steps(self.accumulator, self.step, self.max_substeps);
        self.accumulator = plan.remaining;
        if plan.dropped_backlog > 0.0 {
            log::debug!(
                "Dropped {:.3}s of simulation backlog after {} substeps",
                plan.dropped_backlog,
                plan.ticks_to_run
            );
        }

        let dt = self.step as f32;
        for _ in 0..plan.ticks_to_run {
            app.update(dt);
        }
        app.render();

        self.pending = Some(self.hook.request_frame());
        plan.ticks_to_run
    }
}

/// A hook whose frames are delivered by hand, for tests and headless runs
#[derive(Debug, Default)]
pub struct ManualFrameHook {
    next_handle: u32,
    pending: Option<u32>,
    pub requested: u32,
    pub cancelled: u32,
}

impl ManualFrameHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding request, if any
    pub fn pending(&self) -> Option<u32> {
        self.pending
    }
}

impl FrameHook for ManualFrameHook {
    type Handle = u32;

    fn request_frame(&mut self) -> u32 {
        self.next_handle += 1;
        self.requested += 1;
        self.pending = Some(self.next_handle);
        self.next_handle
    }

    fn cancel_frame(&mut self, handle: u32) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled += 1;
    }
}
