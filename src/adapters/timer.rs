//! Simulation actuation timer.
//!
//! Records armed state instead of touching a hardware timer peripheral.
//! The embedding loop (or a test) observes [`SimTimer::take_fire`] and
//! delivers the completion by calling
//! [`LockService::handle_actuation_complete`](crate::app::service::LockService::handle_actuation_complete)
//! itself, which keeps the completion on the single processing context.

use log::debug;

use crate::app::ports::ActuationTimer;

/// Host/simulation `ActuationTimer` backend.
#[derive(Debug, Default)]
pub struct SimTimer {
    armed: Option<u32>,
}

impl SimTimer {
    pub fn new() -> Self {
        Self { armed: None }
    }

    /// True while a one-shot is armed.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Duration of the armed one-shot, if any.
    pub fn armed_duration_ms(&self) -> Option<u32> {
        self.armed
    }

    /// Consume the armed one-shot, simulating its expiry. Returns `true`
    /// if a timer was armed; the caller then delivers the completion.
    pub fn take_fire(&mut self) -> bool {
        let was_armed = self.armed.take().is_some();
        if was_armed {
            debug!("sim timer: fired");
        }
        was_armed
    }
}

impl ActuationTimer for SimTimer {
    fn start(&mut self, duration_ms: u32) {
        debug!("sim timer: armed for {duration_ms}ms");
        self.armed = Some(duration_ms);
    }

    fn cancel(&mut self) {
        if self.armed.take().is_some() {
            debug!("sim timer: cancelled");
        }
    }
}
