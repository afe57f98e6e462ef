//! Lock/unlock actuation state machine.
//!
//! The bolt is driven through an asynchronous two-phase cycle: an action is
//! *initiated* synchronously, then *completed* when the platform's one-shot
//! timer fires after the configured bolt travel time.
//!
//! ```text
//!            initiate(Lock)                initiate(Unlock)
//!  UnlockCompleted ──▶ LockInitiated   LockCompleted ──▶ UnlockInitiated
//!                          │                                  │
//!                     timer fires                        timer fires
//!                          ▼                                  ▼
//!                    LockCompleted                     UnlockCompleted
//! ```
//!
//! At most one action is in flight: `initiate_action` is rejected while the
//! machine sits in either `*Initiated` state. The machine never drives
//! hardware itself — it arms an [`ActuationTimer`] port and reports both
//! phases through an [`ActionObserver`] delegate supplied per call, so it is
//! independently testable with recording mocks.

use core::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::{ActionObserver, ActuationTimer};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// The four-state actuation cycle. No terminal state; the machine cycles
/// indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockState {
    LockInitiated,
    LockCompleted,
    UnlockInitiated,
    UnlockCompleted,
}

impl LockState {
    /// True for the transient `*Initiated` states.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::LockInitiated | Self::UnlockInitiated)
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LockInitiated => write!(f, "lock initiated"),
            Self::LockCompleted => write!(f, "locked"),
            Self::UnlockInitiated => write!(f, "unlock initiated"),
            Self::UnlockCompleted => write!(f, "unlocked"),
        }
    }
}

/// What the actuator is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Lock,
    Unlock,
}

impl Action {
    fn initiated_state(self) -> LockState {
        match self {
            Self::Lock => LockState::LockInitiated,
            Self::Unlock => LockState::UnlockInitiated,
        }
    }

    fn completed_state(self) -> LockState {
        match self {
            Self::Lock => LockState::LockCompleted,
            Self::Unlock => LockState::UnlockCompleted,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lock => write!(f, "lock"),
            Self::Unlock => write!(f, "unlock"),
        }
    }
}

/// Where a lock/unlock request originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    /// A command received over the network dispatch layer.
    RemoteCommand,
    /// The local application (scheduler, auto-relock, maintenance).
    LocalApp,
    /// The physical button on the device.
    Button,
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// The actuation engine: current state plus the pending action/actor pair
/// while the bolt is in motion.
pub struct ActuationStateMachine {
    state: LockState,
    /// Set between initiate and completion; `None` means the bolt is at
    /// rest and a stale timer fire must be ignored.
    pending: Option<(Action, Actor)>,
    /// State observed when the pending action was initiated; restored if
    /// the action is cancelled before the timer fires.
    resume_state: LockState,
    /// Bolt travel time in milliseconds.
    actuator_movement_ms: u32,
    timer_armed: bool,
}

impl ActuationStateMachine {
    /// Construct from a last-known state. Absent one, the conservative
    /// assumption is a thrown bolt (`LockCompleted`).
    pub fn new(initial: Option<LockState>, actuator_movement_ms: u32) -> Self {
        let state = initial.unwrap_or(LockState::LockCompleted);
        info!("actuation: starting as {state}");
        Self {
            state,
            pending: None,
            resume_state: state,
            actuator_movement_ms,
            timer_armed: false,
        }
    }

    /// Begin a lock or unlock cycle.
    ///
    /// Returns `false` with no state change while another action is in
    /// flight. Otherwise enters the matching `*Initiated` state, reports it
    /// through the observer synchronously, and arms the one-shot timer.
    /// Completion arrives later via [`handle_timer_fired`](Self::handle_timer_fired).
    pub fn initiate_action(
        &mut self,
        actor: Actor,
        action: Action,
        timer: &mut impl ActuationTimer,
        observer: &mut dyn ActionObserver,
    ) -> bool {
        if self.is_action_in_progress() {
            warn!("actuation: {action} rejected while {}", self.state);
            return false;
        }

        self.resume_state = self.state;
        self.pending = Some((action, actor));
        self.state = action.initiated_state();
        info!("actuation: {action} initiated by {actor:?}");
        observer.on_action_initiated(action, actor);

        // A new action supersedes any stale timer bookkeeping.
        if self.timer_armed {
            timer.cancel();
        }
        timer.start(self.actuator_movement_ms);
        self.timer_armed = true;
        true
    }

    /// Timer completion, delivered by the platform on the single
    /// processing context. A fire with nothing pending (cancelled or stale
    /// timer) is ignored.
    pub fn handle_timer_fired(&mut self, observer: &mut dyn ActionObserver) {
        let Some((action, _actor)) = self.pending.take() else {
            debug!("actuation: stale timer fire ignored");
            return;
        };
        self.timer_armed = false;
        self.state = action.completed_state();
        self.resume_state = self.state;
        info!("actuation: {action} completed, now {}", self.state);
        observer.on_action_completed(action);
    }

    /// Abandon the pending action, if any. Idempotent: cancelling with
    /// nothing armed is a no-op. The machine returns to the state observed
    /// when the action was initiated, and a late fire is ignored.
    pub fn cancel(&mut self, timer: &mut impl ActuationTimer) {
        if !self.timer_armed {
            return;
        }
        timer.cancel();
        self.timer_armed = false;
        if let Some((action, _)) = self.pending.take() {
            info!("actuation: {action} cancelled, reverting to {}", self.resume_state);
            self.state = self.resume_state;
        }
    }

    /// True while the machine sits in either `*Initiated` state.
    pub fn is_action_in_progress(&self) -> bool {
        self.state.is_transient()
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    /// The action currently in flight, if any.
    pub fn current_action(&self) -> Option<Action> {
        self.pending.map(|(action, _)| action)
    }

    /// The actor that initiated the in-flight action, if any.
    pub fn current_actor(&self) -> Option<Actor> {
        self.pending.map(|(_, actor)| actor)
    }
}
