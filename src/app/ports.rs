//! Port traits — the boundary between the lock core and its collaborators.
//!
//! ```text
//!   Dispatch layer ──▶ LockService (domain) ──▶ ActuationTimer
//!                            │    ▲                 │
//!                      AccessPolicy └── timer completion (same context)
//!                            │
//!                       SeedSource (one-time, at init)
//! ```
//!
//! The core consumes these traits via generics or `&mut dyn` at call sites;
//! it never owns a platform resource directly. All port errors are typed —
//! callers must handle every variant explicitly.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::actuation::{Action, Actor, LockState};
use crate::error::OperationError;
use crate::limits::{
    MAX_CREDENTIALS, MAX_HOLIDAY_SCHEDULES, MAX_USERS, MAX_WEEKDAY_SCHEDULES_PER_USER,
    MAX_YEARDAY_SCHEDULES_PER_USER,
};
use crate::store::credential::CredentialRecord;
use crate::store::schedule::{HolidaySchedule, WeekdaySchedule, YeardaySchedule};
use crate::store::user::UserRecord;

// ───────────────────────────────────────────────────────────────
// Actuation timer port (domain → platform timer)
// ───────────────────────────────────────────────────────────────

/// One-shot timer for the bolt travel delay.
///
/// There is at most one armed timer at a time (overlapping actions are
/// rejected before a second `start`). Completion is not a method here: the
/// platform delivers it by calling
/// [`LockService::handle_actuation_complete`](crate::app::service::LockService::handle_actuation_complete)
/// on the same processing context every other operation runs on.
pub trait ActuationTimer {
    /// Arm the one-shot timer. A prior armed timer is superseded.
    fn start(&mut self, duration_ms: u32);

    /// Disarm. Must be idempotent: cancelling with nothing armed is a no-op.
    fn cancel(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Action observer (domain → listener)
// ───────────────────────────────────────────────────────────────

/// The two listener callbacks for the actuation cycle.
///
/// Single-subscriber model: the facade holds exactly one registered pair
/// and re-registration replaces it.
pub trait ActionObserver {
    /// An action entered its `*Initiated` state (called synchronously from
    /// the initiating operation).
    fn on_action_initiated(&mut self, action: Action, actor: Actor);

    /// The pending action reached its `*Completed` state (called from the
    /// timer completion path).
    fn on_action_completed(&mut self, action: Action);
}

// ───────────────────────────────────────────────────────────────
// Access policy port (domain → security policy)
// ───────────────────────────────────────────────────────────────

/// External security-policy collaborator.
///
/// The core never compares PINs or tokens itself; whatever proof arrived
/// with a lock/unlock request is handed here verbatim.
pub trait AccessPolicy {
    /// Decide whether `action` may proceed with the presented proof.
    /// Rejections surface as [`OperationError::InvalidCredential`] or
    /// [`OperationError::Restricted`].
    fn authorize(&self, action: Action, proof: Option<&[u8]>) -> Result<(), OperationError>;
}

// ───────────────────────────────────────────────────────────────
// Seed source port (persistence → domain, once at init)
// ───────────────────────────────────────────────────────────────

/// One-time persistence load that seeds store contents at init.
/// Failures are reported to the caller of init, never retried internally.
pub trait SeedSource {
    fn read_seed(&self) -> Result<LockSeed, SeedError>;
}

/// A persisted user slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeededUser {
    pub index: u16,
    pub record: UserRecord,
}

/// A persisted credential slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeededCredential {
    pub index: u16,
    pub record: CredentialRecord,
}

/// A persisted weekday schedule slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeededWeekday {
    pub user_index: u16,
    pub slot: u8,
    pub record: WeekdaySchedule,
}

/// A persisted yearday schedule slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeededYearday {
    pub user_index: u16,
    pub slot: u8,
    pub record: YeardaySchedule,
}

/// A persisted holiday schedule slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeededHoliday {
    pub slot: u8,
    pub record: HolidaySchedule,
}

/// Everything the persistence collaborator restores at boot.
///
/// Bounded by the same compile-time maxima as the stores themselves, so a
/// well-formed seed can always be applied in full.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LockSeed {
    /// Last known lock state; `None` on first boot.
    pub lock_state: Option<LockState>,
    pub users: heapless::Vec<SeededUser, MAX_USERS>,
    pub credentials: heapless::Vec<SeededCredential, { MAX_CREDENTIALS + 1 }>,
    pub weekday_schedules:
        heapless::Vec<SeededWeekday, { MAX_USERS * MAX_WEEKDAY_SCHEDULES_PER_USER }>,
    pub yearday_schedules:
        heapless::Vec<SeededYearday, { MAX_USERS * MAX_YEARDAY_SCHEDULES_PER_USER }>,
    pub holiday_schedules: heapless::Vec<SeededHoliday, MAX_HOLIDAY_SCHEDULES>,
}

/// Errors from [`SeedSource`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedError {
    /// No seed found in storage (first boot).
    NotFound,
    /// Stored seed failed integrity / deserialization check.
    Corrupted,
    /// Generic I/O error from the storage backend.
    IoError,
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "seed not found"),
            Self::Corrupted => write!(f, "seed corrupted"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
