//! Fixed-capacity resource stores.
//!
//! Arena-style storage for every entity the lock endpoint owns: users,
//! credentials, and the three schedule kinds. Each store is an array sized
//! by the compile-time maxima in [`limits`](crate::limits), addressed by
//! stable 1-based indices, with an explicit `Available` sentinel status per
//! slot. Slots are cleared in place and reused — never shifted, never
//! compacted, never heap-allocated.

pub mod credential;
pub mod schedule;
pub mod user;

pub use credential::{CredentialRecord, CredentialRef, CredentialStatus, CredentialStore, CredentialType};
pub use schedule::{
    HolidaySchedule, HolidayScheduleStore, OperatingMode, ScheduleStatus, WeekdaySchedule,
    WeekdayScheduleStore, YeardaySchedule, YeardayScheduleStore,
};
pub use user::{CredentialRule, UserRecord, UserStatus, UserStore, UserType};
