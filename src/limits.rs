//! Compile-time resource ranges for the lock endpoint.
//!
//! These constants size every store array in the crate and bound the
//! runtime capacity parameters carried by [`LockConfig`](crate::config::LockConfig).
//! They are hard maxima: a configuration requesting more of anything is
//! rejected once, at construction, and never at runtime.

/// Maximum number of user slots.
pub const MAX_USERS: usize = 10;

/// Maximum credentials ownable by a single user.
pub const MAX_CREDENTIALS_PER_USER: usize = 10;

/// Total credential slots, excluding the reserved programming-PIN slot.
pub const MAX_CREDENTIALS: usize = MAX_USERS * MAX_CREDENTIALS_PER_USER;

/// Maximum weekday schedule slots per user.
pub const MAX_WEEKDAY_SCHEDULES_PER_USER: usize = 10;

/// Maximum yearday schedule slots per user.
pub const MAX_YEARDAY_SCHEDULES_PER_USER: usize = 10;

/// Maximum holiday schedule slots (global, not per-user).
pub const MAX_HOLIDAY_SCHEDULES: usize = 10;

/// Maximum credential payload length in bytes.
pub const MAX_CREDENTIAL_SIZE: usize = 8;

/// Maximum user name length in bytes.
pub const MAX_USER_NAME_LEN: usize = 10;

/// Indices received for users/credentials/schedules are 1-indexed.
pub const START_INDEX: usize = 1;

/// The programming PIN lives outside the 1-based band, at index 0.
pub const PROGRAMMING_PIN_INDEX: u16 = 0;
