//! Stateless index validation.
//!
//! One range predicate per index domain, checked against the compile-time
//! resource ranges in [`limits`](crate::limits). Indices arriving from the
//! dispatch collaborator are 1-based; content presence is checked by the
//! owning store, never here. The predicates are also part of the public
//! surface so the dispatch layer can pre-flight indices before building a
//! full request.

use crate::limits::{
    MAX_CREDENTIALS, MAX_HOLIDAY_SCHEDULES, MAX_USERS, MAX_WEEKDAY_SCHEDULES_PER_USER,
    MAX_YEARDAY_SCHEDULES_PER_USER, PROGRAMMING_PIN_INDEX, START_INDEX,
};
use crate::store::credential::CredentialType;

/// User indices occupy `1..=MAX_USERS`.
pub fn is_valid_user_index(index: u16) -> bool {
    let index = index as usize;
    (START_INDEX..=MAX_USERS).contains(&index)
}

/// Credential indices are banded by type: the programming PIN occupies the
/// reserved index 0; every other credential type occupies
/// `1..=MAX_CREDENTIALS`.
pub fn is_valid_credential_index(index: u16, credential_type: CredentialType) -> bool {
    if credential_type == CredentialType::ProgrammingPin {
        return index == PROGRAMMING_PIN_INDEX;
    }
    let index = index as usize;
    (START_INDEX..=MAX_CREDENTIALS).contains(&index)
}

/// Weekday schedule slots occupy `1..=MAX_WEEKDAY_SCHEDULES_PER_USER`.
pub fn is_valid_weekday_schedule_index(index: u8) -> bool {
    let index = index as usize;
    (START_INDEX..=MAX_WEEKDAY_SCHEDULES_PER_USER).contains(&index)
}

/// Yearday schedule slots occupy `1..=MAX_YEARDAY_SCHEDULES_PER_USER`.
pub fn is_valid_yearday_schedule_index(index: u8) -> bool {
    let index = index as usize;
    (START_INDEX..=MAX_YEARDAY_SCHEDULES_PER_USER).contains(&index)
}

/// Holiday schedule slots occupy `1..=MAX_HOLIDAY_SCHEDULES`.
pub fn is_valid_holiday_schedule_index(index: u8) -> bool {
    let index = index as usize;
    (START_INDEX..=MAX_HOLIDAY_SCHEDULES).contains(&index)
}
