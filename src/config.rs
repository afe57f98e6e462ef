//! Lock endpoint configuration parameters.
//!
//! Runtime capacity parameters for the resource stores plus actuation
//! timing. Values are seeded by the persistence collaborator at boot and
//! must never exceed the compile-time maxima in [`limits`](crate::limits) —
//! that check happens once, when the service is constructed.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::limits::{
    MAX_CREDENTIALS_PER_USER, MAX_HOLIDAY_SCHEDULES, MAX_USERS, MAX_WEEKDAY_SCHEDULES_PER_USER,
    MAX_YEARDAY_SCHEDULES_PER_USER,
};

/// Core lock configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockConfig {
    // --- Store capacities ---
    /// Number of user slots exposed to the dispatch layer.
    pub num_users: u16,
    /// Credentials a single user may own.
    pub credentials_per_user: u8,
    /// Weekday schedule slots per user.
    pub weekday_schedules_per_user: u8,
    /// Yearday schedule slots per user.
    pub yearday_schedules_per_user: u8,
    /// Holiday schedule slots (global).
    pub holiday_schedules: u8,

    // --- Actuation ---
    /// Bolt travel time: delay between an action initiating and completing
    /// (milliseconds).
    pub actuator_movement_ms: u32,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            num_users: MAX_USERS as u16,
            credentials_per_user: MAX_CREDENTIALS_PER_USER as u8,
            weekday_schedules_per_user: MAX_WEEKDAY_SCHEDULES_PER_USER as u8,
            yearday_schedules_per_user: MAX_YEARDAY_SCHEDULES_PER_USER as u8,
            holiday_schedules: MAX_HOLIDAY_SCHEDULES as u8,
            actuator_movement_ms: 2000,
        }
    }
}

impl LockConfig {
    /// Check every capacity against its compile-time maximum.
    ///
    /// A failure here is the one fatal condition in the subsystem: the
    /// arrays backing the stores cannot hold what the configuration asks
    /// for, so construction is refused outright.
    pub fn validate(&self) -> Result<()> {
        if self.num_users as usize > MAX_USERS {
            return Err(Error::Config("num_users exceeds MAX_USERS"));
        }
        if self.credentials_per_user as usize > MAX_CREDENTIALS_PER_USER {
            return Err(Error::Config(
                "credentials_per_user exceeds MAX_CREDENTIALS_PER_USER",
            ));
        }
        if self.weekday_schedules_per_user as usize > MAX_WEEKDAY_SCHEDULES_PER_USER {
            return Err(Error::Config(
                "weekday_schedules_per_user exceeds MAX_WEEKDAY_SCHEDULES_PER_USER",
            ));
        }
        if self.yearday_schedules_per_user as usize > MAX_YEARDAY_SCHEDULES_PER_USER {
            return Err(Error::Config(
                "yearday_schedules_per_user exceeds MAX_YEARDAY_SCHEDULES_PER_USER",
            ));
        }
        if self.holiday_schedules as usize > MAX_HOLIDAY_SCHEDULES {
            return Err(Error::Config(
                "holiday_schedules exceeds MAX_HOLIDAY_SCHEDULES",
            ));
        }
        if self.actuator_movement_ms == 0 {
            return Err(Error::Config("actuator_movement_ms must be nonzero"));
        }
        Ok(())
    }
}

/// Chained builder over [`LockConfig`], for callers that assemble the
/// capacities field by field out of stored attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct LockConfigBuilder {
    config: LockConfig,
}

impl LockConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: LockConfig::default(),
        }
    }

    pub fn num_users(mut self, num_users: u16) -> Self {
        self.config.num_users = num_users;
        self
    }

    pub fn credentials_per_user(mut self, credentials_per_user: u8) -> Self {
        self.config.credentials_per_user = credentials_per_user;
        self
    }

    pub fn weekday_schedules_per_user(mut self, weekday_schedules_per_user: u8) -> Self {
        self.config.weekday_schedules_per_user = weekday_schedules_per_user;
        self
    }

    pub fn yearday_schedules_per_user(mut self, yearday_schedules_per_user: u8) -> Self {
        self.config.yearday_schedules_per_user = yearday_schedules_per_user;
        self
    }

    pub fn holiday_schedules(mut self, holiday_schedules: u8) -> Self {
        self.config.holiday_schedules = holiday_schedules;
        self
    }

    pub fn actuator_movement_ms(mut self, actuator_movement_ms: u32) -> Self {
        self.config.actuator_movement_ms = actuator_movement_ms;
        self
    }

    pub fn build(self) -> LockConfig {
        self.config
    }
}
