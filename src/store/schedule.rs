//! Schedule stores.
//!
//! Weekday and yearday schedules are keyed by `(user index, slot)`; holiday
//! schedules are a single global arena. The capacity checks here are the
//! one place where the *configured* caps (not the compile-time maxima)
//! matter: occupying a fresh slot past the configured count is
//! `CapacityExceeded`, a different failure than addressing outside the
//! compile-time array bound (`IndexOutOfRange`). Overwriting a slot that is
//! already occupied never trips the capacity check.
//!
//! No overlap validation is performed across time windows — only
//! index-range, capacity, and ownership checks.

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::limits::{
    MAX_HOLIDAY_SCHEDULES, MAX_USERS, MAX_WEEKDAY_SCHEDULES_PER_USER,
    MAX_YEARDAY_SCHEDULES_PER_USER,
};
use crate::validation::{
    is_valid_holiday_schedule_index, is_valid_user_index, is_valid_weekday_schedule_index,
    is_valid_yearday_schedule_index,
};

/// Slot occupancy marker. `Available` is the cleared sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScheduleStatus {
    #[default]
    Available,
    Occupied,
}

/// Endpoint operating mode a holiday schedule switches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OperatingMode {
    #[default]
    Normal,
    Vacation,
    Privacy,
    NoRemoteLockUnlock,
    Passage,
}

/// A weekly-recurring access window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekdaySchedule {
    pub status: ScheduleStatus,
    /// Day-of-week bitmask, bit 0 = Sunday through bit 6 = Saturday.
    pub days_mask: u8,
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
}

/// A dated access window in local epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YeardaySchedule {
    pub status: ScheduleStatus,
    pub local_start: u32,
    pub local_end: u32,
}

/// A global holiday window with an operating-mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HolidaySchedule {
    pub status: ScheduleStatus,
    pub local_start: u32,
    pub local_end: u32,
    pub operating_mode: OperatingMode,
}

// ---------------------------------------------------------------------------
// Weekday schedules (per-user)
// ---------------------------------------------------------------------------

/// Per-user weekday schedule arena.
pub struct WeekdayScheduleStore {
    slots: [[WeekdaySchedule; MAX_WEEKDAY_SCHEDULES_PER_USER]; MAX_USERS],
    /// Configured per-user occupancy cap (≤ the compile-time slot count).
    per_user_cap: usize,
}

impl WeekdayScheduleStore {
    pub fn new(per_user_cap: usize) -> Self {
        let empty = WeekdaySchedule::default();
        Self {
            slots: [[empty; MAX_WEEKDAY_SCHEDULES_PER_USER]; MAX_USERS],
            per_user_cap,
        }
    }

    pub fn get(&self, user_index: u16, slot_index: u8) -> Option<&WeekdaySchedule> {
        if !is_valid_user_index(user_index) || !is_valid_weekday_schedule_index(slot_index) {
            return None;
        }
        let record = &self.slots[user_index as usize - 1][slot_index as usize - 1];
        (record.status != ScheduleStatus::Available).then_some(record)
    }

    pub fn set(
        &mut self,
        user_index: u16,
        slot_index: u8,
        status: ScheduleStatus,
        days_mask: u8,
        start_hour: u8,
        start_minute: u8,
        end_hour: u8,
        end_minute: u8,
    ) -> Result<(), StoreError> {
        if !is_valid_user_index(user_index) || !is_valid_weekday_schedule_index(slot_index) {
            return Err(StoreError::IndexOutOfRange);
        }
        let row = &mut self.slots[user_index as usize - 1];
        let slot = slot_index as usize - 1;
        if status == ScheduleStatus::Occupied
            && row[slot].status == ScheduleStatus::Available
            && occupied_weekday(&row[..]) >= self.per_user_cap
        {
            return Err(StoreError::CapacityExceeded);
        }
        row[slot] = WeekdaySchedule {
            status,
            days_mask,
            start_hour,
            start_minute,
            end_hour,
            end_minute,
        };
        info!("weekday schedule store: wrote user {user_index} slot {slot_index} ({status:?})");
        Ok(())
    }
}

fn occupied_weekday(row: &[WeekdaySchedule]) -> usize {
    row.iter()
        .filter(|s| s.status == ScheduleStatus::Occupied)
        .count()
}

// ---------------------------------------------------------------------------
// Yearday schedules (per-user)
// ---------------------------------------------------------------------------

/// Per-user yearday schedule arena.
pub struct YeardayScheduleStore {
    slots: [[YeardaySchedule; MAX_YEARDAY_SCHEDULES_PER_USER]; MAX_USERS],
    per_user_cap: usize,
}

impl YeardayScheduleStore {
    pub fn new(per_user_cap: usize) -> Self {
        let empty = YeardaySchedule::default();
        Self {
            slots: [[empty; MAX_YEARDAY_SCHEDULES_PER_USER]; MAX_USERS],
            per_user_cap,
        }
    }

    pub fn get(&self, user_index: u16, slot_index: u8) -> Option<&YeardaySchedule> {
        if !is_valid_user_index(user_index) || !is_valid_yearday_schedule_index(slot_index) {
            return None;
        }
        let record = &self.slots[user_index as usize - 1][slot_index as usize - 1];
        (record.status != ScheduleStatus::Available).then_some(record)
    }

    pub fn set(
        &mut self,
        user_index: u16,
        slot_index: u8,
        status: ScheduleStatus,
        local_start: u32,
        local_end: u32,
    ) -> Result<(), StoreError> {
        if !is_valid_user_index(user_index) || !is_valid_yearday_schedule_index(slot_index) {
            return Err(StoreError::IndexOutOfRange);
        }
        let row = &mut self.slots[user_index as usize - 1];
        let slot = slot_index as usize - 1;
        if status == ScheduleStatus::Occupied
            && row[slot].status == ScheduleStatus::Available
            && row.iter().filter(|s| s.status == ScheduleStatus::Occupied).count()
                >= self.per_user_cap
        {
            return Err(StoreError::CapacityExceeded);
        }
        row[slot] = YeardaySchedule {
            status,
            local_start,
            local_end,
        };
        info!("yearday schedule store: wrote user {user_index} slot {slot_index} ({status:?})");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Holiday schedules (global)
// ---------------------------------------------------------------------------

/// Global holiday schedule arena.
pub struct HolidayScheduleStore {
    slots: [HolidaySchedule; MAX_HOLIDAY_SCHEDULES],
    /// Configured global occupancy cap (≤ the compile-time slot count).
    cap: usize,
}

impl HolidayScheduleStore {
    pub fn new(cap: usize) -> Self {
        Self {
            slots: [HolidaySchedule::default(); MAX_HOLIDAY_SCHEDULES],
            cap,
        }
    }

    pub fn get(&self, slot_index: u8) -> Option<&HolidaySchedule> {
        if !is_valid_holiday_schedule_index(slot_index) {
            return None;
        }
        let record = &self.slots[slot_index as usize - 1];
        (record.status != ScheduleStatus::Available).then_some(record)
    }

    pub fn set(
        &mut self,
        slot_index: u8,
        status: ScheduleStatus,
        local_start: u32,
        local_end: u32,
        operating_mode: OperatingMode,
    ) -> Result<(), StoreError> {
        if !is_valid_holiday_schedule_index(slot_index) {
            return Err(StoreError::IndexOutOfRange);
        }
        let slot = slot_index as usize - 1;
        if status == ScheduleStatus::Occupied
            && self.slots[slot].status == ScheduleStatus::Available
            && self
                .slots
                .iter()
                .filter(|s| s.status == ScheduleStatus::Occupied)
                .count()
                >= self.cap
        {
            return Err(StoreError::CapacityExceeded);
        }
        self.slots[slot] = HolidaySchedule {
            status,
            local_start,
            local_end,
            operating_mode,
        };
        info!("holiday schedule store: wrote slot {slot_index} ({status:?})");
        Ok(())
    }
}
