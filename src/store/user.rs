//! User store.
//!
//! One arena slot per user index. A user owns a bounded list of credential
//! references; the referenced credential slots live in
//! [`CredentialStore`](super::credential::CredentialStore) and may be
//! populated before or after the user record that names them.

use log::info;
use serde::{Deserialize, Serialize};

use super::credential::CredentialRef;
use crate::error::StoreError;
use crate::limits::{MAX_CREDENTIALS_PER_USER, MAX_USERS, MAX_USER_NAME_LEN};
use crate::validation::{is_valid_credential_index, is_valid_user_index};

/// Slot occupancy and enablement. `Available` is the cleared sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserStatus {
    #[default]
    Available,
    OccupiedEnabled,
    OccupiedDisabled,
}

/// Access-class of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserType {
    #[default]
    Unrestricted,
    YearDaySchedule,
    WeekDaySchedule,
    Programming,
    NonAccess,
    Forced,
    Disposable,
    Expiring,
    ScheduleRestricted,
    RemoteOnly,
}

/// How many credentials must be presented to operate the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CredentialRule {
    #[default]
    Single,
    Dual,
    Tri,
}

/// One user slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: heapless::String<MAX_USER_NAME_LEN>,
    pub unique_id: u32,
    pub status: UserStatus,
    pub user_type: UserType,
    pub credential_rule: CredentialRule,
    /// Credential slots this user owns, at most the configured per-user cap.
    pub credentials: heapless::Vec<CredentialRef, MAX_CREDENTIALS_PER_USER>,
    /// Source id of the party that created the slot contents.
    pub created_by: u8,
    /// Source id of the party that last modified the slot contents.
    pub last_modified_by: u8,
}

impl Default for UserRecord {
    fn default() -> Self {
        Self {
            name: heapless::String::new(),
            unique_id: 0,
            status: UserStatus::Available,
            user_type: UserType::Unrestricted,
            credential_rule: CredentialRule::Single,
            credentials: heapless::Vec::new(),
            created_by: 0,
            last_modified_by: 0,
        }
    }
}

/// Fixed-capacity user arena.
pub struct UserStore {
    slots: [UserRecord; MAX_USERS],
    /// Configured per-user credential cap (≤ `MAX_CREDENTIALS_PER_USER`).
    credentials_per_user: usize,
}

impl UserStore {
    pub fn new(credentials_per_user: usize) -> Self {
        Self {
            slots: core::array::from_fn(|_| UserRecord::default()),
            credentials_per_user,
        }
    }

    /// Look up a user. `None` for an invalid index or a cleared slot.
    pub fn get(&self, index: u16) -> Option<&UserRecord> {
        if !is_valid_user_index(index) {
            return None;
        }
        let record = &self.slots[index as usize - 1];
        (record.status != UserStatus::Available).then_some(record)
    }

    /// True when `index` names an occupied (enabled or disabled) user slot.
    /// Used by the facade as the ownership check for credentials.
    pub fn is_occupied(&self, index: u16) -> bool {
        self.get(index).is_some()
    }

    /// Write a user slot. All fields land atomically; any rejection leaves
    /// the slot untouched. Setting `UserStatus::Available` clears the slot
    /// (name emptied, credential list dropped).
    pub fn set(
        &mut self,
        index: u16,
        name: &str,
        unique_id: u32,
        status: UserStatus,
        user_type: UserType,
        credential_rule: CredentialRule,
        credentials: &[CredentialRef],
        created_by: u8,
        last_modified_by: u8,
    ) -> Result<(), StoreError> {
        if !is_valid_user_index(index) {
            return Err(StoreError::IndexOutOfRange);
        }
        if status == UserStatus::Available {
            info!("user store: cleared slot {index}");
            self.slots[index as usize - 1] = UserRecord::default();
            return Ok(());
        }
        if credentials.len() > self.credentials_per_user {
            return Err(StoreError::CapacityExceeded);
        }
        for reference in credentials {
            if !is_valid_credential_index(reference.index, reference.credential_type) {
                return Err(StoreError::IndexOutOfRange);
            }
        }

        let mut name_buf = heapless::String::new();
        name_buf
            .push_str(name)
            .map_err(|()| StoreError::CapacityExceeded)?;
        let credentials =
            heapless::Vec::from_slice(credentials).map_err(|()| StoreError::CapacityExceeded)?;

        self.slots[index as usize - 1] = UserRecord {
            name: name_buf,
            unique_id,
            status,
            user_type,
            credential_rule,
            credentials,
            created_by,
            last_modified_by,
        };
        info!("user store: wrote slot {index}");
        Ok(())
    }
}
