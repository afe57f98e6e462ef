//! Credential store.
//!
//! A single arena holds every credential on the endpoint. Slot 0 is the
//! reserved programming-PIN band; slots `1..=MAX_CREDENTIALS` hold all
//! other credential types. Ownership is a weak back-reference to a user
//! index — the user's own credential list is the authoritative relation,
//! kept by [`UserStore`](super::user::UserStore).

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::limits::MAX_CREDENTIALS;
use crate::validation::is_valid_credential_index;

/// Secret material kinds the endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialType {
    ProgrammingPin,
    Pin,
    Rfid,
    Fingerprint,
    FingerVein,
    Face,
}

/// Slot occupancy marker. `Available` is the cleared sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CredentialStatus {
    #[default]
    Available,
    Occupied,
}

/// A (type, index) pair referencing a credential slot from a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRef {
    pub credential_type: CredentialType,
    pub index: u16,
}

/// One credential slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub status: CredentialStatus,
    pub credential_type: CredentialType,
    /// Secret payload, at most `MAX_CREDENTIAL_SIZE` bytes. Comparison
    /// against presented proofs is the access-policy collaborator's job.
    pub data: heapless::Vec<u8, { crate::limits::MAX_CREDENTIAL_SIZE }>,
    /// Owning user index, when the credential belongs to a user.
    pub owner: Option<u16>,
    /// Source id of the party that created the slot contents.
    pub created_by: u8,
    /// Source id of the party that last modified the slot contents.
    pub last_modified_by: u8,
}

impl Default for CredentialRecord {
    fn default() -> Self {
        Self {
            status: CredentialStatus::Available,
            credential_type: CredentialType::Pin,
            data: heapless::Vec::new(),
            owner: None,
            created_by: 0,
            last_modified_by: 0,
        }
    }
}

/// Fixed-capacity credential arena.
pub struct CredentialStore {
    /// Slot 0 is the programming-PIN band; external index maps 1:1 onto
    /// the slot position for every type.
    slots: [CredentialRecord; MAX_CREDENTIALS + 1],
}

impl CredentialStore {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| CredentialRecord::default()),
        }
    }

    /// Look up a credential. The type argument selects the index band; it
    /// does not filter the stored contents.
    pub fn get(&self, index: u16, credential_type: CredentialType) -> Option<&CredentialRecord> {
        if !is_valid_credential_index(index, credential_type) {
            return None;
        }
        let record = &self.slots[index as usize];
        (record.status != CredentialStatus::Available).then_some(record)
    }

    /// Write a credential slot. All fields land atomically; any rejection
    /// leaves the slot untouched. Setting `CredentialStatus::Available`
    /// clears the slot (data and owner wiped).
    pub fn set(
        &mut self,
        index: u16,
        credential_type: CredentialType,
        status: CredentialStatus,
        data: &[u8],
        owner: Option<u16>,
        created_by: u8,
        last_modified_by: u8,
    ) -> Result<(), StoreError> {
        if !is_valid_credential_index(index, credential_type) {
            return Err(StoreError::IndexOutOfRange);
        }
        if status == CredentialStatus::Available {
            info!("credential store: cleared slot {index}");
            self.slots[index as usize] = CredentialRecord::default();
            return Ok(());
        }
        let data =
            heapless::Vec::from_slice(data).map_err(|()| StoreError::CapacityExceeded)?;
        self.slots[index as usize] = CredentialRecord {
            status,
            credential_type,
            data,
            owner,
            created_by,
            last_modified_by,
        };
        info!("credential store: wrote slot {index} ({credential_type:?})");
        Ok(())
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
