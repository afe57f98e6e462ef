//! In-memory seed source.
//!
//! Simulation backend for the persistence collaborator: holds a postcard
//! blob in memory and decodes it on demand. Real deployments keep the same
//! blob in NVS/flash; the codec and the [`SeedSource`] contract are
//! identical, so host tests exercise the exact decode path the device runs
//! at boot.

use log::info;

use crate::app::ports::{LockSeed, SeedError, SeedSource};

/// `SeedSource` over an in-memory postcard blob.
pub struct MemorySeed {
    blob: Option<Vec<u8>>,
}

impl MemorySeed {
    /// First-boot source: no stored seed, [`read_seed`](SeedSource::read_seed)
    /// yields an empty default.
    pub fn empty() -> Self {
        Self { blob: None }
    }

    /// Source over a previously encoded blob.
    pub fn from_blob(blob: Vec<u8>) -> Self {
        Self { blob: Some(blob) }
    }

    /// Encode a seed into the blob format this source reads.
    pub fn encode(seed: &LockSeed) -> Result<Vec<u8>, SeedError> {
        postcard::to_allocvec(seed).map_err(|_| SeedError::IoError)
    }
}

impl SeedSource for MemorySeed {
    fn read_seed(&self) -> Result<LockSeed, SeedError> {
        let Some(blob) = &self.blob else {
            info!("memory seed: no stored seed, first boot");
            return Ok(LockSeed::default());
        };
        let seed: LockSeed = postcard::from_bytes(blob).map_err(|_| SeedError::Corrupted)?;
        info!(
            "memory seed: decoded {} bytes ({} users)",
            blob.len(),
            seed.users.len()
        );
        Ok(seed)
    }
}
