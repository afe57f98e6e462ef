//! Mock collaborators for integration tests.
//!
//! Records every timer call so tests can assert on the full history
//! without a real timer peripheral, and provides canned access policies.

use boltcore::actuation::Action;
use boltcore::app::ports::{AccessPolicy, ActuationTimer};
use boltcore::error::OperationError;

// ── Timer call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCall {
    Start(u32),
    Cancel,
}

#[derive(Default)]
pub struct MockTimer {
    pub calls: Vec<TimerCall>,
}

#[allow(dead_code)]
impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starts(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, TimerCall::Start(_)))
            .count()
    }

    pub fn last_start_ms(&self) -> Option<u32> {
        self.calls.iter().rev().find_map(|c| match c {
            TimerCall::Start(ms) => Some(*ms),
            TimerCall::Cancel => None,
        })
    }
}

impl ActuationTimer for MockTimer {
    fn start(&mut self, duration_ms: u32) {
        self.calls.push(TimerCall::Start(duration_ms));
    }

    fn cancel(&mut self) {
        self.calls.push(TimerCall::Cancel);
    }
}

// ── Access policies ───────────────────────────────────────────

/// Accepts everything — stands in for a policy with no proof requirement.
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn authorize(&self, _action: Action, _proof: Option<&[u8]>) -> Result<(), OperationError> {
        Ok(())
    }
}

/// Rejects everything with a fixed error.
pub struct RejectAll(pub OperationError);

impl AccessPolicy for RejectAll {
    fn authorize(&self, _action: Action, _proof: Option<&[u8]>) -> Result<(), OperationError> {
        Err(self.0)
    }
}

/// Accepts only an exact proof — models the delegated PIN comparison.
pub struct ExpectProof(pub Vec<u8>);

impl AccessPolicy for ExpectProof {
    fn authorize(&self, _action: Action, proof: Option<&[u8]>) -> Result<(), OperationError> {
        match proof {
            Some(p) if p == self.0.as_slice() => Ok(()),
            _ => Err(OperationError::InvalidCredential),
        }
    }
}
