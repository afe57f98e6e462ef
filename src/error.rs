//! Unified error types for the lock endpoint core.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! dispatch collaborator's error handling uniform. All variants are `Copy`
//! so they can be cheaply passed back through status returns without
//! allocation. Validation failures are synchronous and local; a rejected
//! write never partially mutates its target slot.

use core::fmt;

use crate::app::ports::SeedError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A store rejected a read or write.
    Store(StoreError),
    /// A lock/unlock request was rejected.
    Operation(OperationError),
    /// The persistence collaborator failed to produce a seed.
    Seed(SeedError),
    /// Configured capacities exceed the compile-time maxima. The one
    /// fatal condition in this subsystem, detected once at construction.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "store: {e}"),
            Self::Operation(e) => write!(f, "operation: {e}"),
            Self::Seed(e) => write!(f, "seed: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Rejection statuses for store writes.
///
/// `CapacityExceeded` is distinct from `IndexOutOfRange` so callers can
/// report "resource exhausted" separately from "bad request".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Index below the 1-based floor or above the store's compile-time bound.
    IndexOutOfRange,
    /// A per-user or global occupancy cap would be exceeded.
    CapacityExceeded,
    /// A credential references an absent or unset user.
    InvalidOwner,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange => write!(f, "index out of range"),
            Self::CapacityExceeded => write!(f, "capacity exceeded"),
            Self::InvalidOwner => write!(f, "invalid owner"),
        }
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Operation errors
// ---------------------------------------------------------------------------

/// Rejection statuses for lock/unlock requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    /// The supplied proof was rejected by the access policy.
    InvalidCredential,
    /// The access policy forbids this actor/action combination.
    Restricted,
    /// Another actuation is already in flight.
    ActionInProgress,
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredential => write!(f, "invalid credential"),
            Self::Restricted => write!(f, "restricted"),
            Self::ActionInProgress => write!(f, "action in progress"),
        }
    }
}

impl From<OperationError> for Error {
    fn from(e: OperationError) -> Self {
        Self::Operation(e)
    }
}

impl From<SeedError> for Error {
    fn from(e: SeedError) -> Self {
        Self::Seed(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
