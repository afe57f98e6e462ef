//! Boltcore — resource and actuation core for an embedded door-lock
//! endpoint.
//!
//! Owns the bounded collections of users, credentials, and time-based
//! schedules, and drives a single actuator through a timer-completed
//! lock/unlock cycle. The dispatch/wire layer, persistence backend, and
//! platform timer are external collaborators reached through the port
//! traits in [`app::ports`]; host-side backends live in [`adapters`].

#![deny(unused_must_use)]

pub mod actuation;
pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod limits;
pub mod store;
pub mod validation;
