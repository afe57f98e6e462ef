//! Host-side integration tests for the lock service facade.
//!
//! These verify the full chain from a dispatch-layer call down to the
//! actuation timer and registered callbacks, with mock collaborators
//! standing in for the platform.

mod mocks;

mod lock_service_tests;
