//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the bridge core and the device
//! subsystems it fronts. Each trait represents a capability the core requires
//! but that must be implemented differently per platform (Android, iOS,
//! desktop simulation):
//!
//! - [`SensorManager`](sensor::SensorManager) - Hardware step-counter lookup
//!   and event listener registration
//! - [`PermissionProbe`](permissions::PermissionProbe) - OS runtime permission
//!   queries for activity-recognition data
//! - [`HealthDataProvider`](health::HealthDataProvider) - Aggregated health
//!   metrics from the platform health store
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Platform
//! implementations should convert platform-specific errors to `BridgeError`
//! and provide actionable error messages. Expected-absence states (no sensor,
//! no permission) are modelled as `Ok(None)`/`Ok(false)`, never as errors.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent
//! usage across async tasks. Sensor callbacks in particular may be invoked on
//! a platform delivery thread distinct from the registering task.

pub mod error;
pub mod health;
pub mod permissions;
pub mod sensor;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use health::{HealthDataProvider, HealthPermissionStatus, StepSample};
pub use permissions::PermissionProbe;
pub use sensor::{
    ListenerRegistration, SensorCallback, SensorDescriptor, SensorEvent, SensorManager,
};
pub use time::{Clock, SystemClock};
