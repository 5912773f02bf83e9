//! # Simulated Bridge Implementations
//!
//! In-process implementations of the bridge traits for development and
//! testing, standing in for the platform-native adapters a real host ships.
//!
//! ## Overview
//!
//! - [`SimulatedSensorManager`] - Scriptable step-counter sensor that delivers
//!   events on spawned tasks, mimicking the asynchronous, change-driven
//!   delivery of real pedometer hardware
//! - [`StaticHealthProvider`] - Health store returning fixed placeholder
//!   metrics, timestamped through an injected [`Clock`](bridge_traits::Clock)
//! - [`StaticPermissionProbe`] - Permission probe with a fixed grant state
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_sim::{SimulatedSensorManager, StaticHealthProvider, StaticPermissionProbe};
//! use std::time::Duration;
//!
//! let sensors = SimulatedSensorManager::with_default_sensor()
//!     .with_event(Duration::from_millis(50), vec![4523.0]);
//! let health = StaticHealthProvider::new();
//! let permissions = StaticPermissionProbe::granted();
//! ```

mod health;
mod permissions;
mod sensor;

pub use health::{HealthProfile, StaticHealthProvider};
pub use permissions::StaticPermissionProbe;
pub use sensor::{ScriptedEvent, SimulatedSensorManager};
