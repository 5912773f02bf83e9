//! # Core Method Channel
//!
//! The bridge core sitting between a UI layer and the device subsystems
//! behind the `bridge-traits` seam: a hardware step counter and a platform
//! health store.
//!
//! ## Overview
//!
//! - [`protocol`] - Command envelope: [`MethodCall`], [`MethodResponse`], and
//!   the structured wire payloads
//! - [`dispatch`] - [`BridgeDispatcher`] routing commands to handlers and
//!   [`ChannelRegistry`] binding channel names to dispatchers
//! - [`steps`] - [`StepCountAcquirer`], the single-shot step read racing the
//!   first sensor event against a timeout
//! - [`config`] - [`BridgeConfig`] builder with fail-fast validation
//! - [`logging`] - `tracing-subscriber` bootstrap for embedding hosts
//!
//! ## Response Contract
//!
//! Every dispatched command produces exactly one [`MethodResponse`]: a
//! success value, a declared failure code, or not-implemented for unknown
//! method names. Backend failures are recovered at the handler boundary and
//! never escape as panics.
//!
//! ## Usage
//!
//! ```ignore
//! use core_channel::{config::BridgeConfig, protocol::MethodCall};
//! use std::sync::Arc;
//!
//! let config = BridgeConfig::builder()
//!     .sensors(Arc::new(platform_sensors))
//!     .permissions(Arc::new(platform_permissions))
//!     .health(Arc::new(platform_health))
//!     .build()?;
//!
//! let registry = config.build_registry();
//! let response = registry
//!     .dispatch(&config.sensor_channel, MethodCall::new("getCumulativeStepCount"))
//!     .await;
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod steps;

pub use config::BridgeConfig;
pub use dispatch::{BridgeDispatcher, ChannelRegistry, HandlerError};
pub use error::CoreError;
pub use protocol::{MethodCall, MethodResponse, SensorStatus};
pub use steps::{StepCountAcquirer, DEFAULT_STEP_READ_TIMEOUT};
