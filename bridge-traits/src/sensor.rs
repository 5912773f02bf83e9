//! Hardware Sensor Abstractions
//!
//! Models the platform sensor service: sensor lookup plus event listener
//! registration. Step-counter hardware reports a monotonically increasing
//! cumulative count but only emits an event when the count changes (or with
//! vendor-dependent latency right after registration). There is no
//! synchronous "read now" primitive, which is why consumers race a listener
//! against a timeout rather than polling.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;

/// Static description of a hardware sensor as reported by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDescriptor {
    pub name: String,
    pub vendor: String,
    pub version: i32,
    /// Power draw in mA while a listener is registered.
    pub power: f64,
    /// Smallest value change the sensor can resolve, in its native unit.
    pub resolution: f64,
}

/// A single event delivered by a registered sensor listener.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorEvent {
    /// Raw channel values. For step counters, channel 0 carries the
    /// cumulative step count since device boot.
    pub values: Vec<f64>,
    pub timestamp: DateTime<Utc>,
}

impl SensorEvent {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            timestamp: Utc::now(),
        }
    }

    /// First channel truncated to an integer. Empty payloads read as 0.
    pub fn primary_value(&self) -> i64 {
        self.values.first().map(|v| *v as i64).unwrap_or(0)
    }
}

/// Callback invoked for each sensor event.
///
/// Delivery may happen on a platform thread distinct from the task that
/// registered the listener, so implementations must be cheap and must not
/// block.
pub type SensorCallback = Arc<dyn Fn(SensorEvent) + Send + Sync>;

/// Sensor service trait
///
/// Abstracts the platform sensor manager:
/// - **Android**: `SensorManager` with `TYPE_STEP_COUNTER`
/// - **iOS**: CoreMotion pedometer
/// - **Simulation**: the `bridge-sim` crate's scriptable in-process manager
#[async_trait]
pub trait SensorManager: Send + Sync {
    /// The device's default step-counter sensor, or `None` when the hardware
    /// has no pedometer. Absence is not an error.
    async fn default_step_counter(&self) -> Result<Option<SensorDescriptor>>;

    /// Register `callback` for step-counter events.
    ///
    /// The returned registration must be released via
    /// [`ListenerRegistration::unregister`]; dropping it without
    /// unregistering leaks the platform-side listener.
    async fn register_listener(
        &self,
        callback: SensorCallback,
    ) -> Result<Box<dyn ListenerRegistration>>;
}

/// Handle to an active sensor listener registration.
#[async_trait]
pub trait ListenerRegistration: Send {
    /// Stop event delivery for this registration.
    ///
    /// Implementations must tolerate repeated calls; only the first one
    /// releases platform resources.
    async fn unregister(&mut self) -> Result<()>;
}
