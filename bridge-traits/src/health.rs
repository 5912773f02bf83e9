//! Health Data Provider Abstraction
//!
//! Contract for the platform health store (Health Connect on Android,
//! HealthKit on iOS). The bridge core only depends on the shapes below; the
//! actual aggregation is the host platform's concern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An aggregated step reading over some window.
///
/// Field names are part of the wire contract with the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSample {
    pub steps: i64,
    /// Unix epoch milliseconds at which the sample was produced.
    pub timestamp: i64,
}

/// Per-metric permission grants in the health store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPermissionStatus {
    pub steps: bool,
    pub distance: bool,
    pub calories: bool,
    pub heart_rate: bool,
}

impl HealthPermissionStatus {
    /// All metrics denied.
    pub fn denied() -> Self {
        Self {
            steps: false,
            distance: false,
            calories: false,
            heart_rate: false,
        }
    }

    /// All metrics granted.
    pub fn granted() -> Self {
        Self {
            steps: true,
            distance: true,
            calories: true,
            heart_rate: true,
        }
    }
}

/// Health store trait
///
/// Every method is a point-in-time query against the platform health store.
/// Errors are reserved for genuine backend failures; "no data recorded yet"
/// surfaces as `None`/zero values.
#[async_trait]
pub trait HealthDataProvider: Send + Sync {
    /// Whether the health store is installed and reachable on this device.
    async fn is_available(&self) -> Result<bool>;

    /// Ask the platform to grant the bridge's health permissions. Returns
    /// whether the request could be issued, not the resulting grants.
    async fn request_permissions(&self) -> Result<bool>;

    /// Steps aggregated from local midnight until now.
    async fn today_steps(&self) -> Result<StepSample>;

    /// Step samples between the two bounds (epoch milliseconds, inclusive).
    async fn steps_in_range(&self, start_time: i64, end_time: i64) -> Result<Vec<StepSample>>;

    /// Most recent heart-rate reading in bpm, or `None` when none is recorded.
    async fn recent_heart_rate(&self) -> Result<Option<i64>>;

    /// Active calories burned today, in kcal.
    async fn today_calories(&self) -> Result<i64>;

    /// Distance covered today, in meters.
    async fn today_distance_meters(&self) -> Result<f64>;

    /// Current per-metric permission grants.
    async fn permission_status(&self) -> Result<HealthPermissionStatus>;
}
