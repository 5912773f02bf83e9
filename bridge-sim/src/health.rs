//! Static Health Store

use async_trait::async_trait;
use bridge_traits::{
    error::Result,
    health::{HealthDataProvider, HealthPermissionStatus, StepSample},
    time::{Clock, SystemClock},
};
use std::sync::Arc;

/// Fixed metric values served by [`StaticHealthProvider`].
///
/// The defaults match the placeholder readings a development build reports
/// before a real health store is wired in.
#[derive(Debug, Clone)]
pub struct HealthProfile {
    pub available: bool,
    pub today_steps: i64,
    pub recent_heart_rate: Option<i64>,
    pub today_calories: i64,
    pub today_distance_meters: f64,
    pub permissions: HealthPermissionStatus,
}

impl Default for HealthProfile {
    fn default() -> Self {
        Self {
            available: true,
            today_steps: 8000,
            recent_heart_rate: Some(72),
            today_calories: 450,
            today_distance_meters: 6500.0,
            permissions: HealthPermissionStatus::granted(),
        }
    }
}

/// Health provider returning a fixed [`HealthProfile`].
///
/// Timestamps come from the injected [`Clock`], so tests can pin them.
pub struct StaticHealthProvider {
    profile: HealthProfile,
    clock: Arc<dyn Clock>,
}

impl StaticHealthProvider {
    /// Provider serving the default profile with the system clock.
    pub fn new() -> Self {
        Self::with_profile(HealthProfile::default())
    }

    /// Provider serving `profile` with the system clock.
    pub fn with_profile(profile: HealthProfile) -> Self {
        Self {
            profile,
            clock: Arc::new(SystemClock),
        }
    }

    /// Provider serving `profile` with a custom clock.
    pub fn with_profile_and_clock(profile: HealthProfile, clock: Arc<dyn Clock>) -> Self {
        Self { profile, clock }
    }
}

impl Default for StaticHealthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthDataProvider for StaticHealthProvider {
    async fn is_available(&self) -> Result<bool> {
        Ok(self.profile.available)
    }

    async fn request_permissions(&self) -> Result<bool> {
        Ok(self.profile.available)
    }

    async fn today_steps(&self) -> Result<StepSample> {
        Ok(StepSample {
            steps: self.profile.today_steps,
            timestamp: self.clock.unix_timestamp_millis(),
        })
    }

    async fn steps_in_range(&self, _start_time: i64, _end_time: i64) -> Result<Vec<StepSample>> {
        Ok(vec![StepSample {
            steps: self.profile.today_steps,
            timestamp: self.clock.unix_timestamp_millis(),
        }])
    }

    async fn recent_heart_rate(&self) -> Result<Option<i64>> {
        Ok(self.profile.recent_heart_rate)
    }

    async fn today_calories(&self) -> Result<i64> {
        Ok(self.profile.today_calories)
    }

    async fn today_distance_meters(&self) -> Result<f64> {
        Ok(self.profile.today_distance_meters)
    }

    async fn permission_status(&self) -> Result<HealthPermissionStatus> {
        Ok(self.profile.permissions)
    }
}
