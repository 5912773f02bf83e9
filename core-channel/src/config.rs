//! Bridge Configuration
//!
//! Builder-based configuration for the bridge core. It enforces fail-fast
//! validation so a host that forgets to inject a platform adapter gets an
//! actionable error at startup instead of a dead channel at runtime.
//!
//! ## Usage
//!
//! ```ignore
//! use core_channel::config::BridgeConfig;
//! use std::sync::Arc;
//!
//! let config = BridgeConfig::builder()
//!     .sensors(Arc::new(MySensorManager))
//!     .permissions(Arc::new(MyPermissionProbe))
//!     .health(Arc::new(MyHealthProvider))
//!     .build()?;
//! let registry = config.build_registry();
//! ```

use std::sync::Arc;
use std::time::Duration;

use bridge_traits::{
    health::HealthDataProvider, permissions::PermissionProbe, sensor::SensorManager,
};

use crate::dispatch::{BridgeDispatcher, ChannelRegistry};
use crate::error::{CoreError, Result};
use crate::steps::DEFAULT_STEP_READ_TIMEOUT;

/// Default channel namespace for sensor commands.
pub const DEFAULT_SENSOR_CHANNEL: &str = "stepbridge/sensor";

/// Default channel namespace for health-store commands.
pub const DEFAULT_HEALTH_CHANNEL: &str = "stepbridge/health_connect";

/// Validated bridge configuration. Use [`BridgeConfig::builder`].
#[derive(Clone)]
pub struct BridgeConfig {
    /// Channel name the UI layer uses for sensor commands.
    pub sensor_channel: String,

    /// Channel name the UI layer uses for health-store commands.
    pub health_channel: String,

    /// How long a step read waits for a sensor event before resolving null.
    pub step_read_timeout: Duration,

    /// Hardware sensor service (required).
    pub sensors: Arc<dyn SensorManager>,

    /// OS permission probe (required).
    pub permissions: Arc<dyn PermissionProbe>,

    /// Platform health store (required).
    pub health: Arc<dyn HealthDataProvider>,
}

impl std::fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("sensor_channel", &self.sensor_channel)
            .field("health_channel", &self.health_channel)
            .field("step_read_timeout", &self.step_read_timeout)
            .field("sensors", &"SensorManager { ... }")
            .field("permissions", &"PermissionProbe { ... }")
            .field("health", &"HealthDataProvider { ... }")
            .finish()
    }
}

impl BridgeConfig {
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::default()
    }

    /// One dispatcher over this configuration's bridges.
    pub fn build_dispatcher(&self) -> BridgeDispatcher {
        BridgeDispatcher::new(
            Arc::clone(&self.sensors),
            Arc::clone(&self.permissions),
            Arc::clone(&self.health),
            self.step_read_timeout,
        )
    }

    /// Registry binding both configured channel names to one shared
    /// dispatcher.
    pub fn build_registry(&self) -> ChannelRegistry {
        let dispatcher = Arc::new(self.build_dispatcher());
        let mut registry = ChannelRegistry::new();
        registry.register(self.sensor_channel.clone(), Arc::clone(&dispatcher));
        registry.register(self.health_channel.clone(), dispatcher);
        registry
    }
}

/// Builder for [`BridgeConfig`].
#[derive(Default)]
pub struct BridgeConfigBuilder {
    sensor_channel: Option<String>,
    health_channel: Option<String>,
    step_read_timeout: Option<Duration>,
    sensors: Option<Arc<dyn SensorManager>>,
    permissions: Option<Arc<dyn PermissionProbe>>,
    health: Option<Arc<dyn HealthDataProvider>>,
}

impl BridgeConfigBuilder {
    pub fn sensor_channel(mut self, name: impl Into<String>) -> Self {
        self.sensor_channel = Some(name.into());
        self
    }

    pub fn health_channel(mut self, name: impl Into<String>) -> Self {
        self.health_channel = Some(name.into());
        self
    }

    pub fn step_read_timeout(mut self, timeout: Duration) -> Self {
        self.step_read_timeout = Some(timeout);
        self
    }

    pub fn sensors(mut self, sensors: Arc<dyn SensorManager>) -> Self {
        self.sensors = Some(sensors);
        self
    }

    pub fn permissions(mut self, permissions: Arc<dyn PermissionProbe>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn health(mut self, health: Arc<dyn HealthDataProvider>) -> Self {
        self.health = Some(health);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CapabilityMissing`] when a required bridge handle
    /// was not provided, and [`CoreError::Config`] for invalid settings.
    pub fn build(self) -> Result<BridgeConfig> {
        let sensors = self.sensors.ok_or_else(|| missing(
            "SensorManager",
            "No sensor service provided. Inject the platform-native adapter, or bridge-sim's SimulatedSensorManager for development.",
        ))?;
        let permissions = self.permissions.ok_or_else(|| missing(
            "PermissionProbe",
            "No permission probe provided. Inject the platform-native adapter, or bridge-sim's StaticPermissionProbe for development.",
        ))?;
        let health = self.health.ok_or_else(|| missing(
            "HealthDataProvider",
            "No health store provided. Inject the platform-native adapter, or bridge-sim's StaticHealthProvider for development.",
        ))?;

        let step_read_timeout = self.step_read_timeout.unwrap_or(DEFAULT_STEP_READ_TIMEOUT);
        if step_read_timeout.is_zero() {
            return Err(CoreError::Config(
                "step_read_timeout must be non-zero".to_string(),
            ));
        }

        let sensor_channel = self
            .sensor_channel
            .unwrap_or_else(|| DEFAULT_SENSOR_CHANNEL.to_string());
        let health_channel = self
            .health_channel
            .unwrap_or_else(|| DEFAULT_HEALTH_CHANNEL.to_string());
        if sensor_channel.is_empty() || health_channel.is_empty() {
            return Err(CoreError::Config(
                "Channel names must be non-empty".to_string(),
            ));
        }

        Ok(BridgeConfig {
            sensor_channel,
            health_channel,
            step_read_timeout,
            sensors,
            permissions,
            health,
        })
    }
}

fn missing(capability: &str, message: &str) -> CoreError {
    CoreError::CapabilityMissing {
        capability: capability.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_sim::{SimulatedSensorManager, StaticHealthProvider, StaticPermissionProbe};

    fn full_builder() -> BridgeConfigBuilder {
        BridgeConfig::builder()
            .sensors(Arc::new(SimulatedSensorManager::with_default_sensor()))
            .permissions(Arc::new(StaticPermissionProbe::granted()))
            .health(Arc::new(StaticHealthProvider::new()))
    }

    #[test]
    fn test_defaults_applied() {
        let config = full_builder().build().unwrap();
        assert_eq!(config.sensor_channel, DEFAULT_SENSOR_CHANNEL);
        assert_eq!(config.health_channel, DEFAULT_HEALTH_CHANNEL);
        assert_eq!(config.step_read_timeout, DEFAULT_STEP_READ_TIMEOUT);
    }

    #[test]
    fn test_missing_bridge_fails_fast() {
        let result = BridgeConfig::builder()
            .permissions(Arc::new(StaticPermissionProbe::granted()))
            .health(Arc::new(StaticHealthProvider::new()))
            .build();

        match result {
            Err(CoreError::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "SensorManager");
            }
            other => panic!("expected CapabilityMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = full_builder()
            .step_read_timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_registry_covers_both_channels() {
        let config = full_builder()
            .sensor_channel("app/sensor")
            .health_channel("app/health")
            .build()
            .unwrap();

        let registry = config.build_registry();
        let mut channels = registry.registered_channels();
        channels.sort_unstable();
        assert_eq!(channels, vec!["app/health", "app/sensor"]);
    }
}
