//! Command Dispatch
//!
//! Routes named commands from the UI layer to their handlers and converts
//! every outcome, including backend failures, into exactly one
//! [`MethodResponse`]. The dispatcher is stateless; each call owns its
//! response, so concurrent dispatches never interfere.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bridge_traits::{
    error::BridgeError, health::HealthDataProvider, permissions::PermissionProbe,
    sensor::SensorManager,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::protocol::{codes, MethodCall, MethodResponse, SensorStatus};
use crate::steps::StepCountAcquirer;

/// Failure raised inside a handler, carrying its declared wire code.
///
/// Converted to [`MethodResponse::Error`] at the dispatch boundary; handler
/// failures never propagate further.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{message}")]
    InvalidArguments { message: String },

    #[error("{message}")]
    HealthConnect {
        message: String,
        details: Option<String>,
    },

    #[error("{message}")]
    SensorStatus {
        message: String,
        details: Option<String>,
    },
}

impl HandlerError {
    fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    fn health(message: impl Into<String>, source: impl ToString) -> Self {
        Self::HealthConnect {
            message: message.into(),
            details: Some(source.to_string()),
        }
    }

    fn sensor(message: impl Into<String>, source: impl ToString) -> Self {
        Self::SensorStatus {
            message: message.into(),
            details: Some(source.to_string()),
        }
    }

    /// The declared wire code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArguments { .. } => codes::INVALID_ARGUMENTS,
            Self::HealthConnect { .. } => codes::HEALTH_CONNECT_ERROR,
            Self::SensorStatus { .. } => codes::SENSOR_STATUS_ERROR,
        }
    }

    fn into_response(self) -> MethodResponse {
        let code = self.code();
        match self {
            Self::InvalidArguments { message } => MethodResponse::error(code, message, None),
            Self::HealthConnect { message, details } | Self::SensorStatus { message, details } => {
                MethodResponse::error(code, message, details)
            }
        }
    }
}

type HandlerResult = std::result::Result<Value, HandlerError>;

/// Routes every recognized command to its handler.
///
/// The original host exposed the same handler set under several channel
/// namespaces; here one dispatcher serves them all and the namespace is just
/// a registry key (see [`ChannelRegistry`]).
pub struct BridgeDispatcher {
    acquirer: StepCountAcquirer,
    sensors: Arc<dyn SensorManager>,
    health: Arc<dyn HealthDataProvider>,
}

impl BridgeDispatcher {
    pub fn new(
        sensors: Arc<dyn SensorManager>,
        permissions: Arc<dyn PermissionProbe>,
        health: Arc<dyn HealthDataProvider>,
        step_read_timeout: Duration,
    ) -> Self {
        Self {
            acquirer: StepCountAcquirer::with_timeout(
                Arc::clone(&sensors),
                permissions,
                step_read_timeout,
            ),
            sensors,
            health,
        }
    }

    /// Handle one command, producing exactly one response.
    pub async fn dispatch(&self, call: MethodCall) -> MethodResponse {
        debug!(method = %call.method, "Dispatching method call");

        let result = match call.method.as_str() {
            "getCumulativeStepCount" => self.cumulative_step_count().await,
            "getSensorStatus" => self.sensor_status().await,
            "isHealthConnectAvailable" => self.health_available().await,
            "requestHealthConnectPermissions" => self.request_health_permissions().await,
            "getTodaySteps" => self.today_steps().await,
            "getStepsInRange" => self.steps_in_range(&call).await,
            "getRecentHeartRate" => self.recent_heart_rate().await,
            "getTodayCalories" => self.today_calories().await,
            "getTodayDistance" => self.today_distance().await,
            "checkHealthConnectPermissions" => self.check_health_permissions().await,
            other => {
                debug!(method = other, "Method not part of the channel contract");
                return MethodResponse::NotImplemented;
            }
        };

        match result {
            Ok(value) => MethodResponse::Success(value),
            Err(err) => {
                warn!(method = %call.method, code = err.code(), error = %err, "Handler failed");
                err.into_response()
            }
        }
    }

    async fn cumulative_step_count(&self) -> HandlerResult {
        let reading = self
            .acquirer
            .acquire()
            .await
            .map_err(|err| HandlerError::sensor("Failed to read cumulative step count", err))?;
        Ok(reading.map(Value::from).unwrap_or(Value::Null))
    }

    async fn sensor_status(&self) -> HandlerResult {
        let descriptor = self
            .sensors
            .default_step_counter()
            .await
            .map_err(|err| HandlerError::sensor("Error getting sensor status", err))?;
        json_text(&SensorStatus::from_descriptor(descriptor.as_ref()))
            .map_err(|err| HandlerError::sensor("Error getting sensor status", err))
    }

    async fn health_available(&self) -> HandlerResult {
        // Unavailability is an expected-absence state: the probe failing to
        // find the health store reads as `false`, never as an error.
        let available = match self.health.is_available().await {
            Ok(available) => available,
            Err(err) => {
                warn!(error = %err, "Health store availability probe failed");
                false
            }
        };
        Ok(Value::Bool(available))
    }

    async fn request_health_permissions(&self) -> HandlerResult {
        let issued = self.health.request_permissions().await.map_err(|err| {
            HandlerError::health("Failed to request Health Connect permissions", err)
        })?;
        Ok(Value::Bool(issued))
    }

    async fn today_steps(&self) -> HandlerResult {
        let sample = self
            .health
            .today_steps()
            .await
            .map_err(|err| HandlerError::health("Failed to get today steps", err))?;
        json_text(&sample).map_err(|err| HandlerError::health("Failed to get today steps", err))
    }

    async fn steps_in_range(&self, call: &MethodCall) -> HandlerResult {
        let (Some(start_time), Some(end_time)) =
            (call.argument_i64("startTime"), call.argument_i64("endTime"))
        else {
            return Err(HandlerError::invalid_arguments(
                "startTime and endTime are required",
            ));
        };

        let samples = self
            .health
            .steps_in_range(start_time, end_time)
            .await
            .map_err(|err| HandlerError::health("Failed to get steps in range", err))?;
        json_text(&samples).map_err(|err| HandlerError::health("Failed to get steps in range", err))
    }

    async fn recent_heart_rate(&self) -> HandlerResult {
        let bpm = self
            .health
            .recent_heart_rate()
            .await
            .map_err(|err| HandlerError::health("Failed to get recent heart rate", err))?;
        Ok(bpm.map(Value::from).unwrap_or(Value::Null))
    }

    async fn today_calories(&self) -> HandlerResult {
        let calories = self
            .health
            .today_calories()
            .await
            .map_err(|err| HandlerError::health("Failed to get today calories", err))?;
        Ok(Value::from(calories))
    }

    async fn today_distance(&self) -> HandlerResult {
        let meters = self
            .health
            .today_distance_meters()
            .await
            .map_err(|err| HandlerError::health("Failed to get today distance", err))?;
        Ok(Value::from(meters))
    }

    async fn check_health_permissions(&self) -> HandlerResult {
        let status = self
            .health
            .permission_status()
            .await
            .map_err(|err| HandlerError::health("Failed to check permissions", err))?;
        json_text(&status).map_err(|err| HandlerError::health("Failed to check permissions", err))
    }
}

/// Structured payloads go over the wire as serialized JSON text.
fn json_text<T: serde::Serialize>(payload: &T) -> Result<Value, BridgeError> {
    serde_json::to_string(payload)
        .map(Value::String)
        .map_err(|err| BridgeError::OperationFailed(format!("Payload serialization: {err}")))
}

/// Binds channel names to dispatchers.
///
/// The channel namespace is configuration, not behavior: several names may
/// share one dispatcher, which is how the legacy per-namespace handler sets
/// collapse into a single implementation.
#[derive(Default)]
pub struct ChannelRegistry {
    channels: HashMap<String, Arc<BridgeDispatcher>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, channel: impl Into<String>, dispatcher: Arc<BridgeDispatcher>) {
        let channel = channel.into();
        debug!(channel = %channel, "Registering method channel");
        self.channels.insert(channel, dispatcher);
    }

    pub fn registered_channels(&self) -> Vec<&str> {
        self.channels.keys().map(String::as_str).collect()
    }

    /// Dispatch on a named channel; `None` when the channel is unknown.
    pub async fn dispatch(&self, channel: &str, call: MethodCall) -> Option<MethodResponse> {
        let dispatcher = self.channels.get(channel)?;
        Some(dispatcher.dispatch(call).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_sim::{SimulatedSensorManager, StaticHealthProvider, StaticPermissionProbe};
    use bridge_traits::health::{HealthPermissionStatus, StepSample};

    mockall::mock! {
        HealthProvider {}

        #[async_trait]
        impl HealthDataProvider for HealthProvider {
            async fn is_available(&self) -> bridge_traits::error::Result<bool>;
            async fn request_permissions(&self) -> bridge_traits::error::Result<bool>;
            async fn today_steps(&self) -> bridge_traits::error::Result<StepSample>;
            async fn steps_in_range(
                &self,
                start_time: i64,
                end_time: i64,
            ) -> bridge_traits::error::Result<Vec<StepSample>>;
            async fn recent_heart_rate(&self) -> bridge_traits::error::Result<Option<i64>>;
            async fn today_calories(&self) -> bridge_traits::error::Result<i64>;
            async fn today_distance_meters(&self) -> bridge_traits::error::Result<f64>;
            async fn permission_status(&self) -> bridge_traits::error::Result<HealthPermissionStatus>;
        }
    }

    fn dispatcher_with_health(health: Arc<dyn HealthDataProvider>) -> BridgeDispatcher {
        BridgeDispatcher::new(
            Arc::new(SimulatedSensorManager::with_default_sensor()),
            Arc::new(StaticPermissionProbe::granted()),
            health,
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn test_unknown_method_is_not_implemented() {
        let dispatcher = dispatcher_with_health(Arc::new(StaticHealthProvider::new()));
        let response = dispatcher.dispatch(MethodCall::new("openSettings")).await;
        assert_eq!(response, MethodResponse::NotImplemented);
    }

    #[tokio::test]
    async fn test_steps_in_range_requires_both_bounds() {
        let dispatcher = dispatcher_with_health(Arc::new(StaticHealthProvider::new()));

        let call = MethodCall::new("getStepsInRange").with_argument("startTime", 1000);
        let response = dispatcher.dispatch(call).await;

        assert_eq!(
            response,
            MethodResponse::error(
                codes::INVALID_ARGUMENTS,
                "startTime and endTime are required",
                None
            )
        );
    }

    #[tokio::test]
    async fn test_steps_in_range_returns_json_array_text() {
        let dispatcher = dispatcher_with_health(Arc::new(StaticHealthProvider::new()));

        let call = MethodCall::new("getStepsInRange")
            .with_argument("startTime", 1000)
            .with_argument("endTime", 2000);
        let response = dispatcher.dispatch(call).await;

        let MethodResponse::Success(Value::String(text)) = response else {
            panic!("expected JSON text success, got {response:?}");
        };
        let samples: Vec<StepSample> = serde_json::from_str(&text).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].steps, 8000);
    }

    #[tokio::test]
    async fn test_backend_failure_maps_to_declared_code() {
        let mut health = MockHealthProvider::new();
        health.expect_today_steps().returning(|| {
            Err(BridgeError::OperationFailed(
                "health store query rejected".into(),
            ))
        });
        let dispatcher = dispatcher_with_health(Arc::new(health));

        let response = dispatcher.dispatch(MethodCall::new("getTodaySteps")).await;
        let MethodResponse::Error {
            code,
            message,
            details,
        } = response
        else {
            panic!("expected error response, got {response:?}");
        };
        assert_eq!(code, codes::HEALTH_CONNECT_ERROR);
        assert_eq!(message, "Failed to get today steps");
        assert!(details.unwrap().contains("health store query rejected"));
    }

    #[tokio::test]
    async fn test_availability_probe_failure_reads_as_false() {
        let mut health = MockHealthProvider::new();
        health
            .expect_is_available()
            .returning(|| Err(BridgeError::NotAvailable("no health store".into())));
        let dispatcher = dispatcher_with_health(Arc::new(health));

        let response = dispatcher
            .dispatch(MethodCall::new("isHealthConnectAvailable"))
            .await;
        assert_eq!(response, MethodResponse::Success(Value::Bool(false)));
    }

    #[tokio::test]
    async fn test_registry_shares_one_dispatcher_across_namespaces() {
        let dispatcher = Arc::new(dispatcher_with_health(Arc::new(StaticHealthProvider::new())));
        let mut registry = ChannelRegistry::new();
        registry.register("app/sensor", Arc::clone(&dispatcher));
        registry.register("app/health_connect", dispatcher);

        let on_sensor = registry
            .dispatch("app/sensor", MethodCall::new("getTodayCalories"))
            .await
            .unwrap();
        let on_health = registry
            .dispatch("app/health_connect", MethodCall::new("getTodayCalories"))
            .await
            .unwrap();
        assert_eq!(on_sensor, on_health);
        assert_eq!(on_sensor, MethodResponse::Success(Value::from(450)));

        assert!(registry
            .dispatch("app/unknown", MethodCall::new("getTodayCalories"))
            .await
            .is_none());
    }
}
