//! Command Channel Envelope
//!
//! Request/response types exchanged with the UI layer. Method names, error
//! codes, and every JSON field name in this module are the wire contract and
//! must not change without coordinating with the UI side.
//!
//! Structured success values are serialized JSON *text* (a JSON string
//! payload), matching what the UI layer already parses; plain scalars go out
//! as bare JSON values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use bridge_traits::sensor::SensorDescriptor;

/// Declared failure codes reported through [`MethodResponse::Error`].
pub mod codes {
    pub const HEALTH_CONNECT_ERROR: &str = "HEALTH_CONNECT_ERROR";
    pub const SENSOR_STATUS_ERROR: &str = "SENSOR_STATUS_ERROR";
    pub const INVALID_ARGUMENTS: &str = "INVALID_ARGUMENTS";
}

/// A named command from the UI layer with optional named arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Map<String, Value>>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: None,
        }
    }

    /// Attach a named argument (builder style).
    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Look up an integer argument, tolerating JSON doubles with an integral
    /// value (some channel codecs widen i64 to f64 in transit).
    pub fn argument_i64(&self, key: &str) -> Option<i64> {
        let value = self.arguments.as_ref()?.get(key)?;
        if let Some(n) = value.as_i64() {
            return Some(n);
        }
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64)
    }
}

/// Exactly one response per [`MethodCall`], success or failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum MethodResponse {
    /// Scalar or JSON-text success value; `Value::Null` means "not currently
    /// determinable", which callers treat as a fallback signal.
    Success(Value),
    /// A declared failure with a string code from [`codes`].
    Error {
        code: String,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    /// The method name is not part of this channel's contract.
    NotImplemented,
}

impl MethodResponse {
    pub fn success(value: impl Into<Value>) -> Self {
        Self::Success(value.into())
    }

    /// Success carrying `null`.
    pub fn null() -> Self {
        Self::Success(Value::Null)
    }

    pub fn error(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
            details,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Snapshot of the step-counter hardware, serialized as the
/// `getSensorStatus` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorStatus {
    #[serde(rename = "stepSensorAvailable")]
    pub available: bool,
    #[serde(rename = "stepSensorName")]
    pub name: String,
    #[serde(rename = "stepSensorVendor")]
    pub vendor: String,
    #[serde(rename = "stepSensorVersion")]
    pub version: i32,
    #[serde(rename = "stepSensorPower")]
    pub power: f64,
    #[serde(rename = "stepSensorResolution")]
    pub resolution: f64,
}

impl SensorStatus {
    /// Build the status record, substituting `"N/A"`/zero defaults when the
    /// device has no step counter.
    pub fn from_descriptor(descriptor: Option<&SensorDescriptor>) -> Self {
        match descriptor {
            Some(sensor) => Self {
                available: true,
                name: sensor.name.clone(),
                vendor: sensor.vendor.clone(),
                version: sensor.version,
                power: sensor.power,
                resolution: sensor.resolution,
            },
            None => Self {
                available: false,
                name: "N/A".to_string(),
                vendor: "N/A".to_string(),
                version: 0,
                power: 0.0,
                resolution: 0.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_call_builder() {
        let call = MethodCall::new("getStepsInRange")
            .with_argument("startTime", 1000)
            .with_argument("endTime", 2000);

        assert_eq!(call.method, "getStepsInRange");
        assert_eq!(call.argument_i64("startTime"), Some(1000));
        assert_eq!(call.argument_i64("endTime"), Some(2000));
        assert_eq!(call.argument_i64("missing"), None);
    }

    #[test]
    fn test_argument_i64_accepts_integral_doubles() {
        let call = MethodCall::new("getStepsInRange").with_argument("startTime", 1000.0);
        assert_eq!(call.argument_i64("startTime"), Some(1000));

        let call = MethodCall::new("getStepsInRange").with_argument("startTime", 1000.5);
        assert_eq!(call.argument_i64("startTime"), None);
    }

    #[test]
    fn test_arguments_absent_from_wire_when_empty() {
        let call = MethodCall::new("getTodaySteps");
        let json = serde_json::to_string(&call).unwrap();
        assert_eq!(json, r#"{"method":"getTodaySteps"}"#);
    }

    #[test]
    fn test_response_tagging() {
        let response = MethodResponse::error(
            codes::INVALID_ARGUMENTS,
            "startTime and endTime are required",
            None,
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "Error");
        assert_eq!(json["payload"]["code"], "INVALID_ARGUMENTS");

        let json = serde_json::to_value(MethodResponse::NotImplemented).unwrap();
        assert_eq!(json["type"], "NotImplemented");
    }

    #[test]
    fn test_sensor_status_wire_field_names() {
        let status = SensorStatus::from_descriptor(Some(&SensorDescriptor {
            name: "BMI160".to_string(),
            vendor: "Bosch".to_string(),
            version: 2,
            power: 0.03,
            resolution: 1.0,
        }));

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["stepSensorAvailable"], true);
        assert_eq!(json["stepSensorName"], "BMI160");
        assert_eq!(json["stepSensorVendor"], "Bosch");
        assert_eq!(json["stepSensorVersion"], 2);
        assert_eq!(json["stepSensorPower"], 0.03);
        assert_eq!(json["stepSensorResolution"], 1.0);
    }

    #[test]
    fn test_sensor_status_defaults_without_hardware() {
        let status = SensorStatus::from_descriptor(None);
        assert!(!status.available);
        assert_eq!(status.name, "N/A");
        assert_eq!(status.vendor, "N/A");
        assert_eq!(status.version, 0);
    }
}
