//! Step Count Acquisition
//!
//! Single-shot read of the cumulative step counter. The hardware only emits
//! an event when the count changes (or shortly after registration, with
//! vendor-dependent latency), so a read is a race between the first sensor
//! event and a timeout that bounds caller-visible latency. A `None` result
//! means "unknown right now", never "zero steps".

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bridge_traits::{
    error::Result,
    permissions::PermissionProbe,
    sensor::SensorManager,
};
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Default delay before a silent sensor resolves to `None`.
pub const DEFAULT_STEP_READ_TIMEOUT: Duration = Duration::from_millis(1200);

/// One-shot reader for the cumulative step counter.
///
/// Each [`acquire`](Self::acquire) call owns its completion state and listener
/// registration; nothing is shared across reads, so concurrent reads are safe.
pub struct StepCountAcquirer {
    sensors: Arc<dyn SensorManager>,
    permissions: Arc<dyn PermissionProbe>,
    read_timeout: Duration,
}

impl StepCountAcquirer {
    /// Acquirer with the default read timeout.
    pub fn new(sensors: Arc<dyn SensorManager>, permissions: Arc<dyn PermissionProbe>) -> Self {
        Self::with_timeout(sensors, permissions, DEFAULT_STEP_READ_TIMEOUT)
    }

    /// Acquirer with a custom read timeout.
    pub fn with_timeout(
        sensors: Arc<dyn SensorManager>,
        permissions: Arc<dyn PermissionProbe>,
        read_timeout: Duration,
    ) -> Self {
        Self {
            sensors,
            permissions,
            read_timeout,
        }
    }

    /// Read the cumulative step count once.
    ///
    /// Resolves `Ok(None)` without registering a listener when the
    /// activity-recognition grant is absent or the device has no step
    /// counter, and after the timeout when the sensor stays silent. Errors
    /// are reserved for platform failures (sensor service errors); the
    /// normal "no data yet" cases never error.
    pub async fn acquire(&self) -> Result<Option<i64>> {
        if self.permissions.requires_runtime_grant()
            && !self.permissions.activity_recognition_granted().await?
        {
            debug!("Activity-recognition grant absent; resolving without a reading");
            return Ok(None);
        }

        if self.sensors.default_step_counter().await?.is_none() {
            debug!("No step-counter sensor on this device");
            return Ok(None);
        }

        // Single-assignment completion slot. The first sensor event takes the
        // sender; every later event finds it gone and becomes a no-op, even
        // when delivery races the timeout on another thread.
        let (sender, receiver) = oneshot::channel::<i64>();
        let slot = Arc::new(Mutex::new(Some(sender)));

        let completion = Arc::clone(&slot);
        let mut registration = self
            .sensors
            .register_listener(Arc::new(move |event| {
                let taken = completion.lock().ok().and_then(|mut guard| guard.take());
                if let Some(sender) = taken {
                    // Send fails only if the read already timed out and the
                    // receiver is gone; either way the value is delivered at
                    // most once.
                    let _ = sender.send(event.primary_value());
                }
            }))
            .await?;

        let reading = match timeout(self.read_timeout, receiver).await {
            Ok(Ok(value)) => {
                debug!(steps = value, "Sensor event won the read race");
                Some(value)
            }
            Ok(Err(_)) | Err(_) => {
                debug!(
                    timeout_ms = self.read_timeout.as_millis() as u64,
                    "No sensor event within the read window"
                );
                None
            }
        };

        // Both race outcomes release the registration here, exactly once. A
        // release failure must not turn a delivered reading into an error.
        if let Err(err) = registration.unregister().await {
            warn!(error = %err, "Failed to release step sensor listener");
        }

        Ok(reading)
    }
}
