//! Simulated Step-Counter Sensor

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    sensor::{ListenerRegistration, SensorCallback, SensorDescriptor, SensorEvent, SensorManager},
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// One scripted sensor event, delivered `delay` after the previous event (or
/// after registration, for the first event).
#[derive(Debug, Clone)]
pub struct ScriptedEvent {
    pub delay: Duration,
    pub values: Vec<f64>,
}

/// Scriptable in-process sensor manager.
///
/// Mimics real pedometer hardware: events arrive asynchronously on a
/// different task than the one that registered, only according to the script,
/// and never as a synchronous read. An empty script simulates a sensor that
/// stays silent, which is how a stationary device behaves.
pub struct SimulatedSensorManager {
    descriptor: Option<SensorDescriptor>,
    script: Vec<ScriptedEvent>,
    registrations: Arc<AtomicUsize>,
    unregistrations: Arc<AtomicUsize>,
}

impl SimulatedSensorManager {
    /// Manager for a device without pedometer hardware.
    pub fn without_sensor() -> Self {
        Self {
            descriptor: None,
            script: Vec::new(),
            registrations: Arc::new(AtomicUsize::new(0)),
            unregistrations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Manager exposing `descriptor` with an empty (silent) event script.
    pub fn with_sensor(descriptor: SensorDescriptor) -> Self {
        Self {
            descriptor: Some(descriptor),
            ..Self::without_sensor()
        }
    }

    /// Manager exposing a generic simulated step counter.
    pub fn with_default_sensor() -> Self {
        Self::with_sensor(SensorDescriptor {
            name: "Simulated Step Counter".to_string(),
            vendor: "bridge-sim".to_string(),
            version: 1,
            power: 0.03,
            resolution: 1.0,
        })
    }

    /// Append a scripted event (builder style).
    pub fn with_event(mut self, delay: Duration, values: Vec<f64>) -> Self {
        self.script.push(ScriptedEvent { delay, values });
        self
    }

    /// How many listener registrations have been issued.
    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    /// How many registrations have been released.
    pub fn unregistrations(&self) -> usize {
        self.unregistrations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SensorManager for SimulatedSensorManager {
    async fn default_step_counter(&self) -> Result<Option<SensorDescriptor>> {
        Ok(self.descriptor.clone())
    }

    async fn register_listener(
        &self,
        callback: SensorCallback,
    ) -> Result<Box<dyn ListenerRegistration>> {
        if self.descriptor.is_none() {
            return Err(BridgeError::NotAvailable(
                "No step-counter sensor on this device".into(),
            ));
        }

        self.registrations.fetch_add(1, Ordering::SeqCst);
        let active = Arc::new(AtomicBool::new(true));

        let script = self.script.clone();
        let delivery_gate = Arc::clone(&active);
        tokio::spawn(async move {
            for event in script {
                sleep(event.delay).await;
                if !delivery_gate.load(Ordering::SeqCst) {
                    break;
                }
                debug!(values = ?event.values, "Delivering scripted sensor event");
                callback(SensorEvent::new(event.values));
            }
        });

        Ok(Box::new(SimulatedRegistration {
            active,
            unregistrations: Arc::clone(&self.unregistrations),
            released: false,
        }))
    }
}

struct SimulatedRegistration {
    active: Arc<AtomicBool>,
    unregistrations: Arc<AtomicUsize>,
    released: bool,
}

#[async_trait]
impl ListenerRegistration for SimulatedRegistration {
    async fn unregister(&mut self) -> Result<()> {
        if !self.released {
            self.released = true;
            self.active.store(false, Ordering::SeqCst);
            self.unregistrations.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_without_sensor_reports_none() {
        let manager = SimulatedSensorManager::without_sensor();
        assert!(manager.default_step_counter().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_without_sensor_fails() {
        let manager = SimulatedSensorManager::without_sensor();
        let result = manager.register_listener(Arc::new(|_| {})).await;
        assert!(matches!(result, Err(BridgeError::NotAvailable(_))));
    }

    #[tokio::test]
    async fn test_scripted_events_are_delivered_in_order() {
        let manager = SimulatedSensorManager::with_default_sensor()
            .with_event(Duration::from_millis(5), vec![100.0])
            .with_event(Duration::from_millis(5), vec![101.0]);

        let seen: Arc<Mutex<Vec<i64>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut registration = manager
            .register_listener(Arc::new(move |event| {
                sink.lock().unwrap().push(event.primary_value());
            }))
            .await
            .unwrap();

        sleep(Duration::from_millis(50)).await;
        assert_eq!(*seen.lock().unwrap(), vec![100, 101]);

        registration.unregister().await.unwrap();
        assert_eq!(manager.registrations(), 1);
        assert_eq!(manager.unregistrations(), 1);
    }

    #[tokio::test]
    async fn test_unregister_stops_delivery_and_is_idempotent() {
        let manager = SimulatedSensorManager::with_default_sensor()
            .with_event(Duration::from_millis(40), vec![100.0]);

        let seen = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&seen);
        let mut registration = manager
            .register_listener(Arc::new(move |_| {
                sink.fetch_add(1, Ordering::SeqCst);
            }))
            .await
            .unwrap();

        registration.unregister().await.unwrap();
        registration.unregister().await.unwrap();

        sleep(Duration::from_millis(80)).await;
        assert_eq!(seen.load(Ordering::SeqCst), 0);
        assert_eq!(manager.unregistrations(), 1);
    }
}
