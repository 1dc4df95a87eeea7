// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! Hand-rolled mock ports shared by the integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use safetravels::error::{AppError, Result};
use safetravels::models::{Contact, Coordinate};
use safetravels::services::location::{
    Accuracy, DeviceLocation, PermissionStatus, TrackingConfig,
};
use safetravels::services::push::{
    ChannelSpec, PushEnvelope, PushPlatform, PushTransport, RelayAck,
};
use safetravels::services::sms::SmsGateway;

/// The two contacts the original emergency flow alerts.
#[allow(dead_code)]
pub fn test_contacts() -> Vec<Contact> {
    vec![
        Contact::new("Emergency Contact 1", "+1234567890"),
        Contact::new("Emergency Contact 2", "+0987654321"),
    ]
}

/// Scripted device location service.
pub struct MockDevice {
    pub foreground: PermissionStatus,
    pub background: PermissionStatus,
    /// Fix returned by single queries; `None` makes the query fail
    pub position: Option<Coordinate>,
    /// When set, single queries never resolve (exercises the bounded wait)
    pub hang: bool,
    /// How many times the recurring subscription was registered
    pub registrations: AtomicUsize,
    update_tx: Mutex<Option<mpsc::Sender<Coordinate>>>,
}

#[allow(dead_code)]
impl MockDevice {
    pub fn granted_at(latitude: f64, longitude: f64) -> Self {
        Self {
            foreground: PermissionStatus::Granted,
            background: PermissionStatus::Granted,
            position: Some(Coordinate::new(latitude, longitude)),
            hang: false,
            registrations: AtomicUsize::new(0),
            update_tx: Mutex::new(None),
        }
    }

    pub fn granted_no_fix() -> Self {
        Self {
            position: None,
            ..Self::granted_at(0.0, 0.0)
        }
    }

    pub fn granted_hanging() -> Self {
        Self {
            hang: true,
            ..Self::granted_at(0.0, 0.0)
        }
    }

    pub fn denied() -> Self {
        Self {
            foreground: PermissionStatus::Denied,
            background: PermissionStatus::Denied,
            ..Self::granted_at(0.0, 0.0)
        }
    }

    /// Feed a fix to the registered background subscription.
    pub async fn push_fix(&self, fix: Coordinate) -> bool {
        let tx = self.update_tx.lock().unwrap().clone();
        match tx {
            Some(tx) => tx.send(fix).await.is_ok(),
            None => false,
        }
    }
}

#[async_trait]
impl DeviceLocation for MockDevice {
    async fn request_foreground_permission(&self) -> Result<PermissionStatus> {
        Ok(self.foreground)
    }

    async fn request_background_permission(&self) -> Result<PermissionStatus> {
        Ok(self.background)
    }

    async fn current_position(&self, _accuracy: Accuracy) -> Result<Coordinate> {
        if self.hang {
            std::future::pending::<()>().await;
        }
        self.position
            .ok_or_else(|| AppError::Location("no fix available".to_string()))
    }

    async fn start_updates(&self, _config: &TrackingConfig) -> Result<mpsc::Receiver<Coordinate>> {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(8);
        *self.update_tx.lock().unwrap() = Some(tx);
        Ok(rx)
    }

    async fn stop_updates(&self) -> Result<()> {
        *self.update_tx.lock().unwrap() = None;
        Ok(())
    }
}

/// Recording SMS gateway.
pub struct MockSmsGateway {
    pub available: bool,
    /// Recipients whose sends should fail
    pub fail_numbers: Vec<String>,
    pub sends: AtomicUsize,
    pub messages: Mutex<Vec<(String, String)>>,
}

#[allow(dead_code)]
impl MockSmsGateway {
    pub fn new() -> Self {
        Self {
            available: true,
            fail_numbers: Vec::new(),
            sends: AtomicUsize::new(0),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn failing_for(number: &str) -> Self {
        Self {
            fail_numbers: vec![number.to_string()],
            ..Self::new()
        }
    }

    pub fn send_count(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn send(&self, to: &str, body: &str) -> Result<()> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        self.messages
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        if self.fail_numbers.iter().any(|n| n == to) {
            return Err(AppError::SmsGateway("carrier rejected".to_string()));
        }
        Ok(())
    }
}

/// Scripted device push stack.
pub struct MockPushPlatform {
    pub physical: bool,
    /// Permission state before any prompt
    pub existing: PermissionStatus,
    /// Result of prompting the user
    pub prompted: PermissionStatus,
    pub token: String,
}

#[allow(dead_code)]
impl MockPushPlatform {
    pub fn physical_granted() -> Self {
        Self {
            physical: true,
            existing: PermissionStatus::Granted,
            prompted: PermissionStatus::Granted,
            token: "ExponentPushToken[test]".to_string(),
        }
    }

    pub fn simulator() -> Self {
        Self {
            physical: false,
            ..Self::physical_granted()
        }
    }

    pub fn denied() -> Self {
        Self {
            existing: PermissionStatus::Denied,
            prompted: PermissionStatus::Denied,
            ..Self::physical_granted()
        }
    }

    pub fn granted_after_prompt() -> Self {
        Self {
            existing: PermissionStatus::Denied,
            prompted: PermissionStatus::Granted,
            ..Self::physical_granted()
        }
    }
}

#[async_trait]
impl PushPlatform for MockPushPlatform {
    fn is_physical_device(&self) -> bool {
        self.physical
    }

    async fn ensure_channel(&self, _spec: &ChannelSpec) -> Result<()> {
        Ok(())
    }

    async fn permission_status(&self) -> Result<PermissionStatus> {
        Ok(self.existing)
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(self.prompted)
    }

    async fn acquire_token(&self, _project_id: &str) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// Recording push relay transport.
pub struct MockPushTransport {
    pub succeed: bool,
    pub deliveries: AtomicUsize,
    pub envelopes: Mutex<Vec<PushEnvelope>>,
}

#[allow(dead_code)]
impl MockPushTransport {
    pub fn new() -> Self {
        Self {
            succeed: true,
            deliveries: AtomicUsize::new(0),
            envelopes: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            succeed: false,
            ..Self::new()
        }
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PushTransport for MockPushTransport {
    async fn deliver(&self, envelope: &PushEnvelope) -> Result<RelayAck> {
        self.deliveries.fetch_add(1, Ordering::SeqCst);
        self.envelopes.lock().unwrap().push(envelope.clone());
        if self.succeed {
            Ok(RelayAck {
                data: serde_json::json!({ "status": "ok" }),
            })
        } else {
            Err(AppError::PushRelay("relay rejected the message".to_string()))
        }
    }
}
