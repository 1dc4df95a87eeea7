// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! Push notification gateway.
//!
//! Device registration goes through the [`PushPlatform`] port (channel setup,
//! physical-device check, permission prompts, token exchange). Delivery posts
//! one message envelope to the push relay over HTTP. Neither path retries; a
//! failed registration yields `None` and a failed send is reported and
//! dropped.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::location::PermissionStatus;

/// Opaque device identifier for push delivery.
///
/// Created once per install/session. Revocation by the provider is only
/// detectable as a failed send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushToken {
    pub value: String,
    pub registered_at: DateTime<Utc>,
}

impl PushToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            registered_at: Utc::now(),
        }
    }
}

/// Delivery-channel importance (Android).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelImportance {
    Default,
    High,
    Max,
}

/// Notification channel metadata, configured once per registration.
#[derive(Debug, Clone)]
pub struct ChannelSpec {
    pub id: String,
    pub importance: ChannelImportance,
    pub vibration_pattern: Vec<u32>,
    pub light_color: String,
}

impl Default for ChannelSpec {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            importance: ChannelImportance::Max,
            vibration_pattern: vec![0, 250, 250, 250],
            light_color: "#FF4785".to_string(),
        }
    }
}

/// Port over the device push stack.
#[async_trait]
pub trait PushPlatform: Send + Sync {
    /// Whether this is real hardware. Push delivery is only meaningful on a
    /// physical device; simulators yield no token by design.
    fn is_physical_device(&self) -> bool;

    /// Configure the delivery channel. Harmless to repeat.
    async fn ensure_channel(&self, spec: &ChannelSpec) -> Result<()>;

    /// Current notification permission without prompting.
    async fn permission_status(&self) -> Result<PermissionStatus>;

    /// Prompt the user for notification permission.
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Exchange for an opaque push token scoped to the given project.
    async fn acquire_token(&self, project_id: &str) -> Result<String>;
}

/// One message envelope posted to the relay.
#[derive(Debug, Clone, Serialize)]
pub struct PushEnvelope {
    pub to: String,
    pub sound: String,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

/// Acknowledging payload returned by the relay on success.
#[derive(Debug, Deserialize)]
pub struct RelayAck {
    pub data: serde_json::Value,
}

/// Transport that delivers one envelope to the push relay.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn deliver(&self, envelope: &PushEnvelope) -> Result<RelayAck>;
}

/// HTTP push relay client (Expo push service).
pub struct ExpoRelay {
    http: reqwest::Client,
    url: String,
}

impl ExpoRelay {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .build()
            .map_err(|e| AppError::PushRelay(e.to_string()))?;

        Ok(Self {
            http,
            url: config.push_relay_url.clone(),
        })
    }
}

#[async_trait]
impl PushTransport for ExpoRelay {
    async fn deliver(&self, envelope: &PushEnvelope) -> Result<RelayAck> {
        let response = self
            .http
            .post(&self.url)
            .header("Accept", "application/json")
            .json(envelope)
            .send()
            .await
            .map_err(|e| AppError::PushRelay(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::PushRelay(format!("HTTP {}: {}", status, text)));
        }

        // Success requires an acknowledging JSON body, not just a 2xx status.
        response
            .json::<RelayAck>()
            .await
            .map_err(|e| AppError::PushRelay(format!("Bad relay acknowledgement: {}", e)))
    }
}

/// Push notification gateway component.
pub struct NotificationGateway {
    platform: Arc<dyn PushPlatform>,
    transport: Arc<dyn PushTransport>,
    project_id: String,
    channel: ChannelSpec,
}

impl NotificationGateway {
    pub fn new(
        platform: Arc<dyn PushPlatform>,
        transport: Arc<dyn PushTransport>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            transport,
            project_id: project_id.into(),
            channel: ChannelSpec::default(),
        }
    }

    /// Register this device for push delivery.
    ///
    /// `None` on a simulated device, permission denial, or token-service
    /// failure. Never returns an error.
    pub async fn register_device(&self) -> Option<PushToken> {
        match self.try_register().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Push registration failed");
                None
            }
        }
    }

    async fn try_register(&self) -> Result<Option<PushToken>> {
        self.platform.ensure_channel(&self.channel).await?;

        if !self.platform.is_physical_device() {
            tracing::info!("Not a physical device, skipping push registration");
            return Ok(None);
        }

        let mut status = self.platform.permission_status().await?;
        if !status.granted() {
            status = self.platform.request_permission().await?;
        }
        if !status.granted() {
            tracing::warn!("Notification permission denied");
            return Ok(None);
        }

        let value = self.platform.acquire_token(&self.project_id).await?;
        tracing::info!("Push token registered");
        Ok(Some(PushToken::new(value)))
    }

    /// Send one titled/bodied push message to a token.
    ///
    /// Guard clause: an empty token fails immediately without any network
    /// call. Otherwise one delivery attempt; a failed send is dropped.
    pub async fn send_push_message(&self, token: &str, title: &str, body: &str) -> bool {
        if token.is_empty() {
            tracing::warn!("Refusing to send push with empty token");
            return false;
        }

        let envelope = PushEnvelope {
            to: token.to_string(),
            sound: "default".to_string(),
            title: title.to_string(),
            body: body.to_string(),
            data: serde_json::json!({}),
        };

        match self.transport.deliver(&envelope).await {
            Ok(_) => {
                tracing::info!("Push notification sent");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to send push notification");
                false
            }
        }
    }
}
