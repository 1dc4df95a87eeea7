// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! SMS carrier gateway (Twilio).

use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::{AppError, Result};

/// Outbound SMS transport.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Whether this runtime/configuration can send SMS at all.
    fn is_available(&self) -> bool;

    /// Send one message to one recipient. Exactly one attempt, no retry.
    async fn send(&self, to: &str, body: &str) -> Result<()>;
}

/// Twilio-backed SMS gateway.
///
/// One authenticated form-encoded POST per recipient against the Messages
/// endpoint. Credentials come from configuration; when they are absent the
/// gateway reports itself unavailable so dispatch can short-circuit.
pub struct TwilioGateway {
    http: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioGateway {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .build()
            .map_err(|e| AppError::SmsGateway(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.sms_api_base.clone(),
            account_sid: config.twilio_account_sid.clone(),
            auth_token: config.twilio_auth_token.clone(),
            from_number: config.twilio_phone_number.clone(),
        })
    }
}

#[async_trait]
impl SmsGateway for TwilioGateway {
    fn is_available(&self) -> bool {
        !self.account_sid.is_empty() && !self.auth_token.is_empty() && !self.from_number.is_empty()
    }

    async fn send(&self, to: &str, body: &str) -> Result<()> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", to),
                ("From", self.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| AppError::SmsGateway(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::SmsGateway(format!("HTTP {}: {}", status, text)));
        }

        tracing::debug!(to = %to, "SMS accepted by carrier");
        Ok(())
    }
}
