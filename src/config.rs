//! Application configuration loaded from environment variables.
//!
//! Carrier credentials and the push project identifier are externally
//! supplied secrets; nothing in the core hard-codes them.

use std::env;

/// Default push relay endpoint (Expo push service).
const DEFAULT_PUSH_RELAY_URL: &str = "https://exp.host/--/api/v2/push/send";

/// Default SMS carrier API base (Twilio).
const DEFAULT_SMS_API_BASE: &str = "https://api.twilio.com";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Secrets ---
    /// SMS carrier account identifier
    pub twilio_account_sid: String,
    /// SMS carrier auth secret
    pub twilio_auth_token: String,
    /// Sender number for outbound SMS
    pub twilio_phone_number: String,
    /// Push-relay project identifier used for token exchange
    pub push_project_id: String,

    // --- Endpoints and tuning (non-sensitive) ---
    /// Push relay endpoint
    pub push_relay_url: String,
    /// SMS carrier API base URL
    pub sms_api_base: String,
    /// Outbound HTTP request timeout in milliseconds
    pub http_timeout_ms: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            twilio_account_sid: "ACtest".to_string(),
            twilio_auth_token: "test_auth_token".to_string(),
            twilio_phone_number: "+15550006666".to_string(),
            push_project_id: "test-project".to_string(),
            push_relay_url: DEFAULT_PUSH_RELAY_URL.to_string(),
            sms_api_base: DEFAULT_SMS_API_BASE.to_string(),
            http_timeout_ms: 10_000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// For local development, secrets can be set via a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("TWILIO_ACCOUNT_SID"))?,
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("TWILIO_AUTH_TOKEN"))?,
            twilio_phone_number: env::var("TWILIO_PHONE_NUMBER")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("TWILIO_PHONE_NUMBER"))?,
            push_project_id: env::var("PUSH_PROJECT_ID")
                .map_err(|_| ConfigError::Missing("PUSH_PROJECT_ID"))?,
            push_relay_url: env::var("PUSH_RELAY_URL")
                .unwrap_or_else(|_| DEFAULT_PUSH_RELAY_URL.to_string()),
            sms_api_base: env::var("SMS_API_BASE")
                .unwrap_or_else(|_| DEFAULT_SMS_API_BASE.to_string()),
            http_timeout_ms: env::var("HTTP_TIMEOUT_MS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .unwrap_or(10_000),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
