// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! Application error types.
//!
//! Errors stay internal to the service layer. Public component contracts
//! convert them to `bool` / `Option` / result objects at the boundary, so no
//! device or transport error is visible above the component layer.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Location service error: {0}")]
    Location(String),

    #[error("SMS gateway error: {0}")]
    SmsGateway(String),

    #[error("Push relay error: {0}")]
    PushRelay(String),

    #[error("Invalid contact: {0}")]
    InvalidContact(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for the service layer
pub type Result<T> = std::result::Result<T, AppError>;
