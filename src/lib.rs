// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! SafeTravels core: emergency-alert orchestration for a personal-safety app.
//!
//! This crate acquires the user's location, fans an alert SMS with a map link
//! out to emergency contacts, and follows up with a confirmation push
//! notification. Screens, authentication, and the vendor endpoints themselves
//! stay outside; the core reaches them through ports and HTTP clients.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured JSON logging. Call once from the host application.
pub fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("safetravels=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
