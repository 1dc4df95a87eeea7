// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! Emergency alert dispatcher.
//!
//! Formats the fixed alert message and fans it out to every contact through
//! the SMS gateway. Sends run in parallel and are independent: a failure for
//! one contact does not abort in-flight sends to the others, and successful
//! sends are never rolled back.

use std::sync::Arc;

use futures_util::future::join_all;

use crate::models::{Contact, ContactOutcome, Coordinate, DispatchResult};
use crate::services::sms::SmsGateway;

/// Fixed prefix for every emergency alert message.
const ALERT_PREFIX: &str = "EMERGENCY ALERT: I need help! My current location is:";

/// Fan-out dispatcher over an SMS gateway.
pub struct AlertDispatcher {
    gateway: Arc<dyn SmsGateway>,
}

impl AlertDispatcher {
    pub fn new(gateway: Arc<dyn SmsGateway>) -> Self {
        Self { gateway }
    }

    /// Send the emergency alert to every contact.
    ///
    /// Exactly one attempt per contact, all issued concurrently. The overall
    /// result is a failure if any individual send fails. When the transport
    /// is unavailable, dispatch short-circuits before any network call.
    pub async fn send_emergency_alert(
        &self,
        contacts: &[Contact],
        location: &Coordinate,
    ) -> DispatchResult {
        if !self.gateway.is_available() {
            tracing::warn!("SMS transport unavailable, skipping dispatch");
            return DispatchResult::unavailable("SMS transport is not available on this platform");
        }

        let body = alert_message(location);

        let sends = contacts.iter().map(|contact| {
            let body = body.clone();
            async move {
                match self.gateway.send(&contact.phone, &body).await {
                    Ok(()) => ContactOutcome {
                        contact: contact.clone(),
                        delivered: true,
                        error: None,
                    },
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            contact = %contact.name,
                            "Failed to send emergency SMS"
                        );
                        ContactOutcome {
                            contact: contact.clone(),
                            delivered: false,
                            error: Some(e.to_string()),
                        }
                    }
                }
            }
        });

        let result = DispatchResult {
            outcomes: join_all(sends).await,
            error: None,
        };

        tracing::info!(
            contacts = contacts.len(),
            succeeded = result.succeeded(),
            "Emergency alert dispatched"
        );
        result
    }
}

/// The fixed alert body: prefix plus a map link embedding the coordinates.
pub fn alert_message(location: &Coordinate) -> String {
    format!("{} {}", ALERT_PREFIX, location.map_url())
}
