// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! Emergency orchestration.
//!
//! Sequences one emergency trigger:
//! 1. Resolve a location (last-known fix, else a fresh query)
//! 2. Fan the alert out over SMS
//! 3. Best-effort confirmation push
//! 4. Reduce the outcomes into one UI-facing result
//!
//! Stages run strictly in sequence; dispatch never runs without a resolved
//! coordinate. Overlapping triggers are not coordinated here; debouncing the
//! alert button belongs to the interaction layer.

use std::sync::{Arc, RwLock};

use crate::models::{Contact, Coordinate, DispatchResult};
use crate::services::dispatch::AlertDispatcher;
use crate::services::location::{LocationProvider, PositionCell, TrackingConfig};
use crate::services::push::{NotificationGateway, PushToken};

/// Title/body of the confirmation push sent after a trigger.
const CONFIRMATION_TITLE: &str = "Emergency Alert";
const CONFIRMATION_BODY: &str = "Emergency alert triggered!";

/// Why an emergency trigger failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// No fix in the shared slot and the fresh query also came back empty
    LocationUnavailable,
    /// The SMS fan-out did not reach every contact
    DispatchFailed,
}

/// Aggregate outcome of one emergency trigger, reduced for the UI.
///
/// The push outcome is informational only; dispatch decides success.
#[derive(Debug, Clone)]
pub struct EmergencyOutcome {
    /// Per-contact dispatch detail; `None` when dispatch never ran
    pub dispatch: Option<DispatchResult>,
    pub push_sent: bool,
    pub failure: Option<FailureReason>,
}

impl EmergencyOutcome {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    /// Short, actionable message for the user. Raw provider errors never
    /// surface here.
    pub fn user_message(&self) -> &'static str {
        match self.failure {
            None => "Emergency alert sent. Your contacts have been notified.",
            Some(FailureReason::LocationUnavailable) => {
                "Unable to get your location. Please enable location services and try again."
            }
            Some(FailureReason::DispatchFailed) => {
                "Failed to send emergency alert. Please try again."
            }
        }
    }

    fn failed(reason: FailureReason) -> Self {
        Self {
            dispatch: None,
            push_sent: false,
            failure: Some(reason),
        }
    }
}

/// Screen-level coordinator for the emergency flow.
pub struct EmergencyOrchestrator {
    provider: Arc<LocationProvider>,
    dispatcher: AlertDispatcher,
    notifications: NotificationGateway,
    cell: PositionCell,
    push_token: RwLock<Option<PushToken>>,
}

impl EmergencyOrchestrator {
    pub fn new(
        provider: Arc<LocationProvider>,
        dispatcher: AlertDispatcher,
        notifications: NotificationGateway,
        cell: PositionCell,
    ) -> Self {
        Self {
            provider,
            dispatcher,
            notifications,
            cell,
            push_token: RwLock::new(None),
        }
    }

    /// Screen-init sequence: request permissions, prime the shared slot with
    /// a fresh fix, start background tracking, register for push.
    ///
    /// Every step is best-effort. A denial here leaves later triggers to fail
    /// explicitly with a user-facing reason rather than crashing.
    pub async fn initialize(&self) {
        if !self.provider.request_permissions().await {
            tracing::warn!("Location permissions not granted during init");
        }

        if let Some(fix) = self.provider.current_location().await {
            self.cell.update(fix);
        }

        self.provider.start_tracking(TrackingConfig::default()).await;

        if let Some(token) = self.notifications.register_device().await {
            *self.push_token.write().unwrap() = Some(token);
        }
    }

    pub fn push_token(&self) -> Option<PushToken> {
        self.push_token.read().unwrap().clone()
    }

    pub fn set_push_token(&self, token: Option<PushToken>) {
        *self.push_token.write().unwrap() = token;
    }

    /// Run one emergency trigger for the given contact list.
    ///
    /// Which list to pass (the user-managed contact store or a fixed
    /// fallback) is the caller's product decision.
    pub async fn trigger(&self, contacts: &[Contact]) -> EmergencyOutcome {
        let Some(location) = self.resolve_location().await else {
            tracing::warn!("Emergency trigger with no location fix available");
            return EmergencyOutcome::failed(FailureReason::LocationUnavailable);
        };

        let dispatch = self
            .dispatcher
            .send_emergency_alert(contacts, &location)
            .await;
        let dispatched = dispatch.succeeded();

        // The confirmation push never downgrades a successful dispatch.
        let push_sent = match self.push_token() {
            Some(token) => {
                self.notifications
                    .send_push_message(&token.value, CONFIRMATION_TITLE, CONFIRMATION_BODY)
                    .await
            }
            None => false,
        };

        tracing::info!(dispatched, push_sent, "Emergency trigger complete");
        EmergencyOutcome {
            dispatch: Some(dispatch),
            push_sent,
            failure: if dispatched {
                None
            } else {
                Some(FailureReason::DispatchFailed)
            },
        }
    }

    /// Last-known fix if present, else one synchronous fresh query.
    async fn resolve_location(&self) -> Option<Coordinate> {
        if let Some(fix) = self.cell.latest() {
            return Some(fix);
        }
        self.provider.current_location().await
    }

    /// Resource release when the owning screen goes away. Stops background
    /// tracking but does not cancel an in-flight dispatch.
    pub async fn shutdown(&self) {
        self.provider.stop_tracking().await;
    }
}
