// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! Outcome types for one emergency-alert dispatch.

use serde::{Deserialize, Serialize};

use crate::models::Contact;

/// Result of one send to one contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactOutcome {
    pub contact: Contact,
    pub delivered: bool,
    /// Short gateway error when the send failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of one invocation of the alert dispatcher. Not persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchResult {
    /// One entry per contact the dispatcher attempted
    pub outcomes: Vec<ContactOutcome>,
    /// Set when dispatch never reached the network (gateway unavailable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    /// Dispatch short-circuited before any send was attempted.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            outcomes: Vec::new(),
            error: Some(reason.into()),
        }
    }

    /// Overall success: the transport was reachable and every send succeeded.
    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.outcomes.iter().all(|o| o.delivered)
    }

    /// Contacts that were not reached. Successful sends are not rolled back.
    pub fn failed_contacts(&self) -> Vec<&Contact> {
        self.outcomes
            .iter()
            .filter(|o| !o.delivered)
            .map(|o| &o.contact)
            .collect()
    }
}
