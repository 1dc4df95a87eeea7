// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! Emergency contact model.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// An emergency contact supplied by the caller.
///
/// The core does not own contact lifecycle; the user-managed contact store
/// (or a static list) hands these in per dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Contact {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    /// Phone number in E.164-like form (leading `+`, digits only)
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// E.164-like check: optional leading `+`, then 8-15 digits.
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if (8..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone"))
    }
}
