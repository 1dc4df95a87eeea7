// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! GPS fix model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single GPS fix.
///
/// Immutable: a newer fix supersedes an older one, nothing mutates in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// When the fix was captured
    pub captured_at: DateTime<Utc>,
}

impl Coordinate {
    /// Create a fix captured now.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            captured_at: Utc::now(),
        }
    }

    /// Map link for this fix.
    ///
    /// A plain Google Maps query URL opens in any browser, so recipients do
    /// not need a particular app installed.
    pub fn map_url(&self) -> String {
        format!(
            "https://www.google.com/maps?q={},{}",
            self.latitude, self.longitude
        )
    }
}
