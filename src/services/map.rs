// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! Map rendering capability.
//!
//! Runtimes with a native map widget plug in their own implementation; the
//! text fallback covers everything else. The host selects one at startup by
//! platform detection instead of scattering conditional imports.

use crate::models::Coordinate;

/// How the map view renders the user's position.
pub trait MapRenderer: Send + Sync {
    /// Render the given fix, or a placeholder while none exists.
    fn render(&self, position: Option<&Coordinate>) -> String;
}

/// Text fallback for runtimes without a map widget.
#[derive(Debug, Default)]
pub struct TextMapRenderer;

impl MapRenderer for TextMapRenderer {
    fn render(&self, position: Option<&Coordinate>) -> String {
        match position {
            Some(fix) => format!("Lat: {}\nLong: {}", fix.latitude, fix.longitude),
            None => "Location unavailable".to_string(),
        }
    }
}
