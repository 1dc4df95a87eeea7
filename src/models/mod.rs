// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! Data models for the application.

pub mod contact;
pub mod coordinate;
pub mod dispatch;

pub use contact::Contact;
pub use coordinate::Coordinate;
pub use dispatch::{ContactOutcome, DispatchResult};
