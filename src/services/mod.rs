// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! Services module - the emergency-alert core components.

pub mod dispatch;
pub mod emergency;
pub mod location;
pub mod map;
pub mod push;
pub mod sms;

pub use dispatch::AlertDispatcher;
pub use emergency::{EmergencyOrchestrator, EmergencyOutcome, FailureReason};
pub use location::{
    Accuracy, DeviceLocation, LocationProvider, PermissionStatus, PositionCell, TrackingConfig,
};
pub use map::{MapRenderer, TextMapRenderer};
pub use push::{ExpoRelay, NotificationGateway, PushPlatform, PushToken, PushTransport};
pub use sms::{SmsGateway, TwilioGateway};
