// SPDX-License-Identifier: MIT
// Copyright 2026 SafeTravels Developers

//! Location provider: permission handling, single fixes, background tracking.
//!
//! Wraps the device location service behind the [`DeviceLocation`] port.
//! Provider and OS level errors are caught at this boundary and converted to
//! boolean/`None` returns; permission denial is a normal outcome, not a
//! crash.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

use crate::error::Result;
use crate::models::Coordinate;

/// Bounded wait for a single position query.
const DEFAULT_FIX_TIMEOUT: Duration = Duration::from_secs(10);

/// Accuracy hint passed to the device location service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    /// Power-friendly accuracy for the recurring subscription
    Balanced,
    /// Best available accuracy for one-shot emergency fixes
    High,
}

/// Outcome of a platform permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn granted(self) -> bool {
        self == PermissionStatus::Granted
    }
}

/// Persistent foreground indicator shown while background tracking runs, so
/// the user knows tracking is active.
#[derive(Debug, Clone)]
pub struct ForegroundNotice {
    pub title: String,
    pub body: String,
    pub color: String,
}

impl Default for ForegroundNotice {
    fn default() -> Self {
        Self {
            title: "Safety Tracking Active".to_string(),
            body: "Your location is being monitored for safety.".to_string(),
            color: "#FF4785".to_string(),
        }
    }
}

/// Settings for the recurring background position subscription.
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    pub accuracy: Accuracy,
    /// Minimum time between updates
    pub time_interval: Duration,
    /// Minimum movement between updates, in meters
    pub distance_interval_m: f64,
    pub notice: ForegroundNotice,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::Balanced,
            time_interval: Duration::from_secs(5),
            distance_interval_m: 10.0,
            notice: ForegroundNotice::default(),
        }
    }
}

/// Port over the device location service.
#[async_trait]
pub trait DeviceLocation: Send + Sync {
    /// Prompt for foreground ("while in use") permission.
    async fn request_foreground_permission(&self) -> Result<PermissionStatus>;

    /// Prompt for background ("always") permission.
    async fn request_background_permission(&self) -> Result<PermissionStatus>;

    /// Single position query at the given accuracy.
    async fn current_position(&self, accuracy: Accuracy) -> Result<Coordinate>;

    /// Register the recurring subscription; fixes arrive on the returned
    /// channel until [`DeviceLocation::stop_updates`] is called.
    async fn start_updates(&self, config: &TrackingConfig) -> Result<mpsc::Receiver<Coordinate>>;

    /// Unregister the recurring subscription.
    async fn stop_updates(&self) -> Result<()>;
}

/// Shared last-known position slot.
///
/// Single writer (the background forwarder), any number of readers. Built on
/// a watch channel: replace-on-write is atomic, last writer wins, and
/// interested parties can observe updates via [`PositionCell::subscribe`]
/// instead of polling.
#[derive(Clone)]
pub struct PositionCell {
    tx: Arc<watch::Sender<Option<Coordinate>>>,
}

impl PositionCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Last known fix, if any.
    pub fn latest(&self) -> Option<Coordinate> {
        *self.tx.borrow()
    }

    /// Replace the last known fix.
    pub fn update(&self, fix: Coordinate) {
        self.tx.send_replace(Some(fix));
    }

    /// Observe fix replacements.
    pub fn subscribe(&self) -> watch::Receiver<Option<Coordinate>> {
        self.tx.subscribe()
    }
}

impl Default for PositionCell {
    fn default() -> Self {
        Self::new()
    }
}

/// State of the live background subscription. One per provider.
struct TrackingSession {
    forwarder: tokio::task::JoinHandle<()>,
}

/// Location provider component.
pub struct LocationProvider {
    device: Arc<dyn DeviceLocation>,
    cell: PositionCell,
    fix_timeout: Duration,
    permissions_granted: AtomicBool,
    session: Mutex<Option<TrackingSession>>,
}

impl LocationProvider {
    pub fn new(device: Arc<dyn DeviceLocation>, cell: PositionCell) -> Self {
        Self {
            device,
            cell,
            fix_timeout: DEFAULT_FIX_TIMEOUT,
            permissions_granted: AtomicBool::new(false),
            session: Mutex::new(None),
        }
    }

    /// Override the bounded wait for single position queries.
    pub fn with_fix_timeout(mut self, timeout: Duration) -> Self {
        self.fix_timeout = timeout;
        self
    }

    /// Shared position slot this provider feeds.
    pub fn cell(&self) -> &PositionCell {
        &self.cell
    }

    /// Request foreground and background location grants.
    ///
    /// Returns true only if all grants succeed. Denial is reported upward as
    /// a normal false outcome; prompt failures never escape as errors.
    pub async fn request_permissions(&self) -> bool {
        let granted = match self.prompt_for_permissions().await {
            Ok(granted) => granted,
            Err(e) => {
                tracing::warn!(error = %e, "Location permission request failed");
                false
            }
        };
        self.permissions_granted.store(granted, Ordering::SeqCst);
        granted
    }

    async fn prompt_for_permissions(&self) -> Result<bool> {
        let foreground = self.device.request_foreground_permission().await?;
        if !foreground.granted() {
            tracing::warn!("Foreground location permission denied");
            return Ok(false);
        }

        let background = self.device.request_background_permission().await?;
        if !background.granted() {
            tracing::warn!("Background location permission denied");
            return Ok(false);
        }

        Ok(true)
    }

    async fn ensure_permissions(&self) -> bool {
        if self.permissions_granted.load(Ordering::SeqCst) {
            return true;
        }
        self.request_permissions().await
    }

    /// Single high-accuracy position query with a bounded wait.
    ///
    /// `None` means "no fix available" (permission denial, device error, or
    /// timeout) and must not be treated as fatal by callers.
    pub async fn current_location(&self) -> Option<Coordinate> {
        if !self.ensure_permissions().await {
            return None;
        }

        let query = self.device.current_position(Accuracy::High);
        match tokio::time::timeout(self.fix_timeout, query).await {
            Ok(Ok(fix)) => Some(fix),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Position query failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.fix_timeout.as_millis() as u64,
                    "Position query timed out"
                );
                None
            }
        }
    }

    /// Start the recurring background subscription.
    ///
    /// Idempotent: if a session is already registered this returns true
    /// without side effects. Returns false when permissions are missing or
    /// registration fails.
    pub async fn start_tracking(&self, config: TrackingConfig) -> bool {
        if self.is_tracking() {
            return true;
        }

        if !self.ensure_permissions().await {
            return false;
        }

        let mut updates = match self.device.start_updates(&config).await {
            Ok(rx) => rx,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to register location updates");
                return false;
            }
        };

        // Forward fixes into the shared slot. Replace-only: no blocking
        // network work happens on this path.
        let cell = self.cell.clone();
        let forwarder = tokio::spawn(async move {
            while let Some(fix) = updates.recv().await {
                tracing::debug!(
                    latitude = fix.latitude,
                    longitude = fix.longitude,
                    "Background fix received"
                );
                cell.update(fix);
            }
        });

        let mut session = self.session.lock().unwrap();
        if session.is_some() {
            // A concurrent start won the race; keep its registration.
            forwarder.abort();
            return true;
        }
        *session = Some(TrackingSession { forwarder });
        tracing::info!("Background location tracking started");
        true
    }

    /// Unregister the subscription. Benign no-op if nothing is registered.
    pub async fn stop_tracking(&self) -> bool {
        let session = self.session.lock().unwrap().take();
        let Some(session) = session else {
            return true;
        };

        session.forwarder.abort();
        match self.device.stop_updates().await {
            Ok(()) => {
                tracing::info!("Background location tracking stopped");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to stop location updates");
                false
            }
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.session.lock().unwrap().is_some()
    }
}
