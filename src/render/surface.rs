//! Drawing-surface size tracking.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A surface is drawable once both dimensions are positive.
    ///
    /// Before the host has laid the surface out it reports `0 × 0`; drawing is skipped until then.
    pub fn is_renderable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Options for [`ResizeDebouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceOptions {
    /// How long notifications must stop before the latest size is emitted.
    pub quiet_period: Duration,
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(200),
        }
    }
}

/// Coalesces bursts of resize notifications into one redraw.
///
/// The host calls [`Self::notify`] on every resize and [`Self::poll`] from its tick or timer.
/// `poll` yields the most recent size once no notification has arrived for the quiet period,
/// and only if that size is renderable and differs from the last one yielded.
/// Time is passed in by the caller, so the debouncer owns no timer.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    opts: DebounceOptions,
    pending: Option<(SurfaceSize, Instant)>,
    last_emitted: Option<SurfaceSize>,
}

impl ResizeDebouncer {
    pub fn new(opts: DebounceOptions) -> Self {
        Self {
            opts,
            pending: None,
            last_emitted: None,
        }
    }

    /// Record a resize observed at `now`. Restarts the quiet period.
    pub fn notify(&mut self, size: SurfaceSize, now: Instant) {
        self.pending = Some((size, now));
    }

    /// Returns the size to redraw at, if the quiet period has elapsed since the last notification.
    pub fn poll(&mut self, now: Instant) -> Option<SurfaceSize> {
        let (size, at) = self.pending?;
        if now.saturating_duration_since(at) < self.opts.quiet_period {
            return None;
        }
        self.pending = None;

        if !size.is_renderable() || self.last_emitted == Some(size) {
            return None;
        }
        self.last_emitted = Some(size);
        Some(size)
    }

    /// Size most recently yielded by [`Self::poll`].
    pub fn current(&self) -> Option<SurfaceSize> {
        self.last_emitted
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DebounceOptions::default())
    }
}
