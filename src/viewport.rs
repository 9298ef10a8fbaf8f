//! Debounced viewport-resize handling.
//!
//! Resize events arrive in bursts, one per pixel of drag. Re-running the
//! transform on each would thrash the layout, so the scheduler keeps a
//! single pending slot: every new signal replaces the slot and resets its
//! deadline, and the slot only fires once resize activity has been quiet
//! for the quiescence window. A superseded signal is discarded, never
//! queued, so at most one transform run is ever pending.
//!
//! Firing is additionally gated on the breakpoint actually changing:
//! resizes within one tier resolve to the same transform and are dropped.
//!
//! Time is injected (`Instant` parameters), so the scheduler is pure state
//! and needs no timers to test.

use std::time::{Duration, Instant};

use crate::config::ResponsiveConfig;
use crate::layout::Breakpoint;

const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
struct PendingReflow {
    viewport_width: f64,
    deadline: Instant,
}

/// Single-slot debouncer for viewport resize signals.
#[derive(Debug, Clone)]
pub struct ResizeScheduler {
    config: ResponsiveConfig,
    quiescence: Duration,
    pending: Option<PendingReflow>,
    applied_breakpoint: Option<Breakpoint>,
}

impl ResizeScheduler {
    pub fn new(config: ResponsiveConfig) -> Self {
        Self::with_quiescence(config, DEFAULT_QUIESCENCE)
    }

    pub fn with_quiescence(config: ResponsiveConfig, quiescence: Duration) -> Self {
        Self {
            config,
            quiescence,
            pending: None,
            applied_breakpoint: None,
        }
    }

    /// Record a resize signal. Replaces any pending reflow and restarts
    /// the quiescence window.
    pub fn signal(&mut self, viewport_width: f64, now: Instant) {
        self.pending = Some(PendingReflow {
            viewport_width,
            deadline: now + self.quiescence,
        });
    }

    /// Take the pending reflow if its window has elapsed and it would land
    /// on a different breakpoint than the last applied one. Returns the
    /// viewport width the transform should run at.
    ///
    /// A pending entry that settles inside the already-applied breakpoint
    /// is dropped without firing.
    pub fn poll(&mut self, now: Instant) -> Option<f64> {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }
        self.pending = None;
        let breakpoint = Breakpoint::for_width(pending.viewport_width, &self.config);
        if self.applied_breakpoint == Some(breakpoint) {
            tracing::debug!(%breakpoint, "resize settled within current breakpoint, no reflow");
            return None;
        }
        tracing::debug!(
            from = self.applied_breakpoint.map(|b| b.as_str()).unwrap_or("none"),
            to = %breakpoint,
            "breakpoint changed, reflow due"
        );
        self.applied_breakpoint = Some(breakpoint);
        Some(pending.viewport_width)
    }

    /// Mark a breakpoint as already applied, for the initial transform run
    /// a caller performs directly at startup.
    pub fn mark_applied(&mut self, viewport_width: f64) {
        self.applied_breakpoint = Some(Breakpoint::for_width(viewport_width, &self.config));
    }

    pub fn applied_breakpoint(&self) -> Option<Breakpoint> {
        self.applied_breakpoint
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
