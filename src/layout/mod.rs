//! # Responsive Layout Transform
//!
//! The heart of reflow.
//!
//! ## The Problem
//!
//! Layouts are authored freely on a wide, fixed-size canvas: components sit
//! at absolute pixel positions, and designers lean on that freedom to stack
//! things deliberately. Rendering the same layout on a narrow viewport with
//! naive uniform scaling breaks twice over: minimum sizes stop components
//! from shrinking in step, so rectangles that never touched start clipping
//! each other; and squeezed text reflows taller than its scaled box allows.
//!
//! ## How the Transform Works
//!
//! Three phases over a sorted copy of the authoritative component list:
//!
//! 1. **Resolve**: classify the viewport into a breakpoint and compute a
//!    clamped scaling ratio ([`breakpoint`]).
//! 2. **Scale**: rescale every rectangle, correct horizontal overflow, and
//!    compensate height for width compression ([`scale`]).
//! 3. **Redistribute**: walk components in ascending original-y order and
//!    push down the ones involved in accidental collisions, while leaving
//!    authored stacks in place ([`overlap`]).
//!
//! The transform is a pure function of `(components, viewport width)`: it
//! always starts from the caller's list, carries its scratch state in a
//! private wrapper, and therefore cannot drift when re-run. It never
//! creates, drops, or reorders components.

pub mod breakpoint;
mod overlap;
mod scale;

pub use breakpoint::Breakpoint;

use serde::Serialize;

use crate::config::ResponsiveConfig;
use crate::model::Component;

/// The responsive transform engine. Owns nothing but its configuration;
/// every call is a pure function over the supplied components.
#[derive(Debug, Clone, Default)]
pub struct ResponsiveEngine {
    config: ResponsiveConfig,
}

/// Read-only snapshot of the resolved transform parameters, for
/// diagnostics. Never authoritative.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TransformInfo {
    pub breakpoint: Breakpoint,
    pub ratio: f64,
    pub editor_canvas_width: f64,
    pub available_width: f64,
    pub components_count: usize,
}

impl ResponsiveEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ResponsiveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResponsiveConfig {
        &self.config
    }

    /// Breakpoint tier for a viewport width.
    pub fn breakpoint(&self, viewport_width: f64) -> Breakpoint {
        Breakpoint::for_width(viewport_width, &self.config)
    }

    /// Content width remaining at a viewport width after chrome.
    pub fn available_width(&self, viewport_width: f64) -> f64 {
        let bp = self.breakpoint(viewport_width);
        breakpoint::available_width(viewport_width, bp, &self.config)
    }

    /// Resolved scaling ratio for a viewport width.
    pub fn scaling_ratio(&self, viewport_width: f64) -> f64 {
        let bp = self.breakpoint(viewport_width);
        breakpoint::scaling_ratio(self.available_width(viewport_width), bp, &self.config)
    }

    /// Transform a layout for a viewport width.
    ///
    /// The input list is the authoritative layout and is left untouched;
    /// the returned list replaces whatever is currently rendered. Repeated
    /// calls with the same input produce identical output.
    pub fn transform(&self, components: &[Component], viewport_width: f64) -> Vec<Component> {
        let bp = self.breakpoint(viewport_width);
        let available = breakpoint::available_width(viewport_width, bp, &self.config);
        let ratio = breakpoint::scaling_ratio(available, bp, &self.config);

        tracing::debug!(
            breakpoint = %bp,
            ratio = format_args!("{:.1}%", ratio * 100.0),
            available = format_args!("{available:.0}px"),
            count = components.len(),
            "running responsive transform"
        );

        let mut ordered: Vec<Component> = components.to_vec();
        for component in &mut ordered {
            component.normalize();
        }
        // Stable sort: equal-y components keep their array order, which
        // makes the repositioning pass deterministic.
        ordered.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));

        let scaled = ordered
            .iter()
            .map(|c| scale::scale_component(c, ratio, available, &self.config))
            .collect();

        overlap::redistribute(scaled, &self.config)
    }

    /// Diagnostics snapshot for a viewport width and component count.
    pub fn info(&self, viewport_width: f64, components_count: usize) -> TransformInfo {
        let breakpoint = self.breakpoint(viewport_width);
        let available_width = self.available_width(viewport_width);
        TransformInfo {
            breakpoint,
            ratio: breakpoint::scaling_ratio(available_width, breakpoint, &self.config),
            editor_canvas_width: self.config.editor_canvas_width,
            available_width,
            components_count,
        }
    }
}
