//! Applying a transformed layout to a presentation surface.
//!
//! The transform is pure; this module is the one place its output touches
//! anything. A [`RenderPlan`] is the complete set of side effects one
//! transform run implies: a frame update per component, plus the canvas
//! minimum height. Consumers implement [`RenderSink`] over whatever they
//! render into (DOM elements, a scene graph, a test vector) and the plan
//! applier drives it, skipping targets the sink does not know.

use std::collections::HashSet;

use serde::Serialize;

use crate::config::ResponsiveConfig;
use crate::layout::Breakpoint;
use crate::model::Component;

/// Geometry update for one rendered element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameUpdate {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub z: i64,
    /// Present only for text components: the ratio- and breakpoint-adjusted
    /// font size, never below the configured floor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

/// Everything one transform run wants to change on screen.
#[derive(Debug, Clone, Serialize)]
pub struct RenderPlan {
    pub updates: Vec<FrameUpdate>,
    /// Canvas grows to at least this height so the lowest component plus
    /// the bottom margin stays visible.
    pub canvas_min_height: f64,
}

impl RenderPlan {
    /// Build the plan for an already-transformed component list.
    pub fn build(
        components: &[Component],
        breakpoint: Breakpoint,
        ratio: f64,
        config: &ResponsiveConfig,
    ) -> Self {
        let font_size = text_font_size(breakpoint, ratio, config);
        let updates = components
            .iter()
            .map(|c| FrameUpdate {
                id: c.id.clone(),
                x: c.x,
                y: c.y,
                w: c.w,
                h: c.h,
                z: c.z,
                font_size: c.kind.is_text().then_some(font_size),
            })
            .collect();

        let max_bottom = components.iter().map(Component::bottom).fold(0.0, f64::max);

        Self {
            updates,
            canvas_min_height: max_bottom + config.canvas_bottom_margin,
        }
    }

    /// Push every update into the sink. A sink that has no element for an
    /// id is a per-item skip, never a batch failure. Returns how many
    /// updates were applied.
    pub fn apply_to(&self, sink: &mut dyn RenderSink) -> usize {
        let mut applied = 0;
        for update in &self.updates {
            if sink.apply(update) {
                applied += 1;
            } else {
                tracing::warn!(id = %update.id, "render sink has no element for component, skipped");
            }
        }
        applied
    }
}

/// Text font size for a breakpoint and ratio. Scales with the ratio but
/// never above the tier's base size and never below the floor.
pub fn text_font_size(breakpoint: Breakpoint, ratio: f64, config: &ResponsiveConfig) -> f64 {
    (breakpoint.base_font_size(config) * ratio.min(1.0)).max(config.min_font_size)
}

/// Consumer side of a transform run: receives one update per component.
pub trait RenderSink {
    /// Apply one update. Return false when no element exists for the id;
    /// the batch continues without it.
    fn apply(&mut self, update: &FrameUpdate) -> bool;
}

/// A sink that records what it is given. Accepts every id unless
/// constructed with an explicit element set. Used by tests and by the CLI's
/// dry-run output.
#[derive(Debug, Default)]
pub struct RecordingSink {
    elements: Option<HashSet<String>>,
    pub applied: Vec<FrameUpdate>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the given ids count as existing elements.
    pub fn with_elements<I: IntoIterator<Item = String>>(ids: I) -> Self {
        Self {
            elements: Some(ids.into_iter().collect()),
            applied: Vec::new(),
        }
    }
}

impl RenderSink for RecordingSink {
    fn apply(&mut self, update: &FrameUpdate) -> bool {
        match &self.elements {
            Some(ids) if !ids.contains(&update.id) => false,
            _ => {
                self.applied.push(update.clone());
                true
            }
        }
    }
}
