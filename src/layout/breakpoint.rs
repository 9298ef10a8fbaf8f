//! Breakpoint classification and scaling-ratio resolution.
//!
//! A viewport width maps to one of four discrete tiers, and the tier decides
//! both how much horizontal chrome to subtract and how far the scaling ratio
//! may climb. Mobile and tablet cap the ratio below 1 so layouts keep some
//! breathing room; desktop and wide scale freely.

use serde::{Deserialize, Serialize};

use crate::config::ResponsiveConfig;

/// Discrete viewport-width tier driving scaling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
    Wide,
}

impl Breakpoint {
    /// Classify a viewport width. Bounds are inclusive: a 768px viewport is
    /// still mobile with the default tiers.
    pub fn for_width(viewport_width: f64, config: &ResponsiveConfig) -> Self {
        let tiers = &config.breakpoints;
        if viewport_width <= tiers.mobile {
            Breakpoint::Mobile
        } else if viewport_width <= tiers.tablet {
            Breakpoint::Tablet
        } else if viewport_width <= tiers.desktop {
            Breakpoint::Desktop
        } else {
            Breakpoint::Wide
        }
    }

    /// Base text font size for this tier.
    pub fn base_font_size(&self, config: &ResponsiveConfig) -> f64 {
        match self {
            Breakpoint::Mobile => config.mobile_font_size,
            Breakpoint::Tablet => config.tablet_font_size,
            Breakpoint::Desktop | Breakpoint::Wide => config.desktop_font_size,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Mobile => "mobile",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Desktop => "desktop",
            Breakpoint::Wide => "wide",
        }
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width left for content after chrome. Mobile drops the sidebar margin and
/// keeps only the padding; every other tier loses both.
pub fn available_width(viewport_width: f64, breakpoint: Breakpoint, config: &ResponsiveConfig) -> f64 {
    if breakpoint == Breakpoint::Mobile {
        viewport_width - config.content_padding * 2.0
    } else {
        viewport_width - config.content_margin_left - config.content_padding * 2.0
    }
}

/// Resolve the scaling ratio for an available width.
///
/// Raw ratio is available width over the authoring-canvas width, capped per
/// tier (mobile and tablet only) and floored at `min_ratio`. The floor also
/// absorbs degenerate inputs: a zero canvas width or a negative available
/// width still yields a finite, positive ratio.
pub fn scaling_ratio(available_width: f64, breakpoint: Breakpoint, config: &ResponsiveConfig) -> f64 {
    let mut ratio = available_width / config.editor_canvas_width;
    if !ratio.is_finite() {
        return config.min_ratio;
    }
    match breakpoint {
        Breakpoint::Mobile => ratio = ratio.min(config.mobile_max_ratio),
        Breakpoint::Tablet => ratio = ratio.min(config.tablet_max_ratio),
        Breakpoint::Desktop | Breakpoint::Wide => {}
    }
    ratio.max(config.min_ratio)
}
