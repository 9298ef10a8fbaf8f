//! Tunable constants for the responsive transform.
//!
//! Everything the transform consults lives here: canvas geometry, breakpoint
//! tiers, ratio clamps, and the two overlap heuristics (pixel tolerance and
//! the intentional-overlap area share). The heuristic thresholds are plain
//! fields rather than literals so callers can tune them per deployment.

use serde::{Deserialize, Serialize};

/// Viewport-width tiers, in pixels. A viewport is classified into the first
/// tier whose upper bound it does not exceed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Breakpoints {
    pub mobile: f64,
    pub tablet: f64,
    pub desktop: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile: 768.0,
            tablet: 1024.0,
            desktop: 1440.0,
        }
    }
}

/// Configuration for the responsive layout transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsiveConfig {
    /// Width of the authoring canvas, in pixels. All geometry in a persisted
    /// layout is expressed relative to this width.
    pub editor_canvas_width: f64,
    /// Height of the authoring canvas, in pixels.
    pub editor_canvas_height: f64,

    /// Fixed left margin reserved for chrome (sidebar) on tablet and up.
    pub content_margin_left: f64,
    /// Horizontal padding applied on both sides of the content area.
    pub content_padding: f64,

    pub breakpoints: Breakpoints,

    /// Vertical gap inserted between components when an accidental overlap
    /// is resolved by pushing one down.
    pub component_gap: f64,

    /// Pixel slack for the rectangle-overlap test, so that components whose
    /// edges merely touch are not treated as overlapping.
    pub overlap_tolerance: f64,
    /// An overlap covering more than this fraction of the smaller of the two
    /// rectangles is judged intentional and preserved.
    pub intentional_overlap_share: f64,

    /// Scaling-ratio floor. Keeps output finite and readable on degenerate
    /// viewports; components may overflow horizontally instead.
    pub min_ratio: f64,
    /// Ratio ceiling on mobile.
    pub mobile_max_ratio: f64,
    /// Ratio ceiling on tablet.
    pub tablet_max_ratio: f64,

    /// Extra space below the lowest component when sizing the canvas.
    pub canvas_bottom_margin: f64,

    /// Text never renders below this font size, whatever the ratio.
    pub min_font_size: f64,
    /// Base text font size on desktop and wide viewports.
    pub desktop_font_size: f64,
    /// Base text font size on tablet.
    pub tablet_font_size: f64,
    /// Base text font size on mobile.
    pub mobile_font_size: f64,
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            editor_canvas_width: 1920.0,
            editor_canvas_height: 1080.0,
            content_margin_left: 280.0,
            content_padding: 40.0,
            breakpoints: Breakpoints::default(),
            component_gap: 15.0,
            overlap_tolerance: 3.0,
            intentional_overlap_share: 0.15,
            min_ratio: 0.3,
            mobile_max_ratio: 0.6,
            tablet_max_ratio: 0.8,
            canvas_bottom_margin: 100.0,
            min_font_size: 11.0,
            desktop_font_size: 15.0,
            tablet_font_size: 14.0,
            mobile_font_size: 13.0,
        }
    }
}

impl ResponsiveConfig {
    /// A config whose canvas dimensions match the given authoring canvas.
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self {
            editor_canvas_width: width,
            editor_canvas_height: height,
            ..Self::default()
        }
    }
}
