//! Per-component scaling with minimum-size enforcement and height
//! compensation.
//!
//! Plain uniform scaling is not enough: when a component's width gets
//! squeezed past the ratio (by its type minimum or by the right edge of the
//! available area), its content reflows taller than the scaled height
//! allows. Text clips worst. So any width compression beyond plain scaling
//! buys the component extra height, weighted by its type's height-adjust
//! factor.

use crate::config::ResponsiveConfig;
use crate::model::Component;

/// Left margin components keep when shifted or clamped against the right
/// edge of the available area.
const EDGE_MARGIN: f64 = 10.0;
/// Components closer to the left edge than this are not shifted left to
/// resolve overflow; their width is clamped directly.
const SHIFT_THRESHOLD: f64 = 20.0;
/// Width compression below this fraction of plain scaling triggers the
/// height boost.
const COMPRESSION_TRIGGER: f64 = 0.98;

/// A scaled component plus the scratch state the repositioning pass and
/// diagnostics want. Dropped at the end of the transform, so scratch never
/// reaches persisted output.
#[derive(Debug, Clone)]
pub(crate) struct Scaled {
    pub component: Component,
    /// Scaled top edge before any repositioning.
    pub original_y: f64,
    /// Scaled bottom edge before the height boost.
    pub original_bottom: f64,
    /// Height added by width-compression compensation.
    pub height_delta: f64,
}

/// Scale one component to the resolved ratio.
///
/// Order of operations: uniform scale with minimum clamp, horizontal
/// overflow correction (shift left, then clamp width), then the height
/// boost when the final width ended up compressed beyond plain scaling.
pub(crate) fn scale_component(
    component: &Component,
    ratio: f64,
    available_width: f64,
    config: &ResponsiveConfig,
) -> Scaled {
    let (min_w, min_h) = component.kind.min_size();
    let mut scaled = component.clone();

    scaled.x = (component.x * ratio).max(0.0);
    scaled.y = (component.y * ratio).max(0.0);
    let plain_w = component.w * ratio;
    let plain_h = component.h * ratio;
    scaled.w = plain_w.max(min_w);
    scaled.h = plain_h.max(min_h);

    let mut width_was_reduced = false;
    if scaled.right() > available_width {
        let overflow = scaled.right() - available_width;
        if scaled.x > SHIFT_THRESHOLD {
            let shift = overflow.min(scaled.x - EDGE_MARGIN);
            scaled.x -= shift;
        }
        if scaled.right() > available_width {
            scaled.w = (available_width - scaled.x - EDGE_MARGIN).max(min_w);
            width_was_reduced = true;
        }
    }

    // How much the width was squeezed beyond plain scaling. A minimum-width
    // clamp can push this above 1; cap it so the boost only ever adds
    // height.
    let compression = if plain_w > f64::EPSILON {
        (scaled.w / plain_w).min(1.0)
    } else {
        1.0
    };

    let mut height_delta = 0.0;
    if compression < COMPRESSION_TRIGGER || width_was_reduced {
        let factor = component.kind.height_factor();
        let multiplier = 1.0 + (1.0 / compression - 1.0) * factor;
        let boosted = (plain_h * multiplier).max(min_h);
        height_delta = (boosted - scaled.h).max(0.0);
        scaled.h = boosted;
        tracing::debug!(
            id = %component.id,
            kind = %component.kind,
            compression = format_args!("{:.0}%", compression * 100.0),
            added = format_args!("{:+.0}px", height_delta),
            "height compensated for width compression"
        );
    }

    Scaled {
        original_y: component.y * ratio,
        original_bottom: (component.y + component.h) * ratio,
        height_delta,
        component: scaled,
    }
}
