//! Selective overlap resolution.
//!
//! After scaling, components can collide vertically that never touched on
//! the authoring canvas. But not every overlap is a collision: designers
//! stack components on purpose (a caption over an image, text on a shape).
//! The classifier keeps those and only un-stacks the accidental ones.
//!
//! The judgement call: an overlap covering more than a configured share of
//! the smaller rectangle (15% by default) is intentional. Small corner
//! clips are accidents introduced by scaling and get pushed apart.

use crate::config::ResponsiveConfig;
use crate::model::Component;

use super::scale::Scaled;

/// Axis-aligned overlap test with pixel tolerance, so rectangles whose
/// edges merely touch do not count.
pub(crate) fn rects_overlap(a: &Component, b: &Component, tolerance: f64) -> bool {
    !(a.right() < b.x + tolerance
        || b.right() < a.x + tolerance
        || a.bottom() < b.y + tolerance
        || b.bottom() < a.y + tolerance)
}

/// Area of the intersection of two components, zero when disjoint.
pub(crate) fn overlap_area(a: &Component, b: &Component) -> f64 {
    let overlap_x = (a.right().min(b.right()) - a.x.max(b.x)).max(0.0);
    let overlap_y = (a.bottom().min(b.bottom()) - a.y.max(b.y)).max(0.0);
    overlap_x * overlap_y
}

/// Whether an overlap looks authored rather than accidental: the shared
/// area exceeds the configured fraction of the smaller component.
pub(crate) fn is_intentional(a: &Component, b: &Component, config: &ResponsiveConfig) -> bool {
    if !rects_overlap(a, b, config.overlap_tolerance) {
        return false;
    }
    let min_area = a.area().min(b.area());
    overlap_area(a, b) > min_area * config.intentional_overlap_share
}

/// Walk the scaled components in order and resolve accidental collisions by
/// pushing the later component below the earlier one, with the configured
/// gap. Intentional overlaps are left alone. A component keeps being checked
/// against every already-placed component, so one push can cascade into
/// another.
///
/// Scratch state is dropped here; only clean components come out.
pub(crate) fn redistribute(scaled: Vec<Scaled>, config: &ResponsiveConfig) -> Vec<Component> {
    let mut placed: Vec<Component> = Vec::with_capacity(scaled.len());

    for entry in scaled {
        let mut current = entry.component;
        for existing in &placed {
            if !rects_overlap(&current, existing, config.overlap_tolerance) {
                continue;
            }
            if is_intentional(&current, existing, config) {
                tracing::debug!(
                    current = %current.id,
                    existing = %existing.id,
                    "intentional overlap preserved"
                );
            } else {
                let new_y = existing.bottom() + config.component_gap;
                tracing::debug!(
                    id = %current.id,
                    from = format_args!("{:.0}", current.y),
                    to = format_args!("{:.0}", new_y),
                    "accidental collision, pushed down"
                );
                current.y = new_y;
            }
        }
        placed.push(current);
    }

    placed
}
