//! Integration tests for the reflow transform pipeline.
//!
//! These exercise the full path from persisted JSON to transformed
//! geometry and render plans. They verify:
//! - documents parse leniently and round-trip unknown fields
//! - the transform holds its invariants across viewports
//! - intentional overlaps survive while accidental ones resolve
//! - render plans carry font sizing and canvas height
//! - the store reflows from the authoritative layout every time

use reflow::config::ResponsiveConfig;
use reflow::layout::{Breakpoint, ResponsiveEngine};
use reflow::model::{Component, ComponentKind, LayoutDocument};
use reflow::render::{RenderPlan, RecordingSink};
use reflow::store::LayoutStore;

// ─── Helpers ────────────────────────────────────────────────────

fn text(id: &str, x: f64, y: f64, w: f64, h: f64) -> Component {
    Component::with_rect(id, ComponentKind::Text { content: None }, x, y, w, h)
}

fn shape(id: &str, x: f64, y: f64, w: f64, h: f64) -> Component {
    Component::with_rect(id, ComponentKind::Shape { bg_color: None }, x, y, w, h)
}

fn image(id: &str, x: f64, y: f64, w: f64, h: f64) -> Component {
    Component::with_rect(id, ComponentKind::Image { image_path: None }, x, y, w, h)
}

/// A config where the chosen viewport width resolves to ratio 1.0 on
/// desktop: canvas width 1000, viewport 1360 leaves exactly 1000 available.
fn unit_ratio_setup() -> (ResponsiveEngine, f64) {
    let config = ResponsiveConfig::for_canvas(1000.0, 800.0);
    (ResponsiveEngine::with_config(config), 1360.0)
}

fn mixed_document() -> LayoutDocument {
    LayoutDocument {
        components: vec![
            text("comp-1", 80.0, 40.0, 700.0, 300.0),
            image("comp-2", 900.0, 60.0, 640.0, 400.0),
            shape("comp-3", 120.0, 500.0, 900.0, 420.0),
            text("comp-4", 160.0, 560.0, 640.0, 280.0),
            Component::with_rect(
                "comp-5",
                ComponentKind::Separator,
                80.0,
                1000.0,
                1600.0,
                2.0,
            ),
        ],
        editor_canvas_width: 1920.0,
        editor_canvas_height: 1080.0,
    }
}

// ─── Core scenarios ─────────────────────────────────────────────

#[test]
fn mobile_viewport_scales_text_to_its_minimum_width() {
    let doc = LayoutDocument {
        components: vec![text("c1", 0.0, 0.0, 300.0, 200.0)],
        editor_canvas_width: 1920.0,
        editor_canvas_height: 1080.0,
    };
    let engine = ResponsiveEngine::with_config(ResponsiveConfig::for_canvas(1920.0, 1080.0));
    assert_eq!(engine.breakpoint(768.0), Breakpoint::Mobile);
    let ratio = engine.scaling_ratio(768.0);
    assert!(ratio <= 0.6);

    let out = reflow::transform(&doc, 768.0);
    assert_eq!(out.len(), 1);
    // Minimum width dominates plain scaling at this ratio.
    assert_eq!(out[0].w, (300.0 * ratio).max(200.0));
}

#[test]
fn forced_width_reduction_buys_text_extra_height() {
    // At a 500px viewport the ratio floor (0.3) scales this text wider
    // than the available area: width must clamp and height must come out
    // strictly taller than plain scaling.
    let doc = LayoutDocument {
        components: vec![text("c1", 20.0, 0.0, 1800.0, 200.0)],
        editor_canvas_width: 1920.0,
        editor_canvas_height: 1080.0,
    };
    let out = reflow::transform(&doc, 500.0);
    let engine = ResponsiveEngine::with_config(ResponsiveConfig::for_canvas(1920.0, 1080.0));
    let ratio = engine.scaling_ratio(500.0);
    assert_eq!(ratio, 0.3);
    assert!(out[0].right() <= engine.available_width(500.0));
    assert!(out[0].h > 200.0 * ratio);
}

#[test]
fn four_percent_overlap_is_relocated_below_with_gap() {
    let (engine, viewport) = unit_ratio_setup();
    assert!((engine.scaling_ratio(viewport) - 1.0).abs() < 1e-9);
    let input = vec![
        shape("a", 0.0, 0.0, 100.0, 100.0),
        shape("b", 80.0, 80.0, 100.0, 100.0),
    ];
    let out = engine.transform(&input, viewport);
    assert_eq!(out[0].y, 0.0);
    assert_eq!(out[1].y, out[0].bottom() + 15.0);
}

#[test]
fn eighty_percent_overlap_is_preserved() {
    let (engine, viewport) = unit_ratio_setup();
    let input = vec![
        shape("a", 0.0, 0.0, 100.0, 100.0),
        shape("b", 10.0, 10.0, 100.0, 100.0),
    ];
    let out = engine.transform(&input, viewport);
    assert_eq!((out[0].x, out[0].y), (0.0, 0.0));
    assert_eq!((out[1].x, out[1].y), (10.0, 10.0));
}

#[test]
fn empty_layout_is_a_no_op() {
    let doc = LayoutDocument::default();
    let out = reflow::transform(&doc, 768.0);
    assert!(out.is_empty());
    let plan = RenderPlan::build(&out, Breakpoint::Mobile, 0.6, &ResponsiveConfig::default());
    assert_eq!(plan.canvas_min_height, 100.0);
}

#[test]
fn unknown_type_transforms_with_generic_fallbacks() {
    let doc = LayoutDocument::from_json(
        r#"[{"id":"w1","type":"widget","x":40,"y":40,"w":50,"h":30,"z":0}]"#,
    )
    .unwrap();
    let out = reflow::transform(&doc, 768.0);
    assert_eq!(out.len(), 1);
    assert!(out[0].w >= 100.0);
    assert!(out[0].h >= 100.0);
    assert!(out[0].x >= 0.0 && out[0].y >= 0.0);
    assert!(out[0].w.is_finite() && out[0].h.is_finite());
}

// ─── Transform properties ───────────────────────────────────────

#[test]
fn repeated_transform_runs_are_identical() {
    let doc = mixed_document();
    for viewport in [500.0, 768.0, 1024.0, 1440.0, 2560.0] {
        let first = reflow::transform(&doc, viewport);
        let second = reflow::transform(&doc, viewport);
        assert_eq!(first, second, "drift at viewport {viewport}");
    }
}

#[test]
fn minimum_sizes_and_origins_hold_across_viewports() {
    let doc = mixed_document();
    for viewport in [320.0, 500.0, 768.0, 1024.0, 1440.0, 1920.0, 3840.0] {
        for c in reflow::transform(&doc, viewport) {
            let (min_w, min_h) = c.kind.min_size();
            assert!(c.w >= min_w, "{} w {} below {min_w} at {viewport}", c.id, c.w);
            assert!(c.h >= min_h, "{} h {} below {min_h} at {viewport}", c.id, c.h);
            assert!(c.x >= 0.0 && c.y >= 0.0, "{} origin negative at {viewport}", c.id);
        }
    }
}

#[test]
fn output_order_follows_ascending_original_y() {
    let doc = mixed_document();
    let out = reflow::transform(&doc, 1024.0);
    let ids: Vec<&str> = out.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["comp-1", "comp-2", "comp-3", "comp-4", "comp-5"]);
}

#[test]
fn intentional_overlap_survives_rescaling() {
    // comp-3/comp-4 in the fixture share well over 15% of the smaller
    // rectangle; after any transform they must still overlap.
    let doc = mixed_document();
    for viewport in [500.0, 768.0, 1024.0, 1920.0] {
        let out = reflow::transform(&doc, viewport);
        let a = out.iter().find(|c| c.id == "comp-3").unwrap();
        let b = out.iter().find(|c| c.id == "comp-4").unwrap();
        let overlap_x = (a.right().min(b.right()) - a.x.max(b.x)).max(0.0);
        let overlap_y = (a.bottom().min(b.bottom()) - a.y.max(b.y)).max(0.0);
        assert!(
            overlap_x * overlap_y > 0.0,
            "authored stack broken at viewport {viewport}"
        );
    }
}

#[test]
fn transform_carries_unknown_fields_through() {
    let doc = LayoutDocument::from_json(
        r#"[{"id":"comp-1","type":"text","x":0,"y":0,"w":300,"h":200,"z":0,
             "content":"<p>x</p>","custom_css":"opacity:0.9;","revision":7}]"#,
    )
    .unwrap();
    let out = reflow::transform(&doc, 768.0);
    let value = serde_json::to_value(&out[0]).unwrap();
    assert_eq!(value["custom_css"], "opacity:0.9;");
    assert_eq!(value["revision"], 7);
    assert_eq!(value["content"], "<p>x</p>");
}

// ─── Render plan ────────────────────────────────────────────────

#[test]
fn render_plan_covers_every_component_and_sizes_canvas() {
    let doc = mixed_document();
    let engine = ResponsiveEngine::with_config(ResponsiveConfig::for_canvas(1920.0, 1080.0));
    let out = engine.transform(&doc.components, 1024.0);
    let plan = RenderPlan::build(
        &out,
        engine.breakpoint(1024.0),
        engine.scaling_ratio(1024.0),
        engine.config(),
    );
    assert_eq!(plan.updates.len(), out.len());
    let max_bottom = out.iter().map(|c| c.bottom()).fold(0.0, f64::max);
    assert_eq!(plan.canvas_min_height, max_bottom + 100.0);

    // Text gets a font size, floored at 11px; nothing else does.
    for (update, component) in plan.updates.iter().zip(&out) {
        assert_eq!(update.font_size.is_some(), component.kind.is_text());
        if let Some(size) = update.font_size {
            assert!(size >= 11.0);
        }
    }
}

#[test]
fn sink_without_an_element_skips_just_that_component() {
    let doc = mixed_document();
    let out = reflow::transform(&doc, 768.0);
    let plan = RenderPlan::build(&out, Breakpoint::Mobile, 0.5, &ResponsiveConfig::default());
    let known = out
        .iter()
        .filter(|c| c.id != "comp-3")
        .map(|c| c.id.clone());
    let mut sink = RecordingSink::with_elements(known);
    let applied = plan.apply_to(&mut sink);
    assert_eq!(applied, out.len() - 1);
    assert!(sink.applied.iter().all(|u| u.id != "comp-3"));
}

// ─── Store ──────────────────────────────────────────────────────

#[test]
fn store_reflow_is_stable_across_breakpoint_round_trips() {
    let mut store = LayoutStore::new(mixed_document());
    let mobile_first = store.reflow(768.0).to_vec();
    store.reflow(1920.0);
    store.reflow(500.0);
    let mobile_again = store.reflow(768.0).to_vec();
    assert_eq!(mobile_first, mobile_again);
}

#[test]
fn store_generates_fresh_ids_for_new_components() {
    let mut store = LayoutStore::new(mixed_document());
    let id = store.add(ComponentKind::Table { content: None }, 100.0, 1100.0);
    assert_eq!(id, "comp-6");
    assert_eq!(store.components().len(), 6);
    assert_eq!(store.get(&id).unwrap().z, 5);
}

#[test]
fn store_debug_info_matches_engine_resolution() {
    let mut store = LayoutStore::new(mixed_document());
    store.reflow(768.0);
    let info = store.debug_info();
    assert_eq!(info.breakpoint, Breakpoint::Mobile);
    assert_eq!(info.editor_canvas_width, 1920.0);
    assert_eq!(info.available_width, 688.0);
    assert_eq!(info.components_count, 5);
    assert!(info.ratio >= 0.3 && info.ratio <= 0.6);
}

// ─── JSON surface ───────────────────────────────────────────────

#[test]
fn transform_json_end_to_end() {
    let json = r#"{
        "editor_canvas_width": 1920,
        "editor_canvas_height": 1080,
        "components": [
            {"id":"comp-1","type":"text","x":0,"y":0,"w":300,"h":200,"z":0},
            {"id":"comp-2","type":"shape","x":500,"y":600,"w":400,"h":200,"z":1}
        ]
    }"#;
    let out = reflow::transform_json(json, 768.0).unwrap();
    let components: Vec<Component> = serde_json::from_str(&out).unwrap();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].id, "comp-1");
}

#[test]
fn malformed_record_does_not_sink_the_batch() {
    let json = r#"[
        {"id":"good","type":"shape","x":0,"y":0,"w":100,"h":50,"z":0},
        {"id":"bad","type":"text","x":"garbage","w":null,"h":-20},
        {"id":"also-good","type":"image","x":300,"y":600,"w":200,"h":150,"z":1}
    ]"#;
    let out = reflow::transform_json(json, 1024.0).unwrap();
    let components: Vec<Component> = serde_json::from_str(&out).unwrap();
    assert_eq!(components.len(), 3);
    let bad = components.iter().find(|c| c.id == "bad").unwrap();
    assert!(bad.w >= 200.0 && bad.h >= 80.0);
}

#[test]
fn truncated_json_reports_a_hint() {
    let err = reflow::transform_json(r#"[{"id":"a","#, 768.0).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Failed to parse"));
    assert!(message.contains("Hint:"));
}
