//! # Reflow
//!
//! A breakpoint-aware layout transform engine for free-form page designs.
//!
//! Page layouts get authored on a wide fixed canvas, with components at
//! absolute positions, and designers deliberately stacking elements for
//! visual effect. Rendering those layouts on narrower viewports is where
//! most engines go wrong: naive scaling either un-stacks every authored
//! overlap or lets squeezed text clip its box.
//!
//! Reflow rescales a layout to a viewport while keeping both promises:
//! **intentional overlaps survive, compressed text gets room to reflow.**
//! The transform is a pure function over the component list; it can re-run
//! on every breakpoint change without accumulating drift.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    — Component list: typed rectangles + opaque payload
//!       ↓
//!   [layout]   — Breakpoint resolve → scale → selective redistribute
//!       ↓
//!   [render]   — Frame updates, font sizing, canvas height
//! ```
//!
//! [`store`] owns layout state and identity; [`viewport`] debounces resize
//! signals into at most one pending transform run.

pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod store;
pub mod viewport;

use config::ResponsiveConfig;
use error::ReflowError;
use layout::ResponsiveEngine;
use model::{Component, LayoutDocument};

/// Transform a layout document for a viewport width.
///
/// This is the primary entry point. The document's own canvas dimensions
/// drive the scaling ratio; the returned components replace whatever is
/// currently rendered and the document stays untouched as the source of
/// truth.
pub fn transform(document: &LayoutDocument, viewport_width: f64) -> Vec<Component> {
    let config = ResponsiveConfig::for_canvas(
        document.editor_canvas_width,
        document.editor_canvas_height,
    );
    ResponsiveEngine::with_config(config).transform(&document.components, viewport_width)
}

/// Transform a layout described as JSON, returning the transformed
/// component list as JSON.
pub fn transform_json(json: &str, viewport_width: f64) -> Result<String, ReflowError> {
    let document = LayoutDocument::from_json(json)?;
    let components = transform(&document, viewport_width);
    Ok(serde_json::to_string_pretty(&components)?)
}
