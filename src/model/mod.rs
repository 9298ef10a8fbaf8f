//! # Layout Component Model
//!
//! The input representation for the transform engine. A layout is a flat list
//! of components: typed, positioned rectangles authored on a fixed-width
//! canvas. This mirrors the persisted document format produced by the page
//! editor: one JSON object per component with `id`, `type`, geometry fields,
//! a stacking index, and type-specific payload fields.
//!
//! Two properties of that wire format shape the code here:
//!
//! * **Leniency.** Geometry values come from scraped element styles and may
//!   be missing, stringly typed ("420px" era data), or garbage. A single bad
//!   record must never sink the whole document, so geometry parsing accepts
//!   numbers and numeric strings and normalizes everything else to the
//!   type's minimum rectangle at origin.
//! * **Passthrough.** Documents accumulate fields this engine knows nothing
//!   about (editor payloads, custom CSS, future additions). Unrecognized
//!   fields are carried in [`Component::extra`] and written back verbatim.
//!
//! The transform only ever reads and writes `x`, `y`, `w`, `h`; everything
//! else is opaque cargo.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ReflowError;

/// A positioned, typed rectangle: one visual element of a page layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Stable unique identifier, `comp-N` for locally generated components.
    pub id: String,
    /// The component type plus its typed payload.
    pub kind: ComponentKind,
    /// Left edge in layout-space pixels.
    pub x: f64,
    /// Top edge in layout-space pixels.
    pub y: f64,
    /// Width in pixels.
    pub w: f64,
    /// Height in pixels.
    pub h: f64,
    /// Stacking order; ties break by array position.
    pub z: i64,
    /// Fields this engine does not model, preserved for round-tripping.
    pub extra: Map<String, Value>,
}

/// The component type tag plus the payload fields that travel with it.
///
/// Payload is opaque to the transform; it exists so documents round-trip and
/// so per-type behavior (minimum size, height-adjust factor) hangs off one
/// place instead of string comparisons scattered through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    /// Rich text, stored as HTML.
    Text { content: Option<String> },
    /// A single image by storage path.
    Image { image_path: Option<String> },
    /// An ordered set of image paths.
    Gallery { images: Vec<String> },
    /// A locally hosted video by storage path.
    Video { video_path: Option<String> },
    /// An embedded YouTube player.
    Youtube { youtube_id: Option<String> },
    /// A filled rectangle.
    Shape { bg_color: Option<String> },
    /// Table markup, stored as HTML.
    Table { content: Option<String> },
    /// A horizontal rule.
    Separator,
    /// Any type tag this engine does not recognize. Payload fields stay in
    /// [`Component::extra`]; geometry is handled with generic fallbacks.
    Unknown { tag: String },
}

/// Minimum size applied to components whose type is not recognized.
pub const GENERIC_MIN_SIZE: (f64, f64) = (100.0, 100.0);
/// Height-adjust factor applied to components whose type is not recognized.
pub const GENERIC_HEIGHT_FACTOR: f64 = 1.5;

impl ComponentKind {
    /// The wire-format type tag.
    pub fn tag(&self) -> &str {
        match self {
            ComponentKind::Text { .. } => "text",
            ComponentKind::Image { .. } => "image",
            ComponentKind::Gallery { .. } => "gallery",
            ComponentKind::Video { .. } => "video",
            ComponentKind::Youtube { .. } => "youtube",
            ComponentKind::Shape { .. } => "shape",
            ComponentKind::Table { .. } => "table",
            ComponentKind::Separator => "separator",
            ComponentKind::Unknown { tag } => tag,
        }
    }

    /// Smallest rectangle this type stays legible at. Enforced after every
    /// transform.
    pub fn min_size(&self) -> (f64, f64) {
        match self {
            ComponentKind::Text { .. } => (200.0, 80.0),
            ComponentKind::Image { .. } => (150.0, 100.0),
            ComponentKind::Gallery { .. } => (250.0, 200.0),
            ComponentKind::Video { .. } => (300.0, 200.0),
            ComponentKind::Youtube { .. } => (300.0, 200.0),
            ComponentKind::Shape { .. } => (100.0, 50.0),
            ComponentKind::Table { .. } => (250.0, 150.0),
            ComponentKind::Separator => (100.0, 2.0),
            ComponentKind::Unknown { .. } => GENERIC_MIN_SIZE,
        }
    }

    /// How much extra vertical room this type needs when its width gets
    /// squeezed beyond plain scaling. Text reflows worst; shapes barely
    /// care; separators not at all.
    pub fn height_factor(&self) -> f64 {
        match self {
            ComponentKind::Text { .. } => 3.0,
            ComponentKind::Table { .. } => 2.5,
            ComponentKind::Image { .. } | ComponentKind::Gallery { .. } => 1.0,
            ComponentKind::Video { .. } | ComponentKind::Youtube { .. } => 0.8,
            ComponentKind::Shape { .. } => 0.3,
            ComponentKind::Separator => 0.0,
            ComponentKind::Unknown { .. } => GENERIC_HEIGHT_FACTOR,
        }
    }

    /// Size a freshly placed component of this type gets in the editor.
    pub fn default_size(&self) -> (f64, f64) {
        match self {
            ComponentKind::Separator => (800.0, 2.0),
            ComponentKind::Gallery { .. }
            | ComponentKind::Video { .. }
            | ComponentKind::Youtube { .. } => (560.0, 315.0),
            _ => (300.0, 200.0),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ComponentKind::Text { .. })
    }

    /// Build a kind from a wire tag, claiming payload fields from the raw
    /// record. Fields of the wrong JSON type are left behind so they survive
    /// in `extra`.
    fn from_record(tag: &str, fields: &mut Map<String, Value>) -> Self {
        match tag {
            "text" => ComponentKind::Text {
                content: take_string(fields, "content"),
            },
            "image" => ComponentKind::Image {
                image_path: take_string(fields, "image_path"),
            },
            "gallery" => ComponentKind::Gallery {
                images: take_string_array(fields, "images"),
            },
            "video" => ComponentKind::Video {
                video_path: take_string(fields, "video_path"),
            },
            "youtube" => ComponentKind::Youtube {
                youtube_id: take_string(fields, "youtube_id"),
            },
            "shape" => ComponentKind::Shape {
                bg_color: take_string(fields, "bg_color"),
            },
            "table" => ComponentKind::Table {
                content: take_string(fields, "content"),
            },
            "separator" => ComponentKind::Separator,
            other => ComponentKind::Unknown {
                tag: other.to_string(),
            },
        }
    }

    /// Write this kind's payload fields into an output record.
    fn write_payload(&self, out: &mut Map<String, Value>) {
        match self {
            ComponentKind::Text { content } | ComponentKind::Table { content } => {
                if let Some(c) = content {
                    out.insert("content".into(), Value::String(c.clone()));
                }
            }
            ComponentKind::Image { image_path } => {
                if let Some(p) = image_path {
                    out.insert("image_path".into(), Value::String(p.clone()));
                }
            }
            ComponentKind::Gallery { images } => {
                out.insert(
                    "images".into(),
                    Value::Array(images.iter().cloned().map(Value::String).collect()),
                );
            }
            ComponentKind::Video { video_path } => {
                if let Some(p) = video_path {
                    out.insert("video_path".into(), Value::String(p.clone()));
                }
            }
            ComponentKind::Youtube { youtube_id } => {
                if let Some(v) = youtube_id {
                    out.insert("youtube_id".into(), Value::String(v.clone()));
                }
            }
            ComponentKind::Shape { bg_color } => {
                if let Some(c) = bg_color {
                    out.insert("bg_color".into(), Value::String(c.clone()));
                }
            }
            ComponentKind::Separator | ComponentKind::Unknown { .. } => {}
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Component {
    /// Create a component at the given position with the type's default
    /// editor size. Stacking order starts at 0; callers that own a layout
    /// assign it (see `LayoutStore::add`).
    pub fn new(id: impl Into<String>, kind: ComponentKind, x: f64, y: f64) -> Self {
        let (w, h) = kind.default_size();
        Self {
            id: id.into(),
            kind,
            x,
            y,
            w,
            h,
            z: 0,
            extra: Map::new(),
        }
    }

    /// Same as [`Component::new`] but with an explicit rectangle.
    pub fn with_rect(
        id: impl Into<String>,
        kind: ComponentKind,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            x,
            y,
            w,
            h,
            z: 0,
            extra: Map::new(),
        }
    }

    /// Bottom edge (`y + h`).
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Right edge (`x + w`).
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Rectangle area.
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Repair malformed geometry in place. Non-finite or negative positions
    /// clamp to the origin; non-finite or non-positive sizes fall back to
    /// the type minimum. Returns true when anything changed.
    pub fn normalize(&mut self) -> bool {
        let (min_w, min_h) = self.kind.min_size();
        let mut changed = false;
        if !self.x.is_finite() || self.x < 0.0 {
            self.x = 0.0;
            changed = true;
        }
        if !self.y.is_finite() || self.y < 0.0 {
            self.y = 0.0;
            changed = true;
        }
        if !self.w.is_finite() || self.w <= 0.0 {
            self.w = min_w;
            changed = true;
        }
        if !self.h.is_finite() || self.h <= 0.0 {
            self.h = min_h;
            changed = true;
        }
        if changed {
            tracing::warn!(
                id = %self.id,
                kind = %self.kind,
                "normalized malformed component geometry"
            );
        }
        changed
    }
}

// ── Wire format ─────────────────────────────────────────────────
//
// The persisted record is flat: {"id": ..., "type": "text", "x": ..., ...,
// "content": ...}. Payload routing between `kind` and `extra` plus lenient
// geometry parsing make this a hand-written (de)serializer rather than a
// derive.

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = Map::new();
        record.insert("id".into(), Value::String(self.id.clone()));
        record.insert("type".into(), Value::String(self.kind.tag().to_string()));
        insert_number(&mut record, "x", self.x);
        insert_number(&mut record, "y", self.y);
        insert_number(&mut record, "w", self.w);
        insert_number(&mut record, "h", self.h);
        record.insert("z".into(), Value::from(self.z));
        self.kind.write_payload(&mut record);
        for (k, v) in &self.extra {
            record.entry(k.clone()).or_insert_with(|| v.clone());
        }
        let mut map = serializer.serialize_map(Some(record.len()))?;
        for (k, v) in &record {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::deserialize(deserializer)?;
        let id = take_string(&mut fields, "id").unwrap_or_default();
        let tag = take_string(&mut fields, "type").unwrap_or_else(|| "unknown".to_string());
        let kind = ComponentKind::from_record(&tag, &mut fields);
        let x = take_dimension(&mut fields, "x");
        let y = take_dimension(&mut fields, "y");
        let w = take_dimension(&mut fields, "w");
        let h = take_dimension(&mut fields, "h");
        let z = take_integer(&mut fields, "z").unwrap_or(0);
        let mut component = Component {
            id,
            kind,
            x,
            y,
            w,
            h,
            z,
            extra: fields,
        };
        component.normalize();
        Ok(component)
    }
}

/// Geometry serializes as an integer when it is whole, so documents that
/// came in with integer pixels go back out with integer pixels.
fn insert_number(record: &mut Map<String, Value>, key: &str, v: f64) {
    let value = if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 {
        Value::from(v as i64)
    } else {
        serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or_else(|| Value::from(0))
    };
    record.insert(key.into(), value);
}

/// Remove `key` only when it holds a string; other JSON types are left in
/// place so they pass through untouched.
fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    if matches!(fields.get(key), Some(Value::String(_))) {
        match fields.remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    } else {
        None
    }
}

fn take_string_array(fields: &mut Map<String, Value>, key: &str) -> Vec<String> {
    if matches!(fields.get(key), Some(Value::Array(_))) {
        match fields.remove(key) {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    } else {
        Vec::new()
    }
}

/// Lenient geometry parse: accepts numbers and numeric strings (old
/// documents persisted scraped style values). Anything else yields NaN,
/// which [`Component::normalize`] repairs.
fn take_dimension(fields: &mut Map<String, Value>, key: &str) -> f64 {
    match fields.remove(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => s.trim().trim_end_matches("px").parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn take_integer(fields: &mut Map<String, Value>, key: &str) -> Option<i64> {
    match fields.remove(key) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A persisted layout: the component list plus the authoring-canvas
/// dimensions the geometry was authored against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutDocument {
    pub components: Vec<Component>,
    pub editor_canvas_width: f64,
    pub editor_canvas_height: f64,
}

impl Default for LayoutDocument {
    fn default() -> Self {
        Self {
            components: Vec::new(),
            editor_canvas_width: 1920.0,
            editor_canvas_height: 1080.0,
        }
    }
}

impl LayoutDocument {
    /// Parse a document from JSON. Accepts both the object form
    /// (`{"components": [...], "editor_canvas_width": ...}`) and the bare
    /// component array older deployments persisted.
    pub fn from_json(json: &str) -> Result<Self, ReflowError> {
        let value: Value = serde_json::from_str(json)?;
        if value.is_array() {
            let components: Vec<Component> = serde_json::from_value(value)?;
            return Ok(Self {
                components,
                ..Self::default()
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, ReflowError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
