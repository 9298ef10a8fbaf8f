//! Layout ownership and identity.
//!
//! A [`LayoutStore`] is the single owner of a page's state: the
//! authoritative component list as authored, the list currently rendered,
//! and the id generator. Nothing here is ambient; callers hold the store
//! and pass it where it is needed.
//!
//! The authoritative list is the source of truth for every reflow. The
//! rendered list is always a fresh transform of it, never transformed
//! again, which is what keeps repeated breakpoint changes from
//! accumulating drift.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::ResponsiveConfig;
use crate::layout::{ResponsiveEngine, TransformInfo};
use crate::model::{Component, ComponentKind, LayoutDocument};

const ID_PREFIX: &str = "comp-";
const MAX_ID_ATTEMPTS: u32 = 10_000;

/// Owner of one page layout: authoritative components, rendered
/// components, and id generation.
#[derive(Debug)]
pub struct LayoutStore {
    engine: ResponsiveEngine,
    components: Vec<Component>,
    rendered: Vec<Component>,
    counter: u64,
    used_ids: HashSet<String>,
    last_viewport_width: f64,
}

impl LayoutStore {
    /// Build a store from a persisted document. The engine's canvas
    /// dimensions come from the document; the id counter seeds past the
    /// largest `comp-N` already present so re-opened layouts never hand
    /// out duplicate ids.
    pub fn new(document: LayoutDocument) -> Self {
        let config = ResponsiveConfig::for_canvas(
            document.editor_canvas_width,
            document.editor_canvas_height,
        );
        Self::with_config(document, config)
    }

    pub fn with_config(document: LayoutDocument, config: ResponsiveConfig) -> Self {
        let counter = document
            .components
            .iter()
            .filter_map(|c| c.id.strip_prefix(ID_PREFIX))
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let used_ids = document.components.iter().map(|c| c.id.clone()).collect();
        let last_viewport_width = config.editor_canvas_width;
        Self {
            engine: ResponsiveEngine::with_config(config),
            components: document.components,
            rendered: Vec::new(),
            counter,
            used_ids,
            last_viewport_width,
        }
    }

    /// The authoritative, author-space component list.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The components as last transformed for rendering.
    pub fn rendered(&self) -> &[Component] {
        &self.rendered
    }

    pub fn engine(&self) -> &ResponsiveEngine {
        &self.engine
    }

    /// Next free `comp-N` id. The counter is monotonic; a used-id set
    /// guards against collisions with ids a document brought in, with a
    /// bounded retry before falling back to a timestamped id.
    pub fn next_id(&mut self) -> String {
        for _ in 0..MAX_ID_ATTEMPTS {
            self.counter += 1;
            let id = format!("{ID_PREFIX}{}", self.counter);
            if self.used_ids.insert(id.clone()) {
                return id;
            }
        }
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let id = format!("{ID_PREFIX}{millis}-{}", self.counter);
        self.used_ids.insert(id.clone());
        tracing::warn!(%id, "id counter exhausted retries, using timestamped id");
        id
    }

    /// Place a new component of the given kind at a position, with the
    /// kind's default editor size and the next stacking index. Returns the
    /// new component's id.
    pub fn add(&mut self, kind: ComponentKind, x: f64, y: f64) -> String {
        let id = self.next_id();
        let mut component = Component::new(id.clone(), kind, x, y);
        component.z = self.components.len() as i64;
        self.components.push(component);
        id
    }

    /// Remove a component by id. The id stays reserved so it is never
    /// reused within this layout's lifetime.
    pub fn remove(&mut self, id: &str) -> Option<Component> {
        let index = self.components.iter().position(|c| c.id == id)?;
        Some(self.components.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == id)
    }

    /// Raise a component one stacking step.
    pub fn raise(&mut self, id: &str) {
        self.bump_z(id, 1);
    }

    /// Lower a component one stacking step.
    pub fn lower(&mut self, id: &str) {
        self.bump_z(id, -1);
    }

    fn bump_z(&mut self, id: &str, delta: i64) {
        if let Some(component) = self.get_mut(id) {
            component.z += delta;
        }
    }

    /// Re-transform the authoritative layout for a viewport width and make
    /// the result the rendered list.
    pub fn reflow(&mut self, viewport_width: f64) -> &[Component] {
        self.last_viewport_width = viewport_width;
        self.rendered = self.engine.transform(&self.components, viewport_width);
        &self.rendered
    }

    /// Diagnostics snapshot for the last reflowed viewport.
    pub fn debug_info(&self) -> TransformInfo {
        self.engine
            .info(self.last_viewport_width, self.components.len())
    }

    /// Snapshot the authoritative layout back into a persistable document.
    pub fn to_document(&self) -> LayoutDocument {
        LayoutDocument {
            components: self.components.clone(),
            editor_canvas_width: self.engine.config().editor_canvas_width,
            editor_canvas_height: self.engine.config().editor_canvas_height,
        }
    }
}
