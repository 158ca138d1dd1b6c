//! Image viewer capability and registry.
//!
//! The session core never renders pixels itself; it drives any viewer that
//! implements the [`ImageViewer`] capability. Three built-in viewers exist
//! (simple, toolbar, pan-zoom) and hosts can register their own through the
//! [`ViewerRegistry`], which also makes viewer choice testable in isolation.

mod pan_zoom;
mod simple;
mod toolbar;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TaskError;
use crate::model::ItemMetadata;

pub use pan_zoom::PanZoomViewer;
pub use simple::SimpleViewer;
pub use toolbar::ToolbarViewer;

/// Error type for viewer operations.
#[derive(Debug, Clone)]
pub struct ViewerError {
    /// Human-readable error message.
    pub message: String,
    /// The viewer that produced this error (if known).
    pub viewer_id: Option<&'static str>,
}

impl ViewerError {
    /// Create a new viewer error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            viewer_id: None,
        }
    }

    /// Create an error with viewer context.
    pub fn with_viewer(mut self, viewer_id: &'static str) -> Self {
        self.viewer_id = Some(viewer_id);
        self
    }
}

impl std::fmt::Display for ViewerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(viewer) = self.viewer_id {
            write!(f, "[{}] {}", viewer, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ViewerError {}

/// Capability contract for anything that can display an item to the
/// respondent and report how it was viewed.
///
/// Implementations track a load timestamp so `viewing_time` (seconds since
/// load) can be reported; it is absent from the telemetry if nothing was
/// ever loaded. Extra implementation-specific telemetry (windowing, zoom
/// events) is merged into the same JSON object.
pub trait ImageViewer {
    /// Unique identifier for this viewer type.
    fn id(&self) -> &'static str;

    /// Load the image at `path` and begin tracking viewing time.
    ///
    /// Item metadata is available for display purposes (titles); missing
    /// keys must be tolerated.
    fn load_image(&mut self, path: &Path, metadata: &ItemMetadata) -> Result<(), ViewerError>;

    /// Reset to a placeholder and stop timing. Idempotent.
    fn clear_image(&mut self);

    /// JSON-encoded telemetry about how the current item was viewed.
    fn viewing_info(&self) -> String;
}

/// Configuration shared by the built-in viewers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Display width hint in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Whether the pan-zoom viewer shows brightness/contrast sliders.
    #[serde(default = "default_true")]
    pub brightness_contrast: bool,

    /// Tool names enabled in the toolbar viewer (`None` = viewer default).
    #[serde(default)]
    pub tools: Option<Vec<String>>,

    /// Whether the toolbar viewer shows a reset button.
    #[serde(default)]
    pub show_reset: bool,
}

/// Default viewer width, matching the classic 600px notebook column.
pub const DEFAULT_VIEWER_WIDTH: u32 = 600;

fn default_width() -> u32 {
    DEFAULT_VIEWER_WIDTH
}

fn default_true() -> bool {
    true
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            brightness_contrast: true,
            tools: None,
            show_reset: false,
        }
    }
}

/// Constructor for a viewer implementation.
pub type ViewerConstructor = Box<dyn Fn(&ViewerConfig) -> Box<dyn ImageViewer>>;

/// Registry of available viewer types.
///
/// An explicit registration table passed into session configuration, so
/// viewer choice carries no hidden global state. All built-in viewers are
/// registered by [`ViewerRegistry::new`]; tests typically start from
/// [`ViewerRegistry::empty`] and register a stub.
pub struct ViewerRegistry {
    constructors: HashMap<String, ViewerConstructor>,
}

impl ViewerRegistry {
    /// Identifier of the viewer used when a session config names none.
    pub const DEFAULT_VIEWER: &'static str = "pan_zoom";

    /// Create a registry with all built-in viewers registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register("simple", |config| Box::new(SimpleViewer::new(config)));
        registry.register("toolbar", |config| Box::new(ToolbarViewer::new(config)));
        registry.register("pan_zoom", |config| Box::new(PanZoomViewer::new(config)));

        registry
    }

    /// Create a registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register a viewer constructor under an identifier.
    pub fn register<F>(&mut self, id: impl Into<String>, constructor: F)
    where
        F: Fn(&ViewerConfig) -> Box<dyn ImageViewer> + 'static,
    {
        self.constructors.insert(id.into(), Box::new(constructor));
    }

    /// Instantiate the viewer registered under `id`.
    pub fn create(&self, id: &str, config: &ViewerConfig) -> Result<Box<dyn ImageViewer>, TaskError> {
        let constructor = self
            .constructors
            .get(id)
            .ok_or_else(|| TaskError::unknown_viewer(id))?;
        Ok(constructor(config))
    }

    /// Get all registered viewer identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for ViewerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_viewers() {
        let registry = ViewerRegistry::new();
        assert_eq!(registry.ids(), vec!["pan_zoom", "simple", "toolbar"]);
    }

    #[test]
    fn test_create_known_viewer() {
        let registry = ViewerRegistry::new();
        let viewer = registry
            .create(ViewerRegistry::DEFAULT_VIEWER, &ViewerConfig::default())
            .unwrap();
        assert_eq!(viewer.id(), "pan_zoom");
    }

    #[test]
    fn test_create_unknown_viewer_fails() {
        let registry = ViewerRegistry::new();
        let err = registry
            .create("holographic", &ViewerConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, TaskError::UnknownViewer { name } if name == "holographic"));
    }
}
