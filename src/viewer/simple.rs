//! Minimal viewer holding the encoded image bytes.
//!
//! Reports only `viewing_time`; suitable for hosts that render the bytes
//! themselves and need no interaction telemetry.

use std::path::Path;

use serde_json::{Map, Value, json};
use web_time::Instant;

use crate::model::ItemMetadata;
use crate::viewer::{ImageViewer, ViewerConfig, ViewerError};

/// Viewer that keeps the raw encoded image and a load timestamp.
pub struct SimpleViewer {
    width: u32,
    image_bytes: Option<Vec<u8>>,
    loaded_at: Option<Instant>,
}

impl SimpleViewer {
    /// Create a simple viewer from shared viewer configuration.
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            width: config.width,
            image_bytes: None,
            loaded_at: None,
        }
    }

    /// Display width hint in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The encoded bytes of the currently loaded image, if any.
    pub fn image_bytes(&self) -> Option<&[u8]> {
        self.image_bytes.as_deref()
    }
}

impl ImageViewer for SimpleViewer {
    fn id(&self) -> &'static str {
        "simple"
    }

    fn load_image(&mut self, path: &Path, _metadata: &ItemMetadata) -> Result<(), ViewerError> {
        let bytes = std::fs::read(path)
            .map_err(|e| {
                ViewerError::new(format!("Failed to read {}: {e}", path.display()))
                    .with_viewer("simple")
            })?;
        self.image_bytes = Some(bytes);
        self.loaded_at = Some(Instant::now());
        Ok(())
    }

    fn clear_image(&mut self) {
        self.image_bytes = None;
        self.loaded_at = None;
    }

    fn viewing_info(&self) -> String {
        let mut info = Map::new();
        if let Some(loaded_at) = self.loaded_at {
            info.insert(
                "viewing_time".to_string(),
                json!(loaded_at.elapsed().as_secs_f64()),
            );
        }
        Value::Object(info).to_string()
    }
}
