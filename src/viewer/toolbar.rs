//! DICOM-style viewer with windowing tools.
//!
//! Decodes the item into a single-channel array and derives default
//! window center/width from the intensity statistics. Windowing
//! adjustments made by the host are merged into the telemetry.

use std::path::Path;

use serde_json::{Map, Value, json};
use web_time::Instant;

use crate::data::{ImageData, decode_image_data};
use crate::model::ItemMetadata;
use crate::viewer::{ImageViewer, ViewerConfig, ViewerError};

/// Tool names enabled when the config names none.
const DEFAULT_TOOLS: &[&str] = &["zoom", "pan", "window"];

/// Viewer holding single-channel pixel data plus windowing state.
pub struct ToolbarViewer {
    tools: Vec<String>,
    show_reset: bool,
    image: ImageData,
    window_center: f32,
    window_width: f32,
    loaded_at: Option<Instant>,
}

impl ToolbarViewer {
    /// Create a toolbar viewer from shared viewer configuration.
    pub fn new(config: &ViewerConfig) -> Self {
        let tools = config
            .tools
            .clone()
            .unwrap_or_else(|| DEFAULT_TOOLS.iter().map(|t| t.to_string()).collect());
        Self {
            tools,
            show_reset: config.show_reset,
            image: ImageData::placeholder(),
            window_center: 0.0,
            window_width: 0.0,
            loaded_at: None,
        }
    }

    /// The pixel data currently on display.
    pub fn image(&self) -> &ImageData {
        &self.image
    }

    /// Adjust the display window (host interaction).
    pub fn set_window(&mut self, center: f32, width: f32) {
        self.window_center = center;
        self.window_width = width.max(0.0);
        log::debug!(
            "Window adjusted: center {:.1}, width {:.1}",
            self.window_center,
            self.window_width
        );
    }

    /// Restore the statistics-derived window, if the reset tool is shown.
    pub fn reset_window(&mut self) {
        if self.show_reset {
            self.window_center = self.image.mean();
            self.window_width = self.image.std();
        }
    }
}

impl ImageViewer for ToolbarViewer {
    fn id(&self) -> &'static str {
        "toolbar"
    }

    fn load_image(&mut self, path: &Path, _metadata: &ItemMetadata) -> Result<(), ViewerError> {
        self.clear_image();
        let bytes = std::fs::read(path)
            .map_err(|e| {
                ViewerError::new(format!("Failed to read {}: {e}", path.display()))
                    .with_viewer("toolbar")
            })?;
        self.image = decode_image_data(&bytes)?;
        self.window_center = self.image.mean();
        self.window_width = self.image.std();
        self.loaded_at = Some(Instant::now());
        Ok(())
    }

    fn clear_image(&mut self) {
        self.image = ImageData::placeholder();
        self.window_center = 0.0;
        self.window_width = 0.0;
        self.loaded_at = None;
    }

    fn viewing_info(&self) -> String {
        let mut info = Map::new();
        info.insert("tools".to_string(), json!(self.tools));
        info.insert("window_center".to_string(), json!(self.window_center));
        info.insert("window_width".to_string(), json!(self.window_width));
        info.insert(
            "image_shape".to_string(),
            json!([self.image.height(), self.image.width()]),
        );
        if let Some(loaded_at) = self.loaded_at {
            info.insert(
                "viewing_time".to_string(),
                json!(loaded_at.elapsed().as_secs_f64()),
            );
        }
        Value::Object(info).to_string()
    }
}
