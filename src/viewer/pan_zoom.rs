//! Viewer with pan/zoom telemetry and brightness/contrast controls.
//!
//! The host forwards zoom interactions via [`PanZoomViewer::record_zoom`];
//! the accumulated events ride along in the viewing telemetry. A title is
//! built from per-item metadata, substituting empty strings for missing
//! keys.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value, json};
use web_time::Instant;

use crate::data::{ImageData, decode_image_data};
use crate::model::ItemMetadata;
use crate::viewer::{ImageViewer, ViewerConfig, ViewerError};

/// Slider range shared by brightness and contrast.
const SLIDER_MIN: f32 = 0.0;
const SLIDER_MAX: f32 = 3.5;

/// One zoom interaction, as axis ranges after the zoom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoomEvent {
    /// Horizontal axis range.
    pub x: [f64; 2],
    /// Vertical axis range.
    pub y: [f64; 2],
}

/// Viewer tracking zoom history and image adjustments.
pub struct PanZoomViewer {
    width: u32,
    brightness_contrast: bool,
    brightness: f32,
    contrast: f32,
    image: Option<ImageData>,
    title: String,
    zoom_events: Vec<ZoomEvent>,
    loaded_at: Option<Instant>,
}

impl PanZoomViewer {
    /// Create a pan-zoom viewer from shared viewer configuration.
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            width: config.width,
            brightness_contrast: config.brightness_contrast,
            brightness: 1.0,
            contrast: 1.0,
            image: None,
            title: String::new(),
            zoom_events: Vec::new(),
            loaded_at: None,
        }
    }

    /// Title shown above the plot for the current item.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the brightness/contrast sliders are shown.
    pub fn has_adjustments(&self) -> bool {
        self.brightness_contrast
    }

    /// Current brightness factor.
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Current contrast factor.
    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    /// Set the brightness factor (host slider interaction).
    pub fn set_brightness(&mut self, value: f32) {
        self.brightness = value.clamp(SLIDER_MIN, SLIDER_MAX);
    }

    /// Set the contrast factor (host slider interaction).
    pub fn set_contrast(&mut self, value: f32) {
        self.contrast = value.clamp(SLIDER_MIN, SLIDER_MAX);
    }

    /// Record a zoom interaction reported by the host plot.
    pub fn record_zoom(&mut self, x: [f64; 2], y: [f64; 2]) {
        self.zoom_events.push(ZoomEvent { x, y });
    }

    /// Display width hint in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The decoded pixel data, if an item is loaded.
    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    /// Build the item title from metadata, tolerating missing keys.
    fn item_title(metadata: &ItemMetadata) -> String {
        let get = |key: &str| metadata.get(key).map(String::as_str).unwrap_or("");
        format!(
            "Patient:{}{}, View Position: {}",
            get("Patient Age"),
            get("Patient Gender"),
            get("View Position"),
        )
    }
}

impl ImageViewer for PanZoomViewer {
    fn id(&self) -> &'static str {
        "pan_zoom"
    }

    fn load_image(&mut self, path: &Path, metadata: &ItemMetadata) -> Result<(), ViewerError> {
        self.clear_image();
        let bytes = std::fs::read(path)
            .map_err(|e| {
                ViewerError::new(format!("Failed to read {}: {e}", path.display()))
                    .with_viewer("pan_zoom")
            })?;
        self.image = Some(decode_image_data(&bytes)?);
        self.title = Self::item_title(metadata);
        self.loaded_at = Some(Instant::now());
        Ok(())
    }

    fn clear_image(&mut self) {
        self.image = None;
        self.title = "Loading...".to_string();
        self.brightness = 1.0;
        self.contrast = 1.0;
        self.zoom_events.clear();
        self.loaded_at = None;
    }

    fn viewing_info(&self) -> String {
        let mut info = Map::new();
        if !self.zoom_events.is_empty() {
            info.insert("zoom".to_string(), json!(self.zoom_events));
        }
        if let Some(loaded_at) = self.loaded_at {
            info.insert(
                "viewing_time".to_string(),
                json!(loaded_at.elapsed().as_secs_f64()),
            );
        }
        Value::Object(info).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_substitutes_missing_keys() {
        let mut metadata = ItemMetadata::new();
        metadata.insert("Patient Age".to_string(), "58Y".to_string());

        let title = PanZoomViewer::item_title(&metadata);
        assert_eq!(title, "Patient:58Y, View Position: ");
    }

    #[test]
    fn test_zoom_events_appear_in_telemetry() {
        let mut viewer = PanZoomViewer::new(&ViewerConfig::default());
        assert_eq!(viewer.viewing_info(), "{}");

        viewer.record_zoom([0.0, 100.0], [0.0, 50.0]);
        viewer.record_zoom([10.0, 60.0], [5.0, 30.0]);

        let info: Value = serde_json::from_str(&viewer.viewing_info()).unwrap();
        assert_eq!(info["zoom"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_clear_resets_adjustments_and_zoom_log() {
        let mut viewer = PanZoomViewer::new(&ViewerConfig::default());
        viewer.set_brightness(2.0);
        viewer.set_contrast(0.5);
        viewer.record_zoom([0.0, 1.0], [0.0, 1.0]);

        viewer.clear_image();
        assert_eq!(viewer.brightness(), 1.0);
        assert_eq!(viewer.contrast(), 1.0);
        assert_eq!(viewer.viewing_info(), "{}");
        assert_eq!(viewer.title(), "Loading...");
    }

    #[test]
    fn test_slider_values_are_clamped() {
        let mut viewer = PanZoomViewer::new(&ViewerConfig::default());
        viewer.set_brightness(99.0);
        viewer.set_contrast(-4.0);
        assert_eq!(viewer.brightness(), 3.5);
        assert_eq!(viewer.contrast(), 0.0);
    }
}
