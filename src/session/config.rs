//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::viewer::{ViewerConfig, ViewerRegistry};

/// Configuration for one annotation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// RNG seed; a fixed seed reproduces the item/question sequence.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of submissions after which the session freezes.
    #[serde(default)]
    pub maximum_count: Option<usize>,

    /// Identifier of the viewer to instantiate from the registry.
    #[serde(default = "default_viewer")]
    pub viewer: String,

    /// Configuration passed to the viewer constructor.
    #[serde(default)]
    pub viewer_config: ViewerConfig,
}

fn default_viewer() -> String {
    ViewerRegistry::DEFAULT_VIEWER.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            maximum_count: None,
            viewer: default_viewer(),
            viewer_config: ViewerConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Create a config with defaults (pan-zoom viewer, unbounded, unseeded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the submission count at which the session freezes.
    pub fn with_maximum_count(mut self, maximum_count: usize) -> Self {
        self.maximum_count = Some(maximum_count);
        self
    }

    /// Select the viewer type by registry identifier.
    pub fn with_viewer(mut self, viewer: impl Into<String>) -> Self {
        self.viewer = viewer.into();
        self
    }
}
