//! Style configuration
//!
//! ```toml
//! default_scheme = "superhero"
//! default_engine = "chromatk"
//! scaling = 1.3333
//!
//! [[schemes]]
//! name = "midnight"
//! mode = "dark"
//! primary = "#375a7f"
//! ```

use crate::error::{Result, StyleError};
use flatkit_theme::SchemeDef;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings of a [`Style`](crate::Style) registry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Scheme of bare engine theme names
    pub default_scheme: String,
    /// Engine of bare scheme theme names
    pub default_engine: String,
    /// Display pixels per point, unit scale when unset
    pub scaling: Option<f64>,
    /// Schemes added on top of the built-in ones
    pub schemes: Vec<SchemeDef>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            default_scheme: "flatly".to_string(),
            default_engine: "chromatk".to_string(),
            scaling: None,
            schemes: Vec::new(),
        }
    }
}

impl StyleConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StyleError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&content).map_err(|e| StyleError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded style configuration");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| StyleError::Config {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.default_scheme = scheme.into();
        self
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.default_engine = engine.into();
        self
    }

    pub fn with_scaling(mut self, pixels_per_point: f64) -> Self {
        self.scaling = Some(pixels_per_point);
        self
    }
}
