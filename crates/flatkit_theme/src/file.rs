//! Serialized scheme definitions
//!
//! Schemes travel as flat maps: a `name`, a `mode` and any of the ten color
//! names with a hex value. The same shape is read from TOML scheme files and
//! from JSON objects.

use crate::scheme::{ColorScheme, SchemeError, SchemeMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Serde form of a [`ColorScheme`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeDef {
    pub name: String,
    #[serde(default)]
    pub mode: SchemeMode,
    /// Color name to hex value; omitted colors take their defaults
    #[serde(flatten)]
    pub colors: BTreeMap<String, String>,
}

impl SchemeDef {
    pub fn to_scheme(&self) -> Result<ColorScheme, SchemeError> {
        ColorScheme::new(
            &self.name,
            self.mode,
            self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }
}

impl TryFrom<&SchemeDef> for ColorScheme {
    type Error = SchemeError;

    fn try_from(def: &SchemeDef) -> Result<Self, Self::Error> {
        def.to_scheme()
    }
}

impl ColorScheme {
    /// Parse a scheme from a JSON object such as
    /// `{"name": "x", "mode": "dark", "primary": "#375a7f"}`
    pub fn from_json(json: &str) -> Result<Self, SchemeError> {
        let def: SchemeDef =
            serde_json::from_str(json).map_err(|e| SchemeError::Parse(e.to_string()))?;
        def.to_scheme()
    }

    /// The definition this scheme serializes to, every color included
    pub fn to_def(&self) -> SchemeDef {
        SchemeDef {
            name: self.name().to_string(),
            mode: self.mode(),
            colors: self
                .iter()
                .map(|(color, value)| (color.name().to_string(), value.to_string()))
                .collect(),
        }
    }
}

/// A TOML file holding any number of `[[schemes]]` tables
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeFile {
    #[serde(default)]
    pub schemes: Vec<SchemeDef>,
}

impl SchemeFile {
    pub fn load(path: &Path) -> Result<Self, SchemeError> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemeError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), schemes = file.schemes.len(), "loaded scheme file");
        Ok(file)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SchemeError> {
        toml::from_str(content).map_err(|e| SchemeError::Parse(e.to_string()))
    }

    /// Convert every definition, stopping at the first invalid one
    pub fn to_schemes(&self) -> Result<Vec<ColorScheme>, SchemeError> {
        self.schemes.iter().map(SchemeDef::to_scheme).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::SemanticColor;
    use flatkit_core::Rgb;

    #[test]
    fn test_toml_file() {
        let file = SchemeFile::from_toml_str(
            r##"
            [[schemes]]
            name = "midnight"
            mode = "dark"
            primary = "#375a7f"
            background = "#222"

            [[schemes]]
            name = "paper"
            "##,
        )
        .unwrap();

        let schemes = file.to_schemes().unwrap();
        assert_eq!(schemes.len(), 2);
        assert_eq!(schemes[0].name(), "midnight");
        assert!(schemes[0].is_dark());
        assert_eq!(schemes[0].color(SemanticColor::Background), Rgb::from_hex(0x222222));
        assert_eq!(schemes[1].mode(), SchemeMode::Light);
        assert_eq!(schemes[1].color(SemanticColor::Foreground), Rgb::from_hex(0x111111));
    }

    #[test]
    fn test_bad_mode_is_a_parse_error() {
        let err = SchemeFile::from_toml_str("[[schemes]]\nname = \"x\"\nmode = \"dim\"\n")
            .unwrap_err();
        assert!(matches!(err, SchemeError::Parse(_)));
    }

    #[test]
    fn test_unknown_color_in_file() {
        let file = SchemeFile::from_toml_str("[[schemes]]\nname = \"x\"\nteal = \"#20c997\"\n")
            .unwrap();
        assert_eq!(
            file.to_schemes().unwrap_err(),
            SchemeError::UnknownColor("teal".to_string())
        );
    }

    #[test]
    fn test_json_round_trip() {
        let scheme = ColorScheme::from_json(
            r##"{"name": "night", "mode": "dark", "primary": "#375A7F", "foreground": "#fff"}"##,
        )
        .unwrap();
        assert_eq!(scheme.color(SemanticColor::Primary), Rgb::from_hex(0x375a7f));

        let def = scheme.to_def();
        assert_eq!(def.colors.len(), 10);
        assert_eq!(def.colors["primary"], "#375a7f");
        assert_eq!(def.to_scheme().unwrap(), scheme);
    }

    #[test]
    fn test_json_must_be_an_object() {
        assert!(matches!(
            ColorScheme::from_json("[1, 2]"),
            Err(SchemeError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = SchemeFile::load(Path::new("/nonexistent/schemes.toml")).unwrap_err();
        assert!(matches!(err, SchemeError::Io { .. }));
    }
}
