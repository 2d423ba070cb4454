//! Built-in color schemes

use crate::scheme::{ColorScheme, SchemeMode, SemanticColor};
use flatkit_core::Rgb;

/// The schemes that ship with flatkit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SchemePreset {
    Cosmo,
    #[default]
    Flatly,
    Minty,
    Superhero,
}

impl SchemePreset {
    /// Scheme name used in theme names
    pub fn id(&self) -> &'static str {
        match self {
            SchemePreset::Cosmo => "cosmo",
            SchemePreset::Flatly => "flatly",
            SchemePreset::Minty => "minty",
            SchemePreset::Superhero => "superhero",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SchemePreset::Cosmo => "Cosmo",
            SchemePreset::Flatly => "Flatly",
            SchemePreset::Minty => "Minty",
            SchemePreset::Superhero => "Superhero",
        }
    }

    pub fn all() -> &'static [SchemePreset] {
        &[
            SchemePreset::Cosmo,
            SchemePreset::Flatly,
            SchemePreset::Minty,
            SchemePreset::Superhero,
        ]
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }

    pub fn mode(&self) -> SchemeMode {
        match self {
            SchemePreset::Superhero => SchemeMode::Dark,
            _ => SchemeMode::Light,
        }
    }

    /// Build the scheme
    pub fn scheme(&self) -> ColorScheme {
        // primary, secondary, success, info, warning, danger, light, dark, background, foreground
        let palette: [u32; 10] = match self {
            SchemePreset::Cosmo => [
                0x2780e3, 0x7e8081, 0x3fb618, 0x9954bb, 0xff7518, 0xff0039, 0xf8f9fa, 0x373a3c,
                0xffffff, 0x373a3c,
            ],
            SchemePreset::Flatly => [
                0x2c3e50, 0x95a5a6, 0x18bc9c, 0x3498db, 0xf39c12, 0xe74c3c, 0xecf0f1, 0x7b8a8b,
                0xffffff, 0x212529,
            ],
            SchemePreset::Minty => [
                0x78c2ad, 0xf3969a, 0x56cc9d, 0x6cc3d5, 0xffce67, 0xff7851, 0xf8f9fa, 0x343a40,
                0xffffff, 0x5a5a5a,
            ],
            SchemePreset::Superhero => [
                0x4c9be8, 0x4e5d6c, 0x5cb85c, 0x5bc0de, 0xf0ad4e, 0xd9534f, 0xaab6c2, 0x20374c,
                0x2b3e50, 0xffffff,
            ],
        };

        SemanticColor::ALL
            .into_iter()
            .zip(palette)
            .fold(ColorScheme::builder(self.id(), self.mode()), |b, (color, hex)| {
                b.color(color, Rgb::from_hex(hex))
            })
            .build()
    }
}

/// Every built-in scheme, in preset order
pub fn builtin_schemes() -> Vec<ColorScheme> {
    SchemePreset::all().iter().map(SchemePreset::scheme).collect()
}
