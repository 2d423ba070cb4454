//! flatkit color schemes
//!
//! A [`ColorScheme`] is a named palette of ten semantic colors tagged as a
//! light or dark scheme. Widget styles never use the palette directly: they
//! ask for a color's [`Shades`], a nine step ramp from a 1.4x tint down to a
//! 0.6x shade, and for the foreground that reads well on it.
//!
//! # Quick Start
//!
//! ```rust
//! use flatkit_theme::{SchemePreset, SemanticColor};
//!
//! let flatly = SchemePreset::Flatly.scheme();
//! let shades = flatly.get_shades(SemanticColor::Primary);
//!
//! assert_eq!(shades.base, flatly.color(SemanticColor::Primary));
//! assert_eq!(flatly.get_foreground(SemanticColor::Primary), flatly.color(SemanticColor::Background));
//! ```
//!
//! # Scheme files
//!
//! Custom schemes can be described in TOML and loaded with
//! [`SchemeFile::load`]:
//!
//! ```toml
//! [[schemes]]
//! name = "midnight"
//! mode = "dark"
//! primary = "#375a7f"
//! background = "#222"
//! foreground = "#fff"
//! ```

pub mod file;
pub mod presets;
pub mod scheme;
pub mod shades;

pub use file::{SchemeDef, SchemeFile};
pub use presets::{builtin_schemes, SchemePreset};
pub use scheme::{ColorScheme, SchemeBuilder, SchemeError, SchemeMode, SemanticColor};
pub use shades::{Shades, SHADE_FACTORS};
