use flatkit_core::Rgb;
use flatkit_theme::{builtin_schemes, SchemeMode, SchemePreset, SemanticColor};

#[test]
fn preset_catalog_contains_expected_presets() {
    let mut ids: Vec<&str> = SchemePreset::all().iter().map(|p| p.id()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["cosmo", "flatly", "minty", "superhero"]);
}

#[test]
fn preset_ids_round_trip() {
    for preset in SchemePreset::all() {
        assert_eq!(SchemePreset::from_id(preset.id()), Some(*preset));
        assert_eq!(preset.scheme().name(), preset.id());
    }
    assert_eq!(SchemePreset::from_id("darkly"), None);
}

#[test]
fn only_superhero_is_dark() {
    for scheme in builtin_schemes() {
        let expected = if scheme.name() == "superhero" {
            SchemeMode::Dark
        } else {
            SchemeMode::Light
        };
        assert_eq!(scheme.mode(), expected, "scheme {}", scheme.name());
    }
}

#[test]
fn flatly_palette() {
    let flatly = SchemePreset::Flatly.scheme();
    assert_eq!(flatly.color(SemanticColor::Primary), Rgb::from_hex(0x2c3e50));
    assert_eq!(flatly.color(SemanticColor::Danger), Rgb::from_hex(0xe74c3c));
    assert_eq!(flatly.color(SemanticColor::Background), Rgb::WHITE);
    assert_eq!(flatly.color(SemanticColor::Foreground), Rgb::from_hex(0x212529));
}

#[test]
fn dark_scheme_accents_use_scheme_foreground() {
    let superhero = SchemePreset::Superhero.scheme();
    assert_eq!(superhero.get_foreground(SemanticColor::Primary), Rgb::WHITE);
    assert_eq!(
        superhero.get_foreground(SemanticColor::Light),
        Rgb::from_hex(0x20374c)
    );
}

#[test]
fn light_scheme_accents_use_scheme_background() {
    for preset in [SchemePreset::Cosmo, SchemePreset::Flatly, SchemePreset::Minty] {
        let scheme = preset.scheme();
        assert_eq!(
            scheme.get_foreground(SemanticColor::Success),
            scheme.color(SemanticColor::Background),
            "Preset {:?} should put background text on accents",
            preset
        );
    }
}

#[test]
fn builtin_schemes_survive_serialization() {
    for scheme in builtin_schemes() {
        let def = scheme.to_def();
        assert_eq!(def.to_scheme().unwrap(), scheme);
    }
}
