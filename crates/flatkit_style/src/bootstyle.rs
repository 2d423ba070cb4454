//! Bootstyle engine
//!
//! Styles built from native clam elements by setting their colors. No
//! images are generated.

use crate::db::{NamedFont, StyleValue, ThemeSettings, CLAM_THEME};
use crate::engine::{
    create_window_style, root_settings, type_ramp, BuildContext, BuildOptions, HandlerTable,
    ThemeEngine,
};
use crate::error::Result;
use crate::palette::Palette;
use crate::scale::Scale;
use flatkit_core::Rgb;
use flatkit_theme::{ColorScheme, SemanticColor};

/// The bootstyle engine
#[derive(Debug, Default)]
pub struct BootstyleEngine;

impl ThemeEngine for BootstyleEngine {
    fn name(&self) -> &str {
        "bootstyle"
    }

    fn base(&self) -> &str {
        CLAM_THEME
    }

    fn register_keywords(&self, handlers: &mut HandlerTable) -> Result<()> {
        handlers.handler_set("button", create_button_style)?;
        handlers.handler_set("outline-button", create_outline_button_style)?;
        handlers.handler_set("link-button", create_link_button_style)?;
        handlers.handler_set("label", create_label_style)?;
        handlers.handler_set("tk-tk", create_window_style)?;
        Ok(())
    }

    fn create_named_fonts(&self, scale: &Scale) -> Vec<NamedFont> {
        type_ramp(scale)
    }

    fn theme_settings(&self, scheme: &ColorScheme) -> ThemeSettings {
        root_settings(scheme)
    }
}

fn color(value: Rgb) -> StyleValue {
    StyleValue::Color(value)
}

/// Map the three clam face colors at once
fn map_face(ctx: &mut BuildContext, ttkstyle: &str, specs: &[(&str, Rgb)]) -> Result<()> {
    for option in ["background", "darkcolor", "lightcolor"] {
        ctx.db.map(
            ttkstyle,
            option,
            specs.iter().map(|&(spec, value)| (spec, color(value))),
        )?;
    }
    Ok(())
}

fn create_button_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let ttkstyle = opts.ttkstyle.as_str();
    let p = Palette::new(&opts.scheme, opts.color.unwrap_or(SemanticColor::Primary));
    let base = p.base();

    ctx.db.configure(
        ttkstyle,
        [
            ("font", "TkBody".into()),
            ("foreground", color(p.on_color)),
            ("background", color(base)),
            ("bordercolor", color(base)),
            ("darkcolor", color(base)),
            ("lightcolor", color(base)),
            ("relief", "raised".into()),
            ("focusthickness", StyleValue::Int(0)),
            ("focuscolor", color(p.on_color)),
            ("padding", "8 4".into()),
            ("anchor", "center".into()),
        ],
    )?;
    ctx.db
        .map(ttkstyle, "foreground", [("disabled", color(p.shades.l2))])?;
    map_face(
        ctx,
        ttkstyle,
        &[("pressed !disabled", p.pressed()), ("hover !disabled", p.hover())],
    )
}

fn create_outline_button_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let ttkstyle = opts.ttkstyle.as_str();
    let p = Palette::new(&opts.scheme, opts.color.unwrap_or(SemanticColor::Primary));
    let base = p.base();

    ctx.db.configure(
        ttkstyle,
        [
            ("font", "TkBody".into()),
            ("foreground", color(base)),
            ("focuscolor", color(base)),
            ("background", color(p.bg.base)),
            ("darkcolor", color(p.bg.base)),
            ("lightcolor", color(p.bg.base)),
            ("bordercolor", color(base)),
            ("relief", "raised".into()),
            ("focusthickness", StyleValue::Int(0)),
            ("padding", "8 4".into()),
            ("anchor", "center".into()),
        ],
    )?;
    ctx.db.map(
        ttkstyle,
        "foreground",
        [
            ("disabled", color(p.disabled())),
            ("hover !disabled", color(p.on_color)),
        ],
    )?;
    ctx.db
        .map(ttkstyle, "focuscolor", [("hover", color(p.on_color))])?;
    ctx.db
        .map(ttkstyle, "shiftrelief", [("pressed", StyleValue::Int(-1))])?;
    map_face(ctx, ttkstyle, &[("hover", base)])
}

fn create_link_button_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let ttkstyle = opts.ttkstyle.as_str();
    let scheme = &opts.scheme;
    let p = Palette::new(scheme, opts.color.unwrap_or(SemanticColor::Primary));
    let background = p.bg.base;
    let hover = scheme.color(SemanticColor::Info);

    ctx.db.configure(
        ttkstyle,
        [
            ("font", "TkBody".into()),
            ("foreground", color(p.base())),
            ("background", color(background)),
            ("bordercolor", color(background)),
            ("darkcolor", color(background)),
            ("lightcolor", color(background)),
            ("relief", "raised".into()),
            ("focusthickness", StyleValue::Int(0)),
            ("padding", "8 4".into()),
            ("anchor", "center".into()),
        ],
    )?;
    ctx.db.map(
        ttkstyle,
        "foreground",
        [("disabled", color(p.disabled())), ("hover !disabled", color(hover))],
    )?;
    ctx.db
        .map(ttkstyle, "shiftrelief", [("pressed !disabled", StyleValue::Int(-2))])?;
    ctx.db.map(ttkstyle, "focuscolor", [("hover", color(hover))])
}

fn create_label_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let scheme = &opts.scheme;
    let foreground = scheme.color(opts.color.unwrap_or(SemanticColor::Foreground));
    ctx.db.configure(
        &opts.ttkstyle,
        [
            ("font", "TkBody".into()),
            ("foreground", color(foreground)),
            ("background", color(scheme.color(SemanticColor::Background))),
        ],
    )
}
