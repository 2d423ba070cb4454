//! Chromatk engine
//!
//! Rounded, image based styles. Every piece of chrome is drawn at several
//! times its final size and downsampled, one image per visually distinct
//! state. Sizes below are in reference pixels and go through [`Scale`].

use crate::db::{NamedFont, StyleValue, ThemeSettings, CLAM_THEME};
use crate::element::{Edges, ElementLayout, Side, Sticky};
use crate::engine::{
    create_window_style, root_settings, type_ramp, BuildContext, BuildOptions, HandlerTable,
    ThemeEngine,
};
use crate::error::Result;
use crate::palette::Palette;
use crate::request::{element_prefix, Orient};
use crate::scale::Scale;
use flatkit_core::Rgb;
use flatkit_paint::{Canvas, ImageHandle, Joint, ShapeStyle};
use flatkit_theme::{ColorScheme, SemanticColor};

/// The chromatk engine
#[derive(Debug, Default)]
pub struct ChromatkEngine;

impl ThemeEngine for ChromatkEngine {
    fn name(&self) -> &str {
        "chromatk"
    }

    fn base(&self) -> &str {
        CLAM_THEME
    }

    fn register_keywords(&self, handlers: &mut HandlerTable) -> Result<()> {
        handlers.handler_set("button", create_button_style)?;
        handlers.handler_set("outline-button", create_outline_button_style)?;
        handlers.handler_set("link-button", create_link_button_style)?;
        handlers.handler_set("checkbutton", create_checkbutton_style)?;
        handlers.handler_set("radiobutton", create_radiobutton_style)?;
        handlers.handler_set("switch", create_switch_style)?;
        handlers.handler_set("scrollbar", create_scrollbar_style)?;
        handlers.handler_set("spinbox", create_spinbox_style)?;
        handlers.handler_set("entry", create_entry_style)?;
        handlers.handler_set("combobox", create_combobox_style)?;
        handlers.handler_set("popdown", create_popdown_style)?;
        handlers.handler_set("progressbar", create_progressbar_style)?;
        handlers.handler_set("scale", create_scale_style)?;
        handlers.handler_set("label", create_label_style)?;
        handlers.handler_set("frame", create_frame_style)?;
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

/// Draw on a canvas of `canvas` size and downsample to `size`
fn render<F>(canvas: (u32, u32), size: (u32, u32), draw: F) -> Result<ImageHandle>
where
    F: FnOnce(&mut Canvas),
{
    let mut c = Canvas::new(canvas.0, canvas.1)?;
    draw(&mut c);
    Ok(c.downsample(size.0, size.1)?)
}

/// Like [`render`], turning the artwork upside down before downsampling
fn render_flipped<F>(canvas: (u32, u32), size: (u32, u32), draw: F) -> Result<ImageHandle>
where
    F: FnOnce(&mut Canvas),
{
    let mut c = Canvas::new(canvas.0, canvas.1)?;
    draw(&mut c);
    Ok(c.to_image().rotated_180().resized(size.0, size.1)?)
}

fn accent(opts: &BuildOptions, default: SemanticColor) -> SemanticColor {
    opts.color.unwrap_or(default)
}

fn color(value: Rgb) -> StyleValue {
    StyleValue::Color(value)
}

fn create_button_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let s = ctx.scale;
    let ttkstyle = opts.ttkstyle.as_str();
    let p = Palette::new(&opts.scheme, accent(opts, SemanticColor::Primary));
    let disabled = p.shades.l2;

    let img_size = s.size(800, 400);
    let final_size = s.size(200, 100);
    let xy = s.bounds(10, 10, 790, 390);
    let radius = s.coord(16);
    let face = |fill: Rgb| {
        let style = ShapeStyle::filled(fill).with_outline(p.shades.d2, s.coord(3));
        render(img_size, final_size, |c| c.rounded_rectangle(xy, radius, &style))
    };

    let img_norm = face(p.base())?;
    let img_hover = face(p.hover())?;
    let img_pressed = face(p.pressed())?;

    let element = format!("{ttkstyle}.button");
    ctx.element_image_builder(&element, img_norm.clone())
        .sticky(Sticky::NSEW)
        .border(s.px(6))
        .width(s.px(200))
        .height(s.px(50))
        .map("pressed !disabled", img_pressed.clone())
        .map("hover !disabled", img_hover.clone())
        .build(ctx.db)?;

    ctx.element_layout_builder(ttkstyle).build(
        ctx.db,
        ElementLayout::new(&element).expand().child(
            ElementLayout::new("Button.padding")
                .child(ElementLayout::new("Button.label").expand()),
        ),
    )?;
    ctx.register_assets([img_norm, img_hover, img_pressed]);

    ctx.db.configure(
        ttkstyle,
        [
            ("foreground", color(p.on_color)),
            ("focuscolor", color(p.on_color)),
            ("relief", "raised".into()),
            ("anchor", "center".into()),
            ("padding", "8 4".into()),
        ],
    )?;
    ctx.db
        .map(ttkstyle, "foreground", [("disabled", color(disabled))])?;
    ctx.db
        .map(ttkstyle, "shiftrelief", [("pressed !disabled", StyleValue::Int(-1))])
}

fn create_outline_button_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let s = ctx.scale;
    let ttkstyle = opts.ttkstyle.as_str();
    let p = Palette::new(&opts.scheme, accent(opts, SemanticColor::Primary));
    let disabled = p.disabled();
    let foreground = p.base();

    let img_size = s.size(800, 400);
    let final_size = s.size(200, 100);
    let xy = s.bounds(10, 10, 790, 390);
    let radius = s.coord(16);
    let frame = |style: ShapeStyle| {
        render(img_size, final_size, |c| c.rounded_rectangle(xy, radius, &style))
    };

    let outline = ShapeStyle::outlined(foreground, s.coord(4));
    let img_norm = frame(outline)?;
    let img_hover = frame(outline.with_fill(p.off_hover()))?;
    let img_pressed = frame(outline.with_fill(p.off_pressed()))?;
    let img_disabled = frame(ShapeStyle::outlined(disabled, s.coord(2)))?;
    ctx.register_assets([
        img_norm.clone(),
        img_hover.clone(),
        img_pressed.clone(),
        img_disabled.clone(),
    ]);

    let element = format!("{ttkstyle}.button");
    ctx.element_image_builder(&element, img_norm)
        .sticky(Sticky::NSEW)
        .border(s.px(6))
        .width(s.px(200))
        .height(s.px(50))
        .map("disabled", img_disabled)
        .map("pressed !disabled", img_pressed)
        .map("hover !disabled", img_hover)
        .build(ctx.db)?;

    ctx.element_layout_builder(ttkstyle).build(
        ctx.db,
        ElementLayout::new(&element).sticky(Sticky::NSEW).child(
            ElementLayout::new("Button.padding").child(
                ElementLayout::new("Button.label")
                    .side(Side::Left)
                    .expand(),
            ),
        ),
    )?;

    ctx.db.configure(
        ttkstyle,
        [
            ("foreground", color(foreground)),
            ("focuscolor", color(foreground)),
            ("relief", "raised".into()),
            ("anchor", "center".into()),
            ("padding", "8 4".into()),
        ],
    )?;
    ctx.db
        .map(ttkstyle, "foreground", [("disabled", color(disabled))])?;
    ctx.db
        .map(ttkstyle, "shiftrelief", [("pressed !disabled", StyleValue::Int(-1))])
}

fn create_link_button_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let s = ctx.scale;
    let ttkstyle = opts.ttkstyle.as_str();
    let scheme = &opts.scheme;
    let p = Palette::new(scheme, accent(opts, SemanticColor::Primary));
    let disabled = p.disabled();
    let hover = scheme.color(SemanticColor::Info);

    ctx.db.configure(
        ttkstyle,
        [
            ("relief", "raised".into()),
            ("foreground", color(p.base())),
            ("padding", "8 4".into()),
            ("anchor", "center".into()),
        ],
    )?;

    let (w, h) = s.size(200, 100);
    let img = ImageHandle::blank(w, h)?;
    let element = format!("{ttkstyle}.button");
    ctx.element_image_builder(&element, img.clone())
        .sticky(Sticky::NSEW)
        .border(s.px(6))
        .width(s.px(200))
        .height(s.px(50))
        .build(ctx.db)?;
    ctx.register_assets([img]);

    ctx.element_layout_builder(ttkstyle).build(
        ctx.db,
        ElementLayout::new(&element).expand().child(
            ElementLayout::new("Button.padding")
                .child(ElementLayout::new("Button.label").expand()),
        ),
    )?;

    ctx.db.map(
        ttkstyle,
        "foreground",
        [("disabled", color(disabled)), ("hover !disabled", color(hover))],
    )?;
    ctx.db
        .map(ttkstyle, "shiftrelief", [("pressed !disabled", StyleValue::Int(-2))])?;
    ctx.db
        .map(ttkstyle, "focuscolor", [("hover", color(hover))])
}

fn create_checkbutton_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let s = ctx.scale;
    let ttkstyle = opts.ttkstyle.as_str();
    let scheme = &opts.scheme;
    let p = Palette::new(scheme, accent(opts, SemanticColor::Primary));

    let check = scheme.color(SemanticColor::Background);
    let app_bg = scheme.color(SemanticColor::Background);
    let fill = p.base();
    let disabled = p.disabled();
    let outline = p.off_outline();
    let on_outline = p.bg.d2;

    let img_size = s.size(640, 640);
    let final_size = s.size(32, 32);
    let xy = s.bounds(10, 10, 630, 630);
    let radius = img_size.0 as f32 * 0.12;
    let check_mark = s.points(&[(190, 330), (293, 433), (516, 210)]);
    let dash = s.points(&[(213, 320), (427, 320)]);
    let mark_width = s.coord(40);

    let boxed = |style: ShapeStyle, mark: Option<(&[(f32, f32)], Rgb, Joint)>| {
        render(img_size, final_size, |c| {
            c.rounded_rectangle(xy, radius, &style);
            if let Some((points, stroke, joint)) = mark {
                c.line(points, mark_width, stroke, joint);
            }
        })
    };
    let off = |bg: Rgb| boxed(ShapeStyle::filled(bg).with_outline(outline, s.coord(24)), None);
    let on = |bg: Rgb, border: Rgb, stroke: Rgb| {
        boxed(
            ShapeStyle::filled(bg).with_outline(border, s.coord(3)),
            Some((check_mark.as_slice(), stroke, Joint::Curve)),
        )
    };
    let alt = |bg: Rgb, border: Rgb, stroke: Rgb| {
        boxed(
            ShapeStyle::filled(bg).with_outline(border, s.coord(3)),
            Some((dash.as_slice(), stroke, Joint::Miter)),
        )
    };

    let img_off = off(app_bg)?;
    let img_off_hover = off(p.off_hover())?;
    let img_off_pressed = off(p.off_pressed())?;
    let img_on = on(fill, on_outline, check)?;
    let img_on_hover = on(p.hover(), on_outline, check)?;
    let img_on_pressed = on(p.pressed(), on_outline, check)?;
    let img_on_dis = on(fill, disabled, disabled)?;
    let img_alt = alt(fill, on_outline, check)?;
    let img_alt_pressed = alt(p.pressed(), on_outline, check)?;
    let img_alt_hover = alt(p.hover(), on_outline, check)?;
    let img_alt_dis = alt(fill, disabled, disabled)?;
    let img_dis = boxed(
        ShapeStyle::filled(check).with_outline(disabled, s.coord(12)),
        None,
    )?;

    ctx.register_assets([
        img_on.clone(),
        img_on_dis.clone(),
        img_alt_dis.clone(),
        img_dis.clone(),
        img_alt_pressed.clone(),
        img_off_pressed.clone(),
        img_on_pressed.clone(),
        img_alt_hover.clone(),
        img_off_hover.clone(),
        img_on_hover.clone(),
        img_alt.clone(),
        img_off.clone(),
    ]);

    let indicator = format!("{}.indicator", element_prefix(ttkstyle));
    ctx.element_image_builder(&indicator, img_on)
        .border((s.px(24), 0))
        .sticky(Sticky::NS)
        .map("disabled selected", img_on_dis)
        .map("disabled alternate", img_alt_dis)
        .map("disabled", img_dis)
        .map("pressed alternate !disabled", img_alt_pressed)
        .map("pressed !selected !disabled", img_off_pressed)
        .map("pressed selected !disabled", img_on_pressed)
        .map("hover alternate !disabled", img_alt_hover)
        .map("hover !selected !disabled", img_off_hover)
        .map("hover selected !disabled", img_on_hover)
        .map("alternate", img_alt)
        .map("!selected", img_off)
        .build(ctx.db)?;

    ctx.db.configure(
        ttkstyle,
        [
            ("foreground", color(scheme.color(SemanticColor::Foreground))),
            ("background", color(app_bg)),
            ("focuscolor", "".into()),
            ("font", "TkBody".into()),
        ],
    )?;
    ctx.db
        .map(ttkstyle, "foreground", [("disabled", color(disabled))])?;

    ctx.element_layout_builder(ttkstyle).build(
        ctx.db,
        ElementLayout::new("Checkbutton.padding")
            .sticky(Sticky::NSEW)
            .child(
                ElementLayout::new(&indicator)
                    .side(Side::Left)
                    .sticky(Sticky::NONE),
            )
            .child(
                ElementLayout::new("Checkbutton.focus")
                    .side(Side::Left)
                    .sticky(Sticky::NONE)
                    .child(ElementLayout::new("Checkbutton.label").sticky(Sticky::NSEW)),
            ),
    )
}

fn create_radiobutton_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let s = ctx.scale;
    let ttkstyle = opts.ttkstyle.as_str();
    let scheme = &opts.scheme;
    let p = Palette::new(scheme, accent(opts, SemanticColor::Primary));

    let app_bg = scheme.color(SemanticColor::Background);
    let disabled = p.disabled();
    let outline = p.off_outline();

    let img_size = s.size(640, 640);
    let final_size = s.size(32, 32);
    let xy = s.bounds(10, 10, 630, 630);

    // a thick ring around the background color, then an optional outer rim
    let ring = |stroke: Rgb, width: u32, rim: Option<(Rgb, u32)>| {
        render(img_size, final_size, |c| {
            c.ellipse(xy, &ShapeStyle::filled(app_bg).with_outline(stroke, s.coord(width)));
            if let Some((rim, rim_width)) = rim {
                c.ellipse(xy, &ShapeStyle::outlined(rim, s.coord(rim_width)));
            }
        })
    };

    let img_off = ring(outline, 24, None)?;
    let img_off_hover = render(img_size, final_size, |c| {
        c.ellipse(
            xy,
            &ShapeStyle::filled(p.off_hover()).with_outline(outline, s.coord(24)),
        )
    })?;
    let img_off_pressed = ring(outline, 140, Some((outline, 24)))?;
    let img_on = ring(p.base(), 140, Some((p.shades.d2, 3)))?;
    let img_on_hover = ring(p.hover(), 110, Some((p.shades.d2, 3)))?;
    let img_on_pressed = ring(p.pressed(), 140, Some((p.shades.d2, 3)))?;
    let img_on_dis = ring(disabled, 140, Some((outline, 3)))?;
    let img_dis = ring(disabled, 24, None)?;

    ctx.register_assets([
        img_on.clone(),
        img_on_dis.clone(),
        img_dis.clone(),
        img_off_pressed.clone(),
        img_on_pressed.clone(),
        img_off_hover.clone(),
        img_on_hover.clone(),
        img_off.clone(),
    ]);

    let indicator = format!("{ttkstyle}.indicator");
    ctx.element_image_builder(&indicator, img_on)
        .border((s.px(24), 0))
        .sticky(Sticky::NS)
        .map("disabled selected", img_on_dis)
        .map("disabled", img_dis)
        .map("pressed !selected !disabled", img_off_pressed)
        .map("pressed selected !disabled", img_on_pressed)
        .map("hover !selected !disabled", img_off_hover)
        .map("hover selected !disabled", img_on_hover)
        .map("!selected", img_off)
        .build(ctx.db)?;

    ctx.db.configure(
        ttkstyle,
        [
            ("font", "TkBody".into()),
            ("foreground", color(scheme.color(SemanticColor::Foreground))),
            ("background", color(app_bg)),
            ("focuscolor", "".into()),
        ],
    )?;
    ctx.db
        .map(ttkstyle, "foreground", [("disabled", color(disabled))])?;

    ctx.element_layout_builder(ttkstyle).build(
        ctx.db,
        ElementLayout::new("Radiobutton.padding")
            .sticky(Sticky::NSEW)
            .child(ElementLayout::new(&indicator).side(Side::Left))
            .child(
                ElementLayout::new("Radiobutton.focus")
                    .side(Side::Left)
                    .sticky(Sticky::NSEW)
                    .child(ElementLayout::new("Radiobutton.label").side(Side::Left)),
            ),
    )
}

fn create_switch_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let s = ctx.scale;
    let ttkstyle = opts.ttkstyle.as_str();
    let scheme = &opts.scheme;
    let p = Palette::new(scheme, accent(opts, SemanticColor::Primary));

    let app_bg = scheme.color(SemanticColor::Background);
    let disabled = p.disabled();
    let outline = p.off_outline();
    let hover_on = p.hover();
    let pressed_on = p.pressed();

    let final_size = s.size(60, 30);
    let img_size = s.size(1200, 600);
    let outer = s.bounds(10, 10, 1190, 590);
    let knob = s.bounds(622, 34, 1166, 566);
    let knob_pressed = s.bounds(500, 34, 1100, 566);
    let track_radius = s.coord(300);
    let knob_radius = s.coord(290);

    struct Pill {
        track: ShapeStyle,
        knob: ShapeStyle,
        pressed: bool,
    }
    let draw = |pill: Pill| {
        move |c: &mut Canvas| {
            c.rounded_rectangle(outer, track_radius, &pill.track);
            let knob = if pill.pressed { knob_pressed } else { knob };
            c.rounded_rectangle(knob, knob_radius, &pill.knob);
        }
    };
    // the "off" artwork is the "on" artwork turned upside down
    let off = |track_outline: Rgb, knob_fill: Rgb, ring: u32, pressed: bool| {
        render_flipped(
            img_size,
            final_size,
            draw(Pill {
                track: ShapeStyle::filled(app_bg).with_outline(track_outline, s.coord(24)),
                knob: ShapeStyle::filled(knob_fill).with_outline(app_bg, s.coord(ring)),
                pressed,
            }),
        )
    };
    let on = |track: ShapeStyle, knob_outline: Rgb, ring: u32, pressed: bool| {
        render(
            img_size,
            final_size,
            draw(Pill {
                track,
                knob: ShapeStyle::filled(app_bg).with_outline(knob_outline, s.coord(ring)),
                pressed,
            }),
        )
    };
    let rimmed = |fill: Rgb, rim: Rgb| ShapeStyle::filled(fill).with_outline(rim, s.coord(6));

    let img_off = off(outline, outline, 80, false)?;
    let img_off_hover = off(outline, outline, 60, false)?;
    let img_off_pressed = off(outline, outline, 60, true)?;
    let img_off_dis = off(disabled, disabled, 80, false)?;
    let img_on = on(rimmed(p.base(), p.shades.d2), p.base(), 80, false)?;
    let img_on_hover = on(rimmed(hover_on, p.shades.d2), hover_on, 60, false)?;
    let img_on_pressed = on(ShapeStyle::filled(pressed_on), pressed_on, 60, true)?;
    let img_on_dis = on(rimmed(disabled, outline), disabled, 80, false)?;

    let indicator = format!("{ttkstyle}.indicator");
    ctx.element_image_builder(&indicator, img_on.clone())
        .width(60)
        .height(30)
        .padding(Edges::new(0, 0, 75, 0))
        .sticky(Sticky::NONE)
        .map("disabled !selected", img_off_dis.clone())
        .map("disabled selected", img_on_dis.clone())
        .map("!selected pressed", img_off_pressed.clone())
        .map("!selected hover", img_off_hover.clone())
        .map("!selected", img_off.clone())
        .map("selected pressed", img_on_pressed.clone())
        .map("selected hover", img_on_hover.clone())
        .build(ctx.db)?;

    ctx.register_assets([
        img_on,
        img_off_dis,
        img_on_dis,
        img_off_pressed,
        img_off_hover,
        img_off,
        img_on_pressed,
        img_on_hover,
    ]);

    ctx.element_layout_builder(ttkstyle).build(
        ctx.db,
        ElementLayout::new("Toolbutton.border")
            .sticky(Sticky::NSEW)
            .child(
                ElementLayout::new("Toolbutton.padding")
                    .sticky(Sticky::NSEW)
                    .child(ElementLayout::new(&indicator).side(Side::Left))
                    .child(
                        ElementLayout::new("Toolbutton.label")
                            .side(Side::Right)
                            .expand(),
                    ),
            ),
    )?;

    ctx.db.configure(
        ttkstyle,
        [
            ("relief", "flat".into()),
            ("borderwidth", StyleValue::Int(0)),
            ("foreground", color(scheme.color(SemanticColor::Foreground))),
            ("background", color(app_bg)),
        ],
    )?;
    ctx.db
        .map(ttkstyle, "foreground", [("disabled", color(disabled))])
}

fn create_scrollbar_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let s = ctx.scale;
    let ttkstyle = opts.ttkstyle.as_str();
    let orient = opts.orient.unwrap_or_default();
    let shades = opts.scheme.get_shades(accent(opts, SemanticColor::Light));
    let thumb = shades.d3;

    let (thumb_size, trough_size, img_size, rect) = match orient {
        Orient::Vertical => (
            s.size(10, 40),
            s.size(18, 72),
            s.size(500, 2000),
            s.bounds(10, 10, 490, 1990),
        ),
        Orient::Horizontal => (
            s.size(40, 10),
            s.size(72, 18),
            s.size(2000, 500),
            s.bounds(10, 10, 1990, 490),
        ),
    };

    let img_thumb = render(img_size, thumb_size, |c| {
        c.rounded_rectangle(rect, s.coord(250), &ShapeStyle::filled(thumb))
    })?;
    // the trough stays empty
    let img_trough = ImageHandle::blank(img_size.0, img_size.1)?
        .resized(trough_size.0, trough_size.1)?;
    ctx.register_assets([img_trough.clone(), img_thumb.clone()]);

    let prefix = element_prefix(ttkstyle);
    let trough = format!("{prefix}.trough");
    let thumb = format!("{prefix}.thumb");
    let (sticky, trough_border, thumb_border) = match orient {
        Orient::Horizontal => (Sticky::EW, Edges::symmetric(8, 0), Edges::symmetric(10, 0)),
        Orient::Vertical => (Sticky::NS, Edges::symmetric(0, 8), Edges::symmetric(0, 10)),
    };

    let trough_element = ctx
        .element_image_builder(&trough, img_trough)
        .sticky(sticky)
        .border(trough_border);
    let thumb_element = ctx
        .element_image_builder(&thumb, img_thumb)
        .sticky(sticky)
        .border(thumb_border);
    match orient {
        Orient::Horizontal => {
            trough_element.padding(6).build(ctx.db)?;
            thumb_element.padding(12).build(ctx.db)?;
        }
        Orient::Vertical => {
            trough_element.build(ctx.db)?;
            thumb_element.build(ctx.db)?;
        }
    }

    ctx.element_layout_builder(ttkstyle).build(
        ctx.db,
        ElementLayout::new(&trough)
            .sticky(sticky)
            .child(ElementLayout::new(&thumb).sticky(Sticky::NSEW)),
    )
}

/// Field images shared by the text input styles
struct FieldImages {
    normal: ImageHandle,
    hover: ImageHandle,
    focus: ImageHandle,
    disabled: ImageHandle,
}

fn field_images(s: Scale, p: &Palette, border: Rgb, focus: Rgb) -> Result<FieldImages> {
    let img_size = s.size(800, 400);
    let final_size = s.size(200, 100);
    let xy = s.bounds(10, 10, 790, 390);
    let radius = s.coord(16);
    let width = s.coord(2);
    let underline = s.points(&[(12, 388), (788, 388)]);
    let focus_line = s.points(&[(12, 387), (788, 387)]);

    let field = |style: ShapeStyle, line: Option<(&[(f32, f32)], Rgb, u32)>| {
        render(img_size, final_size, |c| {
            c.rounded_rectangle(xy, radius, &style);
            if let Some((points, stroke, w)) = line {
                c.line(points, s.coord(w), stroke, Joint::Miter);
            }
        })
    };

    Ok(FieldImages {
        normal: field(
            ShapeStyle::outlined(border, width),
            Some((underline.as_slice(), p.shades.d3, 4)),
        )?,
        hover: field(
            ShapeStyle::outlined(border, width).with_fill(p.off_hover()),
            Some((underline.as_slice(), p.shades.d3, 4)),
        )?,
        focus: field(
            ShapeStyle::outlined(border, width),
            Some((focus_line.as_slice(), focus, 5)),
        )?,
        disabled: field(ShapeStyle::outlined(p.disabled(), width), None)?,
    })
}

/// Down and up chevrons drawn with `stroke`
fn chevrons(s: Scale, stroke: Rgb, width: u32) -> Result<(ImageHandle, ImageHandle)> {
    let canvas = s.size(1400, 755);
    let size = s.size(14, 8);
    let points = s.points(&[(20, 20), (735, 735), (700, 700), (1380, 20)]);
    let draw = |c: &mut Canvas| c.line(&points, s.coord(width), stroke, Joint::Miter);
    Ok((render(canvas, size, draw)?, render_flipped(canvas, size, draw)?))
}

/// Color roles of the text input styles
fn field_colors(opts: &BuildOptions) -> (Palette, Rgb, Rgb) {
    let color = accent(opts, SemanticColor::Light);
    let p = Palette::new(&opts.scheme, color);
    let border = p.shades.d2;
    let focus = if color == SemanticColor::Light {
        opts.scheme.color(SemanticColor::Primary)
    } else {
        p.base()
    };
    (p, border, focus)
}

fn build_field(ctx: &mut BuildContext, name: &str, images: &FieldImages) -> Result<()> {
    let s = ctx.scale;
    ctx.element_image_builder(name, images.normal.clone())
        .sticky(Sticky::NSEW)
        .border(s.px(6))
        .width(s.px(200))
        .height(s.px(50))
        .map("disabled", images.disabled.clone())
        .map("focus !readonly", images.focus.clone())
        .map("hover !disabled", images.hover.clone())
        .build(ctx.db)?;
    ctx.register_assets([
        images.normal.clone(),
        images.hover.clone(),
        images.focus.clone(),
        images.disabled.clone(),
    ]);
    Ok(())
}

fn configure_field(ctx: &mut BuildContext, opts: &BuildOptions, p: &Palette) -> Result<()> {
    let ttkstyle = opts.ttkstyle.as_str();
    let foreground = opts.scheme.color(SemanticColor::Foreground);
    ctx.db.configure(
        ttkstyle,
        [
            ("foreground", color(foreground)),
            ("insertcolor", color(foreground)),
            ("selectbackground", color(p.bg.base)),
            ("selectforeground", color(foreground)),
            ("padding", "8 4".into()),
        ],
    )?;
    ctx.db
        .map(ttkstyle, "foreground", [("disabled", color(p.disabled()))])?;
    ctx.db.map(
        ttkstyle,
        "selectbackground",
        [("hover !disabled", color(p.off_hover()))],
    )
}

fn create_spinbox_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let s = ctx.scale;
    let ttkstyle = opts.ttkstyle.as_str();
    let (p, border, focus) = field_colors(opts);
    let foreground = opts.scheme.color(SemanticColor::Foreground);

    let field = format!("{ttkstyle}.field");
    build_field(ctx, &field, &field_images(s, &p, border, focus)?)?;

    let (down, up) = chevrons(s, foreground, 100)?;
    let (down_pressed, up_pressed) = chevrons(s, foreground, 200)?;
    let (down_dis, up_dis) = chevrons(s, p.disabled(), 100)?;
    ctx.register_assets([
        down.clone(),
        up.clone(),
        down_pressed.clone(),
        up_pressed.clone(),
        down_dis.clone(),
        up_dis.clone(),
    ]);

    let uparrow = format!("{ttkstyle}.uparrow");
    ctx.element_image_builder(&uparrow, up)
        .sticky(Sticky::NONE)
        .padding((16, 4))
        .map("disabled", up_dis)
        .map("pressed !disabled", up_pressed)
        .build(ctx.db)?;

    let downarrow = format!("{ttkstyle}.downarrow");
    ctx.element_image_builder(&downarrow, down)
        .sticky(Sticky::NONE)
        .padding((16, 4))
        .map("disabled", down_dis)
        .map("pressed !disabled", down_pressed)
        .build(ctx.db)?;

    ctx.element_layout_builder(ttkstyle).build(
        ctx.db,
        ElementLayout::new(&field)
            .expand()
            .child(
                ElementLayout::new(&downarrow)
                    .side(Side::Right)
                    .sticky(Sticky::NS),
            )
            .child(
                ElementLayout::new(&uparrow)
                    .side(Side::Right)
                    .sticky(Sticky::NS),
            )
            .child(
                ElementLayout::new("Spinbox.padding")
                    .child(ElementLayout::new("Spinbox.textarea")),
            ),
    )?;

    configure_field(ctx, opts, &p)
}

fn create_entry_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let s = ctx.scale;
    let ttkstyle = opts.ttkstyle.as_str();
    let (p, border, focus) = field_colors(opts);

    let field = format!("{ttkstyle}.field");
    build_field(ctx, &field, &field_images(s, &p, border, focus)?)?;

    ctx.element_layout_builder(ttkstyle).build(
        ctx.db,
        ElementLayout::new(&field).sticky(Sticky::NSEW).child(
            ElementLayout::new("Entry.padding")
                .sticky(Sticky::NSEW)
                .child(ElementLayout::new("Entry.textarea").sticky(Sticky::NSEW)),
        ),
    )?;

    configure_field(ctx, opts, &p)
}

fn create_combobox_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let s = ctx.scale;
    let ttkstyle = opts.ttkstyle.as_str();
    let (p, border, focus) = field_colors(opts);
    let foreground = opts.scheme.color(SemanticColor::Foreground);

    let field = format!("{ttkstyle}.field");
    build_field(ctx, &field, &field_images(s, &p, border, focus)?)?;

    let (down, _) = chevrons(s, foreground, 100)?;
    let (down_pressed, _) = chevrons(s, foreground, 200)?;
    let (down_dis, _) = chevrons(s, p.disabled(), 100)?;
    ctx.register_assets([down.clone(), down_pressed.clone(), down_dis.clone()]);

    let downarrow = format!("{ttkstyle}.downarrow");
    ctx.element_image_builder(&downarrow, down)
        .sticky(Sticky::NONE)
        .padding((16, 4))
        .map("disabled", down_dis)
        .map("pressed !disabled", down_pressed)
        .build(ctx.db)?;

    ctx.element_layout_builder(ttkstyle).build(
        ctx.db,
        ElementLayout::new(&field)
            .sticky(Sticky::NSEW)
            .child(
                ElementLayout::new(&downarrow)
                    .side(Side::Right)
                    .sticky(Sticky::NS),
            )
            .child(
                ElementLayout::new("Combobox.padding")
                    .sticky(Sticky::NSEW)
                    .expand()
                    .child(ElementLayout::new("Combobox.textarea").sticky(Sticky::NSEW)),
            ),
    )?;

    configure_field(ctx, opts, &p)
}

/// The drop-down list of a combobox, part natively drawn
fn create_popdown_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let scheme = &opts.scheme;
    let selected = accent(opts, SemanticColor::Primary);
    let p = Palette::new(scheme, selected);
    let background = scheme.color(SemanticColor::Background);
    let foreground = scheme.color(SemanticColor::Foreground);

    ctx.db.configure(
        &opts.ttkstyle,
        [
            ("background", color(background)),
            ("bordercolor", color(p.light.d2)),
            ("relief", "flat".into()),
            ("borderwidth", StyleValue::Int(1)),
        ],
    )?;

    ctx.db.option_add("*TCombobox*Listbox.font", "TkBody");
    ctx.db.option_add("*TCombobox*Listbox.background", background);
    ctx.db.option_add("*TCombobox*Listbox.foreground", foreground);
    ctx.db
        .option_add("*TCombobox*Listbox.selectBackground", p.base());
    ctx.db
        .option_add("*TCombobox*Listbox.selectForeground", p.on_color);
    Ok(())
}

fn create_progressbar_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let s = ctx.scale;
    let ttkstyle = opts.ttkstyle.as_str();
    let orient = opts.orient.unwrap_or(Orient::Horizontal);
    let p = Palette::new(&opts.scheme, accent(opts, SemanticColor::Primary));

    let (img_size, final_size, rect) = match orient {
        Orient::Horizontal => (s.size(800, 200), s.size(40, 10), s.bounds(0, 0, 800, 200)),
        Orient::Vertical => (s.size(200, 800), s.size(10, 40), s.bounds(0, 0, 200, 800)),
    };
    let radius = s.coord(100);
    let bar = |fill: Rgb| {
        render(img_size, final_size, |c| {
            c.rounded_rectangle(rect, radius, &ShapeStyle::filled(fill))
        })
    };

    let img_trough = bar(p.off_hover())?;
    let img_bar = bar(p.base())?;
    ctx.register_assets([img_trough.clone(), img_bar.clone()]);

    let prefix = element_prefix(ttkstyle);
    let trough = format!("{prefix}.trough");
    let pbar = format!("{prefix}.pbar");
    let (border, bar_sticky, side) = match orient {
        Orient::Horizontal => (Edges::symmetric(s.px(5), 0), Sticky::NS, Side::Left),
        Orient::Vertical => (Edges::symmetric(0, s.px(5)), Sticky::EW, Side::Bottom),
    };

    ctx.element_image_builder(&trough, img_trough)
        .sticky(Sticky::NSEW)
        .border(border)
        .build(ctx.db)?;
    ctx.element_image_builder(&pbar, img_bar)
        .sticky(Sticky::NSEW)
        .border(border)
        .build(ctx.db)?;

    ctx.element_layout_builder(ttkstyle).build(
        ctx.db,
        ElementLayout::new(&trough)
            .sticky(Sticky::NSEW)
            .child(ElementLayout::new(&pbar).side(side).sticky(bar_sticky)),
    )?;

    ctx.db.configure(
        ttkstyle,
        [
            ("background", color(p.base())),
            ("troughcolor", color(p.off_hover())),
            ("thickness", StyleValue::Int(s.px(10).into())),
        ],
    )
}

fn create_scale_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let s = ctx.scale;
    let ttkstyle = opts.ttkstyle.as_str();
    let orient = opts.orient.unwrap_or(Orient::Horizontal);
    let p = Palette::new(&opts.scheme, accent(opts, SemanticColor::Primary));
    let app_bg = opts.scheme.color(SemanticColor::Background);

    let (track_canvas, track_size, track_rect) = match orient {
        Orient::Horizontal => (s.size(1600, 160), s.size(80, 8), s.bounds(0, 0, 1600, 160)),
        Orient::Vertical => (s.size(160, 1600), s.size(8, 80), s.bounds(0, 0, 160, 1600)),
    };
    let img_track = render(track_canvas, track_size, |c| {
        c.rounded_rectangle(track_rect, s.coord(80), &ShapeStyle::filled(p.off_pressed()))
    })?;

    let slider_canvas = s.size(640, 640);
    let slider_size = s.size(24, 24);
    let xy = s.bounds(10, 10, 630, 630);
    let slider = |fill: Rgb| {
        render(slider_canvas, slider_size, |c| {
            c.ellipse(xy, &ShapeStyle::filled(fill).with_outline(app_bg, s.coord(60)))
        })
    };
    let img_slider = slider(p.base())?;
    let img_slider_hover = slider(p.hover())?;
    let img_slider_pressed = slider(p.pressed())?;
    let img_slider_dis = slider(p.disabled())?;
    ctx.register_assets([
        img_track.clone(),
        img_slider.clone(),
        img_slider_hover.clone(),
        img_slider_pressed.clone(),
        img_slider_dis.clone(),
    ]);

    let prefix = element_prefix(ttkstyle);
    let track = format!("{prefix}.track");
    let handle = format!("{prefix}.slider");
    let (sticky, border, side) = match orient {
        Orient::Horizontal => (Sticky::EW, Edges::symmetric(s.px(4), 0), Side::Left),
        Orient::Vertical => (Sticky::NS, Edges::symmetric(0, s.px(4)), Side::Top),
    };

    ctx.element_image_builder(&track, img_track)
        .sticky(sticky)
        .border(border)
        .build(ctx.db)?;
    ctx.element_image_builder(&handle, img_slider)
        .sticky(Sticky::NONE)
        .map("disabled", img_slider_dis)
        .map("pressed !disabled", img_slider_pressed)
        .map("hover !disabled", img_slider_hover)
        .build(ctx.db)?;

    ctx.element_layout_builder(ttkstyle).build(
        ctx.db,
        ElementLayout::new("Scale.focus").sticky(Sticky::NSEW).child(
            ElementLayout::new("Scale.padding").sticky(Sticky::NSEW).child(
                ElementLayout::new(&track)
                    .sticky(sticky)
                    .child(ElementLayout::new(&handle).side(side)),
            ),
        ),
    )?;

    ctx.db
        .configure(ttkstyle, [("background", color(app_bg))])
}

fn create_label_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let scheme = &opts.scheme;
    let foreground = match opts.color {
        Some(c) => scheme.color(c),
        None => scheme.color(SemanticColor::Foreground),
    };
    let disabled = Palette::new(scheme, SemanticColor::Light).disabled();

    ctx.db.configure(
        &opts.ttkstyle,
        [
            ("font", "TkBody".into()),
            ("foreground", color(foreground)),
            ("background", color(scheme.color(SemanticColor::Background))),
        ],
    )?;
    ctx.db
        .map(&opts.ttkstyle, "foreground", [("disabled", color(disabled))])
}

fn create_frame_style(ctx: &mut BuildContext, opts: &BuildOptions) -> Result<()> {
    let background = opts
        .scheme
        .color(opts.color.unwrap_or(SemanticColor::Background));
    ctx.db.configure(
        &opts.ttkstyle,
        [
            ("background", color(background)),
            ("relief", "flat".into()),
        ],
    )
}
