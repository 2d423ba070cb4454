use anyhow::{bail, Context, Result};
use flatkit_core::StateSpec;
use flatkit_style::{ElementLayout, Orient, Style, StyleDb, WidgetClass};
use flatkit_widgets::StyleKeyword;
use std::path::{Path, PathBuf};

pub fn schemes(style: &Style, colors: bool) -> Result<()> {
    for name in style.scheme_names() {
        let Some(scheme) = style.scheme_get(&name) else {
            continue;
        };
        println!("{:<12} {}", scheme.name(), scheme.mode());
        if colors {
            for (color, value) in scheme.iter() {
                println!("    {:<12} {}", color, value);
            }
        }
    }
    Ok(())
}

pub fn engines(style: &Style) -> Result<()> {
    for name in style.engine_names() {
        let Some((base, keywords)) = style.with_engine(&name, |entry| {
            (entry.engine().base().to_string(), entry.handlers().keywords())
        }) else {
            continue;
        };
        println!("{name} (base: {base})");
        for keyword in keywords {
            println!("    {keyword}");
        }
    }
    Ok(())
}

/// Orientation to use for `class`, defaulting for orientable classes
fn orient_for(class: WidgetClass, orient: Option<Orient>) -> Option<Orient> {
    class
        .is_orientable()
        .then(|| orient.unwrap_or_default())
}

fn use_theme(style: &Style, theme: &str) -> Result<()> {
    style
        .theme_use(theme)
        .with_context(|| format!("Failed to use theme '{theme}'"))
}

pub fn inspect(
    style: &Style,
    theme: &str,
    keyword: StyleKeyword,
    class: WidgetClass,
    orient: Option<Orient>,
) -> Result<()> {
    use_theme(style, theme)?;
    let class = keyword.class_for(class);
    if !class.is_themed() {
        // native styles only configure live widgets
        println!("{class} is drawn natively");
        return Ok(());
    }
    let request = keyword.request(class, orient_for(class, orient));
    style
        .route_style(&request)
        .with_context(|| format!("Failed to build '{keyword}' for {class}"))?;

    let name = request.ttkstyle.as_str();
    if !style.is_realized(name) {
        bail!("Theme '{theme}' has no builder for {name}");
    }

    style.with_db(|db| print_style(db, name));
    for sub in &request.hybrid_styles {
        let sub = request.sub_request(*sub);
        println!();
        style.with_db(|db| print_style(db, &sub.ttkstyle));
    }
    Ok(())
}

fn print_style(db: &StyleDb, name: &str) {
    println!("{name}");

    let options = db.style_options(name);
    if !options.is_empty() {
        println!("  options:");
        for (option, value) in options {
            println!("    {option:<18} {value}");
        }
    }

    let mapped = db.mapped_options(name);
    if !mapped.is_empty() {
        println!("  maps:");
        for option in mapped {
            println!("    {option}");
            for (spec, value) in db.state_map(name, option).unwrap_or_default() {
                println!("      [{spec}] {value}");
            }
        }
    }

    if let Some(layout) = db.layout_of(name) {
        println!("  layout:");
        for node in layout {
            print_layout(node, 2);
        }
        println!("  elements:");
        for node in layout.iter().flat_map(ElementLayout::walk) {
            let Some(element) = db.element(&node.element) else {
                continue;
            };
            println!(
                "    {} {}x{} border {} padding {}",
                node.element,
                element.image.width(),
                element.image.height(),
                element.border,
                element.padding
            );
            for (spec, _) in &element.states {
                println!("      [{spec}]");
            }
        }
    }
}

fn print_layout(node: &ElementLayout, depth: usize) {
    let mut line = format!("{:indent$}{}", "", node.element, indent = depth * 2);
    if let Some(side) = node.side {
        line.push_str(&format!(" -side {}", side.as_str()));
    }
    if let Some(sticky) = node.sticky {
        line.push_str(&format!(" -sticky {sticky}"));
    }
    if node.expand {
        line.push_str(" -expand 1");
    }
    println!("{line}");
    for child in &node.children {
        print_layout(child, depth + 1);
    }
}

/// File name for an element image, `state` naming a state image
fn file_name(element: &str, state: Option<&StateSpec>) -> String {
    let stem = match state {
        Some(spec) => format!("{element}[{}]", spec.to_string().replace('!', "not-")),
        None => element.to_string(),
    };
    let stem: String = stem
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            '[' | ']' | ' ' => '_',
            _ => '-',
        })
        .collect();
    format!("{}.png", stem.trim_end_matches('_'))
}

pub fn export(
    style: &Style,
    theme: &str,
    dir: &Path,
    keywords: &[StyleKeyword],
    class: WidgetClass,
) -> Result<()> {
    use_theme(style, theme)?;

    let requests: Vec<_> = if keywords.is_empty() {
        WidgetClass::ALL
            .into_iter()
            .filter(|class| class.is_themed())
            .map(|class| StyleKeyword::default().request(class, orient_for(class, None)))
            .collect()
    } else {
        keywords
            .iter()
            .map(|keyword| {
                let orient = orient_for(keyword.class_for(class), None);
                keyword.request(class, orient)
            })
            .collect()
    };
    for request in &requests {
        style
            .route_style(request)
            .with_context(|| format!("Failed to build {}", request.ttkstyle))?;
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let written = style.with_db(|db| write_elements(db, dir))?;
    tracing::info!(theme, count = written, dir = %dir.display(), "exported element images");
    println!("Wrote {written} images to {}", dir.display());
    Ok(())
}

fn write_elements(db: &StyleDb, dir: &Path) -> Result<usize> {
    let mut written = 0;
    for name in db.element_names() {
        let Some(element) = db.element(name) else {
            continue;
        };
        let images = std::iter::once((None, &element.image))
            .chain(element.states.iter().map(|(spec, image)| (Some(spec), image)));
        for (spec, image) in images {
            let path: PathBuf = dir.join(file_name(name, spec));
            image
                .save_png(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::debug!(path = %path.display(), "wrote image");
            written += 1;
        }
    }
    Ok(written)
}
