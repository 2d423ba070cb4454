//! flatkit CLI
//!
//! Lists color schemes and engines, prints what a theme generates for a
//! style keyword, and exports generated element images as PNG files.

mod commands;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use flatkit_style::{Orient, Style, StyleConfig, WidgetClass};
use flatkit_widgets::StyleKeyword;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flatkit")]
#[command(about = "Inspect and export generated flat themes", version)]
struct Cli {
    /// Style configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging, repeat for more detail
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available color schemes
    Schemes {
        /// Print every color of each scheme
        #[arg(long)]
        colors: bool,
    },

    /// List the registered theme engines and their keywords
    Engines,

    /// Generate one style and print its options, maps, layout and elements
    Inspect {
        /// Theme name, such as `superhero` or `darkly-chromatk`
        theme: String,

        /// Style keyword, such as `primary-outline`
        #[arg(default_value = "")]
        keyword: StyleKeyword,

        /// Widget class the keyword applies to
        #[arg(long, default_value = "button")]
        class: WidgetClass,

        /// Orientation for scrollbars, scales and the like
        #[arg(long)]
        orient: Option<Orient>,
    },

    /// Generate styles and write their element images as PNG files
    Export {
        /// Theme name
        theme: String,

        /// Output directory
        dir: PathBuf,

        /// Style keywords to generate; every widget class when omitted
        #[arg(short, long = "keyword")]
        keywords: Vec<StyleKeyword>,

        /// Widget class the keywords apply to
        #[arg(long, default_value = "button")]
        class: WidgetClass,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_style(config: Option<&PathBuf>) -> Result<Style> {
    let config = match config {
        Some(path) => StyleConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => StyleConfig::default(),
    };
    Style::new(config).context("Failed to set up the style registry")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let style = load_style(cli.config.as_ref())?;
    match cli.command {
        Commands::Schemes { colors } => commands::schemes(&style, colors),
        Commands::Engines => commands::engines(&style),
        Commands::Inspect {
            theme,
            keyword,
            class,
            orient,
        } => commands::inspect(&style, &theme, keyword, class, orient),
        Commands::Export {
            theme,
            dir,
            keywords,
            class,
        } => commands::export(&style, &theme, &dir, &keywords, class),
    }
}
