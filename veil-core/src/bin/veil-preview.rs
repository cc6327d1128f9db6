//! Render the reveal markup for a local image.
//!
//! Builds the full-quality descriptor and an inline placeholder for the
//! given image and prints the markup a host would mount, in the state it
//! would be in on a renderer without visibility observation.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;

use veil_config::util::non_empty_var;
use veil_config::{RevealConfig, RevealConfigSource};
use veil_core::{
    ContentElement, RevealController, RevealMessage, RevealProps, lqip,
};

#[derive(Debug, Parser)]
#[command(name = "veil-preview", version, about)]
struct Args {
    /// Image to preview.
    image: PathBuf,

    /// Width of the inline placeholder in pixels.
    #[arg(long, default_value_t = lqip::DEFAULT_PLACEHOLDER_WIDTH)]
    width: u32,

    /// Blur strength override ("0" disables the cross-fade).
    #[arg(long)]
    blur: Option<String>,

    /// Reveal configuration file (TOML or JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render the state after the content reported it loaded.
    #[arg(long)]
    loaded: bool,

    /// Print only the placeholder SVG.
    #[arg(long)]
    placeholder_only: bool,
}

fn init_logger(filter: Option<&str>) {
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
        return;
    }

    let mut builder = Builder::new();
    builder.target(Target::Stderr);
    match filter {
        Some(filter) => {
            builder.parse_filters(filter);
        }
        None => {
            builder
                .filter_level(LevelFilter::Warn)
                .filter_module("veil_core", LevelFilter::Debug);
        }
    }
    builder.init();
}

/// `--config` replaces the file lookup of [`RevealConfig::load_from_env`];
/// `VEIL_*` scalar overrides apply either way.
fn load_config(
    args: &Args,
) -> anyhow::Result<(RevealConfig, RevealConfigSource)> {
    match &args.config {
        Some(path) => {
            let mut config = RevealConfig::load_from_file(path)?;
            config.apply_overrides_with(non_empty_var);
            Ok((config, RevealConfigSource::File(path.clone())))
        }
        None => RevealConfig::load_from_env(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, source) = load_config(&args)?;
    // The config carries the log filter, so the logger starts after it.
    init_logger(config.log_filter.as_deref());
    log::debug!("reveal config loaded from {source:?}");
    if let Some(blur) = &args.blur {
        config.blur_strength = blur.as_str().into();
    }

    let bytes = std::fs::read(&args.image).with_context(|| {
        format!("failed to read image {}", args.image.display())
    })?;
    let source = args.image.display().to_string();

    let full = lqip::describe(&bytes, source.as_str())
        .with_context(|| format!("failed to describe {source}"))?;
    let placeholder = lqip::inline_placeholder(&bytes, args.width)
        .with_context(|| format!("failed to build placeholder for {source}"))?;
    log::info!(
        "full {}x{} {}, placeholder {}x{} {}",
        full.width,
        full.height,
        full.format,
        placeholder.width,
        placeholder.height,
        placeholder.format
    );

    let props = RevealProps::new(placeholder, full, ContentElement::img(source))
        .with_config(&config);
    let mut controller = RevealController::new(props, None);
    controller.mount();
    if args.loaded {
        controller.update(RevealMessage::ContentLoad);
    }

    let view = controller.view();
    if args.placeholder_only {
        println!("{}", view.placeholder.to_svg_markup());
    } else {
        println!("{}", view.to_markup());
    }
    log::debug!("rendered in state {}", controller.reveal_state());

    Ok(())
}
