use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "capline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Overlay a caption onto an image and write the result as a PNG.
    Overlay(OverlayArgs),
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// Input image (png or jpeg).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// TrueType/OpenType font file for the caption.
    #[arg(long)]
    font: PathBuf,

    /// Overlay spec JSON. When present, the flags below are ignored.
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Caption text (required unless --spec is given).
    #[arg(long)]
    text: Option<String>,

    /// Panel color as #rrggbb or #rrggbbaa.
    #[arg(long, default_value = "#000000aa")]
    panel_color: capline::Color,

    /// Text color as #rrggbb or #rrggbbaa.
    #[arg(long, default_value = "#ffffff")]
    text_color: capline::Color,

    /// Corner radius in pixels (0 = sharp).
    #[arg(long, default_value_t = 0)]
    corner_radius: u32,

    /// Reframe to this aspect before layout, e.g. 1000x1500.
    #[arg(long, value_parser = parse_aspect)]
    aspect: Option<(u32, u32)>,

    /// Uppercase the caption before rendering.
    #[arg(long)]
    uppercase: bool,

    /// Draw a drop shadow behind the panel.
    #[arg(long)]
    shadow: bool,
}

fn parse_aspect(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: u32 = w.parse().map_err(|_| format!("bad aspect width '{w}'"))?;
    let h: u32 = h.parse().map_err(|_| format!("bad aspect height '{h}'"))?;
    Ok((w, h))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Overlay(args) => cmd_overlay(args),
    }
}

fn read_spec_json(path: &Path) -> anyhow::Result<capline::OverlaySpec> {
    let f = File::open(path).with_context(|| format!("open spec '{}'", path.display()))?;
    let r = BufReader::new(f);
    let spec: capline::OverlaySpec =
        serde_json::from_reader(r).with_context(|| "parse overlay spec JSON")?;
    Ok(spec)
}

fn build_spec(args: &OverlayArgs) -> anyhow::Result<capline::OverlaySpec> {
    if let Some(path) = &args.spec {
        return read_spec_json(path);
    }
    let text = args
        .text
        .clone()
        .context("--text is required when no --spec is given")?;

    let mut spec = capline::OverlaySpec::new(text);
    spec.panel_color = args.panel_color;
    spec.text_color = args.text_color;
    spec.corner_radius = args.corner_radius;
    spec.target_aspect = args.aspect;
    spec.uppercase = args.uppercase;
    if args.shadow {
        spec.shadow = Some(capline::ShadowSpec::default());
    }
    Ok(spec)
}

fn decode_image(path: &Path) -> anyhow::Result<capline::RasterBuffer> {
    let img = image::open(path)
        .map_err(|e| capline::CaplineError::image_decode(e.to_string()))
        .with_context(|| format!("decode '{}'", path.display()))?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok(capline::RasterBuffer::from_pixels(w, h, rgba.into_raw())?)
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    let spec = build_spec(&args)?;
    spec.validate()?;

    let font_bytes = std::fs::read(&args.font)
        .with_context(|| format!("read font '{}'", args.font.display()))?;
    let library = capline::FontLibrary::install(&font_bytes)?;
    let renderer = capline::FontdueRenderer::new(library);

    let source = decode_image(&args.in_path)?;
    let out = capline::overlay(&spec, &source, &renderer)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let (w, h) = (out.width(), out.height());
    image::save_buffer_with_format(
        &args.out,
        &out.into_pixels(),
        w,
        h,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
