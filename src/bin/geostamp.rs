use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use geostamp::{
    Canvas, Compositor, FontSet, LocationStatus, ParleyTextBackend, StampStyle, WatermarkMetadata,
};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "geostamp", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Burn a watermark into an image and write it as JPEG.
    Stamp(StampArgs),
    /// Print the watermark layout for a frame size as JSON.
    Layout(LayoutArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PendingLocation {
    Searching,
    Unavailable,
}

#[derive(Parser, Debug)]
struct FontArgs {
    /// Style JSON (missing fields keep the default look).
    #[arg(long)]
    style: Option<PathBuf>,

    /// Font file for the time text.
    #[arg(long)]
    font_time: Option<PathBuf>,

    /// Font file for the date line.
    #[arg(long)]
    font_date: Option<PathBuf>,

    /// Font file for the location lines.
    #[arg(long)]
    font_location: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StampArgs {
    /// Input image (PNG, JPEG, ...).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,

    /// Time text, e.g. "09:30".
    #[arg(long)]
    time: String,

    /// Date text, e.g. "24 Januari 2024".
    #[arg(long)]
    date: String,

    /// Pre-formatted location line; repeat for more lines.
    #[arg(long = "line", conflicts_with_all = ["lat", "location_status"])]
    lines: Vec<String>,

    /// Latitude of a location fix.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of a location fix.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Show a pending or failed location instead of a fix.
    #[arg(long, value_enum, conflicts_with = "lat")]
    location_status: Option<PendingLocation>,

    /// The frame came from a front-facing camera and must be flipped.
    #[arg(long, default_value_t = false)]
    mirror: bool,

    /// Also print the result as a data URL on stdout.
    #[arg(long, default_value_t = false)]
    data_url: bool,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[arg(long)]
    width: u32,

    #[arg(long)]
    height: u32,

    /// Time text to measure.
    #[arg(long)]
    time: String,

    /// Number of location lines.
    #[arg(long, default_value_t = 2)]
    lines: usize,

    #[command(flatten)]
    fonts: FontArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let cli = Cli::parse();
    match cli.cmd {
        Command::Stamp(args) => cmd_stamp(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing init error: {e}"))
}

fn compositor(args: &FontArgs) -> anyhow::Result<Compositor<ParleyTextBackend>> {
    let style = match &args.style {
        Some(path) => StampStyle::from_path(path)?,
        None => StampStyle::default(),
    };
    let compositor = match (&args.font_time, &args.font_date, &args.font_location) {
        (Some(time), Some(date), Some(location)) => {
            let fonts = FontSet::from_files(time, date, location)?;
            Compositor::with_fonts(style, &fonts)?
        }
        (None, None, None) => Compositor::with_system_fonts(style)
            .context("no usable system fonts; pass --font-time/--font-date/--font-location")?,
        _ => anyhow::bail!("--font-time, --font-date and --font-location must be given together"),
    };
    Ok(compositor)
}

fn cmd_stamp(args: StampArgs) -> anyhow::Result<()> {
    let mut compositor = compositor(&args.fonts)?;

    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read input image '{}'", args.in_path.display()))?;
    let frame = geostamp::decode_frame(&bytes)
        .with_context(|| format!("decode input image '{}'", args.in_path.display()))?;

    let meta = WatermarkMetadata::new(args.time, args.date).mirrored(args.mirror);
    let status = match (args.lat, args.lon, args.location_status) {
        (Some(latitude), Some(longitude), _) => Some(LocationStatus::Fix {
            latitude,
            longitude,
        }),
        (_, _, Some(PendingLocation::Searching)) => Some(LocationStatus::Searching),
        (_, _, Some(PendingLocation::Unavailable)) => Some(LocationStatus::Unavailable),
        _ => None,
    };
    let meta = match status {
        Some(status) => meta.with_location(&status, &compositor.style().labels),
        None => meta.with_location_lines(args.lines),
    };

    let out = compositor.composite(&frame, &meta)?;
    write_output(&args.out, &out.bytes)?;
    if args.data_url {
        println!("{}", out.to_data_url());
    }
    eprintln!("wrote {} ({}x{})", args.out.display(), out.width, out.height);
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let mut compositor = compositor(&args.fonts)?;
    let meta = WatermarkMetadata::new(args.time, String::new())
        .with_location_lines(std::iter::repeat_n(String::new(), args.lines));
    let canvas = Canvas {
        width: args.width,
        height: args.height,
    };
    let metrics = compositor.layout(canvas, &meta)?;
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write jpeg '{}'", path.display()))
}
