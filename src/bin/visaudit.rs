use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "visaudit",
    version,
    about = "Overlay composition guides on a page screenshot"
)]
struct Cli {
    /// Page to capture (e.g. http://localhost:3000).
    #[arg(required_unless_present = "image")]
    url: Option<String>,

    /// Viewport width.
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Viewport height.
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Output directory.
    #[arg(long, default_value = "/tmp/visual-audit/")]
    output: PathBuf,

    /// Capture the full scrollable page.
    #[arg(long)]
    full_page: bool,

    /// Audit an existing image instead of capturing `url`.
    #[arg(long, conflicts_with = "url")]
    image: Option<PathBuf>,

    /// Style table JSON overriding the built-in colors and widths.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Font file tried before the default legend fonts.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output image format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Tiff,
    Bmp,
    Qoi,
    Webp,
}

impl FormatChoice {
    fn image_format(self) -> image::ImageFormat {
        match self {
            FormatChoice::Png => image::ImageFormat::Png,
            FormatChoice::Tiff => image::ImageFormat::Tiff,
            FormatChoice::Bmp => image::ImageFormat::Bmp,
            FormatChoice::Qoi => image::ImageFormat::Qoi,
            FormatChoice::Webp => image::ImageFormat::WebP,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("create output dir '{}'", cli.output.display()))?;

    let source = load_source(&cli)?;

    let mut opts = visaudit::OverlayOpts::default().with_format(cli.format.image_format());
    if let Some(path) = &cli.style {
        opts = opts.with_style(visaudit::StyleTable::from_path(path)?);
    }
    if let Some(path) = &cli.font {
        opts = opts.with_fonts(visaudit::FontChain::default().with_front(path));
    }

    let set = visaudit::Compositor::new(opts)?.run(&source, &cli.output)?;

    println!("Generated files:");
    for path in set.paths() {
        println!("  {}", path.display());
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .try_init();
}

fn load_source(cli: &Cli) -> anyhow::Result<image::RgbaImage> {
    if let Some(path) = &cli.image {
        return read_image(path);
    }

    let url = cli
        .url
        .as_deref()
        .context("a url or --image is required")?;
    let req = visaudit::CaptureRequest::new(url)
        .with_viewport(cli.width, cli.height)
        .with_full_page(cli.full_page);

    eprintln!("capturing {url} at {}x{}", cli.width, cli.height);
    let dest = std::env::temp_dir().join(format!("visaudit-capture-{}.png", std::process::id()));
    let captured = visaudit::PlaywrightCapture::default().capture(&req, &dest);
    let _ = std::fs::remove_file(&dest);
    Ok(captured?)
}

fn read_image(path: &Path) -> anyhow::Result<image::RgbaImage> {
    let img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}
