use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;
use totem_social::FontFace as _;

#[derive(Parser, Debug)]
#[command(name = "totem-social", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a social preview to a JPEG or PNG file.
    Render(RenderArgs),
    /// Print the cache key of a params file.
    Key(KeyArgs),
    /// Load the font registry and print diagnostics.
    Fonts(FontsArgs),
}

#[derive(Parser, Debug)]
struct ParamArgs {
    /// Params JSON; flags below override its fields.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Size preset: square, landscape, portrait or story.
    #[arg(long)]
    format: Option<String>,

    #[arg(long)]
    background: Option<String>,
    #[arg(long)]
    avatar: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    subtitle: Option<String>,
    #[arg(long)]
    meta: Option<String>,

    /// Do not draw the avatar.
    #[arg(long, default_value_t = false)]
    no_avatar: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Output path; `.png` writes PNG, anything else JPEG.
    #[arg(long)]
    out: PathBuf,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = totem_social::DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Directory holding the three registry fonts (overrides TOTEM_SOCIAL_FONTS_DIR).
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Logo file, SVG or raster (overrides TOTEM_SOCIAL_LOGO).
    #[arg(long)]
    logo: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct KeyArgs {
    #[command(flatten)]
    params: ParamArgs,
}

#[derive(Parser, Debug)]
struct FontsArgs {
    /// Directory holding the three registry fonts (overrides TOTEM_SOCIAL_FONTS_DIR).
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Report which face draws each char of this text.
    #[arg(long)]
    probe: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Key(args) => cmd_key(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn build_params(args: &ParamArgs) -> anyhow::Result<totem_social::ImageParams> {
    let mut params = match &args.params {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read params '{}'", path.display()))?;
            serde_json::from_str::<totem_social::ImageParams>(&text)
                .with_context(|| format!("parse params '{}'", path.display()))?
        }
        None => totem_social::ImageParams::default(),
    };

    if let Some(key) = &args.format {
        let format = totem_social::SocialFormat::from_key(key)
            .with_context(|| format!("unknown format '{key}'"))?;
        params = format.apply(&params);
    }

    let overrides = [
        (&args.background, &mut params.background_path),
        (&args.avatar, &mut params.author_img_path),
        (&args.author, &mut params.author_name),
        (&args.title, &mut params.title),
        (&args.subtitle, &mut params.subtitle),
        (&args.meta, &mut params.meta_line),
    ];
    for (flag, field) in overrides {
        if let Some(v) = flag {
            *field = v.clone();
        }
    }
    if args.no_avatar {
        params.include_avatar = false;
    }
    Ok(params)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let params = build_params(&args.params)?;

    let mut opts = totem_social::RendererOpts::from_env();
    if let Some(dir) = &args.fonts_dir {
        opts.fonts = totem_social::FontPaths::in_dir(dir);
    }
    if args.logo.is_some() {
        opts.logo = args.logo.clone();
    }

    let renderer = totem_social::Renderer::new(&opts)?;
    let img = renderer.generate_image(&params)?;

    let is_png = args
        .out
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    let bytes = if is_png {
        totem_social::encode_png(&img)?
    } else {
        totem_social::encode_jpeg(&img, args.quality)?
    };

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write image '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, key {})",
        args.out.display(),
        img.width(),
        img.height(),
        totem_social::cache_key(&params).to_hex()
    );
    Ok(())
}

fn cmd_key(args: KeyArgs) -> anyhow::Result<()> {
    let params = build_params(&args.params)?;
    let key = totem_social::cache_key(&params);
    println!("decimal: {key}");
    println!("hex:     {}", key.to_hex());
    Ok(())
}

fn cmd_fonts(args: FontsArgs) -> anyhow::Result<()> {
    let mut paths = totem_social::RendererOpts::from_env().fonts;
    if let Some(dir) = &args.fonts_dir {
        paths = totem_social::FontPaths::in_dir(dir);
    }

    for (idx, path) in paths.ordered().into_iter().enumerate() {
        let face = totem_social::OutlineFace::load(path)?;
        let styles = face.style_names().collect::<Vec<_>>();
        println!("[{idx}] {}", path.display());
        println!("    family: {}", face.family());
        println!("    sha256: {}", sha256_hex(face.bytes()));
        if styles.is_empty() {
            println!("    styles: (static)");
        } else {
            println!("    styles: {}", styles.join(", "));
        }
    }

    if let Some(text) = &args.probe {
        let registry = totem_social::FontRegistry::load(&paths)?;
        for run in totem_social::split_runs(&registry, text) {
            let family = registry.face(run.face).family();
            println!("{:?} -> [{}] {family}", run.text, run.face);
        }
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
