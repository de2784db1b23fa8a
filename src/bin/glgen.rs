//! CLI entry point: fetch (or read) the registry, resolve one target
//! configuration, and write the generated header into the output directory.

use anyhow::{Context, Result};
use clap::Parser;
use glgen::{Config, Version, emit, fetch};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "glgen",
    version,
    about = "Generate OpenGL bindings from the Khronos XML registry"
)]
struct Cli {
    /// API family to resolve (gl, gles2, ...)
    #[arg(long, default_value = "gl")]
    api: String,

    /// Target API version, MAJOR.MINOR
    #[arg(short = 'g', long = "gl", value_name = "VERSION", default_value = "3.1")]
    gl_version: String,

    /// Target profile; scopes profile-tagged removals
    #[arg(long, default_value = "")]
    profile: String,

    /// Apply profile-scoped removals unconditionally (core build)
    #[arg(long)]
    core: bool,

    /// Build-tag string passed through to the emitted surface
    #[arg(long, default_value = "")]
    tags: String,

    /// Package label for the emitted surface
    #[arg(short = 'p', long = "package", default_value = "gl")]
    package: String,

    /// Output directory
    #[arg(short = 'o', long = "out", default_value = ".")]
    out: PathBuf,

    /// Read the registry from a local file instead of the download cache
    #[arg(long, value_name = "PATH")]
    registry: Option<PathBuf>,

    /// Force an update of the cached gl.xml
    #[arg(short = 'f', long)]
    force_update: bool,

    /// Also write the resolved surface as <package>.json
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let version: Version = cli
        .gl_version
        .parse()
        .with_context(|| format!("invalid target version '{}'", cli.gl_version))?;
    let config = Config {
        api: cli.api.clone(),
        version,
        profile: cli.profile.clone(),
        core: cli.core,
        tags: cli.tags.clone(),
        package: cli.package.clone(),
    };

    let xml = match &cli.registry {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading registry file {}", path.display()))?,
        None => fetch::load_registry(cli.force_update)?,
    };

    info!(api = %config.api, version = %config.version, profile = %config.profile, "resolving registry");
    let registry = glgen::generate(&xml, &config)?;
    info!(
        enums = registry.enums.len(),
        commands = registry.commands.len(),
        "resolved surface"
    );

    fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating output directory {}", cli.out.display()))?;

    let header_path = cli.out.join(format!("{}.h", config.package));
    info!(path = %header_path.display(), "writing header");
    let mut header = BufWriter::new(
        File::create(&header_path)
            .with_context(|| format!("creating {}", header_path.display()))?,
    );
    emit::write_header(&mut header, &registry)?;
    header.flush()?;

    if cli.json {
        let json_path = cli.out.join(format!("{}.json", config.package));
        info!(path = %json_path.display(), "writing surface dump");
        let mut dump = BufWriter::new(
            File::create(&json_path)
                .with_context(|| format!("creating {}", json_path.display()))?,
        );
        emit::write_json(&mut dump, &registry)?;
        dump.flush()?;
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
