// Karamap CLI
// Generates the Karabiner-Elements rules and writes them into a profile

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use karamap_core::output::{default_karabiner_json_path, render_dry_run, write_to_profile};
use karamap_core::resolve::analyze;
use karamap_core::{generate, resolve_table, Settings};

/// Karabiner-Elements rule generator for a JIS TrackPoint keyboard
#[derive(Parser, Debug)]
#[command(name = "karamap")]
#[command(author = "karamap contributors")]
#[command(version)]
#[command(about = "Generate Karabiner-Elements rules for a JIS TrackPoint keyboard", long_about = None)]
struct Args {
    /// TOML settings file (default: ~/.config/karamap/settings.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Karabiner profile to write into
    #[arg(short, long, value_name = "NAME")]
    profile: Option<String>,

    /// Path to karabiner.json
    #[arg(long, value_name = "PATH")]
    karabiner_json: Option<PathBuf>,

    /// Print the generated rules instead of writing them
    #[arg(long)]
    dry_run: bool,

    /// Report modifier combinations no rule or several rules handle, then exit
    #[arg(long)]
    check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

/// Settings from `--config` (or the default location) with CLI overrides applied
fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load_default().context("failed to load default settings")?,
    };

    if let Some(name) = &args.profile {
        settings.set_profile_name(name.clone());
    }
    if let Some(path) = &args.karabiner_json {
        settings.set_karabiner_json(path.clone());
    }
    Ok(settings)
}

fn karabiner_json_path(settings: &Settings) -> Result<PathBuf> {
    match settings.karabiner_json() {
        Some(path) => Ok(path.to_path_buf()),
        None => default_karabiner_json_path()
            .ok_or_else(|| anyhow!("cannot locate home directory; pass --karabiner-json")),
    }
}

fn run(args: &Args) -> Result<()> {
    let settings = load_settings(args)?;

    if args.check {
        let report = analyze(&resolve_table(&settings));
        print!("{}", report);
        let ambiguous = report.problems().count();
        if ambiguous > 0 {
            log::warn!("{} source key(s) have unhandled or overlapping combinations", ambiguous);
        }
        return Ok(());
    }

    let rules = [generate(&settings)];

    if args.dry_run {
        println!("{}", render_dry_run(settings.profile_name(), &rules)?);
        return Ok(());
    }

    let path = karabiner_json_path(&settings)?;
    write_to_profile(&path, settings.profile_name(), &rules)?;
    println!(
        "Updated profile \"{}\" in {}",
        settings.profile_name(),
        path.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(&args)
}
