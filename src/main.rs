//! Command-line front end: budgeted precompute and dump of highest points.

mod system;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use zenith_cache::{ElevationCache, SaveStore, load_cache, save_cache, write_dump};
use zenith_scan::{SCAN_REV, ScanParams};
use zenith_sched::precalculate;

#[derive(Parser)]
#[command(
    name = "zenith",
    about = "Locate the highest point on every body of a star system"
)]
struct Cli {
    /// Star-system definition (TOML). Uses the built-in demo system when absent.
    #[arg(long, global = true)]
    system: Option<PathBuf>,
    /// Save store holding cached results across runs.
    #[arg(long, global = true, default_value = "zenith-save.toml")]
    save: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pre-compute highest points in priority order within a time budget.
    Precalc {
        /// Budget in milliseconds; negative runs to completion.
        #[arg(long, default_value_t = 5_000)]
        budget_ms: i64,
    },
    /// Force a full precompute, then export every body's highest point.
    Dump {
        /// Output path for the dump file.
        #[arg(long, default_value = "zenith-dump.cfg")]
        out: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run(Cli::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let system = system::load_system(cli.system.as_deref())?;
    let mut cache = ElevationCache::new(ScanParams::default());
    if cli.save.exists() {
        let store = SaveStore::load_path(&cli.save)?;
        load_cache(&mut cache, &store, SCAN_REV);
    }

    match cli.command {
        Command::Precalc { budget_ms } => {
            let budget = u64::try_from(budget_ms)
                .ok()
                .map(Duration::from_millis);
            precalculate(&system, &mut cache, budget);
        }
        Command::Dump { out } => {
            precalculate(&system, &mut cache, None);
            let written = write_dump(&cache, &out)?;
            log::info!("wrote {} bodies' data to {}", written, out.display());
        }
    }

    flush(&cache, &cli.save)?;
    Ok(())
}

/// Persist the cache. Skipped entirely while the cache is empty so an
/// existing save is never clobbered by a fruitless run.
fn flush(cache: &ElevationCache, path: &Path) -> Result<(), Box<dyn Error>> {
    if cache.is_empty() {
        return Ok(());
    }
    let mut store = SaveStore::new();
    save_cache(cache, &mut store, SCAN_REV);
    store.save_path(path)?;
    Ok(())
}
