use std::{env, io, process};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use memhog::cli::{self, Action, Config};
use memhog::fill;
use memhog::meminfo;
use memhog::region::Region;
use memhog::sys;

/// Growth chunk when the host will not reveal its page size.
const FALLBACK_CHUNK: usize = 1024;

fn main() {
    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("memhog");

    let action = match cli::parse(args.get(1..).unwrap_or_default()) {
        Ok(action) => action,
        Err(err) => {
            eprintln!("{err}");
            if err.wants_hint() {
                eprintln!("Try '{prog} help' for help.");
            }
            process::exit(1);
        }
    };

    match action {
        Action::Help => print!("{}", cli::usage(prog)),
        Action::Version => println!("memhog version {}", env!("CARGO_PKG_VERSION")),
        Action::Run(cfg) => {
            init_tracing(cfg.quiet);
            if let Err(err) = run(&cfg) {
                eprintln!("{err:#}");
                process::exit(1);
            }
        }
    }
}

fn run(cfg: &Config) -> Result<()> {
    if let Ok(host) = meminfo::read() {
        info!(
            available_bytes = host.available_bytes,
            total_bytes = host.total_bytes,
            swap_free_bytes = host.swap_free_bytes,
            "host memory before allocation"
        );
    }

    let mut region = if cfg.space_bytes > 0 {
        info!(bytes = cfg.space_bytes, "filling memory");
        Region::exact(cfg.space_bytes).context("memory acquisition failed")?
    } else {
        info!("filling up all available memory");
        Region::greedy(sys::page_size().unwrap_or(FALLBACK_CHUNK))
    };
    info!(bytes = region.len(), "memory acquired");

    fill::fill(&mut region, cfg.pattern, cfg.dense);

    if cfg.hold_seconds > 0 {
        info!(seconds = cfg.hold_seconds, "holding memory");
    } else {
        info!("holding memory indefinitely");
    }
    sys::hold(cfg.hold_seconds);

    drop(region);
    Ok(())
}

/// An explicit RUST_LOG wins; otherwise `--quiet` keeps only warnings.
fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
