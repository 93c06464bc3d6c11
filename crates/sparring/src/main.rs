//! Sparring CLI
//!
//! Play the adaptive engine against a fixed preset and watch its level move.

use std::env;
use std::path::PathBuf;

use adaptive_engine::{EngineConfig, Preset};
use anyhow::{bail, Context, Result};
use sparring::{SparringConfig, SparringRunner};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Adaptive chess sparring runner");
    println!();
    println!("Usage:");
    println!("  sparring [--games N] [--partner P] [--max-plies N] [--config FILE]");
    println!("           [--hints] [--out FILE] [--quiet]");
    println!();
    println!("Options:");
    println!("  --games, -g N      games to play (default 6)");
    println!("  --partner, -p P    partner preset 1-4: Easy, Medium, Hard, Grandmaster (default 2)");
    println!("  --max-plies N      abandon a game after N plies (default 200)");
    println!("  --config, -c FILE  engine settings (TOML)");
    println!("  --hints            partner plays the engine's own hint");
    println!("  --out, -o FILE     write the report as JSON");
    println!();
    println!("Examples:");
    println!("  sparring --games 10 --partner 1");
    println!("  RUST_LOG=adaptive_engine=debug sparring -g 2 -c engine.toml");
}

struct Args {
    config: SparringConfig,
    out: Option<PathBuf>,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("{flag} needs a value"))
}

fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let mut config = SparringConfig::default();
    let mut out = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--games" | "-g" => {
                config.games = value(args, i, "--games")?.parse().context("bad --games")?;
                i += 1;
            }
            "--partner" | "-p" => {
                let n: u8 = value(args, i, "--partner")?
                    .parse()
                    .context("bad --partner")?;
                config.partner = Preset::from_number(n)
                    .with_context(|| format!("--partner must be 1-4, got {n}"))?;
                i += 1;
            }
            "--max-plies" => {
                config.max_plies = value(args, i, "--max-plies")?
                    .parse()
                    .context("bad --max-plies")?;
                i += 1;
            }
            "--config" | "-c" => {
                let path = value(args, i, "--config")?;
                config.engine = EngineConfig::load(path)?;
                i += 1;
            }
            "--out" | "-o" => {
                out = Some(PathBuf::from(value(args, i, "--out")?));
                i += 1;
            }
            "--hints" => config.use_hints = true,
            "--quiet" | "-q" => config.verbose = false,
            "help" | "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument: {other}"),
        }
        i += 1;
    }

    Ok(Some(Args { config, out }))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(Args { config, out }) = parse_args(&args)? else {
        print_usage();
        return Ok(());
    };

    println!(
        "=== Adaptive engine ({}) vs {} ===",
        if config.engine.preset == 0 {
            format!("level {}", config.engine.initial_level)
        } else {
            format!("preset {}", config.engine.preset)
        },
        config.partner
    );
    println!("Games: {}, engine plays {}", config.games, config.engine.engine_color);
    println!();

    let report = SparringRunner::new(config).run()?;

    println!();
    report.print_report();

    if let Some(path) = out {
        report.save(&path)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}
