use clap::Parser;
use satbench::table::Table;
use satbench::{config, scan};
use serde_json::Value;
use std::path::PathBuf;

/// Extract run metrics from SAT solver benchmark logs: walk a results
/// root (one subdirectory per benchmark), parse each solver log, and
/// print the aggregate table as JSON.
#[derive(Parser, Debug)]
#[command(name = "satbench", version, about)]
struct Cli {
    /// Benchmark results root (one subdirectory per benchmark)
    #[arg(value_name = "ROOT", required_unless_present = "config")]
    root: Option<PathBuf>,

    /// Column prefix namespacing this solver's metrics
    #[arg(short, long, default_value = "run")]
    prefix: String,

    /// Emit the per-sample memory series instead of peak memory
    #[arg(long)]
    memory_series: bool,

    /// Sum prepro/base event counts across the batch instead of per-run rows
    #[arg(long, conflicts_with = "memory_series")]
    events: bool,

    /// Merge mode: TOML file listing multiple runs joined by benchmark name
    #[arg(short, long, conflicts_with_all = ["root", "events"])]
    config: Option<PathBuf>,

    /// Extra logging (per-benchmark parse decisions)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let output = match (&cli.config, &cli.root) {
        (Some(config_path), _) => merged_table(&config::load(config_path)?)?.to_json(),
        (None, Some(root)) => {
            if cli.events {
                Value::Object(scan::event_totals(root)?.prefixed(&cli.prefix))
            } else if cli.memory_series {
                scan::memory_series(root, &cli.prefix)?.to_json()
            } else {
                scan::overview(root, &cli.prefix)?.to_json()
            }
        }
        (None, None) => return Err("a results root or --config file is required".into()),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Scan every run named in the config and fold the tables together with
/// an inner join on the benchmark name.
fn merged_table(cfg: &config::MergeConfig) -> Result<Table, Box<dyn std::error::Error>> {
    let mut merged: Option<Table> = None;
    for run in &cfg.runs {
        tracing::debug!(prefix = %run.prefix, path = %run.path.display(), "scanning run");
        let table = if run.memory_series {
            scan::memory_series(&run.path, &run.prefix)?
        } else {
            scan::overview(&run.path, &run.prefix)?
        };
        merged = Some(match merged {
            Some(acc) => acc.merge(&table),
            None => table,
        });
    }
    merged.ok_or_else(|| "merge config lists no runs".into())
}
