use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dispersion::{Method, SelectionConfig, validate_target};
use refpop::{MethodArg, init_tracing, load_forest, render, run};
use tracing::info;

/// Choose K nodes of a forest maximizing the sum of pairwise distances.
#[derive(Parser, Debug)]
#[command(name = "refpop", version)]
struct Cli {
    /// Forest file: `u v` edge lines followed by one candidate per line.
    filename: PathBuf,
    /// Number of nodes to choose.
    k: Option<usize>,
    /// Selection method.
    #[arg(value_enum)]
    method: Option<MethodArg>,
    /// Do not print the chosen nodes.
    #[arg(short, long)]
    quiet: bool,
    /// TOML file with `k`, `method` and `quiet` defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => SelectionConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SelectionConfig::default(),
    };
    let config = SelectionConfig {
        k: cli.k,
        method: cli.method.and_then(MethodArg::method),
        quiet: cli.quiet,
    }
    .or(file_config);

    let k = config
        .k
        .context("K is required, pass it after the filename or set `k` in the config file")?;
    let k = validate_target(k)?;
    let methods = match cli.method {
        Some(MethodArg::Both) => vec![Method::Greedy, Method::Optimal],
        _ => vec![config.method.unwrap_or_default()],
    };

    let input = load_forest(&cli.filename)?;
    info!(
        file = %cli.filename.display(),
        nodes = input.forest.len(),
        candidates = input.candidates.len(),
        k,
        "input loaded"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for method in methods {
        let result = run(&input, k, method)?;
        out.write_all(render(&result, config.quiet).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
