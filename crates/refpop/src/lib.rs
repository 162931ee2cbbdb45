//! Shared pieces of the `refpop` and `refpop-pedigree` binaries.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, ensure};
use clap::ValueEnum;
use dispersion::input::{ForestInput, read_forest_file};
use dispersion::{ForestSelection, Method};
use pedigree::{LivenessFilter, ParentLine, Pedigree, build_forest};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Logs to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Greedy,
    Optimal,
    /// Run greedy, then optimal.
    Both,
}

impl MethodArg {
    pub fn method(self) -> Option<Method> {
        match self {
            Self::Greedy => Some(Method::Greedy),
            Self::Optimal => Some(Method::Optimal),
            Self::Both => None,
        }
    }
}

pub fn load_forest(path: &Path) -> Result<ForestInput> {
    read_forest_file(path).with_context(|| format!("failed to read forest file {}", path.display()))
}

pub struct Run {
    pub method: Method,
    pub selection: ForestSelection<String>,
    pub elapsed: Duration,
}

/// Solves the forest and checks that only candidates were chosen.
pub fn run(input: &ForestInput, k: usize, method: Method) -> Result<Run> {
    let start = Instant::now();
    let selection = dispersion::solve_forest(&input.forest, &input.candidates, k, method);
    let elapsed = start.elapsed();
    ensure_subset(&selection.chosen, &input.candidates)?;
    Ok(Run {
        method,
        selection,
        elapsed,
    })
}

fn ensure_subset(chosen: &[String], candidates: &BTreeSet<String>) -> Result<()> {
    let stray = chosen.iter().find(|id| !candidates.contains(*id));
    ensure!(stray.is_none(), "bug: chose restricted node {:?}", stray);
    Ok(())
}

pub fn render(run: &Run, quiet: bool) -> String {
    let label = run.method.label();
    let mut out = String::new();
    let _ = writeln!(out, "{}:", label.to_uppercase());
    let _ = writeln!(out, "\tscore: {}", run.selection.total);
    let _ = writeln!(out, "\ttime: {:8.6}", run.elapsed.as_secs_f64());
    if !quiet {
        let mut name = label.to_string();
        name[..1].make_ascii_uppercase();
        let _ = writeln!(out, "{name} chosen: {}", run.selection.chosen.join(" "));
    }
    out
}

fn read_pedigree(path: &Path) -> Result<Pedigree> {
    Pedigree::read(path).with_context(|| format!("failed to read pedigree {}", path.display()))
}

/// Writes the lineage forest of the pedigree at `path` to `out`.
pub fn write_lineage(path: &Path, line: ParentLine, out: impl io::Write) -> Result<()> {
    let table = read_pedigree(path)?;
    build_forest(&table, line).write(out)?;
    Ok(())
}

/// `<input>.out` next to the input file.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".out");
    PathBuf::from(name)
}

/// Reads a pedigree, marks liveness and writes it to `output` (or the
/// default path). Returns the path written.
pub fn mark_live_file(input: &Path, output: Option<&Path>, filter: &LivenessFilter) -> Result<PathBuf> {
    let mut table = read_pedigree(input)?;
    table.mark_live(filter);
    let output = output.map_or_else(|| default_output_path(input), Path::to_path_buf);
    let file =
        File::create(&output).with_context(|| format!("failed to create {}", output.display()))?;
    let mut out = BufWriter::new(file);
    table.write(&mut out)?;
    io::Write::flush(&mut out)?;
    info!(output = %output.display(), "pedigree written");
    Ok(output)
}
