use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pedigree::{GenderFilter, LivenessFilter, ParentLine};
use refpop::{init_tracing, mark_live_file, write_lineage};

/// Prepare pedigree tables for `refpop`.
#[derive(Parser, Debug)]
#[command(name = "refpop-pedigree", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the single-parent lineage forest of a pedigree to stdout.
    Forest {
        /// Pedigree CSV with an `ID` column.
        pedigree: PathBuf,
        /// Parent column that links individuals.
        #[arg(long, default_value_t = ParentLine::Mother)]
        parent: ParentLine,
    },
    /// Rewrite a pedigree with a `live` column.
    MarkLive {
        #[arg(short, long)]
        pedigree: PathBuf,
        /// Defaults to `<PEDIGREE>.out`.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Individuals born before this year are not live.
        #[arg(short = 'y', long = "year-live", default_value_t = 0)]
        year: i32,
        #[arg(short = 'g', long = "gender-live", default_value_t = GenderFilter::Both)]
        gender: GenderFilter,
    },
}

fn main() -> Result<()> {
    init_tracing();
    match Cli::parse().command {
        Command::Forest { pedigree, parent } => {
            let stdout = std::io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_lineage(&pedigree, parent, &mut out)?;
            out.flush()?;
        }
        Command::MarkLive {
            pedigree,
            output,
            year,
            gender,
        } => {
            let filter = LivenessFilter {
                min_year: year,
                gender,
            };
            mark_live_file(&pedigree, output.as_deref(), &filter)?;
        }
    }
    Ok(())
}
