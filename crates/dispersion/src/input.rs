//! Forest file reader.
//!
//! ```text
//! u_1 v_1
//! ...
//! u_M v_M
//! x_1
//! ...
//! x_C
//! ```
//!
//! Two-token lines are edges. The first one-token line ends the edge section;
//! it and every following line name a candidate. Without candidate lines all
//! nodes are candidates. Blank lines are skipped.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{DispersionError, Result};
use crate::forest::Forest;

#[derive(Clone, Debug, Default)]
pub struct ForestInput {
    pub forest: Forest<String>,
    pub candidates: BTreeSet<String>,
}

pub fn read_forest_file(path: impl AsRef<Path>) -> Result<ForestInput> {
    let file = File::open(path)?;
    parse_forest(BufReader::new(file))
}

pub fn parse_forest(reader: impl BufRead) -> Result<ForestInput> {
    let mut forest = Forest::new();
    let mut candidates = BTreeSet::new();
    let mut reading_edges = true;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if reading_edges && tokens.len() == 1 {
            reading_edges = false;
        }
        match (reading_edges, tokens.as_slice()) {
            (true, &[a, b]) => forest.add_edge(a.to_string(), b.to_string()),
            (false, &[x]) => {
                candidates.insert(x.to_string());
            }
            (true, _) => {
                return Err(DispersionError::Format {
                    line: idx + 1,
                    message: format!("expected an edge `u v`, got {} tokens", tokens.len()),
                });
            }
            (false, _) => {
                return Err(DispersionError::Format {
                    line: idx + 1,
                    message: format!("expected a single candidate, got {} tokens", tokens.len()),
                });
            }
        }
    }

    if candidates.is_empty() {
        candidates = forest.nodes().cloned().collect();
    }
    debug!(
        nodes = forest.len(),
        edges = forest.edge_count(),
        candidates = candidates.len(),
        "forest read"
    );
    Ok(ForestInput { forest, candidates })
}
