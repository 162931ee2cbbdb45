use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::Result;
use crate::record::{Pedigree, PedigreeRecord};
use crate::union_find::DisjointSet;

/// Parent column that supplies the forest edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParentLine {
    Father,
    #[default]
    Mother,
}

impl ParentLine {
    fn parent_of(self, record: &PedigreeRecord) -> Option<&str> {
        match self {
            Self::Father => record.father.as_deref(),
            Self::Mother => record.mother.as_deref(),
        }
    }
}

impl FromStr for ParentLine {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "father" => Ok(Self::Father),
            "mother" => Ok(Self::Mother),
            other => Err(format!(
                "unrecognized parent `{other}`, expected father or mother"
            )),
        }
    }
}

impl fmt::Display for ParentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Father => "father",
            Self::Mother => "mother",
        })
    }
}

/// Child–parent edges along one parental line plus the selectable
/// individuals, ready to be written as a forest file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineageForest {
    pub edges: Vec<(String, String)>,
    pub candidates: Vec<String>,
}

impl LineageForest {
    /// Writes the edges, then one candidate per line.
    pub fn write(&self, mut out: impl Write) -> Result<()> {
        for (child, parent) in &self.edges {
            writeln!(out, "{child} {parent}")?;
        }
        for id in &self.candidates {
            writeln!(out, "{id}")?;
        }
        Ok(())
    }
}

/// Links every individual to its parent on `line`, in table order, skipping
/// parents that are not in the table and links that would close a cycle.
pub fn build_forest(pedigree: &Pedigree, line: ParentLine) -> LineageForest {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(pedigree.records.len());
    for record in &pedigree.records {
        let next = index.len();
        index.entry(record.id.as_str()).or_insert(next);
    }

    let mut sets = DisjointSet::new(index.len());
    let mut edges = Vec::new();
    let mut unknown_parents = 0_usize;
    let mut cycles = 0_usize;
    for record in &pedigree.records {
        let Some(parent) = line.parent_of(record) else {
            continue;
        };
        let Some(&p) = index.get(parent) else {
            unknown_parents += 1;
            continue;
        };
        let x = index[record.id.as_str()];
        if sets.union(x, p) {
            edges.push((record.id.clone(), parent.to_string()));
        } else {
            cycles += 1;
            debug!(child = %record.id, parent, "link would close a cycle");
        }
    }

    let candidates: Vec<String> = pedigree.live_ids().into_iter().map(str::to_string).collect();
    info!(
        %line,
        individuals = index.len(),
        edges = edges.len(),
        unknown_parents,
        cycles,
        candidates = candidates.len(),
        "lineage forest built"
    );
    LineageForest { edges, candidates }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{ParentLine, build_forest};
    use crate::record::{Pedigree, PedigreeRecord};

    fn with_parents(id: &str, father: Option<&str>, mother: Option<&str>) -> PedigreeRecord {
        PedigreeRecord {
            father: father.map(str::to_string),
            mother: mother.map(str::to_string),
            ..PedigreeRecord::new(id)
        }
    }

    fn edges(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|&(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn follows_chosen_line() {
        let pedigree = Pedigree {
            records: vec![
                with_parents("m", None, None),
                with_parents("f", None, None),
                with_parents("c1", Some("f"), Some("m")),
                with_parents("c2", Some("f"), Some("c1")),
            ],
            has_live: false,
        };
        let maternal = build_forest(&pedigree, ParentLine::Mother);
        assert_eq!(maternal.edges, edges(&[("c1", "m"), ("c2", "c1")]));
        assert_eq!(maternal.candidates, ["m", "f", "c1", "c2"]);

        let paternal = build_forest(&pedigree, ParentLine::Father);
        assert_eq!(paternal.edges, edges(&[("c1", "f"), ("c2", "f")]));
    }

    #[test]
    fn skips_unknown_parents_and_cycles() {
        let pedigree = Pedigree {
            records: vec![
                with_parents("a", None, Some("c")),
                with_parents("b", None, Some("a")),
                with_parents("c", None, Some("b")),
                with_parents("d", None, Some("ghost")),
                with_parents("e", None, Some("e")),
            ],
            has_live: false,
        };
        let forest = build_forest(&pedigree, ParentLine::Mother);
        assert_eq!(forest.edges, edges(&[("a", "c"), ("b", "a")]));
    }

    #[test]
    fn output_reads_back_as_forest_file() {
        let mut pedigree = Pedigree {
            records: vec![
                with_parents("a", None, None),
                with_parents("b", None, Some("a")),
                with_parents("c", None, Some("a")),
                with_parents("d", None, Some("c")),
            ],
            has_live: false,
        };
        pedigree.records[0].live = Some(false);
        for r in &mut pedigree.records[1..] {
            r.live = Some(true);
        }
        pedigree.has_live = true;

        let lineage = build_forest(&pedigree, ParentLine::Mother);
        let mut buf = Vec::new();
        lineage.write(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "b a\nc a\nd c\nb\nc\nd\n");

        let input = dispersion::input::parse_forest(Cursor::new(buf)).unwrap();
        assert_eq!(input.forest.len(), 4);
        assert_eq!(input.candidates.len(), 3);
        let sel = dispersion::solve_forest(
            &input.forest,
            &input.candidates,
            2,
            dispersion::Method::Optimal,
        );
        assert_eq!(sel.chosen, ["b", "d"]);
        assert_eq!(sel.total, 3);
    }

    #[test]
    fn parent_line_names() {
        assert_eq!("father".parse::<ParentLine>(), Ok(ParentLine::Father));
        assert_eq!(ParentLine::Mother.to_string(), "mother");
        assert!("grandma".parse::<ParentLine>().is_err());
    }
}
