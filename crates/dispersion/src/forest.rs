use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::DispersionError;
use crate::greedy::GreedySelector;
use crate::optimal::OptimalSelector;
use crate::tree::{Candidates, Tree};
use crate::Selector;

const NONE: usize = usize::MAX;

/// Undirected forest keyed by node identity.
///
/// Nodes iterate in ascending identity order, which fixes the local index
/// order of every component and with it all tie-breaks. The forest must be
/// acyclic; this is not checked.
#[derive(Clone, Debug)]
pub struct Forest<Id> {
    adjacency: BTreeMap<Id, Vec<Id>>,
}

impl<Id: Ord + Clone> Default for Forest<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Ord + Clone> Forest<Id> {
    pub fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }

    pub fn add_node(&mut self, id: Id) {
        self.adjacency.entry(id).or_default();
    }

    pub fn add_edge(&mut self, a: Id, b: Id) {
        self.adjacency.entry(a.clone()).or_default().push(b.clone());
        self.adjacency.entry(b).or_default().push(a);
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Id> {
        self.adjacency.keys()
    }

    pub fn neighbors(&self, id: &Id) -> &[Id] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Connected components, each sorted by identity, in order of their
    /// smallest member.
    pub fn components(&self) -> Vec<Vec<Id>> {
        let layout = Layout::new(self);
        layout
            .components()
            .into_iter()
            .map(|members| members.iter().map(|&g| layout.ids[g].clone()).collect())
            .collect()
    }
}

impl<Id: Ord + Clone> FromIterator<(Id, Id)> for Forest<Id> {
    fn from_iter<T: IntoIterator<Item = (Id, Id)>>(iter: T) -> Self {
        let mut forest = Self::new();
        for (a, b) in iter {
            forest.add_edge(a, b);
        }
        forest
    }
}

/// Dense global numbering of the forest's nodes (ascending identity).
struct Layout<'a, Id> {
    forest: &'a Forest<Id>,
    ids: Vec<&'a Id>,
    index: BTreeMap<&'a Id, usize>,
}

impl<'a, Id: Ord + Clone> Layout<'a, Id> {
    fn new(forest: &'a Forest<Id>) -> Self {
        let ids: Vec<&Id> = forest.adjacency.keys().collect();
        let index = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        Self { forest, ids, index }
    }

    fn neighbors(&self, g: usize) -> impl Iterator<Item = usize> + '_ {
        self.forest
            .neighbors(self.ids[g])
            .iter()
            .map(|id| self.index[id])
    }

    fn components(&self) -> Vec<Vec<usize>> {
        let n = self.ids.len();
        let mut visited = vec![false; n];
        let mut stack = Vec::new();
        let mut components = Vec::new();
        for start in 0..n {
            if visited[start] {
                continue;
            }
            let mut members = Vec::new();
            visited[start] = true;
            stack.push(start);
            while let Some(v) = stack.pop() {
                members.push(v);
                for to in self.neighbors(v) {
                    if !visited[to] {
                        visited[to] = true;
                        stack.push(to);
                    }
                }
            }
            members.sort_unstable();
            components.push(members);
        }
        components
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Greedy,
    #[default]
    Optimal,
}

impl Method {
    pub fn selector(self) -> &'static dyn Selector {
        match self {
            Self::Greedy => &GreedySelector,
            Self::Optimal => &OptimalSelector,
        }
    }

    pub fn label(self) -> &'static str {
        self.selector().name()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Method {
    type Err = DispersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(Self::Greedy),
            "optimal" => Ok(Self::Optimal),
            other => Err(DispersionError::UnknownMethod(other.to_string())),
        }
    }
}

/// Per-component outcome of a forest run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentReport {
    pub size: usize,
    pub candidates: usize,
    /// Share of the target: `floor(K * size / N)`.
    pub allotted: usize,
    pub chosen: usize,
    pub total: u64,
}

#[derive(Clone, Debug)]
pub struct ForestSelection<Id> {
    /// Chosen identities in ascending order.
    pub chosen: Vec<Id>,
    pub total: u64,
    pub components: Vec<ComponentReport>,
}

pub fn solve_forest<Id>(
    forest: &Forest<Id>,
    candidates: &BTreeSet<Id>,
    k: usize,
    method: Method,
) -> ForestSelection<Id>
where
    Id: Ord + Clone + fmt::Debug,
{
    solve_forest_with(forest, candidates, k, method.selector())
}

/// Splits `k` over the components of `forest` in proportion to their size
/// and runs `selector` on each component that receives at least two slots.
///
/// An empty `candidates` set allows every node. Rounding leaves part of `k`
/// unused; it is not redistributed.
pub fn solve_forest_with<Id, S>(
    forest: &Forest<Id>,
    candidates: &BTreeSet<Id>,
    k: usize,
    selector: &S,
) -> ForestSelection<Id>
where
    Id: Ord + Clone + fmt::Debug,
    S: Selector + ?Sized,
{
    let layout = Layout::new(forest);
    let n = layout.ids.len();

    let allowed: Vec<bool> = if candidates.is_empty() {
        vec![true; n]
    } else {
        let outside = candidates.iter().filter(|id| !forest.contains(id)).count();
        if outside > 0 {
            warn!(outside, "candidates outside the forest are ignored");
        }
        layout.ids.iter().map(|id| candidates.contains(*id)).collect()
    };

    let components = layout.components();
    info!(
        method = selector.name(),
        nodes = n,
        components = components.len(),
        target = k,
        "solving forest"
    );

    let mut chosen = Vec::new();
    let mut total = 0_u64;
    let mut reports = Vec::with_capacity(components.len());
    let mut local = vec![NONE; n];

    for members in &components {
        let size = members.len();
        let allotted = (k as u128 * size as u128 / n as u128) as usize;
        let mut report = ComponentReport {
            size,
            candidates: members.iter().filter(|&&g| allowed[g]).count(),
            allotted,
            chosen: 0,
            total: 0,
        };
        let k_eff = allotted.min(report.candidates);
        if allotted <= 1 || k_eff < 2 {
            debug!(size, allotted, candidates = report.candidates, "component skipped");
            reports.push(report);
            continue;
        }

        for (i, &g) in members.iter().enumerate() {
            local[g] = i;
        }
        let adjacency: Vec<Vec<usize>> = members
            .iter()
            .map(|&g| layout.neighbors(g).map(|to| local[to]).collect())
            .collect();
        let tree = Tree::from_adjacency(&adjacency);
        let local_candidates = Candidates::new(
            size,
            members
                .iter()
                .enumerate()
                .filter(|&(_, &g)| allowed[g])
                .map(|(i, _)| i),
        );

        let selection = selector.select(&tree, &local_candidates, k_eff);
        debug!(
            size,
            allotted,
            chosen = selection.chosen.len(),
            total = selection.total,
            "component solved"
        );
        report.chosen = selection.chosen.len();
        report.total = selection.total;
        total += selection.total;
        chosen.extend(
            selection
                .chosen
                .iter()
                .map(|&i| layout.ids[members[i]].clone()),
        );
        reports.push(report);
    }

    chosen.sort_unstable();
    for id in &chosen {
        assert!(
            candidates.is_empty() || candidates.contains(id),
            "chose {id:?}, which is not a candidate"
        );
    }
    info!(chosen = chosen.len(), total, "forest solved");

    ForestSelection {
        chosen,
        total,
        components: reports,
    }
}
