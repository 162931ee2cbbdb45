//! Exact maximum-dispersion selection on a tree.
//!
//! The pairwise distance sum of a chosen set `S` splits over edges: an edge
//! separating `j` chosen nodes from the other `|S| - j` contributes
//! `j * (|S| - j)`. With `|S|` fixed to the target `K`, every edge's share is
//! known as soon as the number of chosen nodes below it is, so a knapsack
//! style merge over children yields the optimum in `O(N * K^2)`.
//!
//! Rows are indexed by the number of chosen nodes in the merged part, but
//! their values already include the `j * (K - j)` edge terms for the global
//! `K`. A row is therefore only meaningful for that `K`.

use tracing::trace;

use crate::tree::{Candidates, Tree};
use crate::{Selection, Selector};

const NEG: i64 = i64::MIN / 4;
const NONE: usize = usize::MAX;

#[derive(Clone, Copy, Debug, Default)]
pub struct OptimalSelector;

impl Selector for OptimalSelector {
    fn name(&self) -> &'static str {
        "optimal"
    }

    fn select(&self, tree: &Tree, candidates: &Candidates, k: usize) -> Selection {
        let k = k.min(candidates.len());
        assert!(k >= 2, "optimal selection needs at least two nodes, got k={k}");

        let rooted = RootedTree::new(tree, 0);
        let table = DpTable::build(&rooted, candidates, k);
        let total = table.root_value;
        assert!(total >= 0, "no feasible selection of {k} candidates");

        let chosen = table.reconstruct(&rooted, candidates, k);
        debug_assert_eq!(chosen.len(), k);
        Selection {
            chosen,
            total: total as u64,
        }
    }
}

/// Parent links and a preorder, computed without recursion.
struct RootedTree<'a> {
    tree: &'a Tree,
    root: usize,
    parent: Vec<usize>,
    preorder: Vec<usize>,
}

impl<'a> RootedTree<'a> {
    fn new(tree: &'a Tree, root: usize) -> Self {
        let n = tree.len();
        let mut parent = vec![NONE; n];
        let mut preorder = Vec::with_capacity(n);
        let mut stack = Vec::with_capacity(n);
        stack.push(root);
        while let Some(v) = stack.pop() {
            preorder.push(v);
            for &to in tree.neighbors(v) {
                if to != parent[v] {
                    parent[to] = v;
                    stack.push(to);
                }
            }
        }
        Self {
            tree,
            root,
            parent,
            preorder,
        }
    }

    /// Children of `v` in adjacency order.
    fn children(&self, v: usize) -> impl DoubleEndedIterator<Item = usize> + '_ {
        let parent = self.parent[v];
        self.tree
            .neighbors(v)
            .iter()
            .copied()
            .filter(move |&to| to != parent)
    }
}

struct DpTable {
    /// `splits[x][c - 1][t]`: how many of `t` chosen nodes the `c`-th child of
    /// `x` supplied in the best merge.
    splits: Vec<Vec<Vec<u32>>>,
    root_value: i64,
}

impl DpTable {
    fn build(rooted: &RootedTree<'_>, candidates: &Candidates, k: usize) -> Self {
        let n = rooted.tree.len();
        let mut splits: Vec<Vec<Vec<u32>>> = vec![Vec::new(); n];
        // Final row of each finished subtree, waiting for its parent.
        let mut finished: Vec<Vec<i64>> = vec![Vec::new(); n];

        for &x in rooted.preorder.iter().rev() {
            let mut row = vec![0, if candidates.contains(x) { 0 } else { NEG }];
            let mut rows = Vec::with_capacity(rooted.tree.degree(x));
            for y in rooted.children(x) {
                let child = std::mem::take(&mut finished[y]);
                let (next, split) = merge(&row, &child, k);
                row = next;
                rows.push(split);
            }
            trace!(node = x, width = row.len(), "subtree merged");
            splits[x] = rows;
            finished[x] = row;
        }

        let root_row = std::mem::take(&mut finished[rooted.root]);
        let root_value = root_row.get(k).copied().unwrap_or(NEG);
        Self { splits, root_value }
    }

    fn reconstruct(&self, rooted: &RootedTree<'_>, candidates: &Candidates, k: usize) -> Vec<usize> {
        let mut chosen = Vec::with_capacity(k);
        let mut stack = vec![(rooted.root, k)];
        while let Some((x, mut remaining)) = stack.pop() {
            let rows = &self.splits[x];
            let mut c = rows.len();
            for y in rooted.children(x).rev() {
                c -= 1;
                let from_child = rows[c][remaining] as usize;
                stack.push((y, from_child));
                remaining -= from_child;
            }
            assert!(
                remaining <= 1,
                "reconstruction left {remaining} nodes at vertex {x}"
            );
            if remaining == 1 {
                assert!(candidates.contains(x), "reconstruction chose non-candidate {x}");
                chosen.push(x);
            }
        }
        chosen.sort_unstable();
        chosen
    }
}

/// Merges a child's final row into the partial row of its parent.
///
/// The edge to the child contributes `j * (k - j)` when `j` chosen nodes lie
/// below it. Ties keep the first split found.
fn merge(row: &[i64], child: &[i64], k: usize) -> (Vec<i64>, Vec<u32>) {
    let width = (row.len() + child.len() - 2).min(k) + 1;
    let mut next = vec![NEG; width];
    let mut split = vec![0_u32; width];
    for (i, &base) in row.iter().enumerate() {
        if base == NEG {
            continue;
        }
        for (j, &sub) in child.iter().enumerate() {
            if i + j > k {
                break;
            }
            if sub == NEG {
                continue;
            }
            let cand = base + sub + (j * (k - j)) as i64;
            if cand > next[i + j] {
                next[i + j] = cand;
                split[i + j] = j as u32;
            }
        }
    }
    (next, split)
}
