use tracing::trace;

use crate::diameter::most_distant_pair_with;
use crate::distance::DistanceField;
use crate::tree::{Candidates, Tree};
use crate::{Selection, Selector};

/// Farthest-insertion heuristic.
///
/// Starts from the candidate diameter and repeatedly adds the candidate with
/// the largest summed distance to everything chosen so far. `O(N * K)` time,
/// `O(N)` memory; not guaranteed optimal.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedySelector;

impl Selector for GreedySelector {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn select(&self, tree: &Tree, candidates: &Candidates, k: usize) -> Selection {
        let n = tree.len();
        let k = k.min(candidates.len());
        assert!(k >= 2, "greedy selection needs at least two nodes, got k={k}");

        let mut state = GreedyState {
            is_chosen: vec![false; n],
            to_chosen: vec![0; n],
            field: DistanceField::new(n),
            total: 0,
        };

        let (first, second) = most_distant_pair_with(&mut state.field, tree, candidates)
            .expect("candidate set is non-empty");
        state.choose(tree, first);
        state.choose(tree, second);

        for _ in 2..k {
            let mut best = None;
            for &v in candidates.members() {
                if state.is_chosen[v] {
                    continue;
                }
                if best.is_none_or(|b: usize| state.to_chosen[v] > state.to_chosen[b]) {
                    best = Some(v);
                }
            }
            let Some(best) = best else {
                break;
            };
            trace!(node = best, gain = state.to_chosen[best], "greedy insertion");
            state.choose(tree, best);
        }

        let chosen = (0..n).filter(|&v| state.is_chosen[v]).collect();
        Selection {
            chosen,
            total: state.total,
        }
    }
}

struct GreedyState {
    is_chosen: Vec<bool>,
    /// Sum of distances from each vertex to the chosen set.
    to_chosen: Vec<u64>,
    field: DistanceField,
    total: u64,
}

impl GreedyState {
    fn choose(&mut self, tree: &Tree, v: usize) {
        assert!(!self.is_chosen[v], "node {v} chosen twice");
        // Each pair is counted once, when its later member joins.
        self.total += self.to_chosen[v];
        self.is_chosen[v] = true;
        let dist = self.field.fill(tree, v);
        for (acc, &d) in self.to_chosen.iter_mut().zip(dist) {
            *acc += d;
        }
    }
}
