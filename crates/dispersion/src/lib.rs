mod config;
mod diameter;
mod distance;
mod error;
mod forest;
pub mod generator;
mod greedy;
pub mod input;
mod optimal;
mod tree;

pub use config::{SelectionConfig, validate_target};
pub use diameter::most_distant_pair;
pub use distance::{DistanceField, UNREACHED, distances_from};
pub use error::{DispersionError, Result};
pub use forest::{ComponentReport, Forest, ForestSelection, Method, solve_forest, solve_forest_with};
pub use greedy::GreedySelector;
pub use optimal::OptimalSelector;
pub use tree::{Candidates, Tree};

/// Chooses `k` candidates of a single tree with a large pairwise distance sum.
///
/// - `k` is clamped to the number of candidates; after clamping it must be at
///   least 2.
/// - The result only contains candidates, listed in ascending order.
/// - `total` is the sum of pairwise distances of the result.
pub trait Selector {
    fn name(&self) -> &'static str;
    fn select(&self, tree: &Tree, candidates: &Candidates, k: usize) -> Selection;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub chosen: Vec<usize>,
    pub total: u64,
}

/// Sum of pairwise distances among `nodes`, in `O(N * |nodes|)`.
pub fn pairwise_sum(tree: &Tree, nodes: &[usize]) -> u64 {
    let mut field = DistanceField::new(tree.len());
    let mut sum = 0;
    for (i, &a) in nodes.iter().enumerate() {
        field.fill(tree, a);
        sum += nodes[i + 1..].iter().map(|&b| field.get(b)).sum::<u64>();
    }
    sum
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::generator::{TreeCase, generate_forest, generate_tree};

    fn brute_force_best(tree: &Tree, candidates: &Candidates, k: usize) -> u64 {
        let members = candidates.members();
        let m = members.len();
        let mut best = 0;
        for mask in 0_u32..(1 << m) {
            if mask.count_ones() as usize != k {
                continue;
            }
            let subset: Vec<usize> = (0..m)
                .filter(|&i| (mask >> i) & 1 == 1)
                .map(|i| members[i])
                .collect();
            best = best.max(pairwise_sum(tree, &subset));
        }
        best
    }

    fn random_candidates(rng: &mut StdRng, n: usize) -> Candidates {
        let p = rng.random_range(0.2..=1.0);
        Candidates::new(n, (0..n).filter(|_| rng.random_bool(p)))
    }

    fn check_selection(tree: &Tree, candidates: &Candidates, sel: &Selection) {
        assert!(sel.chosen.windows(2).all(|w| w[0] < w[1]));
        assert!(sel.chosen.iter().all(|&v| candidates.contains(v)));
        assert_eq!(sel.total, pairwise_sum(tree, &sel.chosen));
    }

    #[test]
    fn pairwise_sum_of_path() {
        let tree = Tree::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(pairwise_sum(&tree, &[]), 0);
        assert_eq!(pairwise_sum(&tree, &[0, 3]), 3);
        assert_eq!(pairwise_sum(&tree, &[0, 1, 2, 3]), 10);
    }

    #[test]
    fn optimal_matches_brute_force_random() {
        let mut rng = StdRng::seed_from_u64(0x0D15_0001);
        for seed in 0..150_u64 {
            let case = TreeCase::ALL[(seed as usize) % TreeCase::ALL.len()];
            let n = rng.random_range(2..=13);
            let tree = Tree::from_edges(n, &generate_tree(case, n, seed));
            let candidates = random_candidates(&mut rng, n);
            if candidates.len() < 2 {
                continue;
            }
            let k = rng.random_range(2..=candidates.len());
            let sel = OptimalSelector.select(&tree, &candidates, k);
            assert_eq!(sel.chosen.len(), k, "seed={seed}");
            check_selection(&tree, &candidates, &sel);
            assert_eq!(sel.total, brute_force_best(&tree, &candidates, k), "seed={seed}");
        }
    }

    #[test]
    fn optimal_dominates_greedy() {
        let mut rng = StdRng::seed_from_u64(0x0D15_0002);
        for seed in 0..120_u64 {
            let case = TreeCase::ALL[(seed as usize) % TreeCase::ALL.len()];
            let n = rng.random_range(2..=80);
            let tree = Tree::from_edges(n, &generate_tree(case, n, seed));
            let candidates = random_candidates(&mut rng, n);
            if candidates.len() < 2 {
                continue;
            }
            let k = rng.random_range(2..=n);
            let greedy = GreedySelector.select(&tree, &candidates, k);
            let optimal = OptimalSelector.select(&tree, &candidates, k);
            let expected = k.min(candidates.len());
            assert_eq!(greedy.chosen.len(), expected, "seed={seed}");
            assert_eq!(optimal.chosen.len(), expected, "seed={seed}");
            check_selection(&tree, &candidates, &greedy);
            check_selection(&tree, &candidates, &optimal);
            assert!(optimal.total >= greedy.total, "seed={seed}");
        }
    }

    #[test]
    fn full_selection_equals_all_pairs() {
        for (i, case) in TreeCase::ALL.into_iter().enumerate() {
            let n = 40;
            let tree = Tree::from_edges(n, &generate_tree(case, n, 0xF0_11 + i as u64));
            let everything: Vec<usize> = (0..n).collect();
            let expected = pairwise_sum(&tree, &everything);
            for selector in [Method::Greedy, Method::Optimal].map(Method::selector) {
                let sel = selector.select(&tree, &Candidates::all(n), n);
                assert_eq!(sel.chosen, everything, "{}", selector.name());
                assert_eq!(sel.total, expected, "{}", selector.name());
            }
        }
    }

    #[test]
    fn two_nodes_pick_the_diameter() {
        let mut rng = StdRng::seed_from_u64(0x0D15_0003);
        for seed in 0..30_u64 {
            let n = rng.random_range(2..200);
            let tree = Tree::from_edges(n, &generate_tree(TreeCase::RandomRecursive, n, seed));
            let candidates = Candidates::all(n);
            let (a, b) = most_distant_pair(&tree, &candidates).unwrap();
            let diameter = distances_from(&tree, a)[b];
            assert_eq!(OptimalSelector.select(&tree, &candidates, 2).total, diameter);
            assert_eq!(GreedySelector.select(&tree, &candidates, 2).total, diameter);
        }
    }

    #[test]
    fn forest_respects_budget() {
        let mut rng = StdRng::seed_from_u64(0x0D15_0004);
        for seed in 0..25_u64 {
            let sizes: Vec<usize> = (0..rng.random_range(1..6))
                .map(|_| rng.random_range(1..40))
                .collect();
            let forest = generate_forest(&sizes, seed);
            let candidates: BTreeSet<String> = forest
                .nodes()
                .filter(|_| rng.random_bool(0.7))
                .cloned()
                .collect();
            let k = rng.random_range(2..=forest.len().max(2));
            for method in [Method::Greedy, Method::Optimal] {
                let sel = solve_forest(&forest, &candidates, k, method);
                let allotted: usize = sel.components.iter().map(|r| r.allotted).sum();
                assert!(allotted <= k, "seed={seed}");
                assert!(sel.chosen.len() <= k, "seed={seed}");
                assert!(
                    candidates.is_empty() || sel.chosen.iter().all(|id| candidates.contains(id))
                );
                let per_component: u64 = sel.components.iter().map(|r| r.total).sum();
                assert_eq!(per_component, sel.total);
                for report in &sel.components {
                    assert!(report.chosen <= report.allotted.min(report.candidates));
                }
            }
        }
    }

    #[test]
    fn forest_optimal_dominates_greedy() {
        let forest = generate_forest(&[30, 12, 45, 3], 0xF0F0);
        let candidates = BTreeSet::new();
        let greedy = solve_forest(&forest, &candidates, 20, Method::Greedy);
        let optimal = solve_forest(&forest, &candidates, 20, Method::Optimal);
        assert_eq!(greedy.chosen.len(), optimal.chosen.len());
        assert!(optimal.total >= greedy.total);
    }
}
