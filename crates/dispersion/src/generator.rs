use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::forest::Forest;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TreeCase {
    RandomRecursive,
    Path,
    Star,
    Caterpillar,
    Broom,
    Binary,
}

impl TreeCase {
    pub const ALL: [TreeCase; 6] = [
        Self::RandomRecursive,
        Self::Path,
        Self::Star,
        Self::Caterpillar,
        Self::Broom,
        Self::Binary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::RandomRecursive => "random_recursive",
            Self::Path => "path",
            Self::Star => "star",
            Self::Caterpillar => "caterpillar",
            Self::Broom => "broom",
            Self::Binary => "binary",
        }
    }
}

/// Edges of an `n`-vertex tree of the given shape, with vertex labels and
/// edge order shuffled by `seed`.
pub fn generate_tree(case: TreeCase, n: usize, seed: u64) -> Vec<(usize, usize)> {
    let mut rng = StdRng::seed_from_u64(seed);
    if n <= 1 {
        return Vec::new();
    }
    let mut edges: Vec<(usize, usize)> = match case {
        TreeCase::RandomRecursive => (1..n).map(|i| (i, rng.random_range(0..i))).collect(),
        TreeCase::Path => (1..n).map(|i| (i, i - 1)).collect(),
        TreeCase::Star => (1..n).map(|i| (i, 0)).collect(),
        TreeCase::Caterpillar => caterpillar(&mut rng, n),
        TreeCase::Broom => {
            let handle = n / 2;
            (1..n)
                .map(|i| if i <= handle { (i, i - 1) } else { (i, handle) })
                .collect()
        }
        TreeCase::Binary => (1..n).map(|i| (i, (i - 1) / 2)).collect(),
    };

    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(&mut rng);
    for edge in &mut edges {
        *edge = (perm[edge.0], perm[edge.1]);
    }
    edges.shuffle(&mut rng);
    edges
}

fn caterpillar(rng: &mut impl Rng, n: usize) -> Vec<(usize, usize)> {
    let spine = (n / 3).max(1);
    let mut edges = Vec::with_capacity(n - 1);
    for i in 1..spine {
        edges.push((i, i - 1));
    }
    for i in spine..n {
        edges.push((i, rng.random_range(0..spine)));
    }
    edges
}

/// A forest of random recursive trees with the given component sizes.
///
/// Nodes are labelled `n0`, `n1`, ... across the whole forest.
pub fn generate_forest(sizes: &[usize], seed: u64) -> Forest<String> {
    let mut forest = Forest::new();
    let mut offset = 0;
    for (i, &size) in sizes.iter().enumerate() {
        let edges = generate_tree(TreeCase::RandomRecursive, size, seed ^ ((i as u64) << 20));
        for v in 0..size {
            forest.add_node(format!("n{}", offset + v));
        }
        for (u, v) in edges {
            forest.add_edge(format!("n{}", offset + u), format!("n{}", offset + v));
        }
        offset += size;
    }
    forest
}
