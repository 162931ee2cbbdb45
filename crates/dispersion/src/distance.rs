use crate::tree::Tree;

pub const UNREACHED: u64 = u64::MAX;
const NONE: usize = usize::MAX;

/// Single-source hop distances on a [`Tree`].
///
/// The buffer and the work stack are reused between fills, so a selector
/// that needs many sweeps allocates them once.
#[derive(Clone, Debug, Default)]
pub struct DistanceField {
    dist: Vec<u64>,
    stack: Vec<(usize, usize)>,
}

impl DistanceField {
    pub fn new(n: usize) -> Self {
        Self {
            dist: vec![UNREACHED; n],
            stack: Vec::with_capacity(n),
        }
    }

    pub fn fill(&mut self, tree: &Tree, root: usize) -> &[u64] {
        self.fill_avoiding(tree, root, None)
    }

    /// Fills distances from `root` without stepping into `parent`, which must
    /// be a neighbor of `root` when given. Vertices behind `parent` stay
    /// [`UNREACHED`].
    pub fn fill_avoiding(&mut self, tree: &Tree, root: usize, parent: Option<usize>) -> &[u64] {
        let n = tree.len();
        self.dist.clear();
        self.dist.resize(n, UNREACHED);
        self.stack.clear();

        self.dist[root] = 0;
        self.stack.push((root, parent.unwrap_or(NONE)));
        while let Some((v, from)) = self.stack.pop() {
            let next = self.dist[v] + 1;
            for &to in tree.neighbors(v) {
                if to != from {
                    self.dist[to] = next;
                    self.stack.push((to, v));
                }
            }
        }
        &self.dist
    }

    #[inline]
    pub fn distances(&self) -> &[u64] {
        &self.dist
    }

    #[inline]
    pub fn get(&self, v: usize) -> u64 {
        self.dist[v]
    }
}

pub fn distances_from(tree: &Tree, root: usize) -> Vec<u64> {
    let mut field = DistanceField::new(tree.len());
    field.fill(tree, root);
    field.dist
}
