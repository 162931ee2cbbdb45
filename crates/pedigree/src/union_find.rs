/// Disjoint sets over `0..n` with path compression and union by rank.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merges the sets of `a` and `b`. Returns `false` if they were already
    /// one set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return false;
        }
        if self.rank[ra] < self.rank[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        if self.rank[ra] == self.rank[rb] {
            self.rank[ra] = self.rank[ra].saturating_add(1);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::DisjointSet;

    #[test]
    fn singletons() {
        let mut set = DisjointSet::new(3);
        for i in 0..3 {
            assert_eq!(set.find(i), i);
        }
    }

    #[test]
    fn union_reports_new_links_only() {
        let mut set = DisjointSet::new(5);
        assert!(set.union(0, 1));
        assert!(set.union(2, 3));
        assert!(set.union(1, 3));
        assert!(!set.union(0, 2));
        assert_eq!(set.find(0), set.find(3));
        assert_ne!(set.find(0), set.find(4));
    }

    #[test]
    fn long_chain_compresses() {
        let n = 100_000;
        let mut set = DisjointSet::new(n);
        for i in 1..n {
            assert!(set.union(i, i - 1));
        }
        let root = set.find(0);
        assert_eq!(set.find(n - 1), root);
        assert!(!set.union(0, n - 1));
    }
}
