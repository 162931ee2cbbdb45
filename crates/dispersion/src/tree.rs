/// Undirected tree over dense indices `0..n`, stored as CSR adjacency.
///
/// Neighbors of a vertex keep the order in which their edges were inserted.
#[derive(Clone, Debug)]
pub struct Tree {
    offsets: Vec<usize>,
    to: Vec<usize>,
}

impl Tree {
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut degree = vec![0_usize; n];
        for &(u, v) in edges {
            assert!(u < n && v < n, "edge ({u}, {v}) out of range for {n} vertices");
            degree[u] += 1;
            degree[v] += 1;
        }
        let mut offsets = vec![0_usize; n + 1];
        for i in 0..n {
            offsets[i + 1] = offsets[i] + degree[i];
        }
        let mut to = vec![0_usize; edges.len() * 2];
        let mut cursor = offsets.clone();
        for &(u, v) in edges {
            to[cursor[u]] = v;
            cursor[u] += 1;
            to[cursor[v]] = u;
            cursor[v] += 1;
        }
        Self { offsets, to }
    }

    /// Builds the tree from per-vertex neighbor lists, which must already be
    /// symmetric.
    pub fn from_adjacency(adjacency: &[Vec<usize>]) -> Self {
        let n = adjacency.len();
        let mut offsets = Vec::with_capacity(n + 1);
        let mut to = Vec::with_capacity(adjacency.iter().map(Vec::len).sum());
        offsets.push(0);
        for neighbors in adjacency {
            to.extend(neighbors.iter().copied());
            offsets.push(to.len());
        }
        debug_assert!(to.iter().all(|&v| v < n));
        Self { offsets, to }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.to[self.offsets[v]..self.offsets[v + 1]]
    }

    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.to.len() / 2
    }
}

/// Nodes of a [`Tree`] eligible for selection.
///
/// Members are kept sorted, which pins every tie-break to ascending index.
#[derive(Clone, Debug)]
pub struct Candidates {
    members: Vec<usize>,
    mask: Vec<bool>,
}

impl Candidates {
    pub fn new(n: usize, members: impl IntoIterator<Item = usize>) -> Self {
        let mut mask = vec![false; n];
        for v in members {
            assert!(v < n, "candidate {v} out of range for {n} vertices");
            mask[v] = true;
        }
        let members = (0..n).filter(|&v| mask[v]).collect();
        Self { members, mask }
    }

    pub fn all(n: usize) -> Self {
        Self {
            members: (0..n).collect(),
            mask: vec![true; n],
        }
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.mask.get(v).copied().unwrap_or(false)
    }

    #[inline]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
