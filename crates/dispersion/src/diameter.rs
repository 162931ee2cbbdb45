use crate::distance::DistanceField;
use crate::tree::{Candidates, Tree};

/// Two candidates at maximal distance from each other (double sweep).
///
/// Returns `None` when there are no candidates; a single candidate is paired
/// with itself.
pub fn most_distant_pair(tree: &Tree, candidates: &Candidates) -> Option<(usize, usize)> {
    let mut field = DistanceField::new(tree.len());
    most_distant_pair_with(&mut field, tree, candidates)
}

pub(crate) fn most_distant_pair_with(
    field: &mut DistanceField,
    tree: &Tree,
    candidates: &Candidates,
) -> Option<(usize, usize)> {
    let &seed = candidates.members().first()?;
    field.fill(tree, seed);
    let first = farthest_member(field.distances(), candidates.members());
    field.fill(tree, first);
    let second = farthest_member(field.distances(), candidates.members());
    Some((first, second))
}

/// First member (in slice order) with the largest distance.
fn farthest_member(dist: &[u64], members: &[usize]) -> usize {
    let mut best = members[0];
    for &v in &members[1..] {
        if dist[v] > dist[best] {
            best = v;
        }
    }
    best
}
