//! Pedigree preprocessing: liveness marking and construction of the acyclic
//! lineage forest consumed by `dispersion`.

mod error;
mod lineage;
mod liveness;
mod record;
mod union_find;

pub use error::{PedigreeError, Result};
pub use lineage::{LineageForest, ParentLine, build_forest};
pub use liveness::{GenderFilter, LivenessFilter};
pub use record::{Pedigree, PedigreeRecord};
pub use union_find::DisjointSet;
