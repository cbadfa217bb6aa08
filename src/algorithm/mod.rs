//! Algorithms over geometry trees.

mod area;
mod collect;
mod dimensions;
mod euclidean_length;

pub use area::Area;
pub use collect::collect;
pub use dimensions::TopologicalDimension;
pub use euclidean_length::EuclideanLength;
