mod kdtree;

pub use kdtree::{KdTree, Nearest};
