use crate::error::SpatialError;
use crate::math::Point3;

/// Maximum number of points stored in a leaf before it is split.
const LEAF_SIZE: usize = 8;

/// Result of a nearest-point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Position of the nearest stored point.
    pub position: Point3,
    /// Caller-supplied index of the nearest stored point.
    pub index: u32,
    /// Euclidean distance from the query point.
    pub distance: f64,
}

enum KdNode {
    Leaf {
        items: Vec<usize>,
    },
    Split {
        axis: usize,
        split_val: f64,
        left: Box<KdNode>,
        right: Box<KdNode>,
    },
}

/// Static k-d tree over a point set.
///
/// Points are inserted first, then [`balance`](Self::balance) builds the
/// tree once. Queries on an unbalanced tree are rejected, so an insert
/// after balancing requires another `balance` call.
#[derive(Default)]
pub struct KdTree {
    points: Vec<(Point3, u32)>,
    root: Option<KdNode>,
    balanced: bool,
}

impl KdTree {
    /// Creates an empty tree with room for `capacity` points.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            root: None,
            balanced: false,
        }
    }

    /// Adds a point tagged with `index`.
    pub fn insert(&mut self, point: Point3, index: u32) {
        self.points.push((point, index));
        self.balanced = false;
    }

    /// Returns the number of stored points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no points have been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Builds the tree from all inserted points.
    pub fn balance(&mut self) {
        let mut items: Vec<usize> = (0..self.points.len()).collect();
        self.root = if items.is_empty() {
            None
        } else {
            Some(build(&self.points, &mut items, 0))
        };
        self.balanced = true;
    }

    /// Finds the stored point nearest to `point`.
    ///
    /// Returns `Ok(None)` when the tree is empty.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::NotBalanced`] if points were inserted since
    /// the last [`balance`](Self::balance).
    pub fn find(&self, point: &Point3) -> Result<Option<Nearest>, SpatialError> {
        if !self.balanced {
            return Err(SpatialError::NotBalanced);
        }
        let Some(root) = &self.root else {
            return Ok(None);
        };

        let mut best: Option<(usize, f64)> = None;
        self.search(root, point, &mut best);

        Ok(best.map(|(item, dist_sq)| {
            let (position, index) = self.points[item];
            Nearest {
                position,
                index,
                distance: dist_sq.sqrt(),
            }
        }))
    }

    fn search(&self, node: &KdNode, point: &Point3, best: &mut Option<(usize, f64)>) {
        match node {
            KdNode::Leaf { items } => {
                for &item in items {
                    let dist_sq = (*point - self.points[item].0).norm_squared();
                    if best.is_none_or(|(_, d)| dist_sq < d) {
                        *best = Some((item, dist_sq));
                    }
                }
            }
            KdNode::Split {
                axis,
                split_val,
                left,
                right,
            } => {
                let diff = point[*axis] - split_val;
                let (near, far) = if diff < 0.0 {
                    (left, right)
                } else {
                    (right, left)
                };

                self.search(near, point, best);

                // The far side can only hold a closer point if the splitting
                // plane is nearer than the current best.
                if best.is_none_or(|(_, d)| diff * diff < d) {
                    self.search(far, point, best);
                }
            }
        }
    }
}

fn build(points: &[(Point3, u32)], items: &mut [usize], depth: usize) -> KdNode {
    if items.len() <= LEAF_SIZE {
        return KdNode::Leaf {
            items: items.to_vec(),
        };
    }

    let axis = depth % 3;
    let mid = items.len() / 2;
    items.select_nth_unstable_by(mid, |&a, &b| points[a].0[axis].total_cmp(&points[b].0[axis]));
    let split_val = points[items[mid]].0[axis];

    let (left, right) = items.split_at_mut(mid);
    KdNode::Split {
        axis,
        split_val,
        left: Box::new(build(points, left, depth + 1)),
        right: Box::new(build(points, right, depth + 1)),
    }
}
