//! Height-balanced binary tree with persistent-update semantics.
//!
//! The tree is an AVL variant: every structural change rebuilds the spine
//! back to the root and applies at most one corrective rotation per level,
//! so sibling heights never differ by more than one. Mutating operations
//! consume the tree and return the rebalanced replacement; unchanged
//! subtrees are moved, not copied.
//!
//! Ordering comes from [`FuzzyOrd`] rather than [`Ord`] because the index
//! orders spots with an epsilon band around each coordinate, and that
//! comparison cannot honestly satisfy `Ord`'s transitivity contract.

use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::hash::Hash;

/// Comparison driving tree placement.
///
/// `Equal` means the two values occupy the same position on the ordering
/// axis (possibly only approximately); it does not imply the values are the
/// same entity. Implementations must behave like a total order for values
/// separated by more than their tolerance band.
pub trait FuzzyOrd {
    fn fuzzy_cmp(&self, other: &Self) -> Ordering;
}

/// A persistent AVL tree.
///
/// `Empty` or a node owning its two subtrees plus a cached height. Height of
/// `Empty` is 0; a node's height is one more than its taller child's, and is
/// recomputed in O(1) from the children whenever a node is rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub enum AvlTree<T> {
    Empty,
    Node {
        left: Box<AvlTree<T>>,
        value: T,
        right: Box<AvlTree<T>>,
        height: usize,
    },
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        AvlTree::Empty
    }
}

impl<T> AvlTree<T> {
    pub fn new() -> Self {
        AvlTree::Empty
    }

    fn leaf(value: T) -> Self {
        AvlTree::Node {
            left: Box::new(AvlTree::Empty),
            value,
            right: Box::new(AvlTree::Empty),
            height: 1,
        }
    }

    /// Rebuild a node from its parts, recomputing the cached height.
    fn node(left: Self, value: T, right: Self) -> Self {
        let height = 1 + left.height().max(right.height());
        AvlTree::Node {
            left: Box::new(left),
            value,
            right: Box::new(right),
            height,
        }
    }

    /// Cached height; 0 for the empty tree.
    pub fn height(&self) -> usize {
        match self {
            AvlTree::Empty => 0,
            AvlTree::Node { height, .. } => *height,
        }
    }

    /// Number of stored values. O(n); used by tests and diagnostics.
    pub fn len(&self) -> usize {
        match self {
            AvlTree::Empty => 0,
            AvlTree::Node { left, right, .. } => 1 + left.len() + right.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AvlTree::Empty)
    }

    /// Verification-only: true when every node satisfies the AVL invariant.
    pub fn is_balanced(&self) -> bool {
        match self {
            AvlTree::Empty => true,
            AvlTree::Node { left, right, .. } => {
                self.balance().abs() <= 1 && left.is_balanced() && right.is_balanced()
            }
        }
    }

    /// Height difference between the left and right subtrees.
    fn balance(&self) -> isize {
        match self {
            AvlTree::Empty => 0,
            AvlTree::Node { left, right, .. } => {
                left.height() as isize - right.height() as isize
            }
        }
    }

    /// One corrective step: if this node violates the invariant, apply a
    /// single or double rotation, chosen by which grandchild is taller.
    /// Children are assumed to already satisfy the invariant.
    fn rebalance(self) -> Self {
        let diff = self.balance();
        if diff > 1 {
            match self {
                AvlTree::Node {
                    left,
                    value,
                    right,
                    height,
                } => {
                    // A taller inner grandchild needs the double rotation:
                    // first rotate the left child leftward.
                    let left = if left.balance() < 0 {
                        Box::new(left.rotate_left())
                    } else {
                        left
                    };
                    // Height is stale here; rotate_right rebuilds every
                    // node it touches and recomputes it.
                    AvlTree::Node {
                        left,
                        value,
                        right,
                        height,
                    }
                    .rotate_right()
                }
                AvlTree::Empty => AvlTree::Empty,
            }
        } else if diff < -1 {
            match self {
                AvlTree::Node {
                    left,
                    value,
                    right,
                    height,
                } => {
                    let right = if right.balance() > 0 {
                        Box::new(right.rotate_right())
                    } else {
                        right
                    };
                    AvlTree::Node {
                        left,
                        value,
                        right,
                        height,
                    }
                    .rotate_left()
                }
                AvlTree::Empty => AvlTree::Empty,
            }
        } else {
            self
        }
    }

    fn rotate_right(self) -> Self {
        match self {
            AvlTree::Node {
                left, value, right, ..
            } => match *left {
                AvlTree::Node {
                    left: l_left,
                    value: l_value,
                    right: l_right,
                    ..
                } => Self::node(*l_left, l_value, Self::node(*l_right, value, *right)),
                AvlTree::Empty => unreachable!("rotate_right with an empty left subtree"),
            },
            AvlTree::Empty => AvlTree::Empty,
        }
    }

    fn rotate_left(self) -> Self {
        match self {
            AvlTree::Node {
                left, value, right, ..
            } => match *right {
                AvlTree::Node {
                    left: r_left,
                    value: r_value,
                    right: r_right,
                    ..
                } => Self::node(Self::node(*left, value, *r_left), r_value, *r_right),
                AvlTree::Empty => unreachable!("rotate_left with an empty right subtree"),
            },
            AvlTree::Empty => AvlTree::Empty,
        }
    }
}

impl<T: FuzzyOrd + PartialEq> AvlTree<T> {
    /// Insert a value, returning the rebalanced tree.
    ///
    /// When the comparator places `new` at an occupied position and the
    /// occupant is the same entity (by `==`), the insert is idempotent.
    /// A value that is merely within the comparator's tolerance band of the
    /// occupant is a different entity and descends right, like any value
    /// not strictly less than the root.
    pub fn insert(self, new: T) -> Self {
        match self {
            AvlTree::Empty => Self::leaf(new),
            AvlTree::Node {
                left,
                value,
                right,
                height,
            } => match new.fuzzy_cmp(&value) {
                Ordering::Less => Self::node((*left).insert(new), value, *right).rebalance(),
                Ordering::Greater => Self::node(*left, value, (*right).insert(new)).rebalance(),
                Ordering::Equal => {
                    if new == value {
                        AvlTree::Node {
                            left,
                            value,
                            right,
                            height,
                        }
                    } else {
                        Self::node(*left, value, (*right).insert(new)).rebalance()
                    }
                }
            },
        }
    }

    /// Remove the value matching `target`, returning the rebalanced tree.
    /// Removing an absent value is a silent no-op.
    ///
    /// An internal node is replaced by the minimum of its right subtree;
    /// with no right subtree the left subtree takes its place directly.
    pub fn remove(self, target: &T) -> Self {
        match self {
            AvlTree::Empty => AvlTree::Empty,
            AvlTree::Node {
                left, value, right, ..
            } => match target.fuzzy_cmp(&value) {
                Ordering::Less => Self::node((*left).remove(target), value, *right).rebalance(),
                Ordering::Greater => {
                    Self::node(*left, value, (*right).remove(target)).rebalance()
                }
                Ordering::Equal => {
                    if *target == value {
                        match *right {
                            AvlTree::Empty => *left,
                            node @ AvlTree::Node { .. } => {
                                let (successor, rest) = node.take_min();
                                Self::node(*left, successor, rest).rebalance()
                            }
                        }
                    } else {
                        // Same axis position, different entity; it can only
                        // live to the right.
                        Self::node(*left, value, (*right).remove(target)).rebalance()
                    }
                }
            },
        }
    }

    /// Detach the minimum value. Caller guarantees a non-empty tree.
    fn take_min(self) -> (T, Self) {
        match self {
            AvlTree::Node {
                left, value, right, ..
            } => match *left {
                AvlTree::Empty => (value, *right),
                node @ AvlTree::Node { .. } => {
                    let (min, rest) = node.take_min();
                    (min, Self::node(rest, value, *right).rebalance())
                }
            },
            AvlTree::Empty => unreachable!("take_min on an empty tree"),
        }
    }
}

impl<T: FuzzyOrd + Clone + Eq + Hash> AvlTree<T> {
    /// All values within `[low, high]` inclusive under the comparator.
    pub fn values_between(&self, low: &T, high: &T) -> FxHashSet<T> {
        self.values_between_where(low, high, |_| true)
    }

    /// Like [`values_between`](Self::values_between), restricted to values
    /// satisfying `predicate`. Subtrees entirely outside the range are
    /// never descended, keeping the cost near O(log n + k).
    pub fn values_between_where<F>(&self, low: &T, high: &T, predicate: F) -> FxHashSet<T>
    where
        F: Fn(&T) -> bool + Copy,
    {
        match self {
            AvlTree::Empty => FxHashSet::default(),
            AvlTree::Node {
                left, value, right, ..
            } => {
                if value.fuzzy_cmp(low) == Ordering::Less {
                    // This node and its whole left side sit below the range.
                    right.values_between_where(low, high, predicate)
                } else if value.fuzzy_cmp(high) == Ordering::Greater {
                    left.values_between_where(low, high, predicate)
                } else {
                    let mut found = left.values_between_where(low, high, predicate);
                    found.extend(right.values_between_where(low, high, predicate));
                    if predicate(value) {
                        found.insert(value.clone());
                    }
                    found
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl FuzzyOrd for i32 {
        fn fuzzy_cmp(&self, other: &Self) -> Ordering {
            self.cmp(other)
        }
    }

    fn tree_of(values: impl IntoIterator<Item = i32>) -> AvlTree<i32> {
        values
            .into_iter()
            .fold(AvlTree::new(), |tree, v| tree.insert(v))
    }

    fn sorted(set: FxHashSet<i32>) -> Vec<i32> {
        let mut v: Vec<_> = set.into_iter().collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_balance_holds_after_every_insert() {
        // Strictly ascending inserts are the classic AVL worst case.
        let mut tree = AvlTree::new();
        for v in 0..100 {
            tree = tree.insert(v);
            assert!(tree.is_balanced(), "unbalanced after inserting {v}");
        }
        assert_eq!(tree.len(), 100);
        // AVL height bound: well under 1.45 * log2(n).
        assert!(tree.height() <= 9, "height {} too large", tree.height());
    }

    #[test]
    fn test_balance_holds_after_every_remove() {
        let mut tree = tree_of(0..64);
        for v in (0..64).filter(|v| v % 2 == 0) {
            tree = tree.remove(&v);
            assert!(tree.is_balanced(), "unbalanced after removing {v}");
        }
        assert_eq!(tree.len(), 32);
        let survivors = sorted(tree.values_between(&0, &63));
        assert_eq!(survivors, (0..64).filter(|v| v % 2 == 1).collect::<Vec<_>>());
    }

    #[test]
    fn test_duplicate_insert_is_idempotent() {
        let tree = tree_of([5, 3, 8]);
        let before = tree.clone();
        let after = tree.insert(5);
        assert_eq!(after, before);
        assert_eq!(after.len(), 3);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let tree = tree_of([10, 4, 17, 2, 8]);
        let before = tree.clone();
        let after = tree.remove(&99);
        assert_eq!(after, before);
    }

    #[test]
    fn test_remove_internal_node_promotes_successor() {
        // 10 becomes the root; removing it must promote 12, the minimum of
        // the right subtree.
        let tree = tree_of([10, 4, 17, 2, 8, 12, 20]);
        let pruned = tree.remove(&10);
        assert!(pruned.is_balanced());
        assert_eq!(sorted(pruned.values_between(&0, &30)), vec![2, 4, 8, 12, 17, 20]);
    }

    #[test]
    fn test_remove_node_without_right_subtree() {
        let tree = tree_of([10, 4, 17, 2]);
        let pruned = tree.remove(&4);
        assert!(pruned.is_balanced());
        assert_eq!(sorted(pruned.values_between(&0, &30)), vec![2, 10, 17]);
    }

    #[test]
    fn test_values_between_is_inclusive() {
        let tree = tree_of(0..20);
        assert_eq!(sorted(tree.values_between(&5, &9)), vec![5, 6, 7, 8, 9]);
        assert_eq!(sorted(tree.values_between(&19, &19)), vec![19]);
        assert!(tree.values_between(&25, &30).is_empty());
    }

    #[test]
    fn test_values_between_is_order_independent() {
        let ascending = tree_of(0..32);
        let shuffled = tree_of([
            17, 3, 28, 9, 0, 22, 14, 31, 6, 25, 11, 19, 1, 30, 8, 27, 4, 16, 23, 13, 2, 29, 10,
            21, 5, 18, 12, 26, 7, 24, 15, 20,
        ]);
        assert_eq!(
            sorted(ascending.values_between(&8, &24)),
            sorted(shuffled.values_between(&8, &24)),
        );
    }

    #[test]
    fn test_values_between_with_predicate() {
        let tree = tree_of(0..20);
        let evens = tree.values_between_where(&0, &19, |v| v % 2 == 0);
        assert_eq!(sorted(evens), (0..20).filter(|v| v % 2 == 0).collect::<Vec<_>>());
    }

    #[test]
    fn test_random_churn_stays_balanced() {
        // Deterministic pseudo-random insert/remove churn.
        let mut tree = AvlTree::new();
        let mut state: u64 = 0x9e37_79b9;
        for round in 0..500 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let v = (state >> 33) as i32 % 128;
            tree = if round % 3 == 0 { tree.remove(&v) } else { tree.insert(v) };
            assert!(tree.is_balanced(), "unbalanced at round {round}");
        }
    }
}
