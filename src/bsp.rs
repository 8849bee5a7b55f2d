//! Binary space partition tree.
//!
//! Modeled as an arena (`Vec<BspNode>`) with `Option<usize>` links rather
//! than raw parent/left/right pointers, so child and parent references stay
//! index-valid without lifetimes or unsafe aliasing.

use crate::grid::{Tile, TileGrid};
use rand::Rng;

/// Which axis a split divides along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitDirection {
    Horizontal,
    Vertical,
}

/// An axis-aligned rectangle plus tree links. The root has no parent; a
/// node's children, if either is present, are both present, and the two
/// children's rectangles exactly tile the parent along one axis.
#[derive(Clone, Copy, Debug)]
pub struct BspNode {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

impl BspNode {
    fn leaf(x: i32, y: i32, width: i32, height: i32, parent: Option<usize>) -> Self {
        Self { x, y, width, height, parent, left: None, right: None }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none()
    }
}

/// Owns every node in the tree. Index 0 is always the root.
pub struct BspTree {
    nodes: Vec<BspNode>,
}

impl BspTree {
    /// A fresh single-leaf tree covering `(0, 0, width, height)`.
    pub fn new(width: i32, height: i32) -> Self {
        Self { nodes: vec![BspNode::leaf(0, 0, width, height, None)] }
    }

    pub fn root(&self) -> usize {
        0
    }

    pub fn node(&self, idx: usize) -> &BspNode {
        &self.nodes[idx]
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Splits a leaf into left/right children. `position` must be strictly
    /// inside the split dimension or this is a no-op. A node
    /// cannot be split twice — already-split nodes are also a no-op.
    pub fn split(&mut self, idx: usize, position: i32, direction: SplitDirection) {
        let node = self.nodes[idx];
        if !node.is_leaf() {
            return;
        }
        match direction {
            SplitDirection::Horizontal => {
                if position <= 0 || position >= node.width {
                    return;
                }
                let left = BspNode::leaf(node.x, node.y, position, node.height, Some(idx));
                let right = BspNode::leaf(node.x + position, node.y, node.width - position, node.height, Some(idx));
                self.attach_children(idx, left, right);
            }
            SplitDirection::Vertical => {
                if position <= 0 || position >= node.height {
                    return;
                }
                let left = BspNode::leaf(node.x, node.y, node.width, position, Some(idx));
                let right = BspNode::leaf(node.x, node.y + position, node.width, node.height - position, Some(idx));
                self.attach_children(idx, left, right);
            }
        }
    }

    fn attach_children(&mut self, idx: usize, left: BspNode, right: BspNode) {
        let left_idx = self.nodes.len();
        self.nodes.push(left);
        let right_idx = self.nodes.len();
        self.nodes.push(right);
        self.nodes[idx].left = Some(left_idx);
        self.nodes[idx].right = Some(right_idx);
    }

    pub fn left(&self, idx: usize) -> Option<usize> {
        self.nodes[idx].left
    }

    pub fn right(&self, idx: usize) -> Option<usize> {
        self.nodes[idx].right
    }

    pub fn parent(&self, idx: usize) -> Option<usize> {
        self.nodes[idx].parent
    }

    /// The other child of `idx`'s parent, if `idx` is not the root.
    pub fn sibling(&self, idx: usize) -> Option<usize> {
        let parent = self.nodes[idx].parent?;
        let p = self.nodes[parent];
        if p.left == Some(idx) { p.right } else { p.left }
    }

    fn leftmost_leaf(&self, mut idx: usize) -> usize {
        while let Some(left) = self.nodes[idx].left {
            idx = left;
        }
        idx
    }

    /// In-order leaf successor: ascend until `idx` is its parent's left
    /// child, then descend the right subtree to its leftmost leaf. Returns
    /// `None` after the rightmost leaf.
    pub fn next_leaf(&self, idx: usize) -> Option<usize> {
        let mut cur = idx;
        loop {
            let parent = self.nodes[cur].parent?;
            let p = self.nodes[parent];
            if p.left == Some(cur) {
                return Some(self.leftmost_leaf(p.right.unwrap()));
            }
            cur = parent;
        }
    }

    /// Uniform random descent (coin-flip per interior level). Not uniform
    /// over leaves when subtree depths differ — intentional.
    pub fn random_leaf(&self, rng: &mut impl Rng, start: usize) -> usize {
        let mut cur = start;
        while let (Some(l), Some(r)) = (self.nodes[cur].left, self.nodes[cur].right) {
            cur = if rng.gen_bool(0.5) { l } else { r };
        }
        cur
    }

    pub fn leaves(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cur = Some(self.leftmost_leaf(self.root()));
        while let Some(idx) = cur {
            out.push(idx);
            cur = self.next_leaf(idx);
        }
        out
    }

    /// Recursively split, picking a direction by coin-flip (overridden if
    /// the losing axis is too small), at the rectangle's midpoint. Stops
    /// when both axes are under `2*min` in their dimension or `max_recursion`
    /// hits zero.
    pub fn recursive_split(&mut self, idx: usize, min_w: i32, min_h: i32, max_recursion: u32, rng: &mut impl Rng) {
        if max_recursion == 0 {
            return;
        }
        let node = self.nodes[idx];
        let can_h = node.width >= 2 * min_w;
        let can_v = node.height >= 2 * min_h;
        if !can_h && !can_v {
            return;
        }
        let direction = if can_h && can_v {
            if rng.gen_bool(0.5) { SplitDirection::Horizontal } else { SplitDirection::Vertical }
        } else if can_h {
            SplitDirection::Horizontal
        } else {
            SplitDirection::Vertical
        };
        let position = match direction {
            SplitDirection::Horizontal => node.width / 2,
            SplitDirection::Vertical => node.height / 2,
        };
        self.split(idx, position, direction);
        if let (Some(l), Some(r)) = (self.nodes[idx].left, self.nodes[idx].right) {
            self.recursive_split(l, min_w, min_h, max_recursion - 1, rng);
            self.recursive_split(r, min_w, min_h, max_recursion - 1, rng);
        }
    }

    /// Scans a node's rectangle row-major for Room tiles and returns the
    /// midpoint of the first contiguous Room span found.
    pub fn find_room(&self, idx: usize, grid: &TileGrid) -> Option<(i32, i32)> {
        let node = self.nodes[idx];
        for y in node.y..node.y + node.height {
            let mut span_start: Option<i32> = None;
            for x in node.x..node.x + node.width {
                let is_room = grid.tile_is(x, y, Tile::Room);
                match (is_room, span_start) {
                    (true, None) => span_start = Some(x),
                    (false, Some(start)) => return Some(((start + x - 1) / 2, y)),
                    _ => {}
                }
            }
            if let Some(start) = span_start {
                let end = node.x + node.width - 1;
                return Some(((start + end) / 2, y));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn fresh_tree_is_single_leaf() {
        let tree = BspTree::new(80, 25);
        assert_eq!(tree.leaf_count(), 1);
        assert!(tree.node(tree.root()).is_leaf());
    }

    #[test]
    fn split_out_of_range_is_noop() {
        let mut tree = BspTree::new(10, 10);
        tree.split(0, 0, SplitDirection::Horizontal);
        assert!(tree.node(0).is_leaf());
        tree.split(0, 10, SplitDirection::Horizontal);
        assert!(tree.node(0).is_leaf());
    }

    #[test]
    fn split_tiles_parent_exactly() {
        let mut tree = BspTree::new(10, 6);
        tree.split(0, 4, SplitDirection::Horizontal);
        let l = tree.left(0).unwrap();
        let r = tree.right(0).unwrap();
        assert_eq!(tree.node(l).width + tree.node(r).width, 10);
        assert_eq!(tree.node(l).height, 6);
        assert_eq!(tree.node(r).x, tree.node(l).x + tree.node(l).width);
    }

    #[test]
    fn cannot_split_twice() {
        let mut tree = BspTree::new(10, 10);
        tree.split(0, 5, SplitDirection::Horizontal);
        let count_before = tree.leaf_count();
        tree.split(0, 2, SplitDirection::Vertical);
        assert_eq!(tree.leaf_count(), count_before);
    }

    #[test]
    fn max_splits_zero_yields_single_leaf() {
        let mut tree = BspTree::new(80, 25);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        tree.recursive_split(tree.root(), 4, 4, 0, &mut rng);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn recursive_split_produces_multiple_leaves() {
        let mut tree = BspTree::new(80, 25);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        tree.recursive_split(tree.root(), 5, 5, 100, &mut rng);
        assert!(tree.leaf_count() > 1);
    }

    #[test]
    fn next_leaf_is_in_order_and_terminates() {
        let mut tree = BspTree::new(80, 25);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        tree.recursive_split(tree.root(), 5, 5, 20, &mut rng);
        let leaves = tree.leaves();
        assert_eq!(leaves.len(), tree.leaf_count());
        // next_leaf from the rightmost leaf is None.
        assert_eq!(tree.next_leaf(*leaves.last().unwrap()), None);
    }

    #[test]
    fn sibling_is_the_other_child() {
        let mut tree = BspTree::new(10, 10);
        tree.split(0, 5, SplitDirection::Horizontal);
        let l = tree.left(0).unwrap();
        let r = tree.right(0).unwrap();
        assert_eq!(tree.sibling(l), Some(r));
        assert_eq!(tree.sibling(r), Some(l));
        assert_eq!(tree.sibling(tree.root()), None);
    }

    #[test]
    fn find_room_returns_midpoint_of_room_span() {
        let mut tree = BspTree::new(10, 5);
        tree.split(0, 5, SplitDirection::Horizontal);
        let left = tree.left(0).unwrap();
        let mut grid = TileGrid::new(10, 5).unwrap();
        for x in 1..4 {
            grid.set_tile(x, 2, Tile::Room);
        }
        let center = tree.find_room(left, &grid);
        assert_eq!(center, Some((2, 2)));
    }
}
