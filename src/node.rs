use std::cmp;
use std::fmt;

use crate::tree::Node;

/// A read-only view of a single node and the subtree below it.
///
/// Obtained from [`Tree::root`](crate::Tree::root) or while traversing the
/// tree; renderers walk the structure through `left` and `right`.
pub struct NodeRef<'a, K> {
    node: &'a Node<K>,
}

impl<'a, K> NodeRef<'a, K> {
    pub(crate) fn new(node: &'a Node<K>) -> Self {
        Self { node }
    }

    pub fn key(&self) -> &'a K {
        &self.node.key
    }

    /// Height of the subtree rooted at this node. A leaf has height 1.
    pub fn height(&self) -> usize {
        self.node.height
    }

    /// Height of the left subtree minus height of the right subtree.
    pub fn balance_factor(&self) -> isize {
        self.node.balance_factor()
    }

    pub fn left(&self) -> Option<NodeRef<'a, K>> {
        self.node.left.as_deref().map(NodeRef::new)
    }

    pub fn right(&self) -> Option<NodeRef<'a, K>> {
        self.node.right.as_deref().map(NodeRef::new)
    }

    pub fn is_leaf(&self) -> bool {
        self.node.left.is_none() && self.node.right.is_none()
    }

    /// Counts the nodes of this subtree by walking all of it.
    pub fn count_nodes(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.node];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        count
    }

    /// Recomputes the height from the leaves instead of reading the cached value.
    pub fn measured_height(&self) -> usize {
        1 + cmp::max(
            self.left().map_or(0, |left| left.measured_height()),
            self.right().map_or(0, |right| right.measured_height()),
        )
    }
}

// Auto derived Clone and Copy would require K: Clone
impl<'a, K> Clone for NodeRef<'a, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K> Copy for NodeRef<'a, K> {}

impl<'a, K: fmt::Debug> fmt::Debug for NodeRef<'a, K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.node.key)
            .field("height", &self.node.height)
            .field("balance_factor", &self.balance_factor())
            .finish()
    }
}
