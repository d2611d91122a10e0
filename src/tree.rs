use std::cmp::{self, Ordering};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use log::{debug, trace};

use crate::node::NodeRef;
use crate::rotation::Rotation;
use crate::sequence::{parse_sequence, SequenceError};
use crate::stats::Stats;

/// An ordered set of unique keys kept balanced by AVL rotations.
///
/// Every insertion rebalances the path back to the root before returning, and
/// the case applied by the outermost `balance` step is kept for inspection.
///
/// ```
/// use rotating_avl::{Rotation, Tree};
/// let mut tree = Tree::new();
/// tree.insert(10);
/// tree.insert(20);
/// tree.insert(30);
/// assert_eq!(tree.last_rotation(), Rotation::RR);
/// assert_eq!(tree.root().map(|root| *root.key()), Some(20));
/// assert_eq!(tree.height(), 2);
/// ```
#[derive(Clone)]
pub struct Tree<K> {
    root: Link<K>,
    num_nodes: usize,
    last_rotation: Rotation,
}

pub(crate) type Link<K> = Option<Box<Node<K>>>;

#[derive(Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
    pub(crate) height: usize,
}

/// An iterator over the keys of a tree in sorted order.
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<K: Ord> Tree<K> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
            last_rotation: Rotation::None,
        }
    }

    /// Returns a reference to the key in the tree that is equal to the given key.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.find(key).map(|node| &node.key)
    }

    /// Returns true if the tree contains the key.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Inserts a key and rebalances the tree.
    /// Returns false, leaving the tree untouched, if the key was already present.
    pub fn insert(&mut self, key: K) -> bool {
        let mut last_rotation = self.last_rotation;
        let (root, inserted) = Self::insert_node(self.root.take(), key, &mut last_rotation);
        self.root = Some(root);
        if inserted {
            self.num_nodes += 1;
            self.last_rotation = last_rotation;
        } else {
            trace!("duplicate key ignored");
        }
        inserted
    }

    /// Parses a comma separated key sequence and inserts the keys in order.
    ///
    /// The whole sequence is validated before the first insertion. Returns the
    /// rotation tag as observed after each insertion.
    pub fn insert_sequence(&mut self, input: &str) -> Result<Vec<Rotation>, SequenceError>
    where
        K: FromStr,
        K::Err: fmt::Display,
    {
        let keys = parse_sequence::<K>(input)?;
        Ok(keys
            .into_iter()
            .map(|key| {
                self.insert(key);
                self.last_rotation
            })
            .collect())
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let mut num_nodes = 0;
        self.preorder(|node| {
            let mut height = 1;
            let left_height = height_of(&node.left);
            let right_height = height_of(&node.right);

            // Check key order against the direct children
            if let Some(left) = &node.left {
                assert!(left.key < node.key);
                height = cmp::max(height, left_height + 1);
            }
            if let Some(right) = &node.right {
                assert!(right.key > node.key);
                height = cmp::max(height, right_height + 1);
            }

            // Check height
            assert_eq!(node.height, height);

            // Check AVL condition (nearly balance)
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);

            num_nodes += 1;
        });

        // Check key order across whole subtrees
        let mut keys = self.iter();
        if let Some(mut prev) = keys.next() {
            for key in keys {
                assert!(prev < key);
                prev = key;
            }
        }

        assert_eq!(num_nodes, self.num_nodes);
        assert_eq!(self.count_nodes(), self.num_nodes);
    }

    fn find(&self, key: &K) -> Option<&Node<K>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    // Takes ownership of the subtree at `link` and returns the new subtree root.
    // Ancestors of a duplicate key are neither re-measured nor rebalanced.
    fn insert_node(link: Link<K>, key: K, last_rotation: &mut Rotation) -> (Box<Node<K>>, bool) {
        let mut node = match link {
            None => return (Node::create(key), true),
            Some(node) => node,
        };
        let inserted = match key.cmp(&node.key) {
            Ordering::Equal => return (node, false),
            Ordering::Less => {
                let (left, inserted) = Self::insert_node(node.left.take(), key, last_rotation);
                node.left = Some(left);
                inserted
            }
            Ordering::Greater => {
                let (right, inserted) = Self::insert_node(node.right.take(), key, last_rotation);
                node.right = Some(right);
                inserted
            }
        };
        if !inserted {
            return (node, false);
        }
        node.adjust_height();
        let (node, rotation) = Node::rebalance(node);
        *last_rotation = rotation;
        (node, true)
    }
}

impl<K> Tree<K> {
    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Height of the root node, 0 for an empty tree.
    pub fn height(&self) -> usize {
        height_of(&self.root)
    }

    /// Balance factor of the root node, 0 for an empty tree.
    pub fn balance_factor(&self) -> isize {
        self.root.as_deref().map_or(0, Node::balance_factor)
    }

    /// Counts the nodes by walking the whole tree.
    pub fn count_nodes(&self) -> usize {
        self.root().map_or(0, |root| root.count_nodes())
    }

    /// Rebalance case of the last insertion that added a key.
    pub fn last_rotation(&self) -> Rotation {
        self.last_rotation
    }

    /// Read-only view of the root node, `None` for an empty tree.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.as_deref().map(NodeRef::new)
    }

    /// Snapshot of height, root balance factor, last rotation and node count.
    pub fn stats(&self) -> Stats {
        Stats {
            height: self.height(),
            balance_factor: self.balance_factor(),
            last_rotation: self.last_rotation,
            node_count: self.count_nodes(),
        }
    }

    /// Discards all keys and forgets the last rotation.
    pub fn reset(&mut self) {
        if self.num_nodes > 0 {
            debug!("reset tree, discarding {} nodes", self.num_nodes);
        }
        self.root = None;
        self.num_nodes = 0;
        self.last_rotation = Rotation::None;
    }

    /// Gets an iterator over the keys of the tree in sorted order.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter {
            stack: Vec::with_capacity(self.height()),
            remaining: self.num_nodes,
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Visits the nodes level by level from the root, passing each node's depth.
    pub fn traverse_level_order<F: FnMut(NodeRef<'_, K>, usize)>(&self, mut f: F) {
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_deref() {
            queue.push_back((root, 0));
        }
        while let Some((node, depth)) = queue.pop_front() {
            f(NodeRef::new(node), depth);
            if let Some(left) = node.left.as_deref() {
                queue.push_back((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                queue.push_back((right, depth + 1));
            }
        }
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn preorder<F: FnMut(&Node<K>)>(&self, mut f: F) {
        let mut stack: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            f(node);
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
    }
}

impl<K: Ord> Default for Tree<K> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<K> for Tree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for Tree<K> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = K>,
    {
        iter.into_iter().for_each(move |key| {
            self.insert(key);
        });
    }
}

impl<K: fmt::Debug> fmt::Debug for Tree<K> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K> Iter<'a, K> {
    fn push_left_spine(&mut self, mut current: Option<&'a Node<K>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

// Auto derived Clone would require K: Clone
impl<'a, K> Clone for Iter<'a, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K> ExactSizeIterator for Iter<'a, K> {}

pub(crate) fn height_of<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

impl<K> Node<K> {
    fn create(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    pub(crate) fn balance_factor(&self) -> isize {
        height_of(&self.left) as isize - height_of(&self.right) as isize
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(height_of(&self.left), height_of(&self.right));
    }

    // Pivot on the right child. Returns the new subtree root.
    fn rotate_left(mut node: Box<Self>) -> Box<Self> {
        match node.right.take() {
            None => node,
            Some(mut right) => {
                node.right = right.left.take();
                node.adjust_height();
                right.left = Some(node);
                right.adjust_height();
                right
            }
        }
    }

    // Pivot on the left child. Returns the new subtree root.
    fn rotate_right(mut node: Box<Self>) -> Box<Self> {
        match node.left.take() {
            None => node,
            Some(mut left) => {
                node.left = left.right.take();
                node.adjust_height();
                left.right = Some(node);
                left.adjust_height();
                left
            }
        }
    }

    // Restores the AVL condition at `node`, whose height must be current.
    fn rebalance(mut node: Box<Self>) -> (Box<Self>, Rotation) {
        let balance = node.balance_factor();
        let rotation = if balance > 1 {
            // Left heavy
            if node.left.as_deref().map_or(0, Node::balance_factor) >= 0 {
                Rotation::LL
            } else {
                Rotation::LR
            }
        } else if balance < -1 {
            // Right heavy
            if node.right.as_deref().map_or(0, Node::balance_factor) <= 0 {
                Rotation::RR
            } else {
                Rotation::RL
            }
        } else {
            return (node, Rotation::None);
        };

        let node = match rotation {
            Rotation::LL => Self::rotate_right(node),
            Rotation::LR => {
                node.left = node.left.take().map(Self::rotate_left);
                Self::rotate_right(node)
            }
            Rotation::RR => Self::rotate_left(node),
            Rotation::RL => {
                node.right = node.right.take().map(Self::rotate_right);
                Self::rotate_left(node)
            }
            Rotation::None => node,
        };
        debug!("applied {} rotation, subtree height {}", rotation, node.height);
        (node, rotation)
    }
}
