//! An AVL tree of unique keys that reports which rotation case each insertion
//! applied.
//!
//! The tree performs no rendering itself. An observer inspects it after each
//! [`Tree::insert`] or [`Tree::reset`] through [`Tree::root`], [`Tree::stats`]
//! and the [`NodeRef`] accessors.
//!
//! ```
//! use rotating_avl::{Rotation, Tree};
//! let mut tree = Tree::new();
//! for key in [30, 10, 20] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.last_rotation(), Rotation::LR);
//! let root = tree.root().unwrap();
//! assert_eq!(*root.key(), 20);
//! assert_eq!(root.left().map(|node| *node.key()), Some(10));
//! assert_eq!(root.right().map(|node| *node.key()), Some(30));
//! ```

mod node;
mod rotation;
mod sequence;
mod stats;
mod tree;

pub use node::NodeRef;
pub use rotation::{ParseRotationError, Rotation};
pub use sequence::{parse_sequence, SequenceError};
pub use stats::Stats;
pub use tree::{Iter, Tree};
