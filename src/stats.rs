use std::fmt;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

use crate::rotation::Rotation;

/// Snapshot of the figures an observer reports after each mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Stats {
    /// Height of the root, 0 for an empty tree.
    pub height: usize,
    /// Balance factor of the root, 0 for an empty tree.
    pub balance_factor: isize,
    pub last_rotation: Rotation,
    pub node_count: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "height={} bf={} rotation={} nodes={}",
            self.height, self.balance_factor, self.last_rotation, self.node_count
        )
    }
}
