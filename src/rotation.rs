use std::fmt;
use std::str::FromStr;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

/// Rebalance case applied by a single `balance` step.
///
/// The case is named after the shape of the path that unbalanced the node:
/// `LL` and `RR` are fixed by one rotation, `LR` and `RL` by two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// Node was within balance, nothing rotated.
    #[default]
    None,
    /// Left-left: single right rotation.
    LL,
    /// Left-right: left rotation of the left child, then right rotation.
    LR,
    /// Right-right: single left rotation.
    RR,
    /// Right-left: right rotation of the right child, then left rotation.
    RL,
}

impl Rotation {
    /// Returns true for the two cases that need a rotation of the child first.
    pub fn is_double(self) -> bool {
        matches!(self, Rotation::LR | Rotation::RL)
    }

    /// Returns true if any rotation was applied.
    pub fn is_rotation(self) -> bool {
        self != Rotation::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rotation::None => "None",
            Rotation::LL => "LL",
            Rotation::LR => "LR",
            Rotation::RR => "RR",
            Rotation::RL => "RL",
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown rotation tag.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown rotation tag '{0}'")]
pub struct ParseRotationError(String);

impl FromStr for Rotation {
    type Err = ParseRotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(Rotation::None),
            "LL" => Ok(Rotation::LL),
            "LR" => Ok(Rotation::LR),
            "RR" => Ok(Rotation::RR),
            "RL" => Ok(Rotation::RL),
            other => Err(ParseRotationError(other.to_owned())),
        }
    }
}
