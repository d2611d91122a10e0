//! Parsing of comma separated key sequences fed to a tree by a driver.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while reading a key sequence.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// An entry could not be parsed as a key.
    #[error("invalid key '{token}' at entry {position}: {reason}")]
    InvalidKey {
        /// Entry text after trimming.
        token: String,
        /// Index of the entry among the comma separated entries.
        position: usize,
        /// Message of the key type's parse error.
        reason: String,
    },
}

/// Parses `input` as a comma separated list of keys.
///
/// Whitespace around entries is ignored and empty entries are skipped, so
/// `"10, 20,,30,"` yields three keys. The first malformed entry aborts parsing.
///
/// ```
/// use rotating_avl::parse_sequence;
/// assert_eq!(parse_sequence::<i32>(" 10, 20,,30,"), Ok(vec![10, 20, 30]));
/// assert!(parse_sequence::<i32>("10, x").is_err());
/// ```
pub fn parse_sequence<K>(input: &str) -> Result<Vec<K>, SequenceError>
where
    K: FromStr,
    K::Err: fmt::Display,
{
    input
        .split(',')
        .enumerate()
        .map(|(position, token)| (position, token.trim()))
        .filter(|(_, token)| !token.is_empty())
        .map(|(position, token)| {
            token.parse::<K>().map_err(|err| SequenceError::InvalidKey {
                token: token.to_owned(),
                position,
                reason: err.to_string(),
            })
        })
        .collect()
}
