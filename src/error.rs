//! Failure kinds shared by every container in the crate.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Lookup or removal of a key the dictionary does not hold.
    #[error("no such key in dictionary")]
    KeyNotFound,
    /// Removal of an element the set does not hold.
    #[error("no such element in set")]
    ElementNotFound,
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("container is empty")]
    EmptyContainer,
    #[error("invalid dictionary configuration: {0}")]
    InvalidConfig(&'static str),
}
