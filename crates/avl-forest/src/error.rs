use thiserror::Error;

/// Errors reported by strict lookups and by tree validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("key not found")]
    KeyNotFound,
    #[error("root node {node} has a parent")]
    RootHasParent { node: u32 },
    #[error("child of node {node} does not point back to it")]
    BrokenParentLink { node: u32 },
    #[error("balance factor mismatch at node {node}: expected {expected}, got {actual}")]
    BalanceMismatch { node: u32, expected: i64, actual: i8 },
    #[error("node {node} is out of balance ({balance})")]
    Unbalanced { node: u32, balance: i64 },
    #[error("in-order keys are not strictly increasing at node {node}")]
    OrderViolated { node: u32 },
    #[error("tree holds {actual} nodes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}
