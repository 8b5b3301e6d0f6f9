//! Structural error types for the engines.
//!
//! These are all fatal to the requested run and are surfaced to the caller
//! before any step is emitted, so a failed run never leaves partial state.
//! Range validation of UI-level options (array size, speed, node count) is
//! the caller's responsibility; the engines only check structural
//! preconditions like matrix dimension compatibility.

use std::fmt;

/// Errors surfaced by the engines before a run begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Matrix multiplication with incompatible shapes.
    DimensionMismatch {
        left_cols: usize,
        right_rows: usize,
    },

    /// A graph operation referenced a node id that does not exist.
    MissingNode { id: usize },

    /// An edge from a node to itself was requested.
    SelfLoopEdge { id: usize },

    /// An edge already exists between this unordered pair.
    DuplicateEdge { from: usize, to: usize },

    /// A new run was requested while another is still active.
    RunInProgress,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::DimensionMismatch {
                left_cols,
                right_rows,
            } => {
                write!(
                    f,
                    "Dimension mismatch: left matrix has {} columns but right matrix has {} rows",
                    left_cols, right_rows
                )
            }
            EngineError::MissingNode { id } => {
                write!(f, "Node {} does not exist in the graph", id)
            }
            EngineError::SelfLoopEdge { id } => {
                write!(f, "Cannot create an edge from node {} to itself", id)
            }
            EngineError::DuplicateEdge { from, to } => {
                write!(f, "An edge between nodes {} and {} already exists", from, to)
            }
            EngineError::RunInProgress => {
                write!(f, "A run is already active; cancel it before starting another")
            }
        }
    }
}

impl std::error::Error for EngineError {}
