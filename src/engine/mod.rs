//! Algorithm execution engines
//!
//! Each engine runs its algorithm to completion exactly as it would
//! unanimated, reporting every observable state transition as a
//! [`Step`](crate::step::Step) in strict execution order:
//! - [`sorting`]: the five comparison sorts over a mutable array
//! - [`heap`]: max-heap construction and heap sort with dual array/tree state
//! - [`matrix`]: triple-loop multiplication with a retained, seekable history
//! - [`mst`]: Prim's and Kruskal's spanning-tree construction
//! - [`errors`]: structural error types, surfaced before any step
//! - [`constants`]: numeric ranges the drivers clamp input against

pub mod constants;
pub mod errors;
pub mod heap;
pub mod matrix;
pub mod mst;
pub mod sorting;
