//! # Introduction
//!
//! Algotty runs classic algorithms (comparison sorts, heap construction and
//! heap sort, matrix multiplication, minimum spanning trees) and records
//! every observable state transition as an immutable step. The step stream
//! is then animated in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Input → Engine → Steps → Playback → TUI
//! ```
//!
//! 1. [`engine`] — the algorithm engines; each runs to completion and emits
//!    [`step::Step`]s in strict execution order.
//! 2. [`step`] — the step model: immutable event records with owned array
//!    snapshots, plus the [`step::StepSink`] consumer trait.
//! 3. [`graph`] — the persistent weighted graph the MST engines mark up.
//! 4. [`playback`] — worker-thread pacing: real-time step delivery with
//!    speed control and cancellation at step boundaries.
//! 5. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! Matrix multiplication is the exception to the real-time pipeline: its
//! steps are recorded eagerly into a
//! [`StepHistory`](engine::matrix::StepHistory) and navigated by index,
//! forward and backward, without recomputation.

pub mod engine;
pub mod graph;
pub mod playback;
pub mod step;
pub mod ui;
