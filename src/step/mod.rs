//! Step model for animation playback.
//!
//! Every engine reports its progress as a sequence of [`Step`]s. A step is an
//! immutable record of one observable event together with a copy of the
//! working array at that moment, so a renderer on another thread never reads
//! state the algorithm is still mutating. Trace order is semantic: for a
//! fixed input and algorithm the sequence is identical across runs.

/// The kind of event a [`Step`] describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    /// Two positions were compared.
    Compare { lhs: usize, rhs: usize },

    /// Two positions exchanged values. `lhs` may equal `rhs`: a no-op
    /// self-swap is still emitted so the animation cursor stays visible.
    Swap { lhs: usize, rhs: usize },

    /// A single position was overwritten with `value`.
    Set { index: usize, value: i32 },

    /// Sift-down entered the subtree rooted at `index`.
    HeapifyVisit { index: usize },

    /// The value at `index` reached its final sorted position.
    MarkSorted { index: usize },

    /// A quicksort partition of `[low, high]` finished with the pivot
    /// settled at `pivot`.
    PartitionDone { pivot: usize, low: usize, high: usize },

    /// An edge joined the spanning tree.
    EdgeAccept { from: usize, to: usize, weight: u32 },

    /// One multiply-accumulate toward result cell `(row, col)`:
    /// `partial_sum += a_value * b_value` at inner index `term`.
    CellAccumulate {
        row: usize,
        col: usize,
        term: usize,
        a_value: i64,
        b_value: i64,
        partial_sum: i64,
    },
}

/// One observable algorithmic event, snapshotted for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,

    /// Copy of the working array as of this event. Empty for graph events
    /// (whose only mutation is an edge flag) and matrix events (whose
    /// result copy lives in the matrix step history).
    pub values: Vec<i32>,
}

impl Step {
    pub fn new(kind: StepKind, values: &[i32]) -> Self {
        Step {
            kind,
            values: values.to_vec(),
        }
    }

    /// A step with no array payload (graph and matrix events).
    pub fn bare(kind: StepKind) -> Self {
        Step {
            kind,
            values: Vec::new(),
        }
    }
}

/// How a run ended. Cancellation is a normal terminal state, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

impl Outcome {
    pub fn is_cancelled(self) -> bool {
        matches!(self, Outcome::Cancelled)
    }
}

/// Consumer of the step stream.
///
/// `emit` returns `false` to request cancellation; engines honour it at the
/// next step boundary, never mid-mutation, so the shared state always
/// matches the last step handed to the sink. A sink that wants to stop must
/// therefore consume that final step before returning `false`, or its view
/// of the state ends one event behind.
pub trait StepSink {
    fn emit(&mut self, step: Step) -> bool;
}

/// Sink that retains every step, for traces and tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    steps: Vec<Step>,
}

impl RecordingSink {
    pub fn new() -> Self {
        RecordingSink { steps: Vec::new() }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl StepSink for RecordingSink {
    fn emit(&mut self, step: Step) -> bool {
        self.steps.push(step);
        true
    }
}

/// Sink that discards steps, for runs where only the result matters.
#[derive(Debug, Default)]
pub struct NullSink;

impl StepSink for NullSink {
    fn emit(&mut self, _step: Step) -> bool {
        true
    }
}
