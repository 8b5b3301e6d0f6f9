//! Dense matrix multiplication with a navigable step history.
//!
//! Unlike the paced engines, multiplication records every step eagerly and
//! retains a full copy of the in-progress result per step. The history is
//! O(m * n * p) in space; that trade is deliberate and acceptable because
//! inputs stay human-observable (at most [`MAX_MATRIX_DIM`] per side in the
//! driver). Navigation is a pure cursor over the retained entries; stepping
//! never recomputes anything.
//!
//! [`MAX_MATRIX_DIM`]: crate::engine::constants::MAX_MATRIX_DIM

use rand::Rng;

use crate::engine::errors::EngineError;
use crate::step::{Step, StepKind};

/// A dense row-major integer matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<i64>,
}

impl Matrix {
    /// All-zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Identity matrix of order `n`.
    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1);
        }
        m
    }

    /// Build from nested rows. Every row must have the same length; a
    /// ragged input is a caller bug reported as `None`.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Option<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != col_count) {
            return None;
        }
        Some(Matrix {
            rows: row_count,
            cols: col_count,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Random matrix with entries in `1..=10`, matching the generated
    /// inputs the animation uses.
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let cells = (0..rows * cols).map(|_| rng.gen_range(1..=10)).collect();
        Matrix { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        self.cells[row * self.cols + col] = value;
    }
}

/// One retained history entry: the event plus the result-so-far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixStep {
    pub step: Step,
    /// Full copy of the in-progress result as of this step, with the
    /// running partial sum already written into its target cell.
    pub result: Matrix,
}

/// Ordered, append-only step record supporting bidirectional navigation.
#[derive(Debug, Clone)]
pub struct StepHistory {
    steps: Vec<MatrixStep>,
    cursor: usize,
}

impl StepHistory {
    fn new(steps: Vec<MatrixStep>) -> Self {
        StepHistory { steps, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pure lookup by index; no recomputation.
    pub fn step_at(&self, index: usize) -> Option<&MatrixStep> {
        self.steps.get(index)
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Option<&MatrixStep> {
        self.steps.get(self.cursor)
    }

    /// Advance the cursor. A no-op past the last index.
    pub fn step_forward(&mut self) -> Option<&MatrixStep> {
        if self.cursor + 1 < self.steps.len() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Retreat the cursor. A no-op at index 0.
    pub fn step_backward(&mut self) -> Option<&MatrixStep> {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.current()
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

/// A completed multiplication: the product and its retained history.
#[derive(Debug, Clone)]
pub struct MatrixRun {
    pub result: Matrix,
    pub history: StepHistory,
}

/// Multiply `a * b` with the standard triple loop, recording one step per
/// multiply-accumulate. Fails with [`EngineError::DimensionMismatch`]
/// before producing any step when `a.cols != b.rows`.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<MatrixRun, EngineError> {
    if a.cols != b.rows {
        return Err(EngineError::DimensionMismatch {
            left_cols: a.cols,
            right_rows: b.rows,
        });
    }

    let m = a.rows;
    let n = a.cols;
    let p = b.cols;

    let mut result = Matrix::zeros(m, p);
    let mut steps = Vec::with_capacity(m * n * p);

    for i in 0..m {
        for j in 0..p {
            let mut cell_sum = 0i64;
            for k in 0..n {
                let a_value = a.get(i, k);
                let b_value = b.get(k, j);
                cell_sum += a_value * b_value;

                let mut snapshot = result.clone();
                snapshot.set(i, j, cell_sum);
                steps.push(MatrixStep {
                    step: Step::bare(StepKind::CellAccumulate {
                        row: i,
                        col: j,
                        term: k,
                        a_value,
                        b_value,
                        partial_sum: cell_sum,
                    }),
                    result: snapshot,
                });
            }
            result.set(i, j, cell_sum);
        }
    }

    Ok(MatrixRun {
        result,
        history: StepHistory::new(steps),
    })
}
