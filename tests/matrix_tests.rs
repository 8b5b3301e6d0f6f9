// Integration tests for matrix multiplication and history navigation

use rand::rngs::StdRng;
use rand::SeedableRng;

use algotty::engine::errors::EngineError;
use algotty::engine::matrix::{multiply, Matrix};
use algotty::step::StepKind;

fn m(rows: Vec<Vec<i64>>) -> Matrix {
    Matrix::from_rows(rows).expect("well-formed fixture")
}

#[test]
fn two_by_two_fixture() {
    let a = m(vec![vec![1, 2], vec![3, 4]]);
    let b = m(vec![vec![5, 6], vec![7, 8]]);

    let run = multiply(&a, &b).expect("compatible shapes");
    assert_eq!(run.result, m(vec![vec![19, 22], vec![43, 50]]));
}

#[test]
fn identity_is_neutral() {
    let mut rng = StdRng::seed_from_u64(4);
    let a = Matrix::random(4, 4, &mut rng);
    let id = Matrix::identity(4);

    assert_eq!(multiply(&a, &id).expect("compatible").result, a);
    assert_eq!(multiply(&id, &a).expect("compatible").result, a);
}

#[test]
fn rectangular_shapes_multiply() {
    let a = m(vec![vec![1, 0, 2], vec![-1, 3, 1]]);
    let b = m(vec![vec![3, 1], vec![2, 1], vec![1, 0]]);

    let run = multiply(&a, &b).expect("compatible shapes");
    assert_eq!(run.result, m(vec![vec![5, 1], vec![4, 2]]));
    // One step per multiply-accumulate: 2 * 3 * 2.
    assert_eq!(run.history.len(), 12);
}

#[test]
fn dimension_mismatch_is_rejected_up_front() {
    let a = Matrix::zeros(2, 3);
    let b = Matrix::zeros(2, 2);

    assert_eq!(
        multiply(&a, &b).err(),
        Some(EngineError::DimensionMismatch {
            left_cols: 3,
            right_rows: 2,
        })
    );
}

#[test]
fn partial_sums_accumulate_in_order() {
    let a = m(vec![vec![1, 2], vec![3, 4]]);
    let b = m(vec![vec![5, 6], vec![7, 8]]);
    let run = multiply(&a, &b).expect("compatible shapes");

    let mut running: Option<(usize, usize, i64)> = None;
    for index in 0..run.history.len() {
        let entry = run.history.step_at(index).expect("index in range");
        let StepKind::CellAccumulate {
            row,
            col,
            term,
            a_value,
            b_value,
            partial_sum,
        } = entry.step.kind
        else {
            panic!("unexpected step kind");
        };

        assert_eq!(a_value, a.get(row, term));
        assert_eq!(b_value, b.get(term, col));
        let base = match running {
            Some((r, c, sum)) if (r, c) == (row, col) => sum,
            _ => 0,
        };
        assert_eq!(partial_sum, base + a_value * b_value);
        // The retained snapshot already shows the running sum.
        assert_eq!(entry.result.get(row, col), partial_sum);
        running = Some((row, col, partial_sum));
    }

    // The final snapshot is the finished product.
    let last = run.history.step_at(run.history.len() - 1).expect("nonempty");
    assert_eq!(last.result, run.result);
}

#[test]
fn navigation_round_trip_returns_to_the_start() {
    let a = m(vec![vec![1, 2], vec![3, 4]]);
    let run = multiply(&a, &a).expect("compatible shapes");
    let mut history = run.history;

    let first = history.current().cloned();
    let steps = history.len();

    for _ in 0..steps - 1 {
        history.step_forward();
    }
    assert_eq!(history.cursor(), steps - 1);
    for _ in 0..steps - 1 {
        history.step_backward();
    }
    assert_eq!(history.cursor(), 0);
    assert_eq!(history.current().cloned(), first);
}

#[test]
fn cursor_clamps_at_both_ends() {
    let a = Matrix::identity(3);
    let run = multiply(&a, &a).expect("compatible shapes");
    let mut history = run.history;

    history.step_backward();
    assert_eq!(history.cursor(), 0);

    for _ in 0..history.len() * 2 {
        history.step_forward();
    }
    assert_eq!(history.cursor(), history.len() - 1);

    history.rewind();
    assert_eq!(history.cursor(), 0);
}

#[test]
fn navigation_never_recomputes() {
    let a = m(vec![vec![2, 0], vec![0, 2]]);
    let run = multiply(&a, &a).expect("compatible shapes");
    let mut history = run.history.clone();

    // Walk the cursor around, then compare every entry against the
    // untouched history.
    for _ in 0..history.len() {
        history.step_forward();
    }
    history.rewind();
    for index in 0..history.len() {
        assert_eq!(history.step_at(index), run.history.step_at(index));
    }
}
