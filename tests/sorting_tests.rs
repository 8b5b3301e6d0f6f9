// Integration tests for the sort engines

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use algotty::engine::sorting::{run_sort, SortAlgorithm};
use algotty::step::{Outcome, RecordingSink, Step, StepKind, StepSink};

fn random_array(seed: u64, len: usize) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(10..=350)).collect()
}

#[test]
fn every_algorithm_sorts_random_input() {
    for algorithm in SortAlgorithm::ALL {
        for seed in 0..5u64 {
            let mut values = random_array(seed, 30);
            let mut expected = values.clone();
            expected.sort();

            let outcome = run_sort(algorithm, &mut values, &mut RecordingSink::new());
            assert_eq!(outcome, Outcome::Completed);
            assert_eq!(values, expected, "{} failed on seed {}", algorithm, seed);
        }
    }
}

#[test]
fn sorted_and_reversed_inputs_are_ordinary() {
    let ascending: Vec<i32> = (1..=20).collect();
    let descending: Vec<i32> = (1..=20).rev().collect();

    for algorithm in SortAlgorithm::ALL {
        for input in [&ascending, &descending] {
            let mut values = input.clone();
            let outcome = run_sort(algorithm, &mut values, &mut RecordingSink::new());
            assert_eq!(outcome, Outcome::Completed);
            assert_eq!(values, ascending);
        }
    }
}

#[test]
fn duplicates_survive_sorting() {
    for algorithm in SortAlgorithm::ALL {
        let mut values = vec![5, 1, 5, 5, 2, 1, 3, 5, 2];
        run_sort(algorithm, &mut values, &mut RecordingSink::new());
        assert_eq!(values, vec![1, 1, 2, 2, 3, 5, 5, 5, 5]);
    }
}

#[test]
fn traces_are_deterministic() {
    for algorithm in SortAlgorithm::ALL {
        let input = random_array(42, 25);

        let mut first = input.clone();
        let mut first_sink = RecordingSink::new();
        run_sort(algorithm, &mut first, &mut first_sink);

        let mut second = input.clone();
        let mut second_sink = RecordingSink::new();
        run_sort(algorithm, &mut second, &mut second_sink);

        assert_eq!(first_sink.steps(), second_sink.steps());
    }
}

#[test]
fn every_step_carries_a_snapshot() {
    for algorithm in SortAlgorithm::ALL {
        let mut values = random_array(7, 15);
        let len = values.len();
        let mut sink = RecordingSink::new();
        run_sort(algorithm, &mut values, &mut sink);

        assert!(!sink.is_empty());
        for step in sink.steps() {
            assert_eq!(step.values.len(), len);
        }
        // The last snapshot is the final array.
        assert_eq!(sink.steps().last().map(|s| &s.values), Some(&values));
    }
}

#[test]
fn selection_sort_emits_self_swaps() {
    // On sorted input every selected minimum is already in place, so the
    // trace must contain swap events with equal endpoints.
    let mut values: Vec<i32> = (1..=10).collect();
    let mut sink = RecordingSink::new();
    run_sort(SortAlgorithm::Selection, &mut values, &mut sink);

    let self_swaps = sink
        .steps()
        .iter()
        .filter(|s| matches!(s.kind, StepKind::Swap { lhs, rhs } if lhs == rhs))
        .count();
    assert_eq!(self_swaps, 10);
}

#[test]
fn quicksort_emits_one_step_per_partition() {
    let mut values = random_array(3, 20);
    let mut sink = RecordingSink::new();
    run_sort(SortAlgorithm::Quick, &mut values, &mut sink);

    for step in sink.steps() {
        let StepKind::PartitionDone { pivot, low, high } = step.kind else {
            panic!("unexpected step kind {:?}", step.kind);
        };
        assert!(low <= pivot && pivot <= high);
        // The pivot is settled: everything left is <=, everything right is >.
        let p = step.values[pivot];
        assert!(step.values[low..pivot].iter().all(|&v| v <= p));
        assert!(step.values[pivot + 1..=high].iter().all(|&v| v > p));
    }
}

#[test]
fn merge_sort_emits_only_writes() {
    let mut values = random_array(11, 16);
    let mut sink = RecordingSink::new();
    run_sort(SortAlgorithm::Merge, &mut values, &mut sink);

    assert!(sink
        .steps()
        .iter()
        .all(|s| matches!(s.kind, StepKind::Set { .. })));
}

/// Sink that consumes a fixed number of steps, requesting cancellation as
/// it takes the last one.
struct LimitedSink {
    accepted: Vec<Step>,
    budget: usize,
}

impl StepSink for LimitedSink {
    fn emit(&mut self, step: Step) -> bool {
        self.accepted.push(step);
        self.accepted.len() < self.budget
    }
}

#[test]
fn cancellation_stops_at_a_step_boundary() {
    for algorithm in SortAlgorithm::ALL {
        let input = random_array(9, 20);

        let mut full = input.clone();
        let mut full_sink = RecordingSink::new();
        run_sort(algorithm, &mut full, &mut full_sink);
        assert!(full_sink.len() > 6);

        let mut values = input.clone();
        let mut sink = LimitedSink {
            accepted: Vec::new(),
            budget: 5,
        };
        let outcome = run_sort(algorithm, &mut values, &mut sink);
        assert_eq!(outcome, Outcome::Cancelled);

        // The delivered steps are a prefix of the full trace, and the array
        // was left exactly as the last delivered step describes: no engine
        // mutation happens past the step the sink last consumed.
        assert_eq!(sink.accepted.as_slice(), &full_sink.steps()[..5]);
        assert_eq!(values, sink.accepted[4].values);
    }
}
