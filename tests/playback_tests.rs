// Integration tests for the playback controller

use std::thread;
use std::time::{Duration, Instant};

use algotty::engine::errors::EngineError;
use algotty::engine::sorting::{run_sort, SortAlgorithm};
use algotty::playback::{delay_for_speed, Player, RunRequest, RunResult};
use algotty::step::{Outcome, RecordingSink, Step};

fn drain_until_finished(player: &mut Player) -> (Vec<Step>, RunResult) {
    let deadline = Instant::now() + Duration::from_secs(30);
    let mut steps = Vec::new();
    loop {
        while let Some(step) = player.try_step() {
            steps.push(step);
        }
        if let Some(result) = player.finish() {
            // Steps may still be buffered after the worker stops.
            while let Some(step) = player.try_step() {
                steps.push(step);
            }
            return (steps, result);
        }
        assert!(Instant::now() < deadline, "worker did not finish in time");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn delay_shrinks_as_speed_grows() {
    assert_eq!(delay_for_speed(1), 2000);
    assert_eq!(delay_for_speed(200), 10);
    // Out-of-range speeds are clamped, never zero-delay or divide-by-zero.
    assert_eq!(delay_for_speed(0), delay_for_speed(1));
    assert_eq!(delay_for_speed(u32::MAX), delay_for_speed(200));
}

#[test]
fn paced_run_delivers_the_exact_recorded_trace() {
    let input = vec![9, 2, 7, 4, 6, 1];

    let mut expected_values = input.clone();
    let mut expected = RecordingSink::new();
    run_sort(SortAlgorithm::Bubble, &mut expected_values, &mut expected);

    let mut player = Player::new(200);
    player
        .start(RunRequest::Sort {
            algorithm: SortAlgorithm::Bubble,
            values: input,
        })
        .expect("player is idle");

    let (steps, result) = drain_until_finished(&mut player);

    // The channel preserves emission order, so the live stream is exactly
    // the trace a recording sink captures.
    assert_eq!(steps, expected.into_steps());
    let RunResult::Sorted { values, outcome } = result else {
        panic!("unexpected result kind");
    };
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(values, expected_values);
}

#[test]
fn starting_twice_is_rejected() {
    let mut player = Player::new(1); // 2s per step keeps the worker busy
    player
        .start(RunRequest::Sort {
            algorithm: SortAlgorithm::Bubble,
            values: vec![3, 2, 1],
        })
        .expect("player is idle");

    let second = player.start(RunRequest::Sort {
        algorithm: SortAlgorithm::Bubble,
        values: vec![3, 2, 1],
    });
    assert_eq!(second.err(), Some(EngineError::RunInProgress));

    let result = player.cancel().expect("worker was running");
    assert_eq!(result.outcome(), Outcome::Cancelled);
}

#[test]
fn cancellation_leaves_state_at_a_step_boundary() {
    let input = vec![5, 4, 3, 2, 1, 9, 8, 7, 6, 0];

    let mut trace_values = input.clone();
    let mut trace = RecordingSink::new();
    run_sort(SortAlgorithm::Selection, &mut trace_values, &mut trace);
    let trace = trace.into_steps();

    let mut player = Player::new(10);
    player
        .start(RunRequest::Sort {
            algorithm: SortAlgorithm::Selection,
            values: input,
        })
        .expect("player is idle");

    // Let a few steps through before pulling the plug.
    let mut received = Vec::new();
    let deadline = Instant::now() + Duration::from_secs(30);
    while received.len() < 3 {
        if let Some(step) = player.try_step() {
            received.push(step);
        }
        assert!(Instant::now() < deadline, "no steps arrived");
        thread::sleep(Duration::from_millis(1));
    }

    let result = player.cancel().expect("worker was running");
    while let Some(step) = player.try_step() {
        received.push(step);
    }

    let RunResult::Sorted { values, outcome } = result else {
        panic!("unexpected result kind");
    };
    assert_eq!(outcome, Outcome::Cancelled);

    // Everything delivered is a prefix of the deterministic trace, and the
    // array was left exactly as the last delivered step describes: the sink
    // sends the step for an applied mutation before honouring the stop flag.
    assert!(received.len() < trace.len());
    assert_eq!(received.as_slice(), &trace[..received.len()]);
    assert_eq!(
        received.last().map(|s| s.values.clone()),
        Some(values.clone())
    );
}

#[test]
fn speed_changes_apply_mid_run() {
    let mut player = Player::new(1);
    player
        .start(RunRequest::Sort {
            algorithm: SortAlgorithm::Bubble,
            values: vec![4, 3, 2, 1],
        })
        .expect("player is idle");

    // Crank the speed so the run finishes promptly despite starting at the
    // slowest setting.
    player.set_speed(200);
    let (steps, result) = drain_until_finished(&mut player);
    assert!(!steps.is_empty());
    assert_eq!(result.outcome(), Outcome::Completed);
}

#[test]
fn player_is_reusable_after_a_run() {
    let mut player = Player::new(200);

    for _ in 0..2 {
        player
            .start(RunRequest::Sort {
                algorithm: SortAlgorithm::Insertion,
                values: vec![3, 1, 2],
            })
            .expect("player is idle between runs");
        let (_, result) = drain_until_finished(&mut player);
        assert_eq!(result.outcome(), Outcome::Completed);
    }
}

#[test]
fn heap_and_mst_requests_run_to_completion() {
    let mut player = Player::new(200);
    player
        .start(RunRequest::HeapSort {
            values: vec![5, 1, 4, 2, 3],
        })
        .expect("player is idle");
    let (_, result) = drain_until_finished(&mut player);
    let RunResult::Heap { heap, outcome, .. } = result else {
        panic!("unexpected result kind");
    };
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(heap, vec![1, 2, 3, 4, 5]);
}
