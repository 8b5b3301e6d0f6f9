//! Playback controller for real-time runs.
//!
//! Sorts, heap operations and MST construction run on a dedicated worker
//! thread so a long animation never blocks input handling. The worker's
//! sink follows a strict emit-then-sleep protocol: each step (an owned
//! snapshot) is sent over an unbounded channel, the worker sleeps the
//! pacing delay, and only then does the engine mutate toward the next
//! step. The channel preserves exactly the order the algorithm produced.
//!
//! Matrix multiplication does not come through here; its steps are
//! produced eagerly and navigated by index (see
//! [`StepHistory`](crate::engine::matrix::StepHistory)).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::engine::constants::{DELAY_NUMERATOR_MS, MAX_SPEED, MIN_SPEED};
use crate::engine::errors::EngineError;
use crate::engine::heap::HeapEngine;
use crate::engine::mst::{find_mst, MstAlgorithm};
use crate::engine::sorting::{run_sort, SortAlgorithm};
use crate::graph::Graph;
use crate::step::{Outcome, Step, StepSink};

/// Pacing delay for a speed setting, linear in its inverse. The speed is
/// clamped to the recognized range first.
pub fn delay_for_speed(speed: u32) -> u64 {
    DELAY_NUMERATOR_MS / u64::from(speed.clamp(MIN_SPEED, MAX_SPEED))
}

/// One algorithm run on owned input. The worker takes ownership so the
/// engine is the array/graph's single writer for the whole run.
#[derive(Debug, Clone)]
pub enum RunRequest {
    Sort {
        algorithm: SortAlgorithm,
        values: Vec<i32>,
    },
    BuildMaxHeap {
        values: Vec<i32>,
    },
    HeapSort {
        values: Vec<i32>,
    },
    FindMst {
        graph: Graph,
        algorithm: MstAlgorithm,
    },
}

/// Final state handed back once the worker stops, whether it completed or
/// was cancelled at a step boundary.
#[derive(Debug, Clone)]
pub enum RunResult {
    Sorted {
        values: Vec<i32>,
        outcome: Outcome,
    },
    Heap {
        heap: Vec<i32>,
        comparisons: u64,
        swaps: u64,
        outcome: Outcome,
    },
    Mst {
        graph: Graph,
        total_weight: u32,
        outcome: Outcome,
    },
}

impl RunResult {
    pub fn outcome(&self) -> Outcome {
        match self {
            RunResult::Sorted { outcome, .. }
            | RunResult::Heap { outcome, .. }
            | RunResult::Mst { outcome, .. } => *outcome,
        }
    }
}

/// Sink the worker drives: send the owned snapshot, then sleep. The delay
/// cell is shared with the controller so speed changes apply mid-run.
struct PacedSink {
    tx: Sender<Step>,
    stop: Arc<AtomicBool>,
    delay_ms: Arc<AtomicU64>,
}

impl StepSink for PacedSink {
    fn emit(&mut self, step: Step) -> bool {
        // Send before checking the stop flag: the step describes a mutation
        // the engine already applied, so it must reach the consumer or the
        // shared state would end up one event ahead of the delivered trace.
        if self.tx.send(step).is_err() {
            // Consumer hung up; treat it as cancellation.
            return false;
        }
        if self.stop.load(Ordering::Relaxed) {
            return false;
        }
        let delay = self.delay_ms.load(Ordering::Relaxed);
        if delay > 0 {
            thread::sleep(Duration::from_millis(delay));
        }
        true
    }
}

/// Owns the worker thread and the step channel for one run at a time.
pub struct Player {
    delay_ms: Arc<AtomicU64>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<RunResult>>,
    steps: Option<Receiver<Step>>,
}

impl Player {
    pub fn new(speed: u32) -> Self {
        Player {
            delay_ms: Arc::new(AtomicU64::new(delay_for_speed(speed))),
            stop: Arc::new(AtomicBool::new(false)),
            worker: None,
            steps: None,
        }
    }

    /// Adjust pacing; takes effect at the worker's next pacing point.
    pub fn set_speed(&self, speed: u32) {
        self.delay_ms
            .store(delay_for_speed(speed), Ordering::Relaxed);
    }

    /// Whether a worker is still producing steps. Steps already buffered in
    /// the channel may remain after this turns false.
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start a run on a fresh worker thread. Rejected while another run is
    /// active; call [`Player::cancel`] or drain [`Player::finish`] first.
    pub fn start(&mut self, request: RunRequest) -> Result<(), EngineError> {
        if self.is_running() {
            return Err(EngineError::RunInProgress);
        }
        // Reap a finished-but-uncollected worker.
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }

        self.stop.store(false, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel();
        let mut sink = PacedSink {
            tx,
            stop: Arc::clone(&self.stop),
            delay_ms: Arc::clone(&self.delay_ms),
        };

        self.steps = Some(rx);
        self.worker = Some(thread::spawn(move || run_request(request, &mut sink)));
        Ok(())
    }

    /// Next pending step, if any. Non-blocking; the renderer polls this
    /// from its event loop.
    pub fn try_step(&mut self) -> Option<Step> {
        self.steps.as_ref().and_then(|rx| rx.try_recv().ok())
    }

    /// Collect the final state once the worker has stopped. Returns `None`
    /// while it is still running.
    pub fn finish(&mut self) -> Option<RunResult> {
        if self.is_running() {
            return None;
        }
        let handle = self.worker.take()?;
        handle.join().ok()
    }

    /// Request cancellation and wait for the worker to observably stop.
    /// The engine unwinds at its next step boundary, so the returned state
    /// matches the last step it actually emitted.
    pub fn cancel(&mut self) -> Option<RunResult> {
        self.stop.store(true, Ordering::Relaxed);
        let handle = self.worker.take()?;
        handle.join().ok()
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        let _ = self.cancel();
    }
}

fn run_request(request: RunRequest, sink: &mut PacedSink) -> RunResult {
    match request {
        RunRequest::Sort {
            algorithm,
            mut values,
        } => {
            let outcome = run_sort(algorithm, &mut values, sink);
            RunResult::Sorted { values, outcome }
        }
        RunRequest::BuildMaxHeap { values } => {
            let mut engine = HeapEngine::new(&values);
            let outcome = engine.build_max_heap(sink);
            RunResult::Heap {
                comparisons: engine.comparisons(),
                swaps: engine.swaps(),
                heap: engine.heap().to_vec(),
                outcome,
            }
        }
        RunRequest::HeapSort { values } => {
            let mut engine = HeapEngine::new(&values);
            let outcome = engine.heap_sort(sink);
            RunResult::Heap {
                comparisons: engine.comparisons(),
                swaps: engine.swaps(),
                heap: engine.heap().to_vec(),
                outcome,
            }
        }
        RunRequest::FindMst {
            mut graph,
            algorithm,
        } => {
            let (total_weight, outcome) = find_mst(&mut graph, algorithm, sink);
            RunResult::Mst {
                graph,
                total_weight,
                outcome,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_inverse_in_speed_and_clamped() {
        assert_eq!(delay_for_speed(1), DELAY_NUMERATOR_MS);
        assert_eq!(delay_for_speed(0), DELAY_NUMERATOR_MS);
        assert!(delay_for_speed(200) < delay_for_speed(50));
        assert_eq!(delay_for_speed(u32::MAX), delay_for_speed(MAX_SPEED));
    }
}
