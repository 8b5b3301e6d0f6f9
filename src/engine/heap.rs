//! Max-heap construction and heap sort.
//!
//! The engine owns a binary-heap-ordered copy of the input array, 0-indexed
//! with children at `2i+1` and `2i+2`. `build_max_heap` sifts down every
//! non-leaf from the middle outward; `heap_sort` then repeatedly swaps the
//! root to the shrinking tail. Each sift-down visit emits a step before the
//! comparison decision and another after any swap, so the renderer can show
//! both the array bars and the tree in lockstep.

use crate::step::{Outcome, Step, StepKind, StepSink};

/// Check the max-heap property: every parent is >= both its children.
pub fn check_max_heap(heap: &[i32]) -> bool {
    let n = heap.len();
    for i in 0..n {
        let left = 2 * i + 1;
        let right = 2 * i + 2;
        if left < n && heap[i] < heap[left] {
            return false;
        }
        if right < n && heap[i] < heap[right] {
            return false;
        }
    }
    true
}

/// Heap construction and extraction over one array.
#[derive(Debug, Clone)]
pub struct HeapEngine {
    heap: Vec<i32>,
    heapified: bool,
    comparisons: u64,
    swaps: u64,
}

impl HeapEngine {
    pub fn new(values: &[i32]) -> Self {
        HeapEngine {
            heap: values.to_vec(),
            heapified: false,
            comparisons: 0,
            swaps: 0,
        }
    }

    pub fn heap(&self) -> &[i32] {
        &self.heap
    }

    pub fn is_heapified(&self) -> bool {
        self.heapified
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    /// Restore the max-heap property over the whole array. Arrays shorter
    /// than 3 elements heapify trivially (a single sift or none at all).
    pub fn build_max_heap(&mut self, sink: &mut dyn StepSink) -> Outcome {
        let n = self.heap.len();
        if n > 1 {
            for i in (0..n / 2).rev() {
                if !self.sift_down(n, i, sink) {
                    return Outcome::Cancelled;
                }
            }
        }
        self.heapified = true;
        Outcome::Completed
    }

    /// Sort ascending by repeated root extraction. Builds the heap first
    /// when it has not been built yet.
    pub fn heap_sort(&mut self, sink: &mut dyn StepSink) -> Outcome {
        if !self.heapified && self.build_max_heap(sink).is_cancelled() {
            return Outcome::Cancelled;
        }

        let n = self.heap.len();
        for i in (1..n).rev() {
            self.heap.swap(0, i);
            self.swaps += 1;
            if !sink.emit(Step::new(StepKind::Swap { lhs: 0, rhs: i }, &self.heap)) {
                return Outcome::Cancelled;
            }
            if !sink.emit(Step::new(StepKind::MarkSorted { index: i }, &self.heap)) {
                return Outcome::Cancelled;
            }
            // Restore the heap over the unsorted prefix [0, i).
            if !self.sift_down(i, 0, sink) {
                return Outcome::Cancelled;
            }
        }

        if n > 0 && !sink.emit(Step::new(StepKind::MarkSorted { index: 0 }, &self.heap)) {
            return Outcome::Cancelled;
        }
        Outcome::Completed
    }

    /// Recursive sift-down of node `i` within the range `[0, n)`. Returns
    /// false if the sink cancelled the run. Terminates when the node has no
    /// children in range or no swap is needed.
    fn sift_down(&mut self, n: usize, i: usize, sink: &mut dyn StepSink) -> bool {
        let left = 2 * i + 1;
        let right = 2 * i + 2;

        if !sink.emit(Step::new(StepKind::HeapifyVisit { index: i }, &self.heap)) {
            return false;
        }

        if left >= n {
            return true;
        }

        // The larger child is the only swap candidate.
        let child = if right < n && self.heap[right] > self.heap[left] {
            right
        } else {
            left
        };
        self.comparisons += 1;

        if !sink.emit(Step::new(StepKind::Compare { lhs: i, rhs: child }, &self.heap)) {
            return false;
        }

        if self.heap[child] > self.heap[i] {
            self.heap.swap(i, child);
            self.swaps += 1;
            if !sink.emit(Step::new(StepKind::Swap { lhs: i, rhs: child }, &self.heap)) {
                return false;
            }
            return self.sift_down(n, child, sink);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::NullSink;

    #[test]
    fn sift_down_stops_without_children() {
        let mut engine = HeapEngine::new(&[5]);
        assert!(engine.sift_down(1, 0, &mut NullSink));
        assert_eq!(engine.heap(), &[5]);
    }

    #[test]
    fn tiny_arrays_heapify_trivially() {
        for input in [&[][..], &[7][..], &[1, 2][..]] {
            let mut engine = HeapEngine::new(input);
            assert_eq!(engine.build_max_heap(&mut NullSink), Outcome::Completed);
            assert!(check_max_heap(engine.heap()));
        }
    }
}
