//! Comparison sort engines.
//!
//! Five classic sorts over a mutable `Vec<i32>`, each emitting one step per
//! observable event at the granularity a human watcher can follow: bubble
//! and selection report every comparison and exchange, insertion reports
//! each shift, quicksort reports one step per completed partition, and
//! merge sort reports each element written into the merged destination.
//!
//! The array is sorted in place; after a completed run it is fully
//! ascending. Cancellation unwinds at the next step boundary and leaves the
//! array exactly as the last emitted step describes.

use std::fmt;
use std::str::FromStr;

use crate::step::{Outcome, Step, StepKind, StepSink};

/// Closed enumeration of the supported sort algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Quick,
    Merge,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Quick,
        SortAlgorithm::Merge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Quick => "Quick Sort",
            SortAlgorithm::Merge => "Merge Sort",
        }
    }

    /// Asymptotic comparison cost, for the status display.
    pub fn complexity(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble | SortAlgorithm::Selection | SortAlgorithm::Insertion => "O(n²)",
            SortAlgorithm::Quick | SortAlgorithm::Merge => "O(n log n)",
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bubble" => Ok(SortAlgorithm::Bubble),
            "selection" => Ok(SortAlgorithm::Selection),
            "insertion" => Ok(SortAlgorithm::Insertion),
            "quick" => Ok(SortAlgorithm::Quick),
            "merge" => Ok(SortAlgorithm::Merge),
            other => Err(format!(
                "Unknown sort algorithm '{}' (expected bubble, selection, insertion, quick or merge)",
                other
            )),
        }
    }
}

/// Sort `values` in place with the chosen algorithm, reporting each
/// observable event to `sink`. Already-sorted and reverse-sorted input is
/// ordinary input; empty and single-element arrays complete with no steps.
pub fn run_sort(
    algorithm: SortAlgorithm,
    values: &mut Vec<i32>,
    sink: &mut dyn StepSink,
) -> Outcome {
    if values.len() < 2 {
        return Outcome::Completed;
    }

    let finished = match algorithm {
        SortAlgorithm::Bubble => bubble_sort(values, sink),
        SortAlgorithm::Selection => selection_sort(values, sink),
        SortAlgorithm::Insertion => insertion_sort(values, sink),
        SortAlgorithm::Quick => {
            let high = values.len() - 1;
            quick_sort(values, 0, high, sink)
        }
        SortAlgorithm::Merge => {
            let high = values.len() - 1;
            merge_sort(values, 0, high, sink)
        }
    };

    if finished {
        Outcome::Completed
    } else {
        Outcome::Cancelled
    }
}

// Each sort returns false as soon as the sink refuses a step, so the
// recursive variants can unwind without touching the array again.

fn bubble_sort(values: &mut [i32], sink: &mut dyn StepSink) -> bool {
    let n = values.len();
    for i in 0..n {
        for j in 0..n - i - 1 {
            if !sink.emit(Step::new(StepKind::Compare { lhs: j, rhs: j + 1 }, values)) {
                return false;
            }
            if values[j] > values[j + 1] {
                values.swap(j, j + 1);
                if !sink.emit(Step::new(StepKind::Swap { lhs: j, rhs: j + 1 }, values)) {
                    return false;
                }
            }
        }
    }
    true
}

fn selection_sort(values: &mut [i32], sink: &mut dyn StepSink) -> bool {
    let n = values.len();
    for i in 0..n {
        let mut min_idx = i;
        for j in i + 1..n {
            if !sink.emit(Step::new(StepKind::Compare { lhs: j, rhs: min_idx }, values)) {
                return false;
            }
            if values[j] < values[min_idx] {
                min_idx = j;
            }
        }
        // A self-swap (min_idx == i) is still emitted: the trace keeps the
        // cursor on the settled position for one frame.
        values.swap(i, min_idx);
        if !sink.emit(Step::new(StepKind::Swap { lhs: i, rhs: min_idx }, values)) {
            return false;
        }
    }
    true
}

fn insertion_sort(values: &mut [i32], sink: &mut dyn StepSink) -> bool {
    let n = values.len();
    for i in 1..n {
        let key = values[i];
        let mut j = i;
        while j > 0 && key < values[j - 1] {
            values[j] = values[j - 1];
            if !sink.emit(Step::new(
                StepKind::Set {
                    index: j,
                    value: values[j],
                },
                values,
            )) {
                return false;
            }
            j -= 1;
        }
        values[j] = key;
        if !sink.emit(Step::new(StepKind::Set { index: j, value: key }, values)) {
            return false;
        }
    }
    true
}

fn quick_sort(values: &mut [i32], low: usize, high: usize, sink: &mut dyn StepSink) -> bool {
    if low >= high {
        return true;
    }

    let Some(pivot) = partition(values, low, high, sink) else {
        return false;
    };

    // Recursion shape is preserved; only step emission is threaded through.
    if pivot > low && !quick_sort(values, low, pivot - 1, sink) {
        return false;
    }
    if pivot < high && !quick_sort(values, pivot + 1, high, sink) {
        return false;
    }
    true
}

/// Lomuto partition with the last element as pivot. Emits a single step on
/// completion rather than one per inner comparison; the coarse granularity
/// matches what the animation highlights.
fn partition(
    values: &mut [i32],
    low: usize,
    high: usize,
    sink: &mut dyn StepSink,
) -> Option<usize> {
    let pivot = values[high];
    let mut i = low;

    for j in low..high {
        if values[j] <= pivot {
            values.swap(i, j);
            i += 1;
        }
    }
    values.swap(i, high);

    if !sink.emit(Step::new(
        StepKind::PartitionDone { pivot: i, low, high },
        values,
    )) {
        return None;
    }
    Some(i)
}

fn merge_sort(values: &mut [i32], low: usize, high: usize, sink: &mut dyn StepSink) -> bool {
    if low >= high {
        return true;
    }
    let mid = (low + high) / 2;
    if !merge_sort(values, low, mid, sink) {
        return false;
    }
    if !merge_sort(values, mid + 1, high, sink) {
        return false;
    }
    merge(values, low, mid, high, sink)
}

fn merge(
    values: &mut [i32],
    low: usize,
    mid: usize,
    high: usize,
    sink: &mut dyn StepSink,
) -> bool {
    let left: Vec<i32> = values[low..=mid].to_vec();
    let right: Vec<i32> = values[mid + 1..=high].to_vec();

    let mut i = 0;
    let mut j = 0;
    let mut k = low;

    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            values[k] = left[i];
            i += 1;
        } else {
            values[k] = right[j];
            j += 1;
        }
        if !sink.emit(Step::new(
            StepKind::Set {
                index: k,
                value: values[k],
            },
            values,
        )) {
            return false;
        }
        k += 1;
    }

    while i < left.len() {
        values[k] = left[i];
        if !sink.emit(Step::new(
            StepKind::Set {
                index: k,
                value: values[k],
            },
            values,
        )) {
            return false;
        }
        i += 1;
        k += 1;
    }

    while j < right.len() {
        values[k] = right[j];
        if !sink.emit(Step::new(
            StepKind::Set {
                index: k,
                value: values[k],
            },
            values,
        )) {
            return false;
        }
        j += 1;
        k += 1;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::RecordingSink;

    #[test]
    fn quicksort_partition_settles_pivot() {
        let mut values = vec![3, 7, 1, 9, 5];
        let mut sink = RecordingSink::new();
        let pivot = partition(&mut values, 0, 4, &mut sink).unwrap();
        assert_eq!(values[pivot], 5);
        assert!(values[..pivot].iter().all(|&v| v <= 5));
        assert!(values[pivot + 1..].iter().all(|&v| v > 5));
    }

    #[test]
    fn empty_and_singleton_produce_no_steps() {
        for input in [vec![], vec![42]] {
            for algorithm in SortAlgorithm::ALL {
                let mut values = input.clone();
                let mut sink = RecordingSink::new();
                let outcome = run_sort(algorithm, &mut values, &mut sink);
                assert_eq!(outcome, Outcome::Completed);
                assert!(sink.is_empty());
                assert_eq!(values, input);
            }
        }
    }
}
