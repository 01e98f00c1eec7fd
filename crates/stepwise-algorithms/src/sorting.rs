//! Sorting family: bubble, selection, insertion, merge and quick sort

use crate::checks;
use crate::snapshot::SortSnapshot;
use stepwise_trace::{AlgorithmError, InstrumentedAlgorithm, Recorder, ValidationError};

/// Largest array the sorting visualizations accept
pub const MAX_SORT_LEN: usize = 50;

const BUBBLE_SOURCE: &[&str] = &[
    "for i in 0..n-1:",
    "  swapped = false",
    "  for j in 0..n-1-i:",
    "    if a[j] > a[j+1]:",
    "      swap(a[j], a[j+1])",
    "      swapped = true",
    "  if not swapped: break",
    "return a",
];

const SELECTION_SOURCE: &[&str] = &[
    "for i in 0..n-1:",
    "  min = i",
    "  for j in i+1..n:",
    "    if a[j] < a[min]:",
    "      min = j",
    "  swap(a[i], a[min])",
    "return a",
];

const INSERTION_SOURCE: &[&str] = &[
    "for i in 1..n:",
    "  key = a[i]",
    "  j = i - 1",
    "  while j >= 0 and a[j] > key:",
    "    a[j+1] = a[j]",
    "    j = j - 1",
    "  a[j+1] = key",
    "return a",
];

const MERGE_SOURCE: &[&str] = &[
    "merge_sort(a, lo, hi):",
    "  if lo >= hi: return",
    "  mid = (lo + hi) / 2",
    "  merge_sort(a, lo, mid)",
    "  merge_sort(a, mid+1, hi)",
    "  merge(a, lo, mid, hi)",
    "merge(a, lo, mid, hi):",
    "  while left and right remain:",
    "    if left[i] <= right[j]: a[k] = left[i]",
    "    else: a[k] = right[j]",
    "  copy whatever remains",
];

const QUICK_SOURCE: &[&str] = &[
    "quick_sort(a, lo, hi):",
    "  if lo >= hi: return",
    "  p = partition(a, lo, hi)",
    "  quick_sort(a, lo, p-1)",
    "  quick_sort(a, p+1, hi)",
    "partition(a, lo, hi):",
    "  pivot = a[hi]; i = lo",
    "  for j in lo..hi:",
    "    if a[j] < pivot:",
    "      swap(a[i], a[j]); i += 1",
    "  swap(a[i], a[hi])",
    "  return i",
];

fn validate_sort_input(input: &[i64]) -> Result<(), ValidationError> {
    checks::length_within("array length", input.len(), 1, MAX_SORT_LEN)
}

fn finish_sort(s: &mut SortSnapshot, recorder: &mut Recorder<SortSnapshot>, line: u32) -> Vec<i64> {
    s.clear_marks();
    s.range = None;
    s.mark_all_sorted();
    recorder.emit(s, format!("Sorted: {:?}", s.array), &[line]);
    s.array.clone()
}

fn sorted_consistent(last: &SortSnapshot, output: &[i64]) -> bool {
    last.array == output && last.sorted.len() == output.len()
}

/// Bubble sort with early exit when a pass makes no swap
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl InstrumentedAlgorithm for BubbleSort {
    type Input = [i64];
    type Snapshot = SortSnapshot;
    type Output = Vec<i64>;

    fn name(&self) -> &'static str {
        "bubble-sort"
    }

    fn source(&self) -> &'static [&'static str] {
        BUBBLE_SOURCE
    }

    fn validate(&self, input: &[i64]) -> Result<(), ValidationError> {
        validate_sort_input(input)
    }

    fn execute(
        &self,
        input: &[i64],
        recorder: &mut Recorder<SortSnapshot>,
    ) -> Result<Vec<i64>, AlgorithmError> {
        let n = input.len();
        let mut s = SortSnapshot::new(input.to_vec());
        recorder.emit(&s, format!("Start bubble sort on {n} elements"), &[1]);

        for i in 0..n.saturating_sub(1) {
            let last = n - 1 - i;
            let mut swapped = false;
            s.range = Some((0, last));
            for j in 0..last {
                s.clear_marks();
                s.comparing = Some((j, j + 1));
                let (a, b) = (s.array[j], s.array[j + 1]);
                recorder.emit(&s, format!("Compare a[{j}]={a} with a[{}]={b}", j + 1), &[3, 4]);
                if a > b {
                    s.array.swap(j, j + 1);
                    s.comparing = None;
                    s.swapping = Some((j, j + 1));
                    swapped = true;
                    recorder.emit(&s, format!("{a} > {b}, swap them"), &[5, 6]);
                }
            }
            s.clear_marks();
            s.mark_sorted(last);
            recorder.emit(
                &s,
                format!("Pass {} done: {} is in its final position", i + 1, s.array[last]),
                &[3],
            );
            if !swapped {
                s.mark_all_sorted();
                recorder.emit(&s, "No swaps in this pass, so the array is sorted", &[7]);
                break;
            }
        }

        Ok(finish_sort(&mut s, recorder, 8))
    }

    fn is_consistent(&self, last: &SortSnapshot, output: &Vec<i64>) -> bool {
        sorted_consistent(last, output)
    }
}

/// Selection sort
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl InstrumentedAlgorithm for SelectionSort {
    type Input = [i64];
    type Snapshot = SortSnapshot;
    type Output = Vec<i64>;

    fn name(&self) -> &'static str {
        "selection-sort"
    }

    fn source(&self) -> &'static [&'static str] {
        SELECTION_SOURCE
    }

    fn validate(&self, input: &[i64]) -> Result<(), ValidationError> {
        validate_sort_input(input)
    }

    fn execute(
        &self,
        input: &[i64],
        recorder: &mut Recorder<SortSnapshot>,
    ) -> Result<Vec<i64>, AlgorithmError> {
        let n = input.len();
        let mut s = SortSnapshot::new(input.to_vec());
        recorder.emit(&s, format!("Start selection sort on {n} elements"), &[1]);

        for i in 0..n.saturating_sub(1) {
            let mut min = i;
            s.clear_marks();
            s.range = Some((i, n - 1));
            s.pivot = Some(min);
            recorder.emit(
                &s,
                format!("Pass {}: assume a[{i}]={} is the minimum", i + 1, s.array[i]),
                &[1, 2],
            );
            for j in i + 1..n {
                s.comparing = Some((j, min));
                recorder.emit(
                    &s,
                    format!("Compare a[{j}]={} with current minimum {}", s.array[j], s.array[min]),
                    &[3, 4],
                );
                if s.array[j] < s.array[min] {
                    min = j;
                    s.comparing = None;
                    s.pivot = Some(min);
                    recorder.emit(&s, format!("New minimum {} at index {j}", s.array[j]), &[5]);
                }
            }
            s.comparing = None;
            if min == i {
                recorder.emit(&s, format!("a[{i}]={} is already the minimum, no swap", s.array[i]), &[6]);
            } else {
                let (a, b) = (s.array[i], s.array[min]);
                s.array.swap(i, min);
                s.swapping = Some((i, min));
                recorder.emit(&s, format!("Swap a[{i}]={a} with a[{min}]={b}"), &[6]);
            }
            s.clear_marks();
            s.mark_sorted(i);
        }

        Ok(finish_sort(&mut s, recorder, 7))
    }

    fn is_consistent(&self, last: &SortSnapshot, output: &Vec<i64>) -> bool {
        sorted_consistent(last, output)
    }
}

/// Insertion sort
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl InstrumentedAlgorithm for InsertionSort {
    type Input = [i64];
    type Snapshot = SortSnapshot;
    type Output = Vec<i64>;

    fn name(&self) -> &'static str {
        "insertion-sort"
    }

    fn source(&self) -> &'static [&'static str] {
        INSERTION_SOURCE
    }

    fn validate(&self, input: &[i64]) -> Result<(), ValidationError> {
        validate_sort_input(input)
    }

    fn execute(
        &self,
        input: &[i64],
        recorder: &mut Recorder<SortSnapshot>,
    ) -> Result<Vec<i64>, AlgorithmError> {
        let n = input.len();
        let mut s = SortSnapshot::new(input.to_vec());
        recorder.emit(&s, format!("Start insertion sort on {n} elements"), &[1]);

        for i in 1..n {
            let key = s.array[i];
            s.clear_marks();
            s.range = Some((0, i));
            s.pivot = Some(i);
            recorder.emit(&s, format!("Take key a[{i}]={key}"), &[1, 2, 3]);

            let mut j = i;
            while j > 0 {
                s.written = None;
                s.comparing = Some((j - 1, j));
                let left = s.array[j - 1];
                recorder.emit(&s, format!("Compare a[{}]={left} with key {key}", j - 1), &[4]);
                if left <= key {
                    break;
                }
                s.array[j] = left;
                s.comparing = None;
                s.written = Some(j);
                recorder.emit(&s, format!("{left} > {key}, shift {left} right to index {j}"), &[5, 6]);
                j -= 1;
            }

            s.array[j] = key;
            s.clear_marks();
            s.written = Some(j);
            recorder.emit(&s, format!("Insert key {key} at index {j}"), &[7]);
        }

        Ok(finish_sort(&mut s, recorder, 8))
    }

    fn is_consistent(&self, last: &SortSnapshot, output: &Vec<i64>) -> bool {
        sorted_consistent(last, output)
    }
}

/// Top-down merge sort
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl MergeSort {
    fn sort(s: &mut SortSnapshot, lo: usize, hi: usize, recorder: &mut Recorder<SortSnapshot>) {
        s.clear_marks();
        s.range = Some((lo, hi));
        if lo >= hi {
            recorder.emit(
                s,
                format!("a[{lo}]={} is a single element, already sorted", s.array[lo]),
                &[1, 2],
            );
            return;
        }
        let mid = lo + (hi - lo) / 2;
        recorder.emit(s, format!("Split [{lo}..={hi}] at index {mid}"), &[1, 3]);
        Self::sort(s, lo, mid, recorder);
        Self::sort(s, mid + 1, hi, recorder);
        Self::merge(s, lo, mid, hi, recorder);
    }

    fn merge(s: &mut SortSnapshot, lo: usize, mid: usize, hi: usize, recorder: &mut Recorder<SortSnapshot>) {
        s.clear_marks();
        s.range = Some((lo, hi));
        recorder.emit(
            s,
            format!("Merge [{lo}..={mid}] with [{}..={hi}]", mid + 1),
            &[6, 7],
        );

        let left = s.array[lo..=mid].to_vec();
        let right = s.array[mid + 1..=hi].to_vec();
        let (mut i, mut j, mut k) = (0, 0, lo);

        while i < left.len() && j < right.len() {
            if left[i] <= right[j] {
                s.array[k] = left[i];
                s.written = Some(k);
                recorder.emit(
                    s,
                    format!("{} <= {}: write {} to index {k}", left[i], right[j], left[i]),
                    &[8, 9],
                );
                i += 1;
            } else {
                s.array[k] = right[j];
                s.written = Some(k);
                recorder.emit(
                    s,
                    format!("{} > {}: write {} to index {k}", left[i], right[j], right[j]),
                    &[8, 10],
                );
                j += 1;
            }
            k += 1;
        }
        for &value in left[i..].iter().chain(&right[j..]) {
            s.array[k] = value;
            s.written = Some(k);
            recorder.emit(s, format!("Copy remaining {value} to index {k}"), &[11]);
            k += 1;
        }

        s.clear_marks();
        recorder.emit(
            s,
            format!("Merged [{lo}..={hi}]: {:?}", &s.array[lo..=hi]),
            &[6],
        );
    }
}

impl InstrumentedAlgorithm for MergeSort {
    type Input = [i64];
    type Snapshot = SortSnapshot;
    type Output = Vec<i64>;

    fn name(&self) -> &'static str {
        "merge-sort"
    }

    fn source(&self) -> &'static [&'static str] {
        MERGE_SOURCE
    }

    fn validate(&self, input: &[i64]) -> Result<(), ValidationError> {
        validate_sort_input(input)
    }

    fn execute(
        &self,
        input: &[i64],
        recorder: &mut Recorder<SortSnapshot>,
    ) -> Result<Vec<i64>, AlgorithmError> {
        let n = input.len();
        let mut s = SortSnapshot::new(input.to_vec());
        recorder.emit(&s, format!("Start merge sort on {n} elements"), &[1]);
        Self::sort(&mut s, 0, n - 1, recorder);
        Ok(finish_sort(&mut s, recorder, 1))
    }

    fn is_consistent(&self, last: &SortSnapshot, output: &Vec<i64>) -> bool {
        sorted_consistent(last, output)
    }
}

/// Quick sort with Lomuto partitioning (last element as pivot)
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

impl QuickSort {
    fn sort(s: &mut SortSnapshot, lo: usize, hi: usize, recorder: &mut Recorder<SortSnapshot>) {
        s.clear_marks();
        s.range = Some((lo, hi));
        if lo == hi {
            s.mark_sorted(lo);
            recorder.emit(
                s,
                format!("a[{lo}]={} is a single element, already in place", s.array[lo]),
                &[1, 2],
            );
            return;
        }
        recorder.emit(s, format!("Sort range [{lo}..={hi}]"), &[1]);
        let p = Self::partition(s, lo, hi, recorder);
        if p > lo {
            Self::sort(s, lo, p - 1, recorder);
        }
        if p < hi {
            Self::sort(s, p + 1, hi, recorder);
        }
    }

    fn partition(s: &mut SortSnapshot, lo: usize, hi: usize, recorder: &mut Recorder<SortSnapshot>) -> usize {
        let pivot = s.array[hi];
        s.pivot = Some(hi);
        recorder.emit(s, format!("Pivot is a[{hi}]={pivot}"), &[3, 6, 7]);

        let mut i = lo;
        for j in lo..hi {
            s.swapping = None;
            s.comparing = Some((j, hi));
            let value = s.array[j];
            recorder.emit(s, format!("Compare a[{j}]={value} with pivot {pivot}"), &[8, 9]);
            if value < pivot {
                s.comparing = None;
                if i == j {
                    recorder.emit(
                        s,
                        format!("{value} < {pivot} and already at the boundary, advance i to {}", i + 1),
                        &[10],
                    );
                } else {
                    s.array.swap(i, j);
                    s.swapping = Some((i, j));
                    recorder.emit(
                        s,
                        format!("{value} < {pivot}: swap a[{i}] and a[{j}], advance i to {}", i + 1),
                        &[10],
                    );
                }
                i += 1;
            }
        }

        s.comparing = None;
        s.array.swap(i, hi);
        s.swapping = Some((i, hi));
        s.pivot = Some(i);
        s.mark_sorted(i);
        recorder.emit(s, format!("Place pivot {pivot} at its final index {i}"), &[11, 12]);
        i
    }
}

impl InstrumentedAlgorithm for QuickSort {
    type Input = [i64];
    type Snapshot = SortSnapshot;
    type Output = Vec<i64>;

    fn name(&self) -> &'static str {
        "quick-sort"
    }

    fn source(&self) -> &'static [&'static str] {
        QUICK_SOURCE
    }

    fn validate(&self, input: &[i64]) -> Result<(), ValidationError> {
        validate_sort_input(input)
    }

    fn execute(
        &self,
        input: &[i64],
        recorder: &mut Recorder<SortSnapshot>,
    ) -> Result<Vec<i64>, AlgorithmError> {
        let n = input.len();
        let mut s = SortSnapshot::new(input.to_vec());
        recorder.emit(&s, format!("Start quick sort on {n} elements"), &[1]);
        Self::sort(&mut s, 0, n - 1, recorder);
        Ok(finish_sort(&mut s, recorder, 1))
    }

    fn is_consistent(&self, last: &SortSnapshot, output: &Vec<i64>) -> bool {
        sorted_consistent(last, output)
    }
}
