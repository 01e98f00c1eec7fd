//! Snapshot types, one fixed field set per algorithm family
//!
//! Each instrumented algorithm records its family-specific snapshot; the
//! catalog lifts those histories into the [`Snapshot`] tagged union so one
//! controller and one renderer can handle every algorithm.

use crate::problem::{Interval, Point};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sorting state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSnapshot {
    /// Working array
    pub array: Vec<i64>,
    /// Pair of indices being compared
    pub comparing: Option<(usize, usize)>,
    /// Pair of indices just swapped
    pub swapping: Option<(usize, usize)>,
    /// Index just written (merge, insertion shift)
    pub written: Option<usize>,
    /// Indices known to hold their final value
    pub sorted: Vec<usize>,
    /// Pivot (quick sort) or current minimum (selection sort)
    pub pivot: Option<usize>,
    /// Active subarray, inclusive
    pub range: Option<(usize, usize)>,
}

impl SortSnapshot {
    /// Fresh snapshot over `array`
    #[must_use]
    pub fn new(array: Vec<i64>) -> Self {
        Self {
            array,
            ..Self::default()
        }
    }

    /// Drop per-step markers, keep array and sorted set
    pub fn clear_marks(&mut self) {
        self.comparing = None;
        self.swapping = None;
        self.written = None;
        self.pivot = None;
    }

    /// Record that `index` holds its final value
    pub fn mark_sorted(&mut self, index: usize) {
        if let Err(pos) = self.sorted.binary_search(&index) {
            self.sorted.insert(pos, index);
        }
    }

    /// Mark every index as final
    pub fn mark_all_sorted(&mut self) {
        self.sorted = (0..self.array.len()).collect();
    }
}

/// Searching state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchSnapshot {
    /// Array being searched
    pub array: Vec<i64>,
    /// Value searched for
    pub target: i64,
    /// Lower bound of the live range
    pub low: Option<usize>,
    /// Upper bound of the live range
    pub high: Option<usize>,
    /// Midpoint probed by binary search
    pub mid: Option<usize>,
    /// Index probed by linear search
    pub probe: Option<usize>,
    /// Index where the target was found
    pub found: Option<usize>,
}

/// Two-pointer and hash-lookup state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TwoPointerSnapshot {
    /// Input values
    pub array: Vec<i64>,
    /// Target sum, if the problem has one
    pub target: Option<i64>,
    /// Left pointer (or current index for the hash scan)
    pub left: Option<usize>,
    /// Right pointer
    pub right: Option<usize>,
    /// Values seen so far and their index, in insertion order
    pub seen: IndexMap<i64, usize>,
    /// Pair of indices satisfying the target
    pub found_pair: Option<(usize, usize)>,
    /// Best value so far (container area)
    pub best: Option<i64>,
}

/// Graph traversal state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Visited (or settled) flag per node
    pub visited: Vec<bool>,
    /// Queue, stack or priority frontier contents
    pub frontier: Vec<usize>,
    /// Node being processed
    pub current: Option<usize>,
    /// Nodes in visit order
    pub order: Vec<usize>,
    /// Edge being examined
    pub edge: Option<(usize, usize)>,
    /// Tentative distances (Dijkstra only)
    pub distances: Vec<Option<u64>>,
}

/// Dynamic programming table state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Row labels
    pub row_labels: Vec<String>,
    /// Column labels
    pub column_labels: Vec<String>,
    /// Table cells, `None` until written
    pub cells: Vec<Vec<Option<i64>>>,
    /// Cell being written or inspected
    pub active: Option<(usize, usize)>,
    /// Cells read to compute the active one
    pub reads: Vec<(usize, usize)>,
}

impl TableSnapshot {
    /// Empty table of `rows` x `columns`
    #[must_use]
    pub fn new(row_labels: Vec<String>, column_labels: Vec<String>) -> Self {
        let cells = vec![vec![None; column_labels.len()]; row_labels.len()];
        Self {
            row_labels,
            column_labels,
            cells,
            active: None,
            reads: Vec::new(),
        }
    }

    /// Read a written cell
    #[must_use]
    pub fn value(&self, row: usize, column: usize) -> Option<i64> {
        self.cells.get(row).and_then(|r| r.get(column)).copied().flatten()
    }
}

/// Activity selection state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    /// Activities, sorted by finish time once sorting has happened
    pub intervals: Vec<Interval>,
    /// Activity under consideration
    pub current: Option<usize>,
    /// Indices of selected activities
    pub selected: Vec<usize>,
    /// Finish time of the last selected activity
    pub last_end: Option<i64>,
}

/// Coin count in a change result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinCount {
    /// Denomination
    pub coin: u64,
    /// How many were used
    pub count: u64,
}

/// Greedy change-making state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoinSnapshot {
    /// Denominations, largest first once sorted
    pub coins: Vec<u64>,
    /// Amount requested
    pub amount: u64,
    /// Amount still to pay
    pub remaining: u64,
    /// Coin under consideration
    pub current: Option<usize>,
    /// Coins taken so far
    pub used: Vec<CoinCount>,
}

/// Maximum subarray state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubarraySnapshot {
    /// Input values
    pub array: Vec<i64>,
    /// Subproblem range, inclusive
    pub range: Option<(usize, usize)>,
    /// Split index of the current subproblem
    pub mid: Option<usize>,
    /// Candidate being evaluated `(start, end, sum)`
    pub candidate: Option<(usize, usize, i64)>,
    /// Best answer for the current subproblem `(start, end, sum)`
    pub best: Option<(usize, usize, i64)>,
}

/// Closest pair state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointsSnapshot {
    /// Points sorted by x
    pub points: Vec<Point>,
    /// Subproblem range, inclusive
    pub range: Option<(usize, usize)>,
    /// X coordinate of the dividing line
    pub divide_x: Option<i64>,
    /// Indices in the strip around the dividing line, ordered by y
    pub strip: Vec<usize>,
    /// Pair being compared
    pub comparing: Option<(usize, usize)>,
    /// Closest pair known for the current subproblem
    pub best: Option<(usize, usize)>,
    /// Squared distance of `best`
    pub best_distance_sq: Option<i64>,
}

/// Snapshot of any algorithm, tagged by family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Snapshot {
    /// Sorting algorithms
    Sort(SortSnapshot),
    /// Linear and binary search
    Search(SearchSnapshot),
    /// Two-pointer and hash scans
    TwoPointer(TwoPointerSnapshot),
    /// BFS, DFS, Dijkstra
    Graph(GraphSnapshot),
    /// DP tables
    Table(TableSnapshot),
    /// Activity selection
    Activity(ActivitySnapshot),
    /// Change making
    Coin(CoinSnapshot),
    /// Maximum subarray
    Subarray(SubarraySnapshot),
    /// Closest pair
    Points(PointsSnapshot),
}

fn write_array(
    f: &mut fmt::Formatter<'_>,
    array: &[i64],
    marker: impl Fn(usize) -> Option<char>,
) -> fmt::Result {
    write!(f, "[")?;
    for (i, v) in array.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        match marker(i) {
            Some(m) => write!(f, "{m}{v}{m}")?,
            None => write!(f, "{v}")?,
        }
    }
    write!(f, "]")
}

fn is_pair(pair: Option<(usize, usize)>, i: usize) -> bool {
    pair.is_some_and(|(a, b)| a == i || b == i)
}

impl fmt::Display for SortSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_array(f, &self.array, |i| {
            if is_pair(self.swapping, i) || self.written == Some(i) {
                Some('*')
            } else if is_pair(self.comparing, i) {
                Some('?')
            } else if self.pivot == Some(i) {
                Some('^')
            } else {
                None
            }
        })?;
        if let Some((lo, hi)) = self.range {
            write!(f, " range {lo}..={hi}")?;
        }
        if !self.sorted.is_empty() {
            write!(f, " sorted {}/{}", self.sorted.len(), self.array.len())?;
        }
        Ok(())
    }
}

impl fmt::Display for SearchSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_array(f, &self.array, |i| {
            if self.found == Some(i) {
                Some('*')
            } else if self.mid == Some(i) || self.probe == Some(i) {
                Some('?')
            } else {
                None
            }
        })?;
        write!(f, " target {}", self.target)?;
        if let (Some(low), Some(high)) = (self.low, self.high) {
            write!(f, " low {low} high {high}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TwoPointerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_array(f, &self.array, |i| {
            if is_pair(self.found_pair, i) {
                Some('*')
            } else if self.left == Some(i) {
                Some('<')
            } else if self.right == Some(i) {
                Some('>')
            } else {
                None
            }
        })?;
        if let Some(target) = self.target {
            write!(f, " target {target}")?;
        }
        if !self.seen.is_empty() {
            write!(f, " seen {{")?;
            for (n, (value, index)) in self.seen.iter().enumerate() {
                if n > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{value}: {index}")?;
            }
            write!(f, "}}")?;
        }
        if let Some(best) = self.best {
            write!(f, " best {best}")?;
        }
        Ok(())
    }
}

impl fmt::Display for GraphSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order {:?} frontier {:?}", self.order, self.frontier)?;
        if let Some(current) = self.current {
            write!(f, " at {current}")?;
        }
        if let Some((u, v)) = self.edge {
            write!(f, " edge {u}-{v}")?;
        }
        if !self.distances.is_empty() {
            write!(f, " dist [")?;
            for (i, d) in self.distances.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                match d {
                    Some(d) => write!(f, "{d}")?,
                    None => write!(f, "inf")?,
                }
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl fmt::Display for TableSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let label = self.row_labels.get(r).map_or("", String::as_str);
            write!(f, "{label:>4} |")?;
            for (c, cell) in row.iter().enumerate() {
                let mark = if self.active == Some((r, c)) {
                    '*'
                } else if self.reads.contains(&(r, c)) {
                    '+'
                } else {
                    ' '
                };
                match cell {
                    Some(v) => write!(f, " {v:>3}{mark}")?,
                    None => write!(f, "   .{mark}")?,
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for ActivitySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            let mark = if self.selected.contains(&i) {
                "+"
            } else if self.current == Some(i) {
                "?"
            } else {
                ""
            };
            write!(f, "{mark}{interval}")?;
        }
        if let Some(end) = self.last_end {
            write!(f, " last end {end}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CoinSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "coins {:?} remaining {}/{}", self.coins, self.remaining, self.amount)?;
        for used in &self.used {
            write!(f, " {}x{}", used.count, used.coin)?;
        }
        Ok(())
    }
}

impl fmt::Display for SubarraySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let in_best = |i: usize| self.best.is_some_and(|(s, e, _)| s <= i && i <= e);
        write_array(f, &self.array, |i| if in_best(i) { Some('*') } else { None })?;
        if let Some((lo, hi)) = self.range {
            write!(f, " range {lo}..={hi}")?;
        }
        if let Some((s, e, sum)) = self.candidate {
            write!(f, " candidate {s}..={e} sum {sum}")?;
        }
        if let Some((s, e, sum)) = self.best {
            write!(f, " best {s}..={e} sum {sum}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PointsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((lo, hi)) = self.range {
            write!(f, "range {lo}..={hi}")?;
        }
        if let Some(x) = self.divide_x {
            write!(f, " divide x={x}")?;
        }
        if !self.strip.is_empty() {
            write!(f, " strip {:?}", self.strip)?;
        }
        if let Some((a, b)) = self.comparing {
            write!(f, " comparing {} {}", self.points[a], self.points[b])?;
        }
        if let (Some((a, b)), Some(d)) = (self.best, self.best_distance_sq) {
            write!(f, " best {} {} d^2={d}", self.points[a], self.points[b])?;
        }
        Ok(())
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snapshot::Sort(s) => s.fmt(f),
            Snapshot::Search(s) => s.fmt(f),
            Snapshot::TwoPointer(s) => s.fmt(f),
            Snapshot::Graph(s) => s.fmt(f),
            Snapshot::Table(s) => s.fmt(f),
            Snapshot::Activity(s) => s.fmt(f),
            Snapshot::Coin(s) => s.fmt(f),
            Snapshot::Subarray(s) => s.fmt(f),
            Snapshot::Points(s) => s.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_sorted_keeps_indices_ordered_and_unique() {
        let mut s = SortSnapshot::new(vec![3, 2, 1]);
        s.mark_sorted(2);
        s.mark_sorted(0);
        s.mark_sorted(2);
        assert_eq!(s.sorted, vec![0, 2]);
    }

    #[test]
    fn sort_display_marks_comparison() {
        let mut s = SortSnapshot::new(vec![5, 3, 4]);
        s.comparing = Some((0, 1));
        assert_eq!(s.to_string(), "[?5? ?3? 4]");
    }

    #[test]
    fn table_value_reads_written_cells() {
        let mut t = TableSnapshot::new(vec!["a".into()], vec!["0".into(), "1".into()]);
        t.cells[0][1] = Some(7);
        assert_eq!(t.value(0, 1), Some(7));
        assert_eq!(t.value(0, 0), None);
        assert_eq!(t.value(3, 3), None);
    }
}
