//! Comparison sorts: selection, bubble, insertion and quicksort.
//!
//! Every algorithm comes in two forms:
//! - `*_by`, taking a comparator closure like [`slice::sort_by`].
//! - A keyed form taking a [`KeyAccessor`] and a [`Direction`].
//!
//! [`Algorithm`] names the four strategies and dispatches among them. All of them sort in
//! place, only ever call `swap`, and so always produce a permutation of their input.
//!
//! Selection and bubble sort run their full double loop even on sorted input. That keeps
//! their cost the same on every input, which is what the benchmark harness is meant to show.

use crate::core::{Direction, Identity, KeyAccessor};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// How quicksort picks the pivot of each range.
///
/// [`PivotPolicy::First`] uses the first element. It is the simplest choice and degrades
/// to O(n²) comparisons and O(n) partition levels on input that is already sorted in
/// either direction. Callers sorting adversarial input should pick
/// [`PivotPolicy::MedianOfThree`] or [`PivotPolicy::Random`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotPolicy {
    #[default]
    First,
    MedianOfThree,
    Random,
}

impl PivotPolicy {
    /// Index of the pivot within `range` (non-empty).
    fn select<T, F>(self, range: &[T], compare: &mut F) -> usize
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let len = range.len();
        match self {
            PivotPolicy::First => 0,
            PivotPolicy::Random => rand::rng().random_range(0..len),
            PivotPolicy::MedianOfThree => {
                let (a, b, c) = (0, len / 2, len - 1);
                let mut le =
                    |i: usize, j: usize| compare(&range[i], &range[j]) != Ordering::Greater;
                if le(a, b) {
                    if le(b, c) {
                        b
                    } else if le(a, c) {
                        c
                    } else {
                        a
                    }
                } else if le(a, c) {
                    a
                } else if le(b, c) {
                    c
                } else {
                    b
                }
            }
        }
    }
}

/// The four sorting strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Selection,
    Bubble,
    Insertion,
    Quick(PivotPolicy),
}

impl Algorithm {
    /// All four strategies in benchmark order; quicksort uses the first-element pivot.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Selection,
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Quick(PivotPolicy::First),
    ];

    /// Human-readable name, as printed in benchmark reports.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Selection => "Selection Sort",
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Quick(_) => "Quick Sort",
        }
    }

    /// Whether equal keys keep their relative order.
    pub fn is_stable(self) -> bool {
        matches!(self, Algorithm::Bubble | Algorithm::Insertion)
    }

    /// Sorts `data` in place with a comparator closure.
    pub fn sort_by<T, F>(self, data: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match self {
            Algorithm::Selection => selection_sort_by(data, compare),
            Algorithm::Bubble => bubble_sort_by(data, compare),
            Algorithm::Insertion => insertion_sort_by(data, compare),
            Algorithm::Quick(policy) => quick_sort_by(data, policy, compare),
        }
    }

    /// Sorts `data` in place by the key `accessor` projects, in `direction`.
    ///
    /// ```
    /// use crimesort::prelude::*;
    ///
    /// let mut data = vec![3, 1, 2];
    /// Algorithm::Insertion.sort(&mut data, &Identity, Direction::Descending);
    /// assert_eq!(data, vec![3, 2, 1]);
    /// ```
    pub fn sort<T, A>(self, data: &mut [T], accessor: &A, direction: Direction)
    where
        A: KeyAccessor<T> + ?Sized,
    {
        log::debug!(
            "{} on {} elements {}",
            self.name(),
            data.len(),
            direction.describe()
        );
        self.sort_by(data, |a, b| direction.apply(accessor.compare(a, b)));
    }

    /// Index-based sort: returns the positions of `data` in sorted order without
    /// touching `data`.
    ///
    /// Equal keys are ordered exactly as [`Algorithm::sort`] would order them.
    ///
    /// ```
    /// use crimesort::prelude::*;
    ///
    /// let data = vec!["banana", "apple", "cherry"];
    /// let indices = Algorithm::Selection.sort_indices(&data, &Identity, Direction::Ascending);
    /// assert_eq!(indices, vec![1, 0, 2]);
    /// ```
    pub fn sort_indices<T, A>(self, data: &[T], accessor: &A, direction: Direction) -> Vec<usize>
    where
        A: KeyAccessor<T> + ?Sized,
    {
        let mut indices: Vec<usize> = (0..data.len()).collect();
        self.sort_by(&mut indices, |&a, &b| {
            direction.apply(accessor.compare(&data[a], &data[b]))
        });
        indices
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sorts a slice of ordered values with `algorithm`.
///
/// ```
/// use crimesort::prelude::*;
///
/// let mut data = vec!["banana", "apple", "cherry", "date"];
/// sort_slice(Algorithm::Quick(PivotPolicy::First), &mut data, Direction::Ascending);
///
/// assert_eq!(data, vec!["apple", "banana", "cherry", "date"]);
/// ```
pub fn sort_slice<T: Ord>(algorithm: Algorithm, data: &mut [T], direction: Direction) {
    algorithm.sort(data, &Identity, direction);
}

/// Selection sort.
///
/// Each pass scans the unsorted suffix for the element that sorts first and swaps it
/// into place. On ties the earliest candidate wins. Always O(n²) comparisons and at most
/// n - 1 swaps. Not stable.
pub fn selection_sort_by<T, F>(data: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = data.len();
    for i in 0..len {
        let mut extreme = i;
        for j in (i + 1)..len {
            if compare(&data[j], &data[extreme]) == Ordering::Less {
                extreme = j;
            }
        }
        if extreme != i {
            data.swap(i, extreme);
        }
    }
}

/// Bubble sort.
///
/// Fixed double loop of adjacent compare-and-swap with no early exit. Swaps only strictly
/// out-of-order neighbours, so it is stable.
pub fn bubble_sort_by<T, F>(data: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = data.len();
    for i in 0..len {
        for j in 0..len - i - 1 {
            if compare(&data[j], &data[j + 1]) == Ordering::Greater {
                data.swap(j, j + 1);
            }
        }
    }
}

/// Insertion sort.
///
/// Walks each element backward through the sorted prefix. Stops at the first
/// predecessor that is not greater, so it is stable and takes n - 1 comparisons on
/// sorted input.
pub fn insertion_sort_by<T, F>(data: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..data.len() {
        let mut j = i;
        while j > 0 && compare(&data[j - 1], &data[j]) == Ordering::Greater {
            data.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Quicksort with two-cursor partitioning.
///
/// The pivot chosen by `policy` is moved to the front of the range. The left cursor then
/// advances over elements that do not sort after the pivot, the right cursor retreats
/// over elements that do not sort before it, and out-of-place pairs are swapped until the
/// cursors cross. The pivot lands on the right cursor and both sides are sorted
/// independently. Not stable.
///
/// The smaller side is sorted recursively and the larger one iteratively, so stack depth
/// stays logarithmic even when partitions are maximally unbalanced.
///
/// Sorting already sorted input yields the same key sequence, but records with equal
/// keys may trade places: with [`PivotPolicy::First`], `[a(1), b(1), c(2)]` comes back
/// as `[b(1), a(1), c(2)]`.
pub fn quick_sort_by<T, F>(data: &mut [T], policy: PivotPolicy, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    quick_sort_range(data, policy, &mut compare);
}

fn quick_sort_range<T, F>(data: &mut [T], policy: PivotPolicy, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut range = data;
    while range.len() > 1 {
        let pivot = policy.select(range, compare);
        range.swap(0, pivot);
        let mid = partition(range, compare);

        let (left, rest) = std::mem::take(&mut range).split_at_mut(mid);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quick_sort_range(left, policy, compare);
            range = right;
        } else {
            quick_sort_range(right, policy, compare);
            range = left;
        }
    }
}

/// Partitions `range` around `range[0]` and returns the pivot's final index.
fn partition<T, F>(range: &mut [T], compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut left = 1;
    let mut right = range.len() - 1;
    loop {
        while left <= right && compare(&range[left], &range[0]) != Ordering::Greater {
            left += 1;
        }
        // `left >= 1` keeps `right` from underflowing.
        while left <= right && compare(&range[right], &range[0]) != Ordering::Less {
            right -= 1;
        }
        if left <= right {
            range.swap(left, right);
        } else {
            break;
        }
    }
    range.swap(0, right);
    right
}
