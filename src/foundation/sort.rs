//! Stable, adaptive merge sort used by the `sorted` terminal operations.
//!
//! The algorithm detects natural runs (ascending runs are kept, strictly
//! descending runs are reversed), extends short runs to a minimum length
//! with binary insertion sort, and then merges adjacent runs pairwise.
//! Stability is a contract, not an implementation detail: equal-key
//! elements keep their original relative order, which downstream grouping
//! and windowing operations rely on. Already-sorted and reverse-sorted
//! inputs collapse into a single run and are handled in one pass.

use core::cmp::Ordering;

/// Below this run length, runs are extended with binary insertion sort.
const MIN_RUN_THRESHOLD: usize = 32;

/// Sorts `v` in place by `T`'s natural order.
pub fn sort<T: Ord + Clone>(v: &mut [T]) {
    sort_by(v, |a, b| a.cmp(b));
}

/// Sorts `v` in place with a caller-supplied comparator.
///
/// The sort is stable: when `compare` reports `Equal`, the earlier element
/// stays earlier.
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len < 2 {
        return;
    }
    let min_run = min_run_length(len);

    // Phase 1: chop the slice into sorted runs of at least min_run elements.
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    while start < len {
        let mut end = natural_run_end(v, start, &mut compare);
        if end - start < min_run {
            let forced_end = usize::min(start + min_run, len);
            binary_insertion_sort(&mut v[start..forced_end], end - start, &mut compare);
            end = forced_end;
        }
        runs.push((start, end - start));
        start = end;
    }

    // Phase 2: merge adjacent runs pairwise until one run covers the slice.
    while runs.len() > 1 {
        let mut merged = Vec::with_capacity((runs.len() + 1) / 2);
        let mut i = 0;
        while i < runs.len() {
            if i + 1 < runs.len() {
                let (left_start, left_len) = runs[i];
                let (_, right_len) = runs[i + 1];
                merge(
                    v,
                    left_start,
                    left_start + left_len,
                    left_start + left_len + right_len,
                    &mut compare,
                );
                merged.push((left_start, left_len + right_len));
                i += 2;
            } else {
                merged.push(runs[i]);
                i += 1;
            }
        }
        runs = merged;
    }
}

/// Timsort's minimum run length: between 16 and 32 so that `len / min_run`
/// is close to a power of two.
fn min_run_length(mut n: usize) -> usize {
    let mut r = 0;
    while n >= MIN_RUN_THRESHOLD {
        r |= n & 1;
        n >>= 1;
    }
    n + r
}

/// Returns the exclusive end of the natural run starting at `start`,
/// reversing the run first when it is strictly descending.
fn natural_run_end<T, F>(v: &mut [T], start: usize, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    let mut end = start + 1;
    if end == len {
        return end;
    }
    if compare(&v[end], &v[start]) == Ordering::Less {
        // Strictly descending: extending only while strictly less keeps the
        // later reversal stable.
        while end < len && compare(&v[end], &v[end - 1]) == Ordering::Less {
            end += 1;
        }
        v[start..end].reverse();
    } else {
        while end < len && compare(&v[end], &v[end - 1]) != Ordering::Less {
            end += 1;
        }
    }
    end
}

/// Extends the sorted prefix `v[..sorted_len]` over the whole slice by
/// binary insertion. Insertion points are upper bounds, preserving the
/// relative order of equal keys.
fn binary_insertion_sort<T, F>(v: &mut [T], sorted_len: usize, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    for i in usize::max(sorted_len, 1)..v.len() {
        let key = v[i].clone();
        let mut lo = 0;
        let mut hi = i;
        while lo < hi {
            let mid = (lo + hi) / 2;
            if compare(&key, &v[mid]) == Ordering::Less {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        for j in (lo..i).rev() {
            v[j + 1] = v[j].clone();
        }
        v[lo] = key;
    }
}

/// Merges the adjacent sorted ranges `v[start..mid]` and `v[mid..end]`.
/// The left element wins ties, which is what makes the merge stable.
fn merge<T, F>(v: &mut [T], start: usize, mid: usize, end: usize, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if start == mid || mid == end {
        return;
    }
    // Already in order: nothing to move.
    if compare(&v[mid], &v[mid - 1]) != Ordering::Less {
        return;
    }
    let left: Vec<T> = v[start..mid].to_vec();
    let mut i = 0;
    let mut j = mid;
    let mut k = start;
    while i < left.len() && j < end {
        if compare(&v[j], &left[i]) == Ordering::Less {
            v[k] = v[j].clone();
            j += 1;
        } else {
            v[k] = left[i].clone();
            i += 1;
        }
        k += 1;
    }
    while i < left.len() {
        v[k] = left[i].clone();
        i += 1;
        k += 1;
    }
}
