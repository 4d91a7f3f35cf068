//! Slice utilities
//!
//! This module provides pure functions over ordered sequences: equality scans,
//! flattening, set-like operations, counting, windowed removal, shuffling and
//! partitioning. Functions return fresh `Vec`s or borrowed sub-slices and never
//! mutate their input, except the explicitly named `*_in_place` variants.

use crate::constants::DEFAULT_EPSILON;
use crate::domain::value::Truthiness;
use rand::Rng;
use std::hash::Hash;

#[cfg(feature = "fx-hash")]
type Set<T> = rustc_hash::FxHashSet<T>;

#[cfg(not(feature = "fx-hash"))]
type Set<T> = std::collections::HashSet<T>;

/// Array errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArrayError {
    /// Paired inputs have different lengths
    #[error("Length mismatch: {values} values but {flags} flags")]
    LengthMismatch { values: usize, flags: usize },
}

/// A value that is either a leaf or a nested sequence
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Nested<T> {
    Leaf(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Build a list of leaves
    pub fn list(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Self::Leaf).collect())
    }

    /// Check if this is a nested sequence
    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl<T> From<T> for Nested<T> {
    fn from(value: T) -> Self {
        Self::Leaf(value)
    }
}

// =============================================================================
// Equality scans
// =============================================================================

/// Check whether every element equals the first one
///
/// An empty slice is considered all-equal.
pub fn all_equal<T: PartialEq>(arr: &[T]) -> bool {
    match arr.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v == first),
        None => true,
    }
}

/// Check whether two numbers differ by less than `epsilon`
#[inline]
pub fn approximately_equal(v1: f64, v2: f64, epsilon: f64) -> bool {
    (v1 - v2).abs() < epsilon
}

/// [`approximately_equal`] with [`DEFAULT_EPSILON`]
#[inline]
pub fn approximately_equal_default(v1: f64, v2: f64) -> bool {
    approximately_equal(v1, v2, DEFAULT_EPSILON)
}

// =============================================================================
// Structural transforms
// =============================================================================

/// Flatten recursively, without depth limit
///
/// The result contains only leaves.
pub fn deep_flatten<T: Clone>(arr: &[Nested<T>]) -> Vec<T> {
    let mut out = Vec::with_capacity(arr.len());
    deep_flatten_into(arr, &mut out);
    out
}

fn deep_flatten_into<T: Clone>(arr: &[Nested<T>], out: &mut Vec<T>) {
    for item in arr {
        match item {
            Nested::Leaf(v) => out.push(v.clone()),
            Nested::List(inner) => deep_flatten_into(inner, out),
        }
    }
}

/// Flatten up to `depth` levels
///
/// Each nested list is spliced into its parent while `depth` levels remain;
/// deeper lists are kept as they are. A depth of 0 behaves like 1.
///
/// ```
/// use snipkit::domain::array::flatten;
/// use snipkit::Nested::{Leaf, List};
///
/// let arr = vec![Leaf(1), List(vec![Leaf(2), List(vec![Leaf(3)])])];
/// assert_eq!(flatten(&arr, 1), vec![Leaf(1), Leaf(2), List(vec![Leaf(3)])]);
/// ```
pub fn flatten<T: Clone>(arr: &[Nested<T>], depth: usize) -> Vec<Nested<T>> {
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        match item {
            Nested::List(inner) if depth > 1 => out.extend(flatten(inner, depth - 1)),
            Nested::List(inner) => out.extend(inner.iter().cloned()),
            leaf => out.push(leaf.clone()),
        }
    }
    out
}

/// Flatten a single level
#[inline]
pub fn flatten_once<T: Clone>(arr: &[Nested<T>]) -> Vec<Nested<T>> {
    flatten(arr, 1)
}

/// Turn a value into a sequence
///
/// Lists are returned as they are; a leaf becomes a one-element sequence.
pub fn cast_array<T>(value: Nested<T>) -> Vec<Nested<T>> {
    match value {
        Nested::List(items) => items,
        leaf => vec![leaf],
    }
}

/// Remove falsy-by-convention elements
pub fn compact<T: Truthiness + Clone>(arr: &[T]) -> Vec<T> {
    arr.iter().filter(|v| v.is_truthy()).cloned().collect()
}

// =============================================================================
// Set-like operations
// =============================================================================

/// Elements of `a` that do not appear in `b`
///
/// Order and duplicates of `a` are preserved.
pub fn difference<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let s: Set<&T> = b.iter().collect();
    a.iter().filter(|x| !s.contains(x)).cloned().collect()
}

/// Elements of `a` that also appear in `b`
pub fn intersection<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let s: Set<&T> = b.iter().collect();
    a.iter().filter(|x| s.contains(x)).cloned().collect()
}

/// Deduplicated concatenation of `a` and `b`, in first-seen order
pub fn union<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let mut seen: Set<&T> = Set::default();
    a.iter()
        .chain(b)
        .filter(|x| seen.insert(*x))
        .cloned()
        .collect()
}

/// Elements of `arr` present in `values`
///
/// Uses a linear `PartialEq` scan, so it also works for floats.
pub fn similarity<T: PartialEq + Clone>(arr: &[T], values: &[T]) -> Vec<T> {
    arr.iter().filter(|v| values.contains(v)).cloned().collect()
}

// =============================================================================
// Counting and indexing
// =============================================================================

/// Count the occurrences of `val`
pub fn count_occurrences<T: PartialEq>(arr: &[T], val: &T) -> usize {
    arr.iter().filter(|v| *v == val).count()
}

/// All positions of `val`, empty if absent
pub fn index_of_all<T: PartialEq>(arr: &[T], val: &T) -> Vec<usize> {
    arr.iter()
        .enumerate()
        .filter_map(|(i, v)| (v == val).then_some(i))
        .collect()
}

/// Keep only the values that occur exactly once
///
/// ```
/// use snipkit::domain::array::filter_non_unique;
///
/// assert_eq!(filter_non_unique(&[1, 2, 2, 3, 4, 4, 5]), vec![1, 3, 5]);
/// ```
pub fn filter_non_unique<T: PartialEq + Clone>(arr: &[T]) -> Vec<T> {
    arr.iter()
        .filter(|v| {
            let first = arr.iter().position(|x| x == *v);
            let last = arr.iter().rposition(|x| x == *v);
            first == last
        })
        .cloned()
        .collect()
}

/// The last element, `None` for an empty slice
#[inline]
pub fn last<T>(arr: &[T]) -> Option<&T> {
    arr.last()
}

/// All elements except the first
///
/// Slices with zero or one element are returned unchanged.
pub fn tail<T>(arr: &[T]) -> &[T] {
    if arr.len() > 1 { &arr[1..] } else { arr }
}

// =============================================================================
// Windowed removal
// =============================================================================
//
// `n` is clamped to the slice length; the conventional default is 1.

/// Remove `n` elements from the front
pub fn drop<T>(arr: &[T], n: usize) -> &[T] {
    &arr[n.min(arr.len())..]
}

/// Remove `n` elements from the back
pub fn drop_right<T>(arr: &[T], n: usize) -> &[T] {
    &arr[..arr.len().saturating_sub(n)]
}

/// Keep the first `n` elements
pub fn take<T>(arr: &[T], n: usize) -> &[T] {
    &arr[..n.min(arr.len())]
}

/// Keep the last `n` elements
pub fn take_right<T>(arr: &[T], n: usize) -> &[T] {
    &arr[arr.len().saturating_sub(n)..]
}

/// Remove elements from the front until `pred` returns true
///
/// Returns the suffix starting at the first element satisfying `pred`, or an
/// empty slice when none does.
pub fn drop_while<T, F>(arr: &[T], mut pred: F) -> &[T]
where
    F: FnMut(&T) -> bool,
{
    match arr.iter().position(|v| pred(v)) {
        Some(i) => &arr[i..],
        None => &[],
    }
}

/// Remove elements from the back until `pred` returns true
///
/// Returns the prefix ending at the last element satisfying `pred`, or an
/// empty slice when none does.
pub fn drop_right_while<T, F>(arr: &[T], mut pred: F) -> &[T]
where
    F: FnMut(&T) -> bool,
{
    match arr.iter().rposition(|v| pred(v)) {
        Some(i) => &arr[..=i],
        None => &[],
    }
}

/// In-place variant of [`drop_while`]
pub fn drop_while_in_place<T, F>(arr: &mut Vec<T>, pred: F)
where
    F: FnMut(&T) -> bool,
{
    let keep_from = arr.len() - drop_while(arr, pred).len();
    arr.drain(..keep_from);
}

/// In-place variant of [`drop_right_while`]
pub fn drop_right_while_in_place<T, F>(arr: &mut Vec<T>, pred: F)
where
    F: FnMut(&T) -> bool,
{
    let keep = drop_right_while(arr, pred).len();
    arr.truncate(keep);
}

// =============================================================================
// Randomization and partitioning
// =============================================================================

/// Shuffle a copy of `arr` with the Fisher-Yates algorithm
///
/// The input is left untouched. Every permutation is equally likely given an
/// unbiased `rng`.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(arr: &[T], rng: &mut R) -> Vec<T> {
    let mut out = arr.to_vec();
    let mut m = out.len();
    while m > 0 {
        let i = rng.gen_range(0..m);
        m -= 1;
        out.swap(m, i);
    }
    out
}

/// Split `values` into two groups according to the parallel `flags`
///
/// Returns `(flagged, unflagged)`, each keeping the original relative order.
///
/// # Errors
///
/// Returns [`ArrayError::LengthMismatch`] if the slices differ in length.
pub fn bifurcate<T: Clone>(values: &[T], flags: &[bool]) -> Result<(Vec<T>, Vec<T>), ArrayError> {
    if values.len() != flags.len() {
        return Err(ArrayError::LengthMismatch {
            values: values.len(),
            flags: flags.len(),
        });
    }

    let mut pass = Vec::new();
    let mut fail = Vec::new();
    for (v, &flag) in values.iter().zip(flags) {
        if flag {
            pass.push(v.clone());
        } else {
            fail.push(v.clone());
        }
    }

    Ok((pass, fail))
}

/// Decimal digits of `n`, most significant first
pub fn digitize(n: u64) -> Vec<u8> {
    n.to_string().bytes().map(|b| b - b'0').collect()
}
