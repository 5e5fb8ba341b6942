//! The lazy sequence abstraction.
//!
//! A [`Sequence`] is a factory of advance sources plus an operation
//! vocabulary: intermediate operations queue a combinator and return a new
//! `Sequence` without touching the upstream; terminal operations build the
//! source chain and walk it exactly once through the fused advance loop.
//!
//! Re-iterability is a property of the root source. Sequences rooted in
//! owned storage or a generator are restartable and may be traversed any
//! number of times; sequences rooted in a one-shot resource (see
//! [`Sequence::single_pass`]) report [`Error::AlreadyConsumed`] on a second
//! traversal instead of silently yielding partial data.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use std::rc::Rc;

use crate::foundation::advance::{Advance, AdvanceIterator, BoxAdvance, SourceIter, VecSource};
use crate::foundation::error::{Error, Result};
use crate::foundation::sort;
use crate::seq::gatherers::Gatherer;
use crate::seq::iterators::{
    Concat, DistinctBy, Filtering, FlatMapping, Gathering, Generator, Inspect, Mapping, Skip,
    SkipWhile, Take, TakeWhile, Windowed, Zip, ZipWithNext,
};
use crate::seq::reducers::Reducer;

type Factory<T> = Rc<dyn Fn() -> Result<BoxAdvance<T>>>;

/// A lazy, composable factory of advance sources.
///
/// Cloning a `Sequence` clones the definition, not any elements; clones
/// share the root source, so clones of a single-pass sequence share its
/// one permitted traversal.
pub struct Sequence<T: 'static> {
    factory: Factory<T>,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
        }
    }
}

// ============================================================================
// Construction
// ============================================================================

impl<T: 'static> Sequence<T> {
    pub(crate) fn from_factory(factory: impl Fn() -> Result<BoxAdvance<T>> + 'static) -> Self {
        Self {
            factory: Rc::new(factory),
        }
    }

    /// The empty sequence.
    pub fn empty() -> Self {
        Self::from_factory(|| Ok(Box::new(SourceIter::new(core::iter::empty()))))
    }

    /// A restartable sequence over owned elements.
    pub fn of(items: impl Into<Vec<T>>) -> Self
    where
        T: Clone,
    {
        let items: Rc<Vec<T>> = Rc::new(items.into());
        Self::from_factory(move || Ok(Box::new(VecSource::new(Rc::clone(&items)))))
    }

    /// A restartable sequence over anything that can be re-iterated.
    pub fn from_iterable<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + 'static,
    {
        Self::from_factory(move || Ok(Box::new(SourceIter::new(iterable.clone().into_iter()))))
    }

    /// An infinite restartable sequence: `seed`, `successor(seed)`, ...
    pub fn generate(seed: T, successor: impl Fn(&T) -> T + 'static) -> Self
    where
        T: Clone,
    {
        let successor = Rc::new(successor);
        Self::from_factory(move || {
            let successor = Rc::clone(&successor);
            Ok(Box::new(Generator::new(seed.clone(), move |value| {
                (*successor)(value)
            })))
        })
    }

    /// A one-shot sequence over an externally-owned iterator.
    ///
    /// The first traversal consumes the source; the iterator (and whatever
    /// resource it owns, e.g. an open reader behind a lines iterator) is
    /// dropped when the traversal finishes or is abandoned. Any later
    /// traversal fails with [`Error::AlreadyConsumed`].
    pub fn single_pass(iter: impl Iterator<Item = T> + 'static) -> Self {
        let slot: Rc<RefCell<Option<BoxAdvance<T>>>> =
            Rc::new(RefCell::new(Some(Box::new(SourceIter::new(iter)))));
        Self::from_factory(move || slot.borrow_mut().take().ok_or(Error::AlreadyConsumed))
    }

    /// Builds a fresh advance source for one traversal of this chain.
    pub fn advance_source(&self) -> Result<BoxAdvance<T>> {
        (self.factory)()
    }

    /// A push-style iterator over one traversal.
    pub fn iter(&self) -> Result<AdvanceIterator<BoxAdvance<T>>> {
        self.advance_source().map(AdvanceIterator::new)
    }

    /// Queues one combinator construction on top of this chain.
    fn wrap<R: 'static>(
        self,
        wrap: impl Fn(BoxAdvance<T>) -> BoxAdvance<R> + 'static,
    ) -> Sequence<R> {
        let parent = self.factory;
        Sequence::from_factory(move || parent().map(&wrap))
    }
}

// ============================================================================
// Intermediate operations (lazy)
// ============================================================================

impl<T: 'static> Sequence<T> {
    /// Transforms every element.
    pub fn map<R: 'static>(self, transform: impl Fn(T) -> R + 'static) -> Sequence<R> {
        let transform = Rc::new(transform);
        self.wrap(move |upstream| {
            let transform = Rc::clone(&transform);
            Box::new(Mapping::new(upstream, move |value| (*transform)(value)))
        })
    }

    /// Keeps elements matching the predicate.
    pub fn filter(self, predicate: impl Fn(&T) -> bool + 'static) -> Sequence<T> {
        self.filter_inner(predicate, true)
    }

    /// Drops elements matching the predicate.
    pub fn filter_not(self, predicate: impl Fn(&T) -> bool + 'static) -> Sequence<T> {
        self.filter_inner(predicate, false)
    }

    fn filter_inner(self, predicate: impl Fn(&T) -> bool + 'static, send_when: bool) -> Sequence<T> {
        let predicate = Rc::new(predicate);
        self.wrap(move |upstream| {
            let predicate = Rc::clone(&predicate);
            Box::new(Filtering::new(
                upstream,
                move |value: &T| (*predicate)(value),
                send_when,
            ))
        })
    }

    /// Maps every element to an iterable and flattens the results in order.
    pub fn flat_map<R, I>(self, transform: impl Fn(T) -> I + 'static) -> Sequence<R>
    where
        R: 'static,
        I: IntoIterator<Item = R>,
        I::IntoIter: 'static,
    {
        let transform = Rc::new(transform);
        self.wrap(move |upstream| {
            let transform = Rc::clone(&transform);
            Box::new(FlatMapping::new(upstream, move |value| {
                Box::new(SourceIter::new((*transform)(value).into_iter())) as BoxAdvance<R>
            }))
        })
    }

    /// Keeps at most the first `count` elements. `take(0)` yields an
    /// immediately-exhausted sequence that never pulls upstream.
    pub fn take(self, count: usize) -> Sequence<T> {
        self.wrap(move |upstream| Box::new(Take::new(upstream, count)))
    }

    /// Discards the first `count` elements.
    pub fn skip(self, count: usize) -> Sequence<T> {
        self.wrap(move |upstream| Box::new(Skip::new(upstream, count)))
    }

    /// Emits elements while the predicate holds.
    pub fn take_while(self, predicate: impl Fn(&T) -> bool + 'static) -> Sequence<T> {
        self.take_while_inner(predicate, false)
    }

    /// Emits elements while the predicate holds, plus the first failing one.
    pub fn take_while_inclusive(self, predicate: impl Fn(&T) -> bool + 'static) -> Sequence<T> {
        self.take_while_inner(predicate, true)
    }

    fn take_while_inner(
        self,
        predicate: impl Fn(&T) -> bool + 'static,
        inclusive: bool,
    ) -> Sequence<T> {
        let predicate = Rc::new(predicate);
        self.wrap(move |upstream| {
            let predicate = Rc::clone(&predicate);
            Box::new(TakeWhile::new(
                upstream,
                move |value: &T| (*predicate)(value),
                inclusive,
            ))
        })
    }

    /// Discards leading elements while the predicate holds.
    pub fn skip_while(self, predicate: impl Fn(&T) -> bool + 'static) -> Sequence<T> {
        let predicate = Rc::new(predicate);
        self.wrap(move |upstream| {
            let predicate = Rc::clone(&predicate);
            Box::new(SkipWhile::new(upstream, move |value: &T| (*predicate)(value)))
        })
    }

    /// Removes duplicate elements, keeping first occurrences.
    ///
    /// Seen elements are retained for the whole traversal: O(n) space.
    pub fn distinct(self) -> Sequence<T>
    where
        T: Clone + Eq + Hash,
    {
        self.distinct_by(|value| value.clone())
    }

    /// Removes elements whose key was already seen.
    pub fn distinct_by<K>(self, key_of: impl Fn(&T) -> K + 'static) -> Sequence<T>
    where
        K: Eq + Hash + 'static,
    {
        let key_of = Rc::new(key_of);
        self.wrap(move |upstream| {
            let key_of = Rc::clone(&key_of);
            Box::new(DistinctBy::new(upstream, move |value: &T| (*key_of)(value)))
        })
    }

    /// Sliding windows of `size` elements (step 1, no partial windows).
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn windowed(self, size: usize) -> Sequence<Vec<T>>
    where
        T: Clone,
    {
        self.windowed_partial(size, 1, false)
    }

    /// Windows of `size` elements starting every `step` elements, without
    /// a partial trailing window.
    pub fn windowed_step(self, size: usize, step: usize) -> Sequence<Vec<T>>
    where
        T: Clone,
    {
        self.windowed_partial(size, step, false)
    }

    /// Windows with full control over the partial trailing window mode.
    ///
    /// Omission (`partial_windows == false`) and emission are both
    /// supported as first-class modes; the shorter-named operations simply
    /// pick one.
    ///
    /// # Panics
    ///
    /// Panics if `size` or `step` is zero.
    pub fn windowed_partial(
        self,
        size: usize,
        step: usize,
        partial_windows: bool,
    ) -> Sequence<Vec<T>>
    where
        T: Clone,
    {
        assert!(size > 0, "window size must be greater than 0");
        assert!(step > 0, "window step must be greater than 0");
        self.wrap(move |upstream| Box::new(Windowed::new(upstream, size, step, partial_windows)))
    }

    /// Non-overlapping chunks of at most `size` elements; the trailing
    /// partial chunk is included.
    pub fn chunked(self, size: usize) -> Sequence<Vec<T>>
    where
        T: Clone,
    {
        self.windowed_partial(size, size, true)
    }

    /// Pairs each element with its successor: `n` elements yield
    /// `max(n - 1, 0)` pairs.
    pub fn zip_with_next(self) -> Sequence<(T, T)>
    where
        T: Clone,
    {
        self.wrap(|upstream| Box::new(ZipWithNext::new(upstream)))
    }

    /// Pairs this sequence element-wise with another, stopping with the
    /// shorter of the two.
    pub fn zip<U: 'static>(self, other: Sequence<U>) -> Sequence<(T, U)> {
        let left = self.factory;
        let right = other.factory;
        Sequence::from_factory(move || {
            let a = left()?;
            let b = right()?;
            Ok(Box::new(Zip::new(a, b)) as BoxAdvance<(T, U)>)
        })
    }

    /// Invokes `inspect` on each element as it flows through.
    pub fn on_each(self, inspect: impl Fn(&T) + 'static) -> Sequence<T> {
        let inspect = Rc::new(inspect);
        self.wrap(move |upstream| {
            let inspect = Rc::clone(&inspect);
            Box::new(Inspect::new(upstream, move |value: &T| (*inspect)(value)))
        })
    }

    /// Appends another sequence after this one is exhausted.
    pub fn chain(self, other: Sequence<T>) -> Sequence<T> {
        let left = self.factory;
        let right = other.factory;
        Sequence::from_factory(move || {
            let a = left()?;
            let b = right()?;
            Ok(Box::new(Concat::new(a, b)) as BoxAdvance<T>)
        })
    }

    /// Applies a stateful multi-to-multi transformation step.
    ///
    /// Each traversal owns a fresh gatherer state; the gatherer definition
    /// itself is shared across traversals.
    pub fn gather<G>(self, gatherer: G) -> Sequence<G::Out>
    where
        G: Gatherer<In = T> + 'static,
        G::State: 'static,
        G::Out: 'static,
    {
        let gatherer = Rc::new(gatherer);
        self.wrap(move |upstream| Box::new(Gathering::new(upstream, Rc::clone(&gatherer))))
    }
}

// ============================================================================
// Terminal operations
// ============================================================================

impl<T: 'static> Sequence<T> {
    /// Invokes `action` on every element.
    pub fn for_each(&self, mut action: impl FnMut(T)) -> Result<()> {
        let mut source = self.advance_source()?;
        source.for_each_remaining(&mut action);
        Ok(())
    }

    /// Counts the elements.
    pub fn count(&self) -> Result<usize> {
        let mut count = 0;
        self.for_each(|_| count += 1)?;
        Ok(count)
    }

    /// Folds the elements into `initial`.
    pub fn fold<R>(&self, initial: R, accumulate: impl FnMut(R, T) -> R) -> Result<R> {
        Ok(self.iter()?.fold(initial, accumulate))
    }

    /// Reduces the elements pairwise; errors on an empty sequence.
    pub fn reduce(&self, mut combine: impl FnMut(T, T) -> T) -> Result<T> {
        let mut iter = self.iter()?;
        let first = iter.next().ok_or_else(Error::empty_sequence)?;
        Ok(iter.fold(first, &mut combine))
    }

    /// The first element; errors on an empty sequence.
    pub fn first(&self) -> Result<T> {
        self.iter()?.next().ok_or_else(Error::empty_sequence)
    }

    /// The first element, or `None` on an empty sequence.
    pub fn first_or_none(&self) -> Result<Option<T>> {
        Ok(self.iter()?.next())
    }

    /// The last element; errors on an empty sequence.
    pub fn last(&self) -> Result<T> {
        let mut last = None;
        self.for_each(|value| last = Some(value))?;
        last.ok_or_else(Error::empty_sequence)
    }

    /// The only element; errors when empty or when more than one remains.
    pub fn single(&self) -> Result<T> {
        let mut iter = self.iter()?;
        let first = iter.next().ok_or_else(Error::empty_sequence)?;
        if iter.next().is_some() {
            return Err(Error::MoreThanOneElement);
        }
        Ok(first)
    }

    /// Whether any element matches; short-circuits on the first match.
    pub fn any(&self, mut predicate: impl FnMut(&T) -> bool) -> Result<bool> {
        Ok(self.iter()?.any(|value| predicate(&value)))
    }

    /// Whether every element matches; short-circuits on the first miss.
    pub fn all(&self, mut predicate: impl FnMut(&T) -> bool) -> Result<bool> {
        Ok(self.iter()?.all(|value| predicate(&value)))
    }

    /// Whether no element matches.
    pub fn none(&self, predicate: impl FnMut(&T) -> bool) -> Result<bool> {
        self.any(predicate).map(|found| !found)
    }

    /// Collects into a `Vec`, preserving encounter order.
    pub fn to_list(&self) -> Result<Vec<T>> {
        let mut out = Vec::new();
        self.for_each(|value| out.push(value))?;
        Ok(out)
    }

    /// Collects into a `HashSet`.
    pub fn to_set(&self) -> Result<HashSet<T>>
    where
        T: Eq + Hash,
    {
        let mut out = HashSet::new();
        self.for_each(|value| {
            out.insert(value);
        })?;
        Ok(out)
    }

    /// Collects into a map through a `(key, value)` projection. Later keys
    /// overwrite earlier ones.
    pub fn associate<K, V>(&self, mut entry_of: impl FnMut(T) -> (K, V)) -> Result<HashMap<K, V>>
    where
        K: Eq + Hash,
    {
        let mut out = HashMap::new();
        self.for_each(|value| {
            let (key, mapped) = entry_of(value);
            out.insert(key, mapped);
        })?;
        Ok(out)
    }

    /// Collects into a map keyed by `key_of`, keeping whole elements as
    /// values.
    pub fn associate_by<K>(&self, mut key_of: impl FnMut(&T) -> K) -> Result<HashMap<K, T>>
    where
        K: Eq + Hash,
    {
        self.associate(|value| {
            let key = key_of(&value);
            (key, value)
        })
    }

    /// Groups elements by key, preserving encounter order within groups.
    pub fn group_by<K>(&self, mut key_of: impl FnMut(&T) -> K) -> Result<HashMap<K, Vec<T>>>
    where
        K: Eq + Hash,
    {
        let mut out: HashMap<K, Vec<T>> = HashMap::new();
        self.for_each(|value| {
            out.entry(key_of(&value)).or_default().push(value);
        })?;
        Ok(out)
    }

    /// Joins the elements' `Display` forms with a separator.
    pub fn join_to_string(&self, separator: &str) -> Result<String>
    where
        T: Display,
    {
        let mut out = String::new();
        let mut first = true;
        self.for_each(|value| {
            if !first {
                out.push_str(separator);
            }
            first = false;
            out.push_str(&value.to_string());
        })?;
        Ok(out)
    }

    /// Drives a [`Reducer`] through one traversal.
    pub fn collect<R: Reducer<T>>(&self, reducer: &R) -> Result<R::Out> {
        let mut acc = reducer.supplier();
        self.for_each(|value| reducer.accumulate(&mut acc, value))?;
        Ok(reducer.finish(acc))
    }

    /// The maximum element under a comparator; errors on empty input.
    pub fn max_by(&self, mut compare: impl FnMut(&T, &T) -> Ordering) -> Result<T> {
        self.reduce(|best, value| {
            if compare(&value, &best) == Ordering::Greater {
                value
            } else {
                best
            }
        })
    }

    /// The minimum element under a comparator; errors on empty input.
    pub fn min_by(&self, mut compare: impl FnMut(&T, &T) -> Ordering) -> Result<T> {
        self.reduce(|best, value| {
            if compare(&value, &best) == Ordering::Less {
                value
            } else {
                best
            }
        })
    }

    /// Sorts by natural order into a new restartable sequence.
    ///
    /// Terminal with respect to laziness: the upstream is fully drained
    /// into a buffer, sorted with the stable adaptive merge sort, and the
    /// result presented as a fresh restartable sequence.
    pub fn sorted(&self) -> Result<Sequence<T>>
    where
        T: Ord + Clone,
    {
        self.sorted_by(Ord::cmp)
    }

    /// Sorts by a comparator into a new restartable sequence.
    ///
    /// The sort is stable: equal-key elements keep their original relative
    /// order.
    pub fn sorted_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Result<Sequence<T>>
    where
        T: Clone,
    {
        let mut buffer = self.to_list()?;
        sort::sort_by(&mut buffer, compare);
        Ok(Sequence::of(buffer))
    }
}

impl<T: Clone + 'static> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sequence::of(iter.into_iter().collect::<Vec<T>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_is_lazy() {
        let touched = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&touched);
        let seq = Sequence::of([1, 2, 3])
            .on_each(move |_| *seen.borrow_mut() += 1)
            .map(|n| n * 2)
            .filter(|n| n > &2);
        assert_eq!(*touched.borrow(), 0);
        assert_eq!(seq.to_list().unwrap(), vec![4, 6]);
        assert_eq!(*touched.borrow(), 3);
    }

    #[test]
    fn test_restartable_sequence_repeats_exactly() {
        let seq = Sequence::of([3, 1, 2]).map(|n| n + 1);
        assert_eq!(seq.to_list().unwrap(), seq.to_list().unwrap());
    }

    #[test]
    fn test_single_pass_errors_on_second_traversal() {
        let seq = Sequence::single_pass(vec!["a", "b"].into_iter());
        assert_eq!(seq.to_list().unwrap(), vec!["a", "b"]);
        assert_eq!(seq.to_list().unwrap_err(), Error::AlreadyConsumed);
        // never partial data, always the error
        assert_eq!(seq.count().unwrap_err(), Error::AlreadyConsumed);
    }

    #[test]
    fn test_single_pass_consumed_through_derived_chain() {
        let seq = Sequence::single_pass(0..5).map(|n| n * n);
        assert_eq!(seq.to_list().unwrap(), vec![0, 1, 4, 9, 16]);
        assert_eq!(seq.to_list().unwrap_err(), Error::AlreadyConsumed);
    }

    #[test]
    fn test_generate_take_while_inclusive() {
        let values = Sequence::generate(0u32, |n| n + 1)
            .take_while_inclusive(|n| *n != 100)
            .to_list()
            .unwrap();
        assert_eq!(values.len(), 101);
        assert_eq!(values.last(), Some(&100));
    }

    #[test]
    fn test_take_zero_is_empty_without_pulling() {
        let seq = Sequence::generate(0u64, |_| panic!("successor must not run"));
        assert_eq!(seq.take(0).count().unwrap(), 0);
    }

    #[test]
    fn test_flat_map_flattens_in_order() {
        let values = Sequence::of([1, 3])
            .flat_map(|n| vec![n, n + 1])
            .to_list()
            .unwrap();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_filter_partition_property() {
        let seq = Sequence::of((0..20).collect::<Vec<i32>>());
        let even = seq.clone().filter(|n| n % 2 == 0).count().unwrap();
        let odd = seq.clone().filter_not(|n| n % 2 == 0).count().unwrap();
        assert_eq!(even + odd, seq.count().unwrap());
    }

    #[test]
    fn test_windowed_window_count() {
        let windows = Sequence::of((1..=9).collect::<Vec<i32>>())
            .windowed(3)
            .to_list()
            .unwrap();
        assert_eq!(windows.len(), 7);
        assert_eq!(windows.first(), Some(&vec![1, 2, 3]));
        assert_eq!(windows.last(), Some(&vec![7, 8, 9]));
    }

    #[test]
    fn test_chunked_includes_trailing_partial() {
        let chunks = Sequence::of((1..=7).collect::<Vec<i32>>())
            .chunked(3)
            .to_list()
            .unwrap();
        assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    }

    #[test]
    fn test_zip_with_next_pairs() {
        let pairs = Sequence::of([1, 2, 3]).zip_with_next().to_list().unwrap();
        assert_eq!(pairs, vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn test_distinct() {
        let values = Sequence::of([1, 2, 2, 3, 1]).distinct().to_list().unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_terminal_lookups() {
        let seq = Sequence::of([5, 6, 7]);
        assert_eq!(seq.first().unwrap(), 5);
        assert_eq!(seq.last().unwrap(), 7);
        assert_eq!(seq.clone().skip(1).take(1).single().unwrap(), 6);
        assert_eq!(seq.single().unwrap_err(), Error::MoreThanOneElement);
        assert!(matches!(
            Sequence::<i32>::empty().first(),
            Err(Error::NoSuchElement(_))
        ));
    }

    #[test]
    fn test_fold_and_reduce() {
        let seq = Sequence::of([1, 2, 3, 4]);
        assert_eq!(seq.fold(0, |acc, n| acc + n).unwrap(), 10);
        assert_eq!(seq.reduce(|a, b| a * b).unwrap(), 24);
    }

    #[test]
    fn test_group_by_and_associate() {
        let groups = Sequence::of(["apple", "avocado", "banana"])
            .group_by(|s| s.as_bytes()[0])
            .unwrap();
        assert_eq!(groups[&b'a'], vec!["apple", "avocado"]);
        assert_eq!(groups[&b'b'], vec!["banana"]);

        let by_len = Sequence::of(["to", "tree"]).associate_by(|s| s.len()).unwrap();
        assert_eq!(by_len[&2], "to");
        assert_eq!(by_len[&4], "tree");
    }

    #[test]
    fn test_join_to_string() {
        let joined = Sequence::of([1, 2, 3]).join_to_string(", ").unwrap();
        assert_eq!(joined, "1, 2, 3");
    }

    #[test]
    fn test_sorted_is_stable_and_idempotent() {
        let seq = Sequence::of([(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')]);
        let once = seq.sorted_by(|a, b| a.0.cmp(&b.0)).unwrap();
        let sorted = once.to_list().unwrap();
        assert_eq!(sorted, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
        let twice = once.sorted_by(|a, b| a.0.cmp(&b.0)).unwrap();
        assert_eq!(twice.to_list().unwrap(), sorted);
        // the sorted result is restartable even when the origin was not
        assert_eq!(once.to_list().unwrap(), sorted);
    }

    #[test]
    fn test_chain_and_zip() {
        let chained = Sequence::of([1, 2]).chain(Sequence::of([3])).to_list().unwrap();
        assert_eq!(chained, vec![1, 2, 3]);

        let zipped = Sequence::of([1, 2, 3])
            .zip(Sequence::of(["one", "two"]))
            .to_list()
            .unwrap();
        assert_eq!(zipped, vec![(1, "one"), (2, "two")]);
    }

    #[test]
    #[should_panic(expected = "window size must be greater than 0")]
    fn test_windowed_zero_size_panics_before_traversal() {
        let _ = Sequence::of([1, 2, 3]).windowed(0);
    }
}
