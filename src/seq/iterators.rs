//! Iterator combinators implementing the advance protocol.
//!
//! Each combinator wraps exactly one upstream advance source (two for
//! zip/concat) and implements [`Advance`] itself, so arbitrarily long
//! chains compose without materializing intermediate results. Every
//! `try_advance` pulls no more upstream elements than structurally
//! necessary to decide success or failure -- the laziness guarantee that
//! differentiates this design from eager collection-to-collection
//! transforms.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;
use std::rc::Rc;

use crate::foundation::advance::Advance;
use crate::seq::gatherers::{Downstream, Gatherer};

// ============================================================================
// Sources
// ============================================================================

/// Infinite generator: holds a current value and a successor function.
///
/// Every `try_advance` succeeds, emitting the current value and stepping
/// through the successor.
#[derive(Debug)]
pub struct Generator<T, F> {
    current: T,
    successor: F,
}

impl<T, F> Generator<T, F>
where
    F: FnMut(&T) -> T,
{
    /// Creates a generator starting at `seed`.
    pub fn new(seed: T, successor: F) -> Self {
        Self {
            current: seed,
            successor,
        }
    }
}

impl<T, F> Advance for Generator<T, F>
where
    F: FnMut(&T) -> T,
{
    type Item = T;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(T)) -> bool {
        let next = (self.successor)(&self.current);
        let value = core::mem::replace(&mut self.current, next);
        consumer(value);
        true
    }
}

// ============================================================================
// Stateless wrappers
// ============================================================================

/// Applies a mapping function to every upstream element.
#[derive(Debug)]
pub struct Mapping<A, F> {
    upstream: A,
    map: F,
}

impl<A, F> Mapping<A, F> {
    pub(crate) fn new(upstream: A, map: F) -> Self {
        Self { upstream, map }
    }
}

impl<A, R, F> Advance for Mapping<A, F>
where
    A: Advance,
    F: FnMut(A::Item) -> R,
{
    type Item = R;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(R)) -> bool {
        let Self { upstream, map } = self;
        upstream.try_advance(&mut |value| consumer(map(value)))
    }
}

/// Pulls upstream until the predicate accepts an element.
///
/// `send_when` selects between keep-matches (`true`, `filter`) and
/// drop-matches (`false`, `filter_not`) semantics.
#[derive(Debug)]
pub struct Filtering<A, P> {
    upstream: A,
    predicate: P,
    send_when: bool,
}

impl<A, P> Filtering<A, P> {
    pub(crate) fn new(upstream: A, predicate: P, send_when: bool) -> Self {
        Self {
            upstream,
            predicate,
            send_when,
        }
    }
}

impl<A, P> Advance for Filtering<A, P>
where
    A: Advance,
    P: FnMut(&A::Item) -> bool,
{
    type Item = A::Item;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(A::Item)) -> bool {
        while let Some(value) = self.upstream.next_value() {
            if (self.predicate)(&value) == self.send_when {
                consumer(value);
                return true;
            }
        }
        false
    }
}

/// Invokes an inspection callback on every element passing through.
#[derive(Debug)]
pub struct Inspect<A, F> {
    upstream: A,
    inspect: F,
}

impl<A, F> Inspect<A, F> {
    pub(crate) fn new(upstream: A, inspect: F) -> Self {
        Self { upstream, inspect }
    }
}

impl<A, F> Advance for Inspect<A, F>
where
    A: Advance,
    F: FnMut(&A::Item),
{
    type Item = A::Item;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(A::Item)) -> bool {
        let Self { upstream, inspect } = self;
        upstream.try_advance(&mut |value| {
            inspect(&value);
            consumer(value);
        })
    }
}

/// Flattens each upstream element into a sub-source, drained in order.
pub struct FlatMapping<A, F, R> {
    upstream: A,
    flatten: F,
    current: Option<crate::foundation::advance::BoxAdvance<R>>,
}

impl<A, F, R> FlatMapping<A, F, R> {
    pub(crate) fn new(upstream: A, flatten: F) -> Self {
        Self {
            upstream,
            flatten,
            current: None,
        }
    }
}

impl<A, F, R> Advance for FlatMapping<A, F, R>
where
    A: Advance,
    F: FnMut(A::Item) -> crate::foundation::advance::BoxAdvance<R>,
{
    type Item = R;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(R)) -> bool {
        loop {
            if let Some(inner) = &mut self.current {
                if inner.try_advance(consumer) {
                    return true;
                }
                self.current = None;
            }
            match self.upstream.next_value() {
                Some(value) => self.current = Some((self.flatten)(value)),
                None => return false,
            }
        }
    }
}

// ============================================================================
// Truncating wrappers
// ============================================================================

/// Passes through at most `remaining` elements.
///
/// With `remaining == 0` the upstream is never pulled.
#[derive(Debug)]
pub struct Take<A> {
    upstream: A,
    remaining: usize,
}

impl<A> Take<A> {
    pub(crate) fn new(upstream: A, count: usize) -> Self {
        Self {
            upstream,
            remaining: count,
        }
    }
}

impl<A: Advance> Advance for Take<A> {
    type Item = A::Item;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(A::Item)) -> bool {
        if self.remaining == 0 {
            return false;
        }
        if self.upstream.try_advance(consumer) {
            self.remaining -= 1;
            true
        } else {
            self.remaining = 0;
            false
        }
    }
}

/// Discards the first `to_skip` upstream elements, lazily on first pull.
#[derive(Debug)]
pub struct Skip<A> {
    upstream: A,
    to_skip: usize,
}

impl<A> Skip<A> {
    pub(crate) fn new(upstream: A, count: usize) -> Self {
        Self {
            upstream,
            to_skip: count,
        }
    }
}

impl<A: Advance> Advance for Skip<A> {
    type Item = A::Item;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(A::Item)) -> bool {
        while self.to_skip > 0 {
            self.to_skip -= 1;
            if self.upstream.next_value().is_none() {
                self.to_skip = 0;
                return false;
            }
        }
        self.upstream.try_advance(consumer)
    }
}

/// Emits elements while the predicate holds, then stays exhausted.
///
/// The inclusive variant still emits the first failing element before
/// exhausting -- useful for "up to and including the sentinel" scans.
#[derive(Debug)]
pub struct TakeWhile<A, P> {
    upstream: A,
    predicate: P,
    inclusive: bool,
    done: bool,
}

impl<A, P> TakeWhile<A, P> {
    pub(crate) fn new(upstream: A, predicate: P, inclusive: bool) -> Self {
        Self {
            upstream,
            predicate,
            inclusive,
            done: false,
        }
    }
}

impl<A, P> Advance for TakeWhile<A, P>
where
    A: Advance,
    P: FnMut(&A::Item) -> bool,
{
    type Item = A::Item;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(A::Item)) -> bool {
        if self.done {
            return false;
        }
        match self.upstream.next_value() {
            Some(value) => {
                if (self.predicate)(&value) {
                    consumer(value);
                    true
                } else if self.inclusive {
                    self.done = true;
                    consumer(value);
                    true
                } else {
                    self.done = true;
                    false
                }
            }
            None => {
                self.done = true;
                false
            }
        }
    }
}

/// Discards leading elements while the predicate holds.
#[derive(Debug)]
pub struct SkipWhile<A, P> {
    upstream: A,
    predicate: P,
    skipping: bool,
}

impl<A, P> SkipWhile<A, P> {
    pub(crate) fn new(upstream: A, predicate: P) -> Self {
        Self {
            upstream,
            predicate,
            skipping: true,
        }
    }
}

impl<A, P> Advance for SkipWhile<A, P>
where
    A: Advance,
    P: FnMut(&A::Item) -> bool,
{
    type Item = A::Item;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(A::Item)) -> bool {
        while self.skipping {
            match self.upstream.next_value() {
                Some(value) => {
                    if !(self.predicate)(&value) {
                        self.skipping = false;
                        consumer(value);
                        return true;
                    }
                }
                None => {
                    self.skipping = false;
                    return false;
                }
            }
        }
        self.upstream.try_advance(consumer)
    }
}

// ============================================================================
// Stateful wrappers
// ============================================================================

/// Filters duplicates by a caller-supplied key across the whole traversal.
///
/// Memory grows with the number of distinct keys seen: O(n) space.
#[derive(Debug)]
pub struct DistinctBy<A, K, F> {
    upstream: A,
    key_of: F,
    seen: HashSet<K>,
}

impl<A, K, F> DistinctBy<A, K, F>
where
    K: Eq + Hash,
{
    pub(crate) fn new(upstream: A, key_of: F) -> Self {
        Self {
            upstream,
            key_of,
            seen: HashSet::new(),
        }
    }
}

impl<A, K, F> Advance for DistinctBy<A, K, F>
where
    A: Advance,
    K: Eq + Hash,
    F: FnMut(&A::Item) -> K,
{
    type Item = A::Item;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(A::Item)) -> bool {
        while let Some(value) = self.upstream.next_value() {
            if self.seen.insert((self.key_of)(&value)) {
                consumer(value);
                return true;
            }
        }
        false
    }
}

/// Emits windows of `size` elements, starting every `step` elements.
///
/// With `step < size` the windows overlap and the buffer slides; with
/// `step >= size` the gap elements between windows are skipped ("chunked"
/// mode when `step == size`). A partial trailing window is emitted only
/// when `partial_windows` is set.
#[derive(Debug)]
pub struct Windowed<A: Advance> {
    upstream: A,
    size: usize,
    step: usize,
    partial_windows: bool,
    buffer: VecDeque<A::Item>,
    done: bool,
}

impl<A: Advance> Windowed<A> {
    /// # Panics
    ///
    /// Panics if `size` or `step` is zero.
    pub(crate) fn new(upstream: A, size: usize, step: usize, partial_windows: bool) -> Self {
        assert!(size > 0, "window size must be greater than 0");
        assert!(step > 0, "window step must be greater than 0");
        Self {
            upstream,
            size,
            step,
            partial_windows,
            buffer: VecDeque::with_capacity(size),
            done: false,
        }
    }
}

impl<A> Advance for Windowed<A>
where
    A: Advance,
    A::Item: Clone,
{
    type Item = Vec<A::Item>;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(Vec<A::Item>)) -> bool {
        if self.done {
            return false;
        }
        while self.buffer.len() < self.size {
            match self.upstream.next_value() {
                Some(value) => self.buffer.push_back(value),
                None => break,
            }
        }
        if self.buffer.len() == self.size {
            let window: Vec<A::Item> = self.buffer.iter().cloned().collect();
            if self.step >= self.size {
                self.buffer.clear();
                // gap between non-overlapping windows
                for _ in 0..self.step - self.size {
                    if self.upstream.next_value().is_none() {
                        break;
                    }
                }
            } else {
                for _ in 0..self.step {
                    self.buffer.pop_front();
                }
            }
            consumer(window);
            return true;
        }
        // Upstream exhausted with a partial buffer.
        if self.partial_windows && !self.buffer.is_empty() {
            let window: Vec<A::Item> = self.buffer.iter().cloned().collect();
            for _ in 0..usize::min(self.step, self.buffer.len()) {
                self.buffer.pop_front();
            }
            if self.buffer.is_empty() {
                self.done = true;
            }
            consumer(window);
            return true;
        }
        self.done = true;
        self.buffer.clear();
        false
    }
}

/// Emits each adjacent pair of upstream elements.
///
/// One element stays buffered between pulls, so an `n`-element upstream
/// yields exactly `n - 1` pairs.
#[derive(Debug)]
pub struct ZipWithNext<A: Advance> {
    upstream: A,
    previous: Option<A::Item>,
}

impl<A: Advance> ZipWithNext<A> {
    pub(crate) fn new(upstream: A) -> Self {
        Self {
            upstream,
            previous: None,
        }
    }
}

impl<A> Advance for ZipWithNext<A>
where
    A: Advance,
    A::Item: Clone,
{
    type Item = (A::Item, A::Item);

    fn try_advance(&mut self, consumer: &mut dyn FnMut((A::Item, A::Item))) -> bool {
        if self.previous.is_none() {
            self.previous = self.upstream.next_value();
        }
        let Some(previous) = self.previous.take() else {
            return false;
        };
        match self.upstream.next_value() {
            Some(next) => {
                self.previous = Some(next.clone());
                consumer((previous, next));
                true
            }
            None => false,
        }
    }
}

/// Pairs two upstreams element-wise, exhausting with the shorter one.
#[derive(Debug)]
pub struct Zip<A, B> {
    left: A,
    right: B,
}

impl<A, B> Zip<A, B> {
    pub(crate) fn new(left: A, right: B) -> Self {
        Self { left, right }
    }
}

impl<A: Advance, B: Advance> Advance for Zip<A, B> {
    type Item = (A::Item, B::Item);

    fn try_advance(&mut self, consumer: &mut dyn FnMut((A::Item, B::Item))) -> bool {
        match (self.left.next_value(), self.right.next_value()) {
            (Some(a), Some(b)) => {
                consumer((a, b));
                true
            }
            _ => false,
        }
    }
}

/// Exhausts the first source before pulling from the second.
#[derive(Debug)]
pub struct Concat<A, B> {
    first: A,
    second: B,
    on_first: bool,
}

impl<A, B> Concat<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            on_first: true,
        }
    }
}

impl<A, B> Advance for Concat<A, B>
where
    A: Advance,
    B: Advance<Item = A::Item>,
{
    type Item = A::Item;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(A::Item)) -> bool {
        if self.on_first {
            if self.first.try_advance(consumer) {
                return true;
            }
            self.on_first = false;
        }
        self.second.try_advance(consumer)
    }
}

// ============================================================================
// Gathering
// ============================================================================

/// Drives a [`Gatherer`] over the upstream.
///
/// Pushed output is buffered and drained one element per `try_advance`;
/// the finisher runs exactly once when the upstream is exhausted or the
/// integrator signals early termination, and each traversal owns a fresh
/// state instance.
pub struct Gathering<A: Advance, G: Gatherer<In = A::Item>> {
    upstream: A,
    gatherer: Rc<G>,
    state: Option<G::State>,
    output: VecDeque<G::Out>,
    halted: bool,
    finished: bool,
}

impl<A, G> Gathering<A, G>
where
    A: Advance,
    G: Gatherer<In = A::Item>,
{
    pub(crate) fn new(upstream: A, gatherer: Rc<G>) -> Self {
        let state = gatherer.initializer();
        Self {
            upstream,
            gatherer,
            state: Some(state),
            output: VecDeque::new(),
            halted: false,
            finished: false,
        }
    }
}

/// The internal downstream sink: buffers pushed elements and never rejects,
/// since backpressure inside a chain comes from the pull side.
struct BufferSink<'a, T> {
    buffer: &'a mut VecDeque<T>,
}

impl<T> Downstream for BufferSink<'_, T> {
    type Item = T;

    fn push(&mut self, element: T) -> bool {
        self.buffer.push_back(element);
        true
    }
}

impl<A, G> Advance for Gathering<A, G>
where
    A: Advance,
    G: Gatherer<In = A::Item>,
{
    type Item = G::Out;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(G::Out)) -> bool {
        loop {
            if let Some(value) = self.output.pop_front() {
                consumer(value);
                return true;
            }
            if self.finished {
                return false;
            }
            if !self.halted {
                if let Some(element) = self.upstream.next_value() {
                    if let Some(state) = self.state.as_mut() {
                        let mut sink = BufferSink {
                            buffer: &mut self.output,
                        };
                        if !self.gatherer.integrate(state, element, &mut sink) {
                            self.halted = true;
                        }
                    }
                    continue;
                }
            }
            // End of input (or integrator refusal): run the finisher once.
            self.finished = true;
            if let Some(state) = self.state.take() {
                let mut sink = BufferSink {
                    buffer: &mut self.output,
                };
                self.gatherer.finish(state, &mut sink);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::advance::SourceIter;

    fn drain<A: Advance>(mut source: A) -> Vec<A::Item> {
        let mut out = Vec::new();
        source.for_each_remaining(&mut |v| out.push(v));
        out
    }

    #[test]
    fn test_generator_is_infinite() {
        let mut generator = Generator::new(0, |n| n + 1);
        let mut seen = Vec::new();
        for _ in 0..5 {
            assert!(generator.try_advance(&mut |v| seen.push(v)));
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_filtering_inclusion_flag() {
        let kept = drain(Filtering::new(
            SourceIter::new(1..=6),
            |n: &i32| n % 2 == 0,
            true,
        ));
        assert_eq!(kept, vec![2, 4, 6]);

        let dropped = drain(Filtering::new(
            SourceIter::new(1..=6),
            |n: &i32| n % 2 == 0,
            false,
        ));
        assert_eq!(dropped, vec![1, 3, 5]);
    }

    #[test]
    fn test_take_zero_never_pulls_upstream() {
        let mut pulled = false;
        let upstream = Inspect::new(SourceIter::new(0..10), |_: &i32| pulled = true);
        let mut take = Take::new(upstream, 0);
        assert!(!take.try_advance(&mut |_| {}));
        drop(take);
        assert!(!pulled);
    }

    #[test]
    fn test_take_while_inclusive_emits_failing_element() {
        let values = drain(TakeWhile::new(
            SourceIter::new(0..10),
            |n: &i32| *n < 3,
            true,
        ));
        assert_eq!(values, vec![0, 1, 2, 3]);

        let values = drain(TakeWhile::new(
            SourceIter::new(0..10),
            |n: &i32| *n < 3,
            false,
        ));
        assert_eq!(values, vec![0, 1, 2]);
    }

    #[test]
    fn test_take_while_stays_exhausted() {
        let mut tw = TakeWhile::new(SourceIter::new([1, 5, 2].into_iter()), |n: &i32| *n < 3, false);
        assert!(tw.try_advance(&mut |_| {}));
        assert!(!tw.try_advance(&mut |_| {}));
        // 2 would satisfy the predicate again; exhaustion must be permanent
        assert!(!tw.try_advance(&mut |_| {}));
    }

    #[test]
    fn test_skip_while() {
        let values = drain(SkipWhile::new(SourceIter::new([1, 2, 5, 1, 2].into_iter()), |n: &i32| {
            *n < 3
        }));
        assert_eq!(values, vec![5, 1, 2]);
    }

    #[test]
    fn test_distinct_by_keeps_first_occurrence() {
        let values = drain(DistinctBy::new(
            SourceIter::new([1, 2, 1, 3, 2, 4].into_iter()),
            |n: &i32| *n,
        ));
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_windowed_sliding() {
        let windows = drain(Windowed::new(SourceIter::new(1..=5), 3, 1, false));
        assert_eq!(windows, vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);
    }

    #[test]
    fn test_windowed_step_with_gap() {
        let windows = drain(Windowed::new(SourceIter::new(1..=9), 3, 5, true));
        assert_eq!(windows, vec![vec![1, 2, 3], vec![6, 7, 8]]);
    }

    #[test]
    fn test_windowed_partial_trailing() {
        let windows = drain(Windowed::new(SourceIter::new(1..=4), 3, 2, true));
        assert_eq!(windows, vec![vec![1, 2, 3], vec![3, 4]]);

        let windows = drain(Windowed::new(SourceIter::new(1..=4), 3, 2, false));
        assert_eq!(windows, vec![vec![1, 2, 3]]);
    }

    #[test]
    #[should_panic(expected = "window size must be greater than 0")]
    fn test_windowed_rejects_zero_size() {
        let _ = Windowed::new(SourceIter::new(0..3), 0, 1, false);
    }

    #[test]
    fn test_zip_with_next_pair_count() {
        let pairs = drain(ZipWithNext::new(SourceIter::new(1..=4)));
        assert_eq!(pairs, vec![(1, 2), (2, 3), (3, 4)]);

        let none: Vec<(i32, i32)> = drain(ZipWithNext::new(SourceIter::new(7..8)));
        assert!(none.is_empty());
    }

    #[test]
    fn test_concat_exhausts_first_before_second() {
        let values = drain(Concat::new(SourceIter::new(1..=2), SourceIter::new(10..=12)));
        assert_eq!(values, vec![1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_zip_stops_at_shorter() {
        let pairs = drain(Zip::new(SourceIter::new(1..=3), SourceIter::new('a'..='z')));
        assert_eq!(pairs, vec![(1, 'a'), (2, 'b'), (3, 'c')]);
    }
}
