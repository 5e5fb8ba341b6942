//! The gatherer protocol: user-defined stateful intermediate operations.
//!
//! A [`Gatherer`] generalizes one-in/one-out transformation steps to
//! many-in/many-out: each input element may push zero or more output
//! elements downstream, state persists across elements within a traversal,
//! and the integrator can halt the traversal early by returning `false`.
//! A finisher runs exactly once at end of input (or after a halt) and may
//! flush buffered state.
//!
//! Gatherers are sequential by default. Declaring a combiner (see
//! [`GathererImpl::combinable`]) marks the state as mergeable; everything
//! else fails fast with [`Error::CombineUnsupported`] instead of silently
//! producing a wrong merge.

use std::collections::VecDeque;

use crate::foundation::error::{Error, Result};
use crate::seq::numeric::Element;
use crate::seq::statistics::Statistics;

/// The receiving side of a gatherer: where integrators and finishers push
/// their output.
pub trait Downstream {
    /// The element type this downstream accepts.
    type Item;

    /// Offers one element downstream. Returns `false` once the downstream
    /// wants no more elements.
    fn push(&mut self, element: Self::Item) -> bool;

    /// Whether this downstream has stopped accepting elements.
    ///
    /// Integrators that buffer elements without pushing one per input
    /// (windowing, folding) consult this to halt instead of accumulating
    /// toward a downstream that will never take the output.
    fn is_rejecting(&self) -> bool {
        false
    }
}

/// A stateful multi-to-multi transformation step.
///
/// The contract mirrors the three-phase shape of a traversal: `initializer`
/// produces a fresh state per traversal, `integrate` is called once per
/// upstream element and returns `false` to stop pulling, and `finish`
/// consumes the state exactly once at the end.
pub trait Gatherer {
    /// Upstream element type.
    type In;
    /// Per-traversal mutable state.
    type State;
    /// Downstream element type.
    type Out;

    /// Produces a fresh state for one traversal.
    fn initializer(&self) -> Self::State;

    /// Integrates one element, pushing any resulting output downstream.
    ///
    /// Returning `false` halts the traversal; no further elements are
    /// pulled from upstream, but the finisher still runs.
    fn integrate(
        &self,
        state: &mut Self::State,
        element: Self::In,
        downstream: &mut dyn Downstream<Item = Self::Out>,
    ) -> bool;

    /// Consumes the final state, flushing any remaining output. The default
    /// emits nothing.
    fn finish(&self, state: Self::State, downstream: &mut dyn Downstream<Item = Self::Out>) {
        let _ = (state, downstream);
    }

    /// Merges two partial states.
    ///
    /// Sequential-only gatherers declare nothing and inherit this default,
    /// which fails fast rather than guessing at a merge.
    fn combine(&self, left: Self::State, right: Self::State) -> Result<Self::State> {
        let _ = (left, right);
        Err(Error::CombineUnsupported(
            "sequential-only gatherer declares no combiner".to_string(),
        ))
    }
}

// ============================================================================
// Closure-built gatherers
// ============================================================================

type Integrator<In, State, Out> =
    Box<dyn Fn(&mut State, In, &mut dyn Downstream<Item = Out>) -> bool>;
type Finisher<State, Out> = Box<dyn Fn(State, &mut dyn Downstream<Item = Out>)>;

/// A [`Gatherer`] assembled from closures.
pub struct GathererImpl<In, State, Out> {
    initializer: Box<dyn Fn() -> State>,
    integrator: Integrator<In, State, Out>,
    finisher: Option<Finisher<State, Out>>,
    combiner: Option<Box<dyn Fn(State, State) -> State>>,
}

impl<In, Out> GathererImpl<In, (), Out> {
    /// A stateless sequential gatherer from a bare integrator.
    pub fn of_sequential(
        integrator: impl Fn(In, &mut dyn Downstream<Item = Out>) -> bool + 'static,
    ) -> Self {
        GathererImpl::stateful(|| (), move |_: &mut (), element, downstream| {
            integrator(element, downstream)
        })
    }
}

impl<In, State, Out> GathererImpl<In, State, Out> {
    /// A sequential gatherer with per-traversal state.
    pub fn stateful(
        initializer: impl Fn() -> State + 'static,
        integrator: impl Fn(&mut State, In, &mut dyn Downstream<Item = Out>) -> bool + 'static,
    ) -> Self {
        Self {
            initializer: Box::new(initializer),
            integrator: Box::new(integrator),
            finisher: None,
            combiner: None,
        }
    }

    /// A sequential gatherer with state and an end-of-input finisher.
    pub fn stateful_with_finisher(
        initializer: impl Fn() -> State + 'static,
        integrator: impl Fn(&mut State, In, &mut dyn Downstream<Item = Out>) -> bool + 'static,
        finisher: impl Fn(State, &mut dyn Downstream<Item = Out>) + 'static,
    ) -> Self {
        Self {
            finisher: Some(Box::new(finisher)),
            ..Self::stateful(initializer, integrator)
        }
    }

    /// Declares a state combiner, making this gatherer's partial states
    /// mergeable.
    pub fn combinable(mut self, combiner: impl Fn(State, State) -> State + 'static) -> Self {
        self.combiner = Some(Box::new(combiner));
        self
    }
}

impl<In, State, Out> Gatherer for GathererImpl<In, State, Out> {
    type In = In;
    type State = State;
    type Out = Out;

    fn initializer(&self) -> State {
        (self.initializer)()
    }

    fn integrate(
        &self,
        state: &mut State,
        element: In,
        downstream: &mut dyn Downstream<Item = Out>,
    ) -> bool {
        (self.integrator)(state, element, downstream)
    }

    fn finish(&self, state: State, downstream: &mut dyn Downstream<Item = Out>) {
        if let Some(finisher) = &self.finisher {
            finisher(state, downstream);
        }
    }

    fn combine(&self, left: State, right: State) -> Result<State> {
        match &self.combiner {
            Some(combiner) => Ok(combiner(left, right)),
            None => Err(Error::CombineUnsupported(
                "sequential-only gatherer declares no combiner".to_string(),
            )),
        }
    }
}

// ============================================================================
// Built-in gatherers
// ============================================================================

/// Groups elements into non-overlapping windows of `size`; the trailing
/// partial window is emitted by the finisher.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn window_fixed<T: 'static>(size: usize) -> GathererImpl<T, Vec<T>, Vec<T>> {
    assert!(size > 0, "window size must be greater than 0");
    GathererImpl::stateful_with_finisher(
        Vec::new,
        move |buffer: &mut Vec<T>, element, downstream| {
            if downstream.is_rejecting() {
                return false;
            }
            buffer.push(element);
            if buffer.len() == size {
                downstream.push(std::mem::take(buffer))
            } else {
                true
            }
        },
        |buffer, downstream| {
            if !buffer.is_empty() {
                downstream.push(buffer);
            }
        },
    )
}

/// Per-traversal state of [`window_sliding`].
pub struct SlidingState<T> {
    buffer: VecDeque<T>,
    emitted_full_window: bool,
}

/// Emits every full sliding window of `size` consecutive elements. When the
/// whole input is shorter than `size`, a single window holding all elements
/// is emitted at the end.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn window_sliding<T>(size: usize) -> GathererImpl<T, SlidingState<T>, Vec<T>>
where
    T: Clone + 'static,
{
    assert!(size > 0, "window size must be greater than 0");
    GathererImpl::stateful_with_finisher(
        || SlidingState {
            buffer: VecDeque::new(),
            emitted_full_window: false,
        },
        move |state: &mut SlidingState<T>, element, downstream| {
            if downstream.is_rejecting() {
                return false;
            }
            state.buffer.push_back(element);
            if state.buffer.len() == size {
                state.emitted_full_window = true;
                let window: Vec<T> = state.buffer.iter().cloned().collect();
                state.buffer.pop_front();
                downstream.push(window)
            } else {
                true
            }
        },
        |state, downstream| {
            if !state.emitted_full_window && !state.buffer.is_empty() {
                downstream.push(state.buffer.into_iter().collect());
            }
        },
    )
}

/// Emits the running accumulation after each element (a lazy prefix fold).
pub fn scan<T, R>(
    initial: R,
    accumulate: impl Fn(&R, T) -> R + 'static,
) -> GathererImpl<T, R, R>
where
    R: Clone + 'static,
{
    GathererImpl::stateful(
        move || initial.clone(),
        move |state: &mut R, element, downstream| {
            *state = accumulate(state, element);
            downstream.push(state.clone())
        },
    )
}

/// Folds the whole input and emits the single result at end of input.
pub fn fold_gatherer<T, R>(
    initial: R,
    accumulate: impl Fn(R, T) -> R + 'static,
) -> GathererImpl<T, Option<R>, R>
where
    R: Clone + 'static,
{
    GathererImpl::stateful_with_finisher(
        move || Some(initial.clone()),
        move |state: &mut Option<R>, element, downstream| {
            if downstream.is_rejecting() {
                return false;
            }
            // `accumulate` takes the accumulator by value; the slot is
            // always refilled before returning.
            if let Some(acc) = state.take() {
                *state = Some(accumulate(acc, element));
            }
            true
        },
        |state, downstream| {
            if let Some(acc) = state {
                downstream.push(acc);
            }
        },
    )
}

/// A one-to-one mapping expressed as a gatherer.
pub fn map_gatherer<T, R>(transform: impl Fn(T) -> R + 'static) -> GathererImpl<T, (), R> {
    GathererImpl::of_sequential(move |element, downstream| downstream.push(transform(element)))
}

/// Emits elements while the predicate holds, plus the first failing one,
/// then halts the traversal.
pub fn take_while_inclusive<T>(
    predicate: impl Fn(&T) -> bool + 'static,
) -> GathererImpl<T, (), T> {
    GathererImpl::of_sequential(move |element, downstream| {
        let keep_going = predicate(&element);
        downstream.push(element);
        keep_going
    })
}

/// Emits a running statistics snapshot after each element.
///
/// This gatherer declares a combiner, so partial states from split inputs
/// merge with [`Statistics::combine`].
pub fn running_statistics<T: Element>() -> GathererImpl<T, Statistics<T>, Statistics<T>> {
    GathererImpl::stateful(Statistics::new, |stats: &mut Statistics<T>, element, downstream| {
        stats.accept(element);
        downstream.push(stats.clone())
    })
    .combinable(Statistics::combine)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CollectSink<T> {
        out: Vec<T>,
    }

    impl<T> Downstream for CollectSink<T> {
        type Item = T;

        fn push(&mut self, element: T) -> bool {
            self.out.push(element);
            true
        }
    }

    fn run<G: Gatherer>(gatherer: &G, input: Vec<G::In>) -> Vec<G::Out> {
        let mut sink = CollectSink { out: Vec::new() };
        let mut state = gatherer.initializer();
        for element in input {
            if !gatherer.integrate(&mut state, element, &mut sink) {
                break;
            }
        }
        gatherer.finish(state, &mut sink);
        sink.out
    }

    #[test]
    fn test_window_fixed_emits_trailing_partial() {
        let windows = run(&window_fixed(3), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(windows, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    }

    #[test]
    fn test_window_sliding_full_windows() {
        let windows = run(&window_sliding(3), vec![1, 2, 3, 4]);
        assert_eq!(windows, vec![vec![1, 2, 3], vec![2, 3, 4]]);
    }

    #[test]
    fn test_window_sliding_short_input_emits_single_window() {
        let windows = run(&window_sliding(5), vec![1, 2]);
        assert_eq!(windows, vec![vec![1, 2]]);
    }

    #[test]
    fn test_scan_emits_prefix_sums() {
        let sums = run(&scan(0, |acc, n: i32| acc + n), vec![1, 2, 3, 4]);
        assert_eq!(sums, vec![1, 3, 6, 10]);
    }

    #[test]
    fn test_fold_gatherer_emits_once_at_end() {
        let folded = run(&fold_gatherer(1, |acc, n: i32| acc * n), vec![2, 3, 4]);
        assert_eq!(folded, vec![24]);
        assert_eq!(run(&fold_gatherer(7, |acc, n: i32| acc + n), vec![]), vec![7]);
    }

    #[test]
    fn test_take_while_inclusive_halts_after_failing_element() {
        let gatherer = take_while_inclusive(|n: &i32| *n < 3);
        let mut sink = CollectSink { out: Vec::new() };
        let mut state = gatherer.initializer();
        assert!(gatherer.integrate(&mut state, 1, &mut sink));
        assert!(gatherer.integrate(&mut state, 2, &mut sink));
        assert!(!gatherer.integrate(&mut state, 3, &mut sink));
        assert_eq!(sink.out, vec![1, 2, 3]);
    }

    struct LimitedSink<T> {
        out: Vec<T>,
        capacity: usize,
    }

    impl<T> Downstream for LimitedSink<T> {
        type Item = T;

        fn push(&mut self, element: T) -> bool {
            if self.is_rejecting() {
                return false;
            }
            self.out.push(element);
            !self.is_rejecting()
        }

        fn is_rejecting(&self) -> bool {
            self.out.len() >= self.capacity
        }
    }

    #[test]
    fn test_buffering_integrators_halt_on_rejecting_downstream() {
        let gatherer = window_fixed(2);
        let mut sink = LimitedSink {
            out: Vec::new(),
            capacity: 1,
        };
        let mut state = gatherer.initializer();
        assert!(gatherer.integrate(&mut state, 1, &mut sink));
        // second element completes the window; pushing it fills the sink
        assert!(!gatherer.integrate(&mut state, 2, &mut sink));
        // sink now rejects: the integrator must refuse without buffering
        assert!(!gatherer.integrate(&mut state, 3, &mut sink));
        assert_eq!(sink.out, vec![vec![1, 2]]);
        assert!(state.is_empty());

        let fold = fold_gatherer(0, |acc, n: i32| acc + n);
        let mut full = LimitedSink {
            out: Vec::new(),
            capacity: 0,
        };
        assert!(!fold.integrate(&mut fold.initializer(), 1, &mut full));
    }

    #[test]
    fn test_sequential_gatherer_refuses_combine() {
        let gatherer = map_gatherer(|n: i32| n + 1);
        assert!(matches!(
            gatherer.combine((), ()),
            Err(Error::CombineUnsupported(_))
        ));
    }

    #[test]
    fn test_combinable_gatherer_merges_states() {
        let gatherer = running_statistics::<i64>();
        let mut sink = CollectSink { out: Vec::new() };
        let mut left = gatherer.initializer();
        let mut right = gatherer.initializer();
        gatherer.integrate(&mut left, 1, &mut sink);
        gatherer.integrate(&mut left, 2, &mut sink);
        gatherer.integrate(&mut right, 3, &mut sink);
        let merged = gatherer.combine(left, right).unwrap();
        assert_eq!(merged.count(), 3);
        assert_eq!(merged.sum(), 6);
    }
}
