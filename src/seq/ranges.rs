//! Arithmetic progressions and ranges over primitive elements.
//!
//! A [`Progression`] is the immutable triple (start, inclusive bound,
//! step); iterating it emits `start`, `start + step`, ... while the value
//! stays on the bound's side. A [`Range`] owns a progression and adds
//! containment and emptiness queries that are answered from the bounds
//! alone, without any traversal. Both hand actual iteration to
//! [`NumSequence`], so the whole combinator vocabulary is available on
//! top of a range.

use core::cmp::Ordering;
use core::fmt;

use crate::foundation::advance::{Advance, BoxAdvance};
use crate::seq::numeric::{Element, NumSequence};
use crate::seq::sequence::Sequence;

/// An arithmetic sequence definition: start, inclusive bound, step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progression<T: Element> {
    start: T,
    end_inclusive: T,
    step: T,
}

impl<T: Element> Progression<T> {
    /// A progression from `start` through `end_inclusive` by `step`.
    ///
    /// # Panics
    ///
    /// Panics for a zero step, or for a step whose negation is not
    /// representable (the integer minimum, a floating NaN).
    pub fn closed(start: T, end_inclusive: T, step: T) -> Self {
        assert!(
            step.total_cmp(T::ZERO) != Ordering::Equal,
            "progression step must not be zero"
        );
        assert!(
            step.checked_neg().is_some(),
            "progression step must have a representable negation"
        );
        Self {
            start,
            end_inclusive,
            step,
        }
    }

    /// The first value, emitted only when the progression is non-empty.
    pub fn start(&self) -> T {
        self.start
    }

    /// The inclusive bound.
    pub fn end_inclusive(&self) -> T {
        self.end_inclusive
    }

    /// The step.
    pub fn step(&self) -> T {
        self.step
    }

    /// Whether no value lies between start and bound in the step's
    /// direction. Answered from the bounds alone.
    pub fn is_empty(&self) -> bool {
        if self.step.is_positive() {
            self.start.total_cmp(self.end_inclusive) == Ordering::Greater
        } else {
            self.start.total_cmp(self.end_inclusive) == Ordering::Less
        }
    }

    /// A restartable primitive sequence over this progression.
    pub fn sequence(&self) -> NumSequence<T> {
        let progression = *self;
        Sequence::from_factory(move || {
            Ok(Box::new(ProgressionSource::new(progression)) as BoxAdvance<T>)
        })
        .into_numeric()
    }
}

impl<T: Element> fmt::Display for Progression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={} step {}", self.start, self.end_inclusive, self.step)
    }
}

/// The progression emission state machine.
struct ProgressionSource<T: Element> {
    next: T,
    end_inclusive: T,
    step: T,
    ascending: bool,
    done: bool,
}

impl<T: Element> ProgressionSource<T> {
    fn new(progression: Progression<T>) -> Self {
        Self {
            next: progression.start,
            end_inclusive: progression.end_inclusive,
            step: progression.step,
            ascending: progression.step.is_positive(),
            done: false,
        }
    }
}

impl<T: Element> Advance for ProgressionSource<T> {
    type Item = T;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(T)) -> bool {
        if self.done {
            return false;
        }
        let within = match self.next.total_cmp(self.end_inclusive) {
            Ordering::Equal => true,
            Ordering::Less => self.ascending,
            Ordering::Greater => !self.ascending,
        };
        if !within {
            self.done = true;
            return false;
        }
        let value = self.next;
        let candidate = value.add_wrapping(self.step);
        // A candidate that fails to move in the step's direction means the
        // arithmetic wrapped (integer kinds) or stalled at the precision
        // limit (floating point): the progression ends after this value.
        let moved = match candidate.total_cmp(value) {
            Ordering::Greater => self.ascending,
            Ordering::Less => !self.ascending,
            Ordering::Equal => false,
        };
        if moved {
            self.next = candidate;
        } else {
            self.done = true;
        }
        consumer(value);
        true
    }
}

/// A progression plus containment and emptiness queries.
///
/// A range owns its progression (composition, not specialization): the
/// traversal behavior is delegated, the query behavior lives here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<T: Element> {
    progression: Progression<T>,
}

/// Range of `i32` with unit step.
pub type IntRange = Range<i32>;
/// Range of `i64` with unit step.
pub type LongRange = Range<i64>;
/// Range of `f64`; usually built with an explicit step.
pub type DoubleRange = Range<f64>;

impl<T: Element> Range<T> {
    /// The range from `start` through `end_inclusive` with unit step.
    pub fn closed(start: T, end_inclusive: T) -> Self {
        Self::closed_step(start, end_inclusive, T::UNIT)
    }

    /// The range from `start` through `end_inclusive` with an explicit
    /// step.
    ///
    /// # Panics
    ///
    /// Panics under the same step conditions as [`Progression::closed`].
    pub fn closed_step(start: T, end_inclusive: T, step: T) -> Self {
        Self {
            progression: Progression::closed(start, end_inclusive, step),
        }
    }

    /// The underlying progression.
    pub fn progression(&self) -> &Progression<T> {
        &self.progression
    }

    /// The first value.
    pub fn start(&self) -> T {
        self.progression.start()
    }

    /// The inclusive bound.
    pub fn end_inclusive(&self) -> T {
        self.progression.end_inclusive()
    }

    /// Whether `value` lies between the bounds, ignoring the step grid.
    /// Answered from the bounds alone.
    pub fn contains(&self, value: T) -> bool {
        let (low, high) = if self.progression.step().is_positive() {
            (self.start(), self.end_inclusive())
        } else {
            (self.end_inclusive(), self.start())
        };
        value.total_cmp(low) != Ordering::Less && value.total_cmp(high) != Ordering::Greater
    }

    /// Whether the range holds no values.
    pub fn is_empty(&self) -> bool {
        self.progression.is_empty()
    }

    /// Whether the range holds at least one value.
    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// A restartable primitive sequence over this range.
    pub fn sequence(&self) -> NumSequence<T> {
        self.progression.sequence()
    }
}

impl<T: Element> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.progression.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_range_basics() {
        let range = IntRange::closed(1, 10);
        assert_eq!(range.sequence().count().unwrap(), 10);
        assert_eq!(range.sequence().sum().unwrap(), 55);
        assert!(range.contains(1));
        assert!(range.contains(10));
        assert!(!range.contains(0));
        assert!(range.is_not_empty());
    }

    #[test]
    fn test_range_is_restartable() {
        let seq = IntRange::closed(1, 5).sequence();
        assert_eq!(seq.to_list().unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(seq.to_list().unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_when_start_past_bound() {
        let range = IntRange::closed(5, 1);
        assert!(range.is_empty());
        assert_eq!(range.sequence().count().unwrap(), 0);
        assert!(!range.contains(3));
    }

    #[test]
    fn test_descending_progression() {
        let values = Progression::closed(10i32, 1, -3).sequence().to_list().unwrap();
        assert_eq!(values, vec![10, 7, 4, 1]);
    }

    #[test]
    fn test_progression_stops_at_integer_boundary() {
        let values = Progression::closed(i32::MAX - 1, i32::MAX, 1)
            .sequence()
            .to_list()
            .unwrap();
        assert_eq!(values, vec![i32::MAX - 1, i32::MAX]);
    }

    #[test]
    #[should_panic(expected = "progression step must not be zero")]
    fn test_zero_step_panics() {
        let _ = Progression::closed(0i64, 10, 0);
    }

    #[test]
    #[should_panic(expected = "representable negation")]
    fn test_min_step_panics() {
        let _ = Progression::closed(0i32, 10, i32::MIN);
    }

    #[test]
    fn test_double_range_hundredth_steps() {
        let stats = DoubleRange::closed_step(0.0, 100.0, 0.01)
            .sequence()
            .stats()
            .unwrap();
        assert_eq!(stats.count(), 10_000);
        assert!((stats.average() - 49.995).abs() < 1e-6);
        assert!((stats.max() - 99.99).abs() < 1e-6);
        assert_eq!(stats.min(), 0.0);
    }

    #[test]
    fn test_double_range_contains_off_grid_values() {
        let range = DoubleRange::closed_step(0.0, 1.0, 0.25);
        assert!(range.contains(0.15));
        assert!(!range.contains(1.01));
    }

    #[test]
    fn test_display() {
        assert_eq!(IntRange::closed(1, 5).to_string(), "1..=5 step 1");
        assert_eq!(
            Progression::closed(9i64, 0, -3).to_string(),
            "9..=0 step -3"
        );
    }
}
