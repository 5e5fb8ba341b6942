//! Primitive sequence specializations.
//!
//! One generic engine, [`NumSequence`], serves every primitive element
//! kind; the per-kind behavior lives in the [`Element`] trait (identities,
//! wrapping arithmetic, total ordering, distinct keys). [`IntSequence`],
//! [`LongSequence`] and [`DoubleSequence`] are facades over the same
//! engine, so an operation added here is available to all kinds at once.
//!
//! Boxing is an explicit boundary: [`NumSequence::boxed`] and
//! [`Sequence::into_numeric`] convert between the generic and primitive
//! worlds, and nothing converts implicitly mid-chain.

use core::cmp::Ordering;
use core::fmt::{Debug, Display};
use core::hash::Hash;

use crate::foundation::error::{Error, Result};
use crate::foundation::sort;
use crate::seq::sequence::Sequence;
use crate::seq::statistics::Statistics;

/// A primitive element kind.
///
/// Everything kind-specific about a primitive sequence is captured here:
/// the additive identities, the min/max identities used by running
/// statistics, wrapping addition, a total order (which is where `f64`'s
/// NaN handling lives), and the key used for `distinct`.
pub trait Element: Copy + PartialEq + Debug + Display + 'static {
    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity, also the default range step.
    const UNIT: Self;
    /// Identity for running minimum: greater than or equal to every value.
    const MIN_IDENTITY: Self;
    /// Identity for running maximum: less than or equal to every value.
    const MAX_IDENTITY: Self;

    /// The hashable key `distinct` deduplicates by.
    type Key: Eq + Hash + 'static;

    /// A total order over all values of the kind.
    ///
    /// For `f64` this is NOT IEEE partial order: NaN compares greater than
    /// everything (and equal to itself), and `-0.0` equals `+0.0`.
    fn total_cmp(self, other: Self) -> Ordering;

    /// Addition that wraps around on overflow for integer kinds; plain IEEE
    /// addition for floating point.
    fn add_wrapping(self, other: Self) -> Self;

    /// Negation, or `None` where negating would not produce a meaningful
    /// value (the integer minimum, a floating NaN).
    fn checked_neg(self) -> Option<Self>;

    /// Widens to `f64` for averaging and compensated summation.
    fn to_f64(self) -> f64;

    /// The deduplication key for this value, consistent with
    /// [`Element::total_cmp`] equality.
    fn distinct_key(self) -> Self::Key;

    /// Whether this value is strictly positive under the total order.
    fn is_positive(self) -> bool {
        self.total_cmp(Self::ZERO) == Ordering::Greater
    }
}

impl Element for i32 {
    const ZERO: Self = 0;
    const UNIT: Self = 1;
    const MIN_IDENTITY: Self = i32::MAX;
    const MAX_IDENTITY: Self = i32::MIN;

    type Key = i32;

    fn total_cmp(self, other: Self) -> Ordering {
        self.cmp(&other)
    }

    fn add_wrapping(self, other: Self) -> Self {
        self.wrapping_add(other)
    }

    fn checked_neg(self) -> Option<Self> {
        i32::checked_neg(self)
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn distinct_key(self) -> Self::Key {
        self
    }
}

impl Element for i64 {
    const ZERO: Self = 0;
    const UNIT: Self = 1;
    const MIN_IDENTITY: Self = i64::MAX;
    const MAX_IDENTITY: Self = i64::MIN;

    type Key = i64;

    fn total_cmp(self, other: Self) -> Ordering {
        self.cmp(&other)
    }

    fn add_wrapping(self, other: Self) -> Self {
        self.wrapping_add(other)
    }

    fn checked_neg(self) -> Option<Self> {
        i64::checked_neg(self)
    }

    #[allow(clippy::cast_precision_loss)]
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn distinct_key(self) -> Self::Key {
        self
    }
}

impl Element for f64 {
    const ZERO: Self = 0.0;
    const UNIT: Self = 1.0;
    const MIN_IDENTITY: Self = f64::INFINITY;
    const MAX_IDENTITY: Self = f64::NEG_INFINITY;

    type Key = u64;

    fn total_cmp(self, other: Self) -> Ordering {
        if self == other {
            // covers -0.0 == +0.0
            Ordering::Equal
        } else if self.is_nan() {
            if other.is_nan() {
                Ordering::Equal
            } else {
                Ordering::Greater
            }
        } else if other.is_nan() {
            Ordering::Less
        } else if self < other {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    fn add_wrapping(self, other: Self) -> Self {
        self + other
    }

    fn checked_neg(self) -> Option<Self> {
        if self.is_nan() {
            None
        } else {
            Some(-self)
        }
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn distinct_key(self) -> Self::Key {
        // Normalize so the key agrees with total_cmp equality: all NaN bit
        // patterns share one key, and -0.0 shares +0.0's key.
        if self.is_nan() {
            f64::NAN.to_bits()
        } else if self == 0.0 {
            0.0f64.to_bits()
        } else {
            self.to_bits()
        }
    }
}

/// A lazy sequence over one primitive element kind.
///
/// Same pull discipline as [`Sequence`], with primitive-typed closures and
/// the numeric terminal operations. Cloning shares the underlying
/// definition, like cloning a `Sequence`.
#[derive(Clone)]
pub struct NumSequence<T: Element> {
    inner: Sequence<T>,
}

/// Primitive sequence of `i32`.
pub type IntSequence = NumSequence<i32>;
/// Primitive sequence of `i64`.
pub type LongSequence = NumSequence<i64>;
/// Primitive sequence of `f64`.
pub type DoubleSequence = NumSequence<f64>;

impl<T: Element> Sequence<T> {
    /// Crosses the boxing boundary into the primitive world.
    pub fn into_numeric(self) -> NumSequence<T> {
        NumSequence { inner: self }
    }
}

impl<T: Element> NumSequence<T> {
    /// The empty primitive sequence.
    pub fn empty() -> Self {
        Sequence::empty().into_numeric()
    }

    /// A restartable primitive sequence over owned elements.
    pub fn of(items: impl Into<Vec<T>>) -> Self {
        Sequence::of(items).into_numeric()
    }

    /// An infinite primitive sequence: `seed`, `successor(seed)`, ...
    pub fn generate(seed: T, successor: impl Fn(&T) -> T + 'static) -> Self {
        Sequence::generate(seed, successor).into_numeric()
    }

    /// Crosses the boxing boundary back into the generic world.
    pub fn boxed(self) -> Sequence<T> {
        self.inner
    }

    // ------------------------------------------------------------------
    // Intermediate operations
    // ------------------------------------------------------------------

    /// Transforms every element within the kind.
    pub fn map(self, transform: impl Fn(T) -> T + 'static) -> Self {
        self.inner.map(transform).into_numeric()
    }

    /// Keeps elements matching the predicate.
    pub fn filter(self, predicate: impl Fn(T) -> bool + 'static) -> Self {
        self.inner.filter(move |value| predicate(*value)).into_numeric()
    }

    /// Drops elements matching the predicate.
    pub fn filter_not(self, predicate: impl Fn(T) -> bool + 'static) -> Self {
        self.inner
            .filter_not(move |value| predicate(*value))
            .into_numeric()
    }

    /// Keeps at most the first `count` elements.
    pub fn take(self, count: usize) -> Self {
        self.inner.take(count).into_numeric()
    }

    /// Discards the first `count` elements.
    pub fn skip(self, count: usize) -> Self {
        self.inner.skip(count).into_numeric()
    }

    /// Emits elements while the predicate holds.
    pub fn take_while(self, predicate: impl Fn(T) -> bool + 'static) -> Self {
        self.inner
            .take_while(move |value| predicate(*value))
            .into_numeric()
    }

    /// Emits elements while the predicate holds, plus the first failing one.
    pub fn take_while_inclusive(self, predicate: impl Fn(T) -> bool + 'static) -> Self {
        self.inner
            .take_while_inclusive(move |value| predicate(*value))
            .into_numeric()
    }

    /// Discards leading elements while the predicate holds.
    pub fn skip_while(self, predicate: impl Fn(T) -> bool + 'static) -> Self {
        self.inner
            .skip_while(move |value| predicate(*value))
            .into_numeric()
    }

    /// Removes duplicates under the kind's total-order equality (`-0.0`
    /// and `+0.0` are one value, all NaNs are one value).
    pub fn distinct(self) -> Self {
        self.inner
            .distinct_by(|value| value.distinct_key())
            .into_numeric()
    }

    /// Invokes `inspect` on each element as it flows through.
    pub fn on_each(self, inspect: impl Fn(T) + 'static) -> Self {
        self.inner.on_each(move |value| inspect(*value)).into_numeric()
    }

    /// Appends another primitive sequence of the same kind.
    pub fn chain(self, other: Self) -> Self {
        self.inner.chain(other.inner).into_numeric()
    }

    /// Sliding windows of `size` elements.
    pub fn windowed(self, size: usize) -> Sequence<Vec<T>> {
        self.inner.windowed(size)
    }

    /// Non-overlapping chunks of at most `size` elements.
    pub fn chunked(self, size: usize) -> Sequence<Vec<T>> {
        self.inner.chunked(size)
    }

    /// Pairs each element with its successor.
    pub fn zip_with_next(self) -> Sequence<(T, T)> {
        self.inner.zip_with_next()
    }

    // ------------------------------------------------------------------
    // Terminal operations
    // ------------------------------------------------------------------

    /// Counts the elements.
    pub fn count(&self) -> Result<usize> {
        self.inner.count()
    }

    /// Collects into a `Vec`.
    pub fn to_list(&self) -> Result<Vec<T>> {
        self.inner.to_list()
    }

    /// Invokes `action` on every element.
    pub fn for_each(&self, action: impl FnMut(T)) -> Result<()> {
        self.inner.for_each(action)
    }

    /// The first element; errors on an empty sequence.
    pub fn first(&self) -> Result<T> {
        self.inner.first()
    }

    /// The last element; errors on an empty sequence.
    pub fn last(&self) -> Result<T> {
        self.inner.last()
    }

    /// Whether any element matches.
    pub fn any(&self, mut predicate: impl FnMut(T) -> bool) -> Result<bool> {
        self.inner.any(move |value| predicate(*value))
    }

    /// Whether every element matches.
    pub fn all(&self, mut predicate: impl FnMut(T) -> bool) -> Result<bool> {
        self.inner.all(move |value| predicate(*value))
    }

    /// Whether no element matches.
    pub fn none(&self, mut predicate: impl FnMut(T) -> bool) -> Result<bool> {
        self.inner.none(move |value| predicate(*value))
    }

    /// Folds the elements into `initial`.
    pub fn fold<R>(&self, initial: R, accumulate: impl FnMut(R, T) -> R) -> Result<R> {
        self.inner.fold(initial, accumulate)
    }

    /// Reduces the elements pairwise; errors on an empty sequence.
    pub fn reduce(&self, combine: impl FnMut(T, T) -> T) -> Result<T> {
        self.inner.reduce(combine)
    }

    /// The sum of all elements. Integer kinds wrap around on overflow;
    /// floating point follows IEEE addition.
    pub fn sum(&self) -> Result<T> {
        self.fold(T::ZERO, T::add_wrapping)
    }

    /// The minimum under the kind's total order; errors on an empty
    /// sequence.
    pub fn min(&self) -> Result<T> {
        self.reduce(|best, value| {
            if value.total_cmp(best) == Ordering::Less {
                value
            } else {
                best
            }
        })
    }

    /// The maximum under the kind's total order; errors on an empty
    /// sequence.
    pub fn max(&self) -> Result<T> {
        self.reduce(|best, value| {
            if value.total_cmp(best) == Ordering::Greater {
                value
            } else {
                best
            }
        })
    }

    /// The arithmetic mean as `f64`; errors on an empty sequence.
    pub fn average(&self) -> Result<f64> {
        let stats = self.stats()?;
        if stats.count() == 0 {
            return Err(Error::empty_sequence());
        }
        Ok(stats.average())
    }

    /// Runs the whole sequence through a [`Statistics`] accumulator.
    pub fn stats(&self) -> Result<Statistics<T>> {
        let mut stats = Statistics::new();
        self.for_each(|value| stats.accept(value))?;
        Ok(stats)
    }

    /// Sorts ascending under the total order into a new restartable
    /// sequence.
    pub fn sorted(&self) -> Result<Self> {
        self.sorted_with(T::total_cmp)
    }

    /// Sorts descending under the total order into a new restartable
    /// sequence.
    pub fn descending(&self) -> Result<Self> {
        self.sorted_with(|a, b| T::total_cmp(b, a))
    }

    fn sorted_with(&self, compare: impl Fn(T, T) -> Ordering) -> Result<Self> {
        let mut buffer = self.to_list()?;
        sort::sort_by(&mut buffer, |a, b| compare(*a, *b));
        Ok(Self::of(buffer))
    }
}
