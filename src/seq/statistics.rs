//! Running statistics over primitive elements.
//!
//! [`Statistics`] is a single-pass accumulator: count, native-width sum,
//! min/max under the kind's total order, and mean / population variance /
//! population standard deviation computed from Kahan-compensated running
//! sums. Compensation keeps the floating error of long summations near one
//! ulp; a plain uncompensated sum is kept alongside as the fallback for
//! non-finite inputs, where the compensated path degenerates to NaN.
//!
//! States are mergeable: [`Statistics::combine`] is associative, so
//! statistics gathered over split inputs equal statistics gathered over
//! the concatenation.

use core::cmp::Ordering;
use core::fmt;

use crate::seq::numeric::Element;

/// A mutable statistics accumulator for one primitive element kind.
#[derive(Debug, Clone)]
pub struct Statistics<T: Element> {
    count: u64,
    sum: T,
    min: T,
    max: T,
    simple_sum: f64,
    compensated_sum: f64,
    sum_compensation: f64,
    simple_sum_of_squares: f64,
    compensated_sum_of_squares: f64,
    sum_of_squares_compensation: f64,
}

/// One Kahan step: adds `value` into `sum`, tracking the lost low-order
/// bits in `compensation`.
fn compensated_add(sum: &mut f64, compensation: &mut f64, value: f64) {
    let adjusted = value - *compensation;
    let next = *sum + adjusted;
    *compensation = (next - *sum) - adjusted;
    *sum = next;
}

impl<T: Element> Statistics<T> {
    /// An empty accumulator: zero count, identity min/max.
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: T::ZERO,
            min: T::MIN_IDENTITY,
            max: T::MAX_IDENTITY,
            simple_sum: 0.0,
            compensated_sum: 0.0,
            sum_compensation: 0.0,
            simple_sum_of_squares: 0.0,
            compensated_sum_of_squares: 0.0,
            sum_of_squares_compensation: 0.0,
        }
    }

    /// Records one value.
    pub fn accept(&mut self, value: T) {
        // The first value seeds min and max directly. Comparing it against
        // the identities would lose values the total order places above
        // MIN_IDENTITY (a NaN input must become the minimum of a NaN-only
        // accumulator, not leave it at infinity).
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            if value.total_cmp(self.min) == Ordering::Less {
                self.min = value;
            }
            if value.total_cmp(self.max) == Ordering::Greater {
                self.max = value;
            }
        }
        self.count += 1;
        self.sum = self.sum.add_wrapping(value);
        let wide = value.to_f64();
        self.simple_sum += wide;
        compensated_add(&mut self.compensated_sum, &mut self.sum_compensation, wide);
        self.simple_sum_of_squares += wide * wide;
        compensated_add(
            &mut self.compensated_sum_of_squares,
            &mut self.sum_of_squares_compensation,
            wide * wide,
        );
    }

    /// Merges another accumulator into this one.
    ///
    /// Associative: combining split inputs in any grouping yields the same
    /// statistics as one pass over the concatenation.
    pub fn combine(mut self, other: Self) -> Self {
        // Identity min/max of an empty side must not win the comparison;
        // a non-empty side's extrema are taken wholesale instead.
        if self.count == 0 {
            self.min = other.min;
            self.max = other.max;
        } else if other.count > 0 {
            if other.min.total_cmp(self.min) == Ordering::Less {
                self.min = other.min;
            }
            if other.max.total_cmp(self.max) == Ordering::Greater {
                self.max = other.max;
            }
        }
        self.count += other.count;
        self.sum = self.sum.add_wrapping(other.sum);
        self.simple_sum += other.simple_sum;
        compensated_add(
            &mut self.compensated_sum,
            &mut self.sum_compensation,
            other.compensated_sum,
        );
        compensated_add(
            &mut self.compensated_sum,
            &mut self.sum_compensation,
            other.sum_compensation,
        );
        self.simple_sum_of_squares += other.simple_sum_of_squares;
        compensated_add(
            &mut self.compensated_sum_of_squares,
            &mut self.sum_of_squares_compensation,
            other.compensated_sum_of_squares,
        );
        compensated_add(
            &mut self.compensated_sum_of_squares,
            &mut self.sum_of_squares_compensation,
            other.sum_of_squares_compensation,
        );
        self
    }

    /// The number of recorded values.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The sum in the native width (wrapping for integer kinds).
    pub fn sum(&self) -> T {
        self.sum
    }

    /// The smallest recorded value, or [`Element::MIN_IDENTITY`] when
    /// empty.
    pub fn min(&self) -> T {
        self.min
    }

    /// The largest recorded value, or [`Element::MAX_IDENTITY`] when empty.
    pub fn max(&self) -> T {
        self.max
    }

    /// The compensated `f64` sum, falling back to the uncompensated sum
    /// when non-finite inputs poison the compensation.
    pub fn f64_sum(&self) -> f64 {
        let total = self.compensated_sum + self.sum_compensation;
        if total.is_nan() && self.simple_sum.is_infinite() {
            self.simple_sum
        } else {
            total
        }
    }

    fn f64_sum_of_squares(&self) -> f64 {
        let total = self.compensated_sum_of_squares + self.sum_of_squares_compensation;
        if total.is_nan() && self.simple_sum_of_squares.is_infinite() {
            self.simple_sum_of_squares
        } else {
            total
        }
    }

    /// The arithmetic mean, or `0.0` when empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.f64_sum() / self.count as f64
        }
    }

    /// The population variance, or `0.0` when empty.
    ///
    /// Computed as `E[x^2] - E[x]^2` over the compensated sums, clamped at
    /// zero against negative rounding residue.
    #[allow(clippy::cast_precision_loss)]
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.average();
        let mean_of_squares = self.f64_sum_of_squares() / self.count as f64;
        f64::max(mean_of_squares - mean * mean, 0.0)
    }

    /// The population standard deviation, or `0.0` when empty.
    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }
}

impl<T: Element> Default for Statistics<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> fmt::Display for Statistics<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Statistics{{count={}, sum={}, min={}, average={:.6}, max={}, stdDev={:.6}}}",
            self.count,
            self.sum,
            self.min,
            self.average(),
            self.max,
            self.standard_deviation()
        )
    }
}
