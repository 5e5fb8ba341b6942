//! Reducers: reusable terminal accumulation recipes.
//!
//! A [`Reducer`] bundles the four parts of a mutable reduction: a supplier
//! for a fresh accumulator, an accumulation step, a combiner for merging
//! two partial accumulators, and a finisher mapping the accumulator to the
//! result. [`Sequence::collect`](crate::seq::sequence::Sequence::collect)
//! drives any reducer through one traversal; the same reducer value can be
//! reused across sequences since every run gets a fresh accumulator.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

use crate::seq::numeric::Element;
use crate::seq::statistics::Statistics;

/// A mutable reduction recipe.
pub trait Reducer<T> {
    /// The mutable accumulator type.
    type Acc;
    /// The finished result type.
    type Out;

    /// A fresh accumulator for one reduction run.
    fn supplier(&self) -> Self::Acc;

    /// Folds one element into the accumulator.
    fn accumulate(&self, acc: &mut Self::Acc, element: T);

    /// Merges two partial accumulators.
    fn combine(&self, left: Self::Acc, right: Self::Acc) -> Self::Acc;

    /// Maps the accumulator to the final result.
    fn finish(&self, acc: Self::Acc) -> Self::Out;
}

/// A [`Reducer`] assembled from closures; see [`of`].
pub struct FnReducer<T, Acc, Out> {
    supplier: Box<dyn Fn() -> Acc>,
    accumulator: Box<dyn Fn(&mut Acc, T)>,
    combiner: Box<dyn Fn(Acc, Acc) -> Acc>,
    finisher: Box<dyn Fn(Acc) -> Out>,
}

/// Builds a reducer from its four parts.
pub fn of<T, Acc, Out>(
    supplier: impl Fn() -> Acc + 'static,
    accumulator: impl Fn(&mut Acc, T) + 'static,
    combiner: impl Fn(Acc, Acc) -> Acc + 'static,
    finisher: impl Fn(Acc) -> Out + 'static,
) -> FnReducer<T, Acc, Out> {
    FnReducer {
        supplier: Box::new(supplier),
        accumulator: Box::new(accumulator),
        combiner: Box::new(combiner),
        finisher: Box::new(finisher),
    }
}

impl<T, Acc, Out> Reducer<T> for FnReducer<T, Acc, Out> {
    type Acc = Acc;
    type Out = Out;

    fn supplier(&self) -> Acc {
        (self.supplier)()
    }

    fn accumulate(&self, acc: &mut Acc, element: T) {
        (self.accumulator)(acc, element);
    }

    fn combine(&self, left: Acc, right: Acc) -> Acc {
        (self.combiner)(left, right)
    }

    fn finish(&self, acc: Acc) -> Out {
        (self.finisher)(acc)
    }
}

/// Collects into a `Vec`, preserving encounter order.
pub fn to_list<T: 'static>() -> FnReducer<T, Vec<T>, Vec<T>> {
    of(
        Vec::new,
        |acc: &mut Vec<T>, element| acc.push(element),
        |mut left, mut right| {
            left.append(&mut right);
            left
        },
        |acc| acc,
    )
}

/// Collects into a `HashSet`.
pub fn to_set<T>() -> FnReducer<T, HashSet<T>, HashSet<T>>
where
    T: Eq + Hash + 'static,
{
    of(
        HashSet::new,
        |acc: &mut HashSet<T>, element| {
            acc.insert(element);
        },
        |mut left, right| {
            left.extend(right);
            left
        },
        |acc| acc,
    )
}

/// Counts the elements.
pub fn counting<T: 'static>() -> FnReducer<T, u64, u64> {
    of(|| 0, |acc, _element| *acc += 1, |left, right| left + right, |acc| acc)
}

/// Joins the elements' `Display` forms with a separator.
pub fn joining<T>(separator: impl Into<String>) -> FnReducer<T, Vec<String>, String>
where
    T: Display + 'static,
{
    let separator = separator.into();
    of(
        Vec::new,
        |acc: &mut Vec<String>, element: T| acc.push(element.to_string()),
        |mut left, mut right| {
            left.append(&mut right);
            left
        },
        move |acc| acc.join(&separator),
    )
}

/// Groups whole elements by key, preserving encounter order within groups.
pub fn grouping_by<T, K>(
    key_of: impl Fn(&T) -> K + 'static,
) -> FnReducer<T, HashMap<K, Vec<T>>, HashMap<K, Vec<T>>>
where
    K: Eq + Hash + 'static,
    T: 'static,
{
    of(
        HashMap::new,
        move |acc: &mut HashMap<K, Vec<T>>, element| {
            acc.entry(key_of(&element)).or_default().push(element);
        },
        |mut left, right| {
            for (key, mut values) in right {
                left.entry(key).or_default().append(&mut values);
            }
            left
        },
        |acc| acc,
    )
}

/// Accumulates running statistics over a primitive element kind.
pub fn statistics<T: Element>() -> FnReducer<T, Statistics<T>, Statistics<T>> {
    of(
        Statistics::new,
        |acc: &mut Statistics<T>, element| acc.accept(element),
        Statistics::combine,
        |acc| acc,
    )
}
