//! The advance protocol: the minimal contract all iteration is built on.
//!
//! Everything in this crate iterates through a single operation,
//! [`Advance::try_advance`]: try to produce the next element, hand it to a
//! callback, and report whether anything was produced. "Has next" and "get
//! next" are fused into one call, which removes the classic pull-iterator
//! bug class where the two diverge. Terminal operations drive the fused
//! loop either directly ([`Advance::for_each_remaining`]) or through the
//! [`AdvanceIterator`] adapter, which buffers at most one look-ahead
//! element to present a standard [`Iterator`] face.

use crate::foundation::error::{Error, Result};

/// A stateful cursor over an upstream producer.
///
/// Once a source signals exhaustion (returns `false`) it must keep
/// signaling exhaustion on every subsequent call without invoking the
/// consumer; there is no resurrection.
pub trait Advance {
    /// The type of element this source produces.
    type Item;

    /// Attempts to produce the next element, handing it to `consumer`.
    ///
    /// Returns `true` if an element was produced. Calling this after
    /// exhaustion is safe and returns `false` without invoking `consumer`.
    fn try_advance(&mut self, consumer: &mut dyn FnMut(Self::Item)) -> bool;

    /// Repeatedly advances until exhaustion.
    ///
    /// This is the single fused iteration loop used by every terminal
    /// operation.
    fn for_each_remaining(&mut self, consumer: &mut dyn FnMut(Self::Item)) {
        while self.try_advance(consumer) {}
    }

    /// Pulls one element into an owned slot, or `None` at exhaustion.
    fn next_value(&mut self) -> Option<Self::Item> {
        let mut slot = None;
        self.try_advance(&mut |value| slot = Some(value));
        slot
    }
}

/// A boxed advance source, the currency of sequence chains.
pub type BoxAdvance<T> = Box<dyn Advance<Item = T>>;

impl<A: Advance + ?Sized> Advance for Box<A> {
    type Item = A::Item;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(Self::Item)) -> bool {
        (**self).try_advance(consumer)
    }
}

/// Adapts any [`Iterator`] to the advance protocol.
///
/// The iterator is fused on construction so exhaustion stays permanent even
/// for iterators that would otherwise resurrect.
#[derive(Debug)]
pub struct SourceIter<I: Iterator> {
    iter: core::iter::Fuse<I>,
}

impl<I: Iterator> SourceIter<I> {
    /// Wraps `iter` as an advance source.
    pub fn new(iter: I) -> Self {
        Self { iter: iter.fuse() }
    }
}

impl<I: Iterator> Advance for SourceIter<I> {
    type Item = I::Item;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(Self::Item)) -> bool {
        match self.iter.next() {
            Some(value) => {
                consumer(value);
                true
            }
            None => false,
        }
    }
}

/// A restartable advance source over shared, clonable element storage.
#[derive(Debug)]
pub struct VecSource<T> {
    data: std::rc::Rc<Vec<T>>,
    position: usize,
}

impl<T> VecSource<T> {
    /// Creates a cursor over `data` starting at the first element.
    pub fn new(data: std::rc::Rc<Vec<T>>) -> Self {
        Self { data, position: 0 }
    }
}

impl<T: Clone> Advance for VecSource<T> {
    type Item = T;

    fn try_advance(&mut self, consumer: &mut dyn FnMut(T)) -> bool {
        match self.data.get(self.position) {
            Some(value) => {
                self.position += 1;
                consumer(value.clone());
                true
            }
            None => false,
        }
    }
}

/// A push-style iterator over an advance source.
///
/// Buffers at most one look-ahead element: [`AdvanceIterator::has_next`]
/// pulls an element into the buffer, `next` drains it. Use
/// [`AdvanceIterator::next_element`] when pulling past exhaustion should be
/// an error rather than `None`.
#[derive(Debug)]
pub struct AdvanceIterator<A: Advance> {
    source: A,
    lookahead: Option<A::Item>,
}

impl<A: Advance> AdvanceIterator<A> {
    /// Wraps `source` in the one-slot look-ahead adapter.
    pub fn new(source: A) -> Self {
        Self {
            source,
            lookahead: None,
        }
    }

    /// Returns whether another element is available, buffering it if so.
    pub fn has_next(&mut self) -> bool {
        if self.lookahead.is_none() {
            self.lookahead = self.source.next_value();
        }
        self.lookahead.is_some()
    }

    /// Returns the next element, or [`Error::NoSuchElement`] past exhaustion.
    pub fn next_element(&mut self) -> Result<A::Item> {
        self.next()
            .ok_or_else(|| Error::NoSuchElement("pulled past exhaustion".to_string()))
    }
}

impl<A: Advance> Iterator for AdvanceIterator<A> {
    type Item = A::Item;

    fn next(&mut self) -> Option<Self::Item> {
        match self.lookahead.take() {
            Some(value) => Some(value),
            None => self.source.next_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_advance_fuses_has_next_and_get_next() {
        let mut source = SourceIter::new([1, 2].into_iter());
        let mut seen = Vec::new();
        assert!(source.try_advance(&mut |v| seen.push(v)));
        assert!(source.try_advance(&mut |v| seen.push(v)));
        assert!(!source.try_advance(&mut |v| seen.push(v)));
        // exhaustion is idempotent
        assert!(!source.try_advance(&mut |v| seen.push(v)));
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_for_each_remaining_drains() {
        let mut source = SourceIter::new(0..5);
        let mut sum = 0;
        source.for_each_remaining(&mut |v| sum += v);
        assert_eq!(sum, 10);
        assert!(source.next_value().is_none());
    }

    #[test]
    fn test_advance_iterator_lookahead() {
        let mut iter = AdvanceIterator::new(SourceIter::new([10, 20].into_iter()));
        assert!(iter.has_next());
        assert!(iter.has_next()); // buffering is idempotent
        assert_eq!(iter.next(), Some(10));
        assert_eq!(iter.next_element().unwrap(), 20);
        assert!(!iter.has_next());
        assert!(matches!(
            iter.next_element(),
            Err(Error::NoSuchElement(_))
        ));
    }

    #[test]
    fn test_vec_source_restarts_from_shared_storage() {
        let data = std::rc::Rc::new(vec![1, 2, 3]);
        let drain = |mut s: VecSource<i32>| {
            let mut out = Vec::new();
            s.for_each_remaining(&mut |v| out.push(v));
            out
        };
        assert_eq!(drain(VecSource::new(std::rc::Rc::clone(&data))), vec![1, 2, 3]);
        assert_eq!(drain(VecSource::new(data)), vec![1, 2, 3]);
    }
}
