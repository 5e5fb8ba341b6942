//! Error handling for lazyseq.
//!
//! Two of the three failure classes in this crate are values of [`Error`]:
//! state errors (pulling past exhaustion, restarting a consumed single-pass
//! sequence) and unsupported protocol operations (combining a
//! sequential-only gatherer). Configuration errors -- a non-positive window
//! size, a zero step -- are programming errors and panic synchronously at
//! the call that receives the bad argument, before any traversal begins.
//! Errors raised by user-supplied closures propagate unchanged as panics;
//! no operation swallows them.

use thiserror::Error;

/// The main error type for lazyseq operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A single-pass sequence was traversed a second time.
    #[error("sequence already consumed; single-pass sources support exactly one traversal")]
    AlreadyConsumed,

    /// A terminal operation required an element the sequence did not have.
    #[error("no such element: {0}")]
    NoSuchElement(String),

    /// `single` found a second element.
    #[error("sequence has more than one element")]
    MoreThanOneElement,

    /// Two partial gatherer states were combined, but the gatherer is
    /// sequential-only and declares no combiner.
    #[error("gatherer cannot be combined: {0}")]
    CombineUnsupported(String),
}

/// A specialized Result type for lazyseq operations.
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand for the empty-sequence case of [`Error::NoSuchElement`].
    pub fn empty_sequence() -> Self {
        Self::NoSuchElement("sequence contains no elements".to_string())
    }
}
