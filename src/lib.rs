//! # lazyseq
//!
//! Fluent, lazily-evaluated data-processing pipelines ("sequences") built on a
//! minimal pull-based advance protocol.
//!
//! A [`Sequence`](seq::sequence::Sequence) is a *factory* of cursors, not a
//! materialized collection: constructing one performs no element processing,
//! and arbitrarily long chains of intermediate operations (`map`, `filter`,
//! `windowed`, ...) stay cheap because a terminal operation walks the whole
//! chain in a single fused pull loop.
//!
//! ## Architecture
//!
//! The crate is organized in two layers:
//!
//! 1. **Foundation layer**: the advance protocol, error handling, and the
//!    stable adaptive merge sort.
//! 2. **Sequence layer**: the generic sequence engine, its iterator
//!    combinators, the numeric element-kind engine with its `i32`/`i64`/`f64`
//!    facades, the stateful gatherer protocol, progressions and ranges,
//!    reducers and running statistics.
//!
//! ## Example
//!
//! ```
//! use lazyseq::prelude::*;
//!
//! let windows = Sequence::of([1, 2, 3, 4, 5])
//!     .filter(|n| n % 2 == 1)
//!     .windowed(2)
//!     .to_list()
//!     .unwrap();
//!
//! assert_eq!(windows, vec![vec![1, 3], vec![3, 5]]);
//! ```

#![warn(clippy::all, missing_docs, rustdoc::broken_intra_doc_links)]
#![allow(clippy::module_name_repetitions, clippy::missing_panics_doc)]

// Foundation layer modules
pub mod foundation {
    //! Foundation layer providing the advance protocol, errors and sorting.

    pub mod advance;
    pub mod error;
    pub mod sort;
}

// Sequence layer modules
pub mod seq {
    //! The sequence engine and its operation vocabulary.

    pub mod gatherers;
    pub mod iterators;
    pub mod numeric;
    pub mod ranges;
    pub mod reducers;
    pub mod sequence;
    pub mod statistics;
}

// Re-exports for convenience
pub mod prelude {
    //! Common imports for users of the library.

    pub use crate::foundation::{
        advance::{Advance, AdvanceIterator, BoxAdvance},
        error::{Error, Result},
    };
    pub use crate::seq::{
        gatherers::{self, Downstream, Gatherer},
        numeric::{DoubleSequence, Element, IntSequence, LongSequence, NumSequence},
        ranges::{DoubleRange, IntRange, LongRange, Progression, Range},
        reducers::{self, Reducer},
        sequence::Sequence,
        statistics::Statistics,
    };
}

// Version information
/// The version of the lazyseq library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The minimum supported Rust version.
pub const MSRV: &str = "1.70.0";
