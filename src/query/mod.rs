//! Pattern queries over a graph
//!
//! Queries never hand out borrowed iterators into the store: results are
//! owned vectors, so a pass can match first and mutate afterwards.

mod pattern;

pub use pattern::TriplePattern;
