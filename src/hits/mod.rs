//! Hit cursor module
//!
//! Flattens a [`PageSequence`](crate::pagination::PageSequence) into a single
//! sequence of hits with a position counter that runs across page boundaries.

mod sequence;

pub use sequence::{HitSequence, Hits};
