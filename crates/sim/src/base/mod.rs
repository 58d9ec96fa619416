//! Base types for allele-state representation.
//!
//! This module provides the foundational types for representing binary
//! wild/crop allele states and fixed-length allele sequences.

mod allele;
mod sequence;

pub use allele::Allele;
pub use sequence::AlleleSequence;
