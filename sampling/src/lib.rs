//! Reproducible randomness for tests and benches.

pub mod source;
