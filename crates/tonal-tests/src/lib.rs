//! Integration tests for tonal crates.
//!
//! This crate contains cross-crate tests that check the color kernels
//! against their grayscale counterparts and the invariants shared by all
//! operations.
