//! lagen testing utilities
//!
//! Golden file comparison for generated headers.

pub mod golden;

pub use golden::GoldenTest;
