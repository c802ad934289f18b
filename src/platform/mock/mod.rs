//! Mock platform implementation for testing
//!
//! This module provides an in-memory key-value store that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled

#![cfg(any(test, feature = "mock"))]

mod nvs;

pub use nvs::{Faults, MockNvs, DEFAULT_PARTITION};
