//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod nvs;

// Re-export trait interfaces
pub use nvs::{NvsHandle, NvsInterface, OpenMode};
