//! Platform abstraction layer
//!
//! This module isolates everything that talks to a concrete key-value store.
//! The facade only sees [`NvsInterface`].

pub mod traits;

// Platform implementations (feature-gated)
#[cfg(feature = "esp32")]
pub mod esp32;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use nvs32_core::{EspCode, EspResult};
pub use traits::{NvsHandle, NvsInterface, OpenMode};
