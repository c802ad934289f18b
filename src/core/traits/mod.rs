//! Synchronization traits used by the logging layer.
//!
//! # Features
//!
//! - **`embassy`**: enables `EmbassyState<T>`
//! - `LocalState<T>` is always available

pub mod sync;

pub use sync::{LocalState, SharedState};

#[cfg(feature = "embassy")]
pub use sync::EmbassyState;
