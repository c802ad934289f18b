//! Typed key-value facade over the platform store
//!
//! See [`NvsStore`] for the operations. Values are dispatched through
//! [`nvs32_core::Value`], so integers and strings share one `create` /
//! `write` entry point.

mod store;

pub use store::{NvsStore, Result, TAG};
