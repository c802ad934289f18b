#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! nvs32 - Typed facade over the ESP32 non-volatile key-value store
//!
//! Binds one namespace of one flash partition and exposes create / write /
//! read for strings and 32-bit integers, committing every mutation and
//! logging every failure with its raw platform code.

// Platform abstraction layer: store primitives and their backends
pub mod platform;

// Logging infrastructure
pub mod core;

// Store facade
pub mod nvs;

// Build-time defaults
pub mod config;

pub use nvs::NvsStore;
pub use nvs32_core::{
    ConfigError, EspCode, Key, KeyError, NvsError, Operation, StoreConfig, Value, ValueType,
};
