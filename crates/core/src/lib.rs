//! nvs32_core - Pure no_std types for the nvs32 store facade
//!
//! This crate contains the platform-agnostic pieces of the facade
//! that can be tested on host without any feature flags.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Platform codes as data**: raw store error numbers travel as [`EspCode`]
//!
//! # Modules
//!
//! - [`code`]: Raw platform error codes and their classification
//! - [`key`]: Validated key and namespace names
//! - [`value`]: Tagged value type for typed create/write dispatch
//! - [`error`]: Facade error taxonomy
//! - [`config`]: Store binding configuration (partition, namespace, debug)

#![no_std]

pub mod code;
pub mod config;
pub mod error;
pub mod key;
pub mod value;

pub use code::{EspCode, EspResult};
pub use config::{ConfigError, StoreConfig, PARTITION_NAME_MAX};
pub use error::{NvsError, Operation};
pub use key::{Key, KeyError, KEY_NAME_MAX};
pub use value::{Value, ValueType, MAX_STR_LEN};
