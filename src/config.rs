//! Build-time store configuration
//!
//! `build.rs` bakes `NVS_PARTITION`, `NVS_NAMESPACE` and `NVS_DEBUG` from the
//! build environment into the binary. Unset variables fall back to
//! `nvs`, `storage` and `true`.

use nvs32_core::{ConfigError, StoreConfig};

/// Partition label baked in at build time
pub const PARTITION: &str = env!("NVS_PARTITION");

/// Namespace baked in at build time
pub const NAMESPACE: &str = env!("NVS_NAMESPACE");

/// Raw debug flag baked in at build time
pub const DEBUG: &str = env!("NVS_DEBUG");

/// Interpret a flag value the way the build environment spells it
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim(),
        "1" | "true" | "TRUE" | "True" | "yes" | "on"
    )
}

/// Store configuration from the build-time defaults
///
/// # Errors
///
/// Returns [`ConfigError`] if the baked-in partition or namespace is not a
/// valid name.
pub fn default_config() -> Result<StoreConfig, ConfigError> {
    Ok(StoreConfig::new(PARTITION, NAMESPACE)?.with_debug(parse_flag(DEBUG)))
}
