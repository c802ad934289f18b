//! Store binding configuration
//!
//! A store handle is bound to one (partition, namespace) pair at init time.
//! The debug flag decides whether successful mutations produce info lines.

use crate::key::{validate_name, KeyError, KEY_NAME_MAX};
use core::fmt;
use heapless::String;

/// Maximum partition label length (ESP-IDF partition table limit)
pub const PARTITION_NAME_MAX: usize = 16;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Partition label rejected
    InvalidPartition(KeyError),
    /// Namespace name rejected
    InvalidNamespace(KeyError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPartition(e) => write!(f, "invalid partition label: {}", e),
            ConfigError::InvalidNamespace(e) => write!(f, "invalid namespace: {}", e),
        }
    }
}

/// Store binding: partition label, namespace and debug flag
///
/// # Example
///
/// ```
/// use nvs32_core::StoreConfig;
///
/// let config = StoreConfig::new("nvs", "app").unwrap().with_debug(false);
/// assert_eq!(config.partition(), "nvs");
/// assert_eq!(config.namespace(), "app");
/// assert!(!config.debug());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    partition: String<PARTITION_NAME_MAX>,
    namespace: String<KEY_NAME_MAX>,
    debug: bool,
}

impl StoreConfig {
    /// Validate and build a configuration, debug logging enabled
    pub fn new(partition: &str, namespace: &str) -> Result<Self, ConfigError> {
        let partition = partition_label(partition).map_err(ConfigError::InvalidPartition)?;

        validate_name(namespace).map_err(ConfigError::InvalidNamespace)?;
        let mut ns = String::new();
        ns.push_str(namespace).map_err(|_| {
            ConfigError::InvalidNamespace(KeyError::TooLong {
                len: namespace.len(),
            })
        })?;

        Ok(Self {
            partition,
            namespace: ns,
            debug: true,
        })
    }

    /// Set the debug flag
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Partition label
    pub fn partition(&self) -> &str {
        self.partition.as_str()
    }

    /// Namespace name
    pub fn namespace(&self) -> &str {
        self.namespace.as_str()
    }

    /// Info logging on successful mutations
    pub fn debug(&self) -> bool {
        self.debug
    }
}

fn partition_label(label: &str) -> Result<String<PARTITION_NAME_MAX>, KeyError> {
    if label.is_empty() {
        return Err(KeyError::Empty);
    }
    if let Some(index) = label.bytes().position(|b| !(0x20..=0x7e).contains(&b)) {
        return Err(KeyError::InvalidChar { index });
    }
    let mut out = String::new();
    out.push_str(label)
        .map_err(|_| KeyError::TooLong { len: label.len() })?;
    Ok(out)
}
