//! Key and namespace names
//!
//! The platform store limits names to 15 bytes (16 with the NUL terminator).
//! Keys are restricted further to printable ASCII so they survive logging and
//! C interop unchanged.

use core::fmt;
use heapless::String;

/// Maximum key (and namespace) name length in bytes, excluding the NUL
pub const KEY_NAME_MAX: usize = 15;

/// Key validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    /// Name is empty
    Empty,
    /// Name exceeds [`KEY_NAME_MAX`] bytes
    TooLong {
        /// Length of the rejected name
        len: usize,
    },
    /// Name contains a byte outside printable ASCII (0x20..=0x7e)
    InvalidChar {
        /// Byte offset of the first offending byte
        index: usize,
    },
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::Empty => write!(f, "name is empty"),
            KeyError::TooLong { len } => {
                write!(f, "name is {} bytes, limit is {}", len, KEY_NAME_MAX)
            }
            KeyError::InvalidChar { index } => {
                write!(f, "non-printable byte at offset {}", index)
            }
        }
    }
}

/// Validated key name
///
/// # Example
///
/// ```
/// use nvs32_core::Key;
///
/// let key = Key::new("boot_count").unwrap();
/// assert_eq!(key.as_str(), "boot_count");
/// assert!(Key::new("a_key_name_that_is_too_long").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    name: String<KEY_NAME_MAX>,
}

impl Key {
    /// Validate and copy a key name
    pub fn new(name: &str) -> Result<Self, KeyError> {
        validate_name(name)?;
        let mut key = String::new();
        key.push_str(name)
            .map_err(|_| KeyError::TooLong { len: name.len() })?;
        Ok(Self { name: key })
    }

    /// Key name
    pub fn as_str(&self) -> &str {
        self.name.as_str()
    }

    /// Length in bytes, excluding the NUL
    pub fn len(&self) -> usize {
        self.name.len()
    }

    /// Always false for a validated key
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// NUL-terminated copy for C interfaces
    pub fn to_c_bytes(&self) -> [u8; KEY_NAME_MAX + 1] {
        let mut buf = [0u8; KEY_NAME_MAX + 1];
        buf[..self.name.len()].copy_from_slice(self.name.as_bytes());
        buf
    }
}

impl TryFrom<&str> for Key {
    type Error = KeyError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check a key or namespace name against the store's naming rules
pub fn validate_name(name: &str) -> Result<(), KeyError> {
    if name.is_empty() {
        return Err(KeyError::Empty);
    }
    if name.len() > KEY_NAME_MAX {
        return Err(KeyError::TooLong { len: name.len() });
    }
    if let Some(index) = name.bytes().position(|b| !(0x20..=0x7e).contains(&b)) {
        return Err(KeyError::InvalidChar { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_valid() {
        let key = Key::new("ssid").unwrap();
        assert_eq!(key.as_str(), "ssid");
        assert_eq!(key.len(), 4);
    }

    #[test]
    fn test_key_max_length() {
        assert!(Key::new("abcdefghijklmno").is_ok()); // 15 bytes
        assert_eq!(
            Key::new("abcdefghijklmnop"),
            Err(KeyError::TooLong { len: 16 })
        );
    }

    #[test]
    fn test_key_empty() {
        assert_eq!(Key::new(""), Err(KeyError::Empty));
    }

    #[test]
    fn test_key_rejects_control_and_non_ascii() {
        assert_eq!(Key::new("a\0b"), Err(KeyError::InvalidChar { index: 1 }));
        assert_eq!(Key::new("tab\t"), Err(KeyError::InvalidChar { index: 3 }));
        assert_eq!(Key::new("é"), Err(KeyError::InvalidChar { index: 0 }));
    }

    #[test]
    fn test_key_c_bytes_nul_terminated() {
        let key = Key::new("count").unwrap();
        let c = key.to_c_bytes();
        assert_eq!(&c[..5], b"count");
        assert!(c[5..].iter().all(|&b| b == 0));
    }
}
