//! Tagged value type
//!
//! The store keeps exactly two value kinds: 32-bit signed integers and
//! NUL-terminated strings. [`Value`] carries either one so a single `create`
//! or `write` entry point can dispatch on the variant.

use core::fmt;

/// Longest string the store accepts, including the NUL terminator
pub const MAX_STR_LEN: usize = 4000;

/// Declared type of a stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// 32-bit signed integer
    I32,
    /// NUL-terminated byte string
    Str,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::I32 => write!(f, "i32"),
            ValueType::Str => write!(f, "str"),
        }
    }
}

/// Value to be stored under a key
///
/// # Example
///
/// ```
/// use nvs32_core::{Value, ValueType};
///
/// let count: Value = 7.into();
/// let ssid: Value = "home-net".into();
/// assert_eq!(count.value_type(), ValueType::I32);
/// assert_eq!(ssid.stored_len(), 9); // includes the NUL
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    /// 32-bit signed integer
    I32(i32),
    /// String, stored with a trailing NUL
    Str(&'a str),
}

impl Value<'_> {
    /// Declared type of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::I32(_) => ValueType::I32,
            Value::Str(_) => ValueType::Str,
        }
    }

    /// Bytes the value occupies in the store (strings count their NUL)
    pub fn stored_len(&self) -> usize {
        match self {
            Value::I32(_) => core::mem::size_of::<i32>(),
            Value::Str(s) => s.len() + 1,
        }
    }

    /// Check that the value can be represented by the store
    ///
    /// Strings must not contain interior NUL bytes and must fit in
    /// [`MAX_STR_LEN`] including their terminator.
    pub fn is_storable(&self) -> bool {
        match self {
            Value::I32(_) => true,
            Value::Str(s) => !s.as_bytes().contains(&0) && s.len() < MAX_STR_LEN,
        }
    }
}

impl From<i32> for Value<'_> {
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Str(value)
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I32(i) => write!(f, "[{}]", i),
            Value::Str(s) => write!(f, "['{}']", s),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use std::format;

    #[test]
    fn test_value_from() {
        assert_eq!(Value::from(42), Value::I32(42));
        assert_eq!(Value::from("x"), Value::Str("x"));
    }

    #[test]
    fn test_value_type() {
        assert_eq!(Value::I32(0).value_type(), ValueType::I32);
        assert_eq!(Value::Str("").value_type(), ValueType::Str);
    }

    #[test]
    fn test_stored_len_counts_terminator() {
        assert_eq!(Value::Str("home-net").stored_len(), 9);
        assert_eq!(Value::Str("").stored_len(), 1);
        assert_eq!(Value::I32(-5).stored_len(), 4);
    }

    #[test]
    fn test_storable() {
        assert!(Value::Str("plain").is_storable());
        assert!(!Value::Str("in\0side").is_storable());

        let long = "x".repeat(MAX_STR_LEN - 1);
        assert!(Value::Str(&long).is_storable());
        let too_long = "x".repeat(MAX_STR_LEN);
        assert!(!Value::Str(&too_long).is_storable());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(format!("{}", Value::I32(42)), "[42]");
        assert_eq!(format!("{}", Value::Str("home")), "['home']");
    }
}
