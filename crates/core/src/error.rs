//! Facade error types
//!
//! Every failure the store facade reports maps to one [`NvsError`] variant.
//! Callers that only need the success flag use `is_ok()`; callers that need to
//! tell "already exists" from a flash fault match on the variant.

use crate::code::EspCode;
use crate::key::KeyError;
use core::fmt;

/// Platform primitive an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Partition initialization
    InitPartition,
    /// Namespace open
    OpenNamespace,
    /// Typed get (length query or copying read)
    Get,
    /// Typed set
    Set,
    /// Single key erase
    EraseKey,
    /// Namespace erase
    EraseAll,
    /// Commit of pending mutations
    Commit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::InitPartition => "init partition",
            Operation::OpenNamespace => "open namespace",
            Operation::Get => "get",
            Operation::Set => "set",
            Operation::EraseKey => "erase key",
            Operation::EraseAll => "erase all",
            Operation::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// Errors from store facade operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NvsError {
    /// Partition missing or unusable, or namespace could not be opened
    Init {
        /// Failing primitive
        op: Operation,
        /// Raw platform code
        code: EspCode,
    },
    /// Key does not exist
    NotFound,
    /// Key exists under another type
    TypeMismatch,
    /// `create` found the key already present; nothing was written
    AlreadyExists,
    /// Destination buffer cannot hold the stored string and its NUL
    BufferTooSmall {
        /// Stored length including the NUL terminator
        required: usize,
        /// Caller-supplied buffer length
        available: usize,
    },
    /// Key name rejected before reaching the store
    InvalidKey(KeyError),
    /// String value has an interior NUL or exceeds the store limit
    InvalidValue,
    /// Set, get, erase or commit failed for any other reason
    Io {
        /// Failing primitive
        op: Operation,
        /// Raw platform code
        code: EspCode,
    },
}

impl NvsError {
    /// Map a raw code reported by a data primitive onto the taxonomy
    ///
    /// Not-found and type-mismatch codes get their own variants; everything
    /// else is an I/O fault of `op`.
    pub fn from_code(op: Operation, code: EspCode) -> Self {
        if code.is_not_found() {
            NvsError::NotFound
        } else if code.is_type_mismatch() {
            NvsError::TypeMismatch
        } else {
            NvsError::Io { op, code }
        }
    }

    /// Raw platform code behind this error, when the store produced one
    pub fn code(&self) -> Option<EspCode> {
        match self {
            NvsError::Init { code, .. } | NvsError::Io { code, .. } => Some(*code),
            NvsError::NotFound => Some(EspCode::NVS_NOT_FOUND),
            NvsError::TypeMismatch => Some(EspCode::NVS_TYPE_MISMATCH),
            NvsError::AlreadyExists
            | NvsError::BufferTooSmall { .. }
            | NvsError::InvalidKey(_)
            | NvsError::InvalidValue => None,
        }
    }

    /// True for the not-found class
    pub fn is_not_found(&self) -> bool {
        matches!(self, NvsError::NotFound)
    }
}

impl From<KeyError> for NvsError {
    fn from(err: KeyError) -> Self {
        NvsError::InvalidKey(err)
    }
}

impl fmt::Display for NvsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NvsError::Init { op, code } => write!(f, "failed to {} [{}]", op, code),
            NvsError::NotFound => write!(f, "key not found"),
            NvsError::TypeMismatch => write!(f, "key stored with a different type"),
            NvsError::AlreadyExists => write!(f, "key already exists"),
            NvsError::BufferTooSmall {
                required,
                available,
            } => write!(
                f,
                "buffer [{}] is smaller than necessary [{}]",
                available, required
            ),
            NvsError::InvalidKey(e) => write!(f, "invalid key: {}", e),
            NvsError::InvalidValue => write!(f, "value cannot be stored"),
            NvsError::Io { op, code } => write!(f, "{} failed [{}]", op, code),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use std::format;

    #[test]
    fn test_from_code_classifies() {
        assert_eq!(
            NvsError::from_code(Operation::Get, EspCode::NVS_NOT_FOUND),
            NvsError::NotFound
        );
        assert_eq!(
            NvsError::from_code(Operation::Get, EspCode::NVS_TYPE_MISMATCH),
            NvsError::TypeMismatch
        );
        assert_eq!(
            NvsError::from_code(Operation::Set, EspCode::NVS_NOT_ENOUGH_SPACE),
            NvsError::Io {
                op: Operation::Set,
                code: EspCode::NVS_NOT_ENOUGH_SPACE
            }
        );
    }

    #[test]
    fn test_code_accessor() {
        assert_eq!(NvsError::NotFound.code(), Some(EspCode::NVS_NOT_FOUND));
        assert_eq!(NvsError::AlreadyExists.code(), None);
        let err = NvsError::Io {
            op: Operation::Commit,
            code: EspCode::FAIL,
        };
        assert_eq!(err.code(), Some(EspCode::FAIL));
    }

    #[test]
    fn test_display() {
        let err = NvsError::Init {
            op: Operation::InitPartition,
            code: EspCode::NOT_FOUND,
        };
        assert_eq!(format!("{}", err), "failed to init partition [0x105]");

        let err = NvsError::BufferTooSmall {
            required: 9,
            available: 4,
        };
        assert_eq!(
            format!("{}", err),
            "buffer [4] is smaller than necessary [9]"
        );
    }

    #[test]
    fn test_from_key_error() {
        let err: NvsError = KeyError::Empty.into();
        assert_eq!(err, NvsError::InvalidKey(KeyError::Empty));
    }
}
