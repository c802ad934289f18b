//! Raw platform error codes
//!
//! The underlying store reports failures as plain numbers (`esp_err_t` on
//! ESP-IDF). [`EspCode`] keeps that number intact so it can be printed in
//! diagnostics, and classifies the few codes the facade branches on.

use core::fmt;

/// Result type for platform store primitives
pub type EspResult<T> = core::result::Result<T, EspCode>;

/// Raw error code reported by the platform store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EspCode(pub i32);

impl EspCode {
    /// Generic failure
    pub const FAIL: Self = Self(-1);
    /// Out of memory
    pub const NO_MEM: Self = Self(0x101);
    /// Invalid argument
    pub const INVALID_ARG: Self = Self(0x102);
    /// Requested resource (e.g. partition) not found
    pub const NOT_FOUND: Self = Self(0x105);

    /// Base of the NVS error range
    pub const NVS_BASE: Self = Self(0x1100);
    /// Storage driver is not initialized
    pub const NVS_NOT_INITIALIZED: Self = Self(0x1101);
    /// Requested key does not exist
    pub const NVS_NOT_FOUND: Self = Self(0x1102);
    /// Key exists with a different type
    pub const NVS_TYPE_MISMATCH: Self = Self(0x1103);
    /// Handle was opened read-only
    pub const NVS_READ_ONLY: Self = Self(0x1104);
    /// Not enough space in the partition
    pub const NVS_NOT_ENOUGH_SPACE: Self = Self(0x1105);
    /// Namespace name does not satisfy constraints
    pub const NVS_INVALID_NAME: Self = Self(0x1106);
    /// Handle is closed or invalid
    pub const NVS_INVALID_HANDLE: Self = Self(0x1107);
    /// Value was written but could not be removed afterwards
    pub const NVS_REMOVE_FAILED: Self = Self(0x1108);
    /// Key name is too long
    pub const NVS_KEY_TOO_LONG: Self = Self(0x1109);
    /// Internal error, page is full
    pub const NVS_PAGE_FULL: Self = Self(0x110a);
    /// Store is in an inconsistent state after a previous failure
    pub const NVS_INVALID_STATE: Self = Self(0x110b);
    /// Destination buffer is too short for the stored value
    pub const NVS_INVALID_LENGTH: Self = Self(0x110c);
    /// Partition has no empty pages left and must be erased
    pub const NVS_NO_FREE_PAGES: Self = Self(0x110d);
    /// String or blob is too long
    pub const NVS_VALUE_TOO_LONG: Self = Self(0x110e);
    /// Partition label not present in the partition table
    pub const NVS_PART_NOT_FOUND: Self = Self(0x110f);

    /// Raw numeric value
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Key absent (the create probe's "go ahead" answer)
    pub const fn is_not_found(self) -> bool {
        self.0 == Self::NVS_NOT_FOUND.0
    }

    /// Key present under another type
    pub const fn is_type_mismatch(self) -> bool {
        self.0 == Self::NVS_TYPE_MISMATCH.0
    }

    /// Short symbolic name, `None` for codes outside the known set
    pub const fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            -1 => "ESP_FAIL",
            0x101 => "ESP_ERR_NO_MEM",
            0x102 => "ESP_ERR_INVALID_ARG",
            0x105 => "ESP_ERR_NOT_FOUND",
            0x1101 => "ESP_ERR_NVS_NOT_INITIALIZED",
            0x1102 => "ESP_ERR_NVS_NOT_FOUND",
            0x1103 => "ESP_ERR_NVS_TYPE_MISMATCH",
            0x1104 => "ESP_ERR_NVS_READ_ONLY",
            0x1105 => "ESP_ERR_NVS_NOT_ENOUGH_SPACE",
            0x1106 => "ESP_ERR_NVS_INVALID_NAME",
            0x1107 => "ESP_ERR_NVS_INVALID_HANDLE",
            0x1108 => "ESP_ERR_NVS_REMOVE_FAILED",
            0x1109 => "ESP_ERR_NVS_KEY_TOO_LONG",
            0x110a => "ESP_ERR_NVS_PAGE_FULL",
            0x110b => "ESP_ERR_NVS_INVALID_STATE",
            0x110c => "ESP_ERR_NVS_INVALID_LENGTH",
            0x110d => "ESP_ERR_NVS_NO_FREE_PAGES",
            0x110e => "ESP_ERR_NVS_VALUE_TOO_LONG",
            0x110f => "ESP_ERR_NVS_PART_NOT_FOUND",
            _ => return None,
        };
        Some(name)
    }
}

/// Renders as `0x1102`, the form used in diagnostics; `ESP_FAIL` is `0xffffffff`
impl fmt::Display for EspCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0 as u32)
    }
}
