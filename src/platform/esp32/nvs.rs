//! ESP-IDF NVS implementation
//!
//! This module provides key-value storage on ESP32 using the ESP-IDF NVS
//! library (`nvs_flash.h`).
//!
//! # Partition Layout
//!
//! ```text
//! # Name,   Type, SubType, Offset,  Size
//! nvs,      data, nvs,     0x9000,  0x6000
//! phy_init, data, phy,     0xf000,  0x1000
//! factory,  app,  factory, 0x10000, 1M
//! ```
//!
//! Any `data, nvs` entry of the partition table can be bound by label.
//!
//! # Safety
//!
//! Every primitive is an FFI call. Strings crossing the boundary must be
//! NUL-terminated and outlive the call; handles must come from
//! `nvs_open_from_partition` and must not be used after `nvs_close`.

use crate::platform::traits::{NvsHandle, NvsInterface, OpenMode};
use esp_idf_sys::{
    esp_err_t, nvs_close, nvs_commit, nvs_erase_all, nvs_erase_key, nvs_flash_init_partition,
    nvs_get_i32, nvs_get_str, nvs_open_from_partition, nvs_open_mode_t_NVS_READONLY,
    nvs_open_mode_t_NVS_READWRITE, nvs_set_i32, nvs_set_str, ESP_OK,
};
use nvs32_core::{EspCode, EspResult, Key};
use std::ffi::{c_char, CString};

/// Map an `esp_err_t` onto `EspResult`
fn check(err: esp_err_t) -> EspResult<()> {
    if err == ESP_OK as esp_err_t {
        Ok(())
    } else {
        Err(EspCode(err))
    }
}

/// NUL-terminated copy of a partition label or namespace name
fn c_string(s: &str) -> EspResult<CString> {
    CString::new(s).map_err(|_| EspCode::INVALID_ARG)
}

/// ESP-IDF NVS implementation
///
/// Zero-sized; all state lives in the ESP-IDF NVS library.
///
/// # Example
///
/// ```no_run
/// use nvs32::nvs::NvsStore;
/// use nvs32::platform::esp32::EspNvs;
/// use nvs32_core::StoreConfig;
///
/// let config = StoreConfig::new("nvs", "app").unwrap();
/// let mut store = NvsStore::init(EspNvs::new(), &config).unwrap();
/// store.create("boot_count", 0).ok();
/// ```
#[derive(Debug, Default)]
pub struct EspNvs;

impl EspNvs {
    /// Create a new ESP-IDF NVS instance
    pub fn new() -> Self {
        Self
    }
}

impl NvsInterface for EspNvs {
    fn init_partition(&mut self, partition: &str) -> EspResult<()> {
        let label = c_string(partition)?;
        // SAFETY: label is NUL-terminated and outlives the call
        check(unsafe { nvs_flash_init_partition(label.as_ptr()) })
    }

    fn open(&mut self, partition: &str, namespace: &str, mode: OpenMode) -> EspResult<NvsHandle> {
        let label = c_string(partition)?;
        let name = c_string(namespace)?;
        let mode = match mode {
            OpenMode::ReadOnly => nvs_open_mode_t_NVS_READONLY,
            OpenMode::ReadWrite => nvs_open_mode_t_NVS_READWRITE,
        };

        let mut handle: NvsHandle = 0;
        // SAFETY: both strings are NUL-terminated, handle is a valid out pointer
        check(unsafe { nvs_open_from_partition(label.as_ptr(), name.as_ptr(), mode, &mut handle) })?;
        Ok(handle)
    }

    fn get_i32(&mut self, handle: NvsHandle, key: &Key) -> EspResult<i32> {
        let key = key.to_c_bytes();
        let mut value = 0i32;
        // SAFETY: key buffer is NUL-terminated, value is a valid out pointer
        check(unsafe { nvs_get_i32(handle, key.as_ptr() as *const c_char, &mut value) })?;
        Ok(value)
    }

    fn set_i32(&mut self, handle: NvsHandle, key: &Key, value: i32) -> EspResult<()> {
        let key = key.to_c_bytes();
        // SAFETY: key buffer is NUL-terminated
        check(unsafe { nvs_set_i32(handle, key.as_ptr() as *const c_char, value) })
    }

    fn get_str(
        &mut self,
        handle: NvsHandle,
        key: &Key,
        buf: Option<&mut [u8]>,
    ) -> EspResult<usize> {
        let key = key.to_c_bytes();
        let (ptr, mut len) = match buf {
            Some(buf) => (buf.as_mut_ptr() as *mut c_char, buf.len()),
            None => (core::ptr::null_mut(), 0),
        };

        // SAFETY: with a null destination the library only writes `len`;
        // otherwise `ptr` is valid for `len` bytes and the library never
        // writes more than `len`
        check(unsafe { nvs_get_str(handle, key.as_ptr() as *const c_char, ptr, &mut len) })?;
        Ok(len)
    }

    fn set_str(&mut self, handle: NvsHandle, key: &Key, value: &str) -> EspResult<()> {
        let key = key.to_c_bytes();
        let value = c_string(value)?;
        // SAFETY: key and value are NUL-terminated and outlive the call
        check(unsafe { nvs_set_str(handle, key.as_ptr() as *const c_char, value.as_ptr()) })
    }

    fn erase_key(&mut self, handle: NvsHandle, key: &Key) -> EspResult<()> {
        let key = key.to_c_bytes();
        // SAFETY: key buffer is NUL-terminated
        check(unsafe { nvs_erase_key(handle, key.as_ptr() as *const c_char) })
    }

    fn erase_all(&mut self, handle: NvsHandle) -> EspResult<()> {
        // SAFETY: handle came from nvs_open_from_partition
        check(unsafe { nvs_erase_all(handle) })
    }

    fn commit(&mut self, handle: NvsHandle) -> EspResult<()> {
        // SAFETY: handle came from nvs_open_from_partition
        check(unsafe { nvs_commit(handle) })
    }

    fn close(&mut self, handle: NvsHandle) {
        // SAFETY: handle came from nvs_open_from_partition and is not reused
        unsafe { nvs_close(handle) }
    }
}
