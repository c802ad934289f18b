//! Non-volatile key-value store interface trait
//!
//! This module defines the store primitives that platform implementations
//! must provide. The facade in [`crate::nvs`] is written purely against this
//! trait.

use nvs32_core::{EspResult, Key};

/// Opaque session token returned by [`NvsInterface::open`]
pub type NvsHandle = u32;

/// Namespace open mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Reads only; mutating primitives fail with `ESP_ERR_NVS_READ_ONLY`
    ReadOnly,
    /// Reads and writes
    ReadWrite,
}

/// Non-volatile key-value store interface trait
///
/// Platform implementations must provide these primitives. Each one reports
/// failures as the raw platform code so callers can log it unchanged.
///
/// # Store Characteristics
///
/// - Storage is split into partitions; each partition holds namespaces
/// - A namespace maps keys (≤15 bytes) to one typed value each
/// - Mutations become durable only after [`commit`](Self::commit)
/// - Reading a key under a type other than the stored one fails with
///   `ESP_ERR_NVS_TYPE_MISMATCH`
///
/// # Safety Invariants
///
/// - A partition must be initialized before namespaces in it are opened
/// - Only one owner per session handle (no concurrent access)
/// - A closed handle must not be passed to any other primitive
pub trait NvsInterface {
    /// Prepare a partition for use
    ///
    /// # Errors
    ///
    /// Returns `ESP_ERR_NOT_FOUND` if the partition table has no such label.
    /// Returns `ESP_ERR_NVS_NO_FREE_PAGES` if the partition must be erased.
    fn init_partition(&mut self, partition: &str) -> EspResult<()>;

    /// Open a namespace inside an initialized partition
    ///
    /// # Errors
    ///
    /// Returns `ESP_ERR_NVS_NOT_INITIALIZED` if the partition was not initialized.
    fn open(&mut self, partition: &str, namespace: &str, mode: OpenMode) -> EspResult<NvsHandle>;

    /// Read a 32-bit signed integer
    fn get_i32(&mut self, handle: NvsHandle, key: &Key) -> EspResult<i32>;

    /// Stage a 32-bit signed integer
    fn set_i32(&mut self, handle: NvsHandle, key: &Key, value: i32) -> EspResult<()>;

    /// Read a NUL-terminated string
    ///
    /// With `buf == None` only the stored length is returned. With a buffer,
    /// the string and its terminator are copied in. Both forms return the
    /// stored length including the NUL.
    ///
    /// # Errors
    ///
    /// Returns `ESP_ERR_NVS_INVALID_LENGTH` if `buf` is shorter than the stored length.
    fn get_str(&mut self, handle: NvsHandle, key: &Key, buf: Option<&mut [u8]>)
        -> EspResult<usize>;

    /// Stage a string; the store appends the NUL terminator
    fn set_str(&mut self, handle: NvsHandle, key: &Key, value: &str) -> EspResult<()>;

    /// Stage removal of one key
    ///
    /// # Errors
    ///
    /// Returns `ESP_ERR_NVS_NOT_FOUND` if the key does not exist.
    fn erase_key(&mut self, handle: NvsHandle, key: &Key) -> EspResult<()>;

    /// Stage removal of every key in the handle's namespace
    fn erase_all(&mut self, handle: NvsHandle) -> EspResult<()>;

    /// Make staged mutations durable
    fn commit(&mut self, handle: NvsHandle) -> EspResult<()>;

    /// Release the session; the handle is invalid afterwards
    fn close(&mut self, handle: NvsHandle);
}

impl<T: NvsInterface + ?Sized> NvsInterface for &mut T {
    fn init_partition(&mut self, partition: &str) -> EspResult<()> {
        (**self).init_partition(partition)
    }

    fn open(&mut self, partition: &str, namespace: &str, mode: OpenMode) -> EspResult<NvsHandle> {
        (**self).open(partition, namespace, mode)
    }

    fn get_i32(&mut self, handle: NvsHandle, key: &Key) -> EspResult<i32> {
        (**self).get_i32(handle, key)
    }

    fn set_i32(&mut self, handle: NvsHandle, key: &Key, value: i32) -> EspResult<()> {
        (**self).set_i32(handle, key, value)
    }

    fn get_str(
        &mut self,
        handle: NvsHandle,
        key: &Key,
        buf: Option<&mut [u8]>,
    ) -> EspResult<usize> {
        (**self).get_str(handle, key, buf)
    }

    fn set_str(&mut self, handle: NvsHandle, key: &Key, value: &str) -> EspResult<()> {
        (**self).set_str(handle, key, value)
    }

    fn erase_key(&mut self, handle: NvsHandle, key: &Key) -> EspResult<()> {
        (**self).erase_key(handle, key)
    }

    fn erase_all(&mut self, handle: NvsHandle) -> EspResult<()> {
        (**self).erase_all(handle)
    }

    fn commit(&mut self, handle: NvsHandle) -> EspResult<()> {
        (**self).commit(handle)
    }

    fn close(&mut self, handle: NvsHandle) {
        (**self).close(handle)
    }
}
