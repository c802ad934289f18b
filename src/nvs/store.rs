//! Store handle
//!
//! [`NvsStore`] binds one namespace of one partition and exposes typed
//! create / write / read operations over any [`NvsInterface`] backend.
//!
//! Every mutation is committed before the call returns. Every failure is
//! logged once, tagged `NVS`, with the raw platform code, and then returned
//! as an [`NvsError`]. Successful mutations are logged at info level when
//! the configuration has debug enabled.

use heapless::{String, Vec};
use nvs32_core::{EspCode, Key, NvsError, Operation, StoreConfig, Value};

use crate::platform::traits::{NvsHandle, NvsInterface, OpenMode};
use crate::{log_error, log_info};

/// Log tag of every line emitted by the store
pub const TAG: &str = "NVS";

/// Result type of store operations
pub type Result<T> = core::result::Result<T, NvsError>;

/// Handle to one open namespace
///
/// Obtained from [`NvsStore::init`]; a failed init yields no handle. The
/// underlying session is released by [`close`](Self::close) or on drop.
///
/// # Example
///
/// ```
/// use nvs32::nvs::NvsStore;
/// use nvs32::platform::mock::MockNvs;
/// use nvs32_core::StoreConfig;
///
/// let config = StoreConfig::new("nvs", "app").unwrap();
/// let mut store = NvsStore::init(MockNvs::new(), &config).unwrap();
///
/// store.create("boot_count", 0).unwrap();
/// let count = store.read_i32("boot_count").unwrap();
/// store.write("boot_count", count + 1).unwrap();
/// assert_eq!(store.read_i32("boot_count"), Ok(1));
/// ```
pub struct NvsStore<N: NvsInterface> {
    nvs: N,
    handle: NvsHandle,
    config: StoreConfig,
}

impl<N: NvsInterface> NvsStore<N> {
    /// Initialize the configured partition and open its namespace read-write.
    pub fn init(mut nvs: N, config: &StoreConfig) -> Result<Self> {
        if let Err(code) = nvs.init_partition(config.partition()) {
            log_error!(TAG, "Fail to init partition [{}]", code);
            return Err(NvsError::Init {
                op: Operation::InitPartition,
                code,
            });
        }

        let handle = match nvs.open(config.partition(), config.namespace(), OpenMode::ReadWrite) {
            Ok(handle) => handle,
            Err(code) => {
                log_error!(TAG, "Fail to open namespace [{}]", code);
                return Err(NvsError::Init {
                    op: Operation::OpenNamespace,
                    code,
                });
            }
        };

        Ok(Self {
            nvs,
            handle,
            config: config.clone(),
        })
    }

    /// Configuration this handle was opened with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Enable or disable info logging of successful mutations
    pub fn set_debug(&mut self, debug: bool) {
        self.config = self.config.clone().with_debug(debug);
    }

    /// Release the session.
    pub fn close(self) {}

    /// Remove every key of the bound namespace.
    ///
    /// Other namespaces of the partition are untouched.
    pub fn erase_all(&mut self) -> Result<()> {
        if let Err(code) = self.nvs.erase_all(self.handle) {
            log_error!(TAG, "Fail to erase all keys [{}]", code);
            return Err(NvsError::Io {
                op: Operation::EraseAll,
                code,
            });
        }
        if let Err(code) = self.nvs.commit(self.handle) {
            log_error!(
                TAG,
                "Fail to commit erase of namespace ['{}'] [{}]",
                self.config.namespace(),
                code
            );
            return Err(commit_error(code));
        }

        if self.config.debug() {
            log_info!(TAG, "All keys erased from ['{}']", self.config.namespace());
        }
        Ok(())
    }

    /// Remove one key.
    ///
    /// # Errors
    ///
    /// [`NvsError::NotFound`] if the key does not exist.
    pub fn erase_key(&mut self, key: &str) -> Result<()> {
        let key = parse_key(key)?;

        if let Err(code) = self.nvs.erase_key(self.handle, &key) {
            log_error!(TAG, "Fail to erase key ['{}'] [{}]", key, code);
            return Err(NvsError::from_code(Operation::EraseKey, code));
        }
        self.commit(&key)?;

        if self.config.debug() {
            log_info!(TAG, "Key ['{}'] erased", key);
        }
        Ok(())
    }

    /// Store `value` under `key` only if the key is absent.
    ///
    /// The key is probed with the getter of the value's type. An existing
    /// key of that type yields [`NvsError::AlreadyExists`] without logging
    /// or writing anything. A key stored under the other type is invisible
    /// to the probe, so it is replaced.
    pub fn create<'v>(&mut self, key: &str, value: impl Into<Value<'v>>) -> Result<()> {
        let value = value.into();
        let key = parse_key(key)?;
        check_value(&key, &value)?;

        let probe = match value {
            Value::I32(_) => self.nvs.get_i32(self.handle, &key).map(|_| ()),
            Value::Str(_) => self.nvs.get_str(self.handle, &key, None).map(|_| ()),
        };
        match probe {
            Ok(()) => return Err(NvsError::AlreadyExists),
            Err(code) if code.is_not_found() || code.is_type_mismatch() => {}
            Err(code) => {
                log_error!(TAG, "Fail to create key ['{}'] [{}]", key, code);
                return Err(NvsError::from_code(Operation::Get, code));
            }
        }

        if let Err(code) = self.set(&key, value) {
            log_error!(TAG, "Fail to create key ['{}'] [{}]", key, code);
            return Err(NvsError::from_code(Operation::Set, code));
        }
        self.commit(&key)?;

        if self.config.debug() {
            log_info!(TAG, "Key ['{}'] created", key);
        }
        Ok(())
    }

    /// [`create`](Self::create) for a string value
    pub fn create_str(&mut self, key: &str, value: &str) -> Result<()> {
        self.create(key, value)
    }

    /// [`create`](Self::create) for an integer value
    pub fn create_i32(&mut self, key: &str, value: i32) -> Result<()> {
        self.create(key, value)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn write<'v>(&mut self, key: &str, value: impl Into<Value<'v>>) -> Result<()> {
        let value = value.into();
        let key = parse_key(key)?;
        check_value(&key, &value)?;

        if let Err(code) = self.set(&key, value) {
            log_error!(TAG, "Fail to write key ['{}'] [{}]", key, code);
            return Err(NvsError::from_code(Operation::Set, code));
        }
        self.commit(&key)?;

        if self.config.debug() {
            log_info!(TAG, "['{}']: {}", key, value);
        }
        Ok(())
    }

    /// [`write`](Self::write) for a string value
    pub fn write_str(&mut self, key: &str, value: &str) -> Result<()> {
        self.write(key, value)
    }

    /// [`write`](Self::write) for an integer value
    pub fn write_i32(&mut self, key: &str, value: i32) -> Result<()> {
        self.write(key, value)
    }

    /// Copy the string stored under `key` into `buf`, NUL terminator included.
    ///
    /// Returns the stored length including the terminator. When `buf` is
    /// too short, nothing is copied and [`NvsError::BufferTooSmall`] carries
    /// the required length.
    pub fn read_str(&mut self, key: &str, buf: &mut [u8]) -> Result<usize> {
        let key = parse_key(key)?;

        let required = match self.nvs.get_str(self.handle, &key, None) {
            Ok(len) => len,
            Err(code) => {
                log_error!(TAG, "Fail to read key ['{}'] [{}]", key, code);
                return Err(NvsError::from_code(Operation::Get, code));
            }
        };

        if required > buf.len() {
            log_error!(
                TAG,
                "Buffer [{}] is smaller than necessary [{}]",
                buf.len(),
                required
            );
            return Err(NvsError::BufferTooSmall {
                required,
                available: buf.len(),
            });
        }

        match self.nvs.get_str(self.handle, &key, Some(&mut buf[..required])) {
            Ok(len) => Ok(len),
            Err(code) => {
                log_error!(TAG, "Fail to copy value of key ['{}'] [{}]", key, code);
                Err(NvsError::from_code(Operation::Get, code))
            }
        }
    }

    /// Read the string stored under `key` into an owned fixed-capacity string.
    ///
    /// `CAP` must hold the stored text and its NUL terminator.
    pub fn read_string<const CAP: usize>(&mut self, key: &str) -> Result<String<CAP>> {
        let mut buf: Vec<u8, CAP> = Vec::new();
        // Capacity is CAP, so this cannot fail
        let _ = buf.resize(CAP, 0);

        let len = self.read_str(key, &mut buf)?;
        buf.truncate(len.saturating_sub(1));

        String::from_utf8(buf).map_err(|_| {
            log_error!(TAG, "Value of key ['{}'] is not valid UTF-8", key);
            NvsError::InvalidValue
        })
    }

    /// Read the integer stored under `key`.
    pub fn read_i32(&mut self, key: &str) -> Result<i32> {
        let key = parse_key(key)?;

        self.nvs.get_i32(self.handle, &key).map_err(|code| {
            log_error!(TAG, "Fail to read key ['{}'] [{}]", key, code);
            NvsError::from_code(Operation::Get, code)
        })
    }

    fn set(&mut self, key: &Key, value: Value<'_>) -> core::result::Result<(), EspCode> {
        match value {
            Value::I32(v) => self.nvs.set_i32(self.handle, key, v),
            Value::Str(s) => self.nvs.set_str(self.handle, key, s),
        }
    }

    fn commit(&mut self, key: &Key) -> Result<()> {
        self.nvs.commit(self.handle).map_err(|code| {
            log_error!(TAG, "Fail to commit key ['{}'] [{}]", key, code);
            commit_error(code)
        })
    }
}

impl<N: NvsInterface> Drop for NvsStore<N> {
    fn drop(&mut self) {
        self.nvs.close(self.handle);
    }
}

fn commit_error(code: EspCode) -> NvsError {
    NvsError::Io {
        op: Operation::Commit,
        code,
    }
}

fn parse_key(name: &str) -> Result<Key> {
    Key::new(name).map_err(|e| {
        log_error!(TAG, "Invalid key ['{}']: {}", name, e);
        NvsError::InvalidKey(e)
    })
}

fn check_value(key: &Key, value: &Value<'_>) -> Result<()> {
    if value.is_storable() {
        return Ok(());
    }
    log_error!(
        TAG,
        "Value of key ['{}'] cannot be stored [{} bytes]",
        key,
        value.stored_len()
    );
    Err(NvsError::InvalidValue)
}
