//! Mock NVS implementation for testing
//!
//! Provides an in-memory key-value store that behaves like the platform NVS
//! for unit and integration tests.

use crate::platform::traits::{NvsHandle, NvsInterface, OpenMode};
use bitflags::bitflags;
use crc::{Crc, CRC_32_ISO_HDLC};
use nvs32_core::{EspCode, EspResult, Key, ValueType, KEY_NAME_MAX, MAX_STR_LEN};
use std::collections::{BTreeMap, BTreeSet};
use std::string::{String, ToString};
use std::vec::Vec;

/// Partition created by [`MockNvs::new`]
pub const DEFAULT_PARTITION: &str = "nvs";

/// CRC32 over namespace, key, type and payload of an entry
const ENTRY_CRC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

bitflags! {
    /// Store primitives that can be forced to fail
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Faults: u16 {
        /// `init_partition`
        const INIT = 0b0000_0001;
        /// `open`
        const OPEN = 0b0000_0010;
        /// `get_i32` / `get_str`
        const GET = 0b0000_0100;
        /// `set_i32` / `set_str`
        const SET = 0b0000_1000;
        /// `erase_key`
        const ERASE_KEY = 0b0001_0000;
        /// `erase_all`
        const ERASE_ALL = 0b0010_0000;
        /// `commit`
        const COMMIT = 0b0100_0000;
    }
}

/// Stored payload
#[derive(Debug, Clone, PartialEq, Eq)]
enum Data {
    I32(i32),
    /// String bytes including the NUL terminator
    Str(Vec<u8>),
}

impl Data {
    fn value_type(&self) -> ValueType {
        match self {
            Data::I32(_) => ValueType::I32,
            Data::Str(_) => ValueType::Str,
        }
    }
}

/// Committed or staged entry with its checksum
#[derive(Debug, Clone)]
struct Entry {
    data: Data,
    crc: u32,
}

impl Entry {
    fn new(namespace: &str, key: &str, data: Data) -> Self {
        let crc = Self::checksum(namespace, key, &data);
        Self { data, crc }
    }

    fn checksum(namespace: &str, key: &str, data: &Data) -> u32 {
        let mut digest = ENTRY_CRC.digest();
        digest.update(namespace.as_bytes());
        digest.update(&[0]);
        digest.update(key.as_bytes());
        digest.update(&[0]);
        match data {
            Data::I32(v) => {
                digest.update(&[0x14]);
                digest.update(&v.to_le_bytes());
            }
            Data::Str(bytes) => {
                digest.update(&[0x21]);
                digest.update(bytes);
            }
        }
        digest.finalize()
    }

    fn is_intact(&self, namespace: &str, key: &str) -> bool {
        Self::checksum(namespace, key, &self.data) == self.crc
    }
}

/// One flash partition holding namespaced entries
#[derive(Debug, Default)]
struct Partition {
    initialized: bool,
    corrupted: bool,
    namespaces: BTreeSet<String>,
    entries: BTreeMap<(String, String), Entry>,
}

/// Open namespace session with its uncommitted mutations
#[derive(Debug)]
struct Session {
    partition: String,
    namespace: String,
    mode: OpenMode,
    /// Pending namespace wipe, applied before `staged` on commit
    erase_all: bool,
    /// Pending per-key changes; `None` marks an erase
    staged: BTreeMap<String, Option<Entry>>,
}

/// Mock NVS implementation
///
/// Simulates the platform key-value store in memory. Supports:
/// - Multiple partitions, namespaces isolated within a partition
/// - Typed entries with not-found / type-mismatch reporting
/// - Staged mutations that only become durable on commit
/// - Power-cycle simulation (uncommitted data and open sessions are lost)
/// - Per-entry CRC with corruption injection
/// - Fault injection per primitive
///
/// # Example
///
/// ```ignore
/// use nvs32::platform::mock::MockNvs;
/// use nvs32::platform::traits::{NvsInterface, OpenMode};
/// use nvs32_core::Key;
///
/// let mut nvs = MockNvs::new();
/// nvs.init_partition("nvs").unwrap();
/// let handle = nvs.open("nvs", "app", OpenMode::ReadWrite).unwrap();
///
/// let key = Key::new("count").unwrap();
/// nvs.set_i32(handle, &key, 7).unwrap();
/// nvs.commit(handle).unwrap();
///
/// nvs.power_cycle();
/// assert_eq!(nvs.committed_i32("nvs", "app", "count"), Some(7));
/// ```
#[derive(Debug)]
pub struct MockNvs {
    partitions: BTreeMap<String, Partition>,
    sessions: BTreeMap<NvsHandle, Session>,
    next_handle: NvsHandle,
    faults: Faults,
    fault_code: EspCode,
    fault_skip: u32,
    commit_count: u32,
}

impl MockNvs {
    /// Create a store with a single `"nvs"` partition
    pub fn new() -> Self {
        Self::with_partitions(&[DEFAULT_PARTITION])
    }

    /// Create a store with the given partition labels
    pub fn with_partitions(labels: &[&str]) -> Self {
        let partitions = labels
            .iter()
            .map(|label| (label.to_string(), Partition::default()))
            .collect();

        Self {
            partitions,
            sessions: BTreeMap::new(),
            next_handle: 1,
            faults: Faults::empty(),
            fault_code: EspCode::FAIL,
            fault_skip: 0,
            commit_count: 0,
        }
    }

    /// Simulate a reset
    ///
    /// Every session is closed and its uncommitted mutations are discarded.
    /// Partitions must be initialized again. Committed entries whose CRC no
    /// longer matches are dropped, as the real store does when it rescans
    /// its pages.
    pub fn power_cycle(&mut self) {
        self.sessions.clear();
        for partition in self.partitions.values_mut() {
            partition.initialized = false;
            partition
                .entries
                .retain(|(namespace, key), entry| entry.is_intact(namespace, key));
        }
    }

    /// Force the primitives in `faults` to fail with `code` until cleared
    pub fn inject_fault(&mut self, faults: Faults, code: EspCode) {
        self.inject_fault_after(faults, code, 0);
    }

    /// Like [`inject_fault`](Self::inject_fault), but the first `skip`
    /// faulted calls still succeed
    pub fn inject_fault_after(&mut self, faults: Faults, code: EspCode, skip: u32) {
        self.faults |= faults;
        self.fault_code = code;
        self.fault_skip = skip;
    }

    /// Remove every injected fault
    pub fn clear_faults(&mut self) {
        self.faults = Faults::empty();
    }

    /// Make the partition report that it needs erasing on init
    pub fn mark_corrupted(&mut self, partition: &str, corrupted: bool) {
        if let Some(p) = self.partitions.get_mut(partition) {
            p.corrupted = corrupted;
        }
    }

    /// Damage a committed entry so its CRC no longer matches
    ///
    /// Returns false if no such committed entry exists.
    pub fn inject_corruption(&mut self, partition: &str, namespace: &str, key: &str) -> bool {
        let entry = self
            .partitions
            .get_mut(partition)
            .and_then(|p| p.entries.get_mut(&(namespace.to_string(), key.to_string())));

        match entry {
            Some(entry) => {
                match &mut entry.data {
                    Data::I32(v) => *v ^= 0x5555_5555,
                    Data::Str(bytes) => bytes.iter_mut().for_each(|b| *b ^= 0xAA),
                }
                true
            }
            None => false,
        }
    }

    /// Number of successful commits (for commit discipline validation)
    pub fn commit_count(&self) -> u32 {
        self.commit_count
    }

    /// Number of open sessions
    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Committed integer, bypassing sessions (for test verification)
    pub fn committed_i32(&self, partition: &str, namespace: &str, key: &str) -> Option<i32> {
        match self.committed(partition, namespace, key)?.data {
            Data::I32(v) => Some(v),
            Data::Str(_) => None,
        }
    }

    /// Committed string without its NUL, bypassing sessions (for test verification)
    pub fn committed_str(&self, partition: &str, namespace: &str, key: &str) -> Option<String> {
        match &self.committed(partition, namespace, key)?.data {
            Data::Str(bytes) => {
                let text = bytes.strip_suffix(&[0]).unwrap_or(bytes.as_slice());
                Some(String::from_utf8_lossy(text).into_owned())
            }
            Data::I32(_) => None,
        }
    }

    /// Declared type of a committed entry
    pub fn committed_type(&self, partition: &str, namespace: &str, key: &str) -> Option<ValueType> {
        self.committed(partition, namespace, key)
            .map(|entry| entry.data.value_type())
    }

    /// Number of committed entries in a namespace
    pub fn entry_count(&self, partition: &str, namespace: &str) -> usize {
        self.partitions.get(partition).map_or(0, |p| {
            p.entries.keys().filter(|(ns, _)| ns == namespace).count()
        })
    }

    fn committed(&self, partition: &str, namespace: &str, key: &str) -> Option<&Entry> {
        self.partitions
            .get(partition)?
            .entries
            .get(&(namespace.to_string(), key.to_string()))
    }

    fn check_fault(&mut self, fault: Faults) -> EspResult<()> {
        if !self.faults.contains(fault) {
            return Ok(());
        }
        if self.fault_skip > 0 {
            self.fault_skip -= 1;
            return Ok(());
        }
        Err(self.fault_code)
    }

    fn session(&self, handle: NvsHandle) -> EspResult<&Session> {
        self.sessions
            .get(&handle)
            .ok_or(EspCode::NVS_INVALID_HANDLE)
    }

    fn writable_session(&mut self, handle: NvsHandle) -> EspResult<&mut Session> {
        let session = self
            .sessions
            .get_mut(&handle)
            .ok_or(EspCode::NVS_INVALID_HANDLE)?;
        if session.mode == OpenMode::ReadOnly {
            return Err(EspCode::NVS_READ_ONLY);
        }
        Ok(session)
    }

    /// Resolve a key as seen through a session: staged data first, then
    /// committed data unless a namespace wipe is pending
    fn lookup(&self, handle: NvsHandle, key: &str) -> EspResult<Option<&Entry>> {
        let session = self.session(handle)?;
        if let Some(staged) = session.staged.get(key) {
            return Ok(staged.as_ref());
        }
        if session.erase_all {
            return Ok(None);
        }
        let partition = self
            .partitions
            .get(&session.partition)
            .ok_or(EspCode::NVS_NOT_INITIALIZED)?;
        Ok(partition
            .entries
            .get(&(session.namespace.clone(), key.to_string())))
    }

    fn stage(&mut self, handle: NvsHandle, key: &Key, data: Data) -> EspResult<()> {
        if key.len() > KEY_NAME_MAX {
            return Err(EspCode::NVS_KEY_TOO_LONG);
        }
        let session = self.writable_session(handle)?;
        let entry = Entry::new(&session.namespace, key.as_str(), data);
        session.staged.insert(key.as_str().to_string(), Some(entry));
        Ok(())
    }
}

impl Default for MockNvs {
    fn default() -> Self {
        Self::new()
    }
}

impl NvsInterface for MockNvs {
    fn init_partition(&mut self, partition: &str) -> EspResult<()> {
        self.check_fault(Faults::INIT)?;

        let p = self
            .partitions
            .get_mut(partition)
            .ok_or(EspCode::NOT_FOUND)?;
        if p.corrupted {
            return Err(EspCode::NVS_NO_FREE_PAGES);
        }
        p.initialized = true;
        Ok(())
    }

    fn open(&mut self, partition: &str, namespace: &str, mode: OpenMode) -> EspResult<NvsHandle> {
        self.check_fault(Faults::OPEN)?;

        let p = self
            .partitions
            .get_mut(partition)
            .ok_or(EspCode::NVS_PART_NOT_FOUND)?;
        if !p.initialized {
            return Err(EspCode::NVS_NOT_INITIALIZED);
        }
        if namespace.is_empty() || namespace.len() > KEY_NAME_MAX {
            return Err(EspCode::NVS_INVALID_NAME);
        }

        // Read-only sessions cannot create a namespace
        if !p.namespaces.contains(namespace) {
            if mode == OpenMode::ReadOnly {
                return Err(EspCode::NVS_NOT_FOUND);
            }
            p.namespaces.insert(namespace.to_string());
        }

        let handle = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1).max(1);
        self.sessions.insert(
            handle,
            Session {
                partition: partition.to_string(),
                namespace: namespace.to_string(),
                mode,
                erase_all: false,
                staged: BTreeMap::new(),
            },
        );
        Ok(handle)
    }

    fn get_i32(&mut self, handle: NvsHandle, key: &Key) -> EspResult<i32> {
        self.check_fault(Faults::GET)?;

        match self.lookup(handle, key.as_str())? {
            None => Err(EspCode::NVS_NOT_FOUND),
            Some(Entry {
                data: Data::I32(v), ..
            }) => Ok(*v),
            Some(_) => Err(EspCode::NVS_TYPE_MISMATCH),
        }
    }

    fn set_i32(&mut self, handle: NvsHandle, key: &Key, value: i32) -> EspResult<()> {
        self.check_fault(Faults::SET)?;
        self.stage(handle, key, Data::I32(value))
    }

    fn get_str(
        &mut self,
        handle: NvsHandle,
        key: &Key,
        buf: Option<&mut [u8]>,
    ) -> EspResult<usize> {
        self.check_fault(Faults::GET)?;

        let bytes = match self.lookup(handle, key.as_str())? {
            None => return Err(EspCode::NVS_NOT_FOUND),
            Some(Entry {
                data: Data::Str(bytes),
                ..
            }) => bytes,
            Some(_) => return Err(EspCode::NVS_TYPE_MISMATCH),
        };

        if let Some(buf) = buf {
            if buf.len() < bytes.len() {
                return Err(EspCode::NVS_INVALID_LENGTH);
            }
            buf[..bytes.len()].copy_from_slice(bytes);
        }
        Ok(bytes.len())
    }

    fn set_str(&mut self, handle: NvsHandle, key: &Key, value: &str) -> EspResult<()> {
        self.check_fault(Faults::SET)?;

        if value.len() + 1 > MAX_STR_LEN {
            return Err(EspCode::NVS_VALUE_TOO_LONG);
        }
        let mut bytes = Vec::with_capacity(value.len() + 1);
        bytes.extend_from_slice(value.as_bytes());
        bytes.push(0);
        self.stage(handle, key, Data::Str(bytes))
    }

    fn erase_key(&mut self, handle: NvsHandle, key: &Key) -> EspResult<()> {
        self.check_fault(Faults::ERASE_KEY)?;

        self.writable_session(handle)?;
        if self.lookup(handle, key.as_str())?.is_none() {
            return Err(EspCode::NVS_NOT_FOUND);
        }
        let session = self.writable_session(handle)?;
        session.staged.insert(key.as_str().to_string(), None);
        Ok(())
    }

    fn erase_all(&mut self, handle: NvsHandle) -> EspResult<()> {
        self.check_fault(Faults::ERASE_ALL)?;

        let session = self.writable_session(handle)?;
        session.erase_all = true;
        session.staged.clear();
        Ok(())
    }

    fn commit(&mut self, handle: NvsHandle) -> EspResult<()> {
        self.check_fault(Faults::COMMIT)?;

        let session = self
            .sessions
            .get_mut(&handle)
            .ok_or(EspCode::NVS_INVALID_HANDLE)?;
        let partition = self
            .partitions
            .get_mut(&session.partition)
            .ok_or(EspCode::NVS_NOT_INITIALIZED)?;

        if session.erase_all {
            let namespace = &session.namespace;
            partition.entries.retain(|(ns, _), _| ns != namespace);
            session.erase_all = false;
        }

        for (key, change) in core::mem::take(&mut session.staged) {
            let id = (session.namespace.clone(), key);
            match change {
                Some(entry) => {
                    partition.entries.insert(id, entry);
                }
                None => {
                    partition.entries.remove(&id);
                }
            }
        }

        self.commit_count += 1;
        Ok(())
    }

    fn close(&mut self, handle: NvsHandle) {
        self.sessions.remove(&handle);
    }
}
