//! End-to-end store scenarios against the in-memory backend.

use nvs32::core::log_buffer::LogLevel;
use nvs32::core::log_router::{clear_buffer, get_buffered_logs};
use nvs32::platform::mock::MockNvs;
use nvs32::{NvsError, NvsStore, StoreConfig};

fn app_config() -> StoreConfig {
    StoreConfig::new("nvs", "app").unwrap()
}

fn open(nvs: &mut MockNvs) -> NvsStore<&mut MockNvs> {
    NvsStore::init(nvs, &app_config()).unwrap()
}

#[test]
fn create_then_read_integer() {
    let mut nvs = MockNvs::new();
    let mut store = open(&mut nvs);

    assert_eq!(store.create("boot_count", 0), Ok(()));
    assert_eq!(store.read_i32("boot_count"), Ok(0));
}

#[test]
fn create_does_not_overwrite_but_write_does() {
    let mut nvs = MockNvs::new();
    let mut store = open(&mut nvs);
    store.create("boot_count", 0).unwrap();

    assert_eq!(store.create("boot_count", 42), Err(NvsError::AlreadyExists));
    assert_eq!(store.read_i32("boot_count"), Ok(0));

    assert_eq!(store.write("boot_count", 42), Ok(()));
    assert_eq!(store.read_i32("boot_count"), Ok(42));
}

#[test]
fn string_read_respects_buffer_size() {
    let mut nvs = MockNvs::new();
    let mut store = open(&mut nvs);
    store.write("ssid", "home-net").unwrap();

    let mut buf = [0u8; 32];
    assert_eq!(store.read_str("ssid", &mut buf), Ok(9));
    assert_eq!(&buf[..9], b"home-net\0");

    let mut small = *b"abcd";
    assert_eq!(
        store.read_str("ssid", &mut small),
        Err(NvsError::BufferTooSmall {
            required: 9,
            available: 4,
        })
    );
    assert_eq!(&small, b"abcd");
}

#[test]
fn erased_key_reads_not_found() {
    let mut nvs = MockNvs::new();
    let mut store = open(&mut nvs);
    store.write("ssid", "a").unwrap();

    assert_eq!(store.erase_key("ssid"), Ok(()));

    let mut buf = [0u8; 32];
    assert_eq!(store.read_str("ssid", &mut buf), Err(NvsError::NotFound));

    assert_eq!(store.create("ssid", "b"), Ok(()));
    assert_eq!(store.read_str("ssid", &mut buf), Ok(2));
    assert_eq!(&buf[..2], b"b\0");
}

#[test]
fn erase_all_removes_every_key() {
    let mut nvs = MockNvs::new();
    let mut store = open(&mut nvs);
    store.write("ssid", "x").unwrap();
    store.write("count", 7).unwrap();

    assert_eq!(store.erase_all(), Ok(()));

    let mut buf = [0u8; 32];
    assert_eq!(store.read_str("ssid", &mut buf), Err(NvsError::NotFound));
    assert_eq!(store.read_i32("count"), Err(NvsError::NotFound));
}

#[test]
fn reads_are_type_isolated() {
    let mut nvs = MockNvs::new();
    let mut store = open(&mut nvs);
    store.write("count", 7).unwrap();

    let mut buf = [0u8; 16];
    assert_eq!(store.read_str("count", &mut buf), Err(NvsError::TypeMismatch));
    assert_eq!(buf, [0u8; 16]);
    assert_eq!(store.read_i32("count"), Ok(7));
}

#[test]
fn create_is_idempotent_for_strings() {
    let mut nvs = MockNvs::new();
    let mut store = open(&mut nvs);

    store.create_str("ssid", "first").unwrap();
    assert_eq!(store.create_str("ssid", "second"), Err(NvsError::AlreadyExists));

    let ssid: heapless::String<16> = store.read_string("ssid").unwrap();
    assert_eq!(ssid.as_str(), "first");
}

#[test]
fn overwrite_keeps_last_value() {
    let mut nvs = MockNvs::new();
    let mut store = open(&mut nvs);

    for v in [1, -5, i32::MAX, i32::MIN, 12] {
        store.write_i32("level", v).unwrap();
    }
    assert_eq!(store.read_i32("level"), Ok(12));

    store.write_str("name", "a much longer value").unwrap();
    store.write_str("name", "short").unwrap();
    let mut buf = [0u8; 32];
    assert_eq!(store.read_str("name", &mut buf), Ok(6));
    assert_eq!(&buf[..6], b"short\0");
}

#[test]
fn empty_string_round_trips() {
    let mut nvs = MockNvs::new();
    let mut store = open(&mut nvs);
    store.write("empty", "").unwrap();

    let mut buf = [0xFFu8; 1];
    assert_eq!(store.read_str("empty", &mut buf), Ok(1));
    assert_eq!(buf, [0]);
}

#[test]
fn erase_all_leaves_other_namespaces() {
    let mut nvs = MockNvs::new();
    {
        let mut other = NvsStore::init(&mut nvs, &StoreConfig::new("nvs", "wifi").unwrap())
            .unwrap();
        other.write("ssid", "home").unwrap();
    }

    let mut store = open(&mut nvs);
    store.write("count", 1).unwrap();
    store.erase_all().unwrap();
    store.close();

    assert_eq!(nvs.committed_str("nvs", "wifi", "ssid").as_deref(), Some("home"));
    assert_eq!(nvs.entry_count("nvs", "app"), 0);
}

#[test]
fn every_mutation_commits() {
    let mut nvs = MockNvs::new();
    let mut store = open(&mut nvs);

    store.create("a", 1).unwrap();
    store.write("b", "two").unwrap();
    store.erase_key("a").unwrap();
    store.erase_all().unwrap();
    store.create("b", 3).unwrap();
    store.close();

    assert_eq!(nvs.commit_count(), 5);
}

#[test]
fn failures_log_one_error_line_with_code() {
    let mut nvs = MockNvs::new();
    let mut store = open(&mut nvs);
    store.write("count", 7).unwrap();
    clear_buffer();

    let mut buf = [0u8; 16];
    let _ = store.read_str("count", &mut buf);
    let _ = store.read_i32("missing");
    let _ = store.erase_key("missing");

    let logs = get_buffered_logs();
    assert_eq!(logs.len(), 3);
    for line in logs.iter() {
        assert_eq!(line.level, LogLevel::Error);
        assert_eq!(line.tag, "NVS");
        assert!(line.message.contains("[0x110"), "{}", line.message);
    }
}

#[test]
fn quiet_store_logs_only_errors() {
    let mut nvs = MockNvs::new();
    let config = app_config().with_debug(false);
    let mut store = NvsStore::init(&mut nvs, &config).unwrap();
    clear_buffer();

    store.create("a", 1).unwrap();
    store.write("a", 2).unwrap();
    store.erase_key("a").unwrap();
    store.erase_all().unwrap();
    assert!(get_buffered_logs().is_empty());

    let _ = store.read_i32("a");
    let logs = get_buffered_logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].level, LogLevel::Error);
}
