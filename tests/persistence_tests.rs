//! Durability across handles and simulated resets.

use nvs32::platform::mock::{Faults, MockNvs};
use nvs32::{EspCode, NvsError, NvsStore, Operation, StoreConfig, ValueType};

fn app_config() -> StoreConfig {
    StoreConfig::new("nvs", "app").unwrap()
}

#[test]
fn committed_values_survive_power_cycle() {
    let mut nvs = MockNvs::new();
    {
        let mut store = NvsStore::init(&mut nvs, &app_config()).unwrap();
        store.create("boot_count", 0).unwrap();
        store.write("ssid", "home-net").unwrap();
    }

    nvs.power_cycle();

    let mut store = NvsStore::init(&mut nvs, &app_config()).unwrap();
    assert_eq!(store.read_i32("boot_count"), Ok(0));
    let mut buf = [0u8; 32];
    assert_eq!(store.read_str("ssid", &mut buf), Ok(9));
    assert_eq!(store.create("boot_count", 5), Err(NvsError::AlreadyExists));
}

#[test]
fn boot_counter_increments_across_resets() {
    let mut nvs = MockNvs::new();

    for expected in 0..5 {
        let mut store = NvsStore::init(&mut nvs, &app_config()).unwrap();
        let _ = store.create("boot_count", 0);
        let count = store.read_i32("boot_count").unwrap();
        assert_eq!(count, expected);
        store.write("boot_count", count + 1).unwrap();
        store.close();
        nvs.power_cycle();
    }

    assert_eq!(nvs.committed_i32("nvs", "app", "boot_count"), Some(5));
}

#[test]
fn failed_commit_is_lost_on_power_cycle() {
    let mut nvs = MockNvs::new();
    {
        let mut store = NvsStore::init(&mut nvs, &app_config()).unwrap();
        store.write("count", 1).unwrap();
    }

    nvs.inject_fault(Faults::COMMIT, EspCode::FAIL);
    {
        let mut store = NvsStore::init(&mut nvs, &app_config()).unwrap();
        assert_eq!(
            store.write("count", 2),
            Err(NvsError::Io {
                op: Operation::Commit,
                code: EspCode::FAIL,
            })
        );
    }
    nvs.clear_faults();
    nvs.power_cycle();

    let mut store = NvsStore::init(&mut nvs, &app_config()).unwrap();
    assert_eq!(store.read_i32("count"), Ok(1));
}

#[test]
fn corrupted_entry_is_dropped_on_rescan() {
    let mut nvs = MockNvs::new();
    {
        let mut store = NvsStore::init(&mut nvs, &app_config()).unwrap();
        store.write("good", 1).unwrap();
        store.write("bad", 2).unwrap();
    }

    assert!(nvs.inject_corruption("nvs", "app", "bad"));
    nvs.power_cycle();

    let mut store = NvsStore::init(&mut nvs, &app_config()).unwrap();
    assert_eq!(store.read_i32("good"), Ok(1));
    assert_eq!(store.read_i32("bad"), Err(NvsError::NotFound));
}

#[test]
fn corrupted_partition_fails_init() {
    let mut nvs = MockNvs::new();
    nvs.mark_corrupted("nvs", true);

    let result = NvsStore::init(&mut nvs, &app_config());
    assert_eq!(
        result.err(),
        Some(NvsError::Init {
            op: Operation::InitPartition,
            code: EspCode::NVS_NO_FREE_PAGES,
        })
    );
    assert_eq!(nvs.open_sessions(), 0);
}

#[test]
fn partitions_are_independent() {
    let mut nvs = MockNvs::with_partitions(&["nvs", "nvs_ext"]);
    let ext = StoreConfig::new("nvs_ext", "app").unwrap();
    {
        let mut store = NvsStore::init(&mut nvs, &ext).unwrap();
        store.write("mode", 2).unwrap();
    }

    let mut store = NvsStore::init(&mut nvs, &app_config()).unwrap();
    assert_eq!(store.read_i32("mode"), Err(NvsError::NotFound));
    store.erase_all().unwrap();
    store.close();

    assert_eq!(nvs.committed_i32("nvs_ext", "app", "mode"), Some(2));
}

#[test]
fn write_of_other_type_replaces_entry() {
    let mut nvs = MockNvs::new();
    {
        let mut store = NvsStore::init(&mut nvs, &app_config()).unwrap();
        store.write("slot", 7).unwrap();
        store.write("slot", "seven").unwrap();
        assert_eq!(store.read_i32("slot"), Err(NvsError::TypeMismatch));
    }

    assert_eq!(nvs.committed_type("nvs", "app", "slot"), Some(ValueType::Str));
}

#[test]
fn handles_release_sessions() {
    let mut nvs = MockNvs::new();

    let store = NvsStore::init(&mut nvs, &app_config()).unwrap();
    drop(store);
    let store = NvsStore::init(&mut nvs, &app_config()).unwrap();
    store.close();

    assert_eq!(nvs.open_sessions(), 0);
}
