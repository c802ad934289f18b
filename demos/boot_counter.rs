//! Boot counter on the in-memory store
//!
//! Simulates a handful of device resets. Each "boot" opens the configured
//! namespace, creates the counter on first boot, bumps it and records the
//! last boot reason.
//!
//! ```sh
//! NVS_NAMESPACE=demo cargo run --example boot_counter --features mock
//! ```

use nvs32::config::default_config;
use nvs32::platform::mock::{MockNvs, DEFAULT_PARTITION};
use nvs32::{log_error, log_info, log_warn, NvsError, NvsStore, StoreConfig};

const TAG: &str = "DEMO";
const BOOTS: i32 = 3;

fn boot(nvs: &mut MockNvs, config: &StoreConfig, reason: &str) -> Result<i32, NvsError> {
    let mut store = NvsStore::init(nvs, config)?;

    match store.create("boot_count", 0) {
        Ok(()) => log_info!(TAG, "First boot, counter created"),
        Err(NvsError::AlreadyExists) => {}
        Err(e) => return Err(e),
    }

    let count = store.read_i32("boot_count")? + 1;
    store.write("boot_count", count)?;
    store.write("last_reason", reason)?;

    let previous: heapless::String<32> = store.read_string("last_reason")?;
    log_info!(TAG, "Boot #{} ({})", count, previous);
    Ok(count)
}

fn main() {
    let config = match default_config() {
        Ok(config) if config.partition() == DEFAULT_PARTITION => config,
        Ok(config) => {
            log_warn!(
                TAG,
                "Partition ['{}'] not simulated, using ['{}']",
                config.partition(),
                DEFAULT_PARTITION
            );
            match StoreConfig::new(DEFAULT_PARTITION, config.namespace()) {
                Ok(fallback) => fallback.with_debug(config.debug()),
                Err(e) => {
                    log_error!(TAG, "Invalid configuration: {}", e);
                    return;
                }
            }
        }
        Err(e) => {
            log_error!(TAG, "Invalid configuration: {}", e);
            return;
        }
    };

    let mut nvs = MockNvs::new();
    for i in 0..BOOTS {
        let reason = if i == 0 { "power-on" } else { "watchdog" };
        if let Err(e) = boot(&mut nvs, &config, reason) {
            log_error!(TAG, "Boot failed: {}", e);
            return;
        }
        nvs.power_cycle();
    }

    log_info!(
        TAG,
        "Counter after {} boots: {:?}",
        BOOTS,
        nvs.committed_i32(config.partition(), config.namespace(), "boot_count")
    );
}
