//! ESP32 platform implementation
//!
//! Binds the platform traits to ESP-IDF through `esp-idf-sys`.
//! Requires the `esp32` feature and an ESP-IDF (std) target.

mod nvs;

pub use nvs::EspNvs;
