//! Fuzz target: `DeviceConfig::from_bytes`
//!
//! Feeds arbitrary bytes to the postcard config decoder and verifies:
//! - No panics under arbitrary byte inputs
//! - Anything accepted also passes `validate()` and re-encodes to a
//!   blob that decodes to the same settings
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use doorbell::config::DeviceConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = DeviceConfig::from_bytes(data) else {
        return;
    };
    assert!(config.validate().is_ok());

    let blob = config.to_bytes().expect("accepted config must re-encode");
    let again = DeviceConfig::from_bytes(&blob).expect("re-encoded config must decode");
    assert_eq!(again.name, config.name);
    assert_eq!(again.watchdog_timeout_ms, config.watchdog_timeout_ms);
    assert_eq!(again.max_brightness, config.max_brightness);
});
