//! Boot image adapter.
//!
//! "Invalidating" the running image means pointing the bootloader at the
//! factory partition, which holds the recovery loader. The next reset
//! lands there and waits for new firmware instead of booting this image.
//!
//! - **`target_os = "espidf"`**: `esp_ota_set_boot_partition` on the
//!   factory app partition.
//! - **`not(target_os = "espidf")`**: records the request only.

use log::{info, warn};

use crate::app::ports::BootImagePort;
use crate::error::ImageError;

#[derive(Default)]
pub struct BootImage {
    invalidated: bool,
}

impl BootImage {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the running image will not be booted again.
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    #[cfg(target_os = "espidf")]
    fn select_recovery() -> Result<(), ImageError> {
        use esp_idf_svc::sys::*;

        // SAFETY: read-only partition table lookups and one boot-select
        // write; the returned pointers live in the static partition table.
        unsafe {
            let factory = esp_partition_find_first(
                esp_partition_type_t_ESP_PARTITION_TYPE_APP,
                esp_partition_subtype_t_ESP_PARTITION_SUBTYPE_APP_FACTORY,
                core::ptr::null(),
            );
            if factory.is_null() || factory == esp_ota_get_running_partition() {
                return Err(ImageError::RecoveryMissing);
            }
            let ret = esp_ota_set_boot_partition(factory);
            if ret != ESP_OK {
                return Err(ImageError::BootSelectFailed(ret));
            }
        }
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn select_recovery() -> Result<(), ImageError> {
        Ok(())
    }
}

impl BootImagePort for BootImage {
    fn invalidate_image(&mut self) -> Result<(), ImageError> {
        if let Err(e) = Self::select_recovery() {
            warn!("BootImage: {}", e);
            return Err(e);
        }
        info!("BootImage: running image invalidated, next boot enters recovery");
        self.invalidated = true;
        Ok(())
    }
}
