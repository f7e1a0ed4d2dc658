//! Task Watchdog Timer (TWDT) driver.
//!
//! Wraps the ESP-IDF TWDT API. Managers arm it with the long timeout and
//! feed it over the network; the reprogram path re-arms it with a short
//! timeout and stops feeding so the chip resets into the recovery loader.
//!
//! Off target the driver only tracks what it was asked to do.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::{info, warn};

pub struct Watchdog {
    /// Timeout of the current arming, `None` while disarmed.
    armed_ms: Option<u32>,
    feeds: u32,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl Watchdog {
    /// Starts disarmed; nothing resets the device until [`Watchdog::enable`].
    pub fn new() -> Self {
        Self {
            armed_ms: None,
            feeds: 0,
        }
    }

    pub fn armed_ms(&self) -> Option<u32> {
        self.armed_ms
    }

    pub fn feeds(&self) -> u32 {
        self.feeds
    }

    /// Arm with `timeout_ms` and subscribe the calling task.
    pub fn enable(&mut self, timeout_ms: u32) {
        #[cfg(target_os = "espidf")]
        {
            let cfg = esp_task_wdt_config_t {
                timeout_ms,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            // SAFETY: plain FFI calls; cfg outlives both.
            unsafe {
                let mut ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK {
                    // Not initialised yet.
                    ret = esp_task_wdt_init(&cfg);
                }
                if ret != ESP_OK {
                    warn!("Watchdog: configure returned {}", ret);
                    return;
                }
                if self.armed_ms.is_none() {
                    let ret = esp_task_wdt_add(core::ptr::null_mut());
                    if ret != ESP_OK {
                        warn!("Watchdog: failed to subscribe ({})", ret);
                        return;
                    }
                }
            }
        }
        info!("Watchdog: armed ({} ms, panic on trigger)", timeout_ms);
        self.armed_ms = Some(timeout_ms);
    }

    /// Unsubscribe the calling task. The timer itself stays configured.
    pub fn disable(&mut self) {
        if self.armed_ms.is_none() {
            return;
        }
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: plain FFI call for the current task.
            let ret = unsafe { esp_task_wdt_delete(core::ptr::null_mut()) };
            if ret != ESP_OK {
                warn!("Watchdog: unsubscribe returned {}", ret);
            }
        }
        info!("Watchdog: disarmed");
        self.armed_ms = None;
    }

    /// Restart the countdown. No-op while disarmed.
    pub fn feed(&mut self) {
        if self.armed_ms.is_none() {
            return;
        }
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: the current task is subscribed.
            unsafe {
                esp_task_wdt_reset();
            }
        }
        self.feeds = self.feeds.wrapping_add(1);
    }

    /// Stop feeding and wait for the reset.
    pub fn halt(&mut self) -> ! {
        warn!("Watchdog: halted, waiting for reset ({:?} ms)", self.armed_ms);
        loop {
            #[cfg(target_os = "espidf")]
            // SAFETY: yields to the scheduler; the TWDT fires regardless.
            unsafe {
                vTaskDelay(10);
            }
            #[cfg(not(target_os = "espidf"))]
            std::thread::sleep(std::time::Duration::from_millis(100));
        }
    }
}
