//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements        | Connects to                 |
//! |--------------|-------------------|-----------------------------|
//! | `hardware`   | ActuatorPort      | bell GPIO, LED PWM          |
//! |              | WatchdogPort      | ESP-IDF task watchdog       |
//! |              | BootImagePort     | via `boot_image`            |
//! |              | ClockPort         | via `time`                  |
//! | `boot_image` | BootImagePort     | OTA boot partition select   |
//! | `time`       | ClockPort         | ESP32 high-resolution timer |
//! | `trap_sink`  | TrapSink          | Serial log output           |
//! | `layout`     | MemoryLayout      | Linker symbols, heap stats  |

pub mod boot_image;
pub mod hardware;
#[cfg(target_os = "espidf")]
pub mod layout;
pub mod time;
pub mod trap_sink;
