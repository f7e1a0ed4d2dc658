//! Doorbell Firmware: Main Entry Point
//!
//! Hexagonal architecture with a single cooperative main loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogTrapSink     SystemClock  EspLayout │
//! │  (Actuator+Watchdog     (TrapSink)      (ClockPort)  (Memory-  │
//! │   +BootImage+Clock)                                   Layout)  │
//! │  ManagementTransport (UDP agent, NullTransport until wired)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │   AgentEngine (GET / GET-NEXT / SET)  BellController   │    │
//! │  │              ╲                       ╱                 │    │
//! │  │               ╲── DeviceState (atomics) ──╱            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyOutputPin, PinDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{error, info, warn};

use doorbell::adapters::hardware::HardwareAdapter;
use doorbell::adapters::layout::EspLayout;
use doorbell::adapters::time::SystemClock;
use doorbell::adapters::trap_sink::LogTrapSink;
use doorbell::agent::{AgentEngine, ManagementTransport, NullTransport, Outcome};
use doorbell::app::ports::ClockPort;
use doorbell::config::DeviceConfig;
use doorbell::control::BellController;
use doorbell::diagnostics::trace;
use doorbell::drivers::bell::BellDriver;
use doorbell::drivers::led::LedDriver;
use doorbell::drivers::watchdog::Watchdog;
use doorbell::pins;
use doorbell::state::DeviceState;

/// Shared between the agent and the control loop for the whole run.
static STATE: DeviceState = DeviceState::new();

/// Optional JSON configuration baked in at build time.
const BUILD_CONFIG: Option<&str> = option_env!("DOORBELL_CONFIG_JSON");

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Doorbell v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = match BUILD_CONFIG.map(DeviceConfig::from_json) {
        Some(Ok(cfg)) => {
            info!("Config loaded from build environment");
            cfg
        }
        Some(Err(e)) => {
            warn!("Build config rejected ({}), using defaults", e);
            DeviceConfig::default()
        }
        None => DeviceConfig::default(),
    };

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    // SAFETY: the pin numbers in `pins` are not claimed anywhere else.
    let bell_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::BELL_GPIO) })?;
    let led_pin = unsafe { AnyOutputPin::new(pins::LED_GPIO) };

    let timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new()
            .frequency(Hertz(pins::LED_PWM_FREQ_HZ))
            .resolution(Resolution::Bits10),
    )?;
    let led_channel = LedcDriver::new(peripherals.ledc.channel0, &timer, led_pin)?;

    let mut hw = HardwareAdapter::new(
        BellDriver::new(bell_pin),
        LedDriver::new(led_channel),
        Watchdog::new(),
        SystemClock::new(),
    );

    // ── 4. Agent + control loop ───────────────────────────────
    let engine = AgentEngine::new(config.clone(), EspLayout::new());
    let mut bell = BellController::new(&config);
    let mut traps = LogTrapSink::new();

    // The UDP agent implements ManagementTransport; until it is wired the
    // device runs its control loop with nobody to answer.
    let mut transport = NullTransport;

    STATE.set_network_online(true);
    STATE.set_management_online(true);
    trace(&STATE, &mut traps, format_args!("Doorbell up, {} objects", engine.registry().len()));

    info!("System ready. Entering main loop.");

    // ── 5. Main loop ──────────────────────────────────────────
    loop {
        let now = hw.now_ms();
        bell.tick(now, &STATE, &mut hw);

        loop {
            let request = match transport.poll_request() {
                Ok(Some(r)) => r,
                Ok(None) => break,
                Err(e) => {
                    warn!("transport poll failed: {:?}", e);
                    break;
                }
            };

            let outcome = engine.dispatch(&request, &STATE, &mut hw, &mut traps);
            if let Err(e) = transport.send_response(outcome.response()) {
                warn!("transport send failed: {:?}", e);
            }
            if let Outcome::Reboot(pending) = outcome {
                error!("Reprogram requested, halting");
                pending.halt(&mut hw);
            }
        }

        FreeRtos::delay_ms(config.control_tick_ms);
    }
}
