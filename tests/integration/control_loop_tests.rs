//! Integration tests for the agent → DeviceState → BellController pipeline.
//!
//! The agent writes shared state on SET; the control loop picks it up on
//! its next tick and drives the mock actuators.

use crate::mock_hw::{HwCall, MockHardware, RecordingTraps};

use doorbell::agent::{AgentEngine, Request};
use doorbell::config::DeviceConfig;
use doorbell::control::BellController;
use doorbell::memory::SimulatedLayout;
use doorbell::mib::Value;
use doorbell::state::DeviceState;

const BRIGHTNESS: &str = "1.3.6.1.4.1.50174.258.1.1.0";
const PULSE_NOW: &str = "1.3.6.1.4.1.50174.258.1.2.0";
const AUTO_PULSE: &str = "1.3.6.1.4.1.50174.258.1.5.0";
const RING_NOW: &str = "1.3.6.1.4.1.50174.258.1.7.0";

fn set(
    engine: &AgentEngine<SimulatedLayout>,
    state: &DeviceState,
    hw: &mut MockHardware,
    oid: &str,
    value: i32,
) {
    let mut traps = RecordingTraps::new();
    let req = Request::set(oid.parse().unwrap(), Value::Integer(value));
    let outcome = engine.dispatch(&req, state, hw, &mut traps);
    assert!(outcome.response().result.is_ok(), "SET {oid} = {value}");
}

fn rig() -> (AgentEngine<SimulatedLayout>, BellController, DeviceState, MockHardware) {
    let config = DeviceConfig::default();
    let bell = BellController::new(&config);
    let engine = AgentEngine::new(config, SimulatedLayout::small_mcu());
    (engine, bell, DeviceState::new(), MockHardware::new())
}

#[test]
fn pulse_now_breathes_then_settles() {
    let (engine, mut bell, state, mut hw) = rig();
    set(&engine, &state, &mut hw, BRIGHTNESS, 20);
    hw.now_ms = 10_000;
    set(&engine, &state, &mut hw, PULSE_NOW, 2);

    let mut levels = Vec::new();
    for t in (10_000..=12_500).step_by(250) {
        levels.push(bell.tick(t, &state, &mut hw));
    }
    let peak = *levels.iter().max().unwrap();
    assert_eq!(peak, 255, "ramp reaches full brightness");
    assert_eq!(levels.first(), Some(&20));
    assert_eq!(levels.last(), Some(&20), "back to standing after the window");
    assert!(levels.iter().all(|&l| l >= 20));
}

#[test]
fn led_is_written_only_on_change() {
    let (engine, mut bell, state, mut hw) = rig();
    set(&engine, &state, &mut hw, BRIGHTNESS, 90);
    hw.calls.clear();
    for t in (0..1_000).step_by(20) {
        bell.tick(t, &state, &mut hw);
    }
    assert_eq!(hw.brightness_writes(), [90]);
}

#[test]
fn auto_pulse_set_over_the_agent_repeats() {
    let (engine, mut bell, state, mut hw) = rig();
    set(&engine, &state, &mut hw, AUTO_PULSE, 60);

    bell.tick(59_999, &state, &mut hw);
    assert!(!state.is_pulsing(59_999));
    bell.tick(60_000, &state, &mut hw);
    assert!(state.is_pulsing(60_000));
    assert_eq!(state.pulse_until_ms(), 65_000);

    bell.tick(119_999, &state, &mut hw);
    assert_eq!(state.ring_at_ms(), 60_000);
    bell.tick(120_000, &state, &mut hw);
    assert_eq!(state.ring_at_ms(), 120_000);
}

#[test]
fn ring_now_strikes_then_releases() {
    let (engine, mut bell, state, mut hw) = rig();
    hw.now_ms = 3_000;
    set(&engine, &state, &mut hw, RING_NOW, 1);
    assert_eq!(hw.count(HwCall::RingBell), 1);

    bell.tick(3_000, &state, &mut hw);
    bell.tick(3_100, &state, &mut hw);
    assert_eq!(hw.count(HwCall::ReleaseBell), 0);
    bell.tick(3_160, &state, &mut hw);
    assert_eq!(hw.count(HwCall::ReleaseBell), 1);
}

#[test]
fn ring_now_at_boot_is_released() {
    let (engine, mut bell, state, mut hw) = rig();
    bell.tick(0, &state, &mut hw);
    hw.now_ms = 0;
    set(&engine, &state, &mut hw, RING_NOW, 1);

    for t in (0..2_000).step_by(20) {
        bell.tick(t, &state, &mut hw);
    }
    assert_eq!(hw.count(HwCall::RingBell), 1);
    assert_eq!(hw.count(HwCall::ReleaseBell), 1);
}

#[test]
fn longest_pulse_over_the_agent_is_visible() {
    let (engine, mut bell, state, mut hw) = rig();
    set(&engine, &state, &mut hw, BRIGHTNESS, 10);
    hw.now_ms = 1_000;
    set(&engine, &state, &mut hw, PULSE_NOW, 2_147_483);
    assert!(state.is_pulsing(1_000));
    assert!(bell.tick(2_000, &state, &mut hw) > 10);
}
