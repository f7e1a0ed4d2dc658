//! Integration tests for the request → AgentEngine → DeviceState / ports pipeline.
//!
//! Every request goes through `dispatch` exactly as the transport would
//! send it, and the mock adapter records what reached the hardware.

use crate::mock_hw::{HwCall, MockHardware, RecordingTraps};

use doorbell::agent::engine::WRITE_ONLY_TEXT;
use doorbell::agent::{AgentEngine, Outcome, Request, RequestKind, Response};
use doorbell::config::DeviceConfig;
use doorbell::error::ManagementError;
use doorbell::memory::SimulatedLayout;
use doorbell::mib::registry::DOORBELL_OBJECTS;
use doorbell::mib::{ManagedObject, ObjectSource, Oid, Registry, SENTINEL, Value};
use doorbell::state::DeviceState;

const SYS_DESCR: &str = "1.3.6.1.2.1.1.1.0";
const SYS_UPTIME: &str = "1.3.6.1.2.1.1.3.0";
const SYS_SERVICES: &str = "1.3.6.1.2.1.1.7.0";
const BRIGHTNESS: &str = "1.3.6.1.4.1.50174.258.1.1.0";
const PULSE_NOW: &str = "1.3.6.1.4.1.50174.258.1.2.0";
const WATCHDOG_RESET: &str = "1.3.6.1.4.1.50174.258.1.3.0";
const WATCHDOG_ENABLE: &str = "1.3.6.1.4.1.50174.258.1.4.0";
const AUTO_PULSE: &str = "1.3.6.1.4.1.50174.258.1.5.0";
const RING_NOW: &str = "1.3.6.1.4.1.50174.258.1.7.0";
const RAM_TOTAL: &str = "1.3.6.1.4.1.50174.258.1.8.0";
const FLASH_FREE: &str = "1.3.6.1.4.1.50174.258.1.16.0";

struct Bench {
    engine: AgentEngine<SimulatedLayout>,
    state: DeviceState,
    hw: MockHardware,
    traps: RecordingTraps,
}

impl Bench {
    fn new() -> Self {
        let state = DeviceState::new();
        state.set_management_online(true);
        Self {
            engine: AgentEngine::new(DeviceConfig::default(), SimulatedLayout::small_mcu()),
            state,
            hw: MockHardware::at(42_000),
            traps: RecordingTraps::new(),
        }
    }

    fn send(&mut self, req: Request) -> Response {
        match self
            .engine
            .dispatch(&req, &self.state, &mut self.hw, &mut self.traps)
        {
            Outcome::Respond(r) => r,
            Outcome::Reboot(_) => panic!("unexpected reboot for {}", req.oid),
        }
    }

    fn get(&mut self, oid: &str) -> Response {
        self.send(Request::get(parse(oid)))
    }

    fn get_next(&mut self, oid: &str) -> Response {
        self.send(Request::get_next(parse(oid)))
    }

    fn set(&mut self, oid: &str, value: Value) -> Response {
        self.send(Request::set(parse(oid), value))
    }
}

fn parse(oid: &str) -> Oid {
    oid.parse().expect("test identifiers are well formed")
}

// ── Lookup ordering ──────────────────────────────────────────

#[test]
fn get_next_walks_every_object_then_sentinel() {
    let mut b = Bench::new();
    let mut cursor = String::new();
    let mut seen = Vec::new();
    loop {
        let r = b.get_next(&cursor);
        assert_eq!(r.kind, RequestKind::GetNext);
        if r.oid.as_slice() == SENTINEL {
            assert_eq!(r.result, Err(ManagementError::NoSuchName));
            break;
        }
        assert!(r.result.is_ok(), "{} failed: {:?}", r.oid, r.result);
        seen.push(r.oid.clone());
        cursor = r.oid.to_string();
    }
    let expected: Vec<Oid> = DOORBELL_OBJECTS
        .iter()
        .map(|o| Oid::from_segments(o.oid).unwrap())
        .collect();
    assert_eq!(seen, expected);
}

#[test]
fn get_next_from_each_row_returns_the_following_row() {
    let mut b = Bench::new();
    for pair in DOORBELL_OBJECTS.windows(2) {
        let from = Oid::from_segments(pair[0].oid).unwrap().to_string();
        let r = b.get_next(&from);
        assert_eq!(r.oid.as_slice(), pair[1].oid, "after {}", pair[0].name);
    }
}

#[test]
fn get_next_past_the_end_answers_sentinel() {
    let mut b = Bench::new();
    for oid in [FLASH_FREE, "1.3.6.1.4.2", "1.4", "2.0", "3"] {
        let r = b.get_next(oid);
        assert_eq!(r.oid.as_slice(), SENTINEL, "from {oid}");
        assert_eq!(r.result, Err(ManagementError::NoSuchName));
    }
}

#[test]
fn get_next_between_rows_enters_the_next_group() {
    let mut b = Bench::new();
    let r = b.get_next("1.3.6.1.2.1.1.7.0");
    assert_eq!(r.oid, parse(BRIGHTNESS));
    assert_eq!(r.result, Ok(Value::Integer(0)));
    let r = b.get_next("1.3.6.1.2.1.1.3");
    assert_eq!(r.oid, parse(SYS_UPTIME));
}

#[test]
fn numeric_successor_on_a_custom_table() {
    static WIDE: [ManagedObject; 3] = [
        ManagedObject { oid: &[1, 1], name: "a", source: ObjectSource::Services },
        ManagedObject { oid: &[1, 2], name: "b", source: ObjectSource::Services },
        ManagedObject { oid: &[1, 10], name: "c", source: ObjectSource::Services },
    ];
    let registry = Registry::from_table(&WIDE).unwrap();
    let engine = AgentEngine::with_registry(
        registry,
        DeviceConfig::default(),
        SimulatedLayout::small_mcu(),
    );
    let state = DeviceState::new();
    let mut hw = MockHardware::new();
    let mut traps = RecordingTraps::new();

    let mut next = |oid: &str| -> Oid {
        let out = engine.dispatch(&Request::get_next(parse(oid)), &state, &mut hw, &mut traps);
        out.response().oid.clone()
    };
    assert_eq!(next("1.1"), parse("1.2"));
    assert_eq!(next("1.2"), parse("1.10"));
    assert_eq!(next("1.10").as_slice(), SENTINEL);
}

// ── GET ──────────────────────────────────────────────────────

#[test]
fn read_only_get_is_idempotent() {
    let mut b = Bench::new();
    for oid in [SYS_DESCR, SYS_SERVICES, RAM_TOTAL, FLASH_FREE] {
        let first = b.get(oid);
        let second = b.get(oid);
        assert!(first.result.is_ok());
        assert_eq!(first, second, "{oid}");
    }
    assert!(b.hw.calls.is_empty());
}

#[test]
fn system_group_values() {
    let mut b = Bench::new();
    assert_eq!(b.get(SYS_DESCR).result, Ok(Value::text("SNMP Doorbell")));
    assert_eq!(b.get(SYS_UPTIME).result, Ok(Value::TimeTicks(4_200)));
    assert_eq!(b.get(SYS_SERVICES).result, Ok(Value::Integer(72)));
    assert_eq!(
        b.get("1.3.6.1.2.1.1.2.0").result,
        Ok(Value::text("1.3.6.1.4.1.50174.258.1"))
    );
}

#[test]
fn write_only_objects_read_as_placeholder() {
    let mut b = Bench::new();
    for oid in [PULSE_NOW, WATCHDOG_RESET, RING_NOW] {
        assert_eq!(b.get(oid).result, Ok(Value::text(WRITE_ONLY_TEXT)));
    }
    assert!(b.hw.calls.is_empty());
}

#[test]
fn unknown_identifier_is_no_such_name() {
    let mut b = Bench::new();
    for oid in ["1.3.6.1.2.1.1.8.0", "1.3.6.1.2.1.1.1", "2.0", ""] {
        let r = b.get(oid);
        assert_eq!(r.result, Err(ManagementError::NoSuchName), "GET {oid}");
        assert_eq!(r.oid, parse(oid));
        let r = b.set(oid, Value::Integer(1));
        assert_eq!(r.result, Err(ManagementError::NoSuchName), "SET {oid}");
    }
}

#[test]
fn memory_metrics_add_up() {
    let mut b = Bench::new();
    b.engine.layout_mut().allocate(0x80);
    b.engine.layout_mut().push_stack(0x20);

    let mut int = |suffix: u32| -> i32 {
        let oid = format!("1.3.6.1.4.1.50174.258.1.{suffix}.0");
        b.get(&oid).result.unwrap().as_integer().unwrap()
    };
    let (total, data, bss, heap, stack, free) = (int(8), int(9), int(10), int(11), int(12), int(13));
    assert_eq!(heap, 0x80);
    assert_eq!(stack, 0x60);
    assert_eq!(free + data + bss + heap + stack, total);

    let (flash_total, flash_used, flash_free) = (int(14), int(15), int(16));
    assert_eq!(flash_used + flash_free, flash_total);
}

// ── SET ──────────────────────────────────────────────────────

#[test]
fn brightness_round_trips_and_drives_led() {
    let mut b = Bench::new();
    let r = b.set(BRIGHTNESS, Value::Integer(180));
    assert_eq!(r.result, Ok(Value::Integer(180)));
    assert_eq!(b.get(BRIGHTNESS).result, Ok(Value::Integer(180)));
    assert_eq!(b.state.standing_brightness(), 180);
    assert_eq!(b.hw.last_call(), Some(&HwCall::SetBrightness(180)));
}

#[test]
fn set_on_read_only_object_changes_nothing() {
    let mut b = Bench::new();
    for oid in [SYS_DESCR, SYS_UPTIME, RAM_TOTAL] {
        let r = b.set(oid, Value::Integer(5));
        assert_eq!(r.result, Err(ManagementError::ReadOnly), "{oid}");
    }
    assert_eq!(b.get(SYS_DESCR).result, Ok(Value::text("SNMP Doorbell")));
    assert!(b.hw.calls.is_empty());
    assert!(b.traps.traps.is_empty());
}

#[test]
fn wrong_type_leaves_state_untouched() {
    let mut b = Bench::new();
    b.set(BRIGHTNESS, Value::Integer(10));
    let r = b.set(BRIGHTNESS, Value::text("bright"));
    assert_eq!(r.result, Err(ManagementError::DecodeFailure));
    let r = b.set(AUTO_PULSE, Value::Integer(-3));
    assert_eq!(r.result, Err(ManagementError::DecodeFailure));
    assert_eq!(b.state.standing_brightness(), 10);
    assert_eq!(b.state.auto_pulse_interval_ms(), 0);
}

#[test]
fn pulse_now_sets_window_from_now() {
    let mut b = Bench::new();
    let r = b.set(PULSE_NOW, Value::Integer(7));
    assert_eq!(r.result, Ok(Value::Integer(7)));
    assert_eq!(b.state.ring_at_ms(), 42_000);
    assert_eq!(b.state.pulse_until_ms(), b.state.ring_at_ms() + 7_000);
    assert!(b.state.is_pulsing(42_000));
}

#[test]
fn auto_pulse_is_stored_in_ms_and_read_in_seconds() {
    let mut b = Bench::new();
    assert_eq!(b.set(AUTO_PULSE, Value::Integer(30)).result, Ok(Value::Integer(30)));
    assert_eq!(b.state.auto_pulse_interval_ms(), 30_000);
    assert_eq!(b.get(AUTO_PULSE).result, Ok(Value::Integer(30)));
}

#[test]
fn watchdog_reset_feeds_and_traps() {
    let mut b = Bench::new();
    let r = b.set(WATCHDOG_RESET, Value::Integer(1));
    assert_eq!(r.result, Ok(Value::Integer(1)));
    assert_eq!(b.hw.calls, [HwCall::WatchdogFeed]);
    assert!(b.traps.contains("SNMP reset WDT"));
}

#[test]
fn traps_wait_for_the_agent_to_come_online() {
    let mut b = Bench::new();
    b.state.set_management_online(false);
    b.set(WATCHDOG_RESET, Value::Integer(1));
    assert_eq!(b.hw.count(HwCall::WatchdogFeed), 1);
    assert!(b.traps.traps.is_empty());
}

#[test]
fn watchdog_enable_arms_long_timeout() {
    let mut b = Bench::new();
    let r = b.set(WATCHDOG_ENABLE, Value::Null);
    assert_eq!(r.result, Ok(Value::Null));
    assert_eq!(b.hw.calls, [HwCall::WatchdogEnable(8_000)]);
}

#[test]
fn ring_now_rings_and_stamps_time() {
    let mut b = Bench::new();
    let r = b.set(RING_NOW, Value::Integer(1));
    assert_eq!(r.result, Ok(Value::Integer(1)));
    assert_eq!(b.hw.calls, [HwCall::RingBell]);
    assert_eq!(b.state.ring_at_ms(), 42_000);
    assert!(!b.state.is_pulsing(42_000));
}

#[test]
fn every_accepted_set_emits_a_trace() {
    let mut b = Bench::new();
    b.set(BRIGHTNESS, Value::Integer(1));
    b.set(PULSE_NOW, Value::Integer(1));
    b.set(AUTO_PULSE, Value::Integer(1));
    b.set(RING_NOW, Value::Integer(1));
    assert_eq!(b.traps.traps.len(), 4);
}

#[test]
fn unsupported_kinds_are_refused() {
    let mut b = Bench::new();
    for kind in [RequestKind::GetBulk, RequestKind::Other(0xA4)] {
        let r = b.send(Request {
            kind,
            oid: parse(BRIGHTNESS),
            value: Some(Value::Integer(3)),
        });
        assert_eq!(r.result, Err(ManagementError::NoSuchName));
    }
    assert_eq!(b.state.standing_brightness(), 0);
}
