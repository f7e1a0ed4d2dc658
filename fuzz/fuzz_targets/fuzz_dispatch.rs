//! Fuzz target: OID parsing + `AgentEngine::dispatch`
//!
//! Splits the input into a request kind byte, a value selector and a
//! dotted identifier string, then verifies:
//! - No panics for any identifier text or value
//! - Parsed identifiers print back to the same segments
//! - GET-NEXT answers an identifier strictly greater than the request,
//!   or the sentinel
//!
//! cargo fuzz run fuzz_dispatch

#![no_main]

use core::cmp::Ordering;

use doorbell::agent::{AgentEngine, Request, RequestKind};
use doorbell::app::ports::{ActuatorPort, BootImagePort, ClockPort, TrapSink, WatchdogPort};
use doorbell::config::DeviceConfig;
use doorbell::error::ImageError;
use doorbell::memory::SimulatedLayout;
use doorbell::mib::oid::compare;
use doorbell::mib::{Oid, SENTINEL, Value};
use doorbell::state::DeviceState;
use libfuzzer_sys::fuzz_target;

// ── Inert hardware ────────────────────────────────────────────

struct Inert;

impl ActuatorPort for Inert {
    fn ring_bell(&mut self) {}
    fn release_bell(&mut self) {}
    fn set_brightness(&mut self, _level: u8) {}
}

impl WatchdogPort for Inert {
    fn enable(&mut self, _timeout_ms: u32) {}
    fn disable(&mut self) {}
    fn feed(&mut self) {}
    fn halt(&mut self) -> ! {
        unreachable!("dispatch must not halt")
    }
}

impl BootImagePort for Inert {
    fn invalidate_image(&mut self) -> Result<(), ImageError> {
        Err(ImageError::RecoveryMissing)
    }
}

impl ClockPort for Inert {
    fn now_ms(&self) -> u32 {
        u32::MAX - 10
    }
}

impl TrapSink for Inert {
    fn trap(&mut self, message: &str) {
        assert!(message.len() <= 64);
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }

    let kind = match data[0] % 5 {
        0 => RequestKind::Get,
        1 => RequestKind::GetNext,
        2 => RequestKind::Set,
        3 => RequestKind::GetBulk,
        _ => RequestKind::Other(data[0]),
    };
    let n = i32::from_le_bytes([data[2], data[3], data[4], data[5]]);
    let value = match data[1] % 4 {
        0 => None,
        1 => Some(Value::Null),
        2 => Some(Value::Integer(n)),
        _ => Some(Value::TimeTicks(n as u32)),
    };

    let Ok(text) = core::str::from_utf8(&data[6..]) else {
        return;
    };
    let Ok(oid) = text.parse::<Oid>() else {
        return;
    };
    let reparsed: Oid = oid.to_string().parse().expect("display output must parse");
    assert_eq!(reparsed, oid);

    let engine = AgentEngine::new(DeviceConfig::default(), SimulatedLayout::small_mcu());
    let state = DeviceState::new();
    state.set_management_online(true);
    let req = Request { kind, oid, value };
    let out = engine.dispatch(&req, &state, &mut Inert, &mut Inert);

    let r = out.response();
    if kind == RequestKind::GetNext && r.oid.as_slice() != SENTINEL {
        assert_eq!(compare(r.oid.as_slice(), req.oid.as_slice()), Ordering::Greater);
    }
    assert!(!out.is_reboot(), "reboot without a valid image change");
});
