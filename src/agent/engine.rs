//! Dispatch engine: answers one request against the registry.
//!
//! Resolution by request kind:
//!
//! | Kind     | Lookup    | No reader / writer        |
//! |----------|-----------|---------------------------|
//! | GET      | exact     | text `"Write-only node"`  |
//! | GET-NEXT | successor | same as GET; end of table answers the sentinel with `NoSuchName` |
//! | SET      | exact     | `ReadOnly`                |
//!
//! Anything else answers `NoSuchName`. A rejected SET never touches state.

use log::{debug, info, warn};

use crate::app::ports::{ClockPort, DevicePort, TrapSink};
use crate::config::DeviceConfig;
use crate::diagnostics::trace;
use crate::error::ManagementError;
use crate::memory::{self, MemoryLayout};
use crate::mib::registry::{IdentityText, Metric, StateField, Trigger};
use crate::mib::{ManagedObject, ObjectSource, Oid, Registry, SENTINEL, Successor, Value};
use crate::state::{DeviceState, MAX_PULSE_MS};

use super::request::{Outcome, PendingReboot, Request, RequestKind, Response};

/// Placeholder returned when reading an object that has no reader.
pub const WRITE_ONLY_TEXT: &str = "Write-only node";

/// Trap text sent when a manager feeds the watchdog.
pub const WATCHDOG_RESET_TRAP: &str = "SNMP reset WDT";

/// What a successful writer asks the caller to do next.
enum Effect {
    Continue,
    Reboot,
}

pub struct AgentEngine<L: MemoryLayout> {
    registry: Registry<'static>,
    config: DeviceConfig,
    layout: L,
}

impl<L: MemoryLayout> AgentEngine<L> {
    /// Engine over the built-in doorbell table.
    pub fn new(config: DeviceConfig, layout: L) -> Self {
        Self::with_registry(Registry::doorbell(), config, layout)
    }

    pub fn with_registry(registry: Registry<'static>, config: DeviceConfig, layout: L) -> Self {
        Self {
            registry,
            config,
            layout,
        }
    }

    pub fn registry(&self) -> &Registry<'static> {
        &self.registry
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    /// Resolve one request.
    ///
    /// The caller sends [`Outcome::response`] in every case and, for
    /// [`Outcome::Reboot`], halts afterwards.
    pub fn dispatch(
        &self,
        req: &Request,
        state: &DeviceState,
        hw: &mut impl DevicePort,
        traps: &mut impl TrapSink,
    ) -> Outcome {
        debug!("{} {}", req.kind, req.oid);
        match req.kind {
            RequestKind::Get => Outcome::Respond(self.get(req, state, &*hw)),
            RequestKind::GetNext => Outcome::Respond(self.get_next(req, state, &*hw)),
            RequestKind::Set => self.set(req, state, hw, traps),
            RequestKind::GetBulk | RequestKind::Other(_) => {
                debug!("unsupported request kind {}", req.kind);
                Outcome::Respond(respond(req.kind, req.oid.clone(), Err(ManagementError::NoSuchName)))
            }
        }
    }

    // ── GET / GET-NEXT ────────────────────────────────────────

    fn get(&self, req: &Request, state: &DeviceState, clock: &impl ClockPort) -> Response {
        let result = match self.registry.exact(req.oid.as_slice()) {
            Some(obj) => Ok(self.read(obj, state, clock)),
            None => Err(ManagementError::NoSuchName),
        };
        respond(req.kind, req.oid.clone(), result)
    }

    fn get_next(&self, req: &Request, state: &DeviceState, clock: &impl ClockPort) -> Response {
        match self.registry.successor(req.oid.as_slice()) {
            Successor::Object(obj) => {
                respond(req.kind, oid_of(obj.oid), Ok(self.read(obj, state, clock)))
            }
            Successor::EndOfTree => {
                respond(req.kind, oid_of(SENTINEL), Err(ManagementError::NoSuchName))
            }
        }
    }

    /// Current value of `obj`, recomputed on every call.
    pub fn read(&self, obj: &ManagedObject, state: &DeviceState, clock: &impl ClockPort) -> Value {
        if !obj.access().readable() {
            return Value::text(WRITE_ONLY_TEXT);
        }
        match obj.source {
            ObjectSource::Identity(which) => Value::text(self.identity(which)),
            ObjectSource::Uptime => Value::TimeTicks(clock.now_ms() / 10),
            ObjectSource::Services => Value::Integer(self.config.services),
            ObjectSource::State(StateField::Brightness) => {
                Value::Integer(i32::from(state.standing_brightness()))
            }
            ObjectSource::State(StateField::AutoPulse) => {
                Value::Integer(saturate(state.auto_pulse_interval_ms() / 1000))
            }
            ObjectSource::Metric(m) => Value::Integer(saturate(self.metric(m))),
            ObjectSource::Trigger(_) => Value::text(WRITE_ONLY_TEXT),
        }
    }

    fn identity(&self, which: IdentityText) -> &str {
        match which {
            IdentityText::Description => &self.config.description,
            IdentityText::ObjectId => &self.config.object_id,
            IdentityText::Contact => &self.config.contact,
            IdentityText::Name => &self.config.name,
            IdentityText::Location => &self.config.location,
        }
    }

    fn metric(&self, m: Metric) -> u32 {
        let l = &self.layout;
        match m {
            Metric::RamTotal => memory::total_ram(l),
            Metric::RamData => memory::static_data_size(l),
            Metric::RamBss => memory::zero_init_data_size(l),
            Metric::RamHeap => memory::heap_size(l),
            Metric::RamStack => memory::stack_size(l),
            Metric::RamFree => memory::free_ram(l),
            Metric::FlashTotal => memory::flash_total(l),
            Metric::FlashUsed => memory::flash_used(l),
            Metric::FlashFree => memory::flash_free(l),
        }
    }

    // ── SET ───────────────────────────────────────────────────

    fn set(
        &self,
        req: &Request,
        state: &DeviceState,
        hw: &mut impl DevicePort,
        traps: &mut impl TrapSink,
    ) -> Outcome {
        let reject = |e: ManagementError| {
            debug!("SET {} rejected: {e}", req.oid);
            Outcome::Respond(respond(req.kind, req.oid.clone(), Err(e)))
        };

        let Some(obj) = self.registry.exact(req.oid.as_slice()) else {
            return reject(ManagementError::NoSuchName);
        };
        if !obj.access().writable() {
            return reject(ManagementError::ReadOnly);
        }
        let Some(value) = req.value.as_ref() else {
            return reject(ManagementError::DecodeFailure);
        };

        match self.write(obj, value, state, hw, traps) {
            Ok((reply, Effect::Continue)) => {
                info!("SET {} = {}", obj.name, reply);
                Outcome::Respond(respond(req.kind, req.oid.clone(), Ok(reply)))
            }
            Ok((reply, Effect::Reboot)) => {
                info!("SET {} = {}, rebooting", obj.name, reply);
                let response = respond(req.kind, req.oid.clone(), Ok(reply));
                Outcome::Reboot(PendingReboot::new(response, self.config.reprogram_timeout_ms))
            }
            Err(e) => reject(e),
        }
    }

    fn write(
        &self,
        obj: &ManagedObject,
        value: &Value,
        state: &DeviceState,
        hw: &mut impl DevicePort,
        traps: &mut impl TrapSink,
    ) -> Result<(Value, Effect), ManagementError> {
        match obj.source {
            ObjectSource::State(StateField::Brightness) => {
                let level = integer_in(value, 0, i32::from(self.config.max_brightness))?;
                let level = u8::try_from(level).map_err(|_| ManagementError::DecodeFailure)?;
                state.set_standing_brightness(level);
                hw.set_brightness(level);
                trace(state, traps, format_args!("brightness {level}"));
                Ok((Value::Integer(i32::from(level)), Effect::Continue))
            }
            ObjectSource::State(StateField::AutoPulse) => {
                let (secs, ms) = seconds(value)?;
                state.set_auto_pulse_interval_ms(ms);
                trace(state, traps, format_args!("auto pulse every {secs}s"));
                Ok((Value::Integer(secs), Effect::Continue))
            }
            ObjectSource::Trigger(Trigger::PulseNow) => {
                let (secs, ms) = seconds(value)?;
                state.start_pulse(hw.now_ms(), ms);
                trace(state, traps, format_args!("pulse {secs}s"));
                Ok((Value::Integer(secs), Effect::Continue))
            }
            ObjectSource::Trigger(Trigger::WatchdogReset) => {
                hw.feed();
                trace(state, traps, format_args!("{WATCHDOG_RESET_TRAP}"));
                Ok((value.clone(), Effect::Continue))
            }
            ObjectSource::Trigger(Trigger::WatchdogEnable) => {
                hw.enable(self.config.watchdog_timeout_ms);
                trace(
                    state,
                    traps,
                    format_args!("watchdog armed {} ms", self.config.watchdog_timeout_ms),
                );
                Ok((value.clone(), Effect::Continue))
            }
            ObjectSource::Trigger(Trigger::Reprogram) => {
                if let Err(e) = hw.invalidate_image() {
                    warn!("reprogram refused: {e}");
                    return Err(ManagementError::ResourceUnavailable);
                }
                trace(state, traps, format_args!("reprogram"));
                Ok((value.clone(), Effect::Reboot))
            }
            ObjectSource::Trigger(Trigger::RingNow) => {
                hw.ring_bell();
                state.record_strike(hw.now_ms());
                trace(state, traps, format_args!("ring"));
                Ok((value.clone(), Effect::Continue))
            }
            ObjectSource::Identity(_)
            | ObjectSource::Uptime
            | ObjectSource::Services
            | ObjectSource::Metric(_) => Err(ManagementError::ReadOnly),
        }
    }
}

fn respond(kind: RequestKind, oid: Oid, result: Result<Value, ManagementError>) -> Response {
    Response { kind, oid, result }
}

/// Registry rows are checked against `MAX_OID_LEN` at build time.
fn oid_of(segments: &[u32]) -> Oid {
    Oid::from_segments(segments).unwrap_or_default()
}

fn integer_in(value: &Value, min: i32, max: i32) -> Result<i32, ManagementError> {
    match value.as_integer() {
        Some(n) if (min..=max).contains(&n) => Ok(n),
        _ => Err(ManagementError::DecodeFailure),
    }
}

/// Longest span a seconds-valued object accepts.
const MAX_SECONDS: i32 = (MAX_PULSE_MS / 1000) as i32;

/// Whole seconds in `0..=MAX_SECONDS` and the same span in milliseconds.
fn seconds(value: &Value) -> Result<(i32, u32), ManagementError> {
    let secs = integer_in(value, 0, MAX_SECONDS)?;
    Ok((secs, secs.unsigned_abs() * 1000))
}

fn saturate(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
