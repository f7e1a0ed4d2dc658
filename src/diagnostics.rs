//! Diagnostic traces.
//!
//! Every accepted SET and a few control-loop events produce a short text
//! line. The line is always logged at `debug`. It is forwarded to the
//! management station as a trap only once the agent is online; before
//! that there is nobody to send it to.

use core::fmt::{self, Write};

use log::debug;

use crate::app::ports::TrapSink;
use crate::state::DeviceState;

/// Longest trace line; longer output is cut at a char boundary.
pub const TRACE_LEN: usize = 64;

pub type TraceLine = heapless::String<TRACE_LEN>;

/// Format `args` into a [`TraceLine`], truncating instead of failing.
pub fn format_line(args: fmt::Arguments<'_>) -> TraceLine {
    let mut w = Truncating(TraceLine::new());
    let _ = w.write_fmt(args);
    w.0
}

/// Log a trace line and, if the agent is online, send it as a trap.
pub fn trace(state: &DeviceState, sink: &mut impl TrapSink, args: fmt::Arguments<'_>) {
    let line = format_line(args);
    debug!("trace: {line}");
    if state.management_online() {
        sink.trap(&line);
    }
}

struct Truncating(TraceLine);

impl Write for Truncating {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                return Err(fmt::Error);
            }
        }
        Ok(())
    }
}
