//! The fixed table of managed objects.
//!
//! The table is ordered by identifier at build time and the order is
//! proven by a const assertion, so lookups can binary-search and GET-NEXT
//! can step to the following row without sorting anything at runtime.

use core::cmp::Ordering;
use core::fmt;

use super::oid::{MAX_OID_LEN, compare};

/// Terminal identifier, greater than every identifier under `iso(1)`.
///
/// Returned by GET-NEXT past the last object to tell the manager the walk
/// is over; never matched by GET or SET.
pub const SENTINEL: &[u32] = &[2, 0];

// ---------------------------------------------------------------------------
// Object description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
    WriteOnly,
}

impl Access {
    pub const fn readable(self) -> bool {
        matches!(self, Self::ReadOnly | Self::ReadWrite)
    }

    pub const fn writable(self) -> bool {
        matches!(self, Self::ReadWrite | Self::WriteOnly)
    }
}

/// Configured identity strings of the system group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityText {
    Description,
    ObjectId,
    Contact,
    Name,
    Location,
}

/// Device-state fields a manager may read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    /// Standing LED brightness.
    Brightness,
    /// Automatic pulse interval, exposed in seconds.
    AutoPulse,
}

/// Memory and flash counters, recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    RamTotal,
    RamData,
    RamBss,
    RamHeap,
    RamStack,
    RamFree,
    FlashTotal,
    FlashUsed,
    FlashFree,
}

/// Write-only actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Pulse the LED for N seconds.
    PulseNow,
    /// Feed the watchdog.
    WatchdogReset,
    /// Arm the watchdog with the long timeout.
    WatchdogEnable,
    /// Invalidate the boot image and halt until the watchdog resets.
    Reprogram,
    /// Ring the bell.
    RingNow,
}

/// What backs an object's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectSource {
    Identity(IdentityText),
    Uptime,
    Services,
    State(StateField),
    Metric(Metric),
    Trigger(Trigger),
}

impl ObjectSource {
    pub const fn access(self) -> Access {
        match self {
            Self::Identity(_) | Self::Uptime | Self::Services | Self::Metric(_) => Access::ReadOnly,
            Self::State(_) => Access::ReadWrite,
            Self::Trigger(_) => Access::WriteOnly,
        }
    }
}

/// One row of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedObject {
    pub oid: &'static [u32],
    pub name: &'static str,
    pub source: ObjectSource,
}

impl ManagedObject {
    pub const fn access(&self) -> Access {
        self.source.access()
    }
}

const fn object(oid: &'static [u32], name: &'static str, source: ObjectSource) -> ManagedObject {
    ManagedObject { oid, name, source }
}

// ---------------------------------------------------------------------------
// The doorbell table
// ---------------------------------------------------------------------------

use IdentityText as Id;
use ObjectSource as Src;

/// Every object the agent serves, in ascending identifier order.
#[rustfmt::skip]
pub const DOORBELL_OBJECTS: &[ManagedObject] = &[
    // system group, 1.3.6.1.2.1.1
    object(&[1, 3, 6, 1, 2, 1, 1, 1, 0], "sysDescr", Src::Identity(Id::Description)),
    object(&[1, 3, 6, 1, 2, 1, 1, 2, 0], "sysObjectID", Src::Identity(Id::ObjectId)),
    object(&[1, 3, 6, 1, 2, 1, 1, 3, 0], "sysUpTime", Src::Uptime),
    object(&[1, 3, 6, 1, 2, 1, 1, 4, 0], "sysContact", Src::Identity(Id::Contact)),
    object(&[1, 3, 6, 1, 2, 1, 1, 5, 0], "sysName", Src::Identity(Id::Name)),
    object(&[1, 3, 6, 1, 2, 1, 1, 6, 0], "sysLocation", Src::Identity(Id::Location)),
    object(&[1, 3, 6, 1, 2, 1, 1, 7, 0], "sysServices", Src::Services),
    // doorbell group, 1.3.6.1.4.1.50174.258.1
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 1, 0], "brightness", Src::State(StateField::Brightness)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 2, 0], "pulseNow", Src::Trigger(Trigger::PulseNow)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 3, 0], "watchdogReset", Src::Trigger(Trigger::WatchdogReset)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 4, 0], "watchdogEnable", Src::Trigger(Trigger::WatchdogEnable)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 5, 0], "autoPulse", Src::State(StateField::AutoPulse)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 6, 0], "reprogram", Src::Trigger(Trigger::Reprogram)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 7, 0], "ringNow", Src::Trigger(Trigger::RingNow)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 8, 0], "ramTotal", Src::Metric(Metric::RamTotal)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 9, 0], "ramData", Src::Metric(Metric::RamData)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 10, 0], "ramBss", Src::Metric(Metric::RamBss)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 11, 0], "ramHeap", Src::Metric(Metric::RamHeap)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 12, 0], "ramStack", Src::Metric(Metric::RamStack)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 13, 0], "ramFree", Src::Metric(Metric::RamFree)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 14, 0], "flashTotal", Src::Metric(Metric::FlashTotal)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 15, 0], "flashUsed", Src::Metric(Metric::FlashUsed)),
    object(&[1, 3, 6, 1, 4, 1, 50174, 258, 1, 16, 0], "flashFree", Src::Metric(Metric::FlashFree)),
];

const _: () = assert!(
    check_order(DOORBELL_OBJECTS).is_ok(),
    "DOORBELL_OBJECTS must be non-empty, strictly ascending and below SENTINEL"
);

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    Empty,
    /// Row `index` is not strictly greater than the row before it.
    OutOfOrder { index: usize },
    /// The last row does not sort before [`SENTINEL`].
    BeyondSentinel,
    /// Row `index` has more than [`MAX_OID_LEN`] segments.
    TooLong { index: usize },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "registry is empty"),
            Self::OutOfOrder { index } => write!(f, "row {index} is out of order"),
            Self::BeyondSentinel => write!(f, "last row does not sort before the sentinel"),
            Self::TooLong { index } => write!(f, "row {index} is longer than {MAX_OID_LEN} segments"),
        }
    }
}

const fn check_order(objects: &[ManagedObject]) -> Result<(), RegistryError> {
    if objects.is_empty() {
        return Err(RegistryError::Empty);
    }
    let mut i = 0;
    while i < objects.len() {
        if objects[i].oid.len() > MAX_OID_LEN {
            return Err(RegistryError::TooLong { index: i });
        }
        if i > 0 && !matches!(compare(objects[i - 1].oid, objects[i].oid), Ordering::Less) {
            return Err(RegistryError::OutOfOrder { index: i });
        }
        i += 1;
    }
    if !matches!(compare(objects[objects.len() - 1].oid, SENTINEL), Ordering::Less) {
        return Err(RegistryError::BeyondSentinel);
    }
    Ok(())
}

/// Result of a GET-NEXT lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Successor<'a> {
    Object(&'a ManagedObject),
    /// The request was at or past the last object.
    EndOfTree,
}

/// Ordered, read-only view over a table of managed objects.
#[derive(Debug, Clone, Copy)]
pub struct Registry<'a> {
    objects: &'a [ManagedObject],
}

impl Registry<'static> {
    /// The built-in doorbell table.
    pub const fn doorbell() -> Self {
        Self {
            objects: DOORBELL_OBJECTS,
        }
    }
}

impl<'a> Registry<'a> {
    /// Wrap an arbitrary table after checking its order.
    pub fn from_table(objects: &'a [ManagedObject]) -> Result<Self, RegistryError> {
        check_order(objects)?;
        Ok(Self { objects })
    }

    /// Exact match, used by GET and SET.
    pub fn exact(&self, oid: &[u32]) -> Option<&'a ManagedObject> {
        self.objects
            .binary_search_by(|o| compare(o.oid, oid))
            .ok()
            .map(|i| &self.objects[i])
    }

    /// Smallest object strictly greater than `oid`, used by GET-NEXT.
    pub fn successor(&self, oid: &[u32]) -> Successor<'a> {
        let next = self
            .objects
            .partition_point(|o| compare(o.oid, oid) != Ordering::Greater);
        match self.objects.get(next) {
            Some(o) => Successor::Object(o),
            None => Successor::EndOfTree,
        }
    }

    pub fn objects(&self) -> &'a [ManagedObject] {
        self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
