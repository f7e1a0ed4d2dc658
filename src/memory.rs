//! RAM and flash usage introspection.
//!
//! ```text
//!  +----------------+ data_start
//!  |      data      |
//!  +----------------+ data_end / bss_start
//!  |      bss       |
//!  +----------------+ bss_end / heap_start
//!  |      heap      |
//!  +----------------+ heap break (or heap_start before the first allocation)
//!  |                |
//!  |    FREE RAM    |
//!  |                |
//!  +----------------+ stack pointer
//!  |     stack      |
//!  +----------------+ ram_end (last valid byte)
//! ```
//!
//! Every figure is recomputed from the [`MemoryLayout`] on each call; the
//! heap break and stack pointer move between calls, so nothing is cached.
//! Subtractions saturate so an inconsistent provider can never panic.

/// Link-time boundaries of the RAM image. All addresses are inclusive
/// starts / exclusive ends, except `ram_end` which is the last valid byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamRegions {
    pub data_start: usize,
    pub data_end: usize,
    pub bss_start: usize,
    pub bss_end: usize,
    pub heap_start: usize,
    pub ram_end: usize,
}

/// Flash image extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashRegion {
    /// Bytes occupied by code and read-only data.
    pub used: usize,
    /// Size of the region the image lives in.
    pub length: usize,
}

/// Source of the boundaries and the two runtime pointers.
pub trait MemoryLayout {
    fn ram(&self) -> RamRegions;

    /// Current top of the heap. `None` until the first allocation.
    fn heap_break(&self) -> Option<usize>;

    fn stack_pointer(&self) -> usize;

    fn flash(&self) -> FlashRegion;
}

pub fn static_data_size(layout: &impl MemoryLayout) -> u32 {
    let ram = layout.ram();
    bytes(ram.data_end.saturating_sub(ram.data_start))
}

pub fn zero_init_data_size(layout: &impl MemoryLayout) -> u32 {
    let ram = layout.ram();
    bytes(ram.bss_end.saturating_sub(ram.bss_start))
}

pub fn heap_size(layout: &impl MemoryLayout) -> u32 {
    let ram = layout.ram();
    let top = layout.heap_break().unwrap_or(ram.heap_start);
    bytes(top.saturating_sub(ram.bss_end))
}

pub fn stack_size(layout: &impl MemoryLayout) -> u32 {
    let ram = layout.ram();
    bytes(ram.ram_end.saturating_add(1).saturating_sub(layout.stack_pointer()))
}

pub fn total_ram(layout: &impl MemoryLayout) -> u32 {
    let ram = layout.ram();
    bytes(ram.ram_end.saturating_add(1).saturating_sub(ram.data_start))
}

pub fn free_ram(layout: &impl MemoryLayout) -> u32 {
    total_ram(layout)
        .saturating_sub(static_data_size(layout))
        .saturating_sub(zero_init_data_size(layout))
        .saturating_sub(heap_size(layout))
        .saturating_sub(stack_size(layout))
}

pub fn flash_total(layout: &impl MemoryLayout) -> u32 {
    bytes(layout.flash().length)
}

pub fn flash_used(layout: &impl MemoryLayout) -> u32 {
    bytes(layout.flash().used)
}

pub fn flash_free(layout: &impl MemoryLayout) -> u32 {
    flash_total(layout).saturating_sub(flash_used(layout))
}

// ── Projection onto a flat map ────────────────────────────
//
// Targets whose task stacks live inside the heap have no single stack
// pointer at the top of RAM. These place the current stack depth and the
// remaining heap onto the flat map above so the accounting still adds up.

/// Heap break for `used` allocated bytes of which `task_stack` belong to a
/// task stack reported separately. `None` when nothing else is allocated.
pub fn project_heap_break(heap_start: usize, used: usize, task_stack: usize) -> Option<usize> {
    let used = used.saturating_sub(task_stack);
    (used > 0).then(|| heap_start.saturating_add(used))
}

/// Stack pointer for a task whose stack spans `base..base + len` and whose
/// current frame sits at `here`. Depth is clamped to the stack length.
pub fn project_stack_pointer(ram_end: usize, base: usize, len: usize, here: usize) -> usize {
    let depth = base.saturating_add(len).saturating_sub(here).min(len);
    ram_end.saturating_add(1).saturating_sub(depth)
}

fn bytes(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Every figure read back-to-back from one layout.
///
/// Only meaningful as a consistent whole when nothing allocates or grows
/// the stack between the reads, which holds for a host-side provider and
/// for the agent's single execution context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub total_ram: u32,
    pub static_data: u32,
    pub zero_init_data: u32,
    pub heap: u32,
    pub stack: u32,
    pub free_ram: u32,
    pub flash_total: u32,
    pub flash_used: u32,
    pub flash_free: u32,
}

impl MemorySnapshot {
    pub fn capture(layout: &impl MemoryLayout) -> Self {
        Self {
            total_ram: total_ram(layout),
            static_data: static_data_size(layout),
            zero_init_data: zero_init_data_size(layout),
            heap: heap_size(layout),
            stack: stack_size(layout),
            free_ram: free_ram(layout),
            flash_total: flash_total(layout),
            flash_used: flash_used(layout),
            flash_free: flash_free(layout),
        }
    }

    /// RAM regions plus free space add up to the whole RAM.
    pub fn ram_accounted(&self) -> bool {
        let sum = u64::from(self.free_ram)
            + u64::from(self.static_data)
            + u64::from(self.zero_init_data)
            + u64::from(self.heap)
            + u64::from(self.stack);
        sum == u64::from(self.total_ram)
    }

    pub fn flash_accounted(&self) -> bool {
        u64::from(self.flash_used) + u64::from(self.flash_free) == u64::from(self.flash_total)
    }
}

// ───────────────────────────────────────────────────────────────
// Host / test provider
// ───────────────────────────────────────────────────────────────

/// Layout with plain fields, for host builds and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLayout {
    pub ram: RamRegions,
    pub heap_break: Option<usize>,
    pub stack_pointer: usize,
    pub flash: FlashRegion,
}

impl SimulatedLayout {
    /// A 2 KiB AVR-class part, nothing allocated yet, 64 bytes of stack.
    pub fn small_mcu() -> Self {
        Self {
            ram: RamRegions {
                data_start: 0x0100,
                data_end: 0x0220,
                bss_start: 0x0220,
                bss_end: 0x0400,
                heap_start: 0x0400,
                ram_end: 0x08FF,
            },
            heap_break: None,
            stack_pointer: 0x08C0,
            flash: FlashRegion {
                used: 21_504,
                length: 32_768,
            },
        }
    }

    /// Move the heap break up by `n` bytes, saturating at the address space.
    pub fn allocate(&mut self, n: usize) {
        let top = self.heap_break.unwrap_or(self.ram.heap_start);
        self.heap_break = Some(top.saturating_add(n));
    }

    /// Move the stack pointer down by `n` bytes, stopping at address 0.
    pub fn push_stack(&mut self, n: usize) {
        self.stack_pointer = self.stack_pointer.saturating_sub(n);
    }
}

impl MemoryLayout for SimulatedLayout {
    fn ram(&self) -> RamRegions {
        self.ram
    }

    fn heap_break(&self) -> Option<usize> {
        self.heap_break
    }

    fn stack_pointer(&self) -> usize {
        self.stack_pointer
    }

    fn flash(&self) -> FlashRegion {
        self.flash
    }
}
