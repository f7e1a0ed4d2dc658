//! ESP32-S3 memory layout provider.
//!
//! Static regions come from the linker script symbols of the internal
//! DRAM image. The two runtime pointers are projected onto that map:
//!
//! - heap break = `_heap_start` + bytes allocated from the internal heap,
//!   less the main task stack buffer;
//! - stack pointer = top of DRAM - bytes of the calling task's stack in
//!   use right now, measured from the address of a local.
//!
//! FreeRTOS allocates the main task stack from the heap, so the real stack
//! pointer does not sit at the top of DRAM. Moving the stack buffer out of
//! the heap figure keeps it from being counted twice, and the projection
//! keeps `free + data + bss + heap + stack == total` exact.
//!
//! The agent runs on the main task; the stack figure is only meaningful
//! when queried from it.

use esp_idf_svc::sys::*;

use crate::memory::{FlashRegion, MemoryLayout, RamRegions, project_heap_break, project_stack_pointer};

/// Last byte of internal DRAM (SOC_DRAM_HIGH − 1 on the S3).
const DRAM_END: usize = 0x3FCF_FFFF;

unsafe extern "C" {
    static _data_start: u8;
    static _data_end: u8;
    static _bss_start: u8;
    static _bss_end: u8;
    static _heap_start: u8;
}

pub struct EspLayout {
    main_stack_size: usize,
    flash: FlashRegion,
}

impl EspLayout {
    /// Reads the running partition once; image size does not change
    /// while the image runs.
    pub fn new() -> Self {
        Self {
            main_stack_size: CONFIG_ESP_MAIN_TASK_STACK_SIZE as usize,
            flash: running_image(),
        }
    }
}

impl Default for EspLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLayout for EspLayout {
    fn ram(&self) -> RamRegions {
        RamRegions {
            data_start: &raw const _data_start as usize,
            data_end: &raw const _data_end as usize,
            bss_start: &raw const _bss_start as usize,
            bss_end: &raw const _bss_end as usize,
            heap_start: &raw const _heap_start as usize,
            ram_end: DRAM_END,
        }
    }

    fn heap_break(&self) -> Option<usize> {
        // SAFETY: heap statistics queries, no side effects.
        let (total, free) = unsafe {
            (
                heap_caps_get_total_size(MALLOC_CAP_INTERNAL),
                heap_caps_get_free_size(MALLOC_CAP_INTERNAL),
            )
        };
        // The main task stack is reported as stack, not heap.
        project_heap_break(self.ram().heap_start, total.saturating_sub(free), self.main_stack_size)
    }

    fn stack_pointer(&self) -> usize {
        let marker = 0u8;
        let here = core::hint::black_box(&raw const marker) as usize;
        // SAFETY: queries the calling task's own stack base.
        let base = unsafe { pxTaskGetStackStart(xTaskGetCurrentTaskHandle()) } as usize;
        project_stack_pointer(DRAM_END, base, self.main_stack_size, here)
    }

    fn flash(&self) -> FlashRegion {
        self.flash
    }
}

fn running_image() -> FlashRegion {
    // SAFETY: the running partition pointer lives in the static partition
    // table; `esp_image_verify` only reads flash.
    unsafe {
        let part = esp_ota_get_running_partition();
        if part.is_null() {
            return FlashRegion { used: 0, length: 0 };
        }
        let length = (*part).size as usize;
        let pos = esp_partition_pos_t {
            offset: (*part).address,
            size: (*part).size,
        };
        let mut meta: esp_image_metadata_t = core::mem::zeroed();
        let used = if esp_image_verify(
            esp_image_load_mode_t_ESP_IMAGE_VERIFY_SILENT,
            &pos,
            &mut meta,
        ) == ESP_OK
        {
            meta.image_len as usize
        } else {
            length
        };
        FlashRegion { used, length }
    }
}
