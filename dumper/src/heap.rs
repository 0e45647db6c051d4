//! Heap allocator
//!
//! `linked_list_allocator` over a fixed DRAM region. Registered as the
//! global allocator only with the `global-heap` feature; host builds keep
//! the system allocator.

use core::alloc::{GlobalAlloc, Layout};
use core::ptr::{self, NonNull};
use linked_list_allocator::Heap;
use spin::Mutex;

/// Locked first-fit heap.
pub struct DumpHeap {
    heap: Mutex<Heap>,
}

impl DumpHeap {
    pub const fn empty() -> Self {
        Self {
            heap: Mutex::new(Heap::empty()),
        }
    }

    /// Hand `size` bytes at `base` to the heap.
    ///
    /// # Safety
    /// The region must be unused RAM, valid for the rest of the program,
    /// and this must be called at most once.
    pub unsafe fn init(&self, base: usize, size: usize) {
        self.heap.lock().init(base as *mut u8, size);
    }

    /// Bytes currently allocated.
    pub fn used(&self) -> usize {
        self.heap.lock().used()
    }

    /// Bytes still available.
    pub fn free(&self) -> usize {
        self.heap.lock().free()
    }
}

unsafe impl GlobalAlloc for DumpHeap {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        self.heap
            .lock()
            .allocate_first_fit(layout)
            .map(|nn| nn.as_ptr())
            .unwrap_or(ptr::null_mut())
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if let Some(nn) = NonNull::new(ptr) {
            self.heap.lock().deallocate(nn, layout);
        }
    }
}

/// Heap used on hardware, set up by [`crate::boot`].
#[cfg_attr(feature = "global-heap", global_allocator)]
pub static HEAP: DumpHeap = DumpHeap::empty();
