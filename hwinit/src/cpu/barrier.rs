//! Memory barrier bindings.
//!
//! Register writes that change what the bus returns for later loads (patch
//! engine selection) must complete before those loads are issued.

/// Data synchronization barrier.
///
/// Completes all outstanding memory accesses, including device writes.
#[cfg(target_arch = "aarch64")]
#[inline]
pub fn dsb() {
    unsafe { core::arch::asm!("dsb sy", options(nostack, preserves_flags)) }
}

// The BPMP (ARM7TDMI) issues device accesses in order; only the compiler
// needs fencing there.
#[cfg(not(target_arch = "aarch64"))]
#[inline]
pub fn dsb() {
    core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
}
