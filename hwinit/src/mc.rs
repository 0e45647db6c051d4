//! Memory controller.

/// Memory controller operations the dump sequence depends on.
pub trait MemoryController {
    /// Route AHB masters (the SD controller's DMA) through to DRAM.
    fn enable_ahb_redirect(&mut self);
}
