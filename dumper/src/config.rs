//! Fixed build-time parameters.

use hwinit::bootrom::BOOTROM_SIZE;
use hwinit::{FUSE_WORD_COUNT, KFUSE_WORD_COUNT};

/// Everything the dump routine is parameterized by. There is no runtime
/// configuration; [`DumpConfig::T210`] is the only instance used on hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpConfig {
    /// Shown in the banner
    pub version: u32,
    pub fuse_file: &'static str,
    pub kfuse_file: &'static str,
    pub bootrom_file: &'static str,
    /// Words read from the primary fuse bank
    pub fuse_words: usize,
    /// Words read from the secondary fuse bank
    pub kfuse_words: usize,
    /// Bytes of boot ROM written out
    pub bootrom_size: usize,
    /// Volume the files go to
    pub sd_volume: u8,
    /// Delay between power button samples
    pub poll_interval_us: u32,
    /// Heap region. Tegra/Horizon configuration lives at 0x8000_0000 and
    /// package2 at 0xA980_0000; the heap sits in between.
    pub heap_base: usize,
    pub heap_size: usize,
}

impl DumpConfig {
    pub const T210: Self = Self {
        version: 1,
        fuse_file: "fuse.bin",
        kfuse_file: "kfuse.bin",
        bootrom_file: "bootrom.bin",
        fuse_words: FUSE_WORD_COUNT,
        kfuse_words: KFUSE_WORD_COUNT,
        bootrom_size: BOOTROM_SIZE,
        sd_volume: 0,
        poll_interval_us: 10_000,
        heap_base: 0x9002_0000,
        heap_size: 16 * 1024 * 1024,
    };
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self::T210
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t210_file_sizes() {
        let config = DumpConfig::T210;
        assert_eq!(config.fuse_words * 4, 1024);
        assert_eq!(config.kfuse_words * 4, 576);
        assert_eq!(config.bootrom_size, 96 * 1024);
    }

    #[test]
    fn test_heap_fits_below_package2() {
        let config = DumpConfig::T210;
        assert!(config.heap_base >= 0x8000_0000);
        assert!(config.heap_base + config.heap_size <= 0xA980_0000);
    }
}
