//! Aligned staging buffers for bare-metal transfers.
//!
//! Storage controllers on the target DMA straight out of the buffer they are
//! handed and require it to start on a sector boundary; the USB controller
//! wants its transfer buffer page aligned. Source data (MMIO windows, heap
//! vectors) satisfies neither, so callers copy through one of these buffers.
//!
//! # Types
//! - [`SectorBuffer`] - fixed-capacity buffer aligned to [`SECTOR_SIZE`]
//! - [`AlignedChunk`] - a filled prefix of a `SectorBuffer`, the only way to
//!   hand sector-aligned bytes to a storage write
//! - [`PageBuffer`] - fixed-capacity buffer aligned to [`PAGE_SIZE`]

#![cfg_attr(not(test), no_std)]

use core::ops::Deref;

/// Storage sector size in bytes.
pub const SECTOR_SIZE: usize = 512;

/// Page size in bytes (USB transfer buffer alignment).
pub const PAGE_SIZE: usize = 4096;

/// Staging buffer aligned to a storage sector.
///
/// `N` bounds the size of a single transfer regardless of how large the
/// source is.
#[repr(C, align(512))]
pub struct SectorBuffer<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> SectorBuffer<N> {
    /// Create a zeroed buffer.
    pub const fn new() -> Self {
        Self { bytes: [0u8; N] }
    }

    /// Capacity in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Copy the head of `src` into the buffer.
    ///
    /// At most `N` bytes are copied. The returned chunk covers exactly the
    /// copied bytes and starts on a sector boundary.
    pub fn stage(&mut self, src: &[u8]) -> AlignedChunk<'_> {
        let len = src.len().min(N);
        self.bytes[..len].copy_from_slice(&src[..len]);
        AlignedChunk {
            bytes: &self.bytes[..len],
        }
    }
}

impl<const N: usize> Default for SectorBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sector-aligned bytes ready for a storage write.
///
/// Can only be produced by [`SectorBuffer::stage`], so holding one proves the
/// alignment precondition of the write primitive.
#[derive(Debug, Clone, Copy)]
pub struct AlignedChunk<'a> {
    bytes: &'a [u8],
}

impl<'a> AlignedChunk<'a> {
    /// The staged bytes.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl Deref for AlignedChunk<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.bytes
    }
}

/// Page-aligned, fixed-capacity byte buffer.
#[repr(C, align(4096))]
pub struct PageBuffer<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> PageBuffer<N> {
    /// Create a zeroed buffer.
    pub const fn new() -> Self {
        Self { bytes: [0u8; N] }
    }

    /// Capacity in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl<const N: usize> Default for PageBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
