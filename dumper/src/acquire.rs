//! Reading the fuse banks into owned buffers.

use alloc::vec::Vec;
use core::fmt;

use hwinit::{BootromWindow, FuseReader, KfuseError, KfuseReader};

const WORD_SIZE: usize = core::mem::size_of::<u32>();

/// Why a source ended up absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireError {
    /// The buffer could not be allocated
    Allocation,
    /// The secondary bank refused the read
    Kfuse(KfuseError),
}

impl fmt::Display for AcquireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation => write!(f, "out of memory"),
            Self::Kfuse(e) => write!(f, "{}", e),
        }
    }
}

/// Heap buffer holding one source's bytes, written once at acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionBuffer {
    bytes: Vec<u8>,
}

impl AcquisitionBuffer {
    /// Zeroed buffer for `words` 32-bit words. Fails instead of aborting
    /// when the heap cannot satisfy the request.
    pub fn try_for_words(words: usize) -> Result<Self, AcquireError> {
        let len = words.checked_mul(WORD_SIZE).ok_or(AcquireError::Allocation)?;
        Self::try_for_bytes(len)
    }

    /// Zeroed buffer of `len` bytes.
    pub fn try_for_bytes(len: usize) -> Result<Self, AcquireError> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(len).map_err(|_| AcquireError::Allocation)?;
        bytes.resize(len, 0);
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn words_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.bytes.chunks_exact_mut(WORD_SIZE)
    }
}

/// Read the whole primary bank, word by word, into `buffer`.
///
/// Words are stored in memory order (little-endian).
pub fn read_fuse_bank<F: FuseReader + ?Sized>(fuses: &mut F, buffer: &mut AcquisitionBuffer) {
    for (index, word) in buffer.words_mut().enumerate() {
        word.copy_from_slice(&fuses.read_word(index as u32).to_le_bytes());
    }
}

/// Read the secondary bank into `buffer`.
///
/// The driver fills a word array; a scratch array of the same size is
/// allocated for it and released before returning.
pub fn read_kfuse_bank<K: KfuseReader + ?Sized>(kfuse: &mut K, buffer: &mut AcquisitionBuffer) -> Result<(), AcquireError> {
    let count = buffer.len() / WORD_SIZE;
    let mut words: Vec<u32> = Vec::new();
    words.try_reserve_exact(count).map_err(|_| AcquireError::Allocation)?;
    words.resize(count, 0);

    kfuse.read(&mut words).map_err(AcquireError::Kfuse)?;

    for (dst, word) in buffer.words_mut().zip(words.iter()) {
        dst.copy_from_slice(&word.to_le_bytes());
    }
    Ok(())
}

/// Copy the current contents of the boot ROM window into `buffer`.
///
/// Returns the number of bytes copied; the rest of the buffer is left
/// zeroed.
pub fn read_bootrom(window: &BootromWindow, buffer: &mut AcquisitionBuffer) -> usize {
    window.read(0, &mut buffer.bytes)
}
