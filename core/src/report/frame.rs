// Fixed-capacity USB report frame

use alloc::alloc::{alloc_zeroed, Layout};
use alloc::boxed::Box;
use core::fmt::{self, Write as _};

use dma_pool::PageBuffer;

use super::hexdump::write_hex_rows;
use super::Section;

/// Capacity of the frame sent over USB.
pub const USB_FRAME_SIZE: usize = 4096;

/// The frame buffer could not be allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAllocError;

impl fmt::Display for FrameAllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "report frame allocation failed")
    }
}

/// Page-aligned text frame built by appending sections.
///
/// Appends never grow the buffer: text past the capacity is dropped and
/// the frame stays full.
pub struct ReportFrame<const N: usize = USB_FRAME_SIZE> {
    page: Box<PageBuffer<N>>,
    used: usize,
}

impl<const N: usize> ReportFrame<N> {
    /// Allocate an empty, zeroed frame on the heap.
    pub fn try_new() -> Result<Self, FrameAllocError> {
        let layout = Layout::new::<PageBuffer<N>>();
        if layout.size() == 0 {
            return Ok(Self {
                page: Box::new(PageBuffer::new()),
                used: 0,
            });
        }

        // SAFETY: layout has non-zero size. PageBuffer is a plain byte array,
        // so all-zero memory is a valid value, and the pointer was allocated
        // by the global allocator with this exact layout as Box requires.
        let page = unsafe {
            let ptr = alloc_zeroed(layout) as *mut PageBuffer<N>;
            if ptr.is_null() {
                return Err(FrameAllocError);
            }
            Box::from_raw(ptr)
        };
        Ok(Self { page, used: 0 })
    }

    /// Append `section`: label, then hex with a newline before every row of
    /// 16 bytes, then a closing newline; or the notice line when absent.
    ///
    /// Returns the number of bytes appended, which is short once the frame
    /// fills up.
    pub fn append_section(&mut self, section: &Section<'_>) -> usize {
        let start = self.used;
        // An Err here only means the frame is full
        let _ = match section.data {
            Some(data) => self.append_hex(section.label, data),
            None => writeln!(self, "{}", section.missing),
        };
        self.used - start
    }

    fn append_hex(&mut self, label: &str, data: &[u8]) -> fmt::Result {
        self.write_str(label)?;
        write_hex_rows(self, data, "", |frame| frame.write_char('\n'))?;
        self.write_char('\n')
    }

    /// Bytes used so far.
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    pub fn remaining(&self) -> usize {
        N - self.used
    }

    /// The payload built so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.page.as_slice()[..self.used]
    }

    /// Address of the frame, for DMA alignment checks.
    pub fn as_ptr(&self) -> *const u8 {
        self.page.as_slice().as_ptr()
    }
}

impl<const N: usize> fmt::Write for ReportFrame<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let take = s.len().min(N - self.used);
        self.page.as_mut_slice()[self.used..self.used + take].copy_from_slice(&s.as_bytes()[..take]);
        self.used += take;
        if take < s.len() {
            Err(fmt::Error)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{FUSE_LABEL, FUSE_MISSING, KFUSE_LABEL, KFUSE_MISSING};
    use dma_pool::PAGE_SIZE;

    fn text<const N: usize>(frame: &ReportFrame<N>) -> &str {
        core::str::from_utf8(frame.as_bytes()).unwrap()
    }

    #[test]
    fn test_frame_is_page_aligned_and_empty() {
        let frame: ReportFrame = ReportFrame::try_new().unwrap();
        assert_eq!(frame.as_ptr() as usize % PAGE_SIZE, 0);
        assert!(frame.is_empty());
        assert_eq!(frame.remaining(), USB_FRAME_SIZE);
    }

    #[test]
    fn test_zero_fuse_bank_layout() {
        let data = [0u8; 1024];
        let mut frame: ReportFrame = ReportFrame::try_new().unwrap();

        let appended = frame.append_section(&Section::fuse(Some(&data)));

        let body = text(&frame);
        assert_eq!(appended, body.len());
        assert!(body.starts_with(FUSE_LABEL));
        let hex = &body[FUSE_LABEL.len()..];
        assert_eq!(hex.chars().filter(|c| *c == '0').count(), 2048);
        // 64 row breaks plus the closing newline
        assert_eq!(hex.matches('\n').count(), 65);
        assert_eq!(appended, FUSE_LABEL.len() + 2048 + 65);
        assert!(hex.starts_with("\n00000000000000000000000000000000\n"));
        assert!(hex.ends_with("00\n"));
    }

    #[test]
    fn test_sections_are_concatenated() {
        let fuse = [0xA5u8; 1024];
        let kfuse = [0x5Au8; 576];
        let mut frame: ReportFrame = ReportFrame::try_new().unwrap();

        let first = frame.append_section(&Section::fuse(Some(&fuse)));
        let second = frame.append_section(&Section::kfuse(Some(&kfuse)));

        assert_eq!(frame.len(), first + second);
        let body = text(&frame);
        let kfuse_at = body.find(KFUSE_LABEL).unwrap();
        assert_eq!(kfuse_at, first);
        assert_eq!(&body[kfuse_at + KFUSE_LABEL.len()..][..3], "\n5A");
    }

    #[test]
    fn test_absent_section_appends_notice() {
        let kfuse = [1u8; 16];
        let mut frame: ReportFrame = ReportFrame::try_new().unwrap();

        frame.append_section(&Section::fuse(None));
        frame.append_section(&Section::kfuse(Some(&kfuse)));

        let body = text(&frame);
        assert!(body.starts_with(FUSE_MISSING));
        assert!(!body[..FUSE_MISSING.len() + 1].contains("00"));
        assert!(body.contains(KFUSE_LABEL));
        assert!(!body.contains(KFUSE_MISSING));
    }

    #[test]
    fn test_append_is_bounded_by_capacity() {
        let data = [0xFFu8; 64];
        let mut frame: ReportFrame<64> = ReportFrame::try_new().unwrap();

        let first = frame.append_section(&Section::fuse(Some(&data)));
        assert_eq!(first, 64);
        assert_eq!(frame.remaining(), 0);

        let second = frame.append_section(&Section::kfuse(None));
        assert_eq!(second, 0);
        assert_eq!(frame.len(), 64);
        assert!(text(&frame).starts_with(FUSE_LABEL));
    }
}
