//! Host stand-ins for every board driver.
//!
//! All mocks share one [`Journal`] and append to its event list in call
//! order, so tests can assert on the sequence across drivers.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use dma_pool::AlignedChunk;
use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};
use hwinit::bootrom::BOOTROM_SIZE;
use hwinit::{
    BootromWindow, ButtonInput, Buttons, Delay, FuseReader, KfuseError, KfuseReader, MemoryController, PatchEngine, PowerControl,
};
use romdump_core::{
    Console, FileSystem, FsError, SdmmcConfig, StorageController, StorageDevice, StorageError, StorageLifecycle,
    UsbDevice, UsbError,
};

use crate::board::{Board, DisplayPanel, Platform};

pub const PATCH_MASK: u32 = 0x0000_8003;

/// Byte the first ROM address reads as while any patch slot is active.
pub const PATCHED_BYTE: u8 = 0xEE;

/// Unpatched boot ROM stand-in: a byte pattern that is never all one value.
pub fn bootrom_image() -> Vec<u8> {
    (0..BOOTROM_SIZE).map(|i| (i % 251) as u8).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Backlight(bool),
    DisplayInit,
    KfuseRead,
    PatchSelect(u32),
    AhbRedirect,
    DeviceInit,
    DeviceEnd(bool),
    Flush,
    Mount(u8),
    Unmount,
    Create(String),
    Write(usize),
    Close,
    UsbTransfer(usize),
    UsbReset,
    ButtonRead,
    Sleep(u32),
    PowerOff,
}

#[derive(Default)]
pub struct Journal {
    pub events: Vec<Event>,
    pub screen: String,
    pub files: Vec<(String, Vec<u8>)>,
    pub usb_payloads: Vec<Vec<u8>>,
}

impl Journal {
    pub fn file(&self, name: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }
}

pub type Shared = Rc<RefCell<Journal>>;

fn record(journal: &Shared, event: Event) {
    journal.borrow_mut().events.push(event);
}

/// Knobs for one simulated run.
pub struct Scenario {
    pub kfuse_ok: bool,
    pub device_init_ok: bool,
    pub mount_ok: bool,
    /// Every chunk write to this file fails
    pub failing_file: Option<&'static str>,
    pub usb_ready: bool,
    /// Button samples before the power button is seen on its own
    pub buttons: Vec<Buttons>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            kfuse_ok: true,
            device_init_ok: true,
            mount_ok: true,
            failing_file: None,
            usb_ready: true,
            buttons: Vec::new(),
        }
    }
}

pub struct MockDisplay(Shared);

impl fmt::Write for MockDisplay {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.borrow_mut().screen.push_str(s);
        Ok(())
    }
}

impl Console for MockDisplay {
    fn clear_line(&mut self) {
        self.0.borrow_mut().screen.push('\n');
    }
}

impl DisplayPanel for MockDisplay {
    fn init(&mut self) {
        record(&self.0, Event::DisplayInit);
    }

    fn set_backlight(&mut self, on: bool) {
        record(&self.0, Event::Backlight(on));
    }
}

/// Every fuse word reads as zero.
pub struct MockFuses;

impl FuseReader for MockFuses {
    fn read_word(&mut self, _index: u32) -> u32 {
        0
    }
}

pub struct MockKfuse {
    journal: Shared,
    ok: bool,
}

impl KfuseReader for MockKfuse {
    fn read(&mut self, words: &mut [u32]) -> Result<(), KfuseError> {
        record(&self.journal, Event::KfuseRead);
        if !self.ok {
            return Err(KfuseError::CrcFailed);
        }
        for (i, w) in words.iter_mut().enumerate() {
            *w = 0xC0DE_0000 | i as u32;
        }
        Ok(())
    }
}

/// Patch engine over the mock ROM: an active slot overlays the first byte.
pub struct MockPatches {
    journal: Shared,
    rom: *mut u8,
    pub mask: u32,
}

impl MockPatches {
    fn apply(&mut self) {
        let byte = if self.mask == 0 { 0 } else { PATCHED_BYTE };
        unsafe { core::ptr::write_volatile(self.rom, byte) };
    }
}

impl PatchEngine for MockPatches {
    fn active_slots(&self) -> u32 {
        self.mask
    }

    fn set_active_slots(&mut self, mask: u32) {
        record(&self.journal, Event::PatchSelect(mask));
        self.mask = mask;
        self.apply();
    }
}

pub struct MockMc(Shared);

impl MemoryController for MockMc {
    fn enable_ahb_redirect(&mut self) {
        record(&self.0, Event::AhbRedirect);
    }
}

#[derive(Default)]
pub struct MockController;

impl StorageController for MockController {
    fn clear(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockIoError;

impl fmt::Display for MockIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mock io error")
    }
}

pub struct MockDevice {
    journal: Shared,
    init_ok: bool,
    pub bound: bool,
}

impl BlockIo for MockDevice {
    type Error = MockIoError;

    fn block_size(&self) -> BlockSize {
        BlockSize::BS_512
    }

    fn num_blocks(&mut self) -> Result<u64, MockIoError> {
        Ok(31_116_288)
    }

    fn read_blocks(&mut self, _start_lba: Lba, _dst: &mut [u8]) -> Result<(), MockIoError> {
        Err(MockIoError)
    }

    fn write_blocks(&mut self, _start_lba: Lba, _src: &[u8]) -> Result<(), MockIoError> {
        Err(MockIoError)
    }

    fn flush(&mut self) -> Result<(), MockIoError> {
        record(&self.journal, Event::Flush);
        Ok(())
    }
}

impl StorageDevice for MockDevice {
    type Controller = MockController;

    fn is_initialized(&self) -> bool {
        self.bound
    }

    fn init(&mut self, _controller: &mut MockController, _config: &SdmmcConfig) -> Result<(), StorageError> {
        record(&self.journal, Event::DeviceInit);
        if !self.init_ok {
            return Err(StorageError::DeviceInit);
        }
        self.bound = true;
        Ok(())
    }

    fn end(&mut self, power_off: bool) -> Result<(), StorageError> {
        record(&self.journal, Event::DeviceEnd(power_off));
        self.bound = false;
        Ok(())
    }

    fn clear(&mut self) {
        self.bound = false;
    }
}

pub struct MockFs {
    journal: Shared,
    mount_ok: bool,
    failing_file: Option<&'static str>,
}

impl FileSystem for MockFs {
    /// Index into `Journal::files`
    type File = usize;

    fn mount(&mut self, volume: u8) -> Result<(), FsError> {
        record(&self.journal, Event::Mount(volume));
        if self.mount_ok {
            Ok(())
        } else {
            Err(FsError::NoFilesystem)
        }
    }

    fn unmount(&mut self) -> Result<(), FsError> {
        record(&self.journal, Event::Unmount);
        Ok(())
    }

    fn create(&mut self, path: &str) -> Result<usize, FsError> {
        let mut j = self.journal.borrow_mut();
        j.events.push(Event::Create(String::from(path)));
        j.files.push((String::from(path), Vec::new()));
        Ok(j.files.len() - 1)
    }

    fn write(&mut self, file: &mut usize, chunk: AlignedChunk<'_>) -> Result<usize, FsError> {
        let mut j = self.journal.borrow_mut();
        j.events.push(Event::Write(chunk.len()));
        if Some(j.files[*file].0.as_str()) == self.failing_file {
            return Err(FsError::DiskError);
        }
        j.files[*file].1.extend_from_slice(&chunk);
        Ok(chunk.len())
    }

    fn close(&mut self, _file: usize) -> Result<(), FsError> {
        record(&self.journal, Event::Close);
        Ok(())
    }
}

pub struct MockUsb {
    journal: Shared,
    ready: bool,
}

impl UsbDevice for MockUsb {
    fn is_ready(&mut self) -> bool {
        self.ready
    }

    fn write_ep1_in_sync(&mut self, data: &[u8]) -> Result<usize, UsbError> {
        let mut j = self.journal.borrow_mut();
        j.events.push(Event::UsbTransfer(data.len()));
        j.usb_payloads.push(data.to_vec());
        Ok(data.len())
    }

    fn reset_ep1(&mut self) {
        record(&self.journal, Event::UsbReset);
    }
}

pub struct MockButtons {
    journal: Shared,
    script: Vec<Buttons>,
}

impl ButtonInput for MockButtons {
    fn read(&mut self) -> Buttons {
        record(&self.journal, Event::ButtonRead);
        if self.script.is_empty() {
            Buttons::POWER
        } else {
            self.script.remove(0)
        }
    }
}

pub struct MockDelay(Shared);

impl Delay for MockDelay {
    fn sleep_us(&mut self, us: u32) {
        record(&self.0, Event::Sleep(us));
    }
}

pub struct MockPower(Shared);

impl PowerControl for MockPower {
    fn power_off(&mut self) {
        record(&self.0, Event::PowerOff);
    }
}

pub struct MockBoard;

impl Board for MockBoard {
    type Display = MockDisplay;
    type Fuses = MockFuses;
    type Kfuse = MockKfuse;
    type Patches = MockPatches;
    type Mc = MockMc;
    type Device = MockDevice;
    type Fs = MockFs;
    type Usb = MockUsb;
    type Buttons = MockButtons;
    type Delay = MockDelay;
    type Power = MockPower;
}

/// Platform with volume 0 attached, plus the journal its mocks write to.
pub fn platform(scenario: Scenario) -> (Platform<MockBoard>, Shared) {
    let journal: Shared = Rc::new(RefCell::new(Journal::default()));

    let mut storage = StorageLifecycle::new();
    storage
        .attach(
            0,
            MockController,
            MockDevice {
                journal: journal.clone(),
                init_ok: scenario.device_init_ok,
                bound: false,
            },
            SdmmcConfig::SD_CARD,
        )
        .unwrap();

    let rom = Box::leak(bootrom_image().into_boxed_slice());
    let rom_len = rom.len();
    let rom_base = rom.as_mut_ptr();
    let mut patches = MockPatches {
        journal: journal.clone(),
        rom: rom_base,
        mask: PATCH_MASK,
    };
    patches.apply();

    let platform = Platform {
        display: MockDisplay(journal.clone()),
        fuses: MockFuses,
        kfuse: MockKfuse {
            journal: journal.clone(),
            ok: scenario.kfuse_ok,
        },
        patches,
        mc: MockMc(journal.clone()),
        storage,
        fs: MockFs {
            journal: journal.clone(),
            mount_ok: scenario.mount_ok,
            failing_file: scenario.failing_file,
        },
        usb: MockUsb {
            journal: journal.clone(),
            ready: scenario.usb_ready,
        },
        buttons: MockButtons {
            journal: journal.clone(),
            script: scenario.buttons,
        },
        delay: MockDelay(journal.clone()),
        power: MockPower(journal.clone()),
        bootrom: unsafe { BootromWindow::new(rom_base, rom_len) },
    };
    (platform, journal)
}
