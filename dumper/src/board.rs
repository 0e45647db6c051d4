//! Board bundle handed to the dump routine.
//!
//! The drivers behind these types (display, SD, FAT, USB, PMIC, GPIO) are
//! brought up by the boot stub. The dump routine only consumes them through
//! the traits below.

use hwinit::{BootromWindow, ButtonInput, Delay, FuseReader, KfuseReader, MemoryController, PatchEngine, PowerControl};
use romdump_core::{Console, FileSystem, StorageDevice, StorageLifecycle, UsbDevice};

/// Panel plus the framebuffer console drawn on it.
pub trait DisplayPanel: Console {
    /// Bring up the panel and its console.
    fn init(&mut self);

    fn set_backlight(&mut self, on: bool);
}

/// Driver types of one board.
pub trait Board {
    type Display: DisplayPanel;
    type Fuses: FuseReader;
    type Kfuse: KfuseReader;
    type Patches: PatchEngine;
    type Mc: MemoryController;
    type Device: StorageDevice;
    type Fs: FileSystem;
    type Usb: UsbDevice;
    type Buttons: ButtonInput;
    type Delay: Delay;
    type Power: PowerControl;
}

/// Every collaborator the routine touches, owned for the whole run.
///
/// Fields are public so a step can borrow several of them at once.
pub struct Platform<B: Board> {
    pub display: B::Display,
    pub fuses: B::Fuses,
    pub kfuse: B::Kfuse,
    pub patches: B::Patches,
    pub mc: B::Mc,
    pub storage: StorageLifecycle<B::Device>,
    pub fs: B::Fs,
    pub usb: B::Usb,
    pub buttons: B::Buttons,
    pub delay: B::Delay,
    pub power: B::Power,
    pub bootrom: BootromWindow,
}
