// USB report transfer

use core::fmt;

/// USB transfer failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsbError {
    /// Host did not take the data in time
    Timeout,
    /// Endpoint stalled
    Stalled,
    /// Controller reported a transfer error code
    Transfer(u32),
}

impl fmt::Display for UsbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "transfer timed out"),
            Self::Stalled => write!(f, "endpoint stalled"),
            Self::Transfer(code) => write!(f, "transfer error {}", code),
        }
    }
}

/// Recovery-mode USB device, endpoint 1 IN.
pub trait UsbDevice {
    /// Whether the host has enumerated the device.
    fn is_ready(&mut self) -> bool;

    /// One blocking bulk transfer on endpoint 1 IN.
    fn write_ep1_in_sync(&mut self, data: &[u8]) -> Result<usize, UsbError>;

    fn reset_ep1(&mut self);
}

/// What happened to the report frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsbOutcome {
    /// Device not ready; nothing was sent
    NotReady,
    /// Transfer completed with this many bytes
    Sent(usize),
    Failed(UsbError),
}

/// Send `payload` in one transfer, then reset the endpoint.
///
/// Nothing is touched unless the device is ready. The endpoint is reset
/// after the transfer whether or not it succeeded.
pub fn transmit_frame<U: UsbDevice + ?Sized>(usb: &mut U, payload: &[u8]) -> UsbOutcome {
    if !usb.is_ready() {
        return UsbOutcome::NotReady;
    }

    let outcome = match usb.write_ep1_in_sync(payload) {
        Ok(sent) => UsbOutcome::Sent(sent),
        Err(e) => UsbOutcome::Failed(e),
    };
    usb.reset_ep1();
    outcome
}
