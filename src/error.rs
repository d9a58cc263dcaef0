//! Unified error type for usb2dual.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! The gateway core itself has no error paths: routing and encoding are
//! total over well-formed inputs, and backend transmission is
//! best-effort.  This type exists for the plumbing around the core,
//! where every error ends in a log line and a dropped event.

use defmt::Format;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, Format)]
pub enum Error {
    // Host link
    /// The UART transport to the USB-host board failed.
    HostLink,

    /// A host-link frame failed to decode (bad SOF or unknown kind).
    BadFrame,

    // BLE
    /// The SoftDevice returned a BLE-level error.
    Ble(BleError),

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, Format)]
pub enum BleError {
    /// Advertising could not start.
    AdvertiseFailed,
    /// GATT notification failed.
    NotifyFailed,
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}
