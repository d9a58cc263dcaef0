//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// Mode-toggle chord

/// HID usage code of the chord modifier (Left Alt).
///
/// While this key is physically held, bit 0 of the gateway's modifier
/// mask is set and a press of [`MODE_TOGGLE_KEY`] switches outputs.
pub const MODE_MODIFIER_KEY: u8 = 0xE2;

/// HID usage code of the chord toggle key (Escape).
pub const MODE_TOGGLE_KEY: u8 = 0x29;

/// Bit position of the chord modifier in the gateway modifier mask.
pub const MODE_MODIFIER_BIT: u8 = 0;

// HID report IDs

/// Report ID of the keyboard report on the combined USB HID interface.
pub const KEYBOARD_REPORT_ID: u8 = 1;

/// Report ID of the mouse report on the combined USB HID interface.
pub const MOUSE_REPORT_ID: u8 = 2;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "usb2dual";
pub const USB_PRODUCT: &str = "Dual-Output HID Gateway";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms). 1 ms = 1000 Hz for lowest latency.
pub const USB_HID_POLL_MS: u8 = 1;

// BLE

/// Device name advertised by the HID-over-GATT server.
pub const BLE_DEVICE_NAME: &str = "usb2dual";

// Upstream host link
//
// The USB-host controller board forwards raw key/mouse events over UART
// (115200 baud) as fixed-size frames (see `host::frame`).

/// Start-of-frame marker on the host link.
pub const HOST_FRAME_SOF: u8 = 0xA5;

/// Host-link frame length in bytes (SOF + kind + two payload bytes).
pub const HOST_FRAME_LEN: usize = 4;

// Channels

/// Depth of the inbound event channel (host link → gateway task).
pub const EVENT_CHANNEL_DEPTH: usize = 16;

/// Depth of the USB report channel (gateway → USB HID writer task).
pub const REPORT_CHANNEL_DEPTH: usize = 16;

/// Depth of the BLE op channel (gateway → BLE notify task).
pub const BLE_OP_CHANNEL_DEPTH: usize = 16;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   USB mode LED   → P0.13
//   BLE mode LED   → P0.14
//   Host link RXD  → P0.08
//   Host link TXD  → P0.06
