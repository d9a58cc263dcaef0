//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral**
//! role, presenting the gateway as a HID-over-GATT (HOGP) combo
//! device to the wireless host:
//!
//! 1. **HID Server** - advertises, accepts one central, and exposes
//!    boot keyboard / boot mouse input report characteristics.
//! 2. **Report State** - tracks which keys and buttons are logically
//!    held on the BLE side, since the gateway core speaks in discrete
//!    press/release calls while HOGP notifies full reports.
//!
//! The gateway core never talks to the radio directly: it enqueues
//! [`BleOp`] values, and the BLE task applies them to the report state
//! and notifies the connected central.  With no central connected, ops
//! queue up and eventually overflow the channel - routing proceeds
//! unconditionally regardless of transport readiness, and anything the
//! radio cannot take is silently dropped.

pub mod hid_server;
pub mod report_state;

use crate::gateway::router::MouseButton;

/// One discrete operation from the gateway's BLE backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleOp {
    PressKey(u8),
    ReleaseKey(u8),
    MouseMove { dx: i8, dy: i8 },
    PressButton(MouseButton),
    ReleaseButton(MouseButton),
}
