//! BLE-side HID report state.
//!
//! HOGP centrals expect full boot reports, but the gateway core issues
//! discrete press/release calls.  These two small state holders bridge
//! the gap: apply a call, get the boot report to notify.
//!
//! Pure logic, host-tested.  Press and release are level operations:
//! pressing an already-held key or releasing an idle button is a no-op,
//! so replaying the same sequence leaves the same state.

use crate::gateway::router::MouseButton;
use crate::hid::{KeyboardReport, MouseReport};

/// Modifier usage range (Left Ctrl .. Right GUI).
const MODIFIER_USAGE_FIRST: u8 = 0xE0;
const MODIFIER_USAGE_LAST: u8 = 0xE7;

/// Keys currently held on the BLE keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BleKeyboardState {
    modifier: u8,
    keycodes: [u8; 6],
}

impl BleKeyboardState {
    pub const fn new() -> Self {
        Self {
            modifier: 0,
            keycodes: [0; 6],
        }
    }

    /// Mark `key` held.  Modifier usages set their bit in the modifier
    /// byte; other usages occupy the first free key slot.  A key that
    /// is already held, or a seventh simultaneous key, changes nothing.
    pub fn press(&mut self, key: u8) {
        if let Some(bit) = modifier_bit(key) {
            self.modifier |= bit;
            return;
        }
        if self.keycodes.contains(&key) {
            return;
        }
        if let Some(slot) = self.keycodes.iter_mut().find(|k| **k == 0) {
            *slot = key;
        }
    }

    /// Mark `key` released.
    pub fn release(&mut self, key: u8) {
        if let Some(bit) = modifier_bit(key) {
            self.modifier &= !bit;
            return;
        }
        for slot in self.keycodes.iter_mut() {
            if *slot == key {
                *slot = 0;
            }
        }
    }

    /// Current state as a boot keyboard report.
    pub fn report(&self) -> KeyboardReport {
        KeyboardReport {
            modifier: self.modifier,
            reserved: 0,
            keycodes: self.keycodes,
        }
    }
}

fn modifier_bit(key: u8) -> Option<u8> {
    if (MODIFIER_USAGE_FIRST..=MODIFIER_USAGE_LAST).contains(&key) {
        Some(1 << (key - MODIFIER_USAGE_FIRST))
    } else {
        None
    }
}

/// Buttons currently held on the BLE mouse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BleMouseState {
    buttons: u8,
}

impl BleMouseState {
    pub const fn new() -> Self {
        Self { buttons: 0 }
    }

    pub fn press(&mut self, button: MouseButton) {
        self.buttons |= button.mask();
    }

    pub fn release(&mut self, button: MouseButton) {
        self.buttons &= !button.mask();
    }

    pub fn buttons(&self) -> u8 {
        self.buttons
    }

    /// Boot mouse report for a motion event, carrying held buttons.
    pub fn motion_report(&self, dx: i8, dy: i8) -> MouseReport {
        MouseReport {
            buttons: self.buttons,
            x: dx,
            y: dy,
            wheel: 0,
        }
    }

    /// Boot mouse report for the current button state, no motion.
    pub fn buttons_report(&self) -> MouseReport {
        MouseReport::buttons(self.buttons)
    }
}
