//! USB HID keyboard report (boot protocol compatible).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```
//!
//! The gateway only ever populates key slot 0 (one tracked key at a
//! time); slots 1-5 stay zero.  On the wired interface the report is
//! transmitted behind Report ID 1 (see `hid::descriptor`); the BLE path
//! sends the raw 8-byte payload as a boot keyboard input report.

/// Keyboard report size in bytes (payload, without report ID).
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Standard USB HID boot-protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte (always 0x00 per HID spec).
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Create an empty (all-keys-released) report.
    #[cfg(test)]
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; 6],
        }
    }

    /// Report for a key-down: the given key in slot 0, slots 1-5 zero.
    ///
    /// A new key-down overwrites any key still held - the single-key
    /// limitation of this gateway, not N-key rollover.
    pub const fn key_down(modifier: u8, key: u8) -> Self {
        Self {
            modifier,
            reserved: 0,
            keycodes: [key, 0, 0, 0, 0, 0],
        }
    }

    /// Report for a key-up: all key slots cleared, modifiers carried.
    pub const fn key_up(modifier: u8) -> Self {
        Self {
            modifier,
            reserved: 0,
            keycodes: [0; 6],
        }
    }

    /// Serialise into a byte slice for transmission.
    /// Returns the number of bytes written (always 8).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..8].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }

    /// Returns `true` if no keys are pressed (release event).
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }

    /// Number of non-zero key slots.
    #[cfg(test)]
    pub fn keys_down(&self) -> usize {
        self.keycodes.iter().filter(|&&k| k != 0).count()
    }
}
