//! USB HID mouse report (boot protocol compatible).
//!
//! Layout (4 bytes):
//! ```text
//! Byte 0: Button bitfield
//!         Bit 0 = Left, Bit 1 = Right, Bit 2 = Middle
//! Byte 1: X displacement (signed, -127..127)
//! Byte 2: Y displacement (signed, -127..127)
//! Byte 3: Scroll wheel  (signed, -127..127)
//! ```
//!
//! The wheel byte stays in the wire layout for descriptor compatibility
//! but this gateway never populates it (no scroll support).

/// Mouse report size in bytes (payload, without report ID).
pub const MOUSE_REPORT_SIZE: usize = 4;

/// Standard USB HID boot-protocol mouse report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Button bitfield (bit 0 = left, bit 1 = right, bit 2 = middle).
    pub buttons: u8,
    /// Relative X movement (signed).
    pub x: i8,
    /// Relative Y movement (signed).
    pub y: i8,
    /// Scroll wheel delta (signed, always 0 in this firmware).
    pub wheel: i8,
}

impl MouseReport {
    /// Create an idle (no movement, no buttons) report.
    #[cfg(test)]
    pub const fn empty() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            wheel: 0,
        }
    }

    /// Report for a relative motion event (buttons released).
    pub const fn motion(dx: i8, dy: i8) -> Self {
        Self {
            buttons: 0,
            x: dx,
            y: dy,
            wheel: 0,
        }
    }

    /// Report carrying a button mask with no motion.
    pub const fn buttons(mask: u8) -> Self {
        Self {
            buttons: mask,
            x: 0,
            y: 0,
            wheel: 0,
        }
    }

    /// Serialise into a byte slice for transmission.
    /// Returns the number of bytes written (always 4).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.buttons;
        buf[1] = self.x as u8;
        buf[2] = self.y as u8;
        buf[3] = self.wheel as u8;
        MOUSE_REPORT_SIZE
    }

    /// Returns `true` when no buttons are pressed and there is no movement.
    #[cfg(test)]
    pub fn is_idle(&self) -> bool {
        self.buttons == 0 && self.x == 0 && self.y == 0 && self.wheel == 0
    }
}
