//! HID report types and fixed report layouts.
//!
//! Pure, stateless encoding: given inputs, produce bytes.  Nothing in
//! this module retains state between reports.

pub mod descriptor;
pub mod keyboard;
pub mod mouse;

use crate::config::{KEYBOARD_REPORT_ID, MOUSE_REPORT_ID};

pub use keyboard::{KeyboardReport, KEYBOARD_REPORT_SIZE};
pub use mouse::{MouseReport, MOUSE_REPORT_SIZE};

/// A report bound for the downstream USB host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Keyboard(KeyboardReport),
    Mouse(MouseReport),
}

impl HidReport {
    /// Report ID on the combined USB interface (keyboard = 1, mouse = 2).
    pub const fn report_id(&self) -> u8 {
        match self {
            HidReport::Keyboard(_) => KEYBOARD_REPORT_ID,
            HidReport::Mouse(_) => MOUSE_REPORT_ID,
        }
    }

    /// Serialise the raw payload (no report ID prefix).
    /// Returns the number of bytes written, or 0 if `buf` is too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        match self {
            HidReport::Keyboard(k) => k.serialize(buf),
            HidReport::Mouse(m) => m.serialize(buf),
        }
    }

    /// Serialise as `[report_id, payload...]` for the combined USB
    /// interface.  Returns the number of bytes written, or 0 if `buf`
    /// is too small.
    pub fn serialize_with_id(&self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        let n = self.serialize(&mut buf[1..]);
        if n == 0 {
            return 0;
        }
        buf[0] = self.report_id();
        n + 1
    }

    #[cfg(test)]
    pub fn is_keyboard(&self) -> bool {
        matches!(self, HidReport::Keyboard(_))
    }

    #[cfg(test)]
    pub fn is_mouse(&self) -> bool {
        matches!(self, HidReport::Mouse(_))
    }
}
