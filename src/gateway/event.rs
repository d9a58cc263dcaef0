//! Semantic input events - the shapes the gateway consumes.
//!
//! The input adapter maps upstream host callbacks 1:1 onto these
//! variants; no filtering, debouncing, or coalescing happens anywhere
//! between the upstream transport and the router.

/// One key or mouse event from the upstream device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Key-down, HID usage code.
    KeyPress(u8),
    /// Key-up, HID usage code.
    KeyRelease(u8),
    /// Relative pointer motion.
    MouseMove { dx: i8, dy: i8 },
    /// Full current button state (level, not a delta): bit 0 = left,
    /// bit 1 = right, bit 2 = middle.
    MouseButtons(u8),
}
