//! Operation mode and chord-modifier state machine.
//!
//! The only mutable shared state in the firmware lives here: which
//! output backend is active, which chord modifiers are held, and
//! whether the toggle key is currently down.  Everything runs on one
//! cooperative executor, so no locking is needed; if event delivery
//! ever moves to interrupt context, wrap [`ModeState`] in a critical
//! section to keep the single-threaded-equivalent ordering.

use crate::config::{MODE_MODIFIER_BIT, MODE_TOGGLE_KEY};

/// Currently selected output backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    /// Wired: reports go to the downstream USB host.
    Usb,
    /// Wireless: reports go to the paired BLE central.
    Ble,
}

impl OperationMode {
    /// The other mode.
    pub const fn flipped(self) -> Self {
        match self {
            OperationMode::Usb => OperationMode::Ble,
            OperationMode::Ble => OperationMode::Usb,
        }
    }
}

/// Mode indicator side effect - two mutually exclusive signals.
///
/// `set_mode` is called synchronously with every mode flip (and once at
/// boot), so exactly one indicator is active at all times.
pub trait ModeIndicator {
    fn set_mode(&mut self, mode: OperationMode);
}

/// Mode and chord-modifier state.
///
/// Boots in USB mode; the mode lives only in RAM and resets with the
/// device (no persistence, by design).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeState {
    mode: OperationMode,
    modifiers: u8,
    toggle_armed: bool,
}

impl ModeState {
    pub const fn new() -> Self {
        Self {
            mode: OperationMode::Usb,
            modifiers: 0,
            toggle_armed: false,
        }
    }

    pub fn mode(&self) -> OperationMode {
        self.mode
    }

    /// Current chord-modifier bitmask (bit 0 = chord modifier).
    pub fn modifiers(&self) -> u8 {
        self.modifiers
    }

    pub fn modifier_held(&self) -> bool {
        self.modifiers & (1 << MODE_MODIFIER_BIT) != 0
    }

    /// Record a key-down of the chord modifier.
    pub fn modifier_down(&mut self) {
        self.modifiers |= 1 << MODE_MODIFIER_BIT;
    }

    /// Record a key-up of the chord modifier.
    pub fn modifier_up(&mut self) {
        self.modifiers &= !(1 << MODE_MODIFIER_BIT);
    }

    /// Attempt the mode-toggle transition for a key-down of `key`.
    ///
    /// Returns `Some(new_mode)` iff `key` is the toggle key and the
    /// chord modifier is held.  The caller must consume the triggering
    /// event - it is never forwarded to either backend.
    pub fn try_toggle(&mut self, key: u8) -> Option<OperationMode> {
        if key != MODE_TOGGLE_KEY || !self.modifier_held() {
            return None;
        }
        self.toggle_armed = true;
        self.mode = self.mode.flipped();
        Some(self.mode)
    }

    /// Clear the armed flag on the toggle key's release.
    ///
    /// Must run regardless of the modifier state at release time so the
    /// flag cannot stay stuck across chord repetitions.  Bookkeeping
    /// only - never consulted when routing or encoding.
    pub fn disarm_toggle(&mut self) {
        self.toggle_armed = false;
    }

    #[cfg(test)]
    pub fn toggle_armed(&self) -> bool {
        self.toggle_armed
    }
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new()
    }
}
