//! Event-translation and mode-arbitration core.
//!
//! One [`Gateway`] object owns the mode/modifier state machine, both
//! output backends, and the mode indicator.  Events arrive on a single
//! inbound channel and are handled synchronously, one at a time, so
//! ordering is preserved end to end.
//!
//! Routing policy:
//!
//! - A key-down of the toggle key while the chord modifier is held
//!   flips the mode (indicator updated in the same call) and is
//!   swallowed - the keystroke never leaks into either output stream.
//! - Chord-modifier key events update the modifier mask *and* are
//!   forwarded as ordinary key events.
//! - Everything else goes, unmodified, to the backend selected by the
//!   current mode.  Exactly one backend is touched per event.

pub mod event;
pub mod mode;
pub mod router;


use crate::config::{MODE_MODIFIER_KEY, MODE_TOGGLE_KEY};
use event::InputEvent;
use mode::{ModeIndicator, ModeState, OperationMode};
use router::Backend;

/// The gateway core: state machine + router over two backends.
pub struct Gateway<U: Backend, B: Backend, I: ModeIndicator> {
    state: ModeState,
    usb: U,
    ble: B,
    indicator: I,
}

impl<U: Backend, B: Backend, I: ModeIndicator> Gateway<U, B, I> {
    /// Build the gateway in its boot state (USB mode) and drive the
    /// indicator to match.
    pub fn new(usb: U, ble: B, mut indicator: I) -> Self {
        let state = ModeState::new();
        indicator.set_mode(state.mode());
        Self {
            state,
            usb,
            ble,
            indicator,
        }
    }

    pub fn mode(&self) -> OperationMode {
        self.state.mode()
    }

    /// Handle one upstream event.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyPress(key) => self.on_key_press(key),
            InputEvent::KeyRelease(key) => self.on_key_release(key),
            InputEvent::MouseMove { dx, dy } => self.active_backend().mouse_move(dx, dy),
            InputEvent::MouseButtons(mask) => self.active_backend().mouse_buttons(mask),
        }
    }

    fn on_key_press(&mut self, key: u8) {
        if key == MODE_MODIFIER_KEY {
            self.state.modifier_down();
        } else if let Some(mode) = self.state.try_toggle(key) {
            // Chord fired: flip the indicator and swallow the keystroke.
            self.indicator.set_mode(mode);
            return;
        }

        let modifiers = self.state.modifiers();
        self.active_backend().key_down(modifiers, key);
    }

    fn on_key_release(&mut self, key: u8) {
        if key == MODE_MODIFIER_KEY {
            self.state.modifier_up();
        } else if key == MODE_TOGGLE_KEY {
            // Unconditional, even if the modifier went up first.
            self.state.disarm_toggle();
        }

        let modifiers = self.state.modifiers();
        self.active_backend().key_up(modifiers, key);
    }

    /// The one place mode selects a backend.
    fn active_backend(&mut self) -> &mut dyn Backend {
        match self.state.mode() {
            OperationMode::Usb => &mut self.usb,
            OperationMode::Ble => &mut self.ble,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &ModeState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn parts(&self) -> (&U, &B, &I) {
        (&self.usb, &self.ble, &self.indicator)
    }
}
