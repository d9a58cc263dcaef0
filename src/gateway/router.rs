//! Output backends - per-mode encoding of semantic events.
//!
//! The router's contract is pure dispatch: for every event exactly one
//! backend is invoked, with no retries and no buffering across calls.
//! The two backends encode very differently:
//!
//! - USB: every event becomes one full [`HidReport`] pushed into a
//!   report sink (on target, a channel drained by the USB writer task).
//! - BLE: events become discrete press/release/move calls against a
//!   [`BleHid`] capability; the BLE stack keeps its own report state.

use crate::hid::{HidReport, KeyboardReport, MouseReport};

/// Capability interface both output backends implement.
///
/// `modifiers` is the gateway's current chord-modifier mask; the USB
/// backend encodes it into the report, the BLE backend ignores it (the
/// modifier key itself also arrives as an ordinary key event).
pub trait Backend {
    fn key_down(&mut self, modifiers: u8, key: u8);
    fn key_up(&mut self, modifiers: u8, key: u8);
    fn mouse_move(&mut self, dx: i8, dy: i8);
    /// `mask` is the full current button state, not a delta.
    fn mouse_buttons(&mut self, mask: u8);
}

/// Destination for encoded USB reports.
///
/// Fire-and-forget: implementations must not block the router, and a
/// failed or dropped send is invisible to the core (best-effort).
pub trait ReportSink {
    fn send(&mut self, report: HidReport);
}

/// USB output backend - encodes events as ID-prefixed HID reports.
pub struct UsbBackend<S: ReportSink> {
    sink: S,
}

impl<S: ReportSink> UsbBackend<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: ReportSink> Backend for UsbBackend<S> {
    fn key_down(&mut self, modifiers: u8, key: u8) {
        self.sink
            .send(HidReport::Keyboard(KeyboardReport::key_down(modifiers, key)));
    }

    fn key_up(&mut self, modifiers: u8, _key: u8) {
        // Release clears the whole key array (single-key model).
        self.sink
            .send(HidReport::Keyboard(KeyboardReport::key_up(modifiers)));
    }

    fn mouse_move(&mut self, dx: i8, dy: i8) {
        self.sink.send(HidReport::Mouse(MouseReport::motion(dx, dy)));
    }

    fn mouse_buttons(&mut self, mask: u8) {
        self.sink.send(HidReport::Mouse(MouseReport::buttons(mask)));
    }
}

/// The three mouse buttons the BLE capability distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    /// Bit of this button in a 3-bit button mask.
    pub const fn mask(self) -> u8 {
        match self {
            MouseButton::Left => 0x01,
            MouseButton::Right => 0x02,
            MouseButton::Middle => 0x04,
        }
    }
}

/// Capability interface of the BLE HID collaborator.
///
/// Calls are fire-and-forget; radio readiness is the collaborator's
/// problem and is never surfaced here.
pub trait BleHid {
    fn press_key(&mut self, key: u8);
    fn release_key(&mut self, key: u8);
    fn mouse_move(&mut self, dx: i8, dy: i8);
    fn press_button(&mut self, button: MouseButton);
    fn release_button(&mut self, button: MouseButton);
}

/// BLE output backend - discrete press/release/move calls.
pub struct BleBackend<T: BleHid> {
    hid: T,
}

impl<T: BleHid> BleBackend<T> {
    pub fn new(hid: T) -> Self {
        Self { hid }
    }

    pub fn hid(&self) -> &T {
        &self.hid
    }
}

impl<T: BleHid> Backend for BleBackend<T> {
    fn key_down(&mut self, _modifiers: u8, key: u8) {
        self.hid.press_key(key);
    }

    fn key_up(&mut self, _modifiers: u8, key: u8) {
        self.hid.release_key(key);
    }

    fn mouse_move(&mut self, dx: i8, dy: i8) {
        self.hid.mouse_move(dx, dy);
    }

    fn mouse_buttons(&mut self, mask: u8) {
        // Full resynchronisation on every invocation: each button is
        // pressed or released according to its bit, making repeated
        // identical masks idempotent (level semantics, not edges).
        for button in MouseButton::ALL {
            if mask & button.mask() != 0 {
                self.hid.press_button(button);
            } else {
                self.hid.release_button(button);
            }
        }
    }
}
