//! Host-link frame decoder.
//!
//! The USB-host controller board forwards every raw keyboard/mouse
//! callback over UART as one fixed 4-byte frame:
//!
//! ```text
//! Byte 0: 0xA5 start-of-frame marker
//! Byte 1: kind  (0x01 key press, 0x02 key release,
//!                0x03 mouse move, 0x04 mouse buttons)
//! Byte 2: payload a  (keycode / dx / button mask)
//! Byte 3: payload b  (dy; zero otherwise)
//! ```
//!
//! Exactly one frame maps to exactly one [`InputEvent`]; frames with a
//! bad marker or unknown kind decode to `None` and are dropped by the
//! link task.

use crate::config::{HOST_FRAME_LEN, HOST_FRAME_SOF};
use crate::gateway::event::InputEvent;

/// Frame kind byte values.
pub const KIND_KEY_PRESS: u8 = 0x01;
pub const KIND_KEY_RELEASE: u8 = 0x02;
pub const KIND_MOUSE_MOVE: u8 = 0x03;
pub const KIND_MOUSE_BUTTONS: u8 = 0x04;

/// Decode one host-link frame into a semantic event.
pub fn decode_frame(frame: &[u8]) -> Option<InputEvent> {
    if frame.len() < HOST_FRAME_LEN || frame[0] != HOST_FRAME_SOF {
        return None;
    }
    match frame[1] {
        KIND_KEY_PRESS => Some(InputEvent::KeyPress(frame[2])),
        KIND_KEY_RELEASE => Some(InputEvent::KeyRelease(frame[2])),
        KIND_MOUSE_MOVE => Some(InputEvent::MouseMove {
            dx: frame[2] as i8,
            dy: frame[3] as i8,
        }),
        KIND_MOUSE_BUTTONS => Some(InputEvent::MouseButtons(frame[2])),
        _ => None,
    }
}
