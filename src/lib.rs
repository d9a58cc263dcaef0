//! Test-only library interface for usb2dual.
//!
//! This module re-exports the pure logic modules that can be tested
//! on the host (no embedded hardware required).
//!
//! Usage: `cargo test --lib`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! This lib.rs provides a separate entry point for host-based testing.

#![cfg_attr(not(test), no_std)]

// ═══════════════════════════════════════════════════════════════════════════
// Host-testable modules
// ═══════════════════════════════════════════════════════════════════════════

pub mod config;
pub mod gateway;
pub mod hid;

// Internal module paths for implementations whose parent modules are
// embedded-only (they pull in the SoftDevice / UART plumbing).
#[path = "ble/report_state.rs"]
mod ble_report_state_impl;
#[path = "host/frame.rs"]
mod host_frame_impl;

pub mod ble {
    pub mod report_state {
        pub use crate::ble_report_state_impl::*;
    }
}

pub mod host {
    pub mod frame {
        pub use crate::host_frame_impl::*;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::ble::report_state::{BleKeyboardState, BleMouseState};
    use super::config::{MODE_MODIFIER_KEY, MODE_TOGGLE_KEY};
    use super::gateway::event::InputEvent;
    use super::gateway::mode::{ModeIndicator, OperationMode};
    use super::gateway::router::{Backend, BleBackend, BleHid, MouseButton, ReportSink, UsbBackend};
    use super::gateway::Gateway;
    use super::hid::descriptor::GATEWAY_REPORT_DESCRIPTOR;
    use super::hid::{HidReport, KeyboardReport, MouseReport};
    use super::host::frame;

    const KEY_A: u8 = 0x04;

    // ════════════════════════════════════════════════════════════════════════
    // Test doubles
    // ════════════════════════════════════════════════════════════════════════

    #[derive(Default)]
    struct VecSink {
        reports: Vec<HidReport>,
    }

    impl ReportSink for VecSink {
        fn send(&mut self, report: HidReport) {
            self.reports.push(report);
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum BleCall {
        PressKey(u8),
        ReleaseKey(u8),
        Move(i8, i8),
        PressButton(MouseButton),
        ReleaseButton(MouseButton),
    }

    #[derive(Default)]
    struct BleRecorder {
        calls: Vec<BleCall>,
    }

    impl BleHid for BleRecorder {
        fn press_key(&mut self, key: u8) {
            self.calls.push(BleCall::PressKey(key));
        }

        fn release_key(&mut self, key: u8) {
            self.calls.push(BleCall::ReleaseKey(key));
        }

        fn mouse_move(&mut self, dx: i8, dy: i8) {
            self.calls.push(BleCall::Move(dx, dy));
        }

        fn press_button(&mut self, button: MouseButton) {
            self.calls.push(BleCall::PressButton(button));
        }

        fn release_button(&mut self, button: MouseButton) {
            self.calls.push(BleCall::ReleaseButton(button));
        }
    }

    #[derive(Default)]
    struct IndicatorLog {
        modes: Vec<OperationMode>,
    }

    impl ModeIndicator for IndicatorLog {
        fn set_mode(&mut self, mode: OperationMode) {
            self.modes.push(mode);
        }
    }

    type TestGateway = Gateway<UsbBackend<VecSink>, BleBackend<BleRecorder>, IndicatorLog>;

    fn gateway() -> TestGateway {
        Gateway::new(
            UsbBackend::new(VecSink::default()),
            BleBackend::new(BleRecorder::default()),
            IndicatorLog::default(),
        )
    }

    fn usb_reports(gw: &TestGateway) -> &[HidReport] {
        &gw.parts().0.sink().reports
    }

    fn ble_calls(gw: &TestGateway) -> &[BleCall] {
        &gw.parts().1.hid().calls
    }

    fn switch_to_ble(gw: &mut TestGateway) {
        gw.handle(InputEvent::KeyPress(MODE_MODIFIER_KEY));
        gw.handle(InputEvent::KeyPress(MODE_TOGGLE_KEY));
        gw.handle(InputEvent::KeyRelease(MODE_TOGGLE_KEY));
        gw.handle(InputEvent::KeyRelease(MODE_MODIFIER_KEY));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Keyboard report encoding
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn keyboard_report_empty() {
        let report = KeyboardReport::empty();
        assert!(report.is_empty());
        assert_eq!(report.modifier, 0);
        assert_eq!(report.reserved, 0);
        assert_eq!(report.keycodes, [0; 6]);
    }

    #[test]
    fn keyboard_report_key_down_uses_slot_zero_only() {
        let report = KeyboardReport::key_down(0x01, KEY_A);
        assert_eq!(report.keycodes, [KEY_A, 0, 0, 0, 0, 0]);
        assert_eq!(report.modifier, 0x01);
        assert_eq!(report.keys_down(), 1);
    }

    #[test]
    fn keyboard_report_key_up_clears_all_slots() {
        let report = KeyboardReport::key_up(0x01);
        assert_eq!(report.keycodes, [0; 6]);
        assert_eq!(report.modifier, 0x01);
        assert!(!report.is_empty()); // modifier still held
    }

    #[test]
    fn keyboard_report_serialize_layout() {
        let report = KeyboardReport::key_down(0x05, KEY_A);
        let mut buf = [0u8; 8];
        let written = report.serialize(&mut buf);
        assert_eq!(written, 8);
        assert_eq!(buf, [0x05, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn keyboard_report_serialize_buffer_too_small() {
        let report = KeyboardReport::empty();
        let mut buf = [0u8; 4];
        assert_eq!(report.serialize(&mut buf), 0); // Should fail gracefully
    }

    // ════════════════════════════════════════════════════════════════════════
    // Mouse report encoding
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn mouse_report_empty() {
        let report = MouseReport::empty();
        assert!(report.is_idle());
        assert_eq!(report.buttons, 0);
        assert_eq!(report.x, 0);
        assert_eq!(report.y, 0);
        assert_eq!(report.wheel, 0);
    }

    #[test]
    fn mouse_report_motion_has_no_buttons_and_no_wheel() {
        let report = MouseReport::motion(5, -3);
        assert_eq!(report.buttons, 0);
        assert_eq!(report.x, 5);
        assert_eq!(report.y, -3);
        assert_eq!(report.wheel, 0);
    }

    #[test]
    fn mouse_report_serialize_signed_values() {
        let report = MouseReport::motion(-10, 20);
        let mut buf = [0u8; 4];
        let written = report.serialize(&mut buf);
        assert_eq!(written, 4);
        assert_eq!(buf, [0x00, 0xF6, 0x14, 0x00]); // -10 = 0xF6 as i8
    }

    #[test]
    fn mouse_report_serialize_buffer_too_small() {
        let report = MouseReport::empty();
        let mut buf = [0u8; 2];
        assert_eq!(report.serialize(&mut buf), 0);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Report IDs & combined descriptor
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn report_ids_match_descriptor() {
        let kb = HidReport::Keyboard(KeyboardReport::empty());
        let mouse = HidReport::Mouse(MouseReport::empty());
        assert_eq!(kb.report_id(), 1);
        assert_eq!(mouse.report_id(), 2);
        assert!(kb.is_keyboard() && !kb.is_mouse());
        assert!(mouse.is_mouse() && !mouse.is_keyboard());
    }

    #[test]
    fn serialize_with_id_prefixes_keyboard_report() {
        let report = HidReport::Keyboard(KeyboardReport::key_down(0x02, KEY_A));
        let mut buf = [0u8; 9];
        let written = report.serialize_with_id(&mut buf);
        assert_eq!(written, 9);
        assert_eq!(buf, [0x01, 0x02, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn serialize_with_id_prefixes_mouse_report() {
        let report = HidReport::Mouse(MouseReport::motion(5, -3));
        let mut buf = [0u8; 5];
        let written = report.serialize_with_id(&mut buf);
        assert_eq!(written, 5);
        assert_eq!(buf, [0x02, 0x00, 0x05, 0xFD, 0x00]);
    }

    #[test]
    fn serialize_with_id_buffer_too_small() {
        let report = HidReport::Keyboard(KeyboardReport::empty());
        let mut buf = [0u8; 8]; // needs 9 with the ID prefix
        assert_eq!(report.serialize_with_id(&mut buf), 0);
    }

    #[test]
    fn descriptor_declares_both_report_ids() {
        let has_id = |id: u8| {
            GATEWAY_REPORT_DESCRIPTOR
                .windows(2)
                .any(|w| w == [0x85, id])
        };
        assert!(has_id(1), "keyboard report ID missing from descriptor");
        assert!(has_id(2), "mouse report ID missing from descriptor");
    }

    // ════════════════════════════════════════════════════════════════════════
    // Host link frames
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn frame_decodes_key_press_and_release() {
        assert_eq!(
            frame::decode_frame(&[0xA5, 0x01, KEY_A, 0x00]),
            Some(InputEvent::KeyPress(KEY_A))
        );
        assert_eq!(
            frame::decode_frame(&[0xA5, 0x02, KEY_A, 0x00]),
            Some(InputEvent::KeyRelease(KEY_A))
        );
    }

    #[test]
    fn frame_decodes_mouse_events() {
        assert_eq!(
            frame::decode_frame(&[0xA5, 0x03, 0x05, 0xFD]),
            Some(InputEvent::MouseMove { dx: 5, dy: -3 })
        );
        assert_eq!(
            frame::decode_frame(&[0xA5, 0x04, 0b101, 0x00]),
            Some(InputEvent::MouseButtons(0b101))
        );
    }

    #[test]
    fn frame_rejects_bad_sof_unknown_kind_and_short_input() {
        assert_eq!(frame::decode_frame(&[0x00, 0x01, KEY_A, 0x00]), None);
        assert_eq!(frame::decode_frame(&[0xA5, 0x09, 0x00, 0x00]), None);
        assert_eq!(frame::decode_frame(&[0xA5, 0x01]), None);
        assert_eq!(frame::decode_frame(&[]), None);
    }

    // ════════════════════════════════════════════════════════════════════════
    // USB backend encoding (Scenario B, D)
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn scenario_b_key_press_then_release_in_usb_mode() {
        let mut gw = gateway();
        gw.handle(InputEvent::KeyPress(KEY_A));
        gw.handle(InputEvent::KeyRelease(KEY_A));

        assert_eq!(
            usb_reports(&gw),
            [
                HidReport::Keyboard(KeyboardReport::key_down(0, KEY_A)),
                HidReport::Keyboard(KeyboardReport::key_up(0)),
            ]
        );
        assert!(ble_calls(&gw).is_empty());
    }

    #[test]
    fn scenario_d_mouse_move_in_usb_mode() {
        let mut gw = gateway();
        gw.handle(InputEvent::MouseMove { dx: 5, dy: -3 });

        assert_eq!(
            usb_reports(&gw),
            [HidReport::Mouse(MouseReport {
                buttons: 0,
                x: 5,
                y: -3,
                wheel: 0
            })]
        );
    }

    #[test]
    fn usb_mouse_buttons_report_carries_mask_directly() {
        let mut gw = gateway();
        gw.handle(InputEvent::MouseButtons(0b011));

        assert_eq!(
            usb_reports(&gw),
            [HidReport::Mouse(MouseReport::buttons(0b011))]
        );
    }

    #[test]
    fn at_most_one_key_down_in_any_usb_report() {
        let mut gw = gateway();
        // Overlapping presses: 'A' held while 'B' goes down, releases
        // interleaved out of order.
        let sequence = [
            InputEvent::KeyPress(0x04),
            InputEvent::KeyPress(0x05),
            InputEvent::KeyRelease(0x04),
            InputEvent::KeyPress(0x06),
            InputEvent::KeyRelease(0x06),
            InputEvent::KeyRelease(0x05),
        ];
        for event in sequence {
            gw.handle(event);
        }

        for report in usb_reports(&gw) {
            if let HidReport::Keyboard(kb) = report {
                assert!(kb.keys_down() <= 1, "more than one key encoded: {kb:?}");
            }
        }
    }

    #[test]
    fn new_key_down_overwrites_unreleased_key() {
        let mut gw = gateway();
        gw.handle(InputEvent::KeyPress(0x04));
        gw.handle(InputEvent::KeyPress(0x05));

        assert_eq!(
            usb_reports(&gw)[1],
            HidReport::Keyboard(KeyboardReport::key_down(0, 0x05))
        );
    }

    // ════════════════════════════════════════════════════════════════════════
    // BLE backend (Scenario A, C; idempotence)
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn scenario_a_toggle_chord_is_silent_on_both_backends() {
        let mut gw = gateway();
        switch_to_ble(&mut gw);

        // Toggle key never appears as a press anywhere.
        for call in ble_calls(&gw) {
            assert_ne!(*call, BleCall::PressKey(MODE_TOGGLE_KEY));
        }
        for report in usb_reports(&gw) {
            if let HidReport::Keyboard(kb) = report {
                assert!(!kb.keycodes.contains(&MODE_TOGGLE_KEY));
            }
        }
        assert_eq!(gw.mode(), OperationMode::Ble);
    }

    #[test]
    fn ble_key_events_become_press_release_calls() {
        let mut gw = gateway();
        switch_to_ble(&mut gw);
        let before = ble_calls(&gw).len();

        gw.handle(InputEvent::KeyPress(KEY_A));
        gw.handle(InputEvent::KeyRelease(KEY_A));

        assert_eq!(
            &ble_calls(&gw)[before..],
            [BleCall::PressKey(KEY_A), BleCall::ReleaseKey(KEY_A)]
        );
    }

    #[test]
    fn scenario_c_ble_buttons_resync_issues_all_three_calls() {
        let mut gw = gateway();
        switch_to_ble(&mut gw);
        let before = ble_calls(&gw).len();

        gw.handle(InputEvent::MouseButtons(0b011));

        assert_eq!(
            &ble_calls(&gw)[before..],
            [
                BleCall::PressButton(MouseButton::Left),
                BleCall::PressButton(MouseButton::Right),
                BleCall::ReleaseButton(MouseButton::Middle),
            ]
        );
    }

    #[test]
    fn ble_buttons_resync_is_idempotent() {
        let mut state = BleMouseState::new();
        let mut backend = BleBackend::new(BleRecorder::default());

        backend.mouse_buttons(0b011);
        backend.mouse_buttons(0b011);

        // Replaying the recorded calls against the report state twice
        // lands on the same final button mask (level, not edge).
        for call in &backend.hid().calls {
            match call {
                BleCall::PressButton(b) => state.press(*b),
                BleCall::ReleaseButton(b) => state.release(*b),
                _ => unreachable!(),
            }
        }
        assert_eq!(state.buttons(), 0b011);
    }

    #[test]
    fn ble_mouse_move_forwards_deltas() {
        let mut gw = gateway();
        switch_to_ble(&mut gw);
        let before = ble_calls(&gw).len();

        gw.handle(InputEvent::MouseMove { dx: -4, dy: 9 });
        assert_eq!(&ble_calls(&gw)[before..], [BleCall::Move(-4, 9)]);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Mode indicator
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn indicator_updates_track_every_flip_exactly_once() {
        let mut gw = gateway();
        switch_to_ble(&mut gw);
        switch_to_ble(&mut gw); // second chord: back to USB

        let (_, _, indicator) = gw.parts();
        assert_eq!(
            indicator.modes,
            vec![OperationMode::Usb, OperationMode::Ble, OperationMode::Usb]
        );
    }

    // ════════════════════════════════════════════════════════════════════════
    // BLE report state
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn ble_keyboard_state_press_release_roundtrip() {
        let mut state = BleKeyboardState::new();
        state.press(KEY_A);
        assert_eq!(state.report().keycodes[0], KEY_A);

        state.release(KEY_A);
        assert!(state.report().is_empty());
    }

    #[test]
    fn ble_keyboard_state_modifier_usages_set_bits() {
        let mut state = BleKeyboardState::new();
        state.press(0xE2); // Left Alt
        assert_eq!(state.report().modifier, 0x04);
        assert_eq!(state.report().keycodes, [0; 6]);

        state.release(0xE2);
        assert_eq!(state.report().modifier, 0);
    }

    #[test]
    fn ble_keyboard_state_repeated_press_is_a_noop() {
        let mut state = BleKeyboardState::new();
        state.press(KEY_A);
        state.press(KEY_A);
        assert_eq!(state.report().keys_down(), 1);
    }

    #[test]
    fn ble_keyboard_state_tracks_six_keys_then_drops() {
        let mut state = BleKeyboardState::new();
        for key in 0x04..0x0B {
            state.press(key); // seven presses, six slots
        }
        assert_eq!(state.report().keys_down(), 6);
        assert!(!state.report().keycodes.contains(&0x0A));
    }

    #[test]
    fn ble_mouse_state_motion_carries_held_buttons() {
        let mut state = BleMouseState::new();
        state.press(MouseButton::Left);

        let report = state.motion_report(3, -2);
        assert_eq!(report.buttons, 0x01);
        assert_eq!(report.x, 3);
        assert_eq!(report.y, -2);
        assert_eq!(report.wheel, 0);
    }

    #[test]
    fn ble_mouse_state_release_clears_only_that_button() {
        let mut state = BleMouseState::new();
        state.press(MouseButton::Left);
        state.press(MouseButton::Middle);
        state.release(MouseButton::Left);
        assert_eq!(state.buttons(), 0x04);
    }
}
