//! BLE HID-over-GATT server - boot keyboard + boot mouse.
//!
//! Exposes the HID Service (0x1812) with boot-protocol input report
//! characteristics, the minimum a HOGP central needs:
//!
//! - Protocol Mode (0x2A4E): boot mode, writable per HOGP
//! - Boot Keyboard Input Report (0x2A22): 8 bytes, notify
//! - Boot Mouse Input Report (0x2A33): 4 bytes, notify
//! - HID Information (0x2A4A) and HID Control Point (0x2A4C)
//!
//! The server task advertises, serves one central at a time, and in
//! parallel drains the gateway's [`BleOp`] channel: each op mutates the
//! BLE-side report state and notifies the corresponding characteristic.
//! Notify failures (no subscriber, radio busy) are logged and dropped.

use crate::ble::report_state::{BleKeyboardState, BleMouseState};
use crate::ble::BleOp;
use crate::config::BLE_OP_CHANNEL_DEPTH;
use crate::error::{BleError, Error};
use crate::hid::{KEYBOARD_REPORT_SIZE, MOUSE_REPORT_SIZE};
use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use nrf_softdevice::ble::{gatt_server, peripheral, Connection};
use nrf_softdevice::{raw, Softdevice};

#[nrf_softdevice::gatt_service(uuid = "1812")]
pub struct HidService {
    /// Protocol Mode - 0 = Boot Protocol, 1 = Report Protocol.
    #[characteristic(uuid = "2a4e", read, write_without_response)]
    pub protocol_mode: u8,

    /// Boot Keyboard Input Report - live keystrokes.
    #[characteristic(uuid = "2a22", read, notify)]
    pub boot_keyboard_input: [u8; 8],

    /// Boot Mouse Input Report - live pointer data.
    #[characteristic(uuid = "2a33", read, notify)]
    pub boot_mouse_input: [u8; 4],

    /// HID Information - bcdHID 1.11, no country code, normally connectable.
    #[characteristic(uuid = "2a4a", read)]
    pub hid_info: [u8; 4],

    /// HID Control Point - suspend/exit-suspend, accepted and ignored.
    #[characteristic(uuid = "2a4c", write_without_response)]
    pub control_point: u8,
}

#[nrf_softdevice::gatt_server]
pub struct GatewayServer {
    pub hid: HidService,
}

/// Advertising payload: flags, HID service UUID, complete local name.
#[rustfmt::skip]
const ADV_DATA: &[u8] = &[
    0x02, 0x01, raw::BLE_GAP_ADV_FLAGS_LE_ONLY_GENERAL_DISC_MODE as u8,
    0x03, 0x03, 0x12, 0x18,
    0x09, 0x09, b'u', b's', b'b', b'2', b'd', b'u', b'a', b'l',
];

#[rustfmt::skip]
const SCAN_DATA: &[u8] = &[
    0x03, 0x03, 0x12, 0x18,
];

/// Initialise the GATT server.  Call once after softdevice enable.
pub fn init(sd: &mut Softdevice) -> GatewayServer {
    let server = defmt::unwrap!(GatewayServer::new(sd));
    let _ = server.hid.hid_info_set(&[0x11, 0x01, 0x00, 0x02]);
    server
}

/// Run the BLE HID server forever: advertise, serve, repeat.
pub async fn ble_server_task(
    sd: &'static Softdevice,
    server: &'static GatewayServer,
    op_rx: Receiver<'static, CriticalSectionRawMutex, BleOp, BLE_OP_CHANNEL_DEPTH>,
) -> ! {
    let mut keyboard = BleKeyboardState::new();
    let mut mouse = BleMouseState::new();

    loop {
        let config = peripheral::Config::default();
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: ADV_DATA,
            scan_data: SCAN_DATA,
        };

        info!("BLE advertising as HID gateway");
        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(_e) => {
                warn!("{} - retrying", Error::from(BleError::AdvertiseFailed));
                continue;
            }
        };

        info!("BLE central connected");

        // Serve GATT events and gateway ops until the central leaves.
        let gatt = gatt_server::run(&conn, server, |_e| {});
        let ops = op_loop(&conn, server, op_rx, &mut keyboard, &mut mouse);

        match select(gatt, ops).await {
            Either::First(e) => info!("BLE central disconnected: {:?}", e),
            Either::Second(never) => match never {},
        }
    }
}

enum Never {}

/// Apply gateway ops to the report state and notify the central.
async fn op_loop(
    conn: &Connection,
    server: &GatewayServer,
    op_rx: Receiver<'static, CriticalSectionRawMutex, BleOp, BLE_OP_CHANNEL_DEPTH>,
    keyboard: &mut BleKeyboardState,
    mouse: &mut BleMouseState,
) -> Never {
    loop {
        let op = op_rx.receive().await;

        let result = match op {
            BleOp::PressKey(key) => {
                keyboard.press(key);
                notify_keyboard(conn, server, keyboard)
            }
            BleOp::ReleaseKey(key) => {
                keyboard.release(key);
                notify_keyboard(conn, server, keyboard)
            }
            BleOp::MouseMove { dx, dy } => {
                notify_mouse(conn, server, mouse.motion_report(dx, dy))
            }
            BleOp::PressButton(button) => {
                mouse.press(button);
                notify_mouse(conn, server, mouse.buttons_report())
            }
            BleOp::ReleaseButton(button) => {
                mouse.release(button);
                notify_mouse(conn, server, mouse.buttons_report())
            }
        };

        if let Err(e) = result {
            warn!("{} - report dropped", e);
        }
    }
}

fn notify_keyboard(
    conn: &Connection,
    server: &GatewayServer,
    keyboard: &BleKeyboardState,
) -> Result<(), Error> {
    let mut buf = [0u8; KEYBOARD_REPORT_SIZE];
    keyboard.report().serialize(&mut buf);
    server
        .hid
        .boot_keyboard_input_notify(conn, &buf)
        .map_err(|_| BleError::NotifyFailed.into())
}

fn notify_mouse(
    conn: &Connection,
    server: &GatewayServer,
    report: crate::hid::MouseReport,
) -> Result<(), Error> {
    let mut buf = [0u8; MOUSE_REPORT_SIZE];
    report.serialize(&mut buf);
    server
        .hid
        .boot_mouse_input_notify(conn, &buf)
        .map_err(|_| BleError::NotifyFailed.into())
}
