//! usb2dual firmware entry point.
//!
//! Wires the gateway core to its collaborators and spawns one Embassy
//! task per concern:
//!
//! - `softdevice_task`: runs the SoftDevice event loop.
//! - `usb_device_task` / `usb_writer_task`: downstream USB HID device.
//! - `ble_task`: HID-over-GATT server for the wireless host.
//! - `host_link_task`: UART link from the USB-host controller board.
//! - `gateway_task`: drains the inbound event channel through the
//!   gateway core - the single dispatch loop that preserves event
//!   ordering.
//!
//! The gateway's backends never block: USB reports and BLE ops are
//! pushed into channels with `try_send`, and overflow means the event
//! is dropped (best-effort transports, by design).

#![no_std]
#![no_main]

mod ble;
mod config;
mod error;
mod gateway;
mod hid;
mod host;
mod leds;
mod usb;

use defmt::{info, unwrap, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{bind_interrupts, interrupt, peripherals, uarte};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_usb::class::hid::HidWriter;
use embassy_usb::UsbDevice;
use nrf_softdevice::{raw, Softdevice};
use panic_probe as _;
use static_cell::StaticCell;

use ble::hid_server::GatewayServer;
use ble::BleOp;
use config::{BLE_OP_CHANNEL_DEPTH, EVENT_CHANNEL_DEPTH, REPORT_CHANNEL_DEPTH};
use gateway::event::InputEvent;
use gateway::router::{BleBackend, BleHid, MouseButton, ReportSink, UsbBackend};
use gateway::Gateway;
use hid::HidReport;
use leds::ModeLeds;

bind_interrupts!(struct Irqs {
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
});

// Inter-task channels.  All communication is fire-and-forget; the only
// shared mutable state (mode + modifier mask) lives inside the gateway
// task and is never touched concurrently.
static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, EVENT_CHANNEL_DEPTH> =
    Channel::new();
static REPORT_CHANNEL: Channel<CriticalSectionRawMutex, HidReport, REPORT_CHANNEL_DEPTH> =
    Channel::new();
static BLE_OP_CHANNEL: Channel<CriticalSectionRawMutex, BleOp, BLE_OP_CHANNEL_DEPTH> =
    Channel::new();

static SERVER: StaticCell<GatewayServer> = StaticCell::new();

/// USB report sink backed by the report channel.
struct ChannelReportSink {
    tx: Sender<'static, CriticalSectionRawMutex, HidReport, REPORT_CHANNEL_DEPTH>,
}

impl ReportSink for ChannelReportSink {
    fn send(&mut self, report: HidReport) {
        if self.tx.try_send(report).is_err() {
            warn!("USB report channel full - report dropped");
        }
    }
}

/// BLE capability backed by the op channel.
struct ChannelBleHid {
    tx: Sender<'static, CriticalSectionRawMutex, BleOp, BLE_OP_CHANNEL_DEPTH>,
}

impl ChannelBleHid {
    fn push(&mut self, op: BleOp) {
        if self.tx.try_send(op).is_err() {
            warn!("BLE op channel full - op dropped");
        }
    }
}

impl BleHid for ChannelBleHid {
    fn press_key(&mut self, key: u8) {
        self.push(BleOp::PressKey(key));
    }

    fn release_key(&mut self, key: u8) {
        self.push(BleOp::ReleaseKey(key));
    }

    fn mouse_move(&mut self, dx: i8, dy: i8) {
        self.push(BleOp::MouseMove { dx, dy });
    }

    fn press_button(&mut self, button: MouseButton) {
        self.push(BleOp::PressButton(button));
    }

    fn release_button(&mut self, button: MouseButton) {
        self.push(BleOp::ReleaseButton(button));
    }
}

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn usb_device_task(
    device: UsbDevice<'static, Driver<'static, peripherals::USBD, HardwareVbusDetect>>,
) -> ! {
    usb::hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn usb_writer_task(
    writer: HidWriter<'static, Driver<'static, peripherals::USBD, HardwareVbusDetect>, 16>,
    report_rx: Receiver<'static, CriticalSectionRawMutex, HidReport, REPORT_CHANNEL_DEPTH>,
) -> ! {
    usb::hid_device::hid_writer_task(writer, report_rx).await
}

#[embassy_executor::task]
async fn ble_task(
    sd: &'static Softdevice,
    server: &'static GatewayServer,
    op_rx: Receiver<'static, CriticalSectionRawMutex, BleOp, BLE_OP_CHANNEL_DEPTH>,
) -> ! {
    ble::hid_server::ble_server_task(sd, server, op_rx).await
}

#[embassy_executor::task]
async fn host_link_task(
    rx: uarte::UarteRx<'static, peripherals::UARTE0>,
    event_tx: Sender<'static, CriticalSectionRawMutex, InputEvent, EVENT_CHANNEL_DEPTH>,
) -> ! {
    host::host_link_task(rx, event_tx).await
}

/// The single dispatch loop: one event in, one backend call out.
#[embassy_executor::task]
async fn gateway_task(
    mut gw: Gateway<UsbBackend<ChannelReportSink>, BleBackend<ChannelBleHid>, ModeLeds>,
    event_rx: Receiver<'static, CriticalSectionRawMutex, InputEvent, EVENT_CHANNEL_DEPTH>,
) -> ! {
    info!("Gateway task started");
    loop {
        let event = event_rx.receive().await;
        gw.handle(event);
    }
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: config::BLE_DEVICE_NAME.as_ptr() as _,
            current_len: config::BLE_DEVICE_NAME.len() as u16,
            max_len: config::BLE_DEVICE_NAME.len() as u16,
            write_perm: unsafe { core::mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("usb2dual - dual-output HID gateway");

    // Interrupt priorities 0, 1 and 4 are reserved by the SoftDevice.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.gpiote_interrupt_priority = interrupt::Priority::P2;
    nrf_config.time_interrupt_priority = interrupt::Priority::P2;
    let p = embassy_nrf::init(nrf_config);

    // SoftDevice + GATT server.
    let sd = Softdevice::enable(&softdevice_config());
    let server = SERVER.init(ble::hid_server::init(sd));
    let sd: &'static Softdevice = sd;
    unwrap!(spawner.spawn(softdevice_task(sd)));

    // Downstream USB HID device.
    let usb_dev = usb::hid_device::init(p.USBD);
    unwrap!(spawner.spawn(usb_device_task(usb_dev.device)));
    unwrap!(spawner.spawn(usb_writer_task(
        usb_dev.writer,
        REPORT_CHANNEL.receiver()
    )));

    // BLE HID server.
    unwrap!(spawner.spawn(ble_task(sd, server, BLE_OP_CHANNEL.receiver())));

    // Upstream host link (UART from the USB-host controller board).
    let mut uart_config = uarte::Config::default();
    uart_config.baudrate = uarte::Baudrate::BAUD115200;
    let uart = uarte::Uarte::new(p.UARTE0, Irqs, p.P0_08, p.P0_06, uart_config);
    let (_tx, rx) = uart.split();
    unwrap!(spawner.spawn(host_link_task(rx, EVENT_CHANNEL.sender())));

    // Gateway core: boots in USB mode, LEDs driven to match.
    let leds = ModeLeds::new(
        Output::new(p.P0_13, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_14, Level::Low, OutputDrive::Standard),
    );
    let gw = Gateway::new(
        UsbBackend::new(ChannelReportSink {
            tx: REPORT_CHANNEL.sender(),
        }),
        BleBackend::new(ChannelBleHid {
            tx: BLE_OP_CHANNEL.sender(),
        }),
        leds,
    );
    unwrap!(spawner.spawn(gateway_task(gw, EVENT_CHANNEL.receiver())));

    info!("All tasks spawned - gateway running");
}
