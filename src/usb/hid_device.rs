//! USB HID gateway device - combined keyboard + mouse interface.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes one HID endpoint with the combined report
//! descriptor.

use crate::config;
use crate::error::Error;
use crate::hid::descriptor::{GATEWAY_REPORT_DESCRIPTOR, MAX_REPORT_LEN};
use crate::hid::HidReport;
use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

static HID_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Build result containing the USB device runner and the HID writer.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, Driver<'static, peripherals::USBD, HardwareVbusDetect>>,
    pub writer: HidWriter<'static, Driver<'static, peripherals::USBD, HardwareVbusDetect>, 16>,
}

/// Initialise the USB stack and create the gateway HID device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbHidDevice {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    // Build the USB device.
    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let hid_state = HID_STATE.init(State::new());
    let hid_config = HidConfig {
        report_descriptor: GATEWAY_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 16,
    };
    let writer = HidWriter::new(&mut builder, hid_state, hid_config);

    let device = builder.build();

    info!("USB HID gateway device initialised (keyboard + mouse, one interface)");

    UsbHidDevice { device, writer }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, and endpoint servicing.
/// It runs forever (or until the USB cable is disconnected).
pub async fn run_usb_device(
    mut device: UsbDevice<'static, Driver<'static, peripherals::USBD, HardwareVbusDetect>>,
) -> ! {
    info!("USB device task started");
    device.run().await
}

/// HID report forwarding task - reads from the gateway's report channel
/// and writes ID-prefixed reports to the HID endpoint.
pub async fn hid_writer_task(
    mut writer: HidWriter<'static, Driver<'static, peripherals::USBD, HardwareVbusDetect>, 16>,
    report_rx: Receiver<
        'static,
        CriticalSectionRawMutex,
        HidReport,
        { config::REPORT_CHANNEL_DEPTH },
    >,
) -> ! {
    info!("HID writer task started - waiting for reports");

    let mut buf = [0u8; MAX_REPORT_LEN];

    loop {
        let report = report_rx.receive().await;

        let n = report.serialize_with_id(&mut buf);
        if n == 0 {
            warn!("Report serialisation failed: {}", Error::BufferOverflow);
            continue;
        }
        if let Err(_e) = writer.write(&buf[..n]).await {
            warn!("USB HID write failed - report dropped");
        }
    }
}
