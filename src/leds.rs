//! Mode indicator LEDs.
//!
//! Two GPIO-driven LEDs, one per output mode.  [`ModeLeds::set_mode`]
//! runs synchronously inside the gateway's mode flip, so the pair is
//! always in a mutually exclusive state: the active mode's LED on, the
//! other off.

use crate::gateway::mode::{ModeIndicator, OperationMode};
use defmt::info;
use embassy_nrf::gpio::Output;

pub struct ModeLeds {
    usb: Output<'static>,
    ble: Output<'static>,
}

impl ModeLeds {
    pub fn new(usb: Output<'static>, ble: Output<'static>) -> Self {
        Self { usb, ble }
    }
}

impl ModeIndicator for ModeLeds {
    fn set_mode(&mut self, mode: OperationMode) {
        match mode {
            OperationMode::Usb => {
                self.usb.set_high();
                self.ble.set_low();
            }
            OperationMode::Ble => {
                self.usb.set_low();
                self.ble.set_high();
            }
        }
        info!("Output mode: {}", mode);
    }
}
