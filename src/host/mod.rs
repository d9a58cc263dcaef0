//! Upstream host link - receives raw events from the USB-host board.
//!
//! The actual USB host enumeration and polling happens on a separate
//! controller board; this firmware only sees its output: a UART stream
//! of fixed-size frames, one per key/mouse callback (see [`frame`]).
//!
//! The link task resynchronises on the start-of-frame marker, decodes
//! each frame, and pushes the resulting [`InputEvent`] into the inbound
//! event channel consumed by the gateway task.  Undecodable frames are
//! logged and dropped; nothing upstream is ever acknowledged.

pub mod frame;

use crate::config::{EVENT_CHANNEL_DEPTH, HOST_FRAME_LEN, HOST_FRAME_SOF};
use crate::error::Error;
use crate::gateway::event::InputEvent;
use defmt::{info, warn};
use embassy_nrf::peripherals;
use embassy_nrf::uarte::UarteRx;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;

/// Read one frame, resynchronising on the SOF marker.
async fn read_frame(
    rx: &mut UarteRx<'static, peripherals::UARTE0>,
    buf: &mut [u8; HOST_FRAME_LEN],
) -> Result<InputEvent, Error> {
    let mut sof = [0u8; 1];
    loop {
        rx.read(&mut sof).await.map_err(|_| Error::HostLink)?;
        if sof[0] == HOST_FRAME_SOF {
            break;
        }
    }

    buf[0] = HOST_FRAME_SOF;
    rx.read(&mut buf[1..]).await.map_err(|_| Error::HostLink)?;

    frame::decode_frame(buf).ok_or(Error::BadFrame)
}

/// Read frames from the host link forever.
///
/// Runs as a dedicated Embassy task; events are delivered to the
/// gateway strictly in arrival order.
pub async fn host_link_task(
    mut rx: UarteRx<'static, peripherals::UARTE0>,
    event_tx: Sender<'static, CriticalSectionRawMutex, InputEvent, EVENT_CHANNEL_DEPTH>,
) -> ! {
    info!("Host link task started");

    let mut buf = [0u8; HOST_FRAME_LEN];

    loop {
        match read_frame(&mut rx, &mut buf).await {
            Ok(event) => {
                // try_send keeps the link task from ever blocking on a
                // slow consumer; overflow drops the event.
                if event_tx.try_send(event).is_err() {
                    warn!("Event channel full - dropping input event");
                }
            }
            Err(e) => warn!("Host link: {}", e),
        }
    }
}
