//! USB Device subsystem - presents the gateway to the wired host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  A single HID interface carries both report types,
//! distinguished by report ID (keyboard = 1, mouse = 2) as declared in
//! the combined report descriptor.
//!
//! The writer task drains the gateway's report channel and writes each
//! report, ID-prefixed, to the interrupt IN endpoint.  Writes are
//! best-effort: if the wired host is suspended or detached the report
//! is logged and dropped, never retried.

pub mod hid_device;
