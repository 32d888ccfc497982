//! Traits and types for HID message reporting.
use core::future::Future;

use embassy_usb::driver::EndpointError;

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidError {
    /// The USB endpoint rejected the report, e.g. because the device was disabled
    UsbEndpointError(EndpointError),
}

/// HidWriterTrait is used for writing HID reports to the host.
///
/// The macropad core only talks to the host through this trait, so the transport can be replaced,
/// e.g. by a recording writer in tests.
pub trait HidWriterTrait {
    /// The report type that the writer sends
    type ReportType;

    /// Write report to the host, return the number of bytes written if success.
    fn write_report(&mut self, report: &Self::ReportType) -> impl Future<Output = Result<usize, HidError>>;
}
