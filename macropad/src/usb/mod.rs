use core::sync::atomic::{AtomicBool, Ordering};

use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::class::hid::{HidWriter, ReportId, RequestHandler};
use embassy_usb::control::OutResponse;
use embassy_usb::driver::Driver;
use embassy_usb::{Builder, Handler};
use static_cell::StaticCell;

use crate::config::KeyboardUsbConfig;
use crate::hid::{HidError, HidWriterTrait};
use crate::watchdog::SerialByteCounter;

pub mod descriptor;

use descriptor::KeyboardReport;

/// Whether the host has configured the device
pub(crate) static USB_CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Max packet size of the serial port
pub const SERIAL_PACKET_SIZE: u16 = 64;

/// Keyboard reports over the USB HID keyboard interface
pub struct UsbKeyboardWriter<'a, 'd, D: Driver<'d>> {
    pub(crate) keyboard_writer: &'a mut HidWriter<'d, D, 8>,
}

impl<'a, 'd, D: Driver<'d>> UsbKeyboardWriter<'a, 'd, D> {
    pub fn new(keyboard_writer: &'a mut HidWriter<'d, D, 8>) -> Self {
        Self { keyboard_writer }
    }
}

impl<'d, D: Driver<'d>> HidWriterTrait for UsbKeyboardWriter<'_, 'd, D> {
    type ReportType = KeyboardReport;

    async fn write_report(&mut self, report: &Self::ReportType) -> Result<usize, HidError> {
        if !USB_CONFIGURED.load(Ordering::Acquire) {
            debug!("Waiting for USB to be configured");
            self.keyboard_writer.ready().await;
        }
        self.keyboard_writer
            .write_serialize(report)
            .await
            .map_err(HidError::UsbEndpointError)?;
        Ok(8)
    }
}

pub fn new_usb_builder<'d, D: Driver<'d>>(driver: D, keyboard_config: KeyboardUsbConfig<'d>) -> Builder<'d, D> {
    // Create embassy-usb Config
    let mut usb_config = embassy_usb::Config::new(keyboard_config.vid, keyboard_config.pid);
    usb_config.manufacturer = Some(keyboard_config.manufacturer);
    usb_config.product = Some(keyboard_config.product_name);
    usb_config.serial_number = Some(keyboard_config.serial_number);
    usb_config.max_power = 100;

    // Required for windows compatibility.
    usb_config.max_packet_size_0 = 64;
    usb_config.device_class = 0xEF;
    usb_config.device_sub_class = 0x02;
    usb_config.device_protocol = 0x01;
    usb_config.composite_with_iads = true;

    // HID keyboard and CDC-ACM serial
    const USB_BUF_SIZE: usize = 256;

    // Create embassy-usb DeviceBuilder using the driver and config.
    static CONFIG_DESC: StaticCell<[u8; USB_BUF_SIZE]> = StaticCell::new();
    static BOS_DESC: StaticCell<[u8; 16]> = StaticCell::new();
    static MSOS_DESC: StaticCell<[u8; 16]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 128]> = StaticCell::new();

    // UsbDevice builder
    let mut builder = Builder::new(
        driver,
        usb_config,
        &mut CONFIG_DESC.init([0; USB_BUF_SIZE])[..],
        &mut BOS_DESC.init([0; 16])[..],
        &mut MSOS_DESC.init([0; 16])[..],
        &mut CONTROL_BUF.init([0; 128])[..],
    );

    static DEVICE_HANDLER: StaticCell<UsbDeviceHandler> = StaticCell::new();
    builder.handler(DEVICE_HANDLER.init(UsbDeviceHandler::new()));

    builder
}

/// Add the CDC-ACM serial port used as the reload control channel
#[macro_export]
macro_rules! add_usb_serial {
    ($usb_builder:expr) => {{
        // The serial port can be only initialized once, so just use a fixed name for the state
        static SERIAL_STATE: ::static_cell::StaticCell<::embassy_usb::class::cdc_acm::State> =
            ::static_cell::StaticCell::new();
        let state = SERIAL_STATE.init(::embassy_usb::class::cdc_acm::State::new());
        ::embassy_usb::class::cdc_acm::CdcAcmClass::new($usb_builder, state, $crate::usb::SERIAL_PACKET_SIZE)
    }};
}

/// Count the bytes received on the serial port, feeding [`SerialByteCounter`].
///
/// The content is discarded.
pub async fn run_control_listener<'d, D: Driver<'d>>(mut class: CdcAcmClass<'d, D>) -> ! {
    let mut buf = [0u8; SERIAL_PACKET_SIZE as usize];
    loop {
        class.wait_connection().await;
        info!("Serial port connected");
        while let Ok(n) = class.read_packet(&mut buf).await {
            SerialByteCounter::record(n);
        }
        info!("Serial port disconnected");
    }
}

#[macro_export]
macro_rules! add_usb_writer {
    ($usb_builder:expr, $descriptor:ty, $n:expr) => {{
        // Initialize hid writer
        // Current implementation requires the static STATE, so we need to use the paste crate to generate the static variable name.
        use $crate::usbd_hid::descriptor::SerializedDescriptor;
        $crate::paste::paste! {
            static [<$descriptor:snake:upper _STATE>]: ::static_cell::StaticCell<::embassy_usb::class::hid::State> = ::static_cell::StaticCell::new();
            static [<$descriptor:snake:upper _HANDLER>]: ::static_cell::StaticCell<$crate::usb::UsbRequestHandler> = ::static_cell::StaticCell::new();
        }

        let state = $crate::paste::paste! { [<$descriptor:snake:upper _STATE>].init(::embassy_usb::class::hid::State::new()) };
        let request_handler = $crate::paste::paste! { [<$descriptor:snake:upper _HANDLER>].init($crate::usb::UsbRequestHandler {}) };

        let hid_config = ::embassy_usb::class::hid::Config {
            report_descriptor: <$descriptor>::desc(),
            request_handler: Some(request_handler),
            poll_ms: 1,
            max_packet_size: 64,
            hid_subclass: ::embassy_usb::class::hid::HidSubclass::Boot,
            hid_boot_protocol: ::embassy_usb::class::hid::HidBootProtocol::Keyboard,
        };

        let rw: ::embassy_usb::class::hid::HidWriter<_, $n> = ::embassy_usb::class::hid::HidWriter::new($usb_builder, state, hid_config);
        rw
    }};
}

pub struct UsbRequestHandler {}

impl RequestHandler for UsbRequestHandler {
    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        info!("Set report for {:?}: {:?}", id, data);
        OutResponse::Accepted
    }
}

pub(crate) struct UsbDeviceHandler {}

impl UsbDeviceHandler {
    fn new() -> Self {
        UsbDeviceHandler {}
    }
}

impl Handler for UsbDeviceHandler {
    fn enabled(&mut self, enabled: bool) {
        if enabled {
            info!("Device enabled");
        } else {
            info!("Device disabled");
            USB_CONFIGURED.store(false, Ordering::Release);
        }
    }

    fn reset(&mut self) {
        info!("Bus reset, the Vbus current limit is 100mA");
        USB_CONFIGURED.store(false, Ordering::Release);
    }

    fn addressed(&mut self, addr: u8) {
        info!("USB address set to: {}", addr);
    }

    fn configured(&mut self, configured: bool) {
        USB_CONFIGURED.store(configured, Ordering::Release);
        if configured {
            info!("Device configured, it may now draw up to the configured current from Vbus.")
        } else {
            info!("Device is no longer configured, the Vbus current limit is 100mA.");
        }
    }

    fn suspended(&mut self, suspended: bool) {
        if suspended {
            info!("Device suspended");
        } else {
            info!("Device resumed");
        }
    }
}
