#![allow(dead_code)]

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin};
use embedded_hal::pwm::SetDutyCycle;
use heapless::{String, Vec};
use macropad::config::{BehaviorConfig, ButtonConfig, MacropadConfig, RawAction};
use macropad::hid::{HidError, HidWriterTrait};
use macropad::usb::descriptor::KeyboardReport;
use macropad::watchdog::ControlChannel;
use macropad::{HidKeyCode, Macropad};

// Init logger for tests
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Input pin driven by the test, counting its reads
pub struct FakePin {
    low: Rc<Cell<bool>>,
    reads: Rc<Cell<usize>>,
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.reads.set(self.reads.get() + 1);
        Ok(!self.low.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.low.get())
    }
}

/// Test side of a [`FakePin`]
#[derive(Clone, Default)]
pub struct PinHandle {
    low: Rc<Cell<bool>>,
    reads: Rc<Cell<usize>>,
}

impl PinHandle {
    pub fn pin(&self) -> FakePin {
        FakePin {
            low: self.low.clone(),
            reads: self.reads.clone(),
        }
    }

    pub fn press(&self) {
        self.low.set(true);
    }

    pub fn release(&self) {
        self.low.set(false);
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

pub struct FakePwm {
    pub duty: u16,
}

impl embedded_hal::pwm::ErrorType for FakePwm {
    type Error = Infallible;
}

impl SetDutyCycle for FakePwm {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}

/// Records every report written
#[derive(Clone, Default)]
pub struct RecordingWriter {
    pub reports: Rc<RefCell<std::vec::Vec<KeyboardReport>>>,
}

impl RecordingWriter {
    pub fn reports(&self) -> std::vec::Vec<KeyboardReport> {
        self.reports.borrow().clone()
    }
}

impl HidWriterTrait for RecordingWriter {
    type ReportType = KeyboardReport;

    async fn write_report(&mut self, report: &KeyboardReport) -> Result<usize, HidError> {
        self.reports.borrow_mut().push(*report);
        Ok(8)
    }
}

/// Writer of a disabled USB device
pub struct DisabledWriter;

impl HidWriterTrait for DisabledWriter {
    type ReportType = KeyboardReport;

    async fn write_report(&mut self, _report: &KeyboardReport) -> Result<usize, HidError> {
        Err(HidError::UsbEndpointError(
            embassy_usb::driver::EndpointError::Disabled,
        ))
    }
}

/// Control channel whose byte count is set by the test
#[derive(Clone, Default)]
pub struct FakeControl {
    pub bytes: Rc<Cell<usize>>,
    /// Bytes added at each sample
    pub step: usize,
}

impl FakeControl {
    pub fn receive(&self, n: usize) {
        self.bytes.set(self.bytes.get() + n);
    }
}

impl ControlChannel for FakeControl {
    fn bytes_available(&mut self) -> usize {
        let bytes = self.bytes.get();
        self.bytes.set(bytes + self.step);
        bytes
    }
}

pub fn text(s: &str) -> RawAction {
    RawAction::Text(String::try_from(s).unwrap())
}

pub fn keys(names: &[&str]) -> RawAction {
    RawAction::Keys(names.iter().map(|n| String::try_from(*n).unwrap()).collect())
}

pub fn config(buttons: &[(&str, RawAction)]) -> MacropadConfig {
    let button_pins: Vec<ButtonConfig, 16> = buttons
        .iter()
        .map(|(pin, action)| ButtonConfig {
            pin: String::try_from(*pin).unwrap(),
            action: action.clone(),
        })
        .collect();
    MacropadConfig {
        led_intensities: MacropadConfig::default_intensities(4),
        button_pins,
    }
}

/// A keyboard report holding `keycodes`, with `modifier` bits
pub fn report(modifier: u8, keycodes: &[HidKeyCode]) -> KeyboardReport {
    let mut report = KeyboardReport {
        modifier,
        ..Default::default()
    };
    for (slot, k) in report.keycodes.iter_mut().zip(keycodes) {
        *slot = *k as u8;
    }
    report
}

pub struct TestPad {
    pub macropad: Macropad<FakePin, RecordingWriter, FakeControl>,
    pub pins: std::vec::Vec<PinHandle>,
    pub writer: RecordingWriter,
    pub control: FakeControl,
}

/// Build a macropad whose buttons are wired to fake pins, in configuration order
pub fn build_macropad(config: &MacropadConfig, behavior: BehaviorConfig) -> TestPad {
    init_log();
    let pins: std::vec::Vec<PinHandle> = config.button_pins.iter().map(|_| PinHandle::default()).collect();
    let names: std::vec::Vec<&str> = config.button_pins.iter().map(|b| b.pin.as_str()).collect();
    let writer = RecordingWriter::default();
    let control = FakeControl::default();
    let macropad = Macropad::new(
        config,
        behavior,
        |name| names.iter().position(|n| *n == name).map(|idx| pins[idx].pin()),
        writer.clone(),
        control.clone(),
    )
    .unwrap();
    TestPad {
        macropad,
        pins,
        writer,
        control,
    }
}
