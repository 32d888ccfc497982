#![no_main]
#![no_std]

use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::join::join3;
use embassy_rp::{
    bind_interrupts,
    gpio::{Input, Level, Output, Pull},
    peripherals::USB,
    pwm::{Config as PwmConfig, Pwm},
    usb::{Driver, InterruptHandler},
};
use macropad::{
    add_usb_serial, add_usb_writer,
    boot::reboot_keyboard,
    config::{BehaviorConfig, KeyboardUsbConfig, LED_FREQUENCY_HZ, MacropadConfig},
    run_macropad,
    usb::{descriptor::KeyboardReport, new_usb_builder, run_control_listener, UsbKeyboardWriter},
    watchdog::SerialByteCounter,
};
use panic_probe as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

/// Encoded `keyboard_config.json`, see build.rs
static CONFIG_BLOB: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/macropad_config.bin"));

/// Default clk_sys of the RP2040
const CLK_SYS_HZ: u32 = 125_000_000;
const PWM_DIVIDER: u8 = 2;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Macropad start!");
    // Initialize peripherals
    let p = embassy_rp::init(Default::default());

    let mut status_led = Output::new(p.PIN_25, Level::Low);

    let config = MacropadConfig::load_or_default(Some(CONFIG_BLOB));

    // Buttons pull up, pressed buttons read low
    let mut buttons = [
        ("GP1", Some(Input::new(p.PIN_1, Pull::Up))),
        ("GP2", Some(Input::new(p.PIN_2, Pull::Up))),
        ("GP14", Some(Input::new(p.PIN_14, Pull::Up))),
        ("GP15", Some(Input::new(p.PIN_15, Pull::Up))),
    ];
    let resolve_pin = |name: &str| {
        buttons
            .iter_mut()
            .find(|(pin, _)| *pin == name)
            .and_then(|(_, input)| input.take())
    };

    // LEDs on GP28, GP27, GP17 and GP16, in this order
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = PWM_DIVIDER.into();
    pwm_config.top = (CLK_SYS_HZ / PWM_DIVIDER as u32 / LED_FREQUENCY_HZ - 1) as u16;
    let (gp28, _) = Pwm::new_output_a(p.PWM_SLICE6, p.PIN_28, pwm_config.clone()).split();
    let (_, gp27) = Pwm::new_output_b(p.PWM_SLICE5, p.PIN_27, pwm_config.clone()).split();
    let (gp16, gp17) = Pwm::new_output_ab(p.PWM_SLICE0, p.PIN_16, p.PIN_17, pwm_config).split();
    let mut leds = [unwrap!(gp28), unwrap!(gp27), unwrap!(gp17), unwrap!(gp16)];

    // Create the usb driver, from the HAL
    let driver = Driver::new(p.USB, Irqs);
    let mut builder = new_usb_builder(driver, KeyboardUsbConfig::default());
    let mut keyboard_writer = add_usb_writer!(&mut builder, KeyboardReport, 8);
    let serial = add_usb_serial!(&mut builder);
    let mut usb_device = builder.build();

    status_led.set_high();

    let macropad_fut = async {
        let writer = UsbKeyboardWriter::new(&mut keyboard_writer);
        match run_macropad(
            &config,
            BehaviorConfig::default(),
            &mut leds,
            resolve_pin,
            writer,
            SerialByteCounter,
        )
        .await
        {
            Ok(_) => reboot_keyboard(),
            Err(e) => defmt::panic!("Macropad stopped: {}", e),
        }
    };

    join3(usb_device.run(), run_control_listener(serial), macropad_fut).await;
}
