use embassy_time::{Instant, Timer};
use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;
use heapless::Vec;

use crate::action::ActionTable;
use crate::button::{Button, Edge};
use crate::config::{BehaviorConfig, MacropadConfig, MAX_BUTTONS};
use crate::debounce::Debouncer;
use crate::hid::HidWriterTrait;
use crate::keyboard::HidKeyboard;
use crate::light::apply_intensities;
use crate::usb::descriptor::KeyboardReport;
use crate::watchdog::{ControlChannel, ReloadWatchdog, RestartRequest};
use crate::MacropadError;

/// All the state of the polling loop.
///
/// Buttons are polled in configuration order, each poll is a non-blocking pass over all of them.
pub struct Macropad<In, W, C>
where
    In: InputPin,
    W: HidWriterTrait<ReportType = KeyboardReport>,
    C: ControlChannel,
{
    buttons: Vec<Button<In>, MAX_BUTTONS>,
    actions: ActionTable,
    debouncer: Debouncer,
    keyboard: HidKeyboard<W>,
    watchdog: ReloadWatchdog<C>,
    behavior: BehaviorConfig,
}

impl<In, W, C> Macropad<In, W, C>
where
    In: InputPin,
    W: HidWriterTrait<ReportType = KeyboardReport>,
    C: ControlChannel,
{
    /// Build the macropad from the configuration.
    ///
    /// `resolve_pin` gives the input pin of a configured button name. All key names and pins are
    /// resolved here, nothing is sent to the host if any of them fails.
    pub fn new(
        config: &MacropadConfig,
        behavior: BehaviorConfig,
        mut resolve_pin: impl FnMut(&str) -> Option<In>,
        writer: W,
        control: C,
    ) -> Result<Self, MacropadError> {
        let actions = ActionTable::build(config)?;

        let mut buttons = Vec::new();
        for button in &config.button_pins {
            let pin = resolve_pin(button.pin.as_str()).ok_or_else(|| MacropadError::UnknownPin(button.pin.clone()))?;
            buttons
                .push(Button::new(button.pin.clone(), pin))
                .map_err(|_| MacropadError::TooManyButtons)?;
        }
        info!("Macropad started with {} buttons", buttons.len());

        Ok(Self {
            buttons,
            actions,
            debouncer: Debouncer::new(&behavior),
            keyboard: HidKeyboard::new(writer, behavior.release_mode),
            watchdog: ReloadWatchdog::new(control),
            behavior,
        })
    }

    pub fn keyboard(&self) -> &HidKeyboard<W> {
        &self.keyboard
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    /// Run one pass of the loop at `now`.
    ///
    /// The reload watchdog is checked first: when it fires, no button is polled and the restart
    /// request is returned.
    pub async fn poll(&mut self, now: Instant) -> Result<Option<RestartRequest>, MacropadError> {
        if let Some(restart) = self.watchdog.check() {
            return Ok(Some(restart));
        }

        for (idx, button) in self.buttons.iter_mut().enumerate() {
            let Some(edge) = button.detect(idx, &mut self.debouncer, now) else {
                continue;
            };
            let Some(action) = self.actions.get(idx) else {
                continue;
            };
            match edge {
                Edge::Pressed => self.keyboard.dispatch_press(action).await?,
                Edge::Released => self.keyboard.dispatch_release(action).await?,
            }
        }
        Ok(None)
    }

    /// Poll forever, until a restart is requested or sending a report fails
    pub async fn run(&mut self) -> Result<RestartRequest, MacropadError> {
        loop {
            if let Some(restart) = self.poll(Instant::now()).await? {
                return Ok(restart);
            }
            Timer::after(self.behavior.scan_interval).await;
        }
    }
}

/// Start the macropad: resolve the configuration, light the LEDs, then run the polling loop.
///
/// Returns when a restart is requested, the caller is expected to reboot.
pub async fn run_macropad<In, W, C, P>(
    config: &MacropadConfig,
    behavior: BehaviorConfig,
    leds: &mut [P],
    resolve_pin: impl FnMut(&str) -> Option<In>,
    writer: W,
    control: C,
) -> Result<RestartRequest, MacropadError>
where
    In: InputPin,
    W: HidWriterTrait<ReportType = KeyboardReport>,
    C: ControlChannel,
    P: SetDutyCycle,
{
    let mut macropad = Macropad::new(config, behavior, resolve_pin, writer, control)?;
    apply_intensities(leds, config.led_intensities.as_slice())?;
    macropad.run().await
}
