//! Per-button backlight.
//!
//! Brightness is set once, at startup, from the configured intensities.
use embedded_hal::pwm::SetDutyCycle;

use crate::config::{DEFAULT_INTENSITY, MAX_DUTY_PERCENT};
use crate::MacropadError;

/// Convert an intensity percentage into a duty cycle, rounding half up.
///
/// Percentages above [`MAX_DUTY_PERCENT`] are clamped.
pub fn duty_for_percentage(percentage: u8, max_duty: u16) -> u16 {
    let percentage = percentage.min(MAX_DUTY_PERCENT) as u32;
    let max_percent = MAX_DUTY_PERCENT as u32;
    ((percentage * max_duty as u32 + max_percent / 2) / max_percent) as u16
}

/// Apply the intensities to the LED outputs, positionally.
///
/// Outputs without a paired intensity are driven at full brightness, extra intensities are ignored.
pub fn apply_intensities<P: SetDutyCycle>(outputs: &mut [P], intensities: &[u8]) -> Result<(), MacropadError> {
    if intensities.len() > outputs.len() {
        warn!(
            "{} LED intensities configured for {} outputs, ignoring the rest",
            intensities.len(),
            outputs.len()
        );
    }
    for (idx, output) in outputs.iter_mut().enumerate() {
        let percentage = match intensities.get(idx) {
            Some(&p) if p > MAX_DUTY_PERCENT => {
                warn!("LED {} intensity {} is out of range, clamped to {}", idx, p, MAX_DUTY_PERCENT);
                MAX_DUTY_PERCENT
            }
            Some(&p) => p,
            None => DEFAULT_INTENSITY,
        };
        let duty = duty_for_percentage(percentage, output.max_duty_cycle());
        output.set_duty_cycle(duty).map_err(|_| MacropadError::Pwm)?;
        debug!("LED {} set to {}% (duty {})", idx, percentage, duty);
    }
    Ok(())
}
