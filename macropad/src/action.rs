//! Resolved button actions.
//!
//! Key names are resolved once, when the table is built. A failure here stops the macropad before
//! any pin is polled.
use heapless::{String, Vec};
use macropad_types::keycode::HidKeyCode;

use crate::config::{MacropadConfig, PinName, RawAction, MAX_BUTTONS, MAX_KEYS_PER_ACTION, TEXT_CAPACITY};
use crate::MacropadError;

/// What a button does when pressed
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    /// Type the text out once
    Text(String<TEXT_CAPACITY>),
    /// Hold all the keys down until release
    KeySequence(Vec<HidKeyCode, MAX_KEYS_PER_ACTION>),
}

impl ButtonAction {
    /// Keys held by this action, empty for text actions
    pub fn keys(&self) -> &[HidKeyCode] {
        match self {
            ButtonAction::Text(_) => &[],
            ButtonAction::KeySequence(keys) => keys.as_slice(),
        }
    }
}

/// Resolve the raw action of `pin` into a [`ButtonAction`]
pub fn resolve_action(pin: &PinName, raw: &RawAction) -> Result<ButtonAction, MacropadError> {
    match raw {
        RawAction::Text(text) => Ok(ButtonAction::Text(text.clone())),
        RawAction::Keys(names) => {
            let mut keys = Vec::new();
            for name in names {
                let keycode =
                    HidKeyCode::from_name(name.as_str()).ok_or_else(|| MacropadError::UnknownKeyCode(name.clone()))?;
                keys.push(keycode)
                    .map_err(|_| MacropadError::TooManyKeys(pin.clone()))?;
            }
            Ok(ButtonAction::KeySequence(keys))
        }
    }
}

/// Resolved actions of all buttons, in polling order.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionTable {
    entries: Vec<(PinName, ButtonAction), MAX_BUTTONS>,
}

impl ActionTable {
    /// Build the table from the configuration, failing on the first unknown key name
    pub fn build(config: &MacropadConfig) -> Result<Self, MacropadError> {
        let mut entries = Vec::new();
        for button in &config.button_pins {
            let action = resolve_action(&button.pin, &button.action)?;
            debug!("Button {} resolved to {:?}", button.pin.as_str(), action);
            entries
                .push((button.pin.clone(), action))
                .map_err(|_| MacropadError::TooManyButtons)?;
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Action of the `idx`-th button
    pub fn get(&self, idx: usize) -> Option<&ButtonAction> {
        self.entries.get(idx).map(|(_, action)| action)
    }

    /// Iterate over `(pin name, action)` pairs, in polling order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ButtonAction)> {
        self.entries.iter().map(|(pin, action)| (pin.as_str(), action))
    }
}
