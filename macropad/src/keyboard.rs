//! Virtual HID keyboard.
//!
//! Keeps the state of the single keyboard report shared by all buttons, and sends it to the host
//! whenever it changes.
use macropad_types::keycode::{HidKeyCode, from_ascii};
use macropad_types::modifier::HidModifiers;

use crate::action::ButtonAction;
use crate::config::ReleaseMode;
use crate::hid::{HidError, HidWriterTrait};
use crate::usb::descriptor::KeyboardReport;

/// Number of non-modifier keys a boot keyboard report can carry
pub const KEY_SLOTS: usize = 6;

pub struct HidKeyboard<W: HidWriterTrait<ReportType = KeyboardReport>> {
    writer: W,
    /// Held modifiers
    modifiers: HidModifiers,
    /// Held keys, `HidKeyCode::No` marks a free slot
    held_keycodes: [HidKeyCode; KEY_SLOTS],
    release_mode: ReleaseMode,
}

impl<W: HidWriterTrait<ReportType = KeyboardReport>> HidKeyboard<W> {
    pub fn new(writer: W, release_mode: ReleaseMode) -> Self {
        Self {
            writer,
            modifiers: HidModifiers::new(),
            held_keycodes: [HidKeyCode::No; KEY_SLOTS],
            release_mode,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// The report describing the currently held keys
    pub fn held_report(&self) -> KeyboardReport {
        let mut report = KeyboardReport {
            modifier: self.modifiers.into_bits(),
            ..Default::default()
        };
        for (slot, keycode) in report.keycodes.iter_mut().zip(self.held_keycodes.iter()) {
            *slot = *keycode as u8;
        }
        report
    }

    /// Hold a single key down and report it
    pub async fn press(&mut self, keycode: HidKeyCode) -> Result<(), HidError> {
        self.press_keys(&[keycode]).await
    }

    /// Hold all the keys down and report them at once
    pub async fn press_keys(&mut self, keycodes: &[HidKeyCode]) -> Result<(), HidError> {
        for &keycode in keycodes {
            self.register(keycode);
        }
        self.send_held().await
    }

    /// Release a single key and report it
    pub async fn release(&mut self, keycode: HidKeyCode) -> Result<(), HidError> {
        self.unregister(keycode);
        self.send_held().await
    }

    /// Release every held key, whichever button pressed it
    pub async fn release_all(&mut self) -> Result<(), HidError> {
        self.modifiers = HidModifiers::new();
        self.held_keycodes = [HidKeyCode::No; KEY_SLOTS];
        self.send_held().await
    }

    /// Type the text with a US layout.
    ///
    /// Each character is sent as a press report followed by a release report. Keys held by other
    /// buttons stay held in both reports, except the character's own key, which is lifted before
    /// the press. Characters without a US layout key are skipped.
    pub async fn write_text(&mut self, text: &str) -> Result<(), HidError> {
        for c in text.chars() {
            let (keycode, shifted) = if c.is_ascii() {
                from_ascii(c as u8)
            } else {
                (HidKeyCode::No, false)
            };
            if keycode == HidKeyCode::No {
                warn!("Cannot type {:?}, skipped", c as u32);
                continue;
            }

            let mut report = self.held_report();
            if self.held_keycodes.contains(&keycode) {
                // Lift the key first, the host only sees a keystroke on a new key down
                debug!("{:?} is held, lifting it to type {:?}", keycode, c as u32);
                for k in report.keycodes.iter_mut().filter(|k| **k == keycode as u8) {
                    *k = HidKeyCode::No as u8;
                }
                self.send(&report).await?;
            }
            if shifted {
                report.modifier |= HidModifiers::new().with_left_shift(true).into_bits();
            }
            let Some(slot) = report.keycodes.iter_mut().find(|k| **k == HidKeyCode::No as u8) else {
                warn!("No free key slot to type {:?}, skipped", c as u32);
                continue;
            };
            *slot = keycode as u8;

            self.send(&report).await?;
            self.send_held().await?;
        }
        Ok(())
    }

    /// Emit the HID activity of a button press
    pub async fn dispatch_press(&mut self, action: &ButtonAction) -> Result<(), HidError> {
        match action {
            ButtonAction::Text(text) => self.write_text(text.as_str()).await,
            ButtonAction::KeySequence(keys) => self.press_keys(keys.as_slice()).await,
        }
    }

    /// Emit the HID activity of a button release
    pub async fn dispatch_release(&mut self, action: &ButtonAction) -> Result<(), HidError> {
        match self.release_mode {
            ReleaseMode::All => self.release_all().await,
            ReleaseMode::PerButton => {
                let keys = action.keys();
                if keys.is_empty() {
                    return Ok(());
                }
                for &keycode in keys {
                    self.unregister(keycode);
                }
                self.send_held().await
            }
        }
    }

    fn register(&mut self, keycode: HidKeyCode) {
        if keycode.is_modifier() {
            self.modifiers |= keycode.to_hid_modifiers();
            return;
        }
        if keycode == HidKeyCode::No || self.held_keycodes.contains(&keycode) {
            return;
        }
        match self.held_keycodes.iter_mut().find(|k| **k == HidKeyCode::No) {
            Some(slot) => *slot = keycode,
            None => warn!("All {} key slots are used, {:?} dropped", KEY_SLOTS, keycode),
        }
    }

    fn unregister(&mut self, keycode: HidKeyCode) {
        if keycode.is_modifier() {
            self.modifiers.remove(keycode.to_hid_modifiers());
            return;
        }
        for slot in self.held_keycodes.iter_mut().filter(|k| **k == keycode) {
            *slot = HidKeyCode::No;
        }
    }

    async fn send_held(&mut self) -> Result<(), HidError> {
        let report = self.held_report();
        self.send(&report).await
    }

    async fn send(&mut self, report: &KeyboardReport) -> Result<(), HidError> {
        trace!("Sending keyboard report: {:?}", report);
        match self.writer.write_report(report).await {
            Ok(_) => Ok(()),
            Err(e) => {
                error!("Failed to send keyboard report: {:?}", e);
                Err(e)
            }
        }
    }
}
