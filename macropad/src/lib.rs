//! # Macropad
//!
//! Firmware core of a small USB macropad: a handful of buttons, each typing a text or holding a
//! set of keys, with per-button backlight and a serial port that triggers a reload.
//!
//! The loop is a single owned [`Macropad`], polled without blocking:
//!
//! - [`action`] resolves the configured key names once, at startup
//! - [`light`] sets the LED brightness once, at startup
//! - [`button`] and [`debounce`] turn raw pin reads into press and release edges
//! - [`keyboard`] turns edges into HID keyboard reports
//! - [`watchdog`] asks for a restart when data arrives on the control channel
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod action;
pub mod boot;
pub mod button;
pub mod config;
pub mod debounce;
mod error;
pub mod hid;
pub mod keyboard;
pub mod light;
mod runner;
pub mod usb;
pub mod watchdog;

pub use error::MacropadError;
pub use runner::{run_macropad, Macropad};
pub use watchdog::RestartRequest;

pub use macropad_types::keycode::HidKeyCode;

#[doc(hidden)]
pub use paste;
#[doc(hidden)]
pub use usbd_hid;
