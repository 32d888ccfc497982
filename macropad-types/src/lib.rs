//! # Macropad Types
//!
//! Fundamental type definitions shared by the macropad firmware and its host-side tooling.
//!
//! ## Modules
//!
//! - [`keycode`] - HID keycodes, the closed key-name table and US-layout ASCII translation
//! - [`modifier`] - Modifier bits of the keyboard report
//! - [`config`] - Configuration data model: LED intensities and per-button actions
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod config;
pub mod keycode;
pub mod modifier;
