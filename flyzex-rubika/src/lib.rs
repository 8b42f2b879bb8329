//! # flyzex-rubika
//!
//! Minimal async client for the Rubika Bot API plus the long-polling
//! [`Dispatcher`] that turns raw payloads into [`flyzex_core::Update`]s and
//! feeds them to registered handler groups.

pub mod api;
pub mod dispatcher;
pub mod error;
pub mod parse;
pub mod wire;

pub use api::RubikaApi;
pub use dispatcher::Dispatcher;
pub use error::RubikaError;
pub use wire::{Keypad, KeypadButton, KeypadRow, RawMessage, RawUpdate};
