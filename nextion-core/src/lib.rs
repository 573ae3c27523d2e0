//! Board-agnostic driver for Nextion HMI touch displays
//!
//! This crate contains everything between the serial port and the widget
//! layer:
//!
//! - Frame receiver with a terminator run that survives between reads
//! - Reply decoders (number, string, instruction finished)
//! - Instruction sender and start-up sequence
//! - Touch event polling and listener dispatch
//! - Driver configuration and error types
//!
//! # Example
//!
//! ```ignore
//! let mut nex = Nextion::new(uart, delay, DriverConfig::default())?;
//! nex.init()?;
//!
//! let mut ok_button = OkButton::new(0, 2);
//! loop {
//!     nex.poll_touch(&mut [&mut ok_button])?;
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to later modules
#[macro_use]
mod fmt;

pub mod config;
pub mod driver;
pub mod error;
pub mod listener;
pub mod receiver;

#[cfg(test)]
mod mock;

pub use config::{ConfigError, DeadlineMode, DriverConfig};
pub use driver::Nextion;
pub use error::Error;
pub use listener::{dispatch_touch, TouchListener};
pub use receiver::FrameReceiver;
