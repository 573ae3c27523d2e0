//! Nextion Hardware Abstraction Layer
//!
//! This crate defines the serial transport the Nextion driver consumes.
//! Chip-specific HALs (or a host serial port wrapper) implement these
//! traits so the same driver code runs on any board.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Widget layer (buttons, sliders, ...)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nextion-core (framing, dispatch)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nextion-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`uart::ConfigurableUart`] - Runtime line configuration
//! - [`clock::Clock`] - Monotonic millisecond time base
//! - [`Transport`] - Everything the driver needs from one port
//!
//! Fixed pauses go through [`embedded_hal::delay::DelayNs`].

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use embedded_hal::delay::DelayNs;
pub use uart::{
    ConfigurableUart, DataBits, ErrorType, Parity, StopBits, Uart, UartConfig, UartRx, UartTx,
    NEXTION_DEFAULT_BAUD,
};

/// A byte-oriented serial link with a time base
///
/// Bundles what the display driver consumes: a byte-available query, a
/// blocking single-byte read, raw writes, line configuration and a
/// monotonic millisecond clock.
pub trait Transport: Uart + ConfigurableUart + Clock {}

// Blanket implementation
impl<T: Uart + ConfigurableUart + Clock> Transport for T {}
