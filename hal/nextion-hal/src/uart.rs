//! UART serial communication abstractions
//!
//! Provides blocking serial traits for a slow, unbuffered link. Reads are
//! driven by polling [`UartRx::available`] before each byte.

/// Shared error type for one UART peripheral
pub trait ErrorType {
    /// Error type for transmit, receive and configuration operations
    type Error: core::fmt::Debug;
}

/// UART transmitter
pub trait UartTx: ErrorType {
    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx: ErrorType {
    /// Number of received bytes that can be read without blocking
    fn available(&mut self) -> usize;

    /// Read a single byte from the UART
    ///
    /// Blocks until a byte arrives. Callers check [`available`](Self::available)
    /// first when they must not block.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Drop every byte currently waiting in the receive buffer
    ///
    /// Returns how many bytes were discarded.
    fn discard_input(&mut self) -> Result<usize, Self::Error> {
        let mut dropped = 0;
        while self.available() > 0 {
            self.read_byte()?;
            dropped += 1;
        }
        Ok(dropped)
    }
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// UART whose line settings can change at runtime
pub trait ConfigurableUart: ErrorType {
    /// Reconfigure baud rate and framing
    fn apply_config(&mut self, config: &UartConfig) -> Result<(), Self::Error>;
}

/// Factory baud rate of Nextion modules
pub const NEXTION_DEFAULT_BAUD: u32 = 9600;

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: NEXTION_DEFAULT_BAUD,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopBits {
    One,
    Two,
}
