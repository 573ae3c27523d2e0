//! Driver configuration types
//!
//! These types define the link settings and timing windows used by the
//! driver. Defaults match the display's factory settings.

use core::fmt;

use nextion_hal::UartConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pause after each received byte, and between polls while waiting (ms)
pub const DEFAULT_BYTE_DELAY_MS: u32 = 10;

/// Window for replies to instructions (ms)
pub const DEFAULT_REPLY_TIMEOUT_MS: u64 = 100;

/// Window the touch poll waits for the first byte (ms)
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 100;

/// Baud rates the display firmware accepts
pub const SUPPORTED_BAUD_RATES: [u32; 13] = [
    2400, 4800, 9600, 19200, 31250, 38400, 57600, 115200, 230400, 250000, 256000, 512000, 921600,
];

/// How a reply decoder bounds its total wait
///
/// A decoder discards frames that are not the reply it waits for and reads
/// again. The two modes differ in what happens to the timeout on each
/// retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeadlineMode {
    /// The timeout covers the whole decode call. A stream of unrelated
    /// frames cannot extend the wait.
    #[default]
    Overall,
    /// Every retry gets a fresh timeout window. Matches the timing of the
    /// stock Arduino library; a display that keeps sending unrelated
    /// frames keeps the caller waiting.
    PerAttempt,
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Baud rate not accepted by the display
    UnsupportedBaudRate(u32),
    /// Byte delay must be at least 1 ms
    ZeroByteDelay,
    /// Config could not be encoded
    Serialize,
    /// Stored config could not be decoded
    Deserialize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedBaudRate(baud) => write!(f, "unsupported baud rate {baud}"),
            Self::ZeroByteDelay => write!(f, "byte delay must be non-zero"),
            Self::Serialize => write!(f, "serialize failed"),
            Self::Deserialize => write!(f, "deserialize failed"),
        }
    }
}

/// Driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriverConfig {
    /// Serial line settings applied by `init`
    pub uart: UartConfig,
    /// Pause after each received byte (ms)
    pub byte_delay_ms: u32,
    /// Default window for instruction replies (ms)
    pub reply_timeout_ms: u64,
    /// Window the touch poll waits for data (ms)
    pub poll_timeout_ms: u64,
    /// How decoders bound their total wait
    pub deadline: DeadlineMode,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            uart: UartConfig::default(),
            byte_delay_ms: DEFAULT_BYTE_DELAY_MS,
            reply_timeout_ms: DEFAULT_REPLY_TIMEOUT_MS,
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            deadline: DeadlineMode::Overall,
        }
    }
}

impl DriverConfig {
    /// Set the baud rate
    pub fn with_baudrate(mut self, baudrate: u32) -> Self {
        self.uart.baudrate = baudrate;
        self
    }

    /// Set the deadline mode
    pub fn with_deadline(mut self, deadline: DeadlineMode) -> Self {
        self.deadline = deadline;
        self
    }

    /// Check values against what the display and driver accept
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_BAUD_RATES.contains(&self.uart.baudrate) {
            return Err(ConfigError::UnsupportedBaudRate(self.uart.baudrate));
        }
        if self.byte_delay_ms == 0 {
            return Err(ConfigError::ZeroByteDelay);
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl DriverConfig {
    /// Encode with postcard into `buf`, returning the used prefix
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Decode a postcard-encoded config and validate it
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        config.validate()?;
        Ok(config)
    }
}
