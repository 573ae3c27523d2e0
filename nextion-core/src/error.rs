//! Driver error type

use core::fmt;

/// Errors returned by driver operations
///
/// A malformed or unexpected frame is never an error; the driver skips it
/// and keeps reading. `E` is the transport's own error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// No matching reply before the timeout elapsed
    ///
    /// A missing display and a slow display look the same from here.
    Timeout,
    /// The serial port reported a fault
    Transport(E),
    /// Instruction does not fit the command buffer
    CommandTooLong,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timed out waiting for display reply"),
            Self::Transport(e) => write!(f, "transport: {e:?}"),
            Self::CommandTooLong => write!(f, "instruction too long"),
        }
    }
}
