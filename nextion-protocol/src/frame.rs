//! Frame boundaries for the Nextion protocol.
//!
//! Frame format (both directions):
//! - BODY (1+ bytes): header byte and payload, or instruction text
//! - TERMINATOR (3 bytes): 0xFF 0xFF 0xFF
//!
//! A 0xFF byte is never legal inside a body, so three of them in a row
//! always mark the end of a frame.

/// Terminator byte value
pub const TERMINATOR_BYTE: u8 = 0xFF;

/// Number of terminator bytes closing every frame
pub const TERMINATOR_LEN: usize = 3;

/// Terminator sequence appended to every instruction and reply
pub const TERMINATOR: [u8; TERMINATOR_LEN] = [TERMINATOR_BYTE; TERMINATOR_LEN];

/// Numeric reply: HEAD + u32 LE + terminator
pub const NUMBER_FRAME_LEN: usize = 1 + 4 + TERMINATOR_LEN;

/// Command finished reply: HEAD + terminator
pub const COMMAND_FINISHED_FRAME_LEN: usize = 1 + TERMINATOR_LEN;

/// Touch event: HEAD + page + component + event + terminator
pub const TOUCH_FRAME_LEN: usize = 1 + 3 + TERMINATOR_LEN;

/// Errors that can occur while classifying a received frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Frame is shorter than its header requires
    TooShort,
    /// Terminator missing where the frame layout expects it
    BadTerminator,
    /// Header byte is not a known reply type
    UnknownHeader(u8),
    /// Touch event byte is neither press nor release
    UnknownEvent(u8),
}

/// Returns true if `frame` is exactly `len` bytes long and ends with the terminator
pub fn ends_with_terminator(frame: &[u8], len: usize) -> bool {
    frame.len() == len && len >= TERMINATOR_LEN && frame[len - TERMINATOR_LEN..] == TERMINATOR
}

/// Counts consecutive terminator bytes across reads
///
/// The run survives between calls, so a terminator split over two reads
/// (for example when the destination buffer filled up after the second
/// 0xFF) is still recognised once the last byte arrives. The count drops
/// back to zero when a full terminator has been seen or when any other
/// byte interrupts the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TerminatorTracker {
    run: u8,
}

impl TerminatorTracker {
    /// Create a tracker with no partial terminator
    pub const fn new() -> Self {
        Self { run: 0 }
    }

    /// Feed one received byte
    ///
    /// Returns true when this byte completes a terminator.
    pub fn feed(&mut self, byte: u8) -> bool {
        if byte != TERMINATOR_BYTE {
            self.run = 0;
            return false;
        }

        self.run += 1;
        if self.run as usize >= TERMINATOR_LEN {
            self.run = 0;
            return true;
        }
        false
    }

    /// Number of terminator bytes seen since the last boundary
    pub fn pending(&self) -> u8 {
        self.run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_completes_on_third_ff() {
        let mut tracker = TerminatorTracker::new();
        assert!(!tracker.feed(0xFF));
        assert!(!tracker.feed(0xFF));
        assert!(tracker.feed(0xFF));
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    fn test_tracker_interrupted_run() {
        let mut tracker = TerminatorTracker::new();
        tracker.feed(0xFF);
        tracker.feed(0xFF);
        assert!(!tracker.feed(0x01));
        assert_eq!(tracker.pending(), 0);
        assert!(!tracker.feed(0xFF));
        assert_eq!(tracker.pending(), 1);
    }

    #[test]
    fn test_tracker_state_survives_between_reads() {
        let mut tracker = TerminatorTracker::new();
        // First read ends after two terminator bytes
        for &byte in &[0x01, 0xFF, 0xFF] {
            assert!(!tracker.feed(byte));
        }
        // Second read delivers the rest
        assert!(tracker.feed(0xFF));
    }

    #[test]
    fn test_ends_with_terminator() {
        assert!(ends_with_terminator(&[0x01, 0xFF, 0xFF, 0xFF], 4));
        assert!(!ends_with_terminator(&[0x01, 0xFF, 0xFF, 0x00], 4));
        assert!(!ends_with_terminator(&[0x01, 0xFF, 0xFF, 0xFF], 5));
        assert!(!ends_with_terminator(&[0xFF, 0xFF], 2));
    }

    #[test]
    fn test_frame_lengths() {
        assert_eq!(NUMBER_FRAME_LEN, 8);
        assert_eq!(COMMAND_FINISHED_FRAME_LEN, 4);
        assert_eq!(TOUCH_FRAME_LEN, 7);
    }
}
