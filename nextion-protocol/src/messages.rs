//! Reply headers and instruction helpers for the Nextion protocol
//!
//! Message categories:
//! - Display → Host: replies to instructions, touch events, status codes
//! - Host → Display: text instructions (see [`page_command`], [`get_command`])

use core::fmt::Write;

use heapless::String;

use crate::events::TouchEvent;
use crate::frame::{
    ends_with_terminator, FrameError, COMMAND_FINISHED_FRAME_LEN, NUMBER_FRAME_LEN,
    TERMINATOR, TERMINATOR_LEN, TOUCH_FRAME_LEN,
};

// Reply headers: Display → Host
pub const HEAD_COMMAND_FINISHED: u8 = 0x01;
pub const HEAD_TOUCH_EVENT: u8 = 0x65;
pub const HEAD_STRING: u8 = 0x70;
pub const HEAD_NUMBER: u8 = 0x71;

// Instructions sent during start-up: Host → Display
/// Empty instruction, flushes the display's parser
pub const CMD_RESYNC: &str = "";
/// Ask the display to acknowledge every instruction
pub const CMD_ACK_ON: &str = "bkcmd=1";
/// Show the first page
pub const CMD_DEFAULT_PAGE: &str = "page 0";

/// Longest instruction built by the helpers in this module
pub const MAX_COMMAND_LEN: usize = 64;

/// Status and event codes the display may send on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReturnCode {
    InvalidInstruction,
    CommandFinished,
    InvalidComponentId,
    InvalidPageId,
    InvalidPictureId,
    InvalidFontId,
    InvalidBaudRate,
    InvalidVariable,
    InvalidOperation,
    TouchEvent,
    CurrentPageId,
    TouchCoordinate,
    SleepTouchCoordinate,
    StringData,
    NumericData,
    Launched,
    Upgraded,
}

impl ReturnCode {
    /// Parse a return code from a frame header byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        let code = match byte {
            0x00 => ReturnCode::InvalidInstruction,
            HEAD_COMMAND_FINISHED => ReturnCode::CommandFinished,
            0x02 => ReturnCode::InvalidComponentId,
            0x03 => ReturnCode::InvalidPageId,
            0x04 => ReturnCode::InvalidPictureId,
            0x05 => ReturnCode::InvalidFontId,
            0x11 => ReturnCode::InvalidBaudRate,
            0x1A => ReturnCode::InvalidVariable,
            0x1B => ReturnCode::InvalidOperation,
            HEAD_TOUCH_EVENT => ReturnCode::TouchEvent,
            0x66 => ReturnCode::CurrentPageId,
            0x67 => ReturnCode::TouchCoordinate,
            0x68 => ReturnCode::SleepTouchCoordinate,
            HEAD_STRING => ReturnCode::StringData,
            HEAD_NUMBER => ReturnCode::NumericData,
            0x88 => ReturnCode::Launched,
            0x89 => ReturnCode::Upgraded,
            _ => return None,
        };
        Some(code)
    }

    /// Returns true if the display rejected the preceding instruction
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ReturnCode::InvalidInstruction
                | ReturnCode::InvalidComponentId
                | ReturnCode::InvalidPageId
                | ReturnCode::InvalidPictureId
                | ReturnCode::InvalidFontId
                | ReturnCode::InvalidBaudRate
                | ReturnCode::InvalidVariable
                | ReturnCode::InvalidOperation
        )
    }
}

/// A fixed-layout reply frame
///
/// String replies have no fixed layout and are decoded straight from the
/// byte stream by the driver, so they are not represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Instruction executed
    CommandFinished,
    /// Numeric value from a `get` instruction
    Number(u32),
    /// Component touched
    Touch(TouchEvent),
    /// Any other recognised status frame
    Status(ReturnCode),
}

impl Reply {
    /// Classify a complete frame by its header and layout
    pub fn from_frame(frame: &[u8]) -> Result<Self, FrameError> {
        let head = *frame.first().ok_or(FrameError::TooShort)?;
        match head {
            HEAD_NUMBER => {
                if frame.len() < NUMBER_FRAME_LEN {
                    return Err(FrameError::TooShort);
                }
                if !ends_with_terminator(frame, NUMBER_FRAME_LEN) {
                    return Err(FrameError::BadTerminator);
                }
                let value = u32::from_le_bytes([frame[1], frame[2], frame[3], frame[4]]);
                Ok(Reply::Number(value))
            }
            HEAD_COMMAND_FINISHED => {
                if !ends_with_terminator(frame, COMMAND_FINISHED_FRAME_LEN) {
                    return Err(FrameError::BadTerminator);
                }
                Ok(Reply::CommandFinished)
            }
            HEAD_TOUCH_EVENT => {
                if frame.len() < TOUCH_FRAME_LEN {
                    return Err(FrameError::TooShort);
                }
                TouchEvent::from_frame(frame).map(Reply::Touch)
            }
            other => {
                let code = ReturnCode::from_byte(other).ok_or(FrameError::UnknownHeader(other))?;
                if frame.len() < 1 + TERMINATOR_LEN {
                    return Err(FrameError::TooShort);
                }
                if frame[frame.len() - TERMINATOR_LEN..] != TERMINATOR {
                    return Err(FrameError::BadTerminator);
                }
                Ok(Reply::Status(code))
            }
        }
    }
}

/// Build the instruction that switches to page `page_id`
pub fn page_command(page_id: u8) -> String<MAX_COMMAND_LEN> {
    let mut cmd = String::new();
    // "page 255" always fits
    let _ = write!(cmd, "page {}", page_id);
    cmd
}

/// Build a `get <attribute>` query
///
/// Returns `None` if the instruction would not fit in [`MAX_COMMAND_LEN`].
pub fn get_command(attribute: &str) -> Option<String<MAX_COMMAND_LEN>> {
    let mut cmd = String::new();
    cmd.push_str("get ").ok()?;
    cmd.push_str(attribute).ok()?;
    Some(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TouchKind;
    use proptest::prelude::*;

    #[test]
    fn test_reply_number() {
        let frame = [0x71, 0x39, 0x30, 0x00, 0x00, 0xFF, 0xFF, 0xFF];
        assert_eq!(Reply::from_frame(&frame), Ok(Reply::Number(12345)));
    }

    #[test]
    fn test_reply_number_bad_terminator() {
        let frame = [0x71, 0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0x00];
        assert_eq!(Reply::from_frame(&frame), Err(FrameError::BadTerminator));
    }

    #[test]
    fn test_reply_number_truncated() {
        let frame = [0x71, 0x01, 0xFF, 0xFF, 0xFF];
        assert_eq!(Reply::from_frame(&frame), Err(FrameError::TooShort));
    }

    #[test]
    fn test_reply_command_finished() {
        assert_eq!(
            Reply::from_frame(&[0x01, 0xFF, 0xFF, 0xFF]),
            Ok(Reply::CommandFinished)
        );
        assert_eq!(
            Reply::from_frame(&[0x01, 0x00, 0xFF, 0xFF]),
            Err(FrameError::BadTerminator)
        );
    }

    #[test]
    fn test_reply_touch() {
        let frame = [0x65, 0x01, 0x04, 0x00, 0xFF, 0xFF, 0xFF];
        assert_eq!(
            Reply::from_frame(&frame),
            Ok(Reply::Touch(TouchEvent::new(1, 4, TouchKind::Release)))
        );
    }

    #[test]
    fn test_reply_status_codes() {
        assert_eq!(
            Reply::from_frame(&[0x1A, 0xFF, 0xFF, 0xFF]),
            Ok(Reply::Status(ReturnCode::InvalidVariable))
        );
        assert_eq!(
            Reply::from_frame(&[0x88, 0xFF, 0xFF, 0xFF]),
            Ok(Reply::Status(ReturnCode::Launched))
        );
        assert_eq!(
            Reply::from_frame(&[0x42, 0xFF, 0xFF, 0xFF]),
            Err(FrameError::UnknownHeader(0x42))
        );
        assert_eq!(Reply::from_frame(&[]), Err(FrameError::TooShort));
    }

    #[test]
    fn test_reply_status_with_payload() {
        // Current page id reply carries the page number
        assert_eq!(
            Reply::from_frame(&[0x66, 0x02, 0xFF, 0xFF, 0xFF]),
            Ok(Reply::Status(ReturnCode::CurrentPageId))
        );
        assert_eq!(
            Reply::from_frame(&[0x66, 0x02, 0xFF, 0xFF]),
            Err(FrameError::BadTerminator)
        );
    }

    #[test]
    fn test_return_code_errors() {
        assert!(ReturnCode::InvalidPageId.is_error());
        assert!(ReturnCode::InvalidInstruction.is_error());
        assert!(!ReturnCode::CommandFinished.is_error());
        assert!(!ReturnCode::Launched.is_error());
    }

    #[test]
    fn test_page_command() {
        assert_eq!(page_command(0).as_str(), "page 0");
        assert_eq!(page_command(255).as_str(), "page 255");
    }

    #[test]
    fn test_get_command() {
        assert_eq!(get_command("n0.val").unwrap().as_str(), "get n0.val");
        let long = [b'x'; MAX_COMMAND_LEN];
        let long = core::str::from_utf8(&long).unwrap();
        assert!(get_command(long).is_none());
    }

    proptest! {
        #[test]
        fn prop_number_is_little_endian(value in any::<u32>()) {
            let b = value.to_le_bytes();
            let frame = [0x71, b[0], b[1], b[2], b[3], 0xFF, 0xFF, 0xFF];
            prop_assert_eq!(Reply::from_frame(&frame), Ok(Reply::Number(value)));
        }
    }
}
