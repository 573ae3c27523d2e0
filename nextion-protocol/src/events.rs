//! Touch events reported by the display

use crate::frame::{ends_with_terminator, FrameError, TERMINATOR, TOUCH_FRAME_LEN};
use crate::messages::HEAD_TOUCH_EVENT;

/// Press/release state carried by a touch event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchKind {
    /// Finger lifted from the component
    Release,
    /// Finger pressed on the component
    Press,
}

// Wire format values
const EVENT_RELEASE: u8 = 0x00;
const EVENT_PRESS: u8 = 0x01;

impl TouchKind {
    /// Parse a touch kind from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            EVENT_RELEASE => Some(TouchKind::Release),
            EVENT_PRESS => Some(TouchKind::Press),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            TouchKind::Release => EVENT_RELEASE,
            TouchKind::Press => EVENT_PRESS,
        }
    }
}

/// A touch on a component, as sent by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchEvent {
    /// Page the component lives on
    pub page_id: u8,
    /// Component id within the page
    pub component_id: u8,
    /// Press or release
    pub kind: TouchKind,
}

impl TouchEvent {
    /// Create a new touch event
    pub const fn new(page_id: u8, component_id: u8, kind: TouchKind) -> Self {
        Self {
            page_id,
            component_id,
            kind,
        }
    }

    /// Parse a touch event from a complete 7-byte frame
    pub fn from_frame(frame: &[u8]) -> Result<Self, FrameError> {
        if frame.len() < TOUCH_FRAME_LEN {
            return Err(FrameError::TooShort);
        }
        if frame[0] != HEAD_TOUCH_EVENT {
            return Err(FrameError::UnknownHeader(frame[0]));
        }
        if !ends_with_terminator(frame, TOUCH_FRAME_LEN) {
            return Err(FrameError::BadTerminator);
        }

        let kind = TouchKind::from_byte(frame[3]).ok_or(FrameError::UnknownEvent(frame[3]))?;
        Ok(Self::new(frame[1], frame[2], kind))
    }

    /// Encode this event into its wire frame (for testing or simulation)
    pub fn to_frame(&self) -> [u8; TOUCH_FRAME_LEN] {
        [
            HEAD_TOUCH_EVENT,
            self.page_id,
            self.component_id,
            self.kind.to_byte(),
            TERMINATOR[0],
            TERMINATOR[1],
            TERMINATOR[2],
        ]
    }

    /// Returns true if this event targets the given component
    pub fn targets(&self, page_id: u8, component_id: u8) -> bool {
        self.page_id == page_id && self.component_id == component_id
    }
}
