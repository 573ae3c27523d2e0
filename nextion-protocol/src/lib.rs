//! Nextion HMI serial protocol
//!
//! This crate defines the byte-level protocol spoken between a host
//! microcontroller and a Nextion touch display. The host sends plain text
//! instructions; the display answers with short binary frames. Both
//! directions end every message with the same three-byte terminator.
//!
//! # Frame Overview
//!
//! ```text
//! Host → Display:  <instruction text>          FF FF FF
//! Display → Host:  <header> <payload 0..n B>    FF FF FF
//! ```
//!
//! Replies handled by the driver:
//!
//! ```text
//! ┌──────────────────┬──────┬──────────────────────────┬──────────┐
//! │ Reply            │ HEAD │ PAYLOAD                  │ TOTAL    │
//! ├──────────────────┼──────┼──────────────────────────┼──────────┤
//! │ Command finished │ 0x01 │ -                        │ 4 B      │
//! │ Touch event      │ 0x65 │ page, component, event   │ 7 B      │
//! │ String           │ 0x70 │ ASCII text, no 0xFF      │ variable │
//! │ Number           │ 0x71 │ u32 little-endian        │ 8 B      │
//! └──────────────────┴──────┴──────────────────────────┴──────────┘
//! ```
//!
//! There is no length field and no checksum. A receiver finds frame
//! boundaries only by counting consecutive 0xFF bytes.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod events;
pub mod frame;
pub mod messages;

pub use events::{TouchEvent, TouchKind};
pub use frame::{
    ends_with_terminator, FrameError, TerminatorTracker, COMMAND_FINISHED_FRAME_LEN,
    NUMBER_FRAME_LEN, TERMINATOR, TERMINATOR_BYTE, TERMINATOR_LEN, TOUCH_FRAME_LEN,
};
pub use messages::{Reply, ReturnCode};
