//! Frame receiver
//!
//! Pulls bytes from the port one at a time until a terminator completes or
//! the destination buffer is full. The terminator run is kept between
//! calls, so a terminator split across two reads still closes its frame.

use nextion_hal::{Clock, DelayNs, UartRx};
use nextion_protocol::TerminatorTracker;

use crate::error::Error;

/// Receives terminator-delimited frames from a serial port
#[derive(Debug, Clone)]
pub struct FrameReceiver {
    tracker: TerminatorTracker,
    byte_delay_ms: u32,
}

impl FrameReceiver {
    /// Create a receiver that pauses `byte_delay_ms` after each byte
    pub const fn new(byte_delay_ms: u32) -> Self {
        Self {
            tracker: TerminatorTracker::new(),
            byte_delay_ms,
        }
    }

    /// Terminator bytes seen so far that have not yet closed a frame
    pub fn pending_terminator(&self) -> u8 {
        self.tracker.pending()
    }

    /// Read one frame into `buf`
    ///
    /// Waits up to `timeout_ms` for the first byte, then reads while bytes
    /// keep arriving. Returns the frame length including the terminator, or
    /// 0 if nothing arrived, the buffer filled up, or the link went quiet
    /// before the terminator completed. `buf` is zeroed before filling.
    pub fn receive<P, D>(
        &mut self,
        port: &mut P,
        delay: &mut D,
        buf: &mut [u8],
        timeout_ms: u64,
    ) -> Result<usize, Error<P::Error>>
    where
        P: UartRx + Clock,
        D: DelayNs,
    {
        let start = port.now_ms();
        while port.available() == 0 && port.elapsed_ms(start) < timeout_ms {
            delay.delay_ms(self.byte_delay_ms);
        }

        if port.available() == 0 {
            return Ok(0);
        }

        buf.fill(0);

        let mut received = 0;
        let mut frame_len = 0;
        while frame_len == 0 && received < buf.len() && port.available() > 0 {
            let byte = port.read_byte().map_err(Error::Transport)?;
            buf[received] = byte;
            received += 1;

            if self.tracker.feed(byte) {
                frame_len = received;
            } else {
                delay.delay_ms(self.byte_delay_ms);
            }
        }

        trace!("[NEX] Rx: {:?}", &buf[..received]);
        if frame_len == 0 {
            debug!(
                "Incomplete frame: {} bytes, {} terminator bytes pending",
                received,
                self.tracker.pending()
            );
        }

        Ok(frame_len)
    }
}
