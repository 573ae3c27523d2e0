//! Reply decoders

use nextion_hal::{DelayNs, Transport};
use nextion_protocol::messages::{get_command, HEAD_STRING};
use nextion_protocol::{
    Reply, TerminatorTracker, COMMAND_FINISHED_FRAME_LEN, NUMBER_FRAME_LEN, TERMINATOR_BYTE,
};

use super::Nextion;
use crate::config::DeadlineMode;
use crate::error::Error;

impl<T, D> Nextion<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Read one raw frame into `buf`
    ///
    /// See [`FrameReceiver::receive`](crate::FrameReceiver::receive).
    pub fn receive(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<usize, Error<T::Error>> {
        self.receiver.receive(&mut self.port, &mut self.delay, buf, timeout_ms)
    }

    /// Wait for a numeric reply
    ///
    /// Other frames are skipped. The value is the 32-bit little-endian
    /// payload of the first `0x71` frame.
    pub fn recv_number(&mut self, timeout_ms: u64) -> Result<u32, Error<T::Error>> {
        let mut buf = [0u8; NUMBER_FRAME_LEN];
        self.await_reply(&mut buf, timeout_ms, |reply| match reply {
            Reply::Number(value) => Some(value),
            _ => None,
        })
    }

    /// Wait for the "instruction finished" acknowledgment
    pub fn recv_command_finished(&mut self, timeout_ms: u64) -> Result<(), Error<T::Error>> {
        let mut buf = [0u8; COMMAND_FINISHED_FRAME_LEN];
        self.await_reply(&mut buf, timeout_ms, |reply| {
            matches!(reply, Reply::CommandFinished).then_some(())
        })
    }

    /// Wait for a string reply and copy its text into `buf`
    ///
    /// Bytes before the `0x70` header are ignored. Text beyond `buf.len()`
    /// is read and dropped. Returns the number of bytes copied, which is 0
    /// when `buf` is empty or no header arrived in time. If the terminator
    /// never arrives the text received so far is still returned.
    ///
    /// The whole call is bounded by `timeout_ms`.
    pub fn recv_string(
        &mut self,
        buf: &mut [u8],
        timeout_ms: u64,
    ) -> Result<usize, Error<T::Error>> {
        if buf.is_empty() {
            return Ok(0);
        }

        let pause = self.config.byte_delay_ms;
        let start = self.port.now_ms();
        let mut started = false;
        let mut complete = false;
        let mut tracker = TerminatorTracker::new();
        let mut copied = 0;
        let mut total = 0;

        while !complete && self.port.elapsed_ms(start) <= timeout_ms {
            if self.port.available() == 0 {
                self.delay.delay_ms(pause);
                continue;
            }

            while self.port.available() > 0 {
                let byte = self.port.read_byte().map_err(Error::Transport)?;
                if !started {
                    started = byte == HEAD_STRING;
                    continue;
                }
                if tracker.feed(byte) {
                    complete = true;
                    break;
                }
                if byte != TERMINATOR_BYTE {
                    total += 1;
                    if copied < buf.len() {
                        buf[copied] = byte;
                        copied += 1;
                    }
                }
            }
        }

        if !started {
            debug!("No string reply within {} ms", timeout_ms);
        } else {
            debug!(
                "String reply: {} bytes, kept {}: {:?}",
                total,
                copied,
                &buf[..copied]
            );
        }

        Ok(copied)
    }

    /// Query `attribute` with a `get` instruction and decode the number
    pub fn get_number(&mut self, attribute: &str) -> Result<u32, Error<T::Error>> {
        let cmd = get_command(attribute).ok_or(Error::CommandTooLong)?;
        self.send_command(&cmd)?;
        self.recv_number(self.config.reply_timeout_ms)
    }

    /// Query `attribute` with a `get` instruction and decode the text
    pub fn get_text(&mut self, attribute: &str, buf: &mut [u8]) -> Result<usize, Error<T::Error>> {
        let cmd = get_command(attribute).ok_or(Error::CommandTooLong)?;
        self.send_command(&cmd)?;
        self.recv_string(buf, self.config.reply_timeout_ms)
    }

    /// Read frames until `accept` picks one or time runs out
    ///
    /// With [`DeadlineMode::Overall`] each retry only gets what is left of
    /// `timeout_ms`. With [`DeadlineMode::PerAttempt`] every retry waits the
    /// full window again, so a steady stream of unrelated frames can hold
    /// the caller indefinitely.
    fn await_reply<R>(
        &mut self,
        buf: &mut [u8],
        timeout_ms: u64,
        mut accept: impl FnMut(Reply) -> Option<R>,
    ) -> Result<R, Error<T::Error>> {
        let start = self.port.now_ms();
        let mut window = timeout_ms;

        loop {
            let len = self.receive(buf, window)?;
            if len == 0 {
                return Err(Error::Timeout);
            }

            match Reply::from_frame(&buf[..len]) {
                Ok(reply) => {
                    if let Some(value) = accept(reply) {
                        return Ok(value);
                    }
                    match reply {
                        Reply::Status(code) if code.is_error() => {
                            warn!("Display reported {:?}", code)
                        }
                        _ => debug!("Skipping {:?}", reply),
                    }
                }
                Err(e) => debug!("Skipping frame: {:?}", e),
            }

            if self.config.deadline == DeadlineMode::Overall {
                let elapsed = self.port.elapsed_ms(start);
                if elapsed >= timeout_ms {
                    return Err(Error::Timeout);
                }
                window = timeout_ms - elapsed;
            }
        }
    }
}
