//! Simulated serial port for host tests
//!
//! Time only moves when the driver delays, so tests run instantly and
//! timeouts are exact.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use nextion_hal::{Clock, ConfigurableUart, DelayNs, ErrorType, UartConfig, UartRx, UartTx};
use nextion_protocol::TERMINATOR;

/// Nanoseconds since test start, shared by port and delay
pub type SimTime = Rc<Cell<u64>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Read attempted with nothing in the receive buffer
    Empty,
    /// Injected fault
    Broken,
}

pub struct MockPort {
    time: SimTime,
    incoming: VecDeque<(u64, u8)>,
    replies: VecDeque<Vec<u8>>,
    pub written: Vec<u8>,
    pub applied: Option<UartConfig>,
    pub broken: bool,
}

pub struct MockDelay {
    time: SimTime,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.time.set(self.time.get() + ns as u64);
    }
}

impl MockPort {
    pub fn now(&self) -> u64 {
        self.time.get() / 1_000_000
    }

    /// Bytes that are already waiting
    pub fn push(&mut self, bytes: &[u8]) {
        let now = self.now();
        self.push_at(now, bytes);
    }

    /// Bytes that arrive once the clock reaches `at_ms`
    pub fn push_at(&mut self, at_ms: u64, bytes: &[u8]) {
        self.incoming.extend(bytes.iter().map(|&b| (at_ms, b)));
    }

    /// Reply the display sends after the next complete instruction
    pub fn reply_next(&mut self, bytes: &[u8]) {
        self.replies.push_back(bytes.to_vec());
    }

    /// Complete instructions written so far, terminators stripped
    pub fn commands(&self) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        let mut rest = self.written.as_slice();
        while let Some(pos) = rest.windows(3).position(|w| w == TERMINATOR) {
            out.push(rest[..pos].to_vec());
            rest = &rest[pos + 3..];
        }
        out
    }
}

pub fn pair() -> (MockPort, MockDelay) {
    let time = SimTime::default();
    let port = MockPort {
        time: time.clone(),
        incoming: VecDeque::new(),
        replies: VecDeque::new(),
        written: Vec::new(),
        applied: None,
        broken: false,
    };
    (port, MockDelay { time })
}

impl ErrorType for MockPort {
    type Error = MockError;
}

impl UartRx for MockPort {
    fn available(&mut self) -> usize {
        let now = self.now();
        self.incoming.iter().take_while(|(at, _)| *at <= now).count()
    }

    fn read_byte(&mut self) -> Result<u8, MockError> {
        if self.broken {
            return Err(MockError::Broken);
        }
        let now = self.now();
        match self.incoming.front() {
            Some(&(at, byte)) if at <= now => {
                self.incoming.pop_front();
                Ok(byte)
            }
            _ => Err(MockError::Empty),
        }
    }
}

impl UartTx for MockPort {
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), MockError> {
        if self.broken {
            return Err(MockError::Broken);
        }
        self.written.extend_from_slice(data);
        if data == TERMINATOR {
            if let Some(reply) = self.replies.pop_front() {
                self.push(&reply);
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MockError> {
        Ok(())
    }
}

impl ConfigurableUart for MockPort {
    fn apply_config(&mut self, config: &UartConfig) -> Result<(), MockError> {
        self.applied = Some(*config);
        Ok(())
    }
}

impl Clock for MockPort {
    fn now_ms(&self) -> u64 {
        self.now()
    }
}
