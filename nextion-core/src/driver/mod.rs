//! Nextion display driver
//!
//! Owns the serial port and the frame receiver. Instructions go out with
//! [`Nextion::send_command`]; replies are awaited with the `recv_*`
//! decoders; touch events are drained with [`Nextion::poll_touch`].
//!
//! The driver is single-owner and blocking. Every call returns once its
//! reply arrives or its timeout runs out.

mod decode;
mod dispatch;

use nextion_hal::{DelayNs, Transport};
use nextion_protocol::messages::{page_command, CMD_ACK_ON, CMD_DEFAULT_PAGE, CMD_RESYNC};
use nextion_protocol::TERMINATOR;

use crate::config::{ConfigError, DriverConfig};
use crate::error::Error;
use crate::receiver::FrameReceiver;

/// Driver for one Nextion display on one serial port
pub struct Nextion<T, D> {
    port: T,
    delay: D,
    receiver: FrameReceiver,
    config: DriverConfig,
}

impl<T, D> Nextion<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Create a driver over an open port
    ///
    /// Nothing is sent until [`init`](Self::init) or another command.
    /// Fails if `config` does not pass [`DriverConfig::validate`].
    pub fn new(port: T, delay: D, config: DriverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            port,
            delay,
            receiver: FrameReceiver::new(config.byte_delay_ms),
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Direct access to the port
    pub fn port_mut(&mut self) -> &mut T {
        &mut self.port
    }

    /// Tear down the driver and hand back the port and delay
    pub fn release(self) -> (T, D) {
        (self.port, self.delay)
    }

    /// Bring up the link and put the display in a known state
    ///
    /// Applies the UART settings, flushes the display's instruction parser,
    /// turns on instruction acknowledgments and shows page 0. Both the
    /// `bkcmd=1` and `page 0` steps run even if the first one is not
    /// acknowledged; the call succeeds only if both were.
    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        let uart = self.config.uart;
        self.port.apply_config(&uart).map_err(Error::Transport)?;
        info!("Nextion link at {} baud", uart.baudrate);

        let timeout = self.config.reply_timeout_ms;
        self.send_command(CMD_RESYNC)?;

        self.send_command(CMD_ACK_ON)?;
        let ack_on = self.recv_command_finished(timeout);

        self.send_command(CMD_DEFAULT_PAGE)?;
        let default_page = self.recv_command_finished(timeout);

        match (&ack_on, &default_page) {
            (Ok(()), Ok(())) => info!("Nextion ready"),
            _ => warn!(
                "Nextion init incomplete (bkcmd ack: {}, page ack: {})",
                ack_on.is_ok(),
                default_page.is_ok()
            ),
        }

        ack_on.and(default_page)
    }

    /// Send one instruction
    ///
    /// Unread input is thrown away first so a later decoder only sees
    /// replies to this instruction. The text goes out verbatim followed by
    /// the terminator. Does not wait for a reply.
    pub fn send_command(&mut self, cmd: &str) -> Result<(), Error<T::Error>> {
        let stale = self.port.discard_input().map_err(Error::Transport)?;
        if stale > 0 {
            trace!("Dropped {} stale bytes", stale);
        }

        trace!("[NEX] Tx: {}", cmd);
        self.port
            .write_blocking(cmd.as_bytes())
            .map_err(Error::Transport)?;
        self.port
            .write_blocking(&TERMINATOR)
            .map_err(Error::Transport)?;
        Ok(())
    }

    /// Show page `page_id` and wait for the acknowledgment
    pub fn set_page(&mut self, page_id: u8) -> Result<(), Error<T::Error>> {
        let cmd = page_command(page_id);
        self.send_command(&cmd)?;
        self.recv_command_finished(self.config.reply_timeout_ms)
    }
}
