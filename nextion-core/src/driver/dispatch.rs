//! Touch event polling

use nextion_hal::{DelayNs, Transport};
use nextion_protocol::{TouchEvent, TOUCH_FRAME_LEN};

use super::Nextion;
use crate::error::Error;
use crate::listener::{dispatch_touch, TouchListener};

impl<T, D> Nextion<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Drain pending touch events and run the matching callbacks
    ///
    /// Reads 7-byte frames until the port stays quiet for the configured
    /// poll window. Each touch event goes to the first listener with the
    /// same page and component id. Frames that are not touch events, and
    /// events nobody listens for, are dropped. Returns how many events
    /// reached a listener.
    ///
    /// Meant to be called from the application's main loop.
    pub fn poll_touch(
        &mut self,
        listeners: &mut [&mut dyn TouchListener],
    ) -> Result<usize, Error<T::Error>> {
        let mut buf = [0u8; TOUCH_FRAME_LEN];
        let mut delivered = 0;
        let timeout = self.config.poll_timeout_ms;

        loop {
            let len = self.receive(&mut buf, timeout)?;
            if len == 0 {
                break;
            }

            match TouchEvent::from_frame(&buf[..len]) {
                Ok(event) => {
                    if dispatch_touch(&event, listeners) {
                        debug!("Touch {:?}", event);
                        delivered += 1;
                    } else {
                        trace!("No listener for {:?}", event);
                    }
                }
                Err(e) => trace!("Not a touch event: {:?}", e),
            }
        }

        Ok(delivered)
    }
}
