// Licensed under the Apache-2.0 license

//! Message exchange on a connected session.

use tee_host_driver::TeeDriver;
use tee_host_types::Timeout;

use crate::{ConnectionState, Session, SessionError, SessionResult};

impl<D: TeeDriver> Session<'_, D> {
    /// Receive one message.
    ///
    /// The receive buffer is sized to the negotiated maximum message length
    /// and cut down to the bytes the driver actually read. Timeout expiry
    /// surfaces as [`ErrorKind::Timeout`](tee_host_types::ErrorKind::Timeout).
    pub fn read(&mut self, timeout: Timeout) -> SessionResult<Vec<u8>> {
        self.expect_state(ConnectionState::Connected)?;
        let max_msg_len = self.max_message_length()?;
        let (driver, handle) = self.active_mut()?;

        let mut buffer = vec![0u8; max_msg_len as usize];
        let read = driver
            .read(handle, &mut buffer, timeout)
            .map_err(|status| SessionError::tee("Read", status))?;
        buffer.truncate(read);
        Ok(buffer)
    }

    /// Send one message and return how many bytes the driver accepted.
    ///
    /// A short write is not an error; callers compare the result against
    /// `data.len()`. Messages longer than the negotiated maximum are refused
    /// before reaching the driver.
    pub fn write(&mut self, data: &[u8], timeout: Timeout) -> SessionResult<usize> {
        self.expect_state(ConnectionState::Connected)?;
        let max_msg_len = self.max_message_length()?;
        if data.len() > max_msg_len as usize {
            return Err(SessionError::MessageTooLarge {
                len: data.len(),
                max: max_msg_len,
            });
        }

        let (driver, handle) = self.active_mut()?;
        driver
            .write(handle, data, timeout)
            .map_err(|status| SessionError::tee("Write", status))
    }
}
