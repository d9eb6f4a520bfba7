// Licensed under the Apache-2.0 license

//! Status and capability queries.

use tee_host_driver::{RawDeviceHandle, TeeDriver};
use tee_host_types::{DriverVersion, ErrorKind, FwStatusRegisterIndex, LogLevel, TeeError};

use crate::{Session, SessionError, SessionResult};

/// Capacity of the buffer the device kind is read into.
pub const KIND_BUFFER_LEN: usize = 32;

impl<D: TeeDriver> Session<'_, D> {
    pub fn fw_status(&self, index: FwStatusRegisterIndex) -> SessionResult<u32> {
        let (driver, handle) = self.active()?;
        driver
            .fw_status(handle, index)
            .map_err(|status| SessionError::tee("FwStatus", status))
    }

    /// Trace register
    pub fn trc(&self) -> SessionResult<u32> {
        let (driver, handle) = self.active()?;
        driver
            .trc(handle)
            .map_err(|status| SessionError::tee("GetTrc", status))
    }

    /// Device kind, e.g. `mei`, `itouch` or `gsc`.
    ///
    /// Fails with [`ErrorKind::InsufficientBuffer`] when the driver reports a
    /// kind longer than [`KIND_BUFFER_LEN`].
    pub fn kind(&self) -> SessionResult<String> {
        let (driver, handle) = self.active()?;
        let mut buffer = [0u8; KIND_BUFFER_LEN];
        let len = driver
            .kind(handle, &mut buffer)
            .map_err(|status| SessionError::tee("GetKind", status))?;
        if len > buffer.len() {
            return Err(TeeError::new("GetKind", ErrorKind::InsufficientBuffer).into());
        }

        let kind = String::from_utf8_lossy(&buffer[..len]);
        Ok(kind.trim_end_matches('\0').to_string())
    }

    /// Protocol version of the connected firmware client.
    pub fn protocol_version(&self) -> SessionResult<u8> {
        let (driver, handle) = self.active()?;
        Ok(driver.protocol_version(handle))
    }

    /// Negotiated maximum message length. Cached by [`Session::connect`].
    pub fn max_message_length(&self) -> SessionResult<u32> {
        if let Some(max_msg_len) = self.max_msg_len {
            return Ok(max_msg_len);
        }
        let (driver, handle) = self.active()?;
        Ok(driver.max_msg_len(handle))
    }

    /// Descriptor of the open device, for use in the caller's own poll loop.
    pub fn device_handle(&self) -> SessionResult<Option<RawDeviceHandle>> {
        let (driver, handle) = self.active()?;
        Ok(driver.device_handle(handle))
    }

    /// Level of the handle's diagnostics, or the configured level before init.
    pub fn log_level(&self) -> LogLevel {
        match self.active() {
            Ok((driver, handle)) => driver.log_level(handle),
            Err(_) => self.config.log_level,
        }
    }

    /// Returns the previous level.
    pub fn set_log_level(&mut self, level: LogLevel) -> LogLevel {
        if let Ok((driver, handle)) = self.active_mut() {
            let previous = driver.set_log_level(handle, level);
            let current = driver.log_level(handle);
            self.config.log_level = current;
            return previous;
        }
        let previous = self.config.log_level;
        self.config.log_level = level;
        previous
    }

    /// Version of the installed native driver. Needs no firmware client.
    pub fn driver_version(&self) -> SessionResult<DriverVersion> {
        let (driver, handle) = self.active()?;
        driver
            .driver_version(handle)
            .map_err(|status| SessionError::tee("GetDriverVersion", status))
    }

    /// True once the session can serve status queries.
    pub fn is_initialized(&self) -> bool {
        self.state().is_active()
    }
}
