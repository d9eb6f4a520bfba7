// Licensed under the Apache-2.0 license

use tee_host_types::{DeviceAddress, LogLevel};

/// Session configuration
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Device instance to open; `None` lets the driver pick its default.
    pub device: DeviceAddress,
    pub log_level: LogLevel,
    /// Minimal firmware client protocol version accepted by connect, 0 for any.
    pub required_protocol_version: u8,
    /// Virtual tag of the connection, 0 for none.
    pub vtag: u8,
}

impl SessionConfig {
    pub fn with_device(mut self, device: impl Into<DeviceAddress>) -> Self {
        self.device = device.into();
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_required_protocol_version(mut self, version: u8) -> Self {
        self.required_protocol_version = version;
        self
    }

    pub fn with_vtag(mut self, vtag: u8) -> Self {
        self.vtag = vtag;
        self
    }
}
