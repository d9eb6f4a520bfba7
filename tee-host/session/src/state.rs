// Licensed under the Apache-2.0 license

use std::fmt;

/// Lifecycle state of a [`Session`](crate::Session).
///
/// `Closed` is terminal; a closed session cannot be reopened.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Uninitialized = 0,
    Initialized = 1,
    Connected = 2,
    Closed = 3,
}

impl ConnectionState {
    /// A native handle exists and has been initialized.
    pub fn is_active(self) -> bool {
        matches!(self, ConnectionState::Initialized | ConnectionState::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Uninitialized => "uninitialized",
            ConnectionState::Initialized => "initialized",
            ConnectionState::Connected => "connected",
            ConnectionState::Closed => "closed",
        };
        f.write_str(name)
    }
}
