// Licensed under the Apache-2.0 license

use std::fmt;

use tee_host_types::{ErrorKind, TeeError};

use crate::ConnectionState;

/// Session error enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The driver reported a failure
    Tee(TeeError),

    /// Operation not allowed in the current state; no native call was made
    InvalidState {
        current: ConnectionState,
        expected: ConnectionState,
    },

    /// Connect requested on a capability-only session
    MissingClientIdentity,

    /// Payload exceeds the negotiated maximum message length
    MessageTooLarge { len: usize, max: u32 },
}

/// Session result type
pub type SessionResult<T> = Result<T, SessionError>;

impl SessionError {
    /// Driver outcome, if the error came from the driver.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            SessionError::Tee(err) => Some(err.kind),
            _ => None,
        }
    }

    pub(crate) fn tee(operation: &'static str, status: u16) -> Self {
        SessionError::Tee(TeeError::from_status(operation, status))
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Tee(err) => write!(f, "{}", err),
            SessionError::InvalidState { current, expected } => {
                write!(f, "Invalid session state: {} (expected {})", current, expected)
            }
            SessionError::MissingClientIdentity => {
                write!(f, "Session has no firmware client to connect to")
            }
            SessionError::MessageTooLarge { len, max } => {
                write!(f, "Message of {} bytes exceeds maximum of {}", len, max)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Tee(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TeeError> for SessionError {
    fn from(err: TeeError) -> Self {
        SessionError::Tee(err)
    }
}
