// Licensed under the Apache-2.0 license

//! Status code taxonomy
//!
//! Every driver entry point that can fail reports a raw [`TeeStatus`]. The
//! mapping to [`ErrorKind`] is total: codes outside the documented range
//! collapse to [`ErrorKind::InternalError`].

use core::fmt;

use num_enum::{FromPrimitive, IntoPrimitive};

/// Raw status code as reported by the driver boundary.
pub type TeeStatus = u16;

/// Result type for operations that fail with a [`TeeError`].
pub type TeeResult<T> = Result<T, TeeError>;

/// Typed outcome of a native status code.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
pub enum ErrorKind {
    Success = 0,
    /// An internal error occurred in the library or driver
    #[num_enum(default)]
    InternalError = 1,
    /// The device is not in the system or is not working
    DeviceNotFound = 2,
    /// The device is not ready for the operation
    DeviceNotReady = 3,
    /// An invalid parameter was used in the call
    InvalidParameter = 4,
    UnableToCompleteOperation = 5,
    /// The operation deadline expired
    Timeout = 6,
    NotSupported = 7,
    /// The firmware client is not present in the firmware
    ClientNotFound = 8,
    Busy = 9,
    /// The firmware client is not connected
    Disconnected = 10,
    /// The buffer is too small for the result
    InsufficientBuffer = 11,
    PermissionDenied = 12,
}

impl ErrorKind {
    /// Map a raw status code. Never fails.
    pub fn from_status(status: TeeStatus) -> Self {
        ErrorKind::from(status)
    }

    pub fn status(self) -> TeeStatus {
        self.into()
    }

    pub fn is_success(self) -> bool {
        self == ErrorKind::Success
    }

    /// Transient kinds a caller may reasonably retry.
    pub fn is_transient(self) -> bool {
        matches!(self, ErrorKind::Busy | ErrorKind::Timeout)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorKind::Success => "success",
            ErrorKind::InternalError => "internal error",
            ErrorKind::DeviceNotFound => "device not found",
            ErrorKind::DeviceNotReady => "device not ready",
            ErrorKind::InvalidParameter => "invalid parameter",
            ErrorKind::UnableToCompleteOperation => "unable to complete operation",
            ErrorKind::Timeout => "operation timed out",
            ErrorKind::NotSupported => "operation not supported",
            ErrorKind::ClientNotFound => "firmware client not found",
            ErrorKind::Busy => "device busy",
            ErrorKind::Disconnected => "firmware client disconnected",
            ErrorKind::InsufficientBuffer => "insufficient buffer",
            ErrorKind::PermissionDenied => "permission denied",
        };
        f.write_str(text)
    }
}

/// A failed driver call: which operation failed and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeeError {
    pub operation: &'static str,
    pub kind: ErrorKind,
}

impl TeeError {
    pub fn new(operation: &'static str, kind: ErrorKind) -> Self {
        Self { operation, kind }
    }

    /// Build from a failing status code. A driver that reports failure with
    /// the success code is treated as an internal error.
    pub fn from_status(operation: &'static str, status: TeeStatus) -> Self {
        let kind = match ErrorKind::from_status(status) {
            ErrorKind::Success => ErrorKind::InternalError,
            kind => kind,
        };
        Self { operation, kind }
    }
}

impl fmt::Display for TeeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.kind)
    }
}

impl std::error::Error for TeeError {}
