// Licensed under the Apache-2.0 license

//! errno translation for the MEI character device

use std::io;

use nix::errno::Errno;
use tee_host_types::{ErrorKind, TeeStatus};

use super::MeiState;

pub(crate) fn status_of(errno: Errno) -> TeeStatus {
    let kind = match errno {
        Errno::ENOTTY => ErrorKind::ClientNotFound,
        Errno::EBUSY => ErrorKind::Busy,
        Errno::ENODEV => ErrorKind::Disconnected,
        Errno::ETIME | Errno::ETIMEDOUT => ErrorKind::Timeout,
        Errno::EACCES | Errno::EPERM => ErrorKind::PermissionDenied,
        Errno::ENOENT => ErrorKind::DeviceNotFound,
        Errno::EINVAL => ErrorKind::InvalidParameter,
        Errno::EOPNOTSUPP => ErrorKind::NotSupported,
        Errno::EMSGSIZE | Errno::ENOSPC => ErrorKind::InsufficientBuffer,
        _ => ErrorKind::InternalError,
    };
    kind.status()
}

/// errno behind an I/O error; errors without an OS code are classified by kind.
pub(crate) fn errno_of(err: &io::Error) -> Errno {
    if let Some(code) = err.raw_os_error() {
        return Errno::from_i32(code);
    }
    match err.kind() {
        io::ErrorKind::NotFound => Errno::ENOENT,
        io::ErrorKind::PermissionDenied => Errno::EACCES,
        io::ErrorKind::InvalidInput => Errno::EINVAL,
        io::ErrorKind::TimedOut => Errno::ETIMEDOUT,
        io::ErrorKind::WouldBlock => Errno::EAGAIN,
        _ => Errno::EIO,
    }
}

/// Client state after a failed device call.
pub(crate) fn state_after(errno: Errno, current: MeiState) -> MeiState {
    match errno {
        Errno::ENOTTY => MeiState::NotPresent,
        Errno::EBUSY | Errno::ENODEV => MeiState::Disconnected,
        Errno::EOPNOTSUPP | Errno::ETIME | Errno::ETIMEDOUT | Errno::EAGAIN => current,
        _ => MeiState::Error,
    }
}
