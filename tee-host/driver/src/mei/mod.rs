// Licensed under the Apache-2.0 license

//! Linux MEI driver
//!
//! Sessions open the MEI character device (`/dev/meiN`), connect it to a
//! firmware client with an ioctl and then exchange whole messages through
//! `read(2)`/`write(2)`. Status registers and the device kind come from the
//! device's sysfs attributes.

mod errno;
pub mod ioctl;
pub mod sysfs;

use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags};
use tee_host_types::{
    ClientIdentity, DeviceAddressTag, DriverVersion, ErrorKind, FwStatusRegisterIndex, LogLevel,
    LogSink, TeeLog, TeeStatus, Timeout,
};

use crate::{DriverResult, InitRequest, RawDeviceHandle, TeeDriver};

use self::errno::{errno_of, state_after, status_of};

/// Device node used when the caller does not name one.
pub const MEI_DEFAULT_DEVICE: &str = "/dev/mei0";

/// Root of the MEI class in sysfs.
pub const MEI_SYSFS_ROOT: &str = "/sys/class/mei";

/// Connection state of a native MEI handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeiState {
    Zero,
    Initialized,
    Connected,
    Disconnected,
    /// No firmware client with the requested GUID
    NotPresent,
    /// Client protocol older than requested
    VersionMismatch,
    Error,
}

/// Native per-session state of the MEI driver.
#[derive(Debug)]
pub struct MeiHandle {
    file: Option<File>,
    device: Option<PathBuf>,
    client: Option<ClientIdentity>,
    state: MeiState,
    max_msg_len: u32,
    protocol_version: u8,
    required_protocol_version: u8,
    vtag: u8,
    log: TeeLog,
}

impl MeiHandle {
    fn new() -> Self {
        Self {
            file: None,
            device: None,
            client: None,
            state: MeiState::Zero,
            max_msg_len: 0,
            protocol_version: 0,
            required_protocol_version: 0,
            vtag: 0,
            log: TeeLog::default(),
        }
    }

    pub fn state(&self) -> MeiState {
        self.state
    }

    /// Device node this handle was opened on.
    pub fn device(&self) -> Option<&Path> {
        self.device.as_deref()
    }

    /// Raw descriptor of the open device node.
    pub fn raw_fd(&self) -> Option<RawFd> {
        self.file.as_ref().map(AsRawFd::as_raw_fd)
    }

    /// Failed device syscall: the client state follows the errno.
    fn fail(&mut self, operation: &str, errno: Errno) -> TeeStatus {
        self.state = state_after(errno, self.state);
        self.log.error(format_args!(
            "{} failed with status [{}]:{}",
            operation,
            -(errno as i32),
            errno.desc()
        ));
        status_of(errno)
    }

    /// Failed readiness wait. The connection itself is untouched.
    fn wait_failed(&self, errno: Errno) -> TeeStatus {
        self.log.error(format_args!(
            "select failed with status [{}]:{}",
            -(errno as i32),
            errno.desc()
        ));
        status_of(errno)
    }

    fn require_connected(&self) -> DriverResult<&File> {
        match (&self.file, self.state) {
            (Some(file), MeiState::Connected) => Ok(file),
            _ => {
                self.log
                    .error(format_args!("client is not connected [{:?}]", self.state));
                Err(ErrorKind::Disconnected.status())
            }
        }
    }
}

/// [`TeeDriver`] over the Linux MEI character device.
#[derive(Debug, Clone)]
pub struct MeiDriver {
    sysfs_root: PathBuf,
}

impl Default for MeiDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MeiDriver {
    pub fn new() -> Self {
        Self {
            sysfs_root: PathBuf::from(MEI_SYSFS_ROOT),
        }
    }

    /// Read device attributes from another sysfs class directory.
    pub fn with_sysfs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sysfs_root = root.into();
        self
    }

    pub fn sysfs_root(&self) -> &Path {
        &self.sysfs_root
    }

    fn device_name<'h>(&self, handle: &'h MeiHandle) -> DriverResult<&'h OsStr> {
        let device = handle
            .device
            .as_deref()
            .unwrap_or_else(|| Path::new(MEI_DEFAULT_DEVICE));
        sysfs::device_name(device).map_err(|errno| {
            handle.log.error(format_args!(
                "device does not start with '{}'",
                sysfs::DEVICE_PREFIX
            ));
            status_of(errno)
        })
    }

    /// Wait until `fd` is ready for `events`. An infinite timeout leaves the
    /// wait to the blocking syscall itself.
    fn wait_ready(fd: RawFd, events: PollFlags, timeout: Timeout) -> Result<(), Errno> {
        if timeout.is_infinite() {
            return Ok(());
        }
        let millis = libc::c_int::try_from(timeout.as_millis()).unwrap_or(libc::c_int::MAX);
        let mut fds = [PollFd::new(fd, events)];
        match poll(&mut fds, millis)? {
            0 => Err(Errno::ETIME),
            _ => Ok(()),
        }
    }
}

fn device_path(request: &InitRequest<'_>) -> Result<PathBuf, Errno> {
    match request.device.tag() {
        DeviceAddressTag::None => Ok(PathBuf::from(MEI_DEFAULT_DEVICE)),
        DeviceAddressTag::Path => {
            let bytes = request.device.path_bytes().ok_or(Errno::EINVAL)?;
            if bytes.is_empty() || bytes.contains(&0) {
                return Err(Errno::EINVAL);
            }
            Ok(PathBuf::from(OsStr::from_bytes(bytes)))
        }
        DeviceAddressTag::InterfaceGuid => Err(Errno::EOPNOTSUPP),
    }
}

/// `major.minor[.patch]` prefix of a kernel release string.
fn parse_kernel_release(release: &str) -> Option<DriverVersion> {
    let numeric = release
        .split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .next()?;
    let mut parts = numeric.split('.').map(|part| part.parse::<u16>());
    let major = parts.next()?.ok()?;
    let minor = parts.next()?.ok()?;
    let hotfix = parts.next().and_then(Result::ok).unwrap_or(0);
    Some(DriverVersion::new(major, minor, hotfix, 0))
}

impl TeeDriver for MeiDriver {
    type Handle = MeiHandle;

    fn alloc(&self) -> MeiHandle {
        MeiHandle::new()
    }

    fn release(&self, handle: MeiHandle) {
        handle.log.verbose(format_args!("releasing handle"));
        drop(handle);
    }

    fn init(&self, handle: &mut MeiHandle, request: InitRequest<'_>) -> DriverResult<()> {
        if handle.state != MeiState::Zero {
            handle
                .log
                .error(format_args!("handle is already initialized [{:?}]", handle.state));
            return Err(ErrorKind::InvalidParameter.status());
        }

        let path = match device_path(&request) {
            Ok(path) => path,
            Err(errno) => {
                request.log.error(format_args!(
                    "unusable device address {:?} [{}]",
                    request.device.tag(),
                    errno.desc()
                ));
                handle.log = request.log;
                return Err(status_of(errno));
            }
        };

        let file = match OpenOptions::new().read(true).write(true).open(&path) {
            Ok(file) => file,
            Err(err) => {
                let errno = errno_of(&err);
                request.log.error(format_args!(
                    "Cannot establish a handle to the Intel MEI driver {} [{}]:{}",
                    path.display(),
                    -(errno as i32),
                    errno.desc()
                ));
                handle.log = request.log;
                return Err(status_of(errno));
            }
        };

        handle.log = request.log;
        handle
            .log
            .verbose(format_args!("Opened {}: fd = {}", path.display(), file.as_raw_fd()));

        handle.file = Some(file);
        handle.device = Some(path);
        handle.client = request.client;
        handle.required_protocol_version = request.required_protocol_version;
        handle.vtag = request.vtag;
        handle.state = MeiState::Initialized;
        Ok(())
    }

    fn connect(&self, handle: &mut MeiHandle) -> DriverResult<()> {
        if handle.state == MeiState::Connected {
            handle.log.error(format_args!("client is connected"));
            return Err(ErrorKind::InvalidParameter.status());
        }
        let fd = match handle.raw_fd() {
            Some(fd) => fd,
            None => {
                handle.log.error(format_args!("handle is not initialized"));
                return Err(ErrorKind::InvalidParameter.status());
            }
        };

        let guid = handle
            .client
            .map(|client| client.to_guid_bytes())
            .unwrap_or([0; 16]);
        let client = ioctl::connect_client(fd, &guid, handle.vtag)
            .map_err(|errno| handle.fail("Cannot connect to client", errno))?;

        handle
            .log
            .verbose(format_args!("max_message_length {}", client.max_msg_length));
        handle
            .log
            .verbose(format_args!("protocol_version {}", client.protocol_version));

        if handle.required_protocol_version > 0
            && client.protocol_version < handle.required_protocol_version
        {
            handle
                .log
                .error(format_args!("Intel MEI protocol version not supported"));
            handle.state = MeiState::VersionMismatch;
            return Err(ErrorKind::InvalidParameter.status());
        }

        handle.max_msg_len = client.max_msg_length;
        handle.protocol_version = client.protocol_version;
        handle.state = MeiState::Connected;
        Ok(())
    }

    fn disconnect(&self, handle: &mut MeiHandle) {
        if handle.file.take().is_some() {
            handle.log.verbose(format_args!("closed device"));
        }
        handle.max_msg_len = 0;
        handle.protocol_version = 0;
        handle.state = MeiState::Zero;
    }

    fn read(
        &self,
        handle: &mut MeiHandle,
        buffer: &mut [u8],
        timeout: Timeout,
    ) -> DriverResult<usize> {
        if buffer.is_empty() {
            handle.log.error(format_args!("empty read buffer"));
            return Err(ErrorKind::InvalidParameter.status());
        }
        let fd = handle.require_connected()?.as_raw_fd();
        handle
            .log
            .verbose(format_args!("call read length = {}", buffer.len()));

        Self::wait_ready(fd, PollFlags::POLLIN, timeout)
            .map_err(|errno| handle.wait_failed(errno))?;

        let result = handle.require_connected()?.read(buffer);
        match result {
            Ok(read) => {
                handle
                    .log
                    .verbose(format_args!("read succeeded with result {}", read));
                Ok(read)
            }
            Err(err) => Err(handle.fail("read", errno_of(&err))),
        }
    }

    fn write(
        &self,
        handle: &mut MeiHandle,
        buffer: &[u8],
        timeout: Timeout,
    ) -> DriverResult<usize> {
        if buffer.is_empty() {
            handle.log.error(format_args!("empty write buffer"));
            return Err(ErrorKind::InvalidParameter.status());
        }
        let fd = handle.require_connected()?.as_raw_fd();
        handle
            .log
            .verbose(format_args!("call write length = {}", buffer.len()));

        Self::wait_ready(fd, PollFlags::POLLOUT, timeout)
            .map_err(|errno| handle.wait_failed(errno))?;

        let result = handle.require_connected()?.write(buffer);
        result.map_err(|err| handle.fail("write", errno_of(&err)))
    }

    fn fw_status(&self, handle: &MeiHandle, index: FwStatusRegisterIndex) -> DriverResult<u32> {
        let device = self.device_name(handle)?;
        sysfs::read_fw_status(&self.sysfs_root, device, index.ordinal()).map_err(|errno| {
            handle
                .log
                .error(format_args!("Cannot get FW status [{}]", errno.desc()));
            status_of(errno)
        })
    }

    fn trc(&self, handle: &MeiHandle) -> DriverResult<u32> {
        let device = self.device_name(handle)?;
        sysfs::read_trc(&self.sysfs_root, device).map_err(|errno| {
            handle
                .log
                .error(format_args!("Cannot get TRC value [{}]", errno.desc()));
            status_of(errno)
        })
    }

    fn kind(&self, handle: &MeiHandle, buffer: &mut [u8]) -> DriverResult<usize> {
        let device = self.device_name(handle)?;
        let kind = sysfs::read_kind(&self.sysfs_root, device).map_err(|errno| {
            handle
                .log
                .error(format_args!("Cannot get device kind [{}]", errno.desc()));
            status_of(errno)
        })?;

        let bytes = kind.as_bytes();
        let copied = bytes.len().min(buffer.len());
        buffer[..copied].copy_from_slice(&bytes[..copied]);
        Ok(bytes.len())
    }

    fn max_msg_len(&self, handle: &MeiHandle) -> u32 {
        handle.max_msg_len
    }

    fn protocol_version(&self, handle: &MeiHandle) -> u8 {
        handle.protocol_version
    }

    fn log_level(&self, handle: &MeiHandle) -> LogLevel {
        handle.log.level()
    }

    fn set_log_level(&self, handle: &mut MeiHandle, level: LogLevel) -> LogLevel {
        handle.log.set_level(level)
    }

    fn set_log_sink(&self, handle: &mut MeiHandle, sink: Option<Box<dyn LogSink>>) {
        handle.log.set_sink(sink);
        handle.log.verbose(format_args!("New log callback set"));
    }

    fn device_handle(&self, handle: &MeiHandle) -> Option<RawDeviceHandle> {
        handle.raw_fd()
    }

    fn driver_version(&self, handle: &MeiHandle) -> DriverResult<DriverVersion> {
        let uts = nix::sys::utsname::uname().map_err(status_of)?;
        let release = uts.release().to_string_lossy();
        parse_kernel_release(&release).ok_or_else(|| {
            handle
                .log
                .error(format_args!("unrecognized kernel release {}", release));
            ErrorKind::NotSupported.status()
        })
    }
}
