// Licensed under the Apache-2.0 license

//! TEE Driver Boundary
//!
//! [`TeeDriver`] is the seam between session management and the native
//! driver: every call the session layer makes into the device goes through
//! it. The Linux implementation talks to the MEI character device; tests
//! substitute their own implementation.

#[cfg(target_os = "linux")]
pub mod mei;

use tee_host_types::{
    ClientIdentity, DriverVersion, FwStatusRegisterIndex, LogLevel, LogSink, ResolvedAddress,
    TeeLog, TeeStatus, Timeout,
};

#[cfg(target_os = "linux")]
pub use mei::{MeiDriver, MeiHandle};

/// Native descriptor of an open device (a file descriptor on Linux).
pub type RawDeviceHandle = std::os::raw::c_int;

/// Result of a driver call. Failures carry the raw status code.
pub type DriverResult<T> = Result<T, TeeStatus>;

/// Parameters of the driver initialization call.
pub struct InitRequest<'a> {
    /// Firmware client to bind to; `None` for capability-only handles.
    pub client: Option<ClientIdentity>,
    /// Resolved device address, valid for this call only.
    pub device: &'a ResolvedAddress,
    /// Diagnostic channel the handle keeps for its lifetime.
    pub log: TeeLog,
    /// Minimal firmware client protocol version, 0 for any.
    pub required_protocol_version: u8,
    /// Virtual tag for the connection, 0 for none.
    pub vtag: u8,
}

/// The native driver entry points.
///
/// `Handle` is the per-session native resource. The caller owns it and must
/// hand it back to [`TeeDriver::release`] exactly once. Calls on a single
/// handle are not synchronized by the driver.
pub trait TeeDriver {
    type Handle;

    /// Allocate a fresh, uninitialized handle.
    fn alloc(&self) -> Self::Handle;

    /// Free a handle, whatever state it is in.
    fn release(&self, handle: Self::Handle);

    fn init(&self, handle: &mut Self::Handle, request: InitRequest<'_>) -> DriverResult<()>;

    fn connect(&self, handle: &mut Self::Handle) -> DriverResult<()>;

    /// Best effort; failures are not reported.
    fn disconnect(&self, handle: &mut Self::Handle);

    /// Blocking receive into `buffer`; returns the number of bytes read.
    fn read(
        &self,
        handle: &mut Self::Handle,
        buffer: &mut [u8],
        timeout: Timeout,
    ) -> DriverResult<usize>;

    /// Blocking send; returns the number of bytes the driver accepted.
    fn write(
        &self,
        handle: &mut Self::Handle,
        buffer: &[u8],
        timeout: Timeout,
    ) -> DriverResult<usize>;

    fn fw_status(&self, handle: &Self::Handle, index: FwStatusRegisterIndex) -> DriverResult<u32>;

    fn trc(&self, handle: &Self::Handle) -> DriverResult<u32>;

    /// Copy the device kind string into `buffer` and return its full length,
    /// which may exceed the buffer.
    fn kind(&self, handle: &Self::Handle, buffer: &mut [u8]) -> DriverResult<usize>;

    fn max_msg_len(&self, handle: &Self::Handle) -> u32;

    fn protocol_version(&self, handle: &Self::Handle) -> u8;

    fn log_level(&self, handle: &Self::Handle) -> LogLevel;

    /// Returns the previous level.
    fn set_log_level(&self, handle: &mut Self::Handle, level: LogLevel) -> LogLevel;

    /// `None` restores the default sink.
    fn set_log_sink(&self, handle: &mut Self::Handle, sink: Option<Box<dyn LogSink>>);

    /// OS descriptor of the open device, for callers running their own
    /// readiness loop. `None` until the handle is initialized.
    fn device_handle(&self, handle: &Self::Handle) -> Option<RawDeviceHandle>;

    fn driver_version(&self, handle: &Self::Handle) -> DriverResult<DriverVersion>;
}
