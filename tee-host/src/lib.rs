// Licensed under the Apache-2.0 license

//! TEE Host Library
//!
//! Client library for talking to firmware clients inside a Trusted Execution
//! Environment through the host's native TEE driver (Intel MEI on Linux).
//!
//! - **types**: device addressing, client identity, status codes, log levels
//! - **driver**: the [`TeeDriver`] boundary and the Linux [`MeiDriver`]
//! - **session**: [`Session`] lifecycle, message transport and status queries
//!
//! ## Architecture Overview
//!
//! ```text
//!             ┌──────────────────┐
//!             │ tee-host-session │
//!             │ (Session, read,  │
//!             │  write, queries) │
//!             └──────────────────┘
//!                      │
//!             ┌──────────────────┐         ┌─────────────────┐
//!             │ tee-host-driver  │◄────────│ MeiDriver       │
//!             │ (TeeDriver)      │         │ (/dev/meiN)     │
//!             └──────────────────┘         └─────────────────┘
//!                      │
//!             ┌──────────────────┐
//!             │ tee-host-types   │
//!             │ (Shared types)   │
//!             └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tee_host::{ClientIdentity, MeiDriver, Session, SessionConfig, Timeout};
//!
//! let driver = MeiDriver::new();
//! let client: ClientIdentity = "8e6a6715-9abc-4043-88ef-9e39c6f63e0f".parse()?;
//!
//! let mut session = Session::open(&driver, Some(client), SessionConfig::default())?;
//! session.connect()?;
//!
//! session.write(&request, Timeout::INFINITE)?;
//! let response = session.read(Timeout::from_millis(1000))?;
//!
//! session.close();
//! ```

pub use tee_host_driver::{DriverResult, InitRequest, RawDeviceHandle, TeeDriver};
#[cfg(target_os = "linux")]
pub use tee_host_driver::{MeiDriver, MeiHandle};
pub use tee_host_session::{
    ConnectionState, Session, SessionConfig, SessionError, SessionResult, KIND_BUFFER_LEN,
};
pub use tee_host_types::{
    ClientIdentity, DeviceAddress, DeviceAddressTag, DriverVersion, ErrorKind,
    FwStatusRegisterIndex, LogLevel, LogSink, TeeError, TeeResult, TeeStatus, Timeout,
};
