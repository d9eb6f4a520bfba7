// Licensed under the Apache-2.0 license

//! TEE Host Types
//!
//! Leaf types shared by the driver boundary and the session layer: device
//! addressing, client identities, the status code taxonomy, register indices,
//! timeouts and the diagnostic log sink.

pub mod address;
pub mod error;
pub mod identity;
pub mod logging;
pub mod registers;
pub mod timeout;

pub use address::{DeviceAddress, DeviceAddressTag, ResolvedAddress};
pub use error::{ErrorKind, TeeError, TeeResult, TeeStatus};
pub use identity::ClientIdentity;
pub use logging::{DefaultLogSink, LogLevel, LogSink, TeeLog};
pub use registers::{DriverVersion, FwStatusRegisterIndex, FW_STATUS_REGISTER_COUNT};
pub use timeout::Timeout;
