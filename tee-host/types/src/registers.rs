// Licensed under the Apache-2.0 license

//! Register and capability value types

use core::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use zerocopy::{FromBytes, Immutable, IntoBytes};

/// Number of hardware FW status registers.
pub const FW_STATUS_REGISTER_COUNT: usize = 6;

/// Selects one of the six FW status registers.
///
/// Out-of-range ordinals cannot be expressed; converting a raw `u32` goes
/// through `TryFrom` and fails before any driver call is made.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
pub enum FwStatusRegisterIndex {
    FwStatus1 = 0,
    FwStatus2 = 1,
    FwStatus3 = 2,
    FwStatus4 = 3,
    FwStatus5 = 4,
    FwStatus6 = 5,
}

impl FwStatusRegisterIndex {
    pub const ALL: [FwStatusRegisterIndex; FW_STATUS_REGISTER_COUNT] = [
        FwStatusRegisterIndex::FwStatus1,
        FwStatusRegisterIndex::FwStatus2,
        FwStatusRegisterIndex::FwStatus3,
        FwStatusRegisterIndex::FwStatus4,
        FwStatusRegisterIndex::FwStatus5,
        FwStatusRegisterIndex::FwStatus6,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }
}

/// Version of the installed native driver.
///
/// Layout matches the native four-field structure.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, FromBytes, IntoBytes, Immutable,
)]
pub struct DriverVersion {
    pub major: u16,
    pub minor: u16,
    pub hotfix: u16,
    pub build: u16,
}

impl DriverVersion {
    pub const fn new(major: u16, minor: u16, hotfix: u16, build: u16) -> Self {
        Self {
            major,
            minor,
            hotfix,
            build,
        }
    }
}

impl fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.hotfix, self.build
        )
    }
}
