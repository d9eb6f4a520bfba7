// Licensed under the Apache-2.0 license

use core::fmt;
use core::str::FromStr;

use uuid::Uuid;

/// 128-bit identity of the firmware client a session talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientIdentity(Uuid);

impl ClientIdentity {
    pub const fn new(guid: Uuid) -> Self {
        Self(guid)
    }

    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn guid(&self) -> Uuid {
        self.0
    }

    /// The identity in native GUID layout (first three fields little-endian).
    pub fn to_guid_bytes(&self) -> [u8; 16] {
        self.0.to_bytes_le()
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ClientIdentity {
    fn from(guid: Uuid) -> Self {
        Self(guid)
    }
}

impl FromStr for ClientIdentity {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
