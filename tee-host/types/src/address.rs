// Licensed under the Apache-2.0 license

//! Device addressing
//!
//! A [`DeviceAddress`] names the device instance that backs a session. Before
//! it reaches the driver it is resolved into a [`ResolvedAddress`]: the wire
//! tag plus a scratch payload in the form the driver consumes. The resolved
//! form borrows nothing and is not `Clone`; the session creates it right before
//! the initialization call and drops it right after.

use std::path::PathBuf;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use uuid::Uuid;

/// Wire tag of a device address.
///
/// Value 2 belongs to pre-opened device handles in the native ABI and is
/// never produced here; the gap is kept so the tags stay driver compatible.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
pub enum DeviceAddressTag {
    None = 0,
    Path = 1,
    InterfaceGuid = 3,
}

/// Which device instance a session should open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeviceAddress {
    /// Let the driver pick its default instance.
    #[default]
    None,
    /// Explicit OS device path.
    Path(PathBuf),
    /// Explicit instance interface identifier.
    InterfaceGuid(Uuid),
}

impl DeviceAddress {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        DeviceAddress::Path(path.into())
    }

    pub fn interface_guid(guid: Uuid) -> Self {
        DeviceAddress::InterfaceGuid(guid)
    }

    pub fn tag(&self) -> DeviceAddressTag {
        match self {
            DeviceAddress::None => DeviceAddressTag::None,
            DeviceAddress::Path(_) => DeviceAddressTag::Path,
            DeviceAddress::InterfaceGuid(_) => DeviceAddressTag::InterfaceGuid,
        }
    }

    /// Resolve into the driver-consumable form.
    ///
    /// Paths become their OS-encoded bytes followed by a NUL terminator and
    /// interface GUIDs become their 16-byte little-endian GUID layout.
    /// Resolution never fails: a malformed path is rejected later by the
    /// driver's initialization call.
    pub fn resolve(&self) -> ResolvedAddress {
        let payload = match self {
            DeviceAddress::None => Vec::new(),
            DeviceAddress::Path(path) => {
                let bytes = path.as_os_str().as_encoded_bytes();
                let mut payload = Vec::with_capacity(bytes.len() + 1);
                payload.extend_from_slice(bytes);
                payload.push(0);
                payload
            }
            DeviceAddress::InterfaceGuid(guid) => guid.to_bytes_le().to_vec(),
        };

        ResolvedAddress {
            tag: self.tag(),
            payload,
        }
    }
}

impl From<PathBuf> for DeviceAddress {
    fn from(path: PathBuf) -> Self {
        DeviceAddress::Path(path)
    }
}

impl From<Uuid> for DeviceAddress {
    fn from(guid: Uuid) -> Self {
        DeviceAddress::InterfaceGuid(guid)
    }
}

/// Tagged scratch form of a [`DeviceAddress`], valid for one initialization call.
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedAddress {
    tag: DeviceAddressTag,
    payload: Vec<u8>,
}

impl ResolvedAddress {
    pub fn tag(&self) -> DeviceAddressTag {
        self.tag
    }

    /// Raw scratch payload, exactly as handed to the driver.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Path bytes without the NUL terminator, for `Path` addresses.
    pub fn path_bytes(&self) -> Option<&[u8]> {
        if self.tag != DeviceAddressTag::Path {
            return None;
        }
        Some(self.payload.strip_suffix(&[0]).unwrap_or(&self.payload))
    }

    /// Interface GUID, for `InterfaceGuid` addresses.
    pub fn interface_guid(&self) -> Option<Uuid> {
        if self.tag != DeviceAddressTag::InterfaceGuid {
            return None;
        }
        let bytes: [u8; 16] = self.payload.as_slice().try_into().ok()?;
        Some(Uuid::from_bytes_le(bytes))
    }
}
