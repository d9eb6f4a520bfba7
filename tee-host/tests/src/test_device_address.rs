// Licensed under the Apache-2.0 license

//! Device address resolution as seen by the driver

use std::path::PathBuf;

use crate::common::{test_constants::*, MockDriver};
use tee_host_session::{Session, SessionConfig};
use tee_host_types::{DeviceAddress, DeviceAddressTag};
use uuid::Uuid;

const INTERFACE_GUID: Uuid = Uuid::from_u128(0xe2d1ff34_3458_49a9_88da_8e6915ce9be5);

fn init_with(device: DeviceAddress) -> (DeviceAddressTag, Vec<u8>) {
    let driver = MockDriver::new();
    let config = SessionConfig::default().with_device(device);
    let session = Session::open(&driver, Some(TEST_CLIENT), config).expect("open should succeed");
    drop(session);
    driver.last_device().expect("init should have seen an address")
}

#[test]
fn test_default_address() {
    let (tag, payload) = init_with(DeviceAddress::None);
    assert_eq!(tag, DeviceAddressTag::None);
    assert_eq!(u32::from(tag), 0);
    assert!(payload.is_empty());
}

#[test]
fn test_path_address() {
    let (tag, payload) = init_with(PathBuf::from("/dev/mei1").into());
    assert_eq!(tag, DeviceAddressTag::Path);
    assert_eq!(u32::from(tag), 1);
    assert_eq!(payload, b"/dev/mei1\0");
}

#[test]
fn test_interface_guid_address() {
    let (tag, payload) = init_with(INTERFACE_GUID.into());
    assert_eq!(tag, DeviceAddressTag::InterfaceGuid);
    assert_eq!(u32::from(tag), 3);
    assert_eq!(payload, INTERFACE_GUID.to_bytes_le());
}

#[test]
fn test_tag_two_is_unused() {
    assert!(DeviceAddressTag::try_from(2u32).is_err());
    assert_eq!(
        DeviceAddressTag::try_from(3u32).ok(),
        Some(DeviceAddressTag::InterfaceGuid)
    );
}
