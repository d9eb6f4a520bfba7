// Licensed under the Apache-2.0 license

//! MEI character device ioctls (`linux/mei.h`)

use std::os::unix::io::RawFd;

use nix::errno::Errno;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Properties the firmware client reports on connect.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct MeiClient {
    pub max_msg_length: u32,
    pub protocol_version: u8,
    pub reserved: [u8; 3],
}

/// `struct mei_connect_client_data`: the client GUID on input, a
/// [`MeiClient`] on output.
#[repr(C)]
#[derive(Debug, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct MeiConnectClientData {
    pub data: [u8; 16],
}

/// `struct mei_connect_client_vtag` input layout.
#[repr(C)]
#[derive(Debug, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct MeiConnectClientVtag {
    pub in_client_uuid: [u8; 16],
    pub vtag: u8,
    pub reserved: [u8; 3],
}

/// `struct mei_connect_client_data_vtag`: union of [`MeiConnectClientVtag`]
/// and [`MeiClient`].
#[repr(C)]
#[derive(Debug, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct MeiConnectClientDataVtag {
    pub data: [u8; 20],
}

nix::ioctl_readwrite!(mei_connect_client, b'H', 0x01, MeiConnectClientData);
nix::ioctl_readwrite!(mei_connect_client_vtag, b'H', 0x04, MeiConnectClientDataVtag);

fn client_properties(data: &[u8]) -> Result<MeiClient, Errno> {
    MeiClient::read_from_prefix(data)
        .map(|(client, _)| client)
        .map_err(|_| Errno::EPROTO)
}

/// Connect `fd` to the firmware client `guid` (native GUID layout).
pub fn connect_client(fd: RawFd, guid: &[u8; 16], vtag: u8) -> Result<MeiClient, Errno> {
    if vtag == 0 {
        let mut data = MeiConnectClientData { data: *guid };
        // SAFETY: `data` is a live, correctly sized connect structure.
        unsafe { mei_connect_client(fd, &mut data) }?;
        return client_properties(data.as_bytes());
    }

    let request = MeiConnectClientVtag {
        in_client_uuid: *guid,
        vtag,
        reserved: [0; 3],
    };
    let mut data = MeiConnectClientDataVtag::default();
    data.data.copy_from_slice(request.as_bytes());
    // SAFETY: `data` is a live, correctly sized connect structure.
    unsafe { mei_connect_client_vtag(fd, &mut data) }?;
    client_properties(data.as_bytes())
}
