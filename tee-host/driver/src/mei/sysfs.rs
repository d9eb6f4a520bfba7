// Licensed under the Apache-2.0 license

//! Device attributes exported under `/sys/class/mei/<device>/`

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use nix::errno::Errno;

use super::errno::errno_of;

pub const DEVICE_PREFIX: &str = "/dev/";

/// Kind reported by kernels that predate the `kind` attribute.
const LEGACY_KIND: &str = "mei";

/// sysfs name of a device node: `/dev/mei0` -> `mei0`.
pub fn device_name(device: &Path) -> Result<&OsStr, Errno> {
    let name = device.strip_prefix(DEVICE_PREFIX).map_err(|_| Errno::EINVAL)?;
    if name.as_os_str().is_empty() {
        return Err(Errno::EINVAL);
    }
    Ok(name.as_os_str())
}

fn read_attribute(root: &Path, device: &OsStr, attribute: &str) -> Result<String, Errno> {
    let path = root.join(device).join(attribute);
    fs::read_to_string(&path).map_err(|err| errno_of(&err))
}

fn parse_register(line: &str) -> Result<u32, Errno> {
    u32::from_str_radix(line.trim(), 16).map_err(|_| Errno::EPROTO)
}

/// One FW status register; `fw_status` holds one hex word per line.
pub fn read_fw_status(root: &Path, device: &OsStr, index: usize) -> Result<u32, Errno> {
    let contents = read_attribute(root, device, "fw_status")?;
    let line = contents.lines().nth(index).ok_or(Errno::EPROTO)?;
    parse_register(line)
}

pub fn read_trc(root: &Path, device: &OsStr) -> Result<u32, Errno> {
    let contents = read_attribute(root, device, "trc")?;
    let line = contents.lines().next().ok_or(Errno::EPROTO)?;
    parse_register(line)
}

pub fn read_kind(root: &Path, device: &OsStr) -> Result<String, Errno> {
    match read_attribute(root, device, "kind") {
        Ok(kind) => Ok(kind.trim_end().to_string()),
        Err(Errno::ENOENT) if root.join(device).is_dir() => Ok(LEGACY_KIND.to_string()),
        Err(errno) => Err(errno),
    }
}
