// Licensed under the Apache-2.0 license

//! Integration tests for tee-host
//!
//! All tests live in this one library so they share the mock driver in
//! [`common`] without listing each file in Cargo.toml.



#[cfg(test)]
pub mod test_device_address;


#[cfg(test)]
pub mod test_status;

#[cfg(test)]
pub mod test_transport;
