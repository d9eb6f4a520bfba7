// Licensed under the Apache-2.0 license

//! Status and capability queries

use crate::common::{capture_sink, test_constants::*, MockDriver};
use tee_host_session::{ConnectionState, Session, SessionConfig, SessionError, KIND_BUFFER_LEN};
use tee_host_types::{ErrorKind, FwStatusRegisterIndex, LogLevel};

fn initialized(driver: &MockDriver) -> Session<'_, MockDriver> {
    Session::open(driver, Some(TEST_CLIENT), SessionConfig::default()).expect("open should succeed")
}

#[test]
fn test_fw_status_registers() {
    let driver = MockDriver::new();
    let session = initialized(&driver);

    for (index, expected) in FwStatusRegisterIndex::ALL.iter().zip(TEST_FW_STATUS) {
        let value = session.fw_status(*index).expect("fw_status should succeed");
        println!("{:?} = 0x{:08X}", index, value);
        assert_eq!(value, expected, "register {:?} mismatch", index);
    }
}

#[test]
fn test_fw_status_index_out_of_range() {
    assert!(FwStatusRegisterIndex::try_from(5u32).is_ok());
    assert!(FwStatusRegisterIndex::try_from(6u32).is_err());
}

#[test]
fn test_trc() {
    let driver = MockDriver::new();
    let session = initialized(&driver);
    assert_eq!(session.trc(), Ok(TEST_TRC));
}

#[test]
fn test_kind() {
    let driver = MockDriver::new().with_kind("gsc");
    let session = initialized(&driver);
    assert_eq!(session.kind().expect("kind should succeed"), "gsc");
}

#[test]
fn test_kind_filling_the_buffer() {
    let kind = "k".repeat(KIND_BUFFER_LEN);
    let driver = MockDriver::new().with_kind(&kind);
    let session = initialized(&driver);
    assert_eq!(session.kind().expect("kind should succeed"), kind);
}

#[test]
fn test_kind_longer_than_buffer() {
    let driver = MockDriver::new().with_reported_kind_len(KIND_BUFFER_LEN + 8);
    let session = initialized(&driver);

    let err = session.kind().expect_err("kind must not truncate");
    assert_eq!(err.kind(), Some(ErrorKind::InsufficientBuffer));
    assert_eq!(err.to_string(), "GetKind failed: insufficient buffer");
}

#[test]
fn test_negotiated_values_after_connect() {
    let driver = MockDriver::new();
    let mut session = initialized(&driver);

    assert_eq!(session.protocol_version(), Ok(0));
    assert_eq!(session.max_message_length(), Ok(0));

    session.connect().expect("connect should succeed");
    assert_eq!(session.protocol_version(), Ok(TEST_PROTOCOL_VERSION));
    assert_eq!(session.max_message_length(), Ok(TEST_MAX_MSG_LEN));
}

#[test]
fn test_driver_version() {
    let driver = MockDriver::new();
    let session = initialized(&driver);

    let version = session.driver_version().expect("driver_version should succeed");
    assert_eq!(version, TEST_DRIVER_VERSION);
    assert_eq!(version.to_string(), "2.6.0.1071");
}

#[test]
fn test_queries_need_a_handle() {
    let driver = MockDriver::new();
    let session = Session::new(&driver, Some(TEST_CLIENT), SessionConfig::default());

    let expected = SessionError::InvalidState {
        current: ConnectionState::Uninitialized,
        expected: ConnectionState::Initialized,
    };
    assert_eq!(session.trc(), Err(expected.clone()));
    assert_eq!(session.kind(), Err(expected.clone()));
    assert_eq!(session.max_message_length(), Err(expected.clone()));
    assert_eq!(session.device_handle(), Err(expected.clone()));
    assert_eq!(session.driver_version(), Err(expected));
}

#[test]
fn test_device_handle() {
    let driver = MockDriver::new();
    let mut session = initialized(&driver);
    assert_eq!(session.device_handle(), Ok(Some(TEST_DEVICE_HANDLE_BASE + 1)));

    session.connect().expect("connect should succeed");
    let connected = &session;
    assert_eq!(connected.device_handle(), Ok(Some(TEST_DEVICE_HANDLE_BASE + 1)));
    assert_eq!(connected.max_message_length(), Ok(TEST_MAX_MSG_LEN));

    session.close();
    assert!(session.device_handle().is_err());
}

#[test]
fn test_log_level() {
    let driver = MockDriver::new();
    let config = SessionConfig::default().with_log_level(LogLevel::Error);
    let mut session = Session::new(&driver, Some(TEST_CLIENT), config);

    assert_eq!(session.set_log_level(LogLevel::Verbose), LogLevel::Error);
    session.init().expect("init should succeed");
    assert_eq!(driver.last_init_level(), Some(LogLevel::Verbose));
    assert_eq!(session.log_level(), LogLevel::Verbose);

    assert_eq!(session.set_log_level(LogLevel::Quiet), LogLevel::Verbose);
    assert_eq!(session.log_level(), LogLevel::Quiet);

    session.close();
    assert_eq!(session.log_level(), LogLevel::Quiet);
}

#[test]
fn test_log_sink_installed_before_init() {
    let driver = MockDriver::new();
    let config = SessionConfig::default().with_log_level(LogLevel::Verbose);
    let mut session = Session::new(&driver, Some(TEST_CLIENT), config);
    let (sink, captured) = capture_sink();

    session.set_log_sink(Some(sink));
    session.init().expect("init should succeed");

    let captured = captured.lock().expect("log lock");
    assert_eq!(
        captured.as_slice(),
        &[(false, "mock handle 1 initialized".to_string())]
    );
}

#[test]
fn test_log_sink_installed_after_init() {
    let driver = MockDriver::new();
    let config = SessionConfig::default().with_log_level(LogLevel::Error);
    let mut session =
        Session::open(&driver, Some(TEST_CLIENT), config).expect("open should succeed");
    let (sink, captured) = capture_sink();
    session.set_log_sink(Some(sink));

    driver.fail_connect(Some(ErrorKind::ClientNotFound));
    let err = session.connect().expect_err("connect should fail");
    assert_eq!(err.kind(), Some(ErrorKind::ClientNotFound));

    let captured = captured.lock().expect("log lock");
    assert_eq!(
        captured.as_slice(),
        &[(true, "error: connect refused".to_string())]
    );
}
