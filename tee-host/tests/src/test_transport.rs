// Licensed under the Apache-2.0 license

//! Read and write through a connected session

use crate::common::{test_constants::*, MockDriver};
use tee_host_session::{ConnectionState, Session, SessionConfig, SessionError};
use tee_host_types::{ErrorKind, Timeout};

fn connected(driver: &MockDriver) -> Session<'_, MockDriver> {
    let mut session = Session::open(driver, Some(TEST_CLIENT), SessionConfig::default())
        .expect("open should succeed");
    session.connect().expect("connect should succeed");
    session
}

#[test]
fn test_read_truncates_to_bytes_read() {
    let payload: Vec<u8> = (0..10).collect();
    let driver = MockDriver::new()
        .with_max_msg_len(1024)
        .with_response(&payload);
    let mut session = connected(&driver);

    let data = session.read(Timeout::INFINITE).expect("read should succeed");

    assert_eq!(driver.last_read_capacity(), Some(1024));
    assert_eq!(data.len(), 10);
    assert_eq!(data, payload);
}

#[test]
fn test_read_buffer_uses_cached_max_message_length() {
    let driver = MockDriver::new();
    let mut session = connected(&driver);

    assert_eq!(session.max_message_length(), Ok(TEST_MAX_MSG_LEN));
    let data = session.read(Timeout::from_millis(100)).expect("read should succeed");

    assert_eq!(data, TEST_RESPONSE);
    assert_eq!(driver.last_read_capacity(), Some(TEST_MAX_MSG_LEN as usize));
    assert_eq!(driver.last_timeout(), Some(Timeout::from_millis(100)));
}

#[test]
fn test_read_timeout_is_reported() {
    let driver = MockDriver::new();
    let mut session = connected(&driver);
    driver.fail_read(Some(ErrorKind::Timeout));

    let err = session.read(Timeout::IMMEDIATE).expect_err("read should time out");
    assert_eq!(err.kind(), Some(ErrorKind::Timeout));
    assert_eq!(err.to_string(), "Read failed: operation timed out");
    assert_eq!(driver.last_timeout(), Some(Timeout::IMMEDIATE));
    assert!(session.is_connected(), "a timeout does not end the session");
}

#[test]
fn test_write_returns_accepted_length() {
    let driver = MockDriver::new();
    let mut session = connected(&driver);

    let written = session
        .write(&[1, 2, 3, 4], Timeout::INFINITE)
        .expect("write should succeed");
    assert_eq!(written, 4);
    assert_eq!(driver.written(), vec![1, 2, 3, 4]);
    assert_eq!(driver.last_timeout(), Some(Timeout::INFINITE));
}

#[test]
fn test_short_write_is_not_an_error() {
    let driver = MockDriver::new().with_write_limit(3);
    let mut session = connected(&driver);

    let written = session
        .write(&[1, 2, 3, 4, 5], Timeout::INFINITE)
        .expect("short write is still a success");
    assert_eq!(written, 3);
    assert_eq!(driver.calls().write, 1, "no retry on a short write");
}

#[test]
fn test_write_over_max_message_length_is_refused() {
    let driver = MockDriver::new().with_max_msg_len(8);
    let mut session = connected(&driver);

    let err = session
        .write(&[0u8; 9], Timeout::INFINITE)
        .expect_err("oversized write must fail");
    assert_eq!(err, SessionError::MessageTooLarge { len: 9, max: 8 });
    assert_eq!(driver.calls().write, 0);

    assert_eq!(session.write(&[0u8; 8], Timeout::INFINITE), Ok(8));
}

#[test]
fn test_write_failure_is_mapped() {
    let driver = MockDriver::new();
    let mut session = connected(&driver);
    driver.fail_write(Some(ErrorKind::Disconnected));

    let err = session
        .write(&[1], Timeout::INFINITE)
        .expect_err("write should fail");
    assert_eq!(err.kind(), Some(ErrorKind::Disconnected));
}

#[test]
fn test_transfers_require_connection() {
    let driver = MockDriver::new();
    let mut session = Session::open(&driver, Some(TEST_CLIENT), SessionConfig::default())
        .expect("open should succeed");

    let expected = SessionError::InvalidState {
        current: ConnectionState::Initialized,
        expected: ConnectionState::Connected,
    };
    assert_eq!(session.read(Timeout::INFINITE), Err(expected.clone()));
    assert_eq!(session.write(&[1], Timeout::INFINITE), Err(expected));

    session.close();
    assert!(session.read(Timeout::INFINITE).is_err());

    let calls = driver.calls();
    assert_eq!(calls.read, 0);
    assert_eq!(calls.write, 0);
}
