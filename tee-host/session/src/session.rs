// Licensed under the Apache-2.0 license

use log::debug;
use tee_host_driver::{InitRequest, TeeDriver};
use tee_host_types::{ClientIdentity, LogSink, TeeLog};

use crate::handle::NativeHandle;
use crate::{ConnectionState, SessionConfig, SessionError, SessionResult};

const LOG_TARGET: &str = "tee_host";

/// Session with one firmware client, borrowing the driver that backs it.
pub struct Session<'d, D: TeeDriver> {
    handle: NativeHandle<'d, D>,
    state: ConnectionState,
    client: Option<ClientIdentity>,
    pub(crate) config: SessionConfig,
    /// Sink installed by `init`
    pending_sink: Option<Box<dyn LogSink>>,
    pub(crate) max_msg_len: Option<u32>,
}

impl<'d, D: TeeDriver> Session<'d, D> {
    /// Allocate the native handle. The session starts `Uninitialized`.
    ///
    /// `client` is `None` for capability-only sessions, which can answer
    /// status queries but never connect.
    pub fn new(driver: &'d D, client: Option<ClientIdentity>, config: SessionConfig) -> Self {
        Self {
            handle: NativeHandle::alloc(driver),
            state: ConnectionState::Uninitialized,
            client,
            config,
            pending_sink: None,
            max_msg_len: None,
        }
    }

    /// Create and initialize a session.
    ///
    /// On failure the native handle is released before the error is returned.
    pub fn open(
        driver: &'d D,
        client: Option<ClientIdentity>,
        config: SessionConfig,
    ) -> SessionResult<Self> {
        let mut session = Self::new(driver, client, config);
        if let Err(err) = session.init() {
            session.close();
            return Err(err);
        }
        Ok(session)
    }

    /// Initialized session on the default device without a firmware client,
    /// for driver and device queries.
    pub fn open_capabilities(driver: &'d D) -> SessionResult<Self> {
        Self::open(driver, None, SessionConfig::default())
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn client(&self) -> Option<ClientIdentity> {
        self.client
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// `Uninitialized -> Initialized`
    ///
    /// The device address is resolved for the duration of the driver call
    /// only. A failed init leaves the session `Uninitialized`; the handle
    /// is still released by [`Session::close`].
    pub fn init(&mut self) -> SessionResult<()> {
        self.expect_state(ConnectionState::Uninitialized)?;

        let driver = self.handle.driver();
        let handle = self.handle.get_mut().ok_or(SessionError::InvalidState {
            current: ConnectionState::Closed,
            expected: ConnectionState::Uninitialized,
        })?;

        let device = self.config.device.resolve();
        let request = InitRequest {
            client: self.client,
            device: &device,
            log: TeeLog::new(self.config.log_level, self.pending_sink.take()),
            required_protocol_version: self.config.required_protocol_version,
            vtag: self.config.vtag,
        };
        driver
            .init(handle, request)
            .map_err(|status| SessionError::tee("Init", status))?;
        drop(device);

        debug!(target: LOG_TARGET, "session initialized on {:?}", self.config.device);
        self.state = ConnectionState::Initialized;
        Ok(())
    }

    /// `Initialized -> Connected`
    ///
    /// A failed connect keeps the session `Initialized`; it may be retried.
    pub fn connect(&mut self) -> SessionResult<()> {
        self.expect_state(ConnectionState::Initialized)?;
        if self.client.is_none() {
            return Err(SessionError::MissingClientIdentity);
        }

        let (driver, handle) = self.active_mut()?;
        driver
            .connect(handle)
            .map_err(|status| SessionError::tee("Connect", status))?;
        let max_msg_len = driver.max_msg_len(handle);

        debug!(target: LOG_TARGET, "session connected, max message length {}", max_msg_len);
        self.max_msg_len = Some(max_msg_len);
        self.state = ConnectionState::Connected;
        Ok(())
    }

    /// Disconnect and release the native handle, from any state.
    ///
    /// Only the first call does anything. Disconnect failures are not
    /// reported; the handle is released regardless.
    pub fn close(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }

        if self.state.is_active() {
            let driver = self.handle.driver();
            if let Some(handle) = self.handle.get_mut() {
                driver.disconnect(handle);
            }
        }
        self.handle.release();

        debug!(target: LOG_TARGET, "session closed from state {}", self.state);
        self.state = ConnectionState::Closed;
        self.max_msg_len = None;
    }

    /// Install the diagnostic sink; `None` restores the default.
    ///
    /// Before init the sink is kept and handed to the driver by [`Session::init`].
    pub fn set_log_sink(&mut self, sink: Option<Box<dyn LogSink>>) {
        match self.state {
            ConnectionState::Uninitialized => self.pending_sink = sink,
            ConnectionState::Initialized | ConnectionState::Connected => {
                let driver = self.handle.driver();
                if let Some(handle) = self.handle.get_mut() {
                    driver.set_log_sink(handle, sink);
                }
            }
            ConnectionState::Closed => {}
        }
    }

    pub(crate) fn expect_state(&self, expected: ConnectionState) -> SessionResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                current: self.state,
                expected,
            })
        }
    }

    /// Driver and handle of an initialized or connected session.
    pub(crate) fn active(&self) -> SessionResult<(&'d D, &D::Handle)> {
        let not_active = SessionError::InvalidState {
            current: self.state,
            expected: ConnectionState::Initialized,
        };
        if !self.state.is_active() {
            return Err(not_active);
        }
        let handle = self.handle.get().ok_or(not_active)?;
        Ok((self.handle.driver(), handle))
    }

    pub(crate) fn active_mut(&mut self) -> SessionResult<(&'d D, &mut D::Handle)> {
        let not_active = SessionError::InvalidState {
            current: self.state,
            expected: ConnectionState::Initialized,
        };
        if !self.state.is_active() {
            return Err(not_active);
        }
        let driver = self.handle.driver();
        let handle = self.handle.get_mut().ok_or(not_active)?;
        Ok((driver, handle))
    }
}

impl<D: TeeDriver> Drop for Session<'_, D> {
    fn drop(&mut self) {
        self.close();
    }
}
