// Licensed under the Apache-2.0 license

//! Session Management
//!
//! A [`Session`] owns one native driver handle and walks it through
//! `Uninitialized -> Initialized -> Connected -> Closed`. Message exchange
//! ([`Session::read`], [`Session::write`]) and the status queries are methods
//! on the session, gated by its state.

mod config;
mod error;
mod handle;
mod session;
mod state;
mod status;
mod transport;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use session::Session;
pub use state::ConnectionState;
pub use status::KIND_BUFFER_LEN;
