// Licensed under the Apache-2.0 license

use core::fmt;
use core::time::Duration;

/// Timeout of a blocking transport call, in milliseconds.
///
/// Zero asks for immediate completion and `u32::MAX` for an unbounded wait.
/// The value is handed to the driver as is; the driver enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timeout(u32);

impl Timeout {
    pub const IMMEDIATE: Timeout = Timeout(0);
    pub const INFINITE: Timeout = Timeout(u32::MAX);

    pub const fn from_millis(millis: u32) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u32 {
        self.0
    }

    pub const fn is_immediate(self) -> bool {
        self.0 == 0
    }

    pub const fn is_infinite(self) -> bool {
        self.0 == u32::MAX
    }
}

impl From<Duration> for Timeout {
    /// Durations too long to represent become an unbounded wait.
    fn from(duration: Duration) -> Self {
        match u32::try_from(duration.as_millis()) {
            Ok(millis) => Timeout(millis),
            Err(_) => Timeout::INFINITE,
        }
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            f.write_str("infinite")
        } else {
            write!(f, "{}ms", self.0)
        }
    }
}
