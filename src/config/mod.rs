//! Configuration types for the Plentymarkets REST client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`BaseUrl`]: The normalized `https://` base URL of a Plentymarkets system
//! - [`Username`]: A validated REST username
//! - [`Password`]: A validated password with masked debug output
//! - [`ThrottlePolicy`]: Wait times and retry cap for rate-limit handling
//! - [`ErrorMode`]: Whether terminal call failures are returned or suppressed
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use plentymarkets_rest::{ErrorMode, ThrottlePolicy};
//!
//! let policy = ThrottlePolicy::default()
//!     .max_retries(2)
//!     .time_unit(Duration::from_millis(500));
//!
//! assert_eq!(policy.read_limit_wait(), Duration::from_millis(2500));
//! assert_eq!(ErrorMode::default(), ErrorMode::Suppress);
//! ```

mod newtypes;

pub use newtypes::{normalize_url, BaseUrl, Password, Username};

use std::time::Duration;

/// Units to wait after a "short period read limit reached" failure.
pub const READ_LIMIT_WAIT_UNITS: u64 = 5;

/// Units to wait after a "short period write limit reached" failure.
pub const WRITE_LIMIT_WAIT_UNITS: u64 = 10;

/// Default cap on short-period limit retries for one call.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// How terminal failures of a call are reported.
///
/// Configuration errors raised while constructing a client are always
/// returned, regardless of the mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Return the error to the caller.
    Propagate,
    /// Log the error and report the call as having no result (`Ok(None)`).
    #[default]
    Suppress,
}

/// Timing parameters for throttle waits and short-period limit retries.
///
/// All waits are expressed in units of [`time_unit`](Self::time_unit), which
/// is one second by default. Throttle decay headers are interpreted in the
/// same unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrottlePolicy {
    time_unit: Duration,
    read_limit_units: u64,
    write_limit_units: u64,
    max_retries: u32,
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self {
            time_unit: Duration::from_secs(1),
            read_limit_units: READ_LIMIT_WAIT_UNITS,
            write_limit_units: WRITE_LIMIT_WAIT_UNITS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl ThrottlePolicy {
    /// Sets the length of one wait unit.
    #[must_use]
    pub const fn time_unit(mut self, unit: Duration) -> Self {
        self.time_unit = unit;
        self
    }

    /// Sets how many units to wait after a short-period read limit failure.
    #[must_use]
    pub const fn read_limit_units(mut self, units: u64) -> Self {
        self.read_limit_units = units;
        self
    }

    /// Sets how many units to wait after a short-period write limit failure.
    #[must_use]
    pub const fn write_limit_units(mut self, units: u64) -> Self {
        self.write_limit_units = units;
        self
    }

    /// Sets the maximum number of retries per call.
    ///
    /// Zero disables retrying: the first limit failure exhausts the budget.
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Returns the configured retry cap.
    #[must_use]
    pub const fn retry_limit(&self) -> u32 {
        self.max_retries
    }

    /// Returns the wait after a short-period read limit failure.
    #[must_use]
    pub fn read_limit_wait(&self) -> Duration {
        self.units(self.read_limit_units)
    }

    /// Returns the wait after a short-period write limit failure.
    #[must_use]
    pub fn write_limit_wait(&self) -> Duration {
        self.units(self.write_limit_units)
    }

    /// Converts a number of units into a duration, saturating on overflow.
    #[must_use]
    pub fn units(&self, units: u64) -> Duration {
        let units = u32::try_from(units).unwrap_or(u32::MAX);
        self.time_unit.saturating_mul(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_uses_seconds() {
        let policy = ThrottlePolicy::default();
        assert_eq!(policy.read_limit_wait(), Duration::from_secs(5));
        assert_eq!(policy.write_limit_wait(), Duration::from_secs(10));
        assert_eq!(policy.retry_limit(), DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_policy_scales_with_time_unit() {
        let policy = ThrottlePolicy::default().time_unit(Duration::from_millis(1));
        assert_eq!(policy.units(8), Duration::from_millis(8));
        assert_eq!(policy.write_limit_wait(), Duration::from_millis(10));
    }

    #[test]
    fn test_policy_overrides() {
        let policy = ThrottlePolicy::default()
            .read_limit_units(1)
            .write_limit_units(2)
            .max_retries(0);
        assert_eq!(policy.read_limit_wait(), Duration::from_secs(1));
        assert_eq!(policy.write_limit_wait(), Duration::from_secs(2));
        assert_eq!(policy.retry_limit(), 0);
    }

    #[test]
    fn test_units_saturate_instead_of_overflowing() {
        let policy = ThrottlePolicy::default();
        assert_eq!(policy.units(u64::MAX), Duration::from_secs(u64::from(u32::MAX)));
    }

    #[test]
    fn test_error_mode_defaults_to_suppress() {
        assert_eq!(ErrorMode::default(), ErrorMode::Suppress);
    }

    #[test]
    fn test_policy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ThrottlePolicy>();
    }
}
