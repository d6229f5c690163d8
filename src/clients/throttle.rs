//! Interpretation of Plentymarkets rate-limit signals.
//!
//! Every response carries, for each of three scopes, the calls left in the
//! current window and the seconds until the window decays:
//!
//! | Scope | Header prefix |
//! |-------|---------------|
//! | Long-period global | `X-Plenty-Global-Long-Period` |
//! | Short-period global | `X-Plenty-Global-Short-Period` |
//! | Per route | `X-Plenty-Route` |
//!
//! with the suffixes `-Calls-Left` and `-Decay`. When a scope has no calls
//! left the client waits for it to decay before returning.
//!
//! Rejections the server still issues are recognized by message: see
//! [`ShortPeriodLimit`].

use crate::clients::http_response::HttpResponse;

/// Suffix of the remaining-calls header.
pub const CALLS_LEFT_SUFFIX: &str = "-Calls-Left";

/// Suffix of the decay header.
pub const DECAY_SUFFIX: &str = "-Decay";

/// A rate-limit window reported by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThrottleScope {
    /// The long-period global window.
    GlobalLongPeriod,
    /// The short-period global window.
    GlobalShortPeriod,
    /// The window of the called route.
    Route,
}

impl ThrottleScope {
    /// All scopes, in evaluation order.
    pub const ALL: [Self; 3] = [Self::GlobalLongPeriod, Self::GlobalShortPeriod, Self::Route];

    /// Returns the header prefix for this scope.
    #[must_use]
    pub const fn header_prefix(self) -> &'static str {
        match self {
            Self::GlobalLongPeriod => "X-Plenty-Global-Long-Period",
            Self::GlobalShortPeriod => "X-Plenty-Global-Short-Period",
            Self::Route => "X-Plenty-Route",
        }
    }
}

/// Calls left and decay of one scope, as read from a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrottleSignal {
    /// Calls left in the current window.
    pub calls_left: i64,
    /// Seconds until the window resets.
    pub decay: i64,
}

impl ThrottleSignal {
    /// Reads the signal of `scope` from `response`.
    ///
    /// Returns `None` unless both headers are present and numeric.
    #[must_use]
    pub fn from_response(response: &HttpResponse, scope: ThrottleScope) -> Option<Self> {
        let prefix = scope.header_prefix();
        let calls_left = response.header(&format!("{prefix}{CALLS_LEFT_SUFFIX}"))?;
        let decay = response.header(&format!("{prefix}{DECAY_SUFFIX}"))?;

        match (calls_left.trim().parse(), decay.trim().parse()) {
            (Ok(calls_left), Ok(decay)) => Some(Self { calls_left, decay }),
            _ => {
                tracing::debug!(
                    "Ignoring non-numeric throttle headers for {}: calls left {:?}, decay {:?}",
                    prefix,
                    calls_left,
                    decay
                );
                None
            }
        }
    }
}

/// A wait the client must perform before returning a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrottleWait {
    /// The exhausted scope.
    pub scope: ThrottleScope,
    /// How many time units to wait.
    pub units: u64,
}

/// Computes the waits required by a response's throttle headers.
///
/// Scopes are evaluated in [`ThrottleScope::ALL`] order. A scope with no
/// calls left requires a wait when its decay exceeds the decay already
/// accounted for by earlier scopes; it then waits the difference and adds
/// its full decay to the running total.
///
/// ```rust
/// use std::collections::HashMap;
/// use plentymarkets_rest::clients::{plan_throttle_waits, HttpResponse, ThrottleScope};
///
/// let mut headers = HashMap::new();
/// for (name, value) in [
///     ("X-Plenty-Global-Long-Period-Calls-Left", "0"),
///     ("X-Plenty-Global-Long-Period-Decay", "10"),
///     ("X-Plenty-Global-Short-Period-Calls-Left", "0"),
///     ("X-Plenty-Global-Short-Period-Decay", "4"),
/// ] {
///     headers.insert(name.to_string(), vec![value.to_string()]);
/// }
///
/// let waits = plan_throttle_waits(&HttpResponse::new(200, headers, Vec::new()));
/// assert_eq!(waits.len(), 1);
/// assert_eq!(waits[0].scope, ThrottleScope::GlobalLongPeriod);
/// assert_eq!(waits[0].units, 10);
/// ```
#[must_use]
pub fn plan_throttle_waits(response: &HttpResponse) -> Vec<ThrottleWait> {
    let mut waits = Vec::new();
    let mut accounted: i64 = 0;

    for scope in ThrottleScope::ALL {
        let Some(signal) = ThrottleSignal::from_response(response, scope) else {
            continue;
        };

        if signal.calls_left < 1 && signal.decay > accounted {
            let units = u64::try_from(signal.decay - accounted).unwrap_or_default();
            waits.push(ThrottleWait { scope, units });
            accounted = accounted.saturating_add(signal.decay);
        }
    }

    waits
}

/// Short-period limit rejections that are retried after a fixed wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShortPeriodLimit {
    /// Too many reads in the short period.
    Read,
    /// Too many writes in the short period.
    Write,
}

impl ShortPeriodLimit {
    /// Message fragment reported for read limit rejections.
    pub const READ_MESSAGE: &'static str = "short period read limit reached";

    /// Message fragment reported for write limit rejections.
    pub const WRITE_MESSAGE: &'static str = "short period write limit reached";

    /// Classifies an error message, ignoring case.
    #[must_use]
    pub fn detect(message: &str) -> Option<Self> {
        let message = message.to_lowercase();
        if message.contains(Self::READ_MESSAGE) {
            Some(Self::Read)
        } else if message.contains(Self::WRITE_MESSAGE) {
            Some(Self::Write)
        } else {
            None
        }
    }
}
