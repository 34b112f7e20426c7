// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Monitor event types.

/// Events emitted by a monitor's stream loop.
///
/// `Updated` is fired once per successfully decoded telegram and carries
/// no payload; subscribers re-read the snapshot. The two terminal events
/// report how the loop ended.
///
/// # Examples
///
/// ```
/// use envir_lib::event::MonitorEvent;
///
/// let event = MonitorEvent::faulted("stream closed by device");
/// assert!(event.is_terminal());
/// assert!(!MonitorEvent::Updated.is_terminal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MonitorEvent {
    /// A telegram was processed and the aggregated state re-published.
    Updated,

    /// The stream loop exited cleanly after a cancellation request.
    Stopped,

    /// The stream loop terminated on a connection failure.
    Faulted {
        /// Description of the failure.
        message: String,
    },
}

impl MonitorEvent {
    /// Creates a faulted event from a connection failure.
    #[must_use]
    pub fn faulted(message: impl Into<String>) -> Self {
        Self::Faulted {
            message: message.into(),
        }
    }

    /// Returns `true` if this event reports a state update.
    #[must_use]
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated)
    }

    /// Returns `true` if this event reports loop termination.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped | Self::Faulted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updated_is_not_terminal() {
        assert!(MonitorEvent::Updated.is_updated());
        assert!(!MonitorEvent::Updated.is_terminal());
    }

    #[test]
    fn stopped_is_terminal() {
        assert!(MonitorEvent::Stopped.is_terminal());
        assert!(!MonitorEvent::Stopped.is_updated());
    }

    #[test]
    fn faulted_carries_message() {
        let event = MonitorEvent::faulted("read failed");
        assert!(event.is_terminal());
        if let MonitorEvent::Faulted { message } = event {
            assert_eq!(message, "read failed");
        } else {
            panic!("Expected Faulted event");
        }
    }
}
