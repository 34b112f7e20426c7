// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Monitor event notifications.
//!
//! The stream loop publishes a [`MonitorEvent`] on the [`EventBus`] after
//! every successfully processed telegram and when it terminates. Events
//! carry no state payload: subscribers re-read the snapshot via
//! [`Monitor::state`](crate::monitor::Monitor::state).

mod event_bus;
mod monitor_event;

pub use event_bus::EventBus;
pub use monitor_event::MonitorEvent;
