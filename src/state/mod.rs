// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aggregated monitor state.
//!
//! This module provides the long-lived snapshot of everything the monitor
//! has reported. [`MonitorState`] holds whole-house power, per-appliance
//! readings, and the ambient temperature; [`MonitorState::apply`] folds
//! one extracted [`Reading`](crate::telegram::Reading) into it under
//! fixed merge rules.
//!
//! # Examples
//!
//! ```
//! use envir_lib::state::MonitorState;
//! use envir_lib::telegram;
//! use envir_lib::types::ApplianceId;
//!
//! let mut state = MonitorState::new(ApplianceId::all());
//!
//! let reading = telegram::decode(
//!     "<msg><sensor>0</sensor><ch1><watts>100</watts></ch1><ch2><watts>50</watts></ch2></msg>",
//! )
//! .unwrap()
//! .reading();
//!
//! state.apply(&reading);
//! assert_eq!(state.total_power(), Some(150));
//! ```

mod appliance_reading;
mod monitor_state;

pub use appliance_reading::{ApplianceReading, MainsPower};
pub use monitor_state::MonitorState;
