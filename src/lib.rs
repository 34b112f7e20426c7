// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `EnviR` Lib - A Rust library to read CurrentCost energy monitors.
//!
//! This library reads the line-delimited XML telegrams a CurrentCost
//! EnviR-style household energy monitor emits over its serial link and
//! maintains a live, queryable snapshot of whole-house power draw,
//! per-appliance readings, and ambient temperature.
//!
//! # Supported Features
//!
//! - **Whole-house power**: Three-channel mains wattage from the main
//!   meter (sensor 0) with the summed total
//! - **Appliance monitors**: Per-sensor readings (1-9), as either an
//!   impulse counter pair or a wattage
//! - **Ambient temperature**: The monitor's built-in thermometer
//! - **Fault tolerance**: Malformed or partial telegrams are discarded
//!   without losing the stream
//! - **Change notifications**: A broadcast event per processed telegram
//!
//! # Quick Start
//!
//! ## Reading a serial device
//!
//! ```no_run
//! use envir_lib::{Monitor, MonitorConfig};
//!
//! #[tokio::main]
//! async fn main() -> envir_lib::Result<()> {
//!     // 57600 baud, all ten sensor indices tracked
//!     let monitor = Monitor::start(MonitorConfig::new("/dev/ttyUSB0"))?;
//!
//!     let mut events = monitor.subscribe();
//!     while let Ok(event) = events.recv().await {
//!         if event.is_terminal() {
//!             break;
//!         }
//!         let state = monitor.state();
//!         println!(
//!             "total: {:?} W, temperature: {:?} C",
//!             state.total_power(),
//!             state.temperature()
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Driving the loop from any byte stream
//!
//! The stream loop is not tied to a serial port: [`Monitor::attach`]
//! accepts anything that yields telegram lines.
//!
//! ```
//! use envir_lib::{Monitor, MonitorConfig, MonitorEvent};
//! use tokio::io::AsyncWriteExt;
//!
//! #[tokio::main]
//! async fn main() -> envir_lib::Result<()> {
//!     let (mut tx, rx) = tokio::io::duplex(256);
//!     let monitor = Monitor::attach(MonitorConfig::new("replay"), rx);
//!     let mut events = monitor.subscribe();
//!
//!     tx.write_all(b"<msg><sensor>0</sensor><ch1><watts>345</watts></ch1></msg>\r\n")
//!         .await
//!         .expect("pipe closed");
//!
//!     assert_eq!(events.recv().await, Ok(MonitorEvent::Updated));
//!     assert_eq!(monitor.state().total_power(), Some(345));
//!
//!     monitor.stop().await
//! }
//! ```
//!
//! ## Decoding telegrams directly
//!
//! ```
//! use envir_lib::telegram;
//!
//! let reading = telegram::decode("<msg><sensor>3</sensor><imp>42</imp><ipu>1000</ipu></msg>")
//!     .unwrap()
//!     .reading();
//!
//! assert_eq!(reading.impulses().unwrap().count(), 42);
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod monitor;
pub mod state;
pub mod telegram;
pub mod types;

pub use config::{DEFAULT_BAUD_RATE, MonitorConfig};
pub use error::{ConnectionError, DecodeError, Error, Result, ValueError};
pub use event::{EventBus, MonitorEvent};
pub use monitor::{Monitor, MonitorStatus};
pub use state::{ApplianceReading, MainsPower, MonitorState};
pub use telegram::{ImpulseCount, Reading, Telegram, decode};
pub use types::ApplianceId;
