// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Telegram decoding and field extraction.
//!
//! A CurrentCost monitor emits one XML telegram per line:
//!
//! ```text
//! <msg><src>CC128-v0.11</src><time>13:02:39</time><tmpr>18.7</tmpr>
//! <sensor>1</sensor><ch1><watts>00345</watts></ch1></msg>
//! ```
//!
//! Decoding happens in two steps. [`decode`] parses the markup into a
//! [`Telegram`], keeping every field as raw text; only malformed markup
//! fails here. [`Telegram::reading`] then converts the raw fields into a
//! typed [`Reading`], where each conversion failure resolves to that
//! field's absent or default value without affecting the others.
//!
//! # Examples
//!
//! ```
//! use envir_lib::telegram;
//!
//! let line = "<msg><sensor>0</sensor><ch1><watts>00345</watts></ch1></msg>";
//! let reading = telegram::decode(line).unwrap().reading();
//!
//! assert_eq!(reading.channels(), [345, 0, 0]);
//! assert!(reading.appliance().unwrap().is_main_meter());
//! ```

mod message;
mod reading;

pub use message::{Telegram, decode};
pub use reading::{ImpulseCount, Reading};
