// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for CurrentCost telemetry.
//!
//! This module provides type-safe representations of values that appear
//! in monitor telegrams. Each type ensures values are within their valid
//! ranges at construction time, preventing runtime errors.
//!
//! # Types
//!
//! - [`ApplianceId`] - Appliance sensor index (0-9), where 0 is the main meter

mod appliance;

pub use appliance::ApplianceId;
