// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Monitor connection configuration.

use std::collections::BTreeSet;

use crate::error::ValueError;
use crate::types::ApplianceId;

/// Baud rate CurrentCost monitors use out of the box.
pub const DEFAULT_BAUD_RATE: u32 = 57600;

/// Configuration for a monitor connection.
///
/// Carries the serial device path, the baud rate, and the set of
/// appliance indices to pre-seed in the aggregated state. The tracked
/// set only affects pre-seeding: telegrams from untracked indices are
/// still merged when they arrive.
///
/// # Examples
///
/// ```
/// use envir_lib::{ApplianceId, MonitorConfig};
///
/// // Defaults: 57600 baud, all ten indices tracked
/// let config = MonitorConfig::new("/dev/ttyUSB0");
/// assert_eq!(config.baud_rate(), 57600);
/// assert_eq!(config.tracked().len(), 10);
///
/// // Track a subset of appliances
/// let config = MonitorConfig::new("/dev/ttyUSB0")
///     .with_baud_rate(9600)
///     .with_tracked([ApplianceId::new(1).unwrap(), ApplianceId::new(3).unwrap()]);
/// assert_eq!(config.tracked().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    path: String,
    baud_rate: u32,
    tracked: BTreeSet<ApplianceId>,
}

impl MonitorConfig {
    /// Creates a configuration for the given serial device path.
    ///
    /// The baud rate defaults to [`DEFAULT_BAUD_RATE`] and all ten
    /// appliance indices are tracked.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            tracked: ApplianceId::all().collect(),
        }
    }

    /// Sets the baud rate.
    #[must_use]
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Sets the tracked appliance indices, replacing the default set.
    #[must_use]
    pub fn with_tracked(mut self, tracked: impl IntoIterator<Item = ApplianceId>) -> Self {
        self.tracked = tracked.into_iter().collect();
        self
    }

    /// Returns the serial device path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the configured baud rate.
    #[must_use]
    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    /// Returns the tracked appliance indices.
    #[must_use]
    pub fn tracked(&self) -> &BTreeSet<ApplianceId> {
        &self.tracked
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the device path is empty or the baud rate
    /// is zero.
    pub fn validate(&self) -> Result<(), ValueError> {
        if self.path.is_empty() {
            return Err(ValueError::MissingDevicePath);
        }
        if self.baud_rate == 0 {
            return Err(ValueError::InvalidBaudRate);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MonitorConfig::new("/dev/ttyUSB0");
        assert_eq!(config.path(), "/dev/ttyUSB0");
        assert_eq!(config.baud_rate(), DEFAULT_BAUD_RATE);
        assert_eq!(config.tracked().len(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn with_baud_rate() {
        let config = MonitorConfig::new("/dev/ttyUSB0").with_baud_rate(2400);
        assert_eq!(config.baud_rate(), 2400);
    }

    #[test]
    fn with_tracked_subset() {
        let config =
            MonitorConfig::new("/dev/ttyUSB0").with_tracked([ApplianceId::new(2).unwrap()]);
        assert_eq!(config.tracked().len(), 1);
        assert!(config.tracked().contains(&ApplianceId::new(2).unwrap()));
    }

    #[test]
    fn empty_path_rejected() {
        let config = MonitorConfig::new("");
        assert!(matches!(
            config.validate(),
            Err(ValueError::MissingDevicePath)
        ));
    }

    #[test]
    fn zero_baud_rate_rejected() {
        let config = MonitorConfig::new("/dev/ttyUSB0").with_baud_rate(0);
        assert!(matches!(config.validate(), Err(ValueError::InvalidBaudRate)));
    }
}
