// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance sensor index type.
//!
//! CurrentCost monitors address up to ten sensors, numbered 0-9. Index 0
//! is the whole-house ("main meter") sensor; 1-9 are individual appliance
//! monitors.

use std::fmt;

use crate::error::ValueError;

/// An appliance sensor index (0-9).
///
/// Index 0 is the distinguished main-meter sensor reporting whole-house
/// power across three channels. Indices 1-9 are individual appliance
/// monitors, reporting either an impulse counter pair or a wattage.
///
/// # Examples
///
/// ```
/// use envir_lib::types::ApplianceId;
///
/// let id = ApplianceId::new(3).unwrap();
/// assert_eq!(id.value(), 3);
/// assert!(!id.is_main_meter());
///
/// assert!(ApplianceId::MAIN_METER.is_main_meter());
///
/// // Out-of-range indices return an error
/// assert!(ApplianceId::new(10).is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct ApplianceId(u8);

impl ApplianceId {
    /// The main-meter sensor index (0).
    pub const MAIN_METER: Self = Self(0);

    /// Highest addressable sensor index.
    pub const MAX: u8 = 9;

    /// Creates a new appliance index.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the value exceeds 9.
    ///
    /// # Examples
    ///
    /// ```
    /// use envir_lib::types::ApplianceId;
    ///
    /// let id = ApplianceId::new(5).unwrap();
    /// assert_eq!(id.value(), 5);
    /// ```
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > Self::MAX {
            return Err(ValueError::OutOfRange {
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw index value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` if this is the main-meter index.
    #[must_use]
    pub const fn is_main_meter(&self) -> bool {
        self.0 == 0
    }

    /// Returns an iterator over every valid index, 0 through 9.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }
}

impl fmt::Display for ApplianceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for ApplianceId {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApplianceId> for u8 {
    fn from(id: ApplianceId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_indices() {
        for v in 0..=9 {
            let id = ApplianceId::new(v).unwrap();
            assert_eq!(id.value(), v);
        }
    }

    #[test]
    fn invalid_index() {
        let result = ApplianceId::new(10);
        assert!(matches!(
            result,
            Err(ValueError::OutOfRange { max: 9, actual: 10 })
        ));
    }

    #[test]
    fn main_meter() {
        assert!(ApplianceId::MAIN_METER.is_main_meter());
        assert!(!ApplianceId::new(1).unwrap().is_main_meter());
        assert_eq!(ApplianceId::new(0).unwrap(), ApplianceId::MAIN_METER);
    }

    #[test]
    fn all_yields_ten_indices() {
        let all: Vec<_> = ApplianceId::all().collect();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0], ApplianceId::MAIN_METER);
        assert_eq!(all[9].value(), 9);
    }

    #[test]
    fn display() {
        assert_eq!(ApplianceId::new(7).unwrap().to_string(), "7");
    }

    #[test]
    fn ordering() {
        assert!(ApplianceId::MAIN_METER < ApplianceId::new(9).unwrap());
    }
}
