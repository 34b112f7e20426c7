// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reading shapes stored per sensor.

use std::fmt;

use crate::telegram::ImpulseCount;

/// The last whole-house reading from the main meter.
///
/// Holds the three channel wattages of one telegram; the total is their
/// sum. Keeping total and channels as one value means they can never
/// disagree or change independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MainsPower {
    channels: [u32; 3],
}

impl MainsPower {
    /// Creates a whole-house reading from the three channel wattages.
    #[must_use]
    pub const fn new(channels: [u32; 3]) -> Self {
        Self { channels }
    }

    /// Returns the per-channel wattages.
    #[must_use]
    pub const fn channels(&self) -> [u32; 3] {
        self.channels
    }

    /// Returns the wattage of a specific channel.
    ///
    /// # Arguments
    ///
    /// * `channel` - The channel number (1-3)
    ///
    /// # Returns
    ///
    /// Returns `None` if the channel number is out of range.
    #[must_use]
    pub fn channel(&self, channel: u8) -> Option<u32> {
        if channel == 0 || channel > 3 {
            return None;
        }
        Some(self.channels[usize::from(channel - 1)])
    }

    /// Returns the summed wattage across all three channels.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.channels.iter().sum()
    }
}

impl fmt::Display for MainsPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} W", self.total())
    }
}

/// The last reading reported by one appliance sensor.
///
/// An appliance sensor reports either an impulse counter pair or a
/// wattage, depending on its kind; the two shapes are mutually exclusive
/// per index, and a new telegram of either shape replaces whatever was
/// stored before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ApplianceReading {
    /// An impulse counter measurement.
    Impulses {
        /// The impulse count.
        count: u32,
        /// Impulses per unit of energy.
        per_unit: u32,
    },

    /// A direct wattage reading, summed across the sensor's channels.
    Power {
        /// The summed wattage.
        watts: u32,
    },
}

impl ApplianceReading {
    /// Creates an impulse-counter reading.
    #[must_use]
    pub const fn impulses(count: u32, per_unit: u32) -> Self {
        Self::Impulses { count, per_unit }
    }

    /// Creates a wattage reading.
    #[must_use]
    pub const fn power(watts: u32) -> Self {
        Self::Power { watts }
    }

    /// Returns `true` if this is an impulse-counter reading.
    #[must_use]
    pub const fn is_impulses(&self) -> bool {
        matches!(self, Self::Impulses { .. })
    }

    /// Returns `true` if this is a wattage reading.
    #[must_use]
    pub const fn is_power(&self) -> bool {
        matches!(self, Self::Power { .. })
    }

    /// Returns the wattage for power readings, `None` for impulse readings.
    #[must_use]
    pub const fn watts(&self) -> Option<u32> {
        match self {
            Self::Power { watts } => Some(*watts),
            Self::Impulses { .. } => None,
        }
    }
}

impl From<ImpulseCount> for ApplianceReading {
    fn from(impulses: ImpulseCount) -> Self {
        Self::Impulses {
            count: impulses.count(),
            per_unit: impulses.per_unit(),
        }
    }
}

impl fmt::Display for ApplianceReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Impulses { count, per_unit } => {
                write!(f, "{count} impulses ({per_unit} per unit)")
            }
            Self::Power { watts } => write!(f, "{watts} W"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mains_total_is_channel_sum() {
        let mains = MainsPower::new([100, 50, 0]);
        assert_eq!(mains.total(), 150);
        assert_eq!(mains.channels(), [100, 50, 0]);
    }

    #[test]
    fn mains_channel_bounds() {
        let mains = MainsPower::new([100, 50, 25]);
        assert_eq!(mains.channel(0), None);
        assert_eq!(mains.channel(1), Some(100));
        assert_eq!(mains.channel(3), Some(25));
        assert_eq!(mains.channel(4), None);
    }

    #[test]
    fn mains_display() {
        assert_eq!(MainsPower::new([100, 50, 0]).to_string(), "150 W");
    }

    #[test]
    fn reading_shapes() {
        let imp = ApplianceReading::impulses(42, 1000);
        assert!(imp.is_impulses());
        assert!(!imp.is_power());
        assert_eq!(imp.watts(), None);

        let power = ApplianceReading::power(20);
        assert!(power.is_power());
        assert_eq!(power.watts(), Some(20));
    }

    #[test]
    fn reading_from_impulse_count() {
        let reading: ApplianceReading = ImpulseCount::new(42, 1000).into();
        assert_eq!(reading, ApplianceReading::impulses(42, 1000));
    }

    #[test]
    fn reading_display() {
        assert_eq!(ApplianceReading::power(20).to_string(), "20 W");
        assert_eq!(
            ApplianceReading::impulses(42, 1000).to_string(),
            "42 impulses (1000 per unit)"
        );
    }
}
