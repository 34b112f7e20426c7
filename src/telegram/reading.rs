// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed field extraction from a decoded telegram.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;

use crate::types::ApplianceId;

use super::message::{Channel, Telegram};

/// Number of mains channels a monitor reports.
pub(crate) const CHANNELS: usize = 3;

/// An impulse counter measurement.
///
/// Some appliance sensors count meter impulses instead of reporting a
/// wattage. The count only means something together with the
/// impulses-per-unit calibration, so the two values form one measurement:
/// extraction produces either both or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpulseCount {
    count: u32,
    per_unit: u32,
}

impl ImpulseCount {
    /// Creates an impulse measurement.
    #[must_use]
    pub const fn new(count: u32, per_unit: u32) -> Self {
        Self { count, per_unit }
    }

    /// Returns the impulse count.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Returns the number of impulses per unit of energy.
    #[must_use]
    pub const fn per_unit(&self) -> u32 {
        self.per_unit
    }
}

impl fmt::Display for ImpulseCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} impulses ({} per unit)", self.count, self.per_unit)
    }
}

/// The typed fields extracted from one telegram.
///
/// Every member is optional or defaulted: extraction never fails, and a
/// field that is missing or unparseable resolves to its absent/default
/// value without affecting the others. The one exception is the impulse
/// pair, which parses atomically (see [`ImpulseCount`]).
///
/// # Examples
///
/// ```
/// use envir_lib::telegram;
///
/// let reading = telegram::decode("<msg><sensor>3</sensor><ch1><watts>20</watts></ch1></msg>")
///     .unwrap()
///     .reading();
///
/// assert_eq!(reading.appliance().unwrap().value(), 3);
/// assert_eq!(reading.channels(), [20, 0, 0]);
/// assert_eq!(reading.total_watts(), 20);
/// assert!(reading.impulses().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reading {
    appliance: Option<ApplianceId>,
    temperature: Option<f32>,
    impulses: Option<ImpulseCount>,
    channels: [u32; CHANNELS],
    device_time: Option<NaiveTime>,
}

impl Reading {
    /// Returns the appliance sensor index, if present and in range.
    #[must_use]
    pub fn appliance(&self) -> Option<ApplianceId> {
        self.appliance
    }

    /// Returns the ambient temperature in degrees Celsius.
    #[must_use]
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Returns the impulse measurement, if both values parsed.
    #[must_use]
    pub fn impulses(&self) -> Option<ImpulseCount> {
        self.impulses
    }

    /// Returns the per-channel wattages, missing channels as 0.
    #[must_use]
    pub fn channels(&self) -> [u32; CHANNELS] {
        self.channels
    }

    /// Returns the sum of the three channel wattages.
    #[must_use]
    pub fn total_watts(&self) -> u32 {
        self.channels.iter().sum()
    }

    /// Returns the monitor's own clock reading.
    #[must_use]
    pub fn device_time(&self) -> Option<NaiveTime> {
        self.device_time
    }
}

impl Telegram {
    /// Extracts the typed fields from this telegram.
    ///
    /// Each field is looked up independently; a value that is missing or
    /// fails numeric conversion resolves to that field's absent/default
    /// value. The impulse pair is the one exception: if either value
    /// fails to parse, both are treated as absent together.
    #[must_use]
    pub fn reading(&self) -> Reading {
        let impulses = match (parse_field(&self.imp), parse_field(&self.ipu)) {
            (Some(count), Some(per_unit)) => Some(ImpulseCount::new(count, per_unit)),
            _ => None,
        };

        Reading {
            appliance: parse_field::<u8>(&self.sensor)
                .and_then(|value| ApplianceId::new(value).ok()),
            temperature: parse_field(&self.tmpr),
            impulses,
            channels: [
                channel_watts(&self.ch1),
                channel_watts(&self.ch2),
                channel_watts(&self.ch3),
            ],
            device_time: self
                .time
                .as_deref()
                .and_then(|s| NaiveTime::parse_from_str(s.trim(), "%H:%M:%S").ok()),
        }
    }
}

/// Parses an optional raw text field, treating any failure as absence.
fn parse_field<T: FromStr>(raw: &Option<String>) -> Option<T> {
    raw.as_deref().and_then(|s| s.trim().parse().ok())
}

/// Reads a channel's wattage, defaulting to 0 when missing or unparseable.
fn channel_watts(channel: &Option<Channel>) -> u32 {
    channel
        .as_ref()
        .and_then(|c| parse_field(&c.watts))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::decode;

    fn reading_of(line: &str) -> Reading {
        decode(line).unwrap().reading()
    }

    #[test]
    fn extract_main_meter() {
        let reading = reading_of(concat!(
            "<msg><sensor>0</sensor><ch1><watts>100</watts></ch1>",
            "<ch2><watts>50</watts></ch2><ch3><watts>0</watts></ch3></msg>",
        ));

        assert_eq!(reading.appliance(), Some(ApplianceId::MAIN_METER));
        assert_eq!(reading.channels(), [100, 50, 0]);
        assert_eq!(reading.total_watts(), 150);
    }

    #[test]
    fn extract_leading_zero_watts() {
        let reading = reading_of("<msg><ch1><watts>00345</watts></ch1></msg>");
        assert_eq!(reading.channels(), [345, 0, 0]);
    }

    #[test]
    fn extract_impulse_pair() {
        let reading = reading_of("<msg><sensor>3</sensor><imp>42</imp><ipu>1000</ipu></msg>");

        assert_eq!(reading.impulses(), Some(ImpulseCount::new(42, 1000)));
        assert_eq!(reading.total_watts(), 0);
    }

    #[test]
    fn impulse_pair_is_atomic() {
        // A missing or bad half drops the whole measurement.
        let reading = reading_of("<msg><imp>42</imp></msg>");
        assert!(reading.impulses().is_none());

        let reading = reading_of("<msg><imp>42</imp><ipu>x</ipu></msg>");
        assert!(reading.impulses().is_none());

        let reading = reading_of("<msg><imp>no</imp><ipu>1000</ipu></msg>");
        assert!(reading.impulses().is_none());
    }

    #[test]
    fn channels_fail_independently() {
        let reading = reading_of(concat!(
            "<msg><ch1><watts>banana</watts></ch1>",
            "<ch2><watts>50</watts></ch2></msg>",
        ));

        assert_eq!(reading.channels(), [0, 50, 0]);
        assert_eq!(reading.total_watts(), 50);
    }

    #[test]
    fn extract_temperature() {
        let reading = reading_of("<msg><tmpr>18.7</tmpr></msg>");
        assert_eq!(reading.temperature(), Some(18.7));
        assert!(reading.appliance().is_none());
    }

    #[test]
    fn non_numeric_temperature_absent() {
        let reading = reading_of("<msg><tmpr>warm</tmpr></msg>");
        assert!(reading.temperature().is_none());
    }

    #[test]
    fn out_of_range_sensor_absent() {
        let reading = reading_of("<msg><sensor>12</sensor></msg>");
        assert!(reading.appliance().is_none());

        let reading = reading_of("<msg><sensor>-1</sensor></msg>");
        assert!(reading.appliance().is_none());
    }

    #[test]
    fn extract_device_time() {
        let reading = reading_of("<msg><time>13:02:39</time></msg>");
        assert_eq!(
            reading.device_time(),
            NaiveTime::from_hms_opt(13, 2, 39),
        );
    }

    #[test]
    fn bad_device_time_absent() {
        let reading = reading_of("<msg><time>13:02</time></msg>");
        assert!(reading.device_time().is_none());
    }

    #[test]
    fn empty_telegram_yields_defaults() {
        let reading = reading_of("<msg></msg>");
        assert_eq!(reading, Reading::default());
    }

    #[test]
    fn impulse_count_display() {
        assert_eq!(
            ImpulseCount::new(42, 1000).to_string(),
            "42 impulses (1000 per unit)"
        );
    }
}
