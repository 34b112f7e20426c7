// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw telegram decoding.

use serde::Deserialize;

use crate::error::DecodeError;

/// One decoded telegram line, with field values kept as raw text.
///
/// All fields are optional: which elements a telegram carries depends on
/// the sensor that produced it. Numeric conversion is deferred to
/// [`Telegram::reading`] so that a single bad digit never costs the whole
/// telegram. Elements this library does not use (history blocks, sensor
/// radio ids) are skipped.
///
/// # Examples
///
/// ```
/// use envir_lib::telegram;
///
/// let telegram = telegram::decode(
///     "<msg><src>CC128-v0.11</src><tmpr>18.7</tmpr><sensor>1</sensor></msg>",
/// )
/// .unwrap();
///
/// assert_eq!(telegram.source(), Some("CC128-v0.11"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Telegram {
    /// Monitor model and firmware string.
    #[serde(default)]
    src: Option<String>,

    /// The monitor's own clock, `HH:MM:SS`.
    #[serde(default)]
    pub(crate) time: Option<String>,

    /// Ambient temperature in degrees Celsius.
    #[serde(default)]
    pub(crate) tmpr: Option<String>,

    /// Appliance sensor index.
    #[serde(default)]
    pub(crate) sensor: Option<String>,

    /// Impulse counter.
    #[serde(default)]
    pub(crate) imp: Option<String>,

    /// Impulses per unit of energy.
    #[serde(default)]
    pub(crate) ipu: Option<String>,

    /// Channel 1 wattage element.
    #[serde(default)]
    pub(crate) ch1: Option<Channel>,

    /// Channel 2 wattage element.
    #[serde(default)]
    pub(crate) ch2: Option<Channel>,

    /// Channel 3 wattage element.
    #[serde(default)]
    pub(crate) ch3: Option<Channel>,
}

/// A per-channel sub-element carrying a wattage value.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Channel {
    #[serde(default)]
    pub(crate) watts: Option<String>,
}

impl Telegram {
    /// Returns the monitor model and firmware string, if reported.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.src.as_deref()
    }
}

/// Decodes one line of telegram markup.
///
/// The line is expected to be UTF-8 text with its terminator already
/// stripped; surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`DecodeError`] if the line is empty or is not well-formed
/// markup. A decode failure never carries across lines: the caller logs
/// it, discards the line, and continues with the next one.
///
/// # Examples
///
/// ```
/// use envir_lib::telegram;
///
/// assert!(telegram::decode("<msg><sensor>2</sensor></msg>").is_ok());
/// assert!(telegram::decode("garbage not xml").is_err());
/// assert!(telegram::decode("").is_err());
/// ```
pub fn decode(line: &str) -> Result<Telegram, DecodeError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(DecodeError::Empty);
    }
    quick_xml::de::from_str(line).map_err(DecodeError::Xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_full_telegram() {
        let telegram = decode(concat!(
            "<msg><src>CC128-v0.11</src><dsb>00089</dsb><time>13:02:39</time>",
            "<tmpr>18.7</tmpr><sensor>1</sensor><id>01234</id><type>1</type>",
            "<ch1><watts>00345</watts></ch1><ch2><watts>02</watts></ch2>",
            "<ch3><watts>0</watts></ch3></msg>",
        ))
        .unwrap();

        assert_eq!(telegram.source(), Some("CC128-v0.11"));
        assert_eq!(telegram.time.as_deref(), Some("13:02:39"));
        assert_eq!(telegram.tmpr.as_deref(), Some("18.7"));
        assert_eq!(telegram.sensor.as_deref(), Some("1"));
        assert_eq!(
            telegram.ch1.as_ref().and_then(|c| c.watts.as_deref()),
            Some("00345")
        );
    }

    #[test]
    fn decode_sparse_telegram() {
        let telegram = decode("<msg><tmpr>21.5</tmpr></msg>").unwrap();

        assert_eq!(telegram.tmpr.as_deref(), Some("21.5"));
        assert!(telegram.sensor.is_none());
        assert!(telegram.imp.is_none());
        assert!(telegram.ch1.is_none());
    }

    #[test]
    fn decode_impulse_telegram() {
        let telegram =
            decode("<msg><sensor>3</sensor><imp>42</imp><ipu>1000</ipu></msg>").unwrap();

        assert_eq!(telegram.imp.as_deref(), Some("42"));
        assert_eq!(telegram.ipu.as_deref(), Some("1000"));
    }

    #[test]
    fn decode_keeps_non_numeric_text() {
        // Bad digits are a concern for extraction, not decoding.
        let telegram = decode("<msg><sensor>abc</sensor></msg>").unwrap();
        assert_eq!(telegram.sensor.as_deref(), Some("abc"));
    }

    #[test]
    fn decode_unknown_elements_skipped() {
        let telegram = decode("<msg><hist><dsw>123</dsw></hist><sensor>0</sensor></msg>").unwrap();
        assert_eq!(telegram.sensor.as_deref(), Some("0"));
    }

    #[test]
    fn decode_surrounding_whitespace() {
        let telegram = decode("  <msg><sensor>2</sensor></msg>\r").unwrap();
        assert_eq!(telegram.sensor.as_deref(), Some("2"));
    }

    #[test]
    fn decode_empty_line() {
        assert!(matches!(decode(""), Err(DecodeError::Empty)));
        assert!(matches!(decode("   \r"), Err(DecodeError::Empty)));
    }

    #[test]
    fn decode_garbage() {
        assert!(decode("garbage not xml").is_err());
    }

    #[test]
    fn decode_truncated_markup() {
        assert!(decode("<msg><sensor>3</sensor>").is_err());
        assert!(decode("<msg><ch1><watts>100</watts>").is_err());
    }

    #[test]
    fn decode_binary_garbage() {
        assert!(decode("\u{1}\u{2}\u{fffd}\u{fffd}").is_err());
    }
}
