// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `envir_lib` library.
//!
//! This module provides the error hierarchy for failures across the
//! library: value validation, telegram decoding, and the serial
//! connection. Absence of an optional telegram field is never an error;
//! it is modeled as `Option` in [`Reading`](crate::telegram::Reading).

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when reading
/// a CurrentCost monitor.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A telegram line could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The serial connection failed.
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// The monitor's stream loop is not running.
    #[error("monitor is not running")]
    NotRunning,
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types or
/// configurations with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An appliance index is outside the range the monitor supports.
    #[error("appliance index {actual} is out of range [0, {max}]")]
    OutOfRange {
        /// Maximum allowed index.
        max: u8,
        /// The actual value that was provided.
        actual: u8,
    },

    /// A baud rate of zero was configured.
    #[error("baud rate must be a positive integer")]
    InvalidBaudRate,

    /// No serial device path was configured.
    #[error("serial device path is required")]
    MissingDevicePath,
}

/// Errors related to decoding one telegram line.
///
/// A decode failure is always local to the offending line: the stream
/// loop logs it, discards the line, and continues with the next one.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The line was empty after stripping whitespace.
    #[error("empty line")]
    Empty,

    /// The line is not well-formed telegram markup.
    #[error("malformed telegram: {0}")]
    Xml(#[from] quick_xml::DeError),
}

/// Errors related to the underlying serial connection.
///
/// Unlike [`DecodeError`], these are fatal to the stream loop: the loop
/// terminates in the faulted state and any restart policy is left to the
/// host.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The serial port could not be opened or configured.
    #[cfg(feature = "serial")]
    #[error("serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    /// Reading from the byte stream failed.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The byte stream reached end-of-file. For a serial device this
    /// means the link went away.
    #[error("stream closed by device")]
    Closed,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
