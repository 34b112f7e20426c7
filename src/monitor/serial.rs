// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serial port access.

use tokio_serial::{SerialPortBuilderExt, SerialStream};

use crate::config::MonitorConfig;
use crate::error::ConnectionError;

/// Opens the configured serial device.
///
/// CurrentCost monitors speak 8N1 at 57600 baud (older models use 9600
/// or 2400), which is what the builder defaults plus the configured baud
/// rate give us.
pub(crate) fn open(config: &MonitorConfig) -> Result<SerialStream, ConnectionError> {
    let port = tokio_serial::new(config.path(), config.baud_rate()).open_native_async()?;

    tracing::info!(
        path = %config.path(),
        baud_rate = config.baud_rate(),
        "serial port opened"
    );

    Ok(port)
}
