// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The read-decode-extract-aggregate loop.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::watch;

use crate::error::ConnectionError;
use crate::event::{EventBus, MonitorEvent};
use crate::state::MonitorState;
use crate::telegram;

use super::MonitorStatus;

/// Everything the loop shares with its [`Monitor`](super::Monitor).
pub(crate) struct StreamContext {
    pub(crate) state: Arc<RwLock<MonitorState>>,
    pub(crate) status: Arc<RwLock<MonitorStatus>>,
    pub(crate) events: EventBus,
}

/// Drives the unbounded read/process cycle until cancellation or a
/// connection failure.
///
/// Per-line decode failures are logged and skipped; only I/O failures
/// (including end-of-file, which for a serial device means the link went
/// away) terminate the loop. Cancellation interrupts a pending read via
/// `select!`, so shutdown does not wait for the device to speak.
pub(crate) async fn run<R>(
    ctx: StreamContext,
    reader: R,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), ConnectionError>
where
    R: AsyncRead + Unpin,
{
    *ctx.status.write() = MonitorStatus::Running;
    tracing::info!("stream loop started");

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        tokio::select! {
            changed = shutdown.changed() => {
                // A closed channel means the monitor itself was dropped.
                if changed.is_err() || *shutdown.borrow() {
                    *ctx.status.write() = MonitorStatus::Stopped;
                    ctx.events.publish(MonitorEvent::Stopped);
                    tracing::info!("stream loop stopped");
                    return Ok(());
                }
            }
            read = reader.read_until(b'\n', &mut buf) => match read {
                Ok(0) => {
                    let error = ConnectionError::Closed;
                    fault(&ctx, &error);
                    return Err(error);
                }
                Ok(_) => {
                    // Telegrams are expected to be UTF-8, but a noisy
                    // line must stay a per-line problem: mangled bytes
                    // become replacement characters and fail decoding.
                    let line = String::from_utf8_lossy(&buf);
                    process_line(&ctx, line.trim());
                }
                Err(error) => {
                    let error = ConnectionError::Io(error);
                    fault(&ctx, &error);
                    return Err(error);
                }
            }
        }
    }
}

/// Decodes, extracts, and aggregates one line.
///
/// Decode failures are reported and the line discarded; the aggregated
/// state is untouched and no event is published.
fn process_line(ctx: &StreamContext, line: &str) {
    tracing::debug!(line, "line received");

    let telegram = match telegram::decode(line) {
        Ok(telegram) => telegram,
        Err(error) => {
            tracing::warn!(%error, line, "discarding undecodable line");
            return;
        }
    };

    let reading = telegram.reading();
    let changed = ctx.state.write().apply(&reading);
    tracing::trace!(changed, "telegram applied");

    ctx.events.publish(MonitorEvent::Updated);
}

/// Marks the loop faulted and tells subscribers why.
fn fault(ctx: &StreamContext, error: &ConnectionError) {
    tracing::error!(%error, "stream loop faulted");
    *ctx.status.write() = MonitorStatus::Faulted;
    ctx.events.publish(MonitorEvent::faulted(error.to_string()));
}
