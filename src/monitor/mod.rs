// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The monitor facade and its background stream loop.
//!
//! A [`Monitor`] owns exactly one connection and the state it aggregates
//! into. The stream loop runs as a long-lived tokio task that suspends
//! while waiting for the next complete line; consumers read cloned
//! snapshots via [`Monitor::state`] and learn about updates through
//! [`Monitor::subscribe`].
//!
//! # Lifecycle
//!
//! ```text
//! Idle -> Connected -> Running -> Stopped   (explicit cancellation)
//!                              -> Faulted   (connection failure)
//! ```
//!
//! Decode failures never terminate the loop; only connection failures
//! do, and the host owns any restart policy.
//!
//! # Examples
//!
//! ```no_run
//! use envir_lib::{Monitor, MonitorConfig};
//!
//! # async fn example() -> envir_lib::Result<()> {
//! let monitor = Monitor::start(MonitorConfig::new("/dev/ttyUSB0"))?;
//!
//! let mut events = monitor.subscribe();
//! while let Ok(event) = events.recv().await {
//!     if event.is_terminal() {
//!         break;
//!     }
//!     println!("total: {:?} W", monitor.state().total_power());
//! }
//!
//! monitor.stop().await?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "serial")]
mod serial;
mod stream;

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::io::AsyncRead;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::config::MonitorConfig;
use crate::error::{ConnectionError, Error, Result};
use crate::event::{EventBus, MonitorEvent};
use crate::state::MonitorState;

/// Lifecycle state of a monitor's stream loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonitorStatus {
    /// No input source has been attached yet.
    #[default]
    Idle,

    /// The input source is open; the loop has not started polling.
    Connected,

    /// The loop is reading and aggregating telegrams.
    Running,

    /// The loop exited cleanly after a cancellation request.
    Stopped,

    /// The loop terminated on a connection failure. No automatic
    /// restart; reconnection policy belongs to the host.
    Faulted,
}

/// A running connection to one energy monitor.
///
/// Create one with [`Monitor::start`] (serial device) or
/// [`Monitor::attach`] (any byte stream). The aggregated state is owned
/// by the background loop; [`state`](Self::state) returns a snapshot and
/// [`subscribe`](Self::subscribe) delivers a [`MonitorEvent::Updated`]
/// for every processed telegram.
#[derive(Debug)]
pub struct Monitor {
    config: MonitorConfig,
    state: Arc<RwLock<MonitorState>>,
    status: Arc<RwLock<MonitorStatus>>,
    events: EventBus,
    shutdown_tx: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<std::result::Result<(), ConnectionError>>>>,
}

impl Monitor {
    /// Opens the configured serial device and starts the stream loop.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the serial
    /// port cannot be opened.
    #[cfg(feature = "serial")]
    pub fn start(config: MonitorConfig) -> Result<Self> {
        config.validate()?;
        let port = serial::open(&config).map_err(Error::Connection)?;
        Ok(Self::spawn(config, port))
    }

    /// Starts the stream loop over an arbitrary byte stream.
    ///
    /// This is the seam below the serial transport: anything that yields
    /// telegram lines works (a pty, a pipe, a replay file, a test
    /// duplex). The configured device path and baud rate are not used
    /// here; only the tracked set matters.
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach<R>(config: MonitorConfig, reader: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        Self::spawn(config, reader)
    }

    fn spawn<R>(config: MonitorConfig, reader: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let state = Arc::new(RwLock::new(MonitorState::new(
            config.tracked().iter().copied(),
        )));
        let status = Arc::new(RwLock::new(MonitorStatus::Connected));
        let events = EventBus::new();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let ctx = stream::StreamContext {
            state: Arc::clone(&state),
            status: Arc::clone(&status),
            events: events.clone(),
        };
        let task = tokio::spawn(stream::run(ctx, reader, shutdown_rx));

        Self {
            config,
            state,
            status,
            events,
            shutdown_tx,
            task: Mutex::new(Some(task)),
        }
    }

    /// Returns the configuration this monitor was started with.
    #[must_use]
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Returns a snapshot of the aggregated state.
    ///
    /// The snapshot is taken under the state lock, so it never observes
    /// a telegram half-applied.
    #[must_use]
    pub fn state(&self) -> MonitorState {
        self.state.read().clone()
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub fn status(&self) -> MonitorStatus {
        *self.status.read()
    }

    /// Returns `true` while the stream loop is reading telegrams.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status() == MonitorStatus::Running
    }

    /// Subscribes to monitor events.
    ///
    /// [`MonitorEvent::Updated`] fires once per successfully decoded
    /// telegram; [`MonitorEvent::Stopped`] and [`MonitorEvent::Faulted`]
    /// report loop termination.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.events.subscribe()
    }

    /// Requests cancellation and awaits clean shutdown.
    ///
    /// A pending read is interrupted promptly; the aggregated state is
    /// left as last aggregated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRunning`] if the loop was already stopped,
    /// and the underlying [`ConnectionError`] if the loop had faulted
    /// before the request.
    pub async fn stop(&self) -> Result<()> {
        let Some(task) = self.task.lock().take() else {
            return Err(Error::NotRunning);
        };

        // Ignore send errors - the loop may already have exited
        let _ = self.shutdown_tx.send(true);

        match task.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(error)) => Err(Error::Connection(error)),
            Err(join_error) => Err(Error::Connection(ConnectionError::Io(
                std::io::Error::other(join_error),
            ))),
        }
    }
}
