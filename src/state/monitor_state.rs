// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The aggregated monitor snapshot.

use std::collections::BTreeMap;

use chrono::NaiveTime;

use crate::telegram::Reading;
use crate::types::ApplianceId;

use super::{ApplianceReading, MainsPower};

/// The aggregated state of one monitor.
///
/// Created once when the stream starts and mutated in place by
/// [`apply`](Self::apply) for every successfully extracted telegram.
/// Consumers read cloned snapshots; the stream loop is the only writer.
///
/// Appliance entries are pre-seeded as `None` for every tracked index so
/// consumers can distinguish "not yet reported" from "zero". The tracked
/// set only affects pre-seeding: a telegram from an untracked index is
/// still merged when it arrives.
///
/// # Examples
///
/// ```
/// use envir_lib::state::MonitorState;
/// use envir_lib::types::ApplianceId;
///
/// let state = MonitorState::new(ApplianceId::all());
///
/// // Nothing reported yet
/// assert!(state.total_power().is_none());
/// assert!(state.temperature().is_none());
/// assert!(state.appliance(ApplianceId::new(3).unwrap()).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MonitorState {
    mains: Option<MainsPower>,
    temperature: Option<f32>,
    device_time: Option<NaiveTime>,
    appliances: BTreeMap<ApplianceId, Option<ApplianceReading>>,
}

impl MonitorState {
    /// Creates an empty state, pre-seeded for the tracked indices.
    ///
    /// The main-meter index is never seeded into the appliance map; its
    /// reading lives in [`mains`](Self::mains) instead.
    #[must_use]
    pub fn new(tracked: impl IntoIterator<Item = ApplianceId>) -> Self {
        Self {
            mains: None,
            temperature: None,
            device_time: None,
            appliances: tracked
                .into_iter()
                .filter(|id| !id.is_main_meter())
                .map(|id| (id, None))
                .collect(),
        }
    }

    /// Returns the last whole-house reading, if the main meter has
    /// reported.
    #[must_use]
    pub fn mains(&self) -> Option<&MainsPower> {
        self.mains.as_ref()
    }

    /// Returns the last known whole-house wattage.
    #[must_use]
    pub fn total_power(&self) -> Option<u32> {
        self.mains.map(|m| m.total())
    }

    /// Returns the last known per-channel wattages.
    #[must_use]
    pub fn channel_power(&self) -> Option<[u32; 3]> {
        self.mains.map(|m| m.channels())
    }

    /// Returns the last known ambient temperature in degrees Celsius.
    #[must_use]
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Returns the monitor's last reported clock value.
    #[must_use]
    pub fn device_time(&self) -> Option<NaiveTime> {
        self.device_time
    }

    /// Returns the last reading for an appliance index.
    ///
    /// Returns `None` both for indices that have not reported yet and
    /// for indices absent from the map; use [`is_seeded`](Self::is_seeded)
    /// to tell the two apart.
    #[must_use]
    pub fn appliance(&self, id: ApplianceId) -> Option<&ApplianceReading> {
        self.appliances.get(&id).and_then(Option::as_ref)
    }

    /// Returns `true` if the index has an entry in the map, reported or
    /// not.
    #[must_use]
    pub fn is_seeded(&self, id: ApplianceId) -> bool {
        self.appliances.contains_key(&id)
    }

    /// Iterates over every appliance entry, in index order.
    pub fn appliances(
        &self,
    ) -> impl Iterator<Item = (ApplianceId, Option<&ApplianceReading>)> {
        self.appliances.iter().map(|(id, r)| (*id, r.as_ref()))
    }

    /// Folds one extracted reading into the state.
    ///
    /// Merge rules:
    ///
    /// - Appliance index 0 (main meter): replace the whole-house reading
    ///   with the telegram's three channel wattages, regardless of any
    ///   impulse data.
    /// - Any other index: store the impulse pair if present, otherwise
    ///   the summed channel wattage. Either shape overwrites the other.
    ///   Untracked indices are inserted on first sight.
    /// - Temperature and device time, when present, overwrite the stored
    ///   values independently of the appliance index.
    /// - A field absent from the reading never clears an existing entry.
    ///
    /// # Returns
    ///
    /// Returns `true` if any stored value actually changed.
    pub fn apply(&mut self, reading: &Reading) -> bool {
        let mut changed = false;

        if let Some(id) = reading.appliance() {
            if id.is_main_meter() {
                let mains = MainsPower::new(reading.channels());
                if self.mains != Some(mains) {
                    self.mains = Some(mains);
                    changed = true;
                }
            } else {
                let entry = match reading.impulses() {
                    Some(impulses) => impulses.into(),
                    None => ApplianceReading::power(reading.total_watts()),
                };
                let slot = self.appliances.entry(id).or_insert(None);
                if *slot != Some(entry) {
                    *slot = Some(entry);
                    changed = true;
                }
            }
        }

        if let Some(temperature) = reading.temperature()
            && self.temperature != Some(temperature)
        {
            self.temperature = Some(temperature);
            changed = true;
        }

        if let Some(time) = reading.device_time()
            && self.device_time != Some(time)
        {
            self.device_time = Some(time);
            changed = true;
        }

        changed
    }
}
