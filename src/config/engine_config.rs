// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The configuration snapshot read by the engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::solar::Location;
use crate::types::LightId;

use super::validation::{Violation, validate};
use super::{GlobalBounds, LightCorrection};

/// Location, global bounds and the table of per-light corrections.
///
/// Records are kept in configuration order with a lookup index by light id.
/// The engine holds the snapshot behind an `Arc` and swaps it wholesale on
/// edit.
///
/// # Examples
///
/// ```
/// use sunlit::config::{EngineConfig, GlobalBounds, LightCorrection};
/// use sunlit::solar::Location;
///
/// let config = EngineConfig::new(Location::new(48.85, 2.35, "Europe/Paris").unwrap())
///     .with_bounds(GlobalBounds::default().with_brightness_range(20, 255))
///     .with_light(LightCorrection::new("light.kitchen"))
///     .with_light(LightCorrection::new("light.bedroom").with_brightness_factor(0.6));
///
/// assert_eq!(config.lights().len(), 2);
/// assert!(config.light("light.bedroom").is_some());
/// assert!(config.validate().is_empty());
/// ```
///
/// Loading from JSON:
///
/// ```
/// use sunlit::config::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{
///     "location": {"latitude": 52.52, "longitude": 13.40, "time_zone": "Europe/Berlin"},
///     "max_brightness": 230,
///     "lights": [
///         {"entity_id": "light.hall", "white_balance_offset": 150}
///     ]
/// }"#).unwrap();
///
/// assert_eq!(config.bounds().max_brightness, 230);
/// assert_eq!(config.light("light.hall").unwrap().white_balance_offset, 150);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEngineConfig")]
pub struct EngineConfig {
    location: Location,
    #[serde(flatten)]
    bounds: GlobalBounds,
    lights: Vec<LightCorrection>,
    #[serde(skip)]
    index: HashMap<LightId, usize>,
}

impl EngineConfig {
    /// Creates a configuration with default bounds and no lights.
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self {
            location,
            bounds: GlobalBounds::default(),
            lights: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the JSON is malformed or the location is
    /// invalid. Out-of-range bounds are accepted and reported by
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        tracing::debug!(
            lights = config.lights.len(),
            time_zone = config.location.time_zone(),
            "Loaded adaptive lighting configuration"
        );
        Ok(config)
    }

    /// Sets the global bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: GlobalBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Adds a light correction, replacing any record with the same id.
    #[must_use]
    pub fn with_light(mut self, correction: LightCorrection) -> Self {
        self.upsert_light(correction);
        self
    }

    /// Returns the location.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the global bounds.
    #[must_use]
    pub fn bounds(&self) -> &GlobalBounds {
        &self.bounds
    }

    /// Returns all light corrections in configuration order.
    #[must_use]
    pub fn lights(&self) -> &[LightCorrection] {
        &self.lights
    }

    /// Looks up the correction for a light.
    #[must_use]
    pub fn light(&self, light_id: &str) -> Option<&LightCorrection> {
        self.index.get(light_id).map(|&i| &self.lights[i])
    }

    /// Returns the configured light ids in configuration order.
    #[must_use]
    pub fn light_ids(&self) -> Vec<LightId> {
        self.lights.iter().map(|c| c.light_id.clone()).collect()
    }

    /// Enumerates every invariant violation without stopping at the first.
    #[must_use]
    pub fn validate(&self) -> Vec<Violation> {
        validate(self)
    }

    /// Inserts or replaces a whole record.
    pub(crate) fn upsert_light(&mut self, correction: LightCorrection) {
        if let Some(&i) = self.index.get(&correction.light_id) {
            self.lights[i] = correction;
        } else {
            self.index
                .insert(correction.light_id.clone(), self.lights.len());
            self.lights.push(correction);
        }
    }

    /// Removes a record, returning it if present.
    pub(crate) fn remove_light(&mut self, light_id: &str) -> Option<LightCorrection> {
        let i = self.index.remove(light_id)?;
        let removed = self.lights.remove(i);
        self.rebuild_index();
        Some(removed)
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .lights
            .iter()
            .enumerate()
            .map(|(i, c)| (c.light_id.clone(), i))
            .collect();
    }
}

#[derive(Deserialize)]
struct RawEngineConfig {
    location: Location,
    #[serde(flatten)]
    bounds: GlobalBounds,
    #[serde(default)]
    lights: Vec<LightCorrection>,
}

impl From<RawEngineConfig> for EngineConfig {
    fn from(raw: RawEngineConfig) -> Self {
        let mut config = Self::new(raw.location).with_bounds(raw.bounds);
        for correction in raw.lights {
            config.upsert_light(correction);
        }
        config
    }
}
