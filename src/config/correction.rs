// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-light correction records.

use serde::{Deserialize, Serialize};

use crate::types::LightId;

use super::defaults;

/// Corrections applied to one light after the time-based computation.
///
/// A record is an immutable value: edits build a new record and replace the
/// old one as a whole, so a computation never observes a half-updated light.
///
/// # Examples
///
/// ```
/// use sunlit::config::LightCorrection;
///
/// let desk = LightCorrection::new("light.desk")
///     .with_color_temp_range(2200, 6000)
///     .with_white_balance_offset(-150)
///     .with_brightness_factor(0.8);
///
/// assert_eq!(desk.light_id, "light.desk");
/// assert!(desk.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightCorrection {
    /// The light this record applies to.
    #[serde(alias = "entity_id")]
    pub light_id: LightId,
    /// Per-light warm bound in Kelvin (global bound if `None`).
    #[serde(default = "defaults::light_min_color_temp")]
    pub min_color_temp: Option<u16>,
    /// Per-light cool bound in Kelvin (global bound if `None`).
    #[serde(default = "defaults::light_max_color_temp")]
    pub max_color_temp: Option<u16>,
    /// Per-light lowest brightness (global bound if `None`).
    #[serde(default)]
    pub min_brightness: Option<u8>,
    /// Per-light highest brightness (global bound if `None`).
    #[serde(default)]
    pub max_brightness: Option<u8>,
    /// Kelvin shift applied after the time-based color temperature.
    #[serde(default)]
    pub white_balance_offset: i32,
    /// Multiplier applied after the time-based brightness.
    #[serde(default = "defaults::brightness_factor")]
    pub brightness_factor: f64,
    /// Whether the light takes part in adaptive computation.
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,
}

impl LightCorrection {
    /// Creates an enabled correction with no offsets and the global bounds.
    #[must_use]
    pub fn new(light_id: impl Into<LightId>) -> Self {
        Self {
            light_id: light_id.into(),
            min_color_temp: None,
            max_color_temp: None,
            min_brightness: None,
            max_brightness: None,
            white_balance_offset: defaults::WHITE_BALANCE_OFFSET,
            brightness_factor: defaults::BRIGHTNESS_FACTOR,
            enabled: true,
        }
    }

    /// The record used for a light with no configuration.
    ///
    /// Same as [`new`](Self::new) but excluded from adaptive commands.
    #[must_use]
    pub fn unconfigured(light_id: impl Into<LightId>) -> Self {
        Self::new(light_id).with_enabled(false)
    }

    /// Sets the per-light color temperature range in Kelvin.
    #[must_use]
    pub fn with_color_temp_range(mut self, min: u16, max: u16) -> Self {
        self.min_color_temp = Some(min);
        self.max_color_temp = Some(max);
        self
    }

    /// Sets the per-light brightness range.
    #[must_use]
    pub fn with_brightness_range(mut self, min: u8, max: u8) -> Self {
        self.min_brightness = Some(min);
        self.max_brightness = Some(max);
        self
    }

    /// Sets the white balance offset in Kelvin.
    #[must_use]
    pub fn with_white_balance_offset(mut self, offset: i32) -> Self {
        self.white_balance_offset = offset;
        self
    }

    /// Sets the brightness factor.
    #[must_use]
    pub fn with_brightness_factor(mut self, factor: f64) -> Self {
        self.brightness_factor = factor;
        self
    }

    /// Enables or disables adaptive computation for this light.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}
