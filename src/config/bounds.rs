// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output bounds for brightness and color temperature.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, ColorTemp};

use super::defaults;
use super::LightCorrection;

/// Default output range for every light without a per-light override.
///
/// Fields hold raw configured values so that invalid configurations can be
/// represented and reported by validation instead of being rejected at load
/// time.
///
/// # Examples
///
/// ```
/// use sunlit::config::GlobalBounds;
///
/// let bounds = GlobalBounds::default()
///     .with_brightness_range(10, 230)
///     .with_color_temp_range(2200, 6000);
/// assert_eq!(bounds.min_brightness, 10);
/// assert_eq!(bounds.max_color_temp, 6000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalBounds {
    /// Lowest brightness (1-255).
    pub min_brightness: u8,
    /// Highest brightness (1-255).
    pub max_brightness: u8,
    /// Warmest color temperature in Kelvin (1000-10000).
    pub min_color_temp: u16,
    /// Coolest color temperature in Kelvin (1000-10000).
    pub max_color_temp: u16,
}

impl GlobalBounds {
    /// Sets the brightness range.
    #[must_use]
    pub fn with_brightness_range(mut self, min: u8, max: u8) -> Self {
        self.min_brightness = min;
        self.max_brightness = max;
        self
    }

    /// Sets the color temperature range in Kelvin.
    #[must_use]
    pub fn with_color_temp_range(mut self, min: u16, max: u16) -> Self {
        self.min_color_temp = min;
        self.max_color_temp = max;
        self
    }

    /// Resolves the bounds used for a light.
    ///
    /// Per-light overrides replace the global value field by field. A missing
    /// correction resolves to the global bounds.
    #[must_use]
    pub fn resolve(&self, correction: Option<&LightCorrection>) -> ResolvedBounds {
        let pick_u8 = |over: Option<u8>, global: u8| over.unwrap_or(global);
        let pick_u16 = |over: Option<u16>, global: u16| over.unwrap_or(global);

        let (min_b, max_b, min_ct, max_ct) = match correction {
            Some(c) => (
                pick_u8(c.min_brightness, self.min_brightness),
                pick_u8(c.max_brightness, self.max_brightness),
                pick_u16(c.min_color_temp, self.min_color_temp),
                pick_u16(c.max_color_temp, self.max_color_temp),
            ),
            None => (
                self.min_brightness,
                self.max_brightness,
                self.min_color_temp,
                self.max_color_temp,
            ),
        };

        ResolvedBounds::sanitized(min_b, max_b, min_ct, max_ct)
    }
}

impl Default for GlobalBounds {
    fn default() -> Self {
        Self {
            min_brightness: defaults::MIN_BRIGHTNESS,
            max_brightness: defaults::MAX_BRIGHTNESS,
            min_color_temp: defaults::MIN_COLOR_TEMP,
            max_color_temp: defaults::MAX_COLOR_TEMP,
        }
    }
}

/// Effective, always-usable bounds for one light.
///
/// Built best-effort from possibly invalid configuration: each value is
/// clamped into its legal range and an inverted pair is swapped. Validation
/// still reports the original problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedBounds {
    /// Lowest brightness.
    pub min_brightness: Brightness,
    /// Highest brightness.
    pub max_brightness: Brightness,
    /// Warmest color temperature.
    pub min_color_temp: ColorTemp,
    /// Coolest color temperature.
    pub max_color_temp: ColorTemp,
}

impl ResolvedBounds {
    fn sanitized(min_b: u8, max_b: u8, min_ct: u16, max_ct: u16) -> Self {
        let (min_b, max_b) = ordered(
            Brightness::clamped(i64::from(min_b)),
            Brightness::clamped(i64::from(max_b)),
        );
        let (min_ct, max_ct) = ordered(
            ColorTemp::clamped(i64::from(min_ct)),
            ColorTemp::clamped(i64::from(max_ct)),
        );
        Self {
            min_brightness: min_b,
            max_brightness: max_b,
            min_color_temp: min_ct,
            max_color_temp: max_ct,
        }
    }

    /// Clamps a Kelvin value into `[min_color_temp, max_color_temp]`.
    #[must_use]
    pub fn clamp_color_temp(&self, kelvin: i64) -> ColorTemp {
        let lo = i64::from(self.min_color_temp.kelvin());
        let hi = i64::from(self.max_color_temp.kelvin());
        ColorTemp::clamped(kelvin.clamp(lo, hi))
    }

    /// Linear interpolation of color temperature; 0.0 is warm, 1.0 is cool.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn color_temp_at(&self, factor: f64) -> ColorTemp {
        let lo = f64::from(self.min_color_temp.kelvin());
        let hi = f64::from(self.max_color_temp.kelvin());
        self.clamp_color_temp((lo + (hi - lo) * factor).round() as i64)
    }

    /// Linear interpolation of brightness between the bounds.
    ///
    /// Interpolates in the 0.0-1.0 fraction domain and converts back to the
    /// 1-255 scale.
    #[must_use]
    pub fn brightness_at(&self, factor: f64) -> Brightness {
        let min_pct = self.min_brightness.as_fraction();
        let max_pct = self.max_brightness.as_fraction();
        let pct = (min_pct + (max_pct - min_pct) * factor).clamp(min_pct, max_pct);
        Brightness::from_f64_clamped(pct * 255.0)
    }
}

fn ordered<T: Ord>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}
