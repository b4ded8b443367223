// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration validation.

use std::fmt;

use crate::error::ConfigError;
use crate::types::LightId;

use super::defaults::{COLOR_TEMP_RANGE, RECOMMENDED_FACTOR_RANGE, RECOMMENDED_OFFSET_RANGE};
use super::{EngineConfig, GlobalBounds, LightCorrection};

/// One problem found in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The offending light, or `None` for the global bounds.
    pub light_id: Option<LightId>,
    /// What is wrong.
    pub error: ConfigError,
}

impl Violation {
    /// Returns `true` if the value is merely outside the recommended range.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.error.is_warning()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.light_id {
            Some(id) => write!(f, "{id}: {}", self.error),
            None => write!(f, "global bounds: {}", self.error),
        }
    }
}

pub(super) fn validate(config: &EngineConfig) -> Vec<Violation> {
    let mut violations = Vec::new();

    let global = config.bounds();
    for error in check_bounds(
        global.min_brightness,
        global.max_brightness,
        [Some(global.min_color_temp), Some(global.max_color_temp)],
        (global.min_color_temp, global.max_color_temp),
    ) {
        violations.push(Violation {
            light_id: None,
            error,
        });
    }

    for light in config.lights() {
        for error in check_light(global, light) {
            violations.push(Violation {
                light_id: Some(light.light_id.clone()),
                error,
            });
        }
    }

    for v in &violations {
        if v.is_warning() {
            tracing::warn!(violation = %v, "Light correction outside recommended range");
        } else {
            tracing::error!(violation = %v, "Invalid adaptive lighting configuration");
        }
    }

    violations
}

fn check_light(global: &GlobalBounds, light: &LightCorrection) -> Vec<ConfigError> {
    let min_b = light.min_brightness.unwrap_or(global.min_brightness);
    let max_b = light.max_brightness.unwrap_or(global.max_brightness);
    let min_ct = light.min_color_temp.unwrap_or(global.min_color_temp);
    let max_ct = light.max_color_temp.unwrap_or(global.max_color_temp);

    // Only report brightness bounds the light itself sets; inherited global
    // problems are reported once for the global bounds.
    let mut errors = Vec::new();
    for value in [light.min_brightness, light.max_brightness].into_iter().flatten() {
        if value == 0 {
            errors.push(ConfigError::BrightnessOutOfRange { value });
        }
    }
    let overrides_brightness = light.min_brightness.is_some() || light.max_brightness.is_some();
    if overrides_brightness && min_b >= max_b {
        errors.push(ConfigError::InvertedBrightnessRange {
            min: min_b,
            max: max_b,
        });
    }

    let overrides_color_temp = light.min_color_temp.is_some() || light.max_color_temp.is_some();
    if overrides_color_temp {
        errors.extend(check_color_temps(
            [light.min_color_temp, light.max_color_temp],
            (min_ct, max_ct),
        ));
    }

    let factor = light.brightness_factor;
    if !factor.is_finite() || factor <= 0.0 {
        errors.push(ConfigError::NonPositiveBrightnessFactor(factor));
    } else if !RECOMMENDED_FACTOR_RANGE.contains(&factor) {
        errors.push(ConfigError::BrightnessFactorNotRecommended(factor));
    }

    if !RECOMMENDED_OFFSET_RANGE.contains(&light.white_balance_offset) {
        errors.push(ConfigError::WhiteBalanceOffsetNotRecommended(
            light.white_balance_offset,
        ));
    }

    errors
}

fn check_bounds(
    min_b: u8,
    max_b: u8,
    color_temps: [Option<u16>; 2],
    effective_ct: (u16, u16),
) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    for value in [min_b, max_b] {
        if value == 0 {
            errors.push(ConfigError::BrightnessOutOfRange { value });
        }
    }
    if min_b >= max_b {
        errors.push(ConfigError::InvertedBrightnessRange {
            min: min_b,
            max: max_b,
        });
    }
    errors.extend(check_color_temps(color_temps, effective_ct));
    errors
}

fn check_color_temps(values: [Option<u16>; 2], (min, max): (u16, u16)) -> Vec<ConfigError> {
    let mut errors: Vec<ConfigError> = values
        .into_iter()
        .flatten()
        .filter(|value| !COLOR_TEMP_RANGE.contains(value))
        .map(|value| ConfigError::ColorTempOutOfRange { value })
        .collect();
    if min >= max {
        errors.push(ConfigError::InvertedColorTempRange { min, max });
    }
    errors
}
