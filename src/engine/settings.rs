// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Computed adaptive settings.

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::config::defaults;
use crate::types::{Brightness, ColorTemp};

/// Brightness, color temperature and transition computed for one light.
///
/// Produced fresh by every computation and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdaptiveSettings {
    /// Target brightness (1-255).
    pub brightness: Brightness,
    /// Target color temperature, clamped to the light's bounds.
    #[serde(rename = "color_temp_kelvin")]
    pub color_temp: ColorTemp,
    /// Transition time.
    #[serde(serialize_with = "serialize_secs")]
    pub transition: Duration,
}

impl AdaptiveSettings {
    /// Creates settings with the default one second transition.
    #[must_use]
    pub fn new(brightness: Brightness, color_temp: ColorTemp) -> Self {
        Self {
            brightness,
            color_temp,
            transition: Duration::from_secs(defaults::TRANSITION_SECS),
        }
    }

    /// Replaces the transition.
    #[must_use]
    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }
}

fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transition_is_one_second() {
        let s = AdaptiveSettings::new(Brightness::MAX, ColorTemp::NEUTRAL);
        assert_eq!(s.transition, Duration::from_secs(1));
    }

    #[test]
    fn serializes_as_service_data() {
        let s = AdaptiveSettings::new(Brightness::new(204).unwrap(), ColorTemp::DAYLIGHT)
            .with_transition(Duration::from_millis(2500));
        assert_eq!(
            serde_json::to_value(s).unwrap(),
            serde_json::json!({
                "brightness": 204,
                "color_temp_kelvin": 6500,
                "transition": 2.5,
            })
        );
    }
}
