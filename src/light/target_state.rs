// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mirrored state of the underlying light.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::{Brightness, ColorTemp};

/// Last known state of the light an [`AdaptiveLight`](super::AdaptiveLight)
/// wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TargetState {
    /// `false` until a state is reported, and for `unavailable` / `unknown`.
    pub available: bool,
    pub is_on: bool,
    pub brightness: Option<Brightness>,
    pub color_temp: Option<ColorTemp>,
}

impl TargetState {
    /// Builds the mirror from a reported state string and attributes.
    ///
    /// Color temperature is read from `color_temp_kelvin`, or converted from
    /// `color_temp` in mireds. Brightness and color temperature are only
    /// kept while the light is on.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use sunlit::light::TargetState;
    ///
    /// let attrs = json!({"brightness": 128, "color_temp": 250});
    /// let state = TargetState::from_attributes("on", attrs.as_object().unwrap());
    ///
    /// assert!(state.is_on);
    /// assert_eq!(state.brightness.unwrap().value(), 128);
    /// assert_eq!(state.color_temp.unwrap().kelvin(), 4000);
    /// ```
    #[must_use]
    pub fn from_attributes(state: &str, attributes: &Map<String, Value>) -> Self {
        match state {
            "unavailable" | "unknown" => Self::default(),
            "on" => Self {
                available: true,
                is_on: true,
                brightness: read_brightness(attributes),
                color_temp: read_color_temp(attributes),
            },
            _ => Self {
                available: true,
                ..Self::default()
            },
        }
    }
}

fn read_brightness(attributes: &Map<String, Value>) -> Option<Brightness> {
    let raw = attributes.get("brightness")?.as_u64()?;
    Brightness::new(u8::try_from(raw).ok()?).ok()
}

fn read_color_temp(attributes: &Map<String, Value>) -> Option<ColorTemp> {
    if let Some(kelvin) = attributes.get("color_temp_kelvin").and_then(Value::as_u64) {
        return Some(ColorTemp::clamped(i64::try_from(kelvin).ok()?));
    }
    let mireds = attributes.get("color_temp")?.as_u64()?;
    ColorTemp::from_mireds(u16::try_from(mireds).ok()?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn kelvin_preferred_over_mireds() {
        let s = TargetState::from_attributes(
            "on",
            &attrs(json!({"color_temp_kelvin": 3000, "color_temp": 250})),
        );
        assert_eq!(s.color_temp.unwrap().kelvin(), 3000);
    }

    #[test]
    fn off_light_drops_values() {
        let s = TargetState::from_attributes("off", &attrs(json!({"brightness": 200})));
        assert!(s.available);
        assert!(!s.is_on);
        assert!(s.brightness.is_none());
    }

    #[test]
    fn unavailable_and_bad_values() {
        assert!(!TargetState::from_attributes("unavailable", &Map::new()).available);

        let s = TargetState::from_attributes("on", &attrs(json!({"brightness": 0, "color_temp": 0})));
        assert!(s.brightness.is_none());
        assert!(s.color_temp.is_none());
    }
}
