// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light command payload.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::engine::AdaptiveSettings;
use crate::error::{Result, ValueError};
use crate::types::{Brightness, ColorTemp};

/// Attribute keys that select a color other than a white temperature.
///
/// A command carrying any of these gets no computed color temperature.
pub const EXPLICIT_COLOR_KEYS: &[&str] = &[
    "rgb_color",
    "rgbw_color",
    "rgbww_color",
    "hs_color",
    "xy_color",
    "color_name",
    "white",
];

/// An explicit color temperature as given by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTempValue {
    /// Kelvin (`color_temp_kelvin` attribute).
    Kelvin(ColorTemp),
    /// Mireds (`color_temp` attribute).
    Mireds(u16),
}

impl ColorTempValue {
    /// Converts to Kelvin.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for a zero mired value.
    pub fn to_color_temp(self) -> std::result::Result<ColorTemp, ValueError> {
        match self {
            Self::Kelvin(ct) => Ok(ct),
            Self::Mireds(m) => ColorTemp::from_mireds(m),
        }
    }
}

/// Payload of a light service call.
///
/// Brightness, color temperature and transition are typed; every other
/// attribute is kept as-is in `extra`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sunlit::command::LightCommand;
/// use sunlit::types::Brightness;
///
/// let cmd = LightCommand::new()
///     .with_brightness(Brightness::new(100).unwrap())
///     .with_transition(Duration::from_secs(2))
///     .with_attribute("effect", "none");
///
/// assert_eq!(
///     serde_json::Value::Object(cmd.to_service_data()),
///     serde_json::json!({"brightness": 100, "transition": 2.0, "effect": "none"})
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightCommand {
    /// Explicit brightness.
    pub brightness: Option<Brightness>,
    /// Explicit color temperature.
    pub color_temp: Option<ColorTempValue>,
    /// Explicit transition.
    pub transition: Option<Duration>,
    /// Any other attributes.
    pub extra: Map<String, Value>,
}

impl LightCommand {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a payload carrying every value of computed settings.
    #[must_use]
    pub fn from_settings(settings: &AdaptiveSettings) -> Self {
        Self {
            brightness: Some(settings.brightness),
            color_temp: Some(ColorTempValue::Kelvin(settings.color_temp)),
            transition: Some(settings.transition),
            extra: Map::new(),
        }
    }

    /// Parses a service data object.
    ///
    /// Recognizes `brightness`, `color_temp_kelvin` (also `kelvin`),
    /// `color_temp` in mireds and `transition` in seconds. Other keys go to
    /// `extra`. `entity_id` is dropped since targets live on the
    /// [`ServiceCall`](super::ServiceCall).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` when a recognized key holds a value
    /// of the wrong type or out of range.
    pub fn from_service_data(data: &Map<String, Value>) -> Result<Self> {
        let mut cmd = Self::new();
        for (key, value) in data {
            match key.as_str() {
                "brightness" => {
                    let raw = as_integer(value)?;
                    let value = u8::try_from(raw).map_err(|_| out_of_range(0, 255, raw))?;
                    cmd.brightness = Some(Brightness::new(value)?);
                }
                "color_temp_kelvin" | "kelvin" => {
                    let raw = as_integer(value)?;
                    let kelvin = u16::try_from(raw).map_err(|_| {
                        out_of_range(
                            i64::from(ColorTemp::MIN_KELVIN),
                            i64::from(ColorTemp::MAX_KELVIN),
                            raw,
                        )
                    })?;
                    cmd.color_temp = Some(ColorTempValue::Kelvin(ColorTemp::new(kelvin)?));
                }
                "color_temp" => {
                    let raw = as_integer(value)?;
                    let mireds =
                        u16::try_from(raw).map_err(|_| out_of_range(1, i64::from(u16::MAX), raw))?;
                    ColorTemp::from_mireds(mireds)?;
                    cmd.color_temp = Some(ColorTempValue::Mireds(mireds));
                }
                "transition" => {
                    let secs = value
                        .as_f64()
                        .filter(|s| s.is_finite() && *s >= 0.0)
                        .ok_or_else(|| out_of_range(0, i64::MAX, -1))?;
                    cmd.transition = Some(Duration::from_secs_f64(secs));
                }
                "entity_id" => {}
                _ => {
                    cmd.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(cmd)
    }

    /// Sets an explicit brightness.
    #[must_use]
    pub fn with_brightness(mut self, brightness: Brightness) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Sets an explicit color temperature in Kelvin.
    #[must_use]
    pub fn with_color_temp(mut self, color_temp: ColorTemp) -> Self {
        self.color_temp = Some(ColorTempValue::Kelvin(color_temp));
        self
    }

    /// Sets an explicit color temperature in mireds.
    #[must_use]
    pub fn with_mireds(mut self, mireds: u16) -> Self {
        self.color_temp = Some(ColorTempValue::Mireds(mireds));
        self
    }

    /// Sets an explicit transition.
    #[must_use]
    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Adds an extra attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Returns `true` if the caller picked a color, either a temperature or
    /// one of [`EXPLICIT_COLOR_KEYS`].
    #[must_use]
    pub fn specifies_color(&self) -> bool {
        self.color_temp.is_some() || EXPLICIT_COLOR_KEYS.iter().any(|k| self.extra.contains_key(*k))
    }

    /// Returns `true` if nothing is left for adaptive values to fill.
    #[must_use]
    pub fn is_fully_manual(&self) -> bool {
        self.brightness.is_some() && self.specifies_color()
    }

    /// Fills every unspecified field from computed settings.
    ///
    /// Explicit values win field by field.
    #[must_use]
    pub fn merged_with(&self, settings: &AdaptiveSettings) -> Self {
        let mut merged = self.clone();
        merged.brightness.get_or_insert(settings.brightness);
        if !self.specifies_color() {
            merged.color_temp = Some(ColorTempValue::Kelvin(settings.color_temp));
        }
        merged.transition.get_or_insert(settings.transition);
        merged
    }

    /// Renders the payload as a service data object.
    #[must_use]
    pub fn to_service_data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        if let Some(b) = self.brightness {
            data.insert("brightness".into(), b.value().into());
        }
        match self.color_temp {
            Some(ColorTempValue::Kelvin(ct)) => {
                data.insert("color_temp_kelvin".into(), ct.kelvin().into());
            }
            Some(ColorTempValue::Mireds(m)) => {
                data.insert("color_temp".into(), m.into());
            }
            None => {}
        }
        if let Some(t) = self.transition {
            data.insert("transition".into(), t.as_secs_f64().into());
        }
        for (key, value) in &self.extra {
            data.insert(key.clone(), value.clone());
        }
        data
    }
}

#[allow(clippy::cast_possible_truncation)]
fn as_integer(value: &Value) -> std::result::Result<i64, ValueError> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64))
        .ok_or(ValueError::OutOfRange {
            min: i64::MIN,
            max: i64::MAX,
            actual: 0,
        })
}

fn out_of_range(min: i64, max: i64, actual: i64) -> ValueError {
    ValueError::OutOfRange { min, max, actual }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    fn settings() -> AdaptiveSettings {
        AdaptiveSettings::new(Brightness::new(180).unwrap(), ColorTemp::new(4200).unwrap())
    }

    #[test]
    fn merge_fills_only_unspecified_fields() {
        let cmd = LightCommand::new().with_brightness(Brightness::new(100).unwrap());
        let merged = cmd.merged_with(&settings());
        assert_eq!(merged.brightness.unwrap().value(), 100);
        assert_eq!(
            merged.color_temp,
            Some(ColorTempValue::Kelvin(ColorTemp::new(4200).unwrap()))
        );
        assert_eq!(merged.transition, Some(Duration::from_secs(1)));
    }

    #[test]
    fn explicit_transition_wins() {
        let cmd = LightCommand::new().with_transition(Duration::from_secs(10));
        let merged = cmd.merged_with(&settings());
        assert_eq!(merged.transition, Some(Duration::from_secs(10)));
        assert_eq!(merged.brightness.unwrap().value(), 180);
    }

    #[test]
    fn rgb_color_blocks_color_temp() {
        let cmd = LightCommand::new().with_attribute("rgb_color", json!([255, 0, 0]));
        let merged = cmd.merged_with(&settings());
        assert!(merged.color_temp.is_none());
        assert_eq!(merged.brightness.unwrap().value(), 180);
        assert!(!cmd.is_fully_manual());
        assert!(cmd.with_brightness(Brightness::MAX).is_fully_manual());
    }

    #[test]
    fn parses_service_data() {
        let cmd = LightCommand::from_service_data(&object(json!({
            "entity_id": "light.a",
            "brightness": 120,
            "color_temp": 370,
            "transition": 0.5,
            "flash": "short",
        })))
        .unwrap();
        assert_eq!(cmd.brightness.unwrap().value(), 120);
        assert_eq!(cmd.color_temp, Some(ColorTempValue::Mireds(370)));
        assert_eq!(cmd.color_temp.unwrap().to_color_temp().unwrap().kelvin(), 2702);
        assert_eq!(cmd.transition, Some(Duration::from_millis(500)));
        assert_eq!(cmd.extra.get("flash"), Some(&json!("short")));
        assert!(!cmd.extra.contains_key("entity_id"));
    }

    #[test]
    fn rejects_bad_service_data() {
        for data in [
            json!({"brightness": 0}),
            json!({"brightness": 300}),
            json!({"brightness": "high"}),
            json!({"color_temp_kelvin": 500}),
            json!({"color_temp": 0}),
            json!({"transition": -1}),
        ] {
            assert!(LightCommand::from_service_data(&object(data.clone())).is_err(), "{data}");
        }
    }

    #[test]
    fn renders_mireds_under_color_temp() {
        let cmd = LightCommand::new().with_mireds(250);
        assert_eq!(Value::Object(cmd.to_service_data()), json!({"color_temp": 250}));
    }
}
