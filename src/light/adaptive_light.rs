// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A light wrapper with its own adaptive toggle.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::command::{LightCommand, ServiceCall, adapt_payload};
use crate::config::ResolvedBounds;
use crate::control::AdaptiveControl;
use crate::engine::AdaptiveEngine;
use crate::error::Result;
use crate::types::{Brightness, ColorTemp, LightId};

use super::TargetState;

/// Wraps one target light and applies adaptive values to its commands.
///
/// The per-light toggle is stored in the engine so that interceptors and
/// this wrapper agree on it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use chrono::DateTime;
/// use sunlit::command::LightCommand;
/// use sunlit::config::{EngineConfig, LightCorrection};
/// use sunlit::control::AdaptiveControl;
/// use sunlit::engine::AdaptiveEngine;
/// use sunlit::light::AdaptiveLight;
/// use sunlit::solar::Location;
///
/// let engine = Arc::new(AdaptiveEngine::new(
///     EngineConfig::new(Location::new(51.5, -0.13, "Europe/London").unwrap())
///         .with_light(LightCorrection::new("light.lamp")),
/// ));
/// let lamp = AdaptiveLight::new(Arc::clone(&engine), "light.lamp");
/// let night = DateTime::parse_from_rfc3339("2024-01-10T02:00:00+00:00").unwrap();
///
/// let call = lamp.turn_on_at(LightCommand::new(), &night);
/// assert_eq!(call.data.brightness.unwrap().value(), 1);
///
/// lamp.set_adaptive_enabled(false);
/// let call = lamp.turn_on_at(LightCommand::new(), &night);
/// assert!(call.data.brightness.is_none());
/// ```
#[derive(Debug)]
pub struct AdaptiveLight {
    target: LightId,
    engine: Arc<AdaptiveEngine>,
    state: RwLock<TargetState>,
}

impl AdaptiveLight {
    /// Creates a wrapper for `target`.
    #[must_use]
    pub fn new(engine: Arc<AdaptiveEngine>, target: impl Into<LightId>) -> Self {
        Self {
            target: target.into(),
            engine,
            state: RwLock::new(TargetState::default()),
        }
    }

    /// Returns the wrapped light.
    #[must_use]
    pub fn target(&self) -> &LightId {
        &self.target
    }

    /// Builds the `turn_on` call for the target at the engine's current time.
    #[must_use]
    pub fn turn_on(&self, data: LightCommand) -> ServiceCall {
        self.turn_on_at(data, &self.engine.now())
    }

    /// Builds the `turn_on` call for the target at `at`.
    ///
    /// Unspecified fields are filled with adaptive values when the light is
    /// adaptive; explicit fields always win.
    #[must_use]
    pub fn turn_on_at<Tz: TimeZone>(&self, data: LightCommand, at: &DateTime<Tz>) -> ServiceCall {
        let data = if self.engine.is_light_adaptive(self.target.as_str()) && !data.is_fully_manual() {
            adapt_payload(&self.engine, &self.target, &data, at)
        } else {
            data
        };
        ServiceCall::turn_on([self.target.clone()], data)
    }

    /// Builds the `turn_off` call for the target.
    #[must_use]
    pub fn turn_off(&self, transition: Option<Duration>) -> ServiceCall {
        ServiceCall::turn_off([self.target.clone()], transition)
    }

    /// Builds a `turn_on` call previewing a white balance offset.
    ///
    /// The color temperature is the computed value plus `test_offset`.
    /// Brightness is the computed value unless given.
    ///
    /// # Errors
    ///
    /// See [`AdaptiveEngine::preview_white_balance`].
    pub fn preview_white_balance<Tz: TimeZone>(
        &self,
        test_offset: i32,
        brightness: Option<Brightness>,
        transition: Option<Duration>,
        at: &DateTime<Tz>,
    ) -> Result<ServiceCall> {
        let mut settings = self
            .engine
            .preview_white_balance(self.target.as_str(), test_offset, at)?;
        if let Some(brightness) = brightness {
            settings.brightness = brightness;
        }
        if let Some(transition) = transition {
            settings = settings.with_transition(transition);
        }
        Ok(ServiceCall::turn_on(
            [self.target.clone()],
            LightCommand::from_settings(&settings),
        ))
    }

    /// Mirrors a state change of the target light.
    pub fn update_from_target(&self, state: &str, attributes: &Map<String, Value>) {
        let mirrored = TargetState::from_attributes(state, attributes);
        tracing::debug!(light = %self.target, state, ?mirrored, "Target light state changed");
        *self.state.write() = mirrored;
    }

    /// Returns the last mirrored state of the target light.
    #[must_use]
    pub fn state(&self) -> TargetState {
        *self.state.read()
    }

    /// Reports corrections and current adaptive values.
    #[must_use]
    pub fn attributes<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> LightAttributes {
        let correction = self.engine.corrections(self.target.as_str());
        let config = self.engine.config();
        let adaptive_enabled = self.is_adaptive_enabled();

        let current = if adaptive_enabled {
            self.engine
                .compute(self.target.as_str(), at)
                .inspect_err(|err| {
                    tracing::debug!(light = %self.target, error = %err, "Adaptive values unavailable");
                })
                .ok()
        } else {
            None
        };

        LightAttributes {
            target_light_id: self.target.clone(),
            bounds: config.bounds().resolve(config.light(self.target.as_str())),
            white_balance_offset: correction.white_balance_offset,
            brightness_factor: correction.brightness_factor,
            enabled: correction.enabled,
            adaptive_enabled,
            adaptive_brightness: current.map(|s| s.brightness),
            adaptive_color_temp: current.map(|s| s.color_temp),
        }
    }
}

impl AdaptiveControl for AdaptiveLight {
    fn set_adaptive_enabled(&self, enabled: bool) {
        self.engine.set_light_adaptive(self.target.as_str(), enabled);
    }

    fn is_adaptive_enabled(&self) -> bool {
        self.engine.is_light_toggle_on(self.target.as_str())
    }
}

/// State attributes of an [`AdaptiveLight`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightAttributes {
    pub target_light_id: LightId,
    #[serde(flatten)]
    pub bounds: ResolvedBounds,
    pub white_balance_offset: i32,
    pub brightness_factor: f64,
    /// Configuration `enabled` flag.
    pub enabled: bool,
    /// Per-light toggle.
    pub adaptive_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adaptive_brightness: Option<Brightness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adaptive_color_temp: Option<ColorTemp>,
}
