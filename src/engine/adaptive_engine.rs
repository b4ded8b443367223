// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The adaptive engine.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone};
use parking_lot::RwLock;

use crate::clock::{Clock, SystemClock};
use crate::command::{LightCommand, ServiceCall};
use crate::config::defaults::RECOMMENDED_OFFSET_RANGE;
use crate::config::{EngineConfig, LightCorrection, Violation};
use crate::control::AdaptiveControl;
use crate::error::{ComputationError, Result, ValueError};
use crate::solar::SunPositionCurve;
use crate::types::{Brightness, ColorTemp, LightId};

use super::correction::{apply_brightness_factor, apply_white_balance};
use super::settings::AdaptiveSettings;
use super::summary::{AdaptiveSummary, LightSummary};

/// Configuration snapshot paired with the curve for its location.
#[derive(Debug)]
struct Snapshot {
    config: Arc<EngineConfig>,
    curve: SunPositionCurve,
}

impl Snapshot {
    fn new(config: EngineConfig) -> Self {
        let curve = SunPositionCurve::new(config.location().clone());
        Self {
            config: Arc::new(config),
            curve,
        }
    }
}

/// Computes adaptive settings for lights from the sun position and the
/// per-light corrections.
///
/// The engine reads an immutable configuration snapshot for every
/// computation. Edits through [`replace_config`](Self::replace_config),
/// [`replace_light`](Self::replace_light) and
/// [`remove_light`](Self::remove_light) swap in a new snapshot, so a
/// concurrent computation sees either the old record or the new one.
///
/// The engine is also the master adaptive switch: see its
/// [`AdaptiveControl`] implementation.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use sunlit::config::{EngineConfig, LightCorrection};
/// use sunlit::engine::AdaptiveEngine;
/// use sunlit::solar::Location;
///
/// let config = EngineConfig::new(Location::new(51.5074, -0.1278, "Europe/London").unwrap())
///     .with_light(
///         LightCorrection::new("light.living_room")
///             .with_white_balance_offset(100)
///             .with_brightness_factor(0.8),
///     );
/// let engine = AdaptiveEngine::new(config);
///
/// let midnight = DateTime::parse_from_rfc3339("2024-06-21T00:00:00+01:00").unwrap();
/// let settings = engine.compute("light.living_room", &midnight).unwrap();
/// assert_eq!(settings.color_temp.kelvin(), 2100);
/// assert_eq!(settings.brightness.value(), 1);
/// ```
pub struct AdaptiveEngine {
    snapshot: RwLock<Arc<Snapshot>>,
    clock: Arc<dyn Clock>,
    enabled: AtomicBool,
    toggled_off: RwLock<HashSet<LightId>>,
}

impl AdaptiveEngine {
    /// Creates an engine reading the system clock.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        tracing::debug!(
            lights = config.lights().len(),
            "Creating adaptive lighting engine"
        );
        Self {
            snapshot: RwLock::new(Arc::new(Snapshot::new(config))),
            clock: Arc::new(SystemClock),
            enabled: AtomicBool::new(true),
            toggled_off: RwLock::new(HashSet::new()),
        }
    }

    /// Replaces the clock used by the `*_now` methods.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the current time from the engine's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read())
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Returns the current configuration snapshot.
    #[must_use]
    pub fn config(&self) -> Arc<EngineConfig> {
        Arc::clone(&self.snapshot().config)
    }

    /// Replaces the whole configuration.
    pub fn replace_config(&self, config: EngineConfig) {
        tracing::debug!(
            lights = config.lights().len(),
            "Replacing adaptive lighting configuration"
        );
        *self.snapshot.write() = Arc::new(Snapshot::new(config));
    }

    /// Inserts or replaces the correction record for one light.
    pub fn replace_light(&self, correction: LightCorrection) {
        let mut guard = self.snapshot.write();
        let mut config = EngineConfig::clone(&guard.config);
        tracing::debug!(light = %correction.light_id, "Replacing light correction");
        config.upsert_light(correction);
        *guard = Arc::new(Snapshot::new(config));
    }

    /// Removes the correction record for one light.
    ///
    /// Returns the removed record, or `None` if the light was not configured.
    pub fn remove_light(&self, light_id: &str) -> Option<LightCorrection> {
        let mut guard = self.snapshot.write();
        let mut config = EngineConfig::clone(&guard.config);
        let removed = config.remove_light(light_id)?;
        tracing::debug!(light = light_id, "Removed light correction");
        *guard = Arc::new(Snapshot::new(config));
        Some(removed)
    }

    /// Enumerates every violation in the current configuration.
    #[must_use]
    pub fn validate(&self) -> Vec<Violation> {
        self.config().validate()
    }

    /// Returns the effective correction for a light.
    ///
    /// Unknown lights get [`LightCorrection::unconfigured`].
    #[must_use]
    pub fn corrections(&self, light_id: &str) -> LightCorrection {
        self.config()
            .light(light_id)
            .cloned()
            .unwrap_or_else(|| LightCorrection::unconfigured(light_id))
    }

    /// Returns the configured light ids in configuration order.
    #[must_use]
    pub fn configured_lights(&self) -> Vec<LightId> {
        self.config().light_ids()
    }

    // ========================================================================
    // Enable state
    // ========================================================================

    /// Sets the per-light adaptive toggle.
    ///
    /// The toggle is runtime state kept apart from the configuration and
    /// survives configuration swaps.
    pub fn set_light_adaptive(&self, light_id: &str, enabled: bool) {
        let mut toggled_off = self.toggled_off.write();
        if enabled {
            toggled_off.remove(light_id);
        } else {
            toggled_off.insert(LightId::new(light_id));
        }
        tracing::debug!(light = light_id, enabled, "Per-light adaptive toggle changed");
    }

    /// Returns the per-light adaptive toggle.
    #[must_use]
    pub fn is_light_toggle_on(&self, light_id: &str) -> bool {
        !self.toggled_off.read().contains(light_id)
    }

    /// Returns whether commands for this light get adaptive values.
    ///
    /// Requires the master switch on, a configuration record with
    /// `enabled = true` and the per-light toggle on.
    #[must_use]
    pub fn is_light_adaptive(&self, light_id: &str) -> bool {
        self.is_adaptive_enabled()
            && self.config().light(light_id).is_some_and(|c| c.enabled)
            && self.is_light_toggle_on(light_id)
    }

    // ========================================================================
    // Computation
    // ========================================================================

    /// Computes the settings for a light at a given time.
    ///
    /// Unknown lights are computed with the global bounds and no correction.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationError::NonFinite`] if an intermediate value is
    /// NaN or infinite, for example a NaN brightness factor.
    pub fn compute<Tz: TimeZone>(&self, light_id: &str, at: &DateTime<Tz>) -> Result<AdaptiveSettings> {
        let snapshot = self.snapshot();
        let factor = snapshot.curve.factor(at);
        settings_from(&snapshot.config, light_id, factor)
    }

    /// Computes the settings for a light at the clock's current time.
    ///
    /// # Errors
    ///
    /// Same as [`compute`](Self::compute).
    pub fn compute_now(&self, light_id: &str) -> Result<AdaptiveSettings> {
        self.compute(light_id, &self.now())
    }

    /// Computes the settings for a light at an explicit daylight factor.
    ///
    /// `0.0` is deep night and `1.0` is the middle of the day.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationError::NonFinite`] if `factor` or the light's
    /// brightness factor is not finite.
    pub fn settings_for_factor(&self, light_id: &str, factor: f64) -> Result<AdaptiveSettings> {
        settings_from(&self.config(), light_id, factor)
    }

    /// Returns the daylight factor at `at` for the configured location.
    #[must_use]
    pub fn sun_factor<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> f64 {
        self.snapshot().curve.factor(at)
    }

    /// Base brightness from the global bounds alone.
    #[must_use]
    pub fn global_brightness<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> Brightness {
        let snapshot = self.snapshot();
        let bounds = snapshot.config.bounds().resolve(None);
        bounds.brightness_at(snapshot.curve.factor(at))
    }

    /// Base color temperature from the global bounds alone.
    #[must_use]
    pub fn global_color_temp<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> ColorTemp {
        let snapshot = self.snapshot();
        let bounds = snapshot.config.bounds().resolve(None);
        bounds.color_temp_at(snapshot.curve.factor(at))
    }

    /// Base brightness from the light's effective bounds, before its
    /// brightness factor.
    #[must_use]
    pub fn brightness_for_light<Tz: TimeZone>(&self, light_id: &str, at: &DateTime<Tz>) -> Brightness {
        let snapshot = self.snapshot();
        let bounds = snapshot.config.bounds().resolve(snapshot.config.light(light_id));
        bounds.brightness_at(snapshot.curve.factor(at))
    }

    /// Color temperature for a light including its white balance offset.
    #[must_use]
    pub fn color_temp_for_light<Tz: TimeZone>(&self, light_id: &str, at: &DateTime<Tz>) -> ColorTemp {
        let snapshot = self.snapshot();
        let correction = snapshot.config.light(light_id);
        let bounds = snapshot.config.bounds().resolve(correction);
        let base = bounds.color_temp_at(snapshot.curve.factor(at));
        apply_white_balance(base, correction.map_or(0, |c| c.white_balance_offset), &bounds)
    }

    /// Computes settings with a temporary white balance offset added.
    ///
    /// The offset is added to the computed color temperature and the result
    /// is clamped to the legal Kelvin range, not the light's bounds, so the
    /// preview can show what a new offset would look like. The configuration
    /// is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::OutOfRange`] if `test_offset` is outside
    /// -1000..=1000, or a computation error from [`compute`](Self::compute).
    pub fn preview_white_balance<Tz: TimeZone>(
        &self,
        light_id: &str,
        test_offset: i32,
        at: &DateTime<Tz>,
    ) -> Result<AdaptiveSettings> {
        if !RECOMMENDED_OFFSET_RANGE.contains(&test_offset) {
            return Err(ValueError::OutOfRange {
                min: i64::from(*RECOMMENDED_OFFSET_RANGE.start()),
                max: i64::from(*RECOMMENDED_OFFSET_RANGE.end()),
                actual: i64::from(test_offset),
            }
            .into());
        }
        let settings = self.compute(light_id, at)?;
        let color_temp =
            ColorTemp::clamped(i64::from(settings.color_temp.kelvin()) + i64::from(test_offset));
        tracing::debug!(
            light = light_id,
            test_offset,
            color_temp = color_temp.kelvin(),
            "White balance preview"
        );
        Ok(AdaptiveSettings {
            color_temp,
            ..settings
        })
    }

    /// Builds turn-on calls carrying freshly computed settings.
    ///
    /// With `lights = None` every configured light is targeted. Explicit
    /// targets without a configuration record are skipped with a warning, as
    /// are lights whose computation fails. The calls are produced even when
    /// the master switch is off.
    #[must_use]
    pub fn apply_to_lights<Tz: TimeZone>(
        &self,
        lights: Option<&[LightId]>,
        transition: Option<Duration>,
        at: &DateTime<Tz>,
    ) -> Vec<ServiceCall> {
        let snapshot = self.snapshot();
        let config = &snapshot.config;
        let targets: Vec<LightId> = match lights {
            Some(ids) => ids
                .iter()
                .filter(|id| {
                    let known = config.light(id.as_str()).is_some();
                    if !known {
                        tracing::warn!(light = %id, "Light not configured for adaptive lighting");
                    }
                    known
                })
                .cloned()
                .collect(),
            None => config.light_ids(),
        };

        let factor = snapshot.curve.factor(at);
        targets
            .into_iter()
            .filter_map(|id| match settings_from(config, id.as_str(), factor) {
                Ok(mut settings) => {
                    if let Some(transition) = transition {
                        settings = settings.with_transition(transition);
                    }
                    Some(ServiceCall::turn_on([id], LightCommand::from_settings(&settings)))
                }
                Err(err) => {
                    tracing::warn!(light = %id, error = %err, "Skipping light");
                    None
                }
            })
            .collect()
    }

    /// Reports the master switch and every configured light at `at`.
    #[must_use]
    pub fn summary<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> AdaptiveSummary {
        let snapshot = self.snapshot();
        let config = &snapshot.config;
        let factor = snapshot.curve.factor(at);

        let lights: Vec<LightSummary> = config
            .lights()
            .iter()
            .map(|c| {
                let enabled = c.enabled && self.is_light_toggle_on(c.light_id.as_str());
                let current = if enabled {
                    settings_from(config, c.light_id.as_str(), factor).ok()
                } else {
                    None
                };
                LightSummary {
                    light_id: c.light_id.clone(),
                    enabled,
                    bounds: config.bounds().resolve(Some(c)),
                    white_balance_offset: c.white_balance_offset,
                    brightness_factor: c.brightness_factor,
                    current,
                }
            })
            .collect();

        AdaptiveSummary {
            adaptive_enabled: self.is_adaptive_enabled(),
            sun_factor: factor,
            total_lights: lights.len(),
            enabled_lights: lights.iter().filter(|l| l.enabled).count(),
            lights,
        }
    }
}

impl AdaptiveControl for AdaptiveEngine {
    fn set_adaptive_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
        tracing::debug!(enabled, "Adaptive lighting master switch changed");
    }

    fn is_adaptive_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl fmt::Debug for AdaptiveEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptiveEngine")
            .field("config", &self.config())
            .field("clock", &self.clock)
            .field("enabled", &self.is_adaptive_enabled())
            .finish_non_exhaustive()
    }
}

fn settings_from(config: &EngineConfig, light_id: &str, factor: f64) -> Result<AdaptiveSettings> {
    let non_finite = |quantity| ComputationError::NonFinite {
        light: light_id.to_owned(),
        quantity,
    };
    if !factor.is_finite() {
        return Err(non_finite("sun factor").into());
    }

    let correction = config.light(light_id);
    if correction.is_none() {
        tracing::debug!(light = light_id, "No correction configured, using global bounds");
    }
    let bounds = config.bounds().resolve(correction);
    let (offset, brightness_factor) =
        correction.map_or((0, 1.0), |c| (c.white_balance_offset, c.brightness_factor));
    if !brightness_factor.is_finite() {
        return Err(non_finite("brightness factor").into());
    }

    let color_temp = apply_white_balance(bounds.color_temp_at(factor), offset, &bounds);
    let brightness = apply_brightness_factor(bounds.brightness_at(factor), brightness_factor);

    tracing::debug!(
        light = light_id,
        factor,
        brightness = brightness.value(),
        color_temp = color_temp.kelvin(),
        "Computed adaptive settings"
    );
    Ok(AdaptiveSettings::new(brightness, color_temp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::GlobalBounds;
    use crate::error::Error;
    use crate::solar::Location;

    fn london() -> Location {
        Location::new(51.5074, -0.1278, "Europe/London").unwrap()
    }

    fn engine() -> AdaptiveEngine {
        AdaptiveEngine::new(
            EngineConfig::new(london())
                .with_light(
                    LightCorrection::new("light.living_room")
                        .with_color_temp_range(2000, 6500)
                        .with_white_balance_offset(100)
                        .with_brightness_factor(0.8),
                )
                .with_light(LightCorrection::new("light.disabled").with_enabled(false)),
        )
    }

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn noon_and_night_scenarios() {
        let engine = engine();
        let noon = engine.settings_for_factor("light.living_room", 1.0).unwrap();
        assert_eq!(noon.color_temp.kelvin(), 6500);
        assert_eq!(noon.brightness.value(), 204);

        let night = engine.settings_for_factor("light.living_room", 0.0).unwrap();
        assert_eq!(night.color_temp.kelvin(), 2100);
        assert_eq!(night.brightness.value(), 1);
        assert_eq!(night.transition, Duration::from_secs(1));
    }

    #[test]
    fn compute_is_idempotent() {
        let engine = engine();
        let t = at("2024-06-21T08:15:00+01:00");
        let first = engine.compute("light.living_room", &t).unwrap();
        let second = engine.compute("light.living_room", &t).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_light_uses_global_bounds() {
        let engine = engine();
        let night = engine.compute("light.unknown", &at("2024-06-21T01:00:00+01:00")).unwrap();
        assert_eq!(night.color_temp, ColorTemp::CANDLE);
        assert_eq!(night.brightness, Brightness::MIN);

        let c = engine.corrections("light.unknown");
        assert!(!c.enabled);
        assert_eq!(c.white_balance_offset, 0);
    }

    #[test]
    fn per_light_brightness_bounds() {
        let engine = engine();
        engine.replace_light(LightCorrection::new("light.dim").with_brightness_range(10, 100));
        assert_eq!(engine.settings_for_factor("light.dim", 0.0).unwrap().brightness.value(), 10);
        assert_eq!(engine.settings_for_factor("light.dim", 1.0).unwrap().brightness.value(), 100);
    }

    #[test]
    fn non_finite_values_are_errors() {
        let engine = engine();
        assert!(matches!(
            engine.settings_for_factor("light.living_room", f64::NAN),
            Err(Error::Computation(ComputationError::NonFinite { quantity: "sun factor", .. }))
        ));

        engine.replace_light(LightCorrection::new("light.nan").with_brightness_factor(f64::NAN));
        assert!(matches!(
            engine.compute_now("light.nan"),
            Err(Error::Computation(ComputationError::NonFinite {
                quantity: "brightness factor",
                ..
            }))
        ));
    }

    #[test]
    fn extreme_corrections_stay_in_bounds() {
        let engine = engine();
        for (offset, factor) in [(5000, 10.0), (-5000, 0.001), (i32::MAX, 1e9), (i32::MIN, 1e-9)] {
            engine.replace_light(
                LightCorrection::new("light.extreme")
                    .with_color_temp_range(2700, 4000)
                    .with_white_balance_offset(offset)
                    .with_brightness_factor(factor),
            );
            for f in [0.0, 0.25, 0.5, 1.0] {
                let s = engine.settings_for_factor("light.extreme", f).unwrap();
                assert!((2700..=4000).contains(&s.color_temp.kelvin()));
                assert!(s.brightness.value() >= 1);
            }
        }
    }

    #[test]
    fn adaptive_state_requires_all_switches() {
        let engine = engine();
        assert!(engine.is_light_adaptive("light.living_room"));
        assert!(!engine.is_light_adaptive("light.disabled"));
        assert!(!engine.is_light_adaptive("light.unknown"));

        engine.set_light_adaptive("light.living_room", false);
        assert!(!engine.is_light_adaptive("light.living_room"));
        engine.set_light_adaptive("light.living_room", true);

        engine.set_adaptive_enabled(false);
        assert!(!engine.is_light_adaptive("light.living_room"));
        engine.set_adaptive_enabled(true);
        assert!(engine.is_light_adaptive("light.living_room"));
    }

    #[test]
    fn toggle_survives_config_swap() {
        let engine = engine();
        engine.set_light_adaptive("light.living_room", false);
        engine.replace_config(
            EngineConfig::new(london()).with_light(LightCorrection::new("light.living_room")),
        );
        assert!(!engine.is_light_adaptive("light.living_room"));
    }

    #[test]
    fn replace_and_remove_light() {
        let engine = engine();
        let before = engine.config();

        engine.replace_light(LightCorrection::new("light.living_room").with_white_balance_offset(-200));
        assert_eq!(engine.corrections("light.living_room").white_balance_offset, -200);
        // Old snapshots are untouched.
        assert_eq!(before.light("light.living_room").unwrap().white_balance_offset, 100);

        let removed = engine.remove_light("light.living_room").unwrap();
        assert_eq!(removed.white_balance_offset, -200);
        assert!(engine.remove_light("light.living_room").is_none());
        assert_eq!(engine.configured_lights(), vec![LightId::new("light.disabled")]);
    }

    #[test]
    fn global_paths_ignore_corrections() {
        let engine = AdaptiveEngine::new(
            EngineConfig::new(london())
                .with_bounds(GlobalBounds::default().with_color_temp_range(2500, 6000))
                .with_light(LightCorrection::new("light.a").with_white_balance_offset(300)),
        );
        let night = at("2024-12-21T02:00:00+00:00");
        assert_eq!(engine.global_color_temp(&night).kelvin(), 2500);
        assert_eq!(engine.color_temp_for_light("light.a", &night).kelvin(), 2800);
        assert_eq!(engine.global_brightness(&night), Brightness::MIN);
        assert_eq!(engine.brightness_for_light("light.a", &night), Brightness::MIN);
    }

    #[test]
    fn preview_adds_offset_without_mutating() {
        let engine = engine();
        let night = at("2024-06-21T01:00:00+01:00");
        let preview = engine.preview_white_balance("light.living_room", -500, &night).unwrap();
        assert_eq!(preview.color_temp.kelvin(), 1600);
        assert_eq!(engine.corrections("light.living_room").white_balance_offset, 100);

        assert!(matches!(
            engine.preview_white_balance("light.living_room", 1500, &night),
            Err(Error::Value(ValueError::OutOfRange { actual: 1500, .. }))
        ));
    }

    #[test]
    fn apply_to_configured_lights_only() {
        let engine = engine();
        let noon = at("2024-06-21T13:00:00+01:00");

        let all = engine.apply_to_lights(None, None, &noon);
        assert_eq!(all.len(), 2);

        let ids = [LightId::new("light.living_room"), LightId::new("light.unknown")];
        let calls = engine.apply_to_lights(Some(&ids[..]), Some(Duration::from_secs(5)), &noon);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].targets, vec![LightId::new("light.living_room")]);
        assert_eq!(calls[0].data.transition, Some(Duration::from_secs(5)));
        assert!(calls[0].data.brightness.is_some());
    }

    #[test]
    fn compute_now_reads_the_clock() {
        let clock = Arc::new(FixedClock::new(at("2024-06-21T01:00:00+01:00")));
        let engine = engine().with_clock(clock.clone());
        let night = engine.compute_now("light.living_room").unwrap();
        assert_eq!(night.color_temp.kelvin(), 2100);

        clock.set(at("2024-06-21T13:00:00+01:00"));
        let day = engine.compute_now("light.living_room").unwrap();
        assert!(day.color_temp.kelvin() > 6000);
    }

    #[test]
    fn summary_reports_lights() {
        let engine = engine();
        let summary = engine.summary(&at("2024-06-21T01:00:00+01:00"));
        assert!(summary.adaptive_enabled);
        assert_eq!(summary.total_lights, 2);
        assert_eq!(summary.enabled_lights, 1);
        assert_eq!(summary.sun_factor, 0.0);
        assert_eq!(
            summary.lights[0].current.map(|s| s.color_temp.kelvin()),
            Some(2100)
        );
        assert!(summary.lights[1].current.is_none());
    }
}
