// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sun position curve.
//!
//! Maps a timestamp to a normalized daylight factor: 0.0 at night, 1.0 at the
//! middle of the day, with raised-cosine transitions centered on sunrise and
//! sunset.

use std::f64::consts::PI;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use super::noaa::{SunTimes, sun_times};
use super::Location;

/// Half-width of the sunrise and sunset transition windows, in minutes.
pub const TRANSITION_HALF_WIDTH_MINUTES: i64 = 30;

/// Where a set of sun times came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunTimesSource {
    /// Computed from the solar equations.
    Astronomical,
    /// Fixed 06:00 / 12:00 / 18:00 civil times, used when the equations fail.
    CivilFallback,
}

/// Transition window boundaries for one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionWindows {
    /// Start of the sunrise transition (`sunrise - 30m`).
    pub sunrise_start: DateTime<Utc>,
    /// End of the sunrise transition (`sunrise + 30m`).
    pub sunrise_end: DateTime<Utc>,
    /// Start of the sunset transition (`sunset - 30m`).
    pub sunset_start: DateTime<Utc>,
    /// End of the sunset transition (`sunset + 30m`).
    pub sunset_end: DateTime<Utc>,
    /// Solar noon of the same day.
    pub solar_noon: DateTime<Utc>,
    /// Whether the boundaries are astronomical or the civil fallback.
    pub source: SunTimesSource,
}

impl TransitionWindows {
    fn from_sun_times(times: SunTimes, source: SunTimesSource) -> Self {
        let half = TimeDelta::minutes(TRANSITION_HALF_WIDTH_MINUTES);
        Self {
            sunrise_start: times.sunrise - half,
            sunrise_end: times.sunrise + half,
            sunset_start: times.sunset - half,
            sunset_end: times.sunset + half,
            solar_noon: times.solar_noon,
            source,
        }
    }
}

/// Pure mapping from time of day to a daylight factor in `[0.0, 1.0]`.
///
/// Holds only the immutable [`Location`]; every call recomputes the sun
/// times for the calendar date of the instant in the location's time zone.
/// The UTC offset carried by the timestamp does not affect the result.
///
/// The factor is:
///
/// - `0.0` before `sunrise - 30m` and after `sunset + 30m`;
/// - a raised-cosine ease-in from `0.0` to `0.5` across the sunrise window;
/// - a sine arch from `0.5` up to `1.0` at mid-day and back to `0.5`;
/// - a raised-cosine ease-out from `0.5` to `0.0` across the sunset window.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sunlit::solar::{Location, SunPositionCurve};
///
/// let curve = SunPositionCurve::new(Location::new(51.5074, -0.1278, "Europe/London").unwrap());
///
/// let midnight = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
/// assert_eq!(curve.factor(&midnight), 0.0);
///
/// let midday = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
/// assert!(curve.factor(&midday) > 0.99);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SunPositionCurve {
    location: Location,
}

impl SunPositionCurve {
    /// Creates a curve for a fixed location.
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self { location }
    }

    /// Returns the location this curve was built for.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the transition windows for the date of `at` in the location's
    /// time zone.
    ///
    /// Falls back to 06:00 / 12:00 / 18:00 in that time zone when the
    /// astronomical computation fails.
    pub fn windows<Z: TimeZone>(&self, at: &DateTime<Z>) -> TransitionWindows {
        let tz = self.location.tz();
        let date = at.with_timezone(&tz).date_naive();
        match sun_times(&self.location, date) {
            Ok(times) => TransitionWindows::from_sun_times(times, SunTimesSource::Astronomical),
            Err(err) => {
                tracing::debug!(
                    %date,
                    latitude = self.location.latitude(),
                    error = %err,
                    "Sun times unavailable, using civil fallback"
                );
                TransitionWindows::from_sun_times(
                    civil_fallback(date, tz),
                    SunTimesSource::CivilFallback,
                )
            }
        }
    }

    /// Returns the daylight factor at `at`, always within `[0.0, 1.0]`.
    pub fn factor<Z: TimeZone>(&self, at: &DateTime<Z>) -> f64 {
        let windows = self.windows(at);
        factor_within(&windows, at.with_timezone(&Utc))
    }
}

/// Evaluates the piecewise curve for a single instant.
pub(crate) fn factor_within(w: &TransitionWindows, t: DateTime<Utc>) -> f64 {
    let transition_ms = 2.0 * millis(TimeDelta::minutes(TRANSITION_HALF_WIDTH_MINUTES));

    let factor = if t < w.sunrise_start || t > w.sunset_end {
        0.0
    } else if t < w.sunrise_end {
        let p = millis(t - w.sunrise_start) / transition_ms;
        0.25 * (1.0 - (p * PI).cos())
    } else if t < w.sunset_start {
        // sunrise_end <= t < sunset_start, so the span is positive
        let d = millis(t - w.sunrise_end) / millis(w.sunset_start - w.sunrise_end);
        0.5 + 0.5 * (d * PI).sin()
    } else {
        let p = millis(t - w.sunset_start) / transition_ms;
        0.25 * (1.0 + (p * PI).cos())
    };

    factor.clamp(0.0, 1.0)
}

#[allow(clippy::cast_precision_loss)]
fn millis(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64
}

fn civil_fallback(date: NaiveDate, tz: Tz) -> SunTimes {
    let civil = |hour: u32| -> DateTime<Utc> {
        let local = date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default());
        tz.from_local_datetime(&local)
            .earliest()
            .map_or_else(|| local.and_utc(), |dt| dt.with_timezone(&Utc))
    };
    SunTimes {
        sunrise: civil(6),
        solar_noon: civil(12),
        sunset: civil(18),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset};

    use super::*;

    fn london() -> SunPositionCurve {
        SunPositionCurve::new(Location::new(51.5074, -0.1278, "Europe/London").unwrap())
    }

    fn solstice_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap()
    }

    #[test]
    fn deep_night_is_exactly_zero() {
        let curve = london();
        let w = curve.windows(&solstice_noon());
        assert_eq!(curve.factor(&(w.sunrise_start - Duration::minutes(1))), 0.0);
        assert_eq!(curve.factor(&(w.sunset_end + Duration::seconds(1))), 0.0);
    }

    #[test]
    fn boundary_values() {
        let curve = london();
        let w = curve.windows(&solstice_noon());
        assert_eq!(w.source, SunTimesSource::Astronomical);

        assert!(factor_within(&w, w.sunrise_start).abs() < 1e-12);
        assert!((factor_within(&w, w.sunrise_end) - 0.5).abs() < 1e-12);
        assert!((factor_within(&w, w.sunset_start) - 0.5).abs() < 1e-9);
        assert!(factor_within(&w, w.sunset_end).abs() < 1e-12);

        let sunrise = w.sunrise_start + Duration::minutes(30);
        assert!((factor_within(&w, sunrise) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn continuous_across_boundaries() {
        let curve = london();
        let w = curve.windows(&solstice_noon());
        let eps = Duration::milliseconds(1);
        for boundary in [w.sunrise_start, w.sunrise_end, w.sunset_start, w.sunset_end] {
            let before = factor_within(&w, boundary - eps);
            let at = factor_within(&w, boundary);
            let after = factor_within(&w, boundary + eps);
            assert!((before - at).abs() < 1e-4, "jump before {boundary}");
            assert!((after - at).abs() < 1e-4, "jump after {boundary}");
        }
    }

    #[test]
    fn peaks_at_mid_day() {
        let curve = london();
        let w = curve.windows(&solstice_noon());
        let mid = w.sunrise_end + (w.sunset_start - w.sunrise_end) / 2;
        assert!((factor_within(&w, mid) - 1.0).abs() < 1e-9);
        // Mid-day lands within a few minutes of solar noon.
        assert!((mid - w.solar_noon).num_minutes().abs() <= 5);
    }

    #[test]
    fn bounded_over_whole_day() {
        let curve = london();
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        for step in 0..(24 * 12) {
            let t = start + Duration::minutes(step * 5);
            let f = curve.factor(&t);
            assert!((0.0..=1.0).contains(&f), "factor {f} out of range at {t}");
        }
    }

    #[test]
    fn rises_monotonically_through_sunrise() {
        let curve = london();
        let w = curve.windows(&solstice_noon());
        let mut previous = 0.0;
        for minute in 0..=60 {
            let f = factor_within(&w, w.sunrise_start + Duration::minutes(minute));
            assert!(f >= previous);
            previous = f;
        }
    }

    #[test]
    fn polar_day_uses_civil_fallback() {
        let curve = SunPositionCurve::new(Location::new(78.22, 15.65, "Arctic/Longyearbyen").unwrap());
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = cest.with_ymd_and_hms(2024, 6, 21, 3, 0, 0).unwrap();

        let w = curve.windows(&at);
        assert_eq!(w.source, SunTimesSource::CivilFallback);
        // 06:00 local in +02:00 is 04:00 UTC
        assert_eq!(
            w.sunrise_start + Duration::minutes(30),
            Utc.with_ymd_and_hms(2024, 6, 21, 4, 0, 0).unwrap()
        );
        assert_eq!(curve.factor(&at), 0.0);

        let noon = cest.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        assert!((curve.factor(&noon) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn touching_windows_hand_over_at_half() {
        let t = solstice_noon();
        let w = TransitionWindows {
            sunrise_start: t - Duration::minutes(60),
            sunrise_end: t,
            sunset_start: t,
            sunset_end: t + Duration::minutes(60),
            solar_noon: t,
            source: SunTimesSource::Astronomical,
        };
        // t == sunset_start falls in the sunset window at its 0.5 start value
        assert!((factor_within(&w, t) - 0.5).abs() < 1e-12);
        assert_eq!(factor_within(&w, t + Duration::minutes(61)), 0.0);
    }

    #[test]
    fn offset_of_timestamp_does_not_matter() {
        let curve = SunPositionCurve::new(
            Location::new(-33.8688, 151.2093, "Australia/Sydney").unwrap(),
        );
        let aedt = FixedOffset::east_opt(11 * 3600).unwrap();
        let local = aedt.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let utc = Utc.with_ymd_and_hms(2024, 1, 14, 23, 0, 0).unwrap();
        assert_eq!(local, utc);

        assert_eq!(curve.windows(&local), curve.windows(&utc));
        assert_eq!(curve.factor(&local), curve.factor(&utc));
        assert!(curve.factor(&utc) > 0.5);
    }

    #[test]
    fn civil_fallback_uses_location_zone() {
        let curve = SunPositionCurve::new(Location::new(78.22, 15.65, "Arctic/Longyearbyen").unwrap());
        // 22:30 UTC on the 20th is already the 21st in Longyearbyen (+02:00)
        let w = curve.windows(&Utc.with_ymd_and_hms(2024, 6, 20, 22, 30, 0).unwrap());
        assert_eq!(w.source, SunTimesSource::CivilFallback);
        assert_eq!(w.solar_noon, Utc.with_ymd_and_hms(2024, 6, 21, 10, 0, 0).unwrap());
    }

    #[test]
    fn local_date_drives_sun_times() {
        let curve = london();
        let bst = FixedOffset::east_opt(3600).unwrap();
        // 00:30 local on the 22nd is still 23:30 UTC on the 21st
        let at = bst.with_ymd_and_hms(2024, 6, 22, 0, 30, 0).unwrap();
        let w = curve.windows(&at);
        assert_eq!(w.solar_noon.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 22).unwrap());
        assert_eq!(curve.factor(&at), 0.0);
    }
}
