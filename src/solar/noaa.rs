// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! NOAA sunrise, sunset and solar noon equations.
//!
//! Julian day -> Julian century -> geometric mean longitude/anomaly ->
//! equation of center -> apparent longitude -> declination -> hour angle.
//! Accurate to roughly a minute for latitudes outside the polar circles.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};

use crate::error::SolarError;

use super::Location;

/// Zenith angle of the sun's upper limb at sunrise/sunset, with refraction.
const SUNRISE_ZENITH_DEG: f64 = 90.833;

/// Sunrise, solar noon and sunset for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    /// Moment the upper limb of the sun crosses the horizon in the morning.
    pub sunrise: DateTime<Utc>,
    /// Moment the sun is highest.
    pub solar_noon: DateTime<Utc>,
    /// Moment the upper limb of the sun crosses the horizon in the evening.
    pub sunset: DateTime<Utc>,
}

/// Orbital parameters derived from the Julian century.
struct SolarParams {
    /// Solar declination (deg).
    declination: f64,
    /// Equation of time (minutes).
    eq_time: f64,
}

fn julian_day(date: NaiveDate, hour_frac: f64) -> f64 {
    #[allow(clippy::cast_possible_wrap)]
    let (y, m) = if date.month() <= 2 {
        (date.year() - 1, date.month() as i32 + 12)
    } else {
        (date.year(), date.month() as i32)
    };

    let a = y / 100;
    let b = 2 - a + a / 4;

    (365.25 * f64::from(y + 4716)).floor()
        + (30.6001 * f64::from(m + 1)).floor()
        + f64::from(date.day())
        + f64::from(b)
        - 1524.5
        + hour_frac / 24.0
}

fn compute_solar_params(jc: f64) -> SolarParams {
    let l0 = (280.46646 + jc * (36000.76983 + 0.000_303_2 * jc)) % 360.0;
    let m = 357.52911 + jc * (35999.05029 - 0.000_153_7 * jc);
    let m_rad = m.to_radians();
    let e = 0.016_708_634 - jc * (0.000_042_037 + 0.000_000_126_7 * jc);

    // Equation of center
    let c = m_rad.sin() * (1.914_602 - jc * (0.004_817 + 0.000_014 * jc))
        + (2.0 * m_rad).sin() * (0.019_993 - 0.000_101 * jc)
        + (3.0 * m_rad).sin() * 0.000_289;

    let true_lon = l0 + c;
    let omega = 125.04 - 1934.136 * jc;
    let apparent_lon = true_lon - 0.00569 - 0.00478 * omega.to_radians().sin();

    let obliq_mean = 23.0
        + (26.0 + (21.448 - jc * (46.815 + jc * (0.00059 - jc * 0.001_813))) / 60.0) / 60.0;
    let obliq_corr = (obliq_mean + 0.00256 * omega.to_radians().cos()).to_radians();

    let declination = (obliq_corr.sin() * apparent_lon.to_radians().sin())
        .asin()
        .to_degrees();

    let var_y = (obliq_corr / 2.0).tan().powi(2);
    let l0_rad = l0.to_radians();
    let eq_time = 4.0
        * (var_y * (2.0 * l0_rad).sin() - 2.0 * e * m_rad.sin()
            + 4.0 * e * var_y * m_rad.sin() * (2.0 * l0_rad).cos()
            - 0.5 * var_y * var_y * (4.0 * l0_rad).sin()
            - 1.25 * e * e * (2.0 * m_rad).sin())
        .to_degrees();

    SolarParams {
        declination,
        eq_time,
    }
}

/// Calculates sunrise, solar noon and sunset for `date` at `location`.
///
/// Times are minutes from UTC midnight of `date`, so they belong to the
/// local calendar day when `date` is the date in the location's time zone.
///
/// # Errors
///
/// Returns `SolarError::PolarDay` or `SolarError::PolarNight` when the sun
/// does not cross the horizon on that date, and
/// `SolarError::Unrepresentable` if the result is not a finite instant.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sunlit::solar::{Location, sun_times};
///
/// let london = Location::new(51.5074, -0.1278, "Europe/London").unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
/// let times = sun_times(&london, date).unwrap();
/// assert!(times.sunrise < times.solar_noon && times.solar_noon < times.sunset);
/// ```
pub fn sun_times(location: &Location, date: NaiveDate) -> Result<SunTimes, SolarError> {
    let jd = julian_day(date, 12.0);
    let jc = (jd - 2_451_545.0) / 36525.0;
    let sp = compute_solar_params(jc);

    let lat_rad = location.latitude().to_radians();
    let declin_rad = sp.declination.to_radians();

    let cos_ha = SUNRISE_ZENITH_DEG.to_radians().cos() / (lat_rad.cos() * declin_rad.cos())
        - lat_rad.tan() * declin_rad.tan();

    if cos_ha > 1.0 {
        return Err(SolarError::PolarNight);
    }
    if cos_ha < -1.0 {
        return Err(SolarError::PolarDay);
    }

    let ha = cos_ha.acos().to_degrees();
    let lon = location.longitude();

    let noon_min = 720.0 - 4.0 * lon - sp.eq_time;
    let sunrise_min = noon_min - 4.0 * ha;
    let sunset_min = noon_min + 4.0 * ha;

    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or(SolarError::Unrepresentable)?
        .and_utc();

    Ok(SunTimes {
        sunrise: offset_minutes(midnight, sunrise_min)?,
        solar_noon: offset_minutes(midnight, noon_min)?,
        sunset: offset_minutes(midnight, sunset_min)?,
    })
}

#[allow(clippy::cast_possible_truncation)]
fn offset_minutes(base: DateTime<Utc>, minutes: f64) -> Result<DateTime<Utc>, SolarError> {
    if !minutes.is_finite() {
        return Err(SolarError::Unrepresentable);
    }
    let delta = TimeDelta::try_milliseconds((minutes * 60_000.0).round() as i64)
        .ok_or(SolarError::Unrepresentable)?;
    base.checked_add_signed(delta)
        .ok_or(SolarError::Unrepresentable)
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn minutes_of_day(t: DateTime<Utc>) -> i64 {
        i64::from(t.hour()) * 60 + i64::from(t.minute())
    }

    fn assert_near(actual: DateTime<Utc>, hour: i64, minute: i64) {
        let expected = hour * 60 + minute;
        let diff = (minutes_of_day(actual) - expected).abs();
        assert!(diff <= 3, "expected ~{hour:02}:{minute:02} UTC, got {actual}");
    }

    #[test]
    fn london_summer_solstice() {
        let london = Location::new(51.5074, -0.1278, "Europe/London").unwrap();
        let times = sun_times(&london, date(2024, 6, 21)).unwrap();
        assert_near(times.sunrise, 3, 43);
        assert_near(times.solar_noon, 12, 2);
        assert_near(times.sunset, 20, 21);
    }

    #[test]
    fn london_winter_solstice() {
        let london = Location::new(51.5074, -0.1278, "Europe/London").unwrap();
        let times = sun_times(&london, date(2024, 12, 21)).unwrap();
        assert_near(times.sunrise, 8, 4);
        assert_near(times.sunset, 15, 54);
    }

    #[test]
    fn new_york_equinox() {
        let nyc = Location::new(40.7128, -74.0060, "America/New_York").unwrap();
        let times = sun_times(&nyc, date(2024, 3, 20)).unwrap();
        assert_near(times.sunrise, 10, 58);
        assert_near(times.sunset, 23, 8);
    }

    #[test]
    fn svalbard_polar_cases() {
        let longyearbyen = Location::new(78.22, 15.65, "Arctic/Longyearbyen").unwrap();
        assert_eq!(
            sun_times(&longyearbyen, date(2024, 6, 21)),
            Err(SolarError::PolarDay)
        );
        assert_eq!(
            sun_times(&longyearbyen, date(2024, 12, 21)),
            Err(SolarError::PolarNight)
        );
    }

    #[test]
    fn solar_noon_is_midpoint() {
        let sydney = Location::new(-33.8688, 151.2093, "Australia/Sydney").unwrap();
        let times = sun_times(&sydney, date(2024, 1, 15)).unwrap();
        let before = times.solar_noon - times.sunrise;
        let after = times.sunset - times.solar_noon;
        assert!((before - after).num_seconds().abs() <= 1);
    }
}
