// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Default configuration values.

use std::ops::RangeInclusive;

/// Default lowest brightness.
pub const MIN_BRIGHTNESS: u8 = 1;
/// Default highest brightness.
pub const MAX_BRIGHTNESS: u8 = 255;
/// Default warm bound in Kelvin.
pub const MIN_COLOR_TEMP: u16 = 2000;
/// Default cool bound in Kelvin.
pub const MAX_COLOR_TEMP: u16 = 6500;
/// Default white balance offset in Kelvin.
pub const WHITE_BALANCE_OFFSET: i32 = 0;
/// Default brightness factor.
pub const BRIGHTNESS_FACTOR: f64 = 1.0;
/// Default transition in seconds.
pub const TRANSITION_SECS: u64 = 1;

/// Hard range for any configured color temperature bound.
pub const COLOR_TEMP_RANGE: RangeInclusive<u16> = 1000..=10000;
/// Recommended white balance offsets.
pub const RECOMMENDED_OFFSET_RANGE: RangeInclusive<i32> = -1000..=1000;
/// Recommended brightness factors.
pub const RECOMMENDED_FACTOR_RANGE: RangeInclusive<f64> = 0.1..=2.0;

// serde default helpers

#[allow(clippy::unnecessary_wraps)]
pub(crate) fn light_min_color_temp() -> Option<u16> {
    Some(MIN_COLOR_TEMP)
}

#[allow(clippy::unnecessary_wraps)]
pub(crate) fn light_max_color_temp() -> Option<u16> {
    Some(MAX_COLOR_TEMP)
}

pub(crate) fn brightness_factor() -> f64 {
    BRIGHTNESS_FACTOR
}

pub(crate) fn enabled() -> bool {
    true
}
