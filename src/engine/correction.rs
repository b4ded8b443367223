// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-light corrections applied after the time-based values.

use crate::config::ResolvedBounds;
use crate::types::{Brightness, ColorTemp};

/// Shifts a color temperature by a white balance offset.
///
/// The clamp to the light's bounds is the last step, so no offset can push
/// the result outside `[min_color_temp, max_color_temp]`.
///
/// # Examples
///
/// ```
/// use sunlit::config::GlobalBounds;
/// use sunlit::engine::apply_white_balance;
/// use sunlit::types::ColorTemp;
///
/// let bounds = GlobalBounds::default().resolve(None); // 2000K-6500K
/// let base = ColorTemp::new(3000).unwrap();
///
/// assert_eq!(apply_white_balance(base, 5000, &bounds), bounds.max_color_temp);
/// assert_eq!(apply_white_balance(base, -5000, &bounds), bounds.min_color_temp);
/// assert_eq!(apply_white_balance(ColorTemp::NEUTRAL, 0, &bounds), ColorTemp::NEUTRAL);
/// ```
#[must_use]
pub fn apply_white_balance(base: ColorTemp, offset: i32, bounds: &ResolvedBounds) -> ColorTemp {
    bounds.clamp_color_temp(i64::from(base.kelvin()) + i64::from(offset))
}

/// Scales a brightness by a factor, rounding and clamping to 1-255.
///
/// # Examples
///
/// ```
/// use sunlit::engine::apply_brightness_factor;
/// use sunlit::types::Brightness;
///
/// let b = |v| Brightness::new(v).unwrap();
/// assert_eq!(apply_brightness_factor(b(5), 0.1).value(), 1);
/// assert_eq!(apply_brightness_factor(b(200), 2.0).value(), 255);
/// assert_eq!(apply_brightness_factor(b(128), 1.0).value(), 128);
/// ```
#[must_use]
pub fn apply_brightness_factor(base: Brightness, factor: f64) -> Brightness {
    Brightness::from_f64_clamped(f64::from(base.value()) * factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GlobalBounds, LightCorrection};

    fn narrow() -> ResolvedBounds {
        GlobalBounds::default().resolve(Some(
            &LightCorrection::new("light.narrow").with_color_temp_range(2700, 4000),
        ))
    }

    #[test]
    fn white_balance_respects_light_bounds() {
        let bounds = narrow();
        let base = ColorTemp::new(3900).unwrap();
        assert_eq!(apply_white_balance(base, 500, &bounds).kelvin(), 4000);
        assert_eq!(apply_white_balance(base, -300, &bounds).kelvin(), 3600);
    }

    #[test]
    fn white_balance_extreme_offsets() {
        let bounds = narrow();
        let base = ColorTemp::new(3000).unwrap();
        assert_eq!(apply_white_balance(base, i32::MAX, &bounds).kelvin(), 4000);
        assert_eq!(apply_white_balance(base, i32::MIN, &bounds).kelvin(), 2700);
    }

    #[test]
    fn brightness_factor_extremes() {
        let b = Brightness::new(100).unwrap();
        assert_eq!(apply_brightness_factor(b, 10.0).value(), 255);
        assert_eq!(apply_brightness_factor(b, 0.001).value(), 1);
        assert_eq!(apply_brightness_factor(b, -1.0).value(), 1);
        assert_eq!(apply_brightness_factor(b, 0.8).value(), 80);
    }
}
