// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color temperature type for light control.
//!
//! Adaptive values are computed in Kelvin. Some lights report and accept
//! mireds instead, so conversions in both directions are provided.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Color temperature in Kelvin (1000-10000).
///
/// Higher values are cooler (bluer), lower values are warmer.
///
/// - 6500K - Cool daylight
/// - 4000K - Neutral white
/// - 2000K - Warm candlelight
///
/// # Examples
///
/// ```
/// use sunlit::types::ColorTemp;
///
/// let ct = ColorTemp::new(4000).unwrap();
/// assert_eq!(ct.kelvin(), 4000);
/// assert_eq!(ct.to_mireds(), 250);
///
/// assert!(ColorTemp::new(500).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ColorTemp(u16);

impl ColorTemp {
    /// Lowest supported color temperature in Kelvin.
    pub const MIN_KELVIN: u16 = 1000;

    /// Highest supported color temperature in Kelvin.
    pub const MAX_KELVIN: u16 = 10000;

    /// Cool daylight (6500K).
    pub const DAYLIGHT: Self = Self(6500);

    /// Neutral white (4000K).
    pub const NEUTRAL: Self = Self(4000);

    /// Warm white (2700K).
    pub const WARM: Self = Self(2700);

    /// Candlelight (2000K).
    pub const CANDLE: Self = Self(2000);

    /// Creates a new color temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [1000, 10000].
    pub fn new(kelvin: u16) -> Result<Self, ValueError> {
        if !(Self::MIN_KELVIN..=Self::MAX_KELVIN).contains(&kelvin) {
            return Err(ValueError::OutOfRange {
                min: i64::from(Self::MIN_KELVIN),
                max: i64::from(Self::MAX_KELVIN),
                actual: i64::from(kelvin),
            });
        }
        Ok(Self(kelvin))
    }

    /// Creates a color temperature, clamping to the supported range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn clamped(kelvin: i64) -> Self {
        if kelvin < Self::MIN_KELVIN as i64 {
            Self(Self::MIN_KELVIN)
        } else if kelvin > Self::MAX_KELVIN as i64 {
            Self(Self::MAX_KELVIN)
        } else {
            Self(kelvin as u16)
        }
    }

    /// Returns the color temperature in Kelvin.
    #[must_use]
    pub const fn kelvin(&self) -> u16 {
        self.0
    }

    /// Returns the color temperature in mireds (rounded).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_mireds(&self) -> u16 {
        let k = u32::from(self.0);
        ((1_000_000 + k / 2) / k) as u16
    }

    /// Creates a color temperature from mireds, clamping the result.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for zero mireds.
    pub fn from_mireds(mireds: u16) -> Result<Self, ValueError> {
        if mireds == 0 {
            return Err(ValueError::OutOfRange {
                min: 100,
                max: 1000,
                actual: 0,
            });
        }
        let kelvin = 1_000_000 / i64::from(mireds);
        Ok(Self::clamped(kelvin))
    }
}

impl Default for ColorTemp {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl fmt::Display for ColorTemp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.0)
    }
}

impl TryFrom<u16> for ColorTemp {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColorTemp> for u16 {
    fn from(value: ColorTemp) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_temp_valid_range() {
        assert!(ColorTemp::new(1000).is_ok());
        assert!(ColorTemp::new(10000).is_ok());
        assert!(ColorTemp::new(999).is_err());
        assert!(ColorTemp::new(10001).is_err());
    }

    #[test]
    fn color_temp_clamped() {
        assert_eq!(ColorTemp::clamped(-3000).kelvin(), 1000);
        assert_eq!(ColorTemp::clamped(4200).kelvin(), 4200);
        assert_eq!(ColorTemp::clamped(65_000).kelvin(), 10000);
    }

    #[test]
    fn color_temp_mireds() {
        assert_eq!(ColorTemp::DAYLIGHT.to_mireds(), 154);
        assert_eq!(ColorTemp::NEUTRAL.to_mireds(), 250);
        assert_eq!(ColorTemp::CANDLE.to_mireds(), 500);
    }

    #[test]
    fn color_temp_from_mireds() {
        assert_eq!(ColorTemp::from_mireds(250).unwrap().kelvin(), 4000);
        assert_eq!(ColorTemp::from_mireds(500).unwrap().kelvin(), 2000);
        // 1_000_000 / 50 = 20000K, clamped
        assert_eq!(ColorTemp::from_mireds(50).unwrap().kelvin(), 10000);
        assert!(ColorTemp::from_mireds(0).is_err());
    }

    #[test]
    fn color_temp_display() {
        assert_eq!(ColorTemp::WARM.to_string(), "2700K");
    }

    #[test]
    fn color_temp_serde() {
        let ct: ColorTemp = serde_json::from_str("3000").unwrap();
        assert_eq!(ct.kelvin(), 3000);
        assert!(serde_json::from_str::<ColorTemp>("200").is_err());
    }
}
