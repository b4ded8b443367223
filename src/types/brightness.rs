// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness type for light control.
//!
//! Lights take brightness on a 1-255 scale. Zero is never a valid adaptive
//! output since it would turn the light off.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Brightness level on the 1-255 scale.
///
/// # Examples
///
/// ```
/// use sunlit::types::Brightness;
///
/// let b = Brightness::new(128).unwrap();
/// assert_eq!(b.value(), 128);
///
/// assert_eq!(Brightness::MIN.value(), 1);
/// assert_eq!(Brightness::MAX.value(), 255);
///
/// // Zero is rejected
/// assert!(Brightness::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Brightness(u8);

impl Brightness {
    /// Minimum brightness (1).
    pub const MIN: Self = Self(1);

    /// Maximum brightness (255).
    pub const MAX: Self = Self(255);

    /// Creates a new brightness value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is 0.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value == 0 {
            return Err(ValueError::OutOfRange {
                min: 1,
                max: 255,
                actual: 0,
            });
        }
        Ok(Self(value))
    }

    /// Creates a brightness value, clamping to the valid range.
    ///
    /// Accepts any integer so that products of corrections can be clamped
    /// without a lossy cast first.
    ///
    /// ```
    /// use sunlit::types::Brightness;
    ///
    /// assert_eq!(Brightness::clamped(0).value(), 1);
    /// assert_eq!(Brightness::clamped(510).value(), 255);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn clamped(value: i64) -> Self {
        if value < 1 {
            Self(1)
        } else if value > 255 {
            Self(255)
        } else {
            Self(value as u8)
        }
    }

    /// Rounds a floating-point brightness and clamps it to 1-255.
    ///
    /// Non-finite inputs map to the minimum.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_f64_clamped(value: f64) -> Self {
        if !value.is_finite() {
            return Self::MIN;
        }
        Self::clamped(value.round().clamp(1.0, 255.0) as i64)
    }

    /// Returns the raw 1-255 value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a fraction of full scale (value / 255).
    #[must_use]
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 255.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/255", self.0)
    }
}

impl TryFrom<u8> for Brightness {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Brightness> for u8 {
    fn from(value: Brightness) -> Self {
        value.0
    }
}
