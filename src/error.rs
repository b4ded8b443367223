// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `sunlit` library.
//!
//! The hierarchy separates value validation, configuration invariants,
//! astronomical lookups and unexpected computation failures. Configuration
//! invariants are reported as [`Violation`](crate::config::Violation) lists
//! rather than returned as errors. None of them is
//! meant to be fatal to the host: callers fall back to forwarding the user's
//! command unmodified.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Configuration could not be parsed.
    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Unexpected failure while computing adaptive values.
    #[error("computation error: {0}")]
    Computation(#[from] ComputationError),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// A latitude outside [-90, 90] or not finite.
    #[error("latitude {0} is out of range [-90, 90]")]
    InvalidLatitude(String),

    /// A longitude outside [-180, 180] or not finite.
    #[error("longitude {0} is out of range [-180, 180]")]
    InvalidLongitude(String),

    /// A time zone name missing from the IANA database.
    #[error("unknown time zone {0:?}")]
    UnknownTimeZone(String),
}

/// Invariant violations of global bounds or a per-light correction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The lower color temperature bound is not below the upper one.
    #[error("color temperature range is inverted: min={min}K >= max={max}K")]
    InvertedColorTempRange {
        /// Configured minimum.
        min: u16,
        /// Configured maximum.
        max: u16,
    },

    /// A color temperature bound is outside 1000K-10000K.
    #[error("color temperature {value}K is outside 1000K-10000K")]
    ColorTempOutOfRange {
        /// The offending value.
        value: u16,
    },

    /// The lower brightness bound is not below the upper one.
    #[error("brightness range is inverted: min={min} >= max={max}")]
    InvertedBrightnessRange {
        /// Configured minimum.
        min: u8,
        /// Configured maximum.
        max: u8,
    },

    /// A brightness bound of zero.
    #[error("brightness bound {value} is outside 1-255")]
    BrightnessOutOfRange {
        /// The offending value.
        value: u8,
    },

    /// The brightness factor is zero, negative or not finite.
    #[error("brightness factor {0} must be a positive finite number")]
    NonPositiveBrightnessFactor(f64),

    /// The brightness factor is outside the recommended 0.1-2.0 range.
    #[error("brightness factor {0:.2} is outside the recommended range 0.1-2.0")]
    BrightnessFactorNotRecommended(f64),

    /// The white balance offset is outside the recommended ±1000K range.
    #[error("white balance offset {0}K is outside the recommended range -1000K to 1000K")]
    WhiteBalanceOffsetNotRecommended(i32),
}

impl ConfigError {
    /// Returns `true` for violations that only leave the recommended range.
    ///
    /// Such values are still used as configured; the output is clamped.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::BrightnessFactorNotRecommended(_) | Self::WhiteBalanceOffsetNotRecommended(_)
        )
    }
}

/// Failures of the astronomical sunrise/sunset lookup.
///
/// Always recovered inside the crate by falling back to civil times.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolarError {
    /// The sun never sets on this date at this latitude.
    #[error("sun stays above the horizon all day")]
    PolarDay,

    /// The sun never rises on this date at this latitude.
    #[error("sun stays below the horizon all day")]
    PolarNight,

    /// The equations produced a non-finite or unrepresentable time.
    #[error("sun times could not be represented")]
    Unrepresentable,
}

/// Unexpected internal failure while computing adaptive settings.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComputationError {
    /// An intermediate value was NaN or infinite.
    #[error("non-finite {quantity} for light {light}")]
    NonFinite {
        /// The light being computed.
        light: String,
        /// Which intermediate value went wrong.
        quantity: &'static str,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
