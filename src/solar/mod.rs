// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sun position and the daylight curve.
//!
//! - [`sun_times`] computes sunrise, solar noon and sunset with the NOAA
//!   equations. It needs no network access and is deterministic for a given
//!   date and location.
//! - [`SunPositionCurve`] turns a timestamp into a daylight factor in
//!   `[0.0, 1.0]`, recovering from astronomical failures (polar day or night)
//!   with fixed civil times.

mod curve;
mod location;
mod noaa;

pub use curve::{
    SunPositionCurve, SunTimesSource, TRANSITION_HALF_WIDTH_MINUTES, TransitionWindows,
};
pub use location::Location;
pub use noaa::{SunTimes, sun_times};
