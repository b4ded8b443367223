// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adaptive settings computation.
//!
//! [`AdaptiveEngine`] turns the daylight factor from the
//! [`SunPositionCurve`](crate::solar::SunPositionCurve) into brightness and
//! color temperature for each light:
//!
//! 1. resolve the light's effective bounds (per-light override, else global)
//! 2. interpolate color temperature and brightness at the daylight factor
//! 3. add the white balance offset and re-clamp to the light's bounds
//! 4. scale brightness by the light's factor and clamp to 1-255

mod adaptive_engine;
mod correction;
mod settings;
mod summary;

pub use adaptive_engine::AdaptiveEngine;
pub use correction::{apply_brightness_factor, apply_white_balance};
pub use settings::AdaptiveSettings;
pub use summary::{AdaptiveSummary, LightSummary};
