// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light-like objects with an adaptive toggle.
//!
//! - [`AdaptiveLight`] wraps one target light with a per-light toggle
//! - [`AdaptiveSwitch`] is the master switch fanning out to the engine and
//!   registered lights

mod adaptive_light;
mod switch;
mod target_state;

pub use adaptive_light::{AdaptiveLight, LightAttributes};
pub use switch::AdaptiveSwitch;
pub use target_state::TargetState;
