// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for adaptive light control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time, so computed settings can never leave the range a light accepts.
//!
//! # Types
//!
//! - [`Brightness`] - Brightness level (1-255)
//! - [`ColorTemp`] - Color temperature in Kelvin (1000-10000)
//! - [`LightId`] - Identifier of a controlled light

mod brightness;
mod color;
mod light_id;

pub use brightness::Brightness;
pub use color::ColorTemp;
pub use light_id::LightId;
