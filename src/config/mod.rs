// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration types for the adaptive engine.
//!
//! Configuration is built in code with `with_*` builders or loaded from JSON,
//! then handed to the [`AdaptiveEngine`](crate::engine::AdaptiveEngine) as an
//! immutable snapshot.
//!
//! - [`GlobalBounds`] - default brightness and color temperature range
//! - [`LightCorrection`] - per-light bounds, white balance and brightness factor
//! - [`EngineConfig`] - location, global bounds and the correction table
//!
//! Configuration is never rejected for out-of-range bounds. Instead
//! [`EngineConfig::validate`] lists every [`Violation`], and computation uses
//! best-effort [`ResolvedBounds`] for the affected lights.

mod bounds;
mod correction;
pub mod defaults;
mod engine_config;
mod validation;

pub use bounds::{GlobalBounds, ResolvedBounds};
pub use correction::LightCorrection;
pub use engine_config::EngineConfig;
pub use validation::Violation;
