// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Sunlit` - sun-driven adaptive brightness and color temperature for smart
//! lights.
//!
//! The crate computes, for any light at any moment, a brightness and a color
//! temperature that follow the sun: warm and dim at night, cool and bright
//! around solar noon. Per-light corrections (bounds, white balance offset,
//! brightness factor) are applied on top, and an interceptor fills in the
//! values for light commands that did not specify them.
//!
//! # Features
//!
//! - **Sun curve**: NOAA sunrise/sunset with smooth 30 minute transitions
//! - **Per-light corrections**: bounds, white balance offset, brightness factor
//! - **Command interception**: explicit values always win, batches are split
//!   per light
//! - **Adaptive toggles**: master switch and per-light toggles
//!
//! The crate never performs I/O. It returns [`ServiceCall`] values for the
//! host to forward to its lights.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use chrono::DateTime;
//! use sunlit::{
//!     AdaptiveEngine, AdaptiveInterceptor, EngineConfig, InterceptorChain, LightCommand,
//!     LightCorrection, Location, ServiceCall,
//! };
//!
//! let config = EngineConfig::new(Location::new(51.5074, -0.1278, "Europe/London")?)
//!     .with_light(
//!         LightCorrection::new("light.living_room")
//!             .with_color_temp_range(2000, 6500)
//!             .with_white_balance_offset(100)
//!             .with_brightness_factor(0.8),
//!     );
//! let engine = Arc::new(AdaptiveEngine::new(config));
//!
//! // Direct computation
//! let noon = DateTime::parse_from_rfc3339("2024-06-21T13:02:00+01:00").unwrap();
//! let settings = engine.compute("light.living_room", &noon)?;
//! assert_eq!(settings.color_temp.kelvin(), 6500);
//! assert_eq!(settings.brightness.value(), 204);
//!
//! // Command interception
//! let chain = InterceptorChain::new().with(AdaptiveInterceptor::new(Arc::clone(&engine)));
//! let calls = chain.process(ServiceCall::turn_on(["light.living_room"], LightCommand::new()));
//! assert_eq!(calls[0].data.brightness, Some(settings.brightness));
//! # Ok::<(), sunlit::Error>(())
//! ```
//!
//! # Logging
//!
//! Diagnostics go through [`tracing`]. The crate never installs a
//! subscriber.

pub mod clock;
pub mod command;
pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod light;
pub mod solar;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use command::{
    AdaptiveInterceptor, ColorTempValue, CommandContext, CommandInterceptor, InterceptorChain,
    LightCommand, LightService, ServiceCall,
};
pub use config::{EngineConfig, GlobalBounds, LightCorrection, ResolvedBounds, Violation};
pub use control::AdaptiveControl;
pub use engine::{
    AdaptiveEngine, AdaptiveSettings, AdaptiveSummary, LightSummary, apply_brightness_factor,
    apply_white_balance,
};
pub use error::{ComputationError, ConfigError, Error, Result, SolarError, ValueError};
pub use light::{AdaptiveLight, AdaptiveSwitch, LightAttributes, TargetState};
pub use solar::{Location, SunPositionCurve};
pub use types::{Brightness, ColorTemp, LightId};
