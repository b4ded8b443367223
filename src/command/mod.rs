// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light service calls and command middleware.
//!
//! The crate never talks to lights itself. It takes [`ServiceCall`] values
//! from the command source, runs them through an [`InterceptorChain`] and
//! returns the calls to forward to the actuator.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`ServiceCall`] | Service, targets, payload and context |
//! | [`LightCommand`] | Brightness, color temperature, transition and extra attributes |
//! | [`CommandInterceptor`] | Middleware hook that may rewrite or split a call |
//! | [`AdaptiveInterceptor`] | Fills unspecified fields with adaptive values |
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use sunlit::command::{AdaptiveInterceptor, InterceptorChain, LightCommand, ServiceCall};
//! use sunlit::config::{EngineConfig, LightCorrection};
//! use sunlit::engine::AdaptiveEngine;
//! use sunlit::solar::Location;
//! use sunlit::types::Brightness;
//!
//! let engine = Arc::new(AdaptiveEngine::new(
//!     EngineConfig::new(Location::new(51.5, -0.13, "Europe/London").unwrap())
//!         .with_light(LightCorrection::new("light.a"))
//!         .with_light(LightCorrection::new("light.b")),
//! ));
//! let chain = InterceptorChain::new().with(AdaptiveInterceptor::new(engine));
//!
//! let call = ServiceCall::turn_on(
//!     ["light.a", "light.b", "light.porch"],
//!     LightCommand::new().with_brightness(Brightness::new(100).unwrap()),
//! );
//! let out = chain.process(call);
//!
//! // One pass-through call for the porch light, one call per adaptive light.
//! assert_eq!(out.len(), 3);
//! assert!(out.iter().all(|c| c.data.brightness.unwrap().value() == 100));
//! assert!(out[0].data.color_temp.is_none());
//! assert!(out[1].data.color_temp.is_some());
//! ```

mod adaptive;
mod interceptor;
mod light_command;
mod service_call;

pub use adaptive::AdaptiveInterceptor;
pub(crate) use adaptive::adapt_payload;
pub use interceptor::{CommandInterceptor, InterceptorChain};
pub use light_command::{ColorTempValue, EXPLICIT_COLOR_KEYS, LightCommand};
pub use service_call::{CommandContext, LightService, ServiceCall};
