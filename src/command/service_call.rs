// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light service calls.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::types::{Brightness, ColorTemp, LightId};

use super::LightCommand;

/// The light service being called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightService {
    TurnOn,
    TurnOff,
    Toggle,
}

impl LightService {
    /// Returns `true` for services that can switch a light on and therefore
    /// take adaptive values.
    #[must_use]
    pub const fn turns_on(self) -> bool {
        matches!(self, Self::TurnOn | Self::Toggle)
    }

    /// Returns the service name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TurnOn => "turn_on",
            Self::TurnOff => "turn_off",
            Self::Toggle => "toggle",
        }
    }
}

impl fmt::Display for LightService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the originating request of a call.
///
/// Calls split from one command share its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandContext {
    /// Unique id of this request.
    pub id: Uuid,
    /// Id of the request that caused this one, if any.
    pub parent_id: Option<Uuid>,
}

impl CommandContext {
    /// Creates a fresh context with a random id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_id: None,
        }
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A light service call addressed to one or more lights.
///
/// # Examples
///
/// ```
/// use sunlit::command::{LightCommand, ServiceCall};
/// use sunlit::types::Brightness;
///
/// let call = ServiceCall::turn_on(
///     ["light.kitchen", "light.hall"],
///     LightCommand::new().with_brightness(Brightness::new(128).unwrap()),
/// );
///
/// assert_eq!(
///     call.to_service_data(),
///     serde_json::json!({
///         "entity_id": ["light.kitchen", "light.hall"],
///         "brightness": 128,
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCall {
    /// The service.
    pub service: LightService,
    /// Target lights.
    pub targets: Vec<LightId>,
    /// Payload.
    pub data: LightCommand,
    /// Originating request.
    pub context: CommandContext,
}

impl ServiceCall {
    /// Creates a call with a fresh context.
    #[must_use]
    pub fn new<I, T>(service: LightService, targets: I, data: LightCommand) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LightId>,
    {
        Self {
            service,
            targets: targets.into_iter().map(Into::into).collect(),
            data,
            context: CommandContext::new(),
        }
    }

    /// Creates a `turn_on` call.
    #[must_use]
    pub fn turn_on<I, T>(targets: I, data: LightCommand) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LightId>,
    {
        Self::new(LightService::TurnOn, targets, data)
    }

    /// Creates a `turn_off` call with an optional transition.
    #[must_use]
    pub fn turn_off<I, T>(targets: I, transition: Option<Duration>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LightId>,
    {
        let data = LightCommand {
            transition,
            ..LightCommand::default()
        };
        Self::new(LightService::TurnOff, targets, data)
    }

    /// Creates a `toggle` call.
    #[must_use]
    pub fn toggle<I, T>(targets: I, data: LightCommand) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LightId>,
    {
        Self::new(LightService::Toggle, targets, data)
    }

    /// Creates a `turn_on` call with a manual color temperature.
    ///
    /// Both color temperature and brightness (when given) are explicit, so
    /// adaptive interception leaves the color alone.
    #[must_use]
    pub fn manual_color_temp<I, T>(
        targets: I,
        color_temp: ColorTemp,
        brightness: Option<Brightness>,
        transition: Option<Duration>,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LightId>,
    {
        let data = LightCommand {
            brightness,
            transition,
            ..LightCommand::new().with_color_temp(color_temp)
        };
        Self::turn_on(targets, data)
    }

    /// Replaces the context.
    #[must_use]
    pub fn with_context(mut self, context: CommandContext) -> Self {
        self.context = context;
        self
    }

    /// Returns a copy addressed to other targets, keeping every other field.
    #[must_use]
    pub fn retarget(&self, targets: Vec<LightId>, data: LightCommand) -> Self {
        Self {
            service: self.service,
            targets,
            data,
            context: self.context,
        }
    }

    /// Renders the call as service data with an `entity_id` list.
    #[must_use]
    pub fn to_service_data(&self) -> Value {
        let mut data = Map::new();
        data.insert(
            "entity_id".into(),
            Value::Array(
                self.targets
                    .iter()
                    .map(|id| Value::String(id.as_str().to_owned()))
                    .collect(),
            ),
        );
        data.extend(self.data.to_service_data());
        Value::Object(data)
    }
}
