// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The adaptive override policy as an interceptor.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, TimeZone};

use crate::engine::AdaptiveEngine;
use crate::types::LightId;

use super::{CommandInterceptor, LightCommand, ServiceCall};

/// Fills unspecified brightness, color temperature and transition of
/// `turn_on` and `toggle` calls with computed adaptive values.
///
/// - `turn_off` calls and calls with brightness and color both explicit pass
///   through unchanged.
/// - Targets that are not adaptive (unconfigured, disabled, toggled off or
///   master switch off) keep the original payload.
/// - A single adaptive target is rewritten in place. With several targets
///   the call is split: one pass-through call for the non-adaptive targets
///   first, then one call per adaptive target with its own values.
/// - If computation fails for a target, it keeps the original payload.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use sunlit::command::{AdaptiveInterceptor, InterceptorChain, LightCommand, ServiceCall};
/// use sunlit::config::{EngineConfig, LightCorrection};
/// use sunlit::engine::AdaptiveEngine;
/// use sunlit::solar::Location;
///
/// let engine = Arc::new(AdaptiveEngine::new(
///     EngineConfig::new(Location::new(40.71, -74.0, "America/New_York").unwrap())
///         .with_light(LightCorrection::new("light.desk")),
/// ));
/// let chain = InterceptorChain::new().with(AdaptiveInterceptor::new(engine));
///
/// let out = chain.process(ServiceCall::turn_on(["light.desk"], LightCommand::new()));
/// assert_eq!(out.len(), 1);
/// assert!(out[0].data.brightness.is_some());
/// assert!(out[0].data.color_temp.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveInterceptor {
    engine: Arc<AdaptiveEngine>,
}

impl AdaptiveInterceptor {
    /// Creates an interceptor backed by `engine`.
    #[must_use]
    pub fn new(engine: Arc<AdaptiveEngine>) -> Self {
        Self { engine }
    }

    /// Applies the policy at an explicit time.
    #[must_use]
    pub fn intercept_at<Tz: TimeZone>(&self, call: ServiceCall, at: &DateTime<Tz>) -> Vec<ServiceCall> {
        if !call.service.turns_on() || call.data.is_fully_manual() {
            return vec![call];
        }

        let adaptive: Vec<LightId> = call
            .targets
            .iter()
            .filter(|id| self.engine.is_light_adaptive(id.as_str()))
            .cloned()
            .collect();
        if adaptive.is_empty() {
            return vec![call];
        }

        if call.targets.len() == 1 {
            let data = adapt_payload(&self.engine, &call.targets[0], &call.data, at);
            return vec![call.retarget(call.targets.clone(), data)];
        }

        let mut computed = Vec::with_capacity(adaptive.len());
        let mut handled: HashSet<&LightId> = HashSet::with_capacity(adaptive.len());
        for id in &adaptive {
            match self.engine.compute(id.as_str(), at) {
                Ok(settings) => {
                    computed.push(call.retarget(vec![id.clone()], call.data.merged_with(&settings)));
                    handled.insert(id);
                }
                Err(err) => {
                    tracing::warn!(light = %id, error = %err, "Adaptive computation failed, passing command through");
                }
            }
        }

        let passthrough: Vec<LightId> = call
            .targets
            .iter()
            .filter(|id| !handled.contains(id))
            .cloned()
            .collect();

        tracing::debug!(
            service = %call.service,
            adaptive = computed.len(),
            passthrough = passthrough.len(),
            "Split light command"
        );

        let mut out = Vec::with_capacity(computed.len() + 1);
        if !passthrough.is_empty() {
            out.push(call.retarget(passthrough, call.data.clone()));
        }
        out.extend(computed);
        out
    }
}

impl CommandInterceptor for AdaptiveInterceptor {
    fn intercept(&self, call: ServiceCall) -> Vec<ServiceCall> {
        let now = self.engine.now();
        self.intercept_at(call, &now)
    }
}

/// Merges computed values into a payload for one light, falling back to the
/// payload unchanged when computation fails.
pub(crate) fn adapt_payload<Tz: TimeZone>(
    engine: &AdaptiveEngine,
    light_id: &LightId,
    data: &LightCommand,
    at: &DateTime<Tz>,
) -> LightCommand {
    match engine.compute(light_id.as_str(), at) {
        Ok(settings) => data.merged_with(&settings),
        Err(err) => {
            tracing::warn!(light = %light_id, error = %err, "Adaptive computation failed, passing command through");
            data.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, LightCorrection};
    use crate::control::AdaptiveControl;
    use crate::solar::Location;
    use crate::types::{Brightness, ColorTemp};
    use chrono::FixedOffset;

    fn engine() -> Arc<AdaptiveEngine> {
        Arc::new(AdaptiveEngine::new(
            EngineConfig::new(Location::new(51.5074, -0.1278, "Europe/London").unwrap())
                .with_light(LightCorrection::new("light.a").with_white_balance_offset(100))
                .with_light(LightCorrection::new("light.b").with_color_temp_range(2700, 5000))
                .with_light(LightCorrection::new("light.off").with_enabled(false))
                .with_light(LightCorrection::new("light.nan").with_brightness_factor(f64::NAN)),
        ))
    }

    fn night() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-06-21T01:00:00+01:00").unwrap()
    }

    fn kelvin(call: &ServiceCall) -> Option<u16> {
        call.data
            .color_temp
            .map(|ct| ct.to_color_temp().unwrap().kelvin())
    }

    #[test]
    fn single_target_is_rewritten_in_place() {
        let interceptor = AdaptiveInterceptor::new(engine());
        let call = ServiceCall::turn_on(["light.a"], LightCommand::new());
        let out = interceptor.intercept_at(call.clone(), &night());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].targets, call.targets);
        assert_eq!(out[0].context, call.context);
        assert_eq!(kelvin(&out[0]), Some(2100));
        assert_eq!(out[0].data.brightness, Some(Brightness::MIN));
    }

    #[test]
    fn explicit_brightness_wins() {
        let interceptor = AdaptiveInterceptor::new(engine());
        let call = ServiceCall::turn_on(
            ["light.a"],
            LightCommand::new().with_brightness(Brightness::new(100).unwrap()),
        );
        let out = interceptor.intercept_at(call, &night());
        assert_eq!(out[0].data.brightness.unwrap().value(), 100);
        assert_eq!(kelvin(&out[0]), Some(2100));
    }

    #[test]
    fn fully_manual_and_turn_off_pass_through() {
        let interceptor = AdaptiveInterceptor::new(engine());
        let manual = ServiceCall::turn_on(
            ["light.a", "light.b"],
            LightCommand::new()
                .with_brightness(Brightness::MAX)
                .with_color_temp(ColorTemp::NEUTRAL),
        );
        assert_eq!(interceptor.intercept_at(manual.clone(), &night()), vec![manual]);

        let off = ServiceCall::turn_off(["light.a"], None);
        assert_eq!(interceptor.intercept_at(off.clone(), &night()), vec![off]);
    }

    #[test]
    fn batch_is_split() {
        let interceptor = AdaptiveInterceptor::new(engine());
        let call = ServiceCall::turn_on(
            ["light.a", "light.other", "light.b"],
            LightCommand::new().with_attribute("flash", "short"),
        );
        let out = interceptor.intercept_at(call.clone(), &night());
        assert_eq!(out.len(), 3);

        assert_eq!(out[0].targets, vec![LightId::new("light.other")]);
        assert_eq!(out[0].data, call.data);

        assert_eq!(out[1].targets, vec![LightId::new("light.a")]);
        assert_eq!(kelvin(&out[1]), Some(2100));
        assert_eq!(out[2].targets, vec![LightId::new("light.b")]);
        assert_eq!(kelvin(&out[2]), Some(2700));

        for c in &out {
            assert_eq!(c.context, call.context);
            assert_eq!(c.data.extra["flash"], "short");
        }
    }

    #[test]
    fn failed_target_joins_passthrough() {
        let interceptor = AdaptiveInterceptor::new(engine());
        let call = ServiceCall::toggle(["light.nan", "light.a"], LightCommand::new());
        let out = interceptor.intercept_at(call.clone(), &night());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].targets, vec![LightId::new("light.nan")]);
        assert_eq!(out[0].data, call.data);
        assert_eq!(out[1].targets, vec![LightId::new("light.a")]);

        let single = ServiceCall::turn_on(["light.nan"], LightCommand::new());
        assert_eq!(interceptor.intercept_at(single.clone(), &night()), vec![single]);
    }

    #[test]
    fn disabled_targets_pass_through() {
        let engine = engine();
        let interceptor = AdaptiveInterceptor::new(engine.clone());
        let call = ServiceCall::turn_on(["light.off", "light.unknown"], LightCommand::new());
        assert_eq!(interceptor.intercept_at(call.clone(), &night()), vec![call]);

        engine.set_adaptive_enabled(false);
        let call = ServiceCall::turn_on(["light.a"], LightCommand::new());
        assert_eq!(interceptor.intercept_at(call.clone(), &night()), vec![call]);
    }
}
