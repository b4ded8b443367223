// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable engine state report.

use serde::Serialize;

use crate::config::ResolvedBounds;
use crate::types::LightId;

use super::AdaptiveSettings;

/// Snapshot of the engine state, as returned by
/// [`AdaptiveEngine::summary`](super::AdaptiveEngine::summary).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdaptiveSummary {
    /// Master switch state.
    pub adaptive_enabled: bool,
    /// Daylight factor at the summary time.
    pub sun_factor: f64,
    /// Number of configured lights.
    pub total_lights: usize,
    /// Configured lights that are enabled and toggled on.
    pub enabled_lights: usize,
    /// Per-light details in configuration order.
    pub lights: Vec<LightSummary>,
}

/// One configured light in an [`AdaptiveSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightSummary {
    pub light_id: LightId,
    pub enabled: bool,
    #[serde(flatten)]
    pub bounds: ResolvedBounds,
    pub white_balance_offset: i32,
    pub brightness_factor: f64,
    /// Current settings, present only for enabled lights.
    pub current: Option<AdaptiveSettings>,
}
