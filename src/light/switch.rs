// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Master adaptive switch.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::control::AdaptiveControl;
use crate::engine::AdaptiveEngine;

/// Switches adaptive behavior on or off for the engine and every registered
/// light at once.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use sunlit::config::EngineConfig;
/// use sunlit::control::AdaptiveControl;
/// use sunlit::engine::AdaptiveEngine;
/// use sunlit::light::{AdaptiveLight, AdaptiveSwitch};
/// use sunlit::solar::Location;
///
/// let engine = Arc::new(AdaptiveEngine::new(EngineConfig::new(
///     Location::new(0.0, 0.0, "UTC").unwrap(),
/// )));
/// let lamp = Arc::new(AdaptiveLight::new(Arc::clone(&engine), "light.lamp"));
/// let switch = AdaptiveSwitch::new(Arc::clone(&engine)).with_control(lamp.clone());
///
/// switch.set_adaptive_enabled(false);
/// assert!(!engine.is_adaptive_enabled());
/// assert!(!lamp.is_adaptive_enabled());
/// ```
pub struct AdaptiveSwitch {
    on: AtomicBool,
    controls: Vec<Arc<dyn AdaptiveControl>>,
}

impl AdaptiveSwitch {
    /// Creates a switch controlling `engine`, starting in its current state.
    #[must_use]
    pub fn new(engine: Arc<AdaptiveEngine>) -> Self {
        Self {
            on: AtomicBool::new(engine.is_adaptive_enabled()),
            controls: vec![engine as Arc<dyn AdaptiveControl>],
        }
    }

    /// Registers another control to fan out to.
    #[must_use]
    pub fn with_control(mut self, control: Arc<dyn AdaptiveControl>) -> Self {
        self.controls.push(control);
        self
    }

    /// Returns the number of controls, the engine included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Returns `true` if no controls are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

impl AdaptiveControl for AdaptiveSwitch {
    fn set_adaptive_enabled(&self, enabled: bool) {
        self.on.store(enabled, Ordering::Release);
        for control in &self.controls {
            control.set_adaptive_enabled(enabled);
        }
        tracing::debug!(enabled, controls = self.controls.len(), "Adaptive switch changed");
    }

    fn is_adaptive_enabled(&self) -> bool {
        self.on.load(Ordering::Acquire)
    }
}

impl fmt::Debug for AdaptiveSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptiveSwitch")
            .field("on", &self.is_adaptive_enabled())
            .field("controls", &self.controls.len())
            .finish()
    }
}
