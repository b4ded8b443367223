// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The adaptive on/off capability.

/// Anything whose adaptive behavior can be switched on and off.
///
/// Implemented by the engine (the master switch), by each
/// [`AdaptiveLight`](crate::light::AdaptiveLight) (the per-light toggle) and
/// by [`AdaptiveSwitch`](crate::light::AdaptiveSwitch), which fans out to
/// other implementors.
pub trait AdaptiveControl: Send + Sync {
    /// Enables or disables adaptive behavior.
    fn set_adaptive_enabled(&self, enabled: bool);

    /// Returns whether adaptive behavior is enabled.
    fn is_adaptive_enabled(&self) -> bool;
}
