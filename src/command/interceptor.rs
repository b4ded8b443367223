// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command middleware.

use std::sync::Arc;

use super::ServiceCall;

/// Rewrites a light service call before it reaches the actuator.
///
/// An interceptor may pass the call through, modify it, or split it into
/// several calls. It must never drop a target.
pub trait CommandInterceptor: Send + Sync {
    /// Processes one call.
    fn intercept(&self, call: ServiceCall) -> Vec<ServiceCall>;
}

/// An ordered list of interceptors applied to every call.
///
/// Each interceptor sees every call produced by the one before it.
///
/// # Examples
///
/// ```
/// use sunlit::command::{CommandInterceptor, InterceptorChain, LightCommand, ServiceCall};
///
/// struct Tag;
///
/// impl CommandInterceptor for Tag {
///     fn intercept(&self, mut call: ServiceCall) -> Vec<ServiceCall> {
///         call.data = call.data.with_attribute("source", "tag");
///         vec![call]
///     }
/// }
///
/// let chain = InterceptorChain::new().with(Tag);
/// let out = chain.process(ServiceCall::turn_on(["light.a"], LightCommand::new()));
/// assert_eq!(out[0].data.extra["source"], "tag");
/// ```
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn CommandInterceptor>>,
}

impl InterceptorChain {
    /// Creates an empty chain that passes calls through.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interceptor.
    #[must_use]
    pub fn with(mut self, interceptor: impl CommandInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Appends a shared interceptor.
    pub fn push(&mut self, interceptor: Arc<dyn CommandInterceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Returns the number of interceptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Returns `true` if the chain has no interceptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Runs a call through every interceptor in order.
    #[must_use]
    pub fn process(&self, call: ServiceCall) -> Vec<ServiceCall> {
        self.interceptors.iter().fold(vec![call], |calls, interceptor| {
            calls
                .into_iter()
                .flat_map(|call| interceptor.intercept(call))
                .collect()
        })
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("len", &self.interceptors.len())
            .finish()
    }
}
