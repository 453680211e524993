//! Delay application strategies.
//!
//! `DelayFunction` is what `get_delay_function()` hands to the engine: either
//! the shared injector that defers a spec, or a pass-through that returns the
//! spec untouched.

use std::fmt;

use serde_json::json;

use crate::functions::AnimationSpec;

/// Engine capability that defers an animation spec's effect by `delay_ms`.
///
/// Implementations may be invoked from the engine's restricted animation
/// context, hence `Send + Sync`.
pub trait DelayInjector: Send + Sync {
    fn inject(&self, delay_ms: f64, spec: AnimationSpec) -> AnimationSpec;

    /// Whether `inject` can run inside the restricted animation context.
    fn sandbox_safe(&self) -> bool {
        true
    }
}

/// Default injector: wraps the spec in a `delay` descriptor the engine unwraps.
#[derive(Copy, Clone, Debug, Default)]
pub struct WithDelay;

pub static WITH_DELAY: WithDelay = WithDelay;

impl DelayInjector for WithDelay {
    fn inject(&self, delay_ms: f64, spec: AnimationSpec) -> AnimationSpec {
        AnimationSpec(json!({
            "type": "delay",
            "delayMs": delay_ms,
            "animation": spec.into_json(),
        }))
    }
}

#[derive(Copy, Clone)]
pub enum DelayFunction {
    Injector(&'static dyn DelayInjector),
    /// Ignores the delay and returns the spec unchanged. Needs no engine
    /// capability, so it always runs in the restricted context.
    PassThrough,
}

impl DelayFunction {
    #[inline]
    pub fn apply(&self, delay_ms: f64, spec: AnimationSpec) -> AnimationSpec {
        match self {
            DelayFunction::Injector(injector) => injector.inject(delay_ms, spec),
            DelayFunction::PassThrough => spec,
        }
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self, DelayFunction::PassThrough)
    }

    pub fn sandbox_safe(&self) -> bool {
        match self {
            DelayFunction::Injector(injector) => injector.sandbox_safe(),
            DelayFunction::PassThrough => true,
        }
    }
}

impl fmt::Debug for DelayFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelayFunction::Injector(_) => f.write_str("DelayFunction::Injector"),
            DelayFunction::PassThrough => f.write_str("DelayFunction::PassThrough"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> AnimationSpec {
        AnimationSpec(json!({ "type": "timing", "toValue": 1.0, "duration": 300.0 }))
    }

    #[test]
    fn pass_through_ignores_delay() {
        let out = DelayFunction::PassThrough.apply(750.0, timing());
        assert_eq!(out, timing());
        assert!(DelayFunction::PassThrough.sandbox_safe());
    }

    #[test]
    fn with_delay_wraps_spec() {
        let out = DelayFunction::Injector(&WITH_DELAY).apply(120.0, timing());
        assert_eq!(out.as_json()["type"], "delay");
        assert_eq!(out.as_json()["delayMs"], 120.0);
        assert_eq!(out.as_json()["animation"], timing().into_json());
    }
}
