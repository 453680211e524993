//! Fluent animation builder contract.
//!
//! Every concrete animation owns a [`BuilderState`] and implements
//! [`AnimationBuilder`]. The trait supplies the fluent setters, the derived
//! timing getters, and type-level entry points that start a chain from a
//! fresh instance obtained through [`AnimationBuilder::create_instance`].
//!
//! ```ignore
//! let anim = FadeIn::with_duration(450.0).delay(100.0).random_delay();
//! let f = anim.build()?;
//! ```

use std::fmt;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::RemoteAnimationConfig;
use crate::delay::{DelayFunction, DelayInjector, WITH_DELAY};
use crate::error::{check_millis, BuilderError};
use crate::functions::{AnimationCallback, AnimationFunction};

/// Duration used when none was set. Types with a different default override
/// [`AnimationBuilder::DEFAULT_DURATION_MS`].
pub const DEFAULT_DURATION_MS: f64 = 300.0;

/// Upper bound of a randomized delay when no explicit delay was set.
pub const RANDOM_DELAY_UPPER_BOUND_MS: f64 = 1000.0;

/// Mutable configuration accumulated by a builder chain.
#[derive(Clone, Default)]
pub struct BuilderState {
    api_v2: bool,
    duration: Option<f64>,
    delay: Option<f64>,
    randomize_delay: bool,
    callback: Option<AnimationCallback>,
    remote_config: Option<RemoteAnimationConfig>,
}

/// Serializable view of a [`BuilderState`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingSnapshot {
    pub duration_ms: Option<f64>,
    pub delay_ms: Option<f64>,
    pub randomize_delay: bool,
    pub api_v2: bool,
    pub has_callback: bool,
}

impl BuilderState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    #[inline]
    pub fn delay(&self) -> Option<f64> {
        self.delay
    }

    #[inline]
    pub fn randomize_delay(&self) -> bool {
        self.randomize_delay
    }

    #[inline]
    pub fn api_v2(&self) -> bool {
        self.api_v2
    }

    pub fn callback(&self) -> Option<&AnimationCallback> {
        self.callback.as_ref()
    }

    pub fn remote_config(&self) -> Option<&RemoteAnimationConfig> {
        self.remote_config.as_ref()
    }

    pub fn set_duration(&mut self, ms: f64) {
        warn_suspicious("duration", ms);
        self.duration = Some(ms);
    }

    pub fn set_delay(&mut self, ms: f64) {
        warn_suspicious("delay", ms);
        self.delay = Some(ms);
    }

    pub fn set_randomize_delay(&mut self, randomize: bool) {
        self.randomize_delay = randomize;
    }

    pub fn set_callback(&mut self, callback: AnimationCallback) {
        self.callback = Some(callback);
    }

    /// Protocol flag writer for the declarative layer.
    pub fn set_api_v2(&mut self, api_v2: bool) {
        self.api_v2 = api_v2;
    }

    /// Stores the declaratively supplied config. Not part of the fluent chain.
    pub fn set_remote_config(&mut self, cfg: RemoteAnimationConfig) {
        log::debug!("builder: remote config set ({cfg:?})");
        self.remote_config = Some(cfg);
    }

    /// Effective delay right now. Randomized delays draw a fresh value from
    /// `[0, delay)` on every call, `[0, 1000)` when no delay was set.
    pub fn effective_delay(&self) -> f64 {
        if self.randomize_delay {
            let upper = self.delay.unwrap_or(RANDOM_DELAY_UPPER_BOUND_MS);
            rand::thread_rng().gen::<f64>() * upper
        } else {
            self.delay.unwrap_or(0.0)
        }
    }

    /// A delay of exactly zero (or NaN) counts as "not provided".
    pub fn delay_provided(&self) -> bool {
        self.randomize_delay || self.delay.is_some_and(|d| d != 0.0 && !d.is_nan())
    }

    pub fn delay_function(&self, injector: &'static dyn DelayInjector) -> DelayFunction {
        if self.delay_provided() {
            DelayFunction::Injector(injector)
        } else {
            DelayFunction::PassThrough
        }
    }

    pub fn snapshot(&self) -> TimingSnapshot {
        TimingSnapshot {
            duration_ms: self.duration,
            delay_ms: self.delay,
            randomize_delay: self.randomize_delay,
            api_v2: self.api_v2,
            has_callback: self.callback.is_some(),
        }
    }
}

impl fmt::Debug for BuilderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderState")
            .field("api_v2", &self.api_v2)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("randomize_delay", &self.randomize_delay)
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .field("remote_config", &self.remote_config)
            .finish()
    }
}

// Plain setters stay permissive; the engine clamps or rejects.
fn warn_suspicious(name: &str, ms: f64) {
    if !ms.is_finite() || ms < 0.0 {
        log::warn!("builder: accepting {name}={ms}ms; expected a finite non-negative value");
    }
}

/// Builder contract shared by all entry/exit and layout animations.
///
/// Implementors provide the factory, access to their [`BuilderState`], and
/// the two engine-facing operations `build` and `animation_config`.
pub trait AnimationBuilder: Sized {
    /// Per-type default for [`AnimationBuilder::get_duration`].
    const DEFAULT_DURATION_MS: f64 = DEFAULT_DURATION_MS;

    /// Zero-argument factory used by every type-level entry point.
    fn create_instance() -> Self;

    fn state(&self) -> &BuilderState;

    fn state_mut(&mut self) -> &mut BuilderState;

    /// Executable animation function for the engine.
    fn build(&self) -> Result<AnimationFunction, BuilderError>;

    /// Declarative configuration for the v2 tier.
    fn animation_config(&self) -> Result<RemoteAnimationConfig, BuilderError>;

    /// Injector returned by `get_delay_function` when a delay applies.
    fn delay_injector(&self) -> &'static dyn DelayInjector {
        &WITH_DELAY
    }

    fn duration(mut self, ms: f64) -> Self {
        self.state_mut().set_duration(ms);
        self
    }

    /// Like [`AnimationBuilder::duration`] but rejects negative or non-finite values.
    fn try_duration(self, ms: f64) -> Result<Self, BuilderError> {
        let ms = check_millis("duration", ms)?;
        Ok(self.duration(ms))
    }

    fn get_duration(&self) -> f64 {
        self.state().duration().unwrap_or(Self::DEFAULT_DURATION_MS)
    }

    fn delay(mut self, ms: f64) -> Self {
        self.state_mut().set_delay(ms);
        self
    }

    /// Like [`AnimationBuilder::delay`] but rejects negative or non-finite values.
    fn try_delay(self, ms: f64) -> Result<Self, BuilderError> {
        let ms = check_millis("delay", ms)?;
        Ok(self.delay(ms))
    }

    /// The engine calls `callback` once per run with `true` on completion and
    /// `false` on interruption.
    fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.state_mut().set_callback(Arc::new(callback));
        self
    }

    /// Randomize the delay within `[0, delay)`, or `[0, 1000)` without one.
    fn random_delay(mut self) -> Self {
        self.state_mut().set_randomize_delay(true);
        self
    }

    /// Not memoized: randomized delays differ between calls.
    fn get_delay(&self) -> f64 {
        self.state().effective_delay()
    }

    fn get_delay_function(&self) -> DelayFunction {
        self.state().delay_function(self.delay_injector())
    }

    fn is_api_v2(&self) -> bool {
        self.state().api_v2()
    }

    fn set_remote_config(&mut self, cfg: RemoteAnimationConfig) {
        self.state_mut().set_remote_config(cfg);
    }

    // Type-level entry points. Each creates a fresh instance first.

    fn default_duration() -> f64 {
        Self::DEFAULT_DURATION_MS
    }

    fn with_duration(ms: f64) -> Self {
        Self::create_instance().duration(ms)
    }

    fn with_delay(ms: f64) -> Self {
        Self::create_instance().delay(ms)
    }

    fn with_completion<F>(callback: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        Self::create_instance().with_callback(callback)
    }

    fn with_random_delay() -> Self {
        Self::create_instance().random_delay()
    }

    fn fresh_is_api_v2() -> bool {
        Self::create_instance().is_api_v2()
    }

    fn fresh_animation_config() -> Result<RemoteAnimationConfig, BuilderError> {
        Self::create_instance().animation_config()
    }

    fn fresh_build() -> Result<AnimationFunction, BuilderError> {
        Self::create_instance().build()
    }
}

/// The bare builder with no animation behind it. Timing configuration works;
/// `build` and `animation_config` always fail with `UnimplementedMethod`.
#[derive(Clone, Debug, Default)]
pub struct BaseAnimationBuilder {
    state: BuilderState,
}

impl BaseAnimationBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnimationBuilder for BaseAnimationBuilder {
    fn create_instance() -> Self {
        Self::new()
    }

    fn state(&self) -> &BuilderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BuilderState {
        &mut self.state
    }

    fn build(&self) -> Result<AnimationFunction, BuilderError> {
        Err(BuilderError::unimplemented("build"))
    }

    fn animation_config(&self) -> Result<RemoteAnimationConfig, BuilderError> {
        Err(BuilderError::unimplemented("animation_config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delay_counts_as_not_provided() {
        let mut state = BuilderState::new();
        assert!(!state.delay_provided());
        state.set_delay(0.0);
        assert!(!state.delay_provided());
        state.set_delay(-0.0);
        assert!(!state.delay_provided());
        state.set_delay(f64::NAN);
        assert!(!state.delay_provided());
        state.set_delay(1.0);
        assert!(state.delay_provided());
    }

    #[test]
    fn randomize_alone_counts_as_provided() {
        let mut state = BuilderState::new();
        state.set_randomize_delay(true);
        assert!(state.delay_provided());
        assert!(!state.delay_function(&WITH_DELAY).is_pass_through());
    }

    #[test]
    fn snapshot_reflects_fields() {
        let mut state = BuilderState::new();
        state.set_duration(500.0);
        state.set_callback(Arc::new(|_| {}));
        state.set_api_v2(true);
        let snap = state.snapshot();
        assert_eq!(
            snap,
            TimingSnapshot {
                duration_ms: Some(500.0),
                delay_ms: None,
                randomize_delay: false,
                api_v2: true,
                has_callback: true,
            }
        );
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["duration_ms"], 500.0);
    }

    #[test]
    fn debug_hides_callback_body() {
        let mut state = BuilderState::new();
        state.set_callback(Arc::new(|_| {}));
        let s = format!("{state:?}");
        assert!(s.contains("<fn>"));
    }
}
