//! Vizij Animation Builder
//!
//! Fluent configuration builders for entry/exit and layout animations. A
//! builder collects timing parameters (duration, delay, randomized delay,
//! completion callback, protocol version) and produces an
//! [`AnimationFunction`] that an animation engine executes. Frame scheduling
//! and interpolation live in the engine, not here.

pub mod builder;
pub mod config;
pub mod delay;
pub mod error;
pub mod functions;

// Re-exports for consumers (engines, concrete animations)
pub use builder::{
    AnimationBuilder, BaseAnimationBuilder, BuilderState, TimingSnapshot, DEFAULT_DURATION_MS,
    RANDOM_DELAY_UPPER_BOUND_MS,
};
pub use config::{RemoteAnimationConfig, Rotation};
pub use delay::{DelayFunction, DelayInjector, WithDelay, WITH_DELAY};
pub use error::BuilderError;
pub use functions::{
    AnimationCallback, AnimationFunction, AnimationSpec, EntryExitAnimationFunction,
    EntryExitValues, FrameValues, LayoutAnimation, LayoutAnimationFunction, LayoutAnimationType,
    LayoutAnimationValues, StyleProps,
};
