//! Animation function shapes handed to the engine.
//!
//! A builder produces either an entry/exit function (element appears or
//! disappears) or a layout function (element moves between frames). Both are
//! opaque closures to this crate; the engine calls them with measured values
//! and executes the returned [`LayoutAnimation`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Completion callback: `true` when the animation finished, `false` when interrupted.
pub type AnimationCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Style values keyed by property name (e.g. "opacity", "originX").
pub type StyleProps = BTreeMap<String, serde_json::Value>;

/// Opaque engine animation descriptor (timing, spring, delay wrapper, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationSpec(pub serde_json::Value);

impl AnimationSpec {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}

/// Which registry slot an animation is attached to on an element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutAnimationType {
    Entering,
    Exiting,
    Layout,
}

impl LayoutAnimationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutAnimationType::Entering => "entering",
            LayoutAnimationType::Exiting => "exiting",
            LayoutAnimationType::Layout => "layout",
        }
    }
}

/// Position and size of an element, local and global.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameValues {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
    pub global_origin_x: f64,
    pub global_origin_y: f64,
}

/// Values passed to an entry/exit function: the target frame on entry, the
/// current frame on exit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryExitValues {
    pub frame: FrameValues,
    pub window_width: f64,
    pub window_height: f64,
}

/// Values passed to a layout function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutAnimationValues {
    pub current: FrameValues,
    pub target: FrameValues,
    pub window_width: f64,
    pub window_height: f64,
}

/// What an animation function returns: starting style, per-property animations,
/// and an optional completion callback.
#[derive(Clone, Default)]
pub struct LayoutAnimation {
    pub initial_values: StyleProps,
    pub animations: BTreeMap<String, AnimationSpec>,
    pub callback: Option<AnimationCallback>,
}

impl fmt::Debug for LayoutAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutAnimation")
            .field("initial_values", &self.initial_values)
            .field("animations", &self.animations)
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[derive(Clone)]
pub struct EntryExitAnimationFunction(
    Arc<dyn Fn(&EntryExitValues) -> LayoutAnimation + Send + Sync>,
);

impl EntryExitAnimationFunction {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&EntryExitValues) -> LayoutAnimation + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, values: &EntryExitValues) -> LayoutAnimation {
        (self.0)(values)
    }
}

#[derive(Clone)]
pub struct LayoutAnimationFunction(
    Arc<dyn Fn(&LayoutAnimationValues) -> LayoutAnimation + Send + Sync>,
);

impl LayoutAnimationFunction {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&LayoutAnimationValues) -> LayoutAnimation + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, values: &LayoutAnimationValues) -> LayoutAnimation {
        (self.0)(values)
    }
}

/// Result of `build()`.
#[derive(Clone)]
pub enum AnimationFunction {
    EntryExit(EntryExitAnimationFunction),
    Layout(LayoutAnimationFunction),
}

impl AnimationFunction {
    /// Whether this function may be attached under the given slot.
    pub fn supports(&self, kind: LayoutAnimationType) -> bool {
        match self {
            AnimationFunction::EntryExit(_) => matches!(
                kind,
                LayoutAnimationType::Entering | LayoutAnimationType::Exiting
            ),
            AnimationFunction::Layout(_) => kind == LayoutAnimationType::Layout,
        }
    }

    pub fn as_entry_exit(&self) -> Option<&EntryExitAnimationFunction> {
        match self {
            AnimationFunction::EntryExit(f) => Some(f),
            AnimationFunction::Layout(_) => None,
        }
    }

    pub fn as_layout(&self) -> Option<&LayoutAnimationFunction> {
        match self {
            AnimationFunction::Layout(f) => Some(f),
            AnimationFunction::EntryExit(_) => None,
        }
    }
}

impl fmt::Debug for AnimationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationFunction::EntryExit(_) => f.write_str("AnimationFunction::EntryExit(<fn>)"),
            AnimationFunction::Layout(_) => f.write_str("AnimationFunction::Layout(<fn>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slot_support_follows_function_shape() {
        let entry = AnimationFunction::EntryExit(EntryExitAnimationFunction::new(|_| {
            LayoutAnimation::default()
        }));
        let layout = AnimationFunction::Layout(LayoutAnimationFunction::new(|_| {
            LayoutAnimation::default()
        }));

        assert!(entry.supports(LayoutAnimationType::Entering));
        assert!(entry.supports(LayoutAnimationType::Exiting));
        assert!(!entry.supports(LayoutAnimationType::Layout));
        assert!(layout.supports(LayoutAnimationType::Layout));
        assert!(!layout.supports(LayoutAnimationType::Entering));
        assert!(entry.as_layout().is_none());
        assert!(layout.as_layout().is_some());
    }

    #[test]
    fn slot_tags_serialize_lowercase() {
        let s = serde_json::to_string(&LayoutAnimationType::Exiting).unwrap();
        assert_eq!(s, "\"exiting\"");
        assert_eq!(LayoutAnimationType::Layout.as_str(), "layout");
        let back: LayoutAnimationType = serde_json::from_str("\"entering\"").unwrap();
        assert_eq!(back, LayoutAnimationType::Entering);
    }

    #[test]
    fn entry_function_receives_values() {
        let f = EntryExitAnimationFunction::new(|v| {
            let mut out = LayoutAnimation::default();
            out.initial_values
                .insert("originX".into(), json!(v.frame.origin_x - v.window_width));
            out
        });
        let values = EntryExitValues {
            frame: FrameValues {
                origin_x: 10.0,
                ..FrameValues::default()
            },
            window_width: 400.0,
            window_height: 800.0,
        };
        let anim = f.call(&values);
        assert_eq!(anim.initial_values["originX"], json!(-390.0));
    }
}
