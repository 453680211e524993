//! Remote animation configuration for the declarative ("v2") tier.
//!
//! The declarative layer supplies this object once through
//! `BuilderState::set_remote_config`; in v2 mode the engine reads it in place
//! of the fluent fields.

use serde::{Deserialize, Serialize};

use crate::error::{check_millis, BuilderError};

/// Rotation given either in degrees or as a string with a unit ("45deg", "1rad").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rotation {
    Degrees(f64),
    Text(String),
}

/// Base builder animation config. Every field is optional; absent fields fall
/// back to the builder's own values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteAnimationConfig {
    pub duration: Option<f64>,
    pub delay: Option<f64>,
    /// Named easing curve (e.g. "linear", "ease-in-out").
    pub easing: Option<String>,

    // Spring parameters
    pub damping: Option<f64>,
    pub mass: Option<f64>,
    pub stiffness: Option<f64>,
    pub overshoot_clamping: Option<bool>,
    pub rest_displacement_threshold: Option<f64>,
    pub rest_speed_threshold: Option<f64>,

    pub rotate: Option<Rotation>,
}

impl RemoteAnimationConfig {
    /// Parse and validate a JSON config object.
    pub fn from_json(s: &str) -> Result<Self, BuilderError> {
        let cfg: RemoteAnimationConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String, BuilderError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Timing values must be finite and non-negative.
    pub fn validate(&self) -> Result<(), BuilderError> {
        if let Some(d) = self.duration {
            check_millis("duration", d)?;
        }
        if let Some(d) = self.delay {
            check_millis("delay", d)?;
        }
        Ok(())
    }

    pub fn is_spring(&self) -> bool {
        self.damping.is_some() || self.mass.is_some() || self.stiffness.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_fields() {
        let cfg = RemoteAnimationConfig::from_json(
            r#"{ "duration": 450, "overshootClamping": true, "stiffness": 120, "rotate": "90deg" }"#,
        )
        .unwrap();
        assert_eq!(cfg.duration, Some(450.0));
        assert_eq!(cfg.overshoot_clamping, Some(true));
        assert_eq!(cfg.rotate, Some(Rotation::Text("90deg".into())));
        assert!(cfg.is_spring());
        assert!(cfg.delay.is_none());
    }

    #[test]
    fn numeric_rotation_is_degrees() {
        let cfg = RemoteAnimationConfig::from_json(r#"{ "rotate": 45 }"#).unwrap();
        assert_eq!(cfg.rotate, Some(Rotation::Degrees(45.0)));
    }

    #[test]
    fn rejects_negative_delay() {
        let err = RemoteAnimationConfig::from_json(r#"{ "delay": -10 }"#).unwrap_err();
        assert!(matches!(
            err,
            BuilderError::InvalidArgument { name: "delay", .. }
        ));
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = RemoteAnimationConfig::from_json("{ duration: ").unwrap_err();
        assert!(matches!(err, BuilderError::Config { .. }));
    }

    #[test]
    fn empty_object_is_default() {
        let cfg = RemoteAnimationConfig::from_json("{}").unwrap();
        assert_eq!(cfg, RemoteAnimationConfig::default());
        assert!(!cfg.is_spring());
    }
}
