//! Adjustment parameters and the input model that feeds them.
//!
//! Four independent tonal controls:
//!
//! | Parameter | Range | Default |
//! |-----------|-------|---------|
//! | brightness | -1..=1 | 0 |
//! | contrast | -1..=1 | 0 |
//! | saturation | 0..=2 | 1 |
//! | gamma | > 0 | 1 |
//!
//! Programmatic values are clamped, never rejected. Text typed by a user is
//! stricter: see [`AdjustmentParameters::set_from_str`].

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Gamma used in place of any value `<= 0`.
pub const MIN_GAMMA: f32 = 0.01;

/// Largest slider position. Sliders run `0..=SLIDER_MAX`.
pub const SLIDER_MAX: i32 = 200;

/// Slider positions per parameter unit.
const SLIDER_SCALE: f32 = 100.0;

/// Identifies one of the four adjustment controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Additive/multiplicative lightness.
    Brightness,
    /// Spread around mid-grey.
    Contrast,
    /// Distance from the luminance grey.
    Saturation,
    /// Power-law tone curve.
    Gamma,
}

impl ParamKind {
    /// Display label for UI.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Brightness => "Brightness",
            Self::Contrast => "Contrast",
            Self::Saturation => "Saturation",
            Self::Gamma => "Gamma",
        }
    }

    /// All controls in dialog order.
    pub const fn all() -> &'static [Self] {
        &[Self::Brightness, Self::Contrast, Self::Saturation, Self::Gamma]
    }

    /// Neutral value.
    pub const fn default_value(self) -> f32 {
        match self {
            Self::Brightness | Self::Contrast => 0.0,
            Self::Saturation | Self::Gamma => 1.0,
        }
    }

    /// Declared range. Gamma has no upper bound.
    pub const fn range(self) -> (f32, f32) {
        match self {
            Self::Brightness | Self::Contrast => (-1.0, 1.0),
            Self::Saturation => (0.0, 2.0),
            Self::Gamma => (0.0, f32::INFINITY),
        }
    }

    /// Offset between parameter value and slider value.
    const fn slider_bias(self) -> f32 {
        match self {
            Self::Brightness | Self::Contrast => 1.0,
            Self::Saturation | Self::Gamma => 0.0,
        }
    }

    /// Clamps `value` into this control's valid range.
    ///
    /// NaN falls back to the neutral value.
    pub fn clamp(self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default_value();
        }
        match self {
            Self::Gamma if value <= 0.0 => MIN_GAMMA,
            Self::Gamma => value,
            _ => {
                let (lo, hi) = self.range();
                value.clamp(lo, hi)
            }
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ParamKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brightness" | "b" => Ok(Self::Brightness),
            "contrast" | "c" => Ok(Self::Contrast),
            "saturation" | "s" => Ok(Self::Saturation),
            "gamma" | "g" => Ok(Self::Gamma),
            other => Err(format!("unknown adjustment parameter '{other}'")),
        }
    }
}

/// Brightness, contrast, saturation and gamma.
///
/// Deserializes from partial documents; missing fields take their defaults.
///
/// ```
/// use imv_ops::AdjustmentParameters;
///
/// let p: AdjustmentParameters = ron::from_str("(gamma: 2.2)").unwrap();
/// assert_eq!(p.gamma, 2.2);
/// assert_eq!(p.saturation, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentParameters {
    /// Brightness in `-1..=1`.
    pub brightness: f32,
    /// Contrast in `-1..=1`.
    pub contrast: f32,
    /// Saturation in `0..=2` (0 = greyscale).
    pub saturation: f32,
    /// Gamma, `> 0`. Values `<= 0` act as [`MIN_GAMMA`].
    pub gamma: f32,
}

impl Default for AdjustmentParameters {
    fn default() -> Self {
        Self {
            brightness: ParamKind::Brightness.default_value(),
            contrast: ParamKind::Contrast.default_value(),
            saturation: ParamKind::Saturation.default_value(),
            gamma: ParamKind::Gamma.default_value(),
        }
    }
}

impl AdjustmentParameters {
    /// Parameters that leave every pixel unchanged.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Check if this is identity (no-op).
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Copy with every field clamped into its valid range.
    pub fn clamped(&self) -> Self {
        Self {
            brightness: ParamKind::Brightness.clamp(self.brightness),
            contrast: ParamKind::Contrast.clamp(self.contrast),
            saturation: ParamKind::Saturation.clamp(self.saturation),
            gamma: ParamKind::Gamma.clamp(self.gamma),
        }
    }

    /// Value of one control.
    pub fn get(&self, kind: ParamKind) -> f32 {
        match kind {
            ParamKind::Brightness => self.brightness,
            ParamKind::Contrast => self.contrast,
            ParamKind::Saturation => self.saturation,
            ParamKind::Gamma => self.gamma,
        }
    }

    /// Sets one control, clamping into range.
    pub fn set(&mut self, kind: ParamKind, value: f32) {
        let value = kind.clamp(value);
        match kind {
            ParamKind::Brightness => self.brightness = value,
            ParamKind::Contrast => self.contrast = value,
            ParamKind::Saturation => self.saturation = value,
            ParamKind::Gamma => self.gamma = value,
        }
    }

    /// Restores all four defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Parses user-typed text into one control.
    ///
    /// Returns `false` and keeps the previous value when the text is not a
    /// finite number, or when brightness/contrast/saturation fall outside
    /// their declared range. Gamma accepts any finite number; `<= 0` becomes
    /// [`MIN_GAMMA`].
    ///
    /// ```
    /// use imv_ops::{AdjustmentParameters, ParamKind};
    ///
    /// let mut p = AdjustmentParameters::default();
    /// assert!(p.set_from_str(ParamKind::Contrast, " 0.25 "));
    /// assert!(!p.set_from_str(ParamKind::Contrast, "abc"));
    /// assert!(!p.set_from_str(ParamKind::Contrast, "1.5"));
    /// assert_eq!(p.contrast, 0.25);
    /// ```
    pub fn set_from_str(&mut self, kind: ParamKind, text: &str) -> bool {
        let value = match text.trim().parse::<f32>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                warn!(param = %kind, input = text, "rejected non-numeric input");
                return false;
            }
        };
        let (lo, hi) = kind.range();
        if kind != ParamKind::Gamma && !(lo..=hi).contains(&value) {
            warn!(param = %kind, value, lo, hi, "rejected out-of-range input");
            return false;
        }
        self.set(kind, value);
        trace!(param = %kind, value = self.get(kind), "parameter set from text");
        true
    }

    /// Slider position (`0..=SLIDER_MAX`) for one control.
    ///
    /// Truncates toward zero, matching an integer track bar.
    pub fn slider_position(&self, kind: ParamKind) -> i32 {
        let pos = ((self.get(kind) + kind.slider_bias()) * SLIDER_SCALE) as i32;
        pos.clamp(0, SLIDER_MAX)
    }

    /// Sets one control from a slider position.
    pub fn set_from_slider(&mut self, kind: ParamKind, position: i32) {
        let position = position.clamp(0, SLIDER_MAX);
        self.set(kind, position as f32 / SLIDER_SCALE - kind.slider_bias());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_are_identity() {
        let p = AdjustmentParameters::default();
        assert_eq!(p.brightness, 0.0);
        assert_eq!(p.contrast, 0.0);
        assert_eq!(p.saturation, 1.0);
        assert_eq!(p.gamma, 1.0);
        assert!(p.is_identity());
    }

    #[test]
    fn clamped_limits_every_field() {
        let p = AdjustmentParameters {
            brightness: 3.0,
            contrast: -7.0,
            saturation: 2.5,
            gamma: -1.0,
        }
        .clamped();
        assert_eq!(p.brightness, 1.0);
        assert_eq!(p.contrast, -1.0);
        assert_eq!(p.saturation, 2.0);
        assert_eq!(p.gamma, MIN_GAMMA);
    }

    #[test]
    fn gamma_zero_is_floored() {
        assert_eq!(ParamKind::Gamma.clamp(0.0), MIN_GAMMA);
        assert_eq!(ParamKind::Gamma.clamp(4.0), 4.0);
    }

    #[test]
    fn nan_falls_back_to_default() {
        let p = AdjustmentParameters {
            saturation: f32::NAN,
            ..Default::default()
        }
        .clamped();
        assert_eq!(p.saturation, 1.0);
    }

    #[test]
    fn set_from_str_keeps_previous_on_garbage() {
        let mut p = AdjustmentParameters::default();
        assert!(p.set_from_str(ParamKind::Brightness, "0.5"));
        assert!(!p.set_from_str(ParamKind::Brightness, ""));
        assert!(!p.set_from_str(ParamKind::Brightness, "NaN"));
        assert!(!p.set_from_str(ParamKind::Brightness, "inf"));
        assert!(!p.set_from_str(ParamKind::Brightness, "-1.01"));
        assert_eq!(p.brightness, 0.5);
    }

    #[test]
    fn set_from_str_gamma_floors_non_positive() {
        let mut p = AdjustmentParameters::default();
        assert!(p.set_from_str(ParamKind::Gamma, "-3"));
        assert_eq!(p.gamma, MIN_GAMMA);
        assert!(p.set_from_str(ParamKind::Gamma, "3.5"));
        assert_eq!(p.gamma, 3.5);
    }

    #[test]
    fn slider_mapping() {
        let mut p = AdjustmentParameters::default();
        assert_eq!(p.slider_position(ParamKind::Brightness), 100);
        assert_eq!(p.slider_position(ParamKind::Saturation), 100);

        p.set_from_slider(ParamKind::Brightness, 150);
        assert_relative_eq!(p.brightness, 0.5);
        p.set_from_slider(ParamKind::Contrast, 0);
        assert_relative_eq!(p.contrast, -1.0);
        p.set_from_slider(ParamKind::Saturation, 200);
        assert_relative_eq!(p.saturation, 2.0);
        p.set_from_slider(ParamKind::Gamma, 0);
        assert_eq!(p.gamma, MIN_GAMMA);
        p.set_from_slider(ParamKind::Gamma, 500);
        assert_relative_eq!(p.gamma, 2.0);
    }

    #[test]
    fn slider_position_saturates_for_large_gamma() {
        let p = AdjustmentParameters {
            gamma: 9.0,
            ..Default::default()
        };
        assert_eq!(p.slider_position(ParamKind::Gamma), SLIDER_MAX);
    }

    #[test]
    fn param_kind_parsing() {
        assert_eq!("Gamma".parse::<ParamKind>().unwrap(), ParamKind::Gamma);
        assert_eq!("b".parse::<ParamKind>().unwrap(), ParamKind::Brightness);
        assert!("hue".parse::<ParamKind>().is_err());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut p = AdjustmentParameters {
            brightness: 0.3,
            contrast: 0.1,
            saturation: 0.0,
            gamma: 2.0,
        };
        p.reset();
        assert!(p.is_identity());
    }

    #[test]
    fn ron_roundtrip_of_partial_preset() {
        let p: AdjustmentParameters = ron::from_str("(brightness: 0.2, saturation: 0.5)").unwrap();
        assert_eq!(p.brightness, 0.2);
        assert_eq!(p.contrast, 0.0);
        assert_eq!(p.saturation, 0.5);
        assert_eq!(p.gamma, 1.0);
    }
}
