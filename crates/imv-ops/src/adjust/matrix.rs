//! Combined brightness/contrast/saturation color matrix.
//!
//! The three linear controls collapse into one 3x3 block plus a translation
//! shared by R, G and B. Values are normalized (`0..=1`).
//!
//! # Construction
//!
//! ```text
//! bf = brightness + 1
//! cf = contrast + 1
//! ct = (1 - cf) / 2
//!
//! sX = lumX * (1 - saturation)           X in {R, G, B}
//!
//!       | (sR+s)*cf   sG*cf      sB*cf    |
//!   M = |  sR*cf     (sG+s)*cf   sB*cf    |     t = ct * bf + brightness
//!       |  sR*cf      sG*cf     (sB+s)*cf |
//!
//! out = M * rgb + t
//! ```
//!
//! Brightness enters only through `t`: as the additive term and as the scale
//! on the contrast midpoint shift. Rows are output channels (column-vector
//! convention).

use imv_core::REC601_LUMA;

use super::AdjustmentParameters;

/// 3x3 linear block plus a uniform translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    /// Row-major coefficients; row `i` produces output channel `i`.
    pub m: [[f32; 3]; 3],
    /// Translation added to every channel.
    pub offset: f32,
}

impl ColorMatrix {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        offset: 0.0,
    };

    /// Builds the matrix for `params` (clamped first).
    pub fn from_params(params: &AdjustmentParameters) -> Self {
        let p = params.clamped();

        let brightness_factor = p.brightness + 1.0;
        let contrast_factor = p.contrast + 1.0;
        let contrast_translate = (1.0 - contrast_factor) / 2.0;

        let s = p.saturation;
        let [lum_r, lum_g, lum_b] = REC601_LUMA;
        let sr = lum_r * (1.0 - s);
        let sg = lum_g * (1.0 - s);
        let sb = lum_b * (1.0 - s);

        let cf = contrast_factor;
        Self {
            m: [
                [(sr + s) * cf, sg * cf, sb * cf],
                [sr * cf, (sg + s) * cf, sb * cf],
                [sr * cf, sg * cf, (sb + s) * cf],
            ],
            offset: contrast_translate * brightness_factor + p.brightness,
        }
    }

    /// Returns `true` if applying this matrix changes nothing.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Transforms a normalized RGB triple. Output is not clamped.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let m = &self.m;
        [
            m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2] + self.offset,
            m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2] + self.offset,
            m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2] + self.offset,
        ]
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn neutral_params_give_identity() {
        let m = ColorMatrix::from_params(&AdjustmentParameters::default());
        assert!(m.is_identity());
    }

    #[test]
    fn zero_saturation_rows_are_luminance() {
        let m = ColorMatrix::from_params(&AdjustmentParameters {
            saturation: 0.0,
            ..Default::default()
        });
        for row in m.m {
            assert_abs_diff_eq!(row[0], 0.299, epsilon = EPSILON);
            assert_abs_diff_eq!(row[1], 0.587, epsilon = EPSILON);
            assert_abs_diff_eq!(row[2], 0.114, epsilon = EPSILON);
        }
        assert_eq!(m.offset, 0.0);
    }

    #[test]
    fn brightness_only_translates() {
        let m = ColorMatrix::from_params(&AdjustmentParameters {
            brightness: 0.2,
            ..Default::default()
        });
        assert_eq!(m.m, ColorMatrix::IDENTITY.m);
        assert_abs_diff_eq!(m.offset, 0.2, epsilon = EPSILON);
    }

    #[test]
    fn contrast_keeps_mid_grey() {
        let m = ColorMatrix::from_params(&AdjustmentParameters {
            contrast: 0.6,
            ..Default::default()
        });
        let out = m.apply([0.5, 0.5, 0.5]);
        for c in out {
            assert_abs_diff_eq!(c, 0.5, epsilon = EPSILON);
        }
        let dark = m.apply([0.25, 0.25, 0.25]);
        assert!(dark[0] < 0.25);
    }

    #[test]
    fn brightness_scales_contrast_shift() {
        // cf = 0.5, ct = 0.25, bf = 1.5 => t = 0.25 * 1.5 + 0.5
        let m = ColorMatrix::from_params(&AdjustmentParameters {
            brightness: 0.5,
            contrast: -0.5,
            ..Default::default()
        });
        assert_abs_diff_eq!(m.offset, 0.875, epsilon = EPSILON);
        assert_abs_diff_eq!(m.m[0][0], 0.5, epsilon = EPSILON);
    }

    #[test]
    fn out_of_range_params_are_clamped() {
        let wild = ColorMatrix::from_params(&AdjustmentParameters {
            brightness: 5.0,
            contrast: 5.0,
            saturation: 5.0,
            gamma: 1.0,
        });
        let tame = ColorMatrix::from_params(&AdjustmentParameters {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 2.0,
            gamma: 1.0,
        });
        assert_eq!(wild, tame);
    }
}
