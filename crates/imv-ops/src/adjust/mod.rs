//! Brightness/contrast/saturation/gamma engine.
//!
//! [`apply`] maps a source buffer and [`AdjustmentParameters`] to a new
//! buffer in two stages per pixel:
//!
//! 1. [`ColorMatrix`]: linear 3x3 + translation on normalized RGB, clamped to
//!    `0..=1` and quantized to 8 bits.
//! 2. [`GammaLut`]: 256-entry power curve on each of R, G, B.
//!
//! Alpha is copied through untouched. The source is never mutated.
//!
//! Matrix-then-gamma is a fixed order. Compositors that accept the two as
//! independent attributes may compose them the other way round, so
//! pixel-for-pixel parity with such a renderer is not guaranteed.
//!
//! # Example
//!
//! ```rust
//! use imv_core::PixelBuffer;
//! use imv_ops::adjust::{apply, AdjustmentParameters};
//!
//! let src = PixelBuffer::filled(2, 2, [255, 0, 0, 255]).unwrap();
//! let params = AdjustmentParameters { brightness: 0.2, ..Default::default() };
//! let out = apply(&src, &params).unwrap();
//! assert_eq!(out.pixel(0, 0), Some([255, 51, 51, 255]));
//! ```

mod gamma;
mod matrix;
mod params;

pub use gamma::GammaLut;
pub use matrix::ColorMatrix;
pub use params::{AdjustmentParameters, ParamKind, MIN_GAMMA, SLIDER_MAX};

use imv_core::{PixelBuffer, CHANNELS};
use tracing::{debug, trace};

use crate::OpsResult;

/// Pixels per parallel work unit.
#[cfg(feature = "parallel")]
const PAR_CHUNK_PIXELS: usize = 16 * 1024;

/// Compiled form of a parameter set: matrix plus gamma table.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    /// Linear stage.
    pub matrix: ColorMatrix,
    /// Gamma stage.
    pub gamma: GammaLut,
}

impl Adjustment {
    /// Compiles clamped `params`.
    pub fn new(params: &AdjustmentParameters) -> Self {
        let params = params.clamped();
        Self {
            matrix: ColorMatrix::from_params(&params),
            gamma: GammaLut::new(params.gamma),
        }
    }

    /// Returns `true` if this adjustment changes nothing.
    pub fn is_identity(&self) -> bool {
        self.matrix.is_identity() && self.gamma.is_identity()
    }

    /// Adjusts one pixel.
    #[inline]
    pub fn apply_pixel(&self, px: [u8; 4]) -> [u8; 4] {
        let rgb = [
            f32::from(px[0]) / 255.0,
            f32::from(px[1]) / 255.0,
            f32::from(px[2]) / 255.0,
        ];
        let out = self.matrix.apply(rgb);
        [
            self.gamma.apply(quantize(out[0])),
            self.gamma.apply(quantize(out[1])),
            self.gamma.apply(quantize(out[2])),
            px[3],
        ]
    }

    /// Adjusts interleaved RGBA8 bytes in place.
    pub fn apply_inplace(&self, bytes: &mut [u8]) {
        if self.is_identity() {
            return;
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            bytes
                .par_chunks_mut(PAR_CHUNK_PIXELS * CHANNELS)
                .for_each(|chunk| self.apply_chunk(chunk));
        }

        #[cfg(not(feature = "parallel"))]
        self.apply_chunk(bytes);
    }

    fn apply_chunk(&self, bytes: &mut [u8]) {
        for px in bytes.chunks_exact_mut(CHANNELS) {
            let out = self.apply_pixel([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        }
    }
}

/// Normalized value to 8 bits, clamped.
#[inline]
fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Applies `params` to `source`, returning a new buffer of the same size.
///
/// Parameters are clamped into range first; gamma `<= 0` becomes
/// [`MIN_GAMMA`].
///
/// # Errors
///
/// Only allocation of the output can fail. On error nothing has been
/// produced and the source is untouched.
pub fn apply(source: &PixelBuffer, params: &AdjustmentParameters) -> OpsResult<PixelBuffer> {
    let params = params.clamped();
    trace!(
        width = source.width(),
        height = source.height(),
        brightness = params.brightness,
        contrast = params.contrast,
        saturation = params.saturation,
        gamma = params.gamma,
        "adjust"
    );

    let adjustment = Adjustment::new(&params);
    let mut out = source.try_clone()?;
    adjustment.apply_inplace(out.as_bytes_mut());

    debug!(pixels = out.pixel_count(), identity = adjustment.is_identity(), "adjusted buffer");
    Ok(out)
}
