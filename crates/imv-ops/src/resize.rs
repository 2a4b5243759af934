//! Image scaling.
//!
//! Two-pass separable resampling (horizontal, then vertical) over RGBA8
//! buffers. All four channels are filtered, alpha included.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Filter::Bilinear`] - Linear interpolation, widened when downscaling
//!
//! # Example
//!
//! ```rust
//! use imv_core::PixelBuffer;
//! use imv_ops::resize::{resize, Filter};
//!
//! let src = PixelBuffer::filled(16, 8, [10, 20, 30, 255]).unwrap();
//! let dst = resize(&src, 2.0, Filter::Bilinear).unwrap();
//! assert_eq!(dst.dimensions(), (32, 16));
//! ```

use imv_core::{PixelBuffer, CHANNELS};
use tracing::debug;

use crate::{OpsError, OpsResult};

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    #[default]
    Bilinear,
}

impl Filter {
    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest => 0.5,
            Filter::Bilinear => 1.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        let ax = x.abs();
        match self {
            Filter::Nearest => {
                if ax <= 0.5 { 1.0 } else { 0.0 }
            }
            Filter::Bilinear => {
                if ax < 1.0 { 1.0 - ax } else { 0.0 }
            }
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" | "box" => Ok(Filter::Nearest),
            "bilinear" | "linear" => Ok(Filter::Bilinear),
            other => Err(OpsError::InvalidParameter(format!("unknown filter '{other}'"))),
        }
    }
}

/// Scales by `factor`: `new = trunc(old * factor)` on each axis.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] for a non-finite or non-positive factor,
/// [`OpsError::InvalidDimensions`] if either resulting side is zero or the
/// source is empty.
pub fn resize(src: &PixelBuffer, factor: f64, filter: Filter) -> OpsResult<PixelBuffer> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "scale factor must be a positive number, got {factor}"
        )));
    }
    let dst_w = f64::from(src.width()) * factor;
    let dst_h = f64::from(src.height()) * factor;
    if dst_w > f64::from(u32::MAX) || dst_h > f64::from(u32::MAX) {
        return Err(OpsError::InvalidDimensions(format!(
            "{}x{} scaled by {factor} exceeds u32",
            src.width(),
            src.height()
        )));
    }
    resize_to(src, dst_w as u32, dst_h as u32, filter)
}

/// Resamples to an exact `dst_w x dst_h`.
pub fn resize_to(src: &PixelBuffer, dst_w: u32, dst_h: u32, filter: Filter) -> OpsResult<PixelBuffer> {
    if src.is_empty() {
        return Err(OpsError::InvalidDimensions("source image is empty".into()));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "destination size must be > 0, got {dst_w}x{dst_h}"
        )));
    }
    debug!(
        src_w = src.width(),
        src_h = src.height(),
        dst_w,
        dst_h,
        ?filter,
        "resize"
    );

    let (src_w, src_h) = (src.width() as usize, src.height() as usize);
    let (dst_w, dst_h) = (dst_w as usize, dst_h as usize);

    let samples: Vec<f32> = src.as_bytes().iter().map(|&b| f32::from(b)).collect();
    let temp = resize_horizontal(&samples, src_w, src_h, dst_w, filter);
    let result = resize_vertical(&temp, dst_w, src_h, dst_h, filter);

    let mut out = PixelBuffer::new(dst_w as u32, dst_h as u32)?;
    for (d, s) in out.as_bytes_mut().iter_mut().zip(result) {
        *d = s.round().clamp(0.0, 255.0) as u8;
    }
    Ok(out)
}

/// Source taps and normalized weights for every destination index on one axis.
fn contributions(src_len: usize, dst_len: usize, filter: Filter) -> Vec<Vec<(usize, f32)>> {
    let scale = src_len as f32 / dst_len as f32;
    let widen = scale.max(1.0);
    let support = filter.support() * widen;

    (0..dst_len)
        .map(|i| {
            // Map destination center to source space
            let center = (i as f32 + 0.5) * scale - 0.5;
            let left = ((center - support).floor().max(0.0)) as usize;
            let right = ((center + support).ceil().max(0.0) as usize).min(src_len - 1);

            let mut taps: Vec<(usize, f32)> = (left..=right)
                .map(|s| (s, filter.weight((s as f32 - center) / widen)))
                .filter(|&(_, w)| w > 0.0)
                .collect();

            let total: f32 = taps.iter().map(|&(_, w)| w).sum();
            if total > 0.0 {
                for tap in &mut taps {
                    tap.1 /= total;
                }
            } else {
                // Center fell outside every kernel: take the nearest edge sample
                let nearest = center.round().clamp(0.0, (src_len - 1) as f32) as usize;
                taps = vec![(nearest, 1.0)];
            }
            taps
        })
        .collect()
}

/// Horizontal resize pass.
fn resize_horizontal(src: &[f32], src_w: usize, src_h: usize, dst_w: usize, filter: Filter) -> Vec<f32> {
    let taps = contributions(src_w, dst_w, filter);
    let mut dst = vec![0.0f32; dst_w * src_h * CHANNELS];

    for y in 0..src_h {
        let src_row = &src[y * src_w * CHANNELS..(y + 1) * src_w * CHANNELS];
        let dst_row = &mut dst[y * dst_w * CHANNELS..(y + 1) * dst_w * CHANNELS];
        for (x, px_taps) in taps.iter().enumerate() {
            for &(sx, w) in px_taps {
                for c in 0..CHANNELS {
                    dst_row[x * CHANNELS + c] += src_row[sx * CHANNELS + c] * w;
                }
            }
        }
    }
    dst
}

/// Vertical resize pass.
fn resize_vertical(src: &[f32], width: usize, src_h: usize, dst_h: usize, filter: Filter) -> Vec<f32> {
    let taps = contributions(src_h, dst_h, filter);
    let stride = width * CHANNELS;
    let mut dst = vec![0.0f32; stride * dst_h];

    for (y, row_taps) in taps.iter().enumerate() {
        let dst_row = &mut dst[y * stride..(y + 1) * stride];
        for &(sy, w) in row_taps {
            let src_row = &src[sy * stride..(sy + 1) * stride];
            for (d, s) in dst_row.iter_mut().zip(src_row) {
                *d += s * w;
            }
        }
    }
    dst
}
