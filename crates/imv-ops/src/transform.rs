//! Geometric transformations.
//!
//! - [`mirror_horizontal`] - Left-right flip
//!
//! # Example
//!
//! ```rust
//! use imv_core::PixelBuffer;
//! use imv_ops::transform::mirror_horizontal;
//!
//! let src = PixelBuffer::from_fn(2, 1, |x, _| [x as u8, 0, 0, 255]).unwrap();
//! let flipped = mirror_horizontal(&src).unwrap();
//! assert_eq!(flipped.pixel(0, 0), Some([1, 0, 0, 255]));
//! ```

use imv_core::{PixelBuffer, CHANNELS};
use tracing::trace;

use crate::OpsResult;

/// Flips the image horizontally (left-right mirror) into a new buffer.
pub fn mirror_horizontal(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), "mirror_horizontal");
    let mut dst = src.new_like()?;
    let stride = src.stride();
    if stride == 0 {
        return Ok(dst);
    }

    let out = dst.as_bytes_mut();
    for (src_row, dst_row) in src.as_bytes().chunks_exact(stride).zip(out.chunks_exact_mut(stride)) {
        for (s, d) in src_row
            .chunks_exact(CHANNELS)
            .rev()
            .zip(dst_row.chunks_exact_mut(CHANNELS))
        {
            d.copy_from_slice(s);
        }
    }
    Ok(dst)
}
