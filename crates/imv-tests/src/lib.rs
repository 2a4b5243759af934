//! Integration tests for imv crates.
//!
//! End-to-end checks across the buffer, adjustment engine, edit session and
//! viewport transform. Whole-buffer identity is asserted through SHA-256
//! digests so failures print short, comparable values.

use imv_core::PixelBuffer;
use imv_ops::AdjustmentParameters;
use sha2::{Digest, Sha256};

#[cfg(test)]
mod golden;

/// SHA-256 of the buffer's pixel bytes, lowercase hex.
pub fn digest(buf: &PixelBuffer) -> String {
    let mut hasher = Sha256::new();
    hasher.update(buf.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// 16x16 test card: red ramps with x, green with y, blue against red,
/// alpha varies per pixel.
pub fn test_card() -> PixelBuffer {
    PixelBuffer::from_fn(16, 16, |x, y| {
        [
            (x * 16) as u8,
            (y * 16) as u8,
            (255 - x * 16) as u8,
            ((x * y * 7) % 256) as u8,
        ]
    })
    .unwrap_or_else(|e| panic!("test card: {e}"))
}

/// Deterministic parameter sequence spread over every control's range.
pub fn param_sequence(count: usize, seed: u64) -> Vec<AdjustmentParameters> {
    let mut state = seed;
    let mut next = move || {
        // 64-bit LCG (Knuth MMIX constants)
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 40) as f32 / (1u64 << 24) as f32
    };
    (0..count)
        .map(|_| AdjustmentParameters {
            brightness: next() * 2.0 - 1.0,
            contrast: next() * 2.0 - 1.0,
            saturation: next() * 2.0,
            gamma: 0.2 + next() * 3.0,
        })
        .collect()
}
