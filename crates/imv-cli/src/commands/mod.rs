//! CLI command implementations

pub mod adjust;
pub mod fit;

use anyhow::{bail, Context, Result};
use imv_core::PixelBuffer;
use std::path::Path;

/// Load a raw RGBA8 image of known size.
pub fn load_raw(path: &Path, width: u32, height: u32) -> Result<PixelBuffer> {
    let data = std::fs::read(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    PixelBuffer::from_raw(width, height, data)
        .with_context(|| format!("{} is not a {width}x{height} RGBA8 image", path.display()))
}

/// Save a buffer as raw RGBA8.
pub fn save_raw(path: &Path, image: &PixelBuffer) -> Result<()> {
    std::fs::write(path, image.as_bytes()).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parse `"WxH"` (also accepts `X` and `*`).
pub fn parse_size(s: &str) -> Result<(f32, f32)> {
    let Some((w, h)) = s.split_once(['x', 'X', '*']) else {
        bail!("expected WxH, got '{s}'");
    };
    let w: f32 = w.trim().parse().with_context(|| format!("bad width in '{s}'"))?;
    let h: f32 = h.trim().parse().with_context(|| format!("bad height in '{s}'"))?;
    Ok((w, h))
}

/// Parse `"X,Y"`.
pub fn parse_point(s: &str) -> Result<(f32, f32)> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("expected X,Y, got '{s}'");
    };
    let x: f32 = x.trim().parse().with_context(|| format!("bad x in '{s}'"))?;
    let y: f32 = y.trim().parse().with_context(|| format!("bad y in '{s}'"))?;
    Ok((x, y))
}
