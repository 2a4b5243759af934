//! Pixel layout and luminance weights.
//!
//! Every [`PixelBuffer`](crate::PixelBuffer) stores four 8-bit channels per
//! pixel in `[R, G, B, A]` order.

/// A single RGBA pixel, one byte per channel.
pub type Rgba8 = [u8; 4];

/// Channels per pixel.
pub const CHANNELS: usize = 4;

/// Rec.601 red luminance weight.
pub const REC601_LUMA_R: f32 = 0.299;
/// Rec.601 green luminance weight.
pub const REC601_LUMA_G: f32 = 0.587;
/// Rec.601 blue luminance weight.
pub const REC601_LUMA_B: f32 = 0.114;

/// Rec.601 luminance weights `[R, G, B]`.
///
/// These drive the saturation matrix. Other weight sets (Rec.709, the
/// 0.3086/0.6094/0.0820 "linear" set) give visibly different greys and are
/// not interchangeable here.
pub const REC601_LUMA: [f32; 3] = [REC601_LUMA_R, REC601_LUMA_G, REC601_LUMA_B];
