//! # imv-core
//!
//! Core types shared by every imv crate.
//!
//! - [`PixelBuffer`] - Owned RGBA8 pixel grid, row-major
//! - [`Error`], [`Result`] - Buffer-level failures (bounds, allocation, layout)
//! - [`REC601_LUMA`] - Luminance weights used by the saturation matrix
//!
//! ## Crate Structure
//!
//! ```text
//! imv-core (this crate)
//!    ^
//!    |
//!    +-- imv-ops (color adjustment engine, mirror, resize)
//!    +-- imv-view (viewport transform, edit session, viewer)
//!    +-- imv-cli (batch front end)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod pixel;

pub use buffer::PixelBuffer;
pub use error::{Error, Result};
pub use pixel::{Rgba8, CHANNELS, REC601_LUMA, REC601_LUMA_B, REC601_LUMA_G, REC601_LUMA_R};

/// Prelude module for convenient imports.
///
/// ```
/// use imv_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::error::{Error, Result};
    pub use crate::pixel::{Rgba8, CHANNELS, REC601_LUMA};
}
