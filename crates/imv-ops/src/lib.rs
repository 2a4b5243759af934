//! # imv-ops
//!
//! Pixel operations for the imv viewer.
//!
//! # Modules
//!
//! - [`adjust`] - Brightness/contrast/saturation/gamma engine
//! - [`transform`] - Mirror
//! - [`resize`] - Scale by factor with nearest or bilinear sampling
//!
//! Every operation reads a source [`PixelBuffer`](imv_core::PixelBuffer) and
//! returns a freshly allocated one; sources are never mutated.
//!
//! # Example
//!
//! ```rust
//! use imv_core::PixelBuffer;
//! use imv_ops::{adjust, AdjustmentParameters};
//!
//! let src = PixelBuffer::filled(2, 2, [200, 100, 50, 255]).unwrap();
//! let params = AdjustmentParameters { saturation: 0.0, ..Default::default() };
//! let grey = adjust::apply(&src, &params).unwrap();
//! let [r, g, b, a] = grey.pixel(0, 0).unwrap();
//! assert!(r == g && g == b);
//! assert_eq!(a, 255);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod adjust;
pub mod resize;
pub mod transform;

pub use adjust::{AdjustmentParameters, ColorMatrix, GammaLut, ParamKind};
pub use error::{OpsError, OpsResult};
pub use resize::Filter;
