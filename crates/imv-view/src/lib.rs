//! # imv-view
//!
//! Toolkit-independent core of the imv image viewer.
//!
//! Features:
//! - Screen/image coordinate mapping with anchor-preserving zoom
//! - Edge-clamped panning, fit-to-window, 1:1 reset
//! - Non-destructive brightness/contrast/saturation/gamma edits with live
//!   preview, commit and cancel
//! - One dispatcher ([`Viewer`]) for all input events
//!
//! A front end owns a [`Viewer`], feeds it [`ViewerMsg`]s, and paints
//! [`Viewer::frame`] whenever [`Viewer::handle`] returns `true`.
//!
//! # Quick Start
//!
//! ```rust
//! use imv_core::PixelBuffer;
//! use imv_ops::ParamKind;
//! use imv_view::{Viewer, ViewerMsg};
//!
//! let mut viewer = Viewer::new(800.0, 600.0);
//! let image = PixelBuffer::filled(400, 300, [90, 120, 200, 255]).unwrap();
//! viewer.handle(ViewerMsg::Load(image)).unwrap();
//!
//! viewer
//!     .handle(ViewerMsg::SetParam { kind: ParamKind::Saturation, text: "0".into() })
//!     .unwrap();
//! viewer.handle(ViewerMsg::Commit).unwrap();
//!
//! assert_eq!(viewer.status_line(), "Image Viewer - 400x300 @ 200%");
//! ```
//!
//! # Input Bindings
//!
//! | Input | Action |
//! |-------|--------|
//! | Primary drag | Pan |
//! | Wheel | Zoom around the cursor, 1.2x per notch |
//! | `+`/`-` | Zoom around the viewport centre |
//! | Fit / Reset view | Fit to window / 1:1 at the origin |
//! | `F` (toggle fit) | Alternate fit and 1:1; while fitting, resizes re-fit |
//! | Revert | Restore the image as loaded |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod gesture;
mod handler;
mod messages;
mod session;
pub mod viewport;

pub use error::{SessionError, SessionResult, ViewerError};
pub use gesture::{PanGesture, PointerButton};
pub use handler::{Frame, Viewer};
pub use messages::{ViewerMsg, ZoomKey};
pub use session::EditSession;
pub use viewport::{ViewportTransform, MAX_SCALE, MIN_SCALE, WHEEL_DELTA, ZOOM_STEP};
