//! Input events delivered to the [`Viewer`](crate::Viewer).
//!
//! The front end translates toolkit events into these and hands them to
//! [`Viewer::handle`](crate::Viewer::handle) one at a time.

use glam::Vec2;
use imv_core::PixelBuffer;
use imv_ops::{AdjustmentParameters, ParamKind};

use crate::gesture::PointerButton;

/// Keyboard zoom commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomKey {
    /// `+`: zoom in one step.
    In,
    /// `-`: zoom out one step.
    Out,
}

impl ZoomKey {
    /// Maps a typed character to a zoom command.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' | '=' => Some(Self::In),
            '-' | '_' => Some(Self::Out),
            _ => None,
        }
    }

    /// Notches this key zooms by.
    pub fn notches(self) -> f32 {
        match self {
            Self::In => 1.0,
            Self::Out => -1.0,
        }
    }
}

/// Events from the input layer.
#[derive(Debug, Clone)]
pub enum ViewerMsg {
    /// Replace the document image; the view is fitted to it.
    Load(PixelBuffer),

    /// Go back to the image as it was loaded, dropping every edit.
    Revert,

    /// Display area resized.
    Resize {
        /// New width in screen pixels.
        w: f32,
        /// New height in screen pixels.
        h: f32,
    },

    /// Pointer button pressed.
    PointerDown {
        /// Which button.
        button: PointerButton,
        /// Screen position.
        pos: Vec2,
    },

    /// Pointer moved.
    PointerMove {
        /// Screen position.
        pos: Vec2,
    },

    /// Pointer button released.
    PointerUp {
        /// Which button.
        button: PointerButton,
    },

    /// Mouse wheel turned.
    Wheel {
        /// Raw wheel units; 120 per notch, positive zooms in.
        delta: f32,
        /// Screen point to keep fixed.
        anchor: Vec2,
    },

    /// Keyboard zoom around the viewport centre.
    Key(ZoomKey),

    /// Fit the image to the viewport.
    Fit,

    /// 1:1 scale at the origin.
    ResetView,

    /// Switch between fit-to-window and 1:1. While fitting, resizes re-fit.
    ToggleFit,

    /// Open an adjustment session on the current image.
    BeginAdjust,

    /// Raw text from a parameter field or slider.
    SetParam {
        /// Which control.
        kind: ParamKind,
        /// Unparsed user text.
        text: String,
    },

    /// Replace all four parameters at once.
    SetParams(AdjustmentParameters),

    /// Restore default parameters.
    ResetParams,

    /// Keep the adjusted image.
    Commit,

    /// Discard the adjusted image.
    Cancel,

    /// Mirror the image left-to-right.
    Mirror,

    /// Scale the image by a factor.
    Scale {
        /// Positive scale factor.
        factor: f64,
    },
}
