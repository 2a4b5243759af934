//! Non-destructive edit session.
//!
//! An [`EditSession`] owns two buffers:
//!
//! - **pristine**: the last committed image, never touched by adjustments
//! - **preview**: the most recent adjusted copy, if any
//!
//! ```text
//!            begin(src)                 commit()
//!   Idle ---------------> Active ----------------> Idle (pristine = preview)
//!                          |   ^
//!      update_preview(p)   |   |        cancel()
//!                          +---+   ----------------> Idle (pristine unchanged)
//! ```
//!
//! [`update_preview`](EditSession::update_preview) builds the new buffer
//! completely before dropping the old one, so a failed allocation leaves the
//! previous preview on display. A preview must match pristine's dimensions.
//!
//! # Example
//!
//! ```rust
//! use imv_core::PixelBuffer;
//! use imv_ops::AdjustmentParameters;
//! use imv_view::EditSession;
//!
//! let src = PixelBuffer::filled(4, 4, [100, 100, 100, 255]).unwrap();
//! let mut session = EditSession::new();
//! session.begin(&src).unwrap();
//!
//! let params = AdjustmentParameters { brightness: 0.1, ..Default::default() };
//! session.update_preview(&params).unwrap();
//! session.cancel().unwrap();
//!
//! assert_eq!(session.pristine(), Some(&src));
//! ```

use imv_core::PixelBuffer;
use imv_ops::{adjust, AdjustmentParameters, OpsResult};
use tracing::{debug, trace};

use crate::error::{SessionError, SessionResult};

/// Pristine/preview pair with commit and cancel.
#[derive(Debug, Default)]
pub struct EditSession {
    pristine: Option<PixelBuffer>,
    preview: Option<PixelBuffer>,
    params: AdjustmentParameters,
    active: bool,
}

impl EditSession {
    /// Idle session with no image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session on a deep copy of `source`.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyActive`] if a session is open, or an allocation
    /// error if the copy cannot be made. Either way the session is unchanged.
    pub fn begin(&mut self, source: &PixelBuffer) -> SessionResult<()> {
        if self.active {
            return Err(SessionError::AlreadyActive);
        }
        let pristine = source.try_clone()?;
        debug!(width = pristine.width(), height = pristine.height(), "edit session begin");

        self.pristine = Some(pristine);
        self.preview = None;
        self.params = AdjustmentParameters::default();
        self.active = true;
        Ok(())
    }

    /// Regenerates the preview from the pristine buffer and returns it.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotActive`] outside a session. An allocation failure
    /// is returned as-is and the previous preview stays in place.
    pub fn update_preview(&mut self, params: &AdjustmentParameters) -> SessionResult<&PixelBuffer> {
        let clamped = params.clamped();
        trace!(
            brightness = clamped.brightness,
            contrast = clamped.contrast,
            saturation = clamped.saturation,
            gamma = clamped.gamma,
            "preview update"
        );
        self.install_preview("update_preview", clamped, |pristine| adjust::apply(pristine, params))
    }

    /// Promotes the preview (if any) to pristine and closes the session.
    ///
    /// Returns the new pristine buffer.
    pub fn commit(&mut self) -> SessionResult<&PixelBuffer> {
        self.active_pristine("commit")?;
        let had_preview = self.preview.is_some();
        if let Some(preview) = self.preview.take() {
            self.pristine = Some(preview);
        }
        self.active = false;
        debug!(had_preview, "edit session commit");
        self.pristine.as_ref().ok_or(SessionError::NotActive { op: "commit" })
    }

    /// Drops the preview and closes the session. Returns the untouched
    /// pristine buffer, which the caller should display again.
    pub fn cancel(&mut self) -> SessionResult<&PixelBuffer> {
        self.active_pristine("cancel")?;
        let had_preview = self.preview.take().is_some();
        self.active = false;
        debug!(had_preview, "edit session cancel");
        self.pristine.as_ref().ok_or(SessionError::NotActive { op: "cancel" })
    }

    /// Drops both buffers and closes the session, whatever its state.
    pub fn discard(&mut self) {
        if self.active {
            debug!(had_preview = self.preview.is_some(), "edit session discarded");
        }
        self.pristine = None;
        self.preview = None;
        self.params = AdjustmentParameters::default();
        self.active = false;
    }

    /// `true` between [`begin`](Self::begin) and commit/cancel.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Last committed buffer.
    #[inline]
    pub fn pristine(&self) -> Option<&PixelBuffer> {
        self.pristine.as_ref()
    }

    /// Uncommitted preview, if one has been produced.
    #[inline]
    pub fn preview(&self) -> Option<&PixelBuffer> {
        self.preview.as_ref()
    }

    /// Buffer to display: the preview when present, else pristine.
    #[inline]
    pub fn current(&self) -> Option<&PixelBuffer> {
        self.preview.as_ref().or(self.pristine.as_ref())
    }

    /// Parameters of the last successful preview (clamped).
    #[inline]
    pub fn params(&self) -> &AdjustmentParameters {
        &self.params
    }

    /// Takes the pristine buffer out of a closed session.
    ///
    /// Returns `None` while a session is open.
    pub fn take_pristine(&mut self) -> Option<PixelBuffer> {
        if self.active {
            return None;
        }
        self.pristine.take()
    }

    /// Builds a preview from pristine and swaps it in.
    ///
    /// The old preview is only replaced once `build` has succeeded and its
    /// output has pristine's dimensions.
    fn install_preview<F>(
        &mut self,
        op: &'static str,
        params: AdjustmentParameters,
        build: F,
    ) -> SessionResult<&PixelBuffer>
    where
        F: FnOnce(&PixelBuffer) -> OpsResult<PixelBuffer>,
    {
        let pristine = self.active_pristine(op)?;
        let fresh = build(pristine)?;
        if !fresh.same_dimensions(pristine) {
            return Err(imv_core::Error::dimension_mismatch(pristine.dimensions(), fresh.dimensions()).into());
        }
        self.params = params;
        Ok(&*self.preview.insert(fresh))
    }

    fn active_pristine(&self, op: &'static str) -> SessionResult<&PixelBuffer> {
        match (&self.pristine, self.active) {
            (Some(p), true) => Ok(p),
            _ => Err(SessionError::NotActive { op }),
        }
    }
}
