//! Synchronous event dispatcher.
//!
//! [`Viewer`] ties the document image, the [`ViewportTransform`], the pan
//! gesture and the [`EditSession`] together. Every [`ViewerMsg`] runs to
//! completion inside [`Viewer::handle`], which reports whether the display
//! needs repainting.

use glam::{Affine2, Vec2};
use imv_core::PixelBuffer;
use imv_ops::{resize, transform, AdjustmentParameters, Filter, ParamKind};
use tracing::{debug, trace, warn};

use crate::error::ViewerError;
use crate::gesture::PanGesture;
use crate::messages::{ViewerMsg, ZoomKey};
use crate::session::EditSession;
use crate::viewport::{ViewportTransform, WHEEL_DELTA};

/// Window title prefix.
const TITLE: &str = "Image Viewer";

/// What to draw: a buffer and the image-to-screen transform.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Buffer to paint.
    pub buffer: &'a PixelBuffer,
    /// `screen = image * scale + offset`.
    pub transform: Affine2,
}

/// Viewer state driven by input events.
#[derive(Debug)]
pub struct Viewer {
    image: Option<PixelBuffer>,
    loaded: Option<PixelBuffer>,
    fit_to_window: bool,
    viewport: ViewportTransform,
    gesture: PanGesture,
    session: EditSession,
    params: AdjustmentParameters,
}

impl Viewer {
    /// Empty viewer with a `width x height` display area.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            image: None,
            loaded: None,
            fit_to_window: true,
            viewport: ViewportTransform::new(width, height),
            gesture: PanGesture::new(),
            session: EditSession::new(),
            params: AdjustmentParameters::default(),
        }
    }

    /// Applies one event. Returns `true` if the display should be repainted.
    ///
    /// # Errors
    ///
    /// - [`ViewerError::NoImage`] for image operations with nothing loaded
    /// - [`ViewerError::Ops`] when a load or revert copy cannot be allocated
    /// - [`ViewerError::SessionOpen`] for mirror/scale during an adjustment
    /// - [`ViewerError::Session`] for commit/cancel with no adjustment open,
    ///   or when a preview cannot be allocated (the old one stays)
    pub fn handle(&mut self, msg: ViewerMsg) -> Result<bool, ViewerError> {
        match msg {
            ViewerMsg::Load(buffer) => {
                self.load(buffer)?;
                Ok(true)
            }
            ViewerMsg::Revert => self.revert(),
            ViewerMsg::Resize { w, h } => {
                self.viewport.set_viewport_size(w, h);
                if self.fit_to_window {
                    self.viewport.fit();
                }
                Ok(true)
            }
            ViewerMsg::PointerDown { button, pos } => {
                self.gesture.press(button, pos);
                Ok(false)
            }
            ViewerMsg::PointerMove { pos } => Ok(match self.gesture.drag(pos) {
                Some(delta) if self.image.is_some() => {
                    self.viewport.pan(delta);
                    true
                }
                _ => false,
            }),
            ViewerMsg::PointerUp { button } => {
                self.gesture.release(button);
                Ok(false)
            }
            ViewerMsg::Wheel { delta, anchor } => Ok(self.zoom(delta / WHEEL_DELTA, anchor)),
            ViewerMsg::Key(key) => Ok(self.zoom_key(key)),
            ViewerMsg::Fit => Ok(self.viewport.fit()),
            ViewerMsg::ToggleFit => Ok(self.toggle_fit()),
            ViewerMsg::ResetView => {
                if self.image.is_none() {
                    return Ok(false);
                }
                self.viewport.reset();
                Ok(true)
            }
            ViewerMsg::BeginAdjust => {
                self.begin_adjust()?;
                Ok(false)
            }
            ViewerMsg::SetParam { kind, text } => self.set_param(kind, &text),
            ViewerMsg::SetParams(params) => {
                self.params = params.clamped();
                self.refresh_preview()
            }
            ViewerMsg::ResetParams => {
                self.params.reset();
                if self.session.is_active() { self.refresh_preview() } else { Ok(false) }
            }
            ViewerMsg::Commit => {
                self.session.commit()?;
                self.image = self.session.take_pristine();
                self.params = AdjustmentParameters::default();
                Ok(true)
            }
            ViewerMsg::Cancel => {
                self.session.cancel()?;
                self.session.take_pristine();
                self.params = AdjustmentParameters::default();
                Ok(true)
            }
            ViewerMsg::Mirror => {
                let image = self.editable_image("mirror")?;
                let mirrored = transform::mirror_horizontal(image)?;
                self.image = Some(mirrored);
                Ok(true)
            }
            ViewerMsg::Scale { factor } => {
                let image = self.editable_image("scale")?;
                let scaled = resize::resize(image, factor, Filter::Bilinear)?;
                self.viewport.set_image_size(scaled.width(), scaled.height());
                self.image = Some(scaled);
                Ok(true)
            }
        }
    }

    /// Buffer to display: the preview while one exists, else the document.
    pub fn current(&self) -> Option<&PixelBuffer> {
        if self.session.is_active() {
            self.session.current()
        } else {
            self.image.as_ref()
        }
    }

    /// Current buffer plus its transform, or `None` with no image.
    pub fn frame(&self) -> Option<Frame<'_>> {
        self.current().map(|buffer| Frame {
            buffer,
            transform: self.viewport.to_affine(),
        })
    }

    /// Committed document image.
    pub fn image(&self) -> Option<&PixelBuffer> {
        self.image.as_ref()
    }

    /// View transform.
    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    /// Parameters shown in the adjustment controls.
    pub fn params(&self) -> &AdjustmentParameters {
        &self.params
    }

    /// `true` while window resizes re-fit the image.
    pub fn fits_to_window(&self) -> bool {
        self.fit_to_window
    }

    /// `true` while an adjustment session is open.
    pub fn is_adjusting(&self) -> bool {
        self.session.is_active()
    }

    /// `"Image Viewer - {w}x{h} @ {percent}%"`, or a placeholder with no image.
    pub fn status_line(&self) -> String {
        match self.current() {
            Some(buf) => format!(
                "{TITLE} - {}x{} @ {}%",
                buf.width(),
                buf.height(),
                format_percent(self.viewport.zoom_percent())
            ),
            None => format!("{TITLE} - Pan & Zoom"),
        }
    }

    // =========================================================================
    // Event helpers
    // =========================================================================

    fn load(&mut self, buffer: PixelBuffer) -> Result<(), ViewerError> {
        let original = buffer.try_clone()?;
        debug!(width = buffer.width(), height = buffer.height(), "image loaded");
        self.show(buffer);
        self.loaded = Some(original);
        Ok(())
    }

    /// Replaces the document with the buffer as it was loaded.
    fn revert(&mut self) -> Result<bool, ViewerError> {
        let Some(original) = &self.loaded else {
            return Ok(false);
        };
        let restored = original.try_clone()?;
        debug!(width = restored.width(), height = restored.height(), "reverted to loaded image");
        self.show(restored);
        Ok(true)
    }

    /// Installs a fresh document. Pending adjustments are dropped.
    fn show(&mut self, buffer: PixelBuffer) {
        self.session.discard();
        self.params = AdjustmentParameters::default();
        self.viewport.set_image_size(buffer.width(), buffer.height());
        self.viewport.fit();
        self.gesture.cancel();
        self.image = Some(buffer);
    }

    /// Flips between fit-to-window and 1:1.
    fn toggle_fit(&mut self) -> bool {
        if self.image.is_none() {
            return false;
        }
        self.fit_to_window = !self.fit_to_window;
        if self.fit_to_window {
            self.viewport.fit();
        } else {
            self.viewport.reset();
        }
        debug!(fit = self.fit_to_window, scale = self.viewport.scale(), "toggle fit");
        true
    }

    fn zoom(&mut self, notches: f32, anchor: Vec2) -> bool {
        if self.image.is_none() {
            return false;
        }
        let applied = self.viewport.zoom(notches, anchor);
        trace!(notches, applied, "zoom");
        true
    }

    fn zoom_key(&mut self, key: ZoomKey) -> bool {
        let centre = self.viewport.viewport_size() / 2.0;
        self.zoom(key.notches(), centre)
    }

    fn begin_adjust(&mut self) -> Result<(), ViewerError> {
        self.open_session()?;
        self.params = AdjustmentParameters::default();
        Ok(())
    }

    /// Parses `text`; a rejected value keeps the old one and skips recompute.
    fn set_param(&mut self, kind: ParamKind, text: &str) -> Result<bool, ViewerError> {
        if !self.params.set_from_str(kind, text) {
            return Ok(false);
        }
        self.refresh_preview()
    }

    /// Recomputes the preview, opening a session on first change.
    fn refresh_preview(&mut self) -> Result<bool, ViewerError> {
        if !self.session.is_active() {
            self.open_session()?;
        }
        self.session.update_preview(&self.params)?;
        Ok(true)
    }

    fn open_session(&mut self) -> Result<(), ViewerError> {
        let image = self.image.as_ref().ok_or(ViewerError::NoImage)?;
        self.session.begin(image)?;
        Ok(())
    }

    fn editable_image(&self, op: &'static str) -> Result<&PixelBuffer, ViewerError> {
        if self.session.is_active() {
            warn!(op, "refused while adjusting");
            return Err(ViewerError::SessionOpen { op });
        }
        self.image.as_ref().ok_or(ViewerError::NoImage)
    }
}

/// Percentage with at most one decimal: `100`, `83.3`, `12.5`.
fn format_percent(percent: f32) -> String {
    let s = format!("{percent:.1}");
    match s.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::PointerButton;

    fn checker(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::from_fn(w, h, |x, y| {
            if (x + y) % 2 == 0 { [220, 40, 40, 255] } else { [20, 20, 200, 255] }
        })
        .unwrap()
    }

    fn loaded(w: u32, h: u32) -> Viewer {
        let mut v = Viewer::new(400.0, 300.0);
        v.handle(ViewerMsg::Load(checker(w, h))).unwrap();
        v
    }

    #[test]
    fn status_line_formats() {
        let v = Viewer::new(400.0, 300.0);
        assert_eq!(v.status_line(), "Image Viewer - Pan & Zoom");

        let v = loaded(400, 300);
        assert_eq!(v.status_line(), "Image Viewer - 400x300 @ 100%");

        let v = loaded(800, 600);
        assert_eq!(v.status_line(), "Image Viewer - 800x600 @ 50%");

        let v = loaded(1200, 900);
        assert_eq!(v.status_line(), "Image Viewer - 1200x900 @ 33.3%");
    }

    #[test]
    fn format_percent_trims_zero_decimal() {
        assert_eq!(format_percent(100.0), "100");
        assert_eq!(format_percent(12.5), "12.5");
        assert_eq!(format_percent(172.8), "172.8");
    }

    #[test]
    fn load_fits_image() {
        let v = loaded(800, 300);
        assert_eq!(v.viewport().scale(), 0.5);
        assert_eq!(v.viewport().offset(), Vec2::new(0.0, 75.0));
    }

    #[test]
    fn drag_pans_zoomed_image() {
        let mut v = loaded(400, 300);
        assert!(v.handle(ViewerMsg::Key(ZoomKey::In)).unwrap());
        let before = v.viewport().offset();

        v.handle(ViewerMsg::PointerDown { button: PointerButton::Primary, pos: Vec2::new(100.0, 100.0) })
            .unwrap();
        assert!(v.handle(ViewerMsg::PointerMove { pos: Vec2::new(110.0, 95.0) }).unwrap());
        assert_eq!(v.viewport().offset(), before + Vec2::new(10.0, -5.0));

        v.handle(ViewerMsg::PointerUp { button: PointerButton::Primary }).unwrap();
        assert!(!v.handle(ViewerMsg::PointerMove { pos: Vec2::new(0.0, 0.0) }).unwrap());
    }

    #[test]
    fn wheel_uses_raw_units() {
        let mut v = loaded(400, 300);
        v.handle(ViewerMsg::Wheel { delta: 240.0, anchor: Vec2::new(200.0, 150.0) }).unwrap();
        approx::assert_abs_diff_eq!(v.viewport().scale(), 1.44, epsilon = 1e-5);
        v.handle(ViewerMsg::Wheel { delta: -120.0, anchor: Vec2::new(200.0, 150.0) }).unwrap();
        approx::assert_abs_diff_eq!(v.viewport().scale(), 1.2, epsilon = 1e-5);
    }

    #[test]
    fn view_events_without_image_do_nothing() {
        let mut v = Viewer::new(400.0, 300.0);
        assert!(!v.handle(ViewerMsg::Key(ZoomKey::In)).unwrap());
        assert!(!v.handle(ViewerMsg::Fit).unwrap());
        assert!(!v.handle(ViewerMsg::ResetView).unwrap());
        assert_eq!(v.viewport().scale(), 1.0);
        assert!(v.frame().is_none());
    }

    #[test]
    fn params_open_session_and_cancel_restores() {
        let mut v = loaded(8, 6);
        let original = v.image().unwrap().clone();

        assert!(v.handle(ViewerMsg::SetParam { kind: ParamKind::Brightness, text: "0.3".into() }).unwrap());
        assert!(v.is_adjusting());
        assert_ne!(v.current(), Some(&original));

        assert!(v.handle(ViewerMsg::Cancel).unwrap());
        assert!(!v.is_adjusting());
        assert_eq!(v.current(), Some(&original));
    }

    #[test]
    fn commit_replaces_document() {
        let mut v = loaded(8, 6);
        v.handle(ViewerMsg::BeginAdjust).unwrap();
        let params = AdjustmentParameters { saturation: 0.0, ..Default::default() };
        v.handle(ViewerMsg::SetParams(params)).unwrap();
        let preview = v.current().unwrap().clone();

        v.handle(ViewerMsg::Commit).unwrap();
        assert_eq!(v.image(), Some(&preview));
        assert!(v.image().unwrap().pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
    }

    #[test]
    fn rejected_text_keeps_value_and_skips_recompute() {
        let mut v = loaded(4, 4);
        v.handle(ViewerMsg::BeginAdjust).unwrap();
        v.handle(ViewerMsg::SetParam { kind: ParamKind::Contrast, text: "0.5".into() }).unwrap();
        let shown = v.current().unwrap().clone();

        assert!(!v.handle(ViewerMsg::SetParam { kind: ParamKind::Contrast, text: "lots".into() }).unwrap());
        assert!(!v.handle(ViewerMsg::SetParam { kind: ParamKind::Contrast, text: "3".into() }).unwrap());
        assert_eq!(v.params().contrast, 0.5);
        assert_eq!(v.current(), Some(&shown));
    }

    #[test]
    fn reset_params_restores_identity_preview() {
        let mut v = loaded(4, 4);
        let original = v.image().unwrap().clone();
        v.handle(ViewerMsg::SetParam { kind: ParamKind::Gamma, text: "2.2".into() }).unwrap();
        v.handle(ViewerMsg::ResetParams).unwrap();
        assert_eq!(v.params(), &AdjustmentParameters::default());
        assert_eq!(v.current(), Some(&original));
    }

    #[test]
    fn destructive_ops_refused_during_adjustment() {
        let mut v = loaded(4, 4);
        v.handle(ViewerMsg::BeginAdjust).unwrap();
        assert!(matches!(v.handle(ViewerMsg::Mirror), Err(ViewerError::SessionOpen { op: "mirror" })));
        assert!(matches!(
            v.handle(ViewerMsg::Scale { factor: 2.0 }),
            Err(ViewerError::SessionOpen { op: "scale" })
        ));
        assert!(matches!(v.handle(ViewerMsg::BeginAdjust), Err(ViewerError::Session(_))));
    }

    #[test]
    fn commit_without_session_is_an_error() {
        let mut v = loaded(4, 4);
        assert!(matches!(v.handle(ViewerMsg::Commit), Err(ViewerError::Session(_))));
        assert!(matches!(Viewer::new(1.0, 1.0).handle(ViewerMsg::BeginAdjust), Err(ViewerError::NoImage)));
    }

    #[test]
    fn mirror_and_scale() {
        let mut v = loaded(4, 2);
        let before = v.image().unwrap().pixel(0, 0);
        v.handle(ViewerMsg::Mirror).unwrap();
        assert_eq!(v.image().unwrap().pixel(3, 0), before);

        v.handle(ViewerMsg::Scale { factor: 2.5 }).unwrap();
        assert_eq!(v.image().unwrap().dimensions(), (10, 5));
        assert_eq!(v.viewport().image_size(), Some(Vec2::new(10.0, 5.0)));
        assert!(matches!(v.handle(ViewerMsg::Scale { factor: 0.0 }), Err(ViewerError::Ops(_))));
    }

    #[test]
    fn load_during_session_discards_it() {
        let mut v = loaded(4, 4);
        v.handle(ViewerMsg::SetParam { kind: ParamKind::Saturation, text: "0".into() }).unwrap();
        let next = checker(6, 6);
        v.handle(ViewerMsg::Load(next.clone())).unwrap();
        assert!(!v.is_adjusting());
        assert_eq!(v.current(), Some(&next));
    }

    #[test]
    fn frame_carries_transform() {
        let v = loaded(800, 300);
        let frame = v.frame().unwrap();
        assert_eq!(frame.buffer.dimensions(), (800, 300));
        assert_eq!(frame.transform.transform_point2(Vec2::ZERO), Vec2::new(0.0, 75.0));
    }

    fn grey(w: u32, h: u32, v: u8) -> PixelBuffer {
        PixelBuffer::filled(w, h, [v, v, v, 255]).unwrap()
    }

    fn set(v: &mut Viewer, kind: ParamKind, text: &str) {
        v.handle(ViewerMsg::SetParam { kind, text: text.into() }).unwrap();
    }

    #[test]
    fn cancelled_values_do_not_return() {
        let mut v = Viewer::new(400.0, 300.0);
        v.handle(ViewerMsg::Load(grey(2, 2, 100))).unwrap();
        set(&mut v, ParamKind::Brightness, "0.5");
        v.handle(ViewerMsg::Cancel).unwrap();
        assert_eq!(v.params(), &AdjustmentParameters::default());

        set(&mut v, ParamKind::Gamma, "1");
        assert_eq!(v.params().brightness, 0.0);
        assert!(v.current().unwrap().pixels().all(|p| p == [100, 100, 100, 255]));
    }

    #[test]
    fn committed_values_apply_once() {
        let mut v = Viewer::new(400.0, 300.0);
        v.handle(ViewerMsg::Load(grey(2, 2, 100))).unwrap();
        set(&mut v, ParamKind::Brightness, "0.2");
        v.handle(ViewerMsg::Commit).unwrap();
        assert!(v.image().unwrap().pixels().all(|p| p == [151, 151, 151, 255]));

        set(&mut v, ParamKind::Gamma, "1");
        assert!(v.current().unwrap().pixels().all(|p| p == [151, 151, 151, 255]));
    }

    #[test]
    fn load_resets_params() {
        let mut v = loaded(4, 4);
        set(&mut v, ParamKind::Contrast, "0.7");
        v.handle(ViewerMsg::Load(grey(3, 3, 10))).unwrap();
        assert_eq!(v.params(), &AdjustmentParameters::default());
        v.handle(ViewerMsg::BeginAdjust).unwrap();
    }

    #[test]
    fn revert_restores_loaded_image() {
        let mut v = loaded(4, 2);
        let original = v.image().unwrap().clone();

        v.handle(ViewerMsg::Mirror).unwrap();
        v.handle(ViewerMsg::Scale { factor: 2.0 }).unwrap();
        set(&mut v, ParamKind::Saturation, "0");
        v.handle(ViewerMsg::Commit).unwrap();
        assert_ne!(v.image(), Some(&original));

        assert!(v.handle(ViewerMsg::Revert).unwrap());
        assert_eq!(v.image(), Some(&original));
        assert_eq!(v.viewport().image_size(), Some(Vec2::new(4.0, 2.0)));
        assert_eq!(v.viewport().scale(), 100.0);
    }

    #[test]
    fn revert_discards_open_adjustment() {
        let mut v = loaded(4, 4);
        let original = v.image().unwrap().clone();
        set(&mut v, ParamKind::Gamma, "2.5");

        v.handle(ViewerMsg::Revert).unwrap();
        assert!(!v.is_adjusting());
        assert_eq!(v.params(), &AdjustmentParameters::default());
        assert_eq!(v.current(), Some(&original));
        assert!(!Viewer::new(10.0, 10.0).handle(ViewerMsg::Revert).unwrap());
    }

    #[test]
    fn toggle_fit_switches_between_fit_and_actual_size() {
        let mut v = loaded(800, 600);
        assert!(v.fits_to_window());
        assert_eq!(v.viewport().scale(), 0.5);

        assert!(v.handle(ViewerMsg::ToggleFit).unwrap());
        assert!(!v.fits_to_window());
        assert_eq!(v.viewport().scale(), 1.0);
        assert_eq!(v.viewport().offset(), Vec2::ZERO);

        v.handle(ViewerMsg::ToggleFit).unwrap();
        assert_eq!(v.viewport().scale(), 0.5);
        assert!(!Viewer::new(10.0, 10.0).handle(ViewerMsg::ToggleFit).unwrap());
    }

    #[test]
    fn resize_refits_only_in_fit_mode() {
        let mut v = loaded(800, 600);
        v.handle(ViewerMsg::Resize { w: 200.0, h: 150.0 }).unwrap();
        assert_eq!(v.viewport().scale(), 0.25);

        v.handle(ViewerMsg::ToggleFit).unwrap();
        v.handle(ViewerMsg::Resize { w: 400.0, h: 300.0 }).unwrap();
        assert_eq!(v.viewport().scale(), 1.0);
    }
}
