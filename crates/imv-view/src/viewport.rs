//! Screen/image coordinate transform.
//!
//! The transform is a uniform scale followed by a screen-space translation:
//!
//! ```text
//! screen = image * scale + offset
//! image  = (screen - offset) / scale
//! ```
//!
//! `scale` always stays within [`MIN_SCALE`]..=[`MAX_SCALE`]. After every
//! mutating call the offset obeys the clamp rule, per axis:
//!
//! - image narrower than the viewport: centered
//! - image wider than the viewport: it must cover the viewport, so
//!   `offset <= 0` and `offset + image * scale >= viewport`
//!
//! Clamping needs both the image size and the viewport size; until both are
//! known (and positive) it does nothing.

use glam::{Affine2, Vec2};
use tracing::{debug, trace};

/// Smallest allowed scale (1%).
pub const MIN_SCALE: f32 = 0.01;

/// Largest allowed scale (10000%).
pub const MAX_SCALE: f32 = 100.0;

/// Zoom factor per wheel notch or key press.
pub const ZOOM_STEP: f32 = 1.2;

/// Raw wheel units per notch.
pub const WHEEL_DELTA: f32 = 120.0;

/// Scale + offset state tied to one image size and one viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    scale: f32,
    offset: Vec2,
    viewport: Vec2,
    image: Option<Vec2>,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            viewport: Vec2::ZERO,
            image: None,
        }
    }
}

impl ViewportTransform {
    /// Creates a transform for a viewport of the given size, no image yet.
    pub fn new(viewport_w: f32, viewport_h: f32) -> Self {
        Self {
            viewport: Vec2::new(viewport_w, viewport_h),
            ..Default::default()
        }
    }

    /// Current scale (1.0 = 100%).
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Current screen-space offset of the image origin.
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Viewport size in screen pixels.
    #[inline]
    pub fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    /// Image size in image pixels, if known.
    #[inline]
    pub fn image_size(&self) -> Option<Vec2> {
        self.image
    }

    /// `true` once a non-empty image size is recorded.
    #[inline]
    pub fn has_image(&self) -> bool {
        self.image.is_some_and(|s| s.x > 0.0 && s.y > 0.0)
    }

    /// Scale as a percentage.
    #[inline]
    pub fn zoom_percent(&self) -> f32 {
        self.scale * 100.0
    }

    /// The transform as an affine matrix (translate after scale).
    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_translation(self.offset) * Affine2::from_scale(Vec2::splat(self.scale))
    }

    /// Updates the viewport size and re-clamps the offset.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        trace!(width, height, "viewport resized");
        self.reclamp();
    }

    /// Records the size of the displayed image and re-clamps.
    ///
    /// Does not change the scale. Call [`fit`](Self::fit) for a fresh image.
    pub fn set_image_size(&mut self, width: u32, height: u32) {
        self.image = Some(Vec2::new(width as f32, height as f32));
        self.reclamp();
    }

    /// Fits and centers an `image_w x image_h` image in a
    /// `viewport_w x viewport_h` viewport, recording both sizes.
    ///
    /// Returns `false` and changes nothing if any dimension is `<= 0`.
    ///
    /// ```
    /// use imv_view::ViewportTransform;
    ///
    /// let mut vt = ViewportTransform::default();
    /// assert!(vt.fit_to(400.0, 300.0, 800.0, 300.0));
    /// assert_eq!(vt.scale(), 1.0);
    /// assert_eq!(vt.offset().to_array(), [200.0, 0.0]);
    /// ```
    pub fn fit_to(&mut self, image_w: f32, image_h: f32, viewport_w: f32, viewport_h: f32) -> bool {
        if !(image_w > 0.0 && image_h > 0.0 && viewport_w > 0.0 && viewport_h > 0.0) {
            trace!(image_w, image_h, viewport_w, viewport_h, "fit skipped: degenerate size");
            return false;
        }

        let scale = (viewport_w / image_w).min(viewport_h / image_h);
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        self.image = Some(Vec2::new(image_w, image_h));
        self.viewport = Vec2::new(viewport_w, viewport_h);
        self.offset = Vec2::new(
            (viewport_w - image_w * self.scale) / 2.0,
            (viewport_h - image_h * self.scale) / 2.0,
        );
        debug!(scale = self.scale, x = self.offset.x, y = self.offset.y, "fit");
        true
    }

    /// Fits the recorded image into the recorded viewport.
    pub fn fit(&mut self) -> bool {
        match self.image {
            Some(image) => self.fit_to(image.x, image.y, self.viewport.x, self.viewport.y),
            None => false,
        }
    }

    /// 1:1 scale at the origin, then clamped.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset = Vec2::ZERO;
        self.reclamp();
        debug!(x = self.offset.x, y = self.offset.y, "reset view");
    }

    /// Moves the image by a screen-space delta, then clamps.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
        self.reclamp();
        trace!(dx = delta.x, dy = delta.y, x = self.offset.x, y = self.offset.y, "pan");
    }

    /// Zooms by `1.2^notches` keeping `anchor` over the same image point.
    ///
    /// Fractional notches are allowed. Returns the factor actually applied.
    pub fn zoom(&mut self, notches: f32, anchor: Vec2) -> f32 {
        self.zoom_by(ZOOM_STEP.powf(notches), anchor)
    }

    /// Zooms by `factor` keeping `anchor` over the same image point.
    ///
    /// The new scale is clamped into range, so the applied factor (the
    /// return value) can be smaller than requested. The image point under
    /// the anchor stays put unless the offset clamp moves it. With no image,
    /// or a non-positive factor, nothing changes and `1.0` is returned.
    pub fn zoom_by(&mut self, factor: f32, anchor: Vec2) -> f32 {
        if !self.has_image() || !(factor.is_finite() && factor > 0.0) {
            return 1.0;
        }

        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let applied = new_scale / self.scale;

        let image_point = (anchor - self.offset) / self.scale;
        self.offset = anchor - image_point * new_scale;
        self.scale = new_scale;
        self.reclamp();

        trace!(factor, applied, scale = self.scale, "zoom");
        applied
    }

    /// Maps a screen point to image space.
    #[inline]
    pub fn screen_to_image(&self, p: Vec2) -> Vec2 {
        (p - self.offset) / self.scale
    }

    /// Maps an image point to screen space.
    #[inline]
    pub fn image_to_screen(&self, p: Vec2) -> Vec2 {
        p * self.scale + self.offset
    }

    /// Applies the clamp rule for an `image_w x image_h` image.
    ///
    /// No-op if the image or the viewport has a dimension `<= 0`.
    pub fn clamp_offset(&mut self, image_w: f32, image_h: f32) {
        if !(image_w > 0.0 && image_h > 0.0 && self.viewport.x > 0.0 && self.viewport.y > 0.0) {
            return;
        }
        self.offset.x = clamp_axis(self.offset.x, image_w * self.scale, self.viewport.x);
        self.offset.y = clamp_axis(self.offset.y, image_h * self.scale, self.viewport.y);
    }

    fn reclamp(&mut self) {
        if let Some(image) = self.image {
            self.clamp_offset(image.x, image.y);
        }
    }
}

/// One axis of the clamp rule.
#[inline]
fn clamp_axis(offset: f32, scaled: f32, viewport: f32) -> f32 {
    if scaled <= viewport {
        return (viewport - scaled) / 2.0;
    }
    let mut offset = offset;
    if offset > 0.0 {
        offset = 0.0;
    }
    if offset + scaled < viewport {
        offset = viewport - scaled;
    }
    offset
}
