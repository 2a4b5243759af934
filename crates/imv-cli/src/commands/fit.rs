//! Fit command
//!
//! Prints the scale and offset a viewer would use for an image in a
//! viewport, optionally after a wheel zoom.

use crate::FitArgs;
use anyhow::{bail, Result};
use glam::Vec2;
use imv_view::ViewportTransform;
use tracing::trace;

pub fn run(args: FitArgs, _verbose: u8) -> Result<()> {
    let vt = compute(&args)?;
    let offset = vt.offset();
    println!("scale:  {:.6}", vt.scale());
    println!("zoom:   {:.1}%", vt.zoom_percent());
    println!("offset: {:.3},{:.3}", offset.x, offset.y);
    Ok(())
}

fn compute(args: &FitArgs) -> Result<ViewportTransform> {
    let (iw, ih) = super::parse_size(&args.image)?;
    let (vw, vh) = super::parse_size(&args.viewport)?;

    let mut vt = ViewportTransform::default();
    if !vt.fit_to(iw, ih, vw, vh) {
        bail!("image and viewport sizes must be positive");
    }

    if let Some(notches) = args.zoom {
        let anchor = match &args.anchor {
            Some(s) => {
                let (x, y) = super::parse_point(s)?;
                Vec2::new(x, y)
            }
            None => vt.viewport_size() / 2.0,
        };
        let applied = vt.zoom(notches, anchor);
        trace!(notches, applied, "zoomed");
    }
    Ok(vt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(image: &str, viewport: &str) -> FitArgs {
        FitArgs {
            image: image.into(),
            viewport: viewport.into(),
            zoom: None,
            anchor: None,
        }
    }

    #[test]
    fn fits_and_centres() {
        let vt = compute(&fit("400x300", "800x300")).unwrap();
        assert_eq!(vt.scale(), 1.0);
        assert_eq!(vt.offset(), Vec2::new(200.0, 0.0));
    }

    #[test]
    fn zoom_at_anchor() {
        let mut args = fit("1000x1000", "500x500");
        args.zoom = Some(1.0);
        args.anchor = Some("0,0".into());
        let vt = compute(&args).unwrap();
        assert!((vt.scale() - 0.6).abs() < 1e-6);
        assert_eq!(vt.offset(), Vec2::ZERO);
    }

    #[test]
    fn degenerate_sizes_fail() {
        assert!(compute(&fit("0x10", "10x10")).is_err());
        assert!(compute(&fit("10x10", "nope")).is_err());
    }
}
