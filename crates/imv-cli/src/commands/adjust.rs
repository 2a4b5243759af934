//! Adjust command
//!
//! Loads a raw RGBA8 image into a [`Viewer`], optionally mirrors and scales
//! it, then runs one adjustment session and commits the result.

use crate::AdjustArgs;
use anyhow::{bail, Context, Result};
use imv_ops::{AdjustmentParameters, Filter, ParamKind};
use imv_view::{Viewer, ViewerMsg};
use std::path::Path;
use tracing::{debug, info};

pub fn run(args: AdjustArgs, verbose: u8) -> Result<()> {
    let image = super::load_raw(&args.input, args.width, args.height)?;
    let params = resolve_params(&args)?;
    let filter: Filter = args.filter.parse()?;

    let mut viewer = Viewer::new(args.width as f32, args.height as f32);
    viewer.handle(ViewerMsg::Load(image))?;

    if args.mirror {
        viewer.handle(ViewerMsg::Mirror)?;
    }
    if let Some(factor) = args.scale {
        if filter == Filter::Bilinear {
            viewer.handle(ViewerMsg::Scale { factor })?;
        } else {
            // The viewer always scales bilinearly; other filters reload.
            let src = viewer.image().context("no image loaded")?;
            let scaled = imv_ops::resize::resize(src, factor, filter)?;
            viewer.handle(ViewerMsg::Load(scaled))?;
        }
    }

    viewer.handle(ViewerMsg::BeginAdjust)?;
    viewer.handle(ViewerMsg::SetParams(params))?;
    viewer.handle(ViewerMsg::Commit)?;

    let out = viewer.image().context("no image after commit")?;
    if verbose > 0 {
        println!(
            "{}x{} -> {}x{} {:?}",
            args.width,
            args.height,
            out.width(),
            out.height(),
            params
        );
    }
    info!(output = %args.output.display(), "writing");
    super::save_raw(&args.output, out)
}

/// Preset (if any) overlaid by explicit flags.
fn resolve_params(args: &AdjustArgs) -> Result<AdjustmentParameters> {
    let mut params = match &args.preset {
        Some(path) => load_preset(path)?,
        None => AdjustmentParameters::default(),
    };

    let flags = [
        (ParamKind::Brightness, &args.brightness),
        (ParamKind::Contrast, &args.contrast),
        (ParamKind::Saturation, &args.saturation),
        (ParamKind::Gamma, &args.gamma),
    ];
    for (kind, text) in flags {
        if let Some(text) = text {
            if !params.set_from_str(kind, text) {
                let (lo, hi) = kind.range();
                bail!("invalid {kind} '{text}' (expected a number in {lo}..{hi})");
            }
        }
    }
    debug!(?params, "resolved parameters");
    Ok(params)
}

fn load_preset(path: &Path) -> Result<AdjustmentParameters> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    let params: AdjustmentParameters =
        ron::from_str(&text).with_context(|| format!("Invalid preset: {}", path.display()))?;
    Ok(params.clamped())
}
