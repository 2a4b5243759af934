//! Golden digest tests.
//!
//! Each case runs a fixed operation over [`test_card`] and compares the
//! SHA-256 of the result against a stored reference. Only operations whose
//! output is exact in 8 bits (no rounding-sensitive midtones) are pinned here.

use imv_ops::{adjust, transform, AdjustmentParameters};

use crate::{digest, test_card};

const CARD: &str = "a251dda35def1b7e40a2a986432869d9bd0d6c8d5575c50e37dc5be5ca45f4ce";

/// RGB forced to 128, alpha kept.
const CARD_FLAT_GREY: &str = "2293b71c3e9d2a94b5e72923c1839de66d361509dd8f50cfaa22c396abc448c9";

/// RGB forced to 0, alpha kept.
const CARD_BLACK: &str = "ed490c1a90d68b9227dbdb2a31badf9f5f57207325694c603d92a7c5ca9e5ea0";

const CARD_MIRRORED: &str = "3201f7b6be07c4ca34fc3dc31fe3cbb1fbdee5348c996a1bf82f7dcaef6d5314";

#[test]
fn card_reference() {
    assert_eq!(digest(&test_card()), CARD);
}

#[test]
fn identity_adjustment() {
    let out = adjust::apply(&test_card(), &AdjustmentParameters::identity()).unwrap();
    assert_eq!(digest(&out), CARD);
}

#[test]
fn zero_contrast_is_flat_grey() {
    let params = AdjustmentParameters { contrast: -1.0, ..Default::default() };
    let out = adjust::apply(&test_card(), &params).unwrap();
    assert_eq!(digest(&out), CARD_FLAT_GREY);
}

#[test]
fn minimum_brightness_is_black() {
    let params = AdjustmentParameters { brightness: -1.0, ..Default::default() };
    let out = adjust::apply(&test_card(), &params).unwrap();
    assert_eq!(digest(&out), CARD_BLACK);
}

#[test]
fn mirror() {
    let out = transform::mirror_horizontal(&test_card()).unwrap();
    assert_eq!(digest(&out), CARD_MIRRORED);

    let back = transform::mirror_horizontal(&out).unwrap();
    assert_eq!(digest(&back), CARD);
}
