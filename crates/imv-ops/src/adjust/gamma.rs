//! 8-bit gamma lookup table.
//!
//! `out = round(255 * (in / 255) ^ (1 / gamma))`, precomputed for all 256
//! inputs. Gamma above 1 lifts midtones, below 1 darkens them.

use super::params::ParamKind;

/// Precomputed 256-entry gamma curve.
#[derive(Clone, PartialEq, Eq)]
pub struct GammaLut {
    table: [u8; 256],
}

impl GammaLut {
    /// Builds the table for `gamma`. Values `<= 0` use
    /// [`MIN_GAMMA`](super::MIN_GAMMA).
    ///
    /// ```
    /// use imv_ops::GammaLut;
    ///
    /// let lut = GammaLut::new(2.0);
    /// assert_eq!(lut.apply(0), 0);
    /// assert_eq!(lut.apply(255), 255);
    /// assert_eq!(lut.apply(64), 128); // sqrt(64/255) * 255 = 127.75
    /// ```
    pub fn new(gamma: f32) -> Self {
        let inv = 1.0 / f64::from(ParamKind::Gamma.clamp(gamma));
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let v = (i as f64 / 255.0).powf(inv) * 255.0;
            *entry = v.round().clamp(0.0, 255.0) as u8;
        }
        Self { table }
    }

    /// Table that maps every value to itself.
    pub fn identity() -> Self {
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = i as u8;
        }
        Self { table }
    }

    /// Returns `true` if the table maps every value to itself.
    pub fn is_identity(&self) -> bool {
        self.table.iter().enumerate().all(|(i, &v)| v as usize == i)
    }

    /// Looks up one channel value.
    #[inline]
    pub fn apply(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    /// The raw table.
    pub fn as_table(&self) -> &[u8; 256] {
        &self.table
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::fmt::Debug for GammaLut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GammaLut")
            .field("identity", &self.is_identity())
            .field("mid", &self.table[128])
            .finish()
    }
}
