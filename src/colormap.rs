//! Perceptually uniform sequential color scales.
//!
//! Each scale is a table of evenly spaced stops with linear interpolation
//! between neighbours; `t` outside `[0, 1]` clamps to the end colors.

use std::str::FromStr;

use crate::foundation::{
    core::Rgba8,
    error::{BannerError, BannerResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMap {
    /// Dark purple -> teal -> yellow.
    #[default]
    Viridis,
    /// Indigo -> magenta -> yellow.
    Plasma,
    /// Black -> purple -> pale yellow.
    Magma,
    /// Black -> crimson -> pale yellow.
    Inferno,
}

impl ColorMap {
    pub const ALL: &[ColorMap] = &[Self::Viridis, Self::Plasma, Self::Magma, Self::Inferno];

    pub fn name(self) -> &'static str {
        match self {
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Magma => "magma",
            Self::Inferno => "inferno",
        }
    }

    fn stops(self) -> &'static [[u8; 3]] {
        match self {
            Self::Viridis => VIRIDIS,
            Self::Plasma => PLASMA,
            Self::Magma => MAGMA,
            Self::Inferno => INFERNO,
        }
    }

    /// Opaque color at `t`.
    pub fn evaluate(self, t: f64) -> Rgba8 {
        let stops = self.stops();
        let last = stops.len() - 1;
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let pos = t * last as f64;
        let i = (pos.floor() as usize).min(last - 1);
        let frac = pos - i as f64;
        let [r0, g0, b0] = stops[i];
        let [r1, g1, b1] = stops[i + 1];
        Rgba8::opaque(
            lerp_u8(r0, r1, frac),
            lerp_u8(g0, g1, frac),
            lerp_u8(b0, b1, frac),
        )
    }
}

impl FromStr for ColorMap {
    type Err = BannerError;

    fn from_str(s: &str) -> BannerResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| BannerError::invalid_configuration(format!("unknown color map '{s}'")))
    }
}

fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
    let (a, b) = (f64::from(a), f64::from(b));
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

// Sampled at t = 0, 1/8, ..., 1.

const VIRIDIS: &[[u8; 3]] = &[
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 145, 140],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

const PLASMA: &[[u8; 3]] = &[
    [13, 8, 135],
    [75, 3, 161],
    [125, 3, 168],
    [168, 34, 150],
    [203, 70, 121],
    [229, 107, 93],
    [248, 148, 65],
    [253, 195, 40],
    [240, 249, 33],
];

const MAGMA: &[[u8; 3]] = &[
    [0, 0, 4],
    [28, 16, 68],
    [79, 18, 123],
    [129, 37, 129],
    [181, 54, 122],
    [229, 80, 100],
    [251, 135, 97],
    [254, 194, 135],
    [252, 253, 191],
];

const INFERNO: &[[u8; 3]] = &[
    [0, 0, 4],
    [31, 12, 72],
    [85, 15, 109],
    [136, 34, 106],
    [186, 54, 85],
    [227, 89, 51],
    [249, 140, 10],
    [249, 201, 50],
    [252, 255, 164],
];
