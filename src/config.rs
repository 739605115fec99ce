use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{
    colormap::ColorMap,
    foundation::{
        core::Canvas,
        error::{BannerError, BannerResult},
    },
    points::WaveParams,
};

/// Background file looked up by [`BackgroundMode::Auto`].
pub const DEFAULT_BACKGROUND_FILE: &str = "bg.png";
/// Banner written by the renderer.
pub const DEFAULT_OUTPUT_FILE: &str = "banner.png";

/// How the canvas behind the point cloud is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    /// Use the background file if it exists, otherwise plain white.
    #[default]
    Auto,
    /// Opaque white, background file ignored.
    White,
    /// No fill; the alpha channel is kept on save.
    Transparent,
}

impl BackgroundMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::White => "white",
            Self::Transparent => "transparent",
        }
    }
}

impl FromStr for BackgroundMode {
    type Err = BannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "white" => Ok(Self::White),
            "transparent" => Ok(Self::Transparent),
            other => Err(BannerError::invalid_configuration(format!(
                "unknown background mode '{other}' (expected auto, white or transparent)"
            ))),
        }
    }
}

impl std::fmt::Display for BackgroundMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-for-run rendering parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub n_points: usize,
    pub seed: Option<u64>,
    pub amplitude_factor: f64,
    pub scatter_factor: f64,
    pub colormap: ColorMap,
    /// Marker fill opacity in `[0, 1]`.
    pub marker_opacity: f32,
    /// Marker area in typographic points squared.
    pub marker_area_pt2: f64,
    pub dpi: f64,
    /// Figure width in inches; the height follows the canvas aspect ratio.
    pub base_width_in: f64,
    pub default_canvas: Canvas,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            n_points: 3000,
            seed: Some(42),
            amplitude_factor: 0.3,
            scatter_factor: 0.05,
            colormap: ColorMap::Viridis,
            marker_opacity: 0.7,
            marker_area_pt2: 20.0,
            dpi: 300.0,
            base_width_in: 15.84,
            default_canvas: Canvas::DEFAULT,
        }
    }
}

impl RenderConfig {
    pub fn wave_params(&self) -> WaveParams {
        WaveParams {
            n_points: self.n_points,
            seed: self.seed,
            amplitude_factor: self.amplitude_factor,
            scatter_factor: self.scatter_factor,
        }
    }

    pub fn validate(&self) -> BannerResult<()> {
        if !(self.marker_opacity.is_finite() && (0.0..=1.0).contains(&self.marker_opacity)) {
            return Err(BannerError::invalid_parameter(
                "marker_opacity must be within [0, 1]",
            ));
        }
        for (name, v) in [
            ("marker_area_pt2", self.marker_area_pt2),
            ("dpi", self.dpi),
            ("base_width_in", self.base_width_in),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(BannerError::invalid_parameter(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        Canvas::new(self.default_canvas.width, self.default_canvas.height)?;
        self.wave_params().validate()
    }
}

/// Input and output locations of a banner run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BannerPaths {
    pub background: PathBuf,
    pub output: PathBuf,
}

impl Default for BannerPaths {
    fn default() -> Self {
        Self {
            background: PathBuf::from(DEFAULT_BACKGROUND_FILE),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl BannerPaths {
    /// Default file names resolved against `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            background: dir.join(DEFAULT_BACKGROUND_FILE),
            output: dir.join(DEFAULT_OUTPUT_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_known_selectors() {
        for mode in [
            BackgroundMode::Auto,
            BackgroundMode::White,
            BackgroundMode::Transparent,
        ] {
            assert_eq!(mode.as_str().parse::<BackgroundMode>().unwrap(), mode);
        }
    }

    #[test]
    fn unknown_mode_is_invalid_configuration() {
        let err = "sepia".parse::<BackgroundMode>().unwrap_err();
        assert!(matches!(err, BannerError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("sepia"));
    }

    #[test]
    fn defaults_match_banner_constants() {
        let cfg = RenderConfig::default();
        assert_eq!(cfg.n_points, 3000);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.amplitude_factor, 0.3);
        assert_eq!(cfg.scatter_factor, 0.05);
        assert_eq!(cfg.default_canvas, Canvas::DEFAULT);
        cfg.validate().unwrap();
    }

    #[test]
    fn validate_rejects_bad_opacity_and_dpi() {
        let cfg = RenderConfig {
            marker_opacity: 1.5,
            ..RenderConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(BannerError::InvalidParameter(_))
        ));

        let cfg = RenderConfig {
            dpi: 0.0,
            ..RenderConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn paths_in_dir_use_fixed_names() {
        let p = BannerPaths::in_dir("/tmp/x");
        assert_eq!(p.background, Path::new("/tmp/x/bg.png"));
        assert_eq!(p.output, Path::new("/tmp/x/banner.png"));
    }
}
