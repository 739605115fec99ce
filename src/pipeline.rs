use std::path::{Path, PathBuf};

use crate::{
    config::{BackgroundMode, BannerPaths, RenderConfig},
    foundation::error::BannerResult,
    render::{
        FrameRGBA,
        background::{BackgroundKind, resolve_background},
        cpu::rasterize,
        output::{crop_to_bbox, save_png},
        scene::{BannerScene, build_scene},
    },
};

/// A fully rendered banner, not yet written anywhere.
#[derive(Clone, Debug)]
pub struct ComposedBanner {
    pub scene: BannerScene,
    /// Premultiplied pixels, cropped to the plot area.
    pub frame: FrameRGBA,
}

/// Summary of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BannerReport {
    pub output: PathBuf,
    pub background: BackgroundKind,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub width_px: u32,
    pub height_px: u32,
    pub markers: usize,
}

/// Resolve the background, generate the cloud and rasterize, without writing.
///
/// Pipeline:
/// 1. [`resolve_background`](crate::resolve_background)
/// 2. [`build_scene`](crate::build_scene)
/// 3. [`rasterize`](crate::rasterize), then crop to the plot area
pub fn compose_banner(
    mode: BackgroundMode,
    background_path: &Path,
    config: &RenderConfig,
) -> BannerResult<ComposedBanner> {
    config.validate()?;
    let background = resolve_background(mode, background_path)?;
    let scene = build_scene(background, config)?;
    let frame = rasterize(&scene)?;
    let frame = crop_to_bbox(frame, scene.figure.plot_rect_px())?;
    Ok(ComposedBanner { scene, frame })
}

/// Render one banner and write it to `paths.output`.
///
/// Any error aborts before the output file is created or modified.
#[tracing::instrument(skip(paths, config), fields(output = %paths.output.display()))]
pub fn render_banner(
    mode: BackgroundMode,
    paths: &BannerPaths,
    config: &RenderConfig,
) -> BannerResult<BannerReport> {
    let ComposedBanner { scene, frame } = compose_banner(mode, &paths.background, config)?;

    let report = BannerReport {
        output: paths.output.clone(),
        background: scene.background.kind(),
        canvas_width: scene.figure.canvas.width,
        canvas_height: scene.figure.canvas.height,
        width_px: frame.width,
        height_px: frame.height,
        markers: scene.markers.len(),
    };

    save_png(frame, &paths.output)?;
    Ok(report)
}

/// [`render_banner`] taking the mode as its `auto`/`white`/`transparent` selector.
pub fn render_banner_with_selector(
    selector: &str,
    paths: &BannerPaths,
    config: &RenderConfig,
) -> BannerResult<BannerReport> {
    let mode: BackgroundMode = selector.parse()?;
    render_banner(mode, paths, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{core::Canvas, error::BannerError};

    fn tiny_config() -> RenderConfig {
        RenderConfig {
            n_points: 20,
            dpi: 100.0,
            base_width_in: 2.0,
            default_canvas: Canvas::new(200, 50).unwrap(),
            ..RenderConfig::default()
        }
    }

    #[test]
    fn compose_keeps_full_figure_after_crop() {
        let dir = tempfile::tempdir().unwrap();
        let composed = compose_banner(
            BackgroundMode::White,
            &dir.path().join("bg.png"),
            &tiny_config(),
        )
        .unwrap();
        assert_eq!((composed.frame.width, composed.frame.height), (200, 50));
        assert_eq!(composed.scene.markers.len(), 20);
    }

    #[test]
    fn invalid_config_fails_before_resolving_background() {
        let dir = tempfile::tempdir().unwrap();
        let bg = dir.path().join("bg.png");
        std::fs::write(&bg, b"garbage").unwrap();
        let config = RenderConfig {
            n_points: 0,
            ..tiny_config()
        };
        let err = compose_banner(BackgroundMode::Auto, &bg, &config).unwrap_err();
        assert!(matches!(err, BannerError::InvalidParameter(_)));
    }

    #[test]
    fn report_describes_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = BannerPaths::in_dir(dir.path());
        let report = render_banner(BackgroundMode::Transparent, &paths, &tiny_config()).unwrap();
        assert_eq!(report.background, BackgroundKind::Transparent);
        assert_eq!((report.canvas_width, report.canvas_height), (200, 50));
        assert_eq!((report.width_px, report.height_px), (200, 50));
        assert_eq!(report.markers, 20);
        assert!(paths.output.is_file());
    }
}
