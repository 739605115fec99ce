use kurbo::Point;

use crate::{
    config::RenderConfig,
    foundation::{core::Rgba8, error::BannerResult},
    points::{WavePoint, generate_sinewave_points},
    render::{background::Background, figure::Figure},
};

/// Filled circle in raster pixel space, no outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub center: Point,
    pub radius: f64,
    /// Straight-alpha fill.
    pub color: Rgba8,
}

/// Everything needed to rasterize one banner.
#[derive(Clone, Debug)]
pub struct BannerScene {
    pub figure: Figure,
    pub background: Background,
    /// Generated cloud in canvas data space.
    pub points: Vec<WavePoint>,
    /// One marker per point, same order.
    pub markers: Vec<Marker>,
}

#[tracing::instrument(skip_all, fields(background = ?background.kind()))]
pub fn build_scene(background: Background, config: &RenderConfig) -> BannerResult<BannerScene> {
    let canvas = background.canvas(config.default_canvas)?;
    let figure = Figure::for_canvas(canvas, config)?;
    tracing::debug!(
        canvas_w = canvas.width,
        canvas_h = canvas.height,
        fig_w = figure.width_px,
        fig_h = figure.height_px,
        "figure layout"
    );

    let points = generate_sinewave_points(
        f64::from(canvas.width),
        f64::from(canvas.height),
        &config.wave_params(),
    )?;

    let radius = figure.marker_radius_px(config.marker_area_pt2);
    let to_px = figure.data_to_px();
    let markers = points
        .iter()
        .map(|p| Marker {
            center: to_px * p.pos,
            radius,
            color: config
                .colormap
                .evaluate(p.t)
                .with_opacity(config.marker_opacity),
        })
        .collect();

    Ok(BannerScene {
        figure,
        background,
        points,
        markers,
    })
}
