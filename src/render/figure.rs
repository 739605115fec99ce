//! Physical figure layout: canvas data space mapped onto the output raster.

use kurbo::{Affine, Point, Rect};

use crate::{
    config::RenderConfig,
    foundation::{
        core::Canvas,
        error::{BannerError, BannerResult},
    },
};

const POINTS_PER_INCH: f64 = 72.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Figure {
    /// Data extent, `[0, width] x [height, 0]` with y growing downward.
    pub canvas: Canvas,
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
    pub width_px: u32,
    pub height_px: u32,
}

impl Figure {
    /// Size the figure at `config.base_width_in`, keeping the canvas aspect ratio.
    pub fn for_canvas(canvas: Canvas, config: &RenderConfig) -> BannerResult<Self> {
        let width_in = config.base_width_in;
        let height_in = width_in * canvas.aspect_ratio();
        let width_px = inches_to_px(width_in, config.dpi)?;
        let height_px = inches_to_px(height_in, config.dpi)?;
        Ok(Self {
            canvas,
            width_in,
            height_in,
            dpi: config.dpi,
            width_px,
            height_px,
        })
    }

    /// Data coordinates to raster pixels.
    pub fn data_to_px(&self) -> Affine {
        Affine::scale_non_uniform(
            f64::from(self.width_px) / f64::from(self.canvas.width),
            f64::from(self.height_px) / f64::from(self.canvas.height),
        )
    }

    pub fn to_px(&self, p: Point) -> Point {
        self.data_to_px() * p
    }

    /// Axes area in raster pixels, used as the tight save box.
    ///
    /// Nothing is drawn outside the axes and they span the whole figure, so
    /// cropping to this rect keeps the full raster with zero padding.
    pub fn plot_rect_px(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width_px), f64::from(self.height_px))
    }

    /// Radius in pixels of a circular marker covering `area_pt2` square points.
    pub fn marker_radius_px(&self, area_pt2: f64) -> f64 {
        0.5 * area_pt2.sqrt() * self.dpi / POINTS_PER_INCH
    }
}

fn inches_to_px(inches: f64, dpi: f64) -> BannerResult<u32> {
    let px = (inches * dpi).round();
    if !(px.is_finite() && px >= 1.0 && px <= f64::from(u16::MAX)) {
        return Err(BannerError::invalid_parameter(format!(
            "figure dimension {inches:.3}in at {dpi} dpi gives {px} px (allowed 1..={})",
            u16::MAX
        )));
    }
    Ok(px as u32)
}
