use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::{
    assets::decode::BackgroundImage,
    foundation::error::{BannerError, BannerResult},
    render::{
        FrameRGBA,
        background::Background,
        scene::{BannerScene, Marker},
    },
};

const CIRCLE_TOLERANCE: f64 = 0.05;

/// Rasterize a scene with the vello CPU renderer.
///
/// Returns **premultiplied** RGBA8 at the figure's pixel size.
#[tracing::instrument(skip_all, fields(markers = scene.markers.len()))]
pub fn rasterize(scene: &BannerScene) -> BannerResult<FrameRGBA> {
    let width: u16 = scene
        .figure
        .width_px
        .try_into()
        .map_err(|_| BannerError::invalid_parameter("figure width exceeds u16"))?;
    let height: u16 = scene
        .figure
        .height_px
        .try_into()
        .map_err(|_| BannerError::invalid_parameter("figure height exceeds u16"))?;

    let full = vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match &scene.background {
        Background::Image(img) => {
            fill_white(&mut ctx, &full);
            draw_background(&mut ctx, img, width, height)?;
        }
        Background::White => fill_white(&mut ctx, &full),
        Background::Transparent => {}
    }

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    for marker in &scene.markers {
        draw_marker(&mut ctx, marker);
    }

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    let mut data = pixmap.data_as_u8_slice().to_vec();
    if scene.background.is_opaque() {
        force_opaque_in_place(&mut data);
    }

    Ok(FrameRGBA {
        width: u32::from(width),
        height: u32::from(height),
        data,
        premultiplied: true,
    })
}

/// Translucent markers over an opaque face can round to alpha 254 in the u8
/// pipeline; opaque backgrounds must stay at 255 everywhere.
fn force_opaque_in_place(rgba8_premul: &mut [u8]) {
    for px in rgba8_premul.chunks_exact_mut(4) {
        px[3] = 255;
    }
}

fn fill_white(ctx: &mut vello_cpu::RenderContext, rect: &vello_cpu::kurbo::Rect) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    ctx.fill_rect(rect);
}

/// Stretch the image over the whole raster, row 0 at the top.
fn draw_background(
    ctx: &mut vello_cpu::RenderContext,
    img: &BackgroundImage,
    width: u16,
    height: u16,
) -> BannerResult<()> {
    let pixmap = background_pixmap(img)?;
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };

    let (iw, ih) = (f64::from(img.width), f64::from(img.height));
    ctx.set_transform(vello_cpu::kurbo::Affine::scale_non_uniform(
        f64::from(width) / iw,
        f64::from(height) / ih,
    ));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
    Ok(())
}

fn draw_marker(ctx: &mut vello_cpu::RenderContext, marker: &Marker) {
    let c = marker.color;
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
    let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(marker.center), marker.radius);
    ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

/// Wrap the decoded background as a vello pixmap paint source.
fn background_pixmap(img: &BackgroundImage) -> BannerResult<vello_cpu::Pixmap> {
    let too_large = |side: &str| {
        BannerError::invalid_parameter(format!(
            "background {side} exceeds {} px ({}x{})",
            u16::MAX,
            img.width,
            img.height
        ))
    };
    let w = u16::try_from(img.width).map_err(|_| too_large("width"))?;
    let h = u16::try_from(img.height).map_err(|_| too_large("height"))?;

    let expected = usize::from(w) * usize::from(h) * 4;
    if img.rgba8_premul.len() != expected {
        return Err(BannerError::Other(anyhow::anyhow!(
            "background holds {} bytes, expected {expected} for {w}x{h}",
            img.rgba8_premul.len()
        )));
    }

    let pixels: Vec<_> = img
        .rgba8_premul
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
        .collect();
    let translucent = pixels.iter().any(|px| px.a != 255);

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        translucent,
    ))
}
