use std::{path::Path, sync::Arc};

use crate::foundation::{
    core::Canvas,
    error::{BannerError, BannerResult},
};

/// Decoded background, premultiplied RGBA8, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl BackgroundImage {
    pub fn canvas(&self) -> BannerResult<Canvas> {
        Canvas::new(self.width, self.height)
    }
}

pub fn load_background(path: &Path) -> BannerResult<BackgroundImage> {
    let bytes = std::fs::read(path).map_err(|e| BannerError::DecodeFailure {
        path: path.to_path_buf(),
        source: image::ImageError::IoError(e),
    })?;
    decode_image(&bytes).map_err(|source| BannerError::DecodeFailure {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode any format `image` recognizes into a premultiplied backdrop.
pub fn decode_image(bytes: &[u8]) -> Result<BackgroundImage, image::ImageError> {
    let rgba = image::load_from_memory(bytes)?.into_rgba8();
    let (width, height) = rgba.dimensions();

    let rgba8_premul: Vec<u8> = rgba
        .into_raw()
        .chunks_exact(4)
        .flat_map(|px| premultiply(px[0], px[1], px[2], px[3]))
        .collect();

    Ok(BackgroundImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let scale = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
    [scale(r), scale(g), scale(b), a]
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn translucent_background_is_premultiplied() {
        // Half-covered orange next to a fully clear pixel.
        let img = image::RgbaImage::from_raw(2, 1, vec![240, 120, 0, 128, 90, 90, 90, 0]).unwrap();
        let bg = decode_image(&png_bytes(img)).unwrap();
        assert_eq!((bg.width, bg.height), (2, 1));
        assert_eq!(bg.rgba8_premul.as_slice(), &[120, 60, 0, 128, 0, 0, 0, 0]);
    }

    #[test]
    fn opaque_background_is_unchanged() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([12, 200, 99, 255]));
        let bg = decode_image(&png_bytes(img)).unwrap();
        assert!(bg.rgba8_premul.chunks_exact(4).all(|px| px == [12, 200, 99, 255]));
    }

    #[test]
    fn background_canvas_uses_pixel_dimensions() {
        let img = image::RgbaImage::from_pixel(12, 5, image::Rgba([1, 2, 3, 255]));
        let prepared = decode_image(&png_bytes(img)).unwrap();
        assert_eq!(prepared.canvas().unwrap(), Canvas::new(12, 5).unwrap());
    }

    #[test]
    fn garbage_is_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bg.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = load_background(&path).unwrap_err();
        assert!(matches!(err, BannerError::DecodeFailure { .. }));
    }
}
