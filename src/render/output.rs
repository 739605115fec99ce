use std::{io::Cursor, io::Write as _, path::Path};

use kurbo::Rect;

use crate::{
    foundation::error::{BannerError, BannerResult},
    render::FrameRGBA,
};

/// Crop `frame` to the pixel-aligned hull of `bbox`, with zero padding.
pub fn crop_to_bbox(frame: FrameRGBA, bbox: Rect) -> BannerResult<FrameRGBA> {
    let x0 = bbox.x0.floor().max(0.0) as u32;
    let y0 = bbox.y0.floor().max(0.0) as u32;
    let x1 = (bbox.x1.ceil().max(0.0) as u32).min(frame.width);
    let y1 = (bbox.y1.ceil().max(0.0) as u32).min(frame.height);
    if x0 >= x1 || y0 >= y1 {
        return Err(BannerError::invalid_parameter(format!(
            "crop box {bbox:?} does not overlap a {}x{} frame",
            frame.width, frame.height
        )));
    }
    if (x0, y0, x1, y1) == (0, 0, frame.width, frame.height) {
        return Ok(frame);
    }

    let (w, h) = (x1 - x0, y1 - y0);
    let stride = frame.width as usize * 4;
    let mut data = Vec::with_capacity(w as usize * h as usize * 4);
    for row in y0..y1 {
        let start = row as usize * stride + x0 as usize * 4;
        data.extend_from_slice(&frame.data[start..start + w as usize * 4]);
    }
    Ok(FrameRGBA {
        width: w,
        height: h,
        data,
        premultiplied: frame.premultiplied,
    })
}

pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Encode as an RGBA PNG, converting to straight alpha first.
pub fn encode_png(mut frame: FrameRGBA) -> Result<Vec<u8>, image::ImageError> {
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut frame.data);
    }
    let mut buf = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut buf),
        &frame.data,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )?;
    Ok(buf)
}

/// Write `frame` to `path` as PNG.
///
/// The bytes go to a temporary file next to `path` which is then renamed
/// over it, so `path` is either the complete new banner or untouched.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn save_png(frame: FrameRGBA, path: &Path) -> BannerResult<()> {
    let bytes = encode_png(frame).map_err(|e| BannerError::write_failure(path, image_to_io(e)))?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| BannerError::write_failure(path, e))?;

    let mut tmp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| BannerError::write_failure(path, e))?;
    tmp.write_all(&bytes)
        .and_then(|()| {
            if let Some(perms) = target_permissions(path) {
                tmp.as_file().set_permissions(perms)?;
            }
            tmp.as_file().sync_all()
        })
        .map_err(|e| BannerError::write_failure(path, e))?;
    tmp.persist(path)
        .map_err(|e| BannerError::write_failure(path, e.error))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote banner");
    Ok(())
}

/// Permissions the banner should end up with: those of the file being
/// replaced, else a regular `0644` file. Temp files start out as `0600`.
fn target_permissions(path: &Path) -> Option<std::fs::Permissions> {
    if let Ok(meta) = std::fs::metadata(path) {
        return Some(meta.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        Some(std::fs::Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

fn image_to_io(err: image::ImageError) -> std::io::Error {
    match err {
        image::ImageError::IoError(e) => e,
        other => std::io::Error::other(other),
    }
}
