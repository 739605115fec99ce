use std::path::Path;

use crate::{
    assets::decode::{BackgroundImage, load_background},
    config::BackgroundMode,
    foundation::{core::Canvas, error::BannerResult},
};

/// Resolved canvas backdrop; fixed for the rest of the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Background {
    /// Decoded background image over a white face.
    Image(BackgroundImage),
    White,
    Transparent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundKind {
    Image,
    White,
    Transparent,
}

impl Background {
    pub fn kind(&self) -> BackgroundKind {
        match self {
            Self::Image(_) => BackgroundKind::Image,
            Self::White => BackgroundKind::White,
            Self::Transparent => BackgroundKind::Transparent,
        }
    }

    /// Data-space canvas: the image's pixel size, else `default`.
    pub fn canvas(&self, default: Canvas) -> BannerResult<Canvas> {
        match self {
            Self::Image(img) => img.canvas(),
            Self::White | Self::Transparent => Canvas::new(default.width, default.height),
        }
    }

    pub fn is_opaque(&self) -> bool {
        !matches!(self, Self::Transparent)
    }
}

/// Resolve the backdrop for `mode`, reading `path` only in auto mode.
pub fn resolve_background(mode: BackgroundMode, path: &Path) -> BannerResult<Background> {
    match mode {
        BackgroundMode::Auto => {
            if path.is_file() {
                let img = load_background(path)?;
                tracing::debug!(
                    path = %path.display(),
                    width = img.width,
                    height = img.height,
                    "loaded background image"
                );
                Ok(Background::Image(img))
            } else {
                tracing::debug!(path = %path.display(), "no background image, using white");
                Ok(Background::White)
            }
        }
        BackgroundMode::White => Ok(Background::White),
        BackgroundMode::Transparent => Ok(Background::Transparent),
    }
}
