//! Wavebanner renders a decorative banner: a point cloud scattered around a
//! sine wave, colored along the wave, optionally over a background image.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `BackgroundMode + bg.png -> Background` (image, white or transparent)
//! 2. **Generate**: `Canvas -> Vec<WavePoint>` (seeded sine-wave point cloud)
//! 3. **Build**: `Background + points -> BannerScene` (figure layout and colored markers)
//! 4. **Rasterize**: `BannerScene -> FrameRGBA` (vello CPU renderer)
//! 5. **Save**: crop to the plot area and write `banner.png` atomically
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic with a seed**: the random source is a local `StdRng`.
//! - **Premultiplied RGBA8** until encoding; the PNG holds straight alpha.
#![forbid(unsafe_code)]

mod assets;
mod colormap;
mod config;
mod foundation;
mod pipeline;
mod points;
mod render;

pub use assets::decode::{BackgroundImage, decode_image, load_background};
pub use colormap::ColorMap;
pub use config::{
    BackgroundMode, BannerPaths, DEFAULT_BACKGROUND_FILE, DEFAULT_OUTPUT_FILE, RenderConfig,
};
pub use foundation::core::{Canvas, Point, Rect, Rgba8};
pub use foundation::error::{BannerError, BannerResult};
pub use pipeline::{
    BannerReport, ComposedBanner, compose_banner, render_banner, render_banner_with_selector,
};
pub use points::{
    WaveParams, WavePoint, curve_point, generate_points_with_rng, generate_sinewave_points,
};
pub use render::FrameRGBA;
pub use render::background::{Background, BackgroundKind, resolve_background};
pub use render::cpu::rasterize;
pub use render::figure::Figure;
pub use render::output::{crop_to_bbox, encode_png, save_png, unpremultiply_rgba8_in_place};
pub use render::scene::{BannerScene, Marker, build_scene};
