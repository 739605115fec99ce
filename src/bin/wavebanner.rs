use anyhow::Context as _;

/// Background selector for this run: `auto`, `white` or `transparent`.
const BACKGROUND_MODE: &str = "auto";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .init();

    let paths = wavebanner::BannerPaths::default();
    let config = wavebanner::RenderConfig::default();

    let report = wavebanner::render_banner_with_selector(BACKGROUND_MODE, &paths, &config)
        .with_context(|| format!("render banner '{}'", paths.output.display()))?;

    eprintln!(
        "wrote {} ({}x{}, {} markers, {:?} background)",
        report.output.display(),
        report.width_px,
        report.height_px,
        report.markers,
        report.background
    );
    Ok(())
}
