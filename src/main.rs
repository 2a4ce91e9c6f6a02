use anyhow::{Context, Result};

fn main() -> Result<()> {
    frametheme::logging::init();
    tracing::info!("starting frametheme");

    let config = frametheme::config::load_engine_config();
    let preview =
        frametheme::render_preview(&config).context("failed to render the preview frame")?;

    let geometry = serde_json::to_string_pretty(&preview.geometry)
        .context("failed to serialize frame geometry")?;
    println!("{geometry}");

    tracing::info!(
        frame_type = config.frame_type.as_str(),
        draw_calls = preview.calls.len(),
        "rendered preview frame"
    );
    Ok(())
}
