pub mod color;
pub mod config;
pub mod draw;
pub mod error;
pub mod expr;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod style;
pub mod theme;
pub use error::{EngineError, EngineResult};

use color::Palette;
use config::EngineConfig;
use draw::{DrawCall, RecordingBackend, TitleLayout};
use layout::FrameGeometry;
use style::FrameRender;
use theme::{FrameRequest, Theme};

/// Geometry and recorded draw calls of one rendered frame.
#[derive(Debug, Clone)]
pub struct Preview {
    pub geometry: FrameGeometry,
    pub calls: Vec<DrawCall>,
}

/// Validates the built-in theme and renders the configured window with it.
pub fn render_preview(config: &EngineConfig) -> EngineResult<Preview> {
    let theme = Theme::fallback()?;
    theme.validate()?;
    tracing::debug!(theme = %theme.name, version = theme.format_version, "theme validated");

    let button_layout = config.button_layout();
    let request = FrameRequest {
        flags: config.flags(),
        client_width: config.client_width,
        client_height: config.client_height,
        text_height: config.text_height,
        button_layout: &button_layout,
    };
    let title_text = theme.readable_name.as_deref().unwrap_or(&theme.name);
    let title = TitleLayout::monospace(title_text, config.text_height / 2, config.text_height);
    let render = FrameRender {
        title: Some(&title),
        ..FrameRender::default()
    };

    let mut backend = RecordingBackend::new();
    let geometry = theme.draw_frame(
        config.frame_type,
        &request,
        &render,
        &Palette::default(),
        &mut backend,
    )?;

    Ok(Preview {
        geometry,
        calls: backend.into_calls(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use theme::FrameType;

    #[test]
    fn default_config_renders_a_titled_frame() {
        let preview = render_preview(&EngineConfig::default()).expect("preview should render");
        assert_eq!(preview.geometry.width, 644);
        assert!(preview.geometry.title_rect.width > 0);
        assert!(preview
            .calls
            .iter()
            .any(|call| matches!(call, DrawCall::Title { text, .. } if text == "Fallback")));
    }

    #[test]
    fn shaded_border_windows_have_no_client_area() {
        let config = EngineConfig {
            frame_type: FrameType::Border,
            shaded: true,
            ..EngineConfig::default()
        };
        let preview = render_preview(&config).expect("preview should render");
        assert_eq!(preview.geometry.height, 1);
        assert!(!preview
            .calls
            .iter()
            .any(|call| matches!(call, DrawCall::Title { .. })));
    }
}
