use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::layout::ButtonLayout;
use crate::theme::{FrameFlags, FrameType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "frametheme";
const APP_CONFIG_FILE: &str = "config.json";

/// The window the preview frame is computed and drawn for, from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Button placement string, such as `menu:minimize,maximize,close`.
    pub button_layout: String,
    pub frame_type: FrameType,
    pub client_width: i32,
    pub client_height: i32,
    pub text_height: i32,
    pub focused: bool,
    pub maximized: bool,
    pub shaded: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            button_layout: "menu:minimize,maximize,close".to_string(),
            frame_type: FrameType::Normal,
            client_width: 640,
            client_height: 480,
            text_height: 14,
            focused: true,
            maximized: false,
            shaded: false,
        }
    }
}

impl EngineConfig {
    pub fn button_layout(&self) -> ButtonLayout {
        ButtonLayout::parse(&self.button_layout)
    }

    pub fn flags(&self) -> FrameFlags {
        let mut flags = FrameFlags::NORMAL_WINDOW;
        flags.set(FrameFlags::HAS_FOCUS, self.focused);
        flags.set(FrameFlags::MAXIMIZED, self.maximized);
        flags.set(FrameFlags::SHADED, self.shaded);
        flags
    }
}

pub fn load_engine_config() -> EngineConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_engine_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_engine_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> EngineConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return EngineConfig::default(),
    };
    if !path.exists() {
        return EngineConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            EngineConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            EngineConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn fixture_root() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "frametheme-config-{}-{nanos}",
            std::process::id()
        ))
    }

    fn with_temp_root<F: FnOnce(&Path)>(f: F) {
        let root = fixture_root();
        std::fs::create_dir_all(&root).expect("temp root should be created");
        f(&root);
        let _ = std::fs::remove_dir_all(&root);
    }

    fn write_config(root: &Path, contents: &str) {
        let dir = root.join(APP_DIR);
        std::fs::create_dir_all(&dir).expect("config dir should be created");
        std::fs::write(dir.join(APP_CONFIG_FILE), contents).expect("config should be written");
    }

    #[test]
    fn missing_config_file_gives_defaults() {
        with_temp_root(|root| {
            let config = load_engine_config_with(Some(root), None);
            assert_eq!(config, EngineConfig::default());
        });
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        with_temp_root(|root| {
            write_config(
                root,
                r#"{ "frame_type": "dialog", "client_width": 320, "maximized": true }"#,
            );
            let config = load_engine_config_with(Some(root), None);

            assert_eq!(config.frame_type, FrameType::Dialog);
            assert_eq!(config.client_width, 320);
            assert_eq!(config.client_height, 480);
            assert!(config.flags().contains(FrameFlags::MAXIMIZED | FrameFlags::HAS_FOCUS));
            assert!(!config.flags().contains(FrameFlags::SHADED));
        });
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        with_temp_root(|root| {
            write_config(root, "{ not json");
            let config = load_engine_config_with(Some(root), None);
            assert_eq!(config, EngineConfig::default());
        });
    }

    #[test]
    fn config_is_read_from_home_without_xdg() {
        with_temp_root(|root| {
            write_config(&root.join(".config"), r#"{ "shaded": true }"#);
            let config = load_engine_config_with(None, Some(root));
            assert!(config.shaded);
        });
    }

    #[test]
    fn default_button_layout_puts_close_on_the_right() {
        let layout = EngineConfig::default().button_layout();
        assert!(!layout.is_empty());
        assert_eq!(layout.left.len(), 1);
        assert_eq!(layout.right.len(), 3);
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "frametheme",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/frametheme/config.json"));
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path("frametheme", "config.json", None, Some(Path::new("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/frametheme/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("frametheme", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }
}
