//! Settings persistence and gateway construction

use anyhow::{Context, Result};
use providers::{AiGateway, GeminiClient};
use shared::settings::AppSettings;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn config_path() -> Option<PathBuf> {
    let proj = directories::ProjectDirs::from("com.local", "InnoAgent", "InnoAgent")?;
    let _ = fs::create_dir_all(proj.config_dir());
    Some(proj.config_dir().join("settings.json"))
}

/// Load settings from `path`. Returns the settings and whether this is a
/// fresh install (no usable file).
pub fn load_settings_from(path: &Path) -> (AppSettings, bool) {
    let Ok(bytes) = fs::read(path) else {
        return (AppSettings::default(), true);
    };
    match serde_json::from_slice::<AppSettings>(&bytes) {
        Ok(settings) => (settings, false),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            (AppSettings::default(), true)
        }
    }
}

pub fn load_settings_or_default() -> (AppSettings, bool) {
    match config_path() {
        Some(path) => load_settings_from(&path),
        None => (AppSettings::default(), true),
    }
}

pub fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(settings)?;
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

pub fn save_settings(settings: &AppSettings) -> Result<()> {
    let path = config_path().context("no configuration directory available")?;
    save_settings_to(&path, settings)
}

/// Build the Gemini-backed gateway for `settings`
pub fn build_gateway(settings: &AppSettings) -> Result<Arc<AiGateway>> {
    let client = GeminiClient::from_settings(&settings.oracle)
        .context("failed to build the Gemini client")?;
    if !client.has_credential() {
        tracing::warn!("no Gemini API key configured; requests will fail until one is set");
    }
    let gateway = AiGateway::new(Arc::new(client)).with_persona(settings.persona_name.clone());
    Ok(Arc::new(gateway))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_fresh_install() {
        let dir = TempDir::new().unwrap();
        let (settings, fresh) = load_settings_from(&dir.path().join("settings.json"));
        assert!(fresh);
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = AppSettings::default();
        settings.oracle.model = "gemini-2.5-pro".into();
        settings.oracle.auth.api_key = Some("k-123".into());
        settings.persona_name = "The Ancient One".into();
        save_settings_to(&path, &settings).unwrap();

        let (loaded, fresh) = load_settings_from(&path);
        assert!(!fresh);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, b"{ not json").unwrap();

        let (settings, fresh) = load_settings_from(&path);
        assert!(fresh);
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_build_gateway_uses_configured_model() {
        let mut settings = AppSettings::default();
        settings.oracle.model = "gemini-2.5-flash".into();
        let gateway = build_gateway(&settings).unwrap();
        assert_eq!(gateway.model(), "gemini-2.5-flash");
    }
}
