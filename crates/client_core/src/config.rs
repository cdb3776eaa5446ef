use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

use crate::events::WindowLayout;

pub const DEFAULT_CONFIG_FILE: &str = "xcoder.toml";
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:4517";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub backend_url: String,
    pub log_filter: String,
    /// Unset means backend calls may wait forever.
    pub request_timeout_secs: Option<u64>,
    pub landing_window: WindowSize,
    pub workspace_window: WindowSize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            log_filter: "info".into(),
            request_timeout_secs: None,
            landing_window: WindowSize {
                width: 600,
                height: 450,
            },
            workspace_window: WindowSize {
                width: 1080,
                height: 720,
            },
        }
    }
}

impl ClientSettings {
    pub fn window_size(&self, layout: WindowLayout) -> WindowSize {
        match layout {
            WindowLayout::Landing => self.landing_window,
            WindowLayout::Workspace => self.workspace_window,
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    backend_url: Option<String>,
    log_filter: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the config file, then environment overrides.
///
/// An explicitly given `path` must exist; the default `xcoder.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => {
            let file_cfg = toml::from_str::<FileSettings>(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            apply_file_settings(&mut settings, file_cfg);
        }
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file_settings(settings: &mut ClientSettings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.backend_url {
        settings.backend_url = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if file_cfg.request_timeout_secs.is_some() {
        settings.request_timeout_secs = file_cfg.request_timeout_secs;
    }
}

fn apply_env_overrides(
    settings: &mut ClientSettings,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = var("XCODER_BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = var("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    if let Some(v) = var("XCODER_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        let parsed = v
            .parse::<u64>()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECS is not a number: '{v}'"))?;
        settings.request_timeout_secs = Some(parsed);
    }

    Ok(())
}

/// Resolves the backend base URL, defaulting the scheme to `http` and
/// ending the path with `/` so relative joins stay under it.
pub fn normalize_backend_url(raw_backend_url: &str) -> anyhow::Result<Url> {
    let raw_backend_url = raw_backend_url.trim();
    let raw_backend_url = if raw_backend_url.is_empty() {
        DEFAULT_BACKEND_URL
    } else {
        raw_backend_url
    };

    let with_scheme = if raw_backend_url.contains("://") {
        raw_backend_url.to_string()
    } else {
        format!("http://{raw_backend_url}")
    };

    let mut url = Url::parse(&with_scheme)
        .with_context(|| format!("invalid backend url '{raw_backend_url}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("unsupported backend url scheme '{}'", url.scheme());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
