use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "sketch_settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Recognition service endpoint receiving the canvas snapshots.
    pub endpoint: String,
    /// Quiet time after the last drawing activity before a snapshot is sent.
    pub quiescence_ms: u64,
    pub request_timeout_secs: u64,
    pub stroke_width: u32,
    pub debug_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: crate::sketch::service::DEFAULT_ENDPOINT.to_string(),
            quiescence_ms: 1600,
            request_timeout_secs: 30,
            stroke_width: 5,
            debug_logging: false,
        }
    }
}

pub fn settings_path_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(SETTINGS_FILE_NAME))
}

pub fn resolve_settings_path() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    settings_path_from_exe_path(&exe_path)
}

pub fn load() -> Result<Settings> {
    load_from_path(&resolve_settings_path()?)
}

pub fn save(settings: &Settings) -> Result<PathBuf> {
    let path = resolve_settings_path()?;
    save_to_path(&path, settings)?;
    Ok(path)
}

pub fn load_from_path(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read settings file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_json::from_str(&content)
        .with_context(|| format!("deserialize settings file {}", path.display()))
}

pub fn save_to_path(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create settings parent folder {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(settings).context("serialize settings")?;
    std::fs::write(path, json).with_context(|| format!("write settings file {}", path.display()))
}
