//! Load and save [`PlotterConfig`] files.
//!
//! The format follows the file extension: `.json`, or `.yaml` / `.yml`.

use std::path::Path;

use crate::config::PlotterConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Yaml,
}

fn format_of(path: &Path) -> Result<ConfigFormat> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => Ok(ConfigFormat::Json),
        Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
        _ => Err(Error::UnsupportedConfigFormat(path.to_path_buf())),
    }
}

/// Parse a configuration from text in the given format. Missing fields take defaults.
pub fn parse_config(text: &str, path: &Path) -> Result<PlotterConfig> {
    match format_of(path)? {
        ConfigFormat::Json => Ok(serde_json::from_str(text)?),
        ConfigFormat::Yaml => Ok(serde_yaml::from_str(text)?),
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlotterConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let cfg = parse_config(&text, path)?;
    tracing::info!(path = %path.display(), "loaded configuration");
    Ok(cfg)
}

pub fn save_config<P: AsRef<Path>>(path: P, cfg: &PlotterConfig) -> Result<()> {
    let path = path.as_ref();
    let text = match format_of(path)? {
        ConfigFormat::Json => serde_json::to_string_pretty(cfg)?,
        ConfigFormat::Yaml => serde_yaml::to_string(cfg)?,
    };
    std::fs::write(path, text)?;
    Ok(())
}
