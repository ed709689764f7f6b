//! Runtime configuration for the demo binary.
use crate::SidewalkParams;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw binary depth input: path plus the sensor resolution of the buffer.
#[derive(Clone, Deserialize)]
pub struct DepthInputConfig {
    pub path: PathBuf,
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Pretty JSON report destination.
    pub json_out: Option<PathBuf>,
    /// Fused mask destination (grayscale PNG).
    pub mask_out: Option<PathBuf>,
}

#[derive(Clone, Deserialize)]
pub struct RuntimeConfig {
    pub mask_path: PathBuf,
    pub depth: DepthInputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub params: SidewalkParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

/// Parse the demo CLI: a single positional JSON config path.
pub fn parse_cli(program: &str) -> Result<RuntimeConfig, String> {
    let mut args = env::args().skip(1);
    let config_path = match args.next() {
        Some(arg) if arg != "--help" && arg != "-h" => PathBuf::from(arg),
        _ => return Err(format!("Usage: {program} <config.json>")),
    };
    if let Some(extra) = args.next() {
        return Err(format!("Unexpected argument '{extra}'\nUsage: {program} <config.json>"));
    }
    load_config(&config_path)
}
