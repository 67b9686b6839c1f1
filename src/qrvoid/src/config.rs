//! Optional defaults from `~/.qrvoid.toml`, merged with command-line flags.

use crate::cli::OutputArgs;
use anyhow::{Context, Result};
use qrvoid::render::{BLACK, WHITE};
use qrvoid::{parse_color, Anchor, ErrorCorrection, LogoPlacement, RenderOptions};
use serde::Deserialize;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = ".qrvoid.toml";

/// Default logo size in percent; small enough for level H to recover.
const DEFAULT_LOGO_SIZE: u32 = 15;

// Same bounds the command-line flags enforce.
const BOX_SIZE_RANGE: RangeInclusive<u32> = 1..=100;
const BORDER_RANGE: RangeInclusive<u32> = 0..=40;
const PERCENT_RANGE: RangeInclusive<u32> = 0..=100;

/// Contents of the config file. Every field is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub ec_level: Option<ErrorCorrection>,
    pub box_size: Option<u32>,
    pub border: Option<u32>,
    pub rounded: Option<bool>,
    pub logo_size: Option<u32>,
    pub logo_opacity: Option<u32>,
    pub logo_position: Option<Anchor>,
}

/// Errors that can occur when loading the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config file: {0}")]
    Validation(String),
}

/// Final settings after applying flags over the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub render: RenderOptions,
    pub logo: LogoPlacement,
}

/// Returns the path to the config file, `~/.qrvoid.toml`.
fn get_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Loads the config file from the home directory.
///
/// Returns `Ok(None)` if there is no home directory or no config file.
pub fn load_config() -> Result<Option<FileConfig>, ConfigError> {
    match get_config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(None),
    }
}

/// Loads a config file from `path`. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&contents)?;
    validate_config(&config)?;
    Ok(Some(config))
}

/// Rejects numeric values outside the ranges the matching flags accept.
fn validate_config(config: &FileConfig) -> Result<(), ConfigError> {
    let checks = [
        ("box_size", config.box_size, &BOX_SIZE_RANGE),
        ("border", config.border, &BORDER_RANGE),
        ("logo_size", config.logo_size, &PERCENT_RANGE),
        ("logo_opacity", config.logo_opacity, &PERCENT_RANGE),
    ];
    for (name, value, range) in checks {
        if let Some(value) = value.filter(|v| !range.contains(v)) {
            return Err(ConfigError::Validation(format!(
                "{name} = {value} is outside {}..={}",
                range.start(),
                range.end()
            )));
        }
    }
    Ok(())
}

/// Merges command-line flags with config file values.
///
/// Flags win over the file. `--square` can only turn rounding off; there is no
/// flag to force it back on over a `rounded = false` file.
pub fn merge_config(args: &OutputArgs, file: FileConfig) -> Result<Settings> {
    let foreground = match args.fg.as_deref().or(file.foreground.as_deref()) {
        Some(value) => parse_color(value).context("Invalid foreground color")?,
        None => BLACK,
    };
    let background = match args.bg.as_deref().or(file.background.as_deref()) {
        Some(value) => parse_color(value).context("Invalid background color")?,
        None => WHITE,
    };

    let defaults = RenderOptions::default();
    let render = RenderOptions {
        ec_level: args.ec.or(file.ec_level).unwrap_or(defaults.ec_level),
        box_size: args.box_size.or(file.box_size).unwrap_or(defaults.box_size).max(1),
        border: args.border.or(file.border).unwrap_or(defaults.border),
        foreground,
        background,
        rounded: !args.square && file.rounded.unwrap_or(defaults.rounded),
    };

    let logo = LogoPlacement {
        size_percent: args.logo_size.or(file.logo_size).unwrap_or(DEFAULT_LOGO_SIZE).min(100),
        opacity_percent: args.logo_opacity.or(file.logo_opacity).unwrap_or(100).min(100),
        anchor: args.logo_position.or(file.logo_position).unwrap_or_default(),
        border_width: render.border_width_px(),
    };

    Ok(Settings { render, logo })
}
