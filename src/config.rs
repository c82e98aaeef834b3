/*
 *  config.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Layered configuration: defaults, YAML file, command line
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::weather::WeatherUpdate;

pub const DEFAULT_WIDTH: u32 = 192;
pub const DEFAULT_HEIGHT: u32 = 192;
pub const DEFAULT_REPLY_DELAY_MS: u64 = 750;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level configuration for the face host
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub log_level: Option<String>, // "info" | "debug" | ...
    pub display: Option<DisplayConfig>,
    pub companion: Option<CompanionConfig>,
    /// print every rendered frame as text
    pub ascii: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub round: Option<bool>,
    /// panel drops to 1 bit per pixel in ambient mode
    pub low_bit_ambient: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CompanionConfig {
    pub reply_delay_ms: Option<u64>,
    /// canned weather pushed in reply to each request, cycled
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<WeatherUpdate>,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn display_size(&self) -> (u32, u32) {
        let d = self.display.as_ref();
        (
            d.and_then(|d| d.width).unwrap_or(DEFAULT_WIDTH),
            d.and_then(|d| d.height).unwrap_or(DEFAULT_HEIGHT),
        )
    }

    pub fn is_round(&self) -> bool {
        self.display.as_ref().and_then(|d| d.round).unwrap_or(false)
    }

    pub fn low_bit_ambient(&self) -> bool {
        self.display.as_ref().and_then(|d| d.low_bit_ambient).unwrap_or(false)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(
            self.companion
                .as_ref()
                .and_then(|c| c.reply_delay_ms)
                .unwrap_or(DEFAULT_REPLY_DELAY_MS),
        )
    }

    /// Configured samples, or a small built-in rotation
    pub fn samples(&self) -> Vec<WeatherUpdate> {
        match self.companion.as_ref() {
            Some(c) if !c.samples.is_empty() => c.samples.clone(),
            _ => default_samples(),
        }
    }

    pub fn ascii(&self) -> bool {
        self.ascii.unwrap_or(false)
    }
}

fn default_samples() -> Vec<WeatherUpdate> {
    [(800, "25°", "14°"), (501, "19°", "11°"), (211, "22°", "17°"), (601, "-2°", "-7°")]
        .into_iter()
        .map(|(id, high, low)| WeatherUpdate {
            weather_id: Some(id),
            high: Some(high.to_string()),
            low: Some(low.to_string()),
        })
        .collect()
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "sunshine-face", version, about = "Sunshine weather watch face")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long, action = ArgAction::Set)]
    pub round: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub low_bit_ambient: Option<bool>,
    #[arg(long)]
    pub reply_delay_ms: Option<u64>,
    /// print each rendered frame to stdout
    #[arg(long, action = ArgAction::SetTrue)]
    pub ascii: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    let cfg = load_from(&cli)?;

    if cli.dump_config {
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Layer defaults, YAML and the given CLI, then validate
pub fn load_from(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if !p.exists() {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
        merge(&mut cfg, read_yaml(p)?);
    } else if let Some(p) = find_config_file() {
        merge(&mut cfg, read_yaml(&p)?);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    if let Some(home) = home_dir() {
        let p = home.join(".config/sunshine/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/sunshine.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["sunshine.yaml", "config/sunshine.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() { dst.log_level = src.log_level; }
    if src.ascii.is_some()     { dst.ascii = src.ascii; }

    match (&mut dst.display, src.display) {
        (None, Some(s)) => dst.display = Some(s),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
    match (&mut dst.companion, src.companion) {
        (None, Some(s)) => dst.companion = Some(s),
        (Some(d), Some(s)) => merge_companion(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()           { dst.width = src.width; }
    if src.height.is_some()          { dst.height = src.height; }
    if src.round.is_some()           { dst.round = src.round; }
    if src.low_bit_ambient.is_some() { dst.low_bit_ambient = src.low_bit_ambient; }
}

fn merge_companion(dst: &mut CompanionConfig, src: CompanionConfig) {
    if src.reply_delay_ms.is_some() { dst.reply_delay_ms = src.reply_delay_ms; }
    if !src.samples.is_empty()      { dst.samples = src.samples; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }
    if cli.ascii               { cfg.ascii = Some(true); }

    let any_display = cli.display_width.is_some()
        || cli.display_height.is_some()
        || cli.round.is_some()
        || cli.low_bit_ambient.is_some();
    if any_display {
        let display = cfg.display.get_or_insert_with(DisplayConfig::default);
        if cli.display_width.is_some()   { display.width = cli.display_width; }
        if cli.display_height.is_some()  { display.height = cli.display_height; }
        if cli.round.is_some()           { display.round = cli.round; }
        if cli.low_bit_ambient.is_some() { display.low_bit_ambient = cli.low_bit_ambient; }
    }

    if cli.reply_delay_ms.is_some() {
        cfg.companion.get_or_insert_with(CompanionConfig::default).reply_delay_ms = cli.reply_delay_ms;
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let (w, h) = cfg.display_size();
    if w == 0 || h == 0 {
        return Err(ConfigError::Validation("display width/height must be > 0".into()));
    }
    if w > 4096 || h > 4096 {
        return Err(ConfigError::Validation("display width/height must be <= 4096".into()));
    }
    if let Some(level) = cfg.log_level.as_deref() {
        if level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Validation(format!("unknown log level: {level}")));
        }
    }
    if let Some(companion) = cfg.companion.as_ref() {
        if companion.samples.iter().any(WeatherUpdate::is_empty) {
            return Err(ConfigError::Validation("companion samples must set at least one field".into()));
        }
    }
    Ok(())
}
