// -*- indent-tabs-mode: nil; tab-width: 2; -*-
// vim: set ts=&2 sw=2 et ai :

//! Configuration for addrbatch.

use std::path::Path;

use crate::serde;
use crate::toml;
use crate::anyhow;

use serde::Deserialize;
use crate::log;
use log::LevelFilter;

pub const DEFAULT_INTERFACE: &'static str = "eth0";
pub const DEFAULT_IP_COMMAND: &'static str = "ip";
pub const DEFAULT_ASSIGN_PREFIX_LEN: u8 = 64;

/// Configuration for addrbatch. Every key is optional.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub log_level: LogLevel,

  /// Interface used when none is given on the command line.
  pub interface: String,

  /// Name or path of the iproute2 `ip` binary.
  pub ip_command: String,

  /// Prefix length attached to every address that is added or deleted.
  pub assign_prefix_len: u8,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      log_level: LogLevel::default(),
      interface: DEFAULT_INTERFACE.to_string(),
      ip_command: DEFAULT_IP_COMMAND.to_string(),
      assign_prefix_len: DEFAULT_ASSIGN_PREFIX_LEN,
    }
  }
}

impl Config {
  /// read the configuration from a file.
  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
    let config_str = std::fs::read_to_string(path)?;
    Self::from_toml(&config_str)
  }

  pub fn from_toml(config_str: &str) -> Result<Self, anyhow::Error> {
    let config: Config = toml::from_str(config_str)?;
    if config.assign_prefix_len > 128 {
      anyhow::bail!("assign_prefix_len must be at most 128, got {}", config.assign_prefix_len);
    }
    Ok(config)
  }

  /// Get the log level as a `LevelFilter`.
  pub fn level_filter(&self) -> LevelFilter {
    self.log_level.into()
  }
}

/// Log level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Debug)]
pub enum LogLevel {
  Off,
  Error,
  Warn,
  Info,
  Debug,
  Trace,
}

impl Default for LogLevel {
  fn default() -> Self {
    LogLevel::Info
  }
}

impl From<LogLevel> for LevelFilter {
  fn from(value: LogLevel) -> Self {
    match value {
      LogLevel::Off => LevelFilter::Off,
      LogLevel::Error => LevelFilter::Error,
      LogLevel::Warn => LevelFilter::Warn,
      LogLevel::Info => LevelFilter::Info,
      LogLevel::Debug => LevelFilter::Debug,
      LogLevel::Trace => LevelFilter::Trace,
    }
  }
}
