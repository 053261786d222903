// -*- indent-tabs-mode: nil; tab-width: 2; -*-
// vim: set ts=&2 sw=2 et ai :

//! Logger installation.

use crate::anyhow;
use crate::log;
use crate::log4rs;
use crate::syslog;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Where log records are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
  Stderr,
  Syslog,
}

const STDERR_PATTERN: &'static str = "{l}: {m}{n}";

/// Install the global logger. Can only succeed once per process.
pub fn init(app_name: &str, target: LogTarget, level: LevelFilter) -> Result<(), anyhow::Error> {
  match target {
    LogTarget::Syslog => {
      syslog::init(syslog::Facility::LOG_USER, level, Some(app_name)).map_err(|e| anyhow::anyhow!("{}", e))?;
    },
    LogTarget::Stderr => {
      let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(STDERR_PATTERN)))
        .build();
      let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
      log4rs::init_config(config)?;
    },
  }
  Ok(())
}
