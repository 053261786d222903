// -*- indent-tabs-mode: nil; tab-width: 4; -*-
// vim: set ts=4 sw=4 et ai :

pub use anyhow;
pub use log;
pub use log4rs;
pub use clap;
pub use syslog;
pub use serde;
pub use toml;
pub use nix;
pub use ipnetwork;
pub use thiserror;

pub mod error;
pub mod config;
pub mod logging;
pub mod network;
pub mod command;
pub mod iproute;
pub mod privilege;
pub mod provision;

pub use error::Error;
pub use network::Network;
pub use command::{CommandRunner, SystemRunner, IpCommand, CommandOutput};
pub use provision::{
    Provisioner,
    AddOutcome,
    AddReport,
    RemoveOutcome,
    RemoveReport,
    Notice,
    notices,
};
