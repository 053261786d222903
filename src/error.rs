// -*- indent-tabs-mode: nil; tab-width: 2; -*-
// vim: set ts=&2 sw=2 et ai :

//! Error kinds of the address provisioner.

use crate::thiserror;
use crate::ipnetwork;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The prefix is not a valid IPv6 CIDR.
  #[error("invalid IPv6 prefix {input:?}: {reason}")]
  Parse {
    input: String,
    reason: String,
  },

  /// A mutating run was started without root.
  #[error("adding addresses requires root privileges (--remove does too), or use --dry-run to test")]
  Privilege,

  /// The host range leaves the IPv6 address space.
  #[error("host offsets {start}..{end} from {network} leave the IPv6 address space")]
  Range {
    network: ipnetwork::Ipv6Network,
    start: i128,
    end: i128,
  },

  /// A command ran but exited unsuccessfully.
  #[error("command failed: {command} (status {status}): {stderr}")]
  CommandFailed {
    command: String,
    status: String,
    stderr: String,
  },

  /// A command could not be started.
  #[error("failed to run {command}: {source}")]
  Spawn {
    command: String,
    #[source]
    source: std::io::Error,
  },

  /// Writing the report failed.
  #[error("failed to write output: {0}")]
  Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
