// -*- indent-tabs-mode: nil; tab-width: 2; -*-
// vim: set ts=&2 sw=2 et ai :

//! iproute2 (`ip`) invocations for IPv6 addresses.

use std::collections::BTreeSet;
use std::net::Ipv6Addr;

use crate::log;
use crate::command::{CommandRunner, IpCommand};

/// Builds `ip -6 addr ...` commands for one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRoute {
  ip_command: String,
  ifname: String,
  assign_prefix_len: u8,
}

impl IpRoute {
  pub fn new(ip_command: &str, ifname: &str, assign_prefix_len: u8) -> Self {
    IpRoute {
      ip_command: ip_command.to_string(),
      ifname: ifname.to_string(),
      assign_prefix_len,
    }
  }

  fn addr_command(&self, verb: &str) -> IpCommand {
    IpCommand::new(self.ip_command.as_str()).args(["-6", "addr", verb])
  }

  /// `ip -6 addr show dev <ifname> scope global`
  pub fn show_global(&self) -> IpCommand {
    self.addr_command("show").args(["dev", self.ifname.as_str(), "scope", "global"])
  }

  /// `ip -6 addr add <addr>/<len> dev <ifname>`
  pub fn add(&self, addr: Ipv6Addr) -> IpCommand {
    self.addr_command("add")
      .arg(format!("{}/{}", addr, self.assign_prefix_len))
      .args(["dev", self.ifname.as_str()])
  }

  /// `ip -6 addr del <addr>/<len> dev <ifname>`
  pub fn del(&self, addr: &str) -> IpCommand {
    self.addr_command("del")
      .arg(format!("{}/{}", addr, self.assign_prefix_len))
      .args(["dev", self.ifname.as_str()])
  }

  /// Global IPv6 addresses currently on the interface.
  ///
  /// Any failure gives an empty set; `ip` has already said what went wrong.
  pub fn existing_addresses<R: CommandRunner>(&self, runner: &mut R) -> BTreeSet<String> {
    let command = self.show_global();
    match runner.run_checked(&command) {
      Ok(output) => parse_addresses(&output.stdout),
      Err(e) => {
        log::debug!("no existing addresses read from {}: {}", self.ifname, e);
        BTreeSet::new()
      }
    }
  }
}

/// Extract addresses from `ip -6 addr show` output.
///
/// Every line mentioning `inet6` contributes its second field, without the
/// `/prefixlen` suffix.
pub fn parse_addresses(output: &str) -> BTreeSet<String> {
  output
    .lines()
    .filter(|line| line.contains("inet6"))
    .filter_map(|line| line.split_whitespace().nth(1))
    .map(|field| field.split('/').next().unwrap_or(field).to_string())
    .collect()
}
