// -*- indent-tabs-mode: nil; tab-width: 2; -*-
// vim: set ts=&2 sw=2 et ai :

//! Bulk addition and removal of addresses on an interface.

use std::collections::BTreeSet;
use std::io::Write;
use std::net::Ipv6Addr;

use crate::log;
use crate::command::CommandRunner;
use crate::config::Config;
use crate::error::Result;
use crate::iproute::IpRoute;
use crate::network::{Network, RECOMMENDED_PREFIX_LEN};

/// What happened to one candidate address during an add run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddOutcome {
  /// The address was assigned.
  Added,
  /// The address was already on the interface.
  Skipped,
  /// `ip` failed; see the log.
  Failed,
  /// Dry-run: the command was printed, not run.
  WouldAdd,
}

/// What happened to one matching address during a remove run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoveOutcome {
  Removed,
  Failed,
}

/// Per-outcome totals of an add run. Only failed addresses are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
  pub added: usize,
  pub skipped: usize,
  pub would_add: usize,
  pub failed: Vec<Ipv6Addr>,
}

impl AddReport {
  pub fn record(&mut self, addr: Ipv6Addr, outcome: AddOutcome) {
    match outcome {
      AddOutcome::Added => self.added += 1,
      AddOutcome::Skipped => self.skipped += 1,
      AddOutcome::WouldAdd => self.would_add += 1,
      AddOutcome::Failed => self.failed.push(addr),
    }
  }

  pub fn count(&self, outcome: AddOutcome) -> usize {
    match outcome {
      AddOutcome::Added => self.added,
      AddOutcome::Skipped => self.skipped,
      AddOutcome::WouldAdd => self.would_add,
      AddOutcome::Failed => self.failed.len(),
    }
  }

  /// Number reported as newly added. A dry-run counts its would-be additions.
  pub fn added_count(&self) -> usize {
    self.added + self.would_add
  }
}

/// A message about the prefix or range, logged before an add run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub level: log::Level,
  pub message: String,
}

/// Warnings and notices for adding `start..start + count` from `network`.
pub fn notices(network: &Network, start: i64, count: i64) -> Vec<Notice> {
  let mut notices = Vec::new();
  if network.prefix_len() != RECOMMENDED_PREFIX_LEN {
    notices.push(Notice {
      level: log::Level::Warn,
      message: format!("prefix is /{}, not the recommended /{}", network.prefix_len(), RECOMMENDED_PREFIX_LEN),
    });
  }
  if network.was_normalized() {
    notices.push(Notice {
      level: log::Level::Info,
      message: format!("prefix had host bits set and was normalized to {}", network),
    });
  }
  if !network.covers(start, count) {
    notices.push(Notice {
      level: log::Level::Warn,
      message: format!("offsets {}..{} reach past {}", start, start as i128 + count as i128, network),
    });
  }
  notices
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveReport {
  pub entries: Vec<(Ipv6Addr, RemoveOutcome)>,
}

impl RemoveReport {
  pub fn removed_count(&self) -> usize {
    self.entries.iter().filter(|(_, o)| *o == RemoveOutcome::Removed).count()
  }

  pub fn failed_count(&self) -> usize {
    self.entries.len() - self.removed_count()
  }
}

/// Adds and removes addresses one `ip` invocation at a time.
pub struct Provisioner<R: CommandRunner> {
  runner: R,
  ip_command: String,
  assign_prefix_len: u8,
}

impl<R: CommandRunner> Provisioner<R> {
  pub fn new(runner: R, config: &Config) -> Self {
    Provisioner {
      runner,
      ip_command: config.ip_command.clone(),
      assign_prefix_len: config.assign_prefix_len,
    }
  }

  pub fn runner(&self) -> &R {
    &self.runner
  }

  pub fn into_runner(self) -> R {
    self.runner
  }

  fn iproute(&self, ifname: &str) -> IpRoute {
    IpRoute::new(&self.ip_command, ifname, self.assign_prefix_len)
  }

  /// Add `network + start .. network + start + count` to `ifname`.
  ///
  /// Addresses already present are skipped. A failed address does not stop
  /// the run. Dry-run commands and the summary are written to `out`.
  pub fn add(&mut self, ifname: &str, network: &Network, start: i64, count: i64, dry_run: bool, out: &mut dyn Write) -> Result<AddReport> {
    let hosts = network.hosts(start, count)?;

    for notice in notices(network, start, count) {
      log::log!(notice.level, "{}", notice.message);
    }

    let iproute = self.iproute(ifname);
    let existing: BTreeSet<Ipv6Addr> = iproute.existing_addresses(&mut self.runner)
      .iter()
      .filter_map(|addr| addr.parse().ok())
      .collect();

    log::info!("adding addresses to {} from {}", ifname, network);
    let mut report = AddReport::default();
    for addr in hosts {
      let outcome = if existing.contains(&addr) {
        log::info!("{} already exists, skipping", addr);
        AddOutcome::Skipped
      } else {
        let command = iproute.add(addr);
        if dry_run {
          writeln!(out, "[dry-run] {}", command)?;
          AddOutcome::WouldAdd
        } else {
          log::info!("adding {}", addr);
          match self.runner.run_checked(&command) {
            Ok(_) => AddOutcome::Added,
            Err(e) => {
              log::warn!("failed to add {}: {}", addr, e);
              AddOutcome::Failed
            }
          }
        }
      };
      report.record(addr, outcome);
    }

    writeln!(out, "done: {} address(es) newly added", report.added_count())?;
    Ok(report)
  }

  /// Remove every global address of `ifname` that lies inside `network`.
  pub fn remove(&mut self, ifname: &str, network: &Network, out: &mut dyn Write) -> Result<RemoveReport> {
    let iproute = self.iproute(ifname);
    let existing = iproute.existing_addresses(&mut self.runner);

    log::info!("removing addresses in {} from {}", network, ifname);
    let mut report = RemoveReport::default();
    for addr_str in &existing {
      let addr: Ipv6Addr = match addr_str.parse() {
        Ok(addr) => addr,
        Err(_) => continue,
      };
      if !network.contains(addr) {
        continue;
      }

      log::info!("removing {}", addr_str);
      let outcome = match self.runner.run_checked(&iproute.del(addr_str)) {
        Ok(_) => RemoveOutcome::Removed,
        Err(e) => {
          log::warn!("failed to remove {}: {}", addr_str, e);
          RemoveOutcome::Failed
        }
      };
      report.entries.push((addr, outcome));
    }

    writeln!(out, "done: {} address(es) removed", report.removed_count())?;
    Ok(report)
  }
}
