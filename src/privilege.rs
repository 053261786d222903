// -*- indent-tabs-mode: nil; tab-width: 2; -*-
// vim: set ts=&2 sw=2 et ai :

//! Root privilege check for mutating runs.

use crate::nix;
use crate::error::{Error, Result};

/// true if the effective user is root.
pub fn is_root() -> bool {
  nix::unistd::geteuid().is_root()
}

/// Only a real add run is checked. Dry-run and remove are let through,
/// although remove does change the interface.
pub fn requires_root(dry_run: bool, remove: bool) -> bool {
  !dry_run && !remove
}

/// Fail with `Error::Privilege` if the run needs root and `is_root` is false.
pub fn check(dry_run: bool, remove: bool, is_root: bool) -> Result<()> {
  if requires_root(dry_run, remove) && !is_root {
    return Err(Error::Privilege);
  }
  Ok(())
}
