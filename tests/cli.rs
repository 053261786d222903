// -*- indent-tabs-mode: nil; tab-width: 2; -*-
// vim: set ts=&2 sw=2 et ai :

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use addrbatch::privilege;
use tempfile::TempDir;

/// A directory holding a stand-in `ip` script and a config pointing at it.
/// The script appends its arguments to `calls.log` and prints nothing.
struct Fixture {
  dir: TempDir,
}

impl Fixture {
  fn new() -> Self {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("ip");
    let calls = dir.path().join("calls.log");
    fs::write(&script, format!("#!/bin/sh\necho \"$@\" >> '{}'\nexit 0\n", calls.display())).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    fs::write(
      dir.path().join("addrbatch.toml"),
      format!("log_level = \"Off\"\nip_command = \"{}\"\n", script.display()),
    ).unwrap();
    Fixture { dir }
  }

  fn path(&self, name: &str) -> PathBuf {
    self.dir.path().join(name)
  }

  fn run(&self, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_addrbatch"))
      .arg("--config")
      .arg(self.path("addrbatch.toml"))
      .args(args)
      .output()
      .unwrap()
  }

  fn calls(&self) -> Vec<String> {
    read_lines(&self.path("calls.log"))
  }
}

fn read_lines(path: &Path) -> Vec<String> {
  match fs::read_to_string(path) {
    Ok(s) => s.lines().map(str::to_string).collect(),
    Err(_) => Vec::new(),
  }
}

#[test]
fn dry_run_prints_three_commands() {
  let fixture = Fixture::new();

  let output = fixture.run(&["-i", "eth0", "--prefix", "2001:db8::/64", "--start", "1", "--count", "3", "--dry-run"]);

  assert_eq!(output.status.code(), Some(0));
  let ip = fixture.path("ip");
  let expected = format!("\
[dry-run] {ip} -6 addr add 2001:db8::1/64 dev eth0
[dry-run] {ip} -6 addr add 2001:db8::2/64 dev eth0
[dry-run] {ip} -6 addr add 2001:db8::3/64 dev eth0
done: 3 address(es) newly added
", ip = ip.display());
  assert_eq!(String::from_utf8(output.stdout).unwrap(), expected);
  assert_eq!(fixture.calls(), ["-6 addr show dev eth0 scope global"]);
}

#[test]
fn malformed_prefix_fails_before_running_ip() {
  let fixture = Fixture::new();

  let output = fixture.run(&["--prefix", "2001:db8:::1/64", "--dry-run"]);

  assert!(!output.status.success());
  assert!(String::from_utf8(output.stderr).unwrap().contains("invalid IPv6 prefix"));
  assert!(fixture.calls().is_empty());
}

#[test]
fn unprivileged_add_exits_with_status_1() {
  if privilege::is_root() {
    return;
  }
  let fixture = Fixture::new();

  let output = fixture.run(&["--prefix", "2001:db8::/64", "--count", "3"]);

  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8(output.stderr).unwrap().contains("requires root privileges"));
  assert!(fixture.calls().is_empty());
}

#[test]
fn unprivileged_remove_is_not_refused() {
  let fixture = Fixture::new();

  let output = fixture.run(&["-i", "eth1", "--prefix", "2001:db8::/64", "--remove"]);

  assert_eq!(output.status.code(), Some(0));
  assert_eq!(String::from_utf8(output.stdout).unwrap(), "done: 0 address(es) removed\n");
  assert_eq!(fixture.calls(), ["-6 addr show dev eth1 scope global"]);
}
