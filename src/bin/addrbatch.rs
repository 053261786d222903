// -*- indent-tabs-mode: nil; tab-width: 2; -*-
// vim: set ts=&2 sw=2 et ai :

//! addrbatch - add or remove a range of IPv6 addresses on an interface.

use std::path::PathBuf;

use addrbatch::anyhow;
use addrbatch::log;

use addrbatch::clap;
use clap::Parser;

use addrbatch::config;
use addrbatch::logging::{self, LogTarget};
use addrbatch::privilege;

use addrbatch::Network;
use addrbatch::Provisioner;
use addrbatch::SystemRunner;

const APP_NAME: &'static str = "addrbatch";


#[derive(Parser)]
#[clap(author, version, about = "Add IPv6 addresses to a network interface in bulk", long_about = None)]
struct Args {
  /// Network interface [default: eth0]
  #[clap(short = 'i', long)]
  interface: Option<String>,

  /// IPv6 prefix, e.g. 2001:470:8935:3:3::/64
  #[clap(short = 'p', long)]
  prefix: String,

  /// First host offset
  #[clap(short = 's', long, default_value_t = 1, allow_negative_numbers = true)]
  start: i64,

  /// Number of addresses to add
  #[clap(short = 'c', long, default_value_t = 100, allow_negative_numbers = true)]
  count: i64,

  /// Print the commands instead of running them
  #[clap(long)]
  dry_run: bool,

  /// Remove every address of the prefix instead of adding
  #[clap(long)]
  remove: bool,

  /// TOML configuration file
  #[clap(long, value_parser)]
  config: Option<PathBuf>,

  /// Log to syslog instead of stderr
  #[clap(long)]
  syslog: bool,
}

fn main() -> Result<(), anyhow::Error> {
  let args = Args::parse();

  let config = match &args.config {
    Some(path) => config::Config::from_path(path)
      .map_err(|e| anyhow::anyhow!("failed to load {}: {}", path.display(), e))?,
    None => config::Config::default(),
  };

  let target = if args.syslog { LogTarget::Syslog } else { LogTarget::Stderr };
  logging::init(APP_NAME, target, config.level_filter())?;

  privilege::check(args.dry_run, args.remove, privilege::is_root())?;

  let network = Network::parse(&args.prefix)?;
  let ifname = args.interface.clone().unwrap_or_else(|| config.interface.clone());
  log::debug!("interface {}, network {}", ifname, network);

  let mut provisioner = Provisioner::new(SystemRunner, &config);
  let stdout = std::io::stdout();
  let mut out = stdout.lock();

  if args.remove {
    provisioner.remove(&ifname, &network, &mut out)?;
  } else {
    provisioner.add(&ifname, &network, args.start, args.count, args.dry_run, &mut out)?;
  }

  Ok(())
}
