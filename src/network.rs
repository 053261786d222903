// -*- indent-tabs-mode: nil; tab-width: 2; -*-
// vim: set ts=&2 sw=2 et ai :

//! IPv6 prefixes and host enumeration.

use std::net::Ipv6Addr;
use std::str::FromStr;

use crate::ipnetwork::Ipv6Network;
use crate::error::{Error, Result};

/// Prefix length the tool is designed around.
pub const RECOMMENDED_PREFIX_LEN: u8 = 64;

/// A normalized IPv6 network. Host bits of the address are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
  inner: Ipv6Network,

  /// Address as it was written by the user, before host bits were cleared.
  given: Ipv6Addr,
}

impl Network {
  /// Parse a prefix like `2001:db8::/64`. Host bits are cleared, not rejected.
  /// A bare address is taken as a /128.
  pub fn parse(input: &str) -> Result<Self> {
    let input = input.trim();
    let parsed = Ipv6Network::from_str(input).map_err(|e| Error::Parse {
      input: input.to_string(),
      reason: e.to_string(),
    })?;

    let inner = Ipv6Network::new(parsed.network(), parsed.prefix()).map_err(|e| Error::Parse {
      input: input.to_string(),
      reason: e.to_string(),
    })?;

    Ok(Network { inner, given: parsed.ip() })
  }

  /// Network address.
  pub fn addr(&self) -> Ipv6Addr {
    self.inner.ip()
  }

  pub fn prefix_len(&self) -> u8 {
    self.inner.prefix()
  }

  /// true if the user-supplied address had host bits set.
  pub fn was_normalized(&self) -> bool {
    self.given != self.addr()
  }

  pub fn contains(&self, addr: Ipv6Addr) -> bool {
    self.inner.contains(addr)
  }

  /// Network address plus `offset`, or `None` outside the IPv6 address space.
  pub fn host(&self, offset: i128) -> Option<Ipv6Addr> {
    u128::from(self.addr()).checked_add_signed(offset).map(Ipv6Addr::from)
  }

  /// Addresses for offsets `start..start + count`.
  ///
  /// The range is checked as a whole, so either every address is produced
  /// or none is.
  pub fn hosts(&self, start: i64, count: i64) -> Result<Hosts> {
    let start = start as i128;
    let end = start + (count.max(0) as i128);
    if end > start && (self.host(start).is_none() || self.host(end - 1).is_none()) {
      return Err(Error::Range { network: self.inner, start, end });
    }

    Ok(Hosts { base: u128::from(self.addr()), next: start, end })
  }

  /// true if every address of the range lies inside this network.
  pub fn covers(&self, start: i64, count: i64) -> bool {
    if count <= 0 {
      return true;
    }
    let start = start as i128;
    let last = start + count as i128 - 1;
    match (self.host(start), self.host(last)) {
      (Some(first), Some(last)) => self.contains(first) && self.contains(last),
      _ => false,
    }
  }
}

impl std::fmt::Display for Network {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}/{}", self.addr(), self.prefix_len())
  }
}

/// Iterator over a validated host range.
#[derive(Debug, Clone)]
pub struct Hosts {
  base: u128,
  next: i128,
  end: i128,
}

impl Iterator for Hosts {
  type Item = Ipv6Addr;

  fn next(&mut self) -> Option<Self::Item> {
    if self.next >= self.end {
      return None;
    }
    let addr = self.base.checked_add_signed(self.next)?;
    self.next += 1;
    Some(Ipv6Addr::from(addr))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = (self.end - self.next).max(0) as usize;
    (len, Some(len))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn host_bits_are_cleared() {
    let network = Network::parse("2001:db8::5/64").unwrap();
    assert_eq!(network.addr(), "2001:db8::".parse::<Ipv6Addr>().unwrap());
    assert_eq!(network.prefix_len(), 64);
    assert!(network.was_normalized());
    assert_eq!(network.to_string(), "2001:db8::/64");
  }

  #[test]
  fn clean_prefix_is_not_reported_as_normalized() {
    let network = Network::parse("2001:470:8935:3:3::/80").unwrap();
    assert!(!network.was_normalized());
    assert_eq!(network.prefix_len(), 80);
  }

  #[test]
  fn bare_address_is_a_host_route() {
    let network = Network::parse("2001:db8::1").unwrap();
    assert_eq!(network.prefix_len(), 128);
  }

  #[test]
  fn invalid_prefixes_are_rejected() {
    for input in ["", "not-an-address", "2001:db8::/129", "10.0.0.0/8", "2001:db8:::1/64"] {
      assert!(matches!(Network::parse(input), Err(Error::Parse { .. })), "{input}");
    }
  }

  #[test]
  fn hosts_are_offsets_from_the_network_address() {
    let network = Network::parse("2001:db8::/64").unwrap();
    let hosts: Vec<String> = network.hosts(1, 3).unwrap().map(|a| a.to_string()).collect();
    assert_eq!(hosts, ["2001:db8::1", "2001:db8::2", "2001:db8::3"]);

    let hosts: Vec<String> = network.hosts(0xffff, 2).unwrap().map(|a| a.to_string()).collect();
    assert_eq!(hosts, ["2001:db8::ffff", "2001:db8::1:0"]);
  }

  #[test]
  fn empty_and_negative_counts_yield_nothing() {
    let network = Network::parse("2001:db8::/64").unwrap();
    assert_eq!(network.hosts(1, 0).unwrap().count(), 0);
    assert_eq!(network.hosts(1, -5).unwrap().count(), 0);
  }

  #[test]
  fn range_past_the_address_space_is_rejected() {
    let network = Network::parse("ffff:ffff:ffff:ffff::/64").unwrap();
    assert!(network.hosts(i64::MAX, 2).is_ok());
    let top = Network::parse("ffff:ffff:ffff:ffff:ffff:ffff:ffff:fff0/124").unwrap();
    assert!(top.hosts(15, 1).is_ok());
    assert!(matches!(top.hosts(15, 2), Err(Error::Range { .. })));
    assert!(matches!(Network::parse("::/64").unwrap().hosts(-1, 1), Err(Error::Range { .. })));
  }

  #[test]
  fn covers_detects_ranges_leaving_the_network() {
    let network = Network::parse("2001:db8::/120").unwrap();
    assert!(network.covers(1, 255));
    assert!(!network.covers(1, 256));
    assert!(!network.covers(-1, 2));
    assert!(network.covers(500, 0));
  }
}
