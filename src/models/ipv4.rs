//! IPv4 address blocks and CIDR arithmetic.
//!
//! Provides [`AddressBlock`], a network address plus prefix length, along
//! with the mask and range helpers the allocators are built on.

use crate::error::{Result, SubnetError};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a prefix length to a subnet mask as u32.
///
/// Lengths above [`MAX_LENGTH`] are clamped.
///
/// # Examples
/// ```
/// use subnet_calculator::models::cidr_mask;
/// assert_eq!(cidr_mask(24), 0xFFFFFF00);
/// assert_eq!(cidr_mask(0), 0);
/// ```
pub fn cidr_mask(len: u8) -> u32 {
    let right_len = MAX_LENGTH - len.min(MAX_LENGTH);
    let all_bits = u32::MAX as u64;
    let mask = (all_bits >> right_len) << right_len;
    mask as u32
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Ipv4Addr {
    Ipv4Addr::from(u32::from(addr) & cidr_mask(len))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Ipv4Addr {
    let mask = cidr_mask(len);
    Ipv4Addr::from((u32::from(addr) & mask) | !mask)
}

/// Returns the IP address following the block containing `addr`.
///
/// `None` when the block ends at 255.255.255.255.
pub fn ip_after_subnet(addr: Ipv4Addr, len: u8) -> Option<Ipv4Addr> {
    u32::from(broadcast_addr(addr, len))
        .checked_add(1)
        .map(Ipv4Addr::from)
}

/// Parse a prefix given either as a length (`"24"`) or a dotted netmask
/// (`"255.255.255.0"`).
///
/// # Examples
/// ```
/// use subnet_calculator::models::parse_prefix;
/// assert_eq!(parse_prefix("255.255.254.0").unwrap(), 23);
/// assert_eq!(parse_prefix("26").unwrap(), 26);
/// ```
pub fn parse_prefix(input: &str) -> Result<u8> {
    let text = input.trim();
    if text.contains('.') {
        let mask: Ipv4Addr = text
            .parse()
            .map_err(|_| SubnetError::parse(input, "invalid netmask"))?;
        let bits = u32::from(mask);
        if bits.leading_ones() + bits.trailing_zeros() != MAX_LENGTH as u32 {
            return Err(SubnetError::parse(input, "netmask is not contiguous"));
        }
        Ok(bits.leading_ones() as u8)
    } else {
        let len: u8 = text
            .parse()
            .map_err(|_| SubnetError::parse(input, "invalid prefix length"))?;
        if len > MAX_LENGTH {
            return Err(SubnetError::parse(input, "prefix length is too long"));
        }
        Ok(len)
    }
}

/// An IPv4 network: a network address with no host bits set, and a prefix
/// length in `0..=32`.
///
/// Construction normalizes the address by masking off host bits, so
/// `10.1.2.3/16` becomes `10.1.0.0/16`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct AddressBlock {
    addr: Ipv4Addr,
    prefix_len: u8,
}

impl AddressBlock {
    /// Create a block, masking host bits off `addr`.
    pub fn new(addr: Ipv4Addr, prefix_len: u8) -> Result<AddressBlock> {
        if prefix_len > MAX_LENGTH {
            return Err(SubnetError::parse(
                &format!("{addr}/{prefix_len}"),
                "prefix length is too long",
            ));
        }
        let network = cut_addr(addr, prefix_len);
        if network != addr {
            log::debug!("Normalized {addr}/{prefix_len} to {network}/{prefix_len}");
        }
        Ok(AddressBlock {
            addr: network,
            prefix_len,
        })
    }

    /// Create a block from a dotted-quad address string and a prefix length.
    pub fn from_parts(ip: &str, prefix_len: u8) -> Result<AddressBlock> {
        let addr: Ipv4Addr = ip
            .trim()
            .parse()
            .map_err(|_| SubnetError::parse(ip, "invalid IP address"))?;
        AddressBlock::new(addr, prefix_len)
    }

    /// The network address.
    pub fn network(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// The subnet mask, e.g. 255.255.255.0 for /24.
    pub fn mask(&self) -> Ipv4Addr {
        Ipv4Addr::from(cidr_mask(self.prefix_len))
    }

    /// The highest (broadcast) address in the block.
    pub fn broadcast(&self) -> Ipv4Addr {
        broadcast_addr(self.addr, self.prefix_len)
    }

    /// Total number of addresses, network and broadcast included.
    pub fn total_addresses(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix_len)
    }

    /// First and last usable host address.
    ///
    /// `None` for /31 and /32, which have no usable hosts once network and
    /// broadcast are reserved.
    pub fn usable_range(&self) -> Option<(Ipv4Addr, Ipv4Addr)> {
        if self.prefix_len >= MAX_LENGTH - 1 {
            return None;
        }
        let first = u32::from(self.addr) + 1;
        let last = u32::from(self.broadcast()) - 1;
        Some((Ipv4Addr::from(first), Ipv4Addr::from(last)))
    }

    pub fn usable_count(&self) -> u64 {
        match self.usable_range() {
            Some(_) => self.total_addresses() - 2,
            None => 0,
        }
    }

    /// The first address after this block, `None` past 255.255.255.255.
    pub fn next_addr(&self) -> Option<Ipv4Addr> {
        ip_after_subnet(self.addr, self.prefix_len)
    }

    pub fn contains_addr(&self, addr: Ipv4Addr) -> bool {
        cut_addr(addr, self.prefix_len) == self.addr
    }

    /// True when the whole range of `other` lies inside this block.
    pub fn contains(&self, other: &AddressBlock) -> bool {
        other.prefix_len >= self.prefix_len && self.contains_addr(other.addr)
    }

    /// Enumerate the child blocks of length `new_prefix` in ascending order.
    pub fn subnets(&self, new_prefix: u8) -> Result<Subnets> {
        if new_prefix < self.prefix_len || new_prefix > MAX_LENGTH {
            return Err(SubnetError::InvalidArgument(format!(
                "cannot split {self} into /{new_prefix} blocks"
            )));
        }
        let start = u32::from(self.addr) as u64;
        Ok(Subnets {
            next: start,
            end: start + self.total_addresses(),
            step: 1u64 << (MAX_LENGTH - new_prefix),
            prefix_len: new_prefix,
        })
    }

    /// The lowest-addressed child block of length `new_prefix`.
    pub fn first_subnet(&self, new_prefix: u8) -> Option<AddressBlock> {
        self.subnets(new_prefix).ok().and_then(|mut s| s.next())
    }
}

/// Ascending iterator over equal-sized child blocks, see
/// [`AddressBlock::subnets`].
#[derive(Debug, Clone)]
pub struct Subnets {
    next: u64,
    end: u64,
    step: u64,
    prefix_len: u8,
}

impl Iterator for Subnets {
    type Item = AddressBlock;

    fn next(&mut self) -> Option<AddressBlock> {
        if self.next >= self.end {
            return None;
        }
        let block = AddressBlock {
            addr: Ipv4Addr::from(self.next as u32),
            prefix_len: self.prefix_len,
        };
        self.next += self.step;
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.end.saturating_sub(self.next) / self.step) as usize;
        (left, Some(left))
    }
}

impl FromStr for AddressBlock {
    type Err = SubnetError;

    /// Parse `a.b.c.d/nn` or `a.b.c.d/255.255.255.0`.
    fn from_str(addr_cidr: &str) -> Result<AddressBlock> {
        let parts: Vec<&str> = addr_cidr.trim().split('/').collect();
        if parts.len() != 2 {
            return Err(SubnetError::parse(addr_cidr, "expected address/prefix"));
        }
        let addr: Ipv4Addr = parts[0]
            .trim()
            .parse()
            .map_err(|_| SubnetError::parse(addr_cidr, "invalid IP address"))?;
        let prefix_len = parse_prefix(parts[1]).map_err(|e| match e {
            SubnetError::Parse { reason, .. } => SubnetError::parse(addr_cidr, reason),
            other => other,
        })?;
        AddressBlock::new(addr, prefix_len)
    }
}

impl std::fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

impl Serialize for AddressBlock {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AddressBlock {
    fn deserialize<D>(deserializer: D) -> std::result::Result<AddressBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AddressBlock::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(s: &str) -> AddressBlock {
        s.parse().unwrap()
    }

    #[test]
    fn test_cidr_mask() {
        assert_eq!(cidr_mask(0), 0x00000000);
        assert_eq!(cidr_mask(8), 0xFF000000);
        assert_eq!(cidr_mask(16), 0xFFFF0000);
        assert_eq!(cidr_mask(24), 0xFFFFFF00);
        assert_eq!(cidr_mask(31), 0xFFFFFFFE);
        assert_eq!(cidr_mask(32), 0xFFFFFFFF);
    }

    #[test]
    fn test_cut_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(cut_addr(ip, 24), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(cut_addr(ip, 16), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(cut_addr(ip, 8), Ipv4Addr::new(192, 0, 0, 0));
        assert_eq!(cut_addr(ip, 32), Ipv4Addr::new(192, 168, 1, 42));
        assert_eq!(cut_addr(ip, 0), Ipv4Addr::new(0, 0, 0, 0));
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(broadcast_addr(ip, 24), Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(broadcast_addr(ip, 16), Ipv4Addr::new(192, 168, 255, 255));
        assert_eq!(broadcast_addr(ip, 32), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(broadcast_addr(ip, 0), Ipv4Addr::new(255, 255, 255, 255));
    }

    #[test]
    fn test_ip_after_subnet() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(ip_after_subnet(ip, 24), Some(Ipv4Addr::new(192, 168, 2, 0)));
        assert_eq!(ip_after_subnet(ip, 16), Some(Ipv4Addr::new(192, 169, 0, 0)));
        assert_eq!(ip_after_subnet(ip, 32), Some(Ipv4Addr::new(192, 168, 1, 1)));
        assert_eq!(ip_after_subnet(Ipv4Addr::new(255, 255, 255, 0), 24), None);
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse_prefix("0").unwrap(), 0);
        assert_eq!(parse_prefix(" 32 ").unwrap(), 32);
        assert_eq!(parse_prefix("255.255.255.0").unwrap(), 24);
        assert_eq!(parse_prefix("255.255.255.255").unwrap(), 32);
        assert_eq!(parse_prefix("0.0.0.0").unwrap(), 0);
        assert!(parse_prefix("33").is_err());
        assert!(parse_prefix("-1").is_err());
        assert!(parse_prefix("abc").is_err());
        assert!(
            matches!(
                parse_prefix("255.0.255.0"),
                Err(SubnetError::Parse { ref reason, .. }) if reason == "netmask is not contiguous"
            ),
            "non-contiguous netmask must be rejected"
        );
    }

    #[test]
    fn test_parse_block_normalizes_host_bits() {
        let b = block("10.2.3.4/16");
        assert_eq!(b.network(), Ipv4Addr::new(10, 2, 0, 0));
        assert_eq!(b.prefix_len(), 16);
        assert_eq!(b.to_string(), "10.2.0.0/16");

        let b = block("192.168.1.77/255.255.255.192");
        assert_eq!(b.to_string(), "192.168.1.64/26");
    }

    #[test]
    fn test_parse_block_errors() {
        for bad in [
            "10.0.0.0",
            "10.0.0.0/24/1",
            "10.0.0.256/24",
            "10.0.0.0/33",
            "not-an-ip/8",
            "",
        ] {
            assert!(
                matches!(bad.parse::<AddressBlock>(), Err(SubnetError::Parse { .. })),
                "expected parse error for '{bad}'"
            );
        }
        assert!(AddressBlock::from_parts("300.1.1.1", 24).is_err());
        assert!(AddressBlock::new(Ipv4Addr::new(10, 0, 0, 0), 33).is_err());
    }

    #[test]
    fn test_block_queries() {
        let b = block("192.168.1.0/24");
        assert_eq!(b.mask(), Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(b.broadcast(), Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(b.total_addresses(), 256);
        assert_eq!(
            b.usable_range(),
            Some((Ipv4Addr::new(192, 168, 1, 1), Ipv4Addr::new(192, 168, 1, 254)))
        );
        assert_eq!(b.usable_count(), 254);
        assert_eq!(b.next_addr(), Some(Ipv4Addr::new(192, 168, 2, 0)));

        let all = block("0.0.0.0/0");
        assert_eq!(all.total_addresses(), 1 << 32);
        assert_eq!(all.usable_count(), (1 << 32) - 2);
        assert_eq!(all.next_addr(), None);
    }

    #[test]
    fn test_no_usable_hosts_for_31_and_32() {
        let p2p = block("10.0.0.0/31");
        assert_eq!(p2p.usable_range(), None);
        assert_eq!(p2p.usable_count(), 0);
        assert_eq!(p2p.total_addresses(), 2);

        let host = block("10.0.0.7/32");
        assert_eq!(host.usable_range(), None);
        assert_eq!(host.broadcast(), Ipv4Addr::new(10, 0, 0, 7));

        let smallest = block("10.0.0.4/30");
        assert_eq!(
            smallest.usable_range(),
            Some((Ipv4Addr::new(10, 0, 0, 5), Ipv4Addr::new(10, 0, 0, 6)))
        );
    }

    #[test]
    fn test_contains() {
        let outer = block("10.0.0.0/8");
        let inner = block("10.0.10.64/26");
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.contains(&outer));
        assert!(outer.contains_addr(Ipv4Addr::new(10, 255, 255, 255)));
        assert!(!outer.contains_addr(Ipv4Addr::new(11, 0, 0, 0)));
        assert!(!block("10.0.0.0/24").contains(&block("10.0.1.0/24")));
    }

    #[test]
    fn test_subnets() {
        let b = block("192.168.1.0/24");
        let subs: Vec<String> = b.subnets(26).unwrap().map(|s| s.to_string()).collect();
        assert_eq!(
            subs,
            vec![
                "192.168.1.0/26",
                "192.168.1.64/26",
                "192.168.1.128/26",
                "192.168.1.192/26"
            ]
        );
        assert_eq!(b.subnets(24).unwrap().count(), 1);
        assert_eq!(b.subnets(32).unwrap().size_hint(), (256, Some(256)));
        assert!(b.subnets(23).is_err());
        assert!(b.subnets(33).is_err());
    }

    #[test]
    fn test_subnets_at_top_of_address_space() {
        let b = block("255.255.255.0/24");
        let last = b.subnets(25).unwrap().last().unwrap();
        assert_eq!(last.to_string(), "255.255.255.128/25");
        assert_eq!(last.broadcast(), Ipv4Addr::new(255, 255, 255, 255));
    }

    #[test]
    fn test_first_subnet() {
        let b = block("172.16.0.0/12");
        assert_eq!(b.first_subnet(20).unwrap().to_string(), "172.16.0.0/20");
        assert_eq!(b.first_subnet(8), None);
    }

    #[test]
    fn test_block_cmp() {
        let b1 = block("10.0.10.0/24");
        let b2 = block("10.0.0.0/8");
        let b3 = block("10.0.10.64/26");
        assert!(b1 > b2);
        assert!(b1 < b3);
        assert!(b2 < b3);
        assert_eq!(block("10.0.0.1/24"), block("10.0.0.0/24"));
    }

    #[test]
    fn test_serde_as_cidr_string() {
        let b = block("10.1.0.0/16");
        assert_eq!(serde_json::to_string(&b).unwrap(), "\"10.1.0.0/16\"");
        let list: Vec<AddressBlock> =
            serde_json::from_str(r#"["10.1.0.0/16", "10.2.3.4/24"]"#).unwrap();
        assert_eq!(list[1].to_string(), "10.2.3.0/24");
        assert!(serde_json::from_str::<AddressBlock>("\"10.1.0.0\"").is_err());
    }
}
