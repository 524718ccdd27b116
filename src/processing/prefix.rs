//! Prefix length planning.
//!
//! Turns host or subnet-count requirements into prefix lengths.

use crate::error::{Result, SubnetError};
use crate::models::{AddressBlock, MAX_LENGTH};

/// Addresses reserved in every block for network and broadcast.
const RESERVED_ADDRESSES: u64 = 2;

/// The longest prefix whose block holds `host_count` usable hosts plus
/// network and broadcast, i.e. `32 - ceil(log2(host_count + 2))`.
///
/// Returns `None` when even a /0 is too small.
///
/// # Examples
/// ```
/// use subnet_calculator::processing::minimal_prefix_for_hosts;
/// assert_eq!(minimal_prefix_for_hosts(100), Some(25));
/// assert_eq!(minimal_prefix_for_hosts(0), Some(31));
/// ```
pub fn minimal_prefix_for_hosts(host_count: u32) -> Option<u8> {
    let total_addresses = host_count as u64 + RESERVED_ADDRESSES;
    if total_addresses <= 1 {
        return Some(MAX_LENGTH);
    }
    // ceil(log2(n)) for n >= 2
    let bits = u64::BITS - (total_addresses - 1).leading_zeros();
    if bits > MAX_LENGTH as u32 {
        log::debug!("No IPv4 block can hold {host_count} hosts");
        return None;
    }
    Some(MAX_LENGTH - bits as u8)
}

/// The fewest extra prefix bits that split `network` into at least
/// `subnet_count` subnets.
///
/// Fails with [`SubnetError::CapacityExceeded`] when the split would need a
/// prefix longer than /32.
pub fn minimal_subnet_bits(network: &AddressBlock, subnet_count: u64) -> Result<u8> {
    let mut subnet_bits: u8 = 0;
    while subnet_bits <= MAX_LENGTH && (1u64 << subnet_bits) < subnet_count {
        subnet_bits += 1;
    }
    let required_prefix = network.prefix_len() as u32 + subnet_bits as u32;
    if required_prefix > MAX_LENGTH as u32 {
        return Err(SubnetError::CapacityExceeded {
            network: *network,
            requested: subnet_count,
            required_prefix: required_prefix.min(u8::MAX as u32) as u8,
        });
    }
    Ok(subnet_bits)
}
