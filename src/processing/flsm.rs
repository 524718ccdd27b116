//! Fixed-length subnet masking.

use super::prefix::minimal_subnet_bits;
use crate::error::{Result, SubnetError};
use crate::models::{AddressBlock, AllocatedSubnet, AllocationResult, Method, SubnetLabel};

/// Split `network` into `subnet_count` equal subnets.
///
/// The new prefix is the shortest one giving at least `subnet_count`
/// children. Only the first `subnet_count` children in address order are
/// returned; any surplus capacity is left out.
pub fn allocate_flsm(network: &AddressBlock, subnet_count: u32) -> Result<AllocationResult> {
    if subnet_count == 0 {
        return Err(SubnetError::InvalidArgument(
            "Number of subnets must be greater than 0.".to_string(),
        ));
    }
    let subnet_bits = minimal_subnet_bits(network, subnet_count as u64)?;
    let new_prefix = network.prefix_len() + subnet_bits;
    log::info!(
        "FLSM {network} into {subnet_count} subnets: +{subnet_bits} bits, new prefix /{new_prefix}"
    );

    let subnets: Vec<AllocatedSubnet> = network
        .subnets(new_prefix)?
        .take(subnet_count as usize)
        .enumerate()
        .map(|(i, block)| AllocatedSubnet {
            label: SubnetLabel::Index { index: i + 1 },
            block,
        })
        .collect();

    let capacity = 1u64 << subnet_bits;
    if capacity > subnet_count as u64 {
        log::debug!(
            "FLSM {network}: {} of {capacity} /{new_prefix} subnets unused",
            capacity - subnet_count as u64
        );
    }

    Ok(AllocationResult {
        method: Method::Flsm { new_prefix },
        network: *network,
        requested: subnet_count as usize,
        subnets,
    })
}
