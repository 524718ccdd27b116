//! Variable-length subnet masking.
//!
//! Greedy first-fit allocation, largest demand first, walking one cursor
//! upwards through the network. Not an optimal packing: the allocation
//! order is fixed so results are reproducible.

use super::prefix::minimal_prefix_for_hosts;
use crate::error::{Result, SubnetError};
use crate::models::{
    AddressBlock, AllocatedSubnet, AllocationResult, Method, SubnetDemand, SubnetLabel,
};
use itertools::Itertools;

/// Allocate one subnet per demand out of `network`.
///
/// Demands are placed in descending host-count order (stable on ties), but
/// the result lists them in input order.
pub fn allocate_vlsm(network: &AddressBlock, demands: &[SubnetDemand]) -> Result<AllocationResult> {
    if demands.is_empty() {
        return Err(SubnetError::InvalidArgument(
            "Number of subnets must be greater than 0.".to_string(),
        ));
    }
    log::info!("VLSM {network} for {} demands", demands.len());

    let sorted = demands
        .iter()
        .enumerate()
        .sorted_by(|(_, a), (_, b)| b.host_count.cmp(&a.host_count));

    let mut slots: Vec<Option<AllocatedSubnet>> = vec![None; demands.len()];
    let mut cursor = network.network();

    for (rank, (position, demand)) in sorted.enumerate() {
        let prefix_len = minimal_prefix_for_hosts(demand.host_count)
            .filter(|p| *p >= network.prefix_len())
            .ok_or_else(|| SubnetError::DemandTooLarge {
                name: demand.name.clone(),
                host_count: demand.host_count,
                network: *network,
            })?;

        let block = AddressBlock::new(cursor, prefix_len)?;
        if block.network() != cursor || !network.contains(&block) {
            return Err(SubnetError::AllocationImpossible {
                name: demand.name.clone(),
                prefix_len,
                cursor,
            });
        }
        log::debug!(
            "Allocated {block} to {name} ({hosts} hosts)",
            name = demand.name,
            hosts = demand.host_count
        );
        slots[position] = Some(AllocatedSubnet {
            label: SubnetLabel::Demand {
                name: demand.name.clone(),
                host_count: demand.host_count,
                rank: rank + 1,
            },
            block,
        });

        let remaining = demands.len() - rank - 1;
        if remaining > 0 {
            cursor = block
                .next_addr()
                .filter(|next| network.contains_addr(*next))
                .ok_or_else(|| {
                    log::warn!("VLSM {network} exhausted with {remaining} demands left");
                    SubnetError::AddressSpaceExhausted {
                        network: *network,
                        remaining,
                    }
                })?;
        }
    }

    Ok(AllocationResult {
        method: Method::Vlsm,
        network: *network,
        requested: demands.len(),
        subnets: slots.into_iter().flatten().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(s: &str) -> AddressBlock {
        s.parse().unwrap()
    }

    fn demands(list: &[(&str, u32)]) -> Vec<SubnetDemand> {
        list.iter()
            .map(|(name, hosts)| SubnetDemand::new(*name, *hosts))
            .collect()
    }

    fn cidrs(result: &AllocationResult) -> Vec<String> {
        result.blocks().map(|b| b.to_string()).collect()
    }

    #[test]
    fn test_vlsm_largest_first() {
        let result = allocate_vlsm(
            &block("192.168.1.0/24"),
            &demands(&[("A", 100), ("B", 50), ("C", 10)]),
        )
        .unwrap();
        assert_eq!(result.method, Method::Vlsm);
        assert_eq!(
            cidrs(&result),
            vec!["192.168.1.0/25", "192.168.1.128/26", "192.168.1.192/28"]
        );
    }

    #[test]
    fn test_vlsm_output_in_input_order() {
        let result = allocate_vlsm(
            &block("192.168.1.0/24"),
            &demands(&[("C", 10), ("A", 100), ("B", 50)]),
        )
        .unwrap();
        assert_eq!(
            cidrs(&result),
            vec!["192.168.1.192/28", "192.168.1.0/25", "192.168.1.128/26"]
        );
        let ranks: Vec<usize> = result
            .subnets
            .iter()
            .map(|s| match s.label {
                SubnetLabel::Demand { rank, .. } => rank,
                SubnetLabel::Index { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(ranks, vec![3, 1, 2]);
    }

    #[test]
    fn test_vlsm_ties_keep_input_order() {
        let result = allocate_vlsm(
            &block("10.0.0.0/24"),
            &demands(&[("X", 20), ("Y", 20), ("Z", 20)]),
        )
        .unwrap();
        assert_eq!(
            cidrs(&result),
            vec!["10.0.0.0/27", "10.0.0.32/27", "10.0.0.64/27"]
        );
    }

    #[test]
    fn test_vlsm_exact_fill() {
        let result = allocate_vlsm(
            &block("192.168.1.0/24"),
            &demands(&[("A", 126), ("B", 126)]),
        )
        .unwrap();
        assert_eq!(cidrs(&result), vec!["192.168.1.0/25", "192.168.1.128/25"]);
    }

    #[test]
    fn test_vlsm_exact_fill_at_top_of_space() {
        let result =
            allocate_vlsm(&block("255.255.255.0/24"), &demands(&[("A", 254)])).unwrap();
        assert_eq!(cidrs(&result), vec!["255.255.255.0/24"]);
    }

    #[test]
    fn test_vlsm_zero_hosts() {
        let result = allocate_vlsm(&block("10.0.0.0/30"), &demands(&[("p2p", 0)])).unwrap();
        assert_eq!(cidrs(&result), vec!["10.0.0.0/31"]);
        assert_eq!(result.subnets[0].block.usable_count(), 0);
    }

    #[test]
    fn test_vlsm_demand_too_large() {
        let err = allocate_vlsm(&block("192.168.1.0/28"), &demands(&[("big", 1000)])).unwrap_err();
        assert_eq!(
            err,
            SubnetError::DemandTooLarge {
                name: "big".to_string(),
                host_count: 1000,
                network: block("192.168.1.0/28"),
            }
        );
    }

    #[test]
    fn test_vlsm_address_space_exhausted() {
        let err = allocate_vlsm(
            &block("192.168.1.0/24"),
            &demands(&[("A", 100), ("B", 100), ("C", 10)]),
        )
        .unwrap_err();
        assert!(
            matches!(err, SubnetError::AddressSpaceExhausted { remaining: 1, .. }),
            "unexpected error {err:?}"
        );
    }

    #[test]
    fn test_vlsm_no_demands() {
        assert!(matches!(
            allocate_vlsm(&block("10.0.0.0/24"), &[]),
            Err(SubnetError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_vlsm_is_repeatable() {
        let net = block("10.10.0.0/22");
        let input = demands(&[("a", 300), ("b", 12), ("c", 60), ("d", 2), ("e", 60)]);
        let first = allocate_vlsm(&net, &input).unwrap();
        let second = allocate_vlsm(&net, &input).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            cidrs(&first),
            vec![
                "10.10.0.0/23",
                "10.10.2.128/28",
                "10.10.2.0/26",
                "10.10.2.144/30",
                "10.10.2.64/26"
            ]
        );
    }
}
