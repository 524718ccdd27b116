//! Domain models for subnet calculations.
//!
//! - [`AddressBlock`] - IPv4 network address with prefix length
//! - [`SubnetDemand`] - named host-count requirement for VLSM
//! - [`AllocationResult`] and [`SummaryResult`] - algorithm outputs

mod allocation;
mod demand;
mod ipv4;

// Re-export public types
pub use allocation::{AllocatedSubnet, AllocationResult, Method, SubnetLabel, SummaryResult};
pub use demand::SubnetDemand;
pub use ipv4::{
    broadcast_addr, cidr_mask, cut_addr, ip_after_subnet, parse_prefix, AddressBlock, Subnets,
    MAX_LENGTH,
};
