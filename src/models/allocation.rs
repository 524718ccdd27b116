//! Results produced by the allocators and the summarizer.

use super::ipv4::AddressBlock;
use serde::Serialize;

/// Which allocator produced an [`AllocationResult`].
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum Method {
    /// Fixed-length: every subnet uses `new_prefix`.
    Flsm { new_prefix: u8 },
    /// Variable-length: sized per host demand.
    Vlsm,
}

/// What an allocated block was allocated for.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SubnetLabel {
    /// FLSM enumeration index, 1-based.
    Index { index: usize },
    /// A VLSM demand.
    Demand {
        name: String,
        host_count: u32,
        /// 1-based order in which the greedy allocator placed it.
        rank: usize,
    },
}

impl std::fmt::Display for SubnetLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SubnetLabel::Index { index } => write!(f, "Subnet {index}"),
            SubnetLabel::Demand { name, rank, .. } => write!(f, "Subnet {rank} ({name})"),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AllocatedSubnet {
    pub label: SubnetLabel,
    pub block: AddressBlock,
}

/// Ordered blocks carved out of `network`.
///
/// FLSM results are in index order. VLSM results are in the demands' input
/// order, whatever order they were allocated in.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AllocationResult {
    pub method: Method,
    pub network: AddressBlock,
    /// Number of subnets asked for.
    pub requested: usize,
    pub subnets: Vec<AllocatedSubnet>,
}

impl AllocationResult {
    pub fn blocks(&self) -> impl Iterator<Item = &AddressBlock> + '_ {
        self.subnets.iter().map(|s| &s.block)
    }
}

/// The smallest block covering every input network.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub networks: Vec<AddressBlock>,
    pub summary: AddressBlock,
}
