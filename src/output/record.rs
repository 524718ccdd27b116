//! Structured per-block records handed to output sinks.

use crate::models::{AddressBlock, AllocationResult, Method, SummaryResult};
use serde::Serialize;
use std::net::Ipv4Addr;

/// Everything reported about one computed block.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BlockRecord {
    pub label: String,
    pub network: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    pub mask: Ipv4Addr,
    pub prefix_len: u8,
    pub usable_first: Option<Ipv4Addr>,
    pub usable_last: Option<Ipv4Addr>,
    pub usable_count: u64,
}

impl BlockRecord {
    pub fn new(label: impl Into<String>, block: &AddressBlock) -> BlockRecord {
        let usable = block.usable_range();
        BlockRecord {
            label: label.into(),
            network: block.network(),
            broadcast: block.broadcast(),
            mask: block.mask(),
            prefix_len: block.prefix_len(),
            usable_first: usable.map(|(first, _)| first),
            usable_last: usable.map(|(_, last)| last),
            usable_count: block.usable_count(),
        }
    }

    /// `first - last`, or `None` when the block has no usable hosts.
    pub fn usable_range(&self) -> Option<String> {
        match (self.usable_first, self.usable_last) {
            (Some(first), Some(last)) => Some(format!("{first} - {last}")),
            _ => None,
        }
    }

    /// Labelled lines describing the block, in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Network Address", self.network.to_string()),
            ("Broadcast Address", self.broadcast.to_string()),
            ("Prefix Length", format!("/{}", self.prefix_len)),
            ("Subnet Mask", self.mask.to_string()),
        ];
        if let Some(range) = self.usable_range() {
            fields.push(("Usable IP Range", range));
            fields.push(("Total Usable IPs", self.usable_count.to_string()));
        }
        fields
    }
}

pub const FLSM_TITLE: &str = "FLSM Subnetting";
pub const VLSM_TITLE: &str = "VLSM Subnetting";
pub const SUMMARY_TITLE: &str = "Route Summarization";

/// Title used to frame a session of records, e.g. in the result log.
pub fn allocation_title(result: &AllocationResult) -> &'static str {
    match result.method {
        Method::Flsm { .. } => FLSM_TITLE,
        Method::Vlsm => VLSM_TITLE,
    }
}

/// One record per allocated subnet, in result order.
pub fn allocation_records(result: &AllocationResult) -> Vec<BlockRecord> {
    result
        .subnets
        .iter()
        .map(|s| BlockRecord::new(s.label.to_string(), &s.block))
        .collect()
}

pub fn summary_record(result: &SummaryResult) -> BlockRecord {
    BlockRecord::new("Summary Route", &result.summary)
}
