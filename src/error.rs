//! Error types for subnet calculations.

use crate::models::AddressBlock;
use thiserror::Error;

/// Errors returned by the FLSM, VLSM and summarization operations.
///
/// All of them are terminal for the call that produced them. The
/// computations are deterministic, so retrying with the same input
/// fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubnetError {
    #[error("Invalid address/prefix '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "The number of requested subnets ({requested}) exceeds the maximum possible with {network}: needs /{required_prefix}"
    )]
    CapacityExceeded {
        network: AddressBlock,
        requested: u64,
        required_prefix: u8,
    },

    #[error(
        "Subnet {name} ({host_count} hosts) requires more addresses than available in the original network {network}"
    )]
    DemandTooLarge {
        name: String,
        host_count: u32,
        network: AddressBlock,
    },

    #[error("Cannot allocate subnet {name} as /{prefix_len} from {cursor}")]
    AllocationImpossible {
        name: String,
        prefix_len: u8,
        cursor: std::net::Ipv4Addr,
    },

    #[error("Not enough address space in {network} for remaining subnets: {remaining} left")]
    AddressSpaceExhausted {
        network: AddressBlock,
        remaining: usize,
    },

    #[error("Summary {summary} does not contain the full range of {network}")]
    SummarizationIncomplete {
        summary: AddressBlock,
        network: AddressBlock,
    },
}

impl SubnetError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        SubnetError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SubnetError>;
