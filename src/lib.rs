// cargo watch -x 'fmt' -x 'test'

//! IPv4 subnet planning: fixed-length and variable-length subnetting, and
//! route summarization.
//!
//! The entry points [`flsm`], [`vlsm`] and [`summarize`] take text input
//! and return plain result data. Rendering and result logging live in
//! [`output`].

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{Result, SubnetError};
use models::{AddressBlock, AllocationResult, SubnetDemand, SummaryResult};

/// Split `ip/prefix_len` into `subnet_count` equal subnets.
///
/// # Examples
/// ```
/// let result = subnet_calculator::flsm("192.168.1.0", 24, 4).unwrap();
/// assert_eq!(result.subnets[1].block.to_string(), "192.168.1.64/26");
/// ```
pub fn flsm(ip: &str, prefix_len: u8, subnet_count: u32) -> Result<AllocationResult> {
    let network = AddressBlock::from_parts(ip, prefix_len)?;
    processing::allocate_flsm(&network, subnet_count)
}

/// Allocate one subnet per host demand out of `ip/prefix_len`.
pub fn vlsm(ip: &str, prefix_len: u8, demands: &[SubnetDemand]) -> Result<AllocationResult> {
    let network = AddressBlock::from_parts(ip, prefix_len)?;
    processing::allocate_vlsm(&network, demands)
}

/// Summarize `address/prefix` strings into one covering block.
///
/// # Examples
/// ```
/// let result = subnet_calculator::summarize(&["192.168.0.0/24", "192.168.1.0/24"]).unwrap();
/// assert_eq!(result.summary.to_string(), "192.168.0.0/23");
/// ```
pub fn summarize<S: AsRef<str>>(networks: &[S]) -> Result<SummaryResult> {
    let blocks = networks
        .iter()
        .map(|n| n.as_ref().parse::<AddressBlock>())
        .collect::<Result<Vec<_>>>()?;
    processing::summarize_routes(&blocks)
}

/// Read a JSON array of `"address/prefix"` strings.
pub fn parse_networks_json(json: &str) -> Result<Vec<AddressBlock>> {
    serde_json::from_str(json).map_err(|e| SubnetError::parse(json.trim(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flsm_parse_error() {
        assert!(matches!(
            flsm("192.168.1", 24, 2),
            Err(SubnetError::Parse { .. })
        ));
        assert!(matches!(
            flsm("192.168.1.0", 33, 2),
            Err(SubnetError::Parse { .. })
        ));
    }

    #[test]
    fn test_summarize_parse_error() {
        let err = summarize(&["10.0.0.0/24", "10.0.1.0/40"]).unwrap_err();
        assert!(matches!(err, SubnetError::Parse { ref input, .. } if input == "10.0.1.0/40"));
    }

    #[test]
    fn test_parse_networks_json() {
        let networks = parse_networks_json(r#"["10.0.0.0/24", "10.0.1.0/24"]"#).unwrap();
        assert_eq!(networks.len(), 2);
        assert!(matches!(
            parse_networks_json(r#"["10.0.0.0/24", 7]"#),
            Err(SubnetError::Parse { .. })
        ));
        assert!(matches!(
            parse_networks_json(r#"{"a": 1}"#),
            Err(SubnetError::Parse { .. })
        ));
    }
}
