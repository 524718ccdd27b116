//! Route summarization (supernetting).

use crate::error::{Result, SubnetError};
use crate::models::{AddressBlock, SummaryResult, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Find the smallest block whose prefix covers the common high-order bits
/// of every input network address.
///
/// The summary network address is the lowest input address masked to the
/// common prefix. Every input must fit inside the summary with its whole
/// range, otherwise [`SubnetError::SummarizationIncomplete`] is returned.
pub fn summarize_routes(networks: &[AddressBlock]) -> Result<SummaryResult> {
    let min_addr = networks.iter().map(|n| u32::from(n.network())).min();
    let max_addr = networks.iter().map(|n| u32::from(n.network())).max();
    let (Some(min_addr), Some(max_addr)) = (min_addr, max_addr) else {
        return Err(SubnetError::InvalidArgument(
            "No networks provided for summarization.".to_string(),
        ));
    };

    let diff = min_addr ^ max_addr;
    let common_prefix = (MAX_LENGTH as u32 - (u32::BITS - diff.leading_zeros())) as u8;
    let summary = AddressBlock::new(Ipv4Addr::from(min_addr), common_prefix)?;
    log::info!(
        "Summarized {} networks to {summary} (lowest {}, highest {})",
        networks.len(),
        Ipv4Addr::from(min_addr),
        Ipv4Addr::from(max_addr)
    );

    if let Some(escaped) = networks.iter().find(|n| !summary.contains(n)) {
        log::warn!("{escaped} extends past summary {summary}");
        return Err(SubnetError::SummarizationIncomplete {
            summary,
            network: *escaped,
        });
    }

    Ok(SummaryResult {
        networks: networks.to_vec(),
        summary,
    })
}
