//! Subnet calculation logic.
//!
//! - [`prefix`] - Prefix lengths for host and subnet-count requirements
//! - [`flsm`] - Equal-sized subnets
//! - [`vlsm`] - Host-count driven subnets
//! - [`summarize`] - Smallest block covering a set of networks

mod flsm;
mod prefix;
mod summarize;
mod vlsm;

// Re-export public functions
pub use flsm::allocate_flsm;
pub use prefix::{minimal_prefix_for_hosts, minimal_subnet_bits};
pub use summarize::summarize_routes;
pub use vlsm::allocate_vlsm;
