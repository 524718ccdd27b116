//! Host-count demands for VLSM allocation.

use crate::error::{Result, SubnetError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// Regex for `NAME:HOSTS`, e.g. `LAN1:100`.
static DEMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_demand_regex() -> &'static Regex {
    DEMAND_REGEX.get_or_init(|| {
        Regex::new(r"^\s*(?P<name>[^:\s][^:]*?)\s*[:=]\s*(?P<hosts>-?\d+)\s*$")
            .expect("Invalid Regex")
    })
}

/// A named subnet that needs room for `host_count` hosts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubnetDemand {
    /// Identifier, used for reporting only.
    pub name: String,
    pub host_count: u32,
}

impl SubnetDemand {
    pub fn new(name: impl Into<String>, host_count: u32) -> SubnetDemand {
        SubnetDemand {
            name: name.into(),
            host_count,
        }
    }
}

impl FromStr for SubnetDemand {
    type Err = SubnetError;

    /// Parse `NAME:HOSTS` (or `NAME=HOSTS`).
    fn from_str(input: &str) -> Result<SubnetDemand> {
        let caps = get_demand_regex().captures(input).ok_or_else(|| {
            SubnetError::InvalidArgument(format!("malformed demand '{input}', expected NAME:HOSTS"))
        })?;
        let hosts = &caps["hosts"];
        let host_count: u32 = hosts.parse().map_err(|_| {
            SubnetError::InvalidArgument(format!(
                "number of hosts for '{}' must be a non-negative integer, got '{hosts}'",
                &caps["name"]
            ))
        })?;
        Ok(SubnetDemand::new(&caps["name"], host_count))
    }
}

impl std::fmt::Display for SubnetDemand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.host_count)
    }
}
