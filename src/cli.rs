//! Command line interface.
//!
//! Parses arguments, runs one calculation, prints it and appends it to the
//! result log.

use crate::config::Config;
use crate::error::SubnetError;
use crate::models::{parse_prefix, AllocationResult, SubnetDemand, SummaryResult};
use crate::output::{
    allocation_records, emit_allocation, emit_error, emit_summary, render_allocation,
    render_csv, render_json, render_summary, summary_record, LogFileSink, FLSM_TITLE,
    SUMMARY_TITLE, VLSM_TITLE,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Subnet calculator: subnetting (FLSM/VLSM) and route summarization to
/// optimize IPv4 address allocation.
#[derive(Parser, Debug)]
#[command(name = "subnet-calculator", version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Result log file (appended to)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Do not write the result log
    #[arg(long, global = true)]
    pub no_log_file: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fixed Length Subnet Mask: split a network into equal subnets
    Flsm {
        /// Network address, e.g. 192.168.1.0
        ip: String,
        /// Prefix length (24) or netmask (255.255.255.0)
        #[arg(value_parser = parse_prefix)]
        prefix: u8,
        /// Number of subnets required
        count: u32,
    },
    /// Variable Length Subnet Mask: size subnets per host count
    Vlsm {
        /// Network address, e.g. 192.168.1.0
        ip: String,
        /// Prefix length (24) or netmask (255.255.255.0)
        #[arg(value_parser = parse_prefix)]
        prefix: u8,
        /// Subnets as NAME:HOSTS, e.g. LAN1:100 LAN2:50
        #[arg(required = true, value_parser = SubnetDemand::from_str)]
        demands: Vec<SubnetDemand>,
    },
    /// Route summarization: smallest block covering all networks
    Summarize {
        /// Networks as address/prefix, e.g. 192.168.0.0/24
        #[arg(required_unless_present = "from_json", conflicts_with = "from_json")]
        networks: Vec<String>,
        /// Read networks from a JSON array of "address/prefix" strings
        #[arg(long)]
        from_json: Option<PathBuf>,
    },
}

impl Cli {
    /// The result log to append to, flags taking precedence over config.
    pub fn log_file(&self, config: &Config) -> Option<PathBuf> {
        if self.no_log_file {
            None
        } else {
            self.log_file.clone().or_else(|| config.log_file.clone())
        }
    }
}

/// Run the parsed command, writing the rendered result to `out`.
pub fn run(cli: &Cli, config: &Config, out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }
    let log_file = cli.log_file(config);

    match &cli.command {
        Commands::Flsm { ip, prefix, count } => {
            let result = crate::flsm(ip, *prefix, *count)
                .inspect_err(|e| log::error!("FLSM failed: {e}"))
                .map_err(|e| record_failure(FLSM_TITLE, e, log_file.as_deref()))?;
            report_allocation(&result, cli.format, log_file.as_deref(), out)
        }
        Commands::Vlsm {
            ip,
            prefix,
            demands,
        } => {
            let result = crate::vlsm(ip, *prefix, demands)
                .inspect_err(|e| log::error!("VLSM failed: {e}"))
                .map_err(|e| record_failure(VLSM_TITLE, e, log_file.as_deref()))?;
            report_allocation(&result, cli.format, log_file.as_deref(), out)
        }
        Commands::Summarize {
            networks,
            from_json,
        } => {
            let result = match from_json {
                Some(path) => {
                    let json = std::fs::read_to_string(path)
                        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
                    crate::parse_networks_json(&json)
                        .and_then(|blocks| crate::processing::summarize_routes(&blocks))
                }
                None => crate::summarize(networks.as_slice()),
            }
            .inspect_err(|e| log::error!("Summarization failed: {e}"))
            .map_err(|e| record_failure(SUMMARY_TITLE, e, log_file.as_deref()))?;
            report_summary(&result, cli.format, log_file.as_deref(), out)
        }
    }
}

/// Append a failed computation to the result log and hand its error back.
fn record_failure(title: &str, error: SubnetError, log_file: Option<&Path>) -> Box<dyn Error> {
    if let Some(path) = log_file {
        let written =
            LogFileSink::open(path).and_then(|mut sink| emit_error(title, &error, &mut sink));
        if let Err(e) = written {
            log::warn!("Could not record failure in {}: {e}", path.display());
        }
    }
    error.into()
}

fn report_allocation(
    result: &AllocationResult,
    format: OutputFormat,
    log_file: Option<&Path>,
    out: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Text => write!(out, "{}", render_allocation(result))?,
        OutputFormat::Csv => write!(out, "{}", render_csv(&allocation_records(result)))?,
        OutputFormat::Json => writeln!(out, "{}", render_json(result)?)?,
    }
    if let Some(path) = log_file {
        let mut sink = LogFileSink::open(path)
            .map_err(|e| format!("Error opening log file {}: {e}", path.display()))?;
        emit_allocation(result, &mut sink)?;
    }
    Ok(())
}

fn report_summary(
    result: &SummaryResult,
    format: OutputFormat,
    log_file: Option<&Path>,
    out: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Text => write!(out, "{}", render_summary(result))?,
        OutputFormat::Csv => write!(out, "{}", render_csv(&[summary_record(result)]))?,
        OutputFormat::Json => writeln!(out, "{}", render_json(result)?)?,
    }
    if let Some(path) = log_file {
        let mut sink = LogFileSink::open(path)
            .map_err(|e| format!("Error opening log file {}: {e}", path.display()))?;
        emit_summary(result, &mut sink)?;
    }
    Ok(())
}
