//! Runtime configuration from `.env` and environment variables.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_FILE: &str = "subnet_calculator_log.txt";
pub const DEFAULT_LOG4RS_FILE: &str = "log4rs.yml";

pub const ENV_LOG_FILE: &str = "SUBNET_CALC_LOG_FILE";
pub const ENV_LOG4RS_FILE: &str = "SUBNET_CALC_LOG4RS";
pub const ENV_NO_LOG_FILE: &str = "SUBNET_CALC_NO_LOG_FILE";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Append-only result log, `None` when disabled.
    pub log_file: Option<PathBuf>,
    pub log4rs_file: PathBuf,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            log4rs_file: PathBuf::from(DEFAULT_LOG4RS_FILE),
            color: true,
        }
    }
}

impl Config {
    /// Load `.env` (if present) then read the environment.
    pub fn from_env() -> Config {
        dotenv::dotenv().ok();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(path) = lookup(ENV_LOG_FILE).filter(|p| !p.trim().is_empty()) {
            config.log_file = Some(PathBuf::from(path));
        }
        if lookup(ENV_NO_LOG_FILE).is_some_and(|v| is_truthy(&v)) {
            config.log_file = None;
        }
        if let Some(path) = lookup(ENV_LOG4RS_FILE).filter(|p| !p.trim().is_empty()) {
            config.log4rs_file = PathBuf::from(path);
        }
        // https://no-color.org: any non-empty value disables color
        if lookup(ENV_NO_COLOR).is_some_and(|v| !v.is_empty()) {
            config.color = false;
        }
        config
    }
}

/// Initialise log4rs from `log4rs_file`, or log warnings to stderr when the
/// file can't be used.
pub fn init_logging(log4rs_file: &Path) -> Result<(), Box<dyn Error>> {
    match log4rs::init_file(log4rs_file, Default::default()) {
        Ok(()) => Ok(()),
        Err(init_err) => {
            let stderr = ConsoleAppender::builder()
                .target(Target::Stderr)
                .encoder(Box::new(PatternEncoder::new(
                    "{d(%H:%M:%S)} {h({l})} {t} - {m}{n}",
                )))
                .build();
            let config = log4rs::config::Config::builder()
                .appender(Appender::builder().build("stderr", Box::new(stderr)))
                .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
            log4rs::init_config(config)?;
            log::warn!(
                "Could not load {}, logging warnings to stderr: {init_err}",
                log4rs_file.display()
            );
            Ok(())
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
