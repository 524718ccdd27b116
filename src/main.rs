use clap::Parser;
use colored::Colorize;
use std::error::Error;
use subnet_calculator::cli::{run, Cli};
use subnet_calculator::config::{init_logging, Config};

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    let config = Config::from_env();
    init_logging(&config.log4rs_file)?;
    let cli = Cli::parse();
    log::info!("#Start main()");

    if let Err(e) = run(&cli, &config, &mut std::io::stdout().lock()) {
        eprintln!("{}", format!("Error: {e}").red());
        std::process::exit(1);
    }
    Ok(())
}
