mod cli;
mod commands;

use clap::Parser;
use cli::cmd_enums::{Cli, Commands};
use goswitch::{GoSwitch, ManagerConfig, log_debug, log_error, logger};

fn main() {
    let cli = Cli::parse();
    logger::init(cli.debug);

    if let Err(e) = run(cli) {
        log_error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Dispatches the parsed command. Only `version` works without a managed root.
fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Version = cli.command {
        commands::version::run();
        return Ok(());
    }

    let config = ManagerConfig::load(cli.root)?;
    log_debug!("[Main] Effective configuration: {:?}", config);
    let manager = GoSwitch::new(config);

    match cli.command {
        Commands::Version => commands::version::run(),
        Commands::List => commands::list::run(&manager)?,
        Commands::Remote { stable, filter } => commands::remote::run(&manager, stable, filter)?,
        Commands::Install { version } => commands::install::run(&manager, &version)?,
        Commands::Use { version } => commands::switch::run(&manager, &version)?,
        Commands::Uninstall { version, yes } => commands::uninstall::run(&manager, &version, yes)?,
    }
    Ok(())
}
