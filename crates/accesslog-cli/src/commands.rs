use super::args::{Cli, Commands};
use super::handlers;
use crate::config::Config;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Append { args } => handlers::append::handle(&args, &config),
        Commands::Batch { file } => handlers::batch::handle(&file, &config),
        Commands::Read(args) => handlers::read::handle(&args),
    }
}
