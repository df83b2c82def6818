use crate::config::Config;
use accesslog_core::parse_command;
use accesslog_store::apply_command;
use anyhow::Result;

pub fn handle(args: &[String], config: &Config) -> Result<()> {
    let command = parse_command(args)?;
    let outcome = apply_command(&command, &config.creation_policy())?;

    if outcome.created {
        tracing::info!(path = %command.target_file, "created new log");
    }
    Ok(())
}
