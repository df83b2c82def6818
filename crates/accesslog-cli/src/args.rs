use crate::types::{LogLevel, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "accesslog")]
#[command(about = "Append to and query token-protected building access logs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[arg(long, global = true, help = "Config file (default: $ACCESSLOG_CONFIG, then the user config dir)")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Append one record: -T <ts> -K <token> (-E|-G) <name> (-A|-L) [-R <room>] <log>")]
    Append {
        #[arg(
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "ARGS"
        )]
        args: Vec<String>,
    },

    #[command(about = "Apply every line of a batch file as an append command")]
    Batch {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    #[command(about = "Query a log: current building state (-S) or a person's room history (-R)")]
    Read(ReadArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReadArgs {
    #[arg(short = 'K', value_name = "TOKEN")]
    pub token: String,

    #[arg(
        short = 'S',
        conflicts_with_all = ["rooms", "person"],
        help = "Print who is in the building and which rooms are occupied"
    )]
    pub state: bool,

    #[arg(short = 'R', requires = "person", help = "Print the rooms one person has entered")]
    pub rooms: bool,

    #[arg(short = 'E', value_name = "NAME", group = "person")]
    pub employee: Option<String>,

    #[arg(short = 'G', value_name = "NAME", group = "person")]
    pub guest: Option<String>,

    #[arg(long, default_value = "plain")]
    pub format: OutputFormat,

    #[arg(value_name = "LOG")]
    pub log: PathBuf,
}
