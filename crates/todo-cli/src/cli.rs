use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "todo",
    about = "Todo service: items with best-effort external mirroring",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the PostgreSQL schema
    Schema,
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<String>,
    /// Listen address, overrides the config file
    #[arg(long)]
    pub bind: Option<String>,
    /// PostgreSQL connection string, overrides the config file
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
    /// Mirror endpoint, overrides the config file
    #[arg(long)]
    pub mirror_url: Option<String>,
    /// Do not mirror new items
    #[arg(long)]
    pub no_mirror: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[arg(short, long)]
    pub config: Option<String>,
}
