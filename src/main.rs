mod cmd;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "taxcalc", version, about = "Indian income tax calculator (old and new regimes)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate tax under both regimes and recommend one
    Calculate(cmd::calculate::CalculateCommand),
    /// Show the slab table for a year and regime
    Slabs(cmd::slabs::SlabsCommand),
    /// Print the input JSON schema or the deduction sections
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calculate(cmd) => cmd.exec(),
        Command::Slabs(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
