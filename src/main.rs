use birthday_reminder::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Check => cli::check::run().await,
        Command::TestEmail => cli::test_email::run().await,
    }
}
