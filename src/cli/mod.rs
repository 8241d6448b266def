//! CLI module for the birthday reminder service
//!
//! Provides subcommands for running the service in different modes:
//! - `serve`: HTTP server plus the daily schedule (default)
//! - `check`: run one birthday scan immediately and exit
//! - `test-email`: send a diagnostic email to verify SMTP configuration

pub mod check;
pub mod serve;
pub mod test_email;

use clap::{Parser, Subcommand};

/// Birthday reminder - registers birthdays and emails congratulations daily
#[derive(Parser)]
#[command(name = "birthday-reminder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server with the daily scan schedule
    Serve,

    /// Run one birthday scan immediately and print the outcome
    Check,

    /// Send a test email to the configured account address
    TestEmail,
}
