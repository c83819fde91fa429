//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "finbuddy")]
#[command(about = "FinBuddy: BFSI loan assistant with document retrieval and live web fallback", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat. `/clear` resets the conversation, `/quit` exits.
    Chat,
    /// Answer a single question and exit.
    Ask {
        /// The question; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Load the persisted document index, rebuilding it when missing or stale.
    BuildIndex {
        /// Rebuild from the raw document folders even if a usable store exists.
        #[arg(long)]
        force: bool,
    },
    /// Monthly EMI for a loan.
    Emi {
        /// Loan amount in rupees.
        #[arg(long)]
        principal: f64,
        /// Annual interest rate in percent.
        #[arg(long)]
        rate: f64,
        /// Tenure in years.
        #[arg(long)]
        years: f64,
    },
    /// Indicative interest rates and loan highlights.
    Rates,
}
