//! # finbuddy-core
//!
//! Shared pieces used by every FinBuddy crate: the [`FinBuddyError`] taxonomy, tracing
//! initialization, and the EMI calculator exposed by the CLI.

pub mod emi;
pub mod error;
pub mod logger;

pub use emi::{emi, format_inr, LoanRate, LOAN_HIGHLIGHTS, LOAN_RATES};
pub use error::{FinBuddyError, Provider, Result};
pub use logger::init_tracing;
