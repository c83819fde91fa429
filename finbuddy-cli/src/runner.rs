//! Command handlers.

use std::io::Write;

use anyhow::{Context, Result};
use doc_loader::{load_or_rebuild, rebuild, LoadOutcome};
use finbuddy_core::{emi, format_inr, LOAN_HIGHLIGHTS, LOAN_RATES};
use orchestrator::{Answer, AnswerRoute, Orchestrator};
use session::{Session, SessionManager};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info};

use crate::assembly::build_embedder;
use crate::config::AppConfig;

const CLEAR_COMMAND: &str = "/clear";
const QUIT_COMMAND: &str = "/quit";

/// `Your EMI: ₹10,258.27 per month`, or an error for inputs the formula rejects.
pub fn emi_line(principal: f64, rate: f64, years: f64) -> Result<String> {
    let monthly = emi(principal, rate, years).context(
        "EMI needs a positive principal, a positive tenure and a non-negative interest rate",
    )?;
    Ok(format!("Your EMI: ₹{} per month", format_inr(monthly)))
}

/// Indicative rate table followed by loan highlights.
pub fn rates_table() -> String {
    let mut out = String::from("Loan Type        Interest Rate (%)\n");
    for rate in LOAN_RATES.iter() {
        out.push_str(&format!("{:<16} {:.1}\n", rate.loan_type, rate.rate_pct));
    }
    out.push_str("\nLoan highlights\n");
    for (loan, highlight) in LOAN_HIGHLIGHTS.iter() {
        out.push_str(&format!("- {}: {}\n", loan, highlight));
    }
    out
}

/// Answer text plus where it came from.
pub fn render_answer(answer: &Answer) -> String {
    match &answer.route {
        AnswerRoute::Trusted => {
            let mut sources: Vec<&str> = Vec::new();
            for chunk in &answer.sources {
                if !sources.contains(&chunk.source.as_str()) {
                    sources.push(chunk.source.as_str());
                }
            }
            if sources.is_empty() {
                answer.text.clone()
            } else {
                format!("{}\n(Sources: {})", answer.text, sources.join(", "))
            }
        }
        AnswerRoute::Escalated(_) => format!("{}\n(From live web search)", answer.text),
    }
}

/// One-shot question on a fresh session.
pub async fn run_ask(orchestrator: &Orchestrator, query: &str, out: &mut impl Write) -> Result<()> {
    let mut session = Session::new();
    let answer = orchestrator.answer(&mut session, query).await?;
    writeln!(out, "{}", render_answer(&answer))?;
    Ok(())
}

/// Interactive loop over `input` lines until `/quit` or end of input.
///
/// A failed turn prints the error and the conversation continues unchanged.
pub async fn run_chat<R, W>(
    orchestrator: &Orchestrator,
    manager: &SessionManager,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let handle = manager.create().await;
    let session_id = handle.lock().await.id;
    writeln!(
        out,
        "FinBuddy here. Ask about loans, EMIs or interest rates. {} resets, {} exits.",
        CLEAR_COMMAND, QUIT_COMMAND
    )?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await.context("Read chat input")? else {
            break;
        };
        let query = line.trim();
        match query {
            "" => continue,
            QUIT_COMMAND => break,
            CLEAR_COMMAND => {
                manager.reset(session_id).await;
                writeln!(out, "Conversation cleared.")?;
                continue;
            }
            _ => {}
        }

        let mut session = handle.lock().await;
        match orchestrator.answer(&mut session, query).await {
            Ok(answer) => writeln!(out, "{}", render_answer(&answer))?,
            Err(e) => {
                error!(error = %e, "Turn failed");
                writeln!(out, "Error: {}", e)?;
            }
        }
    }

    manager.destroy(session_id).await;
    writeln!(out, "Goodbye.")?;
    Ok(())
}

/// Loads the index (rebuilding when needed) or, with `force`, always rebuilds.
pub async fn run_build_index(config: &AppConfig, force: bool, out: &mut impl Write) -> Result<()> {
    let embedder = build_embedder(config);
    let loader_config = config.base().loader_config();
    let (index, outcome) = if force {
        (rebuild(&loader_config, embedder.as_ref()).await?, LoadOutcome::Rebuilt)
    } else {
        load_or_rebuild(&loader_config, embedder.as_ref()).await?
    };
    info!(chunks = index.len(), ?outcome, "build-index finished");
    let verb = match outcome {
        LoadOutcome::Loaded => "Loaded",
        LoadOutcome::Rebuilt => "Built",
    };
    writeln!(
        out,
        "{} index with {} chunks ({}, dim {}) at {}",
        verb,
        index.len(),
        index.embedding_model(),
        index.dimension(),
        loader_config.store_path.display()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emi_line() {
        assert_eq!(
            emi_line(500_000.0, 8.5, 5.0).unwrap(),
            "Your EMI: ₹10,258.27 per month"
        );
        assert_eq!(
            emi_line(120_000.0, 0.0, 1.0).unwrap(),
            "Your EMI: ₹10,000.00 per month"
        );
    }

    #[test]
    fn test_emi_line_rejects_invalid_input() {
        assert!(emi_line(0.0, 8.5, 5.0).is_err());
        assert!(emi_line(500_000.0, -1.0, 5.0).is_err());
        assert!(emi_line(500_000.0, 8.5, 0.0).is_err());
    }

    #[test]
    fn test_rates_table_lists_every_loan() {
        let table = rates_table();
        assert!(table.contains("Home Loan        8.5"));
        assert!(table.contains("Personal Loan    12.5"));
        assert!(table.contains("Car Loan         9.0"));
        assert!(table.contains("Education Loan   10.5"));
        assert!(table.contains("- Personal Loan: Quick disbursal within 24 hours"));
    }
}
