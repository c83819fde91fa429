//! # Prompt
//!
//! Chat message types and the fixed prompt templates FinBuddy sends to the model.
//!
//! ## Templates
//!
//! - **Condense**: rewrites a follow-up question into a standalone one using prior exchanges.
//! - **Retrieval QA**: answers a question from retrieved context chunks ("stuff" style).
//! - **Resynthesis**: rewrites raw web search results into a conversational answer.
//!
//! ## External interactions
//!
//! - **AI models**: output is sent to OpenAI-compatible chat completion APIs.

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Literal used in place of web results when the search returned nothing.
pub const NO_LIVE_DATA: &str = "No live data found.";

/// Separator between stuffed context chunks.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Formats prior exchanges as `Human: ...` / `Assistant: ...` lines, oldest first.
pub fn format_chat_history<I, Q, A>(history: I) -> String
where
    I: IntoIterator<Item = (Q, A)>,
    Q: AsRef<str>,
    A: AsRef<str>,
{
    let mut out = String::new();
    for (query, answer) in history {
        out.push_str("Human: ");
        out.push_str(query.as_ref());
        out.push_str("\nAssistant: ");
        out.push_str(answer.as_ref());
        out.push('\n');
    }
    out
}

/// Builds the prompt asking the model to turn a follow-up into a standalone question.
///
/// `chat_history` is the output of [`format_chat_history`].
pub fn condense_question_prompt(chat_history: &str, question: &str) -> String {
    format!(
        "Given the following conversation and a follow up question, rephrase the follow up \
         question to be a standalone question, in its original language.\n\n\
         Chat History:\n{}\nFollow Up Input: {}\nStandalone question:",
        chat_history, question
    )
}

/// Builds the retrieval QA prompt: context chunks joined by [`CONTEXT_SEPARATOR`], then the question.
pub fn retrieval_qa_prompt<I, S>(context_chunks: I, question: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let context = context_chunks
        .into_iter()
        .map(|c| c.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR);
    format!(
        "Use the following pieces of context to answer the question at the end. \
         If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\n\
         {}\n\nQuestion: {}\nHelpful Answer:",
        context, question
    )
}

/// Formats one web result line: `{snippet} (Source: {url})`.
pub fn format_search_line(snippet: &str, source_url: &str) -> String {
    format!("{} (Source: {})", snippet, source_url)
}

/// Builds the prompt that rewrites raw web search results into the final answer.
///
/// `raw_info` is either newline-joined [`format_search_line`] output or [`NO_LIVE_DATA`].
pub fn resynthesis_prompt(query: &str, raw_info: &str) -> String {
    format!(
        "You are FinBuddy, a friendly BFSI loan assistant.\n\
         The user asked: \"{}\"\n\
         I found the following web search results:\n\
         {}\n\n\
         Please provide a clear, concise, and helpful answer to the user,\n\
         using a natural conversational tone.\n\
         Include the source link if relevant.",
        query, raw_info
    )
}
