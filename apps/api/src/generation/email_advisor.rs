//! Email Professionalism Advisor: asks the model whether an address is
//! resume-appropriate. Like the resume pipeline, it never fails outward.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::generation::parser::parse_json_object;
use crate::generation::prompts::EMAIL_PROMPT_TEMPLATE;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::GenerationError;

pub const EMAIL_FALLBACK_REASON: &str = "Fallback: could not analyze email.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailVerdict {
    pub is_professional: bool,
    #[serde(default)]
    pub suggested_email: String,
    #[serde(default)]
    pub reason: String,
}

impl EmailVerdict {
    /// Verdict used when the advisor cannot produce one: the address is
    /// treated as professional and echoed back.
    pub fn fallback(email: &str) -> Self {
        Self {
            is_professional: true,
            suggested_email: email.to_string(),
            reason: EMAIL_FALLBACK_REASON.to_string(),
        }
    }
}

pub fn build_email_prompt(email: &str, name: &str) -> String {
    fill_template(EMAIL_PROMPT_TEMPLATE, &[("email", email), ("name", name)])
}

/// Turns the advisor's reply (or failure) into a verdict.
///
/// A blank `suggested_email` in an otherwise valid reply is filled with the
/// original address.
pub fn verdict_from_reply(email: &str, reply: Result<String, GenerationError>) -> EmailVerdict {
    let parsed = reply.and_then(|text| parse_json_object::<EmailVerdict>(&text));

    match parsed {
        Ok(mut verdict) => {
            if verdict.suggested_email.trim().is_empty() {
                verdict.suggested_email = email.to_string();
            }
            verdict
        }
        Err(e) => {
            warn!("Email analysis failed ({}), using fallback verdict: {e}", e.kind());
            EmailVerdict::fallback(email)
        }
    }
}
