use std::sync::Arc;

use log::warn;

use crate::llm::chat::{ ChatClient, CompletionRequest };
use crate::models::turn::Verdict;
use crate::prompts;
use super::ReplySource;

const EXPERT_TEMPERATURE: f32 = 0.3;
const EXPERT_MAX_TOKENS: u32 = 200;

const FALLBACK_REASONING: &str = "Further verification is needed.";
const FAILURE_REASONING: &str =
    "An error occurred during verification. Further review is required.";

/// Outcome of one verification call. Transient; the orchestrator folds it
/// into the turn's `[verdict] reasoning` message.
#[derive(Debug, Clone)]
pub struct VerificationResult {
    pub verdict: Verdict,
    pub reasoning: String,
    pub raw_output: String,
    pub source: ReplySource,
}

/// Scripted expert rendering a three-way verdict on each submission.
pub struct VerificationAgent {
    client: Arc<dyn ChatClient>,
}

impl VerificationAgent {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }

    /// Judge one customer submission. A service failure degrades to a
    /// suspicious verdict carrying the error text as raw output; this call
    /// never fails.
    pub async fn verify_artwork(&self, customer_message: &str) -> VerificationResult {
        let request = CompletionRequest {
            system: prompts::EXPERT_PERSONA.to_string(),
            user: prompts::verification_prompt(customer_message),
            temperature: EXPERT_TEMPERATURE,
            max_tokens: EXPERT_MAX_TOKENS,
        };

        match self.client.complete(&request).await {
            Ok(resp) => {
                let raw = resp.response.trim().to_string();
                let (verdict, reasoning) = classify(&raw);
                VerificationResult {
                    verdict,
                    reasoning,
                    raw_output: raw,
                    source: ReplySource::Model,
                }
            }
            Err(e) => {
                warn!("Verification completion failed: {}", e);
                VerificationResult {
                    verdict: Verdict::Suspicious,
                    reasoning: FAILURE_REASONING.to_string(),
                    raw_output: e.to_string(),
                    source: ReplySource::Fallback,
                }
            }
        }
    }
}

/// Classify free-form expert output into a verdict plus reasoning.
///
/// Labels are matched case-insensitively in priority order genuine, fake,
/// suspicious; the first match wins. The matched label is stripped (both
/// the bracketed and the bare form) to leave the reasoning; an empty
/// remainder gets a fixed fallback line.
pub fn classify(raw: &str) -> (Verdict, String) {
    let lowered = raw.to_lowercase();
    let verdict = if lowered.contains(Verdict::Genuine.as_str()) {
        Verdict::Genuine
    } else if lowered.contains(Verdict::Fake.as_str()) {
        Verdict::Fake
    } else {
        Verdict::Suspicious
    };

    let mut reasoning = strip_label(raw, verdict.as_str());
    if reasoning.is_empty() {
        reasoning = FALLBACK_REASONING.to_string();
    }

    (verdict, reasoning)
}

fn strip_label(text: &str, label: &str) -> String {
    let without_bracketed = remove_ignore_ascii_case(text, &format!("[{}]", label));
    remove_ignore_ascii_case(&without_bracketed, label).trim().to_string()
}

/// Remove every occurrence of an ASCII needle, ignoring ASCII case. The
/// haystack may contain arbitrary UTF-8.
fn remove_ignore_ascii_case(haystack: &str, needle: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }

    let mut out = String::with_capacity(haystack.len());
    let mut i = 0;
    while i < haystack.len() {
        let end = i + needle.len();
        if end <= haystack.len()
            && haystack.is_char_boundary(end)
            && haystack[i..end].eq_ignore_ascii_case(needle)
        {
            i = end;
            continue;
        }
        match haystack[i..].chars().next() {
            Some(ch) => {
                out.push(ch);
                i += ch.len_utf8();
            }
            None => break,
        }
    }
    out
}
