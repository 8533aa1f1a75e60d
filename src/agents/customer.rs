use std::sync::Arc;

use log::warn;
use rand::thread_rng;

use crate::llm::chat::{ ChatClient, CompletionRequest };
use crate::models::turn::Verdict;
use crate::prompts;
use super::{ AgentReply, ReplySource };

const CUSTOMER_TEMPERATURE: f32 = 0.8;
const CUSTOMER_MAX_TOKENS: u32 = 150;

/// Scripted customer submitting artworks for authentication.
pub struct CustomerAgent {
    client: Arc<dyn ChatClient>,
}

impl CustomerAgent {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }

    /// Produce the submission message for one turn. A service failure falls
    /// back to a templated message embedding the same claim, so submission
    /// itself never fails.
    pub async fn generate_submission(&self, turn: u32) -> AgentReply {
        let claim = prompts::random_claim(&mut thread_rng());
        let request = CompletionRequest {
            system: prompts::CUSTOMER_PERSONA.to_string(),
            user: prompts::submission_prompt(turn, &claim),
            temperature: CUSTOMER_TEMPERATURE,
            max_tokens: CUSTOMER_MAX_TOKENS,
        };

        match self.client.complete(&request).await {
            Ok(resp) =>
                AgentReply {
                    text: resp.response.trim().to_string(),
                    source: ReplySource::Model,
                },
            Err(e) => {
                warn!("Submission completion failed on turn {}: {}", turn, e);
                AgentReply {
                    text: format!(
                        "Hello, I would like to have this piece authenticated. {}",
                        claim
                    ),
                    source: ReplySource::Fallback,
                }
            }
        }
    }

    /// React to a verdict. Falls back to a canned reaction keyed by the
    /// verdict when the service is unavailable.
    pub async fn respond_to_verification(
        &self,
        verdict: Verdict,
        reasoning: &str
    ) -> AgentReply {
        let request = CompletionRequest {
            system: prompts::CUSTOMER_PERSONA.to_string(),
            user: prompts::reaction_prompt(verdict.as_str(), reasoning),
            temperature: CUSTOMER_TEMPERATURE,
            max_tokens: CUSTOMER_MAX_TOKENS,
        };

        match self.client.complete(&request).await {
            Ok(resp) =>
                AgentReply {
                    text: resp.response.trim().to_string(),
                    source: ReplySource::Model,
                },
            Err(e) => {
                warn!("Reaction completion failed: {}", e);
                let text = match verdict {
                    Verdict::Genuine => "Thank you! I knew it was genuine all along.",
                    Verdict::Fake =>
                        "Really? I can hardly believe that. Could you take another look?",
                    Verdict::Suspicious => "Is a more detailed examination needed?",
                };
                AgentReply {
                    text: text.to_string(),
                    source: ReplySource::Fallback,
                }
            }
        }
    }
}
