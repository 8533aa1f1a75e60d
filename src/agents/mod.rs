pub mod customer;
pub mod verifier;

pub use customer::CustomerAgent;
pub use verifier::{ VerificationAgent, VerificationResult };

/// Whether a reply came back from the completion service or was substituted
/// locally after a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Model,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct AgentReply {
    pub text: String,
    pub source: ReplySource,
}
