use serde::{ Serialize, Deserialize };
use std::collections::HashMap;
use std::fmt;

/// Classification outcome assigned to one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Genuine,
    Fake,
    Suspicious,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Genuine => "genuine",
            Verdict::Fake => "fake",
            Verdict::Suspicious => "suspicious",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One complete submission -> verdict -> reaction cycle, assembled by the
/// orchestrator and immutable afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub turn: u32,
    pub customer_message: String,
    /// Formatted as `[verdict] reasoning`.
    pub verification_message: String,
    pub customer_response: String,
    /// ISO-8601 timestamp taken when the turn was assembled.
    pub timestamp: String,
}

/// Flattened per-turn record returned to the caller and persisted alongside
/// the full conversation log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub customer: String,
    pub verification: String,
    pub customer_response: String,
    pub verdict: Verdict,
}

/// Aggregate counts over a completed run. Recomputed on demand from the
/// turn sequence, never stored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunStatistics {
    pub total_turns: usize,
    pub verdict_breakdown: HashMap<String, usize>,
}

impl RunStatistics {
    pub fn from_turns(turns: &[ConversationTurn]) -> Self {
        let mut verdict_breakdown: HashMap<String, usize> = HashMap::new();
        for turn in turns {
            let label = verdict_label(&turn.verification_message);
            *verdict_breakdown.entry(label.to_string()).or_insert(0) += 1;
        }

        Self {
            total_turns: turns.len(),
            verdict_breakdown,
        }
    }
}

/// Extract the bracketed verdict label from a `[verdict] reasoning` message.
/// Messages without a leading label count as suspicious, the same default
/// the classifier applies.
fn verdict_label(verification_message: &str) -> &str {
    verification_message
        .strip_prefix('[')
        .and_then(|rest| rest.split_once(']'))
        .map(|(label, _)| label)
        .unwrap_or(Verdict::Suspicious.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn_with_message(turn: u32, verification_message: &str) -> ConversationTurn {
        ConversationTurn {
            turn,
            customer_message: "Please authenticate this piece.".to_string(),
            verification_message: verification_message.to_string(),
            customer_response: "Thank you.".to_string(),
            timestamp: "2025-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn verdict_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Verdict::Genuine).unwrap(), "\"genuine\"");
        assert_eq!(serde_json::to_string(&Verdict::Fake).unwrap(), "\"fake\"");
    }

    #[test]
    fn statistics_count_each_label() {
        let turns = vec![
            turn_with_message(1, "[genuine] strong provenance"),
            turn_with_message(2, "[fake] pigment is modern"),
            turn_with_message(3, "[genuine] brushwork matches"),
            turn_with_message(4, "[suspicious] needs more review"),
        ];

        let stats = RunStatistics::from_turns(&turns);
        assert_eq!(stats.total_turns, 4);
        assert_eq!(stats.verdict_breakdown["genuine"], 2);
        assert_eq!(stats.verdict_breakdown["fake"], 1);
        assert_eq!(stats.verdict_breakdown["suspicious"], 1);
    }

    #[test]
    fn statistics_sum_matches_total() {
        let turns = vec![
            turn_with_message(1, "[genuine] ok"),
            turn_with_message(2, "no label at all"),
            turn_with_message(3, "[fake] wrong canvas"),
        ];

        let stats = RunStatistics::from_turns(&turns);
        let sum: usize = stats.verdict_breakdown.values().sum();
        assert_eq!(sum, stats.total_turns);
    }

    #[test]
    fn unlabeled_message_counts_as_suspicious() {
        let turns = vec![turn_with_message(1, "the model said something odd")];
        let stats = RunStatistics::from_turns(&turns);
        assert_eq!(stats.verdict_breakdown["suspicious"], 1);
    }

    #[test]
    fn empty_run_has_empty_breakdown() {
        let stats = RunStatistics::from_turns(&[]);
        assert_eq!(stats.total_turns, 0);
        assert!(stats.verdict_breakdown.is_empty());
    }
}
