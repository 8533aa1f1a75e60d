use std::error::Error as StdError;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use log::{ info, warn };
use thiserror::Error;

use crate::agents::{ CustomerAgent, VerificationAgent };
use crate::llm::chat::ChatClient;
use crate::models::turn::{ ConversationTurn, RunStatistics, TurnRecord };
use crate::output;

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("output directory '{path}' is not usable: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)] Persist(#[from] output::PersistError),
}

/// Run-scoped configuration, passed into the constructor. One value per
/// simulation run; there is no process-wide state.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub num_turns: u32,
    /// Pause between turns, kept purely to stay under service rate limits.
    pub turn_delay: Duration,
    pub output_dir: PathBuf,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            num_turns: 10,
            turn_delay: Duration::from_millis(500),
            output_dir: PathBuf::from("simulation_results"),
        }
    }
}

/// Observer notified synchronously after each completed turn, in turn
/// order, exactly once per recorded turn.
pub trait ProgressListener: Send {
    fn on_turn_complete(&mut self, turn: u32, total: u32, conversation: &ConversationTurn);
}

/// Drives the fixed-count submission -> verdict -> reaction loop and owns
/// the accumulated conversation log.
pub struct ArtworkSimulator {
    customer: CustomerAgent,
    verifier: VerificationAgent,
    conversations: Vec<ConversationTurn>,
    config: SimulatorConfig,
}

impl ArtworkSimulator {
    pub fn new(client: Arc<dyn ChatClient>, config: SimulatorConfig) -> Self {
        Self {
            customer: CustomerAgent::new(Arc::clone(&client)),
            verifier: VerificationAgent::new(client),
            conversations: Vec::new(),
            config,
        }
    }

    /// Run the configured number of turns, invoking the listener after each
    /// recorded turn, then persist both artifacts.
    ///
    /// A turn-level error drops that turn and continues with the next index,
    /// so the returned sequence may be shorter than the configured count.
    /// An unusable output directory or a persistence failure is fatal.
    pub async fn run(
        &mut self,
        mut listener: Option<&mut dyn ProgressListener>
    ) -> Result<Vec<TurnRecord>, SimulatorError> {
        fs::create_dir_all(&self.config.output_dir).map_err(|source| SimulatorError::OutputDir {
            path: self.config.output_dir.clone(),
            source,
        })?;

        let total = self.config.num_turns;
        let mut results = Vec::new();

        for turn in 1..=total {
            match self.run_turn(turn).await {
                Ok((conversation, record)) => {
                    self.conversations.push(conversation);
                    results.push(record);

                    if let Some(l) = listener.as_deref_mut() {
                        if let Some(recorded) = self.conversations.last() {
                            l.on_turn_complete(turn, total, recorded);
                        }
                    }

                    tokio::time::sleep(self.config.turn_delay).await;
                }
                Err(e) => {
                    warn!("Turn {} failed, skipping: {}", turn, e);
                }
            }
        }

        output::save_run(&self.config.output_dir, &self.conversations, &results)?;
        info!("Simulation complete: {} of {} turns recorded", results.len(), total);

        Ok(results)
    }

    /// One full cycle. The agents absorb service failures internally, so
    /// this is the barrier for anything else that goes wrong in a turn.
    async fn run_turn(
        &self,
        turn: u32
    ) -> Result<(ConversationTurn, TurnRecord), Box<dyn StdError + Send + Sync>> {
        let submission = self.customer.generate_submission(turn).await;
        let verification = self.verifier.verify_artwork(&submission.text).await;
        let verification_message = format!(
            "[{}] {}",
            verification.verdict,
            verification.reasoning
        );
        let reaction = self.customer
            .respond_to_verification(verification.verdict, &verification.reasoning).await;

        let conversation = ConversationTurn {
            turn,
            customer_message: submission.text.clone(),
            verification_message: verification_message.clone(),
            customer_response: reaction.text.clone(),
            timestamp: Local::now().to_rfc3339(),
        };

        let record = TurnRecord {
            turn,
            customer: submission.text,
            verification: verification_message,
            customer_response: reaction.text,
            verdict: verification.verdict,
        };

        Ok((conversation, record))
    }

    pub fn conversations(&self) -> &[ConversationTurn] {
        &self.conversations
    }

    /// Aggregate verdict counts, recomputed from the conversation log.
    pub fn statistics(&self) -> RunStatistics {
        RunStatistics::from_turns(&self.conversations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::chat::{ CompletionRequest, CompletionResponse };
    use crate::models::turn::Verdict;
    use async_trait::async_trait;

    /// Canned responses per call site, routed on the task instruction.
    struct StubClient;

    #[async_trait]
    impl ChatClient for StubClient {
        async fn complete(
            &self,
            request: &CompletionRequest
        ) -> Result<CompletionResponse, Box<dyn StdError + Send + Sync>> {
            let response = if request.user.contains("Format: [verdict]") {
                "[genuine] The brushwork is consistent with the artist's period."
            } else if request.user.contains("Artwork submission scenario") {
                "Hello, please take a look at this family heirloom."
            } else {
                "That is wonderful news, thank you!"
            };
            Ok(CompletionResponse { response: response.to_string() })
        }
    }

    struct FailingClient;

    #[async_trait]
    impl ChatClient for FailingClient {
        async fn complete(
            &self,
            _request: &CompletionRequest
        ) -> Result<CompletionResponse, Box<dyn StdError + Send + Sync>> {
            Err("service unavailable".into())
        }
    }

    struct RecordingListener {
        seen: Vec<(u32, u32)>,
    }

    impl ProgressListener for RecordingListener {
        fn on_turn_complete(&mut self, turn: u32, total: u32, _conversation: &ConversationTurn) {
            self.seen.push((turn, total));
        }
    }

    fn test_config(dir: &std::path::Path, num_turns: u32) -> SimulatorConfig {
        SimulatorConfig {
            num_turns,
            turn_delay: Duration::ZERO,
            output_dir: dir.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn three_turn_run_records_three_ordered_turns() {
        let dir = tempfile::tempdir().unwrap();
        let mut simulator = ArtworkSimulator::new(
            Arc::new(StubClient),
            test_config(dir.path(), 3)
        );

        let mut listener = RecordingListener { seen: Vec::new() };
        let results = simulator.run(Some(&mut listener)).await.unwrap();

        assert_eq!(results.len(), 3);
        let turns: Vec<u32> = results
            .iter()
            .map(|r| r.turn)
            .collect();
        assert_eq!(turns, vec![1, 2, 3]);
        assert_eq!(listener.seen, vec![(1, 3), (2, 3), (3, 3)]);

        for record in &results {
            assert_eq!(record.verdict, Verdict::Genuine);
            assert!(record.verification.starts_with("[genuine]"));
            assert!(!record.customer.is_empty());
            assert!(!record.customer_response.is_empty());
        }

        // Both artifacts land in the output directory.
        let files: Vec<String> = fs
            ::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.starts_with("conversations_")));
        assert!(files.iter().any(|f| f.starts_with("results_")));
    }

    #[tokio::test]
    async fn persisted_log_matches_in_memory_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let mut simulator = ArtworkSimulator::new(
            Arc::new(StubClient),
            test_config(dir.path(), 2)
        );

        simulator.run(None).await.unwrap();

        let conversations_file = fs
            ::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .find(|e| e.file_name().to_string_lossy().starts_with("conversations_"))
            .unwrap();
        let raw = fs::read_to_string(conversations_file.path()).unwrap();
        let parsed: Vec<ConversationTurn> = serde_json::from_str(&raw).unwrap();

        let in_memory = simulator.conversations();
        assert_eq!(parsed.len(), in_memory.len());
        for (parsed_turn, turn) in parsed.iter().zip(in_memory) {
            assert_eq!(parsed_turn.turn, turn.turn);
            assert_eq!(parsed_turn.customer_message, turn.customer_message);
            assert_eq!(parsed_turn.verification_message, turn.verification_message);
            assert_eq!(parsed_turn.customer_response, turn.customer_response);
            assert_eq!(parsed_turn.timestamp, turn.timestamp);
        }
    }

    #[tokio::test]
    async fn failing_service_degrades_every_turn_to_suspicious() {
        let dir = tempfile::tempdir().unwrap();
        let mut simulator = ArtworkSimulator::new(
            Arc::new(FailingClient),
            test_config(dir.path(), 3)
        );

        let results = simulator.run(None).await.unwrap();

        assert_eq!(results.len(), 3);
        for record in &results {
            assert_eq!(record.verdict, Verdict::Suspicious);
            assert!(!record.customer.is_empty());
            assert!(!record.customer_response.is_empty());
        }

        let stats = simulator.statistics();
        assert_eq!(stats.total_turns, 3);
        assert_eq!(stats.verdict_breakdown["suspicious"], 3);
    }

    #[tokio::test]
    async fn statistics_sum_to_recorded_turn_count() {
        let dir = tempfile::tempdir().unwrap();
        let mut simulator = ArtworkSimulator::new(
            Arc::new(StubClient),
            test_config(dir.path(), 4)
        );

        simulator.run(None).await.unwrap();

        let stats = simulator.statistics();
        let sum: usize = stats.verdict_breakdown.values().sum();
        assert_eq!(stats.total_turns, 4);
        assert_eq!(sum, stats.total_turns);
    }

    #[tokio::test]
    async fn unusable_output_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocking_file = dir.path().join("occupied");
        fs::write(&blocking_file, b"not a directory").unwrap();

        let mut simulator = ArtworkSimulator::new(
            Arc::new(StubClient),
            test_config(&blocking_file, 1)
        );

        let err = simulator.run(None).await.unwrap_err();
        assert!(matches!(err, SimulatorError::OutputDir { .. }));
    }
}
