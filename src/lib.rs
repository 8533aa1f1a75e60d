pub mod agents;
pub mod cli;
pub mod llm;
pub mod models;
pub mod output;
pub mod prompts;
pub mod simulator;

use cli::Args;
use llm::LlmConfig;
use llm::chat::new_client;
use log::info;
use models::turn::ConversationTurn;
use simulator::{ ArtworkSimulator, ProgressListener, SimulatorConfig };
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

struct ConsoleProgress;

impl ProgressListener for ConsoleProgress {
    fn on_turn_complete(&mut self, turn: u32, total: u32, conversation: &ConversationTurn) {
        info!("Turn {}/{}: {}", turn, total, conversation.verification_message);
    }
}

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Chat LLM Type: {}", args.chat_llm_type);
    info!("Chat Model: {}", args.chat_model.as_deref().unwrap_or("adapter default"));
    info!("Chat Base URL: {}", args.chat_base_url.as_deref().unwrap_or("adapter default"));
    info!("Turns: {}", args.num_turns);
    info!("Turn Delay: {}ms", args.turn_delay_ms);
    info!("Output Directory: {}", args.output_dir);
    info!("-------------------------");

    let llm_type = llm::parse_llm_type(&args.chat_llm_type)?;
    let api_key = if !args.chat_api_key.is_empty() {
        Some(args.chat_api_key.clone())
    } else {
        None
    };
    let llm_config = LlmConfig {
        llm_type,
        api_key,
        completion_model: args.chat_model.clone(),
        base_url: args.chat_base_url.clone(),
    };
    let client = new_client(&llm_config)?;

    let sim_config = SimulatorConfig {
        num_turns: args.num_turns,
        turn_delay: Duration::from_millis(args.turn_delay_ms),
        output_dir: PathBuf::from(&args.output_dir),
    };

    let mut simulator = ArtworkSimulator::new(client, sim_config);
    let mut progress = ConsoleProgress;
    let results = simulator.run(Some(&mut progress)).await?;

    let stats = simulator.statistics();
    info!("Recorded {} of {} turns", results.len(), args.num_turns);
    for (verdict, count) in &stats.verdict_breakdown {
        info!("  {}: {}", verdict, count);
    }

    Ok(())
}
