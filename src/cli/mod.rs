use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Chat LLM Provider Args ---
    /// Type of LLM provider for chat completion (openai, ollama)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "openai")]
    pub chat_llm_type: String,

    /// API Key for the chat LLM provider. Providers that enforce auth refuse to start without one.
    #[arg(long, env = "CHAT_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Base URL for the chat LLM provider API (e.g., http://localhost:11434 for Ollama)
    #[arg(long, env = "CHAT_BASE_URL")] // No default, let adapters handle defaults if None
    pub chat_base_url: Option<String>,

    /// Model name for chat completion (e.g., gpt-4o-mini, llama3)
    #[arg(long, env = "CHAT_MODEL")] // No default, rely on adapter defaults if None
    pub chat_model: Option<String>,

    // --- Simulation Args ---
    /// Number of conversation turns to simulate.
    #[arg(long, env = "NUM_TURNS", default_value = "10",
          value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub num_turns: u32,

    /// Delay between turns in milliseconds, kept to stay under service rate limits.
    #[arg(long, env = "TURN_DELAY_MS", default_value = "500")]
    pub turn_delay_ms: u64,

    /// Directory the run artifacts (conversation log, result records) are written to.
    #[arg(long, env = "OUTPUT_DIR", default_value = "simulation_results")]
    pub output_dir: String,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}
