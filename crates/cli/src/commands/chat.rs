//! `minagent chat`: Interactive or single-message chat mode.

use minagent_agent::MinimalAgent;
use minagent_config::AppConfig;
use minagent_core::error::ProviderError;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Words that end an interactive session.
const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];

fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    EXIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w))
}

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let provider = match minagent_providers::build_from_config(&config) {
        Ok(provider) => provider,
        Err(ProviderError::NotConfigured(reason)) => {
            eprintln!();
            eprintln!("  ERROR: {reason}");
            eprintln!();
            eprintln!("  Set one of these environment variables:");
            eprintln!("    MINAGENT_API_KEY = 'sk-...'   (generic)");
            eprintln!("    OPENAI_API_KEY   = 'sk-...'   (for OpenAI direct)");
            eprintln!();
            eprintln!("  Or add it to your config file:");
            eprintln!("    {}", AppConfig::config_path().display());
            eprintln!();
            return Err("No usable provider. See above for setup instructions.".into());
        }
        Err(e) => return Err(e.into()),
    };

    let tools = minagent_tools::registry_from_config(&config.tools, &config.search);
    let agent = MinimalAgent::from_config(provider, tools, &config.agent);
    debug!(
        tools = %agent.tool_names(),
        max_iter = agent.max_iterations(),
        "Agent ready"
    );

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let response = agent.run(&msg).await;
        eprint!("\r              \r");
        println!("{}", response?);
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  MinAgent: Interactive Mode");
    println!();
    println!("  Provider:  {}", agent.provider().name());
    println!("  Model:     {}", agent.provider().model());
    println!("  Tools:     {}", agent.tool_names());
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit', 'quit' or 'bye' to leave.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if is_exit_command(&line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        eprint!("  ...");
        match agent.run(line.trim()).await {
            Ok(response) => {
                eprint!("\r     \r");
                println!();
                for line in response.lines() {
                    println!("  Assistant > {line}");
                }
                println!();
            }
            Err(e) => {
                eprint!("\r     \r");
                eprintln!("  [Error] {e}");
                println!();
            }
        }
    }

    println!();
    println!("  Goodbye!");
    println!();

    Ok(())
}
