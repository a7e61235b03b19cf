//! `minagent tools`: List the tools enabled in the config.

use minagent_config::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let registry = minagent_tools::registry_from_config(&config.tools, &config.search);

    if registry.is_empty() {
        println!("No tools enabled. Turn some on under [tools] in {}", AppConfig::config_path().display());
        return Ok(());
    }

    println!("Enabled tools ({}):\n", registry.len());
    for tool in registry.list() {
        println!("  {}: {}", tool.name, tool.description);
    }
    Ok(())
}
