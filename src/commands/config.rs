use dialoguer::console::style;
use dialoguer::Password;
use dictionary::Settings;

use crate::args::ConfigCommands;

pub(crate) fn cmd_config(command: Option<ConfigCommands>) -> anyhow::Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => cmd_config_show(),
        Some(ConfigCommands::SetKey { key }) => {
            let key = match key {
                Some(key) => key,
                None if Settings::is_interactive() => Password::new()
                    .with_prompt("Google Cloud Translation API key")
                    .interact()?,
                None => anyhow::bail!("No key given. Usage: dict config set-key <KEY>"),
            };
            cmd_config_set_key(key)
        }
        Some(ConfigCommands::SetFrom { language }) => cmd_config_set_from(&language),
    }
}

fn cmd_config_show() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let config_path = Settings::config_path();

    println!("{}", style("Configuration").bold());

    let key_status = if settings.api_key.is_empty() {
        style("not set".to_string()).dim()
    } else {
        style(mask_key(&settings.api_key)).green()
    };

    let entries = [
        ("API Key", key_status.to_string()),
        ("From Language", settings.from_language.clone()),
        ("Endpoint", settings.endpoint.clone()),
        ("Timeout", format!("{}s", settings.request_timeout_secs)),
        ("Max Requests", settings.max_concurrent_requests.to_string()),
        ("Debounce", format!("{}ms", settings.debounce_ms)),
        ("Config File", style(config_path.display()).dim().to_string()),
    ];

    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in entries {
        println!("  {:<width$} : {}", key, value);
    }

    Ok(())
}

fn cmd_config_set_key(key: String) -> anyhow::Result<()> {
    let key = key.trim().to_string();
    if key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    let mut settings = Settings::load_from(&Settings::config_path())?;
    settings.api_key = key;
    settings.save()?;

    println!("{} API key saved.", style("✓").green());
    Ok(())
}

fn cmd_config_set_from(language: &str) -> anyhow::Result<()> {
    let language = language.trim();
    if language.len() != 2 || !language.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        anyhow::bail!("Invalid language code '{}'. Use a two-letter code such as 'en'.", language);
    }

    let mut settings = Settings::load_from(&Settings::config_path())?;
    settings.from_language = language.to_string();
    settings.save()?;

    println!("{} Default source language set to {}.", style("✓").green(), language);
    Ok(())
}

/// Keeps the last four characters visible.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(8), tail)
}
