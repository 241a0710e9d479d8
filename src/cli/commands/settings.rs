//! Config file inspection and token storage.

use super::ConfigAction;
use crate::config::{self, Config};

pub fn cmd_config(config: &Config, action: &ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", toml::to_string_pretty(&masked(config))?);
        }
        ConfigAction::Path => match config::config_path() {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("Could not determine config directory"),
        },
        ConfigAction::SetToken { token } => {
            let mut updated = config.clone();
            updated.credentials.access_token = Some(token.trim().to_string());
            config::save(&updated)?;
            println!("Access token saved.");
        }
    }
    Ok(())
}

/// Copy of `config` safe to print
fn masked(config: &Config) -> Config {
    let mut shown = config.clone();
    if let Some(token) = shown.credentials.access_token.as_mut() {
        let tail: String = token
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        *token = if token.chars().count() > 8 {
            format!("****{}", tail)
        } else {
            "****".to_string()
        };
    }
    shown
}
