//! Engine listing command handler.

use anyhow::Result;

use crate::config::{ConfigManager, DEFAULT_DEEPL_KEY_ENV};
use crate::engine::{DEEPL_DEFAULT_ENDPOINT, EngineKind, GOOGLE_DEFAULT_ENDPOINT};
use crate::ui::Style;

/// Prints both engines with their endpoints, marking the configured default.
pub fn print_engines() -> Result<()> {
    let config = ConfigManager::new().load_or_default()?;
    let default_engine = config.doctl.engine.unwrap_or_default();
    let google = &config.engines.google;
    let deepl = &config.engines.deepl;

    println!("{}\n", Style::header("Translation engines"));
    for engine in EngineKind::ALL {
        let marker = if engine == default_engine {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!("  {}{marker}", Style::value(engine));

        match engine {
            EngineKind::Google => {
                println!(
                    "    {} {}",
                    Style::label("endpoint:"),
                    google.endpoint.as_deref().unwrap_or(GOOGLE_DEFAULT_ENDPOINT)
                );
            }
            EngineKind::Deepl => {
                println!(
                    "    {} {}",
                    Style::label("endpoint:"),
                    deepl.endpoint.as_deref().unwrap_or(DEEPL_DEFAULT_ENDPOINT)
                );
                let env_var = deepl.api_key_env.as_deref().unwrap_or(DEFAULT_DEEPL_KEY_ENV);
                let key_state = if deepl.get_api_key().is_some() {
                    Style::success("(set)")
                } else {
                    Style::warning("(not set)")
                };
                println!(
                    "    {} {key_state} {}",
                    Style::label("api key:"),
                    Style::secondary(format!("via {env_var} or engines.deepl.api_key"))
                );
            }
        }
    }

    Ok(())
}
