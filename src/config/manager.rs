use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::{
    DEEPL_DEFAULT_ENDPOINT, DEFAULT_CHUNK_SIZE, DEFAULT_TIMEOUT, EngineKind,
    GOOGLE_DEFAULT_ENDPOINT,
};
use crate::glossary::DEFAULT_CATEGORY;
use crate::paths;
use crate::translation::validate_language;
use crate::ui::Style;

pub const DEFAULT_SOURCE_LANGUAGE: &str = "tr";
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";
/// Checked for a `DeepL` key when `api_key_env` is not configured.
pub const DEFAULT_DEEPL_KEY_ENV: &str = "DEEPL_API_KEY";

/// Default settings in the `[doctl]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctlConfig {
    /// Default engine.
    pub engine: Option<EngineKind>,
    /// Default source language (ISO 639-1 code).
    pub from: Option<String>,
    /// Default target language (ISO 639-1 code).
    pub to: Option<String>,
    /// Default glossary category.
    pub category: Option<String>,
    /// Glossary database location.
    pub glossary_db: Option<PathBuf>,
}

/// `[engines.google]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Maximum characters per request.
    pub chunk_size: Option<usize>,
}

/// `[engines.deepl]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLConfig {
    pub endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl DeepLConfig {
    /// Gets the API key, preferring the environment variable over the
    /// config file.
    pub fn get_api_key(&self) -> Option<String> {
        let env_var = self.api_key_env.as_deref().unwrap_or(DEFAULT_DEEPL_KEY_ENV);
        if let Ok(key) = std::env::var(env_var)
            && !key.trim().is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnginesConfig {
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub deepl: DeepLConfig,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/doctl/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub doctl: DoctlConfig,
    #[serde(default)]
    pub engines: EnginesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleSettings {
    pub endpoint: String,
    pub timeout: Duration,
    pub chunk_size: usize,
}

#[derive(Clone, PartialEq, Eq)]
pub struct DeepLSettings {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for DeepLSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepLSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// The engine that will actually run; `Deepl` only when a key exists.
    pub engine: EngineKind,
    pub source_language: String,
    pub target_language: String,
    pub category: String,
    pub glossary_db: PathBuf,
    pub google: GoogleSettings,
    /// Present whenever a `DeepL` key could be resolved.
    pub deepl: Option<DeepLSettings>,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub engine: Option<EngineKind>,
    pub api_key: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub category: Option<String>,
    pub glossary_db: Option<PathBuf>,
}

fn timeout(secs: Option<u64>, key: &str) -> Result<Duration> {
    match secs {
        Some(0) => bail!(
            "Invalid configuration: '{key}' must be at least 1 second\n\n\
             Fix it in ~/.config/doctl/config.toml"
        ),
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => Ok(DEFAULT_TIMEOUT),
    }
}

/// Merges CLI options, the config file and built-in defaults, in that order.
///
/// Selecting `DeepL` without a resolvable key is not an error: a warning is
/// printed and Google is used instead.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let defaults = &config_file.doctl;

    let source_language = validate_language(
        options
            .from
            .as_deref()
            .or(defaults.from.as_deref())
            .unwrap_or(DEFAULT_SOURCE_LANGUAGE),
    )?
    .to_string();
    let target_language = validate_language(
        options
            .to
            .as_deref()
            .or(defaults.to.as_deref())
            .unwrap_or(DEFAULT_TARGET_LANGUAGE),
    )?
    .to_string();
    if source_language == target_language {
        bail!(
            "Source and target language are both '{source_language}'\n\n\
             Please choose a different language via:\n  \
             - CLI option: doctl --to <lang>\n  \
             - Config file: ~/.config/doctl/config.toml"
        );
    }

    let category = options
        .category
        .as_deref()
        .or(defaults.category.as_deref())
        .unwrap_or(DEFAULT_CATEGORY)
        .trim()
        .to_string();
    if category.is_empty() {
        bail!("Glossary category must not be empty");
    }

    let glossary_db = options
        .glossary_db
        .clone()
        .or_else(|| defaults.glossary_db.clone())
        .unwrap_or_else(paths::default_glossary_path);

    let google_config = &config_file.engines.google;
    let chunk_size = google_config.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
    if chunk_size == 0 {
        bail!(
            "Invalid configuration: 'engines.google.chunk_size' must be positive\n\n\
             Fix it in ~/.config/doctl/config.toml"
        );
    }
    let google = GoogleSettings {
        endpoint: google_config
            .endpoint
            .clone()
            .unwrap_or_else(|| GOOGLE_DEFAULT_ENDPOINT.to_string()),
        timeout: timeout(google_config.timeout_secs, "engines.google.timeout_secs")?,
        chunk_size,
    };

    let deepl_config = &config_file.engines.deepl;
    let api_key = options
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| deepl_config.get_api_key());
    let deepl = match api_key {
        Some(api_key) => Some(DeepLSettings {
            endpoint: deepl_config
                .endpoint
                .clone()
                .unwrap_or_else(|| DEEPL_DEFAULT_ENDPOINT.to_string()),
            api_key,
            timeout: timeout(deepl_config.timeout_secs, "engines.deepl.timeout_secs")?,
        }),
        None => None,
    };

    let mut engine = options.engine.or(defaults.engine).unwrap_or_default();
    if engine == EngineKind::Deepl && deepl.is_none() {
        let env_var = deepl_config
            .api_key_env
            .as_deref()
            .unwrap_or(DEFAULT_DEEPL_KEY_ENV);
        eprintln!(
            "{} DeepL needs an API key (--key, {env_var}, or engines.deepl.api_key)\n\
             Falling back to Google.\n",
            Style::warning("Warning:"),
        );
        engine = EngineKind::Google;
    }

    Ok(ResolvedConfig {
        engine,
        source_language,
        target_language,
        category,
        glossary_db,
        google,
        deepl,
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Configuration is stored at `$XDG_CONFIG_HOME/doctl/config.toml`
    /// or `~/.config/doctl/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Self {
        Self {
            config_path: paths::config_dir().join("config.toml"),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
        crate::fs::atomic_write(&self.config_path, contents.as_bytes())
    }

    /// Loads the config file; a missing file yields defaults, a broken one
    /// is an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
