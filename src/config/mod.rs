mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_DEEPL_KEY_ENV, DEFAULT_SOURCE_LANGUAGE,
    DEFAULT_TARGET_LANGUAGE, DeepLConfig, DeepLSettings, DoctlConfig, EnginesConfig, GoogleConfig,
    GoogleSettings, ResolveOptions, ResolvedConfig, resolve_config,
};
