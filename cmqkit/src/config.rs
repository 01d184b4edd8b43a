//! Configuration management

use cmqkit_core::StatusTables;
use cmqkit_queue::QueueParams;
use cmqkit_topic::TopicParams;
use serde::Deserialize;

use crate::endpoint::EndpointConfig;

/// Environment variable prefix, e.g. `CMQKIT_ENDPOINT__REGION=gz`
pub const ENV_PREFIX: &str = "CMQKIT";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Parameters used when `assert_queue` has to create a queue
    #[serde(default)]
    pub queue: QueueParams,

    /// Parameters used when `assert_topic` has to create a topic
    #[serde(default)]
    pub topic: TopicParams,

    /// Status-code tables, per resource kind
    #[serde(default)]
    pub status: StatusTables,
}

impl Config {
    /// Load configuration from an optional `cmqkit` file and the environment
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from("cmqkit")
    }

    /// Like [`Config::load`] with a different file base name
    pub fn load_from(file: &str) -> anyhow::Result<Self> {
        let config = ::config::Config::builder()
            .add_source(::config::File::with_name(file).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize::<Config>()?)
    }

    /// Parse configuration from TOML text, ignoring the environment
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config = ::config::Config::builder()
            .add_source(::config::File::from_str(text, ::config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize::<Config>()?)
    }
}
