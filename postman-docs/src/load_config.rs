/// `load_config` module: Loads the static YAML config and injects the API credential from the environment.
///
/// This module is the only place where user-supplied YAML is parsed and mapped to the core crate's types.
///
/// # Responsibilities
/// - Parse the config file into [`CliConfig`]
/// - Reject empty required settings with a message naming the key
/// - Read the publishing credential from `README_API_KEY` (never from the file)
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::{anyhow, bail, Result};
use postman_docs_core::generate::{GenerateConfig, DEFAULT_MAX_PAGE_DEPTH};
use postman_docs_core::synchronise::SynchroniseConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info};

/// Environment variable holding the docs host credential.
pub const API_KEY_ENV: &str = "README_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
pub struct CliConfig {
    pub generate: GenerateSection,
    #[serde(default)]
    pub publish: Option<PublishSection>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateSection {
    pub source_file: PathBuf,
    pub output_dir: PathBuf,
    pub prefix: String,
    pub link_base: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_max_page_depth")]
    pub max_page_depth: usize,
}

#[derive(Debug, Deserialize)]
pub struct PublishSection {
    pub endpoint: String,
    pub category_slug: String,
    pub version: String,
    pub manifest_file: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Everything needed to publish, with the credential resolved.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub endpoint: String,
    pub api_key: String,
    pub version: String,
    pub manifest_file: PathBuf,
    pub timeout: Duration,
    pub synchronise: SynchroniseConfig,
}

fn default_max_page_depth() -> usize {
    DEFAULT_MAX_PAGE_DEPTH
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl GenerateSection {
    pub fn to_generate_config(&self) -> GenerateConfig {
        GenerateConfig {
            output_dir: self.output_dir.clone(),
            prefix: self.prefix.clone(),
            link_base: self.link_base.clone(),
            base_url: self.base_url.clone(),
            max_page_depth: self.max_page_depth,
        }
    }
}

/// Loads and validates the YAML config file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow!("Failed to read config file {:?}: {}", path_ref, e));
        }
    };

    let config: CliConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    validate(&config)?;
    debug!(?config, "Config loaded (full debug)");
    Ok(config)
}

fn validate(config: &CliConfig) -> Result<()> {
    let generate = &config.generate;
    require("generate.source_file", generate.source_file.as_os_str().is_empty())?;
    require("generate.output_dir", generate.output_dir.as_os_str().is_empty())?;
    require("generate.prefix", generate.prefix.trim().is_empty())?;
    require("generate.link_base", generate.link_base.trim().is_empty())?;
    if generate.max_page_depth == 0 {
        bail!("generate.max_page_depth must be at least 1");
    }

    if let Some(publish) = &config.publish {
        require("publish.endpoint", publish.endpoint.trim().is_empty())?;
        require("publish.category_slug", publish.category_slug.trim().is_empty())?;
        require("publish.version", publish.version.trim().is_empty())?;
        require("publish.manifest_file", publish.manifest_file.as_os_str().is_empty())?;
    }
    Ok(())
}

fn require(key: &str, missing: bool) -> Result<()> {
    if missing {
        error!(key, "Required setting is empty");
        bail!("Configuration error: {key} is required");
    }
    Ok(())
}

/// Resolves the publish settings, failing when the section or the credential is absent.
pub fn publish_config(config: &CliConfig) -> Result<PublishConfig> {
    let Some(publish) = &config.publish else {
        error!("No publish section in config");
        bail!("Configuration error: the publish section is required to sync");
    };

    let api_key = match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => {
            info!("{API_KEY_ENV} found in env");
            key
        }
        Ok(_) | Err(_) => {
            error!("{API_KEY_ENV} environment variable not set");
            bail!("Configuration error: {API_KEY_ENV} environment variable is required to sync");
        }
    };

    Ok(PublishConfig {
        endpoint: publish.endpoint.trim_end_matches('/').to_owned(),
        api_key,
        version: publish.version.clone(),
        manifest_file: publish.manifest_file.clone(),
        timeout: Duration::from_secs(publish.timeout_secs),
        synchronise: SynchroniseConfig {
            category_slug: publish.category_slug.clone(),
        },
    })
}
