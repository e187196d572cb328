//! Site configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "nodecms.toml";

/// Main configuration structure for nodecms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Component types to register. Empty registers every built-in.
    #[serde(default)]
    pub components: Vec<String>,

    /// Content discovery settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Collection overview settings.
    #[serde(default)]
    pub collections: CollectionsConfig,

    /// Development server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Where content lives and which files are pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content root directory. Output paths mirror paths below it.
    #[serde(default = "default_base")]
    pub base: String,

    /// Glob matched against paths relative to `base`.
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Stylesheet path relative to the output directory.
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,

    /// Custom stylesheet copied to `stylesheet` instead of the built-in one.
    #[serde(default)]
    pub stylesheet_source: Option<String>,

    /// Syntax highlighting theme name.
    #[serde(default = "default_syntax_theme")]
    pub syntax_theme: String,
}

/// Collections rendered as overview pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionsConfig {
    /// Directory holding one subdirectory per collection.
    #[serde(default = "default_collections_root")]
    pub root: String,

    /// Collections that get an overview page.
    #[serde(default)]
    pub names: Vec<String>,
}

/// Development server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_base() -> String {
    "pages".to_string()
}

fn default_pattern() -> String {
    "**/*.json".to_string()
}

fn default_output_dir() -> String {
    "dist".to_string()
}

fn default_stylesheet() -> String {
    "assets/styles.css".to_string()
}

fn default_syntax_theme() -> String {
    "base16-ocean.dark".to_string()
}

fn default_collections_root() -> String {
    "collections".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            pattern: default_pattern(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            stylesheet: default_stylesheet(),
            stylesheet_source: None,
            syntax_theme: default_syntax_theme(),
        }
    }
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            root: default_collections_root(),
            names: Vec::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration, layering `NODECMS__SECTION__KEY` environment
    /// variables over the file. A missing file yields the defaults.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file found, using defaults");
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("NODECMS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("components")
                    .with_list_parse_key("collections.names")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.content.base.trim().is_empty() {
            return Err(CoreError::config("content.base cannot be empty"));
        }

        if self.content.pattern.trim().is_empty() {
            return Err(CoreError::config("content.pattern cannot be empty"));
        }

        glob::Pattern::new(&self.content.pattern).map_err(|e| {
            CoreError::config_with_source(
                format!("content.pattern is not a valid glob: {}", self.content.pattern),
                e,
            )
        })?;

        if self.build.output_dir.trim().is_empty() {
            return Err(CoreError::config("build.output_dir cannot be empty"));
        }

        if self.build.stylesheet.starts_with('/') {
            tracing::warn!("build.stylesheet should be relative to the output directory");
        }

        Ok(())
    }

    /// Content root directory.
    pub fn content_dir(&self) -> PathBuf {
        PathBuf::from(&self.content.base)
    }

    /// Output root directory.
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.build.output_dir)
    }

    /// Collections root directory.
    pub fn collections_dir(&self) -> PathBuf {
        PathBuf::from(&self.collections.root)
    }

    /// Public URL of the stylesheet.
    pub fn stylesheet_href(&self) -> String {
        format!("/{}", self.build.stylesheet.trim_start_matches('/'))
    }

    /// Socket address string for the development server.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
