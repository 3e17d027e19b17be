//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ColumnSchema;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the member CSV comes from
    #[serde(default)]
    pub source: SourceConfig,

    /// Avatar resolution settings
    #[serde(default)]
    pub avatar: AvatarConfig,

    /// Field name to column index mapping
    #[serde(default)]
    pub columns: ColumnSchema,

    /// Row splitting behavior
    #[serde(default)]
    pub parser: ParserConfig,

    /// Display order of members
    #[serde(default)]
    pub ordering: OrderingConfig,

    /// Markup and output settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.location.trim().is_empty() {
            return Err(AppError::validation("source.location is empty"));
        }
        if self.source.user_agent.trim().is_empty() {
            return Err(AppError::validation("source.user_agent is empty"));
        }
        if self.source.timeout_secs == Some(0) {
            return Err(AppError::validation("source.timeout_secs must be > 0"));
        }
        if self.avatar.gravatar_url.trim().is_empty() {
            return Err(AppError::validation("avatar.gravatar_url is empty"));
        }
        if self.avatar.fallback_url.is_none() && self.avatar.placeholder_url.trim().is_empty() {
            return Err(AppError::validation("avatar.placeholder_url is empty"));
        }
        if self.render.target.trim().is_empty() {
            return Err(AppError::validation("render.target is empty"));
        }
        self.columns.validate()
    }
}

/// Data source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// File path or URL of the member CSV
    #[serde(default = "defaults::location")]
    pub location: String,

    /// Base URL that relative locations are resolved against
    #[serde(default)]
    pub base_url: Option<String>,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; unset means wait indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: defaults::location(),
            base_url: None,
            user_agent: defaults::user_agent(),
            timeout_secs: None,
        }
    }
}

/// Avatar resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Global allow flag; only the literal "1" enables gravatars
    #[serde(default = "defaults::allow_global")]
    pub allow_global: Option<String>,

    /// Base URL the member email is appended to
    #[serde(default = "defaults::gravatar_url")]
    pub gravatar_url: String,

    /// Base URL of the generated placeholder service
    #[serde(default = "defaults::placeholder_url")]
    pub placeholder_url: String,

    /// Static fallback image; when unset a placeholder is generated
    #[serde(default)]
    pub fallback_url: Option<String>,

    /// Hash the email (SHA-256) instead of appending it verbatim
    #[serde(default)]
    pub hash_email: bool,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            allow_global: defaults::allow_global(),
            gravatar_url: defaults::gravatar_url(),
            placeholder_url: defaults::placeholder_url(),
            fallback_url: None,
            hash_email: false,
        }
    }
}

/// How the final line of the input is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingRow {
    /// Always discard the last line, blank or not
    #[default]
    Always,
    /// Discard the last line only when it is blank
    IfBlank,
}

/// Row splitting settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub trailing_row: TrailingRow,
}

/// Rule deciding which members are listed first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Active and Applicant members first
    #[default]
    ActiveFirst,
    /// Everyone except Inactive members first
    NonInactiveFirst,
}

impl std::str::FromStr for OrderingPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "active_first" => Ok(Self::ActiveFirst),
            "non_inactive_first" => Ok(Self::NonInactiveFirst),
            other => Err(AppError::config(format!("Unknown ordering policy '{other}'"))),
        }
    }
}

/// Ordering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderingConfig {
    #[serde(default)]
    pub policy: OrderingPolicy,
}

/// How markup reaches the display sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Write the whole markup in one replace
    #[default]
    Replace,
    /// Clear the container, then append card by card
    Append,
}

/// Rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Name of the container element receiving the cards
    #[serde(default = "defaults::target")]
    pub target: String,

    #[serde(default)]
    pub mode: RenderMode,

    /// Show the "Current Member" / "Former Member" label
    #[serde(default = "defaults::enabled")]
    pub show_status: bool,

    /// HTML-escape member-supplied text
    #[serde(default = "defaults::enabled")]
    pub escape_html: bool,

    /// Optional page template containing `{{target}}` placeholders
    #[serde(default)]
    pub template: Option<String>,

    /// Path the rendered page is written to
    #[serde(default = "defaults::output")]
    pub output: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target: defaults::target(),
            mode: RenderMode::default(),
            show_status: true,
            escape_html: true,
            template: None,
            output: defaults::output(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "defaults::level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::level(),
        }
    }
}

mod defaults {
    // Source defaults
    pub fn location() -> String {
        "./Members.csv".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; member-viewer/0.1)".into()
    }

    // Avatar defaults
    pub fn allow_global() -> Option<String> {
        Some("0".into())
    }
    pub fn gravatar_url() -> String {
        "https://www.gravatar.com/avatar/".into()
    }
    pub fn placeholder_url() -> String {
        "https://eu.ui-avatars.com/api/".into()
    }

    // Render defaults
    pub fn target() -> String {
        "membersPlaceHolder".into()
    }
    pub fn output() -> String {
        "members.html".into()
    }
    pub fn enabled() -> bool {
        true
    }

    pub fn level() -> String {
        "info".into()
    }
}
