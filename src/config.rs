use std::{ffi::OsString, fmt, path::PathBuf};

use clap::{Parser, builder::FalseyValueParser, error::ErrorKind};
use dotenvy::dotenv;
use serde::Deserialize;

use crate::error::SyncError;

pub const DEFAULT_SENDGRID_API_URL: &str = "https://api.sendgrid.com";

/// Values supplied by the hosting automation environment.
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "github_workspace")]
    pub workspace: String,

    pub sendgrid_api_key: String,

    #[serde(default = "default_api_url")]
    pub sendgrid_api_url: String,

    #[serde(default = "default_timeout_seconds")]
    pub sendgrid_timeout_seconds: u64,
}

fn default_api_url() -> String {
    DEFAULT_SENDGRID_API_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Config {
    /// Process environment, after loading an optional `.env` file.
    pub fn environment() -> Vec<(String, String)> {
        dotenv().ok();

        std::env::vars().collect()
    }

    pub fn from_iter<I>(vars: I) -> Result<Self, SyncError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Self>(vars).map_err(|e| match e {
            envy::Error::MissingValue(name) => SyncError::configuration(format!(
                "Missing environment variable {}",
                name.to_uppercase()
            )),
            envy::Error::Custom(message) => SyncError::configuration(format!(
                "Invalid environment variable: {}",
                message
            )),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SyncError> {
        if self.workspace.trim().is_empty() {
            return Err(SyncError::configuration(
                "GITHUB_WORKSPACE is set but empty",
            ));
        }

        if self.sendgrid_api_key.trim().is_empty() {
            return Err(SyncError::configuration(
                "SENDGRID_API_KEY is set but empty",
            ));
        }

        if self.sendgrid_timeout_seconds == 0 {
            return Err(SyncError::configuration(
                "SENDGRID_TIMEOUT_SECONDS must be greater than zero",
            ));
        }

        Ok(())
    }

    pub fn workspace_path(&self) -> PathBuf {
        PathBuf::from(&self.workspace)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("workspace", &self.workspace)
            .field("sendgrid_api_key", &"<redacted>")
            .field("sendgrid_api_url", &self.sendgrid_api_url)
            .field("sendgrid_timeout_seconds", &self.sendgrid_timeout_seconds)
            .finish()
    }
}

/// Invocation parameters. Each may be passed as a flag or through the
/// host's `INPUT_*` variables.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "template-sync", version, about = "Sync local email templates with SendGrid dynamic template versions")]
pub struct SyncOptions {
    /// Manifest file, relative to the workspace root
    #[arg(long, env = "INPUT_MANIFEST")]
    pub manifest: Option<String>,

    /// Environment whose template ids are synced
    #[arg(long, env = "INPUT_ENVIRONMENT")]
    pub environment: Option<String>,

    /// Fetch and plan only, without creating or activating versions
    #[arg(
        long,
        env = "INPUT_DRY_RUN",
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = FalseyValueParser::new()
    )]
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn from_args() -> Result<Self, SyncError> {
        Self::try_from_args(std::env::args_os())
    }

    /// Parses invocation arguments; anything but help or version output
    /// becomes a configuration error.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, SyncError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(options) => Ok(options),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => Err(SyncError::configuration(format!(
                "Invalid input: {}",
                e.render().to_string().trim()
            ))),
        }
    }

    pub fn manifest(&self) -> Result<&str, SyncError> {
        required(self.manifest.as_deref(), "manifest")
    }

    pub fn environment(&self) -> Result<&str, SyncError> {
        required(self.environment.as_deref(), "environment")
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, SyncError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SyncError::configuration(format!(
            "Input required and not supplied: {}",
            name
        ))),
    }
}
