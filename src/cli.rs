// CLI module for argument parsing and configuration
use crate::api::{normalize_base_url, DEFAULT_BASE_URL};
use crate::config::UserConfig;
use crate::domain::EntityKind;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Holonet - browse Star Wars planets, films and starships from the terminal
///
/// Type to search, swipe (→ or mouse drag) or press Enter to open details.
#[derive(Parser, Debug, Clone)]
#[command(name = "holonet")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// List shown at startup
    #[arg(short = 's', long = "start", value_enum)]
    pub start: Option<EntityArg>,

    /// API base URL the collection endpoints live under
    ///
    /// Example: --base-url https://swapi.dev/api/
    #[arg(short = 'u', long = "base-url")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 't', long = "timeout")]
    pub timeout_secs: Option<u64>,

    /// Disable the row entry animation
    #[arg(long = "no-animations", action = ArgAction::SetTrue)]
    pub no_animations: bool,

    /// Write logs to this file instead of the default cache location
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Persist the effective settings to the config file
    #[arg(long = "save-config", action = ArgAction::SetTrue)]
    pub save_config: bool,
}

/// Entity list options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityArg {
    Planets,
    Films,
    Starships,
}

impl From<EntityArg> for EntityKind {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Planets => EntityKind::Planets,
            EntityArg::Films => EntityKind::Films,
            EntityArg::Starships => EntityKind::Starships,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref url) = self.base_url {
            normalize_base_url(url).map_err(|e| e.to_string())?;
        }

        if self.timeout_secs == Some(0) {
            return Err("Timeout must be at least 1 second".to_string());
        }

        Ok(())
    }
}

/// Effective settings after layering defaults, the config file and flags
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub start: EntityKind,
    pub animations: bool,
    pub timeout: Duration,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
    /// Show the help overlay when the app opens
    pub show_help: bool,
}

impl AppConfig {
    /// Flags win over the config file, which wins over built-in defaults
    pub fn resolve(args: &Args, user: &UserConfig) -> Self {
        AppConfig {
            base_url: args
                .base_url
                .clone()
                .or_else(|| user.base_url.clone())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            start: args
                .start
                .map(EntityKind::from)
                .or(user.start)
                .unwrap_or_default(),
            animations: !args.no_animations && user.animations.unwrap_or(true),
            timeout: Duration::from_secs(
                args.timeout_secs
                    .or(user.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            log_file: args.log_file.clone(),
            verbose: args.verbose,
            show_help: !user.help_shown,
        }
    }

    /// Copies the persistable settings into a user config
    pub fn store_into(&self, user: &mut UserConfig) {
        user.base_url = Some(self.base_url.clone());
        user.start = Some(self.start);
        user.animations = Some(self.animations);
        user.timeout_secs = Some(self.timeout.as_secs());
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            start: EntityKind::Planets,
            animations: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: None,
            verbose: false,
            show_help: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_args() -> Args {
        Args {
            start: None,
            base_url: None,
            timeout_secs: None,
            no_animations: false,
            log_file: None,
            verbose: false,
            save_config: false,
        }
    }

    mod args_tests {
        use super::*;

        #[test]
        fn test_parse_from_flags() {
            let args = Args::try_parse_from([
                "holonet",
                "--start",
                "films",
                "--base-url",
                "http://localhost:9000/api",
                "-t",
                "3",
                "--no-animations",
            ])
            .unwrap();
            assert_eq!(args.start, Some(EntityArg::Films));
            assert_eq!(args.base_url.as_deref(), Some("http://localhost:9000/api"));
            assert_eq!(args.timeout_secs, Some(3));
            assert!(args.no_animations);
        }

        #[test]
        fn test_unknown_entity_rejected() {
            assert!(Args::try_parse_from(["holonet", "--start", "droids"]).is_err());
        }

        #[test]
        fn test_entity_conversion() {
            assert_eq!(EntityKind::from(EntityArg::Planets), EntityKind::Planets);
            assert_eq!(EntityKind::from(EntityArg::Films), EntityKind::Films);
            assert_eq!(EntityKind::from(EntityArg::Starships), EntityKind::Starships);
        }

        #[test]
        fn test_validate_bad_base_url() {
            let args = Args {
                base_url: Some("swapi".to_string()),
                ..bare_args()
            };
            let result = args.validate();
            assert!(result.is_err());
            assert!(result.unwrap_err().contains("Invalid base URL"));
        }

        #[test]
        fn test_validate_zero_timeout() {
            let args = Args {
                timeout_secs: Some(0),
                ..bare_args()
            };
            assert!(args.validate().unwrap_err().contains("Timeout"));
        }

        #[test]
        fn test_validate_success() {
            let args = Args {
                base_url: Some("https://swapi.dev/api/".to_string()),
                timeout_secs: Some(5),
                ..bare_args()
            };
            assert!(args.validate().is_ok());
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_defaults_when_nothing_set() {
            let config = AppConfig::resolve(&bare_args(), &UserConfig::default());
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.start, EntityKind::Planets);
            assert!(config.animations);
            assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
            assert!(config.show_help);
        }

        #[test]
        fn test_user_config_over_defaults() {
            let user = UserConfig {
                base_url: Some("http://mirror/api/".to_string()),
                start: Some(EntityKind::Starships),
                animations: Some(false),
                timeout_secs: Some(2),
                help_shown: true,
            };
            let config = AppConfig::resolve(&bare_args(), &user);
            assert_eq!(config.base_url, "http://mirror/api/");
            assert_eq!(config.start, EntityKind::Starships);
            assert!(!config.animations);
            assert_eq!(config.timeout, Duration::from_secs(2));
            assert!(!config.show_help);
        }

        #[test]
        fn test_flags_over_user_config() {
            let user = UserConfig {
                start: Some(EntityKind::Starships),
                timeout_secs: Some(2),
                ..UserConfig::default()
            };
            let args = Args {
                start: Some(EntityArg::Films),
                timeout_secs: Some(7),
                no_animations: true,
                ..bare_args()
            };
            let config = AppConfig::resolve(&args, &user);
            assert_eq!(config.start, EntityKind::Films);
            assert_eq!(config.timeout, Duration::from_secs(7));
            assert!(!config.animations);
        }

        #[test]
        fn test_store_into_round_trips() {
            let config = AppConfig {
                start: EntityKind::Films,
                animations: false,
                ..AppConfig::default()
            };
            let mut user = UserConfig::default();
            config.store_into(&mut user);
            let again = AppConfig::resolve(&bare_args(), &user);
            assert_eq!(again.start, EntityKind::Films);
            assert!(!again.animations);
            assert_eq!(again.base_url, DEFAULT_BASE_URL);
        }
    }
}
