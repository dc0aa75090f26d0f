//! Client configuration management.
//!
//! Merges command line flags with environment variables and validates the
//! result. Flags always win over the environment.

use morse_game::Vocabulary;
use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

/// Ticks per second when nothing else is configured.
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Highest accepted tick rate.
pub const MAX_TICK_RATE: u32 = 240;

/// Where symbols come from
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SourceConfig {
    /// TCP bridge in front of the hardware decoder
    Connect(SocketAddr),
    /// Character device such as a USB serial port
    Device(PathBuf),
    /// File holding a recorded symbol transcript
    Replay(PathBuf),
}

/// Raw command line flags, before the environment is consulted
#[derive(Clone, Debug, Default)]
pub struct CliArgs {
    pub connect: Option<SocketAddr>,
    pub device: Option<PathBuf>,
    pub replay: Option<PathBuf>,
    pub words: Option<String>,
    pub tick_rate: Option<u32>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub headless: bool,
    pub json: bool,
}

/// Complete client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Symbol source
    pub source: SourceConfig,
    /// Words a round can be played against
    pub vocabulary: Vocabulary,
    /// Game loop ticks per second
    pub tick_rate: u32,
    /// Seed for reproducible word selection
    pub seed: Option<u64>,
    /// Log destination; TUI mode doesn't log without one
    pub log_file: Option<PathBuf>,
    /// Run without the terminal UI
    pub headless: bool,
    /// Print the final round as JSON in headless mode
    pub json: bool,
}

impl ClientConfig {
    /// Load configuration from flags with environment fallbacks
    ///
    /// # Errors
    ///
    /// Returns error if no symbol source is given, more than one is given,
    /// or any value fails to parse
    pub fn from_env(args: CliArgs) -> Result<Self, ConfigError> {
        let connect = match args.connect {
            Some(addr) => Some(addr),
            None => parse_env("MORSE_LINK_ADDR")?,
        };
        let device = args
            .device
            .or_else(|| std::env::var("MORSE_DEVICE").ok().map(PathBuf::from));

        let mut sources: Vec<SourceConfig> = [
            connect.map(SourceConfig::Connect),
            device.map(SourceConfig::Device),
            args.replay.map(SourceConfig::Replay),
        ]
        .into_iter()
        .flatten()
        .collect();

        let source = match sources.len() {
            0 => {
                return Err(ConfigError::MissingRequired {
                    var: "MORSE_LINK_ADDR".to_string(),
                    hint: "Pass --connect IP:PORT, --device PATH or --replay FILE".to_string(),
                });
            }
            1 => sources.remove(0),
            _ => {
                return Err(ConfigError::Invalid {
                    var: "--connect/--device/--replay".to_string(),
                    reason: "Only one symbol source can be used at a time".to_string(),
                });
            }
        };

        let vocabulary = match args.words.or_else(|| std::env::var("MORSE_WORDS").ok()) {
            Some(words) => words
                .parse::<Vocabulary>()
                .map_err(|e| ConfigError::Invalid {
                    var: "MORSE_WORDS".to_string(),
                    reason: e.to_string(),
                })?,
            None => Vocabulary::default(),
        };

        let tick_rate = args
            .tick_rate
            .unwrap_or_else(|| parse_env_or("MORSE_TICK_RATE", DEFAULT_TICK_RATE));

        let seed = match args.seed {
            Some(seed) => Some(seed),
            None => parse_env("MORSE_SEED")?,
        };

        let log_file = args
            .log_file
            .or_else(|| std::env::var("MORSE_LOG_FILE").ok().map(PathBuf::from));

        Ok(ClientConfig {
            source,
            vocabulary,
            tick_rate,
            seed,
            log_file,
            headless: args.headless,
            json: args.json,
        })
    }

    /// Validate configuration after loading
    ///
    /// # Errors
    ///
    /// Returns error if the tick rate is out of range or `--json` is used
    /// without `--headless`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 || self.tick_rate > MAX_TICK_RATE {
            return Err(ConfigError::Invalid {
                var: "MORSE_TICK_RATE".to_string(),
                reason: format!("Must be between 1 and {MAX_TICK_RATE}"),
            });
        }

        if self.json && !self.headless {
            return Err(ConfigError::Invalid {
                var: "--json".to_string(),
                reason: "Only available together with --headless".to_string(),
            });
        }

        Ok(())
    }

    /// Time between two game loop ticks
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Helper to parse an optional environment variable, rejecting bad values
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(value) => value.parse().map(Some).map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("Can't parse {value:?}"),
        }),
        Err(_) => Ok(None),
    }
}
