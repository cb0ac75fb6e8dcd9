//! Bot configuration with documented defaults
//!
//! Every knob is read once at startup. The resulting `BotConfig` is passed
//! by reference to the transport and the tick loop; nothing here is global.

use std::time::Duration;

use crate::core::error::{BotError, Result};

/// Production contest endpoint
pub const DEFAULT_GAME_SERVER: &str = "https://contest.2021-autumn.gbc.tenka1.klab.jp";

/// Placeholder token; the server rejects it with a non-"ok" status
pub const DEFAULT_TOKEN: &str = "YOUR_TOKEN";

/// How the driver reacts when a tick fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Any error ends the loop
    Fatal,
    /// Transport and protocol errors are retried, game status errors are not
    ///
    /// `backoff` is the first delay; it doubles with each consecutive failure
    /// and the budget resets after a successful tick.
    RetryTransient { max_retries: u32, backoff: Duration },
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self::Fatal
    }
}

impl ErrorPolicy {
    /// Delay before retry number `attempt` (1-based), or `None` when the
    /// error must end the loop
    pub fn retry_delay(&self, error: &BotError, attempt: u32) -> Option<Duration> {
        match *self {
            ErrorPolicy::Fatal => None,
            ErrorPolicy::RetryTransient { max_retries, backoff } => {
                if !error.is_transient() || attempt > max_retries {
                    return None;
                }
                let shift = attempt.saturating_sub(1).min(16);
                Some(backoff.saturating_mul(1u32 << shift))
            }
        }
    }
}

/// Configuration for the collector bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Base URL of the game server, without a trailing slash
    pub game_server: String,

    /// Access token embedded in every request path
    pub token: String,

    /// Pause after each tick
    ///
    /// The loop does not subtract processing time, so the real period is
    /// this interval plus fetch, decision and dispatch time.
    pub tick_interval: Duration,

    /// Number of collection units the server assigns to a player
    pub unit_count: usize,

    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,

    pub error_policy: ErrorPolicy,

    /// Seed for the assignment RNG; `None` seeds from the wall clock
    pub seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            game_server: DEFAULT_GAME_SERVER.into(),
            token: DEFAULT_TOKEN.into(),
            tick_interval: Duration::from_millis(1000),
            unit_count: 5,
            request_timeout: None,
            error_policy: ErrorPolicy::Fatal,
            seed: None,
        }
    }
}

impl BotConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from process environment variables
    ///
    /// Recognised: GAME_SERVER, TOKEN, TICK_INTERVAL_MS, UNIT_COUNT,
    /// REQUEST_TIMEOUT_MS, TRANSIENT_RETRIES, RETRY_BACKOFF_MS, BOT_SEED.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(server) = get("GAME_SERVER") {
            config.game_server = server.trim().to_string();
        }
        if let Some(token) = get("TOKEN") {
            config.token = token.trim().to_string();
        }
        if let Some(ms) = get("TICK_INTERVAL_MS") {
            config.tick_interval = Duration::from_millis(parse_number("TICK_INTERVAL_MS", &ms)?);
        }
        if let Some(count) = get("UNIT_COUNT") {
            config.unit_count = parse_number("UNIT_COUNT", &count)?;
        }
        if let Some(ms) = get("REQUEST_TIMEOUT_MS") {
            config.request_timeout =
                Some(Duration::from_millis(parse_number("REQUEST_TIMEOUT_MS", &ms)?));
        }

        let retries: u32 = match get("TRANSIENT_RETRIES") {
            Some(v) => parse_number("TRANSIENT_RETRIES", &v)?,
            None => 0,
        };
        let backoff_ms: u64 = match get("RETRY_BACKOFF_MS") {
            Some(v) => parse_number("RETRY_BACKOFF_MS", &v)?,
            None => 500,
        };
        if retries > 0 {
            config.error_policy = ErrorPolicy::RetryTransient {
                max_retries: retries,
                backoff: Duration::from_millis(backoff_ms),
            };
        }

        if let Some(seed) = get("BOT_SEED") {
            config.seed = Some(parse_number("BOT_SEED", &seed)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency, normalising the server URL
    pub fn validate(&mut self) -> Result<()> {
        while self.game_server.ends_with('/') {
            self.game_server.pop();
        }
        if self.game_server.is_empty() {
            return Err(BotError::Config("game server URL is empty".into()));
        }
        if self.token.is_empty() {
            return Err(BotError::Config("token is empty".into()));
        }
        if self.unit_count == 0 {
            return Err(BotError::Config("unit_count must be at least 1".into()));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| BotError::Config(format!("{} is not a valid number: {:?}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = BotConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.game_server, DEFAULT_GAME_SERVER);
        assert_eq!(config.token, DEFAULT_TOKEN);
        assert_eq!(config.tick_interval, Duration::from_millis(1000));
        assert_eq!(config.unit_count, 5);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.error_policy, ErrorPolicy::Fatal);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_environment_overrides() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("GAME_SERVER", "http://localhost:8080/staging/"),
            ("TOKEN", "abc123"),
            ("TICK_INTERVAL_MS", "250"),
            ("REQUEST_TIMEOUT_MS", "3000"),
            ("BOT_SEED", "42"),
        ]))
        .unwrap();
        assert_eq!(config.game_server, "http://localhost:8080/staging");
        assert_eq!(config.token, "abc123");
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.request_timeout, Some(Duration::from_millis(3000)));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let config = BotConfig::from_lookup(lookup_from(&[("TOKEN", ""), ("GAME_SERVER", "  ")]))
            .unwrap();
        assert_eq!(config.token, DEFAULT_TOKEN);
        assert_eq!(config.game_server, DEFAULT_GAME_SERVER);
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let result = BotConfig::from_lookup(lookup_from(&[("UNIT_COUNT", "five")]));
        assert!(matches!(result, Err(BotError::Config(_))));
    }

    #[test]
    fn test_zero_units_rejected() {
        let result = BotConfig::from_lookup(lookup_from(&[("UNIT_COUNT", "0")]));
        assert!(matches!(result, Err(BotError::Config(_))));
    }

    #[test]
    fn test_retry_policy_from_environment() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("TRANSIENT_RETRIES", "3"),
            ("RETRY_BACKOFF_MS", "100"),
        ]))
        .unwrap();
        assert_eq!(
            config.error_policy,
            ErrorPolicy::RetryTransient {
                max_retries: 3,
                backoff: Duration::from_millis(100)
            }
        );
    }

    #[test]
    fn test_retry_delay_doubles_and_stops() {
        let policy = ErrorPolicy::RetryTransient {
            max_retries: 3,
            backoff: Duration::from_millis(100),
        };
        let err = BotError::Transport("connection reset".into());
        assert_eq!(policy.retry_delay(&err, 1), Some(Duration::from_millis(100)));
        assert_eq!(policy.retry_delay(&err, 2), Some(Duration::from_millis(200)));
        assert_eq!(policy.retry_delay(&err, 3), Some(Duration::from_millis(400)));
        assert_eq!(policy.retry_delay(&err, 4), None);
    }

    #[test]
    fn test_game_status_never_retried() {
        let policy = ErrorPolicy::RetryTransient {
            max_retries: 10,
            backoff: Duration::from_millis(1),
        };
        let err = BotError::GameStatus("game_finished".into());
        assert_eq!(policy.retry_delay(&err, 1), None);
        assert_eq!(ErrorPolicy::Fatal.retry_delay(&BotError::Transport("x".into()), 1), None);
    }
}
