//! Runtime configuration for nodes and the observer.
//!
//! Every knob has a default tuned for a small local cluster; the binary
//! overrides them from environment variables via [`ElectionConfig::from_env`].

use std::time::Duration;

pub const ENV_TICK_MS: &str = "ELECTION_TICK_MS";
pub const ENV_JITTER_MS: &str = "ELECTION_JITTER_MS";
pub const ENV_FAILURE_PROBABILITY: &str = "ELECTION_FAILURE_PROBABILITY";
pub const ENV_RECOVERY_MS: &str = "ELECTION_RECOVERY_MS";
pub const ENV_RPC_TIMEOUT_MS: &str = "ELECTION_RPC_TIMEOUT_MS";
pub const ENV_PRIORITY_RANGE: &str = "ELECTION_PRIORITY_RANGE";
pub const ENV_MAX_RETRIES: &str = "ELECTION_MAX_RETRIES";
pub const ENV_OBSERVER_MS: &str = "ELECTION_OBSERVER_MS";
pub const ENV_LOG: &str = "ELECTION_LOG";

/// Filter used when `ELECTION_LOG` is unset or blank.
pub const DEFAULT_LOG_DIRECTIVE: &str = "info";

/// Log filter directive for the binary, e.g. `debug` or `info,bully_cluster::election=trace`.
pub fn log_directive() -> String {
    log_directive_or_default(std::env::var(ENV_LOG).ok())
}

fn log_directive_or_default(raw: Option<String>) -> String {
    match raw.as_deref().map(str::trim) {
        Some(directive) if !directive.is_empty() => directive.to_string(),
        _ => DEFAULT_LOG_DIRECTIVE.to_string(),
    }
}

/// Tunables shared by the monitor loop, failure injector, RPC clients and observer.
#[derive(Debug, Clone)]
pub struct ElectionConfig {
    /// Minimum delay between two monitor ticks.
    pub tick_base: Duration,
    /// Upper bound of the random delay added on top of `tick_base`.
    pub tick_jitter: Duration,
    /// Chance that an alive node crashes on a given tick.
    pub failure_probability: f64,
    /// How long a crashed node stays dead before healing itself.
    pub recovery_window: Duration,
    /// Deadline applied to every outbound registry or node call.
    pub rpc_timeout: Duration,
    /// Priorities are sampled uniformly from `0..priority_range`.
    pub priority_range: u32,
    /// Contested victory passes retried inside a single tick.
    pub max_contest_retries: usize,
    /// Polling cadence of the observer.
    pub observer_interval: Duration,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        Self {
            tick_base: Duration::from_millis(2000),
            tick_jitter: Duration::from_millis(3000),
            failure_probability: 1.0 / 13.0,
            recovery_window: Duration::from_millis(5000),
            rpc_timeout: Duration::from_millis(500),
            priority_range: 1000,
            max_contest_retries: 8,
            observer_interval: Duration::from_millis(500),
        }
    }
}

impl ElectionConfig {
    /// Builds a config from the defaults, overriding any field whose
    /// environment variable is set and parses.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = env_parse::<u64>(ENV_TICK_MS) {
            config.tick_base = Duration::from_millis(ms);
        }
        if let Some(ms) = env_parse::<u64>(ENV_JITTER_MS) {
            config.tick_jitter = Duration::from_millis(ms);
        }
        if let Some(p) = env_parse::<f64>(ENV_FAILURE_PROBABILITY) {
            config.failure_probability = p;
        }
        if let Some(ms) = env_parse::<u64>(ENV_RECOVERY_MS) {
            config.recovery_window = Duration::from_millis(ms);
        }
        if let Some(ms) = env_parse::<u64>(ENV_RPC_TIMEOUT_MS) {
            config.rpc_timeout = Duration::from_millis(ms);
        }
        if let Some(range) = env_parse::<u32>(ENV_PRIORITY_RANGE) {
            config.priority_range = range;
        }
        if let Some(retries) = env_parse::<usize>(ENV_MAX_RETRIES) {
            config.max_contest_retries = retries;
        }
        if let Some(ms) = env_parse::<u64>(ENV_OBSERVER_MS) {
            config.observer_interval = Duration::from_millis(ms);
        }

        config.sanitized()
    }

    /// Clamps values that would otherwise panic deeper in the stack
    /// (`gen_bool` outside `[0, 1]`, `gen_range` over an empty range).
    pub fn sanitized(mut self) -> Self {
        if !self.failure_probability.is_finite() {
            tracing::warn!(
                "Invalid failure probability {}, using default",
                self.failure_probability
            );
            self.failure_probability = Self::default().failure_probability;
        }
        self.failure_probability = self.failure_probability.clamp(0.0, 1.0);

        if self.priority_range == 0 {
            tracing::warn!("Priority range must be positive, using default");
            self.priority_range = Self::default().priority_range;
        }

        self
    }

    /// Delay before the next monitor tick: `tick_base` plus uniform jitter.
    pub fn next_tick_delay(&self) -> Duration {
        let jitter_ms = self.tick_jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.tick_base;
        }

        use rand::Rng;
        let extra = rand::thread_rng().gen_range(0..jitter_ms);
        self.tick_base + Duration::from_millis(extra)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring unparsable {}={:?}", key, raw);
            None
        }
    }
}
