//! Pool and scheduler configuration structures.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::PoolError;

/// Default number of simultaneously in-flight tasks.
pub const DEFAULT_CONCURRENCY: usize = 5;
/// Default base delay for backoff, in milliseconds.
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 200;

/// Delay growth between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffStrategy {
    /// `base * 2^attempt`.
    #[default]
    Exponential,
    /// Always `base`.
    Constant,
}

/// What happens to an attempt that outlives its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutAction {
    /// The attempt keeps running on the spawner; its result is discarded.
    #[default]
    Detach,
    /// The attempt future is dropped as soon as the deadline passes.
    Cancel,
}

/// Pool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum number of tasks in flight at once.
    pub concurrency: usize,
    /// Per-attempt deadline; `None` disables timeouts and zero expires at once.
    #[serde(rename = "timeout_ms", with = "millis::option")]
    pub timeout: Option<Duration>,
    /// Extra attempts after the first failure.
    pub retries: u32,
    /// Backoff growth strategy.
    pub backoff_strategy: BackoffStrategy,
    /// Backoff base delay.
    #[serde(rename = "backoff_base_ms", with = "millis")]
    pub backoff_base: Duration,
    /// Handling of attempts that exceed `timeout`.
    pub timeout_action: TimeoutAction,
    /// Maximum queued tasks before `add` rejects; `None` is unbounded.
    pub max_queue_depth: Option<usize>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: None,
            retries: 0,
            backoff_strategy: BackoffStrategy::Exponential,
            backoff_base: Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
            timeout_action: TimeoutAction::Detach,
            max_queue_depth: None,
        }
    }
}

impl PoolConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency ceiling.
    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Enable a per-attempt deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable per-attempt deadlines.
    #[must_use]
    pub const fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Set the number of extra attempts.
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set backoff strategy and base delay.
    #[must_use]
    pub const fn with_backoff(mut self, strategy: BackoffStrategy, base: Duration) -> Self {
        self.backoff_strategy = strategy;
        self.backoff_base = base;
        self
    }

    /// Set what happens to attempts that exceed the deadline.
    #[must_use]
    pub const fn with_timeout_action(mut self, action: TimeoutAction) -> Self {
        self.timeout_action = action;
        self
    }

    /// Bound the number of queued tasks.
    #[must_use]
    pub const fn with_max_queue_depth(mut self, depth: usize) -> Self {
        self.max_queue_depth = Some(depth);
        self
    }

    /// Per-attempt deadline, if enabled.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Backoff base delay.
    #[must_use]
    pub const fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    /// Validate pool configuration values.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.concurrency == 0 {
            return Err(PoolError::Config("concurrency must be greater than 0".into()));
        }
        if self.max_queue_depth == Some(0) {
            return Err(PoolError::Config("max_queue_depth must be greater than 0".into()));
        }
        Ok(())
    }

    /// Parse a pool configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, PoolError> {
        let cfg: Self =
            serde_json::from_str(input).map_err(|e| PoolError::Config(format!("parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Millisecond (de)serialization for `Duration` fields.
///
/// Whole milliseconds are written as integers and anything finer as a
/// fractional number, so a round trip through JSON keeps sub-millisecond
/// values.
mod millis {
    use std::time::Duration;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if value.subsec_nanos() % 1_000_000 == 0 {
            let ms = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
            serializer.serialize_u64(ms)
        } else {
            serializer.serialize_f64(value.as_secs_f64() * 1000.0)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(ms / 1000.0)
            .map_err(|e| D::Error::custom(format!("invalid millisecond value {ms}: {e}")))
    }

    pub mod option {
        use std::time::Duration;

        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<Duration>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(duration) => super::serialize(duration, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Duration>, D::Error> {
            #[derive(Deserialize)]
            struct Millis(#[serde(deserialize_with = "super::deserialize")] Duration);

            Ok(Option::<Millis>::deserialize(deserializer)?.map(|Millis(d)| d))
        }
    }
}

/// Root configuration describing several independent named pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Map of pool name to configuration.
    pub pools: HashMap<String, PoolConfig>,
}

impl SchedulerConfig {
    /// Validate all pools and ensure at least one pool exists.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.pools.is_empty() {
            return Err(PoolError::Config("at least one pool must be defined".into()));
        }
        for (name, pool) in &self.pools {
            pool.validate().map_err(|e| match e {
                PoolError::Config(msg) => PoolError::Config(format!("pool `{name}` invalid: {msg}")),
                other => other,
            })?;
        }
        Ok(())
    }

    /// Parse scheduler configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, PoolError> {
        let cfg: Self =
            serde_json::from_str(input).map_err(|e| PoolError::Config(format!("parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
