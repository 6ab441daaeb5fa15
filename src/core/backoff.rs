//! Delay between a failed attempt and its retry.

use std::time::Duration;

use crate::config::BackoffStrategy;

/// Delay to wait after the failed attempt with zero-based index `attempt`.
///
/// No jitter and no cap; exponential growth saturates at `Duration::MAX`.
#[must_use]
pub fn backoff_delay(attempt: u32, strategy: BackoffStrategy, base: Duration) -> Duration {
    match strategy {
        BackoffStrategy::Constant => base,
        BackoffStrategy::Exponential => 1u32
            .checked_shl(attempt)
            .and_then(|factor| base.checked_mul(factor))
            .unwrap_or(if base.is_zero() { Duration::ZERO } else { Duration::MAX }),
    }
}
