//! File-copy retry policy
//!
//! Each copy runs through a small state machine:
//!
//! - `Attempting(i)` + success -> `Succeeded`
//! - `Attempting(i)` + rate limited -> sleep `2^i + 1` s, then
//!   `Attempting(i + 1)`, or `Failed` once the attempt cap is reached
//! - `Attempting(i)` + not copyable -> `PermanentlySkipped`
//! - `Attempting(i)` + anything else -> `Failed`

use crate::remote::ProviderError;
use std::time::Duration;

/// Reason codes the provider uses for throttling
pub const RATE_LIMIT_REASONS: &[&str] = &["userRateLimitExceeded", "rateLimitExceeded"];

/// Reason code for files the owner does not allow to be copied
pub const NOT_COPYABLE_REASON: &str = "cannotCopyFile";

/// How the engine treats a failed copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    RateLimited,
    NotCopyable,
    Other,
}

/// Classify a provider failure by its reason code. Unknown or missing
/// reasons are `Other`.
pub fn classify(error: &ProviderError) -> ErrorClass {
    match error.reason() {
        Some(reason) if RATE_LIMIT_REASONS.contains(&reason) => ErrorClass::RateLimited,
        Some(NOT_COPYABLE_REASON) => ErrorClass::NotCopyable,
        _ => ErrorClass::Other,
    }
}

/// State of one file copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyState {
    /// About to make attempt `i` (zero-based)
    Attempting(u32),
    Succeeded,
    PermanentlySkipped,
    Failed,
}

impl CopyState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CopyState::Attempting(_))
    }
}

/// Result of feeding one attempt's outcome into the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: CopyState,

    /// Sleep required before `next` (only set for retries)
    pub wait: Option<Duration>,
}

/// Bounded exponential backoff for rate-limited copies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Policy allowing `max_attempts` copy calls per file (at least one).
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Backoff before retrying after failed attempt `attempt`: `2^attempt + 1` seconds.
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_secs(2u64.saturating_pow(attempt).saturating_add(1))
    }

    /// Advance from `Attempting(attempt)` given that attempt's outcome.
    pub fn transition(&self, attempt: u32, outcome: Result<(), &ProviderError>) -> Transition {
        let error = match outcome {
            Ok(()) => return Transition::done(CopyState::Succeeded),
            Err(error) => error,
        };

        match classify(error) {
            ErrorClass::RateLimited if attempt + 1 < self.max_attempts => Transition {
                next: CopyState::Attempting(attempt + 1),
                wait: Some(self.backoff(attempt)),
            },
            ErrorClass::RateLimited | ErrorClass::Other => Transition::done(CopyState::Failed),
            ErrorClass::NotCopyable => Transition::done(CopyState::PermanentlySkipped),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS)
    }
}

impl Transition {
    fn done(next: CopyState) -> Self {
        Self { next, wait: None }
    }
}

/// Blocking pause used between retries
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(code: &str) -> ProviderError {
        ProviderError::new("failed").with_status(403).with_reason(code)
    }

    #[test]
    fn test_classify_reason_codes() {
        assert_eq!(classify(&reason("userRateLimitExceeded")), ErrorClass::RateLimited);
        assert_eq!(classify(&reason("rateLimitExceeded")), ErrorClass::RateLimited);
        assert_eq!(classify(&reason("cannotCopyFile")), ErrorClass::NotCopyable);
        assert_eq!(classify(&reason("storageQuotaExceeded")), ErrorClass::Other);
        assert_eq!(classify(&ProviderError::new("timeout")), ErrorClass::Other);
    }

    #[test]
    fn test_backoff_follows_power_of_two_plus_one() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(0), Duration::from_secs(2));
        assert_eq!(policy.backoff(1), Duration::from_secs(3));
        assert_eq!(policy.backoff(2), Duration::from_secs(5));
    }

    #[test]
    fn test_rate_limit_retries_until_cap_then_fails() {
        let policy = RetryPolicy::default();
        let err = reason("rateLimitExceeded");

        let t0 = policy.transition(0, Err(&err));
        assert_eq!(t0.next, CopyState::Attempting(1));
        assert_eq!(t0.wait, Some(Duration::from_secs(2)));

        let t1 = policy.transition(1, Err(&err));
        assert_eq!(t1.next, CopyState::Attempting(2));
        assert_eq!(t1.wait, Some(Duration::from_secs(3)));

        let t2 = policy.transition(2, Err(&err));
        assert_eq!(t2.next, CopyState::Failed);
        assert_eq!(t2.wait, None);
    }

    #[test]
    fn test_not_copyable_and_other_are_terminal() {
        let policy = RetryPolicy::default();

        let skipped = policy.transition(0, Err(&reason("cannotCopyFile")));
        assert_eq!(skipped.next, CopyState::PermanentlySkipped);
        assert!(skipped.next.is_terminal());

        let failed = policy.transition(0, Err(&reason("notFound")));
        assert_eq!(failed.next, CopyState::Failed);
        assert_eq!(failed.wait, None);
    }

    #[test]
    fn test_success_from_any_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.transition(2, Ok(())).next, CopyState::Succeeded);
    }

    #[test]
    fn test_single_attempt_policy_never_retries() {
        let policy = RetryPolicy::new(0);
        assert_eq!(policy.max_attempts(), 1);
        let t = policy.transition(0, Err(&reason("rateLimitExceeded")));
        assert_eq!(t.next, CopyState::Failed);
    }
}
