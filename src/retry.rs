use std::{fmt::Display, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Bounded retry with exponential backoff between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total number of calls, including the first. Zero is treated as one.
    pub attempts: u32,
    /// Wait after the first failure.
    #[serde(with = "millis")]
    pub initial_delay: Duration,
    /// Factor applied to the wait after each further failure.
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: 3, initial_delay: Duration::from_secs(1), multiplier: 2 }
    }
}

/// Outcome of an exhausted policy: the last error and how many calls were made.
#[derive(Debug, Clone, PartialEq)]
pub struct Exhausted<E> {
    pub attempts: u32,
    pub error: E,
}

impl RetryPolicy {
    pub fn new(attempts: u32, initial_delay: Duration) -> Self {
        Self { attempts, initial_delay, ..Self::default() }
    }

    /// Retry without sleeping between attempts.
    pub fn immediate(attempts: u32) -> Self { Self::new(attempts, Duration::ZERO) }

    #[inline] fn max_attempts(&self) -> u32 { self.attempts.max(1) }

    /// Waits slept after each failed attempt but the last.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.max_attempts() - 1)
            .map(|k| self.initial_delay.saturating_mul(self.multiplier.saturating_pow(k)))
    }

    /// Call `op` until it succeeds or the attempt budget is spent.
    /// `op` receives the 1-based attempt number; `label` tags the warnings logged on failure.
    pub fn run<T, E, F>(&self, label: impl Display, mut op: F) -> Result<T, Exhausted<E>>
    where
        E: Display,
        F: FnMut(u32) -> Result<T, E>,
    {
        let mut delays = self.delays();
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(error) => match delays.next() {
                    Some(delay) => {
                        warn!(%label, attempt, of = self.max_attempts(), %error, retry_in = ?delay, "attempt failed");
                        if !delay.is_zero() { std::thread::sleep(delay) }
                        attempt += 1;
                    }
                    None => {
                        warn!(%label, attempt, %error, "giving up");
                        return Err(Exhausted { attempts: attempt, error });
                    }
                },
            }
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).map_err(<S::Error as serde::ser::Error>::custom)?)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_doubles() {
        let delays: Vec<_> = RetryPolicy::default().delays().collect();
        assert_eq!(delays, vec![Duration::from_secs(1), Duration::from_secs(2)]);
    }

    #[test]
    fn zero_attempts_means_one() {
        let mut calls = 0;
        let result: Result<(), _> = RetryPolicy::immediate(0).run("op", |_| { calls += 1; Err("nope") });
        assert_eq!(calls, 1);
        assert_eq!(result, Err(Exhausted { attempts: 1, error: "nope" }));
    }

    #[test]
    fn succeeds_on_third_attempt() {
        let mut seen = Vec::new();
        let result = RetryPolicy::immediate(3).run("op", |attempt| {
            seen.push(attempt);
            if attempt < 3 { Err(format!("fail {attempt}")) } else { Ok(7) }
        });
        assert_eq!(result, Ok(7));
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn exhausts_and_returns_last_error() {
        let mut calls = 0;
        let result: Result<u8, _> = RetryPolicy::immediate(3).run("op", |attempt| {
            calls += 1;
            Err(format!("fail {attempt}"))
        });
        assert_eq!(calls, 3);
        assert_eq!(result, Err(Exhausted { attempts: 3, error: "fail 3".to_string() }));
    }

    #[test]
    fn first_success_stops_immediately() {
        let mut calls = 0;
        let result: Result<_, Exhausted<String>> = RetryPolicy::immediate(3).run("op", |_| { calls += 1; Ok("ok") });
        assert_eq!(result, Ok("ok"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn sleeps_between_attempts() {
        let policy = RetryPolicy { attempts: 3, initial_delay: Duration::from_millis(5), multiplier: 2 };
        let start = std::time::Instant::now();
        let _: Result<(), _> = policy.run("op", |_| Err("nope"));
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn serializes_delay_as_millis() {
        let json = serde_json::to_value(RetryPolicy::default()).unwrap();
        assert_eq!(json["initial_delay"], 1000);
        assert_eq!(json["attempts"], 3);
    }

    #[test]
    fn oversized_delay_fails_to_serialize() {
        let policy = RetryPolicy { initial_delay: Duration::MAX, ..RetryPolicy::default() };
        assert!(serde_json::to_value(policy).is_err());
    }
}
