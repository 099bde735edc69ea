//! Bounded waiting for the calculator page to finish rendering.

use std::time::Duration;

use tokio::time::sleep;

/// Polling schedule for [`wait_until`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Delay before the first check.
    pub initial_delay: Duration,
    /// Delay between failed checks.
    pub interval: Duration,
    /// Checks made before giving up.
    pub max_attempts: u32,
    /// Extra wait after a successful check.
    pub settle: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            interval: Duration::from_millis(100),
            max_attempts: 30,
            settle: Duration::from_millis(200),
        }
    }
}

impl ReadinessPolicy {
    /// Longest time [`wait_until`] can take.
    pub fn budget(&self) -> Duration {
        self.initial_delay
            + self.interval * self.max_attempts.saturating_sub(1)
            + self.settle
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// The condition held on the given check.
    Confirmed { attempts: u32 },
    /// Every check failed; the caller goes ahead anyway.
    ProceededWithoutConfirmation,
}

impl Readiness {
    pub fn is_confirmed(self) -> bool {
        matches!(self, Readiness::Confirmed { .. })
    }
}

/// Poll `condition` until it holds or the policy runs out of attempts.
pub async fn wait_until(mut condition: impl FnMut() -> bool, policy: &ReadinessPolicy) -> Readiness {
    sleep(policy.initial_delay).await;

    for attempt in 1..=policy.max_attempts {
        if condition() {
            sleep(policy.settle).await;
            return Readiness::Confirmed { attempts: attempt };
        }
        if attempt < policy.max_attempts {
            sleep(policy.interval).await;
        }
    }

    tracing::warn!(
        "Page not ready after {} checks, proceeding anyway",
        policy.max_attempts
    );
    Readiness::ProceededWithoutConfirmation
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn confirms_once_condition_holds() {
        let start = Instant::now();
        let mut checks = 0;
        let readiness = wait_until(
            || {
                checks += 1;
                checks == 3
            },
            &ReadinessPolicy::default(),
        )
        .await;

        assert_eq!(readiness, Readiness::Confirmed { attempts: 3 });
        assert_eq!(start.elapsed(), Duration::from_millis(500 + 2 * 100 + 200));
    }

    #[tokio::test(start_paused = true)]
    async fn proceeds_without_confirmation_after_budget() {
        let policy = ReadinessPolicy::default();
        let start = Instant::now();
        let mut checks = 0;

        let readiness = wait_until(
            || {
                checks += 1;
                false
            },
            &policy,
        )
        .await;

        assert_eq!(readiness, Readiness::ProceededWithoutConfirmation);
        assert_eq!(checks, 30);
        assert_eq!(start.elapsed(), Duration::from_millis(500 + 29 * 100));
    }

    #[test]
    fn budget_covers_every_check() {
        assert_eq!(
            ReadinessPolicy::default().budget(),
            Duration::from_millis(3600)
        );
    }
}
