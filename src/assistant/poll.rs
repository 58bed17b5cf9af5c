use std::time::Duration;

/// Pacing for poll-until-terminal loops.
///
/// Injected wherever the core waits on a remote operation so tests can
/// substitute a zero-delay strategy. `max_attempts` bounds every loop: a
/// backend that stays pending surfaces an error instead of hanging the state
/// machine.
#[derive(Debug, Clone)]
pub struct PollStrategy {
    pub interval: Duration,
    pub max_attempts: usize,
}

impl PollStrategy {
    /// Zero-delay strategy for tests and scripted fakes.
    pub fn no_delay() -> Self {
        Self {
            interval: Duration::ZERO,
            max_attempts: 100,
        }
    }

    pub async fn wait(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}

impl Default for PollStrategy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            max_attempts: 240, // two minutes at the default interval
        }
    }
}
