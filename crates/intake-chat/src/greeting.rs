//! Typed-out welcome message shown while the conversation is empty.
//!
//! [`GreetingReveal`] holds how much of the text is visible. [`GreetingStreamer`]
//! produces the timed [`GreetingStep`]s that advance it. The two are kept apart
//! so that the owner of the reveal decides whether a step still matters: once the
//! patient has said something the greeting is gone and late steps are ignored.

use futures::stream::{BoxStream, StreamExt};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use intake_types::{GREETING_CHAR_INTERVAL_MS, GREETING_INITIAL_DELAY_MS};

/// Timing of the reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreetingSchedule {
    pub initial_delay: Duration,
    pub char_interval: Duration,
}

impl GreetingSchedule {
    pub fn new(initial_delay: Duration, char_interval: Duration) -> Self {
        Self {
            initial_delay,
            char_interval,
        }
    }

    /// Schedule that reveals everything without waiting
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Latest point after activation at which a text of `chars` characters is fully shown
    pub fn completion_deadline(&self, chars: usize) -> Duration {
        let chars = u32::try_from(chars).unwrap_or(u32::MAX);
        self.initial_delay
            .saturating_add(self.char_interval.saturating_mul(chars))
    }
}

impl Default for GreetingSchedule {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(GREETING_INITIAL_DELAY_MS),
            Duration::from_millis(GREETING_CHAR_INTERVAL_MS),
        )
    }
}

/// One tick of the reveal: the first `revealed` characters are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreetingStep {
    pub revealed: usize,
    pub complete: bool,
}

/// Visible prefix of the welcome text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingReveal {
    text: String,
    total: usize,
    revealed: usize,
}

impl GreetingReveal {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Self {
            text,
            total,
            revealed: 0,
        }
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }

    /// Number of visible characters
    pub fn revealed_prefix_length(&self) -> usize {
        self.revealed
    }

    /// Length of the whole text in characters
    pub fn total_length(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.total
    }

    /// The visible prefix, cut on a character boundary
    pub fn revealed_text(&self) -> &str {
        match self.text.char_indices().nth(self.revealed) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => &self.text,
        }
    }

    /// Apply a step. The prefix never shrinks; stale or out-of-range steps are ignored.
    pub fn apply(&mut self, step: GreetingStep) -> bool {
        let target = step.revealed.min(self.total);
        if target <= self.revealed {
            return false;
        }
        self.revealed = target;
        true
    }

    /// Hide everything again so the reveal can start over
    pub fn restart(&mut self) {
        self.revealed = 0;
    }
}

/// Drives a reveal on tokio timers.
///
/// Dropping the stream, or cancelling the token, abandons every pending timer.
/// Nothing outside the stream is touched by the streamer itself.
#[derive(Debug, Clone)]
pub struct GreetingStreamer {
    total: usize,
    schedule: GreetingSchedule,
    cancel: CancellationToken,
}

impl GreetingStreamer {
    pub fn new(text: &str, schedule: GreetingSchedule) -> Self {
        Self::for_length(text.chars().count(), schedule)
    }

    pub fn for_length(total: usize, schedule: GreetingSchedule) -> Self {
        Self {
            total,
            schedule,
            cancel: CancellationToken::new(),
        }
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Steps of the reveal: one after the initial delay plus one per interval,
    /// ending with `complete == true`.
    pub fn steps(&self) -> BoxStream<'static, GreetingStep> {
        let total = self.total;
        let schedule = self.schedule;
        let cancel = self.cancel.clone();

        async_stream::stream! {
            if !wait(&cancel, schedule.initial_delay).await {
                return;
            }

            if total == 0 {
                yield GreetingStep { revealed: 0, complete: true };
                return;
            }

            for revealed in 1..=total {
                if !wait(&cancel, schedule.char_interval).await {
                    log::debug!("greeting cancelled at {}/{}", revealed - 1, total);
                    return;
                }
                yield GreetingStep { revealed, complete: revealed == total };
            }
        }
        .boxed()
    }
}

// Returns false when cancelled before the delay elapsed.
async fn wait(cancel: &CancellationToken, delay: Duration) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_revealed_text_respects_char_boundaries() {
        let mut reveal = GreetingReveal::new("안녕🩺!");
        assert_eq!(reveal.total_length(), 4);
        assert_eq!(reveal.revealed_text(), "");

        reveal.apply(GreetingStep { revealed: 3, complete: false });
        assert_eq!(reveal.revealed_text(), "안녕🩺");

        reveal.apply(GreetingStep { revealed: 4, complete: true });
        assert_eq!(reveal.revealed_text(), "안녕🩺!");
        assert!(reveal.is_complete());
    }

    #[test]
    fn test_completion_deadline_saturates() {
        let schedule = GreetingSchedule::default();
        assert_eq!(schedule.completion_deadline(10), Duration::from_millis(1300));

        let capped = Duration::from_millis(1000) + Duration::from_millis(30) * u32::MAX;
        assert_eq!(schedule.completion_deadline(usize::MAX), capped);
        assert_eq!(
            GreetingSchedule::new(Duration::MAX, Duration::MAX).completion_deadline(2),
            Duration::MAX
        );
    }

    #[test]
    fn test_apply_never_shrinks() {
        let mut reveal = GreetingReveal::new("abcdef");
        assert!(reveal.apply(GreetingStep { revealed: 4, complete: false }));
        assert!(!reveal.apply(GreetingStep { revealed: 2, complete: false }));
        assert_eq!(reveal.revealed_prefix_length(), 4);

        assert!(reveal.apply(GreetingStep { revealed: 99, complete: true }));
        assert_eq!(reveal.revealed_prefix_length(), 6);
    }

    #[test]
    fn test_restart() {
        let mut reveal = GreetingReveal::new("abc");
        reveal.apply(GreetingStep { revealed: 3, complete: true });
        reveal.restart();
        assert_eq!(reveal.revealed_prefix_length(), 0);
        assert!(!reveal.is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_completes_within_deadline() {
        let text = "안녕하세요! 🩺";
        let schedule = GreetingSchedule::default();
        let streamer = GreetingStreamer::new(text, schedule);

        let start = Instant::now();
        let steps: Vec<GreetingStep> = streamer.steps().collect().await;
        let elapsed = start.elapsed();

        let total = text.chars().count();
        assert_eq!(steps.len(), total);
        assert!(steps.windows(2).all(|w| w[0].revealed < w[1].revealed));
        assert!(steps[..total - 1].iter().all(|s| !s.complete));
        assert_eq!(steps.last(), Some(&GreetingStep { revealed: total, complete: true }));

        assert!(elapsed >= schedule.initial_delay);
        assert!(elapsed <= schedule.completion_deadline(total));
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_is_revealed_before_initial_delay() {
        let streamer = GreetingStreamer::new("abc", GreetingSchedule::default());
        let mut steps = streamer.steps();

        let early = tokio::time::timeout(Duration::from_millis(999), steps.next()).await;
        assert!(early.is_err());

        let first = steps.next().await;
        assert_eq!(first, Some(GreetingStep { revealed: 1, complete: false }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_the_stream() {
        let streamer = GreetingStreamer::new("abcdef", GreetingSchedule::default());
        let mut steps = streamer.steps();

        assert_eq!(steps.next().await.map(|s| s.revealed), Some(1));
        assert_eq!(steps.next().await.map(|s| s.revealed), Some(2));

        streamer.cancel();
        assert_eq!(steps.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_start() {
        let streamer = GreetingStreamer::new("abc", GreetingSchedule::default());
        streamer.cancel();
        let steps: Vec<GreetingStep> = streamer.steps().collect().await;
        assert!(steps.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text_completes_in_one_step() {
        let streamer = GreetingStreamer::new("", GreetingSchedule::default());
        let steps: Vec<GreetingStep> = streamer.steps().collect().await;
        assert_eq!(steps, vec![GreetingStep { revealed: 0, complete: true }]);
    }
}
