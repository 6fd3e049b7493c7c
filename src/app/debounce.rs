//! Debounced input values.
//!
//! A [`Debounced`] buffers rapid edits of a free-text field and publishes a
//! stable value once the input has been quiet for the configured delay. Each
//! [`update`](Debounced::update) cancels the pending countdown and starts a new
//! one, so only the last edit of a burst can win.
//!
//! ```text
//! update("a")   update("ab")   update("abc")
//!   t=0           t=100          t=200 ───── 500ms quiet ─────▶ stable = "abc" (t=700)
//! ```
//!
//! Observers subscribe to the stable value through a `tokio::sync::watch`
//! receiver. Dropping the `Debounced` aborts any pending countdown and closes
//! the channel, so nothing fires after the owning view is gone.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Delay applied when a call site does not pick one.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// A value whose stable copy lags behind rapid updates.
///
/// Must be updated from within a Tokio runtime: each update schedules a timer
/// task.
///
/// # Examples
///
/// ```
/// use recluta::app::Debounced;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut search = Debounced::new(String::new(), Duration::from_millis(10));
/// let mut stable = search.subscribe();
///
/// search.update("ac".to_string());
/// search.update("acme".to_string());
///
/// stable.changed().await.unwrap();
/// assert_eq!(*stable.borrow(), "acme");
/// # }
/// ```
#[derive(Debug)]
pub struct Debounced<T> {
    raw: T,
    delay: Duration,
    stable: Arc<watch::Sender<T>>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debounced<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates a debounced value whose raw and stable copies both start at
    /// `initial`.
    ///
    /// A zero `delay` is raised to one millisecond.
    #[must_use]
    pub fn new(initial: T, delay: Duration) -> Self {
        let (stable, _) = watch::channel(initial.clone());
        Self {
            raw: initial,
            delay: delay.max(Duration::from_millis(1)),
            stable: Arc::new(stable),
            pending: None,
        }
    }

    /// Records a new raw value and restarts the quiet-period countdown.
    pub fn update(&mut self, raw: T) {
        self.cancel();
        self.raw = raw.clone();

        let stable = Arc::clone(&self.stable);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            stable.send_if_modified(|current| {
                if *current == raw {
                    false
                } else {
                    *current = raw;
                    true
                }
            });
        }));
    }

    /// Cancels the pending countdown, if any. The stable value keeps whatever
    /// it last settled on.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    /// Returns the latest raw value.
    pub fn raw(&self) -> &T {
        &self.raw
    }

    /// Returns a copy of the current stable value.
    pub fn stable(&self) -> T {
        self.stable.borrow().clone()
    }

    /// Subscribes to stable-value changes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.stable.subscribe()
    }

    /// Returns the quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns `true` while a countdown is running.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.is_finished())
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    const DELAY: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn burst_settles_once_on_last_value() {
        let start = Instant::now();
        let mut value = Debounced::new(String::new(), DELAY);
        let mut stable = value.subscribe();

        value.update("a".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        value.update("ab".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        value.update("abc".to_string());

        stable.changed().await.unwrap();
        assert_eq!(*stable.borrow_and_update(), "abc");
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(700));
        assert!(elapsed < Duration::from_millis(710));

        tokio::time::sleep(DELAY * 4).await;
        assert!(!stable.has_changed().unwrap());
        assert!(!value.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn stable_lags_raw_until_quiet_period_ends() {
        let mut value = Debounced::new(0_u32, DELAY);
        value.update(7);
        assert_eq!(*value.raw(), 7);
        assert_eq!(value.stable(), 0);

        tokio::time::sleep(DELAY - Duration::from_millis(1)).await;
        assert_eq!(value.stable(), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(value.stable(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_update() {
        let mut value = Debounced::new(String::new(), DELAY);
        let mut stable = value.subscribe();
        value.update("late".to_string());
        drop(value);

        tokio::time::sleep(DELAY * 2).await;
        assert!(stable.changed().await.is_err());
        assert_eq!(*stable.borrow(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn returning_to_stable_value_does_not_notify() {
        let mut value = Debounced::new("acme".to_string(), DELAY);
        let stable = value.subscribe();
        value.update("acm".to_string());
        value.update("acme".to_string());

        tokio::time::sleep(DELAY * 2).await;
        assert!(!stable.has_changed().unwrap());
    }

    #[test]
    fn zero_delay_is_raised() {
        let value = Debounced::new((), Duration::ZERO);
        assert_eq!(value.delay(), Duration::from_millis(1));
    }
}
