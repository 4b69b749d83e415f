/*!
 * Requests-per-minute budget enforcement.
 *
 * The translation API allows a fixed number of requests per rolling minute.
 * The limiter tracks a window-start instant and a request counter; when the
 * counter reaches the limit before the window has elapsed, `acquire` blocks
 * until the window ends, then resets both.
 */

use std::time::{Duration, Instant};

use log::debug;

/// Default budget window
const WINDOW: Duration = Duration::from_secs(60);

/// Rolling request budget with a fixed window
#[derive(Debug)]
pub struct RateLimiter {
    /// Maximum requests per window
    limit: u32,
    /// Window length
    window: Duration,
    /// Start of the current window
    window_start: Instant,
    /// Requests issued in the current window
    used: u32,
    /// Requests issued over the limiter's lifetime
    total: u64,
}

impl RateLimiter {
    /// Create a limiter with the standard one-minute window
    pub fn new(limit: u32) -> Self {
        Self::with_window(limit, WINDOW)
    }

    /// Create a limiter with an explicit window length
    pub fn with_window(limit: u32, window: Duration) -> Self {
        Self {
            limit: limit.max(1),
            window,
            window_start: Instant::now(),
            used: 0,
            total: 0,
        }
    }

    /// Take one request slot, blocking until the budget allows it.
    pub async fn acquire(&mut self) {
        if self.used >= self.limit {
            let elapsed = self.window_start.elapsed();
            if elapsed < self.window {
                let wait = self.window - elapsed;
                debug!(
                    "Request budget of {} reached, waiting {:?} for the window to elapse",
                    self.limit, wait
                );
                tokio::time::sleep(wait).await;
            }
            self.window_start = Instant::now();
            self.used = 0;
        }

        self.used += 1;
        self.total += 1;
    }

    /// Requests issued in the current window
    pub fn used_in_window(&self) -> u32 {
        self.used
    }

    /// Requests issued since the limiter was created
    pub fn total_requests(&self) -> u64 {
        self.total
    }
}
