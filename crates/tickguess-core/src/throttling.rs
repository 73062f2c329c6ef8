use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Client-side request budget mirroring the provider's free-tier quota.
///
/// A budget with a zero limit never refuses a request.
#[derive(Clone)]
pub struct RequestBudget {
    limiter: Option<Arc<DirectRateLimiter>>,
    clock: DefaultClock,
}

impl RequestBudget {
    pub fn new(quota_window: Duration, quota_limit: u32) -> Self {
        let clock = DefaultClock::default();
        let limiter = quota_from_window(quota_window, quota_limit)
            .map(|quota| Arc::new(RateLimiter::direct_with_clock(quota, &clock)));
        Self { limiter, clock }
    }

    pub fn per_minute(quota_limit: u32) -> Self {
        Self::new(Duration::from_secs(60), quota_limit)
    }

    pub fn unlimited() -> Self {
        Self::new(Duration::from_secs(60), 0)
    }

    /// Takes one unit of budget, or reports how long until one frees up.
    pub fn acquire(&self) -> Result<(), Duration> {
        let Some(limiter) = &self.limiter else {
            return Ok(());
        };

        limiter
            .check()
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }

    pub fn is_limited(&self) -> bool {
        self.limiter.is_some()
    }
}

impl std::fmt::Debug for RequestBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBudget")
            .field("limited", &self.is_limited())
            .finish()
    }
}

fn quota_from_window(quota_window: Duration, quota_limit: u32) -> Option<Quota> {
    let burst = NonZeroU32::new(quota_limit)?;
    let seconds_per_cell = (quota_window.as_secs_f64() / f64::from(quota_limit)).max(0.001);
    let period = Duration::from_secs_f64(seconds_per_cell);

    Quota::with_period(period).map(|quota| quota.allow_burst(burst))
}
