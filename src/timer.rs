//! Fixed-interval cycle timing over a free-running tick counter
//!
//! The control loop has no scheduler to sleep on, so [`CycleTimer::advance_time`]
//! spins on the counter until a full sample period has gone by. It is a true
//! blocking call: there is no yield, no timeout and no cancellation. If the
//! counter stops advancing the call never returns.
//!
//! # Example
//! ```
//! use dcm_ahrs::{CycleTimer, MockTicks, TimerSettings};
//!
//! // 1 MHz counter that moves 2 ms every time it is read
//! let clock = MockTicks::new(1_000_000, 2_000);
//! let mut timer = CycleTimer::new(clock, TimerSettings { sample_rate: 49 });
//!
//! assert_eq!(timer.advance_time(), 0.0); // first cycle after a reset
//! let dt = timer.advance_time();
//! assert!(dt >= 0.02);
//! ```

use core::cell::Cell;

use crate::types::TimerSettings;

/// Free-running hardware counter
///
/// The counter is expected to wrap around at `u32::MAX`; all arithmetic on
/// timestamps is wrapping.
pub trait TickSource {
    /// Current counter value
    fn now_ticks(&self) -> u32;

    /// Counter rate in ticks per second
    fn resolution(&self) -> u32;
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn now_ticks(&self) -> u32 {
        (**self).now_ticks()
    }

    fn resolution(&self) -> u32 {
        (**self).resolution()
    }
}

/// Fixed-interval cycle timer
///
/// Holds the persistent timestamp pair of the control loop. The first call to
/// [`advance_time`](Self::advance_time) after construction or
/// [`restart`](Self::restart) has no previous timestamp to measure against and
/// reports zero elapsed time, so the first integration step is a no-op.
#[derive(Debug)]
pub struct CycleTimer<C> {
    clock: C,
    /// Minimum number of ticks between two cycles
    period_ticks: u32,
    /// Ticks per second, as a float for the elapsed-time division
    resolution: f32,
    previous_timestamp: Option<u32>,
    current_timestamp: u32,
    elapsed_seconds: f32,
}

impl<C: TickSource> CycleTimer<C> {
    /// Create a timer over `clock` running at `settings.sample_rate`
    ///
    /// The sample period is `resolution / (sample_rate + 1)` ticks.
    pub fn new(clock: C, settings: TimerSettings) -> Self {
        let resolution = clock.resolution();
        let period_ticks = resolution / settings.sample_rate.saturating_add(1);

        Self {
            clock,
            period_ticks,
            resolution: resolution as f32,
            previous_timestamp: None,
            current_timestamp: 0,
            elapsed_seconds: 0.0,
        }
    }

    /// Wait for the next cycle and return the time elapsed since the last one
    ///
    /// Spins until the counter has advanced at least one sample period past
    /// the previous timestamp, then records the counter value as the new
    /// current timestamp. Returns `0.0` on the first call after a restart.
    pub fn advance_time(&mut self) -> f32 {
        let now = match self.previous_timestamp {
            Some(previous) => self.wait_until_elapsed(previous),
            None => self.clock.now_ticks(),
        };

        self.current_timestamp = now;
        self.elapsed_seconds = match self.previous_timestamp {
            Some(previous) => now.wrapping_sub(previous) as f32 / self.resolution,
            None => 0.0,
        };
        self.previous_timestamp = Some(now);

        log::trace!("cycle at tick {}, dt = {} s", now, self.elapsed_seconds);
        self.elapsed_seconds
    }

    /// Forget the previous timestamp so the next cycle reports zero elapsed time
    pub fn restart(&mut self) {
        self.previous_timestamp = None;
        self.current_timestamp = 0;
        self.elapsed_seconds = 0.0;
    }

    /// Elapsed time reported by the last [`advance_time`](Self::advance_time)
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed_seconds
    }

    /// Timestamp recorded by the last cycle
    pub fn current_timestamp(&self) -> u32 {
        self.current_timestamp
    }

    /// Minimum ticks between cycles
    pub fn period_ticks(&self) -> u32 {
        self.period_ticks
    }

    /// Underlying tick source
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn wait_until_elapsed(&self, previous: u32) -> u32 {
        loop {
            let now = self.clock.now_ticks();
            if now.wrapping_sub(previous) >= self.period_ticks {
                return now;
            }
            core::hint::spin_loop();
        }
    }
}

/// Synthetic tick source for host testing
///
/// Every read returns the current value and then advances the counter by a
/// fixed step, so a spinning [`CycleTimer`] always makes progress without any
/// real-time delay.
///
/// # Example
/// ```
/// use dcm_ahrs::{MockTicks, TickSource};
///
/// let clock = MockTicks::new(1_000, 10);
/// assert_eq!(clock.now_ticks(), 0);
/// assert_eq!(clock.now_ticks(), 10);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ticks(), 120);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTicks {
    current: Cell<u32>,
    step: u32,
    resolution: u32,
}

impl MockTicks {
    /// Counter starting at zero, advancing `step` ticks per read
    pub fn new(resolution: u32, step: u32) -> Self {
        Self::with_initial(resolution, step, 0)
    }

    /// Counter starting at `initial`
    pub fn with_initial(resolution: u32, step: u32, initial: u32) -> Self {
        Self {
            current: Cell::new(initial),
            step,
            resolution,
        }
    }

    /// Move the counter forward without reading it
    pub fn advance(&self, ticks: u32) {
        self.current.set(self.current.get().wrapping_add(ticks));
    }

    /// Current value without advancing
    pub fn peek(&self) -> u32 {
        self.current.get()
    }
}

impl TickSource for MockTicks {
    fn now_ticks(&self) -> u32 {
        let now = self.current.get();
        self.current.set(now.wrapping_add(self.step));
        now
    }

    fn resolution(&self) -> u32 {
        self.resolution
    }
}
