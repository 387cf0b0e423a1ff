//! Countdown timer polled by UI code.
//!
//! A [`Timer`] keeps a sampled reading of "now" in `time`, refreshed by a
//! background sampler once [`Timer::init`] has been called. `done` compares
//! that reading against `start + duration`, so its answer lags the clock by
//! at most one sample interval. The sampler is owned by the timer and is
//! stopped by [`Timer::close`] or when the timer is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Sender, select};
use log::{debug, error, trace};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::instant::Instant;

pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone, Debug)]
pub struct TimerOptions {
    /// How often the sampler refreshes `time`.
    pub sample_interval: Duration,
}

impl Default for TimerOptions {
    fn default() -> Self {
        Self {
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
        }
    }
}

#[derive(Debug)]
struct TimerState {
    start: Instant,
    time: Instant,
    duration: i64,
    closed: bool,
}

impl TimerState {
    fn record(&mut self, now: Instant) {
        // time never moves backwards, but an invalid reading is always replaced
        if !self.time.is_valid() || now > self.time {
            self.time = now;
        }
    }

    fn done(&self) -> bool {
        self.closed || self.time.millis() >= self.start.millis() + self.duration as f64
    }
}

pub struct Timer<C: Clock = SystemClock> {
    state: Arc<Mutex<TimerState>>,
    clock: Arc<C>,
    options: TimerOptions,
    sampler: Option<Sampler>,
}

impl Timer<SystemClock> {
    /// A timer that is done `duration` milliseconds after now.
    pub fn new(duration: i64) -> Self {
        Self::with_clock(duration, SystemClock)
    }
}

impl<C: Clock> Timer<C> {
    pub fn with_clock(duration: i64, clock: C) -> Self {
        Self::with_options(duration, clock, TimerOptions::default())
    }

    pub fn with_options(duration: i64, clock: C, options: TimerOptions) -> Self {
        let now = clock.now();
        Self {
            state: Arc::new(Mutex::new(TimerState {
                start: now,
                time: now,
                duration,
                closed: false,
            })),
            clock: Arc::new(clock),
            options,
            sampler: None,
        }
    }

    /// Starts sampling the clock in the background.
    ///
    /// Does nothing if the timer is already sampling or has been closed.
    pub fn init(&mut self) -> Result<&mut Self> {
        if self.sampler.is_none() && !self.is_closed() {
            self.sampler = Some(Sampler::spawn(
                self.state.clone(),
                self.clock.clone(),
                self.options.sample_interval,
            )?);
        }
        Ok(self)
    }

    /// True once closed, or once the last sampled time reaches
    /// `start + duration`.
    pub fn done(&self) -> bool {
        self.lock().done()
    }

    /// Starts counting `duration` from now. `closed` and the sampler are
    /// left as they are.
    pub fn restart(&mut self, duration: i64) {
        let now = self.clock.now();
        let mut state = self.lock();
        state.start = now;
        state.duration = duration;
    }

    /// Marks the timer done for good and stops the sampler.
    pub fn close(&mut self) {
        self.lock().closed = true;
        // dropping joins the thread
        drop(self.sampler.take());
    }

    /// Records the clock's current reading right away.
    pub fn sample(&self) {
        sample(&self.state, self.clock.as_ref());
    }

    pub fn start(&self) -> Instant {
        self.lock().start
    }

    pub fn time(&self) -> Instant {
        self.lock().time
    }

    pub fn duration(&self) -> i64 {
        self.lock().duration
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn is_sampling(&self) -> bool {
        self.sampler.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, TimerState> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<TimerState>) -> MutexGuard<'_, TimerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn sample<C: Clock>(state: &Mutex<TimerState>, clock: &C) {
    let now = clock.now();
    trace!("timer sample at {now}");
    lock(state).record(now);
}

/// Background thread that samples the clock on a fixed tick until its stop
/// channel disconnects.
struct Sampler {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Sampler {
    fn spawn<C: Clock>(
        state: Arc<Mutex<TimerState>>,
        clock: Arc<C>,
        interval: Duration,
    ) -> Result<Self> {
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);
        let ticker = crossbeam_channel::tick(interval);
        let handle = thread::Builder::new()
            .name("driptime-sampler".to_string())
            .spawn(move || {
                debug!("timer sampler started, interval {interval:?}");
                loop {
                    select! {
                        recv(ticker) -> _ => sample(&state, clock.as_ref()),
                        recv(stop_rx) -> _ => break,
                    }
                }
                debug!("timer sampler stopped");
            })?;
        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        // disconnecting the channel wakes the select
        drop(self.stop.take());
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            error!("timer sampler panicked");
        }
    }
}
