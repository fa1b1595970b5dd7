//! Press-and-hold repeat trigger.
//!
//! A [`RepeatTrigger`] turns a held control into a stream of fires: one
//! immediately on press, then one per elapsed interval until release. Time is
//! supplied by the caller as seconds (egui's `input.time`), which keeps the
//! trigger deterministic and frame-driven. The UI polls it once per frame and
//! asks for a repaint at [`RepeatTrigger::next_fire_in`] while it is held.

use crate::error::FloorMapError;
use std::time::Duration;

/// Hold session state.
#[derive(Debug, Clone, Copy, PartialEq)]
enum HoldState {
    Idle,
    Holding {
        /// Timestamp of the press, in seconds
        pressed_at: f64,
        /// Fires already reported for this session
        fired: u64,
    },
}

/// Converts a press-and-hold gesture into repeated fires at a fixed interval.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatTrigger {
    interval: Duration,
    state: HoldState,
}

impl RepeatTrigger {
    /// Creates an idle trigger.
    ///
    /// # Errors
    ///
    /// Returns [`FloorMapError::InvalidRepeatInterval`] for a zero interval.
    pub fn new(interval: Duration) -> Result<Self, FloorMapError> {
        if interval.is_zero() {
            return Err(FloorMapError::InvalidRepeatInterval(interval));
        }
        Ok(Self {
            interval,
            state: HoldState::Idle,
        })
    }

    /// The configured repeat interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a press is currently held.
    pub fn is_holding(&self) -> bool {
        matches!(self.state, HoldState::Holding { .. })
    }

    /// Starts a hold session at `now` and returns the number of fires due (1).
    ///
    /// Pressing while already holding behaves like [`RepeatTrigger::poll`].
    pub fn press(&mut self, now: f64) -> u32 {
        if self.is_holding() {
            return self.poll(now);
        }
        log::trace!("repeat trigger pressed at {now:.3}");
        self.state = HoldState::Holding {
            pressed_at: now,
            fired: 0,
        };
        self.poll(now)
    }

    /// Returns the fires that came due since the last call. Zero when idle.
    pub fn poll(&mut self, now: f64) -> u32 {
        match &mut self.state {
            HoldState::Idle => 0,
            HoldState::Holding { pressed_at, fired } => {
                let due = Self::fires_due(self.interval, *pressed_at, now);
                let fresh = due.saturating_sub(*fired);
                *fired = due.max(*fired);
                u32::try_from(fresh).unwrap_or(u32::MAX)
            }
        }
    }

    /// Ends the hold session, returning any fires that came due before `now`.
    ///
    /// Releasing an idle trigger is a no-op returning zero.
    pub fn release(&mut self, now: f64) -> u32 {
        if !self.is_holding() {
            return 0;
        }
        let remaining = self.poll(now);
        self.cancel();
        log::trace!("repeat trigger released at {now:.3}");
        remaining
    }

    /// Drops the hold session without reporting pending fires.
    pub fn cancel(&mut self) {
        self.state = HoldState::Idle;
    }

    /// Feeds the current pointer state for one frame and returns the fires to run.
    ///
    /// `held` is true while the pointer is down on the control and still over
    /// it; leaving the control counts as a release.
    pub fn update(&mut self, held: bool, now: f64) -> u32 {
        match (held, self.is_holding()) {
            (true, false) => self.press(now),
            (true, true) => self.poll(now),
            (false, true) => self.release(now),
            (false, false) => 0,
        }
    }

    /// Like [`RepeatTrigger::update`], running `action` once per fire.
    pub fn update_with(&mut self, held: bool, now: f64, mut action: impl FnMut()) -> u32 {
        let fires = self.update(held, now);
        for _ in 0..fires {
            action();
        }
        fires
    }

    /// Time until the next fire comes due, or `None` when idle.
    pub fn next_fire_in(&self, now: f64) -> Option<Duration> {
        let HoldState::Holding { pressed_at, fired } = self.state else {
            return None;
        };
        let next_at_ns = u128::from(fired) * self.interval.as_nanos();
        let wait_ns = next_at_ns.saturating_sub(Self::elapsed_nanos(pressed_at, now));
        Some(Duration::from_nanos(u64::try_from(wait_ns).unwrap_or(u64::MAX)))
    }

    /// Total fires owed to a session pressed at `pressed_at`: `1 + floor(elapsed / interval)`.
    fn fires_due(interval: Duration, pressed_at: f64, now: f64) -> u64 {
        // `new` rejects zero, so the divisor is at least one nanosecond.
        let ticks = Self::elapsed_nanos(pressed_at, now) / interval.as_nanos();
        u64::try_from(ticks).unwrap_or(u64::MAX).saturating_add(1)
    }

    // Rounded to whole nanoseconds so float timestamps like 0.6 / 0.2 do not lose a tick.
    fn elapsed_nanos(pressed_at: f64, now: f64) -> u128 {
        let elapsed = (now - pressed_at).max(0.0);
        (elapsed * 1_000_000_000.0).round() as u128
    }
}
