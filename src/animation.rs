//! Transition clock driving the frame cycle.

use std::time::Duration;

use crate::easing::Easing;

/// Clock timing configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClockConfig {
    /// Progress added on every tick while advancing
    pub speed: f64,
    /// Pause at full progress before the next transition starts
    pub hold: Duration,
    /// Curve applied by [`TransitionClock::eased_progress`]
    pub easing: Easing,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            speed: 0.005,
            hold: Duration::from_millis(600),
            easing: Easing::CubicInOut,
        }
    }
}

/// Current phase of the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockPhase {
    /// Progress is rising toward 1
    Advancing,
    /// Progress is pinned at 1; `since` is the tick time the hold began
    Holding { since: Duration },
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockEvent {
    /// Progress moved forward
    Advanced,
    /// Progress reached 1 on this tick
    HoldStarted,
    /// Still holding
    Holding,
    /// The hold elapsed and a new transition began
    TransitionStarted { id: u32 },
}

/// Snapshot of the clock for renderers and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionState {
    pub current_index: usize,
    pub next_index: usize,
    pub progress: f64,
    pub holding: bool,
    pub hold_elapsed: Duration,
    pub transition_id: u32,
}

/// Single-writer clock for the endless frame cycle.
///
/// The clock does not read wall time. The caller passes a monotonic
/// timestamp (time since the driver started) to [`tick`](Self::tick) once
/// per display refresh.
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use cascii_morph::{ClockConfig, ClockEvent, TransitionClock};
///
/// let config = ClockConfig { speed: 0.5, ..ClockConfig::default() };
/// let mut clock = TransitionClock::new(3, config);
///
/// assert_eq!(clock.tick(Duration::ZERO), ClockEvent::Advanced);
/// assert_eq!(clock.tick(Duration::from_millis(16)), ClockEvent::HoldStarted);
/// assert_eq!(clock.progress(), 1.0);
///
/// // The hold lasts 600 ms by default
/// let event = clock.tick(Duration::from_millis(700));
/// assert_eq!(event, ClockEvent::TransitionStarted { id: 2 });
/// assert_eq!(clock.current_index(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TransitionClock {
    config: ClockConfig,
    /// Total number of frames in the cycle
    frame_count: usize,
    /// Source frame of the running transition
    current: usize,
    /// Raw (uneased) progress
    progress: f64,
    phase: ClockPhase,
    /// Hold time measured at the last tick
    hold_elapsed: Duration,
    transition_id: u32,
}

impl TransitionClock {
    /// Create a clock at the start of the first transition.
    ///
    /// The first transition has id 1. A frame count of 0 is treated as 1.
    pub fn new(frame_count: usize, config: ClockConfig) -> Self {
        Self {
            config,
            frame_count: frame_count.max(1),
            current: 0,
            progress: 0.0,
            phase: ClockPhase::Advancing,
            hold_elapsed: Duration::ZERO,
            transition_id: 1,
        }
    }

    #[cfg(test)]
    fn with_transition_id(mut self, transition_id: u32) -> Self {
        self.transition_id = transition_id;
        self
    }

    #[inline]
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Target frame of the running transition.
    #[inline]
    pub fn next_index(&self) -> usize {
        (self.current + 1) % self.frame_count
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Progress passed through the configured easing curve.
    #[inline]
    pub fn eased_progress(&self) -> f64 {
        self.config.easing.apply(self.progress)
    }

    #[inline]
    pub fn transition_id(&self) -> u32 {
        self.transition_id
    }

    #[inline]
    pub fn phase(&self) -> ClockPhase {
        self.phase
    }

    #[inline]
    pub fn is_holding(&self) -> bool {
        matches!(self.phase, ClockPhase::Holding { .. })
    }

    pub fn state(&self) -> TransitionState {
        TransitionState {
            current_index: self.current,
            next_index: self.next_index(),
            progress: self.progress,
            holding: self.is_holding(),
            hold_elapsed: self.hold_elapsed,
            transition_id: self.transition_id,
        }
    }

    /// Advance the clock by one tick.
    ///
    /// Call this once per display refresh, before rendering.
    pub fn tick(&mut self, now: Duration) -> ClockEvent {
        match self.phase {
            ClockPhase::Advancing => {
                self.progress += self.config.speed;
                if self.progress >= 1.0 {
                    self.progress = 1.0;
                    self.phase = ClockPhase::Holding { since: now };
                    self.hold_elapsed = Duration::ZERO;
                    tracing::debug!(transition_id = self.transition_id, "transition reached hold");
                    ClockEvent::HoldStarted
                } else {
                    ClockEvent::Advanced
                }
            }
            ClockPhase::Holding { since } => {
                self.hold_elapsed = now.saturating_sub(since);
                if self.hold_elapsed >= self.config.hold {
                    self.start_next_transition();
                    ClockEvent::TransitionStarted {
                        id: self.transition_id,
                    }
                } else {
                    ClockEvent::Holding
                }
            }
        }
    }

    fn start_next_transition(&mut self) {
        self.current = self.next_index();
        self.progress = 0.0;
        self.phase = ClockPhase::Advancing;
        self.hold_elapsed = Duration::ZERO;
        self.transition_id = self.transition_id.wrapping_add(1);

        tracing::debug!(
            transition_id = self.transition_id,
            from = self.current,
            to = self.next_index(),
            "transition started"
        );
    }
}
