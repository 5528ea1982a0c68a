//! Loop playback driven by an external clock.
//!
//! The driver owns the only mutable state of the engine: where in the current
//! loop the animation is. It knows nothing about timers or render loops; hosts
//! feed it either frame deltas ([`PlaybackDriver::advance`]) or an absolute
//! clock ([`PlaybackDriver::seek`]).

mod easing;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::scene::Scene;

pub use easing::Easing;

/// Lifecycle of a single loop. `Complete` always falls back to `Reset` on the
/// next update; playback never stops on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackPhase {
    Reset,
    Animating,
    Complete,
}

/// Where an absolute clock value falls within the repeating loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopPosition {
    /// Number of loops fully played before this one.
    pub loop_index: u64,
    pub phase: PlaybackPhase,
    /// Linear progress through the current loop, before easing.
    pub progress: f32,
}

#[derive(Debug, Clone)]
pub struct PlaybackDriver {
    duration: Duration,
    lead_in: Duration,
    easing: Easing,
    lead_in_remaining: Duration,
    elapsed: Duration,
    overshoot: Duration,
    phase: PlaybackPhase,
    loops_completed: u64,
}

impl PlaybackDriver {
    /// Creates a driver for loops of `duration_ms`, floored at one millisecond.
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms.max(1)),
            lead_in: Duration::ZERO,
            easing: Easing::Linear,
            lead_in_remaining: Duration::ZERO,
            elapsed: Duration::ZERO,
            overshoot: Duration::ZERO,
            phase: PlaybackPhase::Reset,
            loops_completed: 0,
        }
    }

    pub fn for_scene(scene: &Scene) -> Self {
        Self::new(scene.duration_ms())
    }

    /// Delay before the first loop starts. Later loops start back-to-back.
    pub fn with_lead_in(mut self, lead_in: Duration) -> Self {
        self.lead_in = lead_in;
        self.lead_in_remaining = lead_in;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn loops_completed(&self) -> u64 {
        self.loops_completed
    }

    /// Linear fraction of the current loop that has elapsed.
    pub fn raw_progress(&self) -> f32 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }

    /// Eased progress in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        self.easing.apply(self.raw_progress())
    }

    /// Scene timestamp for the current progress, rounded to milliseconds.
    pub fn scene_time_ms(&self) -> u64 {
        (self.progress() as f64 * self.duration.as_millis() as f64).round() as u64
    }

    /// Moves playback forward by `delta` and returns the new progress.
    ///
    /// Time past the end of a loop is carried into the next one, which starts
    /// on the following call.
    pub fn advance(&mut self, delta: Duration) -> f32 {
        if self.phase == PlaybackPhase::Complete {
            self.restart_loop();
        }

        let mut delta = delta;
        if !self.lead_in_remaining.is_zero() {
            let consumed = delta.min(self.lead_in_remaining);
            self.lead_in_remaining -= consumed;
            delta -= consumed;
        }

        self.elapsed += delta;
        if self.elapsed >= self.duration {
            self.overshoot = self.elapsed - self.duration;
            self.elapsed = self.duration;
            self.phase = PlaybackPhase::Complete;
            tracing::trace!(loops_completed = self.loops_completed, "loop complete");
        } else if !self.elapsed.is_zero() {
            self.phase = PlaybackPhase::Animating;
        }

        self.progress()
    }

    /// Position of an absolute host clock, measured from when playback
    /// started. Depends only on `clock`, never on the driver's history.
    pub fn position_at(&self, clock: Duration) -> LoopPosition {
        let Some(active) = clock.checked_sub(self.lead_in) else {
            return LoopPosition {
                loop_index: 0,
                phase: PlaybackPhase::Reset,
                progress: 0.0,
            };
        };

        let span = self.duration.as_nanos();
        let within = active.as_nanos() % span;
        LoopPosition {
            loop_index: (active.as_nanos() / span) as u64,
            phase: if within == 0 {
                PlaybackPhase::Reset
            } else {
                PlaybackPhase::Animating
            },
            progress: (within as f64 / span as f64) as f32,
        }
    }

    /// Jumps to an absolute host clock value and returns the new progress.
    pub fn seek(&mut self, clock: Duration) -> f32 {
        let position = self.position_at(clock);
        let span = self.duration.as_nanos();
        let within = clock.saturating_sub(self.lead_in).as_nanos() % span;

        self.lead_in_remaining = self.lead_in.saturating_sub(clock);
        self.elapsed = Duration::from_nanos(within as u64);
        self.overshoot = Duration::ZERO;
        self.phase = position.phase;
        self.loops_completed = position.loop_index;
        self.progress()
    }

    /// Returns to the state right after construction.
    pub fn reset(&mut self) {
        self.lead_in_remaining = self.lead_in;
        self.elapsed = Duration::ZERO;
        self.overshoot = Duration::ZERO;
        self.phase = PlaybackPhase::Reset;
        self.loops_completed = 0;
    }

    fn restart_loop(&mut self) {
        let span = self.duration.as_nanos();
        let overshoot = self.overshoot.as_nanos();

        self.loops_completed += 1 + (overshoot / span) as u64;
        self.elapsed = Duration::from_nanos((overshoot % span) as u64);
        self.overshoot = Duration::ZERO;
        self.phase = if self.elapsed.is_zero() {
            PlaybackPhase::Reset
        } else {
            PlaybackPhase::Animating
        };
    }
}
