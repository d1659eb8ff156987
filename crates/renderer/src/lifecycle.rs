//! Render-loop phase tracking and the synthetic frame clock.
//!
//! The loop is an explicit three-state machine rather than a chain of
//! self-rescheduling callbacks: the window module checks `is_running` before
//! rendering or requesting another redraw, so cancellation is a flag flip and
//! a late in-flight redraw is dropped instead of drawing after teardown.

/// Synthetic time advance per frame, shared by both layers.
pub(crate) const TIME_STEP: f32 = 0.01;

/// Lifecycle of the per-frame scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoopPhase {
    /// Resources exist but no frame has been scheduled yet.
    Uninitialized,
    /// Frames are scheduled once per display refresh.
    Running,
    /// Teardown has begun; nothing renders or reschedules anymore.
    Stopped,
}

impl LoopPhase {
    /// Enters `Running`. Only legal from `Uninitialized`; a stopped loop is
    /// never restarted, the host remounts instead.
    pub(crate) fn start(&mut self) {
        if *self == LoopPhase::Uninitialized {
            *self = LoopPhase::Running;
        }
    }

    /// Enters `Stopped` from any state. Idempotent.
    pub(crate) fn stop(&mut self) {
        *self = LoopPhase::Stopped;
    }

    pub(crate) fn is_running(&self) -> bool {
        *self == LoopPhase::Running
    }
}

/// Per-layer synthetic time counters.
///
/// Each layer owns an independent counter advanced by a fixed step every
/// frame. Wall-clock deltas are deliberately ignored: the effect animates at
/// one step per presented frame, matching the source material.
pub(crate) struct FrameClock {
    peach_time: f32,
    pink_time: f32,
}

impl FrameClock {
    pub(crate) fn new() -> Self {
        Self {
            peach_time: 0.0,
            pink_time: 0.0,
        }
    }

    /// Advances both counters by one frame step, peach first.
    pub(crate) fn advance(&mut self) {
        self.peach_time += TIME_STEP;
        self.pink_time += TIME_STEP;
    }

    pub(crate) fn peach_time(&self) -> f32 {
        self.peach_time
    }

    pub(crate) fn pink_time(&self) -> f32 {
        self.pink_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_starts_only_from_uninitialized() {
        let mut phase = LoopPhase::Uninitialized;
        assert!(!phase.is_running());
        phase.start();
        assert!(phase.is_running());

        phase.stop();
        assert!(!phase.is_running());
        phase.start();
        assert_eq!(phase, LoopPhase::Stopped);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut phase = LoopPhase::Running;
        phase.stop();
        phase.stop();
        assert_eq!(phase, LoopPhase::Stopped);
    }

    #[test]
    fn both_times_advance_one_step_per_frame() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.peach_time(), 0.0);
        assert_eq!(clock.pink_time(), 0.0);

        for _ in 0..250 {
            clock.advance();
        }

        let expected = 250.0 * TIME_STEP;
        assert!((clock.peach_time() - expected).abs() < 1e-4);
        assert!((clock.pink_time() - expected).abs() < 1e-4);
        assert_eq!(clock.peach_time(), clock.pink_time());
    }
}
