use winit::dpi::{PhysicalPosition, PhysicalSize};

/// Fraction of the remaining distance covered per frame.
const SMOOTHING: f32 = 0.1;

/// Tracks the pointer in normalized device coordinates.
///
/// Cursor events only ever write `target`; the render loop advances `current`
/// a fixed fraction of the remaining distance each frame, so the rendered
/// position trails raw input instead of jittering with it. The approach is
/// asymptotic: `current` converges toward the last `target` and then holds.
pub(crate) struct PointerTracker {
    current: [f32; 2],
    target: [f32; 2],
}

impl PointerTracker {
    pub(crate) fn new() -> Self {
        Self {
            current: [0.0, 0.0],
            target: [0.0, 0.0],
        }
    }

    /// Maps a cursor position in physical pixels to [-1, 1] with Y flipped
    /// (screen-down becomes math-up) and records it as the new target.
    pub(crate) fn handle_cursor_moved(
        &mut self,
        position: PhysicalPosition<f64>,
        viewport: PhysicalSize<u32>,
    ) {
        let width = viewport.width.max(1) as f32;
        let height = viewport.height.max(1) as f32;
        self.target = [
            (position.x as f32 / width) * 2.0 - 1.0,
            -(position.y as f32 / height) * 2.0 + 1.0,
        ];
    }

    /// Moves `current` toward `target` by the smoothing fraction and returns
    /// the new rendered position. Called once per frame, before drawing.
    pub(crate) fn advance(&mut self) -> [f32; 2] {
        self.current[0] += (self.target[0] - self.current[0]) * SMOOTHING;
        self.current[1] += (self.target[1] - self.current[1]) * SMOOTHING;
        self.current
    }

    #[cfg(test)]
    fn current(&self) -> [f32; 2] {
        self.current
    }

    #[cfg(test)]
    fn target(&self) -> [f32; 2] {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
        let dx = a[0] - b[0];
        let dy = a[1] - b[1];
        (dx * dx + dy * dy).sqrt()
    }

    #[test]
    fn normalizes_corners_and_center() {
        let viewport = PhysicalSize::new(800, 600);
        let mut tracker = PointerTracker::new();

        tracker.handle_cursor_moved(PhysicalPosition::new(0.0, 0.0), viewport);
        assert_eq!(tracker.target(), [-1.0, 1.0]);

        tracker.handle_cursor_moved(PhysicalPosition::new(800.0, 600.0), viewport);
        assert_eq!(tracker.target(), [1.0, -1.0]);

        tracker.handle_cursor_moved(PhysicalPosition::new(400.0, 300.0), viewport);
        assert_eq!(tracker.target(), [0.0, 0.0]);
    }

    #[test]
    fn cursor_events_do_not_touch_the_rendered_position() {
        let mut tracker = PointerTracker::new();
        tracker.handle_cursor_moved(
            PhysicalPosition::new(640.0, 0.0),
            PhysicalSize::new(1280, 720),
        );
        assert_eq!(tracker.current(), [0.0, 0.0]);
    }

    #[test]
    fn smoothing_decays_geometrically_toward_a_held_target() {
        let mut tracker = PointerTracker::new();
        tracker.handle_cursor_moved(
            PhysicalPosition::new(1280.0, 0.0),
            PhysicalSize::new(1280, 720),
        );

        let target = tracker.target();
        let initial = distance(tracker.current(), target);
        let mut previous = initial;
        for frame in 1..=20 {
            tracker.advance();
            let remaining = distance(tracker.current(), target);
            assert!(remaining <= previous, "overshoot at frame {frame}");
            let expected = initial * 0.9_f32.powi(frame);
            assert!(
                (remaining - expected).abs() < 1e-4,
                "frame {frame}: remaining {remaining}, expected {expected}"
            );
            previous = remaining;
        }
    }

    #[test]
    fn holds_position_once_converged() {
        let mut tracker = PointerTracker::new();
        let viewport = PhysicalSize::new(1000, 1000);
        tracker.handle_cursor_moved(PhysicalPosition::new(750.0, 250.0), viewport);
        for _ in 0..400 {
            tracker.advance();
        }
        let settled = tracker.current();
        assert!(distance(settled, tracker.target()) < 1e-5);

        // No further input: advancing must not drift away from the target.
        for _ in 0..10 {
            tracker.advance();
        }
        assert!(distance(tracker.current(), tracker.target()) <= distance(settled, tracker.target()));
    }
}
