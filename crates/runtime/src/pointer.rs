use foundation::math::Vec2;

/// Scale from pixels-off-center to the smoothed pointer value.
pub const POINTER_SCALE: f64 = 0.0002;

/// Per-frame exponential decay factor.
pub const POINTER_DECAY: f64 = 0.95;

/// Smoothed pointer state.
///
/// A move event overwrites the value (it does not accumulate); every frame
/// both axes decay toward zero. The decay is per frame, not per second, so
/// it follows the same nominal timebase as the rest of the scene.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move, given client coordinates and viewport size.
    pub fn set_from_viewport(&mut self, client: Vec2, viewport: Vec2) {
        self.x = (client.x - viewport.x / 2.0) * POINTER_SCALE;
        self.y = (client.y - viewport.y / 2.0) * POINTER_SCALE;
    }

    /// Apply one frame of decay.
    pub fn decay(&mut self) {
        self.x *= POINTER_DECAY;
        self.y *= POINTER_DECAY;
    }

    /// Frames until a value of magnitude `start` falls below `eps`.
    pub fn frames_to_settle(start: f64, eps: f64) -> u32 {
        let start = start.abs();
        if start <= eps || eps <= 0.0 {
            return 0;
        }
        ((eps / start).ln() / POINTER_DECAY.ln()).ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::{POINTER_DECAY, PointerState};
    use foundation::math::Vec2;

    #[test]
    fn move_overwrites_offset_from_center() {
        let mut p = PointerState::new();
        p.set_from_viewport(Vec2::new(1920.0, 0.0), Vec2::new(1920.0, 1080.0));
        assert!((p.x - 960.0 * 0.0002).abs() < 1e-12);
        assert!((p.y + 540.0 * 0.0002).abs() < 1e-12);

        // A second move replaces, never accumulates.
        p.set_from_viewport(Vec2::new(960.0, 540.0), Vec2::new(1920.0, 1080.0));
        assert_eq!(p, PointerState::new());
    }

    #[test]
    fn decay_is_a_strict_contraction() {
        let mut p = PointerState { x: 0.3, y: -0.2 };
        for n in 1..=50u32 {
            p.decay();
            let k = POINTER_DECAY.powi(n as i32);
            assert!((p.x - 0.3 * k).abs() < 1e-15);
            assert!((p.y + 0.2 * k).abs() < 1e-15);
        }
    }

    #[test]
    fn settles_below_epsilon_in_predicted_frames() {
        let start = 0.3;
        let eps = 1e-6;
        let n = PointerState::frames_to_settle(start, eps);
        let mut p = PointerState { x: start, y: 0.0 };
        for _ in 0..n {
            p.decay();
        }
        assert!(p.x.abs() < eps, "still {} after {} frames", p.x, n);

        // One frame earlier it had not settled yet.
        let mut q = PointerState { x: start, y: 0.0 };
        for _ in 0..n.saturating_sub(1) {
            q.decay();
        }
        assert!(q.x.abs() >= eps);
    }

    #[test]
    fn zero_start_needs_no_frames() {
        assert_eq!(PointerState::frames_to_settle(0.0, 1e-6), 0);
    }
}
