use foundation::time::Time;

/// Nominal per-frame time increment.
///
/// The clock advances by this amount every displayed frame regardless of how
/// long the frame really took. Under frame-rate variation the accumulated
/// time drifts from wall-clock time; that is the intended motion model, not
/// a bug to correct with delta timing.
pub const NOMINAL_DT_S: f64 = 0.01;

/// Deterministic frame metadata.
///
/// This is the only timebase the scene sees. It is intentionally small and
/// pure so animation updates can be recorded and replayed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Fixed delta time (seconds).
    pub dt_s: f64,
    /// Engine time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn start() -> Self {
        Self::new(0, NOMINAL_DT_S)
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, NOMINAL_DT_S};
    use foundation::time::Time;

    #[test]
    fn frame_time_is_deterministic() {
        let a = Frame::new(10, NOMINAL_DT_S);
        let b = Frame::new(10, NOMINAL_DT_S);
        assert_eq!(a, b);
        assert_eq!(a.time, Time(0.1));
    }

    #[test]
    fn next_advances_index_and_time() {
        let f0 = Frame::start();
        let f1 = f0.next();
        assert_eq!(f1.index, 1);
        assert_eq!(f1.time, Time(NOMINAL_DT_S));
    }

    #[test]
    fn time_is_index_scaled_not_accumulated() {
        // Index-derived time cannot accumulate floating error over long runs.
        let mut f = Frame::start();
        for _ in 0..100_000 {
            f = f.next();
        }
        assert_eq!(f.time, Time(100_000.0 * NOMINAL_DT_S));
    }
}
