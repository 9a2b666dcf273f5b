/// Ease-out cubic: fast start, settles gently on the target.
pub fn ease_out_cubic(p: f64) -> f64 {
    let q = 1.0 - p.clamp(0.0, 1.0);
    1.0 - q * q * q
}

/// Animated counter ramping 0 → target over a fixed tick count.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Counter {
    pub target: f64,
    pub total_ticks: u32,
    ticks: u32,
}

impl Counter {
    pub fn new(target: f64, total_ticks: u32) -> Self {
        Self {
            target,
            total_ticks: total_ticks.max(1),
            ticks: 0,
        }
    }

    pub fn tick(&mut self) -> f64 {
        if self.ticks < self.total_ticks {
            self.ticks += 1;
        }
        self.value()
    }

    pub fn value(&self) -> f64 {
        self.target * ease_out_cubic(self.ticks as f64 / self.total_ticks as f64)
    }

    /// Integer display value, rounded down while running so the target is
    /// only ever shown once reached.
    pub fn display(&self) -> u64 {
        if self.done() {
            self.target.round() as u64
        } else {
            self.value().floor() as u64
        }
    }

    pub fn done(&self) -> bool {
        self.ticks >= self.total_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::{Counter, ease_out_cubic};

    #[test]
    fn easing_is_monotonic_and_bounded() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = ease_out_cubic(i as f64 / 100.0);
            assert!(v >= prev);
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
    }

    #[test]
    fn counter_reaches_exact_target() {
        let mut c = Counter::new(150.0, 60);
        let mut last = 0.0;
        while !c.done() {
            last = c.tick();
        }
        assert_eq!(last, 150.0);
        assert_eq!(c.display(), 150);
    }

    #[test]
    fn counter_never_overshoots() {
        let mut c = Counter::new(42.0, 30);
        for _ in 0..100 {
            assert!(c.tick() <= 42.0 + 1e-12);
        }
    }
}
