/// Output dimensions in physical pixels.
///
/// Kept separate from the camera so a resize updates exactly two things:
/// this and the camera aspect.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::Viewport;

    #[test]
    fn resize_matches_viewport_exactly() {
        let mut vp = Viewport::new(800, 600);
        vp.resize(1920, 1080);
        assert_eq!(vp, Viewport::new(1920, 1080));
        assert!((vp.aspect() - 1920.0 / 1080.0).abs() < 1e-12);
    }

    #[test]
    fn zero_dimensions_are_clamped_to_one() {
        let vp = Viewport::new(0, 0);
        assert_eq!((vp.width, vp.height), (1, 1));
    }
}
