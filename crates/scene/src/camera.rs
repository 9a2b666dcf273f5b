use foundation::math::Vec3;

/// Perspective camera, fixed for the page's lifetime except for aspect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_rad: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl PerspectiveCamera {
    /// The one camera the page uses: 75° fov, pulled back on +z.
    pub fn portfolio(aspect: f64) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 65.0),
            target: Vec3::zero(),
            fov_y_rad: 75f64.to_radians(),
            aspect: aspect.max(1e-6),
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Viewport resize: aspect is the only state that changes.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.aspect = if height <= 0.0 {
            1.0
        } else {
            (width / height).max(1e-6)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::PerspectiveCamera;

    #[test]
    fn resize_sets_aspect_to_width_over_height() {
        let mut cam = PerspectiveCamera::portfolio(1.0);
        cam.set_viewport(1920.0, 1080.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_height_falls_back_to_square() {
        let mut cam = PerspectiveCamera::portfolio(1.0);
        cam.set_viewport(800.0, 0.0);
        assert_eq!(cam.aspect, 1.0);
    }
}
