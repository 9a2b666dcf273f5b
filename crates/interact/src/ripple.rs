use foundation::math::Vec2;

/// Expanding click ripple: centered on the click, sized to cover the rect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ripple {
    pub center: Vec2,
    pub radius: f64,
}

/// Smallest circle around the click point that covers the whole rect, i.e.
/// the distance to the farthest corner.
pub fn ripple_at(click: Vec2, size: Vec2) -> Ripple {
    let corners = [
        Vec2::zero(),
        Vec2::new(size.x, 0.0),
        Vec2::new(0.0, size.y),
        size,
    ];
    let radius = corners
        .iter()
        .map(|c| {
            let d = *c - click;
            (d.x * d.x + d.y * d.y).sqrt()
        })
        .fold(0.0f64, f64::max);

    Ripple {
        center: click,
        radius,
    }
}

#[cfg(test)]
mod tests {
    use super::ripple_at;
    use foundation::math::Vec2;

    #[test]
    fn center_click_reaches_the_corners() {
        let r = ripple_at(Vec2::new(50.0, 50.0), Vec2::new(100.0, 100.0));
        assert!((r.radius - (50.0f64 * 50.0 * 2.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn corner_click_spans_the_diagonal() {
        let r = ripple_at(Vec2::zero(), Vec2::new(300.0, 400.0));
        assert!((r.radius - 500.0).abs() < 1e-9);
        assert_eq!(r.center, Vec2::zero());
    }

    #[test]
    fn radius_covers_every_corner() {
        let size = Vec2::new(220.0, 60.0);
        let click = Vec2::new(10.0, 55.0);
        let r = ripple_at(click, size);
        for corner in [
            Vec2::zero(),
            Vec2::new(size.x, 0.0),
            Vec2::new(0.0, size.y),
            size,
        ] {
            let d = corner - click;
            assert!((d.x * d.x + d.y * d.y).sqrt() <= r.radius + 1e-9);
        }
    }
}
