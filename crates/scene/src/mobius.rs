use foundation::math::Vec3;

/// Samples along the strip's long axis.
pub const U_SEGMENTS: u32 = 120;
/// Samples across the strip.
pub const V_SEGMENTS: u32 = 30;
/// Ring radius of the strip's center line.
pub const RADIUS: f64 = 25.0;
/// Total strip width in world units.
pub const STRIP_WIDTH: f64 = 0.8;

/// The half-twist parametric map, over (u, v) in the unit square.
///
/// One traversal of u rotates the cross-section by half a turn, which is what
/// makes the surface one-sided: (u + 1, 1 - v) lands on the same point as
/// (u, v). `u` is accepted outside [0, 1] so that identity can be stated
/// directly.
pub fn mobius_point(u: f64, v: f64) -> Vec3 {
    let u = u * std::f64::consts::TAU;
    let v = (v - 0.5) * STRIP_WIDTH;

    let half_u = u / 2.0;
    let ring = RADIUS + v * half_u.cos();
    Vec3::new(ring * u.cos(), ring * u.sin(), v * half_u.sin())
}

/// Immutable vertex grid for the strip, sampled once at construction.
#[derive(Debug, Clone)]
pub struct MobiusGrid {
    pub u_segments: u32,
    pub v_segments: u32,
    /// Row-major, (u_segments + 1) * (v_segments + 1) points; u varies last.
    pub positions: Vec<Vec3>,
}

impl MobiusGrid {
    pub fn generate() -> Self {
        Self::with_resolution(U_SEGMENTS, V_SEGMENTS)
    }

    pub fn with_resolution(u_segments: u32, v_segments: u32) -> Self {
        let u_segments = u_segments.max(3);
        let v_segments = v_segments.max(1);

        let mut positions =
            Vec::with_capacity(((u_segments + 1) * (v_segments + 1)) as usize);
        for iu in 0..=u_segments {
            let u = iu as f64 / u_segments as f64;
            for iv in 0..=v_segments {
                let v = iv as f64 / v_segments as f64;
                positions.push(mobius_point(u, v));
            }
        }

        Self {
            u_segments,
            v_segments,
            positions,
        }
    }

    pub fn point(&self, iu: u32, iv: u32) -> Vec3 {
        self.positions[(iu * (self.v_segments + 1) + iv) as usize]
    }
}
