use super::Vec3;

/// Column-major 4x4 matrix, laid out the way WGSL expects it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    pub fn identity() -> Self {
        Self([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// c = self * other (column-major multiply).
    pub fn mul(self, other: Self) -> Self {
        let a = self.0;
        let b = other.0;
        let mut c = [[0.0f32; 4]; 4];
        for col in 0..4 {
            for row in 0..4 {
                c[col][row] = a[0][row] * b[col][0]
                    + a[1][row] * b[col][1]
                    + a[2][row] * b[col][2]
                    + a[3][row] * b[col][3];
            }
        }
        Self(c)
    }

    /// Right-handed perspective projection with depth range [0, 1].
    pub fn perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (0.5 * fov_y_rad).tan();
        let m00 = (f / aspect) as f32;
        let m11 = f as f32;
        let m22 = (far / (near - far)) as f32;
        let m23 = ((near * far) / (near - far)) as f32;

        // Column-major form of:
        // [ m00,  0,   0,   0 ]
        // [  0,  m11,  0,   0 ]
        // [  0,   0,  m22, m23 ]
        // [  0,   0,  -1,   0 ]
        Self([
            [m00, 0.0, 0.0, 0.0],
            [0.0, m11, 0.0, 0.0],
            [0.0, 0.0, m22, -1.0],
            [0.0, 0.0, m23, 0.0],
        ])
    }

    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);

        let ex = -s.dot(eye);
        let ey = -u.dot(eye);
        let ez = f.dot(eye);

        Self([
            [s.x as f32, u.x as f32, (-f.x) as f32, 0.0],
            [s.y as f32, u.y as f32, (-f.y) as f32, 0.0],
            [s.z as f32, u.z as f32, (-f.z) as f32, 0.0],
            [ex as f32, ey as f32, ez as f32, 1.0],
        ])
    }

    pub fn rotation_x(angle_rad: f64) -> Self {
        let (s, c) = (angle_rad.sin() as f32, angle_rad.cos() as f32);
        Self([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(angle_rad: f64) -> Self {
        let (s, c) = (angle_rad.sin() as f32, angle_rad.cos() as f32);
        Self([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(angle_rad: f64) -> Self {
        let (s, c) = (angle_rad.sin() as f32, angle_rad.cos() as f32);
        Self([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn uniform_scale(s: f64) -> Self {
        let s = s as f32;
        Self([
            [s, 0.0, 0.0, 0.0],
            [0.0, s, 0.0, 0.0],
            [0.0, 0.0, s, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation applied x, then y, then z, matching the scene's Euler order.
    pub fn rotation_euler_xyz(rx: f64, ry: f64, rz: f64) -> Self {
        Self::rotation_z(rz)
            .mul(Self::rotation_y(ry))
            .mul(Self::rotation_x(rx))
    }

    pub fn transform_point(self, p: Vec3) -> Vec3 {
        let m = self.0;
        let (x, y, z) = (p.x as f32, p.y as f32, p.z as f32);
        let w = m[0][3] * x + m[1][3] * y + m[2][3] * z + m[3][3];
        let inv_w = if w.abs() > 1e-12 { 1.0 / w } else { 1.0 };
        Vec3::new(
            ((m[0][0] * x + m[1][0] * y + m[2][0] * z + m[3][0]) * inv_w) as f64,
            ((m[0][1] * x + m[1][1] * y + m[2][1] * z + m[3][1]) * inv_w) as f64,
            ((m[0][2] * x + m[1][2] * y + m[2][2] * z + m[3][2]) * inv_w) as f64,
        )
    }
}
