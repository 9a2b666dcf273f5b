use foundation::math::{Mat4, Vec3};
use scene::camera::PerspectiveCamera;
use scene::state::{FieldNode, MeshNode};

/// Glow layer scale relative to the base surface.
pub const GLOW_SCALE: f64 = 1.02;

pub fn camera_view_proj(camera: &PerspectiveCamera) -> Mat4 {
    let view = Mat4::look_at_rh(camera.position, camera.target, Vec3::new(0.0, 1.0, 0.0));
    let proj =
        Mat4::perspective_rh_z0(camera.fov_y_rad, camera.aspect, camera.near, camera.far);
    proj.mul(view)
}

/// Model matrix for the strip's base and edge layers.
pub fn mesh_model(node: &MeshNode) -> Mat4 {
    Mat4::rotation_euler_xyz(node.rotation.x, node.rotation.y, node.rotation.z)
        .mul(Mat4::uniform_scale(node.scale))
}

/// Model matrix for the glow layer: same transform, slightly inflated.
pub fn glow_model(node: &MeshNode) -> Mat4 {
    Mat4::rotation_euler_xyz(node.rotation.x, node.rotation.y, node.rotation.z)
        .mul(Mat4::uniform_scale(node.scale * GLOW_SCALE))
}

/// Model matrix for the particle field.
pub fn field_model(node: &FieldNode) -> Mat4 {
    Mat4::rotation_euler_xyz(node.rotation_x, node.rotation_y, 0.0)
}

#[cfg(test)]
mod tests {
    use super::{GLOW_SCALE, camera_view_proj, field_model, glow_model, mesh_model};
    use foundation::math::Vec3;
    use scene::camera::PerspectiveCamera;
    use scene::state::{FieldNode, MeshNode};

    #[test]
    fn view_proj_centers_the_look_target() {
        let cam = PerspectiveCamera::portfolio(16.0 / 9.0);
        let clip = camera_view_proj(&cam).transform_point(cam.target);
        assert!(clip.x.abs() < 1e-6);
        assert!(clip.y.abs() < 1e-6);
    }

    #[test]
    fn glow_layer_inflates_the_base_transform() {
        let node = MeshNode {
            rotation: Vec3::new(0.3, -0.2, 0.1),
            scale: 1.04,
        };
        let p = Vec3::new(25.0, 0.0, 0.0);
        let base = mesh_model(&node).transform_point(p);
        let glow = glow_model(&node).transform_point(p);
        assert!((glow.length() / base.length() - GLOW_SCALE).abs() < 1e-6);
    }

    #[test]
    fn rest_mesh_model_is_identity_on_points() {
        let node = MeshNode::at_rest();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!((mesh_model(&node).transform_point(p) - p).length() < 1e-6);
    }

    #[test]
    fn field_model_uses_both_axes() {
        let node = FieldNode {
            rotation_x: std::f64::consts::FRAC_PI_2,
            rotation_y: 0.0,
        };
        // x-rotation carries +y to +z.
        let p = field_model(&node).transform_point(Vec3::new(0.0, 1.0, 0.0));
        assert!((p - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-6);
    }
}
