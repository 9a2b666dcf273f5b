use foundation::math::Vec3;
use runtime::frame::Frame;
use runtime::pointer::PointerState;

use crate::camera::PerspectiveCamera;
use crate::lights::LightRig;
use crate::mobius::MobiusGrid;
use crate::particles::ParticleField;

/// Rigid transform state for the strip (all three layers share it).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshNode {
    /// Euler angles, applied x then y then z.
    pub rotation: Vec3,
    pub scale: f64,
}

impl MeshNode {
    pub fn at_rest() -> Self {
        Self {
            rotation: Vec3::zero(),
            scale: 1.0,
        }
    }
}

/// Rotation state for the particle field (two axes, no scale).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct FieldNode {
    pub rotation_x: f64,
    pub rotation_y: f64,
}

/// The whole scene, constructed once and threaded through `advance`.
///
/// There is deliberately no global state here: everything the per-frame
/// update reads or writes lives in this struct or in the pointer it is
/// handed, which keeps the transform math testable in isolation.
#[derive(Debug, Clone)]
pub struct SceneState {
    pub frame: Frame,
    pub strip: MobiusGrid,
    pub mesh: MeshNode,
    pub particles: ParticleField,
    pub field: FieldNode,
    pub camera: PerspectiveCamera,
    pub lights: LightRig,
}

impl SceneState {
    pub fn new(seed: u32, aspect: f64) -> Self {
        Self {
            frame: Frame::start(),
            strip: MobiusGrid::generate(),
            mesh: MeshNode::at_rest(),
            particles: ParticleField::generate(seed),
            field: FieldNode::default(),
            camera: PerspectiveCamera::portfolio(aspect),
            lights: LightRig::portfolio(),
        }
    }

    /// Advance one frame: bump the clock, recompute every transform as a
    /// pure function of (time, pointer), then decay the pointer.
    pub fn advance(&mut self, pointer: &mut PointerState) {
        self.frame = self.frame.next();
        let t = self.frame.time.0;

        self.mesh.rotation = Vec3::new(
            t * 0.2 + pointer.y * 2.0,
            t * 0.3 + pointer.x * 2.0,
            t * 0.1,
        );
        self.mesh.scale = 1.0 + (t * 0.5).sin() * 0.05;

        self.field.rotation_x = t * 0.05;
        self.field.rotation_y = t * 0.08;
        self.particles.float_step(t);

        pointer.decay();
    }
}
