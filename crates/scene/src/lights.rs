use foundation::color::Rgb;
use foundation::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Light {
    Ambient {
        color: Rgb,
        intensity: f64,
    },
    Directional {
        color: Rgb,
        intensity: f64,
        position: Vec3,
    },
    Point {
        color: Rgb,
        intensity: f64,
        position: Vec3,
        range: f64,
    },
}

/// The page's fixed four-light rig.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig(pub [Light; 4]);

impl LightRig {
    pub fn portfolio() -> Self {
        Self([
            Light::Ambient {
                color: Rgb::from_hex(0x1a1a2e),
                intensity: 0.3,
            },
            Light::Directional {
                color: Rgb::from_hex(0x6366f1),
                intensity: 0.8,
                position: Vec3::new(50.0, 50.0, 50.0),
            },
            Light::Directional {
                color: Rgb::from_hex(0x06b6d4),
                intensity: 0.6,
                position: Vec3::new(-50.0, -30.0, 30.0),
            },
            Light::Point {
                color: Rgb::from_hex(0xf59e0b),
                intensity: 0.4,
                position: Vec3::new(0.0, 0.0, 40.0),
                range: 100.0,
            },
        ])
    }

    /// Directions for the shader's two directional terms, normalized.
    pub fn directional_dirs(&self) -> Vec<Vec3> {
        self.0
            .iter()
            .filter_map(|l| match l {
                Light::Directional { position, .. } => Some(position.normalize()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Light, LightRig};

    #[test]
    fn rig_has_four_lights_with_one_ambient() {
        let rig = LightRig::portfolio();
        assert_eq!(rig.0.len(), 4);
        let ambient = rig
            .0
            .iter()
            .filter(|l| matches!(l, Light::Ambient { .. }))
            .count();
        assert_eq!(ambient, 1);
    }

    #[test]
    fn directional_dirs_are_unit_vectors() {
        for d in LightRig::portfolio().directional_dirs() {
            assert!((d.length() - 1.0).abs() < 1e-12);
        }
    }
}
