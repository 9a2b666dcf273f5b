use foundation::color::Rgb;
use foundation::hash::Mix32;
use foundation::math::Vec3;

pub const PARTICLE_COUNT: usize = 800;

/// Shell the particles scatter over, around the strip.
pub const SHELL_MIN_RADIUS: f64 = 30.0;
pub const SHELL_MAX_RADIUS: f64 = 130.0;

pub const SIZE_MIN: f64 = 0.5;
pub const SIZE_MAX: f64 = 2.5;

/// Maximum vertical displacement from a particle's home position.
///
/// The float perturbation is additive and never cancels exactly, so without
/// a bound the field migrates over long sessions. Displacement is clamped
/// here instead; the wave is visually unchanged.
pub const FLOAT_LIMIT: f64 = 2.0;

const FLOAT_AMPLITUDE: f64 = 0.002;
const FLOAT_PHASE_STEP: f64 = 0.01;

/// Palette: indigo and cyan carry the field, amber is the accent.
pub const PALETTE: [Rgb; 3] = [
    Rgb {
        r: 0x63 as f64 / 255.0,
        g: 0x66 as f64 / 255.0,
        b: 0xf1 as f64 / 255.0,
    },
    Rgb {
        r: 0x06 as f64 / 255.0,
        g: 0xb6 as f64 / 255.0,
        b: 0xd4 as f64 / 255.0,
    },
    Rgb {
        r: 0xf5 as f64 / 255.0,
        g: 0x9e as f64 / 255.0,
        b: 0x0b as f64 / 255.0,
    },
];

/// Map a unit draw onto a palette index, weighted 40% / 40% / 20%.
pub fn palette_index(draw: f64) -> usize {
    if draw < 0.4 {
        0
    } else if draw < 0.8 {
        1
    } else {
        2
    }
}

/// Fixed-count point field stored in flat buffers.
///
/// Built once; afterwards only the per-frame float perturbation touches the
/// position buffer, in place.
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Rgb>,
    pub sizes: Vec<f64>,
    home_y: Vec<f64>,
}

impl ParticleField {
    pub fn generate(seed: u32) -> Self {
        Self::with_count(seed, PARTICLE_COUNT)
    }

    pub fn with_count(seed: u32, count: usize) -> Self {
        let mut rng = Mix32::new(seed);
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        let mut sizes = Vec::with_capacity(count);

        for _ in 0..count {
            let radius = rng.next_range(SHELL_MIN_RADIUS, SHELL_MAX_RADIUS);
            let theta = rng.next_range(0.0, std::f64::consts::TAU);
            // acos of a uniform draw in [-1, 1] gives uniform density over
            // the sphere, not a polar pile-up.
            let phi = (rng.next_range(-1.0, 1.0)).acos();

            positions.push(Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            ));
            colors.push(PALETTE[palette_index(rng.next_unit())]);
            sizes.push(rng.next_range(SIZE_MIN, SIZE_MAX));
        }

        let home_y = positions.iter().map(|p| p.y).collect();

        Self {
            positions,
            colors,
            sizes,
            home_y,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// One frame of the traveling-wave float, clamped to `FLOAT_LIMIT`.
    pub fn float_step(&mut self, time_s: f64) {
        for (i, p) in self.positions.iter_mut().enumerate() {
            let wave = FLOAT_AMPLITUDE * (time_s + FLOAT_PHASE_STEP * i as f64).sin();
            let displaced = (p.y + wave - self.home_y[i]).clamp(-FLOAT_LIMIT, FLOAT_LIMIT);
            p.y = self.home_y[i] + displaced;
        }
    }
}
