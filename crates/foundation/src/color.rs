/// Linear-ish RGB color with components in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f64 / 255.0,
            g: ((hex >> 8) & 0xff) as f64 / 255.0,
            b: (hex & 0xff) as f64 / 255.0,
        }
    }

    pub fn scale(self, s: f64) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s)
    }
}

#[cfg(test)]
mod tests {
    use super::Rgb;

    #[test]
    fn from_hex_splits_channels() {
        let c = Rgb::from_hex(0xff8000);
        assert!((c.r - 1.0).abs() < 1e-12);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-12);
        assert!(c.b.abs() < 1e-12);
    }

    #[test]
    fn scale_dims_all_channels() {
        let c = Rgb::new(1.0, 0.5, 0.25).scale(0.5);
        assert_eq!(c, Rgb::new(0.5, 0.25, 0.125));
    }
}
