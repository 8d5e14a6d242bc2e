// spherical.rs: camera offset expressed as (radius, phi, theta) around +Y

use glam::Vec3;

/// Smallest distance kept between the polar angle and either pole.
pub const POLE_EPS: f32 = 0.000001;

/// Polar angle `phi` is measured from +Y, azimuth `theta` around +Y starting at +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Default for Spherical {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

impl Spherical {
    pub fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    pub fn from_vec3(v: Vec3) -> Self {
        let mut s = Self::default();
        s.set_from_vec3(v);
        s
    }

    pub fn set_from_vec3(&mut self, v: Vec3) {
        self.radius = v.length();
        if self.radius == 0.0 {
            self.theta = 0.0;
            self.phi = 0.0;
        } else {
            self.theta = v.x.atan2(v.z);
            self.phi = (v.y / self.radius).clamp(-1.0, 1.0).acos();
        }
    }

    pub fn to_vec3(&self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keep phi strictly inside (0, PI); theta is undefined on the poles.
    pub fn make_safe(&mut self) {
        self.phi = self.phi.clamp(POLE_EPS, std::f32::consts::PI - POLE_EPS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn from_vec3_on_z_axis() {
        let s = Spherical::from_vec3(Vec3::new(0.0, 0.0, 10.0));
        assert!((s.radius - 10.0).abs() < 1e-6);
        assert!((s.phi - FRAC_PI_2).abs() < 1e-6);
        assert!(s.theta.abs() < 1e-6);
    }

    #[test]
    fn zero_vector_has_zero_angles() {
        let s = Spherical::from_vec3(Vec3::ZERO);
        assert_eq!(s, Spherical::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn to_vec3_inverts_from_vec3() {
        let v = Vec3::new(3.0, -4.0, 12.0);
        let back = Spherical::from_vec3(v).to_vec3();
        assert!((back - v).length() < 1e-4);
    }

    #[test]
    fn make_safe_moves_phi_off_the_poles() {
        let mut s = Spherical::new(1.0, 0.0, 0.3);
        s.make_safe();
        assert!(s.phi > 0.0);

        s.phi = PI + 1.0;
        s.make_safe();
        assert!(s.phi < PI);
        assert_eq!(s.theta, 0.3);
    }
}
