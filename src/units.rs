//! Physical quantities used throughout the optical model
//!
//! Lengths and angles are [uom] quantities, so a formula that takes a length
//! returns a length whatever unit the caller wrote it in.

use uom::si::angle::{degree, radian};
use uom::si::length::{meter, micrometer, millimeter, nanometer};

pub type Length = uom::si::f64::Length;
pub type Angle = uom::si::f64::Angle;

/// Length constructors and accessors in the units used by optical designers
pub trait LengthExt {
    fn from_nanometers(nm: f64) -> Self;
    fn as_nanometers(&self) -> f64;
    fn from_micrometers(um: f64) -> Self;
    fn as_micrometers(&self) -> f64;
    fn from_millimeters(mm: f64) -> Self;
    fn as_millimeters(&self) -> f64;
    fn from_meters(m: f64) -> Self;
    fn as_meters(&self) -> f64;
}

impl LengthExt for Length {
    fn from_nanometers(nm: f64) -> Self {
        Length::new::<nanometer>(nm)
    }
    fn as_nanometers(&self) -> f64 {
        self.get::<nanometer>()
    }
    fn from_micrometers(um: f64) -> Self {
        Length::new::<micrometer>(um)
    }
    fn as_micrometers(&self) -> f64 {
        self.get::<micrometer>()
    }
    fn from_millimeters(mm: f64) -> Self {
        Length::new::<millimeter>(mm)
    }
    fn as_millimeters(&self) -> f64 {
        self.get::<millimeter>()
    }
    fn from_meters(m: f64) -> Self {
        Length::new::<meter>(m)
    }
    fn as_meters(&self) -> f64 {
        self.get::<meter>()
    }
}

/// Angle constructors and accessors
pub trait AngleExt {
    fn from_degrees(deg: f64) -> Self;
    fn as_degrees(&self) -> f64;
    fn from_radians(rad: f64) -> Self;
    fn as_radians(&self) -> f64;
}

impl AngleExt for Angle {
    fn from_degrees(deg: f64) -> Self {
        Angle::new::<degree>(deg)
    }
    fn as_degrees(&self) -> f64 {
        self.get::<degree>()
    }
    fn from_radians(rad: f64) -> Self {
        Angle::new::<radian>(rad)
    }
    fn as_radians(&self) -> f64 {
        self.get::<radian>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn length_conversions() {
        let l = Length::from_millimeters(25.4);
        assert_relative_eq!(l.as_meters(), 0.0254, epsilon = 1e-15);
        assert_relative_eq!(l.as_micrometers(), 25_400.0, epsilon = 1e-9);
        assert_relative_eq!(Length::from_nanometers(63.0).as_meters(), 63e-9);
    }

    #[test]
    fn angle_conversions() {
        let a = Angle::from_degrees(22.5);
        assert_relative_eq!(a.as_radians(), std::f64::consts::PI / 8.0, epsilon = 1e-15);
        assert_relative_eq!(Angle::from_radians(std::f64::consts::PI).as_degrees(), 180.0);
    }
}
