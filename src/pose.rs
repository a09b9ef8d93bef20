//! Placement of the optical elements
//!
//! Every element carries a [Pose]: a translation and three rotation angles.
//! Elements arranged around the axis of symmetry of the instrument (gratings,
//! filters) carry a [CylindricalPose] instead, which first moves the element
//! off-axis by `distance_radial`, clocks it by `azimuth` about the axis and
//! then applies the linear [Pose].

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    transformation::Transformation,
    units::{Angle, Length},
    Param,
};

/// Objects located by a rigid-body transformation
pub trait Transformable {
    /// Transformation from the object local frame to the parent frame
    fn transformation(&self) -> Transformation;
}

/// Linear pose: `translate ∘ pitch ∘ yaw ∘ roll`
///
/// The roll (about Z) is applied first, then the yaw (about Y), the pitch
/// (about X) and finally the translation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    pub translation: [Param<Length>; 3],
    pub pitch: Param<Angle>,
    pub yaw: Param<Angle>,
    pub roll: Param<Angle>,
}
impl Pose {
    pub fn translation<X, Y, Z>(self, x: X, y: Y, z: Z) -> Self
    where
        X: Into<Param<Length>>,
        Y: Into<Param<Length>>,
        Z: Into<Param<Length>>,
    {
        Self {
            translation: [x.into(), y.into(), z.into()],
            ..self
        }
    }
    pub fn pitch<A: Into<Param<Angle>>>(self, pitch: A) -> Self {
        Self {
            pitch: pitch.into(),
            ..self
        }
    }
    pub fn yaw<A: Into<Param<Angle>>>(self, yaw: A) -> Self {
        Self {
            yaw: yaw.into(),
            ..self
        }
    }
    pub fn roll<A: Into<Param<Angle>>>(self, roll: A) -> Self {
        Self {
            roll: roll.into(),
            ..self
        }
    }
}
impl Transformable for Pose {
    fn transformation(&self) -> Transformation {
        Transformation::chain([
            Transformation::RotationZ(self.roll.clone()),
            Transformation::RotationY(self.yaw.clone()),
            Transformation::RotationX(self.pitch.clone()),
            Transformation::Translation(self.translation.clone()),
        ])
    }
}
impl Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.transformation().fmt(f)
    }
}

/// Off-axis pose: `pose ∘ rotate_z(azimuth) ∘ translate_x(distance_radial)`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CylindricalPose {
    /// Distance from the axis of symmetry
    pub distance_radial: Param<Length>,
    /// Angle of rotation about the axis of symmetry
    pub azimuth: Param<Angle>,
    /// Pose applied after the cylindrical placement
    pub pose: Pose,
}
impl CylindricalPose {
    pub fn distance_radial<L: Into<Param<Length>>>(self, distance_radial: L) -> Self {
        Self {
            distance_radial: distance_radial.into(),
            ..self
        }
    }
    pub fn azimuth<A: Into<Param<Angle>>>(self, azimuth: A) -> Self {
        Self {
            azimuth: azimuth.into(),
            ..self
        }
    }
    pub fn pose(self, pose: Pose) -> Self {
        Self { pose, ..self }
    }
    /// Transformation placing the object in its cylindrical coordinates
    pub fn placement(&self) -> Transformation {
        Transformation::rotation_z(self.azimuth.clone())
            * Transformation::translation_x(self.distance_radial.clone())
    }
}
impl Transformable for CylindricalPose {
    fn transformation(&self) -> Transformation {
        self.pose.transformation() * self.placement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        units::{AngleExt, LengthExt},
        EsisError,
    };
    use approx::assert_relative_eq;

    fn mm(x: f64) -> Length {
        Length::from_millimeters(x)
    }
    fn deg(x: f64) -> Angle {
        Angle::from_degrees(x)
    }
    fn origin(t: &impl Transformable) -> [f64; 3] {
        let p = t.transformation().transform_point([mm(0.); 3]).unwrap();
        p.as_scalar().unwrap().map(|x| x.as_millimeters())
    }

    #[test]
    fn default_pose_is_identity() {
        let p = Pose::default()
            .transformation()
            .transform_point([mm(1.), mm(2.), mm(3.)])
            .unwrap();
        let p = p.as_scalar().unwrap();
        assert_relative_eq!(p[0].as_millimeters(), 1.);
        assert_relative_eq!(p[1].as_millimeters(), 2.);
        assert_relative_eq!(p[2].as_millimeters(), 3.);
    }

    #[test]
    fn roll_first_translation_last() {
        let pose = Pose::default()
            .translation(mm(0.), mm(0.), mm(5.))
            .roll(deg(90.));
        let p = pose
            .transformation()
            .transform_point([mm(1.), mm(0.), mm(0.)])
            .unwrap();
        let p = p.as_scalar().unwrap().map(|x| x.as_millimeters());
        assert_relative_eq!(p[0], 0., epsilon = 1e-12);
        assert_relative_eq!(p[1], 1., epsilon = 1e-12);
        assert_relative_eq!(p[2], 5., epsilon = 1e-12);
    }

    #[test]
    fn cylindrical_quarter_turn() {
        let pose = CylindricalPose::default()
            .distance_radial(mm(10.))
            .azimuth(deg(90.));
        let [x, y, z] = origin(&pose);
        assert_relative_eq!(x, 0., epsilon = 1e-12);
        assert_relative_eq!(y, 10., epsilon = 1e-12);
        assert_relative_eq!(z, 0., epsilon = 1e-12);
    }

    #[test]
    fn cylindrical_placement_precedes_pose() {
        let pose = CylindricalPose::default()
            .distance_radial(mm(10.))
            .azimuth(deg(90.))
            .pose(Pose::default().translation(mm(1.), mm(0.), mm(0.)).roll(deg(90.)));
        // (10, 0, 0) -> azimuth -> (0, 10, 0) -> roll -> (-10, 0, 0) -> translation
        let [x, y, z] = origin(&pose);
        assert_relative_eq!(x, -9., epsilon = 1e-12);
        assert_relative_eq!(y, 0., epsilon = 1e-12);
        assert_relative_eq!(z, 0., epsilon = 1e-12);
    }

    #[test]
    fn cylindrical_ensemble() {
        let pose = CylindricalPose::default()
            .distance_radial(Param::from([10., 20.].map(mm).to_vec()))
            .azimuth(Param::from(
                ndarray::Array2::from_shape_vec((3, 1), vec![deg(0.), deg(90.), deg(180.)])
                    .unwrap()
                    .into_dyn(),
            ));
        let p = pose
            .transformation()
            .transform_point([mm(0.); 3])
            .unwrap();
        assert_eq!(p.shape(), &[3, 2]);
        let q = p.get(&[2, 1]).unwrap();
        assert_relative_eq!(q[0].as_millimeters(), -20., epsilon = 1e-9);
        assert_relative_eq!(q[1].as_millimeters(), 0., epsilon = 1e-9);
    }

    #[test]
    fn cylindrical_shape_mismatch() {
        let pose = CylindricalPose::default()
            .distance_radial(Param::from([10., 20.].map(mm).to_vec()))
            .azimuth(Param::from([0., 90., 180.].map(deg).to_vec()));
        assert!(matches!(
            pose.transformation().isometry(),
            Err(EsisError::ShapeMismatch { .. })
        ));
    }
}
