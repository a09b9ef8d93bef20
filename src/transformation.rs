//! Rigid-body transformations
//!
//! A [Transformation] is an ordered chain of pose primitives (translations and
//! rotations about the Cartesian axes) whose parameters may be array-valued.
//! Rotations are active and right-handed: a positive rotation about Z turns
//! the X axis into the Y axis.
//!
//! Composition follows the function notation, `outer * inner` applies `inner`
//! first:
//!
//! ```
//! use esis::{
//!     transformation::Transformation,
//!     units::{Angle, AngleExt, Length, LengthExt},
//! };
//!
//! let t = Transformation::rotation_z(Angle::from_degrees(90.))
//!     * Transformation::translation_x(Length::from_millimeters(10.));
//! let p = t.transform_point([Length::from_meters(0.); 3]).unwrap();
//! let [x, y, _] = p.as_scalar().unwrap();
//! assert!(x.as_millimeters().abs() < 1e-12);
//! assert!((y.as_millimeters() - 10.).abs() < 1e-12);
//! ```

use std::{fmt::Display, ops::Mul};

use nalgebra::{Isometry3, Point3, Vector3};
use skyangle::Conversion;

use crate::{
    param::broadcast_shape,
    units::{Angle, AngleExt, Length, LengthExt},
    Param, Result,
};

/// Composable rigid-body transformation
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Transformation {
    #[default]
    Identity,
    /// Translation along X, Y and Z
    Translation([Param<Length>; 3]),
    /// Rotation about the X axis
    RotationX(Param<Angle>),
    /// Rotation about the Y axis
    RotationY(Param<Angle>),
    /// Rotation about the Z axis
    RotationZ(Param<Angle>),
    /// Transformations applied from first to last
    List(Vec<Transformation>),
}

impl Transformation {
    pub fn translation<X, Y, Z>(x: X, y: Y, z: Z) -> Self
    where
        X: Into<Param<Length>>,
        Y: Into<Param<Length>>,
        Z: Into<Param<Length>>,
    {
        Self::Translation([x.into(), y.into(), z.into()])
    }
    /// Translation along the X axis only
    pub fn translation_x<X: Into<Param<Length>>>(x: X) -> Self {
        Self::translation(x, Length::default(), Length::default())
    }
    pub fn rotation_x<A: Into<Param<Angle>>>(angle: A) -> Self {
        Self::RotationX(angle.into())
    }
    pub fn rotation_y<A: Into<Param<Angle>>>(angle: A) -> Self {
        Self::RotationY(angle.into())
    }
    pub fn rotation_z<A: Into<Param<Angle>>>(angle: A) -> Self {
        Self::RotationZ(angle.into())
    }
    /// Chains the transformations, applying them from first to last
    pub fn chain<I: IntoIterator<Item = Transformation>>(transformations: I) -> Self {
        transformations
            .into_iter()
            .fold(Self::Identity, |acc, t| t.compose(acc))
    }
    fn into_list(self) -> Vec<Transformation> {
        match self {
            Self::Identity => Vec::new(),
            Self::List(list) => list,
            t => vec![t],
        }
    }
    /// Returns `self ∘ inner`, the transformation applying `inner` and then `self`
    pub fn compose(self, inner: Transformation) -> Self {
        match (self, inner) {
            (Self::Identity, t) | (t, Self::Identity) => t,
            (outer, inner) => {
                let mut list = inner.into_list();
                list.extend(outer.into_list());
                Self::List(list)
            }
        }
    }
    /// Inverse transformation
    pub fn inverse(&self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Translation(xyz) => Self::Translation(xyz.each_ref().map(|x| x.map(|x| -*x))),
            Self::RotationX(a) => Self::RotationX(a.map(|a| -*a)),
            Self::RotationY(a) => Self::RotationY(a.map(|a| -*a)),
            Self::RotationZ(a) => Self::RotationZ(a.map(|a| -*a)),
            Self::List(list) => Self::List(list.iter().rev().map(|t| t.inverse()).collect()),
        }
    }
    /// Shape of the broadcast of all the transformation parameters
    pub fn shape(&self) -> Result<Vec<usize>> {
        match self {
            Self::Identity => Ok(Vec::new()),
            Self::Translation(xyz) => xyz
                .iter()
                .try_fold(Vec::new(), |shape, x| broadcast_shape(&shape, x.shape())),
            Self::RotationX(a) | Self::RotationY(a) | Self::RotationZ(a) => {
                Ok(a.shape().to_vec())
            }
            Self::List(list) => list
                .iter()
                .try_fold(Vec::new(), |shape, t| broadcast_shape(&shape, &t.shape()?)),
        }
    }
    /// Evaluates the transformation over the broadcast of all its parameters
    ///
    /// Translations of the isometries are in meters.
    pub fn isometry(&self) -> Result<Param<Isometry3<f64>>> {
        let rotation = |axis: Vector3<f64>, a: &Param<Angle>| {
            a.map(|a| Isometry3::rotation(axis * a.as_radians()))
        };
        Ok(match self {
            Self::Identity => Param::scalar(Isometry3::identity()),
            Self::Translation([x, y, z]) => x.zip3_with(y, z, |x, y, z| {
                Isometry3::translation(x.as_meters(), y.as_meters(), z.as_meters())
            })?,
            Self::RotationX(a) => rotation(Vector3::x(), a),
            Self::RotationY(a) => rotation(Vector3::y(), a),
            Self::RotationZ(a) => rotation(Vector3::z(), a),
            Self::List(list) => list.iter().try_fold(
                Param::scalar(Isometry3::identity()),
                |acc, t| t.isometry()?.zip_with(&acc, |t, acc| t * acc),
            )?,
        })
    }
    /// Maps a point from the local frame into the parent frame
    pub fn transform_point(&self, point: [Length; 3]) -> Result<Param<[Length; 3]>> {
        let [x, y, z] = point.map(|x| x.as_meters());
        let point = Point3::new(x, y, z);
        Ok(self.isometry()?.map(|iso| {
            let p = iso.transform_point(&point);
            [p.x, p.y, p.z].map(Length::from_meters)
        }))
    }
}

impl Mul for Transformation {
    type Output = Transformation;

    fn mul(self, inner: Transformation) -> Self::Output {
        self.compose(inner)
    }
}

fn fmt_lengths(xyz: &[Param<Length>; 3]) -> String {
    match xyz.each_ref().map(|x| x.as_scalar()) {
        [Some(x), Some(y), Some(z)] => format!(
            "({:.3}, {:.3}, {:.3})mm",
            x.as_millimeters(),
            y.as_millimeters(),
            z.as_millimeters()
        ),
        _ => format!("{:?}", xyz.each_ref().map(|x| x.shape().to_vec())),
    }
}
fn fmt_angle(a: &Param<Angle>) -> String {
    match a.as_scalar() {
        Some(a) => format!("{:.1}arcsec", a.as_radians().to_arcsec()),
        None => format!("{:?}", a.shape()),
    }
}

impl Display for Transformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity => write!(f, "identity"),
            Self::Translation(xyz) => write!(f, "T{}", fmt_lengths(xyz)),
            Self::RotationX(a) => write!(f, "Rx({})", fmt_angle(a)),
            Self::RotationY(a) => write!(f, "Ry({})", fmt_angle(a)),
            Self::RotationZ(a) => write!(f, "Rz({})", fmt_angle(a)),
            Self::List(list) => write!(
                f,
                "{}",
                list.iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(" > ")
            ),
        }
    }
}
