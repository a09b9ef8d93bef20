//! Aperture shapes
//!
//! An aperture limits the part of a surface rays may go through. All shapes
//! are expressed in the local frame of the surface they belong to and, by
//! default, transmit inside the shape. An [ApertureKind::Obstruction] blocks
//! inside the shape instead.

use crate::{
    param::broadcast_shape,
    units::{Angle, Length},
    Param, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApertureKind {
    /// the inner part of the shape is transparent
    #[default]
    Hole,
    /// the inner part of the shape is opaque
    Obstruction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApertureShape {
    Circular {
        radius: Param<Length>,
    },
    /// Regular polygon centered on the origin with a vertex on the X axis
    RegularPolygon {
        radius: Param<Length>,
        num_vertices: u32,
    },
    /// Slice of a wedge symmetric about the X axis
    ///
    /// The legs meet at `x = x_apex` with an included angle `angle`, the
    /// inner and outer edges are the lines `x = x_left` and `x = x_right`.
    IsoscelesTrapezoid {
        x_apex: Param<Length>,
        x_left: Param<Length>,
        x_right: Param<Length>,
        angle: Param<Angle>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aperture {
    pub shape: ApertureShape,
    pub kind: ApertureKind,
}
impl Aperture {
    pub fn circular(radius: Param<Length>) -> Self {
        ApertureShape::Circular { radius }.into()
    }
    pub fn regular_polygon(radius: Param<Length>, num_vertices: u32) -> Self {
        ApertureShape::RegularPolygon {
            radius,
            num_vertices,
        }
        .into()
    }
    pub fn isosceles_trapezoid(
        x_apex: Param<Length>,
        x_left: Param<Length>,
        x_right: Param<Length>,
        angle: Param<Angle>,
    ) -> Self {
        ApertureShape::IsoscelesTrapezoid {
            x_apex,
            x_left,
            x_right,
            angle,
        }
        .into()
    }
    /// Turns the aperture into an obstruction
    pub fn obstruction(self) -> Self {
        Self {
            kind: ApertureKind::Obstruction,
            ..self
        }
    }
    pub fn is_obstruction(&self) -> bool {
        self.kind == ApertureKind::Obstruction
    }
    /// Radius of the circle circumscribing a circular or polygonal aperture
    pub fn radius(&self) -> Option<&Param<Length>> {
        match &self.shape {
            ApertureShape::Circular { radius } | ApertureShape::RegularPolygon { radius, .. } => {
                Some(radius)
            }
            ApertureShape::IsoscelesTrapezoid { .. } => None,
        }
    }
    /// Shape of the broadcast of the aperture parameters
    pub fn shape(&self) -> Result<Vec<usize>> {
        match &self.shape {
            ApertureShape::Circular { radius } | ApertureShape::RegularPolygon { radius, .. } => {
                Ok(radius.shape().to_vec())
            }
            ApertureShape::IsoscelesTrapezoid {
                x_apex,
                x_left,
                x_right,
                angle,
            } => {
                let shape = broadcast_shape(x_apex.shape(), x_left.shape())?;
                let shape = broadcast_shape(&shape, x_right.shape())?;
                broadcast_shape(&shape, angle.shape())
            }
        }
    }
    /// Number of vertices of a polygonal aperture
    pub fn num_vertices(&self) -> Option<u32> {
        match &self.shape {
            ApertureShape::RegularPolygon { num_vertices, .. } => Some(*num_vertices),
            ApertureShape::IsoscelesTrapezoid { .. } => Some(4),
            ApertureShape::Circular { .. } => None,
        }
    }
}
impl From<ApertureShape> for Aperture {
    fn from(shape: ApertureShape) -> Self {
        Self {
            shape,
            kind: ApertureKind::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{AngleExt, LengthExt};

    #[test]
    fn holes_by_default() {
        let aperture = Aperture::regular_polygon(Length::from_millimeters(54.).into(), 8);
        assert!(!aperture.is_obstruction());
        assert!(aperture.clone().obstruction().is_obstruction());
        assert_eq!(aperture.num_vertices(), Some(8));
    }

    #[test]
    fn trapezoid() {
        let aperture = Aperture::isosceles_trapezoid(
            Length::from_millimeters(-50.).into(),
            Length::from_millimeters(-13.).into(),
            Length::from_millimeters(16.).into(),
            Angle::from_degrees(45.).into(),
        );
        assert_eq!(aperture.num_vertices(), Some(4));
        assert!(aperture.radius().is_none());
        assert!(aperture.shape().unwrap().is_empty());
    }
}
