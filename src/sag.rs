use serde::{Deserialize, Serialize};

use crate::{param::broadcast_shape, units::Length, Param, Result};

/// Surface sag (height map) descriptions
///
/// The sag is passed through untouched to the ray-tracing collaborator,
/// only its parameters are kept here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sag {
    /// Sphere of the given radius of curvature
    Spherical { radius: Param<Length> },
    /// Conic section of revolution
    Conic {
        radius: Param<Length>,
        conic: Param<f64>,
    },
    /// Torus with radius of curvature `radius` along the local X axis, swept
    /// about an axis `radius_of_rotation` away from the vertex
    Toroidal {
        radius: Param<Length>,
        radius_of_rotation: Param<Length>,
    },
}
impl Sag {
    pub fn spherical<L: Into<Param<Length>>>(radius: L) -> Self {
        Self::Spherical {
            radius: radius.into(),
        }
    }
    /// Paraboloid of the given focal length
    pub fn parabolic<L: Into<Param<Length>>>(focal_length: L) -> Self {
        let focal_length: Param<Length> = focal_length.into();
        Self::Conic {
            radius: focal_length.map(|f| *f * 2.),
            conic: Param::from(-1f64),
        }
    }
    /// Shape of the broadcast of the sag parameters
    pub fn shape(&self) -> Result<Vec<usize>> {
        match self {
            Self::Spherical { radius } => Ok(radius.shape().to_vec()),
            Self::Conic { radius, conic } => broadcast_shape(radius.shape(), conic.shape()),
            Self::Toroidal {
                radius,
                radius_of_rotation,
            } => broadcast_shape(radius.shape(), radius_of_rotation.shape()),
        }
    }
    pub fn toroidal<L: Into<Param<Length>>, R: Into<Param<Length>>>(
        radius: L,
        radius_of_rotation: R,
    ) -> Self {
        Self::Toroidal {
            radius: radius.into(),
            radius_of_rotation: radius_of_rotation.into(),
        }
    }
}
