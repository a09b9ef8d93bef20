use serde::{Deserialize, Serialize};

use crate::{
    aperture::Aperture,
    interface::{FrontApertureGeometry, Optic},
    pose::{Pose, Transformable},
    surface::Surface,
    transformation::Transformation,
    units::Length,
    Builder, FromBuilder, Param, Result,
};

/// `FrontAperture` builder
///
/// Default properties:
///  - clear radius : 0m
///  - pose         : identity
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontApertureBuilder {
    pub radius_clear: Param<Length>,
    pub pose: Pose,
}
impl FrontApertureBuilder {
    /// Sets the radius of the entrance aperture
    pub fn radius_clear<L: Into<Param<Length>>>(self, radius_clear: L) -> Self {
        Self {
            radius_clear: radius_clear.into(),
            ..self
        }
    }
    pub fn pose(self, pose: Pose) -> Self {
        Self { pose, ..self }
    }
}
impl Builder for FrontApertureBuilder {
    type Component = FrontAperture;
    fn build(self) -> Result<FrontAperture> {
        self.radius_clear
            .check_non_negative("front aperture clear radius")?;
        Ok(FrontAperture {
            radius_clear: self.radius_clear,
            pose: self.pose,
        })
    }
}
impl From<&FrontAperture> for FrontApertureBuilder {
    fn from(front: &FrontAperture) -> Self {
        Self {
            radius_clear: front.radius_clear.clone(),
            pose: front.pose.clone(),
        }
    }
}

/// Circular entrance aperture of the instrument
#[derive(Debug, Clone, PartialEq)]
pub struct FrontAperture {
    pub radius_clear: Param<Length>,
    pub pose: Pose,
}
impl FromBuilder for FrontAperture {
    type ComponentBuilder = FrontApertureBuilder;
}
impl FrontApertureGeometry for FrontAperture {
    fn radius_clear(&self) -> &Param<Length> {
        &self.radius_clear
    }
}
impl Optic for FrontAperture {
    fn name(&self) -> &str {
        "front aperture"
    }
    fn transformation(&self) -> Transformation {
        self.pose.transformation()
    }
    fn surface(&self) -> Result<Surface> {
        let surface = Surface {
            name: self.name().into(),
            aperture: Some(Aperture::circular(self.radius_clear.clone())),
            transformation: self.transformation(),
            ..Default::default()
        };
        surface.shape()?;
        Ok(surface)
    }
}
