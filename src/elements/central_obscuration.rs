use serde::{Deserialize, Serialize};

use crate::{
    aperture::Aperture,
    interface::{CentralObscurationGeometry, Optic, Polygonal},
    polygon,
    pose::{Pose, Transformable},
    surface::Surface,
    transformation::Transformation,
    units::Length,
    Builder, FromBuilder, Param, Result,
};

/// `CentralObscuration` builder
///
/// Default properties:
///  - \# folds   : 8
///  - half width : 0m
///  - pose       : identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralObscurationBuilder {
    pub num_folds: u32,
    pub halfwidth: Param<Length>,
    pub pose: Pose,
}
impl Default for CentralObscurationBuilder {
    fn default() -> Self {
        Self {
            num_folds: super::NUM_FOLDS,
            halfwidth: Param::default(),
            pose: Pose::default(),
        }
    }
}
impl CentralObscurationBuilder {
    pub fn num_folds(self, num_folds: u32) -> Self {
        Self { num_folds, ..self }
    }
    /// Sets the distance from the center to the middle of an edge
    pub fn halfwidth<L: Into<Param<Length>>>(self, halfwidth: L) -> Self {
        Self {
            halfwidth: halfwidth.into(),
            ..self
        }
    }
    pub fn pose(self, pose: Pose) -> Self {
        Self { pose, ..self }
    }
}
impl Builder for CentralObscurationBuilder {
    type Component = CentralObscuration;
    fn build(self) -> Result<CentralObscuration> {
        polygon::check_num_folds(self.num_folds)?;
        self.halfwidth
            .check_non_negative("central obscuration half width")?;
        Ok(CentralObscuration {
            num_folds: self.num_folds,
            halfwidth: self.halfwidth,
            pose: self.pose,
        })
    }
}
impl From<&CentralObscuration> for CentralObscurationBuilder {
    fn from(obscuration: &CentralObscuration) -> Self {
        Self {
            num_folds: obscuration.num_folds,
            halfwidth: obscuration.halfwidth.clone(),
            pose: obscuration.pose.clone(),
        }
    }
}

/// Polygonal obscuration in the middle of the entrance aperture
///
/// It shadows the center of the primary mirror where the light would
/// otherwise go straight through the field stop.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralObscuration {
    pub num_folds: u32,
    pub halfwidth: Param<Length>,
    pub pose: Pose,
}
impl FromBuilder for CentralObscuration {
    type ComponentBuilder = CentralObscurationBuilder;
}
impl Polygonal for CentralObscuration {
    fn num_folds(&self) -> u32 {
        self.num_folds
    }
}
impl CentralObscurationGeometry for CentralObscuration {
    fn halfwidth(&self) -> &Param<Length> {
        &self.halfwidth
    }
}
impl Optic for CentralObscuration {
    fn name(&self) -> &str {
        "central obscuration"
    }
    fn transformation(&self) -> Transformation {
        self.pose.transformation()
    }
    fn surface(&self) -> Result<Surface> {
        let surface = Surface {
            name: self.name().into(),
            aperture: Some(Aperture::regular_polygon(self.radius()?, self.num_folds).obstruction()),
            transformation: self.transformation(),
            ..Default::default()
        };
        surface.shape()?;
        Ok(surface)
    }
}
