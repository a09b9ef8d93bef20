use serde::{Deserialize, Serialize};

use crate::{
    aperture::Aperture,
    interface::{FieldStopGeometry, Optic, Polygonal},
    polygon,
    pose::{Pose, Transformable},
    surface::Surface,
    transformation::Transformation,
    units::Length,
    Builder, FromBuilder, Param, Result,
};

/// `FieldStop` builder
///
/// Default properties:
///  - \# folds          : 8
///  - clear radius      : 0m
///  - mechanical radius : 0m
///  - pose              : identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldStopBuilder {
    pub num_folds: u32,
    pub radius_clear: Param<Length>,
    pub radius_mechanical: Param<Length>,
    pub pose: Pose,
}
impl Default for FieldStopBuilder {
    fn default() -> Self {
        Self {
            num_folds: super::NUM_FOLDS,
            radius_clear: Param::default(),
            radius_mechanical: Param::default(),
            pose: Pose::default(),
        }
    }
}
impl FieldStopBuilder {
    pub fn num_folds(self, num_folds: u32) -> Self {
        Self { num_folds, ..self }
    }
    /// Sets the center-to-vertex radius of the field stop opening
    pub fn radius_clear<L: Into<Param<Length>>>(self, radius_clear: L) -> Self {
        Self {
            radius_clear: radius_clear.into(),
            ..self
        }
    }
    /// Sets the outer radius of the stop
    pub fn radius_mechanical<L: Into<Param<Length>>>(self, radius_mechanical: L) -> Self {
        Self {
            radius_mechanical: radius_mechanical.into(),
            ..self
        }
    }
    pub fn pose(self, pose: Pose) -> Self {
        Self { pose, ..self }
    }
}
impl Builder for FieldStopBuilder {
    type Component = FieldStop;
    fn build(self) -> Result<FieldStop> {
        polygon::check_num_folds(self.num_folds)?;
        self.radius_clear
            .check_non_negative("field stop clear radius")?;
        self.radius_mechanical
            .check_non_negative("field stop mechanical radius")?;
        let undersized = self
            .radius_mechanical
            .zip_with(&self.radius_clear, |m, c| m < c)?;
        if undersized.iter().any(|&u| u) {
            log::warn!("field stop mechanical radius smaller than its clear radius");
        }
        Ok(FieldStop {
            num_folds: self.num_folds,
            radius_clear: self.radius_clear,
            radius_mechanical: self.radius_mechanical,
            pose: self.pose,
        })
    }
}
impl From<&FieldStop> for FieldStopBuilder {
    fn from(stop: &FieldStop) -> Self {
        Self {
            num_folds: stop.num_folds,
            radius_clear: stop.radius_clear.clone(),
            radius_mechanical: stop.radius_mechanical.clone(),
            pose: stop.pose.clone(),
        }
    }
}

/// Field stop at the focus of the primary mirror
///
/// A polygonal hole in a circular plate, it defines the field of view of the
/// instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldStop {
    pub num_folds: u32,
    pub radius_clear: Param<Length>,
    pub radius_mechanical: Param<Length>,
    pub pose: Pose,
}
impl FromBuilder for FieldStop {
    type ComponentBuilder = FieldStopBuilder;
}
impl Polygonal for FieldStop {
    fn num_folds(&self) -> u32 {
        self.num_folds
    }
}
impl FieldStopGeometry for FieldStop {
    fn radius_clear(&self) -> &Param<Length> {
        &self.radius_clear
    }
    fn radius_mechanical(&self) -> &Param<Length> {
        &self.radius_mechanical
    }
}
impl Optic for FieldStop {
    fn name(&self) -> &str {
        "field stop"
    }
    fn transformation(&self) -> Transformation {
        self.pose.transformation()
    }
    fn surface(&self) -> Result<Surface> {
        polygon::check_num_folds(self.num_folds)?;
        let surface = Surface {
            name: self.name().into(),
            aperture: Some(Aperture::regular_polygon(
                self.radius_clear.clone(),
                self.num_folds,
            )),
            aperture_mechanical: Some(Aperture::circular(self.radius_mechanical.clone())),
            transformation: self.transformation(),
            ..Default::default()
        };
        surface.shape()?;
        Ok(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aperture::ApertureShape, units::LengthExt};

    #[test]
    fn polygon_in_a_disk() {
        let stop = FieldStop::builder()
            .radius_clear(Length::from_millimeters(1.7))
            .radius_mechanical(Length::from_millimeters(20.))
            .build()
            .unwrap();
        let surface = stop.surface().unwrap();
        assert_eq!(surface.name, "field stop");
        assert!(matches!(
            surface.aperture.unwrap().shape,
            ApertureShape::RegularPolygon { num_vertices: 8, .. }
        ));
        assert!(matches!(
            surface.aperture_mechanical.unwrap().shape,
            ApertureShape::Circular { .. }
        ));
    }

    #[test]
    fn mismatched_radii() {
        let stop = FieldStop::builder()
            .radius_clear(Param::from([1., 2.].map(Length::from_millimeters).to_vec()))
            .radius_mechanical(Param::from(
                [10., 20., 30.].map(Length::from_millimeters).to_vec(),
            ))
            .build();
        assert!(stop.is_err());
    }
}
