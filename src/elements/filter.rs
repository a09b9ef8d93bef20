use serde::{Deserialize, Serialize};

use crate::{
    aperture::Aperture,
    interface::{FilterGeometry, Optic},
    material::Material,
    pose::{CylindricalPose, Transformable},
    surface::Surface,
    transformation::Transformation,
    units::Length,
    Builder, FromBuilder, Param, Result,
};

/// `Filter` builder
///
/// Default properties:
///  - material     : none
///  - clear radius : 0m
///  - border width : 0m
///  - pose         : on axis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterBuilder {
    pub material: Option<Material>,
    pub radius_clear: Param<Length>,
    pub width_border: Param<Length>,
    pub pose: CylindricalPose,
}
impl FilterBuilder {
    /// Sets the thin film the filter is made of
    pub fn material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }
    pub fn radius_clear<L: Into<Param<Length>>>(self, radius_clear: L) -> Self {
        Self {
            radius_clear: radius_clear.into(),
            ..self
        }
    }
    /// Sets the width of the frame holding the film
    pub fn width_border<L: Into<Param<Length>>>(self, width_border: L) -> Self {
        Self {
            width_border: width_border.into(),
            ..self
        }
    }
    pub fn pose(self, pose: CylindricalPose) -> Self {
        Self { pose, ..self }
    }
}
impl Builder for FilterBuilder {
    type Component = Filter;
    fn build(self) -> Result<Filter> {
        self.radius_clear.check_non_negative("filter clear radius")?;
        self.width_border.check_non_negative("filter border width")?;
        if let Some(material) = self.material.as_ref().filter(|m| m.is_reflective()) {
            log::warn!("filter made of the reflective material {material:?}");
        }
        Ok(Filter {
            material: self.material,
            radius_clear: self.radius_clear,
            width_border: self.width_border,
            pose: self.pose,
        })
    }
}
impl From<&Filter> for FilterBuilder {
    fn from(filter: &Filter) -> Self {
        Self {
            material: filter.material.clone(),
            radius_clear: filter.radius_clear.clone(),
            width_border: filter.width_border.clone(),
            pose: filter.pose.clone(),
        }
    }
}

/// Thin film filter in front of a channel detector
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub material: Option<Material>,
    pub radius_clear: Param<Length>,
    pub width_border: Param<Length>,
    pub pose: CylindricalPose,
}
impl FromBuilder for Filter {
    type ComponentBuilder = FilterBuilder;
}
impl FilterGeometry for Filter {
    fn radius_clear(&self) -> &Param<Length> {
        &self.radius_clear
    }
    fn width_border(&self) -> &Param<Length> {
        &self.width_border
    }
}
impl Optic for Filter {
    fn name(&self) -> &str {
        "filter"
    }
    fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }
    fn transformation(&self) -> Transformation {
        self.pose.transformation()
    }
    fn surface(&self) -> Result<Surface> {
        let surface = Surface {
            name: self.name().into(),
            material: self.material.clone(),
            aperture: Some(Aperture::circular(self.radius_clear.clone())),
            aperture_mechanical: Some(Aperture::circular(self.radius_mechanical()?)),
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
    use crate::units::{Angle, AngleExt, LengthExt};
    use approx::assert_relative_eq;

    fn mm(x: f64) -> Length {
        Length::from_millimeters(x)
    }

    #[test]
    fn circular_apertures() {
        let filter = Filter::builder()
            .material(Material::ThinFilm {
                name: "Al".into(),
                thickness: Length::from_nanometers(100.).into(),
            })
            .radius_clear(mm(15.))
            .width_border(mm(1.5))
            .pose(
                CylindricalPose::default()
                    .distance_radial(mm(95.))
                    .azimuth(Angle::from_degrees(-22.5)),
            )
            .build()
            .unwrap();
        let surface = filter.surface().unwrap();
        assert_eq!(surface.name, "filter");
        assert!(surface.sag.is_none());
        let mechanical = surface.aperture_mechanical.unwrap();
        assert_relative_eq!(
            mechanical.radius().unwrap().as_scalar().unwrap().as_millimeters(),
            16.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn ensemble_of_borders() {
        let filter = Filter::builder()
            .radius_clear(mm(15.))
            .width_border(Param::from([1., 2.].map(mm).to_vec()))
            .build()
            .unwrap();
        let radius = filter.radius_mechanical().unwrap();
        assert_eq!(radius.shape(), &[2]);
        for (r, expected) in radius.iter().zip([16., 17.]) {
            assert_relative_eq!(r.as_millimeters(), expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn negative_border() {
        let filter = Filter::builder()
            .radius_clear(mm(15.))
            .width_border(mm(-1.5))
            .build();
        assert!(matches!(filter, Err(crate::EsisError::NegativeLength { .. })));
        let filter = Filter {
            material: None,
            radius_clear: mm(15.).into(),
            width_border: mm(-1.5).into(),
            pose: CylindricalPose::default(),
        };
        assert!(filter.radius_mechanical().is_err());
    }

    #[test]
    fn border_and_pose_ensembles_must_broadcast() {
        let filter = Filter::builder()
            .radius_clear(mm(15.))
            .width_border(Param::from([1., 2.].map(mm).to_vec()))
            .pose(
                CylindricalPose::default()
                    .azimuth(Param::from([0., 45., 90.].map(Angle::from_degrees).to_vec())),
            )
            .build()
            .unwrap();
        assert!(matches!(
            filter.surface(),
            Err(crate::EsisError::ShapeMismatch { .. })
        ));
    }
}
