use serde::{Deserialize, Serialize};

use crate::{
    aperture::Aperture,
    interface::{GratingGeometry, Optic, Polygonal},
    material::Material,
    polygon,
    pose::{CylindricalPose, Transformable},
    sag::Sag,
    surface::{Rulings, Surface},
    transformation::Transformation,
    units::Length,
    Builder, FromBuilder, Param, Result,
};

/// `Grating` builder
///
/// Default properties:
///  - sag                : none
///  - material           : none
///  - rulings            : 0m spacing, 1st order
///  - \# folds           : 8
///  - inner half width   : 0m
///  - outer half width   : 0m
///  - outer border width : 0m
///  - inner border width : 0m
///  - pose               : on axis
///
/// The channels of the instrument share the same grating design, an array of
/// azimuths in the pose describes all of them at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GratingBuilder {
    pub sag: Option<Sag>,
    pub material: Option<Material>,
    pub rulings: Rulings,
    pub num_folds: u32,
    pub halfwidth_inner: Param<Length>,
    pub halfwidth_outer: Param<Length>,
    pub width_border: Param<Length>,
    pub width_border_inner: Param<Length>,
    pub pose: CylindricalPose,
}
impl Default for GratingBuilder {
    fn default() -> Self {
        Self {
            sag: None,
            material: None,
            rulings: Rulings::default(),
            num_folds: super::NUM_FOLDS,
            halfwidth_inner: Param::default(),
            halfwidth_outer: Param::default(),
            width_border: Param::default(),
            width_border_inner: Param::default(),
            pose: CylindricalPose::default(),
        }
    }
}
impl GratingBuilder {
    pub fn sag(mut self, sag: Sag) -> Self {
        self.sag = Some(sag);
        self
    }
    pub fn material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }
    /// Sets the groove spacing and the diffraction order
    pub fn rulings<L: Into<Param<Length>>>(self, spacing: L, diffraction_order: i32) -> Self {
        Self {
            rulings: Rulings {
                spacing: spacing.into(),
                diffraction_order,
            },
            ..self
        }
    }
    pub fn num_folds(self, num_folds: u32) -> Self {
        Self { num_folds, ..self }
    }
    /// Sets the distances from the vertex to the inner and outer edges of the clear aperture
    pub fn halfwidths<I, O>(self, inner: I, outer: O) -> Self
    where
        I: Into<Param<Length>>,
        O: Into<Param<Length>>,
    {
        Self {
            halfwidth_inner: inner.into(),
            halfwidth_outer: outer.into(),
            ..self
        }
    }
    /// Sets the widths of the borders along the inner and outer edges
    pub fn borders<I, O>(self, inner: I, outer: O) -> Self
    where
        I: Into<Param<Length>>,
        O: Into<Param<Length>>,
    {
        Self {
            width_border_inner: inner.into(),
            width_border: outer.into(),
            ..self
        }
    }
    pub fn pose(self, pose: CylindricalPose) -> Self {
        Self { pose, ..self }
    }
}
impl Builder for GratingBuilder {
    type Component = Grating;
    fn build(self) -> Result<Grating> {
        polygon::check_num_folds(self.num_folds)?;
        for (name, length) in [
            ("grating inner half width", &self.halfwidth_inner),
            ("grating outer half width", &self.halfwidth_outer),
            ("grating outer border width", &self.width_border),
            ("grating inner border width", &self.width_border_inner),
        ] {
            length.check_non_negative(name)?;
        }
        log::debug!(
            "grating in diffraction order {} with {} folds",
            self.rulings.diffraction_order,
            self.num_folds
        );
        Ok(Grating {
            sag: self.sag,
            material: self.material,
            rulings: self.rulings,
            num_folds: self.num_folds,
            halfwidth_inner: self.halfwidth_inner,
            halfwidth_outer: self.halfwidth_outer,
            width_border: self.width_border,
            width_border_inner: self.width_border_inner,
            pose: self.pose,
        })
    }
}
impl From<&Grating> for GratingBuilder {
    fn from(grating: &Grating) -> Self {
        Self {
            sag: grating.sag.clone(),
            material: grating.material.clone(),
            rulings: grating.rulings.clone(),
            num_folds: grating.num_folds,
            halfwidth_inner: grating.halfwidth_inner.clone(),
            halfwidth_outer: grating.halfwidth_outer.clone(),
            width_border: grating.width_border.clone(),
            width_border_inner: grating.width_border_inner.clone(),
            pose: grating.pose.clone(),
        }
    }
}

/// Diffraction grating of a spectrograph channel
///
/// The grating fills one wedge of the instrument: its aperture is an
/// isosceles trapezoid whose legs meet on the axis of symmetry.
#[derive(Debug, Clone, PartialEq)]
pub struct Grating {
    pub sag: Option<Sag>,
    pub material: Option<Material>,
    pub rulings: Rulings,
    pub num_folds: u32,
    pub halfwidth_inner: Param<Length>,
    pub halfwidth_outer: Param<Length>,
    pub width_border: Param<Length>,
    pub width_border_inner: Param<Length>,
    pub pose: CylindricalPose,
}
impl FromBuilder for Grating {
    type ComponentBuilder = GratingBuilder;
}
impl Polygonal for Grating {
    fn num_folds(&self) -> u32 {
        self.num_folds
    }
}
impl GratingGeometry for Grating {
    fn rulings(&self) -> &Rulings {
        &self.rulings
    }
    fn distance_radial(&self) -> &Param<Length> {
        &self.pose.distance_radial
    }
    fn halfwidth_inner(&self) -> &Param<Length> {
        &self.halfwidth_inner
    }
    fn halfwidth_outer(&self) -> &Param<Length> {
        &self.halfwidth_outer
    }
    fn width_border(&self) -> &Param<Length> {
        &self.width_border
    }
    fn width_border_inner(&self) -> &Param<Length> {
        &self.width_border_inner
    }
}
impl Grating {
    fn trapezoid(&self, x_left: Param<Length>, x_right: Param<Length>) -> Result<Aperture> {
        Ok(Aperture::isosceles_trapezoid(
            self.distance_radial().map(|r| -*r),
            x_left,
            x_right,
            self.angle_wedge()?.into(),
        ))
    }
}
impl Optic for Grating {
    fn name(&self) -> &str {
        "grating"
    }
    fn sag(&self) -> Option<&Sag> {
        self.sag.as_ref()
    }
    fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }
    fn transformation(&self) -> Transformation {
        self.pose.transformation()
    }
    fn surface(&self) -> Result<Surface> {
        self.width_border.check_non_negative("outer border width")?;
        self.width_border_inner
            .check_non_negative("inner border width")?;
        let x_left = self.halfwidth_inner.map(|h| -*h);
        let x_right = self.halfwidth_outer.clone();
        let x_left_mechanical = x_left.zip_with(&self.width_border_inner, |x, b| *x - *b)?;
        let x_right_mechanical = x_right.zip_with(&self.width_border, |x, b| *x + *b)?;
        let surface = Surface {
            name: self.name().into(),
            sag: self.sag.clone(),
            material: self.material.clone(),
            aperture: Some(self.trapezoid(x_left, x_right)?),
            aperture_mechanical: Some(self.trapezoid(x_left_mechanical, x_right_mechanical)?),
            rulings: Some(self.rulings.clone()),
            transformation: self.transformation(),
        };
        let shape = surface.shape()?;
        log::debug!("{surface} {shape:?}");
        Ok(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aperture::ApertureShape,
        units::{Angle, AngleExt, LengthExt},
        EsisError,
    };
    use approx::assert_relative_eq;

    fn mm(x: f64) -> Length {
        Length::from_millimeters(x)
    }

    fn grating() -> Grating {
        Grating::builder()
            .sag(Sag::toroidal(mm(-597.), mm(-1000.)))
            .material(Material::Multilayer {
                name: "Al/Mg".into(),
            })
            .rulings(Length::from_micrometers(1. / 2.586), 1)
            .num_folds(8)
            .halfwidths(mm(13.), mm(16.))
            .borders(mm(2.), mm(1.))
            .pose(
                CylindricalPose::default()
                    .distance_radial(mm(50.))
                    .azimuth(Angle::from_degrees(22.5)),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn wedge() {
        assert_relative_eq!(grating().angle_wedge().unwrap().as_degrees(), 45., epsilon = 1e-12);
    }

    #[test]
    fn trapezoidal_apertures() {
        let surface = grating().surface().unwrap();
        assert_eq!(surface.name, "grating");
        assert_eq!(surface.rulings.as_ref().unwrap().diffraction_order, 1);
        let edges = |shape: &ApertureShape| match shape {
            ApertureShape::IsoscelesTrapezoid {
                x_apex,
                x_left,
                x_right,
                ..
            } => [x_apex, x_left, x_right]
                .map(|x| x.as_scalar().unwrap().as_millimeters()),
            _ => panic!("expected a trapezoid"),
        };
        let [apex, left, right] = edges(&surface.aperture.unwrap().shape);
        assert_relative_eq!(apex, -50., epsilon = 1e-9);
        assert_relative_eq!(left, -13., epsilon = 1e-9);
        assert_relative_eq!(right, 16., epsilon = 1e-9);
        let [apex, left, right] = edges(&surface.aperture_mechanical.unwrap().shape);
        assert_relative_eq!(apex, -50., epsilon = 1e-9);
        assert_relative_eq!(left, -15., epsilon = 1e-9);
        assert_relative_eq!(right, 17., epsilon = 1e-9);
    }

    #[test]
    fn off_axis_vertex() {
        let surface = grating().surface().unwrap();
        let p = surface
            .transformation
            .transform_point([Length::default(); 3])
            .unwrap();
        let [x, y, _] = p.as_scalar().unwrap().map(|x| x.as_millimeters());
        let azimuth = 22.5f64.to_radians();
        assert_relative_eq!(x, 50. * azimuth.cos(), epsilon = 1e-9);
        assert_relative_eq!(y, 50. * azimuth.sin(), epsilon = 1e-9);
    }

    #[test]
    fn channels() {
        let azimuths: Vec<_> = (0..6)
            .map(|i| Angle::from_degrees(22.5 + 45. * i as f64))
            .collect();
        let grating = Grating {
            pose: grating().pose.azimuth(azimuths),
            ..grating()
        };
        let p = grating
            .transformation()
            .transform_point([Length::default(); 3])
            .unwrap();
        assert_eq!(p.shape(), &[6]);
    }

    #[test]
    fn odd_folds() {
        let grating = Grating {
            num_folds: 7,
            ..grating()
        };
        assert!(matches!(
            grating.surface(),
            Err(EsisError::UnsupportedConfiguration { num_folds: 7, .. })
        ));
    }

    #[test]
    fn negative_borders() {
        let builder = GratingBuilder::from(&grating());
        assert!(matches!(
            builder.clone().borders(mm(-2.), mm(1.)).build(),
            Err(EsisError::NegativeLength { .. })
        ));
        assert!(matches!(
            builder.halfwidths(mm(13.), mm(-16.)).build(),
            Err(EsisError::NegativeLength { .. })
        ));
        let grating = Grating {
            width_border: mm(-1.).into(),
            ..grating()
        };
        assert!(matches!(
            grating.surface(),
            Err(EsisError::NegativeLength { .. })
        ));
    }

    #[test]
    fn channel_and_width_ensembles_must_broadcast() {
        let azimuths: Vec<_> = (0..6)
            .map(|i| Angle::from_degrees(22.5 + 45. * i as f64))
            .collect();
        let grating = Grating {
            pose: grating().pose.azimuth(azimuths),
            halfwidth_outer: Param::from([15., 16.].map(mm).to_vec()),
            ..grating()
        };
        assert!(matches!(
            grating.surface(),
            Err(EsisError::ShapeMismatch { .. })
        ));
    }
}
